use std::io::{self, Read};
use std::sync::{Arc, Mutex};

use stream_forwarder::{CharSource, StreamForwarder};

const SCENARIOS: &[(&str, &[&str])] = &[
    ("", &[]),
    ("\n\n\n", &["\n", "\n", "\n"]),
    ("\r\n\r\n\r\n", &["\n", "\n", "\n"]),
    ("123", &["123"]),
    ("123\n", &["123\n"]),
    ("123\r\n", &["123\n"]),
    ("1234\n5678", &["1234\n", "5678"]),
    ("1234\r\n5678", &["1234\n", "5678"]),
    ("1234\n\n5678", &["1234\n", "\n", "5678"]),
    ("1234\r\n\r\n5678", &["1234\n", "\n", "5678"]),
    ("1234\n5678\n", &["1234\n", "5678\n"]),
    ("1234\r\n5678\r\n", &["1234\n", "5678\n"]),
    (
        "1234\n5678\nabcdefghijklmnopqrstuvwxyz",
        &["1234\n", "5678\n", "abcdefghijklmnopqrstuvwxyz"],
    ),
    (
        "1234\r\n5678\r\nabcdefghijklmnopqrstuvwxyz\r\n",
        &["1234\n", "5678\n", "abcdefghijklmnopqrstuvwxyz\n"],
    ),
];

#[derive(Clone, Copy)]
struct Options {
    capture: bool,
    forward: bool,
}

fn run(options: Options, input: &str) -> (Vec<String>, Option<String>) {
    let writes = Arc::new(Mutex::new(Vec::new()));
    let mut forwarder = StreamForwarder::new();
    if options.forward {
        let writes = Arc::clone(&writes);
        forwarder
            .forward_to(move |chunk: &str| writes.lock().unwrap().push(chunk.to_string()))
            .unwrap();
    }
    if options.capture {
        forwarder.capture().unwrap();
    }

    forwarder.read(input.as_bytes()).unwrap();

    let writes = writes.lock().unwrap().clone();
    (writes, forwarder.captured_output())
}

#[test]
fn forwarding_only() {
    for (input, expected) in SCENARIOS {
        let (writes, captured) = run(
            Options {
                capture: false,
                forward: true,
            },
            input,
        );
        assert_eq!(writes, *expected, "input {input:?}");
        assert_eq!(captured, None);
    }
}

#[test]
fn capture_only() {
    for (input, expected) in SCENARIOS {
        let (writes, captured) = run(
            Options {
                capture: true,
                forward: false,
            },
            input,
        );
        assert!(writes.is_empty());
        assert_eq!(captured, Some(expected.concat()), "input {input:?}");
    }
}

#[test]
fn capture_and_forwarding_together() {
    for (input, expected) in SCENARIOS {
        let (writes, captured) = run(
            Options {
                capture: true,
                forward: true,
            },
            input,
        );
        assert_eq!(writes, *expected, "input {input:?}");
        assert_eq!(captured, Some(writes.concat()), "input {input:?}");
    }
}

#[test]
fn no_forwarding_no_capture() {
    for input in ["123", "123\n"] {
        let (writes, captured) = run(
            Options {
                capture: false,
                forward: false,
            },
            input,
        );
        assert!(writes.is_empty());
        assert_eq!(captured, None);
    }
}

#[test]
fn decoded_sources_drive_the_same_state_machine() {
    let mut forwarder = StreamForwarder::new();
    forwarder.capture().unwrap();
    forwarder.read_chars("x\r\ny".chars()).unwrap();
    assert_eq!(forwarder.captured_output().as_deref(), Some("x\ny"));
}

struct FailAfter {
    data: io::Cursor<Vec<u8>>,
}

impl Read for FailAfter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.data.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::ConnectionReset, "pipe reset")),
            n => Ok(n),
        }
    }
}

#[test]
fn io_errors_propagate_and_drop_partial_line() {
    let mut forwarder = StreamForwarder::new();
    forwarder.capture().unwrap();
    let reader = FailAfter {
        data: io::Cursor::new(b"done\npartial".to_vec()),
    };

    let err = forwarder.read(reader).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
    assert_eq!(err.to_string(), "pipe reset");
    assert_eq!(forwarder.captured_output().as_deref(), Some("done\n"));
}

struct ScriptedSource {
    steps: Vec<io::Result<Option<char>>>,
}

impl CharSource for ScriptedSource {
    fn read_char(&mut self) -> io::Result<Option<char>> {
        if self.steps.is_empty() {
            return Ok(None);
        }
        self.steps.remove(0)
    }
}

#[test]
fn char_source_errors_are_returned_unchanged() {
    let mut forwarder = StreamForwarder::new();
    forwarder.capture().unwrap();
    let source = ScriptedSource {
        steps: vec![
            Ok(Some('a')),
            Ok(Some('\n')),
            Ok(Some('b')),
            Err(io::Error::new(io::ErrorKind::Other, "source closed")),
        ],
    };

    let err = forwarder.read_chars(source).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::Other);
    assert_eq!(forwarder.captured_output().as_deref(), Some("a\n"));
}

#[test]
fn invalid_utf8_fails_the_read() {
    let mut forwarder = StreamForwarder::new();
    forwarder.capture().unwrap();
    let err = forwarder.read(&b"ok\n\xFFbad"[..]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(forwarder.captured_output().as_deref(), Some("ok\n"));
}
