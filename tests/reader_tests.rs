use codepatch::{read_file_line, read_file_lines, read_file_to_end, ReadError};
use std::fs;
use std::path::PathBuf;
use tempfile::{tempdir, TempDir};

const SAMPLE_LINES: [&str; 19] = [
    "#!/usr/bin/env python3",
    "# first comment line",
    "def hello_world():",
    "    \"\"\"A small test function\"\"\"",
    "    print(\"Hello, World!\")",
    "    return \"success\"",
    "",
    "class TestClass:",
    "    def __init__(self):",
    "        self.value = 42",
    "    ",
    "    def get_value(self):",
    "        return self.value",
    "",
    "if __name__ == \"__main__\":",
    "    # entry point",
    "    hello_world()",
    "    obj = TestClass()",
    "    print(f\"Value: {obj.get_value()}\")",
];

/// Writes the 19-line sample file and returns its directory and path.
fn sample_file() -> (TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.py");
    let content: String = SAMPLE_LINES.iter().map(|l| format!("{}\n", l)).collect();
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_read_single_line() {
    let (_dir, path) = sample_file();
    assert_eq!(read_file_line(&path, 1).unwrap(), "#!/usr/bin/env python3\n");
    assert_eq!(read_file_line(&path, 3).unwrap(), "def hello_world():\n");
    assert_eq!(
        read_file_line(&path, 19).unwrap(),
        "    print(f\"Value: {obj.get_value()}\")\n"
    );
}

#[test]
fn test_read_multiple_lines() {
    let (_dir, path) = sample_file();
    assert_eq!(
        read_file_lines(&path, 1, Some(3)).unwrap(),
        "#!/usr/bin/env python3\n# first comment line\ndef hello_world():\n"
    );
    let whole = read_file_lines(&path, 1, Some(19)).unwrap();
    assert_eq!(whole, fs::read_to_string(&path).unwrap());
}

#[test]
fn test_omitted_end_reads_one_line() {
    let (_dir, path) = sample_file();
    assert_eq!(
        read_file_lines(&path, 8, None).unwrap(),
        "class TestClass:\n"
    );
}

#[test]
fn test_start_line_zero_is_rejected() {
    let (_dir, path) = sample_file();
    let err = read_file_lines(&path, 0, Some(5)).unwrap_err();
    assert!(matches!(err, ReadError::StartBeforeFirstLine));
    assert!(err.is_validation());
}

#[test]
fn test_end_before_start_is_rejected() {
    let (_dir, path) = sample_file();
    let err = read_file_lines(&path, 5, Some(3)).unwrap_err();
    assert!(matches!(err, ReadError::EndBeforeStart { start: 5, end: 3 }));
}

#[test]
fn test_range_past_end_of_file_is_rejected() {
    let (_dir, path) = sample_file();
    let err = read_file_lines(&path, 100, Some(105)).unwrap_err();
    assert!(matches!(
        err,
        ReadError::StartOutOfRange {
            start: 100,
            total: 19
        }
    ));
    assert!(err.is_validation());

    let err = read_file_lines(&path, 15, Some(25)).unwrap_err();
    assert!(matches!(err, ReadError::EndOutOfRange { end: 25, total: 19 }));
}

#[test]
fn test_missing_file_is_not_a_validation_error() {
    let dir = tempdir().unwrap();
    let err = read_file_lines(dir.path().join("nope.py"), 1, None).unwrap_err();
    assert!(matches!(err, ReadError::NotFound(_)));
    assert!(!err.is_validation());
}

#[test]
fn test_missing_file_is_reported_before_bad_range() {
    let dir = tempdir().unwrap();
    let err = read_file_lines(dir.path().join("nope.py"), 0, Some(5)).unwrap_err();
    assert!(matches!(err, ReadError::NotFound(_)));
}

#[test]
fn test_single_line_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.txt");
    fs::write(&path, "only line\n").unwrap();
    assert_eq!(read_file_line(&path, 1).unwrap(), "only line\n");
    assert!(read_file_line(&path, 2).unwrap_err().is_validation());
}

#[test]
fn test_empty_file_has_no_valid_range() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, "").unwrap();

    let err = read_file_line(&path, 1).unwrap_err();
    assert!(matches!(err, ReadError::StartOutOfRange { start: 1, total: 0 }));
    assert!(read_file_lines(&path, 1, Some(3)).unwrap_err().is_validation());
    assert!(read_file_to_end(&path, 1).unwrap_err().is_validation());
}

#[test]
fn test_last_line_without_terminator() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tail.txt");
    fs::write(&path, "first\nsecond").unwrap();
    assert_eq!(read_file_line(&path, 2).unwrap(), "second");
}

#[test]
fn test_read_to_end() {
    let (_dir, path) = sample_file();
    assert_eq!(
        read_file_to_end(&path, 17).unwrap(),
        "    hello_world()\n    obj = TestClass()\n    print(f\"Value: {obj.get_value()}\")\n"
    );
    assert!(matches!(
        read_file_to_end(&path, 20).unwrap_err(),
        ReadError::StartOutOfRange { start: 20, .. }
    ));
}

#[test]
fn test_read_to_end_rejects_start_line_zero() {
    let (_dir, path) = sample_file();
    assert!(matches!(
        read_file_to_end(&path, 0).unwrap_err(),
        ReadError::StartBeforeFirstLine
    ));
}
