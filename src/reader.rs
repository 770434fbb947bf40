//! Strict line-range reads from a file.
//!
//! Line numbers are 1-based and inclusive. Out-of-range arguments are always
//! reported as errors, never clamped.
use log::trace;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors returned by the line reader.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Start line must be at least 1")]
    StartBeforeFirstLine,
    #[error("End line {end} is before start line {start}")]
    EndBeforeStart { start: usize, end: usize },
    #[error("Start line {start} is past the end of the file ({total} lines)")]
    StartOutOfRange { start: usize, total: usize },
    #[error("End line {end} is past the end of the file ({total} lines)")]
    EndOutOfRange { end: usize, total: usize },
    #[error("I/O error while reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadError {
    /// Returns `true` for errors caused by the requested line numbers, as
    /// opposed to a missing file or an I/O failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReadError::StartBeforeFirstLine
                | ReadError::EndBeforeStart { .. }
                | ReadError::StartOutOfRange { .. }
                | ReadError::EndOutOfRange { .. }
        )
    }
}

/// Reads lines `start_line..=end_line` of a file, keeping their terminators.
///
/// An `end_line` of `None` means the same line as `start_line`.
///
/// # Errors
///
/// Checks run in this order: the file must exist, `start_line` must be at
/// least 1, `end_line` must not be before `start_line`, and both must lie
/// within the file. An empty file has no valid range.
///
/// # Example
///
/// ```
/// # use codepatch::read_file_lines;
/// # use std::fs;
/// # use tempfile::tempdir;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempdir()?;
/// let path = dir.path().join("lib.rs");
/// fs::write(&path, "mod a;\nmod b;\nmod c;\n")?;
///
/// assert_eq!(read_file_lines(&path, 2, Some(3))?, "mod b;\nmod c;\n");
/// assert_eq!(read_file_lines(&path, 1, None)?, "mod a;\n");
/// assert!(read_file_lines(&path, 0, Some(2)).unwrap_err().is_validation());
/// # Ok(())
/// # }
/// ```
pub fn read_file_lines(
    path: impl AsRef<Path>,
    start_line: usize,
    end_line: Option<usize>,
) -> Result<String, ReadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReadError::NotFound(path.to_path_buf()));
    }
    if start_line < 1 {
        return Err(ReadError::StartBeforeFirstLine);
    }
    let end_line = end_line.unwrap_or(start_line);
    if end_line < start_line {
        return Err(ReadError::EndBeforeStart {
            start: start_line,
            end: end_line,
        });
    }

    let content = read_content(path)?;
    slice_lines(path, &content, start_line, end_line)
}

/// Reads a single line, including its terminator.
pub fn read_file_line(path: impl AsRef<Path>, line_number: usize) -> Result<String, ReadError> {
    read_file_lines(path, line_number, Some(line_number))
}

/// Reads from `start_line` to the last line of the file.
pub fn read_file_to_end(path: impl AsRef<Path>, start_line: usize) -> Result<String, ReadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ReadError::NotFound(path.to_path_buf()));
    }
    if start_line < 1 {
        return Err(ReadError::StartBeforeFirstLine);
    }
    let content = read_content(path)?;
    let total = content.split_inclusive('\n').count();
    // An empty file still goes through the start-line checks.
    slice_lines(path, &content, start_line, total.max(start_line))
}

/// Range checks against the file's line count, then the inclusive slice.
fn slice_lines(
    path: &Path,
    content: &str,
    start_line: usize,
    end_line: usize,
) -> Result<String, ReadError> {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();
    let total = lines.len();
    if start_line > total {
        return Err(ReadError::StartOutOfRange {
            start: start_line,
            total,
        });
    }
    if end_line > total {
        return Err(ReadError::EndOutOfRange {
            end: end_line,
            total,
        });
    }

    trace!(
        "Reading lines {}-{} of '{}'",
        start_line,
        end_line,
        path.display()
    );
    Ok(lines[start_line - 1..end_line].concat())
}

fn read_content(path: &Path) -> Result<String, ReadError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => ReadError::NotFound(path.to_path_buf()),
        _ => ReadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
