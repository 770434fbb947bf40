//! Patch, diff and file-reading tools for a command-line coding assistant.
//!
//! `codepatch` applies unified diffs to a single target file using the line
//! numbers in each `@@ ... @@` header. It does not search for context and it
//! does not verify deletion lines: a hunk removes exactly `old_count` lines at
//! `old_start` and puts its context and addition lines in their place.
//!
//! ## Getting Started
//!
//! ```rust
//! use codepatch::{apply_patch_to_file, ApplyOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempdir()?;
//! let file_path = dir.path().join("greeting.txt");
//! fs::write(&file_path, "Hello World\n")?;
//!
//! let patch = "--- greeting.txt\n+++ greeting.txt\n@@ -1 +1 @@\n-Hello World\n+Hello Universe";
//! let result = apply_patch_to_file(patch, &file_path, ApplyOptions::default())?;
//!
//! assert_eq!(result.hunks_applied, 1);
//! assert_eq!(fs::read_to_string(&file_path)?, "Hello Universe\n");
//! // A backup is written by default.
//! assert_eq!(fs::read_to_string(result.backup_path.unwrap())?, "Hello World\n");
//! # Ok(())
//! # }
//! ```
//!
//! ## Key Concepts
//!
//! - [`parse_patch`] turns patch text into a list of [`Hunk`]s. It never fails:
//!   lines it does not recognize are skipped.
//! - [`apply_hunks`] applies hunks to an in-memory line sequence, last hunk
//!   first, so a hunk that grows or shrinks the file never shifts the
//!   positions of hunks above it.
//! - [`apply_patch_to_file`] does the file work (backup, read, write) and
//!   reports errors as [`PatchError`]. [`apply_patch`] wraps it and only
//!   returns `true` or `false`.
//! - [`generate_unified_diff`] and [`generate_minimal_diff`] produce patches
//!   that round-trip through the applier.
//!
//! The [`reader`] and [`commands`] modules hold the other tools the assistant
//! exposes: strict line-range reads and built-in command classification.
use log::{debug, error, info, trace, warn};
use similar::udiff::unified_diff;
use similar::TextDiff;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod commands;
pub mod reader;

pub use commands::{
    get_command_type, is_builtin_command, process_builtin_command, BuiltinCommand, CommandOutcome,
    CommandType, UnknownCommand,
};
pub use reader::{read_file_line, read_file_lines, read_file_to_end, ReadError};

/// Suffix appended to the target path when a backup is written.
pub const BACKUP_SUFFIX: &str = ".orig";

// --- Error Types ---

/// The reason a hunk could not be applied to the line buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HunkApplyError {
    /// The hunk's original range reaches past the end of the buffer.
    #[error("Hunk {hunk_index} replaces {count} line(s) at offset {start} but the file has only {len} lines")]
    OutOfRange {
        /// The 1-based index of the hunk in the patch.
        hunk_index: usize,
        /// The 0-based offset the hunk starts at.
        start: usize,
        /// The number of original lines the hunk replaces.
        count: usize,
        /// The length of the buffer when the hunk was applied.
        len: usize,
    },
}

/// Represents the possible errors that can occur during patch operations.
#[derive(Error, Debug)]
pub enum PatchError {
    /// The patch text contained no valid `@@ -a,b +c,d @@` header.
    #[error("Patch contains no hunks")]
    NoHunks,
    /// The file to patch does not exist.
    #[error("Target file not found for patching: {0}")]
    TargetNotFound(PathBuf),
    /// The target path exists but is a directory, not a file.
    #[error("Target path is a directory, not a file: {path:?}")]
    TargetIsDirectory { path: PathBuf },
    /// The user does not have permission to read or write to the specified path.
    #[error("Permission denied for path: {path:?}")]
    PermissionDenied { path: PathBuf },
    /// An I/O error occurred while reading or writing a file.
    #[error("I/O error while processing {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A hunk did not fit the target file.
    #[error(transparent)]
    Hunk(#[from] HunkApplyError),
}

// --- Data Structures ---

/// A single change line inside a hunk, stored without its prefix character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// A line present in both versions (prefix `' '`).
    Context(String),
    /// A line only in the new version (prefix `'+'`).
    Addition(String),
    /// A line only in the old version (prefix `'-'`).
    Deletion(String),
}

impl Change {
    /// The line text without the diff prefix.
    pub fn text(&self) -> &str {
        match self {
            Change::Context(s) | Change::Addition(s) | Change::Deletion(s) => s,
        }
    }

    fn prefix(&self) -> char {
        match self {
            Change::Context(_) => ' ',
            Change::Addition(_) => '+',
            Change::Deletion(_) => '-',
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.text())
    }
}

/// The numbers parsed from a `@@ -old_start,old_count +new_start,new_count @@` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
}

/// How one line of patch text is treated by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchLine<'a> {
    /// A hunk header. Closes the open hunk and opens a new one.
    Header(HunkHeader),
    /// A line starting with `' '`.
    Context(&'a str),
    /// A line starting with `'+'`.
    Addition(&'a str),
    /// A line starting with `'-'`.
    Deletion(&'a str),
    /// Anything else: blank lines, `\ No newline at end of file`, prose.
    Ignored,
}

/// Represents one contiguous block of change from a parsed patch.
///
/// Only `old_start` and `old_count` are used to position the hunk. The
/// `new_*` fields are kept for display and inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// 1-based line in the original file where the hunk begins.
    pub old_start: usize,
    /// Number of original lines the hunk replaces.
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
    /// The change lines in the order they appeared.
    pub changes: Vec<Change>,
}

impl Hunk {
    fn open(header: HunkHeader) -> Self {
        Self {
            old_start: header.old_start,
            old_count: header.old_count,
            new_start: header.new_start,
            new_count: header.new_count,
            changes: Vec::new(),
        }
    }

    /// The lines that replace the original range, each terminated with `\n`.
    ///
    /// Context and addition lines contribute one line each; deletion lines
    /// contribute nothing.
    ///
    /// # Example
    ///
    /// ```
    /// # use codepatch::{Change, Hunk};
    /// let hunk = Hunk {
    ///     old_start: 1,
    ///     old_count: 2,
    ///     new_start: 1,
    ///     new_count: 2,
    ///     changes: vec![
    ///         Change::Context("context".to_string()),
    ///         Change::Deletion("deleted".to_string()),
    ///         Change::Addition("added".to_string()),
    ///     ],
    /// };
    /// assert_eq!(hunk.replacement_lines(), vec!["context\n", "added\n"]);
    /// ```
    pub fn replacement_lines(&self) -> Vec<String> {
        self.changes
            .iter()
            .filter_map(|change| match change {
                Change::Context(s) | Change::Addition(s) => Some(format!("{}\n", s)),
                Change::Deletion(_) => None,
            })
            .collect()
    }

    /// Context lines, without prefix.
    pub fn context_lines(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Context(_)))
            .map(Change::text)
            .collect()
    }

    /// Added lines, without prefix.
    pub fn added_lines(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Addition(_)))
            .map(Change::text)
            .collect()
    }

    /// Removed lines, without prefix. These are informational only; the
    /// applier never compares them with the file.
    pub fn removed_lines(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Deletion(_)))
            .map(Change::text)
            .collect()
    }

    /// Checks if the hunk contains any additions or deletions.
    pub fn has_changes(&self) -> bool {
        self.changes
            .iter()
            .any(|c| !matches!(c, Change::Context(_)))
    }

    /// The 0-based offset of the first original line this hunk replaces.
    ///
    /// A start of 0 (as in `@@ -0,0 +1,2 @@`) is treated as the top of the file.
    pub fn offset(&self) -> usize {
        self.old_start.saturating_sub(1)
    }
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )?;
        for change in &self.changes {
            write!(f, "\n{}", change)?;
        }
        Ok(())
    }
}

/// Options for configuring how a patch is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOptions {
    /// If `true`, the unmodified content is saved to `<file>.orig` before the
    /// target is overwritten. Any existing backup is replaced.
    pub backup: bool,
    /// If `true`, no files are written. A diff of the proposed change is
    /// returned in [`PatchResult::diff`] instead.
    pub dry_run: bool,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            backup: true,
            dry_run: false,
        }
    }
}

impl ApplyOptions {
    /// Creates a new builder for `ApplyOptions`.
    ///
    /// # Example
    ///
    /// ```
    /// # use codepatch::ApplyOptions;
    /// let options = ApplyOptions::builder().backup(false).dry_run(true).build();
    ///
    /// assert!(!options.backup);
    /// assert!(options.dry_run);
    /// ```
    pub fn builder() -> ApplyOptionsBuilder {
        ApplyOptionsBuilder::default()
    }
}

/// A builder for creating `ApplyOptions`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptionsBuilder {
    backup: Option<bool>,
    dry_run: Option<bool>,
}

impl ApplyOptionsBuilder {
    /// Whether to write a `.orig` backup before overwriting the target.
    pub fn backup(mut self, backup: bool) -> Self {
        self.backup = Some(backup);
        self
    }

    /// Whether to leave the filesystem untouched and return a diff instead.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    /// Builds the `ApplyOptions`.
    pub fn build(self) -> ApplyOptions {
        let default = ApplyOptions::default();
        ApplyOptions {
            backup: self.backup.unwrap_or(default.backup),
            dry_run: self.dry_run.unwrap_or(default.dry_run),
        }
    }
}

/// The result of a successful [`apply_patch_to_file`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchResult {
    /// Number of hunks applied.
    pub hunks_applied: usize,
    /// Where the original content was saved, if a backup was written.
    pub backup_path: Option<PathBuf>,
    /// The unified diff of the proposed changes. Only populated in dry-run mode.
    pub diff: Option<String>,
}

// --- Parsing ---

/// Parses a hunk header line such as `@@ -12,3 +12,4 @@ fn main()`.
///
/// Counts default to 1 when omitted. Text after the closing `@@` is allowed.
/// Returns `None` for anything that does not match the header form exactly.
///
/// # Example
///
/// ```
/// # use codepatch::{parse_hunk_header, HunkHeader};
/// assert_eq!(
///     parse_hunk_header("@@ -3 +3,2 @@"),
///     Some(HunkHeader { old_start: 3, old_count: 1, new_start: 3, new_count: 2 })
/// );
/// assert_eq!(parse_hunk_header("@@ -a,1 +1 @@"), None);
/// ```
pub fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let rest = line.strip_prefix("@@ -")?;
    let (old_range, rest) = rest.split_once(" +")?;
    let (new_range, _) = rest.split_once(" @@")?;
    let (old_start, old_count) = parse_range(old_range)?;
    let (new_start, new_count) = parse_range(new_range)?;
    Some(HunkHeader {
        old_start,
        old_count,
        new_start,
        new_count,
    })
}

/// Parses `start` or `start,count`.
fn parse_range(range: &str) -> Option<(usize, usize)> {
    let (start, count) = match range.split_once(',') {
        Some((start, count)) => (start, Some(count)),
        None => (range, None),
    };
    let start = parse_number(start)?;
    let count = match count {
        Some(count) => parse_number(count)?,
        None => 1,
    };
    Some((start, count))
}

fn parse_number(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Classifies one line of patch text.
///
/// # Example
///
/// ```
/// # use codepatch::{classify_line, PatchLine};
/// assert_eq!(classify_line("+added"), PatchLine::Addition("added"));
/// assert_eq!(classify_line(" kept"), PatchLine::Context("kept"));
/// assert_eq!(classify_line("\\ No newline at end of file"), PatchLine::Ignored);
/// ```
pub fn classify_line(line: &str) -> PatchLine<'_> {
    if let Some(header) = parse_hunk_header(line) {
        return PatchLine::Header(header);
    }
    if let Some(text) = line.strip_prefix(' ') {
        PatchLine::Context(text)
    } else if let Some(text) = line.strip_prefix('+') {
        PatchLine::Addition(text)
    } else if let Some(text) = line.strip_prefix('-') {
        PatchLine::Deletion(text)
    } else {
        PatchLine::Ignored
    }
}

/// Parses a unified-diff string into its hunks, in the order they appear.
///
/// Lines before the first header (such as `---`/`+++` file lines) are
/// ignored. Malformed lines are skipped without closing the open hunk.
/// A patch with no valid header yields an empty list.
///
/// # Example
///
/// ```
/// # use codepatch::parse_patch;
/// let patch = "--- a.txt\n+++ a.txt\n@@ -1 +1 @@\n-old\n+new\n@@ -5,2 +5 @@\n one\n-two\n";
/// let hunks = parse_patch(patch);
///
/// assert_eq!(hunks.len(), 2);
/// assert_eq!(hunks[0].removed_lines(), vec!["old"]);
/// assert_eq!(hunks[1].old_start, 5);
/// assert_eq!(hunks[1].new_count, 1);
/// ```
pub fn parse_patch(patch: &str) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut current: Option<Hunk> = None;

    for line in patch.split('\n') {
        match classify_line(line) {
            PatchLine::Header(header) => {
                if let Some(hunk) = current.take() {
                    hunks.push(hunk);
                }
                trace!(
                    "  Opening hunk at original line {} ({} lines)",
                    header.old_start,
                    header.old_count
                );
                current = Some(Hunk::open(header));
            }
            PatchLine::Context(text) => push_change(&mut current, Change::Context(text.into())),
            PatchLine::Addition(text) => push_change(&mut current, Change::Addition(text.into())),
            PatchLine::Deletion(text) => push_change(&mut current, Change::Deletion(text.into())),
            PatchLine::Ignored => {}
        }
    }

    if let Some(hunk) = current {
        hunks.push(hunk);
    }
    debug!("Parsed {} hunk(s) from patch.", hunks.len());
    hunks
}

fn push_change(current: &mut Option<Hunk>, change: Change) {
    // Change lines before the first header have no hunk to belong to.
    if let Some(hunk) = current {
        hunk.changes.push(change);
    }
}

// --- Applying ---

/// Applies hunks to a line sequence and returns the patched sequence.
///
/// Each hunk removes `old_count` lines starting at `old_start - 1` and
/// inserts its context and addition lines there. Hunks are applied from the
/// last to the first, so every hunk sees the original numbering of the lines
/// above it. The removed lines are not compared with the hunk's deletion lines.
///
/// # Errors
///
/// Returns [`HunkApplyError::OutOfRange`] if a hunk's range ends past the
/// current length of the buffer. Ranges are never clamped.
///
/// # Example
///
/// ```
/// # use codepatch::{apply_hunks, parse_patch};
/// let original = vec!["a\n", "b\n", "c\n", "d\n"];
/// let hunks = parse_patch("@@ -1,1 +1,2 @@\n a\n+a2\n@@ -4,1 +5,0 @@\n-d\n");
///
/// let patched = apply_hunks(&original, &hunks).unwrap();
/// assert_eq!(patched, vec!["a\n", "a2\n", "b\n", "c\n"]);
/// ```
pub fn apply_hunks<T: AsRef<str>>(
    original_lines: &[T],
    hunks: &[Hunk],
) -> Result<Vec<String>, HunkApplyError> {
    let mut lines: Vec<String> = original_lines
        .iter()
        .map(|l| l.as_ref().to_string())
        .collect();

    for (i, hunk) in hunks.iter().enumerate().rev() {
        let hunk_index = i + 1;
        let start = hunk.offset();
        let Some(end) = start
            .checked_add(hunk.old_count)
            .filter(|&end| end <= lines.len())
        else {
            return Err(HunkApplyError::OutOfRange {
                hunk_index,
                start,
                count: hunk.old_count,
                len: lines.len(),
            });
        };
        if !hunk.has_changes() {
            debug!(
                "  Hunk {}/{} has only context lines.",
                hunk_index,
                hunks.len()
            );
        }
        let replacement = hunk.replacement_lines();
        debug!(
            "  Hunk {}/{}: replacing {} line(s) at line {} with {}.",
            hunk_index,
            hunks.len(),
            hunk.old_count,
            start + 1,
            replacement.len()
        );
        lines.splice(start..end, replacement);
    }

    Ok(lines)
}

/// Splits text into lines that keep their `\n` terminators.
pub fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

/// The path a backup of `file_path` is written to: the full path plus `.orig`.
///
/// ```
/// # use codepatch::backup_path_for;
/// # use std::path::Path;
/// assert_eq!(backup_path_for(Path::new("src/main.rs")), Path::new("src/main.rs.orig"));
/// ```
pub fn backup_path_for(file_path: &Path) -> PathBuf {
    let mut path = file_path.as_os_str().to_owned();
    path.push(BACKUP_SUFFIX);
    PathBuf::from(path)
}

/// A backup copy of the target that outlives a failed patch.
///
/// The copy is written on creation. If the guard is dropped before
/// [`Backup::release`] is called, the location of the preserved content is
/// logged so it can be restored by hand. Nothing is rolled back.
struct Backup {
    path: PathBuf,
    released: bool,
}

impl Backup {
    fn create(target: &Path, original_content: &str) -> Result<Self, PatchError> {
        let path = backup_path_for(target);
        trace!("  Writing backup to '{}'", path.display());
        fs::write(&path, original_content).map_err(|e| map_io_error(path.clone(), e))?;
        Ok(Self {
            path,
            released: false,
        })
    }

    fn release(mut self) -> PathBuf {
        self.released = true;
        std::mem::take(&mut self.path)
    }
}

impl Drop for Backup {
    fn drop(&mut self) {
        if !self.released {
            warn!(
                "  Patch did not complete. Original content is kept in '{}'",
                self.path.display()
            );
        }
    }
}

/// Converts a `std::io::Error` into a more specific `PatchError`.
pub(crate) fn map_io_error(path: PathBuf, e: std::io::Error) -> PatchError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => PatchError::PermissionDenied { path },
        std::io::ErrorKind::NotFound => PatchError::TargetNotFound(path),
        _ => PatchError::Io { path, source: e },
    }
}

/// Applies a unified-diff string to a file on disk.
///
/// The steps run in this order: parse the patch, check the target exists,
/// read it, write the backup (unless disabled or in dry-run mode), apply the
/// hunks in memory, overwrite the target. The backup is always on disk before
/// the target is touched. A failed hunk leaves the target unmodified.
///
/// # Errors
///
/// - [`PatchError::NoHunks`] if the patch has no valid header.
/// - [`PatchError::TargetNotFound`] / [`PatchError::TargetIsDirectory`] if
///   there is no file to patch. Nothing is written in that case.
/// - [`PatchError::Hunk`] if a hunk's range does not fit the file.
/// - [`PatchError::Io`] / [`PatchError::PermissionDenied`] for I/O failures.
///
/// # Example
///
/// ```
/// # use codepatch::{apply_patch_to_file, ApplyOptions};
/// # use std::fs;
/// # use tempfile::tempdir;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dir = tempdir()?;
/// let file_path = dir.path().join("notes.txt");
/// fs::write(&file_path, "one\ntwo\n")?;
///
/// let options = ApplyOptions::builder().dry_run(true).build();
/// let result = apply_patch_to_file("@@ -2 +2 @@\n-two\n+2", &file_path, options)?;
///
/// assert!(result.diff.unwrap().contains("+2"));
/// assert_eq!(fs::read_to_string(&file_path)?, "one\ntwo\n");
/// # Ok(())
/// # }
/// ```
pub fn apply_patch_to_file(
    patch: &str,
    file_path: &Path,
    options: ApplyOptions,
) -> Result<PatchResult, PatchError> {
    info!("Applying patch to: {}", file_path.display());

    let hunks = parse_patch(patch);
    if hunks.is_empty() {
        return Err(PatchError::NoHunks);
    }

    if file_path.is_dir() {
        return Err(PatchError::TargetIsDirectory {
            path: file_path.to_path_buf(),
        });
    }
    if !file_path.is_file() {
        return Err(PatchError::TargetNotFound(file_path.to_path_buf()));
    }

    let original_content =
        fs::read_to_string(file_path).map_err(|e| map_io_error(file_path.to_path_buf(), e))?;
    let original_lines = split_lines(&original_content);
    trace!("  Read {} lines from target file.", original_lines.len());

    let backup = if options.backup && !options.dry_run {
        Some(Backup::create(file_path, &original_content)?)
    } else {
        None
    };

    let new_content = apply_hunks(&original_lines, &hunks)?.concat();

    if options.dry_run {
        info!("  DRY RUN: Would write changes to '{}'", file_path.display());
        let diff = unified_diff(
            similar::Algorithm::default(),
            &original_content,
            &new_content,
            3,
            Some(("a", "b")),
        );
        return Ok(PatchResult {
            hunks_applied: hunks.len(),
            backup_path: None,
            diff: Some(diff),
        });
    }

    fs::write(file_path, new_content).map_err(|e| map_io_error(file_path.to_path_buf(), e))?;
    info!(
        "  Successfully wrote {} hunk(s) to '{}'",
        hunks.len(),
        file_path.display()
    );

    Ok(PatchResult {
        hunks_applied: hunks.len(),
        backup_path: backup.map(Backup::release),
        diff: None,
    })
}

/// Applies a unified-diff string to a file and reports only success.
///
/// This is the entry point the assistant's tool layer calls. Every error from
/// [`apply_patch_to_file`] is logged and turned into `false`.
///
/// # Example
///
/// ```
/// # use codepatch::apply_patch;
/// # use tempfile::tempdir;
/// let dir = tempdir().unwrap();
/// let missing = dir.path().join("missing.txt");
///
/// assert!(!apply_patch("@@ -1 +1 @@\n-a\n+b", &missing, true));
/// assert!(!missing.exists());
/// ```
pub fn apply_patch(patch: &str, file_path: impl AsRef<Path>, backup: bool) -> bool {
    let options = ApplyOptions::builder().backup(backup).build();
    match apply_patch_to_file(patch, file_path.as_ref(), options) {
        Ok(_) => true,
        Err(e) => {
            error!("Error applying patch: {}", e);
            false
        }
    }
}

// --- Diff Generation ---

/// Generates a unified diff by comparing lines at the same index.
///
/// This is a positional comparison, not an alignment: equal lines become
/// context, and a differing pair becomes a deletion followed by an addition.
/// One inserted or removed line therefore makes every later line differ, and
/// the single hunk covers the whole file. Use [`generate_minimal_diff`] for a
/// diff that aligns unchanged lines.
///
/// The output has no trailing newline. Line terminators are stripped from
/// each emitted line.
///
/// # Example
///
/// ```
/// # use codepatch::generate_unified_diff;
/// let diff = generate_unified_diff(&["a\n", "b\n"], &["a\n", "c\n"], "old.txt", "new.txt");
/// assert_eq!(diff, "--- old.txt\n+++ new.txt\n@@ -1,2 +1,2 @@\n a\n-b\n+c");
/// ```
pub fn generate_unified_diff<T: AsRef<str>>(
    old_lines: &[T],
    new_lines: &[T],
    old_label: &str,
    new_label: &str,
) -> String {
    let mut diff_lines = vec![format!("--- {}", old_label), format!("+++ {}", new_label)];

    let max_len = old_lines.len().max(new_lines.len());
    let mut changes = Vec::with_capacity(max_len);
    for i in 0..max_len {
        let old_line: Option<&str> = old_lines.get(i).map(|l| l.as_ref());
        let new_line: Option<&str> = new_lines.get(i).map(|l| l.as_ref());
        if old_line == new_line {
            if let Some(line) = old_line {
                changes.push(Change::Context(strip_terminator(line).to_string()));
            }
            continue;
        }
        if let Some(line) = old_line {
            changes.push(Change::Deletion(strip_terminator(line).to_string()));
        }
        if let Some(line) = new_line {
            changes.push(Change::Addition(strip_terminator(line).to_string()));
        }
    }

    if !changes.is_empty() {
        let hunk = Hunk {
            old_start: 1,
            old_count: old_lines.len(),
            new_start: 1,
            new_count: new_lines.len(),
            changes,
        };
        diff_lines.push(hunk.to_string());
    }

    diff_lines.join("\n")
}

fn strip_terminator(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

/// Generates a unified diff with aligned context using an LCS-based algorithm.
///
/// Unlike [`generate_unified_diff`], unchanged lines stay context even when
/// lines are inserted or removed above them, and hunks carry three lines of
/// surrounding context.
///
/// # Example
///
/// ```
/// # use codepatch::{apply_hunks, generate_minimal_diff, parse_patch, split_lines};
/// let old = "a\nb\nc\n";
/// let new = "a\nx\nb\nc\n";
/// let diff = generate_minimal_diff(old, new, "a/f.txt", "b/f.txt");
///
/// let patched = apply_hunks(&split_lines(old), &parse_patch(&diff)).unwrap();
/// assert_eq!(patched.concat(), new);
/// ```
pub fn generate_minimal_diff(
    old_text: &str,
    new_text: &str,
    old_label: &str,
    new_label: &str,
) -> String {
    let diff = TextDiff::from_lines(old_text, new_text);
    diff.unified_diff()
        .context_radius(3)
        .header(old_label, new_label)
        .to_string()
}

/// Creates a positional patch from two files, labelled with their paths.
///
/// See [`generate_unified_diff`] for the format and its limitations.
pub fn create_patch(old_file: &Path, new_file: &Path) -> Result<String, PatchError> {
    let old_content =
        fs::read_to_string(old_file).map_err(|e| map_io_error(old_file.to_path_buf(), e))?;
    let new_content =
        fs::read_to_string(new_file).map_err(|e| map_io_error(new_file.to_path_buf(), e))?;
    Ok(generate_unified_diff(
        &split_lines(&old_content),
        &split_lines(&new_content),
        &old_file.display().to_string(),
        &new_file.display().to_string(),
    ))
}

/// Like [`create_patch`], but uses [`generate_minimal_diff`].
pub fn create_minimal_patch(old_file: &Path, new_file: &Path) -> Result<String, PatchError> {
    let old_content =
        fs::read_to_string(old_file).map_err(|e| map_io_error(old_file.to_path_buf(), e))?;
    let new_content =
        fs::read_to_string(new_file).map_err(|e| map_io_error(new_file.to_path_buf(), e))?;
    Ok(generate_minimal_diff(
        &old_content,
        &new_content,
        &old_file.display().to_string(),
        &new_file.display().to_string(),
    ))
}
