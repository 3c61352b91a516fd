use thiserror::Error;

/// Errors raised while decoding an ownership string.
///
/// `line` is 1-based and counts blank lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OwnershipError {
    /// The line has no `:` between path and hunk list.
    #[error("line {line}: missing ':' between path and hunks")]
    MissingPathSeparator { line: usize },

    /// Nothing precedes the `:`.
    #[error("line {line}: empty file path")]
    EmptyPath { line: usize },

    /// Nothing follows the `:`.
    #[error("line {line}: no hunks listed for '{path}'")]
    NoHunks { line: usize, path: String },

    /// A hunk entry is not of the form `<id>-<hash>` or `<start>-<end>`.
    #[error("line {line}: malformed hunk entry '{entry}'")]
    MalformedHunk { line: usize, entry: String },

    /// A range bound is not an unsigned integer.
    #[error("line {line}: invalid line number '{value}'")]
    InvalidLineNumber { line: usize, value: String },

    /// A range ends before it starts.
    #[error("line {line}: range {start}-{end} ends before it starts")]
    InvertedRange { line: usize, start: u32, end: u32 },
}
