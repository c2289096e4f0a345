use thiserror::Error;

/// Errors raised while parsing a single patch line.
///
/// The streaming compiler drops failing lines silently; this type exists for
/// callers that parse lines themselves (e.g. to log or replay selectively).
#[derive(Debug, Error)]
pub enum PatchParseError {
    /// The line is not valid JSON, or does not match the patch shape.
    #[error("invalid patch line: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The line is empty or whitespace-only.
    #[error("blank patch line")]
    BlankLine,
}
