use super::Position;

/// Whether the tokenization succeeded.
pub type LexResult<T> = Result<T, LexicalError>;

/// No terminal matches the input at `position`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[ERROR] {position}: lexer could not identify token starting with {found:?}")]
pub struct LexicalError {
    pub position: Position,
    /// First character of the unrecognized input.
    pub found: char,
}
