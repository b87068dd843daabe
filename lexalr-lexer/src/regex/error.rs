/// Whether the compilation of the regex succeeded.
pub type RegexResult<T> = core::result::Result<T, RegexError>;

/// Information about the error that occurred while compiling a regex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[ERROR] ({}, {}): {kind}", pos.0, pos.1)]
pub struct RegexError {
    pub kind: RegexErrorKind,
    /// Character range of the offending token in the pattern.
    pub pos: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexErrorKind {
    InvalidToken,
    RightParen,
    SubExpression,
    Atom,
    RangeBound,
    EmptySequence,
    TrailingInput,
    MatchesEmpty,
}

impl std::fmt::Display for RegexErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use RegexErrorKind::*;
        write!(
            f,
            "{}",
            match self {
                InvalidToken => "invalid token",
                RightParen => "expected RIGHT_PAREN",
                SubExpression => "expected at least one token for a sub expression",
                Atom => "expected QUOTED, WILDCARD or LEFT_PAREN",
                RangeBound => "range bounds must be single quoted characters",
                EmptySequence => "a quoted sequence must contain at least one character",
                TrailingInput => "unexpected input after the expression",
                MatchesEmpty => "expression matches the empty string",
            }
        )
    }
}
