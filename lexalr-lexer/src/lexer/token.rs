use super::Position;
use crate::Terminal;

/// Piece of input recognized by a [`Terminal`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub terminal: Terminal,
    /// Position of the first character of the token.
    pub position: Position,
    /// Source text of the token.
    pub text: String,
}

impl Token {
    pub fn new(terminal: Terminal, position: Position, text: impl Into<String>) -> Self {
        Self {
            terminal,
            position,
            text: text.into(),
        }
    }

    pub fn is_eof(&self) -> bool {
        self.terminal.is_eof()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_eof() {
            write!(f, "{} at {}", self.terminal, self.position)
        } else {
            write!(f, "{} {:?} at {}", self.terminal, self.text, self.position)
        }
    }
}
