use lexalr_lexer::Terminal;

use std::rc::Rc;

/// Grammar symbol defined by rules. Two non-terminals with the same name are
/// the same symbol.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NonTerminal(Rc<str>);

impl NonTerminal {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for NonTerminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a single element of the clause of a [`Rule`](crate::Rule).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    Terminal(Terminal),
    NonTerminal(NonTerminal),
    /// Empty clause marker. It never takes part in a derivation.
    Epsilon,
}

impl Symbol {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_non_terminal(&self) -> Option<&NonTerminal> {
        match self {
            Symbol::NonTerminal(nt) => Some(nt),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl From<Terminal> for Symbol {
    fn from(terminal: Terminal) -> Self {
        Symbol::Terminal(terminal)
    }
}

impl From<&Terminal> for Symbol {
    fn from(terminal: &Terminal) -> Self {
        Symbol::Terminal(terminal.clone())
    }
}

impl From<NonTerminal> for Symbol {
    fn from(non_terminal: NonTerminal) -> Self {
        Symbol::NonTerminal(non_terminal)
    }
}

impl From<&NonTerminal> for Symbol {
    fn from(non_terminal: &NonTerminal) -> Self {
        Symbol::NonTerminal(non_terminal.clone())
    }
}

impl From<&Symbol> for Symbol {
    fn from(symbol: &Symbol) -> Self {
        symbol.clone()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(t) => write!(f, "{}", t),
            Symbol::NonTerminal(nt) => write!(f, "{}", nt),
            Symbol::Epsilon => write!(f, "ε"),
        }
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

/// Builds a `Vec<Symbol>` from terminals, non-terminals and symbols. The
/// arguments are taken by reference.
///
/// ```
/// use lexalr_lexer::Terminal;
/// use lexalr_parser::{symbols, NonTerminal, Symbol};
///
/// let expr = NonTerminal::new("Expr");
/// let plus = Terminal::from("+");
///
/// assert_eq!(symbols![expr, plus, expr].len(), 3);
/// ```
#[macro_export]
macro_rules! symbols {
    ($($symbol:expr),* $(,)?) => {
        ::std::vec![$($crate::Symbol::from(&$symbol)),*]
    };
}

/// Which side of an operator binds first when precedences are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    /// `a - b - c` parses as `(a - b) - c`.
    Left,
    /// `a = b = c` parses as `a = (b = c)`.
    Right,
}
