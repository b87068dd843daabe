//! Regex ast.
//!
//! # Grammar
//!
//! ```ebnf
//!     expression ::= alternative+;
//!     alternative ::= item (VERTICAL item)*;
//!     item ::= atom QUANTIFIER*;
//!     atom ::= LEFT_PAREN expression RIGHT_PAREN | QUOTED (RANGE QUOTED)? | WILDCARD;
//! ```

use super::tokenizer::QuantifierKind;

/// Regular expression kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExprKind {
    /// A quoted character sequence (e.g., `'while'`).
    Sequence(Vec<char>),
    /// An inclusive character range (e.g., `'a'..'z'`).
    Range(char, char),
    /// Any character (`.`).
    Wildcard,
    /// Concatenation of regular expressions.
    Concat(Vec<ExprKind>),
    /// An alternative expression (e.g., `<expression> | <expression>`).
    Alt(Box<ExprKind>, Box<ExprKind>),
    /// A quantified expression (e.g., `'a'*`, `('a' | 'b')+`).
    Quantified(Box<ExprKind>, QuantifierKind),
}

impl ExprKind {
    /// Whether the expression matches the empty string.
    pub(crate) fn is_nullable(&self) -> bool {
        use ExprKind::*;
        match self {
            Sequence(chars) => chars.is_empty(),
            Range(..) | Wildcard => false,
            Concat(exprs) => exprs.iter().all(ExprKind::is_nullable),
            Alt(lhs, rhs) => lhs.is_nullable() || rhs.is_nullable(),
            Quantified(expr, QuantifierKind::Plus) => expr.is_nullable(),
            Quantified(_, QuantifierKind::Asterisk | QuantifierKind::QuestionMark) => true,
        }
    }
}

fn quote(chars: &[char]) -> String {
    chars
        .iter()
        .map(|ch| match ch {
            '\'' => "\\'".to_string(),
            '\\' => "\\\\".to_string(),
            '\n' => "\\n".to_string(),
            '\r' => "\\r".to_string(),
            '\t' => "\\t".to_string(),
            '\u{000C}' => "\\f".to_string(),
            '\0' => "\\0".to_string(),
            ch => ch.to_string(),
        })
        .collect()
}

impl std::fmt::Display for QuantifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use QuantifierKind::*;
        let quantifier = match self {
            Asterisk => "*",
            Plus => "+",
            QuestionMark => "?",
        };
        write!(f, "{}", quantifier)
    }
}

/// Renders the expression back into the mini-language. Sub expressions are
/// parenthesized wherever precedence requires it.
impl std::fmt::Display for ExprKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ExprKind::*;
        match self {
            Sequence(chars) => write!(f, "'{}'", quote(chars)),
            Range(lo, hi) => write!(f, "'{}'..'{}'", quote(&[*lo]), quote(&[*hi])),
            Wildcard => write!(f, "."),
            Concat(exprs) => exprs.iter().try_for_each(|expr| write!(f, "{}", expr)),
            Alt(lhs, rhs) => {
                match lhs.as_ref() {
                    Concat(..) => write!(f, "({})", lhs)?,
                    _ => write!(f, "{}", lhs)?,
                }
                match rhs.as_ref() {
                    Concat(..) | Alt(..) => write!(f, "|({})", rhs),
                    _ => write!(f, "|{}", rhs),
                }
            }
            Quantified(expr, quantifier) => match expr.as_ref() {
                Sequence(chars) if chars.len() == 1 => write!(f, "{}{}", expr, quantifier),
                Range(..) | Wildcard => write!(f, "{}{}", expr, quantifier),
                _ => write!(f, "({}){}", expr, quantifier),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ExprKind::*, QuantifierKind};

    #[test]
    fn nullable() {
        assert!(!Sequence(vec!['a']).is_nullable());
        assert!(Quantified(Box::new(Wildcard), QuantifierKind::QuestionMark).is_nullable());
        assert!(Alt(
            Box::new(Wildcard),
            Box::new(Quantified(Box::new(Wildcard), QuantifierKind::Asterisk))
        )
        .is_nullable());
        assert!(!Concat(vec![
            Quantified(Box::new(Wildcard), QuantifierKind::Asterisk),
            Range('a', 'z'),
        ])
        .is_nullable());
    }

    #[test]
    fn display() {
        let expr = Concat(vec![
            Sequence(vec!['i', 'f']),
            Quantified(
                Box::new(Alt(Box::new(Range('a', 'z')), Box::new(Wildcard))),
                QuantifierKind::Plus,
            ),
        ]);
        assert_eq!(expr.to_string(), "'if'('a'..'z'|.)+");

        let expr = Alt(
            Box::new(Concat(vec![Sequence(vec!['a']), Sequence(vec!['b'])])),
            Box::new(Alt(Box::new(Wildcard), Box::new(Range('0', '9')))),
        );
        assert_eq!(expr.to_string(), "('a''b')|(.|'0'..'9')");
    }
}
