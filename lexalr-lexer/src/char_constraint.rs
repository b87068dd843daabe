//! Predicates over a single character.
//!
//! Constraints are built from a handful of combinators and guard the
//! transitions of an [`Automaton`](crate::Automaton). Every constraint has a
//! canonical textual rendering (see the [`Display`](std::fmt::Display) impl)
//! which is stable and can be used for diagnostics and code generation.

#[cfg(test)]
use proptest_derive::Arbitrary;

/// Structural predicate over one `char`.
///
/// Two constraints are equal when they are built the same way; no attempt
/// is made at deciding semantic equivalence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CharConstraint {
    /// Matches every character.
    Any,
    /// Matches exactly the given character.
    Eq(char),
    /// Matches every character in the inclusive range.
    InRange(char, char),
    /// Matches every character of the list.
    InList(Vec<char>),
    /// Matches whatever the inner constraint rejects.
    Not(Box<CharConstraint>),
    /// Matches when at least one of the constraints matches.
    Or(Vec<CharConstraint>),
    /// Matches when all of the constraints match.
    And(Vec<CharConstraint>),
}

impl CharConstraint {
    pub fn any() -> Self {
        Self::Any
    }

    pub fn equals(ch: char) -> Self {
        Self::Eq(ch)
    }

    /// Matches every character `c` with `lo <= c <= hi`. An inverted range
    /// matches nothing.
    pub fn in_range(lo: char, hi: char) -> Self {
        Self::InRange(lo, hi)
    }

    pub fn in_list(chars: impl IntoIterator<Item = char>) -> Self {
        Self::InList(chars.into_iter().collect())
    }

    pub fn not(constraint: CharConstraint) -> Self {
        Self::Not(Box::new(constraint))
    }

    /// Disjunction of all the given constraints. An empty disjunction matches
    /// nothing.
    pub fn or(constraints: impl IntoIterator<Item = CharConstraint>) -> Self {
        Self::Or(constraints.into_iter().collect())
    }

    /// Conjunction of all the given constraints. An empty conjunction matches
    /// everything.
    pub fn and(constraints: impl IntoIterator<Item = CharConstraint>) -> Self {
        Self::And(constraints.into_iter().collect())
    }

    /// Evaluates the predicate for `ch`.
    pub fn apply(&self, ch: char) -> bool {
        match self {
            Self::Any => true,
            Self::Eq(expected) => ch == *expected,
            Self::InRange(lo, hi) => *lo <= ch && ch <= *hi,
            Self::InList(chars) => chars.contains(&ch),
            Self::Not(inner) => !inner.apply(ch),
            Self::Or(inner) => inner.iter().any(|c| c.apply(ch)),
            Self::And(inner) => inner.iter().all(|c| c.apply(ch)),
        }
    }
}

/// Escapes a character the way it would be written inside a quoted literal.
fn escape(ch: char) -> String {
    match ch {
        '"' => "\"".to_string(),
        ch => ch.escape_default().collect(),
    }
}

fn join_with(
    f: &mut std::fmt::Formatter<'_>,
    constraints: &[CharConstraint],
    operator: &str,
) -> std::fmt::Result {
    write!(f, "(")?;
    for (i, constraint) in constraints.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", operator)?;
        }
        write!(f, "({})", constraint)?;
    }
    write!(f, ")")
}

impl std::fmt::Display for CharConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "true"),
            Self::Eq(ch) => write!(f, "c == '{}'", escape(*ch)),
            Self::InRange(lo, hi) => write!(f, "(c >= '{}' && c <= '{}')", escape(*lo), escape(*hi)),
            Self::InList(chars) => write!(
                f,
                "\"{}\".indexOf(c) > -1",
                chars
                    .iter()
                    .map(|ch| match ch {
                        '"' => "\\\"".to_string(),
                        ch => escape(*ch),
                    })
                    .collect::<String>()
            ),
            Self::Not(inner) => write!(f, "!({})", inner),
            Self::Or(inner) if inner.is_empty() => write!(f, "false"),
            Self::Or(inner) => join_with(f, inner, "||"),
            Self::And(inner) if inner.is_empty() => write!(f, "true"),
            Self::And(inner) => join_with(f, inner, "&&"),
        }
    }
}

/// Flat constraint shapes, used to generate arbitrary constraint trees.
#[cfg(test)]
#[derive(Debug, Clone, Arbitrary)]
pub(crate) enum LeafConstraint {
    Any,
    Eq(char),
    InRange(char, char),
    InList(Vec<char>),
}

#[cfg(test)]
impl From<LeafConstraint> for CharConstraint {
    fn from(leaf: LeafConstraint) -> Self {
        match leaf {
            LeafConstraint::Any => CharConstraint::any(),
            LeafConstraint::Eq(ch) => CharConstraint::equals(ch),
            LeafConstraint::InRange(lo, hi) => CharConstraint::in_range(lo, hi),
            LeafConstraint::InList(chars) => CharConstraint::in_list(chars),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CharConstraint, LeafConstraint};
    use proptest::prelude::*;

    fn arb_constraint() -> impl Strategy<Value = CharConstraint> {
        let leaf = any::<LeafConstraint>().prop_map(CharConstraint::from);

        leaf.prop_recursive(4, 32, 3, |inner| {
            prop_oneof![
                inner.clone().prop_map(CharConstraint::not),
                proptest::collection::vec(inner.clone(), 0..3).prop_map(CharConstraint::or),
                proptest::collection::vec(inner, 0..3).prop_map(CharConstraint::and),
            ]
        })
    }

    #[test]
    fn rendering() {
        assert_eq!(
            CharConstraint::in_range('a', 'z').to_string(),
            "(c >= 'a' && c <= 'z')"
        );
        assert_eq!(CharConstraint::equals('x').to_string(), "c == 'x'");
        assert_eq!(CharConstraint::equals('\n').to_string(), "c == '\\n'");
        assert_eq!(CharConstraint::any().to_string(), "true");
        assert_eq!(
            CharConstraint::not(CharConstraint::equals('*')).to_string(),
            "!(c == '*')"
        );
        assert_eq!(
            CharConstraint::or([CharConstraint::equals('u'), CharConstraint::equals('U')])
                .to_string(),
            "((c == 'u')||(c == 'U'))"
        );
        assert_eq!(
            CharConstraint::and([CharConstraint::any(), CharConstraint::equals('U')]).to_string(),
            "((true)&&(c == 'U'))"
        );
        assert_eq!(
            CharConstraint::in_list("ab\"".chars()).to_string(),
            "\"ab\\\"\".indexOf(c) > -1"
        );
    }

    #[test]
    fn in_list() {
        let vowels = CharConstraint::in_list("aeiou".chars());
        assert!(vowels.apply('e'));
        assert!(!vowels.apply('z'));
        assert!(!CharConstraint::in_list([]).apply('a'));
    }

    #[test]
    fn empty_combinators() {
        assert!(!CharConstraint::or([]).apply('a'));
        assert!(CharConstraint::and([]).apply('a'));
    }

    proptest! {
        #[test]
        fn in_range_matches_bounds(lo in any::<char>(), hi in any::<char>(), ch in any::<char>()) {
            prop_assert_eq!(CharConstraint::in_range(lo, hi).apply(ch), lo <= ch && ch <= hi);
        }

        #[test]
        fn not_negates(constraint in arb_constraint(), ch in any::<char>()) {
            let negated = CharConstraint::not(constraint.clone());
            prop_assert_eq!(negated.apply(ch), !constraint.apply(ch));
        }

        #[test]
        fn or_is_disjunction(lhs in arb_constraint(), rhs in arb_constraint(), ch in any::<char>()) {
            let or = CharConstraint::or([lhs.clone(), rhs.clone()]);
            prop_assert_eq!(or.apply(ch), lhs.apply(ch) || rhs.apply(ch));
        }

        #[test]
        fn and_is_conjunction(lhs in arb_constraint(), rhs in arb_constraint(), ch in any::<char>()) {
            let and = CharConstraint::and([lhs.clone(), rhs.clone()]);
            prop_assert_eq!(and.apply(ch), lhs.apply(ch) && rhs.apply(ch));
        }
    }
}
