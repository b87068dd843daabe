use super::super::{
    ast::ExprKind,
    compile,
    compiler::compile_fragment,
    parser::Parser,
    tokenizer::QuantifierKind,
};
use crate::AutomatonBuilder;
use proptest::{collection, prelude::*};

fn arb_range() -> impl Strategy<Value = ExprKind> {
    (any::<char>(), any::<char>())
        .prop_map(|(a, b)| if a <= b { ExprKind::Range(a, b) } else { ExprKind::Range(b, a) })
}

fn arb_atom() -> impl Strategy<Value = ExprKind> {
    prop_oneof![
        collection::vec(any::<char>(), 1..=4).prop_map(ExprKind::Sequence),
        arb_range(),
        Just(ExprKind::Wildcard),
    ]
}

fn arb_expression() -> impl Strategy<Value = ExprKind> {
    arb_atom().prop_recursive(6, 64, 4, |inner| {
        prop_oneof![
            collection::vec(inner.clone(), 2..=4).prop_map(ExprKind::Concat),
            (inner.clone(), inner.clone())
                .prop_map(|(lhs, rhs)| ExprKind::Alt(Box::new(lhs), Box::new(rhs))),
            (inner, any::<QuantifierKind>())
                .prop_map(|(expr, quantifier)| ExprKind::Quantified(Box::new(expr), quantifier)),
        ]
    })
}

fn choose(choices: &mut impl Iterator<Item = u8>, n: u8) -> u8 {
    choices.next().unwrap_or(0) % n
}

/// Picks one string of the language of `expr`, driven by `choices`.
fn sample(expr: &ExprKind, choices: &mut impl Iterator<Item = u8>) -> String {
    match expr {
        ExprKind::Sequence(chars) => chars.iter().collect(),
        ExprKind::Range(lo, hi) => match choose(choices, 2) {
            0 => lo.to_string(),
            _ => hi.to_string(),
        },
        ExprKind::Wildcard => "w".to_string(),
        ExprKind::Concat(exprs) => exprs.iter().map(|e| sample(e, choices)).collect(),
        ExprKind::Alt(lhs, rhs) => match choose(choices, 2) {
            0 => sample(lhs, choices),
            _ => sample(rhs, choices),
        },
        ExprKind::Quantified(inner, quantifier) => {
            let repetitions = match quantifier {
                QuantifierKind::QuestionMark => choose(choices, 2),
                QuantifierKind::Asterisk => choose(choices, 3),
                QuantifierKind::Plus => 1 + choose(choices, 2),
            };
            (0..repetitions).map(|_| sample(inner, choices)).collect()
        }
    }
}

proptest! {
    #[test]
    fn fragments_keep_their_shape(expr in arb_expression()) {
        let mut builder = AutomatonBuilder::new();
        let fragment = compile_fragment(&mut builder, &expr);

        prop_assert_eq!(builder.incoming_count(fragment.start), 0);
        prop_assert_eq!(builder.outgoing_count(fragment.end), 0);
        prop_assert!(builder.is_final(fragment.end));

        builder.set_initial_state(fragment.start);
        let automaton = builder.build();
        prop_assert_eq!(automaton.final_states().count(), 1);
        prop_assert_eq!(automaton.accepts_empty(), expr.is_nullable());
    }

    #[test]
    fn samples_are_accepted(expr in arb_expression(), choices in collection::vec(any::<u8>(), 0..64)) {
        let mut builder = AutomatonBuilder::new();
        let fragment = compile_fragment(&mut builder, &expr);
        builder.set_initial_state(fragment.start);
        let automaton = builder.build();

        let input = sample(&expr, &mut choices.into_iter());
        prop_assert!(automaton.matches(&input), "{} should match {:?}", expr, input);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10000))]

    #[test]
    #[ignore = "proptests should be run explicitly"]
    fn rendered_expressions_compile(expr in arb_expression(), choices in collection::vec(any::<u8>(), 0..64)) {
        let regex = expr.to_string();
        let parsed = Parser::new(&regex).parse();
        prop_assert!(parsed.is_ok(), "{}: {:?}", regex, parsed);

        if !expr.is_nullable() {
            let automaton = compile(&regex).expect(&regex);
            let input = sample(&expr, &mut choices.into_iter());
            prop_assert!(automaton.matches(&input), "{} should match {:?}", regex, input);
        }
    }
}
