//! Automatons of the built-in terminal kinds.

use super::{chars, TerminalKind};
use crate::{automaton::StateId, Automaton, AutomatonBuilder, CharConstraint};

use CharConstraint as C;

pub(super) fn build(kind: &TerminalKind) -> Automaton {
    use TerminalKind::*;
    match kind {
        Literal(text) => literal(text),
        SingleChar(ch) => literal(&ch.to_string()),
        Word { first, next } => word(first, next),
        QuotedString {
            start,
            end,
            escape,
            forbidden,
        } => quoted_string(*start, *end, *escape, forbidden),
        CCharacter => c_character(),
        CInteger => c_integer(),
        CHexNumber => c_hex_number(),
        COctal => c_octal(),
        CBinary => c_binary(),
        CFloatingPoint => c_floating_point(),
        LineComment(start) => line_comment(start),
        MultilineComment(start, end) => multiline_comment(start, end),
        NewLine => new_line(),
        Regex(pattern) => pattern.automaton.as_ref().clone(),
        Artificial(_) | Eof => Automaton::rejecting(),
    }
}

/// Chains one state per character of `text`, starting at `from`. Returns the
/// last state.
fn chain(builder: &mut AutomatonBuilder, from: StateId, text: &str) -> StateId {
    text.chars().fold(from, |current, ch| {
        let next = builder.new_non_final_state();
        builder.add_transition(current, C::equals(ch), next);
        next
    })
}

fn literal(text: &str) -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let last = chain(&mut builder, init, text);
    if last != init {
        builder.set_final(last, true);
    }
    builder.build()
}

fn word(first: &[char], next: &[char]) -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let ok = builder.new_final_state();
    builder.add_transition(init, C::in_list(first.iter().copied()), ok);
    builder.add_transition(ok, C::in_list(next.iter().copied()), ok);
    builder.build()
}

fn quoted_string(start: char, end: char, escape: char, forbidden: &[char]) -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let in_string = builder.new_non_final_state();
    let escaping = builder.new_non_final_state();
    let fin = builder.new_final_state();

    builder.add_transition(init, C::equals(start), in_string);
    builder.add_transition(in_string, C::equals(escape), escaping);
    builder.add_transition(escaping, C::any(), in_string);
    builder.add_transition(in_string, C::equals(end), fin);
    builder.add_transition(
        in_string,
        C::not(C::or([
            C::equals(end),
            C::equals(escape),
            C::in_list(forbidden.iter().copied()),
        ])),
        in_string,
    );
    builder.build()
}

fn c_character() -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let open = builder.new_non_final_state();
    let escaping = builder.new_non_final_state();
    let character = builder.new_non_final_state();
    let fin = builder.new_final_state();

    builder.add_transition(init, C::equals('\''), open);
    builder.add_transition(open, C::equals('\\'), escaping);
    builder.add_transition(escaping, C::any(), character);
    builder.add_transition(
        open,
        C::not(C::in_list(['\'', '\\', '\n'])),
        character,
    );
    builder.add_transition(character, C::equals('\''), fin);
    builder.build()
}

/// `u`, `l`, `ul` and `lu` suffixes, in any case.
fn add_integer_suffix(builder: &mut AutomatonBuilder, state: StateId) {
    let suffix_u = builder.new_final_state();
    let suffix_l = builder.new_final_state();
    let fin = builder.new_final_state();
    let (u, l) = (C::in_list(['u', 'U']), C::in_list(['l', 'L']));

    builder.add_transition(state, u.clone(), suffix_u);
    builder.add_transition(suffix_u, l.clone(), fin);
    builder.add_transition(state, l, suffix_l);
    builder.add_transition(suffix_l, u, fin);
}

fn c_integer() -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let got_zero = builder.new_final_state();
    let fin = builder.new_final_state();

    builder.add_transition(init, C::equals('0'), got_zero);
    builder.add_transition(init, C::in_list(chars::NUMBERS_EXCEPT_ZERO.chars()), fin);
    builder.add_transition(fin, C::in_list(chars::NUMBERS.chars()), fin);
    add_integer_suffix(&mut builder, got_zero);
    add_integer_suffix(&mut builder, fin);
    builder.build()
}

/// `0` + `marker` + one or more of `digits`.
fn prefixed_number(marker: CharConstraint, digits: &str, suffix: bool) -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let got_zero = builder.new_non_final_state();
    let got_marker = builder.new_non_final_state();
    let fin = builder.new_final_state();

    builder.add_transition(init, C::equals('0'), got_zero);
    builder.add_transition(got_zero, marker, got_marker);
    builder.add_transition(got_marker, C::in_list(digits.chars()), fin);
    builder.add_transition(fin, C::in_list(digits.chars()), fin);
    if suffix {
        add_integer_suffix(&mut builder, fin);
    }
    builder.build()
}

fn c_hex_number() -> Automaton {
    prefixed_number(C::in_list(['x', 'X']), chars::HEX_DIGITS, true)
}

fn c_binary() -> Automaton {
    prefixed_number(C::in_list(['b', 'B']), "01", false)
}

fn c_octal() -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let got_zero = builder.new_non_final_state();
    let fin = builder.new_final_state();
    let octal = C::in_list(chars::OCTAL_DIGITS.chars());

    builder.add_transition(init, C::equals('0'), got_zero);
    builder.add_transition(got_zero, octal.clone(), fin);
    builder.add_transition(fin, octal, fin);
    add_integer_suffix(&mut builder, fin);
    builder.build()
}

fn c_floating_point() -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let digit = C::in_list(chars::NUMBERS.chars());
    let init = builder.initial_state();
    let integer_part = builder.new_non_final_state();
    let leading_dot = builder.new_non_final_state();
    let fraction = builder.new_final_state();
    let exponent = builder.new_non_final_state();
    let exponent_sign = builder.new_non_final_state();
    let exponent_digits = builder.new_final_state();
    let suffix = builder.new_final_state();

    builder.add_transition(init, digit.clone(), integer_part);
    builder.add_transition(init, C::equals('.'), leading_dot);
    builder.add_transition(integer_part, digit.clone(), integer_part);
    builder.add_transition(integer_part, C::equals('.'), fraction);
    builder.add_transition(integer_part, C::in_list(['e', 'E']), exponent);
    builder.add_transition(leading_dot, digit.clone(), fraction);
    builder.add_transition(fraction, digit.clone(), fraction);
    builder.add_transition(fraction, C::in_list(['e', 'E']), exponent);
    builder.add_transition(exponent, C::in_list(['+', '-']), exponent_sign);
    builder.add_transition(exponent, digit.clone(), exponent_digits);
    builder.add_transition(exponent_sign, digit.clone(), exponent_digits);
    builder.add_transition(exponent_digits, digit, exponent_digits);
    builder.add_transition(fraction, C::in_list("fFlL".chars()), suffix);
    builder.add_transition(exponent_digits, C::in_list("fFlL".chars()), suffix);
    builder.build()
}

fn line_comment(start: &str) -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let body = chain(&mut builder, init, start);
    builder.set_final(body, true);
    builder.add_transition(body, C::not(C::equals('\n')), body);
    builder.build()
}

/// Length of the longest prefix of `end` that is a suffix of `matched`.
fn overlap(end: &[char], matched: &[char]) -> usize {
    (0..=end.len().min(matched.len()))
        .rev()
        .find(|len| matched[matched.len() - len..] == end[..*len])
        .unwrap_or(0)
}

/// The body of the comment is a matcher for the end marker: state `k` means
/// the last `k` characters read are the first `k` characters of `end`. The
/// comment stops at the first complete end marker.
fn multiline_comment(start: &str, end: &str) -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let opened = chain(&mut builder, init, start);

    let end: Vec<char> = end.chars().collect();
    if end.is_empty() {
        builder.set_final(opened, true);
        return builder.build();
    }

    let mut progress = vec![opened];
    progress.extend((1..end.len()).map(|_| builder.new_non_final_state()));
    progress.push(builder.new_final_state());

    let mut distinct = end.clone();
    distinct.sort_unstable();
    distinct.dedup();

    for k in 0..end.len() {
        for ch in distinct.iter() {
            let mut matched = end[..k].to_vec();
            matched.push(*ch);
            builder.add_transition(progress[k], C::equals(*ch), progress[overlap(&end, &matched)]);
        }
        builder.add_transition(
            progress[k],
            C::not(C::in_list(distinct.iter().copied())),
            progress[0],
        );
    }

    builder.build()
}

fn new_line() -> Automaton {
    let mut builder = AutomatonBuilder::new();
    let init = builder.initial_state();
    let got_cr = builder.new_non_final_state();
    let fin = builder.new_final_state();

    builder.add_transition(init, C::equals('\r'), got_cr);
    builder.add_transition(got_cr, C::equals('\n'), fin);
    builder.add_transition(init, C::equals('\n'), fin);
    builder.build()
}
