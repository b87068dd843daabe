//! Character sets shared by the built-in terminals.

pub const LOWERCASE_LETTERS: &str = "abcdefghijklmnopqrstuvwxyz";

pub const UPPERCASE_LETTERS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const NUMBERS_EXCEPT_ZERO: &str = "123456789";

pub const NUMBERS: &str = "0123456789";

pub const OCTAL_DIGITS: &str = "01234567";

pub const HEX_DIGITS: &str = "0123456789abcdefABCDEF";

pub const PUNCTUATIONS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]_`{|}~";

/// Space, no-break spaces, vertical tab, the four ASCII separators, tab, form
/// feed and carriage return.
pub const WHITESPACES_NON_NEW_LINE: &str =
    " \u{00A0}\u{2007}\u{202F}\u{000B}\u{001C}\u{001D}\u{001E}\u{001F}\t\u{000C}\r";

pub fn alpha() -> String {
    format!("{}{}", LOWERCASE_LETTERS, UPPERCASE_LETTERS)
}

pub fn alpha_num() -> String {
    format!("{}{}", alpha(), NUMBERS)
}
