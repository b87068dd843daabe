use crate::{symbols, Grammar, NonTerminal, ParseError, Parser, Symbol};
use lexalr_lexer::{Position, Terminal};

use std::collections::BTreeSet;

/// Function definitions made of return statements and expression
/// statements.
fn c_like() -> Parser {
    let mut grammar = Grammar::new();
    let unit = NonTerminal::new("TranslationUnit");
    let function = NonTerminal::new("FunctionDefinition");
    let parameters = NonTerminal::new("Parameters");
    let parameter = NonTerminal::new("Parameter");
    let block = NonTerminal::new("Block");
    let statement = NonTerminal::new("Statement");
    let expression = NonTerminal::new("Expression");

    let id = Terminal::c_identifier();
    let (open, close) = (Terminal::from("("), Terminal::from(")"));
    let (open_brace, close_brace) = (Terminal::from("{"), Terminal::from("}"));
    let semicolon = Terminal::from(";");

    let functions = grammar.one_or_more(symbols![function]);
    let root = grammar.add_rule(&unit, symbols![functions]).id();
    grammar.set_target_rule(root);

    let type_name = grammar.one_of(symbols![Terminal::from("int"), Terminal::from("char")]);
    grammar
        .add_rule(
            &function,
            symbols![type_name, id, open, parameters, close, block],
        )
        .with_name("function");

    grammar.add_rule(&parameters, symbols![Terminal::from("void")]);
    let list = grammar.list_of(&parameter, &Terminal::from(","), false);
    grammar.add_rule(&parameters, symbols![list]);
    grammar.add_rule(&parameter, symbols![type_name, id]);

    let statements = grammar.zero_or_more(symbols![statement]);
    grammar.add_rule(&block, symbols![open_brace, statements, close_brace]);

    grammar
        .add_rule(
            &statement,
            symbols![Terminal::from("return"), expression, semicolon],
        )
        .with_name("return");
    grammar.add_rule(&statement, symbols![expression, semicolon]);

    grammar.add_rule(&expression, symbols![id]);
    grammar.add_rule(&expression, symbols![Terminal::c_integer()]);

    let mut parser = grammar.create_parser().unwrap();
    parser
        .lexer_mut()
        .filter_out(Terminal::whitespace())
        .filter_out(Terminal::new_line())
        .filter_out(Terminal::line_comment("//"))
        .filter_out(Terminal::multiline_comment("/*", "*/"));

    parser
}

#[test]
fn missing_block() {
    match c_like().parse("int main(void) pefkpezofk;") {
        Err(ParseError::UnexpectedToken { token, expected }) => {
            assert_eq!(token.text, "pefkpezofk");
            assert_eq!(token.position, Position::new(1, 16));
            assert_eq!(expected, BTreeSet::from([Terminal::from("{")]));
        }
        other => panic!("expected an unexpected token error, got {:?}", other),
    }
}

#[test]
fn missing_semicolon() {
    let err = c_like()
        .parse("int main(void) {\n  return 0\n}")
        .unwrap_err();

    match &err {
        ParseError::UnexpectedToken { token, expected } => {
            assert_eq!(token.position, Position::new(3, 1));
            assert_eq!(expected, &BTreeSet::from([Terminal::from(";")]));
        }
        other => panic!("expected an unexpected token error, got {:?}", other),
    }
    assert!(err.to_string().starts_with("[ERROR] 3:1: unexpected '}'"));
}

#[test]
fn program() {
    let source = "\
/* two functions */
int main(void) {
    // entry point
    answer;
    return 0;
}

char pick(int a, char b, int c) { return b; }
";

    let tree = c_like().parse(source).unwrap();
    assert_eq!(tree.name(), "TranslationUnit");

    let functions = tree.descendants_of_type(&Symbol::from(&NonTerminal::new("FunctionDefinition")));
    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0].child_at(1).unwrap().repr(), "main");
    assert_eq!(functions[1].child_at(1).unwrap().repr(), "pick");

    // the parameter list is flat: a , b , c
    let list = functions[1].child_at(3).unwrap().first_child().unwrap();
    assert_eq!(list.children().len(), 5);
    assert_eq!(list.repr(), "int a , char b , int c");

    let returns = tree
        .descendants()
        .into_iter()
        .filter(|d| d.name() == "return")
        .map(|d| d.child_at(1).unwrap().repr())
        .collect::<Vec<_>>();
    assert_eq!(returns, ["0", "b"]);
}

#[test]
fn keywords_are_not_identifiers() {
    let err = c_like().parse("int return(void) {}").unwrap_err();

    match err {
        ParseError::UnexpectedToken { token, .. } => {
            assert_eq!(token.terminal, Terminal::from("return"));
        }
        other => panic!("expected an unexpected token error, got {:?}", other),
    }
}
