use lexalr::{symbols, Associativity, AstNode, Grammar, NonTerminal, Parser, Terminal, Visitor};

use tracing::info;

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();
}

/// Integer arithmetic with the four operations and parentheses.
fn calculator() -> Result<Parser, Box<dyn std::error::Error>> {
    let mut grammar = Grammar::new();
    let expr = NonTerminal::new("Expr");
    let (plus, minus) = (Terminal::from("+"), Terminal::from("-"));
    let (times, divide) = (Terminal::from("*"), Terminal::from("/"));

    grammar
        .add_rule(&expr, symbols![Terminal::c_integer()])
        .with_name("number");
    grammar
        .add_rule(&expr, symbols![Terminal::from("("), expr, Terminal::from(")")])
        .with_name("group");

    let additive = grammar.one_of(symbols![plus, minus]);
    grammar
        .add_rule(&expr, symbols![expr, additive, expr])
        .with_name("binary");

    let multiplicative = grammar.one_of(symbols![times, divide]);
    grammar
        .add_rule(&expr, symbols![expr, multiplicative, expr])
        .with_name("binary");

    grammar
        .set_precedence_level(20, symbols![times, divide])
        .set_precedence_level(10, symbols![plus, minus]);
    for op in [&plus, &minus, &times, &divide] {
        grammar.set_associativity(op, Associativity::Left);
    }

    let mut parser = grammar.create_parser()?;
    parser.lexer_mut().filter_out(Terminal::whitespace());

    Ok(parser)
}

fn evaluate(tree: &AstNode) -> Result<i64, String> {
    let mut visitor = Visitor::<Result<Vec<i64>, String>>::new();

    visitor
        .on_exit("number", |node, state| {
            let Ok(stack) = state else {
                return;
            };

            match node.as_token().map(|t| t.text.parse::<i64>()) {
                Some(Ok(value)) => stack.push(value),
                _ => *state = Err(format!("{} is out of range", node.repr())),
            }
        })
        .on_exit("binary", |node, state| {
            let Ok(stack) = state else {
                return;
            };
            let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                return;
            };
            let op = node.child_at(1).and_then(AstNode::as_token);

            let result = match op.map(|t| t.text.as_str()) {
                Some("+") => lhs.checked_add(rhs),
                Some("-") => lhs.checked_sub(rhs),
                Some("*") => lhs.checked_mul(rhs),
                Some("/") => lhs.checked_div(rhs),
                _ => None,
            };

            match result {
                Some(value) => stack.push(value),
                None => *state = Err(format!("cannot compute {}", node.repr())),
            }
        });

    let mut state = Ok(Vec::new());
    visitor.visit(tree, &mut state);

    match state?.as_slice() {
        [value] => Ok(*value),
        _ => Err(format!("cannot compute {}", tree.repr())),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let parser = calculator()?;
    info!(states = parser.table().len(), "calculator ready");

    for input in std::env::args().skip(1) {
        match parser.parse(&input).map_err(|e| e.to_string()).and_then(|t| evaluate(&t)) {
            Ok(value) => println!("{} = {}", input, value),
            Err(err) => eprintln!("{}: {}", input, err),
        }
    }

    Ok(())
}
