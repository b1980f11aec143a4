use quadc::parser::ast::{BinOp, Expr, Item, Program, Stmt};
use quadc::parser::Parser;

fn parse(source: &str) -> Program {
    let tokens = quadc::lexer::lex(source);
    let mut parser = Parser::new(tokens);
    parser.parse_program().expect("parse should succeed")
}

fn main_body(source: &str) -> Vec<Stmt> {
    let program = parse(source);
    match program.items.into_iter().next() {
        Some(Item::Function(function)) => function.body.statements,
        other => panic!("expected a function item, got {:?}", other),
    }
}

fn parse_error(source: &str) -> quadc::parser::SyntaxError {
    let tokens = quadc::lexer::lex(source);
    let mut parser = Parser::new(tokens);
    match parser.parse_program() {
        Ok(program) => panic!("expected a syntax error, got {:?}", program),
        Err(error) => error,
    }
}

#[test]
fn parses_declaration_with_initializer() {
    let statements = main_body("int main() { int x = 2 + 3; }");
    match &statements[0] {
        Stmt::Declaration { name, init } => {
            assert_eq!(name, "x");
            match init {
                Some(Expr::Binary { op, left, right }) => {
                    assert_eq!(*op, BinOp::Add);
                    assert_eq!(**left, Expr::Literal("2".to_string()));
                    assert_eq!(**right, Expr::Literal("3".to_string()));
                }
                other => panic!("expected binary initializer, got {:?}", other),
            }
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn parses_declaration_without_initializer() {
    let statements = main_body("int main() { float ratio; }");
    match &statements[0] {
        Stmt::Declaration { name, init } => {
            assert_eq!(name, "ratio");
            assert!(init.is_none());
        }
        other => panic!("expected declaration, got {:?}", other),
    }
}

#[test]
fn parses_assignment_and_return() {
    let statements = main_body("int main() { int x; x = 7; return x; }");
    assert!(matches!(&statements[1], Stmt::Assignment { name, .. } if name == "x"));
    match &statements[2] {
        Stmt::Return { value } => assert_eq!(*value, Expr::Variable("x".to_string())),
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn parses_if_with_and_without_else() {
    let statements = main_body("int main() { int x; if (x) { x = 1; } if (x) { x = 2; } else { x = 3; } }");
    match &statements[1] {
        Stmt::If { else_branch, .. } => assert!(else_branch.is_none()),
        other => panic!("expected if, got {:?}", other),
    }
    match &statements[2] {
        Stmt::If {
            then_branch,
            else_branch,
            ..
        } => {
            assert_eq!(then_branch.statements.len(), 1);
            assert!(else_branch
                .as_ref()
                .is_some_and(|branch| branch.statements.len() == 1));
        }
        other => panic!("expected if/else, got {:?}", other),
    }
}

#[test]
fn parses_while_loop() {
    let statements = main_body("int main() { int i; while (i < 10) { i = i + 1; } }");
    match &statements[1] {
        Stmt::While { condition, body } => {
            assert!(matches!(condition, Expr::Binary { op: BinOp::Lt, .. }));
            assert_eq!(body.statements.len(), 1);
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn parses_nested_bare_block() {
    let statements = main_body("int main() { int x; { int y; } }");
    match &statements[1] {
        Stmt::Block(block) => {
            assert!(matches!(&block.statements[0], Stmt::Declaration { name, .. } if name == "y"));
        }
        other => panic!("expected nested block, got {:?}", other),
    }
}

#[test]
fn chains_nest_to_the_right() {
    let statements = main_body("int main() { int a; return a - a - a; }");
    match &statements[1] {
        Stmt::Return { value } => match value {
            Expr::Binary { op, left, right } => {
                assert_eq!(*op, BinOp::Sub);
                assert!(matches!(**left, Expr::Variable(_)));
                assert!(matches!(**right, Expr::Binary { op: BinOp::Sub, .. }));
            }
            other => panic!("expected binary chain, got {:?}", other),
        },
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn applies_no_precedence_between_operators() {
    // Right nesting regardless of which operator comes first.
    let statements = main_body("int main() { int a; return a + a * a; }");
    match &statements[1] {
        Stmt::Return {
            value: Expr::Binary { op, right, .. },
        } => {
            assert_eq!(*op, BinOp::Add);
            assert!(matches!(**right, Expr::Binary { op: BinOp::Mul, .. }));
        }
        other => panic!("expected return of a binary, got {:?}", other),
    }

    let statements = main_body("int main() { int a; return a * a + a; }");
    match &statements[1] {
        Stmt::Return {
            value: Expr::Binary { op, right, .. },
        } => {
            assert_eq!(*op, BinOp::Mul);
            assert!(matches!(**right, Expr::Binary { op: BinOp::Add, .. }));
        }
        other => panic!("expected return of a binary, got {:?}", other),
    }
}

#[test]
fn parentheses_group_without_their_own_node() {
    let statements = main_body("int main() { int a; return (a + a) * a; }");
    match &statements[1] {
        Stmt::Return {
            value: Expr::Binary { op, left, right },
        } => {
            assert_eq!(*op, BinOp::Mul);
            assert!(matches!(**left, Expr::Binary { op: BinOp::Add, .. }));
            assert!(matches!(**right, Expr::Variable(_)));
        }
        other => panic!("expected grouped multiply, got {:?}", other),
    }

    let statements = main_body("int main() { int a; return (a); }");
    match &statements[1] {
        Stmt::Return { value } => assert_eq!(*value, Expr::Variable("a".to_string())),
        other => panic!("expected return, got {:?}", other),
    }
}

#[test]
fn carries_preprocessor_items_through() {
    let program = parse("#include <stdio.h>\nint main() { return 0; }");
    assert_eq!(program.items.len(), 2);
    match &program.items[0] {
        Item::Preprocessor(text) => assert_eq!(text, "#include <stdio.h>"),
        other => panic!("expected preprocessor item, got {:?}", other),
    }
    assert!(matches!(&program.items[1], Item::Function(f) if f.name == "main"));
}

#[test]
fn skips_comments_entirely() {
    let statements = main_body("int main() { // comment\n /* more */ return 0; }");
    assert_eq!(statements.len(), 1);
    assert!(matches!(&statements[0], Stmt::Return { .. }));
}

#[test]
fn reports_missing_semicolon() {
    let error = parse_error("int main() { return 0 }");
    assert_eq!(error.expected, "';'");
    assert_eq!(
        error.to_string(),
        "syntax error: expected ';', found '}' at line 1"
    );
}

#[test]
fn reports_missing_closing_paren() {
    let error = parse_error("int main( { }");
    assert_eq!(error.expected, "')'");
}

#[test]
fn reports_unterminated_block_at_end_of_input() {
    let error = parse_error("int main() { int x;");
    assert_eq!(error.expected, "'}'");
    assert!(error.found.is_none());
    assert_eq!(error.to_string(), "syntax error: expected '}' at end of input");
}

#[test]
fn rejects_statement_it_cannot_start() {
    let error = parse_error("int main() { 42; }");
    assert_eq!(error.expected, "statement");
    assert!(error.found.is_some());
}

#[test]
fn parsing_is_deterministic() {
    let source = "int main() { int x = 1 + 2 * 3; if (x) { x = 0; } return x; }";
    assert_eq!(parse(source), parse(source));
}
