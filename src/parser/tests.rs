//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Let and return statements
//! - Identifier and integer expressions
//! - Prefix and infix operators, precedence and associativity
//! - Diagnostics and recovery

use rstest::rstest;

use crate::{
    ast::ast::{Expr, Node, Stmt},
    errors::errors::ErrorImpl,
    lexer::{lexer::Lexer, tokens::TokenKind},
};

use super::parser::{parse, Parser, MAX_EXPR_DEPTH};

fn parse_clean(source: &str) -> crate::ast::ast::Program {
    let (parser, program) = parse(source.to_string(), None);
    assert!(
        parser.errors().is_empty(),
        "unexpected diagnostics for {:?}: {:?}",
        source,
        parser.errors()
    );
    program
}

fn single_expression(source: &str) -> Expr {
    let program = parse_clean(source);
    assert_eq!(program.statements.len(), 1, "{:?}", program.statements);

    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("Expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parser_primes_two_tokens() {
    let parser = Parser::new(Lexer::new("let x".to_string(), None));

    assert_eq!(parser.current_token_kind(), TokenKind::Let);
    assert_eq!(parser.peek_token_kind(), TokenKind::Identifier);
    assert_eq!(parser.peek_token().value, "x");
    assert!(parser.errors().is_empty());
}

#[test]
fn test_parse_let_statements() {
    let program = parse_clean("let x = 5;\nlet y = 10;\nlet foobar = 838383;");

    assert_eq!(program.statements.len(), 3);

    let names = ["x", "y", "foobar"];
    for (stmt, name) in program.iter().zip(names) {
        match stmt {
            Stmt::Let(let_stmt) => {
                assert_eq!(let_stmt.token_literal(), "let");
                assert_eq!(let_stmt.name.value, name);
                assert_eq!(let_stmt.name.token_literal(), name);
                assert!(let_stmt.value.is_none());
            }
            other => panic!("Expected let statement, got {:?}", other),
        }
    }
}

#[test]
fn test_let_statement_skips_value() {
    let program = parse_clean("let x = 5;");

    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.statements[0].to_string(), "let x=;");
    assert_eq!(program.to_string(), "let x=;");
}

#[test]
fn test_let_statement_skips_complex_value() {
    let program = parse_clean("let x = fn(a) { a + @ }; y");

    assert_eq!(program.to_string(), "let x=;y");
}

#[test]
fn test_let_statement_without_semicolon() {
    let program = parse_clean("let x = 5");

    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.to_string(), "let x=;");
}

#[test]
fn test_parse_return_statements() {
    let program = parse_clean("return 5;\nreturn 10;\nreturn 993322;");

    assert_eq!(program.statements.len(), 3);
    for stmt in program.iter() {
        match stmt {
            Stmt::Return(return_stmt) => {
                assert_eq!(return_stmt.token_literal(), "return");
                assert!(return_stmt.value.is_none());
            }
            other => panic!("Expected return statement, got {:?}", other),
        }
    }
    assert_eq!(program.to_string(), "return ;return ;return ;");
}

#[test]
fn test_parse_single_return() {
    let (parser, program) = parse("return 10;".to_string(), None);

    assert!(parser.errors().is_empty());
    assert_eq!(program.statements.len(), 1);
    assert!(matches!(program.statements[0], Stmt::Return(_)));

    let program = parse_clean("return;");
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_return_statement_without_semicolon() {
    let program = parse_clean("return 5");

    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.to_string(), "return ;");
}

#[test]
fn test_identifier_expression() {
    match single_expression("foobar;") {
        Expr::Symbol(symbol) => {
            assert_eq!(symbol.value, "foobar");
            assert_eq!(symbol.token_literal(), "foobar");
        }
        other => panic!("Expected identifier, got {:?}", other),
    }
}

#[test]
fn test_integer_literal_expression() {
    match single_expression("5;") {
        Expr::Integer(integer) => {
            assert_eq!(integer.value, 5);
            assert_eq!(integer.token_literal(), "5");
        }
        other => panic!("Expected integer literal, got {:?}", other),
    }
}

#[test]
fn test_expression_statement_without_semicolon() {
    let program = parse_clean("a + b");

    assert_eq!(program.statements.len(), 1);
    assert_eq!(program.statements[0].token_literal(), "a");
    assert_eq!(program.to_string(), "(a + b)");
}

#[rstest]
#[case("!5;", "!", 5)]
#[case("-15;", "-", 15)]
fn test_prefix_expressions(#[case] source: &str, #[case] operator: &str, #[case] value: i64) {
    match single_expression(source) {
        Expr::Prefix(prefix) => {
            assert_eq!(prefix.operator, operator);
            match *prefix.right {
                Expr::Integer(integer) => assert_eq!(integer.value, value),
                other => panic!("Expected integer operand, got {:?}", other),
            }
        }
        other => panic!("Expected prefix expression, got {:?}", other),
    }
}

#[rstest]
#[case("5 + 5;", 5, "+", 5)]
#[case("5 - 5;", 5, "-", 5)]
#[case("5 * 5;", 5, "*", 5)]
#[case("5 / 5;", 5, "/", 5)]
#[case("5 > 5;", 5, ">", 5)]
#[case("5 < 5;", 5, "<", 5)]
#[case("5 == 5;", 5, "==", 5)]
#[case("5 != 5;", 5, "!=", 5)]
fn test_infix_expressions(
    #[case] source: &str,
    #[case] left: i64,
    #[case] operator: &str,
    #[case] right: i64,
) {
    match single_expression(source) {
        Expr::Infix(infix) => {
            assert_eq!(infix.operator, operator);
            assert_eq!(infix.token_literal(), operator);
            assert!(matches!(*infix.left, Expr::Integer(ref i) if i.value == left));
            assert!(matches!(*infix.right, Expr::Integer(ref i) if i.value == right));
        }
        other => panic!("Expected infix expression, got {:?}", other),
    }
}

#[rstest]
#[case("-a * b", "((-a) * b)")]
#[case("!-a", "(!(-a))")]
#[case("!!x", "(!(!x))")]
#[case("a + b + c", "((a + b) + c)")]
#[case("a + b - c", "((a + b) - c)")]
#[case("a * b * c", "((a * b) * c)")]
#[case("a * b / c", "((a * b) / c)")]
#[case("a + b * c", "(a + (b * c))")]
#[case("a + b / c", "(a + (b / c))")]
#[case("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)")]
#[case("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)")]
#[case("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))")]
#[case("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))")]
#[case("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))")]
#[case("a == b == c", "((a == b) == c)")]
#[case("- - 5", "(-(-5))")]
fn test_operator_precedence(#[case] source: &str, #[case] expected: &str) {
    let program = parse_clean(source);
    assert_eq!(program.to_string(), expected);
}

#[test]
fn test_expression_stops_at_call_paren() {
    let (parser, program) = parse("a (b)".to_string(), None);

    assert_eq!(program.statements[0].to_string(), "a");
    assert!(parser
        .errors()
        .contains(&"no prefix parse function for ( found".to_string()));
}

#[test]
fn test_missing_prefix_handler_drops_statement() {
    let (parser, program) = parse("5 + @".to_string(), None);

    assert!(program.statements.is_empty());
    assert_eq!(
        parser.errors(),
        vec!["no prefix parse function for ILLEGAL found".to_string()]
    );
}

#[test]
fn test_boolean_keywords_have_no_prefix_handler() {
    let (parser, program) = parse("5 + true;".to_string(), None);

    assert!(program.statements.is_empty());
    assert_eq!(
        parser.errors()[0],
        "no prefix parse function for TRUE found"
    );
}

#[test]
fn test_let_without_identifier() {
    let (parser, program) = parse("let = 10;".to_string(), None);

    assert_eq!(
        parser.errors(),
        vec![
            "expected next token to be IDENT, got =".to_string(),
            "no prefix parse function for = found".to_string(),
        ]
    );
    assert_eq!(program.to_string(), "10");
}

#[test]
fn test_let_without_assign() {
    let (parser, program) = parse("let x 5;".to_string(), None);

    assert_eq!(
        parser.errors(),
        vec!["expected next token to be =, got INT".to_string()]
    );
    assert_eq!(program.to_string(), "5");
}

#[test]
fn test_let_with_integer_name() {
    let (parser, _) = parse("let 838383;".to_string(), None);

    assert_eq!(parser.errors()[0], "expected next token to be IDENT, got INT");
}

#[test]
fn test_integer_overflow_is_reported() {
    let (parser, program) = parse("99999999999999999999;".to_string(), None);

    assert!(program.statements.is_empty());
    assert_eq!(
        parser.errors()[0],
        "could not parse 99999999999999999999 as integer"
    );
}

#[test]
fn test_integer_overflow_is_structured() {
    let (parser, _) = parse("1 + 99999999999999999999".to_string(), None);

    assert_eq!(
        parser.get_errors()[0].get_internal_error(),
        &ErrorImpl::IntegerParseError {
            token: "99999999999999999999".to_string()
        }
    );
    assert_eq!(parser.get_errors()[0].get_position().0, 4);
}

#[test]
fn test_deep_prefix_chain_is_rejected() {
    let source = "-".repeat(100_000) + "5";
    let (parser, program) = parse(source, None);

    assert!(program.statements.is_empty());
    assert_eq!(parser.get_errors().len(), 1);

    let error = &parser.get_errors()[0];
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::ExpressionTooDeep {
            limit: MAX_EXPR_DEPTH
        }
    );
    assert_eq!(error.get_error_name(), "ExpressionTooDeep");
    assert_eq!(error.get_position().0, MAX_EXPR_DEPTH as u32);
}

#[test]
fn test_parse_resumes_after_deep_expression() {
    let source = format!("{}5; a + b", "!".repeat(1_000));
    let (parser, program) = parse(source, None);

    assert_eq!(
        parser.errors(),
        vec![format!("expression nested deeper than {} levels", MAX_EXPR_DEPTH)]
    );
    assert_eq!(program.to_string(), "(a + b)");
}

#[test]
fn test_prefix_chain_within_limit() {
    let source = "-".repeat(MAX_EXPR_DEPTH - 1) + "5";
    let program = parse_clean(&source);

    assert_eq!(program.statements.len(), 1);
    assert!(program.to_string().ends_with("(-5)"));
}

#[test]
fn test_parse_continues_after_bad_statement() {
    let (parser, program) = parse("let x = 5; let = 1; let y = 2;".to_string(), None);

    assert_eq!(program.to_string(), "let x=;1let y=;");
    assert_eq!(parser.errors().len(), 2);
}

#[test]
fn test_diagnostic_positions() {
    let (parser, _) = parse("let x = 1;\nlet = 2;".to_string(), Some("test.mk".to_string()));
    let error = &parser.get_errors()[0];

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    assert_eq!(error.get_position().0, 15);
    assert_eq!(*error.get_position().1, "test.mk");
}

#[test]
fn test_empty_program() {
    let (parser, program) = parse(String::new(), None);

    assert!(program.statements.is_empty());
    assert!(parser.errors().is_empty());
    assert_eq!(program.token_literal(), "");
}

#[test]
fn test_statement_spans() {
    let program = parse_clean("let x = 1;\n  -y");

    assert_eq!(program.statements[0].get_span().start.0, 0);
    assert_eq!(program.statements[1].get_span().start.0, 13);
}
