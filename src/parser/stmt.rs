use crate::{
    ast::{
        ast::Stmt,
        expressions::SymbolExpr,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
    },
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::Precedence},
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Option<Stmt> {
    if let Some(stmt_fn) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return stmt_fn(parser);
    }

    parse_expression_stmt(parser)
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Option<Stmt> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, Precedence::Lowest)?;

    if parser.peek_token_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Stmt::Expression(ExpressionStmt { token, expression }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Option<Stmt> {
    let start_token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::Identifier) {
        return None;
    }

    let name_token = parser.current_token().clone();
    let name = SymbolExpr {
        value: name_token.value.clone(),
        token: name_token,
    };

    if !parser.expect_peek(TokenKind::Assign) {
        return None;
    }

    // The bound value is not parsed yet
    parser.skip_to_semicolon();

    Some(Stmt::Let(LetStmt {
        token: start_token,
        name,
        value: None,
    }))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Option<Stmt> {
    let start_token = parser.current_token().clone();
    parser.advance();

    parser.skip_to_semicolon();

    Some(Stmt::Return(ReturnStmt {
        token: start_token,
        value: None,
    }))
}
