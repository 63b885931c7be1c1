use crate::{
    ast::{
        ast::Expr,
        expressions::{InfixExpr, IntegerExpr, PrefixExpr, SymbolExpr},
    },
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{lookups::Precedence, parser::Parser};

/// Parses an expression whose operators all bind tighter than `precedence`.
///
/// Returns `None` after recording a diagnostic when any part of the
/// expression fails to parse or the expression nests too deeply.
pub fn parse_expr(parser: &mut Parser, precedence: Precedence) -> Option<Expr> {
    if !parser.enter_expr() {
        return None;
    }

    let expr = parse_expr_at(parser, precedence);
    parser.exit_expr();
    expr
}

fn parse_expr_at(parser: &mut Parser, precedence: Precedence) -> Option<Expr> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        let position = parser.current_token().span.start.clone();
        parser.push_error(ErrorImpl::NoPrefixParseFunction { kind: token_kind }, position);
        return None;
    };

    let mut left = nud(parser)?;

    // Strictly greater keeps equal precedence left associative
    while !parser.peek_token_is(TokenKind::Semicolon) && precedence < parser.peek_precedence() {
        let Some(led) = parser
            .get_led_lookup()
            .get(&parser.peek_token_kind())
            .copied()
        else {
            return Some(left);
        };

        parser.advance();
        left = led(parser, left)?;
    }

    Some(left)
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    Some(Expr::Symbol(SymbolExpr {
        value: token.value.clone(),
        token,
    }))
}

pub fn parse_integer_expr(parser: &mut Parser) -> Option<Expr> {
    let token = parser.current_token().clone();

    match token.value.parse::<i64>() {
        Ok(value) => Some(Expr::Integer(IntegerExpr { token, value })),
        Err(_) => {
            parser.push_error(
                ErrorImpl::IntegerParseError {
                    token: token.value.clone(),
                },
                token.span.start,
            );
            None
        }
    }
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, Precedence::Prefix)?;

    Some(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_infix_expr(parser: &mut Parser, left: Expr) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    let precedence = parser.current_precedence();
    parser.advance();

    let right = parse_expr(parser, precedence)?;

    Some(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}
