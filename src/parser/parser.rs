//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the program entry
//! points. The parser pulls tokens from its lexer one at a time, keeping the
//! current token and one token of lookahead.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Operator precedences

use std::collections::HashMap;

use crate::{
    ast::ast::Program,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::{
    lookups::{
        create_token_lookups, LEDHandler, LEDLookup, NUDHandler, NUDLookup, Precedence,
        PrecedenceLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Deepest expression nesting accepted before the parser gives up on a
/// statement.
pub const MAX_EXPR_DEPTH: usize = 128;

/// The main parser structure that maintains parsing state.
///
/// Diagnostics are collected instead of aborting, so a parse always yields
/// a program, possibly missing the statements that failed.
pub struct Parser {
    /// Token source, read lazily
    lexer: Lexer,
    /// Token under consideration
    current: Token,
    /// One token of lookahead
    peek: Token,
    /// Diagnostics in the order they were recorded
    errors: Vec<Error>,
    /// Number of `parse_expr` calls currently on the stack
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for operator precedences
    precedence_lookup: PrecedenceLookup,
}

impl Parser {
    /// Creates a new Parser reading from `lexer`.
    ///
    /// All handlers are registered and the current and peek tokens are
    /// primed with the first two tokens of the input.
    pub fn new(lexer: Lexer) -> Self {
        let mut lexer = lexer;
        let current = lexer.next_token();
        let peek = lexer.next_token();

        let mut parser = Parser {
            lexer,
            current,
            peek,
            errors: vec![],
            depth: 0,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            precedence_lookup: HashMap::new(),
        };
        create_token_lookups(&mut parser);

        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    /// Returns the kind of the lookahead token.
    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_token_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_token_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Shifts the lookahead into the current token and reads a new lookahead.
    pub fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    /// Advances if the lookahead is `kind`.
    ///
    /// Otherwise records an `UnexpectedToken` diagnostic at the lookahead and
    /// leaves the parser where it is.
    pub fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_token_is(kind) {
            self.advance();
            true
        } else {
            let position = self.peek.span.start.clone();
            self.push_error(
                ErrorImpl::UnexpectedToken {
                    expected: kind,
                    found: self.peek.kind,
                },
                position,
            );
            false
        }
    }

    /// Moves the cursor onto the next `;`, or onto `EOF` when there is none.
    pub fn skip_to_semicolon(&mut self) {
        while !self.current_token_is(TokenKind::Semicolon) && !self.current_token_is(TokenKind::EOF)
        {
            self.advance();
        }
    }

    /// Enters one level of expression nesting.
    ///
    /// Past [`MAX_EXPR_DEPTH`] this records `ExpressionTooDeep`, skips the
    /// rest of the statement and returns false; the level is not entered.
    pub fn enter_expr(&mut self) -> bool {
        if self.depth >= MAX_EXPR_DEPTH {
            let position = self.current.span.start.clone();
            self.push_error(
                ErrorImpl::ExpressionTooDeep {
                    limit: MAX_EXPR_DEPTH,
                },
                position,
            );
            self.skip_to_semicolon();
            return false;
        }

        self.depth += 1;
        true
    }

    /// Leaves a level entered with [`Parser::enter_expr`].
    pub fn exit_expr(&mut self) {
        self.depth -= 1;
    }

    /// Precedence of the lookahead token; `Lowest` for non-operators.
    pub fn peek_precedence(&self) -> Precedence {
        self.precedence_of(self.peek.kind)
    }

    /// Precedence of the current token; `Lowest` for non-operators.
    pub fn current_precedence(&self) -> Precedence {
        self.precedence_of(self.current.kind)
    }

    fn precedence_of(&self, kind: TokenKind) -> Precedence {
        self.precedence_lookup
            .get(&kind)
            .copied()
            .unwrap_or(Precedence::Lowest)
    }

    /// Records a diagnostic.
    pub fn push_error(&mut self, error_impl: ErrorImpl, position: Position) {
        log::debug!("{} at {}", error_impl, position.0);
        self.errors.push(Error::new(error_impl, position));
    }

    /// Returns the recorded diagnostics.
    pub fn get_errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the recorded diagnostic messages, in order.
    pub fn errors(&self) -> Vec<String> {
        self.errors.iter().map(|error| error.to_string()).collect()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `precedence` - The binding strength of this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, precedence: Precedence, led_fn: LEDHandler) {
        self.precedence_lookup.insert(kind, precedence);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Assigns a precedence to a token without an infix handler.
    pub fn precedence(&mut self, kind: TokenKind, precedence: Precedence) {
        self.precedence_lookup.insert(kind, precedence);
    }

    /// Parses statements until the end of input.
    ///
    /// Statements that fail to parse are left out of the program; their
    /// diagnostics are available through [`Parser::errors`].
    pub fn parse_program(&mut self) -> Program {
        let mut statements = vec![];

        while !self.current_token_is(TokenKind::EOF) {
            if let Some(stmt) = parse_stmt(self) {
                log::trace!("parsed statement `{}`", stmt);
                statements.push(stmt);
            }
            self.advance();
        }

        Program { statements }
    }
}

/// Parses a source string into a Program.
///
/// This is the main entry point for parsing. It returns the parser as well,
/// so the caller can inspect the diagnostics.
///
/// # Arguments
///
/// * `source` - The source text
/// * `file` - Name of the source, used in diagnostic positions
pub fn parse(source: String, file: Option<String>) -> (Parser, Program) {
    let mut parser = Parser::new(Lexer::new(source, file));
    let program = parser.parse_program();

    (parser, program)
}
