use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_SPAN, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

lazy_static! {
    // Identifiers never contain digits in this grammar.
    static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[a-zA-Z_]+").unwrap();
    static ref INTEGER_PATTERN: Regex = Regex::new("^[0-9]+").unwrap();
}

/// On-demand tokenizer over an in-memory source.
///
/// Each call to [`Lexer::next_token`] scans exactly one token. Once the end of
/// the input is reached every further call returns an `EOF` token positioned
/// at the end of the source.
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            pos: 0,
            file: file_name,
        }
    }

    /// The character under the cursor.
    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// The character after the one under the cursor.
    pub fn peek(&self) -> Option<char> {
        self.remainder().chars().nth(1)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn get_file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let Some(ch) = self.at() else {
            return MK_TOKEN!(
                TokenKind::EOF,
                String::new(),
                MK_SPAN!(self.pos, self.pos, self.file)
            );
        };

        let token = match ch {
            '=' if self.peek() == Some('=') => self.emit(TokenKind::Equals, 2),
            '=' => self.emit(TokenKind::Assign, 1),
            '!' if self.peek() == Some('=') => self.emit(TokenKind::NotEquals, 2),
            '!' => self.emit(TokenKind::Bang, 1),
            '+' => self.emit(TokenKind::Plus, 1),
            '-' => self.emit(TokenKind::Minus, 1),
            '*' => self.emit(TokenKind::Asterisk, 1),
            '/' => self.emit(TokenKind::Slash, 1),
            '<' => self.emit(TokenKind::Less, 1),
            '>' => self.emit(TokenKind::Greater, 1),
            ',' => self.emit(TokenKind::Comma, 1),
            ';' => self.emit(TokenKind::Semicolon, 1),
            '(' => self.emit(TokenKind::OpenParen, 1),
            ')' => self.emit(TokenKind::CloseParen, 1),
            '{' => self.emit(TokenKind::OpenCurly, 1),
            '}' => self.emit(TokenKind::CloseCurly, 1),
            _ if ch.is_ascii_alphabetic() || ch == '_' => {
                let len = self.match_len(&IDENTIFIER_PATTERN);
                let kind = RESERVED_LOOKUP
                    .get(&self.remainder()[..len])
                    .copied()
                    .unwrap_or(TokenKind::Identifier);
                self.emit(kind, len)
            }
            _ if ch.is_ascii_digit() => {
                let len = self.match_len(&INTEGER_PATTERN);
                self.emit(TokenKind::Int, len)
            }
            _ => self.emit(TokenKind::Illegal, ch.len_utf8()),
        };

        log::trace!(
            "{} {:?} at {}",
            token.kind,
            token.value,
            token.span.start.0
        );

        token
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.at() {
            self.pos += 1;
        }
    }

    fn match_len(&self, pattern: &Regex) -> usize {
        pattern.find(self.remainder()).map_or(0, |m| m.end())
    }

    /// Consumes `len` bytes as a token of `kind`.
    fn emit(&mut self, kind: TokenKind, len: usize) -> Token {
        let start = self.pos;
        self.pos += len;

        MK_TOKEN!(
            kind,
            String::from(&self.source[start..self.pos]),
            MK_SPAN!(start, self.pos, self.file)
        )
    }
}

/// Scans a whole source, up to and including the first `EOF` token.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            break;
        }
    }

    tokens
}
