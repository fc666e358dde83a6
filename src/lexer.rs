use std::fmt;

use log::debug;

use crate::ident_table::IdentTable;
use crate::scanner::{Scanner, SourceBuffer};
use crate::token::{Location, Token, TokenKind, TokenValue};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LexError {
    UnrecognizedSymbol { symbol: char, location: Location },
    UnterminatedString { location: Location },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnrecognizedSymbol { symbol, location } => {
                write!(f, "({}) unrecognized symbol '{}'", location, symbol)
            }
            LexError::UnterminatedString { location } => {
                write!(f, "({}) unterminated string literal", location)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Turns the character stream into a token stream with one token of
/// lookahead. `peeked` keeps the last scanned token even after it has been
/// consumed; `has_lookahead` tells whether it is still pending.
pub struct Lexer<'a> {
    scanner: Scanner<'a>,
    ident_table: IdentTable,
    previous: Option<Token<'a>>,
    peeked: Option<Token<'a>>,
    has_lookahead: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(buffer: &'a SourceBuffer) -> Lexer<'a> {
        Lexer {
            scanner: Scanner::new(buffer),
            ident_table: IdentTable::new(),
            previous: None,
            peeked: None,
            has_lookahead: false,
        }
    }

    //////////////////////////////////////////////////////////////////////////
    /// Consumer API
    //////////////////////////////////////////////////////////////////////////

    /// Moves the current token forward by exactly one, consuming the cached
    /// lookahead if there is one and scanning otherwise.
    pub fn advance(&mut self) -> Result<(), LexError> {
        self.previous = self.peeked;

        if self.has_lookahead {
            self.has_lookahead = false;
        } else {
            let token = self.next_token()?;
            debug!("scanned {:?}", token);
            self.peeked = Some(token);
            self.has_lookahead = true;
        }
        Ok(())
    }

    /// The next token without consuming it. Calling peek twice in a row
    /// returns the same token both times and does not touch the source.
    pub fn peek(&mut self) -> Result<Token<'a>, LexError> {
        if !self.has_lookahead {
            self.advance()?;
        }
        Ok(self.peeked.expect("advance always fills the lookahead slot"))
    }

    /// Consumes the next token and returns true iff it has the given kind.
    /// On a mismatch nothing is consumed.
    pub fn matches(&mut self, kind: TokenKind) -> Result<bool, LexError> {
        if self.peek()?.kind != kind {
            return Ok(false);
        }

        self.advance()?;
        Ok(true)
    }

    /// The most recently consumed token; None until the first successful
    /// `advance`/`matches`.
    pub fn previous_token(&self) -> Option<Token<'a>> {
        self.previous
    }

    //////////////////////////////////////////////////////////////////////////
    /// Token matching rules
    //////////////////////////////////////////////////////////////////////////

    fn next_token(&mut self) -> Result<Token<'a>, LexError> {
        self.skip_whitespace();
        self.skip_comments();

        if self.scanner.is_at_end() {
            let location = self.scanner.current_location();
            return Ok(self.make_token(TokenKind::Eof, TokenValue::None, location));
        }

        if let Some(token) = self.match_operator() {
            return Ok(token);
        }
        if let Some(token) = self.match_numeric_literal() {
            return Ok(token);
        }
        if let Some(token) = self.match_string_literal()? {
            return Ok(token);
        }
        if let Some(token) = self.match_word() {
            return Ok(token);
        }

        Err(LexError::UnrecognizedSymbol {
            symbol: self.scanner.current_symbol() as char,
            location: self.scanner.current_location(),
        })
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.scanner.current_symbol() {
                b' ' | b'\t' => self.scanner.move_right(),
                b'\n' => self.scanner.move_next_line(),
                _ => break,
            }
        }
    }

    fn skip_comments(&mut self) {
        while self.scanner.current_symbol() == b'#' {
            self.scanner.move_next_line();
            self.skip_whitespace();
        }
    }

    fn match_operator(&mut self) -> Option<Token<'a>> {
        // Location is captured before any operator symbol is consumed.
        let location = self.scanner.current_location();

        let kind = match self.scanner.current_symbol() {
            b'=' => return Some(self.one_or_two(b'=', TokenKind::Equal, TokenKind::EqualEqual, location)),
            b'!' => return Some(self.one_or_two(b'=', TokenKind::Bang, TokenKind::BangEqual, location)),
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'<' => TokenKind::Less,
            b'>' => TokenKind::Greater,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            _ => return None,
        };

        self.scanner.move_right();
        Some(self.make_token(kind, TokenValue::None, location))
    }

    /// Shared rule for `=`/`==` and `!`/`!=`: the first symbol establishes
    /// the single-width kind, a following `second` upgrades it.
    fn one_or_two(
        &mut self,
        second: u8,
        one: TokenKind,
        two: TokenKind,
        location: Location,
    ) -> Token<'a> {
        self.scanner.move_right();

        let kind = if self.scanner.current_symbol() == second {
            self.scanner.move_right();
            two
        } else {
            one
        };
        self.make_token(kind, TokenValue::None, location)
    }

    fn match_numeric_literal(&mut self) -> Option<Token<'a>> {
        let location = self.scanner.current_location();

        let mut number: i32 = 0;
        let mut matched = false;
        while let Some(digit) = to_digit(self.scanner.current_symbol()) {
            number = number.wrapping_mul(10).wrapping_add(digit);
            matched = true;
            self.scanner.move_right();
        }

        if !matched {
            return None;
        }
        Some(self.make_token(TokenKind::Number, TokenValue::Number(number), location))
    }

    fn match_string_literal(&mut self) -> Result<Option<Token<'a>>, LexError> {
        if self.scanner.current_symbol() != b'"' {
            return Ok(None);
        }
        let location = self.scanner.current_location();

        self.scanner.move_right(); // skip opening '"'
        let start = self.scanner.current_offset();
        let mut length = 0;
        while self.scanner.current_symbol() != b'"' {
            if self.scanner.is_at_end() {
                return Err(LexError::UnterminatedString { location });
            }
            self.scanner.move_right();
            length += 1;
        }
        self.scanner.move_right(); // skip closing '"'

        let text = self.scanner.substring(start, length);
        Ok(Some(self.make_token(TokenKind::String, TokenValue::Text(text), location)))
    }

    fn match_word(&mut self) -> Option<Token<'a>> {
        let location = self.scanner.current_location();

        let start = self.scanner.current_offset();
        let mut length = 0;
        while is_word_symbol(self.scanner.current_symbol()) {
            self.scanner.move_right();
            length += 1;
        }

        if length == 0 {
            return None;
        }

        let word = self.scanner.substring(start, length);
        match self.ident_table.lookup(word) {
            Some(kind) => Some(self.make_token(kind, TokenValue::None, location)),
            None => Some(self.make_token(TokenKind::Identifier, TokenValue::Text(word), location)),
        }
    }

    fn make_token(&self, kind: TokenKind, value: TokenValue<'a>, location: Location) -> Token<'a> {
        Token {
            kind,
            value,
            location,
        }
    }
}

fn to_digit(symbol: u8) -> Option<i32> {
    if symbol.is_ascii_digit() {
        Some(i32::from(symbol - b'0'))
    } else {
        None
    }
}

fn is_word_symbol(symbol: u8) -> bool {
    symbol.is_ascii_alphanumeric() || symbol == b'_'
}
