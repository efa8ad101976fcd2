use tracing::{debug, trace};

use crate::error::ScanError;
use crate::keywords;
use crate::token::{Literal, Token, TokenType};

/// Scan `source` into tokens, ending with a single `EndOfInput`.
pub fn scan(source: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(String::from(source)).scan_tokens()
}

pub struct Scanner {
    source: String,
    start: usize,
    current: usize,
    line: u32,
    // Line of the character at `start`.
    start_line: u32,
    tokens: Vec<Token>,
}

impl Scanner {
    pub fn new(source: String) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            tokens: Vec::new(),
        }
    }

    /// Consumes the scanner. Stops at the first lexical error and drops any
    /// tokens gathered before it.
    pub fn scan_tokens(mut self) -> Result<Vec<Token>, ScanError> {
        while !self.is_end() {
            self.start = self.current;
            self.start_line = self.line;
            if let Err(err) = self.scan_token() {
                debug!(line = err.line(), error = %err, "scan failed");
                return Err(err);
            }
        }

        self.tokens.push(Token::end_of_input(self.line));
        debug!(tokens = self.tokens.len(), line = self.line, "scan complete");

        Ok(self.tokens)
    }

    fn scan_token(&mut self) -> Result<(), ScanError> {
        match self.next_char() {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),
            '!' => {
                if self.match_next('=') {
                    self.add_token(TokenType::BangEqual)
                } else {
                    self.add_token(TokenType::Bang)
                }
            }
            '=' => {
                if self.match_next('=') {
                    self.add_token(TokenType::EqualEqual)
                } else {
                    self.add_token(TokenType::Equal)
                }
            }
            '<' => {
                if self.match_next('=') {
                    self.add_token(TokenType::LessEqual)
                } else {
                    self.add_token(TokenType::Less)
                }
            }
            '>' => {
                if self.match_next('=') {
                    self.add_token(TokenType::GreaterEqual)
                } else {
                    self.add_token(TokenType::Greater)
                }
            }
            '/' => {
                if self.match_next('/') {
                    // Comment runs to the end of the line; the newline is left
                    // for the next iteration so the line count stays right.
                    while self.peek_char() != '\n' && !self.is_end() {
                        let _ = self.next_char();
                    }
                } else {
                    self.add_token(TokenType::Slash)
                }
            }
            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,
            '"' => return self.string(),
            '0'..='9' => return self.number(),
            'a'..='z' | 'A'..='Z' | '_' => self.identifier(),
            _ => return Err(self.unexpected_character()),
        }

        Ok(())
    }

    fn is_end(&self) -> bool {
        self.current >= self.source.len()
    }

    // Works on bytes: every character the grammar cares about is ASCII, and
    // anything else either sits inside a string or comment or is an error.
    fn next_char(&mut self) -> char {
        self.current += 1;
        self.source.as_bytes()[self.current - 1] as char
    }

    fn peek_char(&self) -> char {
        self.char_at(self.current)
    }

    fn peek_next_char(&self) -> char {
        self.char_at(self.current + 1)
    }

    fn char_at(&self, idx: usize) -> char {
        self.source
            .as_bytes()
            .get(idx)
            .map_or('\0', |byte| *byte as char)
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.is_end() || self.peek_char() != expected {
            return false;
        }
        self.current += 1;
        true
    }

    fn lexeme(&self) -> &str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, t: TokenType) {
        self.push_token(t, None);
    }

    fn push_token(&mut self, t: TokenType, literal: Option<Literal>) {
        let token = Token::new(t, self.lexeme(), literal, self.start_line);
        trace!(kind = %token.t, lexeme = %token.lexeme, line = token.line, "token");
        self.tokens.push(token);
    }

    fn unexpected_character(&self) -> ScanError {
        // `start` is always on a char boundary, so this decodes the whole
        // scalar value even when the offending byte opens a multi-byte one.
        let character = self.source[self.start..].chars().next().unwrap_or('\0');
        ScanError::UnexpectedCharacter {
            line: self.line,
            character,
        }
    }

    fn string(&mut self) -> Result<(), ScanError> {
        while self.peek_char() != '"' && !self.is_end() {
            if self.next_char() == '\n' {
                self.line += 1;
            }
        }

        if self.is_end() {
            return Err(ScanError::UnterminatedString {
                line: self.start_line,
            });
        }

        // The closing quote.
        let _ = self.next_char();

        let value = String::from(&self.source[self.start + 1..self.current - 1]);
        self.push_token(TokenType::String, Some(Literal::String(value)));
        Ok(())
    }

    fn number(&mut self) -> Result<(), ScanError> {
        while self.peek_char().is_ascii_digit() {
            let _ = self.next_char();
        }

        if self.peek_char() == '.' && self.peek_next_char().is_ascii_digit() {
            let _ = self.next_char();

            while self.peek_char().is_ascii_digit() {
                let _ = self.next_char();
            }
        }

        let value = self
            .lexeme()
            .parse::<f64>()
            .map_err(|_| ScanError::InvalidNumberLiteral {
                line: self.line,
                lexeme: String::from(self.lexeme()),
            })?;
        self.push_token(TokenType::Number, Some(Literal::Number(value)));
        Ok(())
    }

    fn identifier(&mut self) {
        while self.peek_char().is_ascii_alphanumeric() || self.peek_char() == '_' {
            let _ = self.next_char();
        }

        let t = keywords::lookup(self.lexeme()).unwrap_or(TokenType::Identifier);
        self.add_token(t);
    }
}
