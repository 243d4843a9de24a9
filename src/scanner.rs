use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::ScanError;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Byte stream to token stream. Maintains `current` and `line`, per the
/// teacher's convention — the fourth field it also tracked, a column
/// offset, is dropped: this language has no column-tracking requirement.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source: source.chars().peekmore(),
            tokens: Vec::new(),
            errors: Vec::new(),
            current: 0,
            line: 1,
        }
    }

    /// Scans the whole source, returning the token list (always
    /// EOF-terminated) and any lexical errors encountered along the way.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(TokenKind::Eof, "", None, self.line));
        (self.tokens, self.errors)
    }

    fn advance(&mut self) -> char {
        let c = self.source.next().expect("caller checked is_at_end first");
        self.current += 1;
        c
    }

    fn peek(&mut self) -> Option<char> {
        self.source.peek().copied()
    }

    fn peek_next(&mut self) -> Option<char> {
        self.source.peek_next().copied()
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    fn add_token(&mut self, kind: TokenKind, lexeme: String, literal: Option<Value>) {
        self.tokens.push(Token::new(kind, lexeme, literal, self.line));
    }

    fn add_single_char_token(&mut self, kind: TokenKind) {
        let c = self.advance();
        self.add_token(kind, c.to_string(), None);
    }

    fn add_double_char_token(&mut self, kind: TokenKind) {
        let first = self.advance();
        let second = self.advance();
        self.add_token(kind, format!("{first}{second}"), None);
    }

    fn string(&mut self) {
        self.advance(); // opening quote
        let mut value = String::new();

        loop {
            match self.peek() {
                None => {
                    self.errors.push(ScanError::UnterminatedString);
                    return;
                }
                Some('"') => break,
                Some(c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    value.push(c);
                    self.advance();
                }
            }
        }

        self.advance(); // closing quote
        self.add_token(TokenKind::String, value.clone(), Some(Value::String(value)));
    }

    /// Digits, optionally `.` followed by more digits. A bare trailing dot
    /// (not followed by a digit) is left for the next scan pass to emit as
    /// its own DOT token, so method-call-style syntax on a literal would
    /// still tokenize sensibly even though this language has no methods.
    fn number(&mut self) {
        let mut lexeme = String::new();
        let mut is_float = false;

        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            lexeme.push(self.advance());
        }

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            lexeme.push(self.advance()); // the dot

            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                lexeme.push(self.advance());
            }
        }

        if is_float {
            let literal = Value::Float(lexeme.parse().expect("digit-and-dot lexeme is valid float syntax"));
            self.add_token(TokenKind::Number, lexeme, Some(literal));
            return;
        }

        match lexeme.parse() {
            Ok(n) => self.add_token(TokenKind::Number, lexeme, Some(Value::Integer(n))),
            Err(_) => self.errors.push(ScanError::IntegerOverflow { lexeme, line: self.line }),
        }
    }

    fn identifier(&mut self) {
        let mut lexeme = String::new();

        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            lexeme.push(self.advance());
        }

        let kind = match lexeme.as_str() {
            "and" => TokenKind::And,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => TokenKind::Identifier,
        };

        self.add_token(kind, lexeme, None);
    }

    /// `/* ... */`, not nested, spanning lines. Per spec, reaching EOF
    /// inside a block comment is silently accepted rather than reported.
    fn block_comment(&mut self) {
        loop {
            match (self.peek(), self.peek_next()) {
                (None, _) => return,
                (Some('*'), Some('/')) => {
                    self.advance();
                    self.advance();
                    return;
                }
                (Some('\n'), _) => {
                    self.line += 1;
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn scan_token(&mut self) {
        let c = self.peek().expect("is_at_end guarantees a char is pending");

        match c {
            '(' => self.add_single_char_token(TokenKind::LeftParen),
            ')' => self.add_single_char_token(TokenKind::RightParen),
            '{' => self.add_single_char_token(TokenKind::LeftBrace),
            '}' => self.add_single_char_token(TokenKind::RightBrace),
            ',' => self.add_single_char_token(TokenKind::Comma),
            '.' => self.add_single_char_token(TokenKind::Dot),
            '-' => self.add_single_char_token(TokenKind::Minus),
            '+' => self.add_single_char_token(TokenKind::Plus),
            ';' => self.add_single_char_token(TokenKind::Semicolon),
            '*' => self.add_single_char_token(TokenKind::Star),

            '!' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(TokenKind::BangEqual, "!=".to_string(), None);
                } else {
                    self.add_token(TokenKind::Bang, "!".to_string(), None);
                }
            }
            '=' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(TokenKind::EqualEqual, "==".to_string(), None);
                } else {
                    self.add_token(TokenKind::Equal, "=".to_string(), None);
                }
            }
            '<' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(TokenKind::LessEqual, "<=".to_string(), None);
                } else {
                    self.add_token(TokenKind::Less, "<".to_string(), None);
                }
            }
            '>' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(TokenKind::GreaterEqual, ">=".to_string(), None);
                } else {
                    self.add_token(TokenKind::Greater, ">".to_string(), None);
                }
            }
            '/' => {
                self.advance();
                if self.match_next('/') {
                    while !matches!(self.peek(), Some('\n') | None) {
                        self.advance();
                    }
                } else if self.match_next('*') {
                    self.block_comment();
                } else {
                    self.add_token(TokenKind::Slash, "/".to_string(), None);
                }
            }

            ' ' | '\r' | '\t' => {
                self.advance();
            }

            '\n' => {
                self.advance();
                self.line += 1;
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),

            c if c.is_alphabetic() || c == '_' => self.identifier(),

            c => {
                self.advance();
                self.errors.push(ScanError::UnexpectedCharacter { character: c, line: self.line });
            }
        }
    }
}
