//! Purpose: Recursive-descent parser for the JSON subset the quiz payload uses.
//! Exports: `parse`.
//! Role: Turns a complete text buffer into one `Value` or a `Syntax` error.
//! Invariants: Every error carries the 0-based character offset where parsing stopped.
//! Invariants: No partial value is ever returned; trailing content fails the parse.

use crate::core::error::{Error, ErrorKind};
use crate::json::value::{Number, Value, insert_entry};

/// Parse a complete JSON document. Empty input is an error, not a null value.
pub fn parse(input: &str) -> Result<Value, Error> {
    let mut parser = Parser::new(input);
    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if !parser.is_at_end() {
        return Err(parser.error("Unexpected characters after JSON content"));
    }
    Ok(value)
}

struct Parser {
    chars: Vec<char>,
    index: usize,
}

impl Parser {
    fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            index: 0,
        }
    }

    fn parse_value(&mut self) -> Result<Value, Error> {
        self.skip_whitespace();
        let Some(c) = self.peek() else {
            return Err(self.error("Unexpected end of JSON input"));
        };
        match c {
            '{' => self.parse_object(),
            '[' => self.parse_array(),
            '"' => self.parse_string().map(Value::String),
            't' => {
                self.expect_literal("true")?;
                Ok(Value::Bool(true))
            }
            'f' => {
                self.expect_literal("false")?;
                Ok(Value::Bool(false))
            }
            'n' => {
                self.expect_literal("null")?;
                Ok(Value::Null)
            }
            c if is_number_start(c) => self.parse_number(),
            c => Err(self.error(format!("Unexpected character: {c}"))),
        }
    }

    fn parse_object(&mut self) -> Result<Value, Error> {
        self.expect('{')?;
        let mut entries = Vec::new();
        self.skip_whitespace();
        if self.match_char('}') {
            return Ok(Value::Object(entries));
        }
        loop {
            self.skip_whitespace();
            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(':')?;
            let value = self.parse_value()?;
            insert_entry(&mut entries, key, value);
            self.skip_whitespace();
            if !self.match_char(',') {
                break;
            }
        }
        self.expect('}')?;
        Ok(Value::Object(entries))
    }

    fn parse_array(&mut self) -> Result<Value, Error> {
        self.expect('[')?;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.match_char(']') {
            return Ok(Value::Array(items));
        }
        loop {
            items.push(self.parse_value()?);
            self.skip_whitespace();
            if !self.match_char(',') {
                break;
            }
        }
        self.expect(']')?;
        Ok(Value::Array(items))
    }

    fn parse_string(&mut self) -> Result<String, Error> {
        self.expect('"')?;
        let mut out = String::new();
        while let Some(c) = self.advance() {
            match c {
                '"' => return Ok(out),
                '\\' => {
                    let Some(escaped) = self.advance() else {
                        return Err(self.error("Unterminated escape sequence in string"));
                    };
                    match escaped {
                        '"' | '\\' | '/' => out.push(escaped),
                        'b' => out.push('\u{0008}'),
                        'f' => out.push('\u{000c}'),
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        'u' => out.push(self.parse_unicode_escape()?),
                        other => {
                            return Err(self.error(format!("Invalid escape sequence: \\{other}")));
                        }
                    }
                }
                other => out.push(other),
            }
        }
        Err(self.error("Unterminated string literal"))
    }

    fn parse_unicode_escape(&mut self) -> Result<char, Error> {
        let mut value: u32 = 0;
        for _ in 0..4 {
            let Some(hex) = self.advance() else {
                return Err(self.error("Incomplete unicode escape sequence"));
            };
            let Some(digit) = hex.to_digit(16) else {
                return Err(self.error(format!("Invalid hex digit in unicode escape: {hex}")));
            };
            value = (value << 4) | digit;
        }
        // A lone surrogate code unit cannot live in a Rust string; no
        // surrogate-pair combination is attempted.
        Ok(char::from_u32(value).unwrap_or('\u{fffd}'))
    }

    fn parse_number(&mut self) -> Result<Value, Error> {
        let start = self.index;
        if self.peek() == Some('-') {
            self.advance();
        }
        if self.peek() == Some('0') {
            self.advance();
        } else {
            self.consume_digits()?;
        }
        let mut fractional = false;
        if self.match_char('.') {
            fractional = true;
            self.consume_digits()?;
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            fractional = true;
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.consume_digits()?;
        }
        let lexeme: String = self.chars[start..self.index].iter().collect();
        let number = if fractional {
            lexeme.parse::<f64>().ok().map(Number::Float)
        } else {
            // Integral lexemes that overflow i64 fail the whole parse.
            lexeme.parse::<i64>().ok().map(Number::Int)
        };
        match number {
            Some(number) => Ok(Value::Number(number)),
            None => Err(self.error(format!("Invalid number: {lexeme}"))),
        }
    }

    fn consume_digits(&mut self) -> Result<(), Error> {
        if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            return Err(self.error("Expected digit"));
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        Ok(())
    }

    fn expect(&mut self, expected: char) -> Result<(), Error> {
        if self.peek() != Some(expected) {
            return Err(self.error(format!("Expected '{expected}'")));
        }
        self.index += 1;
        Ok(())
    }

    fn expect_literal(&mut self, literal: &str) -> Result<(), Error> {
        for expected in literal.chars() {
            if self.peek() != Some(expected) {
                return Err(self.error(format!("Expected \"{literal}\"")));
            }
            self.index += 1;
        }
        Ok(())
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() != Some(expected) {
            return false;
        }
        self.index += 1;
        true
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += 1;
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\n' | '\r' | '\t')) {
            self.index += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.index >= self.chars.len()
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::new(ErrorKind::Syntax)
            .with_message(message)
            .with_offset(self.index)
    }
}

fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '-'
}
