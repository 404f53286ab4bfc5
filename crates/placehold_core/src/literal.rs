//! Relaxed object/array literal parsing for placeholder metadata.
//!
//! Metadata fragments use a forgiving JSON superset: unquoted object keys,
//! unquoted bareword values, single- or double-quoted strings, trailing
//! commas, and a bare top-level object body without braces. `a: 5, b: 'b'`
//! parses to an object, `['x', 5]` to an array, and a lone bareword to a
//! string scalar.

use serde_json::{Map, Value};

use crate::error::LiteralError;

/// Parse a metadata fragment into a structured value.
///
/// The fragment must be fully consumed; trailing characters after a
/// complete value are an error.
pub fn parse_literal(fragment: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(fragment);
    parser.skip_ws();

    let value = match parser.peek() {
        None => return Err(parser.error("empty fragment")),
        Some('{') => parser.parse_object()?,
        Some('[') => parser.parse_array()?,
        _ if has_top_level_colon(fragment) => Value::Object(parser.parse_pairs(None)?),
        _ => parser.parse_value()?,
    };

    parser.skip_ws();
    if parser.peek().is_some() {
        return Err(parser.error("unexpected characters after value"));
    }
    Ok(value)
}

/// True when the fragment contains a `:` at bracket depth zero, outside
/// quotes. Such fragments are bare object bodies.
fn has_top_level_colon(fragment: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in fragment.chars() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '{' | '[' => depth += 1,
            '}' | ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> LiteralError {
        LiteralError::new(message, self.pos)
    }

    fn parse_value(&mut self) -> Result<Value, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("expected a value")),
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some(q @ ('"' | '\'')) => self.parse_quoted(q).map(Value::String),
            Some(_) => self.parse_bare(),
        }
    }

    fn parse_object(&mut self) -> Result<Value, LiteralError> {
        self.bump(); // consume '{'
        let pairs = self.parse_pairs(Some('}'))?;
        Ok(Value::Object(pairs))
    }

    /// Parse `key: value` pairs up to `terminator`, or to end of input for
    /// a bare top-level body. The terminator character is consumed.
    fn parse_pairs(&mut self, terminator: Option<char>) -> Result<Map<String, Value>, LiteralError> {
        let mut map = Map::new();

        loop {
            self.skip_ws();
            match (self.peek(), terminator) {
                (None, None) => break,
                (None, Some(_)) => return Err(self.error("unterminated object")),
                (Some(c), Some(term)) if c == term => {
                    self.bump();
                    break;
                }
                _ => {}
            }

            let key = self.parse_key()?;
            self.skip_ws();
            if self.peek() != Some(':') {
                return Err(self.error(format!("expected ':' after key '{key}'")));
            }
            self.bump();

            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(c) if Some(c) == terminator => {
                    self.bump();
                    break;
                }
                None if terminator.is_none() => break,
                None => return Err(self.error("unterminated object")),
                Some(_) => return Err(self.error("expected ',' between pairs")),
            }
        }

        Ok(map)
    }

    fn parse_key(&mut self) -> Result<String, LiteralError> {
        self.skip_ws();
        if let Some(q @ ('"' | '\'')) = self.peek() {
            return self.parse_quoted(q);
        }

        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| !c.is_whitespace() && !matches!(c, ':' | ',' | '{' | '}' | '[' | ']' | '"' | '\''))
        {
            self.bump();
        }
        if self.pos == start {
            return Err(self.error("expected object key"));
        }
        Ok(self.input[start..self.pos].to_string())
    }

    fn parse_array(&mut self) -> Result<Value, LiteralError> {
        self.bump(); // consume '['
        let mut items = Vec::new();

        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err(self.error("unterminated array")),
                Some(']') => {
                    self.bump();
                    break;
                }
                _ => {}
            }

            items.push(self.parse_value()?);

            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(']') => {
                    self.bump();
                    break;
                }
                None => return Err(self.error("unterminated array")),
                Some(_) => return Err(self.error("expected ',' between array items")),
            }
        }

        Ok(Value::Array(items))
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, LiteralError> {
        self.bump(); // consume opening quote
        let mut out = String::new();

        loop {
            match self.bump() {
                None => return Err(self.error("unterminated string")),
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.bump() {
                    None => return Err(self.error("unterminated string")),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some(other) => out.push(other),
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// An unquoted run of characters up to a structural delimiter, coerced
    /// to number/bool/null where it reads as one.
    fn parse_bare(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| !matches!(c, ',' | ']' | '}')) {
            self.bump();
        }

        let word = self.input[start..self.pos].trim();
        if word.is_empty() {
            return Err(self.error("expected a value"));
        }
        Ok(coerce_bare(word))
    }
}

fn coerce_bare(word: &str) -> Value {
    match word {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "null" => return Value::Null,
        _ => {}
    }
    if let Ok(n) = word.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(f) = word.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(word.to_string())
}
