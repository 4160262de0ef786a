//! Tolerant JSON reader for model output that a strict parser rejects.
//!
//! Accepts the object-literal dialect models drift into: trailing commas, `//` and
//! `/* */` comments, single-quoted strings, bare identifier keys, raw newlines inside
//! strings, `undefined`/`NaN`/`Infinity` (read as `null`), leading `+` or `.` on numbers,
//! hex integers and trailing semicolons. It only ever builds a [`Value`]; nothing is
//! evaluated.

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Nesting limit; deeper input is rejected instead of recursing further.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at byte {offset}")]
pub struct LenientParseError {
    pub message: String,
    pub offset: usize,
}

/// Parse `text` as a single lenient JSON value, consuming the whole input.
pub fn parse(text: &str) -> Result<Value, LenientParseError> {
    let mut reader = Reader {
        src: text.as_bytes(),
        text,
        pos: 0,
        depth: 0,
    };
    reader.skip_trivia()?;
    let value = reader.value()?;
    reader.skip_trivia()?;
    while reader.peek() == Some(b';') {
        reader.pos += 1;
        reader.skip_trivia()?;
    }
    if reader.pos != reader.src.len() {
        return Err(reader.error("unexpected trailing content"));
    }
    Ok(value)
}

struct Reader<'a> {
    src: &'a [u8],
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Reader<'a> {
    fn error(&self, message: &str) -> LenientParseError {
        LenientParseError {
            message: message.to_string(),
            offset: self.pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.src.get(self.pos + ahead).copied()
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), LenientParseError> {
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => self.pos += 1,
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            None => {
                                self.pos = start;
                                return Err(self.error("unterminated block comment"));
                            }
                            Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(_) => self.pos += 1,
                        }
                    }
                }
                _ => {
                    // Non-breaking space and BOM show up in pasted model output.
                    let rest = &self.text[self.pos..];
                    match rest.chars().next() {
                        Some(c @ ('\u{a0}' | '\u{feff}' | '\u{2028}' | '\u{2029}')) => {
                            self.pos += c.len_utf8();
                        }
                        _ => return Ok(()),
                    }
                }
            }
        }
    }

    fn value(&mut self) -> Result<Value, LenientParseError> {
        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some(b'{') => self.nested(Self::object),
            Some(b'[') => self.nested(Self::array),
            Some(q @ (b'"' | b'\'')) => self.string(q).map(Value::String),
            Some(b'-' | b'+' | b'.' | b'0'..=b'9') => self.number(),
            Some(b) if is_ident_start(b) => {
                let word = self.identifier();
                match word {
                    "true" => Ok(Value::Bool(true)),
                    "false" => Ok(Value::Bool(false)),
                    "null" | "undefined" | "NaN" | "Infinity" => Ok(Value::Null),
                    _ => {
                        self.pos -= word.len();
                        Err(self.error("unexpected identifier"))
                    }
                }
            }
            Some(_) => Err(self.error("unexpected character")),
        }
    }

    fn nested(
        &mut self,
        read: fn(&mut Self) -> Result<Value, LenientParseError>,
    ) -> Result<Value, LenientParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let value = read(self);
        self.depth -= 1;
        value
    }

    fn object(&mut self) -> Result<Value, LenientParseError> {
        self.pos += 1; // '{'
        let mut map = Map::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(Value::Object(map));
                }
                None => return Err(self.error("unterminated object")),
                _ => {}
            }

            let key = self.key()?;
            self.skip_trivia()?;
            if self.peek() != Some(b':') {
                return Err(self.error("expected ':' after object key"));
            }
            self.pos += 1;
            self.skip_trivia()?;
            let value = self.value()?;
            map.insert(key, value);

            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {}
                None => return Err(self.error("unterminated object")),
                Some(_) => return Err(self.error("expected ',' or '}' in object")),
            }
        }
    }

    fn key(&mut self) -> Result<String, LenientParseError> {
        match self.peek() {
            Some(q @ (b'"' | b'\'')) => self.string(q),
            Some(b) if is_ident_start(b) => Ok(self.identifier().to_string()),
            Some(b'0'..=b'9') => {
                let start = self.pos;
                while matches!(self.peek(), Some(b'0'..=b'9')) {
                    self.pos += 1;
                }
                Ok(self.text[start..self.pos].to_string())
            }
            _ => Err(self.error("expected object key")),
        }
    }

    fn array(&mut self) -> Result<Value, LenientParseError> {
        self.pos += 1; // '['
        let mut items = Vec::new();
        loop {
            self.skip_trivia()?;
            match self.peek() {
                Some(b']') => {
                    self.pos += 1;
                    return Ok(Value::Array(items));
                }
                None => return Err(self.error("unterminated array")),
                _ => {}
            }

            items.push(self.value()?);

            self.skip_trivia()?;
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {}
                None => return Err(self.error("unterminated array")),
                Some(_) => return Err(self.error("expected ',' or ']' in array")),
            }
        }
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if is_ident_continue(b) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = self.text;
        &text[start..self.pos]
    }

    fn string(&mut self, quote: u8) -> Result<String, LenientParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut out = String::new();
        loop {
            let rest = &self.text[self.pos..];
            let Some(c) = rest.chars().next() else {
                self.pos = start;
                return Err(self.error("unterminated string"));
            };
            if c as u32 == quote as u32 {
                self.pos += 1;
                return Ok(out);
            }
            if c != '\\' {
                out.push(c);
                self.pos += c.len_utf8();
                continue;
            }

            self.pos += 1;
            let Some(esc) = self.text[self.pos..].chars().next() else {
                self.pos = start;
                return Err(self.error("unterminated string"));
            };
            self.pos += esc.len_utf8();
            match esc {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                'r' => out.push('\r'),
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                'v' => out.push('\u{b}'),
                '0' => out.push('\0'),
                'u' => out.push(self.unicode_escape()?),
                // Line continuation.
                '\n' => {}
                '\r' => {
                    if self.peek() == Some(b'\n') {
                        self.pos += 1;
                    }
                }
                other => out.push(other),
            }
        }
    }

    fn hex4(&mut self) -> Result<u32, LenientParseError> {
        let digits = self
            .text
            .get(self.pos..self.pos + 4)
            .ok_or_else(|| self.error("truncated \\u escape"))?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(self.error("invalid \\u escape"));
        }
        let code =
            u32::from_str_radix(digits, 16).map_err(|_| self.error("invalid \\u escape"))?;
        self.pos += 4;
        Ok(code)
    }

    fn unicode_escape(&mut self) -> Result<char, LenientParseError> {
        let high = self.hex4()?;
        if (0xD800..0xDC00).contains(&high)
            && self.peek() == Some(b'\\')
            && self.peek_at(1) == Some(b'u')
        {
            let save = self.pos;
            self.pos += 2;
            let low = self.hex4()?;
            if (0xDC00..0xE000).contains(&low) {
                let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(code).unwrap_or('\u{fffd}'));
            }
            self.pos = save;
        }
        Ok(char::from_u32(high).unwrap_or('\u{fffd}'))
    }

    fn number(&mut self) -> Result<Value, LenientParseError> {
        let start = self.pos;
        let negative = match self.peek() {
            Some(b'-') => {
                self.pos += 1;
                true
            }
            Some(b'+') => {
                self.pos += 1;
                false
            }
            _ => false,
        };

        if self.text[self.pos..].starts_with("Infinity") {
            self.pos += "Infinity".len();
            return Ok(Value::Null);
        }

        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x' | b'X')) {
            self.pos += 2;
            let digits_start = self.pos;
            while matches!(self.peek(), Some(b) if b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
            let magnitude = i64::from_str_radix(&self.text[digits_start..self.pos], 16)
                .map_err(|_| self.error("invalid hex number"))?;
            return Ok(Value::Number(Number::from(if negative {
                -magnitude
            } else {
                magnitude
            })));
        }

        let digits_start = self.pos;
        let mut is_float = false;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') {
            is_float = true;
            self.pos += 1;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
        }
        if self.pos == digits_start || &self.text[digits_start..self.pos] == "." {
            self.pos = start;
            return Err(self.error("invalid number"));
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            let exp_start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            if self.pos == exp_start {
                return Err(self.error("invalid exponent"));
            }
        }

        let literal = &self.text[digits_start..self.pos];
        if !is_float {
            if let Ok(n) = literal.parse::<i64>() {
                return Ok(Value::Number(Number::from(if negative { -n } else { n })));
            }
            if !negative {
                if let Ok(n) = literal.parse::<u64>() {
                    return Ok(Value::Number(Number::from(n)));
                }
            }
        }
        let magnitude: f64 = literal
            .parse()
            .map_err(|_| self.error("invalid number"))?;
        let n = if negative { -magnitude } else { magnitude };
        Ok(Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null))
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_trailing_commas() {
        assert_eq!(parse(r#"{"a":1,}"#).unwrap(), json!({"a": 1}));
        assert_eq!(parse("[1, 2, 3,]").unwrap(), json!([1, 2, 3]));
        assert_eq!(
            parse(r#"{"a": {"b": [true, false,],},}"#).unwrap(),
            json!({"a": {"b": [true, false]}})
        );
    }

    #[test]
    fn test_object_literal_dialect() {
        let text = r#"{
            // headline first
            headline: 'Taste the "Storm"',
            sub_headline: "Cold brew", /* cta below */
            $cta: 'It\'s here',
            weight: +.5,
            hex: 0x1F,
        };"#;
        assert_eq!(
            parse(text).unwrap(),
            json!({
                "headline": "Taste the \"Storm\"",
                "sub_headline": "Cold brew",
                "$cta": "It's here",
                "weight": 0.5,
                "hex": 31
            })
        );
    }

    #[test]
    fn test_non_json_literals_become_null() {
        assert_eq!(
            parse("{a: undefined, b: NaN, c: -Infinity}").unwrap(),
            json!({"a": null, "b": null, "c": null})
        );
    }

    #[test]
    fn test_raw_newline_and_unicode_escapes() {
        assert_eq!(
            parse("{\"t\": \"line1\nline2 \\u00e9 \\ud83d\\ude00\"}").unwrap(),
            json!({"t": "line1\nline2 é 😀"})
        );
    }

    #[test]
    fn test_rejects_prose() {
        assert!(parse("not json at all").is_err());
        assert!(parse("{\"a\": 1} and more").is_err());
        assert!(parse("{\"a\": ").is_err());
        assert!(parse("{\"a\" 1}").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn test_unterminated_comment_and_string() {
        assert!(parse("{\"a\": 1 /* open").is_err());
        assert!(parse("{\"a\": \"open}").is_err());
    }

    #[test]
    fn test_unicode_escape_needs_four_hex_digits() {
        assert!(parse("{a: \"\\u+12a\"}").is_err());
        assert!(parse("{a: \"\\u-001\"}").is_err());
        assert_eq!(parse("{a: \"\\u012A\"}").unwrap(), json!({"a": "\u{12a}"}));
    }

    #[test]
    fn test_depth_limit() {
        let deep = format!("{}{}", "[".repeat(MAX_DEPTH + 1), "]".repeat(MAX_DEPTH + 1));
        let err = parse(&deep).unwrap_err();
        assert_eq!(err.message, "nesting too deep");

        let ok = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&ok).is_ok());
    }

    #[test]
    fn test_large_integers() {
        assert_eq!(parse("18446744073709551615").unwrap(), json!(u64::MAX));
        assert_eq!(parse("-42").unwrap(), json!(-42));
    }
}
