//! Recursive-descent parser for the document value grammar.
//!
//! The grammar is keyed on the first non-whitespace character of each value:
//! `[` opens a list, `{` a mapping, `"` a string, `t`/`f`/`n` a keyword, and
//! anything else must be a number. Commas between list elements and mapping
//! entries are accepted but not required, matching the source grammar.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{Error, Result};

use super::{Map, Value};

/// Parse exactly one value from the start of `input`, leaving any trailing
/// text unconsumed.
pub(super) fn parse_value(input: &str) -> Result<Value> {
    let mut stream = Stream {
        chars: input.chars().peekable(),
    };
    stream.value()
}

struct Stream<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Stream<'_> {
    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.chars.peek() {
            None => Err(Error::UnexpectedEof),
            Some('[') => {
                self.chars.next();
                self.list()
            }
            Some('{') => {
                self.chars.next();
                self.map()
            }
            Some('"') => {
                self.chars.next();
                Ok(Value::String(self.string_body()?))
            }
            Some('t') => {
                self.keyword("true")?;
                Ok(Value::Bool(true))
            }
            Some('f') => {
                self.keyword("false")?;
                Ok(Value::Bool(false))
            }
            Some('n') => {
                self.keyword("null")?;
                Ok(Value::Null)
            }
            Some(_) => self.number(),
        }
    }

    fn list(&mut self) -> Result<Value> {
        let mut values = Vec::new();
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                None => return Err(Error::MalformedList),
                Some(']') => {
                    self.chars.next();
                    return Ok(Value::List(values));
                }
                Some(',') if !values.is_empty() => {
                    self.chars.next();
                }
                _ => {}
            }
            values.push(self.value()?);
        }
    }

    fn map(&mut self) -> Result<Value> {
        let mut entries = Map::new();
        loop {
            self.skip_whitespace();
            match self.chars.next() {
                None => return Err(Error::UnexpectedEof),
                Some('}') => return Ok(Value::Map(entries)),
                Some(',') if !entries.is_empty() => {
                    self.skip_whitespace();
                    match self.chars.next() {
                        Some('"') => {}
                        _ => {
                            return Err(Error::MalformedMap {
                                reason: "expected a quoted key",
                            })
                        }
                    }
                }
                Some('"') => {}
                Some(_) => {
                    return Err(Error::MalformedMap {
                        reason: "expected a quoted key",
                    })
                }
            }
            let key = self.string_body()?;
            self.skip_whitespace();
            match self.chars.next() {
                Some(':') => {}
                _ => {
                    return Err(Error::MalformedMap {
                        reason: "expected `:` after key",
                    })
                }
            }
            entries.insert(key, self.value()?);
        }
    }

    /// Read the body of a string literal; the opening quote is already
    /// consumed.
    fn string_body(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.chars.next() {
                None => {
                    return Err(Error::BadStringLiteral {
                        reason: "unterminated string",
                    })
                }
                Some('"') => return Ok(out),
                Some('\\') => match self.chars.next() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('"') => out.push('"'),
                    Some('\\') => out.push('\\'),
                    _ => {
                        return Err(Error::BadStringLiteral {
                            reason: "unrecognized escape sequence",
                        })
                    }
                },
                Some('\n') | Some('\r') => {
                    return Err(Error::BadStringLiteral {
                        reason: "raw line break inside literal",
                    })
                }
                Some(other) => out.push(other),
            }
        }
    }

    fn keyword(&mut self, expected: &'static str) -> Result<()> {
        for want in expected.chars() {
            match self.chars.next() {
                Some(got) if got == want => {}
                _ => return Err(Error::BadLiteral { expected }),
            }
        }
        Ok(())
    }

    fn number(&mut self) -> Result<Value> {
        let mut text = String::new();
        if matches!(self.chars.peek(), Some('-')) {
            text.push('-');
            self.chars.next();
        }

        // Integer part: a lone zero or a non-empty digit run.
        if matches!(self.chars.peek(), Some('0')) {
            text.push('0');
            self.chars.next();
        } else {
            self.digits(&mut text)?;
        }

        let mut is_int = true;
        if matches!(self.chars.peek(), Some('.')) {
            text.push('.');
            self.chars.next();
            self.digits(&mut text)?;
            is_int = false;
        }

        if matches!(self.chars.peek(), Some('e') | Some('E')) {
            text.push(self.chars.next().unwrap_or('e'));
            if matches!(self.chars.peek(), Some('+') | Some('-')) {
                text.push(self.chars.next().unwrap_or('+'));
            }
            self.digits(&mut text)?;
            is_int = false;
        }

        if is_int {
            // Out-of-range integers fall back to floating point.
            if let Ok(value) = text.parse::<i32>() {
                return Ok(Value::Int(value));
            }
        }
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Error::BadNumber { text })
    }

    fn digits(&mut self, text: &mut String) -> Result<()> {
        let mut seen = false;
        while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
            text.push(self.chars.next().unwrap_or('0'));
            seen = true;
        }
        if seen {
            Ok(())
        } else {
            Err(Error::BadNumber { text: text.clone() })
        }
    }
}
