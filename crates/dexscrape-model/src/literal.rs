// Python-style literals for list- and dict-valued output fields.
//
// The delimited files carry list fields as Python `repr` text
// (e.g. `['Grass', 'Poison']`). `PyLiteral` renders that syntax and
// parses it back, so downstream readers do not need to guess.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use thiserror::Error;

/// A value in the subset of Python literal syntax the exporters emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PyLiteral {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<PyLiteral>),
    /// Insertion-ordered key/value pairs.
    Dict(Vec<(PyLiteral, PyLiteral)>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character '{ch}' at byte {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("trailing input at byte {0}")]
    TrailingInput(usize),

    #[error("invalid integer literal: {0}")]
    InvalidInt(String),

    #[error("invalid escape sequence at byte {0}")]
    InvalidEscape(usize),

    #[error("unknown identifier: {0}")]
    UnknownIdent(String),
}

impl PyLiteral {
    /// Build a list of strings.
    pub fn str_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PyLiteral::List(items.into_iter().map(|s| PyLiteral::Str(s.into())).collect())
    }

    /// Optional integer, rendered as `None` when absent.
    pub fn opt_int<T: Into<i64>>(value: Option<T>) -> Self {
        value.map_or(PyLiteral::None, |v| PyLiteral::Int(v.into()))
    }

    /// Insert or replace a dict entry. A replaced key keeps its original position.
    pub fn dict_insert(entries: &mut Vec<(PyLiteral, PyLiteral)>, key: PyLiteral, value: PyLiteral) {
        if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            entries.push((key, value));
        }
    }

    /// The elements of a list made only of strings.
    pub fn as_str_list(&self) -> Option<Vec<String>> {
        match self {
            PyLiteral::List(items) => items
                .iter()
                .map(|item| match item {
                    PyLiteral::Str(s) => Some(s.clone()),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PyLiteral::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a string key in a dict.
    pub fn get(&self, key: &str) -> Option<&PyLiteral> {
        match self {
            PyLiteral::Dict(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

impl fmt::Display for PyLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PyLiteral::None => f.write_str("None"),
            PyLiteral::Bool(true) => f.write_str("True"),
            PyLiteral::Bool(false) => f.write_str("False"),
            PyLiteral::Int(n) => write!(f, "{n}"),
            PyLiteral::Str(s) => write_str_repr(f, s),
            PyLiteral::List(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            PyLiteral::Dict(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_char('}')
            }
        }
    }
}

/// Quote selection matches Python: single quotes unless the text holds a
/// single quote and no double quote.
fn write_str_repr(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    f.write_char(quote)?;
    for ch in s.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c if !is_printable(c) => match c as u32 {
                code @ 0..=0xff => write!(f, "\\x{code:02x}")?,
                code @ 0x100..=0xffff => write!(f, "\\u{code:04x}")?,
                code => write!(f, "\\U{code:08x}")?,
            },
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Code points `repr` escapes: controls, separators other than the ASCII
/// space, format characters, private use, and noncharacters.
///
/// Unassigned code points are not tracked and are written as-is.
const NON_PRINTABLE: &[(u32, u32)] = &[
    (0x0000, 0x001f),
    (0x007f, 0x00a0),
    (0x00ad, 0x00ad),
    (0x0600, 0x0605),
    (0x061c, 0x061c),
    (0x06dd, 0x06dd),
    (0x070f, 0x070f),
    (0x1680, 0x1680),
    (0x180e, 0x180e),
    (0x2000, 0x200f),
    (0x2028, 0x202f),
    (0x205f, 0x2064),
    (0x2066, 0x206f),
    (0x3000, 0x3000),
    (0xe000, 0xf8ff),
    (0xfeff, 0xfeff),
    (0xfff9, 0xfffb),
    (0xfffe, 0xffff),
    (0xe0001, 0xe0001),
    (0xe0020, 0xe007f),
    (0xf0000, 0x10ffff),
];

fn is_printable(c: char) -> bool {
    let code = c as u32;
    !NON_PRINTABLE.iter().any(|&(lo, hi)| (lo..=hi).contains(&code))
}

impl FromStr for PyLiteral {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src: s, pos: 0 };
        let value = parser.value()?;
        parser.skip_ws();
        if parser.pos < s.len() {
            return Err(LiteralError::TrailingInput(parser.pos));
        }
        Ok(value)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, want: char) -> Result<(), LiteralError> {
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(ch) => Err(LiteralError::UnexpectedChar { ch, pos: self.pos - ch.len_utf8() }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn value(&mut self) -> Result<PyLiteral, LiteralError> {
        self.skip_ws();
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some('[') => self.list(),
            Some('{') => self.dict(),
            Some(q @ ('\'' | '"')) => self.string(q).map(PyLiteral::Str),
            Some(c) if c == '-' || c.is_ascii_digit() => self.int(),
            Some(c) if c.is_ascii_alphabetic() => self.ident(),
            Some(ch) => Err(LiteralError::UnexpectedChar { ch, pos: self.pos }),
        }
    }

    /// Comma-separated items up to `close`, trailing comma allowed.
    fn items<T>(
        &mut self,
        close: char,
        mut item: impl FnMut(&mut Self) -> Result<T, LiteralError>,
    ) -> Result<Vec<T>, LiteralError> {
        let mut out = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(out);
            }
            out.push(item(self)?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(out),
                Some(ch) => return Err(LiteralError::UnexpectedChar { ch, pos: self.pos - ch.len_utf8() }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn list(&mut self) -> Result<PyLiteral, LiteralError> {
        self.expect('[')?;
        self.items(']', |p| p.value()).map(PyLiteral::List)
    }

    fn dict(&mut self) -> Result<PyLiteral, LiteralError> {
        self.expect('{')?;
        self.items('}', |p| {
            let key = p.value()?;
            p.skip_ws();
            p.expect(':')?;
            let value = p.value()?;
            Ok((key, value))
        })
        .map(PyLiteral::Dict)
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            let start = self.pos;
            match self.bump().ok_or(LiteralError::UnexpectedEnd)? {
                c if c == quote => return Ok(out),
                '\\' => {
                    let esc = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
                    match esc {
                        '\\' | '\'' | '"' => out.push(esc),
                        'n' => out.push('\n'),
                        'r' => out.push('\r'),
                        't' => out.push('\t'),
                        'x' => out.push(self.hex_char(2, start)?),
                        'u' => out.push(self.hex_char(4, start)?),
                        'U' => out.push(self.hex_char(8, start)?),
                        _ => return Err(LiteralError::InvalidEscape(start)),
                    }
                }
                c => out.push(c),
            }
        }
    }

    fn hex_char(&mut self, digits: usize, start: usize) -> Result<char, LiteralError> {
        let end = self.pos + digits;
        let hex = self.src.get(self.pos..end).ok_or(LiteralError::InvalidEscape(start))?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| LiteralError::InvalidEscape(start))?;
        self.pos = end;
        char::from_u32(code).ok_or(LiteralError::InvalidEscape(start))
    }

    fn int(&mut self) -> Result<PyLiteral, LiteralError> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.bump();
        }
        let text = &self.src[start..self.pos];
        text.parse::<i64>()
            .map(PyLiteral::Int)
            .map_err(|_| LiteralError::InvalidInt(text.to_string()))
    }

    fn ident(&mut self) -> Result<PyLiteral, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "None" => Ok(PyLiteral::None),
            "True" => Ok(PyLiteral::Bool(true)),
            "False" => Ok(PyLiteral::Bool(false)),
            other => Err(LiteralError::UnknownIdent(other.to_string())),
        }
    }
}
