use std::fmt;
use std::str::EncodeUtf16;

use smallvec::SmallVec;

use crate::error::{ErrorKind, JsonParseError, JsonParseResult, Location};
use crate::number::JsonNumber;
use crate::scalar::{Scalar, ScalarReader};

/// A JSON token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JsonToken {
    Number(JsonNumber),
    True,
    False,
    String(String),
    Null,
    ArrayOpen,
    Comma,
    ArrayClose,
    ObjOpen,
    Colon,
    ObjClose,
}

/// The kind of a [`JsonToken`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    True,
    False,
    String,
    Null,
    ArrayOpen,
    Comma,
    ArrayClose,
    ObjOpen,
    Colon,
    ObjClose,
}

impl JsonToken {
    pub fn kind(&self) -> TokenKind {
        match self {
            JsonToken::Number(_) => TokenKind::Number,
            JsonToken::True => TokenKind::True,
            JsonToken::False => TokenKind::False,
            JsonToken::String(_) => TokenKind::String,
            JsonToken::Null => TokenKind::Null,
            JsonToken::ArrayOpen => TokenKind::ArrayOpen,
            JsonToken::Comma => TokenKind::Comma,
            JsonToken::ArrayClose => TokenKind::ArrayClose,
            JsonToken::ObjOpen => TokenKind::ObjOpen,
            JsonToken::Colon => TokenKind::Colon,
            JsonToken::ObjClose => TokenKind::ObjClose,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::Number => "number",
            TokenKind::True => "'true'",
            TokenKind::False => "'false'",
            TokenKind::String => "string",
            TokenKind::Null => "'null'",
            TokenKind::ArrayOpen => "'['",
            TokenKind::Comma => "','",
            TokenKind::ArrayClose => "']'",
            TokenKind::ObjOpen => "'{'",
            TokenKind::Colon => "':'",
            TokenKind::ObjClose => "'}'",
        })
    }
}

// Note: char::is_ascii_whitespace is not available because some characters are not defined as
// whitespace characters by RFC 8259. For example, U+000C FORM FEED is whitespace in Rust but
// it isn't in JSON.
fn is_whitespace(c: Scalar) -> bool {
    matches!(c, 0x20 | 0xa | 0xd | 0x9)
}

fn is_digit(c: Scalar) -> bool {
    (0x30..=0x39).contains(&c)
}

fn to_char(c: Scalar) -> char {
    char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// A pull-based tokenizer which takes an iterator over UTF-16 code units and emits
/// [`JsonToken`]s.
///
/// The tokenizer can be consumed through [`next_token`](Self::next_token), through
/// [`has_next`](Self::has_next) followed by `next_token`, through
/// [`for_each_token`](Self::for_each_token), or as an [`Iterator`]. All of them share one
/// lookahead slot, but only one of them should be used on a given tokenizer.
pub struct JsonTokenizer<I: Iterator<Item = u16>> {
    reader: ScalarReader<I>,
    peeked: Option<JsonToken>,
    token_location: Location,
}

impl<'a> JsonTokenizer<EncodeUtf16<'a>> {
    /// Create a [`JsonTokenizer`] over the UTF-16 encoding of `s`.
    pub fn from_text(s: &'a str) -> Self {
        Self::new(s.encode_utf16())
    }
}

impl<I: Iterator<Item = u16>> JsonTokenizer<I> {
    /// Create a new [`JsonTokenizer`]
    pub fn new(units: I) -> Self {
        JsonTokenizer {
            reader: ScalarReader::new(units),
            peeked: None,
            token_location: Location::default(),
        }
    }

    /// The location of the next unread scalar. If a token has been peeked with `has_next()`,
    /// this is the location after that token.
    pub fn location(&self) -> Location {
        self.reader.location()
    }

    /// The location at which the most recently lexed token started.
    pub fn token_location(&self) -> Location {
        self.token_location
    }

    /// The underlying unit source.
    pub fn get_ref(&self) -> &I {
        self.reader.get_ref()
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> JsonParseResult<Option<JsonToken>> {
        match self.peeked.take() {
            Some(token) => Ok(Some(token)),
            None => self.lex(),
        }
    }

    /// Whether another token is available. Does not consume it: repeated calls return the same
    /// answer until `next_token()` is called.
    pub fn has_next(&mut self) -> JsonParseResult<bool> {
        if self.peeked.is_none() {
            self.peeked = self.lex()?;
        }
        Ok(self.peeked.is_some())
    }

    /// Calls `f` on every remaining token, stopping at the first error.
    pub fn for_each_token<F: FnMut(JsonToken)>(&mut self, mut f: F) -> JsonParseResult<()> {
        while let Some(token) = self.next_token()? {
            f(token);
        }
        Ok(())
    }

    /// Returns an error if there is more than just white space in the remaining input.
    pub fn expect_eof(&mut self) -> JsonParseResult<()> {
        if self.has_next()? {
            return Err(JsonParseError::new(
                ErrorKind::ExpectedEndOfInput,
                self.token_location,
            ));
        }
        Ok(())
    }

    /// Error about the scalar that was just read.
    fn err(&self, kind: ErrorKind) -> JsonParseError {
        JsonParseError::new(kind, self.reader.last_location())
    }

    /// Error about input that ended too early.
    fn eof_err(&self, kind: ErrorKind) -> JsonParseError {
        JsonParseError::new(kind, self.reader.location())
    }

    fn next_scalar_skip_whitespace(&mut self) -> JsonParseResult<Option<Scalar>> {
        while let Some(c) = self.reader.next_scalar()? {
            if !is_whitespace(c) {
                return Ok(Some(c));
            }
        }
        Ok(None)
    }

    fn lex(&mut self) -> JsonParseResult<Option<JsonToken>> {
        const BOOLEAN: ErrorKind = ErrorKind::BooleanSpelledTrueOrFalse;
        let c = match self.next_scalar_skip_whitespace()? {
            Some(c) => c,
            None => return Ok(None),
        };
        self.token_location = self.reader.last_location();
        let token = match to_char(c) {
            '[' => JsonToken::ArrayOpen,
            ']' => JsonToken::ArrayClose,
            '{' => JsonToken::ObjOpen,
            '}' => JsonToken::ObjClose,
            ':' => JsonToken::Colon,
            ',' => JsonToken::Comma,
            '0'..='9' | '-' => self.consume_number(c)?,
            '"' => self.consume_string()?,
            't' => self.consume_constant("rue", JsonToken::True, BOOLEAN)?,
            'f' => self.consume_constant("alse", JsonToken::False, BOOLEAN)?,
            'n' => self.consume_constant("ull", JsonToken::Null, ErrorKind::NullSpelling)?,
            _ => return Err(self.err(ErrorKind::InvalidCharacter(to_char(c)))),
        };
        Ok(Some(token))
    }

    /// Called after the opening quote has been consumed.
    fn consume_string(&mut self) -> JsonParseResult<JsonToken> {
        let mut s = SmallVec::<[u16; 16]>::new();
        loop {
            let c = self
                .reader
                .next_scalar()?
                .ok_or_else(|| self.eof_err(ErrorKind::IncompleteString))?;
            let unit = match c {
                0x22 => return Ok(JsonToken::String(String::from_utf16_lossy(&s))),
                0x5c => match self.reader.next_scalar()? {
                    None => return Err(self.eof_err(ErrorKind::IncompleteBackslashEscape)),
                    Some(e) => match to_char(e) {
                        '"' => 0x22,
                        '\\' => 0x5c,
                        '/' => 0x2f,
                        'b' => 0x8,
                        'f' => 0xc,
                        'n' => 0xa,
                        'r' => 0xd,
                        't' => 0x9,
                        // The escaped unit is kept as-is; escaped surrogate pairs are combined
                        // when the string is converted from UTF-16 at the end.
                        'u' => self.consume_unicode_escape()?,
                        other => return Err(self.err(ErrorKind::InvalidBackslashEscape(other))),
                    },
                },
                c if c < 0x20 => return Err(self.err(ErrorKind::NoAsciiControl(to_char(c)))),
                c => {
                    match char::from_u32(c) {
                        Some(c) => s.extend_from_slice(c.encode_utf16(&mut [0; 2])),
                        None => s.push(c as u16),
                    }
                    continue;
                }
            };
            s.push(unit);
        }
    }

    /// Called after `\u` has been consumed.
    fn consume_unicode_escape(&mut self) -> JsonParseResult<u16> {
        let mut digits = String::with_capacity(4);
        for _ in 0..4 {
            let c = self
                .reader
                .next_scalar()?
                .ok_or_else(|| self.eof_err(ErrorKind::IncompleteUnicodeEscape))?;
            digits.push(to_char(c));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(self.err(ErrorKind::InvalidUnicodeEscape(digits)));
        }
        match u16::from_str_radix(&digits, 16) {
            Ok(unit) => Ok(unit),
            Err(_) => Err(self.err(ErrorKind::InvalidUnicodeEscape(digits))),
        }
    }

    /// Called after the first scalar of the constant has been consumed.
    fn consume_constant(
        &mut self,
        rest: &'static str,
        token: JsonToken,
        kind: ErrorKind,
    ) -> JsonParseResult<JsonToken> {
        for expected in rest.chars() {
            match self.reader.next_scalar()? {
                Some(c) if c == expected as Scalar => {}
                Some(_) => return Err(self.err(kind)),
                None => return Err(self.eof_err(kind)),
            }
        }
        Ok(token)
    }

    /// Appends `first` and all directly following digits to `text` and `digits`. Returns the
    /// first scalar after the digits, if any.
    fn consume_digits(
        &mut self,
        first: Scalar,
        text: &mut String,
        digits: &mut String,
    ) -> JsonParseResult<Option<Scalar>> {
        let mut c = Some(first);
        while let Some(d) = c.filter(|d| is_digit(*d)) {
            text.push(to_char(d));
            digits.push(to_char(d));
            c = self.reader.next_scalar()?;
        }
        Ok(c)
    }

    /// Reads the scalar which must start a run of digits.
    fn expect_digit(&mut self, kind: ErrorKind) -> JsonParseResult<Scalar> {
        match self.reader.next_scalar()? {
            Some(c) if is_digit(c) => Ok(c),
            Some(_) => Err(self.err(kind)),
            None => Err(self.eof_err(kind)),
        }
    }

    /// Called with the first scalar of the number, which has already been consumed.
    fn consume_number(&mut self, first: Scalar) -> JsonParseResult<JsonToken> {
        let mut text = String::new();
        let mut integer = String::new();
        let mut fraction = String::new();
        let mut exponent = String::new();
        let mut exponent_negative = false;

        let negative = first == '-' as Scalar;
        let first = if negative {
            text.push('-');
            match self.reader.next_scalar()? {
                Some(c) if is_digit(c) => c,
                Some(_) => return Err(self.err(ErrorKind::MinusSignRequiresDigit)),
                None => return Err(self.eof_err(ErrorKind::IncompleteNegativeNumber)),
            }
        } else {
            first
        };

        let mut next = self.consume_digits(first, &mut text, &mut integer)?;

        if next == Some('.' as Scalar) {
            text.push('.');
            let d = self.expect_digit(ErrorKind::DecimalPointRequiresDigit)?;
            next = self.consume_digits(d, &mut text, &mut fraction)?;
        }

        if let Some(e @ ('e' | 'E')) = next.map(to_char) {
            text.push(e);
            let mut c = self.reader.next_scalar()?;
            if let Some(sign @ ('+' | '-')) = c.map(to_char) {
                text.push(sign);
                exponent_negative = sign == '-';
                c = self.reader.next_scalar()?;
            }
            let d = match c {
                Some(d) if is_digit(d) => d,
                Some(_) => return Err(self.err(ErrorKind::ExponentRequiresDigit)),
                None => return Err(self.eof_err(ErrorKind::ExponentRequiresDigit)),
            };
            next = self.consume_digits(d, &mut text, &mut exponent)?;
        }

        if let Some(c) = next {
            self.reader.push_back(c);
        }

        Ok(JsonToken::Number(JsonNumber::from_parts(
            text,
            negative,
            integer,
            fraction,
            exponent_negative,
            exponent,
        )))
    }
}

impl<I: Iterator<Item = u16>> Iterator for JsonTokenizer<I> {
    type Item = JsonParseResult<JsonToken>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(feature = "fallible-iterator")]
impl<I: Iterator<Item = u16>> fallible_iterator::FallibleIterator for JsonTokenizer<I> {
    type Item = JsonToken;
    type Error = JsonParseError;

    fn next(&mut self) -> JsonParseResult<Option<JsonToken>> {
        self.next_token()
    }
}
