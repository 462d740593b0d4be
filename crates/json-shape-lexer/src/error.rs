use std::{fmt, io};

use thiserror::Error;

/// A UTF-16 unit offset and the corresponding 1-based line and column number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub unit_offset: u64,
    pub line: u64,
    pub col: u64,
}

impl Default for Location {
    fn default() -> Self {
        Location {
            unit_offset: 0,
            line: 1,
            col: 1,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// What went wrong while reading scalars, lexing tokens or parsing a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // Scalar reader
    #[error("high surrogate at end of input")]
    HighSurrogateEof,
    #[error("high surrogate must be followed by a low surrogate")]
    HighSurrogateLowSurrogate,

    // Lexer
    #[error("string is missing its closing quote")]
    IncompleteString,
    #[error("string cannot contain ASCII control character {0:?}")]
    NoAsciiControl(char),
    #[error("backslash escape at end of input")]
    IncompleteBackslashEscape,
    #[error("\\u escape needs four hex digits")]
    IncompleteUnicodeEscape,
    #[error("\\u{0} is not a valid unicode escape")]
    InvalidUnicodeEscape(String),
    #[error("'\\{}' is an invalid escape", .0.escape_debug())]
    InvalidBackslashEscape(char),
    #[error("'-' at end of input")]
    IncompleteNegativeNumber,
    #[error("'-' must be followed by a digit")]
    MinusSignRequiresDigit,
    #[error("'.' must be followed by a digit")]
    DecimalPointRequiresDigit,
    #[error("exponent must contain at least one digit")]
    ExponentRequiresDigit,
    #[error("expected 'true' or 'false'")]
    BooleanSpelledTrueOrFalse,
    #[error("expected 'null'")]
    NullSpelling,
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    // Parser
    #[error("document must start with '{{' or '['")]
    StartBraceOrBracket,
    #[error("'{{' must be followed by a string key or '}}'")]
    ObjectFirstKey,
    #[error("object key must be followed by ':'")]
    ObjectKeyColon,
    #[error("':' must be followed by a value")]
    ObjectKeyColonValue,
    #[error("object value must be followed by ',' or '}}'")]
    ObjectValueCommaBrace,
    #[error("',' in an object must be followed by a string key")]
    ObjectCommaKey,
    #[error("'[' must be followed by a value or ']'")]
    ArrayValueOrBracket,
    #[error("array element must be followed by ',' or ']'")]
    ArrayCommaOrBracket,
    #[error("',' in an array must be followed by a value")]
    ArrayCommaValue,
    #[error("expected end of input")]
    ExpectedEndOfInput,
    #[error("containers are nested too deeply")]
    NestingTooDeep,

    // Source
    #[error("reading the input failed: {message}")]
    Io { kind: io::ErrorKind, message: String },
}

/// The error type used in this crate. Comes with Location information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at line:{}, col:{}: {}", .location.line, .location.col, .kind)]
pub struct JsonParseError {
    kind: ErrorKind,
    location: Location,
}

impl JsonParseError {
    /// Creates a new [`JsonParseError`].
    pub fn new(kind: ErrorKind, location: Location) -> JsonParseError {
        JsonParseError { kind, location }
    }

    /// What kind of error this is.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The location in the source document at which the parse error was encountered.
    pub fn location(&self) -> Location {
        self.location
    }
}

/// A type alias for `Result<T, JsonParseError>`.
pub type JsonParseResult<T> = Result<T, JsonParseError>;

/// Errors from typed access to values and numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("value is not a string")]
    NotAString,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is not a boolean")]
    NotABoolean,
    #[error("value is not an object")]
    NotAnObject,
    #[error("value is not an array")]
    NotAnArray,
    #[error("'{0}' is not a valid JSON number")]
    NotAValidNumber(String),
    #[error("'{0}' does not fit the requested numeric type")]
    NumberOutOfRange(String),
}
