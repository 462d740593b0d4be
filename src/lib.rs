//! A JSON parser which hands out a document one top-level unit at a time: a top-level object
//! is returned whole, a top-level array is streamed element by element.
//!
//! Numbers are kept as [`JsonNumber`]s, which remember the literal exactly as written and
//! convert to native or arbitrary-precision types on demand.
//!
//! ```
//! use json_shape::{JsonParser, JsonValue};
//!
//! # fn main() {
//!     let mut parser = JsonParser::from_text(r#"[{"id": 1}, {"id": 2.50}]"#);
//!     while let Some(element) = parser.next_value().unwrap() {
//!         let id = element["id"].as_number().unwrap();
//!         println!("{} {}", id, id.as_f64().unwrap());
//!     }
//!
//!     let doc: JsonValue = r#"{"price": 2.50}"#.parse().unwrap();
//!     assert_eq!(doc["price"].as_number().unwrap().as_str(), "2.50");
//! # }
//! ```

mod json_value;
mod parser;

pub use json_shape_lexer::{
    BigFraction, BigInt, ErrorKind, JsonNumber, JsonParseError, JsonParseResult, JsonToken,
    JsonTokenizer, Location, ReadUnits, ScalarReader, TokenKind, ValueError,
};
pub use json_value::{JsonObject, JsonValue};
pub use parser::*;

/// Parses a whole JSON document from a string. See [`JsonParser::parse`].
pub fn from_str(s: &str) -> JsonParseResult<JsonValue> {
    JsonParser::from_text(s).parse()
}

/// Parses a whole JSON document from UTF-8 text read from `reader`. See [`JsonParser::parse`].
///
/// A failed read is reported as [`ErrorKind::Io`], even if the text read so far was valid.
pub fn from_reader<R: std::io::Read>(reader: R) -> JsonParseResult<JsonValue> {
    JsonParser::from_reader(reader).parse()
}
