//! Pull-based tokenizer for JSON. The input is a sequence of UTF-16 code units, which are first
//! combined into Unicode scalars and then grouped into [`JsonToken`]s.
//!
//! Number literals are not converted to a fixed numeric type. A [`JsonNumber`] keeps the
//! literal exactly as written, together with its sign, integer, fraction and exponent digits,
//! and converts on demand.
//!
//! Every [`JsonParseError`] has location information attached to it, saying at which line and
//! column (and UTF-16 unit offset) the problem was found.
//!
//! ```
//! use json_shape_lexer::{JsonToken, JsonTokenizer};
//!
//! # fn main() {
//!     let mut tokenizer = JsonTokenizer::from_text(r#"{"key": -1.5e3}"#);
//!     tokenizer.next_token().unwrap(); // Some(JsonToken::ObjOpen)
//!     tokenizer.next_token().unwrap(); // Some(JsonToken::String(String::from("key")))
//!     tokenizer.next_token().unwrap(); // Some(JsonToken::Colon)
//!     match tokenizer.next_token().unwrap() {
//!         Some(JsonToken::Number(n)) => assert_eq!(n.as_str(), "-1.5e3"),
//!         other => panic!("unexpected {other:?}"),
//!     }
//!     tokenizer.next_token().unwrap(); // Some(JsonToken::ObjClose)
//!     assert!(tokenizer.next_token().unwrap().is_none());
//! # }
//! ```

mod error;
mod number;
mod scalar;
mod source;
mod tokenizer;

pub use error::*;
pub use number::*;
pub use scalar::*;
pub use source::*;
pub use tokenizer::*;

pub use fraction::BigFraction;
pub use num_bigint::BigInt;
