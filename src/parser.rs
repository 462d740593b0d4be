use std::io::Read;
use std::str::{EncodeUtf16, FromStr};

use json_shape_lexer::{
    ErrorKind, JsonParseError, JsonParseResult, JsonToken, JsonTokenizer, Location, ReadUnits,
    TokenKind,
};

use crate::json_value::{JsonObject, JsonValue};

/// How many containers may be open at once, the top-level one included.
pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    ArrayNextElement,
    Stop,
}

/// Parses a JSON document one top-level unit at a time.
///
/// If the document is an object, the first call to [`next_value`](Self::next_value) returns
/// the whole object. If it is an array, each call returns the next element of that array, so
/// large arrays never have to be held in memory at once. Once the document has been fully
/// read, every further call returns `None`.
///
/// ```
/// use json_shape::{JsonParser, JsonValue};
///
/// let mut parser = JsonParser::from_text("[1, \"two\", {}]");
/// assert!(parser.next_value().unwrap().unwrap().is_number());
/// assert_eq!(parser.next_value().unwrap(), Some(JsonValue::from("two")));
/// assert!(parser.next_value().unwrap().unwrap().is_object());
/// assert_eq!(parser.next_value().unwrap(), None);
/// ```
///
/// Besides `next_value`, the parser can be consumed with [`has_next`](Self::has_next),
/// [`for_each_value`](Self::for_each_value), or as an [`Iterator`]. Use only one of these
/// styles on a given parser.
pub struct JsonParser<I: Iterator<Item = u16>> {
    tokenizer: JsonTokenizer<I>,
    lookahead: Option<(JsonToken, Location)>,
    state: State,
    pending: Option<JsonValue>,
    depth: usize,
    source_failure: fn(&I) -> Option<ErrorKind>,
}

fn no_failure<I>(_: &I) -> Option<ErrorKind> {
    None
}

impl<'a> JsonParser<EncodeUtf16<'a>> {
    pub fn from_text(s: &'a str) -> Self {
        Self::new(s.encode_utf16())
    }
}

impl<R: Read> JsonParser<ReadUnits<R>> {
    /// Parses UTF-8 text from `reader`. A failed read is reported as [`ErrorKind::Io`]
    /// rather than as the syntax error the truncated input would otherwise cause.
    pub fn from_reader(reader: R) -> Self {
        JsonParser {
            source_failure: ReadUnits::<R>::failure,
            ..Self::new(ReadUnits::new(reader))
        }
    }
}

impl<I: Iterator<Item = u16>> JsonParser<I> {
    pub fn new(units: I) -> Self {
        JsonParser {
            tokenizer: JsonTokenizer::new(units),
            lookahead: None,
            state: State::Start,
            pending: None,
            depth: 0,
            source_failure: no_failure::<I>,
        }
    }

    /// The underlying unit source.
    pub fn get_ref(&self) -> &I {
        self.tokenizer.get_ref()
    }

    /// The location of the next unread part of the input.
    pub fn location(&self) -> Location {
        match &self.lookahead {
            Some((_, location)) => *location,
            None => self.tokenizer.location(),
        }
    }

    /// Returns the next top-level unit: the whole object for an object document, or the next
    /// element for an array document. Returns `None` once the document is complete.
    ///
    /// After an error the parser stops, and all further calls return `None`.
    pub fn next_value(&mut self) -> JsonParseResult<Option<JsonValue>> {
        if let Some(value) = self.pending.take() {
            return Ok(Some(value));
        }
        let result = self.advance().map_err(|e| self.blame_source(e));
        if result.is_err() {
            self.state = State::Stop;
        }
        result
    }

    /// Whether another top-level unit is available. Does not consume it: repeated calls
    /// return the same answer until `next_value()` is called.
    pub fn has_next(&mut self) -> JsonParseResult<bool> {
        if self.pending.is_none() {
            self.pending = self.next_value()?;
        }
        Ok(self.pending.is_some())
    }

    /// Calls `f` on every remaining top-level unit, stopping at the first error.
    pub fn for_each_value<F: FnMut(JsonValue)>(&mut self, mut f: F) -> JsonParseResult<()> {
        while let Some(value) = self.next_value()? {
            f(value);
        }
        Ok(())
    }

    /// Returns an error if there is more than just white space after the document.
    pub fn expect_eof(&mut self) -> JsonParseResult<()> {
        if let Some((_, location)) = &self.lookahead {
            return Err(JsonParseError::new(ErrorKind::ExpectedEndOfInput, *location));
        }
        self.tokenizer
            .expect_eof()
            .map_err(|e| self.blame_source(e))?;
        match (self.source_failure)(self.get_ref()) {
            Some(kind) => Err(JsonParseError::new(kind, self.tokenizer.location())),
            None => Ok(()),
        }
    }

    /// Reads the whole document. An object document gives the object, an array document
    /// gives all of its elements as a [`JsonValue::Array`]. Only white space may follow the
    /// document.
    pub fn parse(mut self) -> JsonParseResult<JsonValue> {
        let value = match self.next_value()? {
            Some(object) if self.state == State::Stop => object,
            first => {
                let mut elements: Vec<JsonValue> = first.into_iter().collect();
                self.for_each_value(|v| elements.push(v))?;
                JsonValue::Array(elements)
            }
        };
        self.expect_eof()?;
        Ok(value)
    }

    /// Swaps a syntax error for the read failure that cut the input short, if there was one.
    fn blame_source(&self, error: JsonParseError) -> JsonParseError {
        match (self.source_failure)(self.get_ref()) {
            Some(kind) => JsonParseError::new(kind, error.location()),
            None => error,
        }
    }

    fn advance(&mut self) -> JsonParseResult<Option<JsonValue>> {
        match self.state {
            State::Start => {
                let (token, _) = self.expect(
                    ErrorKind::StartBraceOrBracket,
                    &[TokenKind::ObjOpen, TokenKind::ArrayOpen],
                )?;
                self.depth = 1;
                if token == JsonToken::ObjOpen {
                    let object = self.parse_object()?;
                    self.state = State::Stop;
                    return Ok(Some(object));
                }
                if self.peek_kind()? == Some(TokenKind::ArrayClose) {
                    self.take()?;
                    self.state = State::Stop;
                    return Ok(None);
                }
                let value = self.parse_value(ErrorKind::ArrayValueOrBracket)?;
                self.state = State::ArrayNextElement;
                Ok(Some(value))
            }
            State::ArrayNextElement => {
                let (token, _) = self.expect(
                    ErrorKind::ArrayCommaOrBracket,
                    &[TokenKind::Comma, TokenKind::ArrayClose],
                )?;
                if token == JsonToken::ArrayClose {
                    self.state = State::Stop;
                    return Ok(None);
                }
                self.parse_value(ErrorKind::ArrayCommaValue).map(Some)
            }
            State::Stop => Ok(None),
        }
    }

    /// Returns the lookahead token if there is one, otherwise the next token from the
    /// tokenizer.
    fn take(&mut self) -> JsonParseResult<Option<(JsonToken, Location)>> {
        if let Some(next) = self.lookahead.take() {
            return Ok(Some(next));
        }
        Ok(self
            .tokenizer
            .next_token()?
            .map(|token| (token, self.tokenizer.token_location())))
    }

    fn unread(&mut self, token: JsonToken, location: Location) {
        debug_assert!(self.lookahead.is_none());
        self.lookahead = Some((token, location));
    }

    fn peek_kind(&mut self) -> JsonParseResult<Option<TokenKind>> {
        let next = self.take()?;
        let kind = next.as_ref().map(|(token, _)| token.kind());
        if let Some((token, location)) = next {
            self.unread(token, location);
        }
        Ok(kind)
    }

    fn unexpected(&self, kind: ErrorKind, found: Option<(JsonToken, Location)>) -> JsonParseError {
        let location = match found {
            Some((_, location)) => location,
            None => self.tokenizer.location(),
        };
        JsonParseError::new(kind, location)
    }

    /// Takes the next token, which must have one of the given kinds.
    fn expect(
        &mut self,
        error: ErrorKind,
        kinds: &[TokenKind],
    ) -> JsonParseResult<(JsonToken, Location)> {
        match self.take()? {
            Some((token, location)) if kinds.contains(&token.kind()) => Ok((token, location)),
            other => Err(self.unexpected(error, other)),
        }
    }

    fn expect_key(&mut self, error: ErrorKind) -> JsonParseResult<String> {
        match self.take()? {
            Some((JsonToken::String(key), _)) => Ok(key),
            other => Err(self.unexpected(error, other)),
        }
    }

    fn parse_value(&mut self, error: ErrorKind) -> JsonParseResult<JsonValue> {
        Ok(match self.take()? {
            Some((JsonToken::String(s), _)) => JsonValue::String(s),
            Some((JsonToken::Number(n), _)) => JsonValue::Number(n),
            Some((JsonToken::True, _)) => JsonValue::Boolean(true),
            Some((JsonToken::False, _)) => JsonValue::Boolean(false),
            Some((JsonToken::Null, _)) => JsonValue::Null,
            Some((JsonToken::ObjOpen, location)) => return self.parse_nested(true, location),
            Some((JsonToken::ArrayOpen, location)) => return self.parse_nested(false, location),
            other => return Err(self.unexpected(error, other)),
        })
    }

    /// Called after the '{' or '[' of a non-top-level container has been consumed.
    fn parse_nested(&mut self, object: bool, location: Location) -> JsonParseResult<JsonValue> {
        if self.depth >= MAX_DEPTH {
            return Err(JsonParseError::new(ErrorKind::NestingTooDeep, location));
        }
        self.depth += 1;
        let value = if object {
            self.parse_object()?
        } else {
            self.parse_array()?
        };
        self.depth -= 1;
        Ok(value)
    }

    /// Called after the '{' has been consumed.
    fn parse_object(&mut self) -> JsonParseResult<JsonValue> {
        let mut m = JsonObject::default();
        if self.peek_kind()? == Some(TokenKind::ObjClose) {
            self.take()?;
            return Ok(JsonValue::Object(m));
        }

        let mut first = true;
        loop {
            let key = self.expect_key(if first {
                ErrorKind::ObjectFirstKey
            } else {
                ErrorKind::ObjectCommaKey
            })?;
            first = false;
            self.expect(ErrorKind::ObjectKeyColon, &[TokenKind::Colon])?;
            let value = self.parse_value(ErrorKind::ObjectKeyColonValue)?;
            // A repeated key replaces the earlier value and keeps the earlier position.
            m.insert(key, value);

            let (token, _) = self.expect(
                ErrorKind::ObjectValueCommaBrace,
                &[TokenKind::Comma, TokenKind::ObjClose],
            )?;
            if token == JsonToken::ObjClose {
                return Ok(JsonValue::Object(m));
            }
        }
    }

    /// Called after the '[' has been consumed.
    fn parse_array(&mut self) -> JsonParseResult<JsonValue> {
        let mut v = Vec::new();
        if self.peek_kind()? == Some(TokenKind::ArrayClose) {
            self.take()?;
            return Ok(JsonValue::Array(v));
        }

        v.push(self.parse_value(ErrorKind::ArrayValueOrBracket)?);
        loop {
            let (token, _) = self.expect(
                ErrorKind::ArrayCommaOrBracket,
                &[TokenKind::Comma, TokenKind::ArrayClose],
            )?;
            if token == JsonToken::ArrayClose {
                return Ok(JsonValue::Array(v));
            }
            v.push(self.parse_value(ErrorKind::ArrayCommaValue)?); // Next element
        }
    }
}

impl<I: Iterator<Item = u16>> Iterator for JsonParser<I> {
    type Item = JsonParseResult<JsonValue>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_value().transpose()
    }
}

#[cfg(feature = "fallible-iterator")]
impl<I: Iterator<Item = u16>> fallible_iterator::FallibleIterator for JsonParser<I> {
    type Item = JsonValue;
    type Error = JsonParseError;

    fn next(&mut self) -> JsonParseResult<Option<JsonValue>> {
        self.next_value()
    }
}

impl FromStr for JsonValue {
    type Err = JsonParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JsonParser::from_text(s).parse()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn get(s: &str) -> (Vec<JsonValue>, Option<JsonParseError>) {
        let mut parser = JsonParser::from_text(s);
        let mut v = Vec::new();
        loop {
            match parser.next_value() {
                Ok(Some(value)) => v.push(value),
                Ok(None) => return (v, None),
                Err(e) => return (v, Some(e)),
            }
        }
    }

    fn num(s: &str) -> JsonValue {
        JsonValue::Number(s.parse().unwrap())
    }

    #[test]
    fn empty_object_yields_once() {
        let mut parser = JsonParser::from_text("{}");
        assert_eq!(
            parser.next_value().unwrap(),
            Some(JsonValue::Object(JsonObject::default()))
        );
        assert_eq!(parser.next_value().unwrap(), None);
        assert_eq!(parser.next_value().unwrap(), None);
    }

    #[test]
    fn array_elements_are_streamed() {
        let mut parser = JsonParser::from_text("[1,2,3]");
        assert_eq!(parser.next_value().unwrap(), Some(num("1")));
        assert_eq!(parser.next_value().unwrap(), Some(num("2")));
        assert_eq!(parser.next_value().unwrap(), Some(num("3")));
        assert_eq!(parser.next_value().unwrap(), None);
        assert_eq!(parser.next_value().unwrap(), None);
    }

    #[test]
    fn empty_array_yields_nothing() {
        let (v, e) = get(" [ ] ");
        assert!(v.is_empty());
        assert!(e.is_none());
    }

    #[test]
    fn object_is_a_single_unit() {
        let (v, e) = get(r#"{"a": [1, {"b": null}], "c": "d", "e": -0.5e-1}"#);
        assert!(e.is_none());
        assert_eq!(v.len(), 1);
        let obj = &v[0];
        assert_eq!(obj["a"][1]["b"], JsonValue::Null);
        assert_eq!(obj["c"].as_string(), Ok("d"));
        assert_eq!(obj["e"].as_number().unwrap().as_str(), "-0.5e-1");
        let keys: Vec<&str> = obj.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "c", "e"]);
    }

    #[test]
    fn nested_values_in_streamed_elements() {
        let (v, e) = get(r#"[{"k": [true, false]}, [[]], "s", null]"#);
        assert!(e.is_none());
        assert_eq!(v.len(), 4);
        assert_eq!(v[0]["k"][0], JsonValue::Boolean(true));
        assert_eq!(v[1], JsonValue::Array(vec![JsonValue::Array(vec![])]));
        assert_eq!(v[3], JsonValue::Null);
    }

    #[test]
    fn nested_empty_containers_are_accepted() {
        let (v, e) = get(r#"{"a": [], "b": {}, "c": [[], {}]}"#);
        assert!(e.is_none());
        assert_eq!(v[0]["a"], JsonValue::Array(vec![]));
        assert_eq!(v[0]["b"], JsonValue::Object(JsonObject::default()));
        assert_eq!(v[0]["c"].as_array().map(<[_]>::len), Ok(2));
    }

    #[test]
    fn duplicate_keys_keep_last_value_and_first_position() {
        let (v, _) = get(r#"{"a": 1, "b": 2, "a": 3}"#);
        let obj = v[0].as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.get_index(0), Some((&"a".to_string(), &num("3"))));
        assert_eq!(obj["b"], num("2"));
    }

    #[test]
    fn elements_before_an_error_remain_valid() {
        let (v, e) = get("[1, 2, }");
        assert_eq!(v, vec![num("1"), num("2")]);
        assert_eq!(e.unwrap().kind(), &ErrorKind::ArrayCommaValue);
    }

    #[test]
    fn parser_stops_after_error() {
        let mut parser = JsonParser::from_text("[1 2, 3]");
        assert_eq!(parser.next_value().unwrap(), Some(num("1")));
        assert!(parser.next_value().is_err());
        assert_eq!(parser.next_value().unwrap(), None);
    }

    #[test]
    fn lexer_errors_propagate() {
        let (_, e) = get("[1, 2e]");
        assert_eq!(e.unwrap().kind(), &ErrorKind::ExponentRequiresDigit);
    }

    #[rstest]
    #[case("", ErrorKind::StartBraceOrBracket)]
    #[case("1", ErrorKind::StartBraceOrBracket)]
    #[case("\"a\"", ErrorKind::StartBraceOrBracket)]
    #[case("}", ErrorKind::StartBraceOrBracket)]
    #[case("{1: 2}", ErrorKind::ObjectFirstKey)]
    #[case("{", ErrorKind::ObjectFirstKey)]
    #[case("{\"a\" 1}", ErrorKind::ObjectKeyColon)]
    #[case("{\"a\": }", ErrorKind::ObjectKeyColonValue)]
    #[case("{\"a\": :}", ErrorKind::ObjectKeyColonValue)]
    #[case("{\"a\": 1 \"b\": 2}", ErrorKind::ObjectValueCommaBrace)]
    #[case("{\"a\": 1", ErrorKind::ObjectValueCommaBrace)]
    #[case("{\"a\": 1,}", ErrorKind::ObjectCommaKey)]
    #[case("{\"a\": 1, 2: 3}", ErrorKind::ObjectCommaKey)]
    #[case("[,]", ErrorKind::ArrayValueOrBracket)]
    #[case("[", ErrorKind::ArrayValueOrBracket)]
    #[case("[1 2]", ErrorKind::ArrayCommaOrBracket)]
    #[case("[1", ErrorKind::ArrayCommaOrBracket)]
    #[case("[1,]", ErrorKind::ArrayCommaValue)]
    #[case("[[1,]]", ErrorKind::ArrayCommaValue)]
    #[case("[[1 2]]", ErrorKind::ArrayCommaOrBracket)]
    #[case("[[,]]", ErrorKind::ArrayValueOrBracket)]
    fn parser_errors(#[case] input: &str, #[case] kind: ErrorKind) {
        let (_, e) = get(input);
        assert_eq!(e.expect("expected an error").kind(), &kind);
    }

    #[test]
    fn error_location_points_at_offending_token() {
        let (_, e) = get("{\n  \"a\": 1,\n  \"b\" 2\n}");
        let e = e.unwrap();
        assert_eq!(e.kind(), &ErrorKind::ObjectKeyColon);
        assert_eq!((e.location().line, e.location().col), (3, 7));
    }

    #[test]
    fn has_next_is_idempotent() {
        let mut parser = JsonParser::from_text("[true]");
        assert!(parser.has_next().unwrap());
        assert!(parser.has_next().unwrap());
        assert_eq!(parser.next_value().unwrap(), Some(JsonValue::Boolean(true)));
        assert!(!parser.has_next().unwrap());
        assert!(!parser.has_next().unwrap());
        assert_eq!(parser.next_value().unwrap(), None);
    }

    #[test]
    fn consumption_views_agree() {
        let input = r#"[1, "a", [], {"k": false}]"#;
        let pulled = get(input).0;

        let mut each = Vec::new();
        JsonParser::from_text(input)
            .for_each_value(|v| each.push(v))
            .unwrap();

        let iterated: Vec<JsonValue> = JsonParser::from_text(input)
            .collect::<JsonParseResult<_>>()
            .unwrap();

        let mut parser = JsonParser::from_text(input);
        let mut polled = Vec::new();
        while parser.has_next().unwrap() {
            polled.push(parser.next_value().unwrap().unwrap());
        }

        assert_eq!(pulled.len(), 4);
        assert_eq!(each, pulled);
        assert_eq!(iterated, pulled);
        assert_eq!(polled, pulled);
    }

    #[test]
    fn stopped_parser_stays_stopped_in_every_view() {
        let mut parser = JsonParser::from_text("{} [1]");
        assert!(parser.next_value().unwrap().is_some());
        assert!(!parser.has_next().unwrap());
        assert_eq!(parser.next_value().unwrap(), None);
        assert!(parser.next().is_none());
        parser.for_each_value(|_| panic!("no more values")).unwrap();
    }

    #[test]
    fn whole_document_parse() {
        let v: JsonValue = r#" [1, {"a": []}] "#.parse().unwrap();
        assert_eq!(v.as_array().map(<[_]>::len), Ok(2));
        let v: JsonValue = r#"{"x": "y"}"#.parse().unwrap();
        assert_eq!(v["x"], JsonValue::from("y"));
        let v: JsonValue = "[]".parse().unwrap();
        assert_eq!(v, JsonValue::Array(vec![]));
        let v: JsonValue = "[{}]".parse().unwrap();
        assert_eq!(v, JsonValue::Array(vec![JsonValue::Object(JsonObject::default())]));
    }

    #[test]
    fn whole_document_rejects_trailing_content() {
        let e = "{} {}".parse::<JsonValue>().unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::ExpectedEndOfInput);
        assert_eq!(e.location().col, 4);
        let e = "[1] x".parse::<JsonValue>().unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::InvalidCharacter('x'));
    }

    #[test]
    fn from_reader() {
        let bytes = "[\"caf\u{e9}\", \"\u{1F600}\"]".as_bytes();
        let v = JsonParser::from_reader(bytes).parse().unwrap();
        assert_eq!(v[0].as_string(), Ok("caf\u{e9}"));
        assert_eq!(v[1].as_string(), Ok("\u{1F600}"));
    }

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn nesting_up_to_the_limit_is_accepted() {
        let v: JsonValue = nested_arrays(MAX_DEPTH).parse().unwrap();
        let mut current = &v;
        let mut depth = 1;
        while let Some(inner) = current.as_array().unwrap().first() {
            current = inner;
            depth += 1;
        }
        assert_eq!(depth, MAX_DEPTH);
    }

    #[test]
    fn nesting_past_the_limit_is_an_error() {
        let e = nested_arrays(MAX_DEPTH + 1).parse::<JsonValue>().unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::NestingTooDeep);
        assert_eq!(e.location().col, MAX_DEPTH as u64 + 1);

        let (v, e) = get(&format!("[1, {}]", nested_arrays(200_000)));
        assert_eq!(v, vec![num("1")]);
        assert_eq!(e.unwrap().kind(), &ErrorKind::NestingTooDeep);

        let object = format!(
            "{}{}",
            r#"{"a":"#.repeat(MAX_DEPTH + 1),
            "}".repeat(MAX_DEPTH + 1)
        );
        let (_, e) = get(&object);
        assert_eq!(e.unwrap().kind(), &ErrorKind::NestingTooDeep);
    }

    /// Hands out `data` on the first read and fails on every read after that.
    struct FailAfter {
        data: Option<&'static [u8]>,
    }

    fn fail_after(data: &'static [u8]) -> FailAfter {
        FailAfter { data: Some(data) }
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.data.take() {
                Some(data) => {
                    buf[..data.len()].copy_from_slice(data);
                    Ok(data.len())
                }
                None => Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "disk on fire",
                )),
            }
        }
    }

    fn disk_on_fire() -> ErrorKind {
        ErrorKind::Io {
            kind: std::io::ErrorKind::Other,
            message: "disk on fire".into(),
        }
    }

    #[test]
    fn read_failure_is_reported_instead_of_syntax_error() {
        let e = JsonParser::from_reader(fail_after(b"[1, 2"))
            .parse()
            .unwrap_err();
        assert_eq!(e.kind(), &disk_on_fire());

        let mut parser = JsonParser::from_reader(fail_after(b"[1, 2"));
        assert_eq!(parser.next_value().unwrap(), Some(num("1")));
        assert_eq!(parser.next_value().unwrap(), Some(num("2")));
        assert_eq!(parser.next_value().unwrap_err().kind(), &disk_on_fire());
        assert_eq!(parser.next_value().unwrap(), None);
    }

    #[test]
    fn read_failure_after_complete_document_is_reported() {
        let mut parser = JsonParser::from_reader(fail_after(b"{}"));
        assert!(parser.next_value().unwrap().is_some());
        assert_eq!(parser.expect_eof().unwrap_err().kind(), &disk_on_fire());

        let e = JsonParser::from_reader(fail_after(b"{}")).parse().unwrap_err();
        assert_eq!(e.kind(), &disk_on_fire());
    }

    #[test]
    fn text_input_never_reports_read_failures() {
        let e = JsonParser::from_text("[1, 2").parse().unwrap_err();
        assert_eq!(e.kind(), &ErrorKind::ArrayCommaOrBracket);
    }

    #[cfg(feature = "fallible-iterator")]
    #[test]
    fn fallible_iterator_view() {
        use fallible_iterator::FallibleIterator;
        let parser = JsonParser::from_text("[1, 2]");
        let v: Vec<JsonValue> = FallibleIterator::collect(parser).unwrap();
        assert_eq!(v, vec![num("1"), num("2")]);
    }
}
