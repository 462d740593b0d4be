use smallvec::SmallVec;

use crate::error::{ErrorKind, JsonParseError, JsonParseResult, Location};

/// A Unicode code point, or a lone low surrogate which is passed through as-is.
pub type Scalar = u32;

const CR: Scalar = 0xd;
const LF: Scalar = 0xa;

#[derive(Debug, Default, Clone, Copy)]
struct Checkpoint {
    location: Location,
    after_cr: bool,
}

/// Decodes a stream of UTF-16 code units into scalars, one at a time, and allows the most
/// recently read scalar to be pushed back.
pub struct ScalarReader<I: Iterator<Item = u16>> {
    units: I,
    /// Units that were pushed back, in reverse order: the next unit to read is at the end.
    pushed_back: SmallVec<[u16; 2]>,
    current: Checkpoint,
    /// The state before the most recently read scalar.
    last: Checkpoint,
}

impl<I: Iterator<Item = u16>> ScalarReader<I> {
    /// Create a new [`ScalarReader`]
    pub fn new(units: I) -> Self {
        ScalarReader {
            units,
            pushed_back: SmallVec::new(),
            current: Checkpoint::default(),
            last: Checkpoint::default(),
        }
    }

    /// The location of the scalar that will be returned by the next call to `next_scalar()`.
    pub fn location(&self) -> Location {
        self.current.location
    }

    /// The location at which the most recently read scalar started.
    pub fn last_location(&self) -> Location {
        self.last.location
    }

    /// The underlying unit source.
    pub fn get_ref(&self) -> &I {
        &self.units
    }

    fn next_unit(&mut self) -> Option<u16> {
        self.pushed_back.pop().or_else(|| self.units.next())
    }

    /// Reads one scalar, combining a surrogate pair if needed. Returns `None` at end of input.
    pub fn next_scalar(&mut self) -> JsonParseResult<Option<Scalar>> {
        let start = self.current;
        let unit = match self.next_unit() {
            Some(unit) => unit,
            None => return Ok(None),
        };
        let scalar = match unit {
            0xD800..=0xDBFF => match self.next_unit() {
                Some(low @ 0xDC00..=0xDFFF) => {
                    (((unit as u32 & 0x3ff) << 10) | (low as u32 & 0x3ff)) + 0x1_0000
                }
                Some(_) => {
                    return Err(JsonParseError::new(
                        ErrorKind::HighSurrogateLowSurrogate,
                        start.location,
                    ))
                }
                None => {
                    return Err(JsonParseError::new(
                        ErrorKind::HighSurrogateEof,
                        start.location,
                    ))
                }
            },
            unit => unit as u32,
        };
        self.last = start;
        self.advance(scalar);
        Ok(Some(scalar))
    }

    /// Returns `scalar`, which must be the most recently read one, to the front of the stream.
    pub fn push_back(&mut self, scalar: Scalar) {
        debug_assert!(self.pushed_back.is_empty(), "only one scalar can be pushed back");
        let mut buf = [0u16; 2];
        match char::from_u32(scalar) {
            Some(c) => {
                for unit in c.encode_utf16(&mut buf).iter().rev() {
                    self.pushed_back.push(*unit);
                }
            }
            // A lone low surrogate.
            None => self.pushed_back.push(scalar as u16),
        }
        self.current = self.last;
    }

    fn advance(&mut self, scalar: Scalar) {
        let Checkpoint { location, after_cr } = &mut self.current;
        location.unit_offset += if scalar > 0xFFFF { 2 } else { 1 };
        match scalar {
            CR => {
                location.line += 1;
                location.col = 1;
                *after_cr = true;
                return;
            }
            LF if *after_cr => {}
            LF => {
                location.line += 1;
                location.col = 1;
            }
            _ => location.col += 1,
        }
        *after_cr = false;
    }
}
