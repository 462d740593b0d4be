use std::collections::VecDeque;
use std::io::{self, Read};

use crate::error::ErrorKind;

/// An iterator over the UTF-16 code units of UTF-8 text read from `R`.
///
/// Malformed UTF-8 is replaced with U+FFFD, the same way `String::from_utf8_lossy` does it.
/// If reading fails, iteration stops and the error can be retrieved with
/// [`error()`](Self::error).
pub struct ReadUnits<R> {
    reader: R,
    buf: Vec<u8>,
    /// Bytes at the start of `buf` which belong to a sequence that is not complete yet.
    carry_len: usize,
    units: VecDeque<u16>,
    eof: bool,
    error: Option<io::Error>,
}

impl<R> ReadUnits<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; 4096],
            carry_len: 0,
            units: VecDeque::new(),
            eof: false,
            error: None,
        }
    }

    /// The I/O error which ended the unit stream, if any.
    pub fn error(&self) -> Option<&io::Error> {
        self.error.as_ref()
    }

    /// The I/O error which ended the unit stream, as an [`ErrorKind::Io`].
    pub fn failure(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| ErrorKind::Io {
            kind: e.kind(),
            message: e.to_string(),
        })
    }

    fn push_str(&mut self, s: &str) {
        self.units.extend(s.encode_utf16());
    }

    fn push_replacement(&mut self) {
        self.units.push_back(char::REPLACEMENT_CHARACTER as u16);
    }
}

impl<R: Read> ReadUnits<R> {
    /// Reads more bytes and decodes everything that is complete. Returns false once there is
    /// nothing left to decode.
    fn fill(&mut self) -> bool {
        if self.eof {
            return false;
        }
        let read_len = loop {
            match self.reader.read(&mut self.buf[self.carry_len..]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    break 0;
                }
            }
        };
        if read_len == 0 {
            self.eof = true;
            if self.carry_len != 0 {
                self.carry_len = 0;
                self.push_replacement();
            }
            return !self.units.is_empty();
        }

        let buf = std::mem::take(&mut self.buf);
        let mut rest = &buf[..self.carry_len + read_len];
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    self.push_str(s);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, after) = rest.split_at(e.valid_up_to());
                    // Checked by from_utf8 above.
                    self.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match e.error_len() {
                        Some(len) => {
                            self.push_replacement();
                            rest = &after[len..];
                        }
                        None => {
                            // The sequence may be completed by the next read.
                            rest = after;
                            break;
                        }
                    }
                }
            }
        }
        let carry_len = rest.len();
        let carry_start = self.carry_len + read_len - carry_len;
        self.buf = buf;
        self.buf.copy_within(carry_start..carry_start + carry_len, 0);
        self.carry_len = carry_len;
        true
    }
}

impl<R: Read> Iterator for ReadUnits<R> {
    type Item = u16;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(unit) = self.units.pop_front() {
                return Some(unit);
            }
            if !self.fill() {
                return None;
            }
        }
    }
}
