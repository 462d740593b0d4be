use std::fmt;
use std::str::FromStr;

use fraction::BigFraction;
use num_bigint::{BigInt, BigUint};

use crate::error::ValueError;
use crate::tokenizer::{JsonToken, JsonTokenizer};

/// The largest power of ten [`JsonNumber::as_big_fraction`] will expand.
pub const MAX_DECIMAL_SCALE: u32 = 100_000;

/// A JSON number literal, kept exactly as written.
///
/// Besides the original text, the literal is stored decomposed into its sign, integer digits,
/// fractional digits, exponent sign and exponent digits. The fractional and exponent digit
/// strings are empty if the literal has no such part.
///
/// ```
/// use json_shape_lexer::JsonNumber;
///
/// let n: JsonNumber = "-12.34e+56".parse().unwrap();
/// assert!(n.is_negative());
/// assert_eq!(n.integer_digits(), "12");
/// assert_eq!(n.fraction_digits(), "34");
/// assert_eq!(n.exponent_digits(), "56");
/// assert_eq!(n.as_str(), "-12.34e+56");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JsonNumber {
    text: String,
    negative: bool,
    integer: String,
    fraction: String,
    exponent_negative: bool,
    exponent: String,
}

impl JsonNumber {
    /// Assembles a number from parts that the tokenizer has already checked against the
    /// number grammar.
    pub(crate) fn from_parts(
        text: String,
        negative: bool,
        integer: String,
        fraction: String,
        exponent_negative: bool,
        exponent: String,
    ) -> Self {
        debug_assert!(!integer.is_empty());
        JsonNumber {
            text,
            negative,
            integer,
            fraction,
            exponent_negative,
            exponent,
        }
    }

    /// The literal exactly as it appeared in the source.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn integer_digits(&self) -> &str {
        &self.integer
    }

    pub fn fraction_digits(&self) -> &str {
        &self.fraction
    }

    pub fn is_exponent_negative(&self) -> bool {
        self.exponent_negative
    }

    pub fn exponent_digits(&self) -> &str {
        &self.exponent
    }

    fn out_of_range(&self) -> ValueError {
        ValueError::NumberOutOfRange(self.text.clone())
    }

    /// The signed integer part, e.g. `-12` for `-12.9e3`. Fraction and exponent are ignored.
    fn signed_integer(&self) -> &str {
        let sign_len = usize::from(self.negative);
        &self.text[..sign_len + self.integer.len()]
    }

    fn parse_component<T: FromStr>(&self, digits: &str, negative: bool) -> Result<T, ValueError> {
        let parsed = match (digits.is_empty(), negative) {
            (true, _) => "0".parse(),
            (false, false) => digits.parse(),
            (false, true) => format!("-{digits}").parse(),
        };
        parsed.map_err(|_| self.out_of_range())
    }

    /// The integer digits with the sign applied. Fraction and exponent are ignored, not
    /// rounded: `5.25e30` gives `5`.
    pub fn as_i32(&self) -> Result<i32, ValueError> {
        self.signed_integer().parse().map_err(|_| self.out_of_range())
    }

    /// See [`as_i32`](Self::as_i32).
    pub fn as_i64(&self) -> Result<i64, ValueError> {
        self.signed_integer().parse().map_err(|_| self.out_of_range())
    }

    /// See [`as_i32`](Self::as_i32).
    pub fn as_big_int(&self) -> BigInt {
        let magnitude = digits_to_biguint(&self.integer);
        if self.negative {
            -BigInt::from(magnitude)
        } else {
            BigInt::from(magnitude)
        }
    }

    /// The fractional digits read as an integer; zero if there is no fraction.
    pub fn fraction_as_i32(&self) -> Result<i32, ValueError> {
        self.parse_component(&self.fraction, false)
    }

    pub fn fraction_as_i64(&self) -> Result<i64, ValueError> {
        self.parse_component(&self.fraction, false)
    }

    pub fn fraction_as_big_int(&self) -> BigInt {
        BigInt::from(digits_to_biguint(&self.fraction))
    }

    /// The exponent with its sign applied; zero if there is no exponent.
    pub fn exponent_as_i32(&self) -> Result<i32, ValueError> {
        self.parse_component(&self.exponent, self.exponent_negative)
    }

    pub fn exponent_as_i64(&self) -> Result<i64, ValueError> {
        self.parse_component(&self.exponent, self.exponent_negative)
    }

    pub fn exponent_as_big_int(&self) -> BigInt {
        let magnitude = BigInt::from(digits_to_biguint(&self.exponent));
        if self.exponent_negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// The whole literal parsed as a float. Out-of-range literals become infinities.
    pub fn as_f32(&self) -> Result<f32, ValueError> {
        self.text
            .parse()
            .map_err(|_| ValueError::NotAValidNumber(self.text.clone()))
    }

    /// The whole literal parsed as a float. Out-of-range literals become infinities.
    pub fn as_f64(&self) -> Result<f64, ValueError> {
        self.text
            .parse()
            .map_err(|_| ValueError::NotAValidNumber(self.text.clone()))
    }

    /// The exact value of the whole literal.
    ///
    /// Fails with [`ValueError::NumberOutOfRange`] if the decimal exponent, after accounting
    /// for the fractional digits, is larger in magnitude than [`MAX_DECIMAL_SCALE`].
    pub fn as_big_fraction(&self) -> Result<BigFraction, ValueError> {
        let mut mantissa = String::with_capacity(self.integer.len() + self.fraction.len());
        mantissa.push_str(&self.integer);
        mantissa.push_str(&self.fraction);
        let mantissa = digits_to_biguint(&mantissa);

        let fraction_len = i64::try_from(self.fraction.len()).map_err(|_| self.out_of_range())?;
        let scale = self
            .exponent_as_i64()?
            .checked_sub(fraction_len)
            .ok_or_else(|| self.out_of_range())?;
        let power = u32::try_from(scale.unsigned_abs())
            .ok()
            .filter(|power| *power <= MAX_DECIMAL_SCALE)
            .ok_or_else(|| self.out_of_range())?;
        let power = BigUint::from(10u32).pow(power);

        let (numerator, denominator) = if scale >= 0 {
            (mantissa * power, BigUint::from(1u32))
        } else {
            (mantissa, power)
        };
        Ok(if self.negative {
            BigFraction::new_neg(numerator, denominator)
        } else {
            BigFraction::new(numerator, denominator)
        })
    }
}

fn digits_to_biguint(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 10).unwrap_or_default()
}

impl fmt::Display for JsonNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for JsonNumber {
    type Err = ValueError;

    /// Parses a number literal. The whole string must be one literal, without surrounding
    /// white space.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValueError::NotAValidNumber(s.to_string());
        let mut tokenizer = JsonTokenizer::from_text(s);
        match tokenizer.next_token() {
            Ok(Some(JsonToken::Number(n))) if n.as_str() == s => match tokenizer.next_token() {
                Ok(None) => Ok(n),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonNumber {
                fn from(n: $ty) -> Self {
                    let integer = n.unsigned_abs().to_string();
                    let negative = n < 0;
                    let text = if negative { format!("-{integer}") } else { integer.clone() };
                    JsonNumber::from_parts(text, negative, integer, String::new(), false, String::new())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize);

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonNumber {
                fn from(n: $ty) -> Self {
                    let integer = n.to_string();
                    JsonNumber::from_parts(integer.clone(), false, integer, String::new(), false, String::new())
                }
            }
        )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<BigInt> for JsonNumber {
    fn from(n: BigInt) -> Self {
        let text = n.to_string();
        let negative = text.starts_with('-');
        let integer = text.trim_start_matches('-').to_string();
        JsonNumber::from_parts(text, negative, integer, String::new(), false, String::new())
    }
}

impl TryFrom<f64> for JsonNumber {
    type Error = ValueError;

    /// Formats `n` with its `Display` impl, which never uses exponent notation. NaN and the
    /// infinities are not valid JSON numbers.
    fn try_from(n: f64) -> Result<Self, Self::Error> {
        n.to_string().parse()
    }
}

impl TryFrom<f32> for JsonNumber {
    type Error = ValueError;

    fn try_from(n: f32) -> Result<Self, Self::Error> {
        n.to_string().parse()
    }
}
