//! Arbitrary-precision decimal numbers.
//!
//! A `Decimal` is `mantissa * 10^-scale`. Values are kept canonical (no
//! trailing fractional zeros, zero has scale 0), so the derived structural
//! equality is equality by mathematical value.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

/// Exponents beyond this are rejected instead of materializing huge mantissas.
const MAX_EXPONENT: i64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseNumberError {
    #[error("empty number literal")]
    Empty,
    #[error("number literal has no digits")]
    NoDigits,
    #[error("invalid digit {0:?} in number literal")]
    InvalidDigit(char),
    #[error("invalid exponent in number literal")]
    InvalidExponent,
    #[error("exponent out of range in number literal")]
    ExponentOutOfRange,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

#[inline]
fn pow10(n: u32) -> BigInt {
    BigInt::from(10u8).pow(n)
}

impl Decimal {
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            scale: 0,
        }
    }

    /// Build from raw parts, normalizing the result.
    pub fn new(mantissa: BigInt, scale: u32) -> Self {
        let mut d = Self { mantissa, scale };
        d.normalize();
        d
    }

    fn normalize(&mut self) {
        if self.mantissa.is_zero() {
            self.scale = 0;
            return;
        }
        let ten = BigInt::from(10u8);
        while self.scale > 0 && (&self.mantissa % &ten).is_zero() {
            self.mantissa /= &ten;
            self.scale -= 1;
        }
    }

    #[inline]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// Number of fractional digits.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Shortest text that round-trips the float, parsed exactly.
    /// `None` for NaN and infinities.
    pub fn from_f64(f: f64) -> Option<Self> {
        if !f.is_finite() {
            return None;
        }
        let mut buf = ryu::Buffer::new();
        buf.format_finite(f).parse().ok()
    }

    fn aligned(&self, scale: u32) -> BigInt {
        if scale == self.scale {
            self.mantissa.clone()
        } else {
            &self.mantissa * pow10(scale - self.scale)
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self::new(self.aligned(scale) + other.aligned(scale), scale)
    }

    pub fn sub(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        Self::new(self.aligned(scale) - other.aligned(scale), scale)
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::new(&self.mantissa * &other.mantissa, self.scale + other.scale)
    }

    /// Quotient rounded half away from zero to `places` fractional digits.
    /// `None` when dividing by zero.
    pub fn div(&self, other: &Self, places: u32) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let num = &self.mantissa * pow10(other.scale + places);
        let den = &other.mantissa * pow10(self.scale);
        let mut quot = &num / &den;
        let rem = &num % &den;
        if rem.abs() * 2u8 >= den.abs() {
            if (num.sign() == Sign::Minus) != (den.sign() == Sign::Minus) {
                quot -= 1u8;
            } else {
                quot += 1u8;
            }
        }
        Some(Self::new(quot, places))
    }

    pub fn neg(&self) -> Self {
        Self {
            mantissa: -&self.mantissa,
            scale: self.scale,
        }
    }

    /// Nearest `f64`; magnitudes past the float range become infinities.
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or(f64::NAN)
    }

    /// Integer part, saturating at the `i64` bounds.
    pub fn to_i64_truncated(&self) -> i64 {
        let int_part = &self.mantissa / pow10(self.scale);
        int_part.to_i64().unwrap_or(if int_part.is_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<i64> for Decimal {
    fn from(i: i64) -> Self {
        Self {
            mantissa: BigInt::from(i),
            scale: 0,
        }
    }
}

impl From<BigInt> for Decimal {
    fn from(mantissa: BigInt) -> Self {
        Self { mantissa, scale: 0 }
    }
}

impl FromStr for Decimal {
    type Err = ParseNumberError;

    /// Accepts `[+-]digits[.digits][(e|E)[+-]digits]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseNumberError::Empty);
        }
        let (negative, rest) = match text.as_bytes()[0] {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        let (body, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => {
                let exp: i64 = rest[pos + 1..]
                    .parse()
                    .map_err(|_| ParseNumberError::InvalidExponent)?;
                if exp.abs() > MAX_EXPONENT {
                    return Err(ParseNumberError::ExponentOutOfRange);
                }
                (&rest[..pos], exp)
            }
            None => (rest, 0),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseNumberError::NoDigits);
        }
        if let Some(c) = int_part
            .chars()
            .chain(frac_part.chars())
            .find(|c| !c.is_ascii_digit())
        {
            return Err(ParseNumberError::InvalidDigit(c));
        }

        let mut digits = String::with_capacity(int_part.len() + frac_part.len());
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let mut mantissa =
            BigInt::parse_bytes(digits.as_bytes(), 10).ok_or(ParseNumberError::NoDigits)?;
        if negative {
            mantissa = -mantissa;
        }

        let scale = frac_part.len() as i64 - exponent;
        if scale < 0 {
            mantissa *= pow10((-scale) as u32);
            Ok(Self::new(mantissa, 0))
        } else {
            Ok(Self::new(mantissa, scale as u32))
        }
    }
}

impl fmt::Display for Decimal {
    /// Plain notation, never exponent notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.magnitude().to_string();
        if self.is_negative() {
            f.write_str("-")?;
        }
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{int_part}.{frac_part}")
        } else {
            f.write_str("0.")?;
            for _ in digits.len()..scale {
                f.write_str("0")?;
            }
            f.write_str(&digits)
        }
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let scale = self.scale.max(other.scale);
        self.aligned(scale).cmp(&other.aligned(scale))
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
