use num_bigint::BigInt;
use num_traits::Num;

use crate::{
    ShareDecodeError,
    constants::{MAX_RADIX, MIN_RADIX},
};

/// A single point `(x, y)` on the secret polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    x: u64,
    y: BigInt,
}

impl Share {
    pub fn new(x: u64, y: impl Into<BigInt>) -> Self {
        Self { x, y: y.into() }
    }

    pub fn x(&self) -> u64 {
        self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

/// The declared share count `n` and reconstruction threshold `k`.
///
/// `n` is informational only and may be absent; nothing checks that exactly
/// `n` entries were present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    pub n: Option<usize>,
    pub k: usize,
}

/// Parse a radix specifier such as `"16"`.
pub fn parse_radix(base: &str) -> Result<u32, ShareDecodeError> {
    let base = base.trim();
    if base.is_empty() || !base.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ShareDecodeError::InvalidBase);
    }
    // Anything too long for a u32 is out of range anyway.
    let radix = base.parse::<u32>().unwrap_or(u32::MAX);
    if !(MIN_RADIX..=MAX_RADIX).contains(&radix) {
        return Err(ShareDecodeError::RadixOutOfRange(radix));
    }
    Ok(radix)
}

/// Parse `value` as an integer written in `radix`.
///
/// Accepts one optional leading sign followed by at least one digit valid
/// for the radix. Letters are case-insensitive. Whitespace, separators and
/// trailing characters are rejected rather than truncated.
pub fn parse_value(value: &str, radix: u32) -> Result<BigInt, ShareDecodeError> {
    debug_assert!((MIN_RADIX..=MAX_RADIX).contains(&radix));
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(ShareDecodeError::InvalidDigits(radix));
    }
    BigInt::from_str_radix(value, radix).map_err(|_| ShareDecodeError::InvalidDigits(radix))
}

/// Turn the raw fields of one share entry into a `Share`.
pub fn decode_share(
    x: u64,
    base: Option<&str>,
    value: Option<&str>,
) -> Result<Share, ShareDecodeError> {
    if x == 0 {
        return Err(ShareDecodeError::IndexOutOfRange);
    }
    let base = base.ok_or(ShareDecodeError::MissingBase)?;
    let value = value.ok_or(ShareDecodeError::MissingValue)?;
    let radix = parse_radix(base)?;
    let y = parse_value(value, radix)?;
    Ok(Share::new(x, y))
}
