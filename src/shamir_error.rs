use thiserror::Error;

use crate::constants::{MAX_RADIX, MIN_RADIX};

/// Failures that stop a recovery run.
#[derive(Debug, Error)]
pub enum ShamirError {
    #[error("Unable to read shares: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing parameter \"{0}\"")]
    MissingParameter(&'static str),

    #[error("Invalid threshold")]
    InvalidThreshold,

    #[error("Not enough valid shares to compute the secret (found {found}, need {threshold})")]
    NotEnoughShares { found: usize, threshold: usize },

    #[error("Duplicate share index {0}")]
    DuplicateShareIndex(u64),

    #[error("Interpolation result is not an integer")]
    NonIntegralResult,

    #[error("Share at x = {x} is inconsistent with the recovered polynomial")]
    InconsistentShare { x: u64 },
}

/// Reasons a single share entry is skipped. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareDecodeError {
    #[error("share index must be at least 1")]
    IndexOutOfRange,

    #[error("missing base")]
    MissingBase,

    #[error("missing value")]
    MissingValue,

    #[error("base is not an integer")]
    InvalidBase,

    #[error("base {0} is outside {}..={}", MIN_RADIX, MAX_RADIX)]
    RadixOutOfRange(u32),

    #[error("value is not a valid base {0} number")]
    InvalidDigits(u32),

    #[error("share block is never closed")]
    Unterminated,
}
