use num_bigint::BigInt;
use num_traits::Zero;
use tracing::info;

use crate::{Share, ShamirError, interpolate::interpolate};

/// How strictly shares beyond the threshold are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecoveryMode {
    /// Interpolate the first `threshold` shares and ignore the rest.
    #[default]
    FirstK,
    /// Also require every remaining share to lie on the recovered polynomial.
    CrossChecked,
}

fn validate_parameters(threshold: usize, share_count: usize) -> Result<(), ShamirError> {
    if threshold < 1 {
        return Err(ShamirError::InvalidThreshold);
    } else if share_count < threshold {
        return Err(ShamirError::NotEnoughShares { found: share_count, threshold });
    }
    Ok(())
}

/// Recover the secret from the first `threshold` shares, in the order given.
pub fn recover_secret(shares: &[Share], threshold: usize) -> Result<BigInt, ShamirError> {
    validate_parameters(threshold, shares.len())?;
    let secret = interpolate(&shares[..threshold], &BigInt::zero())?;
    info!(threshold, "recovered secret");
    Ok(secret)
}

/// Recover the secret from the first `threshold` shares and check that every
/// other share agrees with them.
pub fn recover_secret_checked(shares: &[Share], threshold: usize) -> Result<BigInt, ShamirError> {
    let secret = recover_secret(shares, threshold)?;
    let (selected, remaining) = shares.split_at(threshold);
    for share in remaining {
        let expected = interpolate(selected, &BigInt::from(share.x()))?;
        if &expected != share.y() {
            return Err(ShamirError::InconsistentShare { x: share.x() });
        }
    }
    info!(checked = remaining.len(), "all remaining shares agree");
    Ok(secret)
}

pub fn recover(shares: &[Share], threshold: usize, mode: RecoveryMode) -> Result<BigInt, ShamirError> {
    match mode {
        RecoveryMode::FirstK => recover_secret(shares, threshold),
        RecoveryMode::CrossChecked => recover_secret_checked(shares, threshold),
    }
}
