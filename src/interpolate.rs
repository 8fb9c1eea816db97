use std::collections::HashSet;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{Share, ShamirError};

/// Calculate the lagrange basis coefficient of point `i` for the lagrange
/// polynomial defined by the x coordinates `xc`, evaluated at `x`.
///
/// Returns the unreduced fraction `(numerator, denominator)` where
///
/// ```text
///                 ---     (x - xc[j])
///   basis[i] =    | |   ---------------
///               j != i  (xc[i] - xc[j])
/// ```
///
/// `xc` must be pairwise distinct, otherwise the denominator is zero.
fn lagrange_basis(xc: &[BigInt], i: usize, x: &BigInt) -> (BigInt, BigInt) {
    let mut numerator = BigInt::one();
    let mut denominator = BigInt::one();
    for (j, xj) in xc.iter().enumerate() {
        if j != i {
            numerator *= x - xj;
            denominator *= &xc[i] - xj;
        }
    }
    (numerator, denominator)
}

fn ensure_distinct(points: &[Share]) -> Result<(), ShamirError> {
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        if !seen.insert(point.x()) {
            return Err(ShamirError::DuplicateShareIndex(point.x()));
        }
    }
    Ok(())
}

/// Exactly evaluate the polynomial passing through `points` at `x`.
///
/// The sum is kept as a single fraction and reduced after every term; the
/// division happens once at the end. Fails if two points share an x
/// coordinate or if the result is not an integer.
pub fn interpolate(points: &[Share], x: &BigInt) -> Result<BigInt, ShamirError> {
    ensure_distinct(points)?;

    let xc: Vec<BigInt> = points.iter().map(|p| BigInt::from(p.x())).collect();
    let mut numerator = BigInt::zero();
    let mut denominator = BigInt::one();

    for (i, point) in points.iter().enumerate() {
        let (basis_numerator, basis_denominator) = lagrange_basis(&xc, i, x);
        numerator = numerator * &basis_denominator + point.y() * basis_numerator * &denominator;
        denominator *= basis_denominator;

        let divisor = numerator.gcd(&denominator);
        if !divisor.is_one() {
            numerator /= &divisor;
            denominator /= &divisor;
        }
    }

    let (quotient, remainder) = numerator.div_rem(&denominator);
    if !remainder.is_zero() {
        return Err(ShamirError::NonIntegralResult);
    }
    Ok(quotient)
}
