//! Numeric helpers centralizing checked integer math and lossy casts.

use num_traits::cast::cast;
use num_traits::{CheckedAdd, CheckedMul};

/// Sum a slice of values, returning `None` instead of wrapping on overflow.
#[must_use]
pub fn checked_sum<T>(values: &[T]) -> Option<T>
where
    T: CheckedAdd + Copy + Default,
{
    values
        .iter()
        .try_fold(T::default(), |acc, value| acc.checked_add(value))
}

/// Multiply a slice of values, returning `None` instead of wrapping on overflow.
#[must_use]
pub fn checked_product<T>(values: &[T]) -> Option<T>
where
    T: CheckedMul + Copy,
{
    let (first, rest) = values.split_first()?;
    rest.iter()
        .try_fold(*first, |acc, value| acc.checked_mul(value))
}

/// `floor(sqrt(numerator / denominator))` using integer math only.
///
/// Returns 0 when the denominator is zero.
#[must_use]
pub const fn floor_sqrt_of_quotient(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (numerator / denominator).isqrt()
}

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Ratio of two counts as a float, `0.0` when the denominator is zero.
#[must_use]
pub fn count_ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    u64_to_f64(numerator) / u64_to_f64(denominator)
}
