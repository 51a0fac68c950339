//! Post-simulation ranking of inspection counts.

use crate::core::error::SimError;

/// Product of the two largest counts.
pub fn top_two_product(counts: &[u64]) -> Result<u64, SimError> {
    let mut sorted = counts.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));
    match sorted.as_slice() {
        [first, second, ..] => first
            .checked_mul(*second)
            .ok_or(SimError::ProductOverflow {
                first: *first,
                second: *second,
            }),
        _ => Err(SimError::InsufficientActors {
            count: counts.len(),
        }),
    }
}
