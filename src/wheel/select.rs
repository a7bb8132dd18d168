//! Weighted random selection

use super::item::{WeightedItem, validated_by_id};
use crate::error::WheelError;
use crate::rng::RandomSource;

/// Pick one item id with probability proportional to its weight.
///
/// Draws `r` in `[0, total)` and walks the items in ascending id order,
/// returning the first whose cumulative weight reaches `r`. Consumes
/// exactly one value from `rng`.
pub fn select<R: RandomSource + ?Sized>(
    items: &[WeightedItem],
    rng: &mut R,
) -> Result<u32, WheelError> {
    let (sorted, total) = validated_by_id(items)?;
    Ok(pick(&sorted, total, rng.next_unit()))
}

/// Selection against an already validated, id-sorted list
pub(crate) fn pick(sorted: &[&WeightedItem], total: f64, unit: f64) -> u32 {
    let r = unit * total;
    let mut cumulative = 0.0;
    for item in sorted {
        cumulative += item.weight;
        if cumulative >= r {
            return item.id;
        }
    }
    // Float drift can leave the final sum a hair below r
    sorted[sorted.len() - 1].id
}
