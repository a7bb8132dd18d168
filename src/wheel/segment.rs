//! Wheel layout: weighted items as angular segments
//!
//! Angles are degrees in canvas convention (0° points right, angles grow
//! clockwise), so 270° is the top of the wheel. Segments are laid out
//! clockwise in ascending id order starting at `start_angle`.

use serde::{Deserialize, Serialize};

use super::item::{WeightedItem, validated_by_id};
use crate::consts::FULL_TURN;
use crate::error::WheelError;
use crate::{clockwise_delta, normalize_degrees};

/// The slice of the wheel assigned to one prize
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleSegment {
    pub id: u32,
    /// Start angle (degrees, [0, 360))
    pub start_angle: f64,
    /// End angle (degrees, [0, 360)); equals start for a full-circle segment
    pub end_angle: f64,
    /// Angular center, the alignment target for a spin
    pub mid_angle: f64,
    /// Angular extent (degrees, (0, 360])
    pub span: f64,
}

impl AngleSegment {
    /// Check if a wheel-local angle falls inside this segment.
    /// Start is inclusive, end exclusive.
    pub fn contains_angle(&self, angle: f64) -> bool {
        if self.span >= FULL_TURN {
            return true;
        }
        clockwise_delta(self.start_angle, angle) < self.span
    }
}

/// Partition the circle into one segment per item.
pub fn partition(items: &[WeightedItem], start_angle: f64) -> Result<Vec<AngleSegment>, WheelError> {
    let (sorted, total) = validated_by_id(items)?;

    let mut start = normalize_degrees(start_angle);
    let segments = sorted
        .iter()
        .map(|item| {
            let span = FULL_TURN * item.weight / total;
            let end = normalize_degrees(start + span);
            let segment = AngleSegment {
                id: item.id,
                start_angle: start,
                end_angle: end,
                mid_angle: normalize_degrees(start + span / 2.0),
                span,
            };
            start = end;
            segment
        })
        .collect();

    Ok(segments)
}

/// Find the segment covering a wheel-local angle
pub fn segment_at(segments: &[AngleSegment], angle: f64) -> Option<u32> {
    let angle = normalize_degrees(angle);
    segments
        .iter()
        .find(|s| s.contains_angle(angle))
        .map(|s| s.id)
        // Accumulated rounding can leave a sliver before the first start
        .or_else(|| {
            segments
                .iter()
                .min_by(|a, b| {
                    clockwise_delta(a.start_angle, angle).total_cmp(&clockwise_delta(b.start_angle, angle))
                })
                .map(|s| s.id)
        })
}

/// Which prize sits under the pointer after the wheel has turned
/// clockwise by `rotation` degrees
pub fn segment_under_pointer(segments: &[AngleSegment], pointer_angle: f64, rotation: f64) -> Option<u32> {
    segment_at(segments, pointer_angle - rotation)
}

/// Look up the mid-angle of a segment by id
pub fn mid_angle_of(segments: &[AngleSegment], id: u32) -> Option<f64> {
    segments.iter().find(|s| s.id == id).map(|s| s.mid_angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::WHEEL_START_ANGLE;
    use crate::wheel::default_prizes;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_two_item_layout() {
        let items = vec![WeightedItem::new(1, 3.0, "a"), WeightedItem::new(2, 7.0, "b")];
        let segs = partition(&items, WHEEL_START_ANGLE).unwrap();
        assert_eq!(segs.len(), 2);

        assert!(approx(segs[0].start_angle, 270.0));
        assert!(approx(segs[0].span, 108.0));
        assert!(approx(segs[0].end_angle, 18.0)); // 378 wraps
        assert!(approx(segs[0].mid_angle, 324.0));

        assert!(approx(segs[1].start_angle, 18.0));
        assert!(approx(segs[1].span, 252.0));
        assert!(approx(segs[1].end_angle, 270.0));
        assert!(approx(segs[1].mid_angle, 144.0));
    }

    #[test]
    fn test_single_item_full_circle() {
        let segs = partition(&[WeightedItem::new(9, 0.5, "only")], 270.0).unwrap();
        assert_eq!(segs.len(), 1);
        assert!(approx(segs[0].span, 360.0));
        assert!(approx(segs[0].start_angle, 270.0));
        assert!(approx(segs[0].end_angle, 270.0));
        assert!(approx(segs[0].mid_angle, 90.0));
        assert_eq!(segment_at(&segs, 12.0), Some(9));
    }

    #[test]
    fn test_partition_errors() {
        assert_eq!(partition(&[], 270.0).unwrap_err(), WheelError::EmptyItems);
        let bad = vec![WeightedItem::new(1, -1.0, "neg")];
        assert!(partition(&bad, 270.0).is_err());
    }

    #[test]
    fn test_segment_at_wraparound() {
        let items = vec![WeightedItem::new(1, 3.0, "a"), WeightedItem::new(2, 7.0, "b")];
        let segs = partition(&items, 270.0).unwrap();
        assert_eq!(segment_at(&segs, 270.0), Some(1));
        assert_eq!(segment_at(&segs, 359.0), Some(1));
        assert_eq!(segment_at(&segs, 5.0), Some(1));
        assert_eq!(segment_at(&segs, 18.0), Some(2));
        assert_eq!(segment_at(&segs, 269.9), Some(2));
    }

    #[test]
    fn test_pointer_lookup_after_rotation() {
        let segs = partition(&default_prizes(), 270.0).unwrap();
        for seg in &segs {
            // Rotate so this segment's middle lands under the pointer
            let rotation = 5.0 * 360.0 + clockwise_delta(seg.mid_angle, 270.0);
            assert_eq!(segment_under_pointer(&segs, 270.0, rotation), Some(seg.id));
        }
    }

    proptest! {
        #[test]
        fn prop_spans_sum_to_full_turn(weights in prop::collection::vec(0.01f64..1000.0, 1..20)) {
            let items: Vec<_> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| WeightedItem::new(i as u32, *w, "x"))
                .collect();
            let segs = partition(&items, 270.0).unwrap();
            let sum: f64 = segs.iter().map(|s| s.span).sum();
            prop_assert!((sum - 360.0).abs() < 1e-6);
            // Contiguous: each segment starts where the previous ended
            for pair in segs.windows(2) {
                prop_assert!(approx(pair[0].end_angle, pair[1].start_angle));
            }
            for s in &segs {
                prop_assert!((0.0..360.0).contains(&s.start_angle));
                prop_assert!((0.0..360.0).contains(&s.end_angle));
                prop_assert!((0.0..360.0).contains(&s.mid_angle));
            }
        }

        #[test]
        fn prop_partition_order_independent(
            weights in prop::collection::vec(0.01f64..100.0, 1..12),
            rotate_by in 0usize..12,
        ) {
            let items: Vec<_> = weights
                .iter()
                .enumerate()
                .map(|(i, w)| WeightedItem::new(i as u32 * 3 + 1, *w, "x"))
                .collect();
            let mut permuted = items.clone();
            permuted.reverse();
            let len = permuted.len();
            permuted.rotate_left(rotate_by % len);

            prop_assert_eq!(partition(&items, 270.0).unwrap(), partition(&permuted, 270.0).unwrap());
        }
    }
}
