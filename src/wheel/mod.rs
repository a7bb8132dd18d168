//! Prize wheel
//!
//! Weighted pick, angular layout and spin lifecycle. All angles are in
//! degrees. Iteration order is always ascending item id, never input order.

pub mod easing;
pub mod item;
pub mod segment;
pub mod select;
pub mod spin;

pub use easing::{CubicBezier, SPIN_EASE};
pub use item::{WeightedItem, default_prizes};
pub use segment::{AngleSegment, mid_angle_of, partition, segment_at, segment_under_pointer};
pub use select::select;
pub use spin::{SpinCallback, SpinController, SpinOutcome, SpinSettings, SpinState};
