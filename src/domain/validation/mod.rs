pub mod operating_ranges;

pub use operating_ranges::{FieldRange, OPERATING_RANGES, RangeValidator};
