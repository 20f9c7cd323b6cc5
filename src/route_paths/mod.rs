//! Helpers for validating URL segments and normalising resolved paths.
//!
//! Segment validation and path arithmetic are kept apart so that the parser, the index and
//! the branch selection can share the same normalisation rules.

mod filters;
mod segments;

pub use filters::{SegmentError, validate_segment};
pub use segments::{href, join_segment, normalise_path, scope_contains};
