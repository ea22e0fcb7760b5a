//! Board state: conflict counters, partial assignments and complete solutions

pub mod assignment;
pub mod counters;
pub mod solution;

pub use assignment::{is_valid, PartialAssignment};
pub use counters::{ConflictBoard, OCCUPIED};
pub use solution::Solution;
