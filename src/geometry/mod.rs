//! Geometry collaborators of the graph engine.
//!
//! The graph itself is purely combinatorial; it only needs vertex positions
//! to order the edges around a vertex when routing left turns. This module
//! provides the unit-vector point type and the orientation oracle used for
//! that ordering.

pub mod point;
pub mod predicates;

pub use point::S2Point;
pub use predicates::{ordered_ccw, sign};
