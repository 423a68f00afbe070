//! Structural invariant checks for graphs and edge tables.
//!
//! Hot paths never validate their inputs; the adjacency indexes simply
//! assume sorted edges. These checks exist so that debug builds (or builds
//! with the `check-invariants` feature) catch a broken producer early.

use crate::builder_error::BuilderError;
use crate::graph::{Edge, VertexId};

/// Trait for validating data structure invariants.
pub trait DebugInvariants {
    /// Assert invariants in debug builds or when invariant checking is enabled.
    fn debug_assert_invariants(&self);
    /// Validate invariants and return the first error encountered.
    fn validate_invariants(&self) -> Result<(), BuilderError>;
}

/// Runs `validate_invariants()` on the given value and panics with the
/// provided context when invariant checking is enabled.
#[macro_export]
macro_rules! debug_invariants {
    ($value:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $crate::debug_invariants::DebugInvariants::validate_invariants($value) {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}

/// Checks that every endpoint is below `num_vertices` and that `edges` is in
/// lexicographic (origin, destination) order.
pub fn check_edge_table(edges: &[Edge], num_vertices: usize) -> Result<(), BuilderError> {
    let in_range = |v: VertexId| v >= 0 && (v as usize) < num_vertices;
    for (e, &(v0, v1)) in edges.iter().enumerate() {
        if !in_range(v0) || !in_range(v1) {
            return Err(BuilderError::InvariantViolation(format!(
                "edge {e} = ({v0}, {v1}) references a vertex outside 0..{num_vertices}"
            )));
        }
    }
    if let Some(e) = edges.windows(2).position(|w| w[1] < w[0]) {
        return Err(BuilderError::InvariantViolation(format!(
            "edges {e} and {} are not in lexicographic order",
            e + 1
        )));
    }
    Ok(())
}
