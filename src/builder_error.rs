//! BuilderError: unified error type for graph processing and assembly.
//!
//! Fallible operations report the first problem they encounter through this
//! type rather than panicking. Assembly routines that write into a caller
//! supplied buffer leave whatever they managed to build in that buffer, so
//! the error can be inspected alongside the partial output.

use thiserror::Error;

use crate::graph::{EdgeId, VertexId};

/// Broad classification of a [`BuilderError`].
///
/// Every error produced by this crate is currently a builder error; the
/// variant set may grow when more collaborators report through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The edges handed to the builder do not describe valid geometry.
    Builder,
}

/// Errors reported while processing edges or assembling loops and polylines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// `SiblingPairs::Require` was requested but some edge has no reverse edge.
    #[error("Expected all input edges to have siblings, but some were missing")]
    MissingSiblings,
    /// A self-loop cannot take part in left-turn routing.
    #[error("Degenerate edge {edge} cannot be part of a loop")]
    DegenerateEdge { edge: EdgeId },
    /// Incoming and outgoing edges around a vertex could not be paired up.
    #[error("Given edges do not form loops (indegree != outdegree): edge {edge} at vertex {vertex} has no left turn")]
    UnmatchedEdge { edge: EdgeId, vertex: VertexId },
    /// An undirected edge and its sibling were routed into the same
    /// complement, which happens only when the edges do not form loops.
    #[error("Given undirected edges do not form loops: edge {edge} shares a complement with its sibling")]
    SiblingInSameComplement { edge: EdgeId },
    /// A structural invariant of the graph does not hold.
    #[error("Graph invariant violated: {0}")]
    InvariantViolation(String),
}

impl BuilderError {
    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BuilderError::MissingSiblings
            | BuilderError::DegenerateEdge { .. }
            | BuilderError::UnmatchedEdge { .. }
            | BuilderError::SiblingInSameComplement { .. }
            | BuilderError::InvariantViolation(_) => ErrorKind::Builder,
        }
    }
}
