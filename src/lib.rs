#![cfg_attr(docsrs, feature(doc_cfg))]
//! # s2-builder-graph
//!
//! s2-builder-graph reassembles snapped edges on the sphere into loops,
//! polylines and connected components. It is the graph stage of a snapping
//! pipeline: an upstream producer rounds input vertices to a common vertex
//! set and hands over the resulting edges; this crate cleans them up and
//! threads them back together with robust, deterministic output order.
//!
//! ## Features
//! - Edge preprocessing: degenerate edge, duplicate edge and sibling pair
//!   policies ([`graph::GraphOptions`], [`graph::Graph::process_edges`])
//! - CSR-style adjacency indexes ([`graph::VertexOutMap`], [`graph::VertexInMap`])
//! - Left-turn routing around each vertex ([`graph::Graph::left_turn_map`])
//! - Loop, component and polyline assembly, canonicalized against the input
//!   edge order so that re-snapping is idempotent
//! - Interned input-edge and label sets ([`lexicon::IdSetLexicon`])
//!
//! ## Determinism
//!
//! No operation depends on hash iteration order or randomness. Output order
//! is a function of the edge table and the minimum input edge id of each
//! edge.
//!
//! ## Errors
//!
//! Topological problems (edges that do not form loops, missing siblings)
//! are reported as [`builder_error::BuilderError`]. Assembly routines write
//! into caller-supplied buffers, so whatever was built before the failure
//! can still be inspected. Calling an assembler under options it does not
//! support is a programming error caught by debug assertions.
//!
//! ## Invariant checking
//!
//! [`graph::Graph::new`] validates its edge table with
//! [`debug_invariants!`] in debug builds. Enable the `check-invariants`
//! feature to keep those checks in release builds.

pub mod builder_error;
pub mod debug_invariants;
pub mod geometry;
pub mod graph;
pub mod lexicon;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::builder_error::{BuilderError, ErrorKind};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::S2Point;
    pub use crate::graph::{
        DegenerateBoundaries, DegenerateEdges, DirectedComponent, DuplicateEdges, Edge, EdgeId,
        EdgeLoop, EdgePolyline, EdgeType, Graph, GraphData, GraphOptions, LoopType,
        PolylineType, SiblingPairs, UndirectedComponent, VertexId, VertexInMap, VertexOutMap,
    };
    pub use crate::lexicon::{IdSet, IdSetLexicon};
}
