//! Options controlling how snapped edges are interpreted and cleaned up.

use serde::{Deserialize, Serialize};

/// Whether edges carry a direction.
///
/// Undirected edges are stored as sibling pairs of directed edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeType {
    Directed,
    Undirected,
}

/// Policy for degenerate edges (edges from a vertex to itself).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DegenerateEdges {
    /// Drop every degenerate edge.
    Discard,
    /// Keep only degenerate edges at vertices with no other incident edge,
    /// merging duplicates of those.
    DiscardExcess,
    Keep,
}

/// Policy for multiple copies of the same directed edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuplicateEdges {
    /// Collapse copies into one edge carrying the union of their input ids.
    Merge,
    Keep,
}

/// Policy for sibling pairs, i.e. an edge AB together with its reverse BA.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiblingPairs {
    /// Cancel sibling pairs against each other.
    Discard,
    Keep,
    /// Report an error unless every edge has a sibling. Undirected input is
    /// converted to directed edges.
    Require,
    /// Add a sibling (with no input edge ids) to every edge lacking one.
    /// Undirected input is converted to directed edges.
    Create,
}

/// The configuration a graph was built under.
///
/// These are inputs to [`Graph::process_edges`](super::Graph::process_edges);
/// the only field that processing may rewrite is `edge_type`, which becomes
/// [`EdgeType::Directed`] when sibling pairs are required or created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphOptions {
    pub edge_type: EdgeType,
    pub degenerate_edges: DegenerateEdges,
    pub duplicate_edges: DuplicateEdges,
    pub sibling_pairs: SiblingPairs,
    /// Whether the producer may drop vertices with no incident edges (see
    /// [`Graph::filter_vertices`](super::Graph::filter_vertices)).
    pub allow_vertex_filtering: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            edge_type: EdgeType::Directed,
            degenerate_edges: DegenerateEdges::Keep,
            duplicate_edges: DuplicateEdges::Keep,
            sibling_pairs: SiblingPairs::Keep,
            allow_vertex_filtering: true,
        }
    }
}

impl GraphOptions {
    pub fn new(
        edge_type: EdgeType,
        degenerate_edges: DegenerateEdges,
        duplicate_edges: DuplicateEdges,
        sibling_pairs: SiblingPairs,
    ) -> Self {
        Self {
            edge_type,
            degenerate_edges,
            duplicate_edges,
            sibling_pairs,
            ..Self::default()
        }
    }

    pub fn with_edge_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = edge_type;
        self
    }

    pub fn with_degenerate_edges(mut self, degenerate_edges: DegenerateEdges) -> Self {
        self.degenerate_edges = degenerate_edges;
        self
    }

    pub fn with_duplicate_edges(mut self, duplicate_edges: DuplicateEdges) -> Self {
        self.duplicate_edges = duplicate_edges;
        self
    }

    pub fn with_sibling_pairs(mut self, sibling_pairs: SiblingPairs) -> Self {
        self.sibling_pairs = sibling_pairs;
        self
    }

    pub fn with_vertex_filtering(mut self, allow: bool) -> Self {
        self.allow_vertex_filtering = allow;
        self
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.edge_type == EdgeType::Directed
    }

    /// True if the options guarantee that every edge has a sibling.
    pub fn guarantees_siblings(&self) -> bool {
        matches!(self.sibling_pairs, SiblingPairs::Require | SiblingPairs::Create)
            || self.edge_type == EdgeType::Undirected
    }
}
