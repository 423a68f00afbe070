//! Snapped-edge graph and the assembly algorithms that run on it.
//!
//! A [`Graph`] is an immutable view over a set of vertices and directed
//! edges produced by a snapping step. Edges are sorted lexicographically by
//! (origin, destination), so the outgoing edges of a vertex always form a
//! contiguous range. Side tables map each edge to the set of input edges
//! that were snapped to it, and each input edge to its labels.
//!
//! The graph borrows all of its storage from the caller for the lifetime
//! `'a`; derived structures such as adjacency maps, left-turn maps and the
//! assembled loops are owned by whichever call produced them.
//!
//! Layers typically:
//! 1. run [`Graph::process_edges`] on the raw edge list,
//! 2. optionally [`Graph::filter_vertices`],
//! 3. construct a [`Graph`] and call one of the assembly methods
//!    ([`Graph::directed_loops`], [`Graph::directed_components`],
//!    [`Graph::undirected_components`], [`Graph::polylines`]).

mod adjacency;
mod data;
mod filter;
mod left_turn;
mod loops;
pub mod options;
mod polyline;
mod process;

pub use adjacency::{VertexInMap, VertexOutMap};
pub use data::GraphData;
pub use loops::{DegenerateBoundaries, LoopType};
pub use options::{DegenerateEdges, DuplicateEdges, EdgeType, GraphOptions, SiblingPairs};
pub use polyline::PolylineType;

use crate::builder_error::BuilderError;
use crate::debug_invariants::{DebugInvariants, check_edge_table};
use crate::geometry::S2Point;
use crate::lexicon::{IdSet, IdSetLexicon};

/// Identifies a vertex; vertices are numbered densely from zero.
pub type VertexId = i32;
/// Identifies an edge; edges are numbered densely from zero.
pub type EdgeId = i32;
/// An (origin, destination) vertex pair.
pub type Edge = (VertexId, VertexId);
/// Identifies an edge handed to the snapping step, before snapping.
pub type InputEdgeId = i32;
/// Identifies a set of input edge ids in an [`IdSetLexicon`].
pub type InputEdgeIdSetId = i32;
/// Identifies a set of labels in an [`IdSetLexicon`].
pub type LabelSetId = i32;
/// A client-defined edge label.
pub type Label = i32;

/// Entry of a left-turn map (or similar edge map) that has no valid edge.
pub const NO_EDGE: EdgeId = -1;
/// Minimum input edge id of an edge that no input edge was snapped to.
pub const NO_INPUT_EDGE_ID: InputEdgeId = -1;

/// A closed sequence of edge ids.
pub type EdgeLoop = Vec<EdgeId>;
/// An open sequence of edge ids.
pub type EdgePolyline = Vec<EdgeId>;
/// Loops connected to each other through shared vertices.
pub type DirectedComponent = Vec<EdgeLoop>;
/// The two complementary loop sets of one undirected component: every edge
/// in one complement has its sibling in the other.
pub type UndirectedComponent = [Vec<EdgeLoop>; 2];

/// Returns the reverse (sibling) of an edge.
#[inline]
pub fn reverse(e: Edge) -> Edge {
    (e.1, e.0)
}

/// Lexicographic order on edges that breaks ties by edge id, which turns an
/// unstable sort into a stable one.
#[inline]
pub fn stable_less_than(a: Edge, b: Edge, ai: EdgeId, bi: EdgeId) -> bool {
    (a, ai) < (b, bi)
}

/// Immutable view over snapped vertices, sorted edges and their side tables.
#[derive(Clone, Copy, Debug)]
pub struct Graph<'a> {
    options: GraphOptions,
    vertices: &'a [S2Point],
    edges: &'a [Edge],
    input_edge_id_set_ids: &'a [InputEdgeIdSetId],
    input_edge_id_set_lexicon: &'a IdSetLexicon,
    label_set_ids: &'a [LabelSetId],
    label_set_lexicon: &'a IdSetLexicon,
}

impl<'a> Graph<'a> {
    /// Creates a graph over caller-owned storage.
    ///
    /// - `edges` must be sorted lexicographically and reference vertices in
    ///   `0..vertices.len()`.
    /// - `input_edge_id_set_ids[e]` is the set of input edges snapped to `e`.
    /// - `label_set_ids[i]` is the label set of *input* edge `i`.
    ///
    /// Violations are caught in debug builds (or with `check-invariants`);
    /// release builds trust the producer.
    pub fn new(
        options: GraphOptions,
        vertices: &'a [S2Point],
        edges: &'a [Edge],
        input_edge_id_set_ids: &'a [InputEdgeIdSetId],
        input_edge_id_set_lexicon: &'a IdSetLexicon,
        label_set_ids: &'a [LabelSetId],
        label_set_lexicon: &'a IdSetLexicon,
    ) -> Self {
        let g = Self {
            options,
            vertices,
            edges,
            input_edge_id_set_ids,
            input_edge_id_set_lexicon,
            label_set_ids,
            label_set_lexicon,
        };
        crate::debug_invariants!(&g, "Graph::new");
        g
    }

    #[inline]
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    #[inline]
    pub fn num_vertices(&self) -> VertexId {
        self.vertices.len() as VertexId
    }

    #[inline]
    pub fn vertex(&self, v: VertexId) -> &'a S2Point {
        &self.vertices[v as usize]
    }

    #[inline]
    pub fn vertices(&self) -> &'a [S2Point] {
        self.vertices
    }

    #[inline]
    pub fn num_edges(&self) -> EdgeId {
        self.edges.len() as EdgeId
    }

    #[inline]
    pub fn edge(&self, e: EdgeId) -> Edge {
        self.edges[e as usize]
    }

    #[inline]
    pub fn edges(&self) -> &'a [Edge] {
        self.edges
    }

    /// Edge ids sorted by (destination, origin, id). All incoming edges of a
    /// vertex form a contiguous subrange of this ordering.
    pub fn in_edge_ids(&self) -> Vec<EdgeId> {
        let mut in_edge_ids: Vec<EdgeId> = (0..self.num_edges()).collect();
        in_edge_ids.sort_unstable_by_key(|&e| (reverse(self.edge(e)), e));
        in_edge_ids
    }

    /// Maps every edge to its sibling edge.
    ///
    /// Identical to [`Graph::in_edge_ids`] except that undirected degenerate
    /// edges are paired with each other. Duplicate edges are handled, and the
    /// result is consistent with [`Graph::left_turn_map`].
    ///
    /// REQUIRES: the options guarantee sibling pairs (`Require`/`Create`
    /// sibling pairs, or undirected edges).
    pub fn sibling_map(&self) -> Vec<EdgeId> {
        let mut in_edge_ids = self.in_edge_ids();
        self.make_sibling_map(&mut in_edge_ids);
        in_edge_ids
    }

    /// Converts the output of [`Graph::in_edge_ids`] into a sibling map.
    pub fn make_sibling_map(&self, in_edge_ids: &mut [EdgeId]) {
        debug_assert!(
            self.options.guarantees_siblings(),
            "sibling map requires sibling pairs"
        );
        if self.options.edge_type == EdgeType::Directed
            || self.options.degenerate_edges == DegenerateEdges::Discard
        {
            return;
        }
        // Undirected degenerate edges come in adjacent pairs of identical
        // directed edges, each currently mapped to itself.
        let n = self.edges.len();
        let mut e = 0;
        while e < n {
            let (v0, v1) = self.edges[e];
            if v0 == v1 {
                debug_assert!(e + 1 < n && self.edges[e + 1] == (v0, v0));
                debug_assert_eq!(in_edge_ids[e], e as EdgeId);
                in_edge_ids.swap(e, e + 1);
                e += 1;
            }
            e += 1;
        }
    }

    /// The set of input edge ids that were snapped to edge `e`.
    #[inline]
    pub fn input_edge_ids(&self, e: EdgeId) -> IdSet<'a> {
        self.input_edge_id_set_lexicon
            .id_set(self.input_edge_id_set_ids[e as usize])
    }

    #[inline]
    pub fn input_edge_id_set_id(&self, e: EdgeId) -> InputEdgeIdSetId {
        self.input_edge_id_set_ids[e as usize]
    }

    #[inline]
    pub fn input_edge_id_set_ids(&self) -> &'a [InputEdgeIdSetId] {
        self.input_edge_id_set_ids
    }

    #[inline]
    pub fn input_edge_id_set_lexicon(&self) -> &'a IdSetLexicon {
        self.input_edge_id_set_lexicon
    }

    /// Smallest input edge id snapped to `e`, or [`NO_INPUT_EDGE_ID`] for
    /// edges created by [`SiblingPairs::Create`].
    #[inline]
    pub fn min_input_edge_id(&self, e: EdgeId) -> InputEdgeId {
        self.input_edge_ids(e).first().unwrap_or(NO_INPUT_EDGE_ID)
    }

    /// [`Graph::min_input_edge_id`] for every edge.
    pub fn min_input_edge_ids(&self) -> Vec<InputEdgeId> {
        (0..self.num_edges())
            .map(|e| self.min_input_edge_id(e))
            .collect()
    }

    /// Edge ids sorted by minimum input edge id (ties by edge id), which
    /// approximates the order the edges were originally supplied in.
    pub fn input_edge_order(&self, min_input_ids: &[InputEdgeId]) -> Vec<EdgeId> {
        let mut order: Vec<EdgeId> = (0..min_input_ids.len() as EdgeId).collect();
        order.sort_unstable_by_key(|&e| (min_input_ids[e as usize], e));
        order
    }

    /// Labels attached to input edge `input_edge_id`.
    #[inline]
    pub fn labels(&self, input_edge_id: InputEdgeId) -> IdSet<'a> {
        self.label_set_lexicon
            .id_set(self.label_set_ids[input_edge_id as usize])
    }

    #[inline]
    pub fn label_set_id(&self, input_edge_id: InputEdgeId) -> LabelSetId {
        self.label_set_ids[input_edge_id as usize]
    }

    #[inline]
    pub fn label_set_ids(&self) -> &'a [LabelSetId] {
        self.label_set_ids
    }

    #[inline]
    pub fn label_set_lexicon(&self) -> &'a IdSetLexicon {
        self.label_set_lexicon
    }

    /// Fills `labels` with the sorted, deduplicated labels of every input
    /// edge snapped to `e`. The buffer is cleared first so it can be reused.
    pub fn edge_labels(&self, e: EdgeId, labels: &mut Vec<Label>) {
        labels.clear();
        for input_edge_id in self.input_edge_ids(e) {
            labels.extend(self.labels(input_edge_id));
        }
        labels.sort_unstable();
        labels.dedup();
    }
}

impl DebugInvariants for Graph<'_> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self, "Graph");
    }

    fn validate_invariants(&self) -> Result<(), BuilderError> {
        if self.input_edge_id_set_ids.len() != self.edges.len() {
            return Err(BuilderError::InvariantViolation(format!(
                "{} input edge id sets for {} edges",
                self.input_edge_id_set_ids.len(),
                self.edges.len()
            )));
        }
        check_edge_table(self.edges, self.vertices.len())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::Fixture;
    use super::*;

    fn undirected() -> GraphOptions {
        GraphOptions::default()
            .with_edge_type(EdgeType::Undirected)
            .with_degenerate_edges(DegenerateEdges::Keep)
    }

    #[test]
    fn in_edge_ids_sort_by_destination() {
        let f = Fixture::new(GraphOptions::default(), 3, &[(0, 1), (0, 2), (1, 0), (2, 1)]);
        let g = f.graph();
        // by (dst, src): (1,0)->e2, (0,1)->e0, (2,1)->e3, (0,2)->e1
        assert_eq!(g.in_edge_ids(), vec![2, 0, 3, 1]);
    }

    #[test]
    fn sibling_map_is_an_involution() {
        let edges = [(0, 1), (0, 1), (1, 0), (1, 0), (1, 2), (2, 1)];
        let f = Fixture::new(undirected(), 3, &edges);
        let g = f.graph();
        let sib = g.sibling_map();
        for e in 0..g.num_edges() {
            let s = sib[e as usize];
            assert_eq!(g.edge(s), reverse(g.edge(e)));
            assert_eq!(sib[s as usize], e);
        }
    }

    #[test]
    fn undirected_degenerate_edges_pair_up() {
        let f = Fixture::new(undirected(), 2, &[(0, 1), (1, 0), (1, 1), (1, 1)]);
        let g = f.graph();
        let sib = g.sibling_map();
        assert_eq!(sib, vec![1, 0, 3, 2]);
    }

    #[test]
    fn min_input_ids_and_input_order() {
        let mut f = Fixture::new(GraphOptions::default(), 3, &[(0, 1), (1, 2), (2, 0)]);
        f.input_ids[0] = f.lexicon.add([7, 4]);
        f.input_ids[1] = IdSetLexicon::empty_set_id();
        f.input_ids[2] = 2;
        let g = f.graph();
        assert_eq!(g.min_input_edge_ids(), vec![4, NO_INPUT_EDGE_ID, 2]);
        let order = g.input_edge_order(&g.min_input_edge_ids());
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn edge_labels_are_merged_over_input_edges() {
        let mut f = Fixture::new(GraphOptions::default(), 2, &[(0, 1)]);
        f.input_ids[0] = f.lexicon.add([0, 1]);
        f.label_ids = vec![f.label_lexicon.add([5, 3]), f.label_lexicon.add([3, 9])];
        let g = f.graph();
        let mut labels = vec![42];
        g.edge_labels(0, &mut labels);
        assert_eq!(labels, vec![3, 5, 9]);
        assert_eq!(g.labels(1).to_vec(), vec![3, 9]);
    }

    #[test]
    fn stable_less_than_breaks_ties_by_id() {
        assert!(stable_less_than((0, 1), (0, 2), 5, 1));
        assert!(stable_less_than((0, 1), (0, 1), 1, 2));
        assert!(!stable_less_than((0, 1), (0, 1), 2, 1));
    }

    #[test]
    fn invariants_reject_mismatched_side_table() {
        let mut f = Fixture::new(GraphOptions::default(), 2, &[(0, 1)]);
        f.input_ids.push(3);
        let g = Graph {
            options: f.options,
            vertices: &f.vertices,
            edges: &f.edges,
            input_edge_id_set_ids: &f.input_ids,
            input_edge_id_set_lexicon: &f.lexicon,
            label_set_ids: &f.label_ids,
            label_set_lexicon: &f.label_lexicon,
        };
        assert!(g.validate_invariants().is_err());
    }
}
