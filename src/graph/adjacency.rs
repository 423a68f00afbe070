//! Per-vertex adjacency over the sorted edge table.
//!
//! Both maps are CSR offset arrays: `offsets[v]..offsets[v + 1]` is the range
//! of edges leaving (or entering) vertex `v`, and `offsets[num_vertices]` is
//! the edge count. Building either map is a single O(V + E) pass that relies
//! on the edge table already being sorted.

use std::ops::Range;

use super::{Edge, EdgeId, Graph, VertexId};

/// Maps each vertex to its outgoing edges.
///
/// ```
/// # use s2_builder_graph::graph::{GraphData, GraphOptions, VertexOutMap};
/// # use s2_builder_graph::geometry::S2Point;
/// let vertices = vec![S2Point::new(1.0, 0.0, 0.0), S2Point::new(0.0, 1.0, 0.0)];
/// let data = GraphData::build(GraphOptions::default(), vertices, &[(0, 1), (1, 0), (0, 1)])?;
/// let g = data.graph();
/// let out = VertexOutMap::new(&g);
/// assert_eq!(out.degree(0), 2);
/// assert_eq!(out.edge_ids_between(0, 1), 0..2);
/// # Ok::<(), s2_builder_graph::builder_error::BuilderError>(())
/// ```
#[derive(Clone, Debug)]
pub struct VertexOutMap<'a> {
    edges: &'a [Edge],
    out_offsets: Vec<EdgeId>,
}

impl<'a> VertexOutMap<'a> {
    pub fn new(g: &Graph<'a>) -> Self {
        let edges = g.edges();
        let nv = g.num_vertices();
        let mut out_offsets = Vec::with_capacity(nv as usize + 1);
        let mut e = 0usize;
        for v in 0..=nv {
            while e < edges.len() && edges[e].0 < v {
                e += 1;
            }
            out_offsets.push(e as EdgeId);
        }
        Self { edges, out_offsets }
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.edge_ids(v).len()
    }

    /// Outgoing edges of `v`, in destination order.
    #[inline]
    pub fn edges(&self, v: VertexId) -> &'a [Edge] {
        let r = self.edge_ids(v);
        &self.edges[r.start as usize..r.end as usize]
    }

    #[inline]
    pub fn edge_ids(&self, v: VertexId) -> Range<EdgeId> {
        let v = v as usize;
        self.out_offsets[v]..self.out_offsets[v + 1]
    }

    /// All copies of the edge `(v0, v1)`.
    pub fn edges_between(&self, v0: VertexId, v1: VertexId) -> &'a [Edge] {
        let r = self.edge_ids_between(v0, v1);
        &self.edges[r.start as usize..r.end as usize]
    }

    /// Ids of all copies of the edge `(v0, v1)`, found by binary search
    /// within the outgoing range of `v0`.
    pub fn edge_ids_between(&self, v0: VertexId, v1: VertexId) -> Range<EdgeId> {
        let range = self.edge_ids(v0);
        let out = &self.edges[range.start as usize..range.end as usize];
        let lo = out.partition_point(|&(_, d)| d < v1) as EdgeId;
        let hi = out.partition_point(|&(_, d)| d <= v1) as EdgeId;
        range.start + lo..range.start + hi
    }
}

/// Maps each vertex to its incoming edges.
///
/// Holds the permutation from [`Graph::in_edge_ids`]; when every edge has a
/// sibling that permutation is also the sibling map.
#[derive(Clone, Debug)]
pub struct VertexInMap {
    in_edge_ids: Vec<EdgeId>,
    in_offsets: Vec<EdgeId>,
}

impl VertexInMap {
    pub fn new(g: &Graph<'_>) -> Self {
        let in_edge_ids = g.in_edge_ids();
        let nv = g.num_vertices();
        let mut in_offsets = Vec::with_capacity(nv as usize + 1);
        let mut e = 0usize;
        for v in 0..=nv {
            while e < in_edge_ids.len() && g.edge(in_edge_ids[e]).1 < v {
                e += 1;
            }
            in_offsets.push(e as EdgeId);
        }
        Self {
            in_edge_ids,
            in_offsets,
        }
    }

    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.edge_ids(v).len()
    }

    /// Incoming edge ids of `v`, in origin order.
    #[inline]
    pub fn edge_ids(&self, v: VertexId) -> &[EdgeId] {
        let v = v as usize;
        &self.in_edge_ids[self.in_offsets[v] as usize..self.in_offsets[v + 1] as usize]
    }

    /// All edge ids sorted by (destination, origin, id).
    #[inline]
    pub fn in_edge_ids(&self) -> &[EdgeId] {
        &self.in_edge_ids
    }

    /// Same as [`VertexInMap::in_edge_ids`]; valid as a sibling map only
    /// when every edge has a sibling.
    #[inline]
    pub fn sibling_map(&self) -> &[EdgeId] {
        &self.in_edge_ids
    }
}
