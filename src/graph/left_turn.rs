//! Left-turn routing: pairs every incoming edge of a vertex with the next
//! outgoing edge in clockwise order.

use std::cmp::Ordering;

use crate::builder_error::BuilderError;
use crate::geometry::ordered_ccw;

use super::{Edge, EdgeId, Graph, NO_EDGE, VertexId, reverse};

/// One edge incident to the vertex being routed.
#[derive(Clone, Copy, Debug)]
struct VertexEdge {
    incoming: bool,
    /// Edge id for outgoing edges, position in `in_edge_ids` for incoming.
    index: usize,
    endpoint: VertexId,
    /// Tie-break among edges sharing `endpoint`.
    rank: u32,
}

impl Graph<'_> {
    /// Computes a map from each edge `(v0, v1)` to the following outgoing
    /// edge around `v1` in clockwise order, i.e. the edge reached by turning
    /// left at `v1`. Starting anywhere and only turning left traces a loop
    /// whose interior contains no other edge of the same component.
    ///
    /// When incoming and outgoing edges around a vertex do not alternate,
    /// adjacent (incoming, outgoing) pairs are matched and removed
    /// repeatedly, like matching the parentheses of `"(()())()"` where an
    /// incoming edge opens and an outgoing edge closes. A sibling pair is
    /// ordered with the incoming edge immediately after the outgoing one
    /// (`")("`), so an edge turns onto its own sibling only when no other
    /// outgoing edge is available; multiple copies alternate (`")()("`).
    ///
    /// `in_edge_ids` must be [`Graph::in_edge_ids`] or [`Graph::sibling_map`].
    ///
    /// `left_turn_map` is always filled for every edge. Edges with no left
    /// turn, and degenerate edges, are set to [`NO_EDGE`] and the first such
    /// problem is returned as the error; every other entry remains valid.
    pub fn left_turn_map(
        &self,
        in_edge_ids: &[EdgeId],
        left_turn_map: &mut Vec<EdgeId>,
    ) -> Result<(), BuilderError> {
        let n = self.edges.len();
        left_turn_map.clear();
        left_turn_map.resize(n, NO_EDGE);
        if n == 0 {
            return Ok(());
        }
        let mut error: Option<BuilderError> = None;

        // Reused for every vertex.
        let mut v0_edges: Vec<VertexEdge> = Vec::new();
        let mut e_in: Vec<EdgeId> = Vec::new();
        let mut e_out: Vec<EdgeId> = Vec::new();

        // Merge-join the outgoing edges (sorted by origin) with the reversed
        // incoming edges (sorted by destination) to visit every vertex once.
        let nv = self.num_vertices();
        let sentinel: Edge = (nv, nv);
        let out_at = |i: usize| if i < n { self.edges[i] } else { sentinel };
        let in_at = |i: usize| {
            if i < n {
                reverse(self.edge(in_edge_ids[i]))
            } else {
                sentinel
            }
        };
        let (mut out, mut inn) = (0usize, 0usize);
        let mut min_edge = out_at(out).min(in_at(inn));
        while min_edge != sentinel {
            let v0 = min_edge.0;
            while min_edge.0 == v0 {
                let v1 = min_edge.1;
                let (out_begin, in_begin) = (out, inn);
                while out_at(out) == min_edge {
                    out += 1;
                }
                while in_at(inn) == min_edge {
                    inn += 1;
                }
                if v1 != v0 {
                    add_vertex_edges(out_begin, out, in_begin, inn, v1, &mut v0_edges);
                } else if error.is_none() {
                    error = Some(BuilderError::DegenerateEdge {
                        edge: out_begin as EdgeId,
                    });
                }
                min_edge = out_at(out).min(in_at(inn));
            }
            if v0_edges.is_empty() {
                continue;
            }

            // Sort clockwise around v0, starting from the first edge. Distinct
            // vertices at the same position are ordered by id.
            let min_endpoint = v0_edges[0].endpoint;
            let center = self.vertex(v0);
            let anchor = self.vertex(min_endpoint);
            v0_edges[1..].sort_by(|a, b| {
                if a.endpoint == b.endpoint {
                    return a.rank.cmp(&b.rank);
                }
                let (pa, pb) = (self.vertex(a.endpoint), self.vertex(b.endpoint));
                match (pa == anchor, pb == anchor) {
                    (true, true) => return a.endpoint.cmp(&b.endpoint),
                    (true, false) => return Ordering::Less,
                    (false, true) => return Ordering::Greater,
                    (false, false) => {}
                }
                if pa == pb {
                    a.endpoint.cmp(&b.endpoint)
                } else if ordered_ccw(pa, pb, anchor, center) {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            });

            // Match each outgoing edge with the closest preceding unmatched
            // incoming edge. Outgoing edges seen before any incoming edge
            // wrap around and are matched with whatever is left at the end.
            for ve in &v0_edges {
                if ve.incoming {
                    e_in.push(in_edge_ids[ve.index]);
                } else if let Some(e) = e_in.pop() {
                    left_turn_map[e as usize] = ve.index as EdgeId;
                } else {
                    e_out.push(ve.index as EdgeId);
                }
            }
            let wrapped = e_in.len().min(e_out.len());
            for (&e, &next) in e_in.iter().rev().zip(e_out.iter()) {
                left_turn_map[e as usize] = next;
            }
            e_in.truncate(e_in.len() - wrapped);
            if let Some(&edge) = e_in.first() {
                log::trace!(
                    "vertex {v0}: {} incoming edges have no left turn",
                    e_in.len()
                );
                if error.is_none() {
                    error = Some(BuilderError::UnmatchedEdge { edge, vertex: v0 });
                }
            }
            e_in.clear();
            e_out.clear();
            v0_edges.clear();
        }
        match error {
            Some(err) => {
                log::warn!("left turn routing failed: {err}");
                Err(err)
            }
            None => Ok(()),
        }
    }
}

/// Adds the edges between v0 and `v1` in alternating order, outgoing first,
/// so that sibling pairs read as ")(" in the matching step.
fn add_vertex_edges(
    mut out_begin: usize,
    out_end: usize,
    mut in_begin: usize,
    in_end: usize,
    v1: VertexId,
    v0_edges: &mut Vec<VertexEdge>,
) {
    let mut rank = 0;
    while in_begin < in_end || out_begin < out_end {
        if out_begin < out_end {
            v0_edges.push(VertexEdge {
                incoming: false,
                index: out_begin,
                endpoint: v1,
                rank,
            });
            rank += 1;
            out_begin += 1;
        }
        if in_begin < in_end {
            v0_edges.push(VertexEdge {
                incoming: true,
                index: in_begin,
                endpoint: v1,
                rank,
            });
            rank += 1;
            in_begin += 1;
        }
    }
}
