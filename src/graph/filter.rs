//! Vertex filtering: drops vertices no edge touches.

use itertools::Itertools;

use crate::geometry::S2Point;

use super::{Edge, Graph, VertexId};

impl Graph<'_> {
    /// Removes every vertex with no incident edge and renumbers the edges to
    /// match. Vertex ids are not merged; survivors keep their relative
    /// order, so sorted edges stay sorted.
    ///
    /// `tmp` is scratch storage for the old-to-new vertex map. Reusing it
    /// across calls (one per output layer, say) keeps each call
    /// proportional to the edge count.
    pub fn filter_vertices(
        vertices: &[S2Point],
        edges: &mut [Edge],
        tmp: &mut Vec<VertexId>,
    ) -> Vec<S2Point> {
        let used: Vec<VertexId> = edges
            .iter()
            .flat_map(|&(v0, v1)| [v0, v1])
            .sorted_unstable()
            .dedup()
            .collect();

        let vmap = tmp;
        vmap.resize(vertices.len(), 0);
        let mut new_vertices = Vec::with_capacity(used.len());
        for (new_id, &old_id) in used.iter().enumerate() {
            new_vertices.push(vertices[old_id as usize]);
            vmap[old_id as usize] = new_id as VertexId;
        }
        for (v0, v1) in edges.iter_mut() {
            *v0 = vmap[*v0 as usize];
            *v1 = vmap[*v1 as usize];
        }
        log::debug!(
            "filtered {} vertices down to {}",
            vertices.len(),
            new_vertices.len()
        );
        new_vertices
    }
}
