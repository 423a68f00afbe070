//! Loop and component assembly on top of the left-turn map.
//!
//! Every assembler walks the graph by repeatedly taking left turns, marking
//! edges as consumed by overwriting their left-turn entry with a negative
//! value. Output edge and chain order is canonicalized against the minimum
//! input edge ids so that re-snapping the same input reproduces it.

use std::cmp::Ordering;

use crate::builder_error::BuilderError;

use super::{
    DegenerateEdges, DirectedComponent, EdgeId, EdgeLoop, EdgeType, Graph, InputEdgeId,
    SiblingPairs, UndirectedComponent,
};

/// Where a loop is closed while following left turns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoopType {
    /// Close a loop at the first repeated vertex.
    Simple,
    /// Close a loop at the first repeated edge; vertices may repeat.
    Circuit,
}

/// Whether zero-area filaments made of sibling pairs are kept in the loops
/// produced by [`Graph::directed_components`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DegenerateBoundaries {
    Discard,
    Keep,
}

/// Left-turn entry of an edge consumed while building complement `slot`.
#[inline]
fn used_in_slot(slot: usize) -> EdgeId {
    -1 - slot as EdgeId
}

/// Smallest start offset of the lexicographically least rotation of `s`.
fn least_rotation<T: Ord>(s: &[T]) -> usize {
    let n = s.len();
    let (mut i, mut j, mut k) = (0, 1, 0);
    while i < n && j < n && k < n {
        match s[(i + k) % n].cmp(&s[(j + k) % n]) {
            Ordering::Equal => {
                k += 1;
                continue;
            }
            Ordering::Greater => i += k + 1,
            Ordering::Less => j += k + 1,
        }
        if i == j {
            j += 1;
        }
        k = 0;
    }
    i.min(j)
}

impl Graph<'_> {
    /// Rotates `edge_loop` so that the edge(s) with the largest minimum input
    /// edge id come last.
    ///
    /// When an input edge was split into several pieces by snapping, the run
    /// of pieces sharing the largest id is kept together, with the rotation
    /// point after the last piece in cyclic order. For example the id
    /// sequence `(7, 7, 4, 5, 6, 7)` becomes `(4, 5, 6, 7, 7, 7)`.
    ///
    /// If the largest id occurs in several separate runs, the rotation whose
    /// id sequence is lexicographically smallest wins, preferring the current
    /// start on ties. The result depends only on the cyclic id sequence, so
    /// canonicalizing twice is the same as canonicalizing once. Runs in
    /// linear time.
    pub fn canonicalize_loop_order(min_input_ids: &[InputEdgeId], edge_loop: &mut [EdgeId]) {
        let n = edge_loop.len();
        let Some(max_id) = edge_loop.iter().map(|&e| min_input_ids[e as usize]).max() else {
            return;
        };
        // Candidate starts follow the last edge of a run of `max_id`. Tagging
        // every other position as greater makes the least rotation of the
        // tagged sequence the least candidate rotation: past the first
        // position, the tag only differs where the ids already do, and in
        // the same direction.
        let ids: Vec<InputEdgeId> = edge_loop.iter().map(|&e| min_input_ids[e as usize]).collect();
        let tokens: Vec<(bool, InputEdgeId)> = (0..n)
            .map(|i| {
                let prev = ids[(i + n - 1) % n];
                let candidate = prev == max_id && ids[i] != max_id;
                (!candidate, ids[i])
            })
            .collect();
        edge_loop.rotate_left(least_rotation(&tokens));
    }

    /// Sorts chains (loops or polylines) by the minimum input edge id of
    /// their first edge. The sort is stable. Every chain must be non-empty.
    pub fn canonicalize_vector_order(min_input_ids: &[InputEdgeId], chains: &mut [Vec<EdgeId>]) {
        chains.sort_by_key(|chain| min_input_ids[chain[0] as usize]);
    }

    /// Builds loops from directed edges by turning left at every vertex
    /// until a repeated vertex ([`LoopType::Simple`]) or a repeated edge
    /// ([`LoopType::Circuit`]) closes the loop.
    ///
    /// Loops are appended to `loops`. If left-turn routing fails the error is
    /// returned and `loops` is left as it was.
    ///
    /// REQUIRES: degenerate edges discarded, directed edges.
    pub fn directed_loops(
        &self,
        loop_type: LoopType,
        loops: &mut Vec<EdgeLoop>,
    ) -> Result<(), BuilderError> {
        debug_assert!(matches!(
            self.options.degenerate_edges,
            DegenerateEdges::Discard | DegenerateEdges::DiscardExcess
        ));
        debug_assert_eq!(self.options.edge_type, EdgeType::Directed);

        let mut left_turn_map = Vec::new();
        self.left_turn_map(&self.in_edge_ids(), &mut left_turn_map)?;
        let min_input_ids = self.min_input_edge_ids();

        // Vertex -> position in `path`, for peeling off simple loops.
        let mut path_index: Vec<i32> = match loop_type {
            LoopType::Simple => vec![-1; self.vertices.len()],
            LoopType::Circuit => Vec::new(),
        };
        let first_new = loops.len();
        let mut path: Vec<EdgeId> = Vec::new();
        for start in 0..self.num_edges() {
            if left_turn_map[start as usize] < 0 {
                continue;
            }
            let mut e = start;
            while left_turn_map[e as usize] >= 0 {
                path.push(e);
                let next = left_turn_map[e as usize];
                left_turn_map[e as usize] = -1;
                if loop_type == LoopType::Simple {
                    let (v0, v1) = self.edge(e);
                    path_index[v0 as usize] = path.len() as i32 - 1;
                    let loop_start = path_index[v1 as usize];
                    if loop_start >= 0 {
                        let mut edge_loop = path.split_off(loop_start as usize);
                        for &e2 in &edge_loop {
                            path_index[self.edge(e2).0 as usize] = -1;
                        }
                        Self::canonicalize_loop_order(&min_input_ids, &mut edge_loop);
                        loops.push(edge_loop);
                    }
                }
                e = next;
            }
            match loop_type {
                LoopType::Simple => debug_assert!(path.is_empty()),
                LoopType::Circuit => {
                    Self::canonicalize_loop_order(&min_input_ids, &mut path);
                    loops.push(std::mem::take(&mut path));
                }
            }
        }
        Self::canonicalize_vector_order(&min_input_ids, &mut loops[first_new..]);
        log::debug!(
            "assembled {} directed loops from {} edges",
            loops.len() - first_new,
            self.num_edges()
        );
        Ok(())
    }

    /// Builds circuits from directed edges and groups them into components
    /// of loops connected through shared vertices.
    ///
    /// With [`DegenerateBoundaries::Discard`], sibling pairs that would form
    /// zero-area filaments are removed from the loops; loops (and
    /// components) left empty are dropped.
    ///
    /// REQUIRES: degenerate edges discarded, sibling pairs required or
    /// created (which implies directed edges).
    pub fn directed_components(
        &self,
        degenerate_boundaries: DegenerateBoundaries,
        components: &mut Vec<DirectedComponent>,
    ) -> Result<(), BuilderError> {
        debug_assert!(
            self.options.degenerate_edges == DegenerateEdges::Discard
                || (self.options.degenerate_edges == DegenerateEdges::DiscardExcess
                    && degenerate_boundaries == DegenerateBoundaries::Keep)
        );
        debug_assert!(matches!(
            self.options.sibling_pairs,
            SiblingPairs::Require | SiblingPairs::Create
        ));
        debug_assert_eq!(self.options.edge_type, EdgeType::Directed);

        let mut sibling_map = self.in_edge_ids();
        let mut left_turn_map = Vec::new();
        self.left_turn_map(&sibling_map, &mut left_turn_map)?;
        self.make_sibling_map(&mut sibling_map);
        let min_input_ids = self.min_input_edge_ids();
        let discard = degenerate_boundaries == DegenerateBoundaries::Discard;

        // Edge -> position in `path`, only used when discarding filaments.
        let mut path_index: Vec<i32> = if discard {
            vec![-1; self.edges.len()]
        } else {
            Vec::new()
        };
        let first_new = components.len();
        let mut frontier: Vec<EdgeId> = Vec::new();
        for min_start in 0..self.num_edges() {
            if left_turn_map[min_start as usize] < 0 {
                continue;
            }
            let mut component: DirectedComponent = Vec::new();
            frontier.push(min_start);
            while let Some(start) = frontier.pop() {
                if left_turn_map[start as usize] < 0 {
                    continue;
                }
                let mut path: Vec<EdgeId> = Vec::new();
                let mut e = start;
                while left_turn_map[e as usize] >= 0 {
                    path.push(e);
                    let next = left_turn_map[e as usize];
                    left_turn_map[e as usize] = -1;
                    let sibling = sibling_map[e as usize];
                    if left_turn_map[sibling as usize] >= 0 {
                        frontier.push(sibling);
                    }
                    if discard {
                        path_index[e as usize] = path.len() as i32 - 1;
                        let sibling_index = path_index[sibling as usize];
                        if sibling_index >= 0 {
                            let sibling_index = sibling_index as usize;
                            if sibling_index + 2 == path.len() {
                                // Adjacent sibling pair; both edges are used.
                                path.truncate(sibling_index);
                            } else {
                                let mut edge_loop = path[sibling_index + 1..path.len() - 1].to_vec();
                                path.truncate(sibling_index);
                                for &e2 in &edge_loop {
                                    path_index[e2 as usize] = -1;
                                }
                                Self::canonicalize_loop_order(&min_input_ids, &mut edge_loop);
                                component.push(edge_loop);
                            }
                        }
                    }
                    e = next;
                }
                if discard {
                    for &e2 in &path {
                        path_index[e2 as usize] = -1;
                    }
                }
                if !path.is_empty() {
                    Self::canonicalize_loop_order(&min_input_ids, &mut path);
                    component.push(path);
                }
            }
            if !component.is_empty() {
                Self::canonicalize_vector_order(&min_input_ids, &mut component);
                components.push(component);
            }
        }
        components[first_new..].sort_by_key(|c| min_input_ids[c[0][0] as usize]);
        log::debug!(
            "assembled {} directed components from {} edges",
            components.len() - first_new,
            self.num_edges()
        );
        Ok(())
    }

    /// Builds loops from undirected edges and splits each connected
    /// component into two complements, so that every edge in one complement
    /// has its sibling in the other.
    ///
    /// Components are appended to `components` as they are completed. If a
    /// sibling pair ends up in the same complement the edges do not form
    /// loops; the error is returned and the component in progress is
    /// discarded.
    ///
    /// REQUIRES: degenerate edges discarded, undirected edges.
    pub fn undirected_components(
        &self,
        loop_type: LoopType,
        components: &mut Vec<UndirectedComponent>,
    ) -> Result<(), BuilderError> {
        debug_assert!(matches!(
            self.options.degenerate_edges,
            DegenerateEdges::Discard | DegenerateEdges::DiscardExcess
        ));
        debug_assert_eq!(self.options.edge_type, EdgeType::Undirected);

        let mut sibling_map = self.in_edge_ids();
        let mut left_turn_map = Vec::new();
        self.left_turn_map(&sibling_map, &mut left_turn_map)?;
        self.make_sibling_map(&mut sibling_map);
        let min_input_ids = self.min_input_edge_ids();

        // Unexplored siblings, each tagged with the complement it joins.
        let mut frontier: Vec<(EdgeId, usize)> = Vec::new();
        let mut path_index: Vec<i32> = match loop_type {
            LoopType::Simple => vec![-1; self.vertices.len()],
            LoopType::Circuit => Vec::new(),
        };
        let first_new = components.len();
        for min_start in 0..self.num_edges() {
            if left_turn_map[min_start as usize] < 0 {
                continue;
            }
            let mut component: UndirectedComponent = [Vec::new(), Vec::new()];
            frontier.push((min_start, 0));
            while let Some((start, slot)) = frontier.pop() {
                if left_turn_map[start as usize] < 0 {
                    continue;
                }
                let mut path: Vec<EdgeId> = Vec::new();
                let mut e = start;
                while left_turn_map[e as usize] >= 0 {
                    path.push(e);
                    let next = left_turn_map[e as usize];
                    left_turn_map[e as usize] = used_in_slot(slot);
                    let sibling = sibling_map[e as usize];
                    let sibling_turn = left_turn_map[sibling as usize];
                    if sibling_turn >= 0 {
                        frontier.push((sibling, 1 - slot));
                    } else if sibling_turn == used_in_slot(slot) {
                        let err = BuilderError::SiblingInSameComplement { edge: e };
                        log::warn!("undirected assembly failed: {err}");
                        return Err(err);
                    }
                    if loop_type == LoopType::Simple {
                        let (v0, v1) = self.edge(e);
                        path_index[v0 as usize] = path.len() as i32 - 1;
                        let loop_start = path_index[v1 as usize];
                        if loop_start >= 0 {
                            let mut edge_loop = path.split_off(loop_start as usize);
                            for &e2 in &edge_loop {
                                path_index[self.edge(e2).0 as usize] = -1;
                            }
                            Self::canonicalize_loop_order(&min_input_ids, &mut edge_loop);
                            component[slot].push(edge_loop);
                        }
                    }
                    e = next;
                }
                match loop_type {
                    LoopType::Simple => debug_assert!(path.is_empty()),
                    LoopType::Circuit => {
                        Self::canonicalize_loop_order(&min_input_ids, &mut path);
                        component[slot].push(path);
                    }
                }
            }
            for complement in component.iter_mut() {
                Self::canonicalize_vector_order(&min_input_ids, complement);
            }
            components.push(component);
        }
        components[first_new..].sort_by_key(|c| min_input_ids[c[0][0][0] as usize]);
        log::debug!(
            "assembled {} undirected components from {} edges",
            components.len() - first_new,
            self.num_edges()
        );
        Ok(())
    }
}
