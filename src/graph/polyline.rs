//! Polyline assembly.

use hashbrown::HashMap;

use super::{
    DegenerateEdges, EdgeId, EdgePolyline, EdgeType, Graph, InputEdgeId, SiblingPairs,
    VertexId, VertexInMap, VertexOutMap,
};

/// Shape of the polylines built by [`Graph::polylines`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PolylineType {
    /// Only vertices of indegree and outdegree 1 (degree 2 for undirected
    /// edges) appear in the interior, so there is one polyline per chain.
    Path,
    /// Polylines may revisit vertices and duplicate edges and are made as
    /// long as possible.
    Walk,
}

impl Graph<'_> {
    /// Assembles every edge into polylines.
    ///
    /// For directed edges the input edge order is followed as closely as
    /// possible, so that snapping a polyline twice gives the same result.
    /// Undirected edges are assembled without regard to input direction.
    ///
    /// REQUIRES: degenerate edges discarded, sibling pairs discarded or kept.
    pub fn polylines(&self, polyline_type: PolylineType) -> Vec<EdgePolyline> {
        debug_assert_eq!(self.options.degenerate_edges, DegenerateEdges::Discard);
        debug_assert!(matches!(
            self.options.sibling_pairs,
            SiblingPairs::Discard | SiblingPairs::Keep
        ));
        let mut builder = PolylineBuilder::new(self);
        let polylines = match polyline_type {
            PolylineType::Path => builder.build_paths(),
            PolylineType::Walk => builder.build_walks(),
        };
        log::debug!(
            "assembled {} polylines ({polyline_type:?}) from {} edges",
            polylines.len(),
            self.num_edges()
        );
        polylines
    }
}

struct PolylineBuilder<'g, 'a> {
    g: &'g Graph<'a>,
    in_map: VertexInMap,
    out_map: VertexOutMap<'a>,
    sibling_map: Vec<EdgeId>,
    min_input_ids: Vec<InputEdgeId>,
    directed: bool,
    edges_left: usize,
    used: Vec<bool>,
    /// Outdegree minus indegree of each vertex, counting used edges only.
    excess_used: HashMap<VertexId, i32>,
}

impl<'g, 'a> PolylineBuilder<'g, 'a> {
    fn new(g: &'g Graph<'a>) -> Self {
        let in_map = VertexInMap::new(g);
        let directed = g.options.edge_type == EdgeType::Directed;
        let sibling_map = if directed {
            Vec::new()
        } else {
            let mut sibling_map = in_map.in_edge_ids().to_vec();
            g.make_sibling_map(&mut sibling_map);
            sibling_map
        };
        let num_edges = g.edges.len();
        Self {
            g,
            out_map: VertexOutMap::new(g),
            in_map,
            sibling_map,
            min_input_ids: g.min_input_edge_ids(),
            directed,
            edges_left: if directed { num_edges } else { num_edges / 2 },
            used: vec![false; num_edges],
            excess_used: HashMap::new(),
        }
    }

    fn is_interior(&self, v: VertexId) -> bool {
        if self.directed {
            self.in_map.degree(v) == 1 && self.out_map.degree(v) == 1
        } else {
            self.out_map.degree(v) == 2
        }
    }

    fn excess_degree(&self, v: VertexId) -> i32 {
        let out = self.out_map.degree(v) as i32;
        if self.directed {
            out - self.in_map.degree(v) as i32
        } else {
            out % 2
        }
    }

    fn excess_used(&self, v: VertexId) -> i32 {
        self.excess_used.get(&v).copied().unwrap_or(0)
    }

    fn mark_used(&mut self, e: EdgeId) {
        debug_assert!(!self.used[e as usize]);
        self.used[e as usize] = true;
        if !self.directed {
            self.used[self.sibling_map[e as usize] as usize] = true;
        }
        self.edges_left -= 1;
    }

    fn build_paths(&mut self) -> Vec<EdgePolyline> {
        // Start from every vertex that cannot be interior, visiting edges in
        // input order to keep the input direction of undirected chains.
        let mut polylines = Vec::new();
        let edges = self.g.input_edge_order(&self.min_input_ids);
        for &e in &edges {
            if !self.used[e as usize] && !self.is_interior(self.g.edge(e).0) {
                polylines.push(self.build_path(e));
            }
        }
        // Whatever is left forms closed chains. Rotate each so that a split
        // input edge does not straddle the start.
        for &e in &edges {
            if self.edges_left == 0 {
                break;
            }
            if self.used[e as usize] {
                continue;
            }
            let mut polyline = self.build_path(e);
            Graph::canonicalize_loop_order(&self.min_input_ids, &mut polyline);
            polylines.push(polyline);
        }
        debug_assert_eq!(self.edges_left, 0);
        Graph::canonicalize_vector_order(&self.min_input_ids, &mut polylines);
        polylines
    }

    /// Follows edges from `e` until a non-interior vertex or the start vertex.
    fn build_path(&mut self, mut e: EdgeId) -> EdgePolyline {
        let mut polyline = Vec::new();
        let start = self.g.edge(e).0;
        loop {
            polyline.push(e);
            self.mark_used(e);
            let v = self.g.edge(e).1;
            if !self.is_interior(v) || v == start {
                return polyline;
            }
            let mut next = None;
            for e2 in self.out_map.edge_ids(v) {
                if !self.used[e2 as usize] {
                    next = Some(e2);
                }
            }
            match next {
                Some(e2) => e = e2,
                None => return polyline,
            }
        }
    }

    fn build_walks(&mut self) -> Vec<EdgePolyline> {
        let mut polylines: Vec<EdgePolyline> = Vec::new();
        let edges = self.g.input_edge_order(&self.min_input_ids);

        // Start one walk for every unit of excess degree: outdegree above
        // indegree when directed, odd degree when undirected.
        for &e in &edges {
            if self.used[e as usize] {
                continue;
            }
            let v = self.g.edge(e).0;
            let mut excess = self.excess_degree(v);
            if excess <= 0 {
                continue;
            }
            excess -= self.excess_used(v);
            if (self.directed && excess <= 0) || (!self.directed && excess % 2 == 0) {
                continue;
            }
            *self.excess_used.entry(v).or_insert(0) += 1;
            let walk = self.build_walk(v);
            match walk.last() {
                Some(&last) => {
                    let end = self.g.edge(last).1;
                    *self.excess_used.entry(end).or_insert(0) -= 1;
                    polylines.push(walk);
                }
                None => *self.excess_used.entry(v).or_insert(0) -= 1,
            }
        }

        // Every vertex is now balanced, so the remaining edges form loops.
        // Splice them into the existing walks where they touch.
        if self.edges_left > 0 {
            for polyline in polylines.iter_mut() {
                self.maximize_walk(polyline);
            }
        }

        // Start the remaining loops where an input chain begins, or at a
        // degenerate edge, so that a split input edge does not straddle the
        // start of a closed walk.
        for (i, &e) in edges.iter().enumerate() {
            if self.edges_left == 0 {
                break;
            }
            if !self.used[e as usize] && self.starts_input_chain(&edges[i..]) {
                self.push_closed_walk(self.g.edge(e).0, &mut polylines);
            }
        }
        // Loops made of a single input chain have no chain start.
        for &e in &edges {
            if self.edges_left == 0 {
                break;
            }
            if !self.used[e as usize] {
                self.push_closed_walk(self.g.edge(e).0, &mut polylines);
            }
        }
        debug_assert_eq!(self.edges_left, 0);
        Graph::canonicalize_vector_order(&self.min_input_ids, &mut polylines);
        polylines
    }

    /// True if `edges[0]` is degenerate, or its origin is where the unused
    /// edges sharing its minimum input id begin: among the leading run of
    /// `edges` with that id, one more leaves the origin than enters it.
    /// `edges` must be in input edge order.
    fn starts_input_chain(&self, edges: &[EdgeId]) -> bool {
        let (v, v1) = self.g.edge(edges[0]);
        if v == v1 {
            return true;
        }
        let id = self.min_input_ids[edges[0] as usize];
        let mut excess = 0;
        for &e in edges
            .iter()
            .take_while(|&&e| self.min_input_ids[e as usize] == id)
        {
            if self.used[e as usize] {
                continue;
            }
            let (e0, e1) = self.g.edge(e);
            if e0 == v {
                excess += 1;
            }
            if e1 == v {
                excess -= 1;
            }
        }
        excess == 1
    }

    fn push_closed_walk(&mut self, v: VertexId, polylines: &mut Vec<EdgePolyline>) {
        let mut polyline = self.build_walk(v);
        if polyline.is_empty() {
            return;
        }
        self.maximize_walk(&mut polyline);
        polylines.push(polyline);
    }

    /// Walks from `v`, always taking the unused outgoing edge with the
    /// smallest input edge id.
    fn build_walk(&mut self, mut v: VertexId) -> EdgePolyline {
        let mut polyline = Vec::new();
        loop {
            let mut best: Option<(InputEdgeId, EdgeId)> = None;
            for e in self.out_map.edge_ids(v) {
                let id = self.min_input_ids[e as usize];
                if self.used[e as usize] || best.is_some_and(|(best_id, _)| id >= best_id) {
                    continue;
                }
                best = Some((id, e));
            }
            let Some((best_id, best_edge)) = best else {
                return polyline;
            };
            // If an unused incoming edge with a smaller id may still arrive
            // here, stop so that it can continue this walk instead.
            let excess = self.excess_degree(v) - self.excess_used(v);
            if (self.directed && excess < 0) || (!self.directed && excess % 2 == 1) {
                let waiting = self
                    .in_map
                    .edge_ids(v)
                    .iter()
                    .any(|&e| !self.used[e as usize] && self.min_input_ids[e as usize] <= best_id);
                if waiting {
                    return polyline;
                }
            }
            polyline.push(best_edge);
            self.mark_used(best_edge);
            v = self.g.edge(best_edge).1;
        }
    }

    /// Splices loops into `polyline` at every vertex that still has unused
    /// outgoing edges. Only valid once all vertices are balanced.
    fn maximize_walk(&mut self, polyline: &mut EdgePolyline) {
        let mut i = 0;
        while i <= polyline.len() {
            let v = if i == 0 {
                self.g.edge(polyline[0]).0
            } else {
                self.g.edge(polyline[i - 1]).1
            };
            let has_unused = self
                .out_map
                .edge_ids(v)
                .any(|e| !self.used[e as usize]);
            if has_unused {
                let edge_loop = self.build_walk(v);
                debug_assert!(edge_loop.last().is_none_or(|&e| self.g.edge(e).1 == v));
                polyline.splice(i..i, edge_loop);
            }
            i += 1;
        }
    }
}
