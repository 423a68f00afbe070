//! Edge preprocessing: turns the raw snapped edge multiset into the sorted,
//! policy-conforming edge table a [`Graph`] is built over.

use crate::builder_error::BuilderError;
use crate::lexicon::IdSetLexicon;

use super::{
    DegenerateEdges, DuplicateEdges, Edge, EdgeId, EdgeType, Graph, GraphOptions,
    InputEdgeIdSetId, SiblingPairs, reverse,
};

impl Graph<'_> {
    /// Transforms an unsorted edge multiset according to `options`:
    /// degenerate edges are discarded or kept, duplicates merged, and
    /// sibling pairs discarded, required or created. The result is sorted
    /// lexicographically with ties in original order, and `input_ids` is
    /// rewritten in parallel. Merged edges carry the union of their input
    /// edge id sets, interned in `lexicon`.
    ///
    /// Undirected input must already be split into pairs of directed edges.
    ///
    /// With [`SiblingPairs::Require`] or [`SiblingPairs::Create`],
    /// `options.edge_type` becomes [`EdgeType::Directed`] and undirected
    /// sibling pairs are collapsed to one directed edge per direction.
    ///
    /// On `Err` the edge table has still been fully processed; only the
    /// first missing sibling is reported.
    pub fn process_edges(
        options: &mut GraphOptions,
        edges: &mut Vec<Edge>,
        input_ids: &mut Vec<InputEdgeIdSetId>,
        lexicon: &mut IdSetLexicon,
    ) -> Result<(), BuilderError> {
        debug_assert_eq!(edges.len(), input_ids.len());
        let num_input = edges.len();
        let result = EdgeProcessor::new(*options, edges, input_ids, lexicon).run();
        if matches!(
            options.sibling_pairs,
            SiblingPairs::Require | SiblingPairs::Create
        ) {
            options.edge_type = EdgeType::Directed;
        }
        log::debug!("processed {num_input} edges into {}", edges.len());
        if let Err(err) = &result {
            log::warn!("edge processing: {err}");
        }
        result
    }
}

struct EdgeProcessor<'p> {
    options: GraphOptions,
    edges: &'p mut Vec<Edge>,
    input_ids: &'p mut Vec<InputEdgeIdSetId>,
    lexicon: &'p mut IdSetLexicon,
    /// Edge ids sorted by (edge, id).
    out_edges: Vec<EdgeId>,
    /// Edge ids sorted by (reversed edge, id).
    in_edges: Vec<EdgeId>,
    new_edges: Vec<Edge>,
    new_input_ids: Vec<InputEdgeIdSetId>,
}

impl<'p> EdgeProcessor<'p> {
    fn new(
        options: GraphOptions,
        edges: &'p mut Vec<Edge>,
        input_ids: &'p mut Vec<InputEdgeIdSetId>,
        lexicon: &'p mut IdSetLexicon,
    ) -> Self {
        // Ties are broken by id so that each undirected edge becomes a
        // sibling pair even when identical input edges are present.
        let mut out_edges: Vec<EdgeId> = (0..edges.len() as EdgeId).collect();
        out_edges.sort_unstable_by_key(|&e| (edges[e as usize], e));
        let mut in_edges = out_edges.clone();
        in_edges.sort_unstable_by_key(|&e| (reverse(edges[e as usize]), e));
        let n = edges.len();
        Self {
            options,
            edges,
            input_ids,
            lexicon,
            out_edges,
            in_edges,
            new_edges: Vec::with_capacity(n),
            new_input_ids: Vec::with_capacity(n),
        }
    }

    fn out_edge(&self, i: usize) -> Edge {
        self.edges[self.out_edges[i] as usize]
    }

    fn in_edge(&self, i: usize) -> Edge {
        self.edges[self.in_edges[i] as usize]
    }

    fn add_edges(&mut self, count: usize, edge: Edge, input_id: InputEdgeIdSetId) {
        for _ in 0..count {
            self.new_edges.push(edge);
            self.new_input_ids.push(input_id);
        }
    }

    fn copy_edges(&mut self, out_begin: usize, out_end: usize) {
        for i in out_begin..out_end {
            let e = self.out_edges[i] as usize;
            self.new_edges.push(self.edges[e]);
            self.new_input_ids.push(self.input_ids[e]);
        }
    }

    /// Union of the input id sets of `out_edges[out_begin..out_end]`.
    fn merge_input_ids(&mut self, out_begin: usize, out_end: usize) -> InputEdgeIdSetId {
        if out_end - out_begin == 1 {
            return self.input_ids[self.out_edges[out_begin] as usize];
        }
        let merged: Vec<i32> = self.out_edges[out_begin..out_end]
            .iter()
            .flat_map(|&e| self.lexicon.id_set(self.input_ids[e as usize]))
            .collect();
        self.lexicon.add(merged)
    }

    /// True if vertex `v` has an incident edge other than the degenerate
    /// run `out_edges[out_begin..out_end]` / `in_edges[in_begin..in_end]`.
    fn has_other_incident_edges(
        &self,
        v: i32,
        (out_begin, out_end): (usize, usize),
        (in_begin, in_end): (usize, usize),
    ) -> bool {
        let n = self.edges.len();
        (out_begin > 0 && self.out_edge(out_begin - 1).0 == v)
            || (out_end < n && self.out_edge(out_end).0 == v)
            || (in_begin > 0 && self.in_edge(in_begin - 1).1 == v)
            || (in_end < n && self.in_edge(in_end).1 == v)
    }

    fn run(mut self) -> Result<(), BuilderError> {
        let n = self.edges.len();
        if n == 0 {
            return Ok(());
        }
        let mut error: Option<BuilderError> = None;
        let options = self.options;
        let undirected = options.edge_type == EdgeType::Undirected;
        let guarantees_siblings = matches!(
            options.sibling_pairs,
            SiblingPairs::Require | SiblingPairs::Create
        );

        // Merge-join the outgoing and (reversed) incoming orderings, so each
        // distinct edge is visited once with its copies in both directions.
        let sentinel: Edge = (i32::MAX, i32::MAX);
        let out_at = |p: &Self, i: usize| if i < n { p.out_edge(i) } else { sentinel };
        let in_at = |p: &Self, i: usize| if i < n { reverse(p.in_edge(i)) } else { sentinel };
        let (mut out, mut inn) = (0usize, 0usize);
        loop {
            let edge = out_at(&self, out).min(in_at(&self, inn));
            if edge == sentinel {
                break;
            }
            let (out_begin, in_begin) = (out, inn);
            while out_at(&self, out) == edge {
                out += 1;
            }
            while in_at(&self, inn) == edge {
                inn += 1;
            }
            let n_out = out - out_begin;
            let n_in = inn - in_begin;

            if edge.0 == edge.1 {
                debug_assert_eq!(n_out, n_in);
                match options.degenerate_edges {
                    DegenerateEdges::Discard => continue,
                    DegenerateEdges::DiscardExcess
                        if self.has_other_incident_edges(
                            edge.0,
                            (out_begin, out),
                            (in_begin, inn),
                        ) =>
                    {
                        continue;
                    }
                    _ => {}
                }
                // Excess discarding also merges the surviving copies.
                let merge = options.duplicate_edges == DuplicateEdges::Merge
                    || options.degenerate_edges == DegenerateEdges::DiscardExcess;
                if undirected && guarantees_siblings {
                    // Undirected pairs collapse to a single directed edge.
                    debug_assert_eq!(n_out % 2, 0);
                    let id = self.merge_input_ids(out_begin, out);
                    self.add_edges(if merge { 1 } else { n_out / 2 }, edge, id);
                } else if merge {
                    let id = self.merge_input_ids(out_begin, out);
                    self.add_edges(if undirected { 2 } else { 1 }, edge, id);
                } else if options.sibling_pairs == SiblingPairs::Discard {
                    // Discarding siblings merges the labels of all copies.
                    let id = self.merge_input_ids(out_begin, out);
                    self.add_edges(n_out, edge, id);
                } else {
                    self.copy_edges(out_begin, out);
                }
                continue;
            }

            match options.sibling_pairs {
                SiblingPairs::Keep => {
                    if n_out > 1 && options.duplicate_edges == DuplicateEdges::Merge {
                        let id = self.merge_input_ids(out_begin, out);
                        self.add_edges(1, edge, id);
                    } else {
                        self.copy_edges(out_begin, out);
                    }
                }
                SiblingPairs::Discard if !undirected => {
                    // Only the copies in excess of the reverse direction
                    // survive, e.g. AB, AB, BA leaves one AB.
                    if n_out <= n_in {
                        continue;
                    }
                    let count = if options.duplicate_edges == DuplicateEdges::Merge {
                        1
                    } else {
                        n_out - n_in
                    };
                    let id = self.merge_input_ids(out_begin, out);
                    self.add_edges(count, edge, id);
                }
                SiblingPairs::Discard => {
                    if n_out % 2 == 0 {
                        continue;
                    }
                    let id = self.merge_input_ids(out_begin, out);
                    self.add_edges(1, edge, id);
                }
                SiblingPairs::Require | SiblingPairs::Create => {
                    let missing = if undirected {
                        n_out % 2 != 0
                    } else {
                        n_out != n_in
                    };
                    if options.sibling_pairs == SiblingPairs::Require
                        && missing
                        && error.is_none()
                    {
                        error = Some(BuilderError::MissingSiblings);
                    }
                    if options.duplicate_edges == DuplicateEdges::Merge {
                        let id = self.merge_input_ids(out_begin, out);
                        self.add_edges(1, edge, id);
                    } else if undirected {
                        let id = self.merge_input_ids(out_begin, out);
                        self.add_edges(n_out.div_ceil(2), edge, id);
                    } else {
                        self.copy_edges(out_begin, out);
                        if n_in > n_out {
                            // Created siblings have no input edges.
                            self.add_edges(n_in - n_out, edge, IdSetLexicon::empty_set_id());
                        }
                    }
                }
            }
        }
        *self.edges = std::mem::take(&mut self.new_edges);
        *self.input_ids = std::mem::take(&mut self.new_input_ids);
        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::EMPTY_SET_ID;

    fn process(
        mut options: GraphOptions,
        edges: &[Edge],
    ) -> (GraphOptions, Vec<Edge>, Vec<InputEdgeIdSetId>, IdSetLexicon, Result<(), BuilderError>) {
        let mut edges = edges.to_vec();
        let mut ids: Vec<InputEdgeIdSetId> = (0..edges.len() as i32).collect();
        let mut lexicon = IdSetLexicon::new();
        let result = Graph::process_edges(&mut options, &mut edges, &mut ids, &mut lexicon);
        (options, edges, ids, lexicon, result)
    }

    #[test]
    fn sorts_with_stable_ties() {
        let (_, edges, ids, _, result) = process(GraphOptions::default(), &[(1, 0), (0, 1), (0, 1)]);
        result.unwrap();
        assert_eq!(edges, vec![(0, 1), (0, 1), (1, 0)]);
        assert_eq!(ids, vec![1, 2, 0]);
    }

    #[test]
    fn merge_unions_input_ids() {
        let options = GraphOptions::default().with_duplicate_edges(DuplicateEdges::Merge);
        let (_, edges, ids, lexicon, result) = process(options, &[(0, 1), (1, 2), (0, 1)]);
        result.unwrap();
        assert_eq!(edges, vec![(0, 1), (1, 2)]);
        assert_eq!(lexicon.id_set(ids[0]).to_vec(), vec![0, 2]);
        assert_eq!(ids[1], 1);
    }

    #[test]
    fn degenerate_policies() {
        let input = [(0, 0), (1, 1), (1, 2)];
        let discard = GraphOptions::default().with_degenerate_edges(DegenerateEdges::Discard);
        assert_eq!(process(discard, &input).1, vec![(1, 2)]);

        // (1,1) touches another edge at vertex 1; (0,0) is isolated.
        let excess = GraphOptions::default().with_degenerate_edges(DegenerateEdges::DiscardExcess);
        assert_eq!(process(excess, &input).1, vec![(0, 0), (1, 2)]);

        assert_eq!(process(GraphOptions::default(), &input).1, input.to_vec());
    }

    #[test]
    fn discard_excess_merges_isolated_copies() {
        let options = GraphOptions::default().with_degenerate_edges(DegenerateEdges::DiscardExcess);
        let (_, edges, ids, lexicon, _) = process(options, &[(3, 3), (3, 3)]);
        assert_eq!(edges, vec![(3, 3)]);
        assert_eq!(lexicon.id_set(ids[0]).to_vec(), vec![0, 1]);
    }

    #[test]
    fn directed_siblings_cancel() {
        let options = GraphOptions::default().with_sibling_pairs(SiblingPairs::Discard);
        let (_, edges, ids, lexicon, _) = process(options, &[(0, 1), (1, 0), (0, 1), (0, 1), (1, 2)]);
        assert_eq!(edges, vec![(0, 1), (0, 1), (1, 2)]);
        // Surviving copies share the merged ids of every (0,1) copy.
        assert_eq!(ids[0], ids[1]);
        assert_eq!(lexicon.id_set(ids[0]).to_vec(), vec![0, 2, 3]);
    }

    #[test]
    fn undirected_siblings_cancel_in_pairs() {
        let options = GraphOptions::default()
            .with_edge_type(EdgeType::Undirected)
            .with_sibling_pairs(SiblingPairs::Discard);
        // Two undirected copies of {0,1} cancel; one copy of {1,2} survives.
        let input = [(0, 1), (1, 0), (1, 0), (0, 1), (1, 2), (2, 1)];
        let (_, edges, _, _, _) = process(options, &input);
        assert_eq!(edges, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn require_reports_missing_sibling_but_processes() {
        let options = GraphOptions::default().with_sibling_pairs(SiblingPairs::Require);
        let (options, edges, _, _, result) = process(options, &[(0, 1), (1, 2), (2, 1)]);
        assert_eq!(result, Err(BuilderError::MissingSiblings));
        assert_eq!(edges, vec![(0, 1), (1, 0), (1, 2), (2, 1)]);
        assert_eq!(options.edge_type, EdgeType::Directed);
    }

    #[test]
    fn create_adds_unlabeled_sibling() {
        let options = GraphOptions::default().with_sibling_pairs(SiblingPairs::Create);
        let (_, edges, ids, _, result) = process(options, &[(0, 1)]);
        result.unwrap();
        assert_eq!(edges, vec![(0, 1), (1, 0)]);
        assert_eq!(ids, vec![0, EMPTY_SET_ID]);
    }

    #[test]
    fn undirected_create_becomes_directed() {
        let options = GraphOptions::default()
            .with_edge_type(EdgeType::Undirected)
            .with_sibling_pairs(SiblingPairs::Create);
        let (options, edges, ids, _, result) = process(options, &[(0, 1), (1, 0)]);
        result.unwrap();
        assert_eq!(options.edge_type, EdgeType::Directed);
        assert_eq!(edges, vec![(0, 1), (1, 0)]);
        assert_eq!(ids, vec![0, 1]);
    }

    #[test]
    fn empty_input_is_a_no_op() {
        let (_, edges, ids, _, result) = process(GraphOptions::default(), &[]);
        result.unwrap();
        assert!(edges.is_empty() && ids.is_empty());
    }
}
