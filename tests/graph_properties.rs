mod util;

use proptest::prelude::*;
use s2_builder_graph::graph::{
    DegenerateEdges, DuplicateEdges, Edge, EdgeType, Graph, GraphOptions, LoopType, SiblingPairs,
};
use s2_builder_graph::lexicon::IdSetLexicon;
use util::{all_edges, assert_closed, assert_permutation, build};

const NUM_VERTICES: i32 = 8;

/// Union of random closed walks without self-loops: every vertex ends up
/// with equal in- and outdegree, so left-turn routing always succeeds.
fn balanced_edges() -> impl Strategy<Value = Vec<Edge>> {
    let walk = prop::collection::vec(0..NUM_VERTICES, 2..7).prop_filter_map(
        "closed walk needs distinct consecutive vertices",
        |cycle| {
            let n = cycle.len();
            let edges: Vec<Edge> = (0..n).map(|i| (cycle[i], cycle[(i + 1) % n])).collect();
            edges.iter().all(|&(a, b)| a != b).then_some(edges)
        },
    );
    prop::collection::vec(walk, 1..4).prop_map(|walks| walks.concat())
}

fn any_edges() -> impl Strategy<Value = Vec<Edge>> {
    prop::collection::vec((0..NUM_VERTICES, 0..NUM_VERTICES), 0..24)
}

fn any_options() -> impl Strategy<Value = GraphOptions> {
    (
        prop_oneof![Just(EdgeType::Directed), Just(EdgeType::Undirected)],
        prop_oneof![
            Just(DegenerateEdges::Discard),
            Just(DegenerateEdges::DiscardExcess),
            Just(DegenerateEdges::Keep)
        ],
        prop_oneof![Just(DuplicateEdges::Merge), Just(DuplicateEdges::Keep)],
        prop_oneof![
            Just(SiblingPairs::Discard),
            Just(SiblingPairs::Keep),
            Just(SiblingPairs::Require),
            Just(SiblingPairs::Create)
        ],
    )
        .prop_map(|(t, d, u, s)| GraphOptions::new(t, d, u, s))
}

proptest! {
    #[test]
    fn sibling_map_is_an_involution(input in any_edges()) {
        let options = GraphOptions::default().with_edge_type(EdgeType::Undirected);
        let data = build(options, NUM_VERTICES as usize, &input);
        let g = data.graph();
        let sibling_map = g.sibling_map();
        for e in 0..g.num_edges() {
            let s = sibling_map[e as usize];
            prop_assert_eq!(sibling_map[s as usize], e);
            let (v0, v1) = g.edge(e);
            prop_assert_eq!(g.edge(s), (v1, v0));
        }
    }

    #[test]
    fn directed_loops_partition_edges(input in balanced_edges(), circuit in any::<bool>()) {
        let options = GraphOptions::default().with_degenerate_edges(DegenerateEdges::Discard);
        let data = build(options, NUM_VERTICES as usize, &input);
        let g = data.graph();
        let loop_type = if circuit { LoopType::Circuit } else { LoopType::Simple };
        let mut loops = Vec::new();
        g.directed_loops(loop_type, &mut loops).unwrap();
        for l in &loops {
            assert_closed(&g, l);
        }
        let total: usize = loops.iter().map(Vec::len).sum();
        prop_assert_eq!(total, g.num_edges() as usize);
        assert_permutation(&loops.concat(), &all_edges(&g));
    }

    #[test]
    fn process_edges_is_idempotent(input in any_edges(), options in any_options()) {
        let mut options = options;
        let mut edges = Vec::new();
        let mut ids = Vec::new();
        for (i, &(a, b)) in input.iter().enumerate() {
            edges.push((a, b));
            ids.push(i as i32);
            if options.edge_type == EdgeType::Undirected {
                edges.push((b, a));
                ids.push(IdSetLexicon::empty_set_id());
            }
        }
        let mut lexicon = IdSetLexicon::new();
        // Missing siblings are reported but the output is still complete.
        let _ = Graph::process_edges(&mut options, &mut edges, &mut ids, &mut lexicon);
        let (once_edges, once_ids) = (edges.clone(), ids.clone());
        let _ = Graph::process_edges(&mut options, &mut edges, &mut ids, &mut lexicon);
        prop_assert_eq!(edges, once_edges);
        prop_assert_eq!(ids, once_ids);
    }

    #[test]
    fn canonical_loop_order_is_idempotent(
        ids in prop::collection::vec(-1i32..6, 1..12),
        shift in 0usize..12,
    ) {
        let n = ids.len();
        let mut edge_loop: Vec<i32> = (0..n as i32).collect();
        edge_loop.rotate_left(shift % n);
        Graph::canonicalize_loop_order(&ids, &mut edge_loop);
        let once = edge_loop.clone();
        Graph::canonicalize_loop_order(&ids, &mut edge_loop);
        prop_assert_eq!(&edge_loop, &once);
        // The largest id closes the loop and does not also open it, unless
        // every id is the same.
        let max_id = *ids.iter().max().unwrap();
        let first = ids[edge_loop[0] as usize];
        prop_assert_eq!(ids[edge_loop[n - 1] as usize], max_id);
        prop_assert!(first != max_id || ids.iter().all(|&id| id == max_id));
        // Still a rotation of the original cycle.
        let start = edge_loop[0] as usize;
        for (i, &e) in edge_loop.iter().enumerate() {
            prop_assert_eq!(e as usize, (start + i) % n);
        }
    }
}
