mod util;

use s2_builder_graph::builder_error::BuilderError;
use s2_builder_graph::graph::{
    DegenerateBoundaries, DegenerateEdges, EdgeType, GraphOptions, LoopType, SiblingPairs,
};
use util::{all_edges, assert_closed, assert_permutation, build, cycle_edges};

fn undirected() -> GraphOptions {
    GraphOptions::default()
        .with_edge_type(EdgeType::Undirected)
        .with_degenerate_edges(DegenerateEdges::Discard)
}

fn mesh() -> GraphOptions {
    GraphOptions::default()
        .with_degenerate_edges(DegenerateEdges::Discard)
        .with_sibling_pairs(SiblingPairs::Create)
}

#[test]
fn two_disjoint_triangles_give_two_components() {
    let mut input = cycle_edges(&[0, 1, 2]);
    input.extend(cycle_edges(&[3, 4, 5]));
    let data = build(undirected(), 6, &input);
    let g = data.graph();
    let sibling_map = g.sibling_map();

    for loop_type in [LoopType::Simple, LoopType::Circuit] {
        let mut components = Vec::new();
        g.undirected_components(loop_type, &mut components).unwrap();
        assert_eq!(components.len(), 2);
        for [a, b] in &components {
            assert_eq!(a.len(), 1);
            assert_eq!(b.len(), 1);
            assert_closed(&g, &a[0]);
            assert_closed(&g, &b[0]);
            for &e in a.concat().iter() {
                let s = sibling_map[e as usize];
                assert!(b.concat().contains(&s), "sibling of {e} not in the other complement");
            }
        }
        let every: Vec<_> = components.iter().flat_map(|c| c.concat()).flatten().collect();
        assert_permutation(&every, &all_edges(&g));
    }
}

#[test]
fn components_are_ordered_by_input() {
    let mut input = cycle_edges(&[3, 4, 5]);
    input.extend(cycle_edges(&[0, 1, 2]));
    let data = build(undirected(), 6, &input);
    let g = data.graph();
    let mut components = Vec::new();
    g.undirected_components(LoopType::Simple, &mut components)
        .unwrap();
    let first = components[0][0][0][0];
    assert!([3, 4, 5].contains(&g.edge(first).0));
}

#[test]
fn directed_triangle_with_created_siblings_is_one_component() {
    let data = build(mesh(), 3, &cycle_edges(&[0, 1, 2]));
    let g = data.graph();
    assert_eq!(g.num_edges(), 6);

    for boundaries in [DegenerateBoundaries::Keep, DegenerateBoundaries::Discard] {
        let mut components = Vec::new();
        g.directed_components(boundaries, &mut components).unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].len(), 2);
        for l in &components[0] {
            assert_eq!(l.len(), 3);
            assert_closed(&g, l);
        }
    }
}

#[test]
fn filaments_are_pruned_only_when_discarding() {
    // A triangle with a dangling spike 0 -> 3.
    let mut input = cycle_edges(&[0, 1, 2]);
    input.push((0, 3));
    let data = build(mesh(), 4, &input);
    let g = data.graph();
    assert_eq!(g.num_edges(), 8);

    let mut kept = Vec::new();
    g.directed_components(DegenerateBoundaries::Keep, &mut kept)
        .unwrap();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].concat().len(), 8);

    let mut pruned = Vec::new();
    g.directed_components(DegenerateBoundaries::Discard, &mut pruned)
        .unwrap();
    assert_eq!(pruned.len(), 1);
    let edges: Vec<_> = pruned[0].concat();
    assert_eq!(edges.len(), 6);
    for e in edges {
        let (v0, v1) = g.edge(e);
        assert!(v0 != 3 && v1 != 3);
    }
    for l in &pruned[0] {
        assert_closed(&g, l);
    }
}

#[test]
fn routing_failure_is_propagated() {
    // An isolated degenerate edge survives DiscardExcess but cannot be routed.
    let options = GraphOptions::default()
        .with_degenerate_edges(DegenerateEdges::DiscardExcess)
        .with_sibling_pairs(SiblingPairs::Create);
    let data = build(options, 4, &[(0, 1), (1, 2), (3, 3)]);
    let g = data.graph();
    assert_eq!(g.edge(g.num_edges() - 1), (3, 3));
    let mut components = Vec::new();
    let err = g
        .directed_components(DegenerateBoundaries::Keep, &mut components)
        .unwrap_err();
    assert_eq!(err, BuilderError::DegenerateEdge { edge: 4 });
    assert!(components.is_empty());
}
