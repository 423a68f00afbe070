#![allow(dead_code)]
use s2_builder_graph::geometry::S2Point;
use s2_builder_graph::graph::{Edge, EdgeId, Graph, GraphData, GraphOptions};

/// `n` vertices evenly spaced on a small circle around the north pole.
/// No three of them lie on a common great circle.
pub fn circle_vertices(n: usize) -> Vec<S2Point> {
    (0..n)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / n.max(1) as f64;
            S2Point::from_coords(a.cos(), a.sin(), 0.5)
        })
        .collect()
}

/// Processes `input_edges` under `options` over `n` circle vertices.
pub fn build(options: GraphOptions, n: usize, input_edges: &[Edge]) -> GraphData {
    GraphData::build(options, circle_vertices(n), input_edges).unwrap()
}

/// Closed walk through `cycle`, as directed edges.
pub fn cycle_edges(cycle: &[i32]) -> Vec<Edge> {
    (0..cycle.len())
        .map(|i| (cycle[i], cycle[(i + 1) % cycle.len()]))
        .collect()
}

/// Consecutive edges of `edge_loop` share endpoints, including the wrap.
pub fn assert_closed(g: &Graph<'_>, edge_loop: &[EdgeId]) {
    assert!(!edge_loop.is_empty(), "empty loop");
    for (i, &e) in edge_loop.iter().enumerate() {
        let next = edge_loop[(i + 1) % edge_loop.len()];
        assert_eq!(
            g.edge(e).1,
            g.edge(next).0,
            "loop {edge_loop:?} breaks after edge {e}"
        );
    }
}

/// Consecutive edges of `polyline` share endpoints.
pub fn assert_connected(g: &Graph<'_>, polyline: &[EdgeId]) {
    for w in polyline.windows(2) {
        assert_eq!(g.edge(w[0]).1, g.edge(w[1]).0, "polyline {polyline:?} is broken");
    }
}

/// Assert vec is a permutation of another vec (order-agnostic).
pub fn assert_permutation<T: Ord + Copy + std::fmt::Debug>(got: &[T], want: &[T]) {
    let mut a = got.to_vec();
    a.sort_unstable();
    let mut b = want.to_vec();
    b.sort_unstable();
    assert_eq!(a, b, "not a permutation\n got={:?}\nwant={:?}", got, want);
}

/// Every edge id of `g`, in order.
pub fn all_edges(g: &Graph<'_>) -> Vec<EdgeId> {
    (0..g.num_edges()).collect()
}
