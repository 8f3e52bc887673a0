use moray_graph::{alg, follow_always_true, follow_not_cutable, Graph};

#[test]
fn strongly_connected_leaves_a_dag_uncolored() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    g.add_edge(a, b, 1, false, ());
    g.add_edge(b, c, 1, false, ());
    g.add_edge(a, c, 1, false, ());

    let colors = alg::strongly_connected(&mut g, follow_always_true);
    assert_eq!(colors, 0);
    for v in [a, b, c] {
        assert_eq!(g.color(v), 0);
    }
}

#[test]
fn strongly_connected_colors_each_cycle_distinctly() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    let d = g.add_vertex("d");
    let e = g.add_vertex("e");
    g.add_edge(a, b, 1, false, ());
    g.add_edge(b, a, 1, false, ());
    g.add_edge(b, c, 1, false, ());
    g.add_edge(d, e, 1, false, ());
    g.add_edge(e, d, 1, false, ());

    let colors = alg::strongly_connected(&mut g, follow_always_true);
    assert_eq!(colors, 2);
    assert_ne!(g.color(a), 0);
    assert_eq!(g.color(a), g.color(b));
    assert_eq!(g.color(c), 0, "c is downstream of the cycle, not on it");
    assert_ne!(g.color(d), 0);
    assert_eq!(g.color(d), g.color(e));
    assert_ne!(g.color(a), g.color(d));
}

#[test]
fn strongly_connected_counts_a_self_loop_as_a_cycle() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    g.add_edge(a, a, 1, true, ());
    g.add_edge(a, b, 1, false, ());

    alg::strongly_connected(&mut g, follow_always_true);
    assert_ne!(g.color(a), 0);
    assert_eq!(g.color(b), 0);
}

#[test]
fn strongly_connected_ignores_zero_weight_and_filtered_edges() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    g.add_edge(a, b, 1, false, ());
    g.add_edge(b, a, 0, false, ());

    alg::strongly_connected(&mut g, follow_always_true);
    assert_eq!(g.color(a), 0, "zero-weight back edge closes no cycle");

    let c = g.add_vertex("c");
    let d = g.add_vertex("d");
    g.add_edge(c, d, 1, false, ());
    g.add_edge(d, c, 1, true, ());

    alg::strongly_connected(&mut g, follow_not_cutable);
    assert_eq!(g.color(c), 0, "the cutable back edge is filtered out");

    alg::strongly_connected(&mut g, follow_always_true);
    assert_ne!(g.color(c), 0);
    assert_eq!(g.color(c), g.color(d));
}

#[test]
fn strongly_connected_clears_stale_colors() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let ab = g.add_edge(a, b, 1, false, ());
    g.add_edge(b, a, 1, false, ());

    alg::strongly_connected(&mut g, follow_always_true);
    assert_ne!(g.color(a), 0);

    g.remove_edge(ab);
    alg::strongly_connected(&mut g, follow_always_true);
    assert_eq!(g.color(a), 0);
    assert_eq!(g.color(b), 0);
}

#[test]
fn rank_assigns_strictly_increasing_ranks_on_a_chain() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    g.add_edge(a, b, 1, false, ());
    g.add_edge(b, c, 1, false, ());

    assert!(alg::rank(&mut g, follow_always_true).is_ok());
    assert_eq!(g.rank(a), 1);
    assert_eq!(g.rank(b), 2);
    assert_eq!(g.rank(c), 3);
}

#[test]
fn rank_takes_the_longest_path_through_a_diamond() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    let d = g.add_vertex("d");
    g.add_edge(a, d, 1, false, ());
    g.add_edge(a, b, 1, false, ());
    g.add_edge(b, c, 1, false, ());
    g.add_edge(c, d, 1, false, ());

    assert!(alg::rank(&mut g, follow_always_true).is_ok());
    assert_eq!(g.rank(a), 1);
    assert_eq!(g.rank(d), 4);
}

#[test]
fn rank_fails_on_a_cycle_and_names_a_vertex_on_it() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    g.add_edge(a, b, 1, false, ());
    g.add_edge(b, c, 1, false, ());
    g.add_edge(c, b, 1, false, ());

    let err = alg::rank(&mut g, follow_always_true).unwrap_err();
    assert!(err.vertex == b || err.vertex == c);
}

#[test]
fn rank_succeeds_when_the_filter_breaks_the_cycle() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    g.add_edge(a, b, 1, false, ());
    g.add_edge(b, a, 1, true, ());

    assert!(alg::rank(&mut g, follow_always_true).is_err());
    assert!(alg::rank(&mut g, follow_not_cutable).is_ok());
    assert!(g.rank(a) < g.rank(b));
}

#[test]
fn report_loops_returns_the_cycle_through_the_start_vertex() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");
    g.add_edge(a, b, 1, false, ());
    g.add_edge(b, c, 1, false, ());
    g.add_edge(c, b, 1, false, ());

    let path = alg::report_loops(&g, follow_always_true, a);
    assert_eq!(path, vec![b, c]);
}

#[test]
fn report_loops_is_empty_when_nothing_cycles() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    g.add_edge(a, b, 1, false, ());

    assert!(alg::report_loops(&g, follow_always_true, a).is_empty());
}
