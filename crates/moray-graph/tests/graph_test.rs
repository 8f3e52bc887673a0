use moray_graph::{EdgeId, Graph, VertexId};

fn edge_pairs(g: &Graph<&str, ()>) -> Vec<(usize, usize)> {
    g.edge_ids()
        .map(|e| {
            let er = g.edge(e);
            (er.from().index(), er.to().index())
        })
        .collect()
}

#[test]
fn vertices_and_edges_iterate_in_insertion_order() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");

    g.add_edge(b, c, 1, false, ());
    g.add_edge(a, b, 1, false, ());
    g.add_edge(a, c, 1, false, ());

    let vs: Vec<VertexId> = g.vertex_ids().collect();
    assert_eq!(vs, vec![a, b, c]);
    assert_eq!(edge_pairs(&g), vec![(1, 2), (0, 1), (0, 2)]);
}

#[test]
fn incidence_lists_are_stable_and_directional() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");

    let ab = g.add_edge(a, b, 1, false, ());
    let ac = g.add_edge(a, c, 1, false, ());
    let cb = g.add_edge(c, b, 1, false, ());

    assert_eq!(g.out_edges(a), &[ab, ac]);
    assert_eq!(g.in_edges(b), &[ab, cb]);
    assert_eq!(g.out_degree(a), 2);
    assert_eq!(g.in_degree(a), 0);
    assert_eq!(g.in_degree(b), 2);
}

#[test]
fn self_loop_appears_in_both_incidence_lists() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let aa = g.add_edge(a, a, 1, true, ());

    assert_eq!(g.out_edges(a), &[aa]);
    assert_eq!(g.in_edges(a), &[aa]);
    assert_eq!(g.edge(aa).from(), a);
    assert_eq!(g.edge(aa).to(), a);
}

#[test]
fn remove_edge_unlinks_without_reordering_survivors() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");

    let e1 = g.add_edge(a, b, 1, false, ());
    let e2 = g.add_edge(a, b, 2, false, ());
    let e3 = g.add_edge(a, b, 3, false, ());

    assert!(g.remove_edge(e2));
    assert!(!g.remove_edge(e2), "second removal is a no-op");

    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.out_edges(a), &[e1, e3]);
    assert_eq!(g.in_edges(b), &[e1, e3]);
    assert!(!g.contains_edge(e2));
    assert_eq!(g.edge_capacity(), 3, "slots are tombstoned, not recycled");
}

#[test]
fn remove_vertex_takes_incident_edges_with_it() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let c = g.add_vertex("c");

    let ab = g.add_edge(a, b, 1, false, ());
    let bc = g.add_edge(b, c, 1, false, ());
    let ca = g.add_edge(c, a, 1, false, ());

    assert!(g.remove_vertex(b));

    assert_eq!(g.vertex_count(), 2);
    assert_eq!(g.edge_count(), 1);
    assert!(!g.contains_edge(ab));
    assert!(!g.contains_edge(bc));
    assert!(g.contains_edge(ca));
    assert_eq!(g.vertex_ids().collect::<Vec<_>>(), vec![a, c]);
}

#[test]
fn edge_flags_and_weight_are_mutable() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");
    let b = g.add_vertex("b");
    let e: EdgeId = g.add_edge(a, b, 2, true, ());

    assert!(g.edge(e).cutable());
    assert!(!g.edge(e).cut());

    g.set_weight(e, 7);
    g.set_cutable(e, false);
    g.set_cut(e, true);

    assert_eq!(g.edge(e).weight(), 7);
    assert!(!g.edge(e).cutable());
    assert!(g.edge(e).cut());
}

#[test]
fn colors_and_ranks_default_to_zero() {
    let mut g: Graph<&str, ()> = Graph::new();
    let a = g.add_vertex("a");

    assert_eq!(g.color(a), 0);
    assert_eq!(g.rank(a), 0);

    g.set_color(a, 3);
    g.set_rank(a, 9);
    assert_eq!(g.color(a), 3);
    assert_eq!(g.rank(a), 9);
}
