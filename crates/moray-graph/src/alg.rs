//! Graph algorithms consumed by the acyclicity engine.
//!
//! All traversals here share one rule with the engine proper: an edge is
//! followed only when `weight > 0` **and** the caller's predicate accepts it.
//! Zero-weight edges exist for bookkeeping and never constrain ordering.

use std::collections::VecDeque;

use crate::{EdgeId, EdgeRef, Graph, VertexId};

/// Ranking failed because a cycle survives under the given edge filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("topological ranking failed: cycle through vertex v{}", .vertex.index())]
pub struct CycleError {
    /// First vertex (in insertion order) still caught in a cycle.
    pub vertex: VertexId,
}

fn follows<N, E>(g: &Graph<N, E>, follow: &impl Fn(EdgeRef<'_, E>) -> bool, e: EdgeId) -> bool {
    let er = g.edge(e);
    er.weight() > 0 && follow(er)
}

/// Color every vertex that participates in a cycle under `follow`.
///
/// Vertices in the same strongly-connected component share a color. Only
/// cycle-containing components count: an SCC of size one is colored only when
/// it carries a followed self-loop. Every other vertex is set to color `0`.
/// Returns the number of colors assigned.
///
/// Colors are numbered in component-completion order with roots visited in
/// insertion order, so the assignment is deterministic.
pub fn strongly_connected<N, E, F>(g: &mut Graph<N, E>, follow: F) -> u32
where
    F: Fn(EdgeRef<'_, E>) -> bool,
{
    struct Tarjan<'g, N, E, F> {
        g: &'g Graph<N, E>,
        follow: &'g F,
        next_index: u32,
        stack: Vec<VertexId>,
        on_stack: Vec<bool>,
        index_of: Vec<Option<u32>>,
        lowlink: Vec<u32>,
        sccs: Vec<Vec<VertexId>>,
    }

    impl<N, E, F> Tarjan<'_, N, E, F>
    where
        F: Fn(EdgeRef<'_, E>) -> bool,
    {
        fn strongconnect(&mut self, v: VertexId) {
            let vi = v.index();
            self.index_of[vi] = Some(self.next_index);
            self.lowlink[vi] = self.next_index;
            self.next_index += 1;
            self.stack.push(v);
            self.on_stack[vi] = true;

            for &e in self.g.out_edges(v) {
                if !follows(self.g, self.follow, e) {
                    continue;
                }
                let w = self.g.edge(e).to();
                let wi = w.index();
                if self.index_of[wi].is_none() {
                    self.strongconnect(w);
                    self.lowlink[vi] = self.lowlink[vi].min(self.lowlink[wi]);
                } else if self.on_stack[wi] {
                    if let Some(w_index) = self.index_of[wi] {
                        self.lowlink[vi] = self.lowlink[vi].min(w_index);
                    }
                }
            }

            if self.index_of[vi] == Some(self.lowlink[vi]) {
                let mut scc: Vec<VertexId> = Vec::new();
                loop {
                    let Some(w) = self.stack.pop() else {
                        debug_assert!(false, "tarjan stack underflow");
                        break;
                    };
                    self.on_stack[w.index()] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                self.sccs.push(scc);
            }
        }
    }

    let cap = g.vertex_capacity();
    let sccs = {
        let mut tarjan = Tarjan {
            g: &*g,
            follow: &follow,
            next_index: 0,
            stack: Vec::new(),
            on_stack: vec![false; cap],
            index_of: vec![None; cap],
            lowlink: vec![0; cap],
            sccs: Vec::new(),
        };
        let roots: Vec<VertexId> = tarjan.g.vertex_ids().collect();
        for v in roots {
            if tarjan.index_of[v.index()].is_none() {
                tarjan.strongconnect(v);
            }
        }
        tarjan.sccs
    };

    let order: Vec<VertexId> = g.vertex_ids().collect();
    for &v in &order {
        g.set_color(v, 0);
    }

    let mut colors = 0u32;
    for scc in sccs {
        let cyclic = scc.len() > 1
            || scc.first().is_some_and(|&v| {
                g.out_edges(v)
                    .iter()
                    .any(|&e| g.edge(e).to() == v && follows(g, &follow, e))
            });
        if !cyclic {
            continue;
        }
        colors += 1;
        for v in scc {
            g.set_color(v, colors);
        }
    }
    colors
}

/// Assign topological ranks over the edges accepted by `follow`.
///
/// Sources get rank 1; every followed edge `u -> v` ends with
/// `rank(u) < rank(v)`. Queue seeding and relaxation both run in insertion
/// order, so identical graphs yield identical ranks.
pub fn rank<N, E, F>(g: &mut Graph<N, E>, follow: F) -> Result<(), CycleError>
where
    F: Fn(EdgeRef<'_, E>) -> bool,
{
    let order: Vec<VertexId> = g.vertex_ids().collect();
    let mut indegree = vec![0u32; g.vertex_capacity()];
    for &v in &order {
        g.set_rank(v, 0);
        for &e in g.in_edges(v) {
            if follows(g, &follow, e) {
                indegree[v.index()] += 1;
            }
        }
    }

    let mut queue: VecDeque<VertexId> = order
        .iter()
        .copied()
        .filter(|v| indegree[v.index()] == 0)
        .collect();
    for &v in &queue {
        g.set_rank(v, 1);
    }

    let mut ranked = 0usize;
    while let Some(v) = queue.pop_front() {
        ranked += 1;
        let next_rank = g.rank(v) + 1;
        for e in g.out_edges(v).to_vec() {
            if !follows(g, &follow, e) {
                continue;
            }
            let w = g.edge(e).to();
            if g.rank(w) < next_rank {
                g.set_rank(w, next_rank);
            }
            indegree[w.index()] -= 1;
            if indegree[w.index()] == 0 {
                queue.push_back(w);
            }
        }
    }

    if ranked == g.vertex_count() {
        return Ok(());
    }
    let Some(vertex) = order.iter().copied().find(|v| indegree[v.index()] > 0) else {
        debug_assert!(false, "unranked vertex without positive in-degree");
        return Ok(());
    };
    Err(CycleError { vertex })
}

/// Find one cycle reachable from `from` under `follow`, for diagnostics.
///
/// Returns the vertices of the first cycle encountered, in traversal order,
/// or an empty path when no cycle is reachable.
pub fn report_loops<N, E, F>(g: &Graph<N, E>, follow: F, from: VertexId) -> Vec<VertexId>
where
    F: Fn(EdgeRef<'_, E>) -> bool,
{
    struct Finder<'g, N, E, F> {
        g: &'g Graph<N, E>,
        follow: &'g F,
        visited: Vec<bool>,
        stack: Vec<VertexId>,
        on_stack: Vec<bool>,
    }

    impl<N, E, F> Finder<'_, N, E, F>
    where
        F: Fn(EdgeRef<'_, E>) -> bool,
    {
        fn search(&mut self, v: VertexId) -> Option<Vec<VertexId>> {
            self.visited[v.index()] = true;
            self.stack.push(v);
            self.on_stack[v.index()] = true;

            for &e in self.g.out_edges(v) {
                if !follows(self.g, self.follow, e) {
                    continue;
                }
                let w = self.g.edge(e).to();
                if self.on_stack[w.index()] {
                    let start = self.stack.iter().position(|&x| x == w).unwrap_or(0);
                    return Some(self.stack[start..].to_vec());
                }
                if !self.visited[w.index()] {
                    if let Some(found) = self.search(w) {
                        return Some(found);
                    }
                }
            }

            self.stack.pop();
            self.on_stack[v.index()] = false;
            None
        }
    }

    if !g.contains_vertex(from) {
        return Vec::new();
    }
    let cap = g.vertex_capacity();
    let mut finder = Finder {
        g,
        follow: &follow,
        visited: vec![false; cap],
        stack: Vec::new(),
        on_stack: vec![false; cap],
    };
    finder.search(from).unwrap_or_default()
}
