//! Greedy weight-ordered placement of the remaining cutable edges.
//!
//! Every surviving cutable edge is tried as a keeper, heaviest first, so the
//! edges we end up cutting are cheap. A tentative keeper propagates ranks
//! forward; if the propagation runs back into the tentative edge's own trace
//! the keeper would close a cycle, so it is cut instead and every touched
//! rank is rolled back from its snapshot.

use std::cmp::Reverse;

use moray_graph::{EdgeId, EdgeRef, VertexId, VertexInfo};
use tracing::{debug, trace};

use super::Acyc;

impl<N, E, F> Acyc<'_, N, E, F>
where
    N: VertexInfo,
    F: Fn(EdgeRef<'_, E>) -> bool,
{
    /// Input: the break graph with ranks already assigned over non-cutable
    /// edges.
    pub(crate) fn place(&mut self) {
        // Collect per source vertex in insertion order so ties in the stable
        // sort keep one vertex's edges together.
        let mut edges: Vec<EdgeId> = Vec::new();
        for v in self.brk.vertex_ids().collect::<Vec<_>>() {
            for &e in self.brk.out_edges(v) {
                let er = self.brk.edge(e);
                if er.weight() > 0 && er.cutable() {
                    edges.push(e);
                }
            }
        }
        debug!(cutable = edges.len(), "placement candidates");

        // Heaviest first; retaining expensive edges keeps the total cut cost
        // low. The sort is stable so the collection order above is the
        // tie-break.
        edges.sort_by_key(|&e| Reverse(self.brk.edge(e).weight()));

        self.place_step = 10;
        self.place_mark = vec![0; self.brk.vertex_capacity()];
        for e in edges {
            self.place_try_edge(e);
        }
    }

    /// Try to keep `edge` as a permanent, non-cutable edge.
    fn place_try_edge(&mut self, edge: EdgeId) {
        self.place_step += 1;
        trace!(
            "place: step {} weight {} edge e{}",
            self.place_step,
            self.brk.edge(edge).weight(),
            edge.index()
        );
        // Make the edge non-cutable so the propagation below follows it and
        // detects any cycle it would create.
        self.brk.set_cutable(edge, false);
        let from = self.brk.edge(edge).from();
        let to = self.brk.edge(edge).to();
        let start_rank = self.brk.rank(from) + 1;
        if !self.place_iterate(to, start_rank) {
            // Commit: the tentative ranks become permanent, the work list is
            // only drained.
            while self.work_pop().is_some() {}
        } else {
            // The keeper would close a cycle; cut it and roll back every
            // rank the propagation touched.
            self.brk.set_cutable(edge, true);
            self.cut_orig_edge(edge, "cut loop:");
            self.brk.remove_edge(edge);
            while let Some(v) = self.work_pop() {
                let stored = self.brk.label(v).stored_rank;
                self.brk.set_rank(v, stored);
            }
        }
    }

    /// Propagate tentative ranks forward from `start`, following non-cutable
    /// weighted edges. Returns `true` when the trace runs into itself.
    ///
    /// Iterative on an explicit frame stack so chain depth is bounded by the
    /// heap, not the system stack. Marks left behind by an aborted trace stay
    /// stale; `place_step` strictly increases, so they are never mistaken for
    /// the live trace.
    fn place_iterate(&mut self, start: VertexId, start_rank: u32) -> bool {
        let mut frames: Vec<(VertexId, usize)> = Vec::new();
        if self.place_enter(start, start_rank, &mut frames) {
            return true;
        }
        loop {
            let Some(&(v, next)) = frames.last() else {
                break;
            };
            let Some(&e) = self.brk.out_edges(v).get(next) else {
                // Frame exhausted; the vertex leaves the live trace.
                self.place_mark[v.index()] = 0;
                frames.pop();
                continue;
            };
            if let Some(frame) = frames.last_mut() {
                frame.1 += 1;
            }
            let (weight, cutable, child) = {
                let er = self.brk.edge(e);
                (er.weight(), er.cutable(), er.to())
            };
            if weight > 0 && !cutable {
                let child_rank = self.brk.rank(v) + 1;
                if self.place_enter(child, child_rank, &mut frames) {
                    return true;
                }
            }
        }
        false
    }

    /// Enter `v` at `rank`, snapshotting its old rank for rollback. Returns
    /// `true` when `v` is already on the live trace (a cycle).
    fn place_enter(&mut self, v: VertexId, rank: u32, frames: &mut Vec<(VertexId, usize)>) -> bool {
        if self.brk.rank(v) >= rank {
            return false; // already at least this deep
        }
        if self.place_mark[v.index()] == self.place_step {
            return true;
        }
        self.place_mark[v.index()] = self.place_step;
        if !self.brk.label(v).on_work {
            let previous = self.brk.rank(v);
            self.brk.label_mut(v).stored_rank = previous;
            self.work_push(v);
        }
        self.brk.set_rank(v, rank);
        frames.push((v, 0));
        false
    }
}
