//! Reduction passes over the break graph.
//!
//! A FIFO work queue drives four rewrite rules that shrink the graph until
//! only genuine placement decisions remain, plus two cut heuristics for loops
//! with exactly one possible resolution. Rules run in a fixed order per
//! popped vertex; a vertex deleted by an earlier rule short-circuits the
//! rest. Deleted vertices are unlinked in one sweep after the queue drains.

use moray_graph::{alg, follow_not_cutable, EdgeRef, VertexId, VertexInfo};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{error, trace};

use super::{Acyc, CircularLogic};

impl<N, E, F> Acyc<'_, N, E, F>
where
    N: VertexInfo,
    F: Fn(EdgeRef<'_, E>) -> bool,
{
    pub(crate) fn simplify(&mut self, allow_cut: bool) {
        for v in self.brk.vertex_ids().collect::<Vec<_>>() {
            self.work_push(v);
        }
        while let Some(v) = self.work_pop() {
            self.simplify_none(v);
            self.simplify_one(v);
            self.simplify_out(v);
            self.simplify_dup(v);
            if allow_cut {
                self.cut_basic(v);
                self.cut_backward(v);
            }
        }
        self.delete_marked();
    }

    /// A vertex with no inputs or no outputs cannot sit on a cycle.
    fn simplify_none(&mut self, v: VertexId) {
        if self.brk.label(v).deleted {
            return;
        }
        if self.brk.in_degree(v) != 0 && self.brk.out_degree(v) != 0 {
            return;
        }
        trace!("simplify none: drop v{}", v.index());
        self.brk.label_mut(v).deleted = true;
        for e in self.brk.out_edges(v).to_vec() {
            if !self.brk.contains_edge(e) {
                continue;
            }
            self.work_push(self.brk.edge(e).to());
            self.brk.remove_edge(e);
        }
        for e in self.brk.in_edges(v).to_vec() {
            if !self.brk.contains_edge(e) {
                continue;
            }
            self.work_push(self.brk.edge(e).from());
            self.brk.remove_edge(e);
        }
    }

    /// A vertex with exactly one input and one output drops out; its two
    /// edges collapse into one.
    ///
    /// Cutting either the in set or the out set alone breaks every cycle
    /// through `v`, so only the template's origin list survives. Preference
    /// goes to a cutable template (lesser weight when both are cutable) to
    /// keep flexibility for placement.
    fn simplify_one(&mut self, v: VertexId) {
        if self.brk.label(v).deleted {
            return;
        }
        if self.brk.in_degree(v) != 1 || self.brk.out_degree(v) != 1 {
            return;
        }
        let in_e = self.brk.in_edges(v)[0];
        let out_e = self.brk.out_edges(v)[0];
        let p = self.brk.edge(in_e).from();
        let q = self.brk.edge(out_e).to();
        // A self-loop cannot be collapsed away.
        if p == v || q == v {
            return;
        }
        trace!("simplify one: drop v{}", v.index());
        self.brk.label_mut(v).deleted = true;
        let (in_weight, in_cutable) = (self.brk.edge(in_e).weight(), self.brk.edge(in_e).cutable());
        let (out_weight, out_cutable) =
            (self.brk.edge(out_e).weight(), self.brk.edge(out_e).cutable());
        let template = if in_cutable && (!out_cutable || in_weight < out_weight) {
            in_e
        } else {
            out_e
        };
        self.edge_from_edge(template, p, q);
        self.brk.remove_edge(in_e);
        self.brk.remove_edge(out_e);
        self.work_push(p);
        self.work_push(q);
    }

    /// A vertex whose single output is non-cutable is forced: every input can
    /// be redirected past it.
    ///
    /// A non-cutable self-loop contradicts itself; report it, force the edge
    /// cutable so the cut passes can retire it, and leave the vertex alone.
    fn simplify_out(&mut self, v: VertexId) {
        if self.brk.label(v).deleted {
            return;
        }
        if self.brk.out_degree(v) != 1 {
            return;
        }
        let out_e = self.brk.out_edges(v)[0];
        if self.brk.edge(out_e).cutable() {
            return;
        }
        let self_loop = self
            .brk
            .in_edges(v)
            .iter()
            .copied()
            .find(|&e| self.brk.edge(e).from() == v);
        if let Some(e) = self_loop {
            self.report_circular(v);
            self.brk.set_cutable(e, true);
            return;
        }
        trace!("simplify out: drop v{}", v.index());
        self.brk.label_mut(v).deleted = true;
        let q = self.brk.edge(out_e).to();
        for e in self.brk.in_edges(v).to_vec() {
            if !self.brk.contains_edge(e) {
                continue;
            }
            let p = self.brk.edge(e).from();
            self.edge_from_edge(e, p, q);
            self.brk.remove_edge(e);
            self.work_push(p);
        }
        self.brk.remove_edge(out_e);
        self.work_push(q);
    }

    /// Coalesce parallel edges out of `v` so at most one break edge exists
    /// per ordered vertex pair.
    ///
    /// A non-cutable copy makes the pair forced, so any parallel adds
    /// nothing; two cutable copies merge, concentrating the cutting cost on
    /// one representative edge.
    fn simplify_dup(&mut self, v: VertexId) {
        if self.brk.label(v).deleted {
            return;
        }
        let mut first_seen: FxHashMap<VertexId, moray_graph::EdgeId> = FxHashMap::default();
        for e in self.brk.out_edges(v).to_vec() {
            if !self.brk.contains_edge(e) {
                continue;
            }
            let q = self.brk.edge(e).to();
            let Some(prev) = first_seen.get(&q).copied() else {
                first_seen.insert(q, e);
                continue;
            };
            if !self.brk.edge(prev).cutable() {
                trace!("simplify dup: drop e{}", e.index());
                self.brk.remove_edge(e);
            } else if !self.brk.edge(e).cutable() {
                trace!("simplify dup: drop earlier e{}", prev.index());
                self.brk.remove_edge(prev);
                first_seen.insert(q, e);
            } else {
                trace!("simplify dup: merge e{} into e{}", e.index(), prev.index());
                let combined = self.brk.edge(prev).weight() + self.brk.edge(e).weight();
                self.brk.set_weight(prev, combined);
                self.merge_origin_edges(prev, e);
                self.brk.remove_edge(e);
            }
            self.work_push(q);
            self.work_push(v);
        }
    }

    /// Cut every cutable self-loop; it can only be resolved by cutting.
    fn cut_basic(&mut self, v: VertexId) {
        if self.brk.label(v).deleted {
            return;
        }
        for e in self.brk.out_edges(v).to_vec() {
            if !self.brk.contains_edge(e) {
                continue;
            }
            let (cutable, to) = {
                let er = self.brk.edge(e);
                (er.cutable(), er.to())
            };
            if cutable && to == v {
                self.cut_orig_edge(e, "cut basic:");
                self.brk.remove_edge(e);
                self.work_push(v);
            }
        }
    }

    /// A cutable edge `v -> q` opposed by a non-cutable `q -> v` certainly
    /// sits on a cycle; cut it now.
    fn cut_backward(&mut self, v: VertexId) {
        if self.brk.label(v).deleted {
            return;
        }
        let mut forced_from: FxHashSet<VertexId> = FxHashSet::default();
        for &e in self.brk.in_edges(v) {
            let er = self.brk.edge(e);
            if !er.cutable() {
                forced_from.insert(er.from());
            }
        }
        for e in self.brk.out_edges(v).to_vec() {
            if !self.brk.contains_edge(e) {
                continue;
            }
            let (cutable, to) = {
                let er = self.brk.edge(e);
                (er.cutable(), er.to())
            };
            if cutable && forced_from.contains(&to) {
                self.cut_orig_edge(e, "cut backward:");
                self.brk.remove_edge(e);
                self.work_push(v);
            }
        }
    }

    fn delete_marked(&mut self) {
        for v in self.brk.vertex_ids().collect::<Vec<_>>() {
            if self.brk.label(v).deleted {
                self.brk.remove_vertex(v);
            }
        }
    }

    fn report_circular(&mut self, v: VertexId) {
        let origin = self.brk.label(v).origin;
        let cycle = alg::report_loops(&*self.orig, follow_not_cutable, origin);
        let mut path: Vec<String> = cycle
            .iter()
            .map(|&ov| self.orig.label(ov).name())
            .collect();
        if path.is_empty() {
            path.push(self.orig.label(origin).name());
        }
        let diagnostic = CircularLogic { path };
        error!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}
