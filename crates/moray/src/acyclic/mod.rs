//! Break the minimum-weight set of cutable edges to make a graph acyclic.
//!
//! The engine never rewrites the caller's graph structurally. It builds a
//! private *break graph* holding only the vertices that sit inside a
//! strongly-connected component, reduces that graph with a work-queue of
//! rewrite rules until only genuine placement decisions remain, then commits
//! the surviving cutable edges one at a time in descending weight order,
//! rolling back any commit that would close a cycle. Every break edge keeps
//! the list of original edges it stands for; cutting a break edge marks those
//! originals with their `cut` flag.

mod build;
mod place;
mod simplify;

use std::collections::VecDeque;
use std::mem;

use moray_graph::{
    alg, follow_always_true, follow_not_cutable, EdgeId, EdgeRef, Graph, VertexId, VertexInfo,
};
use tracing::{debug, trace};

use crate::dump;

/// A cycle made entirely of non-cutable edges.
///
/// The engine reports the cycle, forces one of its edges cutable and keeps
/// going so further problems surface in the same run; the caller must treat
/// the translation unit as failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("circular logic requires cutting a non-cutable edge: {}", .path.join(" -> "))]
pub struct CircularLogic {
    /// Names of the vertices on the offending cycle, in traversal order.
    pub path: Vec<String>,
}

/// Vertex payload of the private break graph.
pub(crate) struct BreakVertex {
    /// The original-graph vertex this break vertex stands for.
    pub(crate) origin: VertexId,
    /// Rank snapshot taken before tentative placement, for rollback.
    stored_rank: u32,
    /// Already queued for further simplification.
    on_work: bool,
    /// Marked for removal; swept after the work queue drains.
    deleted: bool,
}

/// Edge payload of the private break graph.
pub(crate) struct BreakEdge {
    /// Original edges this break edge stands for. Non-empty for every edge
    /// built from the original graph; emptied only when ownership moves to
    /// another break edge.
    origin_edges: Vec<EdgeId>,
}

/// Make a directed multigraph acyclic by cutting edges.
///
/// Only edges with `weight > 0` that `follow` accepts participate; of those,
/// only `cutable` edges may be cut. On return the chosen original edges have
/// their `cut` flag set. Vertex colors and ranks are clobbered.
///
/// The returned diagnostics are non-empty when a cycle of non-cutable edges
/// was found (see [`CircularLogic`]). Internal consistency violations and a
/// cycle surviving the full pass are fatal and panic.
///
/// Not reentrant: concurrent or recursive invocations on the same graph are
/// not supported. Distinct graphs may be processed in parallel.
pub fn acyclify<N, E, F>(graph: &mut Graph<N, E>, follow: F) -> Vec<CircularLogic>
where
    N: VertexInfo,
    F: Fn(EdgeRef<'_, E>) -> bool,
{
    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "acyclify"
    );
    let engine = Acyc::new(graph, follow);
    let diagnostics = engine.run();
    debug!(diagnostics = diagnostics.len(), "acyclify done");
    diagnostics
}

/// One acyclification pass. Owns the break graph and the work queue; borrows
/// the original graph for the duration of the pass.
pub(crate) struct Acyc<'a, N, E, F> {
    orig: &'a mut Graph<N, E>,
    brk: Graph<BreakVertex, BreakEdge>,
    /// FIFO of break vertices with simplification work left. A vertex appears
    /// at most once; `BreakVertex::on_work` tracks membership.
    work: VecDeque<VertexId>,
    follow: F,
    /// Sentinel distinguishing the current placement trace from stale marks;
    /// strictly increases per tried edge, so no clearing between edges.
    place_step: u32,
    /// Per-break-vertex placement mark, compared against `place_step`.
    place_mark: Vec<u32>,
    diagnostics: Vec<CircularLogic>,
}

impl<'a, N, E, F> Acyc<'a, N, E, F>
where
    N: VertexInfo,
    F: Fn(EdgeRef<'_, E>) -> bool,
{
    pub(crate) fn new(orig: &'a mut Graph<N, E>, follow: F) -> Self {
        Self {
            orig,
            brk: Graph::new(),
            work: VecDeque::new(),
            follow,
            place_step: 0,
            place_mark: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> Vec<CircularLogic> {
        // Color the vertices that can possibly sit on a cycle; everything
        // else never enters the break graph.
        alg::strongly_connected(&mut *self.orig, |e| (self.follow)(e));

        self.build_graph();
        dump::dump_if(6, &self.brk, &*self.orig, "acyc_pre");

        // Reduce before any cutting so the cut heuristics see a small graph.
        self.simplify(false);
        dump::dump_if(5, &self.brk, &*self.orig, "acyc_simp");

        debug!("cutting trivial loops");
        self.simplify(true);
        dump::dump_if(6, &self.brk, &*self.orig, "acyc_mid");

        debug!("ranking");
        if let Err(err) = alg::rank(&mut self.brk, follow_not_cutable) {
            panic!("acyclify: ranking before placement failed: {err}");
        }
        dump::dump_if(6, &self.brk, &*self.orig, "acyc_rank");

        debug!("placement");
        self.place();
        dump::dump_if(6, &self.brk, &*self.orig, "acyc_place");

        debug!("final ranking");
        // Asserts every cycle was broken; the ranks themselves are discarded.
        if let Err(err) = alg::rank(&mut self.brk, follow_always_true) {
            panic!("acyclify: cycles remain after placement: {err}");
        }
        dump::dump_if(6, &self.brk, &*self.orig, "acyc_done");

        self.diagnostics
    }

    /// Whether the engine considers an original edge live.
    pub(crate) fn follow_orig(&self, e: EdgeRef<'_, E>) -> bool {
        e.weight() > 0 && (self.follow)(e)
    }

    /// Make a new break edge using `template` for weight, cutability and
    /// origin-edge ownership. The template gives up its origin list; the new
    /// edge is the sole owner.
    pub(crate) fn edge_from_edge(
        &mut self,
        template: EdgeId,
        from: VertexId,
        to: VertexId,
    ) -> EdgeId {
        let weight = self.brk.edge(template).weight();
        let cutable = self.brk.edge(template).cutable();
        let origin_edges = mem::take(&mut self.brk.edge_label_mut(template).origin_edges);
        self.brk
            .add_edge(from, to, weight, cutable, BreakEdge { origin_edges })
    }

    /// Move `donor`'s origin list onto `into`, keeping order.
    pub(crate) fn merge_origin_edges(&mut self, into: EdgeId, donor: EdgeId) {
        let moved = mem::take(&mut self.brk.edge_label_mut(donor).origin_edges);
        self.brk.edge_label_mut(into).origin_edges.extend(moved);
    }

    /// Cut every original edge a break edge stands for.
    pub(crate) fn cut_orig_edge(&mut self, edge: EdgeId, why: &str) {
        self.brk.set_cut(edge, true);
        let origin = mem::take(&mut self.brk.edge_label_mut(edge).origin_edges);
        if origin.is_empty() {
            panic!(
                "acyclify: no original edges recorded for break edge e{}",
                edge.index()
            );
        }
        for oe in origin {
            self.orig.set_cut(oe, true);
            trace!(
                "{why} cut {} -> {}",
                self.orig.label(self.orig.edge(oe).from()).name(),
                self.orig.label(self.orig.edge(oe).to()).name()
            );
        }
    }

    pub(crate) fn work_push(&mut self, v: VertexId) {
        let label = self.brk.label_mut(v);
        if !label.on_work {
            label.on_work = true;
            self.work.push_back(v);
        }
    }

    pub(crate) fn work_pop(&mut self) -> Option<VertexId> {
        let v = self.work.pop_front()?;
        self.brk.label_mut(v).on_work = false;
        Some(v)
    }
}
