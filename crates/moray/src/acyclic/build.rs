//! Break-graph construction.

use moray_graph::{EdgeRef, VertexId, VertexInfo};
use tracing::trace;

use super::{Acyc, BreakEdge, BreakVertex};

impl<N, E, F> Acyc<'_, N, E, F>
where
    N: VertexInfo,
    F: Fn(EdgeRef<'_, E>) -> bool,
{
    /// Materialize the break graph: one break vertex per colored original
    /// vertex, one break edge per live original edge between colored
    /// endpoints. Parallel originals produce parallel break edges; Rule D
    /// coalesces them later.
    pub(crate) fn build_graph(&mut self) {
        let mut vert_map: Vec<Option<VertexId>> = vec![None; self.orig.vertex_capacity()];

        let colored: Vec<VertexId> = self
            .orig
            .vertex_ids()
            .filter(|&v| self.orig.color(v) != 0)
            .collect();
        for &ov in &colored {
            let bv = self.brk.add_vertex(BreakVertex {
                origin: ov,
                stored_rank: 0,
                on_work: false,
                deleted: false,
            });
            vert_map[ov.index()] = Some(bv);
        }

        for &ov in &colored {
            let Some(from) = vert_map[ov.index()] else {
                continue;
            };
            for &oe in self.orig.out_edges(ov) {
                let er = self.orig.edge(oe);
                if !self.follow_orig(er) {
                    continue;
                }
                let Some(to) = vert_map[er.to().index()] else {
                    continue; // head is not in any cycle
                };
                let (weight, cutable) = (er.weight(), er.cutable());
                self.brk
                    .add_edge(from, to, weight, cutable, BreakEdge { origin_edges: vec![oe] });
            }
        }

        trace!(
            vertices = self.brk.vertex_count(),
            edges = self.brk.edge_count(),
            "break graph built"
        );
    }
}
