//! Internal storage entries for [`Graph`](super::Graph).

use super::{EdgeId, VertexId};

#[derive(Debug, Clone)]
pub(in crate::graph) struct VertexEntry<N> {
    pub(in crate::graph) label: N,
    pub(in crate::graph) color: u32,
    pub(in crate::graph) rank: u32,
    pub(in crate::graph) alive: bool,
    pub(in crate::graph) out: Vec<EdgeId>,
    pub(in crate::graph) in_: Vec<EdgeId>,
}

#[derive(Debug, Clone)]
pub(in crate::graph) struct EdgeEntry<E> {
    pub(in crate::graph) from: VertexId,
    pub(in crate::graph) to: VertexId,
    pub(in crate::graph) weight: u32,
    pub(in crate::graph) cutable: bool,
    pub(in crate::graph) cut: bool,
    pub(in crate::graph) alive: bool,
    pub(in crate::graph) label: E,
}
