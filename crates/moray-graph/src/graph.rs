//! Graph container APIs used by `moray`.
//!
//! This module contains the core [`Graph`] container: a directed multigraph
//! whose vertices and edges are addressed by typed indices. Indices are never
//! reused within a graph, so passes can keep side tables sized to
//! [`Graph::vertex_capacity`] / [`Graph::edge_capacity`] without worrying
//! about invalidation.
//!
//! Iteration order is the contract that makes downstream algorithms
//! deterministic: vertices, edges and per-vertex incidence lists all iterate
//! in insertion order, and removals never perturb the relative order of the
//! survivors.

mod entries;

use entries::{EdgeEntry, VertexEntry};

/// Index of a vertex within its [`Graph`]. Stays valid after removal (the
/// slot is tombstoned, never recycled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(u32);

impl VertexId {
    /// Position usable to key a side table sized to [`Graph::vertex_capacity`].
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an edge within its [`Graph`]. Stays valid after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u32);

impl EdgeId {
    /// Position usable to key a side table sized to [`Graph::edge_capacity`].
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Display hooks for vertex labels, used by diagnostics and dot dumps.
pub trait VertexInfo {
    /// Human-readable vertex name.
    fn name(&self) -> String;

    /// Fill color used when the vertex is dumped in dot format.
    fn dot_color(&self) -> &str {
        "black"
    }
}

impl VertexInfo for String {
    fn name(&self) -> String {
        self.clone()
    }
}

impl VertexInfo for &str {
    fn name(&self) -> String {
        (*self).to_string()
    }
}

/// Borrowed view of one edge, handed to filter predicates and dump closures.
pub struct EdgeRef<'a, E> {
    id: EdgeId,
    entry: &'a EdgeEntry<E>,
}

impl<'a, E> Clone for EdgeRef<'a, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, E> Copy for EdgeRef<'a, E> {}

impl<'a, E> EdgeRef<'a, E> {
    pub fn id(self) -> EdgeId {
        self.id
    }

    pub fn from(self) -> VertexId {
        self.entry.from
    }

    pub fn to(self) -> VertexId {
        self.entry.to
    }

    pub fn weight(self) -> u32 {
        self.entry.weight
    }

    pub fn cutable(self) -> bool {
        self.entry.cutable
    }

    pub fn cut(self) -> bool {
        self.entry.cut
    }

    pub fn label(self) -> &'a E {
        &self.entry.label
    }
}

/// Edge filter that follows everything except edges marked cutable.
pub fn follow_not_cutable<E>(e: EdgeRef<'_, E>) -> bool {
    !e.cutable()
}

/// Edge filter that follows every edge.
pub fn follow_always_true<E>(_e: EdgeRef<'_, E>) -> bool {
    true
}

/// Directed multigraph with stable iteration order.
///
/// Vertices carry a user label `N`, a mutable `color` (strongly-connected
/// component id, `0` = not in any cycle) and a mutable `rank` (topological
/// depth). Edges carry a user label `E`, a `weight`, a `cutable` flag and a
/// `cut` flag. Parallel edges and self-loops are allowed; a self-loop appears
/// in both the out list and the in list of its vertex.
#[derive(Clone)]
pub struct Graph<N, E> {
    verts: Vec<VertexEntry<N>>,
    edges: Vec<EdgeEntry<E>>,
    live_verts: usize,
    live_edges: usize,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            verts: Vec::new(),
            edges: Vec::new(),
            live_verts: 0,
            live_edges: 0,
        }
    }

    pub fn add_vertex(&mut self, label: N) -> VertexId {
        let id = VertexId(self.verts.len() as u32);
        self.verts.push(VertexEntry {
            label,
            color: 0,
            rank: 0,
            alive: true,
            out: Vec::new(),
            in_: Vec::new(),
        });
        self.live_verts += 1;
        id
    }

    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: u32,
        cutable: bool,
        label: E,
    ) -> EdgeId {
        debug_assert!(self.contains_vertex(from), "edge tail must be live");
        debug_assert!(self.contains_vertex(to), "edge head must be live");
        let id = EdgeId(self.edges.len() as u32);
        self.edges.push(EdgeEntry {
            from,
            to,
            weight,
            cutable,
            cut: false,
            alive: true,
            label,
        });
        self.verts[from.index()].out.push(id);
        self.verts[to.index()].in_.push(id);
        self.live_edges += 1;
        id
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.live_verts
    }

    /// Number of live edges.
    pub fn edge_count(&self) -> usize {
        self.live_edges
    }

    /// Total vertex slots ever allocated, including removed ones. Side tables
    /// indexed by [`VertexId::index`] should be sized to this.
    pub fn vertex_capacity(&self) -> usize {
        self.verts.len()
    }

    /// Total edge slots ever allocated, including removed ones.
    pub fn edge_capacity(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.verts.get(v.index()).is_some_and(|entry| entry.alive)
    }

    pub fn contains_edge(&self, e: EdgeId) -> bool {
        self.edges.get(e.index()).is_some_and(|entry| entry.alive)
    }

    /// Live vertices in insertion order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.verts
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.alive)
            .map(|(ix, _)| VertexId(ix as u32))
    }

    /// Live edges in insertion order.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.alive)
            .map(|(ix, _)| EdgeId(ix as u32))
    }

    pub fn label(&self, v: VertexId) -> &N {
        &self.verts[v.index()].label
    }

    pub fn label_mut(&mut self, v: VertexId) -> &mut N {
        &mut self.verts[v.index()].label
    }

    pub fn color(&self, v: VertexId) -> u32 {
        self.verts[v.index()].color
    }

    pub fn set_color(&mut self, v: VertexId, color: u32) {
        self.verts[v.index()].color = color;
    }

    pub fn rank(&self, v: VertexId) -> u32 {
        self.verts[v.index()].rank
    }

    pub fn set_rank(&mut self, v: VertexId, rank: u32) {
        self.verts[v.index()].rank = rank;
    }

    /// Live outgoing edges of `v` in insertion order.
    pub fn out_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.verts[v.index()].out
    }

    /// Live incoming edges of `v` in insertion order.
    pub fn in_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.verts[v.index()].in_
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.verts[v.index()].out.len()
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.verts[v.index()].in_.len()
    }

    /// Borrowed view of an edge. Valid for removed edges too; check
    /// [`Graph::contains_edge`] where liveness matters.
    pub fn edge(&self, e: EdgeId) -> EdgeRef<'_, E> {
        EdgeRef {
            id: e,
            entry: &self.edges[e.index()],
        }
    }

    pub fn set_weight(&mut self, e: EdgeId, weight: u32) {
        self.edges[e.index()].weight = weight;
    }

    pub fn set_cutable(&mut self, e: EdgeId, cutable: bool) {
        self.edges[e.index()].cutable = cutable;
    }

    pub fn set_cut(&mut self, e: EdgeId, cut: bool) {
        self.edges[e.index()].cut = cut;
    }

    pub fn edge_label(&self, e: EdgeId) -> &E {
        &self.edges[e.index()].label
    }

    pub fn edge_label_mut(&mut self, e: EdgeId) -> &mut E {
        &mut self.edges[e.index()].label
    }

    /// Unlink an edge from both endpoint incidence lists and tombstone it.
    /// Removing an already-removed edge is a no-op.
    pub fn remove_edge(&mut self, e: EdgeId) -> bool {
        let Some(entry) = self.edges.get_mut(e.index()) else {
            return false;
        };
        if !entry.alive {
            return false;
        }
        entry.alive = false;
        let (from, to) = (entry.from, entry.to);
        self.verts[from.index()].out.retain(|&id| id != e);
        self.verts[to.index()].in_.retain(|&id| id != e);
        self.live_edges -= 1;
        true
    }

    /// Unlink a vertex and every edge incident to it.
    pub fn remove_vertex(&mut self, v: VertexId) -> bool {
        if !self.contains_vertex(v) {
            return false;
        }
        let mut incident: Vec<EdgeId> = self.verts[v.index()].out.clone();
        incident.extend_from_slice(&self.verts[v.index()].in_);
        for e in incident {
            self.remove_edge(e);
        }
        self.verts[v.index()].alive = false;
        self.live_verts -= 1;
        true
    }
}
