#![forbid(unsafe_code)]

//! Directed multigraph container and ordering primitives used by `moray`.
//!
//! Design goals:
//! - deterministic: vertices, edges and incidence lists iterate in insertion
//!   order, and removals never reorder the survivors
//! - cheap unlink-and-destroy so reduction passes can rewrite a graph in place
//! - typed [`VertexId`]/[`EdgeId`] indices that are never reused, so passes
//!   can keep side tables sized to the graph instead of stashing state in
//!   per-entity scratch slots

pub mod alg;
pub mod dot;
mod graph;

pub use graph::{
    follow_always_true, follow_not_cutable, EdgeId, EdgeRef, Graph, VertexId, VertexInfo,
};
