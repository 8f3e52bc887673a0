#![forbid(unsafe_code)]

//! Backward-edge breaking for scheduling graphs.
//!
//! Given a directed multigraph that may contain cycles, [`acyclify`] cuts a
//! low-weight set of cutable edges so that a topological ranking over the
//! remaining edges exists. It is the cycle-breaking pass a scheduler runs
//! before ordering combinational and sequential logic; parsing, elaboration
//! and code emission live elsewhere.
//!
//! Design goals:
//! - deterministic: identical input iteration order yields identical cut sets
//! - only `cutable` edges are cut, except on the diagnosed recovery path for
//!   cycles made entirely of non-cutable edges
//! - the input graph is touched only through `cut` marks; colors and ranks
//!   are clobbered and left unspecified
//!
//! The underlying graph container is re-exported as [`graph`].

pub use moray_graph as graph;

mod acyclic;
mod dump;

pub use acyclic::{acyclify, CircularLogic};
