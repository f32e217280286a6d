//! Core traits and types shared by all graph representations and the
//! traversal engine.
//!
//! The traits are deliberately small capabilities rather than one big graph
//! interface:
//!
//! * [`GraphBase`] knows the edge type and the number of vertices,
//! * [`EdgeEndpoints`] resolves an edge into its tail and head,
//! * [`OutEdges`] enumerates the out-edges of a vertex, both as a borrowing
//!   iterator and as a detached cursor that the depth-first search stores in
//!   its explicit stack.
//!
//! Algorithms are written against these traits and are monomorphized for
//! every concrete graph.

pub mod error;
pub mod marker;

mod base;
mod endpoints;

pub use base::*;
pub use endpoints::Endpoints;
