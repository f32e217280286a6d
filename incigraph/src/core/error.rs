use std::fmt;

use thiserror::Error;

use super::base::Vertex;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("adding edge ({tail}, {head}) failed: {kind}")]
pub struct AddEdgeError {
    pub tail: Vertex,
    pub head: Vertex,
    pub kind: AddEdgeErrorKind,
}

impl AddEdgeError {
    pub fn new(tail: Vertex, head: Vertex, kind: AddEdgeErrorKind) -> Self {
        Self { tail, head, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddEdgeErrorKind {
    NegativeTail,
    NegativeHead,
    CapacityOverflow,
}

impl fmt::Display for AddEdgeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            AddEdgeErrorKind::NegativeTail => "tail is a negative vertex index",
            AddEdgeErrorKind::NegativeHead => "head is a negative vertex index",
            AddEdgeErrorKind::CapacityOverflow => "the builder has exhausted its edge index space",
        };
        f.write_str(reason)
    }
}

/// Violation of the flat array layout of a compact graph.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("the array is too short to hold the header")]
    MissingHeader,
    #[error("the header contains a negative count")]
    NegativeCount,
    #[error("array length ({actual}) is inconsistent with the header (expected {expected})")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("out-edge bounds decrease at vertex {0}")]
    DecreasingBounds(Vertex),
    #[error("out-edge bounds end at {actual}, but there are {expected} out-edge entries")]
    BoundsTotalMismatch { expected: usize, actual: usize },
    #[error("edge {0} has an endpoint out of the vertex range")]
    EndpointOutOfRange(i32),
    #[error("out-edge entry {0} does not refer to an existing edge")]
    EdgeOutOfRange(i32),
    #[error("out-edge {edge} listed at vertex {vertex} does not start at that vertex")]
    ForeignOutEdge { vertex: Vertex, edge: i32 },
}
