//! Compact, immutable graph storages and their builders.
//!
//! Every storage keeps the whole graph in one flat `i32` array that starts
//! with the vertex count and the edge count, followed by per-vertex upper
//! bounds into an out-edge zone. A graph is produced by a _builder_ that
//! accumulates edges in growable buffers rented from a thread-local
//! [pool](crate::common::pool) and compacts them in one pass.
//!
//! # Storages and their properties
//!
//! * [Incidence graph](incidence), directed or undirected
//! * [Simple incidence graph](simple), directed, with self-contained edges
//!
//! The **incidence graph** identifies edges by their index and resolves them
//! through head and tail tables. The undirected variant lists every edge at
//! both endpoints, the second listing being the bitwise complement of the
//! edge index. The **simple incidence graph** stores the endpoints directly
//! and sorts the edges by tail, which makes the out-edges of a vertex a plain
//! range.
//!
//! |                 | **[IncidenceGraph]** | **[SimpleIncidenceGraph]** |
//! |-----------------|----------------------|----------------------------|
//! | add edge        | _O*(1)_              | _O*(1)_                    |
//! | build           | _O(V + E)_           | _O(V + E log E)_           |
//! | get out-edges   | _O(1)_ + _O(d)_      | _O(1)_ + _O(d)_            |
//! | resolve edge    | _O(1)_               | _O(1)_, no lookup          |
//! | out-degree      | _O(1)_               | _O(1)_                     |
//! | space           | _O(V + E)_           | _O(V + E)_                 |
//! | undirected      | YES                  | NO                         |
//! | multi edge      | YES                  | YES                        |
//!
//! * _V_ – vertex count
//! * _E_ – edge count
//! * _d_ – vertex out-degree
//! * _O*(..)_ – amortized complexity
//!
//! Graphs are cheap to clone and safe to share between threads. Equality of
//! graphs is identity of their storage, not structural equality.

pub mod incidence;
mod shared;
pub mod simple;

#[doc(inline)]
pub use self::{
    incidence::{
        DirectedIncidenceGraph, IncidenceGraph, IncidenceGraphBuilder, UndirectedIncidenceGraph,
    },
    simple::{SimpleIncidenceGraph, SimpleIncidenceGraphBuilder},
};

use crate::core::{
    error::AddEdgeError,
    marker::{Directed, EdgeType, Undirected},
    EdgeEndpoints, GraphBase, OutEdges, Vertex,
};

/// Tuning of the initial buffer sizes of a builder.
///
/// ```
/// use incigraph::storage::{BuilderOptions, DirectedIncidenceGraph};
///
/// let options = BuilderOptions::default().vertex_capacity(100).edge_capacity(1000);
/// let builder = DirectedIncidenceGraph::builder_with(options);
///
/// assert_eq!(builder.vertex_count(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Capacity rented for the out-edge buffer of a vertex when it receives
    /// its first out-edge.
    pub initial_out_degree: usize,
    /// Number of vertices the builder starts with. These vertices exist in
    /// the next built graph even if no edge touches them. Building resets
    /// the builder, so the graphs built after that start with no vertices.
    pub vertex_capacity: usize,
    /// Capacity rented upfront for the per-edge buffers.
    pub edge_capacity: usize,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            initial_out_degree: 4,
            vertex_capacity: 0,
            edge_capacity: 0,
        }
    }
}

impl BuilderOptions {
    pub fn initial_out_degree(self, initial_out_degree: usize) -> Self {
        Self {
            initial_out_degree,
            ..self
        }
    }

    pub fn vertex_capacity(self, vertex_capacity: usize) -> Self {
        Self {
            vertex_capacity,
            ..self
        }
    }

    pub fn edge_capacity(self, edge_capacity: usize) -> Self {
        Self {
            edge_capacity,
            ..self
        }
    }
}

/// Common interface of graph builders.
///
/// A builder accumulates edges and turns them into an immutable graph with
/// [`to_graph`](GraphBuilder::to_graph), after which it is empty and can be
/// reused.
pub trait GraphBuilder: Default {
    type Graph: EdgeEndpoints + OutEdges + Default + Clone;
    type EdgeType: EdgeType;

    fn with_options(options: BuilderOptions) -> Self;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn try_add(
        &mut self,
        tail: Vertex,
        head: Vertex,
    ) -> Result<<Self::Graph as GraphBase>::Edge, AddEdgeError>;

    fn ensure_vertex_count(&mut self, vertex_count: usize);

    fn to_graph(&mut self) -> Self::Graph;

    fn build(mut self) -> Self::Graph
    where
        Self: Sized,
    {
        self.to_graph()
    }
}

macro_rules! impl_graph_builder {
    ($builder:ty, $graph:ty, $ty:ty) => {
        impl GraphBuilder for $builder {
            type Graph = $graph;
            type EdgeType = $ty;

            fn with_options(options: BuilderOptions) -> Self {
                <$builder>::with_options(options)
            }

            fn vertex_count(&self) -> usize {
                <$builder>::vertex_count(self)
            }

            fn edge_count(&self) -> usize {
                <$builder>::edge_count(self)
            }

            fn try_add(
                &mut self,
                tail: Vertex,
                head: Vertex,
            ) -> Result<<Self::Graph as GraphBase>::Edge, AddEdgeError> {
                <$builder>::try_add(self, tail, head)
            }

            fn ensure_vertex_count(&mut self, vertex_count: usize) {
                <$builder>::ensure_vertex_count(self, vertex_count)
            }

            fn to_graph(&mut self) -> Self::Graph {
                <$builder>::to_graph(self)
            }
        }
    };
}

impl_graph_builder!(
    IncidenceGraphBuilder<Directed>,
    IncidenceGraph<Directed>,
    Directed
);
impl_graph_builder!(
    IncidenceGraphBuilder<Undirected>,
    IncidenceGraph<Undirected>,
    Undirected
);
impl_graph_builder!(SimpleIncidenceGraphBuilder, SimpleIncidenceGraph, Directed);
