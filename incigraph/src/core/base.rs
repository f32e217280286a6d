use std::fmt::Debug;

use super::{endpoints::Endpoints, marker::EdgeType};

/// A vertex of a compact graph.
///
/// Vertices have no identity besides their index, which is dense in
/// `0..vertex_count`. The signed integer type is used so that invalid
/// (negative) input can be detected and rejected instead of silently wrapping.
pub type Vertex = i32;

/// The base of every graph representation.
pub trait GraphBase {
    /// Type of edges yielded by the graph.
    ///
    /// It is either an opaque index that needs to be resolved through
    /// [`EdgeEndpoints`], or a self-contained value such as [`Endpoints`].
    type Edge: Copy + Eq + Debug;

    /// Directionality of the graph.
    type EdgeType: EdgeType;

    /// Returns the number of vertices in the graph.
    fn vertex_count(&self) -> usize;

    /// Returns `true` if the vertex index is in `0..vertex_count`.
    fn contains_vertex(&self, vertex: Vertex) -> bool {
        vertex >= 0 && (vertex as usize) < self.vertex_count()
    }

    fn is_directed(&self) -> bool {
        Self::EdgeType::is_directed()
    }
}

/// Resolution of edges into their endpoints.
pub trait EdgeEndpoints: GraphBase {
    /// Returns the number of edges in the graph.
    ///
    /// For undirected graphs, every physical edge is counted once even though
    /// it is reachable from both of its endpoints.
    fn edge_count(&self) -> usize;

    /// Returns the tail (source) of the edge, or `None` if the edge does not
    /// belong to the graph.
    fn tail(&self, edge: Self::Edge) -> Option<Vertex>;

    /// Returns the head (destination) of the edge, or `None` if the edge does
    /// not belong to the graph.
    fn head(&self, edge: Self::Edge) -> Option<Vertex>;

    /// Returns both endpoints of the edge.
    fn endpoints(&self, edge: Self::Edge) -> Option<Endpoints> {
        Some(Endpoints::new(self.tail(edge)?, self.head(edge)?))
    }
}

/// Enumeration of out-edges of a vertex.
pub trait OutEdges: GraphBase {
    /// Iterator over out-edges of a vertex.
    ///
    /// The iterator is finite and restartable by cloning.
    type OutEdgesIter<'a>: Iterator<Item = Self::Edge> + Clone
    where
        Self: 'a;

    /// Position within the out-edges of a vertex that does not borrow the
    /// graph.
    ///
    /// Traversals keep cursors in their own storage and advance them with
    /// [`OutEdges::next_out_edge`], which allows them to be detached from the
    /// graph between individual steps.
    type Cursor: Clone + Debug;

    /// Returns the out-edges of the vertex in the order established when the
    /// graph was built.
    ///
    /// An out-of-range vertex has no out-edges.
    fn out_edges(&self, vertex: Vertex) -> Self::OutEdgesIter<'_>;

    /// Returns a cursor positioned before the first out-edge of the vertex.
    fn out_edges_cursor(&self, vertex: Vertex) -> Self::Cursor;

    /// Advances the cursor and returns the edge it moved over.
    ///
    /// Returns `None` once all out-edges were consumed. A cursor created by
    /// another graph yields only out-edges of this graph, in no particular
    /// order, and `None` as soon as it points past them.
    fn next_out_edge(&self, cursor: &mut Self::Cursor) -> Option<Self::Edge>;

    /// Returns the number of out-edges of the vertex.
    fn out_degree(&self, vertex: Vertex) -> usize {
        self.out_edges(vertex).count()
    }
}

impl<G: GraphBase> GraphBase for &G {
    type Edge = G::Edge;
    type EdgeType = G::EdgeType;

    fn vertex_count(&self) -> usize {
        (**self).vertex_count()
    }

    fn contains_vertex(&self, vertex: Vertex) -> bool {
        (**self).contains_vertex(vertex)
    }
}

impl<G: EdgeEndpoints> EdgeEndpoints for &G {
    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }

    fn tail(&self, edge: Self::Edge) -> Option<Vertex> {
        (**self).tail(edge)
    }

    fn head(&self, edge: Self::Edge) -> Option<Vertex> {
        (**self).head(edge)
    }
}

impl<G: OutEdges> OutEdges for &G {
    type OutEdgesIter<'a> = G::OutEdgesIter<'a>
    where
        Self: 'a;

    type Cursor = G::Cursor;

    fn out_edges(&self, vertex: Vertex) -> Self::OutEdgesIter<'_> {
        (**self).out_edges(vertex)
    }

    fn out_edges_cursor(&self, vertex: Vertex) -> Self::Cursor {
        (**self).out_edges_cursor(vertex)
    }

    fn next_out_edge(&self, cursor: &mut Self::Cursor) -> Option<Self::Edge> {
        (**self).next_out_edge(cursor)
    }

    fn out_degree(&self, vertex: Vertex) -> usize {
        (**self).out_degree(vertex)
    }
}
