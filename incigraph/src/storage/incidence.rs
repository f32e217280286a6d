//! Incidence graph with integer edge indices.
//!
//! The whole graph lives in one flat `i32` array:
//!
//! ```text
//! [n, m, upper_bound[0..n], out_edges[0..k], heads[0..m], tails[0..m]]
//! ```
//!
//! where `n` is the vertex count, `m` is the edge count and `out_edges` lists
//! the out-edges grouped by tail. The out-edges of vertex `v` are the entries
//! between the upper bound of `v - 1` (or zero) and the upper bound of `v`.
//!
//! In the directed variant, `k = m`. In the undirected variant, every edge `e`
//! that is not a self-loop is listed twice: as `e` at its tail and as `!e`
//! (bitwise complement, always negative) at its head. Resolving a complemented
//! index swaps the meaning of tail and head, so following `!e` from the head
//! leads back to the tail.
//!
//! # Examples
//!
//! ```
//! use incigraph::{prelude::*, storage::{IncidenceGraph, IncidenceGraphBuilder}};
//!
//! let mut builder: IncidenceGraphBuilder = IncidenceGraph::builder();
//! let e01 = builder.try_add(0, 1).unwrap();
//! let e12 = builder.try_add(1, 2).unwrap();
//!
//! let graph = builder.build();
//!
//! assert_eq!(graph.vertex_count(), 3);
//! assert_eq!(graph.head(e01), Some(1));
//! assert_eq!(graph.out_edges(1).collect::<Vec<_>>(), vec![e12]);
//! ```

use std::{
    fmt,
    iter::Copied,
    marker::PhantomData,
    ops::Range,
    slice,
    sync::Arc,
};

use crate::{
    common::GrowableBuffer,
    core::{
        error::{AddEdgeError, AddEdgeErrorKind, LayoutError},
        marker::{Directed, EdgeType, Undirected},
        EdgeEndpoints, GraphBase, OutEdges, Vertex,
    },
};

use super::{shared, BuilderOptions};

/// Returns `true` if the edge index refers to the reversed direction of an
/// undirected edge.
#[inline]
pub fn is_reversed(edge: i32) -> bool {
    edge < 0
}

/// Returns the index of the physical edge, which is the non-negative one of
/// `edge` and `!edge`.
#[inline]
pub fn canonical(edge: i32) -> i32 {
    if edge < 0 {
        !edge
    } else {
        edge
    }
}

/// Immutable incidence graph. See the [module documentation](self) for the
/// layout.
///
/// Cloning is cheap and the clones share the storage. Two graphs are equal if
/// and only if they share the storage.
pub struct IncidenceGraph<Ty = Directed> {
    data: Option<Arc<[i32]>>,
    ty: PhantomData<fn() -> Ty>,
}

pub type DirectedIncidenceGraph = IncidenceGraph<Directed>;
pub type UndirectedIncidenceGraph = IncidenceGraph<Undirected>;

impl<Ty: EdgeType> IncidenceGraph<Ty> {
    pub fn builder() -> IncidenceGraphBuilder<Ty> {
        IncidenceGraphBuilder::new()
    }

    pub fn builder_with(options: BuilderOptions) -> IncidenceGraphBuilder<Ty> {
        IncidenceGraphBuilder::with_options(options)
    }

    /// Wraps an array in the flat layout after checking it.
    pub fn from_raw(data: Vec<i32>) -> Result<Self, LayoutError> {
        let graph = Self::from_data_unchecked(data);
        graph.check_layout()?;
        Ok(graph)
    }

    fn from_data_unchecked(data: Vec<i32>) -> Self {
        Self {
            data: Some(data.into()),
            ty: PhantomData,
        }
    }

    /// Returns the underlying flat array. A default graph has an empty array.
    pub fn as_slice(&self) -> &[i32] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Returns the number of out-edge entries, which for undirected graphs
    /// includes the reversed ones.
    pub fn out_entry_count(&self) -> usize {
        let data = self.as_slice();
        if data.is_empty() {
            return 0;
        }

        let (n, m) = (self.vertex_count(), self.edge_count());
        data.len() - shared::HEADER_LEN - n - 2 * m
    }

    /// Checks all layout invariants.
    ///
    /// Builders guarantee them, the check exists for graphs created from raw
    /// arrays and for debug assertions.
    pub fn check_layout(&self) -> Result<(), LayoutError> {
        let data = self.as_slice();
        if data.is_empty() {
            return Ok(());
        }

        let (n, m) = shared::read_header(data)?;
        let bounds_end = shared::HEADER_LEN + n;
        let bounds = data
            .get(shared::HEADER_LEN..bounds_end)
            .ok_or(LayoutError::LengthMismatch {
                expected: bounds_end,
                actual: data.len(),
            })?;

        let k = shared::bounds_total(bounds)?;
        shared::check_length(bounds_end + k + 2 * m, data.len())?;
        shared::check_bounds(bounds, k)?;

        let expected_entries = if Ty::is_directed() {
            m
        } else {
            let loops = (0..m as i32)
                .filter(|&e| self.tail(e) == self.head(e))
                .count();
            2 * m - loops
        };
        shared::check_length(expected_entries, k).map_err(|_| {
            LayoutError::BoundsTotalMismatch {
                expected: expected_entries,
                actual: k,
            }
        })?;

        for e in 0..m as i32 {
            let (tail, head) = (self.tail(e), self.head(e));
            let valid = |v: Option<Vertex>| v.map(|v| self.contains_vertex(v)).unwrap_or(false);
            if !valid(tail) || !valid(head) {
                return Err(LayoutError::EndpointOutOfRange(e));
            }
        }

        for v in 0..n as Vertex {
            for edge in self.out_edges(v) {
                match self.tail(edge) {
                    Some(tail) if tail == v => {}
                    Some(_) => return Err(LayoutError::ForeignOutEdge { vertex: v, edge }),
                    None => return Err(LayoutError::EdgeOutOfRange(edge)),
                }
            }
        }

        Ok(())
    }

    #[inline]
    fn bounds(&self) -> &[i32] {
        let data = self.as_slice();
        let n = self.vertex_count();
        if data.is_empty() {
            &[]
        } else {
            &data[shared::HEADER_LEN..shared::HEADER_LEN + n]
        }
    }

    #[inline]
    fn out_entries(&self) -> &[i32] {
        let start = shared::HEADER_LEN + self.vertex_count();
        self.as_slice()
            .get(start..start + self.out_entry_count())
            .unwrap_or(&[])
    }

    #[inline]
    fn heads(&self) -> &[i32] {
        let data = self.as_slice();
        let m = self.edge_count();
        if data.is_empty() {
            &[]
        } else {
            &data[data.len() - 2 * m..data.len() - m]
        }
    }

    #[inline]
    fn tails(&self) -> &[i32] {
        let data = self.as_slice();
        let m = self.edge_count();
        if data.is_empty() {
            &[]
        } else {
            &data[data.len() - m..]
        }
    }

    #[inline]
    fn resolve(&self, edge: i32, forward: &[i32], reverse: &[i32]) -> Option<Vertex> {
        if edge >= 0 {
            forward.get(edge as usize).copied()
        } else if !Ty::is_directed() {
            reverse.get(!edge as usize).copied()
        } else {
            None
        }
    }
}

impl<Ty: EdgeType> GraphBase for IncidenceGraph<Ty> {
    type Edge = i32;
    type EdgeType = Ty;

    #[inline]
    fn vertex_count(&self) -> usize {
        self.as_slice().first().map_or(0, |&n| n as usize)
    }
}

impl<Ty: EdgeType> EdgeEndpoints for IncidenceGraph<Ty> {
    #[inline]
    fn edge_count(&self) -> usize {
        self.as_slice().get(1).map_or(0, |&m| m as usize)
    }

    #[inline]
    fn tail(&self, edge: i32) -> Option<Vertex> {
        self.resolve(edge, self.tails(), self.heads())
    }

    #[inline]
    fn head(&self, edge: i32) -> Option<Vertex> {
        self.resolve(edge, self.heads(), self.tails())
    }
}

impl<Ty: EdgeType> OutEdges for IncidenceGraph<Ty> {
    type OutEdgesIter<'a> = OutEdgesIter<'a>
    where
        Self: 'a;

    type Cursor = Range<usize>;

    fn out_edges(&self, vertex: Vertex) -> Self::OutEdgesIter<'_> {
        let range = shared::out_range(self.bounds(), vertex);
        self.out_entries()
            .get(range)
            .unwrap_or(&[])
            .iter()
            .copied()
    }

    // Cursors are relative to the out-edge zone, so that they never reach
    // the bounds or the endpoint tables.
    fn out_edges_cursor(&self, vertex: Vertex) -> Self::Cursor {
        shared::out_range(self.bounds(), vertex)
    }

    #[inline]
    fn next_out_edge(&self, cursor: &mut Self::Cursor) -> Option<i32> {
        let position = cursor.next()?;
        self.out_entries().get(position).copied()
    }

    fn out_degree(&self, vertex: Vertex) -> usize {
        shared::out_range(self.bounds(), vertex).len()
    }
}

/// Out-edges of a vertex in [`IncidenceGraph`].
pub type OutEdgesIter<'a> = Copied<slice::Iter<'a, i32>>;

impl<Ty> Clone for IncidenceGraph<Ty> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            ty: PhantomData,
        }
    }
}

impl<Ty> Default for IncidenceGraph<Ty> {
    fn default() -> Self {
        Self {
            data: None,
            ty: PhantomData,
        }
    }
}

impl<Ty> PartialEq for IncidenceGraph<Ty> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl<Ty> Eq for IncidenceGraph<Ty> {}

impl<Ty: EdgeType> fmt::Debug for IncidenceGraph<Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncidenceGraph")
            .field("ty", &Ty::name())
            .field("vertex_count", &self.vertex_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

impl<Ty: EdgeType> FromIterator<(Vertex, Vertex)> for IncidenceGraph<Ty> {
    fn from_iter<I: IntoIterator<Item = (Vertex, Vertex)>>(iter: I) -> Self {
        let mut builder = IncidenceGraphBuilder::new();
        builder.extend(iter);
        builder.build()
    }
}

/// Builder of [`IncidenceGraph`].
///
/// Out-edges are accumulated in per-vertex [buffers](GrowableBuffer) rented
/// from the thread-local pool and compacted into the flat layout by
/// [`to_graph`](IncidenceGraphBuilder::to_graph).
pub struct IncidenceGraphBuilder<Ty = Directed> {
    out_edges: Vec<GrowableBuffer<i32>>,
    heads: GrowableBuffer<i32>,
    tails: GrowableBuffer<i32>,
    initial_out_degree: usize,
    ty: PhantomData<fn() -> Ty>,
}

impl<Ty: EdgeType> IncidenceGraphBuilder<Ty> {
    pub fn new() -> Self {
        Self::with_options(BuilderOptions::default())
    }

    /// Creates a builder configured by the options.
    ///
    /// # Panics
    ///
    /// Panics if the vertex capacity does not fit the `i32` vertex index
    /// space.
    pub fn with_options(options: BuilderOptions) -> Self {
        let (heads, tails) = if options.edge_capacity > 0 {
            (
                GrowableBuffer::with_capacity(options.edge_capacity),
                GrowableBuffer::with_capacity(options.edge_capacity),
            )
        } else {
            (GrowableBuffer::new(), GrowableBuffer::new())
        };

        let mut builder = Self {
            out_edges: Vec::new(),
            heads,
            tails,
            initial_out_degree: options.initial_out_degree.max(1),
            ty: PhantomData,
        };
        builder.ensure_vertex_count(options.vertex_capacity);
        builder
    }

    /// Returns the number of vertices seen so far.
    pub fn vertex_count(&self) -> usize {
        self.out_edges.len()
    }

    /// Returns the number of successfully added edges.
    pub fn edge_count(&self) -> usize {
        self.tails.len()
    }

    /// Adds an edge from `tail` to `head` and returns its index.
    ///
    /// The vertex count grows to include both endpoints. Negative vertex
    /// indices are rejected. Duplicate edges and self-loops are accepted.
    pub fn try_add(&mut self, tail: Vertex, head: Vertex) -> Result<i32, AddEdgeError> {
        if tail < 0 {
            return Err(AddEdgeError::new(tail, head, AddEdgeErrorKind::NegativeTail));
        }

        if head < 0 {
            return Err(AddEdgeError::new(tail, head, AddEdgeErrorKind::NegativeHead));
        }

        let edge_count = self.tails.len();
        let max_vertex = tail.max(head) as usize;
        if edge_count >= shared::MAX_EDGE_COUNT || max_vertex >= shared::MAX_VERTEX_COUNT {
            return Err(AddEdgeError::new(
                tail,
                head,
                AddEdgeErrorKind::CapacityOverflow,
            ));
        }

        let edge = edge_count as i32;
        self.ensure_vertex_count(max_vertex + 1);

        self.push_out_edge(tail, edge);
        if !Ty::is_directed() && tail != head {
            self.push_out_edge(head, !edge);
        }

        self.tails.push(tail);
        self.heads.push(head);

        Ok(edge)
    }

    /// Grows the vertex count to at least `vertex_count`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex_count` does not fit the `i32` vertex index space.
    pub fn ensure_vertex_count(&mut self, vertex_count: usize) {
        assert!(
            vertex_count <= shared::MAX_VERTEX_COUNT,
            "vertex count {vertex_count} exceeds the vertex index space"
        );

        if vertex_count > self.out_edges.len() {
            self.out_edges.resize_with(vertex_count, GrowableBuffer::new);
        }
    }

    /// Compacts the accumulated edges into a graph and resets the builder.
    ///
    /// All buffers are given back to the pool. The builder is empty afterwards,
    /// so calling this method again produces an empty graph.
    pub fn to_graph(&mut self) -> IncidenceGraph<Ty> {
        let n = self.out_edges.len();
        let m = self.tails.len();
        let k = self.out_edges.iter().map(|edges| edges.len()).sum::<usize>();

        let mut data = Vec::with_capacity(shared::HEADER_LEN + n + k + 2 * m);
        data.push(n as i32);
        data.push(m as i32);

        let total = shared::push_bounds(&mut data, self.out_edges.iter().map(|edges| edges.len()));
        debug_assert_eq!(total, k);

        for edges in self.out_edges.iter_mut() {
            data.extend_from_slice(edges);
            edges.release();
        }

        data.extend_from_slice(&self.heads);
        data.extend_from_slice(&self.tails);

        self.out_edges.clear();
        self.heads.release();
        self.tails.release();

        tracing::debug!(
            ty = Ty::name(),
            vertex_count = n,
            edge_count = m,
            out_entries = k,
            "incidence graph built"
        );

        let graph = IncidenceGraph::from_data_unchecked(data);
        debug_assert_eq!(graph.check_layout(), Ok(()));
        graph
    }

    /// Consumes the builder and produces the graph.
    pub fn build(mut self) -> IncidenceGraph<Ty> {
        self.to_graph()
    }

    fn push_out_edge(&mut self, vertex: Vertex, edge: i32) {
        let edges = &mut self.out_edges[vertex as usize];
        if edges.capacity() == 0 {
            *edges = GrowableBuffer::with_capacity(self.initial_out_degree);
        }
        edges.push(edge);
    }
}

impl<Ty: EdgeType> Default for IncidenceGraphBuilder<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ty: EdgeType> Extend<(Vertex, Vertex)> for IncidenceGraphBuilder<Ty> {
    fn extend<I: IntoIterator<Item = (Vertex, Vertex)>>(&mut self, iter: I) {
        for (tail, head) in iter {
            // Rejected pairs are skipped.
            let _ = self.try_add(tail, head);
        }
    }
}

impl<Ty: EdgeType> fmt::Debug for IncidenceGraphBuilder<Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncidenceGraphBuilder")
            .field("ty", &Ty::name())
            .field("vertex_count", &self.vertex_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}
