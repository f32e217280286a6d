//! Incidence graph whose edges are self-contained [`Endpoints`] values.
//!
//! Edges may be added in any order. The builder sorts them by tail (stably,
//! so edges with the same tail keep their insertion order) and stores them in
//! one flat `i32` array:
//!
//! ```text
//! [n, m, upper_bound[0..n], (tail, head)[0..m]]
//! ```
//!
//! The out-edges of a vertex are a contiguous range of pair positions, so
//! enumerating them is a walk over a numeric range. Resolving an edge never
//! touches the graph.

use std::{fmt, ops::Range, sync::Arc};

use crate::{
    common::GrowableBuffer,
    core::{
        error::{AddEdgeError, AddEdgeErrorKind, LayoutError},
        marker::Directed,
        EdgeEndpoints, Endpoints, GraphBase, OutEdges, Vertex,
    },
};

use super::{shared, BuilderOptions};

/// Immutable incidence graph with edges sorted by tail.
///
/// Cloning is cheap and the clones share the storage. Two graphs are equal if
/// and only if they share the storage.
#[derive(Clone, Default)]
pub struct SimpleIncidenceGraph {
    data: Option<Arc<[i32]>>,
}

impl SimpleIncidenceGraph {
    pub fn builder() -> SimpleIncidenceGraphBuilder {
        SimpleIncidenceGraphBuilder::new()
    }

    pub fn builder_with(options: BuilderOptions) -> SimpleIncidenceGraphBuilder {
        SimpleIncidenceGraphBuilder::with_options(options)
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
        }
    }

    /// Returns the underlying flat array. A default graph has an empty array.
    pub fn as_slice(&self) -> &[i32] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Returns all edges in the storage order, that is sorted by tail.
    pub fn edges(&self) -> OutEdgesIter<'_> {
        OutEdgesIter {
            pairs: self.pairs(),
            range: 0..self.edge_count(),
        }
    }

    /// Checks all layout invariants.
    pub fn check_layout(&self) -> Result<(), LayoutError> {
        let data = self.as_slice();
        if data.is_empty() {
            return Ok(());
        }

        let (n, m) = shared::read_header(data)?;
        let bounds_end = shared::HEADER_LEN + n;
        shared::check_length(bounds_end + 2 * m, data.len())?;

        let bounds = &data[shared::HEADER_LEN..bounds_end];
        shared::check_bounds(bounds, m)?;

        for (e, edge) in self.edges().enumerate() {
            if !self.contains_vertex(edge.tail()) || !self.contains_vertex(edge.head()) {
                return Err(LayoutError::EndpointOutOfRange(e as i32));
            }
        }

        for v in 0..n as Vertex {
            let range = shared::out_range(bounds, v);
            for e in range {
                if self.pair(e).tail() != v {
                    return Err(LayoutError::ForeignOutEdge {
                        vertex: v,
                        edge: e as i32,
                    });
                }
            }
        }

        Ok(())
    }

    #[inline]
    fn bounds(&self) -> &[i32] {
        let data = self.as_slice();
        if data.is_empty() {
            &[]
        } else {
            &data[shared::HEADER_LEN..shared::HEADER_LEN + self.vertex_count()]
        }
    }

    #[inline]
    fn pairs(&self) -> &[i32] {
        let data = self.as_slice();
        if data.is_empty() {
            &[]
        } else {
            &data[shared::HEADER_LEN + self.vertex_count()..]
        }
    }

    #[inline]
    fn pair(&self, position: usize) -> Endpoints {
        let pairs = self.pairs();
        Endpoints::new(pairs[2 * position], pairs[2 * position + 1])
    }
}

impl GraphBase for SimpleIncidenceGraph {
    type Edge = Endpoints;
    type EdgeType = Directed;

    #[inline]
    fn vertex_count(&self) -> usize {
        self.as_slice().first().map_or(0, |&n| n as usize)
    }
}

impl EdgeEndpoints for SimpleIncidenceGraph {
    #[inline]
    fn edge_count(&self) -> usize {
        self.as_slice().get(1).map_or(0, |&m| m as usize)
    }

    #[inline]
    fn tail(&self, edge: Endpoints) -> Option<Vertex> {
        self.contains_vertex(edge.tail()).then_some(edge.tail())
    }

    #[inline]
    fn head(&self, edge: Endpoints) -> Option<Vertex> {
        self.contains_vertex(edge.head()).then_some(edge.head())
    }
}

impl OutEdges for SimpleIncidenceGraph {
    type OutEdgesIter<'a> = OutEdgesIter<'a>;

    type Cursor = Range<usize>;

    fn out_edges(&self, vertex: Vertex) -> Self::OutEdgesIter<'_> {
        OutEdgesIter {
            pairs: self.pairs(),
            range: shared::out_range(self.bounds(), vertex),
        }
    }

    fn out_edges_cursor(&self, vertex: Vertex) -> Self::Cursor {
        shared::out_range(self.bounds(), vertex)
    }

    #[inline]
    fn next_out_edge(&self, cursor: &mut Self::Cursor) -> Option<Endpoints> {
        let position = cursor.next()?;
        let pairs = self.pairs();
        let tail = *pairs.get(2 * position)?;
        let head = *pairs.get(2 * position + 1)?;
        Some(Endpoints::new(tail, head))
    }

    fn out_degree(&self, vertex: Vertex) -> usize {
        shared::out_range(self.bounds(), vertex).len()
    }
}

/// Out-edges of a vertex in [`SimpleIncidenceGraph`], walked by a numeric
/// range over pair positions.
#[derive(Debug, Clone)]
pub struct OutEdgesIter<'a> {
    pairs: &'a [i32],
    range: Range<usize>,
}

impl Iterator for OutEdgesIter<'_> {
    type Item = Endpoints;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.range.next()?;
        Some(Endpoints::new(
            self.pairs[2 * position],
            self.pairs[2 * position + 1],
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl DoubleEndedIterator for OutEdgesIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let position = self.range.next_back()?;
        Some(Endpoints::new(
            self.pairs[2 * position],
            self.pairs[2 * position + 1],
        ))
    }
}

impl ExactSizeIterator for OutEdgesIter<'_> {}

impl PartialEq for SimpleIncidenceGraph {
    fn eq(&self, other: &Self) -> bool {
        match (&self.data, &other.data) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => Arc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}

impl Eq for SimpleIncidenceGraph {}

impl fmt::Debug for SimpleIncidenceGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleIncidenceGraph")
            .field("vertex_count", &self.vertex_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

impl FromIterator<(Vertex, Vertex)> for SimpleIncidenceGraph {
    fn from_iter<I: IntoIterator<Item = (Vertex, Vertex)>>(iter: I) -> Self {
        let mut builder = SimpleIncidenceGraphBuilder::new();
        builder.extend(iter);
        builder.build()
    }
}

/// Builder of [`SimpleIncidenceGraph`].
///
/// Edges are collected in one pooled buffer in insertion order and sorted by
/// tail during [`to_graph`](SimpleIncidenceGraphBuilder::to_graph).
pub struct SimpleIncidenceGraphBuilder {
    edges: GrowableBuffer<Endpoints>,
    vertex_count: usize,
}

impl SimpleIncidenceGraphBuilder {
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
        let edges = if options.edge_capacity > 0 {
            GrowableBuffer::with_capacity(options.edge_capacity)
        } else {
            GrowableBuffer::new()
        };

        let mut builder = Self {
            edges,
            vertex_count: 0,
        };
        builder.ensure_vertex_count(options.vertex_capacity);
        builder
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Adds an edge from `tail` to `head` and returns it.
    ///
    /// Negative vertex indices are rejected. Duplicate edges and self-loops
    /// are accepted.
    pub fn try_add(&mut self, tail: Vertex, head: Vertex) -> Result<Endpoints, AddEdgeError> {
        if tail < 0 {
            return Err(AddEdgeError::new(tail, head, AddEdgeErrorKind::NegativeTail));
        }

        if head < 0 {
            return Err(AddEdgeError::new(tail, head, AddEdgeErrorKind::NegativeHead));
        }

        let max_vertex = tail.max(head) as usize;
        if self.edges.len() >= shared::MAX_EDGE_COUNT || max_vertex >= shared::MAX_VERTEX_COUNT {
            return Err(AddEdgeError::new(
                tail,
                head,
                AddEdgeErrorKind::CapacityOverflow,
            ));
        }

        self.ensure_vertex_count(max_vertex + 1);

        let edge = Endpoints::new(tail, head);
        self.edges.push(edge);
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

        self.vertex_count = self.vertex_count.max(vertex_count);
    }

    /// Sorts the accumulated edges by tail, compacts them into a graph and
    /// resets the builder.
    pub fn to_graph(&mut self) -> SimpleIncidenceGraph {
        let n = self.vertex_count;
        let m = self.edges.len();

        // Stable, so that edges with equal tails keep the insertion order.
        self.edges.as_mut_slice().sort_by_key(Endpoints::tail);

        let mut degrees = vec![0usize; n];
        for edge in self.edges.iter() {
            degrees[edge.tail() as usize] += 1;
        }

        let mut data = Vec::with_capacity(shared::HEADER_LEN + n + 2 * m);
        data.push(n as i32);
        data.push(m as i32);
        shared::push_bounds(&mut data, degrees);

        for edge in self.edges.iter() {
            data.push(edge.tail());
            data.push(edge.head());
        }

        self.edges.release();
        self.vertex_count = 0;

        tracing::debug!(vertex_count = n, edge_count = m, "simple incidence graph built");

        let graph = SimpleIncidenceGraph::from_data_unchecked(data);
        debug_assert_eq!(graph.check_layout(), Ok(()));
        graph
    }

    /// Consumes the builder and produces the graph.
    pub fn build(mut self) -> SimpleIncidenceGraph {
        self.to_graph()
    }
}

impl Default for SimpleIncidenceGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<(Vertex, Vertex)> for SimpleIncidenceGraphBuilder {
    fn extend<I: IntoIterator<Item = (Vertex, Vertex)>>(&mut self, iter: I) {
        for (tail, head) in iter {
            // Rejected pairs are skipped.
            let _ = self.try_add(tail, head);
        }
    }
}

impl fmt::Debug for SimpleIncidenceGraphBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleIncidenceGraphBuilder")
            .field("vertex_count", &self.vertex_count)
            .field("edge_count", &self.edges.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::tests::*;

    #[test]
    fn basic() {
        test_basic::<SimpleIncidenceGraphBuilder>();
    }

    #[test]
    fn counts() {
        test_counts::<SimpleIncidenceGraphBuilder>();
    }

    #[test]
    fn default_graph() {
        test_default_graph::<SimpleIncidenceGraphBuilder>();
    }

    #[test]
    fn layout() {
        let mut builder = SimpleIncidenceGraph::builder();
        builder.try_add(2, 0).unwrap();
        builder.try_add(0, 1).unwrap();
        builder.try_add(2, 1).unwrap();
        builder.try_add(0, 2).unwrap();

        let graph = builder.build();

        #[rustfmt::skip]
        let expected = [
            3, 4,                       // n, m
            2, 2, 4,                    // upper bounds
            0, 1, 0, 2, 2, 0, 2, 1,     // pairs sorted by tail
        ];

        assert_eq!(graph.as_slice(), &expected);
    }

    #[test]
    fn sorted_stably() {
        let graph: SimpleIncidenceGraph = [(3, 1), (0, 4), (3, 0), (0, 2), (3, 2), (1, 1)]
            .into_iter()
            .collect();

        let edges = graph.edges().map(Into::into).collect::<Vec<(i32, i32)>>();
        assert_eq!(edges, vec![(0, 4), (0, 2), (1, 1), (3, 1), (3, 0), (3, 2)]);

        let out = graph.out_edges(3).map(|e| e.head()).collect::<Vec<_>>();
        assert_eq!(out, vec![1, 0, 2]);
        assert_eq!(graph.out_edges(2).len(), 0);
    }

    #[test]
    fn returns_endpoints() {
        let mut builder = SimpleIncidenceGraph::builder();
        let e = builder.try_add(5, 2).unwrap();

        assert_eq!(e, Endpoints::new(5, 2));

        let graph = builder.build();
        assert_eq!(graph.tail(e), Some(5));
        assert_eq!(graph.head(e), Some(2));
        assert_eq!(graph.head(Endpoints::new(0, 6)), None);
    }

    #[test]
    fn to_graph_resets() {
        let mut builder = SimpleIncidenceGraph::builder();
        builder.try_add(0, 1).unwrap();

        let first = builder.to_graph();
        assert_eq!(first.edge_count(), 1);

        let second = builder.to_graph();
        assert_eq!(second.vertex_count(), 0);
        assert_eq!(second.edge_count(), 0);
        assert_eq!(second.edges().count(), 0);
    }

    #[test]
    fn foreign_cursor_stays_in_out_edges() {
        let big: SimpleIncidenceGraph = [(0, 1), (1, 0), (2, 0), (3, 0)].into_iter().collect();
        let small: SimpleIncidenceGraph = [(0, 1), (0, 2)].into_iter().collect();

        let mut cursor = big.out_edges_cursor(1);
        assert_eq!(small.next_out_edge(&mut cursor), Some(Endpoints::new(0, 2)));

        let mut cursor = big.out_edges_cursor(3);
        assert_eq!(small.next_out_edge(&mut cursor), None);
    }

    #[test]
    #[should_panic(expected = "exceeds the vertex index space")]
    fn vertex_capacity_overflow() {
        let options = BuilderOptions::default().vertex_capacity(shared::MAX_VERTEX_COUNT + 1);
        SimpleIncidenceGraph::builder_with(options);
    }

    #[test]
    fn reversed_iteration() {
        let graph: SimpleIncidenceGraph = [(0, 1), (0, 2), (0, 3)].into_iter().collect();

        let heads = graph.out_edges(0).rev().map(|e| e.head()).collect::<Vec<_>>();
        assert_eq!(heads, vec![3, 2, 1]);
    }

    #[test]
    fn from_raw() {
        let graph = SimpleIncidenceGraph::from_raw(vec![2, 1, 1, 1, 0, 1]).unwrap();
        assert_eq!(graph.out_edges(0).collect::<Vec<_>>(), vec![Endpoints::new(0, 1)]);

        assert_eq!(
            SimpleIncidenceGraph::from_raw(vec![2, 1, 0, 1, 0, 1]),
            Err(LayoutError::ForeignOutEdge { vertex: 1, edge: 0 })
        );

        assert_eq!(
            SimpleIncidenceGraph::from_raw(vec![2, 1, 1, 1, 0]),
            Err(LayoutError::LengthMismatch {
                expected: 6,
                actual: 5
            })
        );
    }
}
