//! Depth-first traversal of compact graphs.
//!
//! The traversal is **iterative**, that is, it doesn't use recursion. Instead
//! of the call stack, it keeps an explicit stack of frames, one per vertex on
//! the current path. This means that
//!
//! * &#128077; visitor is lazy and can be stopped without tricks,
//! * &#128077; visitor state is independent on the graph itself,
//! * &#128077; traversal is not limited by the size of the program stack,
//! * &#128078; there is some extra bookkeeping compared to the recursive
//!   formulation.
//!
//! The traversal reports [steps](DfsStep) in the order of the classic
//! recursive algorithm. Vertex colors are stored in a caller-provided
//! [`ColorMap`], which allows to share them between traversals.
//!
//! ```
//! use incigraph::{
//!     storage::DirectedIncidenceGraph,
//!     visit::{traverse_tree, ColorArray, DfsStep},
//! };
//!
//! let graph: DirectedIncidenceGraph = [(0, 1), (1, 2), (2, 0)].into_iter().collect();
//!
//! let back_edges = traverse_tree(&graph, 0, ColorArray::new())
//!     .filter_map(|step| match step {
//!         DfsStep::BackEdge(edge) => Some(edge),
//!         _ => None,
//!     })
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(back_edges, vec![2]);
//! ```

pub mod color_map;
pub mod dfs;
pub mod handler;

mod raw;

#[doc(inline)]
pub use self::{
    color_map::{BitColorMap, Color, ColorArray, ColorMap},
    dfs::{traverse_forest, traverse_tree, Dfs, DfsPostOrder, DfsSteps, DfsTreeEdges},
    handler::{traverse_with, DfsHandler},
};

use std::ops::Range;

use crate::core::{GraphBase, Vertex};

/// Trait for a specific graph traversal approach.
#[doc(alias = "Walker")]
pub trait Visitor<G> {
    /// The type of the elements being visited.
    type Item;

    /// Advances the visitor and returns the next visited element in given
    /// graph.
    ///
    /// The difference from the [`Iterator::next`] is that the visitor doesn't
    /// hold a reference to the graph and thus allows passing the visitor
    /// around without lifetime problems.
    fn visit_next(&mut self, graph: &G) -> Option<Self::Item>;

    /// Returns an [iterator](Iterator) that uses the visitor to iterate over
    /// the elements in given graph.
    fn iter<'a>(&'a mut self, graph: &'a G) -> Iter<'a, Self, G>
    where
        Self: Sized,
    {
        Iter {
            visitor: self,
            graph,
        }
    }

    /// Converts the visitor into an [iterator](Iterator) to visit the elements
    /// in given graph.
    fn into_iter(self, graph: &G) -> IntoIter<'_, Self, G>
    where
        Self: Sized,
    {
        IntoIter {
            visitor: self,
            graph,
        }
    }
}

/// Visitor iterator returned from [`Visitor::iter`].
pub struct Iter<'a, V, G> {
    visitor: &'a mut V,
    graph: &'a G,
}

impl<'a, V, G> Iterator for Iter<'a, V, G>
where
    V: Visitor<G>,
{
    type Item = V::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.visitor.visit_next(self.graph)
    }
}

/// Visitor iterator returned from [`Visitor::into_iter`].
pub struct IntoIter<'a, V, G> {
    visitor: V,
    graph: &'a G,
}

impl<'a, V, G> Iterator for IntoIter<'a, V, G>
where
    V: Visitor<G>,
{
    type Item = V::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.visitor.visit_next(self.graph)
    }
}

/// A collection of starting vertices for a forest traversal.
///
/// This trait is implemented for any [`Iterator`] of vertices.
pub trait VisitRoots {
    /// Returns next vertex to start the traversal from.
    ///
    /// Note that the returned vertex might have already been visited. It is
    /// the responsibility of the visitor to skip such vertices.
    fn next_root(&mut self) -> Option<Vertex>;

    /// Returns `true` if the collection can determine that all remaining roots
    /// have already been visited, given the number of vertices discovered so
    /// far.
    ///
    /// By default, `false` is returned which effectively delegates the
    /// indication of being done for [`VisitRoots::next_root`] by returning
    /// `None`.
    fn is_done(&mut self, _discovered: usize) -> bool {
        false
    }
}

impl<T> VisitRoots for T
where
    T: Iterator<Item = Vertex>,
{
    fn next_root(&mut self) -> Option<Vertex> {
        self.next()
    }
}

/// A [`VisitRoots`] collection for visiting all vertices in a graph, in
/// increasing order.
#[derive(Debug, Clone)]
pub struct VisitAll {
    vertices: Range<Vertex>,
    vertex_count: usize,
}

impl VisitAll {
    /// Creates the collection from the given graph.
    pub fn new<G: GraphBase>(graph: &G) -> Self {
        let vertex_count = graph.vertex_count();
        Self {
            vertices: 0..vertex_count as Vertex,
            vertex_count,
        }
    }
}

impl VisitRoots for VisitAll {
    fn next_root(&mut self) -> Option<Vertex> {
        self.vertices.next()
    }

    // Every vertex was discovered, the remaining roots would all be skipped.
    // This holds only if the traversal started with all vertices white, in
    // other cases the roots are simply exhausted.
    fn is_done(&mut self, discovered: usize) -> bool {
        discovered >= self.vertex_count
    }
}

/// Kind of a [`DfsStep`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfsStepKind {
    StartVertex,
    DiscoverVertex,
    FinishVertex,
    ExamineEdge,
    TreeEdge,
    BackEdge,
    ForwardOrCrossEdge,
    FinishEdge,
}

impl DfsStepKind {
    /// Returns `true` for kinds carrying a vertex.
    pub fn is_vertex(&self) -> bool {
        matches!(
            self,
            DfsStepKind::StartVertex | DfsStepKind::DiscoverVertex | DfsStepKind::FinishVertex
        )
    }

    /// Returns `true` for the kinds that classify an examined edge.
    pub fn is_classification(&self) -> bool {
        matches!(
            self,
            DfsStepKind::TreeEdge | DfsStepKind::BackEdge | DfsStepKind::ForwardOrCrossEdge
        )
    }
}

/// Depth-first search step.
///
/// The steps of one component are:
///
/// * [`StartVertex`](DfsStep::StartVertex) of the root, followed by its
///   [`DiscoverVertex`](DfsStep::DiscoverVertex),
/// * for every out-edge of a discovered vertex an
///   [`ExamineEdge`](DfsStep::ExamineEdge), one classification and a
///   [`FinishEdge`](DfsStep::FinishEdge); a tree edge is finished only after
///   the whole subtree of its head,
/// * [`FinishVertex`](DfsStep::FinishVertex) once all out-edges of the vertex
///   were finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfsStep<E> {
    /// A traversal of a new component starts from the vertex.
    StartVertex(Vertex),

    /// The vertex was discovered (colored gray).
    DiscoverVertex(Vertex),

    /// All out-edges of the vertex were finished (colored black).
    FinishVertex(Vertex),

    /// The edge is about to be classified.
    ExamineEdge(E),

    /// An edge of the tree formed by the traversal. Its head is discovered
    /// next.
    TreeEdge(E),

    /// An edge to a gray vertex, that is an ancestor on the current path.
    ///
    /// Presence of a back edge in a directed graph indicates a cycle. In an
    /// undirected graph, the reverse direction of the tree edge leading to a
    /// vertex is reported as a back edge too.
    BackEdge(E),

    /// An edge to a black vertex.
    ///
    /// Forward edge leads to a descendant in the same branch of the traversal
    /// tree, cross edge leads to a vertex in a different branch or a
    /// different tree.
    ForwardOrCrossEdge(E),

    /// The edge is done. For a tree edge, this happens after its head is
    /// finished.
    FinishEdge(E),
}

impl<E: Copy> DfsStep<E> {
    pub fn kind(&self) -> DfsStepKind {
        match self {
            DfsStep::StartVertex(_) => DfsStepKind::StartVertex,
            DfsStep::DiscoverVertex(_) => DfsStepKind::DiscoverVertex,
            DfsStep::FinishVertex(_) => DfsStepKind::FinishVertex,
            DfsStep::ExamineEdge(_) => DfsStepKind::ExamineEdge,
            DfsStep::TreeEdge(_) => DfsStepKind::TreeEdge,
            DfsStep::BackEdge(_) => DfsStepKind::BackEdge,
            DfsStep::ForwardOrCrossEdge(_) => DfsStepKind::ForwardOrCrossEdge,
            DfsStep::FinishEdge(_) => DfsStepKind::FinishEdge,
        }
    }

    /// Returns the vertex payload, if the step carries one.
    pub fn vertex(&self) -> Option<Vertex> {
        match *self {
            DfsStep::StartVertex(v) | DfsStep::DiscoverVertex(v) | DfsStep::FinishVertex(v) => {
                Some(v)
            }
            _ => None,
        }
    }

    /// Returns the edge payload, if the step carries one.
    pub fn edge(&self) -> Option<E> {
        match *self {
            DfsStep::ExamineEdge(e)
            | DfsStep::TreeEdge(e)
            | DfsStep::BackEdge(e)
            | DfsStep::ForwardOrCrossEdge(e)
            | DfsStep::FinishEdge(e) => Some(e),
            _ => None,
        }
    }
}
