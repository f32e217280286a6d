use std::{
    borrow::BorrowMut,
    iter,
    marker::PhantomData,
};

use crate::core::{EdgeEndpoints, OutEdges, Vertex};

use super::{raw::RawDfs, ColorMap, DfsStep, VisitAll, VisitRoots, Visitor};

/// Traverses the component reachable from the root and lazily reports all
/// [steps](DfsStep).
///
/// Nothing is reported if the root is not a vertex of the graph or it is not
/// white in the color map.
///
/// # Panics
///
/// The returned iterator panics when advanced after it returned `None`.
pub fn traverse_tree<'a, G, M>(
    graph: &'a G,
    root: Vertex,
    colors: M,
) -> impl Iterator<Item = DfsStep<G::Edge>> + 'a
where
    G: EdgeEndpoints + OutEdges,
    M: ColorMap + 'a,
{
    DfsStepsRooted::new(DfsSteps::new(graph), root, colors).into_iter(graph)
}

/// Traverses the graph from every root that is still white when it is reached
/// and lazily reports all [steps](DfsStep).
///
/// The color map is shared by all components, so every vertex is discovered
/// at most once. Roots that are not vertices of the graph are skipped.
///
/// # Panics
///
/// The returned iterator panics when advanced after it returned `None`.
pub fn traverse_forest<'a, G, S, M>(
    graph: &'a G,
    roots: S,
    colors: M,
) -> impl Iterator<Item = DfsStep<G::Edge>> + 'a
where
    G: EdgeEndpoints + OutEdges,
    S: VisitRoots + 'a,
    M: ColorMap + 'a,
{
    DfsStepsMulti::new(DfsSteps::new(graph), roots, colors).into_iter(graph)
}

/// Reusable state of the step enumerator.
///
/// The explicit stack allocated by one traversal is kept for the next one.
/// A traversal borrows the state, so the state cannot be reset or restarted
/// while a traversal is in progress.
///
/// # Examples
///
/// ```
/// use incigraph::{
///     storage::DirectedIncidenceGraph,
///     visit::{ColorArray, DfsStep, DfsSteps, Visitor},
/// };
///
/// let graph: DirectedIncidenceGraph = [(0, 1), (2, 1)].into_iter().collect();
///
/// let mut dfs = DfsSteps::new(&graph);
/// let mut colors = ColorArray::new();
///
/// let first = dfs.start(0, &mut colors).iter(&graph).count();
/// let second = dfs.start(2, &mut colors).iter(&graph).collect::<Vec<_>>();
///
/// assert_eq!(first, 8);
/// assert!(second.contains(&DfsStep::ForwardOrCrossEdge(1)));
/// ```
pub struct DfsSteps<G: OutEdges> {
    raw: RawDfs<G>,
}

impl<G: OutEdges> DfsSteps<G> {
    pub fn new(_graph: &G) -> Self {
        Self { raw: RawDfs::new() }
    }

    /// Creates the state with the stack preallocated for the given depth.
    pub fn with_capacity(depth: usize) -> Self {
        Self {
            raw: RawDfs::with_capacity(depth),
        }
    }

    pub fn start<M>(&mut self, root: Vertex, colors: M) -> DfsStepsRooted<G, M, &mut Self>
    where
        M: ColorMap,
    {
        DfsStepsRooted::new(self, root, colors)
    }

    pub fn start_all<M>(&mut self, graph: &G, colors: M) -> DfsStepsMulti<G, VisitAll, M, &mut Self>
    where
        M: ColorMap,
    {
        DfsStepsMulti::new(self, VisitAll::new(graph), colors)
    }

    pub fn start_multi<S, M>(&mut self, roots: S, colors: M) -> DfsStepsMulti<G, S, M, &mut Self>
    where
        S: VisitRoots,
        M: ColorMap,
    {
        DfsStepsMulti::new(self, roots, colors)
    }

    pub fn reset(&mut self) {
        self.raw.reset();
    }
}

/// Step enumerator of a single component, created by [`DfsSteps::start`] or
/// [`traverse_tree`].
///
/// Dropping the enumerator abandons the traversal and clears the stack.
pub struct DfsStepsRooted<G, M, R>
where
    G: OutEdges,
    R: BorrowMut<DfsSteps<G>>,
{
    steps: R,
    colors: M,
    exhausted: bool,
    ty: PhantomData<fn(&G)>,
}

impl<G, M, R> DfsStepsRooted<G, M, R>
where
    G: OutEdges,
    R: BorrowMut<DfsSteps<G>>,
{
    fn new(mut steps: R, root: Vertex, colors: M) -> Self {
        let raw = &mut steps.borrow_mut().raw;
        raw.reset();
        raw.start(root);

        Self {
            steps,
            colors,
            exhausted: false,
            ty: PhantomData,
        }
    }

    pub fn colors(&self) -> &M {
        &self.colors
    }

    /// Returns the number of vertices on the current path.
    pub fn depth(&self) -> usize {
        self.steps.borrow().raw.depth()
    }
}

impl<G, M, R> Visitor<G> for DfsStepsRooted<G, M, R>
where
    G: EdgeEndpoints + OutEdges,
    M: ColorMap,
    R: BorrowMut<DfsSteps<G>>,
{
    type Item = DfsStep<G::Edge>;

    /// # Panics
    ///
    /// Panics if called after the traversal was exhausted.
    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        assert!(!self.exhausted, "dfs advanced after it was exhausted");

        let step = self
            .steps
            .borrow_mut()
            .raw
            .next_step(graph, &mut self.colors);

        self.exhausted = step.is_none();
        step
    }
}

impl<G, M, R> Drop for DfsStepsRooted<G, M, R>
where
    G: OutEdges,
    R: BorrowMut<DfsSteps<G>>,
{
    fn drop(&mut self) {
        self.steps.borrow_mut().raw.abort();
    }
}

/// Step enumerator of a forest, created by [`DfsSteps::start_all`],
/// [`DfsSteps::start_multi`] or [`traverse_forest`].
///
/// Dropping the enumerator abandons the traversal and clears the stack.
pub struct DfsStepsMulti<G, S, M, R>
where
    G: OutEdges,
    R: BorrowMut<DfsSteps<G>>,
{
    steps: R,
    roots: S,
    colors: M,
    exhausted: bool,
    ty: PhantomData<fn(&G)>,
}

impl<G, S, M, R> DfsStepsMulti<G, S, M, R>
where
    G: OutEdges,
    R: BorrowMut<DfsSteps<G>>,
{
    fn new(mut steps: R, roots: S, colors: M) -> Self {
        steps.borrow_mut().raw.reset();

        Self {
            steps,
            roots,
            colors,
            exhausted: false,
            ty: PhantomData,
        }
    }

    pub fn colors(&self) -> &M {
        &self.colors
    }

    pub fn depth(&self) -> usize {
        self.steps.borrow().raw.depth()
    }
}

impl<G, S, M, R> Visitor<G> for DfsStepsMulti<G, S, M, R>
where
    G: EdgeEndpoints + OutEdges,
    S: VisitRoots,
    M: ColorMap,
    R: BorrowMut<DfsSteps<G>>,
{
    type Item = DfsStep<G::Edge>;

    /// # Panics
    ///
    /// Panics if called after the traversal was exhausted.
    fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
        assert!(!self.exhausted, "dfs advanced after it was exhausted");

        let raw = &mut self.steps.borrow_mut().raw;

        loop {
            if let Some(step) = raw.next_step(graph, &mut self.colors) {
                return Some(step);
            }

            if self.roots.is_done(raw.discovered()) {
                break;
            }

            let colors = &self.colors;
            let roots = &mut self.roots;
            let root = iter::from_fn(|| roots.next_root())
                .find(|&root| graph.contains_vertex(root) && colors.is_white(root));

            match root {
                Some(root) => raw.start(root),
                None => break,
            }
        }

        self.exhausted = true;
        None
    }
}

impl<G, S, M, R> Drop for DfsStepsMulti<G, S, M, R>
where
    G: OutEdges,
    R: BorrowMut<DfsSteps<G>>,
{
    fn drop(&mut self) {
        self.steps.borrow_mut().raw.abort();
    }
}

// Reusable visitors that report only a projection of the steps. Each consists
// of the reusable state and the rooted and multi-root visitors borrowing it.
macro_rules! projection {
    (
        $(#[$attr:meta])*
        $name:ident, $rooted:ident, $multi:ident,
        type Item = $item:ty;
        $pattern:pat => $value:expr
    ) => {
        $(#[$attr])*
        pub struct $name<G: OutEdges> {
            steps: DfsSteps<G>,
        }

        pub struct $rooted<'a, G: OutEdges, M> {
            inner: DfsStepsRooted<G, M, &'a mut DfsSteps<G>>,
        }

        pub struct $multi<'a, G: OutEdges, S, M> {
            inner: DfsStepsMulti<G, S, M, &'a mut DfsSteps<G>>,
        }

        impl<G: OutEdges> $name<G> {
            pub fn new(graph: &G) -> Self {
                Self {
                    steps: DfsSteps::new(graph),
                }
            }

            pub fn start<M: ColorMap>(&mut self, root: Vertex, colors: M) -> $rooted<'_, G, M> {
                $rooted {
                    inner: self.steps.start(root, colors),
                }
            }

            pub fn start_all<M: ColorMap>(
                &mut self,
                graph: &G,
                colors: M,
            ) -> $multi<'_, G, VisitAll, M> {
                $multi {
                    inner: self.steps.start_all(graph, colors),
                }
            }

            pub fn start_multi<S: VisitRoots, M: ColorMap>(
                &mut self,
                roots: S,
                colors: M,
            ) -> $multi<'_, G, S, M> {
                $multi {
                    inner: self.steps.start_multi(roots, colors),
                }
            }

            pub fn reset(&mut self) {
                self.steps.reset();
            }
        }

        impl<'a, G, M> Visitor<G> for $rooted<'a, G, M>
        where
            G: EdgeEndpoints + OutEdges,
            M: ColorMap,
        {
            type Item = $item;

            fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
                loop {
                    if let $pattern = self.inner.visit_next(graph)? {
                        return Some($value);
                    }
                }
            }
        }

        impl<'a, G, S, M> Visitor<G> for $multi<'a, G, S, M>
        where
            G: EdgeEndpoints + OutEdges,
            S: VisitRoots,
            M: ColorMap,
        {
            type Item = $item;

            fn visit_next(&mut self, graph: &G) -> Option<Self::Item> {
                loop {
                    if let $pattern = self.inner.visit_next(graph)? {
                        return Some($value);
                    }
                }
            }
        }
    };
}

projection! {
    /// Depth-first traversal reporting vertices in the order of discovery
    /// (preorder).
    ///
    /// # Examples
    ///
    /// ```
    /// use incigraph::{
    ///     storage::UndirectedIncidenceGraph,
    ///     visit::{ColorArray, Dfs, Visitor},
    /// };
    ///
    /// let graph: UndirectedIncidenceGraph =
    ///     [(0, 1), (1, 2), (1, 3), (1, 4), (2, 5), (5, 4)].into_iter().collect();
    ///
    /// let vertices = Dfs::new(&graph)
    ///     .start(0, ColorArray::new())
    ///     .iter(&graph)
    ///     .collect::<Vec<_>>();
    ///
    /// assert_eq!(vertices, vec![0, 1, 2, 5, 4, 3]);
    /// ```
    Dfs, DfsRooted, DfsMulti,
    type Item = Vertex;
    DfsStep::DiscoverVertex(vertex) => vertex
}

projection! {
    /// Depth-first traversal reporting vertices when they are finished
    /// (postorder).
    DfsPostOrder, DfsPostOrderRooted, DfsPostOrderMulti,
    type Item = Vertex;
    DfsStep::FinishVertex(vertex) => vertex
}

projection! {
    /// Depth-first traversal reporting the edges of the traversal tree.
    DfsTreeEdges, DfsTreeEdgesRooted, DfsTreeEdgesMulti,
    type Item = G::Edge;
    DfsStep::TreeEdge(edge) => edge
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{
        core::Endpoints,
        storage::{DirectedIncidenceGraph, SimpleIncidenceGraph, UndirectedIncidenceGraph},
        visit::{BitColorMap, Color, ColorArray},
    };

    fn sample() -> UndirectedIncidenceGraph {
        // 0 - 1 - 2    3 - 4
        //      \ /
        //       5
        [(0, 1), (1, 2), (2, 5), (5, 1), (3, 4)]
            .into_iter()
            .collect()
    }

    #[test]
    fn dfs_preorder() {
        let graph = sample();

        let vertices = Dfs::new(&graph)
            .start(0, ColorArray::new())
            .iter(&graph)
            .collect::<Vec<_>>();

        assert_eq!(vertices, vec![0, 1, 2, 5]);
    }

    #[test]
    fn dfs_postorder() {
        let graph = sample();

        let vertices = DfsPostOrder::new(&graph)
            .start(0, ColorArray::new())
            .iter(&graph)
            .collect::<Vec<_>>();

        assert_eq!(vertices, vec![5, 2, 1, 0]);
    }

    #[test]
    fn dfs_tree_edges() {
        let graph: SimpleIncidenceGraph = [(0, 1), (0, 2), (1, 2), (2, 0)].into_iter().collect();

        let edges = DfsTreeEdges::new(&graph)
            .start(0, ColorArray::new())
            .iter(&graph)
            .collect::<Vec<_>>();

        assert_eq!(edges, vec![Endpoints::new(0, 1), Endpoints::new(1, 2)]);
    }

    #[test]
    fn dfs_all() {
        let graph = sample();

        let vertices = Dfs::new(&graph)
            .start_all(&graph, BitColorMap::new())
            .iter(&graph)
            .collect::<Vec<_>>();

        assert_eq!(vertices, vec![0, 1, 2, 5, 3, 4]);
    }

    #[test]
    fn dfs_multi() {
        let graph = sample();

        let vertices = DfsPostOrder::new(&graph)
            .start_multi([4, 2].into_iter(), HashMap::<Vertex, Color>::new())
            .iter(&graph)
            .collect::<Vec<_>>();

        assert_eq!(vertices, vec![3, 4, 0, 5, 1, 2]);
    }

    #[test]
    fn reuse_state() {
        let graph = sample();
        let mut dfs = DfsSteps::new(&graph);

        let mut colors = ColorArray::new();
        let first = dfs.start(3, &mut colors).iter(&graph).count();
        assert!(first > 0);
        assert_eq!(colors.color(4), Some(Color::Black));

        // Colors are not touched by reset, so the same root reports nothing.
        dfs.reset();
        let again = dfs.start(3, &mut colors).iter(&graph).count();
        assert_eq!(again, 0);

        let fresh = dfs.start(3, ColorArray::new()).iter(&graph).count();
        assert_eq!(fresh, first);
    }

    #[test]
    fn drop_clears_stack() {
        let graph = sample();
        let mut dfs = DfsSteps::new(&graph);

        {
            let mut visitor = dfs.start(0, ColorArray::new());
            for _ in 0..6 {
                visitor.visit_next(&graph);
            }
            assert!(visitor.depth() > 0);
        }

        // Restarting asserts the stack is empty.
        let vertices = dfs
            .start(0, ColorArray::new())
            .iter(&graph)
            .filter_map(|step| step.vertex())
            .count();
        assert!(vertices > 0);
    }

    #[test]
    fn root_out_of_range() {
        let graph = sample();

        assert_eq!(traverse_tree(&graph, 42, ColorArray::new()).count(), 0);
        assert_eq!(traverse_tree(&graph, -1, ColorArray::new()).count(), 0);
    }

    #[test]
    fn visit_all_done_early() {
        // Vertex 0 reaches every vertex, the remaining roots are not consumed.
        let graph: DirectedIncidenceGraph = [(0, 1), (1, 2), (0, 3)].into_iter().collect();

        let mut roots = VisitAll::new(&graph);
        assert!(!roots.is_done(3));
        assert!(roots.is_done(4));

        let starts = traverse_forest(&graph, VisitAll::new(&graph), ColorArray::new())
            .filter(|step| matches!(step, DfsStep::StartVertex(_)))
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn advance_after_exhaustion() {
        let graph = sample();
        let mut dfs = DfsSteps::new(&graph);
        let mut visitor = dfs.start(3, ColorArray::new());

        while visitor.visit_next(&graph).is_some() {}

        visitor.visit_next(&graph);
    }

    #[test]
    #[should_panic(expected = "exhausted")]
    fn forest_advance_after_exhaustion() {
        let graph = sample();
        let mut iter = traverse_forest(&graph, VisitAll::new(&graph), ColorArray::new());

        for _ in iter.by_ref() {}

        iter.next();
    }
}
