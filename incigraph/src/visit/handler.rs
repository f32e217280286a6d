//! Callback-based consumption of depth-first traversal.
//!
//! A [`DfsHandler`] receives every [step](super::DfsStep) of the traversal as
//! a method call. All methods have a default implementation that does nothing
//! and continues, so a handler overrides only what it needs. Returning
//! [`ControlFlow::Break`] from any method stops the traversal.
//!
//! ```
//! use std::ops::ControlFlow;
//!
//! use incigraph::{
//!     storage::DirectedIncidenceGraph,
//!     visit::{traverse_with, ColorArray, DfsHandler, VisitAll},
//! };
//!
//! struct CycleDetector;
//!
//! impl<E> DfsHandler<E> for CycleDetector {
//!     fn back_edge(&mut self, _edge: E) -> ControlFlow<()> {
//!         ControlFlow::Break(())
//!     }
//! }
//!
//! let acyclic: DirectedIncidenceGraph = [(0, 1), (1, 2), (0, 2)].into_iter().collect();
//! let cyclic: DirectedIncidenceGraph = [(0, 1), (1, 2), (2, 1)].into_iter().collect();
//!
//! let roots = VisitAll::new(&acyclic);
//! let flow = traverse_with(&acyclic, roots, ColorArray::new(), &mut CycleDetector);
//! assert!(flow.is_continue());
//!
//! let roots = VisitAll::new(&cyclic);
//! let flow = traverse_with(&cyclic, roots, ColorArray::new(), &mut CycleDetector);
//! assert!(flow.is_break());
//! ```

use std::ops::ControlFlow;

use crate::core::{EdgeEndpoints, OutEdges, Vertex};

use super::{traverse_forest, ColorMap, DfsStep, VisitRoots};

/// Receiver of depth-first traversal steps.
#[allow(unused_variables)]
pub trait DfsHandler<E> {
    fn start_vertex(&mut self, vertex: Vertex) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn discover_vertex(&mut self, vertex: Vertex) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn finish_vertex(&mut self, vertex: Vertex) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn examine_edge(&mut self, edge: E) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn tree_edge(&mut self, edge: E) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn back_edge(&mut self, edge: E) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn forward_or_cross_edge(&mut self, edge: E) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    fn finish_edge(&mut self, edge: E) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Dispatches the step to the corresponding method.
    fn handle(&mut self, step: DfsStep<E>) -> ControlFlow<()> {
        match step {
            DfsStep::StartVertex(v) => self.start_vertex(v),
            DfsStep::DiscoverVertex(v) => self.discover_vertex(v),
            DfsStep::FinishVertex(v) => self.finish_vertex(v),
            DfsStep::ExamineEdge(e) => self.examine_edge(e),
            DfsStep::TreeEdge(e) => self.tree_edge(e),
            DfsStep::BackEdge(e) => self.back_edge(e),
            DfsStep::ForwardOrCrossEdge(e) => self.forward_or_cross_edge(e),
            DfsStep::FinishEdge(e) => self.finish_edge(e),
        }
    }
}

impl<E, H: DfsHandler<E> + ?Sized> DfsHandler<E> for &mut H {
    fn handle(&mut self, step: DfsStep<E>) -> ControlFlow<()> {
        (**self).handle(step)
    }
}

/// Eagerly traverses the graph from the roots and feeds every step to the
/// handler.
///
/// Returns [`ControlFlow::Break`] if the handler stopped the traversal.
pub fn traverse_with<G, S, M, H>(graph: &G, roots: S, colors: M, handler: &mut H) -> ControlFlow<()>
where
    G: EdgeEndpoints + OutEdges,
    S: VisitRoots,
    M: ColorMap,
    H: DfsHandler<G::Edge> + ?Sized,
{
    let mut steps = traverse_forest(graph, roots, colors);

    // The enumerator panics when advanced after exhaustion, `find_map` stops
    // at the first `None`.
    steps
        .find_map(|step| match handler.handle(step) {
            ControlFlow::Continue(()) => None,
            ControlFlow::Break(()) => Some(()),
        })
        .map_or(ControlFlow::Continue(()), ControlFlow::Break)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        storage::{DirectedIncidenceGraph, UndirectedIncidenceGraph},
        visit::{ColorArray, DfsStepKind, VisitAll},
    };

    #[derive(Default)]
    struct Recorder {
        kinds: Vec<DfsStepKind>,
        postorder: Vec<Vertex>,
    }

    impl DfsHandler<i32> for Recorder {
        fn handle(&mut self, step: DfsStep<i32>) -> ControlFlow<()> {
            self.kinds.push(step.kind());

            if let DfsStep::FinishVertex(v) = step {
                self.postorder.push(v);
            }

            ControlFlow::Continue(())
        }
    }

    #[test]
    fn records_all_steps() {
        let graph: DirectedIncidenceGraph = [(0, 1), (1, 2), (2, 0)].into_iter().collect();
        let mut recorder = Recorder::default();

        let flow = traverse_with(&graph, [0].into_iter(), ColorArray::new(), &mut recorder);

        assert!(flow.is_continue());
        assert_eq!(recorder.kinds.len(), 16);
        assert_eq!(recorder.postorder, vec![2, 1, 0]);
    }

    #[test]
    fn topological_order() {
        struct Postorder(Vec<Vertex>);

        impl<E> DfsHandler<E> for Postorder {
            fn finish_vertex(&mut self, vertex: Vertex) -> ControlFlow<()> {
                self.0.push(vertex);
                ControlFlow::Continue(())
            }
        }

        let graph: DirectedIncidenceGraph = [(3, 1), (1, 0), (3, 2), (2, 0), (4, 3)]
            .into_iter()
            .collect();

        let mut handler = Postorder(Vec::new());
        let roots = VisitAll::new(&graph);
        let _ = traverse_with(&graph, roots, ColorArray::new(), &mut handler);

        let mut order = handler.0;
        order.reverse();

        let position = |v: Vertex| order.iter().position(|&u| u == v).unwrap();
        for (tail, head) in [(3, 1), (1, 0), (3, 2), (2, 0), (4, 3)] {
            assert!(position(tail) < position(head));
        }
    }

    #[test]
    fn break_stops_traversal() {
        struct StopAfter(usize);

        impl<E> DfsHandler<E> for StopAfter {
            fn discover_vertex(&mut self, _vertex: Vertex) -> ControlFlow<()> {
                if self.0 == 0 {
                    return ControlFlow::Break(());
                }
                self.0 -= 1;
                ControlFlow::Continue(())
            }
        }

        let graph: UndirectedIncidenceGraph = (0..10).map(|v| (v, v + 1)).collect();
        let mut colors = ColorArray::new();

        let flow = traverse_with(&graph, VisitAll::new(&graph), &mut colors, &mut StopAfter(3));

        assert!(flow.is_break());
        // The fourth vertex was discovered and then the traversal stopped.
        assert!(!colors.is_white(3));
        assert!(colors.is_white(4));
    }
}
