use crate::core::{EdgeEndpoints, OutEdges, Vertex};

use super::{
    color_map::{Color, ColorMap},
    DfsStep,
};

// Suspended activation of the vertex. `pending` holds the tree edge along
// which the traversal descended from this vertex, so that it can be finished
// once the child is finished.
#[derive(Debug)]
pub(crate) struct Frame<G: OutEdges> {
    vertex: Vertex,
    pending: Option<G::Edge>,
    cursor: G::Cursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State<E> {
    // No component is in progress.
    Idle,
    // A component is requested from this root.
    Start(Vertex),
    // The vertex is about to be discovered and its frame pushed.
    Discover(Vertex),
    // Continue with the frame on top of the stack.
    Advance,
    // The edge was examined and needs to be classified.
    Classify(E),
    // The non-tree edge was classified and needs to be finished.
    FinishEdge(E),
}

/// Explicit-stack depth-first search producing one step per call.
///
/// The stack of frames replaces the call stack of the recursive formulation,
/// therefore the traversal depth is limited only by the heap. The state is
/// independent on the graph and the color map, both are passed to every
/// [`next_step`](RawDfs::next_step) call.
pub(crate) struct RawDfs<G: OutEdges> {
    stack: Vec<Frame<G>>,
    state: State<G::Edge>,
    root: Vertex,
    discovered: usize,
}

impl<G: OutEdges> RawDfs<G> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(depth: usize) -> Self {
        Self {
            stack: Vec::with_capacity(depth),
            state: State::Idle,
            root: 0,
            discovered: 0,
        }
    }

    /// Requests a new component from the root. The root is checked on the
    /// next step.
    ///
    /// # Panics
    ///
    /// Panics if the previous component has frames pending.
    pub fn start(&mut self, root: Vertex) {
        assert!(
            self.stack.is_empty(),
            "dfs restarted with {} frames pending",
            self.stack.len()
        );

        self.state = State::Start(root);
    }

    /// Returns `true` if no component is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == State::Idle
    }

    /// Number of vertices discovered since the last [reset](RawDfs::reset).
    pub fn discovered(&self) -> usize {
        self.discovered
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Abandons the component in progress. The stack storage is kept for
    /// reuse.
    pub fn abort(&mut self) {
        self.stack.clear();
        self.state = State::Idle;
    }

    pub fn reset(&mut self) {
        self.abort();
        self.discovered = 0;
    }

    /// Produces the next step of the current component, or `None` when the
    /// component is complete.
    pub fn next_step<M>(&mut self, graph: &G, colors: &mut M) -> Option<DfsStep<G::Edge>>
    where
        G: EdgeEndpoints,
        M: ColorMap,
    {
        loop {
            match self.state {
                State::Idle => return None,
                State::Start(root) => {
                    if !graph.contains_vertex(root) || !colors.is_white(root) {
                        self.state = State::Idle;
                        return None;
                    }

                    tracing::trace!(root, "dfs component started");

                    self.root = root;
                    self.state = State::Discover(root);
                    return Some(DfsStep::StartVertex(root));
                }
                State::Discover(vertex) => {
                    colors.set_color(vertex, Color::Gray);
                    self.stack.push(Frame {
                        vertex,
                        pending: None,
                        cursor: graph.out_edges_cursor(vertex),
                    });
                    self.discovered += 1;

                    self.state = State::Advance;
                    return Some(DfsStep::DiscoverVertex(vertex));
                }
                State::Advance => {
                    let Some(frame) = self.stack.last_mut() else {
                        tracing::trace!(root = self.root, "dfs component finished");

                        self.state = State::Idle;
                        return None;
                    };

                    // Returning from the child.
                    if let Some(edge) = frame.pending.take() {
                        return Some(DfsStep::FinishEdge(edge));
                    }

                    match graph.next_out_edge(&mut frame.cursor) {
                        Some(edge) => {
                            self.state = State::Classify(edge);
                            return Some(DfsStep::ExamineEdge(edge));
                        }
                        None => {
                            let vertex = frame.vertex;
                            self.stack.pop();
                            colors.set_color(vertex, Color::Black);
                            return Some(DfsStep::FinishVertex(vertex));
                        }
                    }
                }
                State::Classify(edge) => {
                    // Unresolvable edges contribute nothing beyond the
                    // examination.
                    let Some(head) = graph.head(edge) else {
                        self.state = State::Advance;
                        continue;
                    };

                    match colors.color(head) {
                        None | Some(Color::White) => {
                            if let Some(frame) = self.stack.last_mut() {
                                frame.pending = Some(edge);
                            }

                            self.state = State::Discover(head);
                            return Some(DfsStep::TreeEdge(edge));
                        }
                        Some(Color::Gray) => {
                            self.state = State::FinishEdge(edge);
                            return Some(DfsStep::BackEdge(edge));
                        }
                        Some(Color::Black) => {
                            self.state = State::FinishEdge(edge);
                            return Some(DfsStep::ForwardOrCrossEdge(edge));
                        }
                    }
                }
                State::FinishEdge(edge) => {
                    self.state = State::Advance;
                    return Some(DfsStep::FinishEdge(edge));
                }
            }
        }
    }
}
