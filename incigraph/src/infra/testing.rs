use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{
    core::{EdgeEndpoints, OutEdges, Vertex},
    storage::GraphBuilder,
    visit::DfsStep,
};

/// Plain list of edges over vertices `0..vertex_count`, the reference model
/// of compact graphs in property tests and fuzzing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeList {
    pub vertex_count: usize,
    pub edges: Vec<(Vertex, Vertex)>,
}

impl EdgeList {
    /// Builds the graph using the builder type.
    pub fn build<B: GraphBuilder>(&self) -> B::Graph {
        let mut builder = B::default();
        builder.ensure_vertex_count(self.vertex_count);

        for &(tail, head) in self.edges.iter() {
            // Negative vertices are rejected and skipped.
            let _ = builder.try_add(tail, head);
        }

        builder.build()
    }

    /// Out-neighbors of every vertex, in the order of insertion.
    ///
    /// In the undirected case, an edge is listed at both endpoints, but a
    /// self-loop only once.
    pub fn heads(&self, directed: bool) -> Vec<Vec<Vertex>> {
        let mut heads = vec![Vec::new(); self.vertex_count];
        for &(tail, head) in self.edges.iter() {
            heads[tail as usize].push(head);
            if !directed && tail != head {
                heads[head as usize].push(tail);
            }
        }
        heads
    }

    /// Out-neighbors of every vertex in the graph, in the order of its
    /// out-edges.
    pub fn heads_of<G: EdgeEndpoints + OutEdges>(graph: &G) -> Vec<Vec<Vertex>> {
        (0..graph.vertex_count() as Vertex)
            .map(|v| graph.out_edges(v).filter_map(|e| graph.head(e)).collect())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConsistencyCheckError {
    #[error("out-edge of vertex {0} reports a different tail")]
    OutEdgeTailMismatch(Vertex),
    #[error("out-edge of vertex {0} leads outside of the vertex range")]
    HeadOutOfRange(Vertex),
    #[error("out degree ({0}) is not equal to out-edges iterator count ({1})")]
    OutDegreeMismatch(usize, usize),
    #[error("cursor walk of vertex {0} differs from its out-edges iterator")]
    CursorIteratorMismatch(Vertex),
    #[error("vertex {0} outside of the vertex range is reported as present")]
    VertexOutOfRange(Vertex),
    #[error("out-edge entries ({0}) do not add up to edge count ({1})")]
    HandshakingLemma(usize, usize),
}

fn cmp<F, E>(actual: usize, expected: usize, error: F) -> Result<(), E>
where
    F: FnOnce(usize, usize) -> E,
{
    if actual == expected {
        Ok(())
    } else {
        Err(error(actual, expected))
    }
}

pub fn check_consistency<G>(graph: &G) -> Result<(), ConsistencyCheckError>
where
    G: EdgeEndpoints + OutEdges,
{
    let vertex_count = graph.vertex_count() as Vertex;

    for v in [-1, vertex_count] {
        if graph.contains_vertex(v) || graph.out_edges(v).next().is_some() {
            return Err(ConsistencyCheckError::VertexOutOfRange(v));
        }
    }

    let mut entries = 0;
    let mut loops = 0;

    for v in 0..vertex_count {
        let out_edges = graph.out_edges(v).collect::<Vec<_>>();

        for &e in out_edges.iter() {
            if graph.tail(e) != Some(v) {
                return Err(ConsistencyCheckError::OutEdgeTailMismatch(v));
            }

            match graph.head(e) {
                Some(head) if graph.contains_vertex(head) => {
                    if head == v {
                        loops += 1;
                    }
                }
                _ => return Err(ConsistencyCheckError::HeadOutOfRange(v)),
            }
        }

        cmp(
            graph.out_degree(v),
            out_edges.len(),
            ConsistencyCheckError::OutDegreeMismatch,
        )?;

        let mut cursor = graph.out_edges_cursor(v);
        let walked = std::iter::from_fn(|| graph.next_out_edge(&mut cursor)).collect::<Vec<_>>();

        if walked != out_edges {
            return Err(ConsistencyCheckError::CursorIteratorMismatch(v));
        }

        entries += out_edges.len();
    }

    // https://en.wikipedia.org/wiki/Handshaking_lemma
    //
    // Undirected self-loops are listed once, other edges once per endpoint.
    let edge_count = graph.edge_count();
    if graph.is_directed() {
        cmp(entries, edge_count, ConsistencyCheckError::HandshakingLemma)?;
    } else {
        cmp(
            entries + loops,
            2 * edge_count,
            ConsistencyCheckError::HandshakingLemma,
        )?;
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepCheckError {
    #[error("step {0} starts a component while another one is in progress")]
    NestedStart(usize),
    #[error("step {0} is not the discovery of the preceding start vertex or tree edge head")]
    MissingDiscovery(usize),
    #[error("step {0} discovers vertex {1} which was already discovered")]
    Rediscovered(usize, Vertex),
    #[error("step {0} finishes vertex {1} which is not the innermost discovered one")]
    UnbalancedVertex(usize, Vertex),
    #[error("step {0} finishes an edge which is not the innermost examined one")]
    UnbalancedEdge(usize),
    #[error("step {0} does not classify the edge examined by the previous step")]
    MissingClassification(usize),
    #[error("step {0} classifies an edge which was not examined by the previous step")]
    UnexpectedClassification(usize),
    #[error("step {0} does not finish the non-tree edge classified by the previous step")]
    MissingFinish(usize),
    #[error("traversal ended with {0} unfinished vertices or edges")]
    Unfinished(usize),
}

/// Checks that discoveries and finishes of vertices, as well as examinations
/// and finishes of edges, are properly nested.
pub fn check_parenthesization<E>(steps: &[DfsStep<E>]) -> Result<(), StepCheckError>
where
    E: Copy + PartialEq,
{
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    let mut discovered = FxHashSet::default();

    for (i, step) in steps.iter().enumerate() {
        match *step {
            DfsStep::StartVertex(v) => {
                if !vertices.is_empty() || !edges.is_empty() {
                    return Err(StepCheckError::NestedStart(i));
                }

                if steps.get(i + 1) != Some(&DfsStep::DiscoverVertex(v)) {
                    return Err(StepCheckError::MissingDiscovery(i + 1));
                }
            }
            DfsStep::DiscoverVertex(v) => {
                if !discovered.insert(v) {
                    return Err(StepCheckError::Rediscovered(i, v));
                }
                vertices.push(v);
            }
            DfsStep::FinishVertex(v) => {
                if vertices.pop() != Some(v) {
                    return Err(StepCheckError::UnbalancedVertex(i, v));
                }
            }
            DfsStep::ExamineEdge(e) => edges.push(e),
            DfsStep::FinishEdge(e) => {
                if edges.pop() != Some(e) {
                    return Err(StepCheckError::UnbalancedEdge(i));
                }
            }
            DfsStep::TreeEdge(_) | DfsStep::BackEdge(_) | DfsStep::ForwardOrCrossEdge(_) => {}
        }
    }

    match vertices.len() + edges.len() {
        0 => Ok(()),
        n => Err(StepCheckError::Unfinished(n)),
    }
}

/// Checks that every examined edge is classified exactly once, right after
/// its examination, and that the classification is followed by the expected
/// step.
pub fn check_edge_classification<E>(steps: &[DfsStep<E>]) -> Result<(), StepCheckError>
where
    E: Copy + PartialEq,
{
    for (i, step) in steps.iter().enumerate() {
        let previous = i.checked_sub(1).map(|j| steps[j]);
        let next = steps.get(i + 1).copied();

        match *step {
            DfsStep::ExamineEdge(e) => {
                let classified = matches!(
                    next,
                    Some(
                        DfsStep::TreeEdge(f)
                            | DfsStep::BackEdge(f)
                            | DfsStep::ForwardOrCrossEdge(f)
                    ) if f == e
                );

                if !classified {
                    return Err(StepCheckError::MissingClassification(i + 1));
                }
            }
            DfsStep::TreeEdge(e) | DfsStep::BackEdge(e) | DfsStep::ForwardOrCrossEdge(e) => {
                if previous != Some(DfsStep::ExamineEdge(e)) {
                    return Err(StepCheckError::UnexpectedClassification(i));
                }

                if let DfsStep::TreeEdge(_) = step {
                    if !matches!(next, Some(DfsStep::DiscoverVertex(_))) {
                        return Err(StepCheckError::MissingDiscovery(i + 1));
                    }
                } else if next != Some(DfsStep::FinishEdge(e)) {
                    return Err(StepCheckError::MissingFinish(i + 1));
                }
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::{marker::Directed, GraphBase},
        storage::DirectedIncidenceGraph,
    };

    #[test]
    fn consistent_graph() {
        let graph: DirectedIncidenceGraph = [(0, 1), (1, 1), (2, 0)].into_iter().collect();
        assert_eq!(check_consistency(&graph), Ok(()));
    }

    // Delegates everything to the inner graph, except for the out degree.
    struct OffByOne(DirectedIncidenceGraph);

    impl GraphBase for OffByOne {
        type Edge = i32;
        type EdgeType = Directed;

        fn vertex_count(&self) -> usize {
            self.0.vertex_count()
        }
    }

    impl EdgeEndpoints for OffByOne {
        fn edge_count(&self) -> usize {
            self.0.edge_count()
        }

        fn tail(&self, edge: i32) -> Option<Vertex> {
            self.0.tail(edge)
        }

        fn head(&self, edge: i32) -> Option<Vertex> {
            self.0.head(edge)
        }
    }

    impl OutEdges for OffByOne {
        type OutEdgesIter<'a> = <DirectedIncidenceGraph as OutEdges>::OutEdgesIter<'a>
        where
            Self: 'a;

        type Cursor = <DirectedIncidenceGraph as OutEdges>::Cursor;

        fn out_edges(&self, vertex: Vertex) -> Self::OutEdgesIter<'_> {
            self.0.out_edges(vertex)
        }

        fn out_edges_cursor(&self, vertex: Vertex) -> Self::Cursor {
            self.0.out_edges_cursor(vertex)
        }

        fn next_out_edge(&self, cursor: &mut Self::Cursor) -> Option<i32> {
            self.0.next_out_edge(cursor)
        }

        fn out_degree(&self, vertex: Vertex) -> usize {
            self.0.out_degree(vertex) + 1
        }
    }

    #[test]
    fn inconsistent_degree() {
        let graph: DirectedIncidenceGraph = [(0, 1), (1, 2)].into_iter().collect();

        assert_eq!(
            check_consistency(&OffByOne(graph)),
            Err(ConsistencyCheckError::OutDegreeMismatch(2, 1))
        );
    }

    #[test]
    fn unbalanced_steps() {
        let steps = [
            DfsStep::StartVertex(0),
            DfsStep::DiscoverVertex(0),
            DfsStep::ExamineEdge(0),
            DfsStep::TreeEdge(0),
            DfsStep::DiscoverVertex(1),
            DfsStep::FinishVertex(0),
        ];

        assert_eq!(
            check_parenthesization(&steps),
            Err(StepCheckError::UnbalancedVertex(5, 0))
        );
    }

    #[test]
    fn unclassified_edge() {
        let steps = [
            DfsStep::StartVertex(0),
            DfsStep::DiscoverVertex(0),
            DfsStep::ExamineEdge(0),
            DfsStep::FinishEdge(0),
            DfsStep::FinishVertex(0),
        ];

        assert_eq!(check_parenthesization(&steps), Ok(()));
        assert_eq!(
            check_edge_classification(&steps),
            Err(StepCheckError::MissingClassification(3))
        );
    }
}
