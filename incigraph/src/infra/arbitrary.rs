use std::fmt;

use arbitrary::Arbitrary;

use crate::{
    core::{error::AddEdgeError, GraphBase, Vertex},
    storage::GraphBuilder,
};

use super::testing::EdgeList;

#[derive(Debug, Arbitrary, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Index(pub usize);

impl Index {
    pub fn get(&self, m: usize) -> Option<usize> {
        if m > 0 {
            Some(self.0 % m)
        } else {
            None
        }
    }

    pub fn map(self, m: usize) -> Option<Index> {
        self.get(m).map(Index)
    }
}

/// Operation on a graph builder, applied together with the reference
/// [`EdgeList`] model.
#[derive(Debug, Arbitrary, Clone, Copy)]
pub enum BuildOp {
    /// Adds an edge between existing vertices or the next new vertex.
    AddEdge(Index, Index),
    /// Adds an edge with arbitrary endpoints, possibly negative ones.
    AddEdgeRaw(i16, i16),
    EnsureVertexCount(u8),
    /// Builds the graph and resets both the builder and the model.
    ToGraph,
}

#[derive(Debug)]
pub enum BuildOpResult<G: GraphBase> {
    AddEdge(Result<G::Edge, AddEdgeError>),
    EnsureVertexCount,
    ToGraph(G, EdgeList),
}

impl BuildOp {
    pub fn apply<B: GraphBuilder>(
        self,
        builder: &mut B,
        model: &mut EdgeList,
    ) -> BuildOpResult<B::Graph> {
        match self {
            BuildOp::AddEdge(tail, head) => {
                // One more than the current count, so that the builder grows.
                let n = model.vertex_count + 1;
                let tail = tail.get(n).unwrap_or_default() as Vertex;
                let head = head.get(n).unwrap_or_default() as Vertex;
                Self::add(builder, model, tail, head)
            }
            BuildOp::AddEdgeRaw(tail, head) => Self::add(builder, model, tail.into(), head.into()),
            BuildOp::EnsureVertexCount(vertex_count) => {
                let vertex_count = vertex_count as usize;
                builder.ensure_vertex_count(vertex_count);
                model.vertex_count = model.vertex_count.max(vertex_count);
                BuildOpResult::EnsureVertexCount
            }
            BuildOp::ToGraph => {
                let graph = builder.to_graph();
                BuildOpResult::ToGraph(graph, std::mem::take(model))
            }
        }
    }

    fn add<B: GraphBuilder>(
        builder: &mut B,
        model: &mut EdgeList,
        tail: Vertex,
        head: Vertex,
    ) -> BuildOpResult<B::Graph> {
        let result = builder.try_add(tail, head);

        if result.is_ok() {
            model.edges.push((tail, head));
            model.vertex_count = model.vertex_count.max(tail.max(head) as usize + 1);
        }

        BuildOpResult::AddEdge(result)
    }
}

#[derive(Arbitrary)]
pub struct BuildOpsSeq(pub Vec<BuildOp>);

impl IntoIterator for BuildOpsSeq {
    type Item = BuildOp;
    type IntoIter = std::vec::IntoIter<BuildOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Debug for BuildOpsSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BuildOpsSeq(vec![")?;

        for op in self.0.iter() {
            writeln!(f, "    BuildOp::{:?},", op)?;
        }

        writeln!(f, "])")
    }
}
