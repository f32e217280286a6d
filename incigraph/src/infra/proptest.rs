use proptest::{
    collection::vec,
    strategy::{BoxedStrategy, NewTree, Strategy, ValueTree},
    test_runner::TestRunner,
};

use crate::core::Vertex;

use super::testing::EdgeList;

pub fn edge_list() -> EdgeListStrategy {
    EdgeListStrategy::new()
}

#[derive(Debug, Clone, Copy)]
pub struct StrategyParams {
    max_vertices: usize,
    max_edges: usize,
    allow_loops: bool,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            max_vertices: 64,
            max_edges: 256,
            allow_loops: false,
        }
    }
}

impl StrategyParams {
    pub fn max_vertices(self, max_vertices: usize) -> Self {
        assert!(max_vertices > 0, "edge list needs at least one vertex");
        Self {
            max_vertices,
            ..self
        }
    }

    pub fn max_edges(self, max_edges: usize) -> Self {
        Self { max_edges, ..self }
    }

    pub fn allow_loops(self) -> Self {
        Self {
            allow_loops: true,
            ..self
        }
    }
}

/// Strategy generating [`EdgeList`]s.
///
/// Edges of the list are shrunk first, then the vertex count, which
/// regenerates the edges for the smaller vertex range.
#[derive(Debug, Clone, Copy)]
pub struct EdgeListStrategy {
    params: StrategyParams,
}

macro_rules! delegate_builder_fn {
    ($name:ident$(, $param:ident: $param_type:ty)*) => {
        #[doc = concat!("See [StrategyParams::", stringify!($name), "](StrategyParams::", stringify!($name), ") for details.")]
        pub fn $name(self, $($param: $param_type),*) -> Self {
            Self {
                params: self.params.$name($($param,)*),
            }
        }
    }
}

impl EdgeListStrategy {
    pub fn new() -> Self {
        Self::with_params(StrategyParams::default())
    }

    pub fn with_params(params: StrategyParams) -> Self {
        Self { params }
    }

    // Builder pattern on the strategy itself to allow usage as in
    // `edge_list().max_vertices(10).allow_loops()`.
    delegate_builder_fn!(max_vertices, max_vertices: usize);
    delegate_builder_fn!(max_edges, max_edges: usize);
    delegate_builder_fn!(allow_loops);

    fn inner(&self) -> BoxedStrategy<EdgeList> {
        let StrategyParams {
            max_vertices,
            max_edges,
            allow_loops,
        } = self.params;

        (1..=max_vertices)
            .prop_flat_map(move |vertex_count| {
                let vertex = 0..vertex_count as Vertex;
                vec((vertex.clone(), vertex), 0..=max_edges).prop_map(move |edges| EdgeList {
                    vertex_count,
                    edges: edges
                        .into_iter()
                        .filter(|(tail, head)| allow_loops || tail != head)
                        .collect(),
                })
            })
            .boxed()
    }
}

impl Default for EdgeListStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for EdgeListStrategy {
    type Tree = Box<dyn ValueTree<Value = EdgeList>>;
    type Value = EdgeList;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        self.inner().new_tree(runner)
    }
}
