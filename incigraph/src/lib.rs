//! Compact incidence graphs and a depth-first search that does not recurse.
//!
//! Graphs are built once by a [builder](storage::GraphBuilder) and then stored
//! in a single flat `i32` array, which makes them cheap to clone, to share
//! between threads and to traverse. The [depth-first search](visit) walks
//! such graphs lazily, one [step](visit::DfsStep) at a time, using an explicit
//! stack instead of the call stack.
//!
//! ```
//! use incigraph::{
//!     prelude::*,
//!     storage::UndirectedIncidenceGraph,
//!     visit::{ColorArray, Dfs},
//! };
//!
//! let mut builder = UndirectedIncidenceGraph::builder();
//! builder.try_add(0, 1).unwrap();
//! builder.try_add(1, 2).unwrap();
//! builder.try_add(3, 4).unwrap();
//!
//! let graph = builder.build();
//! assert_eq!(graph.vertex_count(), 5);
//! assert_eq!(graph.edge_count(), 3);
//!
//! let order = Dfs::new(&graph)
//!     .start_all(&graph, ColorArray::new())
//!     .iter(&graph)
//!     .collect::<Vec<_>>();
//!
//! assert_eq!(order, vec![0, 1, 2, 3, 4]);
//! ```

pub mod common;
pub mod core;
pub mod infra;
pub mod storage;
pub mod visit;

pub mod prelude {
    pub use crate::{
        core::{EdgeEndpoints, GraphBase, OutEdges},
        storage::GraphBuilder,
        visit::{ColorMap, Visitor},
    };
}

#[cfg(test)]
mod tests {
    use crate::{
        core::{EdgeEndpoints, GraphBase, OutEdges},
        storage::{DirectedIncidenceGraph, SimpleIncidenceGraph, UndirectedIncidenceGraph},
    };

    fn require_send_sync<T: Send + Sync>(_: &T) {}
    fn require_graph<G: EdgeEndpoints + OutEdges + Clone>(_: &G) {}

    #[test]
    fn trait_impl() {
        let directed = DirectedIncidenceGraph::default();
        let undirected = UndirectedIncidenceGraph::default();
        let simple = SimpleIncidenceGraph::default();

        require_send_sync(&directed);
        require_send_sync(&undirected);
        require_send_sync(&simple);

        require_graph(&directed);
        require_graph(&&undirected);
        require_graph(&simple);

        assert!(directed.is_directed());
        assert!(!undirected.is_directed());
        assert!((&simple).is_directed());
    }
}
