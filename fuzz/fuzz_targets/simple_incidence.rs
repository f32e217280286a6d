#![no_main]

use libfuzzer_sys::fuzz_target;

use incigraph::{
    core::GraphBase,
    infra::{
        arbitrary::{BuildOp, BuildOpResult, BuildOpsSeq},
        testing::{check_consistency, EdgeList},
    },
    storage::SimpleIncidenceGraphBuilder,
};

fuzz_target!(|ops: BuildOpsSeq| {
    let mut builder = SimpleIncidenceGraphBuilder::default();
    let mut model = EdgeList::default();

    for op in ops.into_iter().chain([BuildOp::ToGraph]) {
        match op.apply(&mut builder, &mut model) {
            BuildOpResult::AddEdge(Ok(_)) | BuildOpResult::EnsureVertexCount => {}
            BuildOpResult::AddEdge(Err(error)) => assert!(error.tail < 0 || error.head < 0),
            BuildOpResult::ToGraph(graph, expected) => {
                check_consistency(&graph)
                    .as_ref()
                    .map_err(ToString::to_string)
                    .unwrap();

                assert_eq!(graph.vertex_count(), expected.vertex_count);
                assert_eq!(
                    EdgeList::heads_of(&graph),
                    expected.heads(graph.is_directed())
                );
            }
        }
    }
});
