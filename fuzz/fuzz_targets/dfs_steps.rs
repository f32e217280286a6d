#![no_main]

use libfuzzer_sys::fuzz_target;

use incigraph::{
    core::marker::{Directed, Undirected},
    infra::{
        arbitrary::{BuildOp, BuildOpResult, BuildOpsSeq},
        testing::{check_edge_classification, check_parenthesization, EdgeList},
    },
    storage::{GraphBuilder, IncidenceGraphBuilder},
    visit::{traverse_forest, ColorArray, DfsStep, VisitAll},
};

fn check<B: GraphBuilder>(ops: &BuildOpsSeq) {
    let mut builder = B::default();
    let mut model = EdgeList::default();

    for &op in ops.0.iter().chain([&BuildOp::ToGraph]) {
        if let BuildOpResult::ToGraph(graph, expected) = op.apply(&mut builder, &mut model) {
            let steps = traverse_forest(&graph, VisitAll::new(&graph), ColorArray::new())
                .collect::<Vec<_>>();

            check_parenthesization(&steps)
                .as_ref()
                .map_err(ToString::to_string)
                .unwrap();
            check_edge_classification(&steps)
                .as_ref()
                .map_err(ToString::to_string)
                .unwrap();

            let discovered = steps
                .iter()
                .filter(|step| matches!(step, DfsStep::DiscoverVertex(_)))
                .count();
            assert_eq!(discovered, expected.vertex_count);
        }
    }
}

fuzz_target!(|ops: BuildOpsSeq| {
    check::<IncidenceGraphBuilder<Directed>>(&ops);
    check::<IncidenceGraphBuilder<Undirected>>(&ops);
});
