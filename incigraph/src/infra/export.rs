use std::io::{self, Cursor, Write};

use crate::core::{EdgeEndpoints, OutEdges, Vertex};

pub trait Export<G> {
    fn export<W: Write>(&self, graph: &G, out: &mut W) -> io::Result<()>;
}

/// Export to the [DOT](https://graphviz.org/doc/info/lang.html) language.
///
/// Every edge of an undirected graph is written once, from the endpoint with
/// the smaller index.
///
/// The edge label function receives the out-edge entry the edge is written
/// from. For an undirected [`IncidenceGraph`](crate::storage::IncidenceGraph)
/// that is the complemented index when the edge was added from the larger
/// endpoint, so pass it through [`canonical`](crate::storage::incidence::canonical)
/// to label edges by their index.
pub struct Dot<E> {
    name: String,
    get_edge_label: Option<Box<dyn Fn(E) -> String>>,
}

impl<E: Copy> Dot<E> {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name: name.unwrap_or_else(|| String::from("G")),
            get_edge_label: None,
        }
    }

    pub fn with_edge_label<F>(name: Option<String>, get_edge_label: F) -> Self
    where
        F: Fn(E) -> String + 'static,
    {
        Self {
            name: name.unwrap_or_else(|| String::from("G")),
            get_edge_label: Some(Box::new(get_edge_label)),
        }
    }

    pub fn to_string<G>(&self, graph: &G) -> String
    where
        G: EdgeEndpoints<Edge = E> + OutEdges,
    {
        let mut cursor = Cursor::new(Vec::new());
        self.export(graph, &mut cursor)
            .expect("writing to vec in cursor does not fail");

        String::from_utf8(cursor.into_inner()).expect("dot format is text format")
    }
}

impl<E: Copy, G> Export<G> for Dot<E>
where
    G: EdgeEndpoints<Edge = E> + OutEdges,
{
    fn export<W: Write>(&self, graph: &G, out: &mut W) -> io::Result<()> {
        let directed = graph.is_directed();

        if directed {
            out.write_all(b"digraph ")?;
        } else {
            out.write_all(b"graph ")?;
        }

        out.write_all(self.name.as_bytes())?;
        out.write_all(b" {\n")?;

        let vertex_count = graph.vertex_count() as Vertex;

        for v in 0..vertex_count {
            writeln!(out, "    v{v};")?;
        }

        let line = if directed { "->" } else { "--" };

        for v in 0..vertex_count {
            for e in graph.out_edges(v) {
                let Some(head) = graph.head(e) else {
                    continue;
                };

                if !directed && head < v {
                    continue;
                }

                match self.get_edge_label {
                    Some(ref get_edge_label) => writeln!(
                        out,
                        "    v{v} {line} v{head} [label={:?}];",
                        get_edge_label(e)
                    )?,
                    None => writeln!(out, "    v{v} {line} v{head};")?,
                }
            }
        }

        out.write_all(b"}\n")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{incidence::canonical, DirectedIncidenceGraph, UndirectedIncidenceGraph};

    #[test]
    fn directed() {
        let graph: DirectedIncidenceGraph = [(0, 1), (1, 1)].into_iter().collect();
        let dot = Dot::with_edge_label(None, |e: i32| e.to_string()).to_string(&graph);

        assert_eq!(
            dot,
            "digraph G {\n    v0;\n    v1;\n    v0 -> v1 [label=\"0\"];\n    v1 -> v1 [label=\"1\"];\n}\n"
        );
    }

    #[test]
    fn undirected_edges_once() {
        let graph: UndirectedIncidenceGraph = [(1, 0), (2, 2)].into_iter().collect();
        let dot = Dot::new(Some(String::from("H"))).to_string(&graph);

        assert_eq!(
            dot,
            "graph H {\n    v0;\n    v1;\n    v2;\n    v0 -- v1;\n    v2 -- v2;\n}\n"
        );
    }

    #[test]
    fn undirected_labels() {
        let graph: UndirectedIncidenceGraph = [(1, 0), (1, 2)].into_iter().collect();

        let listed = Dot::with_edge_label(None, |e: i32| e.to_string()).to_string(&graph);
        assert!(listed.contains("v0 -- v1 [label=\"-1\"];"));

        let by_index = Dot::with_edge_label(None, |e: i32| canonical(e).to_string()).to_string(&graph);
        assert_eq!(
            by_index,
            "graph G {\n    v0;\n    v1;\n    v2;\n    v0 -- v1 [label=\"0\"];\n    v1 -- v2 [label=\"1\"];\n}\n"
        );
    }
}
