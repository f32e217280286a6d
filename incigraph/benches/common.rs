#![allow(dead_code)]

use fastrand::Rng;
use incigraph::{core::Vertex, storage::GraphBuilder};
use petgraph::prelude::*;

pub const RANDOM_SEED: u64 = 0xef6f79ed30ba75a;

pub struct RandomEdges {
    v: usize,
    w: usize,
    n: usize,
    p: f32,
}

impl RandomEdges {
    pub fn new(vertex_count: usize, p: f32) -> Self {
        Self {
            v: 1,
            w: usize::MAX,
            n: vertex_count,
            p,
        }
    }

    pub fn next_edge(&mut self, rng: &mut Rng) -> Option<(usize, usize)> {
        // Efficient generation of large random networks
        // http://vlado.fmf.uni-lj.si/pub/networks/doc/ms/rndgen.pdf

        let Self { v, w, .. } = self;
        let n = self.n;
        let p = self.p;

        if *v >= n {
            return None;
        }

        let r = rng.f32();
        *w = w.wrapping_add(1) + ((1.0 - r).log10() / (1.0 - p).log10()).floor() as usize;

        while *w >= *v && *v < n {
            *w -= *v;
            *v += 1;
        }

        if *v < n {
            // Half of the edges go backwards so that directed cycles exist.
            if rng.bool() {
                Some((*v, *w))
            } else {
                Some((*w, *v))
            }
        } else {
            None
        }
    }
}

pub fn random_edges(vertex_count: usize, density: f32, rng: &mut Rng) -> Vec<(Vertex, Vertex)> {
    let mut edges = RandomEdges::new(vertex_count, density);
    let mut list = Vec::new();

    while let Some((u, v)) = edges.next_edge(rng) {
        list.push((u as Vertex, v as Vertex));
    }

    list
}

pub fn incigraph_random<B: GraphBuilder>(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> B::Graph {
    let mut builder = B::default();
    builder.ensure_vertex_count(vertex_count);

    for (u, v) in random_edges(vertex_count, density, rng) {
        // Random vertices are never negative.
        let _ = builder.try_add(u, v);
    }

    builder.build()
}

pub fn petgraph_random<Ty: petgraph::EdgeType>(
    vertex_count: usize,
    density: f32,
    rng: &mut Rng,
) -> petgraph::Graph<(), (), Ty> {
    let mut graph = petgraph::Graph::with_capacity(vertex_count, 0);

    for _ in 0..vertex_count {
        graph.add_node(());
    }

    for (u, v) in random_edges(vertex_count, density, rng) {
        graph.add_edge(NodeIndex::new(u as usize), NodeIndex::new(v as usize), ());
    }

    graph
}
