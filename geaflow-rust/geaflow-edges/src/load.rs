use crate::factory::OutEdgesFactory;
use geaflow_api::edges::{Edge, OutEdges};
use geaflow_common::config::Configuration;
use geaflow_common::error::GeaFlowResult;
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

pub const LOAD_PARALLEL_MIN_VERTICES_KEY: &str = "geaflow.edges.load.parallel.min.vertices";
const DEFAULT_PARALLEL_MIN_VERTICES: usize = 1024;

pub type VertexOutEdges<K, EV> = HashMap<K, Box<dyn OutEdges<K, EV>>>;

/// Builds the out-edges store of every source vertex in a partition.
///
/// Each vertex gets its own store, initialized once with its full edge list.
/// Stores are independent, so large partitions initialize them on the rayon
/// pool.
#[derive(Debug, Clone)]
pub struct OutEdgesLoader<K, EV> {
    factory: OutEdgesFactory<K, EV>,
    parallel_min_vertices: usize,
}

impl<K, EV> OutEdgesLoader<K, EV>
where
    K: Hash + Eq + Send + 'static,
    EV: Send + 'static,
{
    pub fn new(factory: OutEdgesFactory<K, EV>) -> Self {
        Self {
            factory,
            parallel_min_vertices: DEFAULT_PARALLEL_MIN_VERTICES,
        }
    }

    pub fn from_config(conf: &Configuration) -> GeaFlowResult<Self> {
        Ok(Self {
            factory: OutEdgesFactory::from_config(conf)?,
            parallel_min_vertices: conf
                .get_usize(LOAD_PARALLEL_MIN_VERTICES_KEY, DEFAULT_PARALLEL_MIN_VERTICES)?,
        })
    }

    pub fn with_parallel_min_vertices(mut self, parallel_min_vertices: usize) -> Self {
        self.parallel_min_vertices = parallel_min_vertices;
        self
    }

    pub fn factory(&self) -> &OutEdgesFactory<K, EV> {
        &self.factory
    }

    /// Groups `(source, edge)` pairs by source, keeping input order within a
    /// source, and initializes one store per source vertex.
    pub fn load<I>(&self, edges: I) -> VertexOutEdges<K, EV>
    where
        I: IntoIterator<Item = (K, Edge<K, EV>)>,
    {
        let mut grouped: HashMap<K, Vec<Edge<K, EV>>> = HashMap::new();
        let mut total = 0usize;
        for (src_id, edge) in edges {
            grouped.entry(src_id).or_default().push(edge);
            total += 1;
        }

        let vertices = grouped.len();
        let parallel = vertices >= self.parallel_min_vertices;
        let out: VertexOutEdges<K, EV> = if parallel {
            grouped
                .into_par_iter()
                .map(|(src_id, list)| (src_id, self.build(list)))
                .collect()
        } else {
            grouped
                .into_iter()
                .map(|(src_id, list)| (src_id, self.build(list)))
                .collect()
        };

        debug!(
            vertices,
            edges = total,
            parallel,
            class = self.factory.class().name(),
            "loaded out-edges"
        );
        metrics::counter!("geaflow_edges_loaded_total").increment(total as u64);
        out
    }

    fn build(&self, list: Vec<Edge<K, EV>>) -> Box<dyn OutEdges<K, EV>> {
        let mut edges = self.factory.create();
        edges.initialize(&mut list.into_iter());
        edges
    }
}
