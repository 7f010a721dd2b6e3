use geaflow_api::edges::{Edge, EdgeIter, EdgeRef, OutEdges};

/// Permissive out-edges: parallel edges are kept, in insertion order.
#[derive(Debug, Clone)]
pub struct ArrayListEdges<K, EV> {
    edges: Vec<(K, EV)>,
}

impl<K, EV> ArrayListEdges<K, EV> {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<K, EV> Default for ArrayListEdges<K, EV> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, EV> OutEdges<K, EV> for ArrayListEdges<K, EV>
where
    K: PartialEq + Send,
    EV: Send,
{
    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<K, EV>>) {
        let (lower, _) = edges.size_hint();
        self.edges = Vec::with_capacity(lower);
        self.edges.extend(edges.map(Edge::into_parts));
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        self.edges = Vec::with_capacity(capacity);
    }

    fn add(&mut self, edge: Edge<K, EV>) {
        self.edges.push(edge.into_parts());
    }

    fn remove(&mut self, target_id: &K) {
        self.edges.retain(|(k, _)| k != target_id);
    }

    fn size(&self) -> usize {
        self.edges.len()
    }

    fn iter(&self) -> EdgeIter<'_, K, EV> {
        Box::new(self.edges.iter().map(|(k, v)| EdgeRef::new(k, v)))
    }

    fn retain(&mut self, f: &mut dyn FnMut(&K, &mut EV) -> bool) {
        self.edges.retain_mut(|(k, v)| f(k, v));
    }

    fn trim(&mut self) {
        self.edges.shrink_to_fit();
    }
}
