use geaflow_api::edges::{Edge, EdgeIter, EdgeRef, OutEdges, StrictRandomAccessOutEdges};
use std::collections::HashMap;
use std::hash::Hash;

/// Strict out-edges for arbitrary id and payload types, backed by a `HashMap`.
#[derive(Debug, Clone)]
pub struct HashMapEdges<K, EV> {
    edges: HashMap<K, EV>,
}

impl<K, EV> HashMapEdges<K, EV> {
    pub fn new() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }
}

impl<K, EV> Default for HashMapEdges<K, EV> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, EV> OutEdges<K, EV> for HashMapEdges<K, EV>
where
    K: Hash + Eq + Send,
    EV: Send,
{
    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<K, EV>>) {
        let (lower, _) = edges.size_hint();
        self.edges = HashMap::with_capacity(lower);
        for edge in edges {
            let (target_id, value) = edge.into_parts();
            self.edges.insert(target_id, value);
        }
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        self.edges = HashMap::with_capacity(capacity);
    }

    fn add(&mut self, edge: Edge<K, EV>) {
        let (target_id, value) = edge.into_parts();
        self.edges.insert(target_id, value);
    }

    fn remove(&mut self, target_id: &K) {
        self.edges.remove(target_id);
    }

    fn size(&self) -> usize {
        self.edges.len()
    }

    fn iter(&self) -> EdgeIter<'_, K, EV> {
        Box::new(self.edges.iter().map(|(k, v)| EdgeRef::new(k, v)))
    }

    fn retain(&mut self, f: &mut dyn FnMut(&K, &mut EV) -> bool) {
        self.edges.retain(|k, v| f(k, v));
    }

    fn trim(&mut self) {
        self.edges.shrink_to_fit();
    }
}

impl<K, EV> StrictRandomAccessOutEdges<K, EV> for HashMapEdges<K, EV>
where
    K: Hash + Eq + Send,
    EV: Send,
{
    fn edge_value(&self, target_id: &K) -> Option<&EV> {
        self.edges.get(target_id)
    }

    fn set_edge_value(&mut self, target_id: &K, value: EV) -> bool {
        match self.edges.get_mut(target_id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}
