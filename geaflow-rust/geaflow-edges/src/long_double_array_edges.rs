use geaflow_api::edges::{Edge, EdgeIter, EdgeRef, OutEdges};

/// Permissive out-edges with `i64` targets and `f64` payloads, stored as two
/// packed arrays.
#[derive(Debug, Clone, Default)]
pub struct LongDoubleArrayEdges {
    targets: Vec<i64>,
    values: Vec<f64>,
}

impl LongDoubleArrayEdges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> &[i64] {
        &self.targets
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Order-preserving in-place compaction.
    fn compact(&mut self, mut keep: impl FnMut(i64, &mut f64) -> bool) {
        let mut kept = 0;
        for i in 0..self.targets.len() {
            if keep(self.targets[i], &mut self.values[i]) {
                self.targets[kept] = self.targets[i];
                self.values[kept] = self.values[i];
                kept += 1;
            }
        }
        self.targets.truncate(kept);
        self.values.truncate(kept);
    }
}

impl OutEdges<i64, f64> for LongDoubleArrayEdges {
    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<i64, f64>>) {
        let (lower, _) = edges.size_hint();
        self.initialize_with_capacity(lower);
        for edge in edges {
            self.add(edge);
        }
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        self.targets = Vec::with_capacity(capacity);
        self.values = Vec::with_capacity(capacity);
    }

    fn add(&mut self, edge: Edge<i64, f64>) {
        let (target_id, value) = edge.into_parts();
        self.targets.push(target_id);
        self.values.push(value);
    }

    fn remove(&mut self, target_id: &i64) {
        let target_id = *target_id;
        self.compact(|t, _| t != target_id);
    }

    fn size(&self) -> usize {
        self.targets.len()
    }

    fn iter(&self) -> EdgeIter<'_, i64, f64> {
        Box::new(
            self.targets
                .iter()
                .zip(self.values.iter())
                .map(|(t, v)| EdgeRef::new(t, v)),
        )
    }

    fn retain(&mut self, f: &mut dyn FnMut(&i64, &mut f64) -> bool) {
        self.compact(|t, v| f(&t, v));
    }

    fn trim(&mut self) {
        self.targets.shrink_to_fit();
        self.values.shrink_to_fit();
    }
}
