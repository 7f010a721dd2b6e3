use crate::slot_index::{Probe, SlotIndex};
use geaflow_api::edges::{Edge, EdgeIter, EdgeRef, OutEdges, StrictRandomAccessOutEdges};

/// Strict out-edges with `i64` targets and `f64` payloads.
///
/// Targets and payloads live in two packed arrays sharing a slot number, and a
/// [`SlotIndex`] maps each target to its slot. Removal swaps the last edge into
/// the freed slot, so the arrays never contain holes.
///
/// Slot numbers are `u32`, with `u32::MAX` reserved for empty buckets, so a
/// store holds at most `u32::MAX` edges; inserting beyond that panics. The
/// record codec is bounded by the same `u32` count.
#[derive(Debug, Clone)]
pub struct LongDoubleHashMapEdges {
    targets: Vec<i64>,
    values: Vec<f64>,
    index: SlotIndex,
}

impl LongDoubleHashMapEdges {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            targets: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            index: SlotIndex::with_capacity(capacity),
        }
    }

    fn insert(&mut self, target_id: i64, value: f64) {
        match self.index.probe(&self.targets, target_id) {
            Probe::Found { slot, .. } => self.values[slot] = value,
            Probe::Vacant { bucket } => {
                let slot = self.targets.len();
                self.targets.push(target_id);
                self.values.push(value);
                if self.index.is_full(slot) {
                    self.index.rebuild(&self.targets, self.targets.len() * 2);
                } else {
                    self.index.insert(bucket, slot);
                }
            }
        }
    }

    fn slot_of(&self, target_id: i64) -> Option<usize> {
        match self.index.probe(&self.targets, target_id) {
            Probe::Found { slot, .. } => Some(slot),
            Probe::Vacant { .. } => None,
        }
    }
}

impl Default for LongDoubleHashMapEdges {
    fn default() -> Self {
        Self::new()
    }
}

impl OutEdges<i64, f64> for LongDoubleHashMapEdges {
    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<i64, f64>>) {
        let (lower, _) = edges.size_hint();
        self.initialize_with_capacity(lower);
        for edge in edges {
            let (target_id, value) = edge.into_parts();
            self.insert(target_id, value);
        }
    }

    fn initialize_with_capacity(&mut self, capacity: usize) {
        *self = Self::with_capacity(capacity);
    }

    fn add(&mut self, edge: Edge<i64, f64>) {
        let (target_id, value) = edge.into_parts();
        self.insert(target_id, value);
    }

    fn remove(&mut self, target_id: &i64) {
        let Probe::Found { bucket, slot } = self.index.probe(&self.targets, *target_id) else {
            return;
        };
        self.index.remove(&self.targets, bucket);
        let last = self.targets.len() - 1;
        if slot != last {
            self.index.relocate(&self.targets, self.targets[last], slot);
        }
        self.targets.swap_remove(slot);
        self.values.swap_remove(slot);
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
        let before = self.targets.len();
        let mut kept = 0;
        for i in 0..before {
            if f(&self.targets[i], &mut self.values[i]) {
                self.targets[kept] = self.targets[i];
                self.values[kept] = self.values[i];
                kept += 1;
            }
        }
        if kept != before {
            self.targets.truncate(kept);
            self.values.truncate(kept);
            self.index.rebuild(&self.targets, kept);
        }
    }

    fn trim(&mut self) {
        self.targets.shrink_to_fit();
        self.values.shrink_to_fit();
        self.index.rebuild(&self.targets, self.targets.len());
    }
}

impl StrictRandomAccessOutEdges<i64, f64> for LongDoubleHashMapEdges {
    fn edge_value(&self, target_id: &i64) -> Option<&f64> {
        self.slot_of(*target_id).map(|slot| &self.values[slot])
    }

    fn set_edge_value(&mut self, target_id: &i64, value: f64) -> bool {
        match self.slot_of(*target_id) {
            Some(slot) => {
                self.values[slot] = value;
                true
            }
            None => false,
        }
    }
}
