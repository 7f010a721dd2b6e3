//! Open-addressed index from an `i64` key to its slot in a packed key array.
//!
//! Buckets hold slot numbers only; keys are read back from the caller's array,
//! so the index costs four bytes per bucket. Probing is linear and deletion uses
//! backward shifting, which keeps every probe chain intact without tombstones.

const EMPTY: u32 = u32::MAX;
const MAX_SLOT: usize = EMPTY as usize - 1;
const MIN_BUCKETS: usize = 8;
const HASH_MULTIPLIER: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Probe {
    Found { bucket: usize, slot: usize },
    Vacant { bucket: usize },
}

#[derive(Debug, Clone)]
pub(crate) struct SlotIndex {
    buckets: Vec<u32>,
    shift: u32,
}

impl SlotIndex {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        // Load factor stays at or below 3/4.
        let wanted = capacity.saturating_mul(4) / 3 + 1;
        let buckets = wanted.max(MIN_BUCKETS).next_power_of_two();
        Self {
            buckets: vec![EMPTY; buckets],
            shift: u64::BITS - buckets.trailing_zeros(),
        }
    }

    fn mask(&self) -> usize {
        self.buckets.len() - 1
    }

    fn home(&self, key: i64) -> usize {
        ((key as u64).wrapping_mul(HASH_MULTIPLIER) >> self.shift) as usize
    }

    pub(crate) fn probe(&self, keys: &[i64], key: i64) -> Probe {
        let mask = self.mask();
        let mut bucket = self.home(key);
        loop {
            let slot = self.buckets[bucket];
            if slot == EMPTY {
                return Probe::Vacant { bucket };
            }
            let slot = slot as usize;
            if keys[slot] == key {
                return Probe::Found { bucket, slot };
            }
            bucket = (bucket + 1) & mask;
        }
    }

    /// Whether holding `len + 1` entries would exceed the load factor.
    pub(crate) fn is_full(&self, len: usize) -> bool {
        (len + 1).saturating_mul(4) > self.buckets.len() * 3
    }

    /// Stores `slot` in a vacant `bucket`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` does not fit below the empty-bucket marker.
    pub(crate) fn insert(&mut self, bucket: usize, slot: usize) {
        assert!(slot <= MAX_SLOT, "slot index holds at most {} entries", MAX_SLOT + 1);
        debug_assert_eq!(self.buckets[bucket], EMPTY);
        self.buckets[bucket] = slot as u32;
    }

    /// Points the entry for `key` at `slot`, used after the key moved inside
    /// the packed array.
    pub(crate) fn relocate(&mut self, keys: &[i64], key: i64, slot: usize) {
        if let Probe::Found { bucket, .. } = self.probe(keys, key) {
            self.buckets[bucket] = slot as u32;
        }
    }

    /// Clears `bucket` and shifts later members of the probe run back into the
    /// hole. `keys` must still contain every indexed key.
    pub(crate) fn remove(&mut self, keys: &[i64], bucket: usize) {
        let mask = self.mask();
        let mut hole = bucket;
        let mut next = (hole + 1) & mask;
        loop {
            let slot = self.buckets[next];
            if slot == EMPTY {
                break;
            }
            let home = self.home(keys[slot as usize]);
            // An entry may move back only if the hole lies on its probe path.
            if next.wrapping_sub(home) & mask >= next.wrapping_sub(hole) & mask {
                self.buckets[hole] = slot;
                hole = next;
            }
            next = (next + 1) & mask;
        }
        self.buckets[hole] = EMPTY;
    }

    /// Rebuilds the index over `keys`, sized for at least `capacity` entries.
    /// `keys` must be unique.
    pub(crate) fn rebuild(&mut self, keys: &[i64], capacity: usize) {
        *self = Self::with_capacity(capacity.max(keys.len()));
        for (slot, &key) in keys.iter().enumerate() {
            if let Probe::Vacant { bucket } = self.probe(keys, key) {
                self.insert(bucket, slot);
            }
        }
    }

    #[cfg(test)]
    fn bucket_count(&self) -> usize {
        self.buckets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_key(index: &mut SlotIndex, keys: &mut Vec<i64>, key: i64) {
        match index.probe(keys, key) {
            Probe::Found { .. } => {}
            Probe::Vacant { bucket } => {
                keys.push(key);
                if index.is_full(keys.len() - 1) {
                    index.rebuild(keys, keys.len() * 2);
                } else {
                    index.insert(bucket, keys.len() - 1);
                }
            }
        }
    }

    fn remove_key(index: &mut SlotIndex, keys: &mut Vec<i64>, key: i64) {
        if let Probe::Found { bucket, slot } = index.probe(keys, key) {
            index.remove(keys, bucket);
            let last = keys.len() - 1;
            if slot != last {
                let moved = keys[last];
                index.relocate(keys, moved, slot);
            }
            keys.swap_remove(slot);
        }
    }

    fn assert_consistent(index: &SlotIndex, keys: &[i64]) {
        for (slot, &key) in keys.iter().enumerate() {
            match index.probe(keys, key) {
                Probe::Found { slot: found, .. } => assert_eq!(found, slot),
                Probe::Vacant { .. } => panic!("key {key} lost"),
            }
        }
    }

    #[test]
    fn test_sizes_to_power_of_two() {
        assert_eq!(SlotIndex::with_capacity(0).bucket_count(), 8);
        assert_eq!(SlotIndex::with_capacity(6).bucket_count(), 16);
        assert_eq!(SlotIndex::with_capacity(100).bucket_count(), 256);
    }

    #[test]
    fn test_insert_and_remove_keep_probe_chains() {
        let mut index = SlotIndex::with_capacity(0);
        let mut keys = Vec::new();
        let spread: Vec<i64> = (1..65).map(|i| i << 40).collect();
        for &k in &spread {
            insert_key(&mut index, &mut keys, k);
        }
        for k in -50..50 {
            insert_key(&mut index, &mut keys, k);
        }
        assert_eq!(keys.len(), 164);
        assert_consistent(&index, &keys);

        for &k in spread.iter().step_by(3) {
            remove_key(&mut index, &mut keys, k);
        }
        for k in (-50..50).step_by(2) {
            remove_key(&mut index, &mut keys, k);
        }
        assert_consistent(&index, &keys);
        assert_eq!(keys.len(), 164 - 22 - 50);

        for &k in spread.iter().step_by(3) {
            assert!(matches!(index.probe(&keys, k), Probe::Vacant { .. }));
        }
    }

    #[test]
    #[should_panic(expected = "slot index holds at most")]
    fn test_insert_rejects_empty_marker_slot() {
        let mut index = SlotIndex::with_capacity(0);
        index.insert(0, EMPTY as usize);
    }

    #[test]
    fn test_insert_accepts_last_slot() {
        let mut index = SlotIndex::with_capacity(0);
        index.insert(0, MAX_SLOT);
        assert_eq!(index.buckets[0], EMPTY - 1);
    }

    #[test]
    fn test_remove_everything() {
        let mut index = SlotIndex::with_capacity(4);
        let mut keys = Vec::new();
        for k in 0..1000 {
            insert_key(&mut index, &mut keys, k * 7919);
        }
        for k in 0..1000 {
            remove_key(&mut index, &mut keys, k * 7919);
        }
        assert!(keys.is_empty());
        assert!(matches!(index.probe(&keys, 0), Probe::Vacant { .. }));
    }
}
