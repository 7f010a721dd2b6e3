use serde::{Deserialize, Serialize};

/// An out-edge of a vertex: the target vertex id and the edge payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Edge<K, EV> {
    target_id: K,
    value: EV,
}

impl<K, EV> Edge<K, EV> {
    pub fn new(target_id: K, value: EV) -> Self {
        Self { target_id, value }
    }

    pub fn target_id(&self) -> &K {
        &self.target_id
    }

    pub fn value(&self) -> &EV {
        &self.value
    }

    pub fn into_parts(self) -> (K, EV) {
        (self.target_id, self.value)
    }
}

impl<K, EV> From<(K, EV)> for Edge<K, EV> {
    fn from((target_id, value): (K, EV)) -> Self {
        Self::new(target_id, value)
    }
}
