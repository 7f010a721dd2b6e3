pub use geaflow_common::types::Edge;

/// Borrowed view of one stored edge, yielded by [`OutEdges::iter`].
#[derive(Debug, PartialEq)]
pub struct EdgeRef<'a, K, EV> {
    target_id: &'a K,
    value: &'a EV,
}

impl<'a, K, EV> EdgeRef<'a, K, EV> {
    pub fn new(target_id: &'a K, value: &'a EV) -> Self {
        Self { target_id, value }
    }

    pub fn target_id(&self) -> &'a K {
        self.target_id
    }

    pub fn value(&self) -> &'a EV {
        self.value
    }

    pub fn to_edge(&self) -> Edge<K, EV>
    where
        K: Clone,
        EV: Clone,
    {
        Edge::new(self.target_id.clone(), self.value.clone())
    }
}

impl<K, EV> Clone for EdgeRef<'_, K, EV> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, EV> Copy for EdgeRef<'_, K, EV> {}

impl<'a, K, EV> From<&'a Edge<K, EV>> for EdgeRef<'a, K, EV> {
    fn from(edge: &'a Edge<K, EV>) -> Self {
        Self::new(edge.target_id(), edge.value())
    }
}

pub type EdgeIter<'a, K, EV> = Box<dyn Iterator<Item = EdgeRef<'a, K, EV>> + 'a>;

/// Out-edges of a single vertex.
///
/// A store is owned by exactly one vertex and is only touched by that vertex's
/// compute invocation, so implementations carry no internal synchronization.
/// `iter` borrows the store, which rules out mutation while an iteration is open.
pub trait OutEdges<K, EV>: Send {
    /// Replaces the contents with `edges`. The iterator's lower size hint is used
    /// to pre-size the backing storage.
    ///
    /// Strict stores keep the payload of the last occurrence of each target.
    fn initialize(&mut self, edges: &mut dyn Iterator<Item = Edge<K, EV>>);

    /// Clears the store and reserves room for `capacity` edges.
    fn initialize_with_capacity(&mut self, capacity: usize);

    /// Strict stores overwrite the payload of an existing target; permissive
    /// stores always append.
    fn add(&mut self, edge: Edge<K, EV>);

    /// Removes every edge pointing at `target_id`. Absent targets are ignored.
    fn remove(&mut self, target_id: &K);

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn iter(&self) -> EdgeIter<'_, K, EV>;

    /// Visits every edge with a mutable payload and drops the ones for which
    /// `f` returns `false`.
    fn retain(&mut self, f: &mut dyn FnMut(&K, &mut EV) -> bool);

    /// Releases spare capacity.
    fn trim(&mut self) {}
}

/// Out-edges keyed uniquely by target, with point lookups.
pub trait StrictRandomAccessOutEdges<K, EV>: OutEdges<K, EV> {
    fn edge_value(&self, target_id: &K) -> Option<&EV>;

    /// Overwrites the payload of an existing edge. Returns `false` and leaves the
    /// store untouched when there is no edge to `target_id`.
    fn set_edge_value(&mut self, target_id: &K, value: EV) -> bool;
}
