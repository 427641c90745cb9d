use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::skipnode::NodeId;

/// Maps every value to the nodes currently holding it, keyed by insertion sequence so the
/// nodes of a value always enumerate in insertion order.
#[derive(Clone, Debug)]
pub struct ValueIndex<T>
where
    T: Hash + Eq,
{
    map: HashMap<T, BTreeMap<u64, NodeId>>,
}

impl<T> ValueIndex<T>
where
    T: Hash + Eq,
{
    pub fn new() -> Self {
        ValueIndex {
            map: HashMap::new(),
        }
    }

    pub fn insert(&mut self, value: T, seq: u64, node: NodeId) {
        self.map.entry(value).or_insert_with(BTreeMap::new).insert(seq, node);
    }

    /// Unregisters one node. The value disappears once its last node is gone.
    pub fn remove(&mut self, value: &T, seq: u64) -> Option<NodeId> {
        let (node, now_empty) = {
            let nodes = self.map.get_mut(value)?;
            let node = nodes.remove(&seq)?;
            (node, nodes.is_empty())
        };
        if now_empty {
            self.map.remove(value);
        }
        Some(node)
    }

    /// Nodes holding `value`, in insertion order.
    pub fn nodes(&self, value: &T) -> Vec<NodeId> {
        match self.map.get(value) {
            Some(nodes) => nodes.values().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn get(&self, value: &T, seq: u64) -> Option<NodeId> {
        self.map.get(value).and_then(|nodes| nodes.get(&seq).cloned())
    }

    pub fn count(&self, value: &T) -> usize {
        self.map.get(value).map_or(0, |nodes| nodes.len())
    }

    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Number of registered nodes across every value.
    pub fn total(&self) -> usize {
        self.map.values().map(|nodes| nodes.len()).sum()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
