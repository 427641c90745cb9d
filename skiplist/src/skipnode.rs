use std::f64;
use std::iter;
use std::ops::{Index, IndexMut};

/// Stable handle of a node inside an `Arena`.
pub type NodeId = usize;

/// Reserved handle of the head sentinel.
pub const HEAD: NodeId = 0;
/// Reserved handle of the tail sentinel.
pub const TAIL: NodeId = 1;

/// Total order of the list: score first, insertion sequence for ties.
pub type Key = (f64, u64);

// /////////////////////////////////////////////////////////////////////////////////////////////////
// SkipNode
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// SkipNodes make up the list. Links are handles into the owning arena, so a node owns nothing
/// but its value.
///
/// A node occupies `level()` levels. At each level `i` below that, `next[i]` and `prev[i]` are
/// its neighbours and `forward_span[i]`/`backward_span[i]` count the level-0 hops the links skip.
/// A link `A.next[i] == B` always satisfies `A.forward_span[i] == B.backward_span[i]`.
///
/// The sentinels hold no value. The head's `prev` and the tail's `next` point back at themselves
/// and are never followed.
#[derive(Clone, Debug)]
pub struct SkipNode<T> {
    pub value: Option<T>,
    pub score: f64,
    pub seq: u64,
    pub next: Vec<NodeId>,
    pub prev: Vec<NodeId>,
    pub forward_span: Vec<usize>,
    pub backward_span: Vec<usize>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> SkipNode<T> {
    /// Create a new head node linked straight to the tail at every level.
    pub fn head(total_levels: usize) -> Self {
        SkipNode {
            value: None,
            score: f64::NEG_INFINITY,
            seq: 0,
            next: iter::repeat(TAIL).take(total_levels).collect(),
            prev: iter::repeat(HEAD).take(total_levels).collect(),
            forward_span: iter::repeat(1).take(total_levels).collect(),
            backward_span: iter::repeat(0).take(total_levels).collect(),
        }
    }

    /// Create a new tail node linked straight to the head at every level.
    pub fn tail(total_levels: usize) -> Self {
        SkipNode {
            value: None,
            score: f64::INFINITY,
            seq: u64::max_value(),
            next: iter::repeat(TAIL).take(total_levels).collect(),
            prev: iter::repeat(HEAD).take(total_levels).collect(),
            forward_span: iter::repeat(0).take(total_levels).collect(),
            backward_span: iter::repeat(1).take(total_levels).collect(),
        }
    }

    /// Create a new SkipNode with the given value. Links and spans are zeroed and have to be
    /// adjusted when the node is threaded in.
    pub fn new(value: T, score: f64, seq: u64, level: usize) -> Self {
        SkipNode {
            value: Some(value),
            score,
            seq,
            next: iter::repeat(HEAD).take(level).collect(),
            prev: iter::repeat(HEAD).take(level).collect(),
            forward_span: iter::repeat(0).take(level).collect(),
            backward_span: iter::repeat(0).take(level).collect(),
        }
    }

    /// Number of levels this node is linked at.
    #[inline]
    pub fn level(&self) -> usize {
        self.next.len()
    }

    #[inline]
    pub fn key(&self) -> Key {
        (self.score, self.seq)
    }
}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Arena
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// Contiguous node storage. The sentinels live at `HEAD` and `TAIL` for the arena's whole life;
/// released slots are recycled by later allocations.
#[derive(Clone, Debug)]
pub struct Arena<T> {
    nodes: Vec<Option<SkipNode<T>>>,
    free: Vec<NodeId>,
}

impl<T> Arena<T> {
    pub fn new(total_levels: usize) -> Self {
        Arena {
            nodes: vec![
                Some(SkipNode::head(total_levels)),
                Some(SkipNode::tail(total_levels)),
            ],
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: SkipNode<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Frees the slot of a real node. Sentinels and free slots yield `None`.
    pub fn release(&mut self, id: NodeId) -> Option<SkipNode<T>> {
        if id == HEAD || id == TAIL {
            return None;
        }
        let node = self.nodes.get_mut(id)?.take()?;
        self.free.push(id);
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&SkipNode<T>> {
        self.nodes.get(id).and_then(|n| n.as_ref())
    }

    /// Number of occupied slots, sentinels included.
    pub fn occupied(&self) -> usize {
        self.nodes.len() - self.free.len()
    }
}

/// # Panics
///
/// Indexing a released slot panics, the same way indexing past the end of a `Vec` does.
impl<T> Index<NodeId> for Arena<T> {
    type Output = SkipNode<T>;

    fn index(&self, id: NodeId) -> &SkipNode<T> {
        match self.nodes[id] {
            Some(ref node) => node,
            None => panic!("dangling node handle {}", id),
        }
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut SkipNode<T> {
        match self.nodes[id] {
            Some(ref mut node) => node,
            None => panic!("dangling node handle {}", id),
        }
    }
}
