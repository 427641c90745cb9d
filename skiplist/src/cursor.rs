use crate::skipnode::{Arena, Key, NodeId, HEAD, TAIL};

/// A position in the list plus the rank accumulated to reach it.
///
/// A cursor started at the head counts ascending ranks; one started at the tail counts
/// back-ranks, the distance from the end. Either way the starting sentinel sits at `-1`.
pub struct Cursor<'a, T> {
    arena: &'a Arena<T>,
    node: NodeId,
    rank: isize,
}

impl<'a, T> Cursor<'a, T> {
    pub fn from_head(arena: &'a Arena<T>) -> Self {
        Cursor {
            arena,
            node: HEAD,
            rank: -1,
        }
    }

    pub fn from_tail(arena: &'a Arena<T>) -> Self {
        Cursor {
            arena,
            node: TAIL,
            rank: -1,
        }
    }

    /// A cursor resting on `node`, which already sits at `rank`.
    pub fn at(arena: &'a Arena<T>, node: NodeId, rank: isize) -> Self {
        Cursor { arena, node, rank }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    #[inline]
    pub fn rank(&self) -> isize {
        self.rank
    }

    pub fn arena(&self) -> &'a Arena<T> {
        self.arena
    }

    pub fn advance_forward(&mut self, level: usize) {
        let node = &self.arena[self.node];
        self.rank += node.forward_span[level] as isize;
        self.node = node.next[level];
    }

    pub fn advance_backward(&mut self, level: usize) {
        let node = &self.arena[self.node];
        self.rank += node.backward_span[level] as isize;
        self.node = node.prev[level];
    }

    /// Whether a real node follows at `level`.
    pub fn has_forward(&self, level: usize) -> bool {
        self.node != TAIL && self.arena[self.node].next[level] != TAIL
    }

    /// Whether a real node precedes at `level`.
    pub fn has_backward(&self, level: usize) -> bool {
        self.node != HEAD && self.arena[self.node].prev[level] != HEAD
    }

    pub fn peek_forward_node(&self, level: usize) -> NodeId {
        self.arena[self.node].next[level]
    }

    pub fn peek_forward_score(&self, level: usize) -> f64 {
        self.arena[self.peek_forward_node(level)].score
    }

    pub fn peek_forward_key(&self, level: usize) -> Key {
        self.arena[self.peek_forward_node(level)].key()
    }

    pub fn peek_forward_rank(&self, level: usize) -> isize {
        self.rank + self.arena[self.node].forward_span[level] as isize
    }

    pub fn peek_backward_node(&self, level: usize) -> NodeId {
        self.arena[self.node].prev[level]
    }

    pub fn peek_backward_score(&self, level: usize) -> f64 {
        self.arena[self.peek_backward_node(level)].score
    }

    pub fn peek_backward_key(&self, level: usize) -> Key {
        self.arena[self.peek_backward_node(level)].key()
    }

    pub fn peek_backward_rank(&self, level: usize) -> isize {
        self.rank + self.arena[self.node].backward_span[level] as isize
    }
}

/// Converts a back-rank into the ascending rank of the same position.
#[inline]
pub fn ascending(len: usize, back_rank: isize) -> isize {
    len as isize - 1 - back_rank
}
