use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use logger::Logger;

use crate::cursor::{ascending, Cursor};
use crate::error::{Error, Result};
use crate::level_generator::{GeometricalLevelGenerator, LevelGenerator};
use crate::options::Options;
use crate::request::{Detail, Direction, Entry, Item, Items, RankQuery, ScoreQuery, ScoreRange};
use crate::skipnode::{Arena, Key, NodeId, SkipNode, HEAD, TAIL};
use crate::value_index::ValueIndex;

macro_rules! log_opt {
    ($logger: expr, $level: ident, $($arg:tt)*) => ({
        if let Some(ref logger) = $logger {
            log!(logger, $level, $($arg)*);
        }
    })
}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// RankedSkipList
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// An ordered collection of `(value, score)` entries with rank queries from either end.
///
/// Entries sort by score, and entries sharing a score keep their insertion order. That order is
/// global: walking from the tail visits exactly the reverse of walking from the head. Values are
/// compared by equality only and may repeat.
///
/// Every range operation takes a `Direction`. It picks the sentinel the descent starts from,
/// which matters for speed when the interesting entries sit near one end, but never the meaning
/// of the arguments: ranks are always ascending ranks and results come back in ascending order.
pub struct RankedSkipList<T>
where
    T: Hash + Eq + Clone,
{
    arena: Arena<T>,
    index: ValueIndex<T>,
    level_generator: Box<dyn LevelGenerator + Send + Sync>,
    max_level: usize,
    len: usize,
    next_seq: u64,
    logger: Option<Logger>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<T> RankedSkipList<T>
where
    T: Hash + Eq + Clone,
{
    /// Create a new list with 32 levels and randomly drawn node levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::RankedSkipList;
    ///
    /// let mut list: RankedSkipList<&str> = RankedSkipList::new();
    /// list.insert("a", 10.0).unwrap();
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn new() -> Self {
        Self::assemble(&Options::default(), Box::new(GeometricalLevelGenerator::default()))
    }

    /// Create a new list from explicit options.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{Options, RankedSkipList};
    ///
    /// let list: RankedSkipList<u32> = RankedSkipList::with_options(Options::new().max_level(8).seed(1)).unwrap();
    /// assert_eq!(list.max_level(), 8);
    /// assert!(RankedSkipList::<u32>::with_options(Options::new().max_level(0)).is_err());
    /// ```
    pub fn with_options(options: Options) -> Result<Self> {
        let level_generator = options.level_generator()?;
        Ok(Self::assemble(&options, level_generator))
    }

    /// Create a list holding `pairs`, inserted in iteration order.
    pub fn from_pairs<I>(pairs: I, options: Options) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut list = Self::with_options(options)?;
        list.extend_pairs(pairs)?;
        Ok(list)
    }

    fn assemble(options: &Options, level_generator: Box<dyn LevelGenerator + Send + Sync>) -> Self {
        let max_level = level_generator.total();
        let list = RankedSkipList {
            arena: Arena::new(max_level),
            index: ValueIndex::new(),
            level_generator,
            max_level,
            len: 0,
            next_seq: 0,
            logger: options.logger.clone(),
        };
        log_opt!(list.logger, Verbose, "ranked skiplist created with {} levels", max_level);
        list
    }

    /// Inserts every pair in iteration order, stopping at the first invalid score.
    pub fn extend_pairs<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        for (value, score) in pairs {
            self.insert(value, score)?;
        }
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels of the sentinels, the upper bound of any node's level.
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Removes every entry. The insertion sequence starts over.
    pub fn clear(&mut self) {
        self.arena = Arena::new(self.max_level);
        self.index.clear();
        self.len = 0;
        self.next_seq = 0;
    }

    /// Insert a new entry, descending from the head.
    ///
    /// Infinite and NaN scores are refused.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{Error, RankedSkipList};
    ///
    /// let mut list = RankedSkipList::new();
    /// list.insert("a", 10.0).unwrap();
    /// assert_eq!(list.insert("b", std::f64::INFINITY), Err(Error::InvalidScore(std::f64::INFINITY)));
    /// ```
    pub fn insert(&mut self, value: T, score: f64) -> Result<()> {
        self.insert_from(value, score, Direction::FromHead)
    }

    /// Insert a new entry, descending from the given end. The resulting order does not depend on
    /// the direction.
    pub fn insert_from(&mut self, value: T, score: f64, direction: Direction) -> Result<()> {
        if !score.is_finite() {
            return Err(Error::InvalidScore(score));
        }
        let seq = self.next_seq;
        self.next_seq += 1;

        let (update, rank) = self.insertion_point((score, seq), direction);
        let level = self.level_generator.random().max(1).min(self.max_level);
        let id = self.arena.alloc(SkipNode::new(value.clone(), score, seq, level));
        let new_rank = rank[0] + 1;

        for i in 0..self.max_level {
            let left = update[i];
            let right = self.arena[left].next[i];
            if i < level {
                let left_span = (new_rank - rank[i]) as usize;
                let right_span = self.arena[left].forward_span[i] + 1 - left_span;
                {
                    let node = &mut self.arena[id];
                    node.prev[i] = left;
                    node.next[i] = right;
                    node.backward_span[i] = left_span;
                    node.forward_span[i] = right_span;
                }
                self.arena[left].next[i] = id;
                self.arena[left].forward_span[i] = left_span;
                self.arena[right].prev[i] = id;
                self.arena[right].backward_span[i] = right_span;
            } else {
                self.arena[left].forward_span[i] += 1;
                self.arena[right].backward_span[i] += 1;
            }
        }

        self.index.insert(value, seq, id);
        self.len += 1;
        log_opt!(self.logger, Debug, "inserted score {} at rank {} on {} levels", score, new_rank, level);
        Ok(())
    }

    /// Removes every entry whose score lies in the query's range.
    ///
    /// Detailed entries carry the ranks they had before the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{Items, Options, RankedSkipList, ScoreQuery};
    ///
    /// let mut list = RankedSkipList::from_pairs(vec![("a", 1.0), ("b", 2.0), ("c", 3.0)], Options::new()).unwrap();
    /// assert_eq!(list.delete_by_score(&ScoreQuery::range(2.0, 5.0)), Items::Compact(vec!["b", "c"]));
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn delete_by_score(&mut self, query: &ScoreQuery) -> Items<T, T> {
        let found = self.collect_scores(&query.range, query.direction);
        let entries = self.remove_found(found);
        if !entries.is_empty() {
            log_opt!(
                self.logger,
                Debug,
                "deleted {} entries with score in [{}, {}]",
                entries.len(),
                query.range.min,
                query.range.max
            );
        }
        Items::build(query.detail, entries, |e| e.value)
    }

    /// Removes every entry whose rank lies in the query's range.
    pub fn delete_by_rank(&mut self, query: &RankQuery) -> Items<T, T> {
        let (min, max) = match self.resolve_ranks(query.min, query.max, false) {
            Some(bounds) => bounds,
            None => return Items::empty(query.detail),
        };
        let found = self.collect_ranks(min, max, query.direction);
        let entries = self.remove_found(found);
        log_opt!(self.logger, Debug, "deleted {} entries with rank in [{}, {}]", entries.len(), min, max);
        Items::build(query.detail, entries, |e| e.value)
    }

    /// Removes the entry at `rank`. A negative rank counts from the end.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{Detail, Direction, Item, Options, RankedSkipList};
    ///
    /// let mut list = RankedSkipList::from_pairs(vec![("a", 1.0), ("b", 2.0)], Options::new()).unwrap();
    /// assert_eq!(list.delete_at(-1, Detail::Compact, Direction::FromTail), Some(Item::Compact("b")));
    /// assert_eq!(list.delete_at(4, Detail::Compact, Direction::FromHead), None);
    /// ```
    pub fn delete_at(&mut self, rank: isize, detail: Detail, direction: Direction) -> Option<Item<T, T>> {
        let (rank, _) = self.resolve_ranks(rank, rank, false)?;
        let found = self.collect_ranks(rank, rank, direction);
        let entry = self.remove_found(found).pop()?;
        log_opt!(self.logger, Debug, "deleted entry at rank {}", rank);
        Some(Item::build(detail, entry, |e| e.value))
    }

    /// Removes every entry holding `value`, in insertion order. Compact results are the removed
    /// scores.
    ///
    /// Ranks are computed for all of the value's entries before the first removal.
    pub fn delete_by_value(&mut self, value: &T, detail: Detail, direction: Direction) -> Result<Items<f64, T>> {
        let ids = self.index.nodes(value);
        let ranks = match detail {
            Detail::Detailed => ids
                .iter()
                .map(|&id| self.rank_of(id, direction))
                .collect::<Result<Vec<_>>>()?,
            // compact results never expose the rank
            Detail::Compact => vec![0; ids.len()],
        };

        let mut entries = Vec::with_capacity(ids.len());
        for (id, rank) in ids.into_iter().zip(ranks) {
            match self.delete_node(id) {
                Some((value, score)) => entries.push(Entry { value, score, rank }),
                None => return Err(self.inconsistency(format!("indexed node {} is not in the list", id))),
            }
        }
        if !entries.is_empty() {
            log_opt!(self.logger, Debug, "deleted {} entries by value", entries.len());
        }
        Ok(Items::build(detail, entries, |e| e.score))
    }

    /// Removes the entry with the lowest rank.
    pub fn pop_first(&mut self, detail: Detail) -> Option<Item<T, T>> {
        if self.is_empty() {
            return None;
        }
        let first = self.arena[HEAD].next[0];
        let entry = self.remove_found(vec![(first, 0)]).pop()?;
        Some(Item::build(detail, entry, |e| e.value))
    }

    /// Removes the entry with the highest rank.
    pub fn pop_last(&mut self, detail: Detail) -> Option<Item<T, T>> {
        if self.is_empty() {
            return None;
        }
        let last = self.arena[TAIL].prev[0];
        let rank = self.len - 1;
        let entry = self.remove_found(vec![(last, rank)]).pop()?;
        Some(Item::build(detail, entry, |e| e.value))
    }

    /// Entries whose score lies in the query's range.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{Entry, Items, Options, RankedSkipList, ScoreQuery};
    ///
    /// let list = RankedSkipList::from_pairs(vec![("a", 10.0), ("b", 5.0), ("c", 10.0)], Options::new()).unwrap();
    /// assert_eq!(list.get_by_score(&ScoreQuery::score(10.0)), Items::Compact(vec!["a", "c"]));
    /// assert_eq!(
    ///     list.get_by_score(&ScoreQuery::range(0.0, 6.0).detailed().from_tail()),
    ///     Items::Detailed(vec![Entry { value: "b", score: 5.0, rank: 0 }])
    /// );
    /// ```
    pub fn get_by_score(&self, query: &ScoreQuery) -> Items<T, T> {
        let found = self.collect_scores(&query.range, query.direction);
        Items::build(query.detail, self.entries(&found), |e| e.value)
    }

    /// Entries whose rank lies in the query's range. A range running past the end is truncated.
    pub fn get_by_rank(&self, query: &RankQuery) -> Items<T, T> {
        match self.resolve_ranks(query.min, query.max, true) {
            Some((min, max)) => {
                let found = self.collect_ranks(min, max, query.direction);
                Items::build(query.detail, self.entries(&found), |e| e.value)
            }
            None => Items::empty(query.detail),
        }
    }

    /// The entry at `rank`. A negative rank counts from the end.
    pub fn get_at(&self, rank: isize, detail: Detail, direction: Direction) -> Option<Item<T, T>> {
        let (rank, _) = self.resolve_ranks(rank, rank, false)?;
        let entry = self.entries(&self.collect_ranks(rank, rank, direction)).pop()?;
        Some(Item::build(detail, entry, |e| e.value))
    }

    /// Scores held under `value`, in insertion order.
    pub fn get_score(&self, value: &T) -> Vec<f64> {
        self.index
            .nodes(value)
            .into_iter()
            .map(|id| self.arena[id].score)
            .collect()
    }

    /// Ranks of the entries holding `value`, in insertion order, optionally restricted to the
    /// entries whose score lies in `filter`. Compact results are the ranks.
    pub fn get_rank(
        &self,
        value: &T,
        filter: Option<ScoreRange>,
        detail: Detail,
        direction: Direction,
    ) -> Result<Items<usize, T>> {
        let mut entries = Vec::new();
        for id in self.index.nodes(value) {
            let score = self.arena[id].score;
            if filter.map_or(true, |range| range.contains(score)) {
                entries.push(Entry {
                    value: value.clone(),
                    score,
                    rank: self.rank_of(id, direction)?,
                });
            }
        }
        Ok(Items::build(detail, entries, |e| e.rank))
    }

    pub fn count_by_value(&self, value: &T) -> usize {
        self.index.count(value)
    }

    pub fn contains_value(&self, value: &T) -> bool {
        self.index.contains(value)
    }

    /// Number of entries whose score lies in the query's range.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{Options, RankedSkipList, ScoreQuery};
    ///
    /// let list = RankedSkipList::from_pairs(vec![("a", 1.0), ("b", 2.0), ("c", 3.0)], Options::new()).unwrap();
    /// assert_eq!(list.count_by_score(&ScoreQuery::range(1.5, 3.0)), 2);
    /// assert_eq!(list.count_by_score(&ScoreQuery::range(100.0, 50.0)), 0);
    /// ```
    pub fn count_by_score(&self, query: &ScoreQuery) -> usize {
        let range = query.range;
        if range.is_empty() {
            return 0;
        }
        match query.direction {
            Direction::FromHead => {
                let (before, rank) = self.boundary(Direction::FromHead, |node, _| node.score < range.min);
                let first = self.arena[before].next[0];
                if first == TAIL || self.arena[first].score > range.max {
                    return 0;
                }
                let start = rank + 1;
                let mut cursor = Cursor::at(&self.arena, first, start);
                for i in (0..self.arena[first].level()).rev() {
                    while cursor.has_forward(i) && cursor.peek_forward_score(i) <= range.max {
                        cursor.advance_forward(i);
                    }
                }
                (cursor.rank() - start + 1) as usize
            }
            Direction::FromTail => {
                let (last, rank) = self.boundary(Direction::FromTail, |node, _| node.score <= range.max);
                if last == HEAD || self.arena[last].score < range.min {
                    return 0;
                }
                let mut cursor = Cursor::at(&self.arena, last, self.len as isize - 1 - rank);
                for i in (0..self.arena[last].level()).rev() {
                    while cursor.has_backward(i) && cursor.peek_backward_score(i) >= range.min {
                        cursor.advance_backward(i);
                    }
                }
                (rank - ascending(self.len, cursor.rank()) + 1) as usize
            }
        }
    }

    /// Value and score of the lowest ranked entry.
    pub fn first(&self) -> Option<(&T, f64)> {
        let node = &self.arena[self.arena[HEAD].next[0]];
        node.value.as_ref().map(|v| (v, node.score))
    }

    /// Value and score of the highest ranked entry.
    pub fn last(&self) -> Option<(&T, f64)> {
        let node = &self.arena[self.arena[TAIL].prev[0]];
        node.value.as_ref().map(|v| (v, node.score))
    }

    /// Iterates over `(value, score, rank)` in ascending order.
    ///
    /// Each call walks with its own cursor. The iterator borrows the list, so the list cannot be
    /// modified while it is alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{Options, RankedSkipList};
    ///
    /// let list = RankedSkipList::from_pairs(vec![("a", 10.0), ("b", 5.0), ("c", 10.0)], Options::new()).unwrap();
    /// let entries = list.iter().collect::<Vec<_>>();
    /// assert_eq!(entries, vec![(&"b", 5.0, 0), (&"a", 10.0, 1), (&"c", 10.0, 2)]);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter {
            cursor: Cursor::from_head(&self.arena),
            direction: Direction::FromHead,
            len: self.len,
            remaining: self.len,
        }
    }

    /// Iterates over `(value, score, rank)` from the last entry to the first. Ranks are still
    /// ascending ranks.
    pub fn iter_backward(&self) -> Iter<T> {
        Iter {
            cursor: Cursor::from_tail(&self.arena),
            direction: Direction::FromTail,
            len: self.len,
            remaining: self.len,
        }
    }

    /// Walks every level and verifies links, spans, ordering and the value index.
    ///
    /// Returns `InternalInconsistency` describing the first violation found.
    pub fn check_integrity(&self) -> Result<()> {
        let head = self.checked(HEAD)?;
        let tail = self.checked(TAIL)?;
        if head.level() != self.max_level || tail.level() != self.max_level {
            return Err(self.inconsistency("sentinels lost levels".to_owned()));
        }

        let mut positions = HashMap::new();
        let mut reach = vec![0usize; self.max_level];
        positions.insert(HEAD, 0usize);
        let mut id = HEAD;
        let mut position = 0;
        while id != TAIL {
            let node = self.checked(id)?;
            let next = node.next[0];
            let next_node = self.checked(next)?;
            if node.key() >= next_node.key() {
                return Err(self.inconsistency(format!("keys out of order at position {}", position)));
            }
            position += 1;
            if positions.insert(next, position).is_some() {
                return Err(self.inconsistency(format!("node {} is linked twice", next)));
            }
            if next != TAIL {
                let value = match next_node.value {
                    Some(ref value) => value,
                    None => return Err(self.inconsistency(format!("node {} holds no value", next))),
                };
                if !next_node.score.is_finite() {
                    return Err(self.inconsistency(format!("node {} holds a sentinel score", next)));
                }
                if next_node.level() == 0 || next_node.level() > self.max_level {
                    return Err(self.inconsistency(format!("node {} has {} levels", next, next_node.level())));
                }
                if self.index.get(value, next_node.seq) != Some(next) {
                    return Err(self.inconsistency(format!("node {} is not indexed", next)));
                }
                for count in reach.iter_mut().take(next_node.level()) {
                    *count += 1;
                }
            }
            id = next;
        }
        if position != self.len + 1 {
            return Err(self.inconsistency(format!(
                "level 0 holds {} entries, expected {}",
                position - 1,
                self.len
            )));
        }
        if self.index.total() != self.len {
            return Err(self.inconsistency(format!(
                "index holds {} entries, expected {}",
                self.index.total(),
                self.len
            )));
        }
        if self.arena.occupied() != self.len + 2 {
            return Err(self.inconsistency(format!(
                "arena holds {} nodes, expected {}",
                self.arena.occupied(),
                self.len + 2
            )));
        }

        for (i, expected) in reach.into_iter().enumerate() {
            let mut id = HEAD;
            let mut visited = 0;
            while id != TAIL {
                let node = self.checked(id)?;
                if node.level() <= i {
                    return Err(self.inconsistency(format!("node {} is linked above its level", id)));
                }
                let next = node.next[i];
                let next_node = self.checked(next)?;
                let (from, to) = match (positions.get(&id), positions.get(&next)) {
                    (Some(&from), Some(&to)) if from < to => (from, to),
                    _ => return Err(self.inconsistency(format!("level {} link {} -> {} goes astray", i, id, next))),
                };
                if node.forward_span[i] != to - from {
                    return Err(self.inconsistency(format!(
                        "level {} span of node {} is {}, expected {}",
                        i,
                        id,
                        node.forward_span[i],
                        to - from
                    )));
                }
                if next_node.prev[i] != id || next_node.backward_span[i] != node.forward_span[i] {
                    return Err(self.inconsistency(format!("level {} link {} -> {} is one-sided", i, id, next)));
                }
                if next != TAIL {
                    visited += 1;
                }
                id = next;
            }
            if visited != expected {
                return Err(self.inconsistency(format!(
                    "level {} links {} nodes, expected {}",
                    i, visited, expected
                )));
            }
        }
        Ok(())
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<T> RankedSkipList<T>
where
    T: Hash + Eq + Clone,
{
    /// Neighbours at every level of the position `key` belongs to, with their ascending ranks.
    fn insertion_point(&self, key: Key, direction: Direction) -> (Vec<NodeId>, Vec<isize>) {
        let mut update = vec![HEAD; self.max_level];
        let mut rank = vec![-1; self.max_level];
        match direction {
            Direction::FromHead => {
                let mut cursor = Cursor::from_head(&self.arena);
                for i in (0..self.max_level).rev() {
                    while cursor.has_forward(i) && cursor.peek_forward_key(i) < key {
                        cursor.advance_forward(i);
                    }
                    update[i] = cursor.node();
                    rank[i] = cursor.rank();
                }
            }
            Direction::FromTail => {
                let mut cursor = Cursor::from_tail(&self.arena);
                for i in (0..self.max_level).rev() {
                    while cursor.has_backward(i) && cursor.peek_backward_key(i) > key {
                        cursor.advance_backward(i);
                    }
                    let right = &self.arena[cursor.node()];
                    update[i] = right.prev[i];
                    rank[i] = ascending(self.len, cursor.rank()) - right.backward_span[i] as isize;
                }
            }
        }
        (update, rank)
    }

    /// The last node of the prefix of the list matching `before`, and its ascending rank. The
    /// head sentinel (rank `-1`) stands for an empty prefix.
    ///
    /// `before` sees each candidate with its ascending rank and must hold on a prefix of the list.
    fn boundary<F>(&self, direction: Direction, before: F) -> (NodeId, isize)
    where
        F: Fn(&SkipNode<T>, isize) -> bool,
    {
        match direction {
            Direction::FromHead => {
                let mut cursor = Cursor::from_head(&self.arena);
                for i in (0..self.max_level).rev() {
                    while cursor.has_forward(i)
                        && before(&self.arena[cursor.peek_forward_node(i)], cursor.peek_forward_rank(i))
                    {
                        cursor.advance_forward(i);
                    }
                }
                (cursor.node(), cursor.rank())
            }
            Direction::FromTail => {
                let mut cursor = Cursor::from_tail(&self.arena);
                for i in (0..self.max_level).rev() {
                    while cursor.has_backward(i)
                        && !before(
                            &self.arena[cursor.peek_backward_node(i)],
                            ascending(self.len, cursor.peek_backward_rank(i)),
                        )
                    {
                        cursor.advance_backward(i);
                    }
                }
                // the cursor rests on the first node past the prefix
                let past = ascending(self.len, cursor.rank());
                (self.arena[cursor.node()].prev[0], past - 1)
            }
        }
    }

    fn rank_of(&self, id: NodeId, direction: Direction) -> Result<usize> {
        let key = self.arena[id].key();
        let (before, rank) = self.boundary(direction, |node, _| node.key() < key);
        if self.arena[before].next[0] == id {
            Ok((rank + 1) as usize)
        } else {
            Err(self.inconsistency(format!("node {} is not reachable at score {}", id, key.0)))
        }
    }

    /// Resolves negative ranks against the current length. `truncate` clips a maximum running
    /// past the end instead of rejecting the range.
    fn resolve_ranks(&self, min: isize, max: isize, truncate: bool) -> Option<(usize, usize)> {
        let len = self.len as isize;
        let resolve = |rank: isize| if rank < 0 { (len + rank).max(-1) } else { rank };
        let (mut min, mut max) = (resolve(min), resolve(max));
        if max < 0 || min > max {
            return None;
        }
        if min < 0 {
            min = 0;
        }
        if min >= len {
            return None;
        }
        if max >= len {
            if !truncate {
                return None;
            }
            max = len - 1;
        }
        Some((min as usize, max as usize))
    }

    /// Nodes with a score inside `range`, paired with their ranks, in ascending order.
    fn collect_scores(&self, range: &ScoreRange, direction: Direction) -> Vec<(NodeId, usize)> {
        let mut found = Vec::new();
        if range.is_empty() {
            return found;
        }
        match direction {
            Direction::FromHead => {
                let (before, rank) = self.boundary(direction, |node, _| node.score < range.min);
                let mut cursor = Cursor::at(&self.arena, before, rank);
                while cursor.has_forward(0) && cursor.peek_forward_score(0) <= range.max {
                    cursor.advance_forward(0);
                    found.push((cursor.node(), cursor.rank() as usize));
                }
            }
            Direction::FromTail => {
                let (last, rank) = self.boundary(direction, |node, _| node.score <= range.max);
                let after = self.arena[last].next[0];
                let mut cursor = Cursor::at(&self.arena, after, self.len as isize - 2 - rank);
                while cursor.has_backward(0) && cursor.peek_backward_score(0) >= range.min {
                    cursor.advance_backward(0);
                    found.push((cursor.node(), ascending(self.len, cursor.rank()) as usize));
                }
                found.reverse();
            }
        }
        found
    }

    /// Nodes ranked `min..=max`, which must be in bounds, in ascending order.
    fn collect_ranks(&self, min: usize, max: usize, direction: Direction) -> Vec<(NodeId, usize)> {
        let mut found = Vec::with_capacity(max - min + 1);
        match direction {
            Direction::FromHead => {
                let (before, rank) = self.boundary(direction, |_, r| r < min as isize);
                let mut cursor = Cursor::at(&self.arena, before, rank);
                for _ in min..=max {
                    cursor.advance_forward(0);
                    found.push((cursor.node(), cursor.rank() as usize));
                }
            }
            Direction::FromTail => {
                let (last, rank) = self.boundary(direction, |_, r| r <= max as isize);
                let after = self.arena[last].next[0];
                let mut cursor = Cursor::at(&self.arena, after, self.len as isize - 2 - rank);
                for _ in min..=max {
                    cursor.advance_backward(0);
                    found.push((cursor.node(), ascending(self.len, cursor.rank()) as usize));
                }
                found.reverse();
            }
        }
        found
    }

    fn entries(&self, found: &[(NodeId, usize)]) -> Vec<Entry<T>> {
        found
            .iter()
            .filter_map(|&(id, rank)| {
                let node = &self.arena[id];
                node.value.as_ref().map(|value| Entry {
                    value: value.clone(),
                    score: node.score,
                    rank,
                })
            })
            .collect()
    }

    fn remove_found(&mut self, found: Vec<(NodeId, usize)>) -> Vec<Entry<T>> {
        found
            .into_iter()
            .filter_map(|(id, rank)| self.delete_node(id).map(|(value, score)| Entry { value, score, rank }))
            .collect()
    }

    /// Unlinks a real node from every level, repairs the spans passing over it and unregisters
    /// it from the value index.
    fn delete_node(&mut self, id: NodeId) -> Option<(T, f64)> {
        if id == HEAD || id == TAIL {
            return None;
        }
        let level = self.arena.get(id)?.level();
        for i in 0..level {
            let (left, right, span) = {
                let node = &self.arena[id];
                (node.prev[i], node.next[i], node.forward_span[i])
            };
            let merged = self.arena[left].forward_span[i] + span - 1;
            self.arena[left].next[i] = right;
            self.arena[left].forward_span[i] = merged;
            self.arena[right].prev[i] = left;
            self.arena[right].backward_span[i] = merged;
        }

        // higher links pass over the node; the nearest taller node to the left owns each one
        let mut left = id;
        for i in level..self.max_level {
            while self.arena[left].level() <= i {
                left = self.arena[left].prev[i - 1];
            }
            self.arena[left].forward_span[i] -= 1;
            let right = self.arena[left].next[i];
            self.arena[right].backward_span[i] -= 1;
        }

        let node = self.arena.release(id)?;
        let value = node.value?;
        self.index.remove(&value, node.seq);
        self.len -= 1;
        Some((value, node.score))
    }

    fn checked(&self, id: NodeId) -> Result<&SkipNode<T>> {
        match self.arena.get(id) {
            Some(node) if node.level() <= self.max_level => Ok(node),
            Some(_) => Err(self.inconsistency(format!("node {} is taller than the list", id))),
            None => Err(self.inconsistency(format!("dangling node handle {}", id))),
        }
    }

    fn inconsistency(&self, msg: String) -> Error {
        log_opt!(self.logger, Warning, "internal inconsistency: {}", msg);
        Error::InternalInconsistency(msg)
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<T> Default for RankedSkipList<T>
where
    T: Hash + Eq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Diagnostic dump of `[value, score, rank]` triples. Not meant to be parsed back.
impl<T> fmt::Debug for RankedSkipList<T>
where
    T: Hash + Eq + Clone + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, (value, score, rank)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "[{:?}, {}, {}]", value, score, rank)?;
        }
        write!(f, "]")
    }
}

impl<T> fmt::Display for RankedSkipList<T>
where
    T: Hash + Eq + Clone + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, (value, score, _)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", value, score)?;
        }
        write!(f, "]")
    }
}

impl<'a, T> IntoIterator for &'a RankedSkipList<T>
where
    T: Hash + Eq + Clone,
{
    type Item = (&'a T, f64, usize);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

/// Level-0 walk over `(value, score, rank)` triples.
pub struct Iter<'a, T> {
    cursor: Cursor<'a, T>,
    direction: Direction,
    len: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, f64, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let rank = match self.direction {
            Direction::FromHead => {
                if !self.cursor.has_forward(0) {
                    return None;
                }
                self.cursor.advance_forward(0);
                self.cursor.rank()
            }
            Direction::FromTail => {
                if !self.cursor.has_backward(0) {
                    return None;
                }
                self.cursor.advance_backward(0);
                ascending(self.len, self.cursor.rank())
            }
        };
        self.remaining = self.remaining.saturating_sub(1);
        let node = &self.cursor.arena()[self.cursor.node()];
        node.value.as_ref().map(|value| (value, node.score, rank as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Tests
// /////////////////////////////////////////////////////////////////////////////////////////////////
