//! A plain sorted `Vec` kept in the same order as the list, for cross-checking.

use rankedset::{Entry, RankedSkipList};

#[derive(Default)]
pub struct Reference {
    // (value, score, insertion sequence), sorted by (score, sequence)
    entries: Vec<(u32, f64, u64)>,
    seq: u64,
}

impl Reference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn insert(&mut self, value: u32, score: f64) {
        let seq = self.seq;
        self.seq += 1;
        let at = self
            .entries
            .iter()
            .position(|&(_, s, q)| (s, q) > (score, seq))
            .unwrap_or(self.entries.len());
        self.entries.insert(at, (value, score, seq));
    }

    pub fn entries(&self) -> Vec<Entry<u32>> {
        self.entries
            .iter()
            .enumerate()
            .map(|(rank, &(value, score, _))| Entry { value, score, rank })
            .collect()
    }

    pub fn by_score(&self, min: f64, max: f64) -> Vec<Entry<u32>> {
        self.entries()
            .into_iter()
            .filter(|e| min <= e.score && e.score <= max)
            .collect()
    }

    pub fn by_value(&self, value: u32) -> Vec<Entry<u32>> {
        let mut found = self.entries().into_iter().filter(|e| e.value == value).collect::<Vec<_>>();
        // the list enumerates a value's entries in insertion order
        found.sort_by_key(|e| self.entries[e.rank].2);
        found
    }

    /// Resolves a rank range the way the list does. `truncate` is true for reads.
    pub fn resolve(&self, min: isize, max: isize, truncate: bool) -> Option<(usize, usize)> {
        let len = self.len() as isize;
        let resolve = |r: isize| if r < 0 { (len + r).max(-1) } else { r };
        let (min, mut max) = (resolve(min).max(-1), resolve(max));
        if max < 0 || min > max {
            return None;
        }
        let min = min.max(0);
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

    pub fn remove_ranks(&mut self, min: usize, max: usize) -> Vec<Entry<u32>> {
        let removed = self.entries()[min..=max].to_vec();
        self.entries.drain(min..=max);
        removed
    }

    pub fn remove_score(&mut self, min: f64, max: f64) -> Vec<Entry<u32>> {
        let removed = self.by_score(min, max);
        self.entries.retain(|&(_, s, _)| !(min <= s && s <= max));
        removed
    }

    pub fn remove_value(&mut self, value: u32) -> Vec<Entry<u32>> {
        let removed = self.by_value(value);
        self.entries.retain(|&(v, _, _)| v != value);
        removed
    }

    /// Asserts that `list` holds exactly the same entries in the same order.
    pub fn assert_matches(&self, list: &RankedSkipList<u32>) {
        list.check_integrity().unwrap();
        assert_eq!(list.len(), self.len());
        let forward = list
            .iter()
            .map(|(&value, score, rank)| Entry { value, score, rank })
            .collect::<Vec<_>>();
        assert_eq!(forward, self.entries());
        let mut backward = list
            .iter_backward()
            .map(|(&value, score, rank)| Entry { value, score, rank })
            .collect::<Vec<_>>();
        backward.reverse();
        assert_eq!(backward, forward);
    }
}
