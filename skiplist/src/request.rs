//! Query descriptions and result shapes shared by every range operation.

/// How much of each entry an operation returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Detail {
    /// Only the payload the operation is about (a value, a score or a rank).
    Compact,
    /// Value, score and rank of every entry.
    Detailed,
}

impl Default for Detail {
    fn default() -> Self {
        Detail::Compact
    }
}

/// Which sentinel a descent starts from.
///
/// The direction only changes how the list is walked. Ranks are always counted from the head and
/// results always come back in ascending rank order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    FromHead,
    FromTail,
}

impl Default for Direction {
    fn default() -> Self {
        Direction::FromHead
    }
}

/// Inclusive score interval. A range with `min > max`, or with a NaN bound, matches nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

impl ScoreRange {
    pub fn new(min: f64, max: f64) -> Self {
        ScoreRange { min, max }
    }

    pub fn score(score: f64) -> Self {
        ScoreRange {
            min: score,
            max: score,
        }
    }

    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }

    pub fn is_empty(&self) -> bool {
        !(self.min <= self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreQuery {
    pub range: ScoreRange,
    pub detail: Detail,
    pub direction: Direction,
}

impl ScoreQuery {
    /// Entries holding exactly `score`.
    pub fn score(score: f64) -> Self {
        Self::range(score, score)
    }

    pub fn range(min: f64, max: f64) -> Self {
        ScoreQuery {
            range: ScoreRange::new(min, max),
            detail: Detail::Compact,
            direction: Direction::FromHead,
        }
    }

    pub fn detailed(mut self) -> Self {
        self.detail = Detail::Detailed;
        self
    }

    pub fn from_tail(mut self) -> Self {
        self.direction = Direction::FromTail;
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

/// Inclusive rank interval. Negative ranks count from the end, `-1` being the last entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RankQuery {
    pub min: isize,
    pub max: isize,
    pub detail: Detail,
    pub direction: Direction,
}

impl RankQuery {
    pub fn rank(rank: isize) -> Self {
        Self::range(rank, rank)
    }

    pub fn range(min: isize, max: isize) -> Self {
        RankQuery {
            min,
            max,
            detail: Detail::Compact,
            direction: Direction::FromHead,
        }
    }

    pub fn detailed(mut self) -> Self {
        self.detail = Detail::Detailed;
        self
    }

    pub fn from_tail(mut self) -> Self {
        self.direction = Direction::FromTail;
        self
    }

    pub fn with_detail(mut self, detail: Detail) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry<T> {
    pub value: T,
    pub score: f64,
    pub rank: usize,
}

/// Result of a multi-entry operation. `C` is the compact payload.
#[derive(Clone, Debug, PartialEq)]
pub enum Items<C, T> {
    Compact(Vec<C>),
    Detailed(Vec<Entry<T>>),
}

impl<C, T> Items<C, T> {
    pub fn empty(detail: Detail) -> Self {
        match detail {
            Detail::Compact => Items::Compact(Vec::new()),
            Detail::Detailed => Items::Detailed(Vec::new()),
        }
    }

    /// Shapes full entries according to `detail`, projecting each one with `compact` when only
    /// the compact payload is wanted.
    pub fn build<F>(detail: Detail, entries: Vec<Entry<T>>, compact: F) -> Self
    where
        F: FnMut(Entry<T>) -> C,
    {
        match detail {
            Detail::Compact => Items::Compact(entries.into_iter().map(compact).collect()),
            Detail::Detailed => Items::Detailed(entries),
        }
    }

    pub fn len(&self) -> usize {
        match *self {
            Items::Compact(ref v) => v.len(),
            Items::Detailed(ref v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn compact(&self) -> Option<&[C]> {
        match *self {
            Items::Compact(ref v) => Some(v),
            Items::Detailed(_) => None,
        }
    }

    pub fn detailed(&self) -> Option<&[Entry<T>]> {
        match *self {
            Items::Compact(_) => None,
            Items::Detailed(ref v) => Some(v),
        }
    }
}

/// Result of a single-entry operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Item<C, T> {
    Compact(C),
    Detailed(Entry<T>),
}

impl<C, T> Item<C, T> {
    pub fn build<F>(detail: Detail, entry: Entry<T>, compact: F) -> Self
    where
        F: FnOnce(Entry<T>) -> C,
    {
        match detail {
            Detail::Compact => Item::Compact(compact(entry)),
            Detail::Detailed => Item::Detailed(entry),
        }
    }
}
