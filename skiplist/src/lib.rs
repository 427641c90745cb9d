//! A rank-augmented skiplist mapping scores to values, the in-memory index behind a sorted set.
//!
//! Conceptually, the list resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ----------> <tail>
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ----------> <tail>
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] -> <tail>
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] -> <tail>
//! ```
//!
//! where each link also records how many level-0 positions it skips. Summing those spans while
//! descending gives the rank of any node in `O(log(n))` on average, from either end: every link
//! is doubly recorded, so a descent can start at the tail just as well as at the head.
//!
//! Entries are ordered by score and, for equal scores, by insertion order. A value may be stored
//! several times under different scores; a value index finds all its nodes without a scan.
//!
//! The list is not synchronized. Share it between threads behind a `Mutex` or `RwLock`.

#[macro_use]
extern crate logger;
extern crate config;
extern crate rand;

mod cursor;
pub mod error;
pub mod level_generator;
pub mod options;
pub mod ranked_skiplist;
pub mod request;
mod skipnode;
mod value_index;

pub use crate::error::{Error, Result};
pub use crate::level_generator::{GeometricalLevelGenerator, LevelGenerator};
pub use crate::options::{LevelPolicy, Options};
pub use crate::ranked_skiplist::{Iter, RankedSkipList};
pub use crate::request::{Detail, Direction, Entry, Item, Items, RankQuery, ScoreQuery, ScoreRange};
