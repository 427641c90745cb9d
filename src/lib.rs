//! Sorted-set index over a rank-augmented skiplist, plus the line-oriented command shell that
//! drives it.

pub extern crate skiplist;

pub mod command;
pub mod response;

pub use skiplist::{
    Detail, Direction, Entry, Error, Item, Items, Options, RankQuery, RankedSkipList, Result, ScoreQuery,
    ScoreRange,
};
