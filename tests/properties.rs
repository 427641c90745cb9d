use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rankedset::{Detail, Direction, Entry, Item, Items, Options, RankQuery, RankedSkipList, ScoreQuery};

use crate::reference::Reference;

/// A list and its reference built from the same random pairs, with plenty of score ties and
/// repeated values.
fn populated(seed: u64, n: usize, max_level: usize) -> (RankedSkipList<u32>, Reference) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut list = RankedSkipList::with_options(Options::new().max_level(max_level).seed(seed)).unwrap();
    let mut reference = Reference::new();
    for _ in 0..n {
        let value = rng.gen_range(0..40);
        let score = rng.gen_range(0..60) as f64 / 2.0;
        let direction = if rng.gen() { Direction::FromHead } else { Direction::FromTail };
        list.insert_from(value, score, direction).unwrap();
        reference.insert(value, score);
    }
    (list, reference)
}

fn detailed<C>(items: Items<C, u32>) -> Vec<Entry<u32>> {
    match items {
        Items::Detailed(entries) => entries,
        Items::Compact(_) => panic!("expected detailed items"),
    }
}

fn single(item: Option<Item<u32, u32>>) -> Option<Entry<u32>> {
    item.map(|item| match item {
        Item::Detailed(entry) => entry,
        Item::Compact(_) => panic!("expected a detailed item"),
    })
}

#[test]
fn iteration_matches_sorted_reference() {
    for &(seed, max_level) in [(1, 32), (2, 4), (3, 2)].iter() {
        let (list, reference) = populated(seed, 400, max_level);
        reference.assert_matches(&list);
    }
}

#[test]
fn size_after_inserts_and_deletes() {
    let (mut list, _) = populated(4, 300, 8);
    let mut deleted = 0;
    deleted += list.delete_by_score(&ScoreQuery::range(3.0, 7.5)).len();
    deleted += list.delete_by_rank(&RankQuery::range(10, 19)).len();
    deleted += list.delete_by_value(&7, Detail::Compact, Direction::FromTail).unwrap().len();
    if list.pop_first(Detail::Compact).is_some() {
        deleted += 1;
    }
    if list.delete_at(-3, Detail::Compact, Direction::FromHead).is_some() {
        deleted += 1;
    }
    assert_eq!(list.len(), 300 - deleted);
    assert_eq!(list.iter().count(), list.len());
    list.check_integrity().unwrap();
}

#[test]
fn every_rank_once() {
    let (list, reference) = populated(5, 300, 6);
    let expected = reference.entries();
    for (r, entry) in expected.iter().enumerate() {
        for &direction in [Direction::FromHead, Direction::FromTail].iter() {
            let got = single(list.get_at(r as isize, Detail::Detailed, direction));
            assert_eq!(got.as_ref(), Some(entry));
        }
    }
    assert_eq!(list.get_at(expected.len() as isize, Detail::Detailed, Direction::FromHead), None);
}

#[test]
fn from_tail_ranks_mirror_ascending_ranks() {
    let (list, _) = populated(6, 250, 5);
    let len = list.len() as isize;
    for r in 0..len {
        // counting r from the end is the same entry as ascending rank len-1-r
        let from_end = list.get_at(-(r + 1), Detail::Detailed, Direction::FromTail);
        let ascending = list.get_at(len - 1 - r, Detail::Detailed, Direction::FromHead);
        assert_eq!(from_end, ascending);
    }
    for &(min, max) in [(0, 10), (-20, -1), (5, 500), (-1000, 3)].iter() {
        let head = list.get_by_rank(&RankQuery::range(min, max).detailed());
        let tail = list.get_by_rank(&RankQuery::range(min, max).detailed().from_tail());
        assert_eq!(head, tail);
    }
}

#[test]
fn deleting_a_rank_shifts_later_ranks() {
    let (mut list, _) = populated(7, 200, 6);
    for &r in [0usize, 57, 123, 150].iter() {
        let before = list.iter().map(|(&v, s, rank)| (v, s, rank)).collect::<Vec<_>>();
        let removed = single(list.delete_at(r as isize, Detail::Detailed, Direction::FromTail)).unwrap();
        assert_eq!((removed.value, removed.score, removed.rank), before[r]);
        let after = list.iter().map(|(&v, s, rank)| (v, s, rank)).collect::<Vec<_>>();
        assert_eq!(after.len(), before.len() - 1);
        for (old_rank, &(value, score, _)) in before.iter().enumerate() {
            if old_rank == r {
                continue;
            }
            let new_rank = if old_rank > r { old_rank - 1 } else { old_rank };
            assert_eq!(after[new_rank], (value, score, new_rank));
        }
        list.check_integrity().unwrap();
    }
}

#[test]
fn delete_by_score_removes_exactly_the_range() {
    for &(min, max, direction) in [
        (4.0, 9.5, Direction::FromHead),
        (0.0, 0.0, Direction::FromTail),
        (12.25, 12.75, Direction::FromHead),
        (-5.0, 100.0, Direction::FromTail),
        (29.5, 40.0, Direction::FromHead),
    ]
    .iter()
    {
        let (mut list, mut reference) = populated(8, 300, 6);
        let query = ScoreQuery::range(min, max).detailed().with_direction(direction);
        let counted = list.count_by_score(&query);
        let removed = detailed(list.delete_by_score(&query));
        assert_eq!(removed.len(), counted);
        assert_eq!(removed, reference.remove_score(min, max));
        reference.assert_matches(&list);
        assert_eq!(list.count_by_score(&query), 0);
    }
}

#[test]
fn get_rank_returns_every_holder() {
    let (list, reference) = populated(9, 300, 6);
    for value in 0..40 {
        for &direction in [Direction::FromHead, Direction::FromTail].iter() {
            let entries = detailed(list.get_rank(&value, None, Detail::Detailed, direction).unwrap());
            assert_eq!(entries.len(), list.count_by_value(&value));
            assert_eq!(entries, reference.by_value(value));
            for entry in entries {
                let at = single(list.get_at(entry.rank as isize, Detail::Detailed, Direction::FromHead)).unwrap();
                assert_eq!(at.value, value);
            }
        }
    }
}

#[test]
fn delete_by_value_ranks_precede_removal() {
    let (mut list, mut reference) = populated(10, 300, 6);
    for &value in [3u32, 17, 39].iter() {
        let removed = detailed(list.delete_by_value(&value, Detail::Detailed, Direction::FromTail).unwrap());
        assert_eq!(removed, reference.remove_value(value));
        assert!(!list.contains_value(&value));
        reference.assert_matches(&list);
    }
}

#[test]
fn count_by_score_matches_get_by_score() {
    let (list, reference) = populated(11, 500, 8);
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..200 {
        let a = rng.gen_range(-2.0..32.0);
        let b = rng.gen_range(-2.0..32.0);
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        let expected = reference.by_score(min, max).len();
        assert_eq!(list.count_by_score(&ScoreQuery::range(min, max)), expected);
        assert_eq!(list.count_by_score(&ScoreQuery::range(min, max).from_tail()), expected);
        assert_eq!(list.get_by_score(&ScoreQuery::range(min, max)).len(), expected);
    }
}
