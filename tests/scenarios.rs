use rankedset::{Detail, Direction, Entry, Error, Item, Items, Options, RankQuery, RankedSkipList, ScoreQuery};

fn abc() -> RankedSkipList<&'static str> {
    RankedSkipList::from_pairs(vec![("a", 10.0), ("b", 5.0), ("c", 10.0)], Options::new().seed(17)).unwrap()
}

fn entry(value: &'static str, score: f64, rank: usize) -> Entry<&'static str> {
    Entry { value, score, rank }
}

#[test]
fn ascending_iteration_breaks_ties_by_insertion() {
    let list = abc();
    assert_eq!(
        list.iter().collect::<Vec<_>>(),
        vec![(&"b", 5.0, 0), (&"a", 10.0, 1), (&"c", 10.0, 2)]
    );
    assert_eq!(
        list.get_by_rank(&RankQuery::range(0, -1).detailed()),
        Items::Detailed(vec![entry("b", 5.0, 0), entry("a", 10.0, 1), entry("c", 10.0, 2)])
    );
}

#[test]
fn pop_first_detailed() {
    let mut list = abc();
    assert_eq!(list.pop_first(Detail::Detailed), Some(Item::Detailed(entry("b", 5.0, 0))));
    assert_eq!(list.len(), 2);
    list.check_integrity().unwrap();
}

#[test]
fn pop_last_detailed() {
    let mut list = abc();
    assert_eq!(list.pop_last(Detail::Detailed), Some(Item::Detailed(entry("c", 10.0, 2))));
    assert_eq!(list.pop_last(Detail::Compact), Some(Item::Compact("a")));
    assert_eq!(list.pop_last(Detail::Compact), Some(Item::Compact("b")));
    assert_eq!(list.pop_last(Detail::Compact), None);
    assert_eq!(list.pop_first(Detail::Detailed), None);
}

#[test]
fn delete_single_negative_rank() {
    let mut list = abc();
    assert_eq!(list.delete_by_rank(&RankQuery::rank(-1)), Items::Compact(vec!["c"]));
    assert_eq!(list.iter().map(|(v, _, _)| *v).collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(list.delete_at(-1, Detail::Detailed, Direction::FromTail), Some(Item::Detailed(entry("a", 10.0, 1))));
    list.check_integrity().unwrap();
}

#[test]
fn count_inverted_range() {
    let list = abc();
    assert_eq!(list.count_by_score(&ScoreQuery::range(100.0, 50.0)), 0);
    assert_eq!(list.count_by_score(&ScoreQuery::range(100.0, 50.0).from_tail()), 0);
}

#[test]
fn empty_list() {
    let mut list: RankedSkipList<&str> = RankedSkipList::new();
    assert_eq!(list.get_by_rank(&RankQuery::range(0, -1)), Items::Compact(vec![]));
    assert_eq!(list.get_at(0, Detail::Compact, Direction::FromTail), None);
    assert_eq!(list.delete_by_score(&ScoreQuery::range(-1e9, 1e9)), Items::Compact(vec![]));
    assert_eq!(list.delete_by_rank(&RankQuery::range(0, 0)), Items::Compact(vec![]));
    assert_eq!(list.count_by_score(&ScoreQuery::range(-1e9, 1e9)), 0);
    assert_eq!(list.get_score(&"x"), Vec::<f64>::new());
    assert_eq!(
        list.delete_by_value(&"x", Detail::Detailed, Direction::FromHead),
        Ok(Items::Detailed(vec![]))
    );
    assert_eq!(list.first(), None);
    assert_eq!(list.last(), None);
    assert_eq!(list.iter().count(), 0);
    assert_eq!(format!("{:?}", list), "[]");
    list.check_integrity().unwrap();
}

#[test]
fn reserved_scores() {
    let mut list = abc();
    assert_eq!(
        list.insert("x", std::f64::NEG_INFINITY),
        Err(Error::InvalidScore(std::f64::NEG_INFINITY))
    );
    assert_eq!(list.len(), 3);
    // a failed pair stops the extension but keeps what came before
    let err = list.extend_pairs(vec![("d", 1.0), ("e", std::f64::INFINITY), ("f", 2.0)]);
    assert_eq!(err, Err(Error::InvalidScore(std::f64::INFINITY)));
    assert_eq!(list.len(), 4);
    assert!(list.contains_value(&"d"));
    assert!(!list.contains_value(&"f"));
}

#[test]
fn invalid_options() {
    match RankedSkipList::<u8>::with_options(Options::new().probability(2.0)) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other.map(|l| l.len())),
    }
    match RankedSkipList::<u8>::from_pairs(vec![(1, 1.0)], Options::new().max_level(0)) {
        Err(Error::InvalidArgument(_)) => (),
        other => panic!("unexpected {:?}", other.map(|l| l.len())),
    }
}

#[test]
fn duplicate_values_and_scores() {
    let mut list = RankedSkipList::from_pairs(
        vec![("v", 1.0), ("w", 1.0), ("v", 2.0), ("v", 1.0)],
        Options::new().seed(2),
    )
    .unwrap();
    assert_eq!(list.count_by_value(&"v"), 3);
    assert_eq!(list.get_score(&"v"), vec![1.0, 2.0, 1.0]);
    assert_eq!(
        list.get_rank(&"v", None, Detail::Detailed, Direction::FromTail),
        Ok(Items::Detailed(vec![entry("v", 1.0, 0), entry("v", 2.0, 3), entry("v", 1.0, 2)]))
    );
    assert_eq!(list.delete_by_score(&ScoreQuery::score(1.0)), Items::Compact(vec!["v", "w", "v"]));
    assert_eq!(list.count_by_value(&"v"), 1);
    assert_eq!(list.get_score(&"v"), vec![2.0]);
    assert_eq!(list.get_score(&"w"), Vec::<f64>::new());
    list.check_integrity().unwrap();
}

#[test]
fn single_level_list() {
    // a plain doubly linked list still answers every query
    let mut list = RankedSkipList::from_pairs((0..30).map(|i| (i, i as f64)), Options::new().max_level(1)).unwrap();
    assert_eq!(list.max_level(), 1);
    assert_eq!(list.get_at(17, Detail::Compact, Direction::FromTail), Some(Item::Compact(17)));
    assert_eq!(list.count_by_score(&ScoreQuery::range(10.0, 19.5)), 10);
    assert_eq!(list.delete_by_rank(&RankQuery::range(5, 9)).len(), 5);
    list.check_integrity().unwrap();
}

#[test]
fn level_policy_is_clamped() {
    let mut list = RankedSkipList::with_options(Options::new().max_level(3).level_policy(|_| 50)).unwrap();
    for i in 0..10 {
        list.insert(i, -(i as f64)).unwrap();
    }
    list.check_integrity().unwrap();
    assert_eq!(list.first(), Some((&9, -9.0)));
    assert_eq!(list.last(), Some((&0, 0.0)));
}
