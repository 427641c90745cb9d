use skiplist::{Detail, Direction, RankQuery, RankedSkipList, ScoreQuery, ScoreRange};

use crate::response::Response;

/// The list every command operates on.
pub type List = RankedSkipList<String>;

macro_rules! validate {
    ($expr: expr, $err: expr) => {
        if !($expr) {
            return Response::Error($err.to_string());
        }
    };
}

macro_rules! try_validate {
    ($expr: expr, $err: expr) => {{
        match $expr {
            Ok(r) => r,
            Err(_) => return Response::Error($err.to_string()),
        }
    }};
}

/// Positional arguments of a command once its trailing flags are stripped.
struct Arguments<'a> {
    argv: Vec<&'a str>,
    detail: Detail,
    direction: Direction,
}

impl<'a> Arguments<'a> {
    /// Strips `withranks` and `fromtail` off the end of `args`, skipping the command name.
    /// The first `arity` arguments are positional even when spelled like a flag.
    fn parse(args: &'a [String], arity: usize) -> Arguments<'a> {
        let mut argv = args.iter().skip(1).map(|s| &s[..]).collect::<Vec<_>>();
        let mut detail = Detail::Compact;
        let mut direction = Direction::FromHead;
        while argv.len() > arity {
            let last = match argv.last() {
                Some(last) => last.to_ascii_lowercase(),
                None => break,
            };
            match &*last {
                "withranks" => detail = Detail::Detailed,
                "fromtail" => direction = Direction::FromTail,
                _ => break,
            }
            argv.pop();
        }
        Arguments {
            argv,
            detail,
            direction,
        }
    }

    fn len(&self) -> usize {
        self.argv.len()
    }

    fn get_f64(&self, i: usize) -> Result<f64, ()> {
        self.argv.get(i).ok_or(())?.parse().map_err(|_| ())
    }

    fn get_isize(&self, i: usize) -> Result<isize, ()> {
        self.argv.get(i).ok_or(())?.parse().map_err(|_| ())
    }

    fn get_string(&self, i: usize) -> Result<String, ()> {
        self.argv.get(i).map(|s| (*s).to_owned()).ok_or(())
    }

    /// `<min> [max]`, where a missing max repeats min.
    fn score_range(&self) -> Result<ScoreRange, ()> {
        let min = self.get_f64(0)?;
        let max = if self.len() > 1 { self.get_f64(1)? } else { min };
        Ok(ScoreRange::new(min, max))
    }

    fn score_query(&self) -> Result<ScoreQuery, ()> {
        let range = self.score_range()?;
        Ok(ScoreQuery::range(range.min, range.max)
            .with_detail(self.detail)
            .with_direction(self.direction))
    }

    fn rank_query(&self) -> Result<RankQuery, ()> {
        let min = self.get_isize(0)?;
        let max = if self.len() > 1 { self.get_isize(1)? } else { min };
        Ok(RankQuery::range(min, max)
            .with_detail(self.detail)
            .with_direction(self.direction))
    }
}

fn insert(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 2, "Wrong number of parameters");
    let value = try_validate!(args.get_string(0), "Invalid value");
    let score = try_validate!(args.get_f64(1), "Invalid score");
    match list.insert_from(value, score, args.direction) {
        Ok(()) => Response::Status("OK".to_owned()),
        Err(err) => Response::Error(err.to_string()),
    }
}

fn getscore(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1 || args.len() == 2, "Wrong number of parameters");
    let query = try_validate!(args.score_query(), "Invalid score");
    Response::from_items(list.get_by_score(&query))
}

fn delscore(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1 || args.len() == 2, "Wrong number of parameters");
    let query = try_validate!(args.score_query(), "Invalid score");
    Response::from_items(list.delete_by_score(&query))
}

fn getrank(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1 || args.len() == 2, "Wrong number of parameters");
    let query = try_validate!(args.rank_query(), "Invalid rank");
    if args.len() == 1 {
        return Response::from_item(list.get_at(query.min, query.detail, query.direction));
    }
    Response::from_items(list.get_by_rank(&query))
}

fn delrank(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1 || args.len() == 2, "Wrong number of parameters");
    let query = try_validate!(args.rank_query(), "Invalid rank");
    if args.len() == 1 {
        return Response::from_item(list.delete_at(query.min, query.detail, query.direction));
    }
    Response::from_items(list.delete_by_rank(&query))
}

fn delvalue(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1, "Wrong number of parameters");
    let value = try_validate!(args.get_string(0), "Invalid value");
    match list.delete_by_value(&value, args.detail, args.direction) {
        Ok(items) => Response::from_scores(items),
        Err(err) => Response::Error(err.to_string()),
    }
}

fn popfirst(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 0, "Wrong number of parameters");
    Response::from_item(list.pop_first(args.detail))
}

fn poplast(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 0, "Wrong number of parameters");
    Response::from_item(list.pop_last(args.detail))
}

fn scoreof(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1, "Wrong number of parameters");
    let value = try_validate!(args.get_string(0), "Invalid value");
    Response::Array(list.get_score(&value).into_iter().map(Response::Float).collect())
}

/// `rankof <value> [min max]`, the optional range filtering the value's scores.
fn rankof(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1 || args.len() == 3, "Wrong number of parameters");
    let value = try_validate!(args.get_string(0), "Invalid value");
    let filter = if args.len() == 3 {
        let min = try_validate!(args.get_f64(1), "Invalid min");
        let max = try_validate!(args.get_f64(2), "Invalid max");
        Some(ScoreRange::new(min, max))
    } else {
        None
    };
    match list.get_rank(&value, filter, args.detail, args.direction) {
        Ok(items) => Response::from_ranks(items),
        Err(err) => Response::Error(err.to_string()),
    }
}

fn count(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1 || args.len() == 2, "Wrong number of parameters");
    let query = try_validate!(args.score_query(), "Invalid score");
    Response::Integer(list.count_by_score(&query) as i64)
}

fn countvalue(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 1, "Wrong number of parameters");
    let value = try_validate!(args.get_string(0), "Invalid value");
    Response::Integer(list.count_by_value(&value) as i64)
}

fn len(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 0, "Wrong number of parameters");
    Response::Integer(list.len() as i64)
}

fn clear(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 0, "Wrong number of parameters");
    list.clear();
    Response::Status("OK".to_owned())
}

fn dump(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 0, "Wrong number of parameters");
    Response::Status(format!("{:?}", list))
}

fn check(args: &Arguments, list: &mut List) -> Response {
    validate!(args.len() == 0, "Wrong number of parameters");
    match list.check_integrity() {
        Ok(()) => Response::Status("OK".to_owned()),
        Err(err) => Response::Error(err.to_string()),
    }
}

type Handler = fn(&Arguments, &mut List) -> Response;

/// A command's handler and its minimum number of positional arguments.
fn lookup(name: &str) -> Option<(Handler, usize)> {
    let entry = match name {
        "insert" => (insert as Handler, 2),
        "getscore" => (getscore as Handler, 1),
        "getrank" => (getrank as Handler, 1),
        "delscore" => (delscore as Handler, 1),
        "delrank" => (delrank as Handler, 1),
        "delvalue" => (delvalue as Handler, 1),
        "popfirst" => (popfirst as Handler, 0),
        "poplast" => (poplast as Handler, 0),
        "scoreof" => (scoreof as Handler, 1),
        "rankof" => (rankof as Handler, 1),
        "count" => (count as Handler, 1),
        "countvalue" => (countvalue as Handler, 1),
        "len" => (len as Handler, 0),
        "clear" => (clear as Handler, 0),
        "dump" => (dump as Handler, 0),
        "check" => (check as Handler, 0),
        _ => return None,
    };
    Some(entry)
}

/// Runs one tokenized command line against `list`.
pub fn command(args: &[String], list: &mut List) -> Response {
    if args.is_empty() {
        return Response::Error("Empty command".to_owned());
    }
    let name = args[0].to_ascii_lowercase();
    match lookup(&name) {
        Some((handler, arity)) => handler(&Arguments::parse(args, arity), list),
        None => Response::Error(format!("Unknown command '{}'", name)),
    }
}
