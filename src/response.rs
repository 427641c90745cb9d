use std::fmt;

use skiplist::{Entry, Item, Items};

/// A command response to print back to the user
#[derive(PartialEq, Debug, Clone)]
pub enum Response {
    /// No data
    Nil,
    /// A number
    Integer(i64),
    /// A score
    Float(f64),
    /// A stored value
    Data(String),
    /// A simple error string
    Error(String),
    /// A simple status string
    Status(String),
    /// An array of responses that may mix different types
    Array(Vec<Response>),
}

impl Response {
    /// Returns true if and only if the response is an error.
    pub fn is_error(&self) -> bool {
        match *self {
            Response::Error(_) => true,
            _ => false,
        }
    }

    fn entry(entry: Entry<String>) -> Response {
        Response::Array(vec![
            Response::Data(entry.value),
            Response::Float(entry.score),
            Response::Integer(entry.rank as i64),
        ])
    }

    /// Values, or value/score/rank triples.
    pub fn from_items(items: Items<String, String>) -> Response {
        match items {
            Items::Compact(values) => Response::Array(values.into_iter().map(Response::Data).collect()),
            Items::Detailed(entries) => Response::Array(entries.into_iter().map(Response::entry).collect()),
        }
    }

    /// Scores, or value/score/rank triples.
    pub fn from_scores(items: Items<f64, String>) -> Response {
        match items {
            Items::Compact(scores) => Response::Array(scores.into_iter().map(Response::Float).collect()),
            Items::Detailed(entries) => Response::Array(entries.into_iter().map(Response::entry).collect()),
        }
    }

    /// Ranks, or value/score/rank triples.
    pub fn from_ranks(items: Items<usize, String>) -> Response {
        match items {
            Items::Compact(ranks) => Response::Array(ranks.into_iter().map(|r| Response::Integer(r as i64)).collect()),
            Items::Detailed(entries) => Response::Array(entries.into_iter().map(Response::entry).collect()),
        }
    }

    pub fn from_item(item: Option<Item<String, String>>) -> Response {
        match item {
            Some(Item::Compact(value)) => Response::Data(value),
            Some(Item::Detailed(entry)) => Response::entry(entry),
            None => Response::Nil,
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
        match *self {
            Response::Nil => write!(f, "(nil)"),
            Response::Integer(i) => write!(f, "(integer) {}", i),
            Response::Float(s) => write!(f, "(score) {}", s),
            Response::Data(ref d) => write!(f, "{:?}", d),
            Response::Error(ref e) => write!(f, "(error) {}", e),
            Response::Status(ref s) => write!(f, "{}", s),
            Response::Array(ref a) => {
                if a.is_empty() {
                    return write!(f, "(empty array)");
                }
                for (i, el) in a.iter().enumerate() {
                    if i != 0 {
                        write!(f, "\n{:width$}", "", width = indent)?;
                    }
                    let prefix = format!("{}) ", i + 1);
                    write!(f, "{}", prefix)?;
                    el.write_indented(f, indent + prefix.len())?;
                }
                Ok(())
            }
        }
    }
}

/// Renders the way an interactive client would, one element per line for arrays.
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.write_indented(f, 0)
    }
}
