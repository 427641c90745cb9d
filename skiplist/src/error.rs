use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed options or query arguments.
    InvalidArgument(String),
    /// Infinite and NaN scores are reserved for the sentinels.
    InvalidScore(f64),
    /// A broken structural invariant. Never expected in a correct build.
    InternalInconsistency(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidArgument(ref msg) => write!(f, "invalid argument: {}", msg),
            Error::InvalidScore(score) => write!(f, "invalid score: {}", score),
            Error::InternalInconsistency(ref msg) => write!(f, "internal inconsistency: {}", msg),
        }
    }
}

impl error::Error for Error {}
