extern crate time;

use std::fmt;

use time::get_time;

/// Current timestamp in microseconds
pub fn ustime() -> i64 {
    let tv = get_time();
    tv.sec * 1000000 + (tv.nsec / 1000) as i64
}

/// Current timestamp in milliseconds
pub fn mstime() -> i64 {
    ustime() / 1000
}

/// A line could not be tokenized.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SplitError {
    /// A quote was opened and never closed.
    UnbalancedQuotes,
    /// A closing quote was immediately followed by a non-space character.
    TrailingGarbage,
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SplitError::UnbalancedQuotes => f.write_str("unbalanced quotes"),
            SplitError::TrailingGarbage => f.write_str("closing quote must be followed by a space"),
        }
    }
}

impl std::error::Error for SplitError {}

#[derive(PartialEq, Clone, Copy)]
enum Quoting {
    None,
    Double,
    Single,
}

fn hex_pair(chars: &[char], i: usize) -> Option<char> {
    if i + 3 >= chars.len() || chars[i + 1] != 'x' {
        return None;
    }
    let hi = chars[i + 2].to_digit(16)?;
    let lo = chars[i + 3].to_digit(16)?;
    std::char::from_u32(hi * 16 + lo)
}

/// Splits a config or command line into arguments.
///
/// Arguments are separated by whitespace. Double quotes allow spaces and
/// the usual escapes (`\n`, `\r`, `\t`, `\xHH`); single quotes are literal
/// except for `\'`.
///
/// # Examples
/// ```
/// # use util::split_args;
/// #
/// let res = split_args("insert \"big apple\" 10").unwrap();
/// assert_eq!(res, vec!["insert", "big apple", "10"]);
/// ```
pub fn split_args(line: &str) -> Result<Vec<String>, SplitError> {
    let chars = line.chars().collect::<Vec<_>>();
    let mut result = Vec::new();
    let mut i = 0;

    loop {
        while i < chars.len() && (chars[i] == '\0' || chars[i].is_whitespace()) {
            i += 1;
        }
        if i >= chars.len() {
            return Ok(result);
        }

        let mut quoting = Quoting::None;
        let mut current = String::new();
        while i < chars.len() {
            let c = chars[i];
            match quoting {
                Quoting::Double => match c {
                    '\\' if hex_pair(&chars, i).is_some() => {
                        current.extend(hex_pair(&chars, i));
                        i += 3;
                    }
                    '\\' if i + 1 < chars.len() => {
                        i += 1;
                        current.push(match chars[i] {
                            'n' => '\n',
                            'r' => '\r',
                            't' => '\t',
                            other => other,
                        });
                    }
                    '"' => {
                        if i + 1 < chars.len() && !chars[i + 1].is_whitespace() {
                            return Err(SplitError::TrailingGarbage);
                        }
                        i += 1;
                        quoting = Quoting::None;
                        break;
                    }
                    _ => current.push(c),
                },
                Quoting::Single => match c {
                    '\\' if i + 1 < chars.len() && chars[i + 1] == '\'' => {
                        current.push('\'');
                        i += 1;
                    }
                    '\'' => {
                        if i + 1 < chars.len() && !chars[i + 1].is_whitespace() {
                            return Err(SplitError::TrailingGarbage);
                        }
                        i += 1;
                        quoting = Quoting::None;
                        break;
                    }
                    _ => current.push(c),
                },
                Quoting::None => match c {
                    ' ' | '\t' | '\n' | '\r' | '\0' => break,
                    '"' => quoting = Quoting::Double,
                    '\'' => quoting = Quoting::Single,
                    _ => current.push(c),
                },
            }
            i += 1;
        }

        if quoting != Quoting::None {
            return Err(SplitError::UnbalancedQuotes);
        }
        result.push(current);
    }
}
