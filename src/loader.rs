// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Reading lists of integers
//!
//! Both puzzle inputs are lists of integers: masses one per line, and Intcode programs separated
//! by commas. [parse_integers] accepts either, or any mix of commas and whitespace.

use std::error::Error;
use std::fmt::{self, Display};
use std::fs::read_to_string;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

/// An error reading a list of integers
#[derive(Debug)]
pub enum LoadError {
    /// The file exists, but couldn't be read
    Io {
        /// The file that was being read
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },
    /// A token couldn't be parsed as an `i64`
    Parse {
        /// The token that failed to parse
        token: String,
        /// The token's position in the list
        index: usize,
        /// The underlying error
        source: ParseIntError,
    },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            LoadError::Parse {
                token,
                index,
                source,
            } => write!(f, "item {index} ({token:?}) is not an integer: {source}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
        }
    }
}

/// Parse integers separated by any mix of commas and whitespace.
///
/// # Example
///
/// ```
/// use gravity_assist::loader::parse_integers;
/// assert_eq!(parse_integers("1,9,10,3,\n2, 3, 11, 0\n99").unwrap(), [1, 9, 10, 3, 2, 3, 11, 0, 99]);
/// assert!(parse_integers("  \n").unwrap().is_empty());
/// ```
pub fn parse_integers(text: &str) -> Result<Vec<i64>, LoadError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| {
            token.parse::<i64>().map_err(|source| LoadError::Parse {
                token: token.to_owned(),
                index,
                source,
            })
        })
        .collect()
}

/// Read and [parse](parse_integers) the integers in the file at `path`.
///
/// A file that doesn't exist is treated as an empty list, which is logged as a warning.
pub fn load_integers(path: impl AsRef<Path>) -> Result<Vec<i64>, LoadError> {
    let path = path.as_ref();
    match read_to_string(path) {
        Ok(text) => {
            let ints = parse_integers(&text)?;
            tracing::debug!(path = %path.display(), count = ints.len(), "loaded integers");
            Ok(ints)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "input file not found, using an empty list");
            Ok(Vec::new())
        }
        Err(source) => Err(LoadError::Io {
            path: path.to_owned(),
            source,
        }),
    }
}
