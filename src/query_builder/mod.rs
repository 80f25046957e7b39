//! Statement generation from column-value mappings.
//!
//! Every builder here is pure: it validates names, assembles `?`-placeholder SQL and
//! flattens the values into a positional parameter list. Nothing touches the database;
//! `Db` runs the results through its prepared path.

use crate::error::DbError;
use crate::types::RowValues;

mod insert;
mod update;

pub use insert::{insert, insert_multiple};
pub use update::{update_last_key, update_where};

/// A generated statement and the parameters for its placeholders, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    pub query: String,
    pub params: Vec<RowValues>,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Vec::new(),
        }
    }

    /// Number of `?` markers outside string literals, quoted identifiers and comments.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        count_placeholders(&self.query)
    }

    /// Fail fast if the placeholder count and parameter count disagree.
    ///
    /// # Errors
    /// Returns `DbError::ParameterError` on mismatch.
    pub fn check(&self) -> Result<(), DbError> {
        let placeholders = self.placeholder_count();
        if placeholders == self.params.len() {
            Ok(())
        } else {
            Err(DbError::ParameterError(format!(
                "statement has {placeholders} placeholders but {} parameters were supplied",
                self.params.len()
            )))
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum ScanState {
    Normal,
    SingleQuoted,
    DoubleQuoted,
    Backtick,
    LineComment,
    BlockComment,
}

fn count_placeholders(sql: &str) -> usize {
    let mut state = ScanState::Normal;
    let mut count = 0;
    let mut chars = sql.chars().peekable();
    while let Some(c) = chars.next() {
        state = match (state, c) {
            (ScanState::Normal, '?') => {
                count += 1;
                ScanState::Normal
            }
            (ScanState::Normal, '\'') => ScanState::SingleQuoted,
            (ScanState::Normal, '"') => ScanState::DoubleQuoted,
            (ScanState::Normal, '`') => ScanState::Backtick,
            (ScanState::Normal, '-') if chars.peek() == Some(&'-') => {
                chars.next();
                ScanState::LineComment
            }
            (ScanState::Normal, '/') if chars.peek() == Some(&'*') => {
                chars.next();
                ScanState::BlockComment
            }
            (ScanState::SingleQuoted, '\'')
            | (ScanState::DoubleQuoted, '"')
            | (ScanState::Backtick, '`')
            | (ScanState::LineComment, '\n') => ScanState::Normal,
            (ScanState::BlockComment, '*') if chars.peek() == Some(&'/') => {
                chars.next();
                ScanState::Normal
            }
            (s, _) => s,
        };
    }
    count
}

/// `?,?,?` with `n` markers.
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}
