//! Error types for record validation and graph construction

use std::fmt;
use thiserror::Error;

/// Why a required record field was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Missing,
    Empty,
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldProblem::Missing => f.write_str("missing"),
            FieldProblem::Empty => f.write_str("empty"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkageError {
    /// A record lacks one of the fields the builder indexes on.
    /// `row` is the zero-based position of the record in the input sequence.
    #[error("malformed record at row {row}: field `{field}` is {problem}")]
    MalformedRecord {
        row: usize,
        field: &'static str,
        problem: FieldProblem,
    },
}

impl LinkageError {
    pub fn missing(row: usize, field: &'static str) -> Self {
        LinkageError::MalformedRecord { row, field, problem: FieldProblem::Missing }
    }

    pub fn empty(row: usize, field: &'static str) -> Self {
        LinkageError::MalformedRecord { row, field, problem: FieldProblem::Empty }
    }

    /// Row of the offending record
    pub fn row(&self) -> usize {
        match self {
            LinkageError::MalformedRecord { row, .. } => *row,
        }
    }
}

pub type Result<T> = std::result::Result<T, LinkageError>;
