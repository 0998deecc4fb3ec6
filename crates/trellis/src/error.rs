//! Error types for the grid.

use std::fmt;

use thiserror::Error;

/// The axis a row/column index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Rows, stacked top to bottom.
    Row,
    /// Columns, laid out left to right.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row => f.write_str("row"),
            Self::Column => f.write_str("column"),
        }
    }
}

/// An index outside `[0, count)` on one axis.
///
/// Raised by every index-based accessor and mutator; indices are never
/// clamped.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{axis} index {index} out of range (count {count})")]
pub struct RangeError {
    pub axis: Axis,
    pub index: usize,
    pub count: usize,
}

impl RangeError {
    pub(crate) fn row(index: usize, count: usize) -> Self {
        Self {
            axis: Axis::Row,
            index,
            count,
        }
    }

    pub(crate) fn column(index: usize, count: usize) -> Self {
        Self {
            axis: Axis::Column,
            index,
            count,
        }
    }

    /// Check `index` against `count` on `axis`.
    pub(crate) fn check(axis: Axis, index: usize, count: usize) -> Result<(), Self> {
        if index < count {
            Ok(())
        } else {
            Err(Self { axis, index, count })
        }
    }
}

/// Errors produced by grid operations.
#[derive(Error, Debug)]
pub enum GridError {
    /// A row or column index was out of range.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Configuration could not be parsed or holds an invalid value.
    #[error("invalid grid configuration: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("failed to read grid configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.message().to_string())
    }
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;
