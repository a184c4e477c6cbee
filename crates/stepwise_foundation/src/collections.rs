//! Persistent collections with structural sharing.
//!
//! These are thin wrappers around the `im` crate's persistent vectors. A clone
//! shares structure with the original, and writes to one copy are never
//! visible through the other. Trace snapshots rely on that: recording a table
//! costs a pointer copy, and the engine can keep filling cells afterwards.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// Row
// =============================================================================

/// Persistent one-dimensional table.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Row<T: Clone>(im::Vector<T>);

impl<T: Clone> Row<T> {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self(im::Vector::new())
    }

    /// Creates a row of `len` copies of `value`.
    #[must_use]
    pub fn filled(len: usize, value: T) -> Self {
        Self(std::iter::repeat_n(value, len).collect())
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the row has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a cell by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.0.get(index)
    }

    /// Overwrites a cell in place.
    ///
    /// Earlier clones of this row keep their old value.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `index` is past the end.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        if index >= self.len() {
            return Err(Error::index_out_of_bounds(index, self.len()));
        }
        self.0.set(index, value);
        Ok(())
    }

    /// Appends a cell.
    pub fn push(&mut self, value: T) {
        self.0.push_back(value);
    }

    /// Returns an iterator over the cells.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }
}

impl<T: Clone> FromIterator<T> for Row<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Row<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Row<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, cell) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "]")
    }
}

// =============================================================================
// Grid
// =============================================================================

/// Persistent two-dimensional table, stored row-major.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T: Clone> {
    rows: im::Vector<Row<T>>,
    cols: usize,
}

impl<T: Clone> Grid<T> {
    /// Creates a `rows` x `cols` grid filled with `value`.
    #[must_use]
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        let row = Row::filled(cols, value);
        Self {
            rows: std::iter::repeat_n(row, rows).collect(),
            cols,
        }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Gets a cell.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Gets a whole row.
    #[must_use]
    pub fn row(&self, row: usize) -> Option<&Row<T>> {
        self.rows.get(row)
    }

    /// Overwrites a cell in place.
    ///
    /// Only the touched row is copied; every other row stays shared with
    /// earlier clones.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if either coordinate is past the end.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let rows = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or_else(|| Error::index_out_of_bounds(row, rows))?;
        target.set(col, value)
    }

    /// Returns an iterator over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &Row<T>> {
        self.rows.iter()
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter_rows()).finish()
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .iter_rows()
            .map(|r| r.iter().map(ToString::to_string).collect())
            .collect();
        let width = cells
            .iter()
            .flatten()
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(1);

        for (i, row) in cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cell:>width$}")?;
            }
        }
        Ok(())
    }
}
