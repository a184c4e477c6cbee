//! Checked table reads shared by the engines.

use stepwise_foundation::{Error, ErrorKind, Grid, Result, Row};

/// Reads a grid cell the engine has already filled.
pub(crate) fn read<T: Clone>(grid: &Grid<T>, row: usize, col: usize) -> Result<T> {
    grid.get(row, col).cloned().ok_or_else(|| {
        Error::new(ErrorKind::Internal(format!(
            "read outside table: ({row},{col}) in {}x{}",
            grid.rows(),
            grid.cols()
        )))
    })
}

/// Reads a row cell the engine has already filled.
pub(crate) fn read_row<T: Clone>(row: &Row<T>, index: usize) -> Result<T> {
    row.get(index).cloned().ok_or_else(|| {
        Error::new(ErrorKind::Internal(format!(
            "read outside table: [{index}] in {}",
            row.len()
        )))
    })
}

/// Converts a validated non-negative input to an index.
///
/// Values that do not fit in `usize` saturate, which every engine treats as
/// "larger than any table dimension".
pub(crate) fn to_index(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
