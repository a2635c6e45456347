use crate::error::{GeoItersError, Result};

/// Row-major position over a `rows x columns` rectangle.
///
/// The bound is checked before a position is handed out, so the cursor
/// yields exactly `rows * columns` positions and then stays exhausted.
/// `rows * columns` always fits in a `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GridCursor {
    row: usize,
    column: usize,
    rows: usize,
    columns: usize,
}

impl GridCursor {
    /// Fails with [`GeoItersError::InvalidArgument`] when the cell count
    /// overflows `usize`.
    pub(crate) fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows.checked_mul(columns).is_none() {
            return Err(GeoItersError::InvalidArgument(format!(
                "{} rows x {} columns is more cells than can be counted",
                rows, columns
            )));
        }

        Ok(Self {
            row: 0,
            column: 0,
            rows,
            columns,
        })
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn columns(&self) -> usize {
        self.columns
    }

    pub(crate) fn has_next(&self) -> bool {
        self.columns > 0 && self.row < self.rows
    }

    pub(crate) fn remaining(&self) -> usize {
        if !self.has_next() {
            return 0;
        }
        // Bounded by rows * columns, checked in `new`
        (self.rows - self.row) * self.columns - self.column
    }

    /// Returns the current `(row, column)` and advances.
    pub(crate) fn advance(&mut self) -> Option<(usize, usize)> {
        if !self.has_next() {
            return None;
        }

        let current = (self.row, self.column);
        self.column += 1;
        if self.column >= self.columns {
            self.column = 0;
            self.row += 1;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_major_order() -> Result<()> {
        let mut cursor = GridCursor::new(2, 3)?;
        let mut seen = Vec::new();
        while let Some(pos) = cursor.advance() {
            seen.push(pos);
        }
        assert_eq!(seen, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
        Ok(())
    }

    #[test]
    fn test_stays_exhausted() -> Result<()> {
        let mut cursor = GridCursor::new(1, 1)?;
        assert_eq!(cursor.advance(), Some((0, 0)));
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
        assert!(!cursor.has_next());
        Ok(())
    }

    #[test]
    fn test_remaining() -> Result<()> {
        let mut cursor = GridCursor::new(3, 4)?;
        assert_eq!(cursor.remaining(), 12);
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.remaining(), 10);
        for _ in 0..10 {
            cursor.advance();
        }
        assert_eq!(cursor.remaining(), 0);
        Ok(())
    }

    #[test]
    fn test_empty() -> Result<()> {
        assert_eq!(GridCursor::new(0, 5)?.advance(), None);
        assert_eq!(GridCursor::new(5, 0)?.advance(), None);
        assert_eq!(GridCursor::new(5, 0)?.remaining(), 0);
        assert_eq!(GridCursor::new(usize::MAX, 0)?.remaining(), 0);
        Ok(())
    }

    #[test]
    fn test_rejects_uncountable_grid() {
        assert!(matches!(
            GridCursor::new(usize::MAX, 2),
            Err(GeoItersError::InvalidArgument(_))
        ));
        assert!(matches!(
            GridCursor::new(usize::MAX / 2 + 1, usize::MAX / 2 + 1),
            Err(GeoItersError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_largest_countable_grid() -> Result<()> {
        let mut cursor = GridCursor::new(usize::MAX, 1)?;
        assert_eq!(cursor.remaining(), usize::MAX);
        cursor.advance();
        assert_eq!(cursor.remaining(), usize::MAX - 1);
        Ok(())
    }
}
