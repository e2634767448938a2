//! Rows of tiles at a fixed depth within a quadrant
use crate::{Error, Fraction};

/// A tile in quadrant-local coordinates
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Distance from the origin along the quadrant's axis (always ≥ 1)
    pub depth: i32,
    /// Offset across the quadrant's axis
    pub col: i32,
}

impl Tile {
    /// Returns the slope of the line through the origin and this tile's near
    /// corner, `(2·col - 1) / (2·depth)`
    pub fn slope(&self) -> Result<Fraction, Error> {
        let num = self
            .col
            .checked_mul(2)
            .and_then(|c| c.checked_sub(1))
            .ok_or(Error::Overflow("tile slope"))?;
        let denom =
            self.depth.checked_mul(2).ok_or(Error::Overflow("tile slope"))?;
        Ok(Fraction::new(num, denom))
    }
}

/// A diamond-shaped row of tiles, bounded by two slopes
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Distance from the origin
    pub depth: i32,
    /// Slope of the row's left (low-column) boundary
    pub start_slope: Fraction,
    /// Slope of the row's right (high-column) boundary
    pub end_slope: Fraction,
}

impl Row {
    /// Builds a new row
    pub fn new(depth: i32, start_slope: Fraction, end_slope: Fraction) -> Self {
        Self {
            depth,
            start_slope,
            end_slope,
        }
    }

    /// Returns the first row of a quadrant, spanning slopes `-1` to `1`
    pub fn initial() -> Self {
        Self::new(1, Fraction::from(-1), Fraction::from(1))
    }

    /// Returns the tiles in this row, from low to high column
    ///
    /// The column bounds are `depth · start_slope` and `depth · end_slope`,
    /// rounded so that a tile lying exactly on a boundary is included.  If
    /// rounding collapses the range, the iterator is empty.
    pub fn tiles(&self) -> Result<Tiles, Error> {
        let min_col = self.start_slope.checked_mul_int(self.depth)?;
        let max_col = self.end_slope.checked_mul_int(self.depth)?;
        Ok(Tiles {
            depth: self.depth,
            next: Some(min_col.round_ties_up()?),
            max_col: max_col.round_ties_down()?,
        })
    }

    /// Returns a copy of this row, one step further from the origin
    pub fn next_depth(&self) -> Result<Row, Error> {
        let depth =
            self.depth.checked_add(1).ok_or(Error::Overflow("row depth"))?;
        Ok(Self { depth, ..*self })
    }

    /// Checks whether a floor tile can be seen symmetrically from the origin
    ///
    /// This is true when the tile's center lies within the row's slopes
    /// (inclusive), which guarantees that the origin is also visible from the
    /// tile.
    pub fn is_symmetric(&self, tile: Tile) -> Result<bool, Error> {
        let col = Fraction::from(tile.col);
        let lo = self.start_slope.checked_mul_int(self.depth)?;
        let hi = self.end_slope.checked_mul_int(self.depth)?;
        Ok(col >= lo && col <= hi)
    }
}

/// Iterator over the tiles of a [`Row`]
///
/// This is cheap to rebuild with [`Row::tiles`], which is the only way to
/// restart it.
#[derive(Clone, Debug)]
pub struct Tiles {
    depth: i32,
    next: Option<i32>,
    max_col: i32,
}

impl Iterator for Tiles {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        let col = self.next.filter(|c| *c <= self.max_col)?;
        self.next = col.checked_add(1);
        Some(Tile {
            depth: self.depth,
            col,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self
            .next
            .filter(|c| *c <= self.max_col)
            .map(|c| self.max_col.abs_diff(c) as usize + 1)
            .unwrap_or(0);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Tiles {}
