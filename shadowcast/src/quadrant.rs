//! Quadrant-local coordinate frames
use crate::{Error, Position, row::Tile};

/// One of the four cardinal sweep directions
///
/// Iteration order (via [`strum::IntoEnumIterator`]) is the order in which
/// [`compute_fov`](crate::compute_fov) scans quadrants.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Cardinal {
    /// Decreasing `y`
    North,
    /// Increasing `x`
    East,
    /// Increasing `y`
    South,
    /// Decreasing `x`
    West,
}

/// Maps local `(depth, col)` tiles in one cardinal frame to grid positions
#[derive(Copy, Clone, Debug)]
pub struct Quadrant {
    cardinal: Cardinal,
    origin: Position,
}

impl Quadrant {
    /// Builds a new quadrant around the given origin
    pub fn new(cardinal: Cardinal, origin: Position) -> Self {
        Self { cardinal, origin }
    }

    /// Returns the cardinal direction of this quadrant
    pub fn cardinal(&self) -> Cardinal {
        self.cardinal
    }

    /// Returns the quadrant's origin
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Converts a local tile into an absolute grid position
    ///
    /// `depth` runs away from the origin along the cardinal axis and `col`
    /// runs across it, so negative and positive columns cover the two
    /// octants on either side of the axis.
    pub fn transform(&self, tile: Tile) -> Result<Position, Error> {
        let Tile { depth, col } = tile;
        let neg = || depth.checked_neg().ok_or(Error::Overflow("position"));
        match self.cardinal {
            Cardinal::North => self.origin.offset(col, neg()?),
            Cardinal::South => self.origin.offset(col, depth),
            Cardinal::East => self.origin.offset(depth, col),
            Cardinal::West => self.origin.offset(neg()?, col),
        }
    }
}
