use crate::Error;

/// A cell on an (unbounded) integer grid
///
/// `y` grows downwards, matching the row order of a text map.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
}

impl Position {
    /// Builds a new position
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the squared Euclidean distance to another position
    ///
    /// This is computed in `u128`, so it can't overflow for any pair of `i32`
    /// coordinates.
    pub fn distance_squared(&self, other: Position) -> u128 {
        let dx = u128::from(self.x.abs_diff(other.x));
        let dy = u128::from(self.y.abs_diff(other.y));
        dx * dx + dy * dy
    }

    /// Returns `self + (dx, dy)`, failing on overflow
    pub(crate) fn offset(&self, dx: i32, dy: i32) -> Result<Self, Error> {
        let x = self.x.checked_add(dx).ok_or(Error::Overflow("position"))?;
        let y = self.y.checked_add(dy).ok_or(Error::Overflow("position"))?;
        Ok(Self { x, y })
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::str::FromStr for Position {
    type Err = std::num::ParseIntError;

    /// Parses `x,y` (whitespace around either number is allowed)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',').unwrap_or((s, ""));
        Ok(Self {
            x: x.trim().parse()?,
            y: y.trim().parse()?,
        })
    }
}
