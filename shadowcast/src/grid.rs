//! Text-based maps and a set-backed visibility sink
//!
//! Neither type is required by the scan itself, which only sees callbacks;
//! they're the standard way to drive it from a rectangular map.
use crate::{Error, FovConfig, Position};
use std::collections::HashSet;
use std::io::Read;

/// A rectangular map of walls and floors
///
/// Everything outside the rectangle counts as a wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    walls: Vec<bool>,
    origin: Option<Position>,
}

impl Grid {
    /// Parses a map from text
    ///
    /// Each non-blank line is one row.  `#` or `1` is a wall, `.` or `0` is a
    /// floor, and `@` is a floor which also marks the observer's position
    /// (see [`Grid::origin`]).  Leading and trailing whitespace on each line
    /// is ignored.
    pub fn from_text(text: &str) -> Result<Self, Error> {
        let mut walls = vec![];
        let mut origin = None;
        let mut width = None;
        let mut height = 0;
        for line in text.lines().map(str::trim).filter(|s| !s.is_empty()) {
            let mut n = 0;
            for c in line.chars() {
                let wall = match c {
                    '#' | '1' => true,
                    '.' | '0' => false,
                    '@' => {
                        if origin.is_some() {
                            return Err(Error::DuplicateOrigin);
                        }
                        origin = Some(Position::new(
                            to_coord(n)?,
                            to_coord(height)?,
                        ));
                        false
                    }
                    c => return Err(Error::UnknownTile(c)),
                };
                walls.push(wall);
                n += 1;
            }
            match width {
                None => width = Some(n),
                Some(expected) if expected != n => {
                    return Err(Error::RaggedRow {
                        row: height,
                        expected,
                        actual: n,
                    });
                }
                Some(_) => (),
            }
            height += 1;
        }
        let Some(width) = width else {
            return Err(Error::EmptyGrid);
        };
        to_coord(width)?;
        to_coord(height)?;
        Ok(Self {
            width,
            height,
            walls,
            origin,
        })
    }

    /// Reads and parses a map (see [`Grid::from_text`])
    pub fn from_reader<R: Read>(mut r: R) -> Result<Self, Error> {
        let mut text = String::new();
        r.read_to_string(&mut text)?;
        Self::from_text(&text)
    }

    /// Returns the map width, in tiles
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the map height, in tiles
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the position of the `@` marker, if the map had one
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    /// Checks whether the position lies within the map
    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos).is_some()
    }

    /// Checks whether the given position blocks sight
    ///
    /// Positions outside of the map are always blocking.
    pub fn is_blocking(&self, pos: Position) -> bool {
        self.index(pos).is_none_or(|i| self.walls[i])
    }

    /// Iterates over every floor position, in row-major order
    pub fn floors(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|p| !self.is_blocking(*p))
    }

    /// Iterates over every position in the map, in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        // Both dimensions were checked against `i32::MAX` during parsing
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| Position::new(x as i32, y as i32))
        })
    }

    /// Computes the set of positions visible from `origin`
    ///
    /// Only positions within the map are recorded.
    pub fn fov(
        &self,
        origin: Position,
        cfg: &FovConfig,
    ) -> Result<VisibleSet, Error> {
        let mut out = VisibleSet::new();
        self.fov_into(origin, cfg, &mut out)?;
        Ok(out)
    }

    /// Computes visibility from `origin`, recording results into `out`
    ///
    /// On error, `out` holds whatever was marked before the failure.
    pub fn fov_into(
        &self,
        origin: Position,
        cfg: &FovConfig,
        out: &mut VisibleSet,
    ) -> Result<(), Error> {
        if !self.contains(origin) {
            return Err(Error::OriginOutOfBounds(origin));
        }
        cfg.run(
            origin,
            |p| self.is_blocking(p),
            |p| {
                if self.contains(p) { out.mark(p) } else { Ok(()) }
            },
        )
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let x = usize::try_from(pos.x).ok().filter(|x| *x < self.width)?;
        let y = usize::try_from(pos.y).ok().filter(|y| *y < self.height)?;
        Some(x + y * self.width)
    }
}

fn to_coord(v: usize) -> Result<i32, Error> {
    i32::try_from(v).map_err(|_| Error::Overflow("map size"))
}

/// A de-duplicating collection of visible positions
#[derive(Clone, Debug, Default)]
pub struct VisibleSet {
    seen: HashSet<Position>,
    limit: Option<usize>,
}

impl VisibleSet {
    /// Builds an empty, unbounded set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an empty set which refuses to hold more than `limit` positions
    pub fn with_limit(limit: usize) -> Self {
        Self {
            seen: HashSet::new(),
            limit: Some(limit),
        }
    }

    /// Records a position as visible
    ///
    /// Marking a position twice is harmless.  Fails if the set is full, or if
    /// it can't allocate room for a new position.
    pub fn mark(&mut self, pos: Position) -> Result<(), Error> {
        if self.seen.contains(&pos) {
            return Ok(());
        }
        if let Some(limit) = self.limit {
            if self.seen.len() >= limit {
                return Err(Error::CapacityExceeded(limit));
            }
        }
        self.seen.try_reserve(1)?;
        self.seen.insert(pos);
        Ok(())
    }

    /// Checks whether the position has been marked
    pub fn contains(&self, pos: Position) -> bool {
        self.seen.contains(&pos)
    }

    /// Returns the number of distinct positions marked
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Checks whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Iterates over marked positions, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.seen.iter().copied()
    }

    /// Draws the set over a map, as rows of `1` (visible) and `0` (hidden)
    pub fn render(&self, grid: &Grid) -> String {
        let mut out = String::with_capacity((grid.width() + 1) * grid.height());
        for p in grid.positions() {
            if p.x == 0 && p.y != 0 {
                out.push('\n');
            }
            out.push(if self.contains(p) { '1' } else { '0' });
        }
        out
    }
}
