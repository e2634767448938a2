//! The shadowcasting scan within a single quadrant
//!
//! Each row is walked from low to high column.  A wall following a floor tile
//! starts a narrower child row (ending at the wall's near edge); a floor tile
//! following a wall pulls the row's start slope in to that tile's near edge.
//! If the row ends on a floor tile, the (possibly narrowed) row continues one
//! step further out.
use crate::{
    Error, Position,
    quadrant::Quadrant,
    row::{Row, Tile},
};

/// Scans a row and every row behind it, recursing at each floor-to-wall edge
///
/// Recursion depth is the distance travelled from the origin, so very open
/// maps (without a radius limit) may prefer [`scan_worklist`].
pub fn scan_recursive<B, M, E>(
    mut row: Row,
    quadrant: &Quadrant,
    is_blocking: &B,
    mark_visible: &mut M,
) -> Result<(), E>
where
    B: Fn(Position) -> bool,
    M: FnMut(Position) -> Result<(), E>,
    E: From<Error>,
{
    let mut prev_wall = None;
    for tile in row.tiles()? {
        let (wall, child) = visit(
            &mut row,
            tile,
            prev_wall,
            quadrant,
            is_blocking,
            mark_visible,
        )?;
        if let Some(child) = child {
            scan_recursive(child, quadrant, is_blocking, mark_visible)?;
        }
        prev_wall = Some(wall);
    }
    if prev_wall == Some(false) {
        scan_recursive(row.next_depth()?, quadrant, is_blocking, mark_visible)?;
    }
    Ok(())
}

/// Scans a row and every row behind it, using an explicit stack of rows
///
/// This visits the same set of tiles as [`scan_recursive`], but not in the
/// same order.
pub fn scan_worklist<B, M, E>(
    row: Row,
    quadrant: &Quadrant,
    is_blocking: &B,
    mark_visible: &mut M,
) -> Result<(), E>
where
    B: Fn(Position) -> bool,
    M: FnMut(Position) -> Result<(), E>,
    E: From<Error>,
{
    let mut todo = vec![row];
    while let Some(mut row) = todo.pop() {
        let mut prev_wall = None;
        for tile in row.tiles()? {
            let (wall, child) = visit(
                &mut row,
                tile,
                prev_wall,
                quadrant,
                is_blocking,
                mark_visible,
            )?;
            todo.extend(child);
            prev_wall = Some(wall);
        }
        if prev_wall == Some(false) {
            todo.push(row.next_depth()?);
        }
    }
    Ok(())
}

/// Handles a single tile within a row
///
/// Marks the tile if it's visible and narrows `row` after a wall-to-floor
/// edge.  Returns whether the tile is a wall, along with the child row to scan
/// if this tile closes a floor-to-wall edge.
fn visit<B, M, E>(
    row: &mut Row,
    tile: Tile,
    prev_wall: Option<bool>,
    quadrant: &Quadrant,
    is_blocking: &B,
    mark_visible: &mut M,
) -> Result<(bool, Option<Row>), E>
where
    B: Fn(Position) -> bool,
    M: FnMut(Position) -> Result<(), E>,
    E: From<Error>,
{
    let pos = quadrant.transform(tile)?;
    let wall = is_blocking(pos);
    if wall || row.is_symmetric(tile)? {
        mark_visible(pos)?;
    }
    let mut child = None;
    match (prev_wall, wall) {
        (Some(true), false) => row.start_slope = tile.slope()?,
        (Some(false), true) => {
            let mut next = row.next_depth()?;
            next.end_slope = tile.slope()?;
            child = Some(next);
        }
        _ => (),
    }
    Ok((wall, child))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::quadrant::Cardinal;
    use std::collections::BTreeSet;

    /// Runs a single quadrant over an ASCII map, returning visible positions
    fn scan_map(
        map: &[&str],
        origin: Position,
        cardinal: Cardinal,
        worklist: bool,
    ) -> BTreeSet<Position> {
        let is_blocking = |p: Position| {
            let Ok(y) = usize::try_from(p.y) else {
                return true;
            };
            let Ok(x) = usize::try_from(p.x) else {
                return true;
            };
            map.get(y)
                .and_then(|row| row.as_bytes().get(x))
                .is_none_or(|c| *c == b'#')
        };
        let mut seen = BTreeSet::new();
        let mut mark = |p: Position| -> Result<(), Error> {
            seen.insert(p);
            Ok(())
        };
        let quadrant = Quadrant::new(cardinal, origin);
        if worklist {
            scan_worklist(Row::initial(), &quadrant, &is_blocking, &mut mark)
                .unwrap();
        } else {
            scan_recursive(Row::initial(), &quadrant, &is_blocking, &mut mark)
                .unwrap();
        }
        seen
    }

    fn render(map: &[&str], seen: &BTreeSet<Position>) -> String {
        let mut out = String::new();
        for (y, row) in map.iter().enumerate() {
            out += "\n";
            for x in 0..row.len() {
                let p = Position::new(x as i32, y as i32);
                out.push(if seen.contains(&p) { 'X' } else { '.' });
            }
        }
        out
    }

    #[test]
    fn open_quadrant_is_a_wedge() {
        let map = [
            ".......", //
            ".......",
            ".......",
            ".......",
        ];
        let seen = scan_map(&map, Position::new(3, 3), Cardinal::North, false);
        const EXPECTED: &str = "
XXXXXXX
.XXXXX.
..XXX..
.......";
        assert_eq!(render(&map, &seen), EXPECTED);
    }

    #[test]
    fn pillar_casts_a_shadow() {
        let map = [
            ".......", //
            ".......",
            ".......",
            "...#...",
            ".......",
        ];
        let seen = scan_map(&map, Position::new(3, 4), Cardinal::North, false);
        const EXPECTED: &str = "
XX...XX
XX...XX
.XX.XX.
..XXX..
.......";
        assert_eq!(render(&map, &seen), EXPECTED);
    }

    #[test]
    fn worklist_matches_recursion() {
        let map = [
            "..#....#..", //
            "....#.....",
            ".#........",
            "......##..",
            "...#......",
            "..........",
        ];
        for cardinal in [
            Cardinal::North,
            Cardinal::East,
            Cardinal::South,
            Cardinal::West,
        ] {
            for origin in [(4, 5), (0, 0), (9, 2), (5, 1)] {
                let origin = Position::from(origin);
                assert_eq!(
                    scan_map(&map, origin, cardinal, false),
                    scan_map(&map, origin, cardinal, true),
                    "{cardinal} from {origin}"
                );
            }
        }
    }

    #[test]
    fn sink_errors_abort_the_scan() {
        let mut calls = 0;
        let mut mark = |_p: Position| -> Result<(), Error> {
            calls += 1;
            if calls == 2 {
                Err(Error::CapacityExceeded(1))
            } else {
                Ok(())
            }
        };
        let quadrant = Quadrant::new(Cardinal::South, Position::new(0, 0));
        let is_blocking = |_| false;
        let r =
            scan_recursive(Row::initial(), &quadrant, &is_blocking, &mut mark);
        assert!(matches!(r, Err(Error::CapacityExceeded(1))));
        assert_eq!(calls, 2);
    }
}
