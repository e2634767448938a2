//! `shadowcast` computes field-of-view on 2D grids using symmetric
//! shadowcasting.
//!
//! Given an observer position, a predicate which reports whether a position
//! blocks sight, and a sink which records visible positions, the algorithm
//! produces the exact set of positions visible from the observer.  The result
//! has two useful properties:
//!
//! - **Symmetry**: if floor tile `B` is visible from floor tile `A`, then `A`
//!   is visible from `B`.
//! - **No blind corners**: sight doesn't leak around the corner of a wall
//!   which only partially occludes a diagonal.
//!
//! # Algorithm
//! The plane around the observer is split into four **quadrants** (north,
//! east, south, west), each of which covers the two octants on either side of
//! its axis.  Within a quadrant, the scan walks **rows** of tiles at
//! increasing distance (**depth**) from the observer.  Each row is bounded by
//! a pair of **slopes**; walls narrow those slopes (casting shadows) for the
//! rows behind them.
//!
//! Slopes are stored as exact [`Fraction`]s, so there's no floating-point
//! error at shadow boundaries.  A floor tile is visible only if its center lies
//! within the current slopes, which is what makes the result symmetric.  Walls
//! are visible whenever the scan reaches them.
//!
//! # Usage
//! The lowest-level entry point is [`compute_fov`], which takes two closures:
//! ```
//! use shadowcast::{compute_fov, Error, Position};
//! use std::collections::HashSet;
//!
//! // A 5x5 room with a wall around the edge
//! let is_blocking = |p: Position| {
//!     !(1..4).contains(&p.x) || !(1..4).contains(&p.y)
//! };
//! let mut seen = HashSet::new();
//! compute_fov(Position::new(2, 2), is_blocking, |p| -> Result<(), Error> {
//!     seen.insert(p);
//!     Ok(())
//! })?;
//! assert_eq!(seen.len(), 25);
//! # Ok::<(), shadowcast::Error>(())
//! ```
//!
//! The blocking predicate **must** eventually stop the scan, typically by
//! treating positions outside the map as walls; an always-open predicate scans
//! forever (or until a coordinate overflows).  The sink may be called more
//! than once for the same position.
//!
//! For maps stored as text, [`Grid`] and [`VisibleSet`] wrap both closures:
//! ```
//! use shadowcast::{FovConfig, Grid};
//!
//! let grid = Grid::from_text(
//!     "
//!     .......
//!     .#.....
//!     @......
//!     ",
//! )?;
//! let origin = grid.origin().unwrap();
//! let seen = grid.fov(origin, &FovConfig::default())?;
//! assert_eq!(
//!     seen.render(&grid),
//!     "1100111\n\
//!      1111111\n\
//!      1111111"
//! );
//! # Ok::<(), shadowcast::Error>(())
//! ```
//!
//! [`FovConfig`] adds a view radius and a choice of [`ScanMode`]; the default
//! recursive scan uses one stack frame per row of depth, so very large open
//! maps may prefer [`ScanMode::Worklist`].
//!
//! # Errors
//! The scan itself never fails, except for integer overflow when coordinates
//! approach the `i32` limits ([`Error::Overflow`]).  The sink's own error type
//! `E` only needs to implement `From<Error>`, so overflow travels through the
//! same channel as sink failures while remaining distinguishable.  Any error
//! aborts the scan immediately; positions that were already marked stay
//! marked.
#![warn(missing_docs)]

mod config;
mod error;
mod fraction;
mod grid;
mod position;

pub mod quadrant;
pub mod row;
pub mod scan;

pub use config::{FovConfig, ScanMode};
pub use error::Error;
pub use fraction::Fraction;
pub use grid::{Grid, VisibleSet};
pub use position::Position;

/// Computes the set of positions visible from `origin`
///
/// `is_blocking` reports whether a position blocks sight; it should be a pure
/// function of the position, and must treat anything outside the caller's map
/// as blocking.  `mark_visible` is called once for the origin (before anything
/// else), then for every visible position, possibly more than once per
/// position.
///
/// This is the unbounded, recursive configuration; see [`FovConfig::run`] for
/// other options.
pub fn compute_fov<B, M, E>(
    origin: Position,
    is_blocking: B,
    mark_visible: M,
) -> Result<(), E>
where
    B: Fn(Position) -> bool,
    M: FnMut(Position) -> Result<(), E>,
    E: From<Error>,
{
    FovConfig::default().run(origin, is_blocking, mark_visible)
}
