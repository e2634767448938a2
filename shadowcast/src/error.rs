//! Module containing the universal error type
use crate::Position;
use std::collections::TryReserveError;
use thiserror::Error;

/// Universal error type for `shadowcast`
#[derive(Error, Debug)]
pub enum Error {
    /// Integer arithmetic left the `i32` range
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// The visible set could not allocate room for another position
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// The visible set is already holding its maximum number of positions
    #[error("visible set is full ({0} positions)")]
    CapacityExceeded(usize),

    /// Map text contains no rows
    #[error("map is empty")]
    EmptyGrid,

    /// Map rows have mismatched widths
    #[error("row {row} has width {actual}, expected {expected}")]
    RaggedRow {
        /// Index of the offending row
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of the offending row
        actual: usize,
    },

    /// Map text contains a character that isn't a known tile
    #[error("unknown tile {0:?}")]
    UnknownTile(char),

    /// Map has more than one `@` marker
    #[error("map has more than one origin marker")]
    DuplicateOrigin,

    /// No origin was given and the map has no `@` marker
    #[error("no origin was provided")]
    MissingOrigin,

    /// Origin lies outside of the map
    #[error("origin {0} is outside of the map")]
    OriginOutOfBounds(Position),

    /// IO error; see inner code for details
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}
