use crate::{
    Error, Position,
    quadrant::{Cardinal, Quadrant},
    row::Row,
    scan::{scan_recursive, scan_worklist},
};
use log::{debug, trace};
use strum::IntoEnumIterator;

/// Strategy used to walk rows behind a quadrant's first row
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ScanMode {
    /// Recurse at each shadow edge; stack depth grows with view distance
    #[default]
    Recursive,

    /// Keep pending rows on a heap-allocated stack
    Worklist,
}

/// Settings for a field-of-view computation
#[derive(Copy, Clone, Debug, Default)]
pub struct FovConfig {
    /// Maximum view distance (Euclidean), or `None` for unbounded
    ///
    /// Positions further than this from the origin are treated as blocking
    /// and are never marked as visible.  Without a radius, the blocking
    /// predicate alone must stop the scan (e.g. by treating out-of-bounds
    /// positions as walls).
    pub radius: Option<u32>,

    /// Row traversal strategy
    pub mode: ScanMode,
}

impl FovConfig {
    /// Computes field-of-view from `origin` using this configuration
    ///
    /// See [`compute_fov`](crate::compute_fov) for the callback contract.
    pub fn run<B, M, E>(
        &self,
        origin: Position,
        is_blocking: B,
        mut mark_visible: M,
    ) -> Result<(), E>
    where
        B: Fn(Position) -> bool,
        M: FnMut(Position) -> Result<(), E>,
        E: From<Error>,
    {
        debug!(
            "computing fov from {origin} ({} scan, radius {:?})",
            self.mode, self.radius
        );
        match self.radius {
            Some(r) => {
                let r2 = u128::from(r) * u128::from(r);
                let in_range = |p: Position| origin.distance_squared(p) <= r2;
                self.run_inner(
                    origin,
                    |p| !in_range(p) || is_blocking(p),
                    |p| {
                        if in_range(p) {
                            mark_visible(p)
                        } else {
                            Ok(())
                        }
                    },
                )
            }
            None => self.run_inner(origin, is_blocking, mark_visible),
        }
    }

    fn run_inner<B, M, E>(
        &self,
        origin: Position,
        is_blocking: B,
        mut mark_visible: M,
    ) -> Result<(), E>
    where
        B: Fn(Position) -> bool,
        M: FnMut(Position) -> Result<(), E>,
        E: From<Error>,
    {
        mark_visible(origin)?;
        for cardinal in Cardinal::iter() {
            trace!("scanning {cardinal} quadrant");
            let quadrant = Quadrant::new(cardinal, origin);
            match self.mode {
                ScanMode::Recursive => scan_recursive(
                    Row::initial(),
                    &quadrant,
                    &is_blocking,
                    &mut mark_visible,
                )?,
                ScanMode::Worklist => scan_worklist(
                    Row::initial(),
                    &quadrant,
                    &is_blocking,
                    &mut mark_visible,
                )?,
            }
        }
        Ok(())
    }
}
