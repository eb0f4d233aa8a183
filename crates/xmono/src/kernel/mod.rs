//! Numeric kernels: points, comparison and orientation predicates, line intersection.
//!
//! Purpose
//! - Give curve families a small, exact-or-certified set of primitives so the
//!   traits operations never return a silently wrong answer.
//!
//! Assumptions and conventions
//! - Points are `nalgebra::Point2<Ft>`; lexicographic order is x first, y second.
//! - `ExactKernel` works over `malachite::Rational` and never fails.
//! - `FloatKernel` works over finite `f64`. Predicates run a static error-bound
//!   filter first; inconclusive cases either fall back to exact rational
//!   evaluation or report `DegenerateInput` (see `KernelCfg`). Constructed points
//!   are rounded and then certified to lie exactly on both input lines.
//!
//! Code cross-refs: `segment::SegmentTraits`, `polyline::PolylineTraits`

mod exact;
mod filtered;
mod types;

use std::cmp::Ordering;
use std::fmt::{Debug, Display};

use nalgebra::Scalar;

use crate::error::Result;

pub use exact::ExactKernel;
pub use filtered::FloatKernel;
pub use types::{KernelCfg, Orientation, Point};

/// Exact or certified geometric primitives over a coordinate field `Ft`.
///
/// Kernels carry only configuration, so they are cheap to clone and safe to
/// share between threads.
pub trait Kernel: Clone + Debug + Default + Send + Sync {
    /// Coordinate number type.
    type Ft: Scalar + Display + Send + Sync;

    /// Build a point from `f64` coordinates (exact conversion).
    fn point_from_f64(&self, x: f64, y: f64) -> Result<Point<Self::Ft>>;

    /// Reject points outside the kernel's numeric domain.
    fn check_point(&self, p: &Point<Self::Ft>) -> Result<()>;

    fn compare_x(&self, p: &Point<Self::Ft>, q: &Point<Self::Ft>) -> Ordering;

    fn compare_y(&self, p: &Point<Self::Ft>, q: &Point<Self::Ft>) -> Ordering;

    /// Lexicographic order: x first, y breaks ties.
    #[inline]
    fn compare_xy(&self, p: &Point<Self::Ft>, q: &Point<Self::Ft>) -> Ordering {
        self.compare_x(p, q).then_with(|| self.compare_y(p, q))
    }

    /// Side of `r` relative to the directed line `p → q`.
    fn orientation(
        &self,
        p: &Point<Self::Ft>,
        q: &Point<Self::Ft>,
        r: &Point<Self::Ft>,
    ) -> Result<Orientation>;

    /// Intersection of the supporting lines `p0 p1` and `q0 q1`.
    ///
    /// Pre: the lines are not parallel. Parallel lines yield `DegenerateInput`.
    fn intersect_lines(
        &self,
        p0: &Point<Self::Ft>,
        p1: &Point<Self::Ft>,
        q0: &Point<Self::Ft>,
        q1: &Point<Self::Ft>,
    ) -> Result<Point<Self::Ft>>;
}
