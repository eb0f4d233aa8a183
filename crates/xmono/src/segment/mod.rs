//! Directed line segments: the reference curve family.
//!
//! Purpose
//! - Implement `DirectionalTraits` for straight segments over any `Kernel`.
//!   With `ExactKernel` every operation is exact; with `FloatKernel` every
//!   answer is certified or reported as `DegenerateInput`.
//!
//! Assumptions and conventions
//! - Segments are closed and have positive length.
//! - Mergeability needs a shared endpoint, matching direction and collinear
//!   supports. An uncertifiable collinearity test answers `false`.
//!
//! Code cross-refs: `kernel::Kernel`, `traits::DirectionalTraits`, `polyline`

mod intersect;
mod types;

use std::cmp::Ordering;

use crate::error::{Result, TraitsError};
use crate::kernel::{Kernel, Orientation, Point};
use crate::traits::{DirectionalTraits, Intersections, XMonotoneTraits};

pub(crate) use intersect::intersect_segments;
pub use types::DirectedSegment;

/// Segment traits over kernel `K`.
#[derive(Clone, Debug, Default)]
pub struct SegmentTraits<K: Kernel> {
    kernel: K,
}

impl<K: Kernel> SegmentTraits<K> {
    #[inline]
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }

    #[inline]
    pub fn kernel(&self) -> &K {
        &self.kernel
    }

    /// Directed segment from `source` to `target`.
    pub fn construct_segment(
        &self,
        source: Point<K::Ft>,
        target: Point<K::Ft>,
    ) -> Result<DirectedSegment<K::Ft>> {
        self.kernel.check_point(&source)?;
        self.kernel.check_point(&target)?;
        match self.kernel.compare_xy(&source, &target) {
            Ordering::Less => Ok(DirectedSegment::from_ordered(source, target, true)),
            Ordering::Greater => Ok(DirectedSegment::from_ordered(target, source, false)),
            Ordering::Equal => Err(TraitsError::DegenerateCurve),
        }
    }

    /// Convenience: directed segment from `f64` coordinates.
    pub fn segment_from_f64(
        &self,
        source: (f64, f64),
        target: (f64, f64),
    ) -> Result<DirectedSegment<K::Ft>> {
        let s = self.kernel.point_from_f64(source.0, source.1)?;
        let t = self.kernel.point_from_f64(target.0, target.1)?;
        self.construct_segment(s, t)
    }

    /// Is `p` on the closed segment?
    pub fn contains_point(&self, c: &DirectedSegment<K::Ft>, p: &Point<K::Ft>) -> Result<bool> {
        let k = &self.kernel;
        if k.compare_xy(p, c.left()) == Ordering::Less
            || k.compare_xy(p, c.right()) == Ordering::Greater
        {
            return Ok(false);
        }
        Ok(k.orientation(c.left(), c.right(), p)?.is_collinear())
    }
}

impl<K: Kernel> XMonotoneTraits for SegmentTraits<K> {
    type Point = Point<K::Ft>;
    type XCurve = DirectedSegment<K::Ft>;

    #[inline]
    fn compare_xy(&self, p: &Self::Point, q: &Self::Point) -> Ordering {
        self.kernel.compare_xy(p, q)
    }

    #[inline]
    fn min_vertex<'c>(&self, c: &'c Self::XCurve) -> &'c Self::Point {
        c.left()
    }

    #[inline]
    fn max_vertex<'c>(&self, c: &'c Self::XCurve) -> &'c Self::Point {
        c.right()
    }

    #[inline]
    fn is_vertical(&self, c: &Self::XCurve) -> bool {
        self.kernel.compare_x(c.left(), c.right()) == Ordering::Equal
    }

    fn compare_y_at_x(&self, p: &Self::Point, c: &Self::XCurve) -> Result<Ordering> {
        let k = &self.kernel;
        if k.compare_x(p, c.left()) == Ordering::Less
            || k.compare_x(p, c.right()) == Ordering::Greater
        {
            return Err(TraitsError::NotInXRange);
        }
        if self.is_vertical(c) {
            return Ok(if k.compare_y(p, c.left()) == Ordering::Less {
                Ordering::Less
            } else if k.compare_y(p, c.right()) == Ordering::Greater {
                Ordering::Greater
            } else {
                Ordering::Equal
            });
        }
        Ok(match k.orientation(c.left(), c.right(), p)? {
            Orientation::LeftTurn => Ordering::Greater,
            Orientation::RightTurn => Ordering::Less,
            Orientation::Collinear => Ordering::Equal,
        })
    }

    #[inline]
    fn equal(&self, a: &Self::XCurve, b: &Self::XCurve) -> bool {
        a.left() == b.left() && a.right() == b.right()
    }
}

impl<K: Kernel> DirectionalTraits for SegmentTraits<K> {
    #[inline]
    fn compare_endpoints_xy(&self, c: &Self::XCurve) -> Ordering {
        if c.is_directed_right() {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    #[inline]
    fn construct_opposite(&self, c: &Self::XCurve) -> Self::XCurve {
        c.reversed()
    }

    fn intersect(
        &self,
        a: &Self::XCurve,
        b: &Self::XCurve,
    ) -> Result<Intersections<Self::Point, Self::XCurve>> {
        let events = intersect_segments(&self.kernel, a, b)?;
        Ok(Intersections::from_sorted(events))
    }

    fn split(&self, c: &Self::XCurve, p: &Self::Point) -> Result<(Self::XCurve, Self::XCurve)> {
        let k = &self.kernel;
        k.check_point(p)?;
        if k.compare_xy(p, c.left()) != Ordering::Greater
            || k.compare_xy(p, c.right()) != Ordering::Less
        {
            return Err(TraitsError::InvalidSplitPoint {
                reason: "point is not strictly interior",
            });
        }
        if !k.orientation(c.left(), c.right(), p)?.is_collinear() {
            return Err(TraitsError::InvalidSplitPoint {
                reason: "point is not on the curve",
            });
        }
        let dir = c.is_directed_right();
        let lower = DirectedSegment::from_ordered(c.left().clone(), p.clone(), dir);
        let upper = DirectedSegment::from_ordered(p.clone(), c.right().clone(), dir);
        Ok(if dir { (lower, upper) } else { (upper, lower) })
    }

    fn are_mergeable(&self, a: &Self::XCurve, b: &Self::XCurve) -> bool {
        if a.is_directed_right() != b.is_directed_right() {
            return false;
        }
        let a_then_b = a.target() == b.source();
        let b_then_a = b.target() == a.source();
        if a_then_b == b_then_a {
            return false;
        }
        let far = if a_then_b { b.target() } else { b.source() };
        match self.kernel.orientation(a.source(), a.target(), far) {
            Ok(o) => o.is_collinear(),
            Err(e) => {
                tracing::debug!(error = %e, "mergeability not certified");
                false
            }
        }
    }

    fn merge(&self, a: &Self::XCurve, b: &Self::XCurve) -> Result<Self::XCurve> {
        if !self.are_mergeable(a, b) {
            return Err(TraitsError::MergePreconditionFailed);
        }
        let (first, second) = if a.target() == b.source() {
            (a, b)
        } else {
            (b, a)
        };
        Ok(if first.is_directed_right() {
            DirectedSegment::from_ordered(first.left().clone(), second.right().clone(), true)
        } else {
            DirectedSegment::from_ordered(second.left().clone(), first.right().clone(), false)
        })
    }
}
