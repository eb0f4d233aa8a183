//! Curve-traits contract consumed by arrangement construction.
//!
//! Purpose
//! - `XMonotoneTraits` is the undirected base: lexicographic point order, the
//!   left/right endpoints of a curve, verticality and point/curve comparisons.
//! - `DirectionalTraits` refines it for curves that carry a direction and may
//!   intersect in their interiors: endpoint order, opposite, intersect, split,
//!   mergeability and merge.
//!
//! Conventions
//! - Families are selected at compile time (generic parameter); the sweep that
//!   consumes these traits pays no dispatch cost.
//! - All operations are pure over immutable values.
//! - `split` returns its parts in direction order; `intersect` returns events
//!   left to right and is deterministic for a given pair of inputs.
//!
//! Code cross-refs: `segment::SegmentTraits`, `polyline::PolylineTraits`

mod types;

#[cfg(test)]
pub(crate) mod checks;

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::Result;

pub use types::{Contact, IntersectionEvent, Intersections};

/// Basic x-monotone curve traits (undirected view).
pub trait XMonotoneTraits {
    type Point: Clone + Debug + PartialEq;
    type XCurve: Clone + Debug + PartialEq;

    /// Lexicographic point order (x, then y).
    fn compare_xy(&self, p: &Self::Point, q: &Self::Point) -> Ordering;

    /// Lexicographically smaller endpoint.
    fn min_vertex<'c>(&self, c: &'c Self::XCurve) -> &'c Self::Point;

    /// Lexicographically larger endpoint.
    fn max_vertex<'c>(&self, c: &'c Self::XCurve) -> &'c Self::Point;

    fn is_vertical(&self, c: &Self::XCurve) -> bool;

    /// Is `p` below (`Less`), on (`Equal`) or above (`Greater`) the curve?
    ///
    /// Pre: `p` lies in the closed x-range of `c`, else `NotInXRange`.
    fn compare_y_at_x(&self, p: &Self::Point, c: &Self::XCurve) -> Result<Ordering>;

    /// Same point set, regardless of direction.
    fn equal(&self, a: &Self::XCurve, b: &Self::XCurve) -> bool;
}

/// Traits for directed x-monotone curves that may intersect in their interiors.
pub trait DirectionalTraits: XMonotoneTraits {
    /// `Less` if the curve runs left to right (source is the min vertex),
    /// `Greater` otherwise.
    fn compare_endpoints_xy(&self, c: &Self::XCurve) -> Ordering;

    /// Same geometry, source and target swapped.
    fn construct_opposite(&self, c: &Self::XCurve) -> Self::XCurve;

    /// Interior intersections of `a` and `b`, ordered left to right.
    fn intersect(
        &self,
        a: &Self::XCurve,
        b: &Self::XCurve,
    ) -> Result<Intersections<Self::Point, Self::XCurve>>;

    /// Split `c` at a point strictly inside it. Both parts keep `c`'s direction;
    /// the first part starts at `c`'s source.
    fn split(&self, c: &Self::XCurve, p: &Self::Point) -> Result<(Self::XCurve, Self::XCurve)>;

    /// Can `a` and `b` be fused into a single curve of this family?
    fn are_mergeable(&self, a: &Self::XCurve, b: &Self::XCurve) -> bool;

    /// Fuse two mergeable curves.
    ///
    /// Pre: `are_mergeable(a, b)`, else `MergePreconditionFailed`.
    fn merge(&self, a: &Self::XCurve, b: &Self::XCurve) -> Result<Self::XCurve>;

    #[inline]
    fn source<'c>(&self, c: &'c Self::XCurve) -> &'c Self::Point {
        match self.compare_endpoints_xy(c) {
            Ordering::Less => self.min_vertex(c),
            _ => self.max_vertex(c),
        }
    }

    #[inline]
    fn target<'c>(&self, c: &'c Self::XCurve) -> &'c Self::Point {
        match self.compare_endpoints_xy(c) {
            Ordering::Less => self.max_vertex(c),
            _ => self.min_vertex(c),
        }
    }
}
