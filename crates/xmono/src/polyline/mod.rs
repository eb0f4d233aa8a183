//! Directed x-monotone polylines built on the segment family.
//!
//! Purpose
//! - A second model of `DirectionalTraits` whose curves have interior vertices,
//!   so intersections include touches at a vertex (`Contact::Tangent`) and
//!   overlaps spanning several pieces.
//!
//! Assumptions and conventions
//! - Polylines are kept canonical (no collinear interior vertex); construction
//!   and merge drop such vertices, which makes `merge(split(c, p)) == c`.
//! - A polyline is either strictly x-increasing or a single vertical segment.
//!
//! Code cross-refs: `segment::SegmentTraits` (per-piece predicates),
//! `polyline::intersect` (sweep over pieces)

mod intersect;
mod types;

use std::cmp::Ordering;

use crate::error::{Result, TraitsError};
use crate::kernel::{Kernel, Point};
use crate::segment::{DirectedSegment, SegmentTraits};
use crate::traits::{DirectionalTraits, Intersections, XMonotoneTraits};

pub use types::DirectedPolyline;

/// Polyline traits over kernel `K`.
#[derive(Clone, Debug, Default)]
pub struct PolylineTraits<K: Kernel> {
    segments: SegmentTraits<K>,
}

impl<K: Kernel> PolylineTraits<K> {
    #[inline]
    pub fn new(kernel: K) -> Self {
        Self {
            segments: SegmentTraits::new(kernel),
        }
    }

    #[inline]
    pub fn kernel(&self) -> &K {
        self.segments.kernel()
    }

    /// Traits of the underlying pieces.
    #[inline]
    pub fn segment_traits(&self) -> &SegmentTraits<K> {
        &self.segments
    }

    /// Polyline through `points`, given in traversal order.
    pub fn construct_polyline(&self, points: Vec<Point<K::Ft>>) -> Result<DirectedPolyline<K::Ft>> {
        let k = self.kernel();
        let n = points.len();
        if n < 2 {
            return Err(TraitsError::DegenerateCurve);
        }
        for p in &points {
            k.check_point(p)?;
        }
        let towards_right = match k.compare_xy(&points[0], &points[n - 1]) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => return Err(TraitsError::DegenerateCurve),
        };
        let mut pts = points;
        if !towards_right {
            pts.reverse();
        }
        let vertical = k.compare_x(&pts[0], &pts[n - 1]) == Ordering::Equal;
        for i in 1..n {
            let monotone = if vertical {
                k.compare_x(&pts[i], &pts[0]) == Ordering::Equal
                    && k.compare_y(&pts[i - 1], &pts[i]) == Ordering::Less
            } else {
                k.compare_x(&pts[i - 1], &pts[i]) == Ordering::Less
            };
            if !monotone {
                let vertex = if towards_right { i } else { n - 1 - i };
                return Err(TraitsError::NotXMonotone { vertex });
            }
        }
        Ok(DirectedPolyline::from_canonical(
            self.canonicalize(pts)?,
            towards_right,
        ))
    }

    /// Convenience: polyline from `f64` coordinates in traversal order.
    pub fn polyline_from_f64(&self, points: &[(f64, f64)]) -> Result<DirectedPolyline<K::Ft>> {
        let pts = points
            .iter()
            .map(|&(x, y)| self.kernel().point_from_f64(x, y))
            .collect::<Result<Vec<_>>>()?;
        self.construct_polyline(pts)
    }

    /// Single-piece polyline with the segment's geometry and direction.
    pub fn from_segment(&self, s: &DirectedSegment<K::Ft>) -> DirectedPolyline<K::Ft> {
        DirectedPolyline::from_canonical(
            vec![s.left().clone(), s.right().clone()],
            s.is_directed_right(),
        )
    }

    /// Drop interior vertices that are collinear with their neighbours.
    /// Pre: `pts` is left to right and x-monotone.
    pub(crate) fn canonicalize(&self, pts: Vec<Point<K::Ft>>) -> Result<Vec<Point<K::Ft>>> {
        let k = self.kernel();
        let n = pts.len();
        let mut out: Vec<Point<K::Ft>> = Vec::with_capacity(n);
        out.push(pts[0].clone());
        for i in 1..n - 1 {
            let prev = &out[out.len() - 1];
            if !k.orientation(prev, &pts[i], &pts[i + 1])?.is_collinear() {
                out.push(pts[i].clone());
            }
        }
        out.push(pts[n - 1].clone());
        Ok(out)
    }

    /// Index of the first vertex not lexicographically smaller than `p`.
    #[inline]
    pub(crate) fn locate(&self, c: &DirectedPolyline<K::Ft>, p: &Point<K::Ft>) -> usize {
        let k = self.kernel();
        c.points()
            .partition_point(|q| k.compare_xy(q, p) == Ordering::Less)
    }
}

impl<K: Kernel> XMonotoneTraits for PolylineTraits<K> {
    type Point = Point<K::Ft>;
    type XCurve = DirectedPolyline<K::Ft>;

    #[inline]
    fn compare_xy(&self, p: &Self::Point, q: &Self::Point) -> Ordering {
        self.kernel().compare_xy(p, q)
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
        self.kernel().compare_x(c.left(), c.right()) == Ordering::Equal
    }

    fn compare_y_at_x(&self, p: &Self::Point, c: &Self::XCurve) -> Result<Ordering> {
        let k = self.kernel();
        if k.compare_x(p, c.left()) == Ordering::Less
            || k.compare_x(p, c.right()) == Ordering::Greater
        {
            return Err(TraitsError::NotInXRange);
        }
        let first_at_or_after = c
            .points()
            .partition_point(|q| k.compare_x(q, p) == Ordering::Less);
        let piece = first_at_or_after.saturating_sub(1).min(c.num_pieces() - 1);
        self.segments.compare_y_at_x(p, &c.piece(piece))
    }

    #[inline]
    fn equal(&self, a: &Self::XCurve, b: &Self::XCurve) -> bool {
        a.points() == b.points()
    }
}

impl<K: Kernel> DirectionalTraits for PolylineTraits<K> {
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
        let events = intersect::intersect_polylines(self, a, b)?;
        Ok(Intersections::from_sorted(events))
    }

    fn split(&self, c: &Self::XCurve, p: &Self::Point) -> Result<(Self::XCurve, Self::XCurve)> {
        let k = self.kernel();
        k.check_point(p)?;
        let pts = c.points();
        let n = pts.len();
        let idx = self.locate(c, p);
        if idx == 0 || idx == n || (idx == n - 1 && &pts[idx] == p) {
            return Err(TraitsError::InvalidSplitPoint {
                reason: "point is not strictly interior",
            });
        }
        let (lower, upper) = if &pts[idx] == p {
            (pts[..=idx].to_vec(), pts[idx..].to_vec())
        } else {
            if !k.orientation(&pts[idx - 1], &pts[idx], p)?.is_collinear() {
                return Err(TraitsError::InvalidSplitPoint {
                    reason: "point is not on the curve",
                });
            }
            let mut lower = pts[..idx].to_vec();
            lower.push(p.clone());
            let mut upper = Vec::with_capacity(n - idx + 1);
            upper.push(p.clone());
            upper.extend_from_slice(&pts[idx..]);
            (lower, upper)
        };
        let dir = c.is_directed_right();
        let lower = DirectedPolyline::from_canonical(lower, dir);
        let upper = DirectedPolyline::from_canonical(upper, dir);
        Ok(if dir { (lower, upper) } else { (upper, lower) })
    }

    fn are_mergeable(&self, a: &Self::XCurve, b: &Self::XCurve) -> bool {
        if a.is_directed_right() != b.is_directed_right() {
            return false;
        }
        let a_then_b = a.target() == b.source();
        let b_then_a = b.target() == a.source();
        a_then_b != b_then_a && self.is_vertical(a) == self.is_vertical(b)
    }

    fn merge(&self, a: &Self::XCurve, b: &Self::XCurve) -> Result<Self::XCurve> {
        if !self.are_mergeable(a, b) {
            return Err(TraitsError::MergePreconditionFailed);
        }
        let (lower, upper) = if a.right() == b.left() { (a, b) } else { (b, a) };
        let junction = lower.points().len() - 1;
        let mut pts = lower.points().to_vec();
        pts.extend_from_slice(&upper.points()[1..]);
        if self
            .kernel()
            .orientation(&pts[junction - 1], &pts[junction], &pts[junction + 1])?
            .is_collinear()
        {
            pts.remove(junction);
        }
        Ok(DirectedPolyline::from_canonical(pts, a.is_directed_right()))
    }
}
