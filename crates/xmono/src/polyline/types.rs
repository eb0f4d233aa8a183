//! Directed polyline value type.

use nalgebra::Scalar;

use crate::kernel::Point;
use crate::segment::DirectedSegment;

/// x-monotone polyline with a direction.
///
/// Invariants:
/// - At least two vertices, stored left to right.
/// - x strictly increasing, or every vertex on one vertical line with y
///   strictly increasing.
/// - No interior vertex is collinear with its neighbours, so two polylines
///   with the same point set have the same vertex list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectedPolyline<T: Scalar> {
    points: Vec<Point<T>>,
    towards_right: bool,
}

impl<T: Scalar> DirectedPolyline<T> {
    /// Pre: `points` satisfies the invariants above.
    #[inline]
    pub(crate) fn from_canonical(points: Vec<Point<T>>, towards_right: bool) -> Self {
        debug_assert!(points.len() >= 2);
        Self {
            points,
            towards_right,
        }
    }

    /// Vertices, left to right.
    #[inline]
    pub fn points(&self) -> &[Point<T>] {
        &self.points
    }

    /// Vertices in traversal order (source first).
    pub fn points_in_direction(&self) -> Vec<Point<T>> {
        let mut pts = self.points.clone();
        if !self.towards_right {
            pts.reverse();
        }
        pts
    }

    #[inline]
    pub fn left(&self) -> &Point<T> {
        &self.points[0]
    }

    #[inline]
    pub fn right(&self) -> &Point<T> {
        &self.points[self.points.len() - 1]
    }

    #[inline]
    pub fn source(&self) -> &Point<T> {
        if self.towards_right {
            self.left()
        } else {
            self.right()
        }
    }

    #[inline]
    pub fn target(&self) -> &Point<T> {
        if self.towards_right {
            self.right()
        } else {
            self.left()
        }
    }

    #[inline]
    pub fn is_directed_right(&self) -> bool {
        self.towards_right
    }

    #[inline]
    pub fn num_pieces(&self) -> usize {
        self.points.len() - 1
    }

    /// Piece `i` (counted from the left), directed left to right.
    #[inline]
    pub fn piece(&self, i: usize) -> DirectedSegment<T> {
        DirectedSegment::from_ordered(self.points[i].clone(), self.points[i + 1].clone(), true)
    }

    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.clone(),
            towards_right: !self.towards_right,
        }
    }

    #[inline]
    pub(crate) fn has_endpoint(&self, p: &Point<T>) -> bool {
        self.left() == p || self.right() == p
    }
}
