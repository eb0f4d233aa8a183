//! Directed segment value type.

use nalgebra::Scalar;

use crate::kernel::Point;

/// Line segment with a direction.
///
/// Invariants:
/// - `left <_xy right` strictly (no zero-length segments).
/// - `towards_right` selects the source: `left` if true, `right` otherwise.
///
/// Equality is structural; a segment is determined by its endpoints, so this
/// is point-set equality plus direction.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DirectedSegment<T: Scalar> {
    left: Point<T>,
    right: Point<T>,
    towards_right: bool,
}

impl<T: Scalar> DirectedSegment<T> {
    /// Pre: `left <_xy right`. Checked by `SegmentTraits::construct_segment`.
    #[inline]
    pub(crate) fn from_ordered(left: Point<T>, right: Point<T>, towards_right: bool) -> Self {
        Self {
            left,
            right,
            towards_right,
        }
    }

    #[inline]
    pub fn left(&self) -> &Point<T> {
        &self.left
    }

    #[inline]
    pub fn right(&self) -> &Point<T> {
        &self.right
    }

    #[inline]
    pub fn source(&self) -> &Point<T> {
        if self.towards_right {
            &self.left
        } else {
            &self.right
        }
    }

    #[inline]
    pub fn target(&self) -> &Point<T> {
        if self.towards_right {
            &self.right
        } else {
            &self.left
        }
    }

    #[inline]
    pub fn is_directed_right(&self) -> bool {
        self.towards_right
    }

    /// Same segment, opposite direction.
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            towards_right: !self.towards_right,
        }
    }

    #[inline]
    pub(crate) fn has_endpoint(&self, p: &Point<T>) -> bool {
        &self.left == p || &self.right == p
    }
}
