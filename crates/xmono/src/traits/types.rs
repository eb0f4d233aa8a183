//! Intersection result types shared by all curve families.

use std::iter::FusedIterator;

/// How two curves meet at an isolated intersection point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Contact {
    /// The curves cross: their vertical order flips at the point.
    Transversal,
    /// The curves touch without crossing.
    Tangent,
    /// The point is an endpoint of at least one curve; multiplicity is undefined.
    Endpoint,
}

/// One interior intersection of two curves.
#[derive(Clone, Debug, PartialEq)]
pub enum IntersectionEvent<P, C> {
    /// Isolated intersection point.
    Point { point: P, contact: Contact },
    /// Common sub-curve. `curve` is directed like the first argument of
    /// `intersect`; `codirected` is true iff the second argument runs the same way.
    Overlap { curve: C, codirected: bool },
}

impl<P, C> IntersectionEvent<P, C> {
    #[inline]
    pub fn as_point(&self) -> Option<(&P, Contact)> {
        match self {
            IntersectionEvent::Point { point, contact } => Some((point, *contact)),
            IntersectionEvent::Overlap { .. } => None,
        }
    }

    #[inline]
    pub fn as_overlap(&self) -> Option<&C> {
        match self {
            IntersectionEvent::Overlap { curve, .. } => Some(curve),
            IntersectionEvent::Point { .. } => None,
        }
    }

    #[inline]
    pub fn is_overlap(&self) -> bool {
        matches!(self, IntersectionEvent::Overlap { .. })
    }
}

/// Left-to-right sequence of intersection events.
///
/// Finite and consumed once: the type is an iterator and deliberately not `Clone`.
#[derive(Debug)]
pub struct Intersections<P, C> {
    events: std::vec::IntoIter<IntersectionEvent<P, C>>,
}

impl<P, C> Intersections<P, C> {
    /// No intersections.
    pub fn empty() -> Self {
        Self {
            events: Vec::new().into_iter(),
        }
    }

    /// Wrap events that are already sorted left to right.
    pub(crate) fn from_sorted(events: Vec<IntersectionEvent<P, C>>) -> Self {
        Self {
            events: events.into_iter(),
        }
    }
}

impl<P, C> Iterator for Intersections<P, C> {
    type Item = IntersectionEvent<P, C>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.events.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.events.size_hint()
    }
}

impl<P, C> ExactSizeIterator for Intersections<P, C> {}
impl<P, C> FusedIterator for Intersections<P, C> {}
