//! Segment/segment intersection from four orientation tests.

use std::cmp::Ordering;

use super::types::DirectedSegment;
use crate::error::Result;
use crate::kernel::{Kernel, Orientation, Point};
use crate::traits::{Contact, IntersectionEvent};

pub(crate) type SegmentEvent<T> = IntersectionEvent<Point<T>, DirectedSegment<T>>;

fn max_xy<'p, K: Kernel>(k: &K, p: &'p Point<K::Ft>, q: &'p Point<K::Ft>) -> &'p Point<K::Ft> {
    if k.compare_xy(p, q) == Ordering::Less {
        q
    } else {
        p
    }
}

fn min_xy<'p, K: Kernel>(k: &K, p: &'p Point<K::Ft>, q: &'p Point<K::Ft>) -> &'p Point<K::Ft> {
    if k.compare_xy(p, q) == Ordering::Greater {
        q
    } else {
        p
    }
}

/// At most one event: a point, or the common sub-segment when the supports coincide.
///
/// Constructions are done on a canonical ordering of the pair so that
/// `intersect_segments(a, b)` and `intersect_segments(b, a)` compute the same point.
pub(crate) fn intersect_segments<K: Kernel>(
    k: &K,
    a: &DirectedSegment<K::Ft>,
    b: &DirectedSegment<K::Ft>,
) -> Result<Vec<SegmentEvent<K::Ft>>> {
    let swap = k
        .compare_xy(a.left(), b.left())
        .then_with(|| k.compare_xy(a.right(), b.right()))
        == Ordering::Greater;
    let (s, t) = if swap { (b, a) } else { (a, b) };

    let lo = max_xy(k, s.left(), t.left());
    let hi = min_xy(k, s.right(), t.right());
    let span = k.compare_xy(lo, hi);
    if span == Ordering::Greater {
        return Ok(Vec::new());
    }

    let o1 = k.orientation(s.left(), s.right(), t.left())?;
    let o2 = k.orientation(s.left(), s.right(), t.right())?;
    if o1.is_collinear() && o2.is_collinear() {
        let event = if span == Ordering::Equal {
            IntersectionEvent::Point {
                point: lo.clone(),
                contact: Contact::Endpoint,
            }
        } else {
            IntersectionEvent::Overlap {
                curve: DirectedSegment::from_ordered(
                    lo.clone(),
                    hi.clone(),
                    a.is_directed_right(),
                ),
                codirected: a.is_directed_right() == b.is_directed_right(),
            }
        };
        return Ok(vec![event]);
    }

    let o3 = k.orientation(t.left(), t.right(), s.left())?;
    let o4 = k.orientation(t.left(), t.right(), s.right())?;
    if o1 == o2 || o3 == o4 {
        return Ok(Vec::new());
    }

    let point = match (o1, o2, o3, o4) {
        (Orientation::Collinear, ..) => t.left().clone(),
        (_, Orientation::Collinear, ..) => t.right().clone(),
        (_, _, Orientation::Collinear, _) => s.left().clone(),
        (.., Orientation::Collinear) => s.right().clone(),
        _ => k.intersect_lines(s.left(), s.right(), t.left(), t.right())?,
    };
    let contact = if s.has_endpoint(&point) || t.has_endpoint(&point) {
        Contact::Endpoint
    } else {
        Contact::Transversal
    };
    Ok(vec![IntersectionEvent::Point { point, contact }])
}
