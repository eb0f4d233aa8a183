//! Polyline intersection: sweep the pieces of both curves left to right,
//! intersect overlapping piece pairs, then fuse overlaps and classify points.

use std::cmp::Ordering;

use super::{DirectedPolyline, PolylineTraits};
use crate::error::Result;
use crate::kernel::{Kernel, Orientation, Point};
use crate::segment::intersect_segments;
use crate::traits::{Contact, IntersectionEvent, XMonotoneTraits};

type PolylineEvent<T> = IntersectionEvent<Point<T>, DirectedPolyline<T>>;

pub(crate) fn intersect_polylines<K: Kernel>(
    traits: &PolylineTraits<K>,
    a: &DirectedPolyline<K::Ft>,
    b: &DirectedPolyline<K::Ft>,
) -> Result<Vec<PolylineEvent<K::Ft>>> {
    let k = traits.kernel();
    let mut points: Vec<Point<K::Ft>> = Vec::new();
    // Overlap vertex chains; consecutive piece overlaps sharing an end are fused.
    let mut chains: Vec<Vec<Point<K::Ft>>> = Vec::new();

    let (mut i, mut j) = (0, 0);
    while i < a.num_pieces() && j < b.num_pieces() {
        let pa = a.piece(i);
        let pb = b.piece(j);
        for event in intersect_segments(k, &pa, &pb)? {
            match event {
                IntersectionEvent::Point { point, .. } => points.push(point),
                IntersectionEvent::Overlap { curve, .. } => {
                    let lo = curve.left().clone();
                    let hi = curve.right().clone();
                    match chains.last_mut() {
                        Some(chain) if chain.last() == Some(&lo) => chain.push(hi),
                        _ => chains.push(vec![lo, hi]),
                    }
                }
            }
        }
        match k.compare_xy(pa.right(), pb.right()) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }

    // A crossing at a shared vertex is found by several piece pairs.
    points.sort_by(|p, q| k.compare_xy(p, q));
    points.dedup();
    points.retain(|p| {
        !chains.iter().any(|chain| {
            k.compare_xy(p, &chain[0]) != Ordering::Less
                && k.compare_xy(p, &chain[chain.len() - 1]) != Ordering::Greater
        })
    });

    let mut events: Vec<PolylineEvent<K::Ft>> = Vec::with_capacity(points.len() + chains.len());
    for point in points {
        let contact = classify(traits, a, b, &point)?;
        events.push(IntersectionEvent::Point { point, contact });
    }
    let codirected = a.is_directed_right() == b.is_directed_right();
    for chain in chains {
        let curve = DirectedPolyline::from_canonical(traits.canonicalize(chain)?, a.is_directed_right());
        events.push(IntersectionEvent::Overlap { curve, codirected });
    }
    events.sort_by(|x, y| k.compare_xy(event_key(x), event_key(y)));
    Ok(events)
}

fn event_key<T: nalgebra::Scalar>(e: &PolylineEvent<T>) -> &Point<T> {
    match e {
        IntersectionEvent::Point { point, .. } => point,
        IntersectionEvent::Overlap { curve, .. } => curve.left(),
    }
}

/// Vertices just left and right of `p` along `c`.
/// Pre: `p` lies on `c` and is not one of its endpoints.
fn neighbours<'c, K: Kernel>(
    traits: &PolylineTraits<K>,
    c: &'c DirectedPolyline<K::Ft>,
    p: &Point<K::Ft>,
) -> (&'c Point<K::Ft>, &'c Point<K::Ft>) {
    let idx = traits.locate(c, p);
    let pts = c.points();
    if &pts[idx] == p {
        (&pts[idx - 1], &pts[idx + 1])
    } else {
        (&pts[idx - 1], &pts[idx])
    }
}

fn classify<K: Kernel>(
    traits: &PolylineTraits<K>,
    a: &DirectedPolyline<K::Ft>,
    b: &DirectedPolyline<K::Ft>,
    p: &Point<K::Ft>,
) -> Result<Contact> {
    if a.has_endpoint(p) || b.has_endpoint(p) {
        return Ok(Contact::Endpoint);
    }
    if traits.is_vertical(a) || traits.is_vertical(b) {
        return Ok(Contact::Transversal);
    }
    let k = traits.kernel();
    let (la, ra) = neighbours(traits, a, p);
    let (lb, rb) = neighbours(traits, b, p);
    // Left of p, `a` is above `b` iff (lb - p) × (la - p) < 0.
    // Right of p, `a` is above `b` iff (rb - p) × (ra - p) > 0.
    let left = k.orientation(p, lb, la)?;
    let right = k.orientation(p, rb, ra)?;
    let crosses = left == right && left != Orientation::Collinear;
    Ok(if crosses {
        Contact::Transversal
    } else {
        Contact::Tangent
    })
}
