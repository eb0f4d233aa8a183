//! Contract checks shared by the family test suites.

use std::cmp::Ordering;

use super::{DirectionalTraits, IntersectionEvent};

type Event<T> =
    IntersectionEvent<<T as super::XMonotoneTraits>::Point, <T as super::XMonotoneTraits>::XCurve>;

/// `construct_opposite` is an involution that flips only the direction.
pub(crate) fn check_involution<T: DirectionalTraits>(t: &T, c: &T::XCurve) {
    let opp = t.construct_opposite(c);
    assert!(t.equal(&opp, c));
    assert_ne!(t.compare_endpoints_xy(&opp), t.compare_endpoints_xy(c));
    assert_eq!(t.source(&opp), t.target(c));
    assert_eq!(&t.construct_opposite(&opp), c);
}

/// `compare_endpoints_xy` is `Less` exactly when the source is the left endpoint.
pub(crate) fn check_direction<T: DirectionalTraits>(t: &T, c: &T::XCurve) {
    let smaller = t.compare_endpoints_xy(c) == Ordering::Less;
    assert_eq!(smaller, t.source(c) == t.min_vertex(c));
    assert_eq!(
        t.compare_xy(t.source(c), t.target(c)),
        t.compare_endpoints_xy(c)
    );
}

/// Split at `p`, check the parts, and merge them back into `c`.
pub(crate) fn check_split_merge<T: DirectionalTraits>(t: &T, c: &T::XCurve, p: &T::Point) {
    let (first, second) = t.split(c, p).expect("split at interior point");
    assert_eq!(t.source(&first), t.source(c));
    assert_eq!(t.target(&first), p);
    assert_eq!(t.source(&second), p);
    assert_eq!(t.target(&second), t.target(c));
    assert_eq!(t.compare_endpoints_xy(&first), t.compare_endpoints_xy(c));
    assert_eq!(t.compare_endpoints_xy(&second), t.compare_endpoints_xy(c));
    assert!(t.are_mergeable(&first, &second));
    assert!(t.are_mergeable(&second, &first));
    assert_eq!(&t.merge(&first, &second).expect("mergeable"), c);
    assert_eq!(&t.merge(&second, &first).expect("mergeable"), c);
}

fn event_key<'e, T: DirectionalTraits>(t: &T, e: &'e Event<T>) -> &'e T::Point {
    match e {
        IntersectionEvent::Point { point, .. } => point,
        IntersectionEvent::Overlap { curve, .. } => t.min_vertex(curve),
    }
}

/// Events are strictly increasing left to right.
pub(crate) fn check_ordered<T: DirectionalTraits>(t: &T, events: &[Event<T>]) {
    for w in events.windows(2) {
        assert_eq!(
            t.compare_xy(event_key(t, &w[0]), event_key(t, &w[1])),
            Ordering::Less,
            "events out of order: {:?}",
            events
        );
    }
}

/// Repeated calls agree, swapping arguments keeps the point events and flips
/// overlap directions consistently.
pub(crate) fn check_symmetric_and_deterministic<T: DirectionalTraits>(
    t: &T,
    a: &T::XCurve,
    b: &T::XCurve,
) {
    let ab = t.intersect(a, b).map(|it| it.collect::<Vec<_>>());
    let ba = t.intersect(b, a).map(|it| it.collect::<Vec<_>>());
    let (ab, ba) = match (ab, ba) {
        (Ok(ab), Ok(ba)) => (ab, ba),
        (Err(e1), Err(e2)) => {
            assert_eq!(e1, e2);
            return;
        }
        (ab, ba) => panic!("asymmetric failure: {ab:?} vs {ba:?}"),
    };
    let again: Vec<_> = t.intersect(a, b).expect("same inputs").collect();
    assert_eq!(ab, again);
    check_ordered(t, &ab);
    check_ordered(t, &ba);
    assert_eq!(ab.len(), ba.len());
    for (x, y) in ab.iter().zip(ba.iter()) {
        match (x, y) {
            (
                IntersectionEvent::Point { point: p, contact: cp },
                IntersectionEvent::Point { point: q, contact: cq },
            ) => {
                assert_eq!(p, q);
                assert_eq!(cp, cq);
            }
            (
                IntersectionEvent::Overlap { curve: c1, codirected: d1 },
                IntersectionEvent::Overlap { curve: c2, codirected: d2 },
            ) => {
                assert!(t.equal(c1, c2));
                assert_eq!(d1, d2);
                assert_eq!(t.compare_endpoints_xy(c1), t.compare_endpoints_xy(a));
                assert_eq!(t.compare_endpoints_xy(c2), t.compare_endpoints_xy(b));
            }
            _ => panic!("event kinds differ: {x:?} vs {y:?}"),
        }
    }
}
