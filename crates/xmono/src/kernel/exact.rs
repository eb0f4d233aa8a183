//! Exact rational kernel.

use std::cmp::Ordering;

use malachite::Rational;

use super::types::{Orientation, Point};
use super::Kernel;
use crate::error::{Result, TraitsError};

/// Kernel over `malachite::Rational`: every predicate and construction is exact.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactKernel;

impl ExactKernel {
    /// Point with integer coordinates.
    #[inline]
    pub fn point_from_ints(x: i64, y: i64) -> Point<Rational> {
        Point::new(Rational::from(x), Rational::from(y))
    }
}

/// Cross product `(q - p) × (r - p)`.
pub(crate) fn cross(p: &Point<Rational>, q: &Point<Rational>, r: &Point<Rational>) -> Rational {
    let qx = &q.x - &p.x;
    let qy = &q.y - &p.y;
    let rx = &r.x - &p.x;
    let ry = &r.y - &p.y;
    qx * ry - qy * rx
}

pub(crate) fn to_rational(x: f64) -> Result<Rational> {
    Rational::try_from(x)
        .map_err(|_| TraitsError::degenerate(format!("coordinate {x} is not finite")))
}

impl Kernel for ExactKernel {
    type Ft = Rational;

    fn point_from_f64(&self, x: f64, y: f64) -> Result<Point<Rational>> {
        Ok(Point::new(to_rational(x)?, to_rational(y)?))
    }

    #[inline]
    fn check_point(&self, _p: &Point<Rational>) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn compare_x(&self, p: &Point<Rational>, q: &Point<Rational>) -> Ordering {
        p.x.cmp(&q.x)
    }

    #[inline]
    fn compare_y(&self, p: &Point<Rational>, q: &Point<Rational>) -> Ordering {
        p.y.cmp(&q.y)
    }

    fn orientation(
        &self,
        p: &Point<Rational>,
        q: &Point<Rational>,
        r: &Point<Rational>,
    ) -> Result<Orientation> {
        let det = cross(p, q, r);
        Ok(Orientation::from_sign(det.cmp(&Rational::from(0u32))))
    }

    fn intersect_lines(
        &self,
        p0: &Point<Rational>,
        p1: &Point<Rational>,
        q0: &Point<Rational>,
        q1: &Point<Rational>,
    ) -> Result<Point<Rational>> {
        let dpx = &p1.x - &p0.x;
        let dpy = &p1.y - &p0.y;
        let dqx = &q1.x - &q0.x;
        let dqy = &q1.y - &q0.y;
        let denom = &dpx * &dqy - &dpy * &dqx;
        if denom == Rational::from(0u32) {
            return Err(TraitsError::degenerate("supporting lines are parallel"));
        }
        let wx = &q0.x - &p0.x;
        let wy = &q0.y - &p0.y;
        // p0 + s·(p1 - p0) with s = (w × dq) / (dp × dq)
        let s = (wx * &dqy - wy * &dqx) / denom;
        let x = &p0.x + &s * dpx;
        let y = &p0.y + s * dpy;
        Ok(Point::new(x, y))
    }
}
