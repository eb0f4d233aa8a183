//! Floating-point kernel with certified predicates.
//!
//! The orientation filter is the static bound of Shewchuk's `orient2d` fast
//! path: with unit roundoff `u = 2^-53`, `|det| > (3 + 16u)·u·(|l| + |r|)`
//! certifies the sign of `det = l - r`. Anything below the bound is either
//! re-evaluated over rationals or reported as `DegenerateInput`.

use std::cmp::Ordering;

use malachite::Rational;

use super::exact::{cross, to_rational};
use super::types::{KernelCfg, Orientation, Point};
use super::Kernel;
use crate::error::{Result, TraitsError};

const UNIT_ROUNDOFF: f64 = f64::EPSILON / 2.0;
const CCW_ERRBOUND_A: f64 = (3.0 + 16.0 * UNIT_ROUNDOFF) * UNIT_ROUNDOFF;

/// Kernel over finite `f64` coordinates.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatKernel {
    pub cfg: KernelCfg,
}

impl FloatKernel {
    #[inline]
    pub fn new(cfg: KernelCfg) -> Self {
        Self { cfg }
    }

    fn exact_orientation(
        &self,
        p: &Point<f64>,
        q: &Point<f64>,
        r: &Point<f64>,
    ) -> Result<Orientation> {
        if !self.cfg.exact_fallback {
            return Err(TraitsError::degenerate(
                "orientation filter inconclusive and exact fallback is disabled",
            ));
        }
        tracing::trace!(?p, ?q, ?r, "orientation: exact fallback");
        let det = cross(&rational(p)?, &rational(q)?, &rational(r)?);
        Ok(Orientation::from_sign(det.cmp(&Rational::from(0u32))))
    }
}

#[inline]
fn rational(p: &Point<f64>) -> Result<Point<Rational>> {
    Ok(Point::new(to_rational(p.x)?, to_rational(p.y)?))
}

impl Kernel for FloatKernel {
    type Ft = f64;

    fn point_from_f64(&self, x: f64, y: f64) -> Result<Point<f64>> {
        let p = Point::new(x, y);
        self.check_point(&p)?;
        Ok(p)
    }

    #[inline]
    fn check_point(&self, p: &Point<f64>) -> Result<()> {
        if p.x.is_finite() && p.y.is_finite() {
            Ok(())
        } else {
            Err(TraitsError::degenerate(format!(
                "point ({}, {}) is not finite",
                p.x, p.y
            )))
        }
    }

    #[inline]
    fn compare_x(&self, p: &Point<f64>, q: &Point<f64>) -> Ordering {
        p.x.partial_cmp(&q.x).unwrap_or(Ordering::Equal)
    }

    #[inline]
    fn compare_y(&self, p: &Point<f64>, q: &Point<f64>) -> Ordering {
        p.y.partial_cmp(&q.y).unwrap_or(Ordering::Equal)
    }

    fn orientation(&self, p: &Point<f64>, q: &Point<f64>, r: &Point<f64>) -> Result<Orientation> {
        let det_left = (q.x - p.x) * (r.y - p.y);
        let det_right = (q.y - p.y) * (r.x - p.x);
        let det = det_left - det_right;
        let err_bound = CCW_ERRBOUND_A * (det_left.abs() + det_right.abs());
        if det > err_bound {
            Ok(Orientation::LeftTurn)
        } else if -det > err_bound {
            Ok(Orientation::RightTurn)
        } else {
            self.exact_orientation(p, q, r)
        }
    }

    fn intersect_lines(
        &self,
        p0: &Point<f64>,
        p1: &Point<f64>,
        q0: &Point<f64>,
        q1: &Point<f64>,
    ) -> Result<Point<f64>> {
        let dp = p1 - p0;
        let dq = q1 - q0;
        let denom = dp.perp(&dq);
        if denom == 0.0 || !denom.is_finite() {
            return Err(TraitsError::degenerate(
                "supporting lines are parallel or overflow",
            ));
        }
        let s = (q0 - p0).perp(&dq) / denom;
        let x = p0 + dp * s;
        self.check_point(&x)?;
        // The rounded point must lie exactly on both lines, otherwise splitting
        // at it would not reproduce the inputs.
        let on_p = self.orientation(p0, p1, &x)?.is_collinear();
        let on_q = self.orientation(q0, q1, &x)?.is_collinear();
        if !(on_p && on_q) {
            tracing::debug!(x = x.x, y = x.y, "intersection point not representable in f64");
            return Err(TraitsError::degenerate(
                "intersection point is not representable in f64; retry with ExactKernel",
            ));
        }
        Ok(x)
    }
}
