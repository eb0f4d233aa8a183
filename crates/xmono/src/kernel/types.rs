//! Kernel value types and configuration.

use std::cmp::Ordering;

/// Planar point over the kernel's coordinate type.
pub type Point<T> = nalgebra::Point2<T>;

/// Side of a point relative to a directed line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Counterclockwise turn (point strictly left of the line).
    LeftTurn,
    /// Clockwise turn (point strictly right of the line).
    RightTurn,
    Collinear,
}

impl Orientation {
    /// Map the sign of a cross product to an orientation.
    #[inline]
    pub fn from_sign(sign: Ordering) -> Self {
        match sign {
            Ordering::Greater => Orientation::LeftTurn,
            Ordering::Less => Orientation::RightTurn,
            Ordering::Equal => Orientation::Collinear,
        }
    }

    #[inline]
    pub fn is_collinear(self) -> bool {
        matches!(self, Orientation::Collinear)
    }
}

/// Filter policy for `FloatKernel`.
#[derive(Clone, Copy, Debug)]
pub struct KernelCfg {
    /// Re-evaluate inconclusive predicates exactly (rational arithmetic).
    /// When off, an inconclusive filter reports `DegenerateInput`; note that
    /// certifying constructed points then fails for almost every crossing.
    pub exact_fallback: bool,
}

impl Default for KernelCfg {
    fn default() -> Self {
        Self {
            exact_fallback: true,
        }
    }
}
