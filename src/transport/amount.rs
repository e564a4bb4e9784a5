//!
//! AmountLike trait for generics of costs and shipped quantities
//!
//! i64 and f64 implements AmountLike
//!

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

///
/// generic Amount
///
/// A single type is used for unit costs, supplies, demands, shipped quantities
/// and potentials, because potentials are differences of costs and the total
/// cost is a product of a quantity and a cost.
///
pub trait AmountLike:
    Copy
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + Sum
    + Default
    + std::fmt::Debug
    + std::fmt::Display
{
    /// zero value = 0
    fn zero() -> Self;
    /// similary equal
    fn sim_eq(self, rhs: Self) -> bool;
    /// difference allowed to be regarded as a same value
    fn eps() -> Self;
    /// strictly below zero, beyond the tolerance
    fn is_below_zero(self) -> bool {
        self < Self::zero() - Self::eps()
    }
    /// strictly above zero, beyond the tolerance
    fn is_above_zero(self) -> bool {
        self > Self::eps()
    }
    /// smaller of the two values, `self` on ties
    fn min_of(self, rhs: Self) -> Self {
        if rhs < self {
            rhs
        } else {
            self
        }
    }
}

impl AmountLike for i64 {
    fn zero() -> i64 {
        0
    }
    fn sim_eq(self, rhs: Self) -> bool {
        // integer type does not need to consider the floating error
        self == rhs
    }
    fn eps() -> Self {
        0
    }
}

impl AmountLike for f64 {
    fn zero() -> Self {
        0.0
    }
    fn sim_eq(self, rhs: Self) -> bool {
        (self - rhs).abs() <= Self::eps()
    }
    fn eps() -> Self {
        0.000000001
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_amount() {
        assert!((-1i64).is_below_zero());
        assert!(!0i64.is_below_zero());
        assert!(1i64.is_above_zero());
        assert!(!0i64.is_above_zero());
        assert_eq!(3i64.min_of(2), 2);
        assert!(5i64.sim_eq(5));
        assert!(!5i64.sim_eq(6));
    }

    #[test]
    fn float_amount_uses_tolerance() {
        let tiny: f64 = 0.0000000001;
        assert!(!(-tiny).is_below_zero());
        assert!(!tiny.is_above_zero());
        assert!((-0.5f64).is_below_zero());
        assert!(0.5f64.is_above_zero());
        assert!((0.1f64 + 0.2).sim_eq(0.3));
        assert_eq!(1.5f64.min_of(2.5), 1.5);
    }
}
