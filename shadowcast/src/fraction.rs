//! Exact rational arithmetic for slopes
//!
//! Slopes in the scan are always of the form `n / 1` or
//! `(2·col - 1) / (2·depth)`, so a pair of machine integers is enough to
//! represent them exactly.  Every operation is checked; leaving the `i32` range
//! returns [`Error::Overflow`](crate::Error::Overflow) instead of wrapping.
use crate::Error;
use std::cmp::Ordering;

/// An exact rational number `num / denom`
///
/// The denominator is always positive: [`Fraction::new`] moves a negative sign
/// onto the numerator, and rejects a zero denominator outright.  Fractions are
/// not reduced, so `1/2` and `2/4` are distinct values which nonetheless
/// compare as equal.
#[derive(Copy, Clone, Debug)]
pub struct Fraction {
    num: i32,
    denom: i32,
}

impl Fraction {
    /// Builds a new fraction
    ///
    /// # Panics
    /// Panics if `denom` is zero, or if normalizing the sign of a negative
    /// denominator overflows (i.e. either value is `i32::MIN`).
    #[inline]
    pub fn new(num: i32, denom: i32) -> Self {
        assert!(denom != 0, "fraction {num}/0 has a zero denominator");
        if denom < 0 {
            Self {
                num: -num,
                denom: -denom,
            }
        } else {
            Self { num, denom }
        }
    }

    /// Returns the numerator
    #[inline]
    pub fn num(&self) -> i32 {
        self.num
    }

    /// Returns the (always positive) denominator
    #[inline]
    pub fn denom(&self) -> i32 {
        self.denom
    }

    /// Computes `self + rhs`
    pub fn checked_add(self, rhs: Self) -> Result<Self, Error> {
        let a = mul(self.num, rhs.denom)?;
        let b = mul(rhs.num, self.denom)?;
        let num = a.checked_add(b).ok_or(Error::Overflow("fraction add"))?;
        Ok(Self {
            num,
            denom: mul(self.denom, rhs.denom)?,
        })
    }

    /// Computes `self - rhs`
    pub fn checked_sub(self, rhs: Self) -> Result<Self, Error> {
        let a = mul(self.num, rhs.denom)?;
        let b = mul(rhs.num, self.denom)?;
        let num = a.checked_sub(b).ok_or(Error::Overflow("fraction sub"))?;
        Ok(Self {
            num,
            denom: mul(self.denom, rhs.denom)?,
        })
    }

    /// Computes `self * rhs`
    pub fn checked_mul(self, rhs: Self) -> Result<Self, Error> {
        Ok(Self {
            num: mul(self.num, rhs.num)?,
            denom: mul(self.denom, rhs.denom)?,
        })
    }

    /// Computes `self * rhs` for an integer `rhs`
    pub fn checked_mul_int(self, rhs: i32) -> Result<Self, Error> {
        Ok(Self {
            num: mul(self.num, rhs)?,
            denom: self.denom,
        })
    }

    /// Rounds to the nearest integer, with ties rounding up
    ///
    /// This is `floor(self + 1/2)`.
    pub fn round_ties_up(self) -> Result<i32, Error> {
        let (n, d) = self.doubled_shift(self.denom)?;
        Ok(n.div_euclid(d))
    }

    /// Rounds to the nearest integer, with ties rounding down
    ///
    /// This is `ceil(self - 1/2)`.
    pub fn round_ties_down(self) -> Result<i32, Error> {
        let (n, d) = self.doubled_shift(-self.denom)?;
        let q = n.div_euclid(d);
        // `d >= 2`, so `q` is at most `n / 2` and incrementing can't overflow
        Ok(if n.rem_euclid(d) == 0 { q } else { q + 1 })
    }

    /// Returns `(2·num + offset, 2·denom)`, i.e. `self ± 1/2` over a doubled
    /// denominator
    fn doubled_shift(self, offset: i32) -> Result<(i32, i32), Error> {
        let n = mul(self.num, 2)?
            .checked_add(offset)
            .ok_or(Error::Overflow("fraction rounding"))?;
        Ok((n, mul(self.denom, 2)?))
    }

    /// Compares using the signed cross product `a.num·b.denom` vs
    /// `b.num·a.denom`
    ///
    /// Both denominators are positive, so the cross product preserves order;
    /// it's computed in `i64`, so this can't overflow.
    fn cross_cmp(&self, other: &Self) -> Ordering {
        let a = i64::from(self.num) * i64::from(other.denom);
        let b = i64::from(other.num) * i64::from(self.denom);
        a.cmp(&b)
    }
}

fn mul(a: i32, b: i32) -> Result<i32, Error> {
    a.checked_mul(b).ok_or(Error::Overflow("fraction mul"))
}

impl From<i32> for Fraction {
    fn from(num: i32) -> Self {
        Self { num, denom: 1 }
    }
}

impl PartialEq for Fraction {
    fn eq(&self, other: &Self) -> bool {
        self.cross_cmp(other) == Ordering::Equal
    }
}

impl Eq for Fraction {}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cross_cmp(other)
    }
}

impl std::fmt::Display for Fraction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = Fraction::new(1, 2);
        let b = Fraction::new(1, 3);
        assert_eq!(a.checked_add(b).unwrap(), Fraction::new(5, 6));
        assert_eq!(a.checked_sub(b).unwrap(), Fraction::new(1, 6));
        assert_eq!(b.checked_sub(a).unwrap(), Fraction::new(-1, 6));
        assert_eq!(a.checked_mul(b).unwrap(), Fraction::new(1, 6));
        assert_eq!(a.checked_mul_int(3).unwrap(), Fraction::new(3, 2));
    }

    #[test]
    fn equality_without_reduction() {
        let a = Fraction::new(2, 4);
        assert_eq!(a, Fraction::new(1, 2));
        assert_eq!((a.num(), a.denom()), (2, 4));
        assert_eq!(Fraction::new(0, 5), Fraction::from(0));
    }

    #[test]
    fn negative_denominator_is_normalized() {
        let a = Fraction::new(1, -2);
        assert_eq!((a.num(), a.denom()), (-1, 2));
        assert!(a < Fraction::from(0));
    }

    #[test]
    fn signed_ordering() {
        let lo = Fraction::new(-1, 1);
        let hi = Fraction::new(1, 1);
        assert!(lo < hi);
        assert!(hi >= lo);
        assert!(!(lo >= hi));
        assert!(Fraction::new(-3, 4) < Fraction::new(-1, 2));
        assert!(Fraction::new(-1, 6) > Fraction::new(-1, 4));
        assert!(Fraction::new(i32::MAX, 1) > Fraction::new(i32::MAX - 1, 1));
    }

    #[test]
    fn rounding() {
        for (n, up, down) in [
            (Fraction::from(0), 0, 0),
            (Fraction::from(3), 3, 3),
            (Fraction::from(-3), -3, -3),
            (Fraction::new(1, 3), 0, 0),
            (Fraction::new(2, 3), 1, 1),
            (Fraction::new(-1, 3), 0, 0),
            (Fraction::new(-2, 3), -1, -1),
            (Fraction::new(-3, 4), -1, -1),
            (Fraction::new(5, 4), 1, 1),
        ] {
            assert_eq!(n.round_ties_up().unwrap(), up, "round_ties_up({n})");
            assert_eq!(
                n.round_ties_down().unwrap(),
                down,
                "round_ties_down({n})"
            );
        }
    }

    #[test]
    fn rounding_at_ties() {
        for k in (-21..=21).filter(|k| k % 2 != 0) {
            let n = Fraction::new(k, 2);
            let floor = k.div_euclid(2);
            let ceil = floor + 1;
            assert_eq!(n.round_ties_up().unwrap(), floor + 1, "{n}");
            assert_eq!(n.round_ties_down().unwrap(), ceil - 1, "{n}");
        }
        // Scaling numerator and denominator doesn't change the result
        let n = Fraction::new(-6, 4);
        assert_eq!(n.round_ties_up().unwrap(), -1);
        assert_eq!(n.round_ties_down().unwrap(), -2);
    }

    #[test]
    fn overflow() {
        let big = Fraction::from(i32::MAX);
        assert!(matches!(
            big.checked_add(Fraction::from(1)),
            Err(Error::Overflow(_))
        ));
        assert!(matches!(
            Fraction::from(i32::MIN).checked_sub(Fraction::from(1)),
            Err(Error::Overflow(_))
        ));
        assert!(matches!(big.checked_mul_int(2), Err(Error::Overflow(_))));
        assert!(matches!(
            Fraction::new(1, i32::MAX).checked_mul(Fraction::new(1, 2)),
            Err(Error::Overflow(_))
        ));
        assert!(matches!(big.round_ties_up(), Err(Error::Overflow(_))));
    }

    #[test]
    #[should_panic]
    fn zero_denominator() {
        Fraction::new(1, 0);
    }
}
