// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! GF(2) polynomial type.

use crate::errors::PolynomialError;
use crate::utils;
use num_bigint::BigUint;
use num_traits::{Num, One, ToPrimitive, Zero};
use std::fmt;
use std::ops::{BitXor, Mul, Shl, Shr};
use std::str::FromStr;

/// A polynomial over GF(2).
///
/// Bit `i` of the underlying `BigUint` is the coefficient of `x^i`, so the
/// integer `0b1011` is `x^3 + x + 1`. Values are immutable in practice: every
/// operation returns a fresh polynomial.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Gf2Polynomial {
    pub(crate) value: BigUint,
}

impl Gf2Polynomial {
    /// Wraps an integer whose bits are the polynomial's coefficients.
    pub fn new(value: BigUint) -> Self {
        Self { value }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self {
            value: BigUint::zero(),
        }
    }

    /// The constant polynomial `1`.
    pub fn one() -> Self {
        Self {
            value: BigUint::one(),
        }
    }

    /// The monomial `x^n`, i.e. the integer `1 << n`.
    pub fn monomial(n: u64) -> Self {
        Self {
            value: BigUint::one() << n,
        }
    }

    /// Returns the underlying integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.value
    }

    /// Consumes the polynomial, returning the underlying integer.
    pub fn into_biguint(self) -> BigUint {
        self.value
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Returns the degree (index of the highest set bit).
    ///
    /// The zero polynomial has no degree and yields `None`.
    pub fn degree(&self) -> Option<u64> {
        self.value.bits().checked_sub(1)
    }

    /// Number of bits needed to hold the polynomial (`degree + 1`, or 0 for zero).
    pub fn bits(&self) -> u64 {
        self.value.bits()
    }

    /// Returns the coefficient of `x^i`.
    pub fn coefficient(&self, i: u64) -> bool {
        self.value.bit(i)
    }

    /// Returns the value as a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.value.to_u64()
    }

    /// Returns the value as a `u32` if it fits.
    pub fn to_u32(&self) -> Option<u32> {
        self.value.to_u32()
    }

    /// Keeps the low `width` bits. See [`utils::mask`].
    pub fn mask(&self, width: u64) -> Self {
        utils::mask(self, width)
    }

    /// Reflects the low `width` bits. See [`utils::bit_reverse`].
    pub fn bit_reverse(&self, width: u64) -> Self {
        utils::bit_reverse(self, width)
    }

    /// Carry-less product with `other`.
    pub fn multiply(&self, other: &Self) -> Self {
        utils::multiply(self, other)
    }

    /// Quotient of `self` by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DivisionByZero` if the divisor is zero.
    pub fn divide(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        utils::divide(self, divisor)
    }

    /// Remainder of `self` by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DivisionByZero` if the divisor is zero.
    pub fn remainder(&self, divisor: &Self) -> Result<Self, PolynomialError> {
        utils::remainder(self, divisor)
    }

    /// Quotient and remainder of `self` by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns `PolynomialError::DivisionByZero` if the divisor is zero.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), PolynomialError> {
        utils::div_rem(self, divisor)
    }
}

impl From<u32> for Gf2Polynomial {
    fn from(value: u32) -> Self {
        Self::new(BigUint::from(value))
    }
}

impl From<u64> for Gf2Polynomial {
    fn from(value: u64) -> Self {
        Self::new(BigUint::from(value))
    }
}

impl From<u128> for Gf2Polynomial {
    fn from(value: u128) -> Self {
        Self::new(BigUint::from(value))
    }
}

impl From<BigUint> for Gf2Polynomial {
    fn from(value: BigUint) -> Self {
        Self::new(value)
    }
}

/// Parses a hexadecimal literal such as `0x1_1EDC_6F41`.
///
/// The `0x` prefix is optional and `_` separators are ignored.
impl FromStr for Gf2Polynomial {
    type Err = PolynomialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed)
            .replace('_', "");

        if digits.is_empty() {
            return Err(PolynomialError::Parse {
                input: s.to_string(),
                reason: "no hexadecimal digits".to_string(),
            });
        }

        BigUint::from_str_radix(&digits, 16)
            .map(Self::new)
            .map_err(|e| PolynomialError::Parse {
                input: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl fmt::Display for Gf2Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(degree) = self.degree() else {
            return write!(f, "0");
        };

        let mut first = true;
        for power in (0..=degree).rev().filter(|&power| self.coefficient(power)) {
            if !first {
                write!(f, " + ")?;
            }
            first = false;

            match power {
                0 => write!(f, "1")?,
                1 => write!(f, "x")?,
                _ => write!(f, "x^{power}")?,
            }
        }

        Ok(())
    }
}

impl fmt::LowerHex for Gf2Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for Gf2Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

// GF(2) addition and subtraction are both XOR.
impl BitXor<&Gf2Polynomial> for &Gf2Polynomial {
    type Output = Gf2Polynomial;

    fn bitxor(self, rhs: &Gf2Polynomial) -> Gf2Polynomial {
        Gf2Polynomial::new(&self.value ^ &rhs.value)
    }
}

impl BitXor for Gf2Polynomial {
    type Output = Gf2Polynomial;

    fn bitxor(self, rhs: Gf2Polynomial) -> Gf2Polynomial {
        Gf2Polynomial::new(self.value ^ rhs.value)
    }
}

impl Mul<&Gf2Polynomial> for &Gf2Polynomial {
    type Output = Gf2Polynomial;

    fn mul(self, rhs: &Gf2Polynomial) -> Gf2Polynomial {
        utils::multiply(self, rhs)
    }
}

impl Shl<u64> for &Gf2Polynomial {
    type Output = Gf2Polynomial;

    fn shl(self, rhs: u64) -> Gf2Polynomial {
        Gf2Polynomial::new(&self.value << rhs)
    }
}

impl Shl<u64> for Gf2Polynomial {
    type Output = Gf2Polynomial;

    fn shl(self, rhs: u64) -> Gf2Polynomial {
        Gf2Polynomial::new(self.value << rhs)
    }
}

impl Shr<u64> for &Gf2Polynomial {
    type Output = Gf2Polynomial;

    fn shr(self, rhs: u64) -> Gf2Polynomial {
        Gf2Polynomial::new(&self.value >> rhs)
    }
}

impl Shr<u64> for Gf2Polynomial {
    type Output = Gf2Polynomial;

    fn shr(self, rhs: u64) -> Gf2Polynomial {
        Gf2Polynomial::new(self.value >> rhs)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Gf2Polynomial {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{:#x}", self.value))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Gf2Polynomial {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = <String as serde::Deserialize>::deserialize(deserializer)?;
        literal.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_polynomial() {
        let zero = Gf2Polynomial::zero();
        assert!(zero.is_zero());
        assert_eq!(zero.degree(), None);
        assert_eq!(zero.bits(), 0);
        assert_eq!(zero.to_string(), "0");
    }

    #[test]
    fn test_degree() {
        assert_eq!(Gf2Polynomial::one().degree(), Some(0));
        assert_eq!(Gf2Polynomial::from(0b1000u64).degree(), Some(3));
        assert_eq!(Gf2Polynomial::from(0x1_1EDC_6F41u64).degree(), Some(32));
        assert_eq!(Gf2Polynomial::monomial(8223).degree(), Some(8223));
    }

    #[test]
    fn test_polynomial_display() {
        assert_eq!(Gf2Polynomial::from(0b1011u64).to_string(), "x^3 + x + 1");
        assert_eq!(Gf2Polynomial::from(0b110u64).to_string(), "x^2 + x");
        assert_eq!(
            Gf2Polynomial::from(0x1_04C1_1DB7u64).to_string(),
            "x^32 + x^26 + x^23 + x^22 + x^16 + x^12 + x^11 + x^10 + x^8 + x^7 + x^5 + x^4 + x^2 + x + 1"
        );
    }

    #[test]
    fn test_hex_formatting() {
        let p = Gf2Polynomial::from(0x1_1EDC_6F41u64);
        assert_eq!(format!("{p:x}"), "11edc6f41");
        assert_eq!(format!("{p:#x}"), "0x11edc6f41");
        assert_eq!(format!("{p:X}"), "11EDC6F41");
    }

    #[test]
    fn test_parse() {
        let expected = Gf2Polynomial::from(0x1_1EDC_6F41u64);
        assert_eq!("0x11edc6f41".parse::<Gf2Polynomial>().unwrap(), expected);
        assert_eq!("0x1_1EDC_6F41".parse::<Gf2Polynomial>().unwrap(), expected);
        assert_eq!("11EDC6F41".parse::<Gf2Polynomial>().unwrap(), expected);
        assert_eq!(" 0X11edc6f41 ".parse::<Gf2Polynomial>().unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "0x".parse::<Gf2Polynomial>(),
            Err(PolynomialError::Parse { .. })
        ));
        assert!(matches!(
            "0xZZ".parse::<Gf2Polynomial>(),
            Err(PolynomialError::Parse { .. })
        ));
        assert!("".parse::<Gf2Polynomial>().is_err());
    }

    #[test]
    fn test_shifts() {
        let p = Gf2Polynomial::from(0x1_1EDC_6F41u64);
        assert_eq!(&p >> 1, Gf2Polynomial::from(0x8F6E_37A0u64));
        assert_eq!(&p << 4, Gf2Polynomial::from(0x11_EDC6_F410u64));
        assert_eq!(Gf2Polynomial::one() << 8224, Gf2Polynomial::monomial(8224));
    }

    #[test]
    fn test_xor_is_addition() {
        let a = Gf2Polynomial::from(0b1100u64);
        let b = Gf2Polynomial::from(0b1010u64);
        assert_eq!(&a ^ &b, Gf2Polynomial::from(0b0110u64));
        assert_eq!(a.clone() ^ a, Gf2Polynomial::zero());
    }

    #[test]
    fn test_method_forms_match_free_functions() {
        let p = Gf2Polynomial::from(0x1_1EDC_6F41u64);
        let x64 = Gf2Polynomial::monomial(64);
        assert_eq!(x64.divide(&p).unwrap(), utils::divide(&x64, &p).unwrap());
        assert_eq!(x64.remainder(&p).unwrap(), utils::remainder(&x64, &p).unwrap());
        assert_eq!(&p * &p, utils::multiply(&p, &p));
        assert_eq!(p.mask(32), utils::mask(&p, 32));
        assert_eq!(p.bit_reverse(32), utils::bit_reverse(&p, 32));
    }

    #[test]
    fn test_to_primitive() {
        assert_eq!(Gf2Polynomial::from(0xDEAD_BEEFu32).to_u32(), Some(0xDEAD_BEEF));
        assert_eq!(Gf2Polynomial::from(0x1_1EDC_6F41u64).to_u32(), None);
        assert_eq!(Gf2Polynomial::monomial(64).to_u64(), None);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_serializes_as_hex_string() {
            let p = Gf2Polynomial::from(0x1_1EDC_6F41u64);
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, "\"0x11edc6f41\"");
            let back: Gf2Polynomial = serde_json::from_str(&json).unwrap();
            assert_eq!(back, p);
        }

        #[test]
        fn test_deserialize_rejects_non_hex() {
            assert!(serde_json::from_str::<Gf2Polynomial>("\"0xnope\"").is_err());
        }
    }
}
