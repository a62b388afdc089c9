// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Width-aware primitive operations on GF(2) polynomials.
//!
//! Every operation is exact: values are arbitrary-precision and there is no
//! implicit machine-word width anywhere. Where a width matters (masking and
//! reflection) it is a required argument.

use crate::errors::PolynomialError;
use crate::Gf2Polynomial;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Keeps only the low `width` bits of a polynomial.
///
/// Equivalent to `a AND (2^width - 1)`, i.e. dropping every term of degree
/// `width` or higher.
///
/// # Arguments
///
/// * `a` - The polynomial to truncate.
/// * `width` - Number of low bits to retain.
pub fn mask(a: &Gf2Polynomial, width: u64) -> Gf2Polynomial {
    if a.value.bits() <= width {
        return a.clone();
    }
    let ones = (BigUint::one() << width) - 1u32;
    Gf2Polynomial::new(&a.value & &ones)
}

/// Reverses the order of the low `width` bits of a polynomial.
///
/// The input is masked to `width` bits first, then bit `i` moves to bit
/// `width - 1 - i`. This is the "reflected" form used by LSB-first CRCs. It is
/// exact for any width, including widths far beyond a machine word.
///
/// # Arguments
///
/// * `a` - The polynomial to reflect.
/// * `width` - Width of the reflection window in bits.
///
/// # Returns
///
/// The reflected polynomial, which always fits in `width` bits.
pub fn bit_reverse(a: &Gf2Polynomial, width: u64) -> Gf2Polynomial {
    let mut reflected = BigUint::zero();
    for bit in set_bits(&a.value).take_while(|&bit| bit < width) {
        reflected.set_bit(width - 1 - bit, true);
    }
    Gf2Polynomial::new(reflected)
}

/// Carry-less multiplication of two polynomials.
///
/// For every set bit `i` of `a`, `b << i` is XORed into the accumulator. No
/// modular reduction is applied; the product has degree
/// `degree(a) + degree(b)` when both operands are non-zero.
pub fn multiply(a: &Gf2Polynomial, b: &Gf2Polynomial) -> Gf2Polynomial {
    let mut product = BigUint::zero();
    for bit in set_bits(&a.value) {
        product ^= &b.value << bit;
    }
    Gf2Polynomial::new(product)
}

/// GF(2) polynomial quotient of `a` by `b`.
///
/// # Errors
///
/// Returns `PolynomialError::DivisionByZero` if `b` is the zero polynomial.
pub fn divide(a: &Gf2Polynomial, b: &Gf2Polynomial) -> Result<Gf2Polynomial, PolynomialError> {
    let (quotient, _) = long_division(&a.value, &b.value, "divide")?;
    Ok(Gf2Polynomial::new(quotient))
}

/// GF(2) polynomial remainder of `a` by `b`.
///
/// The result always has a lower degree than `b`. This is the operation used
/// with `a = x^N` to compute folding constants, so `a` may be thousands of bits
/// wide.
///
/// # Errors
///
/// Returns `PolynomialError::DivisionByZero` if `b` is the zero polynomial.
pub fn remainder(a: &Gf2Polynomial, b: &Gf2Polynomial) -> Result<Gf2Polynomial, PolynomialError> {
    let (_, remainder) = long_division(&a.value, &b.value, "remainder")?;
    Ok(Gf2Polynomial::new(remainder))
}

/// Quotient and remainder of `a` by `b` in a single pass.
///
/// # Errors
///
/// Returns `PolynomialError::DivisionByZero` if `b` is the zero polynomial.
pub fn div_rem(
    a: &Gf2Polynomial,
    b: &Gf2Polynomial,
) -> Result<(Gf2Polynomial, Gf2Polynomial), PolynomialError> {
    let (quotient, remainder) = long_division(&a.value, &b.value, "division")?;
    Ok((Gf2Polynomial::new(quotient), Gf2Polynomial::new(remainder)))
}

/// Computes `x^n mod p`.
///
/// # Errors
///
/// Returns `PolynomialError::DivisionByZero` if `p` is the zero polynomial.
pub fn x_pow_mod(n: u64, p: &Gf2Polynomial) -> Result<Gf2Polynomial, PolynomialError> {
    remainder(&Gf2Polynomial::monomial(n), p)
}

/// Schoolbook long division over GF(2).
///
/// Aligns the leading term of the divisor with the leading term of the running
/// remainder and XORs it out until the remainder's degree drops below the
/// divisor's. Each step clears the current leading bit, so shifts are strictly
/// decreasing and the quotient bits can be set rather than toggled.
fn long_division(
    dividend: &BigUint,
    divisor: &BigUint,
    operation: &'static str,
) -> Result<(BigUint, BigUint), PolynomialError> {
    if divisor.is_zero() {
        return Err(PolynomialError::DivisionByZero { operation });
    }

    let divisor_bits = divisor.bits();
    let mut quotient = BigUint::zero();
    let mut remainder = dividend.clone();

    while remainder.bits() >= divisor_bits {
        let shift = remainder.bits() - divisor_bits;
        quotient.set_bit(shift, true);
        remainder ^= divisor << shift;
    }

    Ok((quotient, remainder))
}

/// Iterates the indices of the set bits of `value` in ascending order.
pub(crate) fn set_bits(value: &BigUint) -> impl Iterator<Item = u64> + '_ {
    value
        .iter_u64_digits()
        .enumerate()
        .flat_map(|(limb, digit)| {
            let base = limb as u64 * u64::BITS as u64;
            SetBits(digit).map(move |bit| base + bit)
        })
}

struct SetBits(u64);

impl Iterator for SetBits {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let bit = self.0.trailing_zeros() as u64;
        self.0 &= self.0 - 1;
        Some(bit)
    }
}
