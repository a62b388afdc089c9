// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # GF(2) Polynomial Library
//!
//! Polynomial arithmetic over the two-element field, designed for deriving the
//! constants used by carry-less-multiply CRC kernels.
//!
//! ## Features
//!
//! - Uses `num-bigint` so a polynomial can span thousands of bits.
//! - Width-aware masking and bit reflection with the width always passed explicitly.
//! - Carry-less multiplication, quotient and remainder with zero-divisor rejection.
//! - Serialization: optional serde support, rendering polynomials as hex strings.
//!
//! ## Representation
//!
//! A polynomial is an unsigned integer whose bit `i` is the coefficient of `x^i`.
//! Addition is XOR, so there is never a carry or a borrow between limbs.
//!
//! ```
//! use crcfold_polynomial::{multiply, Gf2Polynomial};
//!
//! // (x + 1)(x^2 + 1) = x^3 + x^2 + x + 1
//! let product = multiply(&Gf2Polynomial::from(0b11u64), &Gf2Polynomial::from(0b101u64));
//! assert_eq!(product, Gf2Polynomial::from(0b1111u64));
//! ```

pub mod errors;
pub mod polynomial;
pub mod utils;

pub use errors::PolynomialError;
pub use polynomial::Gf2Polynomial;
pub use utils::*;
