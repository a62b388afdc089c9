// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Error types for polynomial operations.

use thiserror::Error;

/// Errors that can occur during polynomial operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolynomialError {
    /// Quotient or remainder requested with the zero polynomial as modulus
    #[error("{operation} requested with zero modulus")]
    DivisionByZero { operation: &'static str },

    /// Text that does not describe a polynomial
    #[error("Invalid polynomial literal '{input}': {reason}")]
    Parse { input: String, reason: String },
}
