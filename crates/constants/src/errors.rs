// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crcfold_polynomial::PolynomialError;
use thiserror::Error;

/// Errors raised while validating inputs to, or running, a constant derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    /// The generator polynomial is zero and cannot act as a modulus
    #[error("generator polynomial must be non-zero")]
    ZeroGenerator,

    /// A fold width of zero has no `x^(N-1)` term
    #[error("fold width must be at least 1, got {width}")]
    InvalidWidth { width: u64 },

    /// `x^N` for a width this large would not fit in memory
    #[error("width {width} exceeds the maximum of {max} bits")]
    WidthTooLarge { width: u64, max: u64 },

    /// The same width was listed twice in one plan
    #[error("fold width {width} is listed more than once")]
    DuplicateWidth { width: u64 },

    /// Text that is neither a preset name nor a hex literal
    #[error("unknown generator '{input}': expected a hex literal or one of {presets}")]
    UnknownGenerator { input: String, presets: String },

    #[error(transparent)]
    Polynomial(#[from] PolynomialError),
}
