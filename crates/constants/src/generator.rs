// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::DerivationError;
use crate::plan::check_width;
use crate::presets::GeneratorPreset;
use crcfold_polynomial::Gf2Polynomial;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A CRC generator polynomial, including its implicit top term.
///
/// A degree-32 CRC is written as a 33-bit value (`0x1_1EDC_6F41` for CRC-32C).
/// The CRC width is the degree of the polynomial, and that one width is used for
/// every mask and reflection in a derivation.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Gf2Polynomial", into = "Gf2Polynomial")]
pub struct GeneratorPolynomial {
    polynomial: Gf2Polynomial,
    width: u64,
}

impl GeneratorPolynomial {
    /// Validates and wraps a generator polynomial.
    ///
    /// # Errors
    ///
    /// Returns `DerivationError::ZeroGenerator` for the zero polynomial,
    /// `InvalidWidth` for the constant `1` and `WidthTooLarge` above
    /// [`MAX_FOLD_WIDTH`](crate::MAX_FOLD_WIDTH).
    pub fn new(polynomial: Gf2Polynomial) -> Result<Self, DerivationError> {
        let width = polynomial.degree().ok_or(DerivationError::ZeroGenerator)?;
        check_width(width)?;
        Ok(Self { polynomial, width })
    }

    /// Builds a generator from its conventional "normal" form, which omits the
    /// `x^width` term (e.g. `0x1EDC_6F41` with width 32).
    ///
    /// # Errors
    ///
    /// Returns `DerivationError::InvalidWidth` when `width` is zero and
    /// `WidthTooLarge` above [`MAX_FOLD_WIDTH`](crate::MAX_FOLD_WIDTH).
    pub fn from_normal(normal: &Gf2Polynomial, width: u64) -> Result<Self, DerivationError> {
        check_width(width)?;
        Ok(Self::with_top_term(normal, width))
    }

    /// `x^width + normal`; the explicit top term makes the result non-zero.
    pub(crate) fn with_top_term(normal: &Gf2Polynomial, width: u64) -> Self {
        Self {
            polynomial: &normal.mask(width) ^ &Gf2Polynomial::monomial(width),
            width,
        }
    }

    pub fn polynomial(&self) -> &Gf2Polynomial {
        &self.polynomial
    }

    /// CRC width in bits (the degree of the generator).
    pub fn width(&self) -> u64 {
        self.width
    }

    /// Number of hex digits needed for a `width`-bit value.
    pub fn hex_digits(&self) -> usize {
        self.width.div_ceil(4) as usize
    }
}

impl TryFrom<Gf2Polynomial> for GeneratorPolynomial {
    type Error = DerivationError;

    fn try_from(value: Gf2Polynomial) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GeneratorPolynomial> for Gf2Polynomial {
    fn from(value: GeneratorPolynomial) -> Self {
        value.polynomial
    }
}

impl From<GeneratorPreset> for GeneratorPolynomial {
    fn from(preset: GeneratorPreset) -> Self {
        preset.generator()
    }
}

/// Accepts a preset name (`crc32c`, `CRC-64/XZ`, ...) or a hex literal
/// (`0x1_1EDC_6F41`).
impl FromStr for GeneratorPolynomial {
    type Err = DerivationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(preset) = GeneratorPreset::from_name(s) {
            return Ok(preset.generator());
        }

        let polynomial: Gf2Polynomial =
            s.parse().map_err(|_| DerivationError::UnknownGenerator {
                input: s.to_string(),
                presets: GeneratorPreset::list().join(", "),
            })?;
        Self::new(polynomial)
    }
}

impl fmt::Display for GeneratorPolynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.polynomial)
    }
}
