// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::errors::DerivationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Fold distances, in bits, for which a reflected `kN_r` constant is derived.
///
/// 64/96 fold two 32-bit lanes into a 64-bit accumulator, 128/144/160 cover the
/// 128-bit register layouts, and 2048..8224 cover 256/512/1024-byte blocks plus
/// one 32-bit lane.
pub const FOLD_WIDTHS: [u64; 11] = [64, 96, 128, 144, 160, 2048, 2080, 4096, 4128, 8192, 8224];

/// Largest fold distance or generator width accepted, in bits.
pub const MAX_FOLD_WIDTH: u64 = 1 << 20;

/// Widths for which the natural-order `kN = x^N mod P` is also emitted.
pub const NATURAL_WIDTHS: [u64; 1] = [64];

/// Which fold constants a derivation produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationPlan {
    /// Widths `N` yielding `kN_r = reflect(x^(N-1) mod P)`
    pub fold_widths: Vec<u64>,
    /// Widths `N` yielding `kN = x^N mod P` in natural bit order
    pub natural_widths: Vec<u64>,
}

impl Default for DerivationPlan {
    fn default() -> Self {
        Self {
            fold_widths: FOLD_WIDTHS.to_vec(),
            natural_widths: NATURAL_WIDTHS.to_vec(),
        }
    }
}

impl DerivationPlan {
    pub fn new(fold_widths: Vec<u64>, natural_widths: Vec<u64>) -> Self {
        Self {
            fold_widths,
            natural_widths,
        }
    }

    /// Checks every width is in `1..=MAX_FOLD_WIDTH` and listed at most once per kind.
    pub fn validate(&self) -> Result<(), DerivationError> {
        for widths in [&self.fold_widths, &self.natural_widths] {
            let mut seen = BTreeSet::new();
            for &width in widths {
                check_width(width)?;
                if !seen.insert(width) {
                    return Err(DerivationError::DuplicateWidth { width });
                }
            }
        }
        Ok(())
    }

    /// All widths in ascending order, each tagged with which rows it produces
    /// as `(width, natural, reflected)`.
    pub(crate) fn rows(&self) -> Vec<(u64, bool, bool)> {
        let widths: BTreeSet<u64> = self
            .fold_widths
            .iter()
            .chain(self.natural_widths.iter())
            .copied()
            .collect();

        widths
            .into_iter()
            .map(|width| {
                (
                    width,
                    self.natural_widths.contains(&width),
                    self.fold_widths.contains(&width),
                )
            })
            .collect()
    }
}

/// Rejects widths outside `1..=MAX_FOLD_WIDTH` before anything allocates `x^width`.
pub(crate) fn check_width(width: u64) -> Result<(), DerivationError> {
    if width == 0 {
        return Err(DerivationError::InvalidWidth { width });
    }
    if width > MAX_FOLD_WIDTH {
        return Err(DerivationError::WidthTooLarge {
            width,
            max: MAX_FOLD_WIDTH,
        });
    }
    Ok(())
}
