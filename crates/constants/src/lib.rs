// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! # CRC Folding Constants
//!
//! Derives the constants a carry-less-multiply CRC kernel (PCLMULQDQ, PMULL,
//! VPCLMULQDQ) embeds: the reflected generator, the Barrett reduction constant
//! and the fold constants `kN` for a fixed set of fold distances.
//!
//! ```
//! use crcfold_constants::{derive, DerivationPlan, GeneratorPreset};
//!
//! let set = derive(&GeneratorPreset::Crc32c.generator(), &DerivationPlan::default()).unwrap();
//! let k = set.get("k128_r").unwrap();
//! assert_eq!(k.value().to_u64(), Some(0x3171_d430));
//! ```

pub mod derive;
pub mod errors;
pub mod generator;
pub mod plan;
pub mod presets;
pub mod report;

pub use derive::{
    barrett_constant, derive, derive_many, fold_constant, reflected_fold_constant, Constant,
    ConstantSet,
};
pub use errors::DerivationError;
pub use generator::GeneratorPolynomial;
pub use plan::{DerivationPlan, FOLD_WIDTHS, MAX_FOLD_WIDTH, NATURAL_WIDTHS};
pub use presets::{GeneratorPreset, PresetError, PresetMetadata};
pub use report::{render_row, ConstantReport, ConstantView};
