// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! Presentation of derived constants.
//!
//! Every row is shown as `name = value [masked | reversed]`. For a 32-bit CRC:
//!
//! ```text
//! polynomial   = 0x11edc6f41 [0x1edc6f41 | 0x82f63b78]
//! polynomial_r =   0x5ec76f1 [0x05ec76f1 | 0x8f6e37a0]
//! ```
//!
//! The value column is right-aligned to `digits + 3` characters, where `digits`
//! is the number of hex digits in the CRC width.

use crate::derive::{Constant, ConstantSet};
use crcfold_polynomial::Gf2Polynomial;
use serde::Serialize;
use std::fmt;

const NAME_COLUMN: usize = 12;

/// Renders one row in the text report format.
pub fn render_row(constant: &Constant) -> String {
    let digits = constant.width().div_ceil(4) as usize;
    let value = format!("{:#x}", constant.value());
    format!(
        "{:<name$} = {:>value_width$} [0x{:0digits$x} | 0x{:0digits$x}]",
        constant.name(),
        value,
        constant.masked(),
        constant.reversed(),
        name = NAME_COLUMN,
        value_width = digits + 3,
        digits = digits,
    )
}

impl fmt::Display for ConstantSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for constant in self {
            writeln!(f, "{}", render_row(constant))?;
        }
        Ok(())
    }
}

/// Serializable view of one constant, with every value as a hex string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantView {
    pub name: String,
    pub value: Gf2Polynomial,
    pub masked: Gf2Polynomial,
    pub reversed: Gf2Polynomial,
}

impl From<&Constant> for ConstantView {
    fn from(constant: &Constant) -> Self {
        Self {
            name: constant.name().to_string(),
            value: constant.value().clone(),
            masked: constant.masked(),
            reversed: constant.reversed(),
        }
    }
}

/// Serializable report for one generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstantReport {
    pub generator: Gf2Polynomial,
    pub width: u64,
    pub constants: Vec<ConstantView>,
}

impl From<&ConstantSet> for ConstantReport {
    fn from(set: &ConstantSet) -> Self {
        Self {
            generator: set.generator().polynomial().clone(),
            width: set.generator().width(),
            constants: set.iter().map(ConstantView::from).collect(),
        }
    }
}

impl ConstantSet {
    /// The text report, one line per constant.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn report(&self) -> ConstantReport {
        ConstantReport::from(self)
    }
}
