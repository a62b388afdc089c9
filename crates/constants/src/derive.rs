// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

//! The constant derivation pipeline.
//!
//! Given a generator `P` of degree `w`, a derivation produces, in order:
//!
//! | Row | Value |
//! |-----|-------|
//! | `polynomial` | `P` |
//! | `polynomial_r` | `reflect(P >> 1)` |
//! | `barret` | `x^(2w) / P` |
//! | `barret_r` | `reflect(barret >> 1)` |
//! | `kN` | `x^N mod P` (natural widths only) |
//! | `kN_r` | `reflect(x^(N-1) mod P)` |
//!
//! where `reflect` reverses the low `w` bits. Reflected folding multiplies by
//! `x^(N-1)` rather than `x^N` because the carry-less product of two reflected
//! operands comes out shifted by one bit.

use crate::errors::DerivationError;
use crate::generator::GeneratorPolynomial;
use crate::plan::{check_width, DerivationPlan};
use crcfold_polynomial::{bit_reverse, divide, mask, remainder, Gf2Polynomial};
use rayon::prelude::*;
use tracing::{debug, instrument, trace};

/// One named derived constant.
///
/// Depending on whether a CRC kernel is reflected or natural, any of the three
/// views may be the value that is actually embedded in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    name: String,
    value: Gf2Polynomial,
    width: u64,
}

impl Constant {
    pub fn new(name: impl Into<String>, value: Gf2Polynomial, width: u64) -> Self {
        Self {
            name: name.into(),
            value,
            width,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full-precision value.
    pub fn value(&self) -> &Gf2Polynomial {
        &self.value
    }

    /// CRC width the masked and reversed views are taken over.
    pub fn width(&self) -> u64 {
        self.width
    }

    /// Low `width` bits of the value.
    pub fn masked(&self) -> Gf2Polynomial {
        mask(&self.value, self.width)
    }

    /// Low `width` bits of the value, reflected.
    pub fn reversed(&self) -> Gf2Polynomial {
        bit_reverse(&self.value, self.width)
    }
}

/// The ordered constants derived from one generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantSet {
    generator: GeneratorPolynomial,
    constants: Vec<Constant>,
}

impl ConstantSet {
    pub fn generator(&self) -> &GeneratorPolynomial {
        &self.generator
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    /// Looks a constant up by its row name, e.g. `k4096_r`.
    pub fn get(&self, name: &str) -> Option<&Constant> {
        self.constants.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constant> {
        self.constants.iter()
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConstantSet {
    type Item = &'a Constant;
    type IntoIter = std::slice::Iter<'a, Constant>;

    fn into_iter(self) -> Self::IntoIter {
        self.constants.iter()
    }
}

/// `x^N mod P` in natural bit order.
pub fn fold_constant(
    generator: &GeneratorPolynomial,
    n: u64,
) -> Result<Gf2Polynomial, DerivationError> {
    check_width(n)?;
    Ok(remainder(&Gf2Polynomial::monomial(n), generator.polynomial())?)
}

/// `reflect(x^(N-1) mod P)` over the generator's width.
pub fn reflected_fold_constant(
    generator: &GeneratorPolynomial,
    n: u64,
) -> Result<Gf2Polynomial, DerivationError> {
    check_width(n)?;
    let natural = remainder(&Gf2Polynomial::monomial(n - 1), generator.polynomial())?;
    Ok(bit_reverse(&natural, generator.width()))
}

/// Barrett constant `x^(2w) / P` (`x^64 / P` for a 32-bit CRC).
pub fn barrett_constant(
    generator: &GeneratorPolynomial,
) -> Result<Gf2Polynomial, DerivationError> {
    let dividend = Gf2Polynomial::monomial(2 * generator.width());
    Ok(divide(&dividend, generator.polynomial())?)
}

/// Runs the full derivation for one generator.
///
/// # Errors
///
/// Fails if the plan lists a zero or duplicated width. The generator has
/// already been checked non-zero when it was constructed.
#[instrument(skip_all, fields(generator = %generator, width = generator.width()))]
pub fn derive(
    generator: &GeneratorPolynomial,
    plan: &DerivationPlan,
) -> Result<ConstantSet, DerivationError> {
    plan.validate()?;

    let width = generator.width();
    let p = generator.polynomial();
    let mut constants = Vec::with_capacity(4 + plan.fold_widths.len() + plan.natural_widths.len());

    let polynomial_r = bit_reverse(&(p >> 1), width);
    constants.push(Constant::new("polynomial", p.clone(), width));
    constants.push(Constant::new("polynomial_r", polynomial_r, width));

    let barrett = barrett_constant(generator)?;
    let barrett_r = bit_reverse(&(&barrett >> 1), width);
    constants.push(Constant::new("barret", barrett, width));
    constants.push(Constant::new("barret_r", barrett_r, width));

    for (n, natural, reflected) in plan.rows() {
        if natural {
            let k = fold_constant(generator, n)?;
            trace!(n, value = %format!("{k:#x}"), "natural fold constant");
            constants.push(Constant::new(format!("k{n}"), k, width));
        }
        if reflected {
            let k = reflected_fold_constant(generator, n)?;
            trace!(n, value = %format!("{k:#x}"), "reflected fold constant");
            constants.push(Constant::new(format!("k{n}_r"), k, width));
        }
    }

    debug!(rows = constants.len(), "derived constant set");

    Ok(ConstantSet {
        generator: generator.clone(),
        constants,
    })
}

/// Derives constant sets for several generators in parallel.
///
/// Derivations share nothing, so each runs on its own rayon task. Results keep
/// the order of `generators`; the first failure is returned.
pub fn derive_many(
    generators: &[GeneratorPolynomial],
    plan: &DerivationPlan,
) -> Result<Vec<ConstantSet>, DerivationError> {
    plan.validate()?;
    generators
        .par_iter()
        .map(|generator| derive(generator, plan))
        .collect()
}
