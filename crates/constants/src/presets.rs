// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::generator::GeneratorPolynomial;
use crcfold_polynomial::Gf2Polynomial;
use std::str::FromStr;
use thiserror::Error as ThisError;

/// Well-known CRC generator polynomials.
///
/// Each preset stores the full generator including the implicit `x^width` term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GeneratorPreset {
    /// CRC-32C (Castagnoli). iSCSI, SCTP, ext4, Btrfs.
    #[default]
    Crc32c,
    /// CRC-32 (IEEE 802.3). Ethernet, gzip, zip, PNG.
    Crc32,
    /// CRC-32K (Koopman).
    Crc32k,
    /// CRC-32Q. Aviation (AIXM).
    Crc32q,
    /// CRC-64/XZ (ECMA-182). XZ Utils, 7-Zip.
    Crc64Xz,
    /// CRC-64/NVME.
    Crc64Nvme,
}

#[derive(ThisError, Debug)]
pub enum PresetError {
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Static description of a preset.
#[derive(Debug, Clone, Copy)]
pub struct PresetMetadata {
    /// Canonical name (e.g. "CRC32C")
    pub name: &'static str,
    /// CRC width in bits
    pub width: u64,
    /// Generator in normal form, without the `x^width` term
    pub normal: u64,
    /// Generator in reflected form, as found in LSB-first table implementations
    pub reflected: u64,
}

impl GeneratorPreset {
    pub const ALL: [GeneratorPreset; 6] = [
        GeneratorPreset::Crc32c,
        GeneratorPreset::Crc32,
        GeneratorPreset::Crc32k,
        GeneratorPreset::Crc32q,
        GeneratorPreset::Crc64Xz,
        GeneratorPreset::Crc64Nvme,
    ];

    /// Looks a preset up by name.
    ///
    /// Matching ignores case and the `-`, `_`, `/` and space separators, so
    /// `crc32c`, `CRC-32C` and `crc_32c` all resolve to [`GeneratorPreset::Crc32c`].
    pub fn from_name(name: &str) -> Result<Self, PresetError> {
        let normalized: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | '/' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "CRC32C" | "CASTAGNOLI" => Ok(Self::Crc32c),
            "CRC32" | "CRC32IEEE" => Ok(Self::Crc32),
            "CRC32K" | "KOOPMAN" => Ok(Self::Crc32k),
            "CRC32Q" => Ok(Self::Crc32q),
            "CRC64XZ" | "CRC64ECMA182" => Ok(Self::Crc64Xz),
            "CRC64NVME" => Ok(Self::Crc64Nvme),
            _ => Err(PresetError::UnknownPreset(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeneratorPreset::Crc32c => "CRC32C",
            GeneratorPreset::Crc32 => "CRC32",
            GeneratorPreset::Crc32k => "CRC32K",
            GeneratorPreset::Crc32q => "CRC32Q",
            GeneratorPreset::Crc64Xz => "CRC64_XZ",
            GeneratorPreset::Crc64Nvme => "CRC64_NVME",
        }
    }

    pub fn list() -> Vec<&'static str> {
        Self::ALL.iter().map(GeneratorPreset::name).collect()
    }

    pub fn metadata(&self) -> PresetMetadata {
        let (width, normal, reflected) = match self {
            GeneratorPreset::Crc32c => (32, 0x1EDC_6F41, 0x82F6_3B78),
            GeneratorPreset::Crc32 => (32, 0x04C1_1DB7, 0xEDB8_8320),
            GeneratorPreset::Crc32k => (32, 0x741B_8CD7, 0xEB31_D82E),
            GeneratorPreset::Crc32q => (32, 0x8141_41AB, 0xD582_8281),
            GeneratorPreset::Crc64Xz => (64, 0x42F0_E1EB_A9EA_3693, 0xC96C_5795_D787_0F42),
            GeneratorPreset::Crc64Nvme => (64, 0xAD93_D235_94C9_3659, 0x9A6C_9329_AC4B_C9B5),
        };
        PresetMetadata {
            name: self.name(),
            width,
            normal,
            reflected,
        }
    }

    /// The full generator polynomial, `x^width + normal`.
    pub fn generator(&self) -> GeneratorPolynomial {
        let metadata = self.metadata();
        GeneratorPolynomial::with_top_term(&Gf2Polynomial::from(metadata.normal), metadata.width)
    }
}

impl FromStr for GeneratorPreset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
