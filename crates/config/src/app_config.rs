// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::load_config::{find_in_parent, resolve_config_path, DEFAULT_CONFIG_NAME};
use anyhow::{bail, Context, Result};
use crcfold_constants::{
    DerivationPlan, GeneratorPolynomial, GeneratorPreset, FOLD_WIDTHS, NATURAL_WIDTHS,
};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

pub const ENV_PREFIX: &str = "CRCFOLD_";

/// How derived constants are printed
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `name = value [masked | reversed]`, one line per constant
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("Unknown output format '{other}'. Expected 'text' or 'json'."),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// The application configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Generator polynomials, each a preset name (eg. "crc32c") or a hex literal
    /// including the top term (eg. "0x1_1EDC_6F41")
    generators: Vec<String>,
    /// Fold distances in bits for the reflected `kN_r` rows
    fold_widths: Vec<u64>,
    /// Fold distances in bits for the natural-order `kN` rows
    natural_widths: Vec<u64>,
    /// Output format
    format: OutputFormat,
    /// The config file the values were read from, if any
    #[serde(skip)]
    config_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generators: vec![GeneratorPreset::default().name().to_ascii_lowercase()],
            fold_widths: FOLD_WIDTHS.to_vec(),
            natural_widths: NATURAL_WIDTHS.to_vec(),
            format: OutputFormat::Text,
            config_file: None,
        }
    }
}

impl AppConfig {
    pub fn generator_names(&self) -> &[String] {
        &self.generators
    }

    /// Parses every configured generator.
    pub fn generators(&self) -> Result<Vec<GeneratorPolynomial>> {
        self.generators
            .iter()
            .map(|g| {
                g.parse::<GeneratorPolynomial>()
                    .with_context(|| format!("Invalid generator '{g}'"))
            })
            .collect()
    }

    pub fn plan(&self) -> DerivationPlan {
        DerivationPlan::new(self.fold_widths.clone(), self.natural_widths.clone())
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Rejects configurations that would fail at derivation time.
    pub fn validate(&self) -> Result<()> {
        if self.generators.is_empty() {
            bail!("At least one generator polynomial must be configured.");
        }
        self.generators()?;
        self.plan()
            .validate()
            .context("Invalid fold width configuration")?;
        Ok(())
    }
}

/// Values supplied on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generators: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold_widths: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_widths: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// Loads configuration from the current directory.
///
/// Layers, lowest precedence first: built-in defaults, the YAML config file,
/// `CRCFOLD_*` environment variables, then `overrides`.
pub fn load_config(config_file: Option<String>, overrides: CliOverrides) -> Result<AppConfig> {
    let cwd = std::env::current_dir()?;
    load_config_from(&cwd, config_file.map(PathBuf::from), overrides)
}

pub fn load_config_from(
    cwd: &Path,
    config_file: Option<PathBuf>,
    overrides: CliOverrides,
) -> Result<AppConfig> {
    let resolved_config_path = resolve_config_path(
        find_in_parent,                   // finding strategy
        cwd.to_path_buf(),                // cwd
        DEFAULT_CONFIG_NAME,              // crcfold.config.yaml
        config_file,                      // explicit --config
    );

    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = &resolved_config_path {
        let loaded_yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read configuration file {}", path.display()))?;
        figment = figment.merge(Yaml::string(&loaded_yaml));
    }

    let mut config: AppConfig = figment
        .merge(Env::prefixed(ENV_PREFIX).only(&[
            "generators",
            "fold_widths",
            "natural_widths",
            "format",
        ]))
        .merge(Serialized::defaults(overrides))
        .extract()
        .context("Could not parse configuration")?;

    config.config_file = resolved_config_path;
    config.validate()?;

    debug!(
        config_file = ?config.config_file,
        generators = ?config.generators,
        "configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_deserialization() -> Result<()> {
        let config_str = r#"
generators:
  - crc32
  - "0x1_1EDC_6F41"
fold_widths: [128, 2048]
natural_widths: [64, 96]
format: json
"#;
        let config: AppConfig = serde_yaml::from_str(config_str)?;
        assert_eq!(config.generator_names(), &["crc32", "0x1_1EDC_6F41"]);
        assert_eq!(config.format(), OutputFormat::Json);
        assert_eq!(
            config.plan(),
            DerivationPlan::new(vec![128, 2048], vec![64, 96])
        );
        assert_eq!(config.generators()?.len(), 2);
        Ok(())
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("polynomial: crc32\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults() {
        Jail::expect_with(|jail| {
            let config = load_config_from(jail.directory(), None, CliOverrides::default())
                .map_err(|e| e.to_string())?;

            assert_eq!(config.generator_names(), &["crc32c"]);
            assert_eq!(config.plan(), DerivationPlan::default());
            assert_eq!(config.format(), OutputFormat::Text);
            assert_eq!(config.config_file(), None);
            Ok(())
        });
    }

    #[test]
    fn test_file_not_found() -> Result<()> {
        let Err(err) = load_config_from(
            Path::new("/"),
            Some(PathBuf::from("/nope/crcfold.config.yaml")),
            CliOverrides::default(),
        ) else {
            bail!("error expected");
        };
        let Some(e) = err.downcast_ref::<std::io::Error>() else {
            bail!("io error expected");
        };

        assert_eq!(e.kind(), std::io::ErrorKind::NotFound);

        Ok(())
    }

    #[test]
    fn test_config_file_env_and_overrides_layer() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_NAME,
                r#"
generators: [crc32]
natural_widths: [64, 96]
"#,
            )?;

            let config = load_config_from(jail.directory(), None, CliOverrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(config.generator_names(), &["crc32"]);
            assert_eq!(config.plan().natural_widths, vec![64, 96]);
            assert_eq!(
                config.config_file(),
                Some(jail.directory().join(DEFAULT_CONFIG_NAME).as_path())
            );

            jail.set_env("CRCFOLD_FORMAT", "json");
            jail.set_env("CRCFOLD_FOLD_WIDTHS", "[128, 160]");
            let config = load_config_from(jail.directory(), None, CliOverrides::default())
                .map_err(|e| e.to_string())?;
            assert_eq!(config.format(), OutputFormat::Json);
            assert_eq!(config.plan().fold_widths, vec![128, 160]);

            let overrides = CliOverrides {
                generators: Some(vec!["crc64-xz".to_string()]),
                format: Some(OutputFormat::Text),
                ..Default::default()
            };
            let config =
                load_config_from(jail.directory(), None, overrides).map_err(|e| e.to_string())?;
            assert_eq!(config.generator_names(), &["crc64-xz"]);
            assert_eq!(config.format(), OutputFormat::Text);
            assert_eq!(config.plan().fold_widths, vec![128, 160]);
            Ok(())
        });
    }

    #[test]
    fn test_zero_generator_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(DEFAULT_CONFIG_NAME, "generators: ['0x0']\n")?;
            let result = load_config_from(jail.directory(), None, CliOverrides::default());
            assert!(result.is_err());
            Ok(())
        });
    }

    #[test]
    fn test_duplicate_width_rejected() {
        let overrides = CliOverrides {
            fold_widths: Some(vec![64, 64]),
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let result = load_config_from(dir.path(), None, overrides);
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("listed more than once"));
    }

    #[test]
    fn test_oversized_width_rejected() {
        Jail::expect_with(|jail| {
            jail.set_env("CRCFOLD_NATURAL_WIDTHS", format!("[{}]", u64::MAX));
            let result = load_config_from(jail.directory(), None, CliOverrides::default());
            let Err(err) = result else {
                return Err("oversized natural width accepted".to_string().into());
            };
            assert!(format!("{err:#}").contains("exceeds the maximum"));

            let overrides = CliOverrides {
                natural_widths: Some(vec![]),
                fold_widths: Some(vec![u64::MAX]),
                ..Default::default()
            };
            assert!(load_config_from(jail.directory(), None, overrides).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
