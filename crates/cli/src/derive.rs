// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{Context, Result};
use crcfold_config::{AppConfig, OutputFormat};
use crcfold_constants::{derive_many, ConstantReport, ConstantSet};
use tracing::info;

pub fn execute(config: &AppConfig) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}

/// Derives every configured generator and renders the result in the configured format.
pub fn render(config: &AppConfig) -> Result<String> {
    let generators = config.generators()?;
    let plan = config.plan();

    info!(
        generators = generators.len(),
        fold_widths = ?plan.fold_widths,
        natural_widths = ?plan.natural_widths,
        "deriving constants"
    );

    let sets = derive_many(&generators, &plan).context("Could not derive constants")?;

    match config.format() {
        OutputFormat::Text => Ok(render_text(&sets)),
        OutputFormat::Json => render_json(&sets),
    }
}

fn render_text(sets: &[ConstantSet]) -> String {
    if let [set] = sets {
        return set.render();
    }

    sets.iter()
        .map(|set| format!("# {}\n{}", set.generator(), set.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_json(sets: &[ConstantSet]) -> Result<String> {
    let reports: Vec<ConstantReport> = sets.iter().map(ConstantSet::report).collect();
    let mut json = serde_json::to_string_pretty(&reports)?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crcfold_config::{load_config_from, CliOverrides};

    fn config(overrides: CliOverrides) -> Result<AppConfig> {
        let dir = tempfile::tempdir()?;
        load_config_from(dir.path(), None, overrides)
    }

    #[test]
    fn test_single_generator_text() -> Result<()> {
        let config = config(CliOverrides {
            generators: Some(vec!["crc32c".to_string()]),
            fold_widths: Some(vec![128]),
            natural_widths: Some(vec![]),
            format: Some(OutputFormat::Text),
        })?;

        assert_eq!(
            render(&config)?,
            "\
polynomial   = 0x11edc6f41 [0x1edc6f41 | 0x82f63b78]
polynomial_r =   0x5ec76f1 [0x05ec76f1 | 0x8f6e37a0]
barret       = 0x11f91caf6 [0x1f91caf6 | 0x6f5389f8]
barret_r     =  0xdea713f1 [0xdea713f1 | 0x8fc8e57b]
k128_r       =  0x3171d430 [0x3171d430 | 0x0c2b8e8c]
"
        );
        Ok(())
    }

    #[test]
    fn test_several_generators_get_headers() -> Result<()> {
        let config = config(CliOverrides {
            generators: Some(vec!["crc32c".to_string(), "crc32".to_string()]),
            format: Some(OutputFormat::Text),
            ..Default::default()
        })?;

        let text = render(&config)?;
        let headers: Vec<&str> = text.lines().filter(|l| l.starts_with('#')).collect();
        assert_eq!(headers, vec!["# 0x11edc6f41", "# 0x104c11db7"]);
        assert!(text.contains("polynomial_r =  0xdb710641"));
        Ok(())
    }

    #[test]
    fn test_json_is_an_array_of_reports() -> Result<()> {
        let config = config(CliOverrides {
            generators: Some(vec!["crc64-xz".to_string()]),
            format: Some(OutputFormat::Json),
            ..Default::default()
        })?;

        let json: serde_json::Value = serde_json::from_str(&render(&config)?)?;
        assert_eq!(json[0]["width"], 64);
        assert_eq!(json[0]["constants"][1]["name"], "polynomial_r");
        assert_eq!(json[0]["constants"][1]["value"], "0x92d8af2baf0e1e85");
        Ok(())
    }
}
