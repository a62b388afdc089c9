// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::helpers::telemetry::setup_simple_tracing;
use crate::{derive, presets};
use anyhow::{Context, Result};
use clap::{command, ArgAction, Parser, Subcommand};
use crcfold_config::{load_config, AppConfig, CliOverrides, OutputFormat};
use std::str::FromStr;
use tracing::{info, instrument, Level};

#[derive(Parser, Debug)]
#[command(name = "crcfold")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_SHA"), ")"))]
#[command(about = "Derive the folding and Barrett reduction constants used by carry-less-multiply CRC kernels", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,

    /// Indicate error levels by adding additional `-v` arguments. Eg. `crcfold -vvv` will give you
    /// trace level output
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true
    )]
    pub verbose: u8,

    /// Silence all output. This argument cannot be used alongside `-v`
    #[arg(
        short,
        long,
        action = ArgAction::SetTrue,
        conflicts_with = "verbose",
        global = true
    )]
    quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else {
            match self.verbose {
                0 => Level::WARN,  //
                1 => Level::INFO,  // -v
                2 => Level::DEBUG, // -vv
                _ => Level::TRACE, // -vvv
            }
        }
    }

    #[instrument(skip_all)]
    pub fn execute(self) -> Result<()> {
        setup_simple_tracing(self.log_level());

        match self.command {
            Commands::Derive {
                generators,
                fold_widths,
                natural_widths,
                format,
            } => {
                let overrides = CliOverrides {
                    generators: non_empty(generators),
                    fold_widths: widths_override(fold_widths),
                    natural_widths: widths_override(natural_widths),
                    format,
                };
                let config = Self::load_config(self.config, overrides)?;
                derive::execute(&config)?
            }
            Commands::Presets => presets::execute()?,
        }

        Ok(())
    }

    fn load_config(config_file: Option<String>, overrides: CliOverrides) -> Result<AppConfig> {
        let config = load_config(config_file, overrides)?;
        info!("Config loaded from: {:?}", config.config_file());
        Ok(config)
    }
}

/// An empty repeated flag leaves the configured value in place.
fn non_empty<T>(values: Vec<T>) -> Option<Vec<T>> {
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

/// A fold width on the command line, or `none` to clear the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthArg {
    None,
    Bits(u64),
}

impl FromStr for WidthArg {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Ok(WidthArg::None);
        }
        let bits = s
            .parse::<u64>()
            .with_context(|| format!("Invalid width '{s}'. Expected a number of bits or 'none'."))?;
        Ok(WidthArg::Bits(bits))
    }
}

/// No flags leaves the configured list alone; `none` yields an empty list.
fn widths_override(values: Vec<WidthArg>) -> Option<Vec<u64>> {
    non_empty(values).map(|values| {
        values
            .into_iter()
            .filter_map(|value| match value {
                WidthArg::None => None,
                WidthArg::Bits(bits) => Some(bits),
            })
            .collect()
    })
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive and print the constant set for every configured generator
    Derive {
        /// Generator polynomial: a preset name (eg. `crc32c`) or a hex literal including the
        /// top term (eg. `0x1_1EDC_6F41`). Repeat to derive several sets in parallel.
        #[arg(
            short,
            long = "generator",
            action = ArgAction::Append,
            value_name = "GENERATOR"
        )]
        generators: Vec<String>,

        /// Fold distance in bits for a reflected `kN_r` row. Replaces the configured list;
        /// `none` clears it.
        #[arg(long = "fold-width", value_delimiter = ',', value_name = "BITS")]
        fold_widths: Vec<WidthArg>,

        /// Fold distance in bits for a natural-order `kN` row. Replaces the configured list;
        /// `--natural none` drops the natural rows.
        #[arg(long = "natural", value_delimiter = ',', value_name = "BITS")]
        natural_widths: Vec<WidthArg>,

        /// Output format: `text` or `json`
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },

    /// List the built-in generator presets
    Presets,
}
