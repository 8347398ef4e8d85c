// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

const DEFAULT_MULTIPLIER_PREFIX: &str = "output/karatsuba_multiplier_";
const DEFAULT_TESTBENCH_PREFIX: &str = "output/tb_karatsuba_multiplier_";

/// Generate a Verilog Karatsuba multiplier or its testbench
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Operand width in bits
    #[arg(allow_negative_numbers = true)]
    width: i64,

    /// Output file (defaults to output/karatsuba_multiplier_<WIDTH>.v, or
    /// output/tb_karatsuba_multiplier_<WIDTH>.v with --test)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Generate the self-checking testbench instead of the multiplier
    #[arg(short, long)]
    test: bool,
}

/// Accepts the single-dash `-output` and `-test` spellings as aliases of the
/// long options.
fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| match arg.as_str() {
            "-output" => "--output".to_string(),
            "-test" => "--test".to_string(),
            _ => arg,
        })
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse_from(normalize_args(std::env::args()));

    if cli.width <= 0 {
        bail!("width must be greater than 0, got {}", cli.width);
    }

    let (text, default_prefix) = if cli.test {
        (
            karatsuba_gen::generate_testbench(cli.width)?,
            DEFAULT_TESTBENCH_PREFIX,
        )
    } else {
        (
            karatsuba_gen::generate_multiplier_module(cli.width)?,
            DEFAULT_MULTIPLIER_PREFIX,
        )
    };

    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{default_prefix}{}.v", cli.width)));
    write_output(&output, &text)?;

    info!("wrote {} bytes to {}", text.len(), output.display());
    println!("Generated {}", output.display());
    Ok(())
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_flags_are_normalized() {
        let args = ["karatsuba-gen", "-output", "out.v", "-test", "5"]
            .into_iter()
            .map(String::from);
        let cli = Cli::parse_from(normalize_args(args));
        assert_eq!(cli.width, 5);
        assert_eq!(cli.output, Some(PathBuf::from("out.v")));
        assert!(cli.test);
    }

    #[test]
    fn negative_widths_parse() {
        let cli = Cli::parse_from(["karatsuba-gen", "-3"]);
        assert_eq!(cli.width, -3);
        assert!(!cli.test);
    }
}
