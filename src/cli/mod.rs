//! Command-line parsing for the beam spreadsheet calculator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the evaluation/view code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{BeamParams, DEFAULT_TEMPLATE};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "beam", version, about = "Beam calculator backed by a spreadsheet template")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate the template and print the two scalar results.
    Results(BeamArgs),
    /// Evaluate the template and print the deflection curve.
    Curve(CurveArgs),
    /// Evaluate the template and save the filled workbook.
    Download(DownloadArgs),
    /// Launch the interactive TUI.
    ///
    /// This runs the same evaluation as the other subcommands, but renders
    /// the form, results, and chart in a terminal UI using Ratatui.
    Tui(BeamArgs),
}

/// Beam, material, and load parameters shared by every subcommand.
///
/// Defaults and bounds mirror the template's input definitions.
#[derive(Debug, Parser, Clone)]
pub struct BeamArgs {
    /// Beam length (mm, max 100).
    #[arg(short = 'l', long, default_value_t = 100.0)]
    pub length: f64,

    /// Beam width (mm).
    #[arg(short = 'w', long, default_value_t = 10.0)]
    pub width: f64,

    /// Beam height (mm).
    #[arg(long, default_value_t = 10.0)]
    pub height: f64,

    /// Modulus of elasticity (MPa).
    #[arg(short = 'e', long = "modulus", default_value_t = 200_000.0)]
    pub elastic_modulus: f64,

    /// Starting point of the distributed load (mm).
    #[arg(long = "load-start", default_value_t = 9.0)]
    pub load_start: f64,

    /// Distributed load amplitude at the load start (N/mm).
    #[arg(long = "wa", default_value_t = 5.0)]
    pub load_amplitude_a: f64,

    /// Distributed load amplitude at the beam end (N/mm).
    #[arg(long = "wl", default_value_t = 5.0)]
    pub load_amplitude_l: f64,

    /// Path to the workbook template.
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    pub template: PathBuf,
}

impl BeamArgs {
    pub fn to_params(&self) -> BeamParams {
        BeamParams {
            length: self.length,
            width: self.width,
            height: self.height,
            elastic_modulus: self.elastic_modulus,
            load_start: self.load_start,
            load_amplitude_a: self.load_amplitude_a,
            load_amplitude_l: self.load_amplitude_l,
        }
    }
}

/// Options for the terminal curve plot.
#[derive(Debug, Parser)]
pub struct CurveArgs {
    #[command(flatten)]
    pub beam: BeamArgs,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub plot_width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub plot_height: usize,
}

/// Options for saving the filled workbook.
#[derive(Debug, Parser)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub beam: BeamArgs,

    /// Directory to write `evaluated_beam.xlsx` into.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_template_form() {
        let cli = Cli::parse_from(["beam", "results"]);
        let Command::Results(args) = cli.command else {
            panic!("expected results subcommand");
        };
        let params = args.to_params();
        assert_eq!(params, BeamParams::default());
        assert_eq!(args.template, PathBuf::from("beam_calculation.xlsx"));
    }

    #[test]
    fn load_flags_are_parsed() {
        let cli = Cli::parse_from([
            "beam", "curve", "--load-start", "12", "--wa", "2.5", "--wl", "0.5",
        ]);
        let Command::Curve(args) = cli.command else {
            panic!("expected curve subcommand");
        };
        let params = args.beam.to_params();
        assert_eq!(params.load_start, 12.0);
        assert_eq!(params.load_amplitude_a, 2.5);
        assert_eq!(params.load_amplitude_l, 0.5);
    }

    #[test]
    fn download_has_an_output_directory() {
        let cli = Cli::parse_from(["beam", "download", "--out", "/tmp/out"]);
        let Command::Download(args) = cli.command else {
            panic!("expected download subcommand");
        };
        assert_eq!(args.out, PathBuf::from("/tmp/out"));
    }
}
