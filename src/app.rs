//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the spreadsheet evaluation
//! - prints results/plots
//! - writes the downloaded workbook

use clap::Parser;

use crate::cli::{BeamArgs, Command, CurveArgs, DownloadArgs};
use crate::domain::RunConfig;
use crate::engine::client::HttpEngine;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `beam` binary.
pub fn run() -> Result<(), AppError> {
    // We want `beam` and `beam -l 80` to behave like `beam tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while keeping the bare invocation convenient.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Results(args) => handle_results(args),
        Command::Curve(args) => handle_curve(args),
        Command::Download(args) => handle_download(args),
        Command::Tui(args) => crate::tui::run(args),
    }
}

fn handle_results(args: BeamArgs) -> Result<(), AppError> {
    let engine = HttpEngine::from_env()?;
    let config = RunConfig::new(args.to_params(), args.template.clone());
    let run = pipeline::run_eval(&engine, &config)?;

    print!("{}", crate::report::format_run_header(&config.params));
    print!("{}", crate::report::format_results(&run.scalars));
    Ok(())
}

fn handle_curve(args: CurveArgs) -> Result<(), AppError> {
    let engine = HttpEngine::from_env()?;
    let config = RunConfig::new(args.beam.to_params(), args.beam.template.clone());
    let run = pipeline::run_eval(&engine, &config)?;

    let series = crate::workbook::read_deflection_series(&run.bundle.workbook, &config.params)?;
    let plot = crate::plot::render_ascii_curve(&series, args.plot_width, args.plot_height);
    println!("{plot}");
    Ok(())
}

fn handle_download(args: DownloadArgs) -> Result<(), AppError> {
    let engine = HttpEngine::from_env()?;
    let config = RunConfig::new(args.beam.to_params(), args.beam.template.clone());
    let run = pipeline::run_eval(&engine, &config)?;

    let path = crate::io::write_workbook(&args.out, &run.bundle.workbook)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Rewrite argv so `beam` defaults to `beam tui`.
///
/// Rules:
/// - `beam`                      -> `beam tui`
/// - `beam -l 80 ...`            -> `beam tui -l 80 ...`
/// - `beam --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "results" | "curve" | "download" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["beam"])), argv(&["beam", "tui"]));
    }

    #[test]
    fn leading_flag_is_routed_to_tui() {
        assert_eq!(
            rewrite_args(argv(&["beam", "-l", "80"])),
            argv(&["beam", "tui", "-l", "80"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(
            rewrite_args(argv(&["beam", "download"])),
            argv(&["beam", "download"])
        );
        assert_eq!(rewrite_args(argv(&["beam", "--help"])), argv(&["beam", "--help"]));
    }
}
