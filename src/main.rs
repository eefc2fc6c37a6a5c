use anyhow::{Result, bail};
use clap::Parser;
use log::info;

use sheetcut::cli::{CliArgs, Command, IconArgs, InitArgs, RunArgs, SheetArgs, SingleArgs};
use sheetcut::config::{LoadedManifest, Manifest, save_manifest};
use sheetcut::output::write_report;
use sheetcut::pipeline::{
    ProcessOptions, SheetJob, UnitReport, UnitStatus, process_icon, process_sheet,
    process_single, run_manifest,
};

#[allow(clippy::print_stderr)]
fn main() {
    if let Err(e) = run() {
        // Use eprintln instead of error! because logger may not be initialized
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .format_target(false)
        .init();

    info!("Sheetcut v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Run(args) => run_batch(&args),
        Command::Sheet(args) => run_sheet(&args),
        Command::Single(args) => run_single(&args),
        Command::Icon(args) => run_icon(&args),
        Command::Init(args) => run_init(&args),
    }
}

fn run_batch(args: &RunArgs) -> Result<()> {
    let loaded = LoadedManifest::load(&args.manifest)?;
    info!(
        "Loaded {} units from {}",
        loaded.manifest.units.len(),
        args.manifest.display()
    );

    let report = run_manifest(&loaded, args.compress)?;

    if let Some(path) = &args.report {
        write_report(&report, path)?;
        info!("Wrote report to {}", path.display());
    }

    if !report.is_success() {
        bail!("{} of {} units failed", report.failed_count(), report.units.len());
    }

    info!("Done!");
    Ok(())
}

fn run_sheet(args: &SheetArgs) -> Result<()> {
    let job = SheetJob {
        source: args.input.clone(),
        output_dir: args.output.clone(),
        names: args.names.clone(),
        expected_count: args.expected,
        strategy: args.strategy,
        padding: args.padding,
        min_area: args.min_area,
    };
    let options = ProcessOptions {
        compress: args.compress,
        ..ProcessOptions::default()
    };

    finish(process_sheet(&job, &options)?)
}

fn run_single(args: &SingleArgs) -> Result<()> {
    let options = ProcessOptions {
        compress: args.compress,
        ..ProcessOptions::default()
    };

    finish(process_single(&args.input, &args.output, &options)?)
}

fn run_icon(args: &IconArgs) -> Result<()> {
    finish(process_icon(
        &args.input,
        &args.output,
        args.size,
        args.filter,
        args.compress,
    )?)
}

fn run_init(args: &InitArgs) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.path.display()
        );
    }

    save_manifest(&Manifest::template(), &args.path)?;
    info!("Wrote starter manifest to {}", args.path.display());
    Ok(())
}

/// Turn a one-off unit's report into the command's result
fn finish(report: UnitReport) -> Result<()> {
    match report.status {
        UnitStatus::Completed => {
            info!(
                "Done! {} files written, {} warnings",
                report.written.len(),
                report.warnings.len()
            );
            Ok(())
        }
        UnitStatus::SourceMissing => bail!("input not found: {}", report.source.display()),
        UnitStatus::Failed(message) => bail!(message),
    }
}
