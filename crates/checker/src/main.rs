use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use forgecheck::{check_snapshot, inspect, load_snapshot, render_diagnostic, CheckerConfig, Status};
use forgecheck_rules::ProfileName;
use tracing::Level;

/// Forgecheck - Validate Forge mod annotations in a program snapshot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Program snapshot to check (JSON format)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// Configuration file. Defaults to forgecheck.toml next to the snapshot
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Framework release the program is built against (forge-1.7, forge-1.8)
    #[arg(short, long)]
    profile: Option<ProfileName>,

    /// Package root of a repackaged framework
    #[arg(long)]
    package: Option<String>,

    /// Fail on warnings as well as errors
    #[arg(long)]
    deny_warnings: bool,

    /// Disable colored reports
    #[arg(long)]
    no_color: bool,

    /// List tagged declarations instead of checking them
    #[arg(long)]
    inspect: bool,

    /// Enable verbose logging (-vv for debug output)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    /// The configuration file, with command-line flags applied on top.
    fn config(&self, snapshot_dir: &Path) -> Result<CheckerConfig> {
        let mut config = match &self.config {
            Some(path) => CheckerConfig::from_path(path)
                .with_context(|| format!("Error reading config '{}'", path.display()))?,
            None => CheckerConfig::discover(snapshot_dir)?,
        };
        if let Some(profile) = self.profile {
            config.framework.profile = profile;
            config.framework.package = None;
        }
        if let Some(package) = &self.package {
            config.framework.package = Some(package.clone());
        }
        config.report.deny_warnings |= self.deny_warnings;
        config.report.color &= !self.no_color;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {e:?}");
            Status::Fault.into()
        }
    }
}

fn run(args: &Args) -> Result<Status> {
    let snapshot_dir = args.input.parent().unwrap_or_else(|| Path::new("."));
    let config = args.config(snapshot_dir)?;
    let profile = config.profile();
    tracing::info!(package = profile.package(), "using framework profile");

    if args.inspect {
        let program = load_snapshot(&args.input)?;
        let listed = inspect(&program, &profile).context("Failed to inspect snapshot")?;
        for declaration in &listed {
            println!("{declaration}");
        }
        println!("{} tagged declaration(s)", listed.len());
        return Ok(Status::Clean);
    }

    let outcome = check_snapshot(&args.input, &profile)?;
    for diagnostic in &outcome.diagnostics {
        println!(
            "{}",
            render_diagnostic(&outcome.program, diagnostic, snapshot_dir, config.report.color)
        );
    }
    println!("{}", outcome.diagnostics.summary());

    Ok(Status::of(&outcome.diagnostics, config.report.deny_warnings))
}
