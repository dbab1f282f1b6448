use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

use reqsmith::core::{
    DependencyAnalyzer, EmitOptions, Emission, ManifestEmitter, ScanConfig, StandardLibrary,
    Verbosity,
};
use reqsmith::formatters::{JsonFormatter, ManifestFormatter, RequirementsFormatter};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "reqsmith",
    version,
    author = "reqsmith developers",
    about = "Generate requirements.txt from the imports a Python project declares"
)]
struct Cli {
    /// Project directory or single Python file to scan
    #[arg(value_name = "PATH", default_value = ".")]
    path: PathBuf,

    /// Only scan the top-level directory
    #[arg(long)]
    shallow: bool,

    /// Overwrite an existing manifest
    #[arg(short, long)]
    force: bool,

    /// Print the manifest instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Existing manifest whose version constraints are kept
    #[arg(short, long, value_name = "FILE")]
    reference: Option<PathBuf>,

    /// Output file [default: <project>/requirements.txt]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Requirements)]
    format: OutputFormat,

    /// Standard-library module list to use instead of the bundled one
    #[arg(long, value_name = "FILE")]
    stdlib: Option<PathBuf>,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Report every classification decision
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Requirements,
    Json,
}

impl OutputFormat {
    fn formatter(self) -> Box<dyn ManifestFormatter> {
        match self {
            OutputFormat::Requirements => Box::new(RequirementsFormatter::new()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reqsmith={}", verbosity.directive())));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        path,
        shallow,
        force,
        dry_run,
        reference,
        output,
        format,
        stdlib,
        ..
    } = cli;

    let start_time = Instant::now();

    let stdlib = match stdlib {
        Some(file) => StandardLibrary::from_file(&file)
            .with_context(|| format!("loading standard-library list {}", file.display()))?,
        None => StandardLibrary::bundled(),
    };

    let mut config = ScanConfig::new(path)
        .with_recursive(!shallow)
        .with_stdlib(stdlib);
    if let Some(reference) = reference {
        config = config.with_reference(reference);
    }

    let formatter = format.formatter();
    let target = match output {
        Some(target) => target,
        None => EmitOptions::in_dir(&config.project_dir())
            .target
            .with_extension(formatter.extension()),
    };
    let emitter = ManifestEmitter::new(
        EmitOptions::new(target)
            .with_overwrite(force)
            .with_dry_run(dry_run),
    );

    let mut analyzer = DependencyAnalyzer::new(config)?;
    let discovery = analyzer.discover()?;
    let manifest = analyzer
        .reconcile(&discovery.dependencies)
        .context("reconciling against the reference manifest")?;

    match emitter.emit(&manifest, formatter.as_ref())? {
        Emission::Previewed(text) => print!("{text}"),
        Emission::Written(target) => println!(
            "Wrote {} dependencies to {} in {:.2}s",
            manifest.len(),
            target.display(),
            start_time.elapsed().as_secs_f64()
        ),
    }

    Ok(())
}
