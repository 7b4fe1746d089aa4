mod watch;

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use scriptree::config_file::Config;
use scriptree::manifest::Manifest;
use scriptree::render::render;
use scriptree::theme::StyledLabels;
use scriptree::tree::{Labeler, PlainLabels};
use scriptree::{ResolveOptions, resolve_with};

#[derive(Parser, Debug)]
#[command(
    name = "scriptree",
    version,
    about = "Show the dependency tree between package.json scripts"
)]
struct Cli {
    /// Path to package.json (auto-detected if not specified)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Path to config file (auto-detected if not specified)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sort top-level scripts alphabetically
    #[arg(short, long)]
    alpha: bool,

    /// Hide hooks and namespaced sub-scripts from the top level
    #[arg(short, long)]
    prune: bool,

    /// Print the tree as JSON
    #[arg(long)]
    json: bool,

    /// Never color the output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log file path (log lines are also written to stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    watch: watch::WatchArgs,
}

/// How the tree is printed
struct Output {
    json: bool,
    color: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    scriptree::logger::init(level, log_file)?;

    let manifest_path = match cli.manifest {
        Some(ref path) => path.clone(),
        None => Manifest::find()?,
    };
    let mut options = ResolveOptions::from(Config::load(cli.config.as_deref())?);
    options.alpha |= cli.alpha;
    options.prune |= cli.prune;

    let output = Output {
        json: cli.json,
        color: !cli.no_color && !cli.json && std::io::stdout().is_terminal(),
    };

    print_tree(&manifest_path, &options, &output)?;

    if cli.watch.enabled() {
        watch::run(&manifest_path, output.color, || {
            print_tree(&manifest_path, &options, &output)
        })?;
    }

    Ok(ExitCode::SUCCESS)
}

fn print_tree(
    manifest_path: &Path,
    options: &ResolveOptions,
    output: &Output,
) -> Result<(), Box<dyn std::error::Error>> {
    let manifest = Manifest::from_file(manifest_path)?;
    let labeler: &dyn Labeler = if output.color {
        &StyledLabels
    } else {
        &PlainLabels
    };
    let mut tree = resolve_with(&manifest.scripts, options, labeler)?;
    if let Some(name) = manifest.name {
        tree.label = format!("{} in {name}", tree.label);
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        println!("{}", render(&tree));
    }
    Ok(())
}
