use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dexsort_catalog::{Catalog, CatalogBuilder};
use dexsort_detect::{Detector, ProjectSource};
use dexsort_planner::{plan_run, write_manifest, ManifestFormat, PathIndex, RunStats};
use dexsort_scan::{seed_destinations, ProjectScanner, ScanStats};
use serde::Serialize;

mod config;

pub use config::{Config, DEFAULT_CONFIG_FILE};

use config::require;

const DEFAULT_MANIFEST: &str = "dexsort-manifest.csv";

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    print_stdout(&serde_json::to_string_pretty(value)?)
}

#[derive(Parser)]
#[command(name = "dexsort")]
#[command(about = "Classify project folders by species and plan collision-free destinations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to ./dexsort.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the species catalog and report its size
    Catalog(CatalogArgs),

    /// Detect labels for ad-hoc project names
    Detect(DetectArgs),

    /// Classify every project under the input root and write a placement manifest
    Plan(PlanArgs),
}

#[derive(Args, Clone)]
struct VocabularyArgs {
    /// Species corpus (whitespace-separated names)
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Alias table (alternate \t canonical)
    #[arg(long)]
    aliases: Option<PathBuf>,
}

#[derive(Args)]
struct CatalogArgs {
    #[command(flatten)]
    vocabulary: VocabularyArgs,

    /// Include every entry in the output
    #[arg(long)]
    dump: bool,
}

#[derive(Args)]
struct DetectArgs {
    #[command(flatten)]
    vocabulary: VocabularyArgs,

    /// Project names to classify
    #[arg(required = true)]
    names: Vec<String>,
}

#[derive(Args)]
struct PlanArgs {
    #[command(flatten)]
    vocabulary: VocabularyArgs,

    /// Folder whose child directories are the projects
    #[arg(long)]
    input: Option<PathBuf>,

    /// Library root used to seed existing destinations
    #[arg(long)]
    output: Option<PathBuf>,

    /// Context prefix for folder names, e.g. "January 2026"
    #[arg(long)]
    month: Option<String>,

    /// Manifest path (defaults to dexsort-manifest.csv)
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Manifest format (defaults to the manifest extension)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

impl From<FormatArg> for ManifestFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => ManifestFormat::Csv,
            FormatArg::Json => ManifestFormat::Json,
        }
    }
}

#[derive(Serialize)]
struct CatalogOutput<'a> {
    entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    catalog: Option<&'a Catalog>,
}

#[derive(Serialize)]
struct DetectOutput {
    name: String,
    primary: String,
    secondaries: Vec<String>,
    origin: dexsort_detect::DetectionOrigin,
}

#[derive(Serialize)]
struct PlanOutput {
    manifest: PathBuf,
    scan: ScanStats,
    stats: RunStats,
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = Config::discover(cli.config.as_deref())?;

    match cli.command {
        Commands::Catalog(args) => run_catalog(args, &config),
        Commands::Detect(args) => run_detect(args, &config),
        Commands::Plan(args) => run_plan(args, &config),
    }
}

fn build_catalog(args: &VocabularyArgs, config: &Config) -> Result<Catalog> {
    let corpus = require(args.corpus.clone(), &config.corpus, "corpus")?;
    let aliases = args.aliases.clone().or_else(|| config.aliases.clone());

    CatalogBuilder::default()
        .build_from_files(&corpus, aliases.as_deref())
        .with_context(|| format!("Failed to build catalog from {}", corpus.display()))
}

fn run_catalog(args: CatalogArgs, config: &Config) -> Result<()> {
    let catalog = build_catalog(&args.vocabulary, config)?;
    print_json(&CatalogOutput {
        entries: catalog.len(),
        catalog: args.dump.then_some(&catalog),
    })
}

fn run_detect(args: DetectArgs, config: &Config) -> Result<()> {
    let catalog = build_catalog(&args.vocabulary, config)?;
    let overrides = config.override_table();
    let detector = Detector::new(&catalog, &overrides);

    let sources: Vec<ProjectSource> = args
        .names
        .iter()
        .map(|name| ProjectSource::from_name(name))
        .collect();
    let outputs: Vec<DetectOutput> = sources
        .iter()
        .zip(detector.detect_all(&sources))
        .map(|(source, detection)| DetectOutput {
            name: source.raw_name.clone(),
            primary: detection.primary().to_string(),
            secondaries: detection.secondaries().to_vec(),
            origin: detection.origin,
        })
        .collect();
    print_json(&outputs)
}

fn run_plan(args: PlanArgs, config: &Config) -> Result<()> {
    let input = require(args.input.clone(), &config.input, "input")?;
    let month = require(args.month.clone(), &config.month, "month")?;
    let output = args.output.clone().or_else(|| config.output.clone());
    let manifest = args
        .manifest
        .clone()
        .or_else(|| config.manifest.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST));
    let format = args
        .format
        .map(ManifestFormat::from)
        .unwrap_or_else(|| ManifestFormat::from_path(&manifest));

    let catalog = build_catalog(&args.vocabulary, config)?;
    let overrides = config.override_table();
    let detector = Detector::new(&catalog, &overrides);

    let (sources, scan) = ProjectScanner::new(&input)
        .with_extensions(config.extensions())
        .scan()
        .with_context(|| format!("Failed to scan input {}", input.display()))?;

    let existing = match &output {
        Some(root) => seed_destinations(root)
            .with_context(|| format!("Failed to read output tree {}", root.display()))?,
        None => {
            log::warn!("No output root given; planning against an empty library");
            Vec::new()
        }
    };
    let mut index = PathIndex::seeded(existing);

    let plan = plan_run(&detector, sources, &month, &mut index)
        .context("Planning aborted; nothing was written")?;

    write_manifest(&manifest, &plan.manifest_rows(), format)
        .with_context(|| format!("Failed to write manifest {}", manifest.display()))?;

    print_json(&PlanOutput {
        manifest,
        scan,
        stats: plan.stats,
    })
}
