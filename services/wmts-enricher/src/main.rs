//! WMTS enricher
//!
//! Streams JSON-lines access-log records from a file or stdin and writes
//! them, annotated with tile coordinates, to a file or stdout.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use tile_locator::RecordEnricher;
use wmts_enricher::{build_reprojector, load_config, Pipeline, ReprojectorKind, DEFAULT_BATCH_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// WMTS access-log enricher
#[derive(Parser, Debug)]
#[command(name = "wmts-enricher")]
#[command(about = "Annotate WMTS access-log records with tile coordinates")]
struct Args {
    /// Locator configuration file (YAML); Swiss grid defaults when omitted
    #[arg(short, long, env = "WMTS_ENRICHER_CONFIG")]
    config: Option<PathBuf>,

    /// Input file with one JSON record per line (default: stdin)
    #[arg(short, long, env = "WMTS_ENRICHER_INPUT")]
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, env = "WMTS_ENRICHER_OUTPUT")]
    output: Option<PathBuf>,

    /// Enrich each batch on all cores
    #[arg(long, env = "WMTS_ENRICHER_PARALLEL")]
    parallel: bool,

    /// Lines per batch
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE, env = "WMTS_ENRICHER_BATCH_SIZE")]
    batch_size: usize,

    /// Reprojection backend. `builtin` only covers the area around
    /// Switzerland; use `proj` for GeoTools-compatible output elsewhere
    #[arg(long, value_enum, default_value_t = ReprojectorKind::Builtin, env = "WMTS_ENRICHER_REPROJECTOR")]
    reprojector: ReprojectorKind,

    /// Write run counters as JSON to this file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Validate the configuration and exit
    #[arg(long)]
    check_config: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, env = "WMTS_ENRICHER_LOG_FORMAT")]
    log_format: LogFormat,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    let config = load_config(args.config.as_deref())?;
    info!(
        config = ?args.config,
        levels = config.resolutions.len(),
        output_epsg = %config.output_epsg,
        aliases = config.epsg_mapping.len(),
        "Loaded locator configuration"
    );

    if args.check_config {
        info!("Configuration is valid");
        return Ok(());
    }

    let reprojector = build_reprojector(args.reprojector)?;
    let enricher = RecordEnricher::from_config(&config, reprojector)?;
    let pipeline = Pipeline::new(enricher)
        .with_parallel(args.parallel)
        .with_batch_size(args.batch_size);

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open input: {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    info!(
        reprojector = ?args.reprojector,
        parallel = args.parallel,
        batch_size = args.batch_size,
        "Starting enrichment"
    );

    let stats = pipeline.run(input, output)?;

    info!(
        read = stats.read,
        enriched = stats.enriched,
        invalid_tile = stats.invalid_tile,
        reprojection_failed = stats.reprojection_failed,
        skipped = stats.skipped,
        malformed = stats.malformed,
        "Enrichment complete"
    );

    if let Some(path) = &args.stats {
        let json = serde_json::to_string_pretty(&stats)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write stats: {}", path.display()))?;
    }

    Ok(())
}

/// Logs go to stderr; stdout carries only records.
fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr);

    match args.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
