use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pipeline::{QueryResults, ResultShape};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use textvec_ingest::SplitterConfig;
use textvec_store::{BuildReport, BuilderConfig, SimilarityMetric, StubEmbedder};

mod pipeline;

#[derive(Parser)]
#[command(name = "textvec")]
#[command(about = "In-memory semantic search over text files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a file or directory and run a text query against it
    Query(QueryArgs),

    /// Load and split a source without embedding it
    Chunks(ChunksArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// A .txt file or a directory searched recursively for .txt files
    #[arg(long, env = "TEXTVEC_SOURCE")]
    source: PathBuf,

    /// Maximum chunk length in characters
    #[arg(long, env = "TEXTVEC_CHUNK_SIZE", default_value_t = 1000)]
    chunk_size: usize,

    /// Characters shared between consecutive chunks
    #[arg(long, env = "TEXTVEC_CHUNK_OVERLAP", default_value_t = 200)]
    chunk_overlap: usize,
}

impl SourceArgs {
    const fn splitter(&self) -> SplitterConfig {
        SplitterConfig::new(self.chunk_size, self.chunk_overlap)
    }
}

#[derive(Args)]
struct QueryArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Free-text query
    #[arg(long)]
    query: String,

    /// Number of results
    #[arg(short = 'k', long, default_value_t = 3)]
    k: usize,

    /// Similarity metric: cosine|dot|euclidean
    #[arg(long, env = "TEXTVEC_METRIC", default_value = "cosine", value_parser = parse_metric)]
    metric: SimilarityMetric,

    /// Embedding dimension for the offline embedder
    #[arg(long, env = "TEXTVEC_DIMENSION", default_value_t = 384)]
    dimension: usize,

    /// Return matching texts only, without scores
    #[arg(long, conflicts_with = "with_metadata")]
    text_only: bool,

    /// Include stored metadata (source file label) with each hit
    #[arg(long)]
    with_metadata: bool,

    /// File with one label per line, paired in order with the chunks in
    /// place of source file names
    #[arg(long, env = "TEXTVEC_LABELS")]
    labels: Option<PathBuf>,

    /// Fail instead of truncating when chunks and labels differ in length
    #[arg(long)]
    strict_labels: bool,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ChunksArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct QueryOutput {
    query: String,
    metric: String,
    k: usize,
    chunks: usize,
    build: BuildReport,
    results: QueryResults,
}

#[derive(Serialize)]
struct ChunksOutput {
    count: usize,
    chunks: Vec<ChunkEntry>,
}

#[derive(Serialize)]
struct ChunkEntry {
    label: String,
    text: String,
}

fn parse_metric(raw: &str) -> std::result::Result<SimilarityMetric, String> {
    raw.parse().map_err(|err: textvec_store::VectorStoreError| err.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Query(args) => run_query(args).await?,
        Commands::Chunks(args) => run_chunks(&args)?,
    }
    Ok(())
}

async fn run_query(args: QueryArgs) -> Result<()> {
    let mut chunks = pipeline::load_chunks(&args.source.source, args.source.splitter())?;
    if let Some(path) = &args.labels {
        chunks.labels = pipeline::read_labels(path)?;
    }

    let embedder = Arc::new(StubEmbedder::new(args.dimension).context("Invalid --dimension")?);
    let config = if args.strict_labels {
        BuilderConfig::strict()
    } else {
        BuilderConfig::default()
    };
    let (index, build) = pipeline::build_index(&chunks, embedder, config).await?;

    let shape = if args.text_only {
        ResultShape::Texts
    } else if args.with_metadata {
        ResultShape::WithMetadata
    } else {
        ResultShape::Scored
    };
    let results = pipeline::run_query(&index, &args.query, args.k, &args.metric, shape)?;

    let output = QueryOutput {
        query: args.query,
        metric: args.metric.name().to_string(),
        k: args.k,
        chunks: chunks.len(),
        build,
        results,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} result(s) for {:?} over {} chunks ({})",
        output.results.len(),
        output.query,
        output.chunks,
        output.metric
    );
    match &output.results {
        QueryResults::Texts(texts) => {
            for (i, text) in texts.iter().enumerate() {
                println!("{}. {}", i + 1, text);
            }
        }
        QueryResults::Scored(hits) => {
            for (i, hit) in hits.iter().enumerate() {
                println!("{}. (score: {:.3}) {}", i + 1, hit.score, hit.key);
            }
        }
        QueryResults::WithMetadata(hits) => {
            for (i, hit) in hits.iter().enumerate() {
                println!("{}. (score: {:.3}) {}", i + 1, hit.score, hit.key);
                for (key, value) in &hit.metadata {
                    println!("   {key}: {value}");
                }
            }
        }
    }
    Ok(())
}

fn run_chunks(args: &ChunksArgs) -> Result<()> {
    let chunks = pipeline::load_chunks(&args.source.source, args.source.splitter())?;

    if args.json {
        let output = ChunksOutput {
            count: chunks.len(),
            chunks: chunks
                .texts
                .into_iter()
                .zip(chunks.labels)
                .map(|(text, label)| ChunkEntry { label, text })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} chunks", chunks.len());
    for (i, (text, label)) in chunks.texts.iter().zip(&chunks.labels).enumerate() {
        println!("--- {} [{}]", i + 1, label);
        println!("{text}");
    }
    Ok(())
}
