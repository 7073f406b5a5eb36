//! faqmatch CLI
//!
//! Answers free-text questions from an FAQ corpus.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use faqmatch_core::config::{Config, Settings};
use faqmatch_core::corpus::EXAMPLE_QUESTIONS;
use faqmatch_core::{Error, MatchResult, Method};
use faqmatch_engine::{build_engine, FaqEngine};

#[derive(Parser)]
#[command(name = "faqmatch")]
#[command(version, about = "Match questions against an FAQ corpus", long_about = None)]
struct Cli {
    /// Path to configuration file [default: ./config.toml]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct MatchArgs {
    /// Strategy: lexical (tfidf) or semantic (spacy)
    #[arg(short, long)]
    method: Option<String>,

    /// Minimum confidence for an answer, in [0, 1]
    #[arg(short, long)]
    threshold: Option<f32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question
    Ask {
        query: String,
        #[command(flatten)]
        args: MatchArgs,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Answer one question per line of a file, printing JSON lines
    Batch {
        file: PathBuf,
        #[command(flatten)]
        args: MatchArgs,
    },
    /// Print corpus and vocabulary statistics
    Stats,
    /// Run the built-in example questions
    Examples {
        #[command(flatten)]
        args: MatchArgs,
    },
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("faqmatch=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("faqmatch=info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

struct Resolved {
    method: Method,
    threshold: f32,
}

fn resolve(args: &MatchArgs, settings: &Settings) -> Result<Resolved> {
    let method = match &args.method {
        Some(tag) => tag.parse()?,
        None => settings.matcher.method,
    };
    Ok(Resolved { method, threshold: args.threshold.unwrap_or(settings.matcher.threshold) })
}

fn engine_for(settings: &Settings, method: Method) -> Result<FaqEngine> {
    build_engine(settings, method == Method::Semantic)
}

fn print_result(query: &str, result: &MatchResult) {
    println!("❓ {}", query);
    match &result.matched_question {
        Some(question) => println!("   matched: {} (confidence {:.3}, {})", question, result.confidence, result.method),
        None => println!("   no match above threshold (confidence {:.3}, {})", result.confidence, result.method),
    }
    println!("💬 {}", result.answer);
}

fn run_batch(engine: &FaqEngine, file: &Path, resolved: &Resolved) -> Result<()> {
    let content = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let queries: Vec<&str> = content.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
    let pb = ProgressBar::new(queries.len() as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")?);
    let mut lines = Vec::with_capacity(queries.len());
    for query in &queries {
        let result = engine.answer(query, resolved.method, resolved.threshold)?;
        lines.push(serde_json::to_string(&serde_json::json!({ "query": query, "result": result }))?);
        pb.inc(1);
    }
    pb.finish_and_clear();
    for line in lines {
        println!("{}", line);
    }
    tracing::info!(queries = queries.len(), "batch complete");
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;

    match cli.command {
        Commands::Ask { query, args, json } => {
            if query.trim().is_empty() {
                return Err(Error::EmptyQuery.into());
            }
            let resolved = resolve(&args, &settings)?;
            let engine = engine_for(&settings, resolved.method)?;
            let result = engine.answer(&query, resolved.method, resolved.threshold)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&query, &result);
            }
        }
        Commands::Batch { file, args } => {
            let resolved = resolve(&args, &settings)?;
            let engine = engine_for(&settings, resolved.method)?;
            run_batch(&engine, &file, &resolved)?;
        }
        Commands::Stats => {
            let engine = engine_for(&settings, Method::Lexical)?;
            let stats = engine.index().stats();
            println!("📊 FAQ corpus");
            println!("   entries: {}", stats.entries);
            println!("   vocabulary: {} terms", stats.vocabulary);
            println!("   questions without informative tokens: {}", stats.empty_questions);
            println!("   default method: {}  threshold: {}", engine.default_method(), engine.default_threshold());
        }
        Commands::Examples { args } => {
            let resolved = resolve(&args, &settings)?;
            let engine = engine_for(&settings, resolved.method)?;
            for query in EXAMPLE_QUESTIONS {
                let result = engine.answer(query, resolved.method, resolved.threshold)?;
                print_result(query, &result);
                println!();
            }
        }
    }
    Ok(())
}
