use std::env;
use std::path::Path;

use faqmatch_core::config::Config;
use faqmatch_core::traits::Similarity;
use faqmatch_embed::{embedder_from_settings, EmbeddingSimilarity};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <text-a> <text-b> [config.toml]", args[0]);
        eprintln!("Example: {} 'what time are you open' 'What are your business hours?'", args[0]);
        std::process::exit(1);
    }
    let config_path = args.get(3).map(String::as_str).unwrap_or("config.toml");
    let config = Config::load_from(Path::new(config_path)).map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;
    let similarity = EmbeddingSimilarity::new(embedder_from_settings(&settings.embed)?);
    let score = similarity.similarity(&args[1], &args[2])?;
    println!("{:?} ~ {:?}", args[1], args[2]);
    println!("similarity={:.4}  backend={:?}  dim={}", score, settings.embed.backend, similarity.embedder().dim());
    Ok(())
}
