//! hanzi-scribe - Handwritten Chinese character recognition
//!
//! Captures drawn strokes, normalizes them into the classifier's canonical
//! image, and prints a ranked list of candidate characters with pinyin and
//! confidence.

mod canvas;
mod catalog;
mod config;
mod engine;
mod normalize;
mod storage;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use crate::canvas::{Point, SketchPad};
use crate::config::AppConfig;
use crate::engine::RecognitionEngine;
use crate::normalize::normalize;

/// hanzi-scribe - recognize hand-drawn Chinese characters
#[derive(Parser, Debug)]
#[command(name = "hanzi-scribe")]
#[command(about = "Recognize hand-drawn Chinese characters")]
struct Args {
    /// Recognize the drawing in this PNG instead of the built-in demo strokes
    #[arg(short, long)]
    input: Option<std::path::PathBuf>,

    /// Number of candidates to print (overrides config)
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Print catalog details for a character and exit
    #[arg(long)]
    show: Option<char>,

    /// Do not download the model; fall back to the demonstration backend
    /// unless it is already cached
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let mut config = load_or_create_config();
    if args.offline {
        config.recognition.offline = true;
    }
    let top_k = args.top_k.unwrap_or(config.recognition.top_k);

    if let Some(character) = args.show {
        return show_character(character);
    }

    let engine = RecognitionEngine::new(&config.recognition)?;
    let status = engine.subscribe();

    let raster = match &args.input {
        Some(path) => {
            info!("Loading drawing from {:?}", path);
            image::open(path)
                .with_context(|| format!("Failed to load drawing: {:?}", path))?
                .to_luma8()
        }
        None => {
            info!("No input given, drawing the demo character 人");
            demo_pad(&config).snapshot().clone()
        }
    };

    let image = normalize(&raster);
    if image.is_blank() {
        info!("Input has no drawn content; recognizing a blank canvas");
    }

    let results = engine.recognize(&image, top_k).await;

    println!("Status: {}", *status.borrow());
    println!("Top {} candidates:", results.len());
    for (rank, result) in results.iter().enumerate() {
        let meaning = engine
            .catalog()
            .lookup(result.character)
            .map(|r| r.meaning)
            .unwrap_or("");
        println!("  {}. {result}  {meaning}", rank + 1);
    }

    Ok(())
}

/// Draw 人 with two scripted strokes.
fn demo_pad(config: &AppConfig) -> SketchPad {
    let mut pad = SketchPad::new(config.canvas.width, config.canvas.height)
        .with_stroke_width(config.canvas.stroke_width);

    // Left-falling stroke
    pad.begin_stroke(Point::new(200.0, 80.0));
    pad.extend_stroke(Point::new(180.0, 160.0));
    pad.extend_stroke(Point::new(150.0, 240.0));
    pad.extend_stroke(Point::new(110.0, 320.0));
    pad.end_stroke();

    // Right-falling stroke
    pad.begin_stroke(Point::new(200.0, 160.0));
    pad.extend_stroke(Point::new(230.0, 230.0));
    pad.extend_stroke(Point::new(280.0, 320.0));
    pad.end_stroke();

    pad
}

fn show_character(character: char) -> Result<()> {
    let catalog = catalog::CharacterCatalog::new();
    let Some(record) = catalog.lookup(character) else {
        println!("{character} is not in the reference catalog");
        return Ok(());
    };

    println!("{} ({})", record.character, record.pinyin);
    println!("  Meaning: {}", record.meaning);
    println!("  Strokes: {}", record.stroke_count);
    println!("  Radical: {}", record.radical);
    if !record.examples.is_empty() {
        println!("  Examples: {}", record.examples.join(", "));
    }
    if let Some(etymology) = record.etymology {
        println!("  Etymology: {etymology}");
    }
    if let Some(tips) = record.pronunciation_tips {
        println!("  Pronunciation: {tips}");
    }
    if let Some(mnemonics) = record.mnemonics {
        println!("  Mnemonic: {mnemonics}");
    }

    Ok(())
}

/// Load configuration from file or create default
fn load_or_create_config() -> AppConfig {
    if let Ok(config_dir) = storage::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}
