// src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use palette_lens::config::AppConfig;
use palette_lens::extract::extract_palette;
use palette_lens::gemini::generate_palette_text;
use palette_lens::image_prep::{encode_for_upload, load_image, PrepConfig};
use palette_lens::render::{render_json, render_swatches};

/// Ask Gemini for the five dominant colors of an image and print them as
/// labeled terminal swatches.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input image path (PNG or JPEG)
    image: PathBuf,

    /// Gemini model to query (default: gemini-2.5-flash, or GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Print the palette as JSON instead of swatches
    #[arg(long)]
    json: bool,

    /// Echo the model's raw reply before parsing
    #[arg(long)]
    raw: bool,

    /// Upload the image at its original resolution
    #[arg(long)]
    no_resize: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(model) = args.model {
        config.model = model;
    }

    let image = load_image(&args.image)?;
    let prep = PrepConfig {
        enable_resize: !args.no_resize,
        ..PrepConfig::default()
    };
    let png = encode_for_upload(&image, &prep)?;

    let raw_text = generate_palette_text(&config, &png).await?;
    if args.raw {
        println!("{raw_text}");
    }

    // Parse/shape failures already carry the offending reply in their
    // message, so a misbehaving model response stays diagnosable.
    let palette =
        extract_palette(&raw_text).context("could not extract a palette from the model reply")?;

    if args.json {
        println!("{}", render_json(&palette)?);
    } else {
        print!("{}", render_swatches(&palette));
    }

    Ok(())
}
