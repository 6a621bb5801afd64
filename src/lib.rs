// src/lib.rs
// Library surface: configuration, the Gemini gateway, the response
// extractor, and palette rendering.

pub mod config;
pub mod extract;
pub mod gemini;
pub mod image_prep;
pub mod palette;
pub mod render;

pub use config::{AppConfig, ConfigError};
pub use extract::{extract_entries, extract_palette, ExtractError};
pub use gemini::{generate_palette_text, GatewayError};
pub use image_prep::{encode_for_upload, load_image, PrepConfig};
pub use palette::{ColorEntry, Palette, PALETTE_SIZE};
pub use render::{render_json, render_swatches};
