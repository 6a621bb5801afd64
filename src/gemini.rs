// src/gemini.rs
// Gateway to the hosted Gemini multimodal model: one blocking call that
// ships the fixed color-analyst prompt plus an inline image and returns
// the model's raw text reply. Parsing that reply is the extractor's job.

use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AppConfig;

/// The instruction sent with every image. The reply contract (a bare JSON
/// array of five name/hex objects) is the only protocol this program has.
const PALETTE_PROMPT: &str = r##"You are a professional color analyst.

From the given image:
- Identify the TOP 5 visually dominant colors
- Assign each color a short, human-friendly name
- Provide accurate HEX color codes

Return ONLY valid JSON in this format:

[
  {"name": "Color Name", "hex": "#RRGGBB"},
  {"name": "Color Name", "hex": "#RRGGBB"},
  {"name": "Color Name", "hex": "#RRGGBB"},
  {"name": "Color Name", "hex": "#RRGGBB"},
  {"name": "Color Name", "hex": "#RRGGBB"}
]

No markdown. No explanations. JSON only."##;

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: String,
}

/// Remote call failure: transport, HTTP status, or an unusable reply
/// envelope. Opaque to the extractor - callers handle this distinctly
/// from parse/shape failures.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gemini request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Gemini API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("no text candidate in Gemini response")]
    EmptyReply,
}

/// Ask Gemini for the dominant colors of `image_png` and return its raw
/// text reply. Sampling is requested at temperature 0 so the same image
/// yields the same palette. No retries; a failure surfaces immediately.
pub async fn generate_palette_text(
    config: &AppConfig,
    image_png: &[u8],
) -> Result<String, GatewayError> {
    let base64_image = general_purpose::STANDARD.encode(image_png);

    let request = GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::Text {
                    text: PALETTE_PROMPT.to_string(),
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/png".to_string(),
                        data: base64_image,
                    },
                },
            ],
        }],
        generation_config: GenerationConfig { temperature: 0.0 },
    };

    let url = format!(
        "{}/models/{}:generateContent?key={}",
        config.endpoint, config.model, config.api_key
    );

    info!(model = %config.model, image_bytes = image_png.len(), "sending image to Gemini");

    let client = reqwest::Client::new();
    let response = client.post(&url).json(&request).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::Api { status, body });
    }

    let gemini_response: GeminiResponse = response.json().await?;

    let text = gemini_response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.clone())
        .ok_or(GatewayError::EmptyReply)?;

    debug!(reply_chars = text.len(), "Gemini replied");

    Ok(text)
}
