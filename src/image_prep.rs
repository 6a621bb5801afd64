// src/image_prep.rs
// Prepare an image file for upload: decode, fit within upload bounds, and
// re-encode as PNG for the inline_data payload.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, ImageReader};
use thiserror::Error;
use tracing::debug;

/// Upload bound. Naming five dominant colors does not need full-resolution
/// input, and smaller images keep request size and token cost down.
const MAX_UPLOAD_WIDTH: u32 = 1280;
const MAX_UPLOAD_HEIGHT: u32 = 1280;

#[derive(Debug, Error)]
pub enum ImagePrepError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a PNG or JPEG image")]
    UnsupportedFormat { path: String },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode upload payload: {0}")]
    Encode(#[source] image::ImageError),
}

#[derive(Debug, Clone)]
pub struct PrepConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub enable_resize: bool,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            max_width: MAX_UPLOAD_WIDTH,
            max_height: MAX_UPLOAD_HEIGHT,
            enable_resize: true,
        }
    }
}

/// Load a PNG or JPEG from disk. The format is sniffed from the file
/// contents, not the extension.
pub fn load_image(path: &Path) -> Result<DynamicImage, ImagePrepError> {
    let display = path.display().to_string();
    let reader = ImageReader::open(path)
        .map_err(|source| ImagePrepError::Io {
            path: display.clone(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| ImagePrepError::Io {
            path: display.clone(),
            source,
        })?;

    match reader.format() {
        Some(ImageFormat::Png) | Some(ImageFormat::Jpeg) => {}
        _ => return Err(ImagePrepError::UnsupportedFormat { path: display }),
    }

    reader.decode().map_err(|source| ImagePrepError::Decode {
        path: display,
        source,
    })
}

/// Downscale (never upscale) to fit the configured bounds and re-encode as
/// PNG - the single format the gateway sends upstream.
pub fn encode_for_upload(
    image: &DynamicImage,
    config: &PrepConfig,
) -> Result<Vec<u8>, ImagePrepError> {
    let (width, height) = (image.width(), image.height());
    let (fit_width, fit_height) =
        fit_dimensions(width, height, config.max_width, config.max_height);

    let resized;
    let to_encode = if config.enable_resize && (fit_width, fit_height) != (width, height) {
        debug!(from = ?(width, height), to = ?(fit_width, fit_height), "downscaling for upload");
        // Nearest is plenty for a model that only names dominant colors,
        // and it is far faster than the high-quality filters.
        resized = image.resize_exact(fit_width, fit_height, image::imageops::FilterType::Nearest);
        &resized
    } else {
        image
    };

    let mut png = Vec::new();
    to_encode
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(ImagePrepError::Encode)?;
    Ok(png)
}

/// Largest dimensions that fit within the max bounds while preserving
/// aspect ratio. Images already inside the bounds come back unchanged.
fn fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let aspect = width as f32 / height as f32;
    let target_aspect = max_width as f32 / max_height as f32;

    if aspect > target_aspect {
        (max_width, (max_width as f32 / aspect) as u32)
    } else {
        ((max_height as f32 * aspect) as u32, max_height)
    }
}
