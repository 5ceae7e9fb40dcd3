//! Logo image processing
//!
//! Accepts PNG, JPEG and WebP uploads and re-encodes them as JPEG.

use std::io::Cursor;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::utils::{AppError, AppResult, ErrorCode};

/// Supported upload extensions
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for logos
const JPEG_QUALITY: u8 = 85;

/// A logo ready to store
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub bytes: Vec<u8>,
    /// sha256 of `bytes`, hex
    pub hash: String,
    pub width: u32,
    pub height: u32,
}

impl ProcessedImage {
    /// Content-addressed object name
    pub fn file_name(&self) -> String {
        format!("{}.jpg", &self.hash[..16])
    }
}

/// SHA256 of data, hex encoded
pub fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Check size and extension of an upload before decoding it
pub fn validate_upload(data: &[u8], filename: &str, max_bytes: usize) -> AppResult<()> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }

    if data.len() > max_bytes {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!(
                "File too large. Maximum size is {} bytes ({}MB)",
                max_bytes,
                max_bytes / 1024 / 1024
            ),
        )
        .with_detail("max_bytes", max_bytes));
    }

    let ext = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::UnsupportedFileFormat,
                format!("Invalid file extension for: {}", filename),
            )
        })?;

    if !SUPPORTED_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported file format '{}'. Supported: {}",
                ext,
                SUPPORTED_FORMATS.join(", ")
            ),
        ));
    }

    Ok(())
}

/// Decode and re-encode as JPEG
pub fn process_image(data: &[u8]) -> AppResult<ProcessedImage> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {}", e))
    })?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img.write_with_encoder(encoder).map_err(|e| {
            AppError::with_message(
                ErrorCode::ImageProcessingFailed,
                format!("Failed to compress image: {}", e),
            )
        })?;
    }

    Ok(ProcessedImage {
        hash: calculate_hash(&buffer),
        width: img.width(),
        height: img.height(),
        bytes: buffer,
    })
}
