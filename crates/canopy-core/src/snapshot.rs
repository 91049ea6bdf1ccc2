//! Portable snapshot of the drawing raster.
//!
//! A snapshot is the sole persistence and transfer mechanism for drawn
//! content. It is stored as a PNG data URL so it can travel through JSON and
//! be handed to a second, read-only surface.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Data URL prefix for PNG snapshots.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Snapshot errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Not a PNG data URL")]
    NotPngDataUrl,
    #[error("Invalid base64 payload: {0}")]
    Base64(String),
    #[error("Payload is not a PNG image")]
    NotPng,
}

/// Result type for snapshot operations.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Encoded copy of the raster's full content at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(String);

impl Snapshot {
    /// Wrap encoded PNG bytes.
    pub fn from_png_bytes(png: &[u8]) -> Self {
        let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
        url.push_str(PNG_DATA_URL_PREFIX);
        STANDARD.encode_string(png, &mut url);
        Self(url)
    }

    /// Wrap a data URL received from elsewhere. The content is validated
    /// lazily by [`Snapshot::png_bytes`].
    pub fn from_data_url(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Extract the PNG bytes carried by this snapshot.
    pub fn png_bytes(&self) -> SnapshotResult<Vec<u8>> {
        let payload = self
            .0
            .trim()
            .strip_prefix(PNG_DATA_URL_PREFIX)
            .ok_or(SnapshotError::NotPngDataUrl)?;
        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| SnapshotError::Base64(e.to_string()))?;
        if !bytes.starts_with(&PNG_MAGIC) {
            return Err(SnapshotError::NotPng);
        }
        Ok(bytes)
    }

    /// Size of the encoded form in bytes.
    pub fn encoded_len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
