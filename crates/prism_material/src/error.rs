//! Errors raised while constructing materials or loading libraries.
//!
//! Scattering itself never fails: absorption and total internal reflection
//! are ordinary `None` results.

use thiserror::Error;

/// Errors that can occur while building materials.
#[derive(Error, Debug)]
pub enum MaterialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid refractive index {0}: must be finite and greater than 0")]
    InvalidRefractiveIndex(f32),

    #[error("Invalid albedo {0:?}: components must be finite and within [0, 1]")]
    InvalidAlbedo([f32; 3]),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),
}

/// Result type for material construction and loading.
pub type MaterialResult<T> = Result<T, MaterialError>;
