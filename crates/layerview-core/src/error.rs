use thiserror::Error;

use crate::polygon::ExtruderId;

/// Result type for layer view operations.
pub type Result<T> = std::result::Result<T, LayerViewError>;

/// Errors raised while assembling layer view buffers.
///
/// Normal use of the layer store and of the unchecked build never fails.
/// These variants cover explicit validation requested by the caller.
#[derive(Error, Debug)]
pub enum LayerViewError {
    #[error("Polygon has {points} points but {widths} line widths")]
    LineWidthMismatch { points: usize, widths: usize },

    #[error("No material color for extruder {extruder} (color map has {available} entries)")]
    MissingExtruderColor { extruder: ExtruderId, available: usize },

    #[error("Invalid build options: {0}")]
    InvalidOptions(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
