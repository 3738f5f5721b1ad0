pub type MemeResult<T> = Result<T, MemeError>;

/// Failure kinds surfaced by the caption engine.
///
/// Every kind is deterministic for a given input, so none of them is retried internally.
#[derive(thiserror::Error, Debug)]
pub enum MemeError {
    /// Every font tier was tried and none could be loaded.
    #[error("font unavailable: tried {}", tried.join(", "))]
    FontUnavailable {
        /// Labels of the tiers that were attempted, in order.
        tried: Vec<String>,
    },

    /// A caption cannot be placed even at the minimum font size.
    #[error("text does not fit: {needed_px:.1}px needed at {size_px}px, limit is {limit_px:.1}px")]
    TextDoesNotFit {
        /// Font size the check was made at.
        size_px: u32,
        /// Vertical space the text needs.
        needed_px: f32,
        /// Vertical space available.
        limit_px: f32,
    },

    /// The input image exceeds the configured limits and cannot be reduced under them.
    #[error(
        "image too large: {width}x{height} ({bytes} bytes) exceeds limit of {max_dimension}px per side / {max_bytes} bytes"
    )]
    ImageTooLarge {
        /// Input width in pixels.
        width: u32,
        /// Input height in pixels.
        height: u32,
        /// Raw RGBA8 size of the input.
        bytes: u64,
        /// Configured per-side limit.
        max_dimension: u32,
        /// Configured raw size limit.
        max_bytes: u64,
    },

    /// Caller-supplied configuration is out of range.
    #[error("validation error: {0}")]
    Validation(String),

    /// The raster backend could not draw a request.
    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MemeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
