use crate::{
    fonts::{handle::FontHandle, resolver::FontResolver, source::MAX_FONT_SIZE},
    foundation::error::{MemeError, MemeResult},
    layout::wrap::{normalize_whitespace, wrap},
};

pub const DEFAULT_MIN_SIZE: u32 = 10;
pub const DEFAULT_SIZE_STEP: u32 = 2;
pub const DEFAULT_LINE_SPACING: f32 = 1.1;

/// Search bounds for one caption.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitParams {
    pub start_size: u32,
    pub min_size: u32,
    pub size_step: u32,
    pub max_width: f32,
    pub max_height: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
}

impl FitParams {
    pub fn validate(&self) -> MemeResult<()> {
        if self.min_size == 0 {
            return Err(MemeError::validation("min_size must be >= 1"));
        }
        if self.start_size > MAX_FONT_SIZE {
            return Err(MemeError::validation(format!(
                "start_size ({}) must be <= {MAX_FONT_SIZE}",
                self.start_size
            )));
        }
        if self.start_size < self.min_size {
            return Err(MemeError::validation(format!(
                "start_size ({}) must be >= min_size ({})",
                self.start_size, self.min_size
            )));
        }
        if self.size_step == 0 {
            return Err(MemeError::validation("size_step must be >= 1"));
        }
        if !self.max_width.is_finite() || self.max_width <= 0.0 {
            return Err(MemeError::validation("max_width must be finite and > 0"));
        }
        if !self.max_height.is_finite() || self.max_height <= 0.0 {
            return Err(MemeError::validation("max_height must be finite and > 0"));
        }
        if !self.line_spacing.is_finite() || self.line_spacing < 1.0 {
            return Err(MemeError::validation(
                "line_spacing must be finite and >= 1.0",
            ));
        }
        Ok(())
    }

    /// Upper bound on sizes tried: every step from `start_size` down to `min_size`.
    pub fn max_iterations(&self) -> u32 {
        (self.start_size - self.min_size) / self.size_step + 1
    }

    pub fn line_height(&self, size_px: u32) -> f32 {
        size_px as f32 * self.line_spacing
    }
}

/// A caption wrapped and measured at one font size.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub raw: String,
    pub lines: Vec<String>,
    pub line_widths: Vec<f32>,
    pub size_px: u32,
    pub line_height: f32,
    pub block_width: f32,
    pub block_height: f32,
}

impl TextBlock {
    /// Measure already-broken `lines` with `font`.
    pub fn from_lines(
        raw: &str,
        lines: Vec<String>,
        font: &mut FontHandle,
        line_spacing: f32,
    ) -> Self {
        let line_widths: Vec<f32> = lines.iter().map(|l| font.measure(l)).collect();
        let block_width = line_widths.iter().copied().fold(0.0f32, f32::max);
        let line_height = font.size_px() as f32 * line_spacing;
        Self {
            raw: raw.to_string(),
            block_height: line_height * lines.len() as f32,
            lines,
            line_widths,
            size_px: font.size_px(),
            line_height,
            block_width,
        }
    }

    /// Wrap `raw` to `max_width` and measure the result.
    pub fn wrapped(raw: &str, font: &mut FontHandle, max_width: f32, line_spacing: f32) -> Self {
        let lines = wrap(raw, font, max_width);
        Self::from_lines(raw, lines, font, line_spacing)
    }

    pub fn fits(&self, max_width: f32, max_height: f32) -> bool {
        self.block_width <= max_width && self.block_height <= max_height
    }
}

/// Result of a size search.
#[derive(Clone, Debug, PartialEq)]
pub enum FitOutcome {
    /// Some size in `[min_size, start_size]` fits; this is the largest.
    Fitted(TextBlock),
    /// Nothing fits; the block is the best effort at exactly `min_size`.
    Exhausted {
        block: TextBlock,
        max_width: f32,
        max_height: f32,
    },
}

impl FitOutcome {
    pub fn block(&self) -> &TextBlock {
        match self {
            Self::Fitted(b) | Self::Exhausted { block: b, .. } => b,
        }
    }

    pub fn into_block(self) -> TextBlock {
        match self {
            Self::Fitted(b) | Self::Exhausted { block: b, .. } => b,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Strict form: treat exhaustion as [`MemeError::TextDoesNotFit`].
    pub fn into_result(self) -> MemeResult<TextBlock> {
        match self {
            Self::Fitted(b) => Ok(b),
            Self::Exhausted {
                block,
                max_width,
                max_height,
            } => {
                let (needed_px, limit_px) = if block.block_height > max_height {
                    (block.block_height, max_height)
                } else {
                    (block.block_width, max_width)
                };
                Err(MemeError::TextDoesNotFit {
                    size_px: block.size_px,
                    needed_px,
                    limit_px,
                })
            }
        }
    }
}

/// Shrink the font from `start_size` by `size_step` until the wrapped caption fits.
///
/// The loop is bounded by [`FitParams::max_iterations`] regardless of text length. When no size
/// fits, the caption is wrapped once more at exactly `min_size` and returned as
/// [`FitOutcome::Exhausted`]. Fails outright only when a single line at `min_size` is taller than
/// `max_height`.
#[tracing::instrument(skip(text, fonts, params), fields(chars = text.len()))]
pub fn fit(text: &str, fonts: &mut FontResolver, params: &FitParams) -> MemeResult<FitOutcome> {
    params.validate()?;

    let min_line = params.line_height(params.min_size);
    if min_line > params.max_height {
        return Err(MemeError::TextDoesNotFit {
            size_px: params.min_size,
            needed_px: min_line,
            limit_px: params.max_height,
        });
    }

    let raw = normalize_whitespace(text);
    for i in 0..params.max_iterations() {
        let size = params.start_size - i * params.size_step;
        let font = fonts.handle(size)?;
        let block = TextBlock::wrapped(&raw, font, params.max_width, params.line_spacing);
        tracing::debug!(
            size,
            lines = block.lines.len(),
            width = block.block_width,
            height = block.block_height,
            "fit attempt"
        );
        if block.fits(params.max_width, params.max_height) {
            return Ok(FitOutcome::Fitted(block));
        }
    }

    let font = fonts.handle(params.min_size)?;
    let block = TextBlock::wrapped(&raw, font, params.max_width, params.line_spacing);
    Ok(if block.fits(params.max_width, params.max_height) {
        FitOutcome::Fitted(block)
    } else {
        FitOutcome::Exhausted {
            block,
            max_width: params.max_width,
            max_height: params.max_height,
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
