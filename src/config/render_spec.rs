use serde::{Deserialize, Serialize};

use crate::{
    fonts::source::{FontSpec, MAX_FONT_SIZE},
    foundation::{
        core::Color,
        error::{MemeError, MemeResult},
    },
    layout::{
        fit::{DEFAULT_LINE_SPACING, DEFAULT_MIN_SIZE, DEFAULT_SIZE_STEP, FitParams},
        overflow::Overflow,
    },
    render::{
        compositor::{BlockStyle, ShadowSpec},
        stroke::StrokeMode,
    },
};

pub const DEFAULT_PADDING: u32 = 10;
pub const DEFAULT_STROKE_WIDTH: u32 = 3;
pub const DEFAULT_BLOCK_HEIGHT_RATIO: f32 = 0.25;
pub const DEFAULT_MAX_IMAGE_DIMENSION: u32 = 4000;
/// 5000 x 5000 RGBA.
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 100_000_000;
pub const MAX_IMAGE_DIMENSION_LIMIT: u32 = 32_768;
pub const MAX_STROKE_WIDTH: u32 = 256;
/// Floor for padding derived from `padding_ratio`.
pub const MIN_RELATIVE_PADDING: u32 = 4;

/// Everything one render call needs besides the image and the captions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSpec {
    pub font: FontSpec,
    pub padding: u32,
    pub stroke_width: u32,
    /// When set, overrides `stroke_width` with `max(1, round(size_px * ratio))` per block.
    pub stroke_width_ratio: Option<f32>,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub stroke_mode: StrokeMode,
    pub shadow: Option<ShadowSpec>,
    /// First size tried by the fit search. Takes precedence over `start_size_ratio`; with neither
    /// set, `font.size` is used.
    pub start_size: Option<u32>,
    /// Start size as a fraction of the (prepared) image height.
    pub start_size_ratio: Option<f32>,
    /// Padding as a fraction of the image's short side, at least [`MIN_RELATIVE_PADDING`].
    /// Overrides `padding`.
    pub padding_ratio: Option<f32>,
    /// Caps the caption width at this fraction of the image width.
    pub max_width_ratio: Option<f32>,
    pub min_size: u32,
    pub size_step: u32,
    pub line_spacing: f32,
    /// Height available to each caption as a fraction of the image height.
    pub block_height_ratio: f32,
    pub max_image_dimension: u32,
    pub max_image_bytes: u64,
    pub downscale_oversized: bool,
    pub overflow: Overflow,
}

impl Default for RenderSpec {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            padding: DEFAULT_PADDING,
            stroke_width: DEFAULT_STROKE_WIDTH,
            stroke_width_ratio: None,
            stroke_color: Color::BLACK,
            fill_color: Color::WHITE,
            stroke_mode: StrokeMode::Auto,
            shadow: None,
            start_size: None,
            start_size_ratio: None,
            padding_ratio: None,
            max_width_ratio: None,
            min_size: DEFAULT_MIN_SIZE,
            size_step: DEFAULT_SIZE_STEP,
            line_spacing: DEFAULT_LINE_SPACING,
            block_height_ratio: DEFAULT_BLOCK_HEIGHT_RATIO,
            max_image_dimension: DEFAULT_MAX_IMAGE_DIMENSION,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            downscale_oversized: true,
            overflow: Overflow::Ellipsis,
        }
    }
}

/// Caption geometry resolved against one prepared canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionArea {
    pub start_size: u32,
    pub padding: u32,
    pub max_width: f32,
    /// Height available to each caption block.
    pub max_height: f32,
}

fn check_ratio(name: &str, value: Option<f32>, lo_inclusive: bool, hi: f32) -> MemeResult<()> {
    let Some(r) = value else {
        return Ok(());
    };
    let above_lo = if lo_inclusive { r >= 0.0 } else { r > 0.0 };
    if !r.is_finite() || !above_lo || r > hi {
        let open = if lo_inclusive { '[' } else { '(' };
        return Err(MemeError::validation(format!(
            "{name} must be in {open}0, {hi}], got {r}"
        )));
    }
    Ok(())
}

impl RenderSpec {
    /// Sizes everything from the image: start size 6% of the height, padding 2% of the short
    /// side, captions at most 95% of the width, stroke 6% of the font size.
    pub fn image_relative() -> Self {
        Self {
            start_size_ratio: Some(0.06),
            padding_ratio: Some(0.02),
            max_width_ratio: Some(0.95),
            stroke_width_ratio: Some(0.06),
            block_height_ratio: 0.35,
            ..Self::default()
        }
    }

    pub fn from_json(text: &str) -> MemeResult<Self> {
        let spec: Self = serde_json::from_str(text)
            .map_err(|e| MemeError::validation(format!("invalid render spec: {e}")))?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn effective_start_size(&self) -> u32 {
        self.start_size.unwrap_or(self.font.size)
    }

    /// Reject out-of-range values. Nothing is clamped.
    pub fn validate(&self) -> MemeResult<()> {
        let start = self.effective_start_size();
        if self.font.size == 0 || self.font.size > MAX_FONT_SIZE {
            return Err(MemeError::validation(format!(
                "font.size must be in [1, {MAX_FONT_SIZE}], got {}",
                self.font.size
            )));
        }
        if start > MAX_FONT_SIZE {
            return Err(MemeError::validation(format!(
                "start_size ({start}) must be <= {MAX_FONT_SIZE}"
            )));
        }
        if self.min_size == 0 {
            return Err(MemeError::validation("min_size must be >= 1"));
        }
        if start < self.min_size {
            return Err(MemeError::validation(format!(
                "start_size ({start}) must be >= min_size ({})",
                self.min_size
            )));
        }
        if self.size_step == 0 {
            return Err(MemeError::validation("size_step must be >= 1"));
        }
        if !self.line_spacing.is_finite() || self.line_spacing < 1.0 {
            return Err(MemeError::validation(
                "line_spacing must be finite and >= 1.0",
            ));
        }
        if !(self.block_height_ratio > 0.0 && self.block_height_ratio <= 0.5) {
            return Err(MemeError::validation(
                "block_height_ratio must be in (0, 0.5]",
            ));
        }
        if self.max_image_dimension == 0 || self.max_image_dimension > MAX_IMAGE_DIMENSION_LIMIT {
            return Err(MemeError::validation(format!(
                "max_image_dimension must be in [1, {MAX_IMAGE_DIMENSION_LIMIT}]"
            )));
        }
        if start > self.max_image_dimension {
            return Err(MemeError::validation(format!(
                "start_size ({start}) must be <= max_image_dimension ({})",
                self.max_image_dimension
            )));
        }
        if self.max_image_bytes < 4 {
            return Err(MemeError::validation("max_image_bytes must be >= 4"));
        }
        if self.stroke_width > MAX_STROKE_WIDTH {
            return Err(MemeError::validation(format!(
                "stroke_width ({}) must be <= {MAX_STROKE_WIDTH}",
                self.stroke_width
            )));
        }
        check_ratio("stroke_width_ratio", self.stroke_width_ratio, false, 1.0)?;
        check_ratio("start_size_ratio", self.start_size_ratio, false, 1.0)?;
        check_ratio("padding_ratio", self.padding_ratio, true, 0.49)?;
        check_ratio("max_width_ratio", self.max_width_ratio, false, 1.0)?;
        Ok(())
    }

    /// Resolve start size, padding and slot bounds for a `width` x `height` canvas.
    pub fn caption_area(&self, width: u32, height: u32) -> MemeResult<CaptionArea> {
        let padding = match self.padding_ratio {
            Some(r) => ((width.min(height) as f32 * r).round() as u32).max(MIN_RELATIVE_PADDING),
            None => self.padding,
        };
        let usable = i64::from(width) - 2 * i64::from(padding);
        if usable <= 0 {
            return Err(MemeError::validation(format!(
                "padding {padding} leaves no usable width on a {width} px wide image"
            )));
        }
        let mut max_width = usable as f32;
        if let Some(r) = self.max_width_ratio {
            max_width = max_width.min((width as f32 * r).round().max(1.0));
        }

        let start_size = match (self.start_size, self.start_size_ratio) {
            (Some(px), _) => px,
            (None, Some(r)) => ((height as f32 * r).round() as u32)
                .max(self.min_size)
                .min(MAX_FONT_SIZE),
            (None, None) => self.font.size,
        };

        Ok(CaptionArea {
            start_size,
            padding,
            max_width,
            max_height: height as f32 * self.block_height_ratio,
        })
    }

    pub fn fit_params(&self, area: &CaptionArea) -> FitParams {
        FitParams {
            start_size: area.start_size,
            min_size: self.min_size,
            size_step: self.size_step,
            max_width: area.max_width,
            max_height: area.max_height,
            line_spacing: self.line_spacing,
        }
    }

    pub fn stroke_width_for(&self, size_px: u32) -> u32 {
        match self.stroke_width_ratio {
            Some(ratio) => ((size_px as f32 * ratio).round() as u32).clamp(1, MAX_STROKE_WIDTH),
            None => self.stroke_width,
        }
    }

    pub fn block_style(&self, size_px: u32) -> BlockStyle {
        BlockStyle {
            stroke_width: self.stroke_width_for(size_px),
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            shadow: self.shadow,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/render_spec.rs"]
mod tests;
