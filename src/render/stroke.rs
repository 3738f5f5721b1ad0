use serde::{Deserialize, Serialize};

use crate::{
    fonts::handle::FontHandle,
    foundation::{
        core::Color,
        error::{MemeError, MemeResult},
    },
    render::canvas::Canvas,
};

/// How outlines are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeMode {
    /// Native stroking when the face supports it, offset copies otherwise.
    #[default]
    Auto,
    /// Require native stroking.
    Native,
    /// Always stamp offset copies, even if the face could stroke natively.
    Offset,
}

/// Draws the outline pass of one line of text.
pub trait StrokePainter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Paint the outline of `text` placed with its top-left at `(x, y)`. The fill pass is drawn
    /// separately on top.
    #[allow(clippy::too_many_arguments)]
    fn paint_outline(
        &self,
        canvas: &mut Canvas,
        font: &mut FontHandle,
        text: &str,
        x: i64,
        y: i64,
        width: u32,
        color: Color,
    ) -> MemeResult<()>;
}

/// Uses the face's own outlined-glyph drawing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeStroke;

impl StrokePainter for NativeStroke {
    fn name(&self) -> &'static str {
        "native"
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_outline(
        &self,
        canvas: &mut Canvas,
        font: &mut FontHandle,
        text: &str,
        x: i64,
        y: i64,
        width: u32,
        color: Color,
    ) -> MemeResult<()> {
        font.stroke_text(canvas, text, x, y, width, color)
    }
}

/// Stamps the filled text in the stroke color at the 8 compass offsets of length `width`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OffsetStroke;

impl OffsetStroke {
    pub fn offsets(width: u32) -> [(i64, i64); 8] {
        let w = i64::from(width);
        [
            (-w, -w),
            (-w, 0),
            (-w, w),
            (0, -w),
            (0, w),
            (w, -w),
            (w, 0),
            (w, w),
        ]
    }
}

impl StrokePainter for OffsetStroke {
    fn name(&self) -> &'static str {
        "offset"
    }

    #[allow(clippy::too_many_arguments)]
    fn paint_outline(
        &self,
        canvas: &mut Canvas,
        font: &mut FontHandle,
        text: &str,
        x: i64,
        y: i64,
        width: u32,
        color: Color,
    ) -> MemeResult<()> {
        for (dx, dy) in Self::offsets(width) {
            font.fill_text(canvas, text, x + dx, y + dy, color)?;
        }
        Ok(())
    }
}

/// Pick the outline strategy once, from the face's capability.
pub fn select_stroke_painter(
    mode: StrokeMode,
    supports_native: bool,
) -> MemeResult<Box<dyn StrokePainter>> {
    match (mode, supports_native) {
        (StrokeMode::Offset, _) | (StrokeMode::Auto, false) => Ok(Box::new(OffsetStroke)),
        (StrokeMode::Auto, true) | (StrokeMode::Native, true) => Ok(Box::new(NativeStroke)),
        (StrokeMode::Native, false) => Err(MemeError::validation(
            "stroke_mode 'native' requested but the resolved font cannot stroke natively",
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stroke.rs"]
mod tests;
