use serde::{Deserialize, Serialize};

use crate::{
    fonts::handle::FontHandle,
    foundation::{
        core::{Anchor, Color},
        error::MemeResult,
    },
    layout::fit::TextBlock,
    render::{
        canvas::Canvas,
        stroke::{StrokeMode, StrokePainter, select_stroke_painter},
    },
};

/// Drop shadow drawn under each line before the outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowSpec {
    pub dx: i32,
    pub dy: i32,
    pub color: Color,
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            dx: 3,
            dy: 3,
            color: Color::rgba(0, 0, 0, 0x99),
        }
    }
}

/// Colors and widths for one block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStyle {
    pub stroke_width: u32,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub shadow: Option<ShadowSpec>,
}

/// Draws wrapped caption blocks with the outline strategy chosen at construction.
pub struct StrokeCompositor {
    painter: Box<dyn StrokePainter>,
}

impl std::fmt::Debug for StrokeCompositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeCompositor")
            .field("painter", &self.painter.name())
            .finish()
    }
}

impl StrokeCompositor {
    pub fn new(painter: Box<dyn StrokePainter>) -> Self {
        Self { painter }
    }

    pub fn select(mode: StrokeMode, supports_native: bool) -> MemeResult<Self> {
        Ok(Self::new(select_stroke_painter(mode, supports_native)?))
    }

    pub fn painter_name(&self) -> &'static str {
        self.painter.name()
    }

    /// Top-left origin of every line in `block`, centered horizontally and stacked from `anchor`.
    pub fn line_origins(
        canvas_width: u32,
        canvas_height: u32,
        block: &TextBlock,
        anchor: Anchor,
        padding: u32,
    ) -> Vec<(i64, i64)> {
        let top = match anchor {
            Anchor::Top => padding as f32,
            Anchor::Bottom => canvas_height as f32 - padding as f32 - block.block_height,
        };
        block
            .line_widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let x = ((canvas_width as f32 - w) / 2.0).round() as i64;
                let y = (top + i as f32 * block.line_height).round() as i64;
                (x, y)
            })
            .collect()
    }

    /// Paint `block` onto `canvas`: shadow, then outline, then fill, line by line.
    pub fn draw(
        &self,
        canvas: &mut Canvas,
        block: &TextBlock,
        font: &mut FontHandle,
        anchor: Anchor,
        padding: u32,
        style: &BlockStyle,
    ) -> MemeResult<()> {
        let origins =
            Self::line_origins(canvas.width(), canvas.height(), block, anchor, padding);
        for (line, (x, y)) in block.lines.iter().zip(origins) {
            if line.is_empty() {
                continue;
            }
            if let Some(shadow) = style.shadow {
                font.fill_text(
                    canvas,
                    line,
                    x + i64::from(shadow.dx),
                    y + i64::from(shadow.dy),
                    shadow.color,
                )?;
            }
            if style.stroke_width > 0 {
                self.painter.paint_outline(
                    canvas,
                    font,
                    line,
                    x,
                    y,
                    style.stroke_width,
                    style.stroke_color,
                )?;
            }
            font.fill_text(canvas, line, x, y, style.fill_color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
