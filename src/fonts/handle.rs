use crate::{
    fonts::{
        builtin::BuiltinText,
        outline::{GlyphPaint, OutlineText},
    },
    foundation::{
        core::Color,
        error::{MemeError, MemeResult},
    },
    render::canvas::Canvas,
};

#[derive(Debug)]
enum Face {
    Outline(Box<OutlineText>),
    Builtin(BuiltinText),
}

/// A loaded font bound to exactly one pixel size.
///
/// Measuring and drawing go through the handle so a caption is always laid out and painted with
/// the same metrics. Request a new handle from [`crate::FontResolver`] for every candidate size.
#[derive(Debug)]
pub struct FontHandle {
    label: String,
    face: Face,
}

impl FontHandle {
    pub(crate) fn outline(label: String, text: OutlineText) -> Self {
        Self {
            label,
            face: Face::Outline(Box::new(text)),
        }
    }

    pub(crate) fn builtin(size_px: u32) -> Self {
        Self {
            label: "builtin".to_string(),
            face: Face::Builtin(BuiltinText::new(size_px)),
        }
    }

    pub fn size_px(&self) -> u32 {
        match &self.face {
            Face::Outline(t) => t.size_px(),
            Face::Builtin(t) => t.size_px(),
        }
    }

    /// Label of the source tier this handle was loaded from.
    pub fn source_label(&self) -> &str {
        &self.label
    }

    /// Capability check: can this face draw an outline in a single native pass?
    pub fn supports_native_stroke(&self) -> bool {
        matches!(self.face, Face::Outline(_))
    }

    /// Advance width of `text` in pixels.
    pub fn measure(&mut self, text: &str) -> f32 {
        match &mut self.face {
            Face::Outline(t) => t.measure(text),
            Face::Builtin(t) => t.measure(text),
        }
    }

    pub fn ellipsis(&self) -> &'static str {
        match self.face {
            Face::Outline(_) => "\u{2026}",
            Face::Builtin(_) => "...",
        }
    }

    /// Paint `text` with its top-left corner at `(x, y)`.
    pub fn fill_text(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        x: i64,
        y: i64,
        color: Color,
    ) -> MemeResult<()> {
        match &mut self.face {
            Face::Outline(t) => t.draw(canvas, text, x, y, GlyphPaint::Fill(color.to_array())),
            Face::Builtin(t) => {
                t.fill_text(canvas, text, x, y, color.to_premul());
                Ok(())
            }
        }
    }

    /// Paint only the outline of `text`, `width` pixels outside the glyph edges.
    ///
    /// Fails for faces whose [`supports_native_stroke`](Self::supports_native_stroke) is false.
    pub fn stroke_text(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        x: i64,
        y: i64,
        width: u32,
        color: Color,
    ) -> MemeResult<()> {
        match &mut self.face {
            Face::Outline(t) => t.draw(
                canvas,
                text,
                x,
                y,
                GlyphPaint::Stroke {
                    width,
                    rgba: color.to_array(),
                },
            ),
            Face::Builtin(_) => Err(MemeError::render(format!(
                "font '{}' has no native stroke support",
                self.label
            ))),
        }
    }
}
