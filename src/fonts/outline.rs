use std::sync::Arc;

use crate::{
    foundation::error::{MemeError, MemeResult},
    render::canvas::Canvas,
};

/// Font bytes that registered with the layout engine as at least one family.
#[derive(Clone, Debug)]
pub(crate) struct OutlineFace {
    pub(crate) label: String,
    pub(crate) bytes: Arc<[u8]>,
    pub(crate) family_name: String,
}

impl OutlineFace {
    /// Register `bytes` with a scratch font collection to check they are a usable font.
    pub(crate) fn load(label: String, bytes: Arc<[u8]>) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &bytes)?;
        Ok(Self {
            label,
            bytes,
            family_name,
        })
    }
}

fn register_family(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> MemeResult<String> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
        MemeError::validation("no font families registered from font bytes")
    })?;

    Ok(font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| MemeError::validation("registered font family has no name"))?
        .to_string())
}

/// What a glyph pass paints, in straight RGBA8.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum GlyphPaint {
    Fill([u8; 4]),
    /// Outline extending `width` pixels outside the glyph edge.
    Stroke { width: u32, rgba: [u8; 4] },
}

/// Stateful text engine for one outline face at one pixel size.
pub(crate) struct OutlineText {
    size_px: u32,
    family_name: String,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    font: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for OutlineText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineText")
            .field("size_px", &self.size_px)
            .field("family_name", &self.family_name)
            .finish_non_exhaustive()
    }
}

impl OutlineText {
    pub(crate) fn new(face: &OutlineFace, size_px: u32) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &face.bytes)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(face.bytes.to_vec()),
            0,
        );
        Ok(Self {
            size_px,
            family_name,
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font,
        })
    }

    pub(crate) fn size_px(&self) -> u32 {
        self.size_px
    }

    fn layout(&mut self, text: &str) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(self.size_px as f32));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    pub(crate) fn measure(&mut self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }
        self.layout(text).width()
    }

    /// Rasterize `text` with its layout box's top-left at `(x, y)` and blend it onto `canvas`.
    pub(crate) fn draw(
        &mut self,
        canvas: &mut Canvas,
        text: &str,
        x: i64,
        y: i64,
        paint: GlyphPaint,
    ) -> MemeResult<()> {
        if text.trim().is_empty() {
            return Ok(());
        }

        let layout = self.layout(text);
        let margin = match paint {
            GlyphPaint::Fill(_) => 2u32,
            GlyphPaint::Stroke { width, .. } => width.saturating_add(2),
        };
        let w = layout.width().ceil() as u64 + 2 * u64::from(margin);
        let h = layout.height().ceil() as u64 + 2 * u64::from(margin);
        let w16: u16 = w
            .try_into()
            .map_err(|_| MemeError::render("text line wider than raster limit"))?;
        let h16: u16 = h
            .try_into()
            .map_err(|_| MemeError::render("text line taller than raster limit"))?;
        let (w, h) = (u32::from(w16), u32::from(h16));

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(margin),
            f64::from(margin),
        )));
        let rgba = match paint {
            GlyphPaint::Fill(rgba) => rgba,
            GlyphPaint::Stroke { width, rgba } => {
                // Strokes are centered on the outline; double it so `width` lands outside.
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(width) * 2.0));
                rgba
            }
        };
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                let builder = ctx.glyph_run(&self.font).font_size(run.run().font_size());
                match paint {
                    GlyphPaint::Fill(_) => builder.fill_glyphs(glyphs),
                    GlyphPaint::Stroke { .. } => builder.stroke_glyphs(glyphs),
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);

        let m = i64::from(margin);
        canvas.composite_premul(x - m, y - m, w, h, pixmap.data_as_u8_slice())
    }
}
