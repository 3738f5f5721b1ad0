use image::{DynamicImage, RgbaImage, imageops::FilterType};

use crate::{
    config::render_spec::RenderSpec,
    fonts::resolver::FontResolver,
    foundation::{
        core::Anchor,
        error::{MemeError, MemeResult},
    },
    layout::{
        fit::fit,
        overflow::{Overflow, shrink_block},
        wrap::normalize_whitespace,
    },
    render::{canvas::Canvas, compositor::StrokeCompositor},
};

fn raw_bytes(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * 4
}

/// Scale `(width, height)` so the long side is at most `max_dimension`, keeping the aspect ratio.
///
/// Sides are floored and never drop below 1 px.
pub fn fit_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let long = width.max(height);
    if long <= max_dimension {
        return (width, height);
    }
    let scale = |side: u32| {
        ((u64::from(side) * u64::from(max_dimension)) / u64::from(long)).max(1) as u32
    };
    (scale(width), scale(height))
}

/// Target size after progressive reduction, or `None` when the image is already within limits.
pub fn reduced_dimensions(
    width: u32,
    height: u32,
    max_dimension: u32,
    max_bytes: u64,
) -> Option<(u32, u32)> {
    let (mut w, mut h) = fit_dimensions(width, height, max_dimension);
    if raw_bytes(w, h) > max_bytes {
        let scale = (max_bytes as f64 / raw_bytes(w, h) as f64).sqrt();
        w = ((f64::from(w) * scale).floor() as u32).max(1);
        h = ((f64::from(h) * scale).floor() as u32).max(1);
    }
    ((w, h) != (width, height)).then_some((w, h))
}

/// RGBA working copy of `image`, downscaled when it exceeds the configured limits.
pub fn prepare_canvas(image: &DynamicImage, spec: &RenderSpec) -> MemeResult<Canvas> {
    let (width, height) = (image.width(), image.height());
    let too_large = |w: u32, h: u32| MemeError::ImageTooLarge {
        width: w,
        height: h,
        bytes: raw_bytes(w, h),
        max_dimension: spec.max_image_dimension,
        max_bytes: spec.max_image_bytes,
    };
    if width == 0 || height == 0 {
        return Err(MemeError::validation("image must be at least 1x1"));
    }

    let Some((w, h)) =
        reduced_dimensions(width, height, spec.max_image_dimension, spec.max_image_bytes)
    else {
        return Ok(Canvas::new(image.to_rgba8()));
    };
    if !spec.downscale_oversized {
        return Err(too_large(width, height));
    }
    if w.max(h) > spec.max_image_dimension || raw_bytes(w, h) > spec.max_image_bytes {
        return Err(too_large(w, h));
    }

    tracing::debug!(from_w = width, from_h = height, to_w = w, to_h = h, "downscaling input");
    let resized = image.resize_exact(w, h, FilterType::Lanczos3);
    Ok(Canvas::new(resized.into_rgba8()))
}

/// Draw `top` and `bottom` captions onto a copy of `image`.
///
/// The caller's image is never touched. Empty captions are skipped without resolving a font.
/// Captions that do not fit even at `min_size` are drawn best-effort at that size.
#[tracing::instrument(
    skip(image, top, bottom, spec),
    fields(width = image.width(), height = image.height())
)]
pub fn render(
    image: &DynamicImage,
    top: &str,
    bottom: &str,
    spec: &RenderSpec,
) -> MemeResult<RgbaImage> {
    spec.validate()?;
    let mut canvas = prepare_canvas(image, spec)?;

    let captions: Vec<(Anchor, String)> = [(Anchor::Top, top), (Anchor::Bottom, bottom)]
        .into_iter()
        .map(|(anchor, text)| (anchor, normalize_whitespace(text)))
        .filter(|(_, text)| !text.is_empty())
        .collect();
    if captions.is_empty() {
        return Ok(canvas.into_image());
    }

    let area = spec.caption_area(canvas.width(), canvas.height())?;
    let mut fonts = FontResolver::new(&spec.font)?;
    let compositor = StrokeCompositor::select(spec.stroke_mode, fonts.supports_native_stroke())?;
    tracing::debug!(
        font = fonts.source_label(),
        stroke = compositor.painter_name(),
        start_size = area.start_size,
        padding = area.padding,
        "render setup"
    );

    let params = spec.fit_params(&area);
    for (anchor, text) in &captions {
        let outcome = fit(text, &mut fonts, &params)?;
        let exhausted = outcome.is_exhausted();
        let mut block = outcome.into_block();
        let font = fonts.handle(block.size_px)?;
        if exhausted {
            tracing::warn!(
                ?anchor,
                size_px = block.size_px,
                width = block.block_width,
                height = block.block_height,
                "caption does not fit at minimum size; drawing best effort"
            );
            if spec.overflow == Overflow::Ellipsis {
                block = shrink_block(&block, font, area.max_width, area.max_height);
            }
        }
        compositor.draw(
            &mut canvas,
            &block,
            font,
            *anchor,
            area.padding,
            &spec.block_style(block.size_px),
        )?;
    }

    Ok(canvas.into_image())
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
