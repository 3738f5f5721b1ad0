#![forbid(unsafe_code)]
//! Meme caption compositing: fit, wrap, outline and center two captions on an image.
//!
//! The entry point is [`render`]. It never touches the caller's image, performs no I/O beyond
//! reading font files named in [`FontSpec`], and shares no state between calls.

mod config;
mod fonts;
mod foundation;
mod layout;
mod render;

pub use config::render_spec::{
    DEFAULT_BLOCK_HEIGHT_RATIO, DEFAULT_MAX_IMAGE_BYTES, DEFAULT_MAX_IMAGE_DIMENSION,
    DEFAULT_PADDING, DEFAULT_STROKE_WIDTH, MAX_IMAGE_DIMENSION_LIMIT, MAX_STROKE_WIDTH,
    MIN_RELATIVE_PADDING, CaptionArea, RenderSpec,
};
pub use fonts::{
    handle::FontHandle,
    resolver::FontResolver,
    source::{DEFAULT_FONT_SIZE, FontSource, FontSpec, MAX_FONT_SIZE, default_fallbacks},
};
pub use foundation::{
    core::{Anchor, Color},
    error::{MemeError, MemeResult},
};
pub use layout::{
    fit::{
        DEFAULT_LINE_SPACING, DEFAULT_MIN_SIZE, DEFAULT_SIZE_STEP, FitOutcome, FitParams,
        TextBlock, fit,
    },
    overflow::{Overflow, shrink_block, truncate_line},
    wrap::{normalize_whitespace, wrap},
};
pub use render::{
    batch::{BatchJob, render_batch},
    canvas::Canvas,
    compositor::{BlockStyle, ShadowSpec, StrokeCompositor},
    renderer::{fit_dimensions, prepare_canvas, reduced_dimensions, render},
    stroke::{NativeStroke, OffsetStroke, StrokeMode, StrokePainter, select_stroke_painter},
};
