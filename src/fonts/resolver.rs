use std::{collections::BTreeMap, sync::Arc};

use anyhow::Context as _;

use crate::{
    fonts::{
        handle::FontHandle,
        outline::{OutlineFace, OutlineText},
        source::{FontSource, FontSpec, MAX_FONT_SIZE},
    },
    foundation::error::{MemeError, MemeResult},
};

#[derive(Clone, Debug)]
enum ResolvedFace {
    Outline(OutlineFace),
    Builtin,
}

/// Resolves a [`FontSpec`] once and hands out per-size [`FontHandle`]s.
///
/// Handles are cached by pixel size for the lifetime of the resolver, which is scoped to a single
/// render; nothing is shared between renders.
#[derive(Debug)]
pub struct FontResolver {
    face: ResolvedFace,
    handles: BTreeMap<u32, FontHandle>,
}

impl FontResolver {
    /// Walk the tiers of `spec` in order and keep the first one that loads.
    #[tracing::instrument(skip(spec), fields(size = spec.size))]
    pub fn new(spec: &FontSpec) -> MemeResult<Self> {
        let mut tried = Vec::new();
        for source in spec.tiers() {
            let label = source.label();
            match load_source(&source, &label) {
                Ok(face) => {
                    tracing::debug!(font = %label, "font resolved");
                    return Ok(Self {
                        face,
                        handles: BTreeMap::new(),
                    });
                }
                Err(err) => {
                    tracing::debug!(font = %label, error = %err, "font tier unavailable");
                    tried.push(label);
                }
            }
        }
        Err(MemeError::FontUnavailable { tried })
    }

    /// One-shot resolution: the first loadable tier of `spec`, bound to `size_px`.
    pub fn resolve(spec: &FontSpec, size_px: u32) -> MemeResult<FontHandle> {
        let mut resolver = Self::new(spec)?;
        resolver.handle(size_px)?;
        resolver
            .handles
            .remove(&size_px)
            .ok_or_else(|| MemeError::render("font handle missing after creation"))
    }

    /// Label of the tier that resolved.
    pub fn source_label(&self) -> &str {
        match &self.face {
            ResolvedFace::Outline(f) => &f.label,
            ResolvedFace::Builtin => "builtin",
        }
    }

    /// Family name reported by the font, for outline faces.
    pub fn family_name(&self) -> Option<&str> {
        match &self.face {
            ResolvedFace::Outline(f) => Some(&f.family_name),
            ResolvedFace::Builtin => None,
        }
    }

    /// Raw bytes of the resolved font file, for outline faces.
    pub fn font_bytes(&self) -> Option<&[u8]> {
        match &self.face {
            ResolvedFace::Outline(f) => Some(&f.bytes),
            ResolvedFace::Builtin => None,
        }
    }

    pub fn supports_native_stroke(&self) -> bool {
        matches!(self.face, ResolvedFace::Outline(_))
    }

    /// Number of distinct sizes materialized so far.
    pub fn cached_sizes(&self) -> usize {
        self.handles.len()
    }

    /// The handle for `size_px`, creating and caching it on first use.
    pub fn handle(&mut self, size_px: u32) -> MemeResult<&mut FontHandle> {
        if size_px == 0 || size_px > MAX_FONT_SIZE {
            return Err(MemeError::validation(format!(
                "font size must be in [1, {MAX_FONT_SIZE}], got {size_px}"
            )));
        }
        if !self.handles.contains_key(&size_px) {
            let handle = match &self.face {
                ResolvedFace::Outline(face) => {
                    FontHandle::outline(face.label.clone(), OutlineText::new(face, size_px)?)
                }
                ResolvedFace::Builtin => FontHandle::builtin(size_px),
            };
            self.handles.insert(size_px, handle);
        }
        self.handles
            .get_mut(&size_px)
            .ok_or_else(|| MemeError::render("font handle missing after creation"))
    }
}

fn load_source(source: &FontSource, label: &str) -> MemeResult<ResolvedFace> {
    match source {
        FontSource::Path(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font '{}'", path.display()))?;
            let face = OutlineFace::load(label.to_string(), Arc::from(bytes))?;
            Ok(ResolvedFace::Outline(face))
        }
        FontSource::Bytes { data, .. } => {
            let face = OutlineFace::load(label.to_string(), data.clone())?;
            Ok(ResolvedFace::Outline(face))
        }
        FontSource::Builtin => Ok(ResolvedFace::Builtin),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/resolver.rs"]
mod tests;
