use std::{path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};

/// Default starting font size in pixels.
pub const DEFAULT_FONT_SIZE: u32 = 48;

/// Largest pixel size a handle can be created at.
pub const MAX_FONT_SIZE: u32 = 2048;

/// Directory, relative to the asset root, holding fonts shipped alongside the binary.
pub const BUNDLED_FONT_DIR: &str = "assets/fonts";

const BUNDLED_FONT_FILES: &[&str] = &["Impact.ttf", "impact.ttf"];

const PLATFORM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/msttcorefonts/Impact.ttf",
    "/usr/share/fonts/truetype/impact/impact.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/Library/Fonts/Impact.ttf",
    "/System/Library/Fonts/Supplemental/Impact.ttf",
    "C:\\Windows\\Fonts\\impact.ttf",
];

/// One candidate place a font can be loaded from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSource {
    /// A font file on disk.
    Path(PathBuf),
    /// Font bytes already in memory, e.g. an asset embedded by the host application.
    #[serde(skip)]
    Bytes { label: String, data: Arc<[u8]> },
    /// The library's built-in bitmap face. Always loadable.
    Builtin,
}

impl FontSource {
    pub fn label(&self) -> String {
        match self {
            Self::Path(p) => format!("path:{}", p.display()),
            Self::Bytes { label, .. } => format!("bytes:{label}"),
            Self::Builtin => "builtin".to_string(),
        }
    }
}

/// Where to find the caption font and the size to start fitting at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Explicit font file, tried before every fallback.
    pub path: Option<PathBuf>,
    /// Starting pixel size.
    pub size: u32,
    /// Fallback sources, tried in order after `path`.
    pub fallbacks: Vec<FontSource>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            path: None,
            size: DEFAULT_FONT_SIZE,
            fallbacks: default_fallbacks(PathBuf::from(".")),
        }
    }
}

impl FontSpec {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Only the built-in face; fully deterministic across machines.
    pub fn builtin_only(size: u32) -> Self {
        Self {
            path: None,
            size,
            fallbacks: vec![FontSource::Builtin],
        }
    }

    /// Sources in resolution order: the explicit path first, then the fallbacks.
    pub fn tiers(&self) -> impl Iterator<Item = FontSource> + '_ {
        self.path
            .iter()
            .map(|p| FontSource::Path(p.clone()))
            .chain(self.fallbacks.iter().cloned())
    }
}

/// Bundled asset fonts under `asset_root`, then well-known platform fonts, then the built-in face.
pub fn default_fallbacks(asset_root: PathBuf) -> Vec<FontSource> {
    let bundled_dir = asset_root.join(BUNDLED_FONT_DIR);
    BUNDLED_FONT_FILES
        .iter()
        .map(|f| FontSource::Path(bundled_dir.join(f)))
        .chain(
            PLATFORM_FONT_PATHS
                .iter()
                .map(|p| FontSource::Path(PathBuf::from(p))),
        )
        .chain(std::iter::once(FontSource::Builtin))
        .collect()
}
