use serde::{Deserialize, Serialize};

use crate::{fonts::handle::FontHandle, layout::fit::TextBlock};

/// What to do with a caption that still overflows at the minimum size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Overflow {
    /// Draw the best-effort block as wrapped, even if it spills past the usable area.
    Allow,
    /// Truncate with an ellipsis until the block fits.
    #[default]
    Ellipsis,
}

/// Longest prefix of `line` that fits in `max_width` once the face's ellipsis is appended.
///
/// Lines that already fit are returned unchanged. If not even one character fits, the bare
/// ellipsis is returned.
pub fn truncate_line(line: &str, font: &mut FontHandle, max_width: f32) -> String {
    if font.measure(line) <= max_width {
        return line.to_string();
    }

    let ellipsis = font.ellipsis();
    let chars: Vec<char> = line.chars().collect();
    let mut lo = 0usize;
    let mut hi = chars.len();
    let mut best = None;
    while lo <= hi {
        let mid = (lo + hi) / 2;
        let prefix: String = chars[..mid].iter().collect();
        let candidate = format!("{}{ellipsis}", prefix.trim_end());
        if font.measure(&candidate) <= max_width {
            best = Some(candidate);
            lo = mid + 1;
        } else if mid == 0 {
            break;
        } else {
            hi = mid - 1;
        }
    }
    best.unwrap_or_else(|| ellipsis.to_string())
}

/// Merge trailing lines until the block fits `max_height`, then truncate every line to `max_width`.
///
/// Merging works on the wrapped source lines, so each output line carries at most one ellipsis,
/// at its end.
pub fn shrink_block(
    block: &TextBlock,
    font: &mut FontHandle,
    max_width: f32,
    max_height: f32,
) -> TextBlock {
    let line_spacing = block.line_height / block.size_px as f32;
    let mut sources = block.lines.clone();
    while block.line_height * sources.len() as f32 > max_height && sources.len() > 1 {
        let last = sources.pop().unwrap_or_default();
        let prev = sources.pop().unwrap_or_default();
        sources.push(format!("{prev} {last}").trim().to_string());
    }

    let lines = sources
        .iter()
        .map(|l| truncate_line(l, font, max_width))
        .collect();
    TextBlock::from_lines(&block.raw, lines, font, line_spacing)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/overflow.rs"]
mod tests;
