//! Built-in 5x7 bitmap face, the last-resort tier when no font file loads.
//!
//! Glyphs are scaled by an integer factor and painted as pixel-aligned rectangles, so output is
//! identical on every machine.

use crate::render::canvas::Canvas;

const GLYPH_W: u32 = 5;
const ADVANCE_COLS: u32 = GLYPH_W + 1;

// Rows top to bottom; bit 4 is the leftmost column. Covers 0x20..=0x60.
const ASCII_GLYPHS: [[u8; 7]; 65] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04], // !
    [0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00], // "
    [0x0A, 0x0A, 0x1F, 0x0A, 0x1F, 0x0A, 0x0A], // #
    [0x04, 0x0F, 0x14, 0x0E, 0x05, 0x1E, 0x04], // $
    [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03], // %
    [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D], // &
    [0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00], // '
    [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02], // (
    [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08], // )
    [0x00, 0x04, 0x15, 0x0E, 0x15, 0x04, 0x00], // *
    [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00], // +
    [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08], // ,
    [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00], // -
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C], // .
    [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00], // /
    [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E], // 0
    [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E], // 1
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F], // 2
    [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E], // 3
    [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02], // 4
    [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E], // 5
    [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E], // 6
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // 7
    [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E], // 8
    [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C], // 9
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00], // :
    [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x04, 0x08], // ;
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // <
    [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00], // =
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // >
    [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // ?
    [0x0E, 0x11, 0x01, 0x0D, 0x15, 0x15, 0x0E], // @
    [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11], // A
    [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E], // B
    [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E], // C
    [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C], // D
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F], // E
    [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10], // F
    [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F], // G
    [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11], // H
    [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E], // I
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C], // J
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // K
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F], // L
    [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11], // M
    [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11], // N
    [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // O
    [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10], // P
    [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D], // Q
    [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11], // R
    [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E], // S
    [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // T
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E], // U
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04], // V
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A], // W
    [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11], // X
    [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04], // Y
    [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F], // Z
    [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E], // [
    [0x00, 0x10, 0x08, 0x04, 0x02, 0x01, 0x00], // \
    [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E], // ]
    [0x04, 0x0A, 0x11, 0x00, 0x00, 0x00, 0x00], // ^
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F], // _
    [0x08, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00], // `
];

const BRACE_OPEN: [u8; 7] = [0x02, 0x04, 0x04, 0x08, 0x04, 0x04, 0x02];
const BAR: [u8; 7] = [0x04, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04];
const BRACE_CLOSE: [u8; 7] = [0x08, 0x04, 0x04, 0x02, 0x04, 0x04, 0x08];
const TILDE: [u8; 7] = [0x00, 0x00, 0x08, 0x15, 0x02, 0x00, 0x00];
const MISSING: [u8; 7] = [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F];

fn fold(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'Á' | 'À' | 'Â' | 'Ä' | 'Ã' => 'A',
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' | 'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
        'ú' | 'ù' | 'û' | 'ü' | 'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ñ' | 'Ñ' => 'N',
        'ç' | 'Ç' => 'C',
        '¿' => '?',
        '¡' => '!',
        '\t' => ' ',
        c => c.to_ascii_uppercase(),
    }
}

fn glyph(ch: char) -> &'static [u8; 7] {
    match fold(ch) {
        c @ ' '..='`' => &ASCII_GLYPHS[(c as u32 - 0x20) as usize],
        '{' => &BRACE_OPEN,
        '|' => &BAR,
        '}' => &BRACE_CLOSE,
        '~' => &TILDE,
        _ => &MISSING,
    }
}

/// The built-in face bound to one pixel size.
#[derive(Clone, Debug)]
pub(crate) struct BuiltinText {
    size_px: u32,
    scale: u32,
}

impl BuiltinText {
    pub(crate) fn new(size_px: u32) -> Self {
        Self {
            size_px,
            scale: (size_px / 8).max(1),
        }
    }

    pub(crate) fn size_px(&self) -> u32 {
        self.size_px
    }

    pub(crate) fn scale(&self) -> u32 {
        self.scale
    }

    pub(crate) fn advance(&self) -> u32 {
        ADVANCE_COLS.saturating_mul(self.scale())
    }

    pub(crate) fn measure(&self, text: &str) -> f32 {
        let n = text.chars().count() as u64;
        if n == 0 {
            return 0.0;
        }
        (n * u64::from(self.advance()) - u64::from(self.scale)) as f32
    }

    pub(crate) fn fill_text(&self, canvas: &mut Canvas, text: &str, x: i64, y: i64, premul: [u8; 4]) {
        let s = i64::from(self.scale);
        let mut pen_x = x;
        for ch in text.chars() {
            for (row, bits) in glyph(ch).iter().enumerate() {
                if *bits == 0 {
                    continue;
                }
                let py = y + row as i64 * s;
                // Paint each horizontal run of lit cells as one rectangle.
                let mut col = 0u32;
                while col < GLYPH_W {
                    if bits & (0x10 >> col) == 0 {
                        col += 1;
                        continue;
                    }
                    let start = col;
                    while col < GLYPH_W && bits & (0x10 >> col) != 0 {
                        col += 1;
                    }
                    canvas.fill_rect(
                        pen_x + i64::from(start) * s,
                        py,
                        (col - start).saturating_mul(self.scale),
                        self.scale,
                        premul,
                    );
                }
            }
            pen_x += i64::from(self.advance());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fonts/builtin.rs"]
mod tests;
