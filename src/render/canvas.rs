use image::RgbaImage;

use crate::foundation::{
    error::{MemeError, MemeResult},
    math::over_straight,
};

/// RGBA8 working buffer a render draws captions onto.
///
/// Pixels are stored straight (non-premultiplied) so the result can be handed back as an
/// [`RgbaImage`] without conversion; incoming paint is premultiplied and blended source-over.
#[derive(Clone, Debug)]
pub struct Canvas {
    img: RgbaImage,
}

impl Canvas {
    pub fn new(img: RgbaImage) -> Self {
        Self { img }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.img
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// Blend a premultiplied color over an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, premul: [u8; 4]) {
        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return;
        };
        for py in y0..y1 {
            for px in x0..x1 {
                let dst = self.img.get_pixel_mut(px, py);
                dst.0 = over_straight(dst.0, premul);
            }
        }
    }

    /// Blend a tightly packed premultiplied RGBA8 patch with its top-left corner at `(x, y)`.
    pub fn composite_premul(
        &mut self,
        x: i64,
        y: i64,
        w: u32,
        h: u32,
        src: &[u8],
    ) -> MemeResult<()> {
        let expected = (w as usize)
            .checked_mul(h as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| MemeError::render("patch size overflow"))?;
        if src.len() != expected {
            return Err(MemeError::render(
                "composite_premul expects a buffer matching w*h*4",
            ));
        }

        let Some((x0, y0, x1, y1)) = self.clip(x, y, w, h) else {
            return Ok(());
        };
        for py in y0..y1 {
            let sy = (i64::from(py) - y) as usize;
            for px in x0..x1 {
                let sx = (i64::from(px) - x) as usize;
                let idx = (sy * w as usize + sx) * 4;
                let s = [src[idx], src[idx + 1], src[idx + 2], src[idx + 3]];
                if s[3] == 0 {
                    continue;
                }
                let dst = self.img.get_pixel_mut(px, py);
                dst.0 = over_straight(dst.0, s);
            }
        }
        Ok(())
    }

    fn clip(&self, x: i64, y: i64, w: u32, h: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(w)).min(i64::from(self.width()));
        let y1 = (y + i64::from(h)).min(i64::from(self.height()));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
