use super::*;
use crate::render::stroke::OffsetStroke;
use image::{Rgba, RgbaImage};

const BG: Rgba<u8> = Rgba([100, 100, 100, 255]);

fn block(lines: &[&str], font: &mut FontHandle) -> TextBlock {
    let lines = lines.iter().map(|s| s.to_string()).collect();
    TextBlock::from_lines("", lines, font, 1.1)
}

fn style(stroke_width: u32, shadow: Option<ShadowSpec>) -> BlockStyle {
    BlockStyle {
        stroke_width,
        stroke_color: Color::BLACK,
        fill_color: Color::WHITE,
        shadow,
    }
}

#[test]
fn lines_are_centered_and_stacked_from_the_top() {
    let mut font = FontHandle::builtin(8);
    let b = block(&["HI", "HI"], &mut font);
    let origins = StrokeCompositor::line_origins(40, 30, &b, Anchor::Top, 2);
    assert_eq!(origins, vec![(15, 2), (15, 11)]);
}

#[test]
fn bottom_anchor_puts_last_line_above_padding() {
    let mut font = FontHandle::builtin(8);
    let b = block(&["HI"], &mut font);
    let origins = StrokeCompositor::line_origins(40, 30, &b, Anchor::Bottom, 2);
    // 30 - 2 - 8.8 = 19.2
    assert_eq!(origins, vec![(15, 19)]);
}

#[test]
fn every_fill_pixel_is_surrounded_by_outline() {
    let mut canvas = Canvas::new(RgbaImage::from_pixel(60, 24, BG));
    let mut font = FontHandle::builtin(16);
    let b = block(&["MEME"], &mut font);
    let compositor = StrokeCompositor::new(Box::new(OffsetStroke));
    compositor
        .draw(&mut canvas, &b, &mut font, Anchor::Top, 2, &style(2, None))
        .unwrap();

    let img = canvas.as_image();
    let white = Rgba([255, 255, 255, 255]);
    let black = Rgba([0, 0, 0, 255]);
    let mut fills = 0;
    let mut strokes = 0;
    for (x, y, px) in img.enumerate_pixels() {
        if *px == black {
            strokes += 1;
        }
        if *px != white {
            continue;
        }
        fills += 1;
        for (dx, dy) in OffsetStroke::offsets(2) {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            if nx < 0 || ny < 0 || nx >= 60 || ny >= 24 {
                continue;
            }
            let n = *img.get_pixel(nx as u32, ny as u32);
            assert!(n == white || n == black, "({nx},{ny}) is {n:?}");
        }
    }
    assert!(fills > 0);
    assert!(strokes > 0);
}

#[test]
fn shadow_is_drawn_at_its_offset() {
    let mut canvas = Canvas::new(RgbaImage::from_pixel(20, 20, BG));
    let mut font = FontHandle::builtin(8);
    let b = block(&["."], &mut font);
    let shadow = ShadowSpec {
        dx: 3,
        dy: 3,
        color: Color::rgb(255, 0, 0),
    };
    StrokeCompositor::new(Box::new(OffsetStroke))
        .draw(&mut canvas, &b, &mut font, Anchor::Top, 0, &style(0, Some(shadow)))
        .unwrap();

    let img = canvas.as_image();
    assert_eq!(img.get_pixel(9, 5).0, [255, 255, 255, 255]);
    assert_eq!(img.get_pixel(12, 8).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(11, 7).0, BG.0);
}

#[test]
fn empty_lines_draw_nothing() {
    let mut canvas = Canvas::new(RgbaImage::from_pixel(20, 20, BG));
    let mut font = FontHandle::builtin(8);
    let b = block(&[""], &mut font);
    StrokeCompositor::new(Box::new(OffsetStroke))
        .draw(&mut canvas, &b, &mut font, Anchor::Top, 0, &style(2, None))
        .unwrap();
    assert!(canvas.as_image().pixels().all(|p| *p == BG));
}

#[test]
fn select_reports_chosen_strategy() {
    let c = StrokeCompositor::select(StrokeMode::Auto, false).unwrap();
    assert_eq!(c.painter_name(), "offset");
}
