//! Minimal raster drawing on top of `image::RgbImage`.
//!
//! Coordinates are signed so shapes may hang off the edge; anything outside
//! the image is clipped.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use image::{Rgb, RgbImage};

use super::font::{self, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, LINE_ADVANCE};

pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    /// A `width` x `height` canvas filled with `background`.
    #[must_use]
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Pixel at (`x`, `y`), or `None` outside the image.
    #[must_use]
    pub fn get(&self, x: i64, y: i64) -> Option<Rgb<u8>> {
        self.in_bounds(x, y)
            .then(|| *self.img.get_pixel(x as u32, y as u32))
    }

    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if self.in_bounds(x, y) {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb<u8>) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(w)).min(i64::from(self.width()));
        let y1 = (y + i64::from(h)).min(i64::from(self.height()));
        for py in y0..y1 {
            for px in x0..x1 {
                self.img.put_pixel(px as u32, py as u32, color);
            }
        }
    }

    /// One-pixel outline.
    pub fn stroke_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb<u8>) {
        if w == 0 || h == 0 {
            return;
        }
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y + i64::from(h) - 1, w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x + i64::from(w) - 1, y, 1, h, color);
    }

    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb<u8>) {
        self.for_each_in_box(cx - r, cy - r, cx + r, cy + r, |px, py| {
            let (dx, dy) = (px - cx, py - cy);
            dx * dx + dy * dy <= r * r
        }, color);
    }

    /// Circle outline of the given stroke `width`.
    pub fn stroke_circle(&mut self, cx: f64, cy: f64, r: f64, width: f64, color: Rgb<u8>) {
        let half = width / 2.0;
        let outer = r + half;
        self.for_each_in_box(cx - outer, cy - outer, cx + outer, cy + outer, |px, py| {
            let d = (px - cx).hypot(py - cy);
            (d - r).abs() <= half
        }, color);
    }

    /// Straight segment of the given stroke `width` with round caps.
    pub fn draw_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgb<u8>) {
        let half = (width / 2.0).max(0.5);
        let (x0, y0) = from;
        let (x1, y1) = to;
        let (dx, dy) = (x1 - x0, y1 - y0);
        let len_sq = dx * dx + dy * dy;

        self.for_each_in_box(
            x0.min(x1) - half,
            y0.min(y1) - half,
            x0.max(x1) + half,
            y0.max(y1) + half,
            |px, py| {
                let t = if len_sq == 0.0 {
                    0.0
                } else {
                    (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
                };
                let (qx, qy) = (x0 + t * dx, y0 + t * dy);
                (px - qx).hypot(py - qy) <= half
            },
            color,
        );
    }

    pub fn fill_triangle(&mut self, pts: [(f64, f64); 3], color: Rgb<u8>) {
        let [a, b, c] = pts;
        let edge = |p: (f64, f64), q: (f64, f64), x: f64, y: f64| {
            (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
        };
        let area = edge(a, b, c.0, c.1);
        if area == 0.0 {
            return;
        }
        let min_x = a.0.min(b.0).min(c.0);
        let min_y = a.1.min(b.1).min(c.1);
        let max_x = a.0.max(b.0).max(c.0);
        let max_y = a.1.max(b.1).max(c.1);
        self.for_each_in_box(min_x, min_y, max_x, max_y, |x, y| {
            let w0 = edge(b, c, x, y) * area;
            let w1 = edge(c, a, x, y) * area;
            let w2 = edge(a, b, x, y) * area;
            w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
        }, color);
    }

    /// Draw `text` left to right with its top-left corner at (`x`, `y`).
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let mut origin = x;
        for c in text.chars() {
            self.draw_glyph(origin, y, c, scale, color);
            origin += i64::from(GLYPH_ADVANCE * scale);
        }
    }

    /// Draw `text` centered horizontally on `cx`.
    pub fn draw_text_centered(&mut self, cx: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let w = i64::from(font::text_width(text, scale));
        self.draw_text(cx - w / 2, y, text, scale, color);
    }

    /// Draw `text` one character per line, each centered on `cx`.
    pub fn draw_text_stacked(&mut self, cx: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let mut top = y;
        for c in text.chars() {
            let left = cx - i64::from(GLYPH_WIDTH * scale) / 2;
            self.draw_glyph(left, top, c, scale, color);
            top += i64::from(LINE_ADVANCE * scale);
        }
    }

    #[must_use]
    pub fn into_image(self) -> RgbImage {
        self.img
    }

    fn draw_glyph(&mut self, x: i64, y: i64, c: char, scale: u32, color: Rgb<u8>) {
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if font::pixel(c, col, row) {
                    self.fill_rect(
                        x + i64::from(col * scale),
                        y + i64::from(row * scale),
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }

    /// Paint every pixel in the box whose center satisfies `inside`.
    fn for_each_in_box(
        &mut self,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        inside: impl Fn(f64, f64) -> bool,
        color: Rgb<u8>,
    ) {
        if !(min_x.is_finite() && min_y.is_finite() && max_x.is_finite() && max_y.is_finite()) {
            return;
        }
        let x0 = (min_x.floor() as i64).max(0);
        let y0 = (min_y.floor() as i64).max(0);
        let x1 = (max_x.ceil() as i64).min(i64::from(self.width()) - 1);
        let y1 = (max_y.ceil() as i64).min(i64::from(self.height()) - 1);
        for py in y0..=y1 {
            for px in x0..=x1 {
                if inside(px as f64 + 0.5, py as f64 + 0.5) {
                    self.img.put_pixel(px as u32, py as u32, color);
                }
            }
        }
    }

    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width()) && y < i64::from(self.height())
    }
}
