//! Color-mapped grid of the from × to assist matrix.
//!
//! ```text
//!              title
//!          ┌──┬──┬──┐   ┌─┐ max
//!   passer │  │  │  │   │ │  A
//!   passer │  │  │  │   │ │  S
//!          └──┴──┴──┘   └─┘ 0
//!           r  r  r
//!           e  e  e
//! ```
//!
//! Row labels sit left of the grid, column labels are stacked one character
//! per line under their column.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use hoopnet_core::Result;
use hoopnet_metrics::WeightMatrix;
use image::RgbImage;
use tracing::{debug, instrument};

use super::canvas::Canvas;
use super::colormap::{contrast_text, viridis};
use super::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use super::{BACKGROUND, INK, check_dimensions, text_scale};

const COLORBAR_CAPTION: &str = "assists";

/// Render `matrix` as a `width` x `height` heatmap.
///
/// # Errors
///
/// Returns [`hoopnet_core::Error::Render`] if the dimensions are too small.
#[instrument(skip(matrix), fields(rows = matrix.sources.len(), cols = matrix.targets.len()))]
pub fn render_heatmap(
    matrix: &WeightMatrix,
    title: &str,
    width: u32,
    height: u32,
) -> Result<RgbImage> {
    check_dimensions(width, height)?;

    let scale = text_scale(width, height);
    let pad = i64::from(8 * scale);
    let line = i64::from(GLYPH_HEIGHT * scale);
    let mut canvas = Canvas::new(width, height, BACKGROUND);

    canvas.draw_text_centered(i64::from(width) / 2, pad, title, scale, INK);

    if matrix.is_empty() {
        canvas.draw_text_centered(
            i64::from(width) / 2,
            i64::from(height) / 2,
            "no assists recorded",
            scale,
            INK,
        );
        return Ok(canvas.into_image());
    }

    let row_label_w = matrix
        .sources
        .iter()
        .map(|s| i64::from(font::text_width(s, scale)))
        .max()
        .unwrap_or(0);
    let col_label_h = matrix
        .targets
        .iter()
        .map(|t| i64::from(font::stacked_height(t, scale)))
        .max()
        .unwrap_or(0);

    let max = matrix.max();
    let max_label = max.to_string();
    let bar_w = i64::from(12 * scale);
    let bar_label_w = i64::from(font::text_width(&max_label, scale))
        .max(i64::from(font::text_width("0", scale)))
        .max(i64::from(GLYPH_WIDTH * scale));

    let grid_left = pad + row_label_w + pad;
    let grid_top = pad + line + 2 * pad;
    let grid_right = i64::from(width) - pad - bar_label_w - pad - bar_w - 2 * pad;
    let grid_bottom = i64::from(height) - pad - col_label_h - pad;

    let ncols = matrix.targets.len() as i64;
    let nrows = matrix.sources.len() as i64;
    let cell_w = ((grid_right - grid_left) / ncols).max(1);
    let cell_h = ((grid_bottom - grid_top) / nrows).max(1);

    for (r, (source, row)) in matrix.sources.iter().zip(&matrix.cells).enumerate() {
        let y = grid_top + r as i64 * cell_h;
        for (c, &value) in row.iter().enumerate() {
            let x = grid_left + c as i64 * cell_w;
            let color = viridis(normalized(value, max));
            canvas.fill_rect(x, y, cell_w as u32, cell_h as u32, color);

            let label = value.to_string();
            let label_w = i64::from(font::text_width(&label, scale));
            if label_w + 4 < cell_w && line + 4 < cell_h {
                canvas.draw_text(
                    x + (cell_w - label_w) / 2,
                    y + (cell_h - line) / 2,
                    &label,
                    scale,
                    contrast_text(color),
                );
            }
        }

        let label_w = i64::from(font::text_width(source, scale));
        canvas.draw_text(
            grid_left - pad - label_w,
            y + (cell_h - line) / 2,
            source,
            scale,
            INK,
        );
    }

    let grid_w = cell_w * ncols;
    let grid_h = cell_h * nrows;
    canvas.stroke_rect(grid_left, grid_top, grid_w as u32, grid_h as u32, INK);

    for (c, target) in matrix.targets.iter().enumerate() {
        let cx = grid_left + c as i64 * cell_w + cell_w / 2;
        canvas.draw_text_stacked(cx, grid_top + grid_h + pad, target, scale, INK);
    }

    // Colorbar: 0 at the bottom, max at the top.
    let bar_left = grid_left + grid_w + 2 * pad;
    for dy in 0..grid_h {
        let t = 1.0 - dy as f64 / (grid_h - 1).max(1) as f64;
        canvas.fill_rect(bar_left, grid_top + dy, bar_w as u32, 1, viridis(t));
    }
    canvas.stroke_rect(bar_left, grid_top, bar_w as u32, grid_h as u32, INK);

    let tick_x = bar_left + bar_w + pad;
    canvas.draw_text(tick_x, grid_top, &max_label, scale, INK);
    canvas.draw_text(tick_x, grid_top + grid_h - line, "0", scale, INK);

    let caption_h = i64::from(font::stacked_height(COLORBAR_CAPTION, scale));
    let caption_x = tick_x + i64::from(GLYPH_WIDTH * scale) / 2;
    canvas.draw_text_stacked(
        caption_x,
        grid_top + (grid_h - caption_h) / 2,
        COLORBAR_CAPTION,
        scale,
        INK,
    );

    debug!(cell_w, cell_h, max, "heatmap laid out");
    Ok(canvas.into_image())
}

/// Cell value scaled to `[0, 1]` against the matrix maximum.
fn normalized(value: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        f64::from(value) / f64::from(max)
    }
}
