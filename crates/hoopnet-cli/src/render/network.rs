//! Node-link drawing of the assist graph.
//!
//! Positions come from a seeded Fruchterman-Reingold spring layout, so the
//! same graph and seed always produce the same picture. Edge stroke width is
//! `0.6 + 0.6 * assists` points; arrowheads mark the receiver.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use hoopnet_core::Result;
use hoopnet_metrics::AssistGraph;
use image::{Rgb, RgbImage};
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use super::canvas::Canvas;
use super::font::GLYPH_HEIGHT;
use super::{BACKGROUND, INK, check_dimensions, text_scale};

const NODE_FILL: Rgb<u8> = Rgb([31, 119, 180]);
const EDGE_COLOR: Rgb<u8> = Rgb([70, 70, 70]);

/// Figure height in points the pixel sizes are derived from.
const FIGURE_POINTS: f64 = 504.0;
/// Node radius in points.
const NODE_RADIUS_PT: f64 = 16.5;
const ARROW_LENGTH_PT: f64 = 7.0;

/// Stroke width in points for an edge carrying `assists`.
#[must_use]
pub fn edge_width_pt(assists: u32) -> f64 {
    0.6 + 0.6 * f64::from(assists)
}

/// Layout and drawing parameters.
#[derive(Debug, Clone, Copy)]
pub struct NetworkStyle {
    pub width: u32,
    pub height: u32,
    pub seed: u64,
    pub iterations: usize,
}

/// Fruchterman-Reingold layout, indexed by node index and rescaled so the
/// largest coordinate magnitude is 1.
///
/// Attraction uses the summed weight of both directions between two
/// players; repulsion acts between every pair.
#[must_use]
pub fn spring_layout(g: &AssistGraph, seed: u64, iterations: usize) -> Vec<[f64; 2]> {
    let n = g.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![[0.0, 0.0]],
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<[f64; 2]> = (0..n)
        .map(|_| [rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
        .collect();

    let mut attraction = vec![vec![0.0_f64; n]; n];
    for edge in g.graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        if a != b {
            let w = f64::from(*edge.weight());
            attraction[a][b] += w;
            attraction[b][a] += w;
        }
    }

    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1 * spread(&pos).max(f64::EPSILON);
    let cooling = temperature / (iterations as f64 + 1.0);

    for _ in 0..iterations {
        let mut displacement = vec![[0.0_f64; 2]; n];
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = [pos[i][0] - pos[j][0], pos[i][1] - pos[j][1]];
                let distance = delta[0].hypot(delta[1]).max(0.01);
                let force = k * k / (distance * distance) - attraction[i][j] * distance / k;
                displacement[i][0] += delta[0] * force;
                displacement[i][1] += delta[1] * force;
            }
        }
        for (p, d) in pos.iter_mut().zip(&displacement) {
            let length = d[0].hypot(d[1]).max(0.01);
            p[0] += d[0] * temperature / length;
            p[1] += d[1] * temperature / length;
        }
        temperature -= cooling;
    }

    rescale(&mut pos);
    pos
}

/// Largest extent of the point cloud along either axis.
fn spread(pos: &[[f64; 2]]) -> f64 {
    let extent = |axis: usize| {
        let (lo, hi) = pos.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[axis]), hi.max(p[axis]))
        });
        hi - lo
    };
    extent(0).max(extent(1))
}

/// Center on the mean and scale into `[-1, 1]`.
fn rescale(pos: &mut [[f64; 2]]) {
    let n = pos.len() as f64;
    let mean = pos
        .iter()
        .fold([0.0, 0.0], |acc, p| [acc[0] + p[0] / n, acc[1] + p[1] / n]);
    let mut lim = 0.0_f64;
    for p in pos.iter_mut() {
        p[0] -= mean[0];
        p[1] -= mean[1];
        lim = lim.max(p[0].abs()).max(p[1].abs());
    }
    if lim > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= lim;
            p[1] /= lim;
        }
    }
}

/// Render the assist graph as a `style.width` x `style.height` image.
///
/// # Errors
///
/// Returns [`hoopnet_core::Error::Render`] if the dimensions are too small.
#[instrument(skip(g, title), fields(nodes = g.node_count(), edges = g.edge_count()))]
pub fn render_network(g: &AssistGraph, title: &str, style: NetworkStyle) -> Result<RgbImage> {
    check_dimensions(style.width, style.height)?;

    let scale = text_scale(style.width, style.height);
    let px_per_pt = f64::from(style.width.min(style.height)) / FIGURE_POINTS;
    let pad = f64::from(8 * scale);
    let line = f64::from(GLYPH_HEIGHT * scale);
    let radius = NODE_RADIUS_PT * px_per_pt;

    let mut canvas = Canvas::new(style.width, style.height, BACKGROUND);
    canvas.draw_text_centered(
        i64::from(style.width) / 2,
        pad as i64,
        title,
        scale,
        INK,
    );

    let layout = spring_layout(g, style.seed, style.iterations);

    // Drawing area below the title, leaving room for the outermost nodes
    // and their labels.
    let top = pad + line + 2.0 * pad + radius;
    let bottom = f64::from(style.height) - pad - line - pad - radius;
    let left = pad + radius * 2.0;
    let right = f64::from(style.width) - pad - radius * 2.0;
    let (cx, cy) = ((left + right) / 2.0, (top + bottom) / 2.0);
    let (half_w, half_h) = (((right - left) / 2.0).max(0.0), ((bottom - top) / 2.0).max(0.0));
    let screen: Vec<(f64, f64)> = layout
        .iter()
        .map(|p| (cx + p[0] * half_w, cy - p[1] * half_h))
        .collect();

    for edge in g.graph.edge_references() {
        let (a, b) = (edge.source(), edge.target());
        let width = edge_width_pt(*edge.weight()) * px_per_pt;
        let from = screen[a.index()];
        if a == b {
            // Self-pass: a ring sitting on top of the node.
            canvas.stroke_circle(from.0, from.1 - radius, radius * 0.6, width, EDGE_COLOR);
            continue;
        }
        let reciprocal = g.graph.find_edge(b, a).is_some();
        draw_arrow(
            &mut canvas,
            from,
            screen[b.index()],
            radius,
            width,
            reciprocal,
            px_per_pt,
        );
    }

    for (idx, &(x, y)) in g.graph.node_indices().zip(&screen) {
        canvas.fill_circle(x, y, radius, NODE_FILL);
        canvas.draw_text_centered(
            x as i64,
            (y + radius + pad / 2.0) as i64,
            &g.graph[idx],
            scale,
            INK,
        );
    }

    debug!(radius, px_per_pt, "network laid out");
    Ok(canvas.into_image())
}

/// Directed edge from boundary to boundary with a filled arrowhead.
///
/// Reciprocal edges are nudged to their own right-hand side so both
/// directions stay visible.
fn draw_arrow(
    canvas: &mut Canvas,
    from: (f64, f64),
    to: (f64, f64),
    radius: f64,
    width: f64,
    reciprocal: bool,
    px_per_pt: f64,
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = dx.hypot(dy);
    if len <= 2.0 * radius {
        return;
    }
    let (ux, uy) = (dx / len, dy / len);
    // Right-hand normal in image coordinates (y grows downward).
    let (nx, ny) = (-uy, ux);
    let offset = if reciprocal { width / 2.0 + radius * 0.2 } else { 0.0 };

    let start = (
        from.0 + ux * radius + nx * offset,
        from.1 + uy * radius + ny * offset,
    );
    let tip = (to.0 - ux * radius + nx * offset, to.1 - uy * radius + ny * offset);

    let head_len = (ARROW_LENGTH_PT * px_per_pt).max(width * 2.0);
    let head_half = head_len * 0.45;
    let base = (tip.0 - ux * head_len, tip.1 - uy * head_len);

    canvas.draw_line(start, base, width, EDGE_COLOR);
    canvas.fill_triangle(
        [
            tip,
            (base.0 + nx * head_half, base.1 + ny * head_half),
            (base.0 - nx * head_half, base.1 - ny * head_half),
        ],
        EDGE_COLOR,
    );
}
