//! Shape generation for 2D primitives
//!
//! All shapes are emitted as triangle lists in surface coordinates
//! (top-left origin, y down).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(pos: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate a dashed vertical line centered on `x`
///
/// `dash` on, `gap` off, starting with a dash at `top`. The last dash is
/// cut at `bottom`.
pub fn dashed_vline(
    x: f32,
    top: f32,
    bottom: f32,
    width: f32,
    dash: f32,
    gap: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut y = top;
    while y < bottom {
        let len = dash.min(bottom - y);
        vertices.extend(rect(
            Vec2::new(x - width / 2.0, y),
            Vec2::new(width, len),
            color,
        ));
        y += dash + gap;
    }
    vertices
}

/// Glyph grid size
pub const GLYPH_COLS: usize = 5;
pub const GLYPH_ROWS: usize = 7;

/// 5x7 bitmaps for the banner text, one row per byte (bit 4 = left column)
fn glyph(c: char) -> Option<[u8; GLYPH_ROWS]> {
    let rows = match c.to_ascii_uppercase() {
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        _ => return None,
    };
    Some(rows)
}

/// Width of `text` drawn with [`text`] at the given pixel scale
pub fn text_width(text: &str, scale: f32) -> f32 {
    let n = text.chars().count();
    if n == 0 {
        return 0.0;
    }
    // One blank column between glyphs
    (n * (GLYPH_COLS + 1) - 1) as f32 * scale
}

/// Generate block-letter text centered on `center`
///
/// Characters without a glyph render as spaces.
pub fn text(text: &str, center: Vec2, scale: f32, color: [f32; 4]) -> Vec<Vertex> {
    let origin = center
        - Vec2::new(
            text_width(text, scale) / 2.0,
            GLYPH_ROWS as f32 * scale / 2.0,
        );

    let mut vertices = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let Some(rows) = glyph(c) else {
            continue;
        };
        let left = origin.x + (i * (GLYPH_COLS + 1)) as f32 * scale;
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_COLS {
                if bits & (1 << (GLYPH_COLS - 1 - col)) != 0 {
                    let pos = Vec2::new(left + col as f32 * scale, origin.y + row as f32 * scale);
                    vertices.extend(rect(pos, Vec2::splat(scale), color));
                }
            }
        }
    }
    vertices
}
