use super::font::{self, Sprite, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::gui::layout::Rect;

/// 8-bit RGB color.
pub type Rgb = [u8; 3];

/// Corner of a quad.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vertex {
    /// Position in window pixels.
    pos: [f32; 2],
    /// Atlas coordinates; ignored unless `textured` is set.
    uv: [f32; 2],
    color: [f32; 4],
    /// `1.0` to multiply alpha by the atlas, `0.0` for a flat fill.
    textured: f32,
}
glium::implement_vertex!(Vertex, pos, uv, color, textured);

/// List of quads to draw in one call, back to front.
#[derive(Debug, Default, Clone)]
pub struct Batch {
    vertices: Vec<Vertex>,
}
impl Batch {
    /// Returns an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the vertices, six per quad.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
    /// Returns the number of quads in the batch.
    pub fn len(&self) -> usize {
        self.vertices.len() / 6
    }
    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn push_quad(&mut self, [x0, y0, x1, y1]: [f32; 4], uv: Option<[f32; 4]>, rgb: Rgb) {
        let color = [
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
            1.0,
        ];
        let textured = if uv.is_some() { 1.0 } else { 0.0 };
        let [u0, v0, u1, v1] = uv.unwrap_or_default();
        let corner = |pos, uv| Vertex {
            pos,
            uv,
            color,
            textured,
        };
        let tl = corner([x0, y0], [u0, v0]);
        let tr = corner([x1, y0], [u1, v0]);
        let bl = corner([x0, y1], [u0, v1]);
        let br = corner([x1, y1], [u1, v1]);
        self.vertices.extend_from_slice(&[tl, tr, bl, bl, tr, br]);
    }

    /// Fills a rectangle with a flat color.
    pub fn push_rect(&mut self, r: Rect, rgb: Rgb) {
        let [x, y, w, h] = [r.x, r.y, r.w, r.h].map(|n| n as f32);
        self.push_quad([x, y, x + w, y + h], None, rgb);
    }
    /// Draws a 1 pixel border just inside a rectangle.
    pub fn push_border(&mut self, r: Rect, rgb: Rgb) {
        self.push_rect(Rect::new(r.x, r.y, r.w, 1), rgb);
        self.push_rect(Rect::new(r.x, r.y, 1, r.h), rgb);
        self.push_rect(Rect::new(r.x, r.y + r.h - 1, r.w, 1), rgb);
        self.push_rect(Rect::new(r.x + r.w - 1, r.y, 1, r.h), rgb);
    }
    /// Draws a sprite stretched over a rectangle.
    pub fn push_sprite(&mut self, r: Rect, sprite: Sprite, rgb: Rgb) {
        let [x, y, w, h] = [r.x, r.y, r.w, r.h].map(|n| n as f32);
        self.push_quad([x, y, x + w, y + h], Some(font::sprite_uv(sprite)), rgb);
    }
    /// Draws a sprite scaled by an integer factor and centered on a
    /// rectangle.
    pub fn push_sprite_centered(&mut self, r: Rect, sprite: Sprite, scale: u32, rgb: Rgb) {
        let size = font::SLOT_SIZE * scale;
        let x = r.x + r.w.saturating_sub(size) / 2;
        let y = r.y + r.h.saturating_sub(size) / 2;
        self.push_sprite(Rect::new(x, y, size, size), sprite, rgb);
    }

    /// Draws a line of text with its top-left corner at `(x, y)`, each font
    /// pixel `scale` window pixels wide. Characters without a glyph leave a
    /// gap.
    pub fn push_text(&mut self, (x, y): (u32, u32), scale: u32, text: &str, rgb: Rgb) {
        let w = (GLYPH_WIDTH * scale) as f32;
        let h = (GLYPH_HEIGHT * scale) as f32;
        for (i, ch) in text.chars().enumerate() {
            if let Some(uv) = font::glyph_uv(ch) {
                let x0 = (x + i as u32 * GLYPH_ADVANCE * scale) as f32;
                let y0 = y as f32;
                self.push_quad([x0, y0, x0 + w, y0 + h], Some(uv), rgb);
            }
        }
    }
    /// Draws a line of text centered on a rectangle.
    pub fn push_text_centered(&mut self, r: Rect, scale: u32, text: &str, rgb: Rgb) {
        let w = font::text_width(text) * scale;
        let h = GLYPH_HEIGHT * scale;
        let x = r.x + r.w.saturating_sub(w) / 2;
        let y = r.y + r.h.saturating_sub(h) / 2;
        self.push_text((x, y), scale, text, rgb);
    }
}
