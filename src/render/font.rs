//! Built-in 5x7 bitmap font and 8x8 sprites, rasterized into a single atlas
//! image at startup.
//!
//! Every glyph and sprite lives in its own 8x8 slot of the atlas. Only the
//! alpha channel is meaningful; color is applied when drawing.

use image::{Rgba, RgbaImage};

/// Width and height of an atlas slot, in texels.
pub const SLOT_SIZE: u32 = 8;
/// Number of slots per atlas row.
const ATLAS_COLS: u32 = 16;

/// Glyph size, in font pixels.
pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal distance between consecutive characters, in font pixels.
pub const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Characters present in the font, in atlas order. Lowercase letters are
/// drawn as uppercase; space has no glyph.
const CHARSET: &str = "0123456789:!AEGIMNORSTUVWXY";

#[rustfmt::skip]
const GLYPHS: [[u8; 7]; 27] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110], // 0
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // 1
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111], // 2
    [0b11110, 0b00001, 0b00001, 0b01110, 0b00001, 0b00001, 0b11110], // 3
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010], // 4
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110], // 5
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110], // 6
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000], // 7
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110], // 8
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100], // 9
    [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000], // :
    [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100], // !
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
];

#[rustfmt::skip]
const FLAG: [u8; 8] = [
    0b0011_0000,
    0b0011_1100,
    0b0011_1111,
    0b0011_1100,
    0b0010_0000,
    0b0010_0000,
    0b0111_1000,
    0b1111_1100,
];
#[rustfmt::skip]
const BOMB: [u8; 8] = [
    0b0001_0000,
    0b0101_0100,
    0b0011_1000,
    0b1111_1110,
    0b0011_1000,
    0b0101_0100,
    0b0001_0000,
    0b0000_0000,
];

/// Non-text sprite in the atlas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Sprite {
    Flag,
    Bomb,
}
impl Sprite {
    fn slot(self) -> u32 {
        let first = CHARSET.len() as u32;
        match self {
            Sprite::Flag => first,
            Sprite::Bomb => first + 1,
        }
    }
    fn bitmap(self) -> &'static [u8; 8] {
        match self {
            Sprite::Flag => &FLAG,
            Sprite::Bomb => &BOMB,
        }
    }
}

/// Returns the atlas slot holding a character's glyph, or `None` if the font
/// does not cover it.
pub fn glyph_slot(ch: char) -> Option<u32> {
    let ch = ch.to_ascii_uppercase();
    CHARSET.chars().position(|c| c == ch).map(|i| i as u32)
}

/// Returns the width of a line of text, in font pixels.
pub fn text_width(text: &str) -> u32 {
    match text.chars().count() as u32 {
        0 => 0,
        n => n * GLYPH_ADVANCE - 1,
    }
}

/// Texture coordinates `[u0, v0, u1, v1]` of the glyph for `ch`. The `v`
/// axis points down, matching the row order of the atlas image.
pub fn glyph_uv(ch: char) -> Option<[f32; 4]> {
    glyph_slot(ch).map(|slot| slot_uv(slot, GLYPH_WIDTH, GLYPH_HEIGHT))
}
/// Texture coordinates `[u0, v0, u1, v1]` of a sprite.
pub fn sprite_uv(sprite: Sprite) -> [f32; 4] {
    slot_uv(sprite.slot(), SLOT_SIZE, SLOT_SIZE)
}

fn slot_count() -> u32 {
    CHARSET.len() as u32 + 2
}
fn atlas_dimensions() -> (u32, u32) {
    let rows = (slot_count() + ATLAS_COLS - 1) / ATLAS_COLS;
    (ATLAS_COLS * SLOT_SIZE, rows * SLOT_SIZE)
}
fn slot_origin(slot: u32) -> (u32, u32) {
    ((slot % ATLAS_COLS) * SLOT_SIZE, (slot / ATLAS_COLS) * SLOT_SIZE)
}
fn slot_uv(slot: u32, w: u32, h: u32) -> [f32; 4] {
    let (atlas_w, atlas_h) = atlas_dimensions();
    let (x, y) = slot_origin(slot);
    [
        x as f32 / atlas_w as f32,
        y as f32 / atlas_h as f32,
        (x + w) as f32 / atlas_w as f32,
        (y + h) as f32 / atlas_h as f32,
    ]
}

/// Draws a 1-bit bitmap into a slot. Bit `width - 1` is the leftmost column.
fn blit_bitmap(img: &mut RgbaImage, slot: u32, rows: &[u8], width: u32) {
    let (ox, oy) = slot_origin(slot);
    for (dy, &bits) in rows.iter().enumerate() {
        for dx in 0..width {
            if bits >> (width - 1 - dx) & 1 != 0 {
                img.put_pixel(ox + dx, oy + dy as u32, Rgba([255, 255, 255, 255]));
            }
        }
    }
}

/// Rasterizes every glyph and sprite into a new atlas image.
pub fn atlas_image() -> RgbaImage {
    let (w, h) = atlas_dimensions();
    let mut img = RgbaImage::new(w, h);
    for (slot, rows) in GLYPHS.iter().enumerate() {
        blit_bitmap(&mut img, slot as u32, rows, GLYPH_WIDTH);
    }
    for &sprite in &[Sprite::Flag, Sprite::Bomb] {
        blit_bitmap(&mut img, sprite.slot(), sprite.bitmap(), SLOT_SIZE);
    }
    img
}
