use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use rusttype::{Font, Scale};

/// Well-known system font locations, tried in order after the bundled font.
/// The `.ttc` entries will fail to parse with rusttype and simply fall
/// through to the next candidate.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Times New Roman.ttf",
];

/// A usable font handle. Resolution never fails: when no TrueType candidate
/// loads, text falls back to a built-in 5x7 bitmap face with no accent or
/// size fidelity guarantees.
pub enum ResolvedFont {
    TrueType { font: Font<'static>, scale: Scale },
    Builtin { px: u32 },
}

fn try_truetype(path: &Path, size: f32) -> Option<ResolvedFont> {
    let bytes = std::fs::read(path).ok()?;
    let font = Font::try_from_vec(bytes)?;
    Some(ResolvedFont::TrueType {
        font,
        scale: Scale::uniform(size),
    })
}

/// Resolves a drawable font at `size`: bundled asset first, then system
/// candidates, then the bitmap fallback. Load failures are swallowed.
pub fn resolve(bundled: &Path, size: f32) -> ResolvedFont {
    if let Some(f) = try_truetype(bundled, size) {
        return f;
    }
    for candidate in SYSTEM_FONT_CANDIDATES {
        if let Some(f) = try_truetype(Path::new(candidate), size) {
            tracing::debug!(path = candidate, "using system font");
            return f;
        }
    }
    tracing::warn!("no TrueType font found, falling back to builtin bitmap font");
    let px = ((size / bitmap::GLYPH_H as f32).round() as u32).max(1);
    ResolvedFont::Builtin { px }
}

impl ResolvedFont {
    /// Draws `text` top-left anchored at (x, y).
    pub fn draw(&self, img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, text: &str) {
        match self {
            ResolvedFont::TrueType { font, scale } => {
                draw_text_mut(img, color, x, y, *scale, font, text);
            }
            ResolvedFont::Builtin { px } => bitmap::draw_text(img, x, y, *px, color, text),
        }
    }
}

/// Minimal 5x7 bitmap face used as the last-resort fallback. Lowercase maps
/// onto the uppercase glyphs; anything else unknown draws as a solid block.
mod bitmap {
    use image::{Rgb, RgbImage};

    pub const GLYPH_W: u32 = 5;
    pub const GLYPH_H: u32 = 7;

    // One byte per row, bit 4 is the leftmost column.
    fn glyph(ch: char) -> [u8; 7] {
        match ch.to_ascii_uppercase() {
            ' ' => [0, 0, 0, 0, 0, 0, 0],
            '-' => [0, 0, 0, 0b01110, 0, 0, 0],
            ':' => [0, 0b00110, 0b00110, 0, 0b00110, 0b00110, 0],
            '.' => [0, 0, 0, 0, 0, 0b00110, 0b00110],
            ',' => [0, 0, 0, 0, 0, 0b00110, 0b00100],
            '/' => [0b00001, 0b00010, 0b00010, 0b00100, 0b01000, 0b01000, 0b10000],
            '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
            '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
            '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
            '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
            '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
            '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
            '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
            '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
            '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
            '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
            'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
            'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
            'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
            'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
            'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
            'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
            'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
            'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
            'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
            'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
            'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
            'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
            'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
            'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
            'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
            'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
            'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
            'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
            'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
            'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
            'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
            'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b01010, 0b00100],
            'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
            'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
            'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
            'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
            _ => [0b11111; 7],
        }
    }

    fn fill_block(img: &mut RgbImage, x0: i64, y0: i64, px: u32, color: Rgb<u8>) {
        for dy in 0..px as i64 {
            for dx in 0..px as i64 {
                let (x, y) = (x0 + dx, y0 + dy);
                if x < 0 || y < 0 {
                    continue;
                }
                let (x, y) = (x as u32, y as u32);
                if x < img.width() && y < img.height() {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }

    pub fn draw_text(img: &mut RgbImage, x: i32, y: i32, px: u32, color: Rgb<u8>, text: &str) {
        let mut caret = x as i64;
        let advance = ((GLYPH_W + 1) * px) as i64;
        for ch in text.chars() {
            let rows = glyph(ch);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_W {
                    if bits & (1 << (GLYPH_W - 1 - col)) != 0 {
                        fill_block(
                            img,
                            caret + (col * px) as i64,
                            y as i64 + (row as u32 * px) as i64,
                            px,
                            color,
                        );
                    }
                }
            }
            caret += advance;
        }
    }
}
