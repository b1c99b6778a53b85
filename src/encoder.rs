//! Double-resolution terminal encoding.
//!
//! Packs two pixel rows into one row of character cells: the top pixel
//! becomes the foreground, the bottom pixel the background, and the cell
//! renders as an upper-half-block glyph. A legend override character is
//! emitted literally instead, with its foreground forced to full-bright
//! and its background to transparent black so labels stay legible over
//! the plot.

use std::fmt::Write as _;

use crate::canvas::{Canvas, Rgba};
use crate::device::RESET_ALL;

/// Upper half block, U+2580.
const HALF_BLOCK: char = '\u{2580}';

const SET_FG: &str = "\x1b[38;2;";
const SET_BG: &str = "\x1b[48;2;";

/// Solid backdrop color used for source-over blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Background {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Background {
    /// Parse a hex triple such as `#1a2b3c` (leading `#` or any single
    /// prefix character tolerated). Returns `None` on malformed input.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let hex = value.strip_prefix('#').unwrap_or(value);
        if hex.len() != 6 {
            return None;
        }
        let packed = u32::from_str_radix(hex, 16).ok()?;
        Some(Self {
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        })
    }
}

/// Source-over blend of a premultiplied pixel against the backdrop.
///
/// Mimics `GL_ONE + GL_ONE_MINUS_SRC_ALPHA`:
/// `out = src*255/255 + bg*(255 - alpha)/255` per channel.
fn blend(src: Rgba, bg: Background) -> (u8, u8, u8) {
    let t1 = 255 - u32::from(src.a);
    let r = (u32::from(src.r) * 255 + u32::from(bg.r) * t1) / 255;
    let g = (u32::from(src.g) * 255 + u32::from(bg.g) * t1) / 255;
    let b = (u32::from(src.b) * 255 + u32::from(bg.b) * t1) / 255;
    (r as u8, g as u8, b as u8)
}

fn resolve(src: Rgba, bg: Background, blend_enabled: bool) -> (u8, u8, u8) {
    if blend_enabled {
        blend(src, bg)
    } else {
        (src.r, src.g, src.b)
    }
}

/// Encode the canvas into one frame of true-color escape sequences.
///
/// Rows are joined with `\r\n` (raw mode disables output post-processing,
/// so a bare newline would not return the carriage) and each row ends
/// with a full attribute reset. The caller positions the cursor.
#[must_use]
pub fn encode(canvas: &Canvas, background: Background, blend_enabled: bool) -> String {
    let width = canvas.width();
    let height = canvas.height() & !1;

    // Worst case ~40 bytes of escapes per cell.
    let mut out = String::with_capacity(width * height / 2 * 40 + height);

    for y in (0..height).step_by(2) {
        if y > 0 {
            out.push_str("\r\n");
        }
        let cell_row = y / 2;
        for x in 0..width {
            let override_char = canvas.legend_at(x, cell_row);

            let mut top = canvas.pixel(x, y);
            let mut bottom = canvas.pixel(x, y + 1);
            if override_char != 0 {
                top = Rgba::opaque(0xff, 0xff, 0xff);
                bottom = Rgba::TRANSPARENT;
            }

            let (fr, fg, fb) = resolve(top, background, blend_enabled);
            let (br, bg, bb) = resolve(bottom, background, blend_enabled);

            let _ = write!(out, "{SET_FG}{fr};{fg};{fb}m{SET_BG}{br};{bg};{bb}m");
            if override_char != 0 {
                out.push(override_char as char);
            } else {
                out.push(HALF_BLOCK);
            }
        }
        out.push_str(RESET_ALL);
    }

    out
}
