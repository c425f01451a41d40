//! # Text & Status Line
//!
//! The glyph table only has upper-case letters, so lower-case input is
//! folded before lookup. The dimmed variant draws everything that was not
//! already an upper-case letter with [`RasterOp::Alt`]; names typed in
//! lower case therefore come out grey.
//!
//! Calls taking a `row` work in text rows (8 scanlines, nudged down by
//! [`TEXT_OFFSET_Y`] and kept above the status line); the `_at` variants
//! take a raw scanline.

use crate::{
    framebuffer::CANVAS_CELLS,
    glyphs::id,
    layout::TEXT_OFFSET_Y,
    platform::Platform,
    raster::Raster,
    rop::{pattern, RasterOp},
    screen::Screen,
};

/// Lowest scanline a text row may start on.
pub const LAST_TEXT_LINE: u8 = 184;
/// Scanline of the status line (clock, connection icon).
const STATUS_LINE: u8 = 184;
/// Scanline of the endgame banner text.
const BANNER_LINE: u8 = 183;

/// Scanline of text row `row`.
pub const fn text_line(row: u8) -> u8 {
    let line = row as u16 * 8 + TEXT_OFFSET_Y as u16;
    if line > LAST_TEXT_LINE as u16 {
        LAST_TEXT_LINE
    } else {
        line as u8
    }
}

/// Top scanline of text row `row`, unclamped; rows past the canvas wrap.
const fn row_line(row: u8) -> u8 {
    row.wrapping_mul(8).wrapping_add(TEXT_OFFSET_Y)
}

fn put_text(r: &mut Raster<'_>, x: u8, y: u8, text: &str, dim: bool) {
    for (i, c) in text.bytes().enumerate() {
        let rop = if dim && !c.is_ascii_uppercase() {
            RasterOp::Alt
        } else {
            RasterOp::Copy
        };
        r.put_glyph(x.wrapping_add(i as u8), y, rop, c.to_ascii_uppercase());
    }
}

impl<'g, P: Platform> Screen<'g, P> {
    pub fn draw_text(&mut self, x: u8, row: u8, text: &str) {
        self.draw_text_at(x, text_line(row), text);
    }

    pub fn draw_text_at(&mut self, x: u8, y: u8, text: &str) {
        self.with_raster(|r, _| put_text(r, x, y, text, false));
    }

    /// Dimmed text, see the module docs.
    pub fn draw_text_alt(&mut self, x: u8, row: u8, text: &str) {
        self.draw_text_alt_at(x, text_line(row), text);
    }

    pub fn draw_text_alt_at(&mut self, x: u8, y: u8, text: &str) {
        self.with_raster(|r, _| put_text(r, x, y, text, true));
    }

    /// Name in `slot`'s badge. The active player gets a marker and full
    /// brightness; everyone else is dimmed.
    pub fn draw_player_name(&mut self, slot: u8, name: &str, active: bool) {
        let pos = self.layout().name_pos(slot);
        self.with_raster(|r, _| {
            r.with_background(pattern::YELLOW, |r| {
                if active {
                    r.put_glyph(pos.x - 1, pos.y, RasterOp::Copy, id::ACTIVE_MARKER);
                } else {
                    r.put_glyph(pos.x - 1, pos.y, RasterOp::Copy, id::INACTIVE_MARKER);
                }
                put_text(r, pos.x, pos.y, name, !active);
            })
        });
    }

    /// Centred banner across the bottom of the screen.
    pub fn draw_endgame_message(&mut self, message: &str) {
        let x = CANVAS_CELLS.saturating_sub(message.len() as u8) / 2;
        self.with_raster(|r, _| {
            r.mask_rect(0, BANNER_LINE - 1, CANVAS_CELLS, 1, pattern::BLUE);
            r.mask_rect(0, BANNER_LINE, CANVAS_CELLS, 9, pattern::YELLOW);
            r.with_background(pattern::YELLOW, |r| put_text(r, x, BANNER_LINE, message, false));
        });
    }

    /// Turn timer icon, bottom right.
    pub fn draw_clock(&mut self) {
        self.with_raster(|r, _| r.put_glyph(CANVAS_CELLS - 1, STATUS_LINE, RasterOp::Copy, id::CLOCK));
    }

    /// Network activity icon, bottom left; blank when `show` is false.
    pub fn draw_connection_icon(&mut self, show: bool) {
        let icon = if show {
            [id::CONNECTED_LEFT, id::CONNECTED_RIGHT]
        } else {
            [id::SPACE, id::SPACE]
        };
        self.with_raster(|r, _| r.put_glyphs(0, STATUS_LINE, RasterOp::Copy, &icon));
    }

    pub fn draw_icon(&mut self, x: u8, row: u8, icon: u8) {
        let y = row_line(row);
        self.with_raster(|r, _| r.put_glyph(x, y, RasterOp::Copy, icon));
    }

    pub fn draw_blank(&mut self, x: u8, row: u8) {
        self.draw_icon(x, row, id::SPACE);
    }

    /// Clear `width` cells of a text row to the background colour.
    pub fn draw_space(&mut self, x: u8, row: u8, width: u8) {
        let y = text_line(row);
        self.with_raster(|r, _| r.mask_rect(x, y, width, 8, pattern::CLEAR));
    }

    /// Dashed rule through the middle of a text row.
    pub fn draw_line(&mut self, x: u8, row: u8, width: u8) {
        let y = row_line(row).wrapping_add(1);
        self.with_raster(|r, _| r.rule(x, y, width, 2, RasterOp::Line));
    }

    /// Corner pieces of a `width` x `height` box whose top-left corner is at
    /// text row `row`; the content sits between the corners.
    pub fn draw_box(&mut self, x: u8, row: u8, width: u8, height: u8) {
        let top = row_line(row).wrapping_add(1);
        let bottom = top
            .wrapping_add(height.wrapping_sub(1).wrapping_mul(8))
            .wrapping_add(14);
        let right = x.wrapping_add(width).wrapping_add(1);
        self.with_raster(|r, _| {
            r.put_glyph(x, top, RasterOp::Copy, id::BOX_TOP_LEFT);
            r.put_glyph(right, top, RasterOp::Copy, id::BOX_TOP_RIGHT);
            r.put_glyph(x, bottom, RasterOp::Copy, id::BOX_BOTTOM_LEFT);
            r.put_glyph(right, bottom, RasterOp::Copy, id::BOX_BOTTOM_RIGHT);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_map_to_scanlines() {
        assert_eq!(text_line(0), 2);
        assert_eq!(text_line(12), 98);
        assert_eq!(text_line(22), 178);
        assert_eq!(text_line(23), 184);
        assert_eq!(text_line(200), 184);
    }

    #[test]
    fn unclamped_rows_wrap() {
        assert_eq!(row_line(3), 26);
        assert_eq!(row_line(31), 250);
        assert_eq!(row_line(32), 2);
    }
}
