//! # Boards & Ships
//!
//! Board frames, attack results, cursors and ships. Positions come from
//! the [`Layout`] in the screen's [`RenderContext`](crate::screen::RenderContext);
//! cell states are the raw bytes of the game's 100-cell field arrays.
//!
//! Ship positions use the game's encoding: `0..100` is the cell of the
//! ship's top-left end lying horizontally, `100..200` the same cell with
//! the ship standing vertically.

use crate::{
    glyphs::id,
    layout::{Badge, CellPos, Frame, Layout, Side, BOARD_CELLS, BOARD_LINES, FIELD_SIZE},
    platform::Platform,
    raster::Raster,
    rop::{pattern, RasterOp},
    screen::Screen,
};

/// First animation frame that shows the attack sequence.
const ATTACK_FRAME: u8 = 10;

/// State of one board cell as stored by the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum Cell {
    Empty = 0,
    Hit = 1,
    Miss = 2,
}

impl Cell {
    pub const fn from_byte(value: u8) -> Option<Self> {
        match value {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Hit),
            2 => Some(Cell::Miss),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Split an encoded ship position into orientation and cell index.
    pub const fn decode(position: u8) -> (Self, u8) {
        if position > 99 {
            (Orientation::Vertical, position - 100)
        } else {
            (Orientation::Horizontal, position)
        }
    }

    /// Glyph of segment `index` of a ship `size` segments long.
    pub const fn segment(self, index: u8, size: u8) -> u8 {
        let (start, middle, end) = match self {
            Orientation::Horizontal => (id::SHIP_H_START, id::SHIP_H_MIDDLE, id::SHIP_H_END),
            Orientation::Vertical => (id::SHIP_V_START, id::SHIP_V_MIDDLE, id::SHIP_V_END),
        };
        if index == 0 {
            start
        } else if index + 1 == size {
            end
        } else {
            middle
        }
    }
}

/// Paint a ship's segments starting at `pos`.
fn put_ship(r: &mut Raster<'_>, pos: CellPos, size: u8, orientation: Orientation) {
    for i in 0..size {
        let glyph = orientation.segment(i, size);
        match orientation {
            Orientation::Horizontal => r.put_glyph(pos.x + i, pos.y, RasterOp::Copy, glyph),
            Orientation::Vertical => r.put_glyph(pos.x, pos.y + i * 8, RasterOp::Copy, glyph),
        }
    }
}

/// Name badge box with its rounded corner pixels.
fn put_badge(r: &mut Raster<'_>, CellPos { x, y }: CellPos, badge: Badge) {
    match badge {
        Badge::Above => {
            r.put_glyph(x - 1, y - 8, RasterOp::Copy, id::BADGE_TOP_LEFT);
            r.put_glyph(x + 10, y - 8, RasterOp::Copy, id::BADGE_TOP_RIGHT);
            r.mask_rect(x, y - 9, 10, 9, pattern::YELLOW);
            r.mask_rect(x, y - 10, 10, 1, pattern::BLUE);
            r.mask_rect(x - 1, y - 10, 1, 1, 0b0000_0010);
            r.mask_rect(x + 10, y - 10, 1, 1, 0b1000_0000);
            r.mask_rect(x - 1, y - 9, 1, 1, 0b0000_1001);
            r.mask_rect(x + 10, y - 9, 1, 1, 0b0110_0000);
        }
        Badge::Below => {
            r.put_glyph(x - 1, y + 80, RasterOp::Copy, id::BADGE_BOTTOM_LEFT);
            r.put_glyph(x + 10, y + 80, RasterOp::Copy, id::BADGE_BOTTOM_RIGHT);
            r.mask_rect(x, y + 80, 10, 9, pattern::YELLOW);
            r.mask_rect(x - 1, y + 88, 1, 1, 0b0000_1001);
            r.mask_rect(x + 10, y + 88, 1, 1, 0b0110_0000);
            r.mask_rect(x, y + 89, 10, 1, pattern::BLUE);
            r.mask_rect(x - 1, y + 89, 1, 1, 0b0000_0010);
            r.mask_rect(x + 10, y + 89, 1, 1, 0b1000_0000);
        }
    }
}

/// One board: badge, edges, blue field and ship drawer.
fn put_frame(r: &mut Raster<'_>, frame: &Frame) {
    let CellPos { x, y } = frame.origin;
    let glyphs = r.glyphs();
    let left = frame.drawer == Side::Left;

    put_badge(r, frame.origin, frame.badge);

    let (outer, inner, join) = if left {
        (id::OUTER_EDGE_LEFT, id::INNER_EDGE_LEFT, id::DRAWER_JOIN_LEFT)
    } else {
        (id::OUTER_EDGE_RIGHT, id::INNER_EDGE_RIGHT, id::DRAWER_JOIN_RIGHT)
    };
    r.draw_run(frame.outer_x, y, 1, BOARD_LINES, RasterOp::Copy, glyphs.run(outer));
    r.draw_run(frame.inner_x, y + 8, 1, 64, RasterOp::Copy, glyphs.run(inner));
    r.put_glyph(frame.inner_x, y, RasterOp::Copy, join);
    r.put_glyph(frame.inner_x, y + 72, RasterOp::Copy, join);

    r.mask_rect(x, y, BOARD_CELLS, BOARD_LINES, pattern::BLUE);

    if let Some(edge) = frame.far_edge {
        let skip = edge.skip as usize;
        let source = |glyph: u8| glyphs.run(glyph).get(skip..).unwrap_or(&[]);
        r.draw_run(x - 1, edge.y, 1, edge.lines, RasterOp::Copy, source(id::FAR_EDGE_LEFT));
        r.draw_run(x + 10, edge.y, 1, edge.lines, RasterOp::Copy, source(id::FAR_EDGE_RIGHT));
        r.draw_run(x, edge.y, BOARD_CELLS, edge.lines, RasterOp::Copy, source(id::FAR_EDGE));
    }

    let corner = if left { id::DRAWER_CORNER_LEFT } else { id::DRAWER_CORNER_RIGHT };
    let cap = glyphs.run(id::DRAWER_CAP);
    r.draw_run(frame.drawer_x, y, 3, 8, RasterOp::Copy, cap);
    r.draw_run(frame.drawer_x, y + 72, 3, 8, RasterOp::Copy, cap);
    r.draw_run(frame.drawer_edge_x, y + 8, 1, 64, RasterOp::Copy, glyphs.run(id::DRAWER_EDGE));
    r.put_glyph(frame.drawer_edge_x, y, RasterOp::Copy, corner);
    r.put_glyph(frame.drawer_edge_x, y + 72, RasterOp::Copy, corner + 2);
    r.mask_rect(frame.drawer_x, y + 8, 3, 64, pattern::BLUE);
}

impl<'g, P: Platform> Screen<'g, P> {
    /// Lay out `players` boards and paint every frame from scratch.
    /// Always repaints fully, so calling it again is harmless.
    pub fn draw_board(&mut self, players: u8) {
        let layout = Layout::new(players);
        self.set_layout(layout);
        self.with_raster(|r, _| {
            for slot in 0..players {
                put_frame(r, &layout.frame(slot));
            }
        });
    }

    /// Repaint cell `index` of `quadrant`'s board. From frame 10 on, the
    /// attack animation plays instead when the viewer is not the local
    /// player or the cell is still empty. Untouched empty cells are left
    /// alone.
    pub fn draw_cell(&mut self, quadrant: u8, field: &[u8; FIELD_SIZE], index: u8, frame: u8) {
        let state = field[index as usize];
        let animating = frame >= ATTACK_FRAME
            && (self.active_player() != 0 || state == Cell::Empty as u8);
        let glyph = if animating {
            id::ATTACK_ANIM.wrapping_add(frame - ATTACK_FRAME)
        } else {
            match Cell::from_byte(state) {
                Some(Cell::Hit) if frame != 0 => id::CELL_HIT_BLINK,
                Some(Cell::Hit) => id::CELL_HIT,
                Some(Cell::Miss) => id::CELL_MISS,
                _ => return,
            }
        };
        let pos = self.layout().cell(quadrant, index);
        self.with_raster(|r, _| r.put_glyph(pos.x, pos.y, RasterOp::Copy, glyph));
    }

    /// Paint every hit and miss of a board. Empty cells keep the field fill.
    pub fn draw_full_board(&mut self, quadrant: u8, field: &[u8; FIELD_SIZE]) {
        self.with_raster(|r, ctx| {
            for (index, &state) in field.iter().enumerate() {
                let glyph = match Cell::from_byte(state) {
                    Some(Cell::Empty) => continue,
                    Some(Cell::Hit) => id::CELL_HIT,
                    _ => id::CELL_MISS,
                };
                let pos = ctx.layout.cell(quadrant, index as u8);
                r.put_glyph(pos.x, pos.y, RasterOp::Copy, glyph);
            }
        });
    }

    /// Selection cursor over cell (`x`, `y`). `blink` picks the highlighted
    /// variant of the cell's glyph; 0 shows the plain cell.
    pub fn draw_cursor(&mut self, quadrant: u8, x: u8, y: u8, field: &[u8; FIELD_SIZE], blink: u8) {
        let index = y * BOARD_CELLS + x;
        let state = field[index as usize];
        let glyph = if blink != 0 {
            state * 2 + 5 + blink
        } else {
            id::CELL_BLANK + state
        };
        let pos = self.layout().cell(quadrant, index);
        self.with_raster(|r, _| r.put_glyph(pos.x, pos.y, RasterOp::Copy, glyph));
    }

    /// Draw a ship on the local board, or paint its cells back to sea when
    /// `hidden`.
    pub fn draw_ship(&mut self, size: u8, position: u8, hidden: bool) {
        let (orientation, cell) = Orientation::decode(position);
        let pos = self.layout().cell(0, cell);
        self.with_raster(|r, _| {
            if hidden {
                match orientation {
                    Orientation::Horizontal => r.mask_rect(pos.x, pos.y, size, 8, pattern::BLUE),
                    Orientation::Vertical => r.mask_rect(pos.x, pos.y, 1, size * 8, pattern::BLUE),
                }
            } else {
                put_ship(r, pos, size, orientation);
            }
        });
    }

    /// Ship `index` in `player`'s drawer: a small upright ship once placed,
    /// a faded outline before.
    pub fn draw_legend_ship(&mut self, player: u8, index: u8, size: u8, placed: bool) {
        let pos = self.layout().legend_pos(player, index);
        self.with_raster(|r, _| {
            if placed {
                put_ship(r, pos, size, Orientation::Vertical);
            } else {
                let source = r.glyphs().run(id::LEGEND_PLACEHOLDER);
                r.draw_run(pos.x, pos.y, 1, size * 8, RasterOp::Copy, source);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_above_99_are_vertical() {
        assert_eq!(Orientation::decode(34), (Orientation::Horizontal, 34));
        assert_eq!(Orientation::decode(134), (Orientation::Vertical, 34));
        assert_eq!(Orientation::decode(99), (Orientation::Horizontal, 99));
        assert_eq!(Orientation::decode(100), (Orientation::Vertical, 0));
    }

    #[test]
    fn end_caps_bracket_the_middle() {
        let h: [u8; 4] = core::array::from_fn(|i| Orientation::Horizontal.segment(i as u8, 4));
        assert_eq!(h, [0x12, 0x13, 0x13, 0x14]);
        let v: [u8; 3] = core::array::from_fn(|i| Orientation::Vertical.segment(i as u8, 3));
        assert_eq!(v, [0x17, 0x16, 0x15]);
        assert_eq!(Orientation::Vertical.segment(0, 1), 0x17);
        assert_eq!(Orientation::Horizontal.segment(1, 2), 0x14);
    }

    #[test]
    fn cell_bytes_decode() {
        assert_eq!(Cell::from_byte(0), Some(Cell::Empty));
        assert_eq!(Cell::from_byte(2), Some(Cell::Miss));
        assert_eq!(Cell::from_byte(7), None);
    }
}
