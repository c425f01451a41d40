//! # Board Layout
//!
//! Up to four 10x10 boards share the 32x192 canvas, one per quadrant:
//!
//! ```text
//!          x=5         x=17
//!  y=10  [ slot 1 ]  [ slot 2 ]     name badges above
//!  y=98  [ slot 0 ]  [ slot 3 ]     name badges below
//! ```
//!
//! With one or two players every board moves right by [`FIELD_SHIFT`] cells
//! so the boards sit centred instead of hugging the left side. Slot 0 is
//! always the local player, whose ships are drawn on their own board.
//!
//! Each board has a ship drawer on its outer side holding the legend of
//! ships still to place. Left-hand boards face their decorative edges one
//! way and right-hand boards the other; in a two-player game slot 1 counts
//! as a right-hand board.

use crate::framebuffer::CANVAS_CELLS;

/// Horizontal shift of every board with one or two players.
pub const FIELD_SHIFT: u8 = 6;
/// Scanline offset of text rows relative to character rows.
pub const TEXT_OFFSET_Y: u8 = 2;
/// Cells per board side.
pub const BOARD_CELLS: u8 = 10;
/// Scanlines a board covers.
pub const BOARD_LINES: u8 = BOARD_CELLS * 8;
/// Cells in one board.
pub const FIELD_SIZE: usize = 100;

/// Unshifted board origins, by slot.
const QUADRANTS: [CellPos; 4] = [
    CellPos::new(5, 98),
    CellPos::new(5, 10),
    CellPos::new(17, 10),
    CellPos::new(17, 98),
];

/// Legend ship origins inside the drawer, as (cells, scanlines) from its
/// top-left. Ships 0-2 stand side by side; 3 and 4 sit below them.
const LEGEND: [(u8, u8); 5] = [(2, 0), (1, 0), (0, 0), (0, 40), (1, 48)];

/// A cell column and scanline on the logical canvas.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: u8,
    pub y: u8,
}

impl CellPos {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Offset into a canvas of one byte per cell and scanline.
    pub const fn offset(self) -> u16 {
        self.y as u16 * CANVAS_CELLS as u16 + self.x as u16
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Where a board's name badge sits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Badge {
    Above,
    Below,
}

/// Border strip on the side of the board away from the badge.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FarEdge {
    pub y: u8,
    /// Scanlines drawn.
    pub lines: u8,
    /// Source bytes skipped at the start of each edge image.
    pub skip: u8,
}

/// Everything `draw_board` needs to paint one slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    pub origin: CellPos,
    pub drawer: Side,
    pub badge: Badge,
    /// Column of the edge away from the drawer.
    pub outer_x: u8,
    /// Column of the edge between board and drawer.
    pub inner_x: u8,
    /// First of the drawer's three columns.
    pub drawer_x: u8,
    /// Column of the drawer's own outer edge.
    pub drawer_edge_x: u8,
    pub far_edge: Option<FarEdge>,
}

/// Board positions for one player count. Rebuilt whenever the count
/// changes; nothing else about it is mutable.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Layout {
    players: u8,
    field_x: u8,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Layout {
    pub const fn new(players: u8) -> Self {
        Self {
            players,
            field_x: if players > 2 { 0 } else { FIELD_SHIFT },
        }
    }

    pub const fn players(&self) -> u8 {
        self.players
    }

    /// Horizontal shift applied to every board.
    pub const fn field_x(&self) -> u8 {
        self.field_x
    }

    /// Canvas offset of `slot`'s board before the shift.
    pub const fn quadrant_offset(slot: u8) -> u16 {
        QUADRANTS[slot as usize].offset()
    }

    /// Top-left cell of `slot`'s board.
    pub const fn origin(&self, slot: u8) -> CellPos {
        let base = QUADRANTS[slot as usize];
        CellPos::new(base.x + self.field_x, base.y)
    }

    /// Position of cell `index` (row-major, 0..100) on `slot`'s board.
    pub const fn cell(&self, slot: u8, index: u8) -> CellPos {
        let origin = self.origin(slot);
        CellPos::new(
            origin.x + index % BOARD_CELLS,
            origin.y + (index / BOARD_CELLS) * 8,
        )
    }

    pub const fn drawer_side(&self, slot: u8) -> Side {
        if slot > 1 || (self.players == 2 && slot > 0) {
            Side::Right
        } else {
            Side::Left
        }
    }

    pub const fn badge(slot: u8) -> Badge {
        if slot == 1 || slot == 2 {
            Badge::Above
        } else {
            Badge::Below
        }
    }

    /// Where the first character of `slot`'s name goes; the activity marker
    /// sits one cell to the left.
    pub const fn name_pos(&self, slot: u8) -> CellPos {
        let origin = self.origin(slot);
        let y = match Self::badge(slot) {
            Badge::Above => origin.y - 9,
            Badge::Below => origin.y + BOARD_LINES,
        };
        CellPos::new(origin.x + 1, y)
    }

    /// Top of legend ship `index` (0..5) in `slot`'s drawer.
    pub const fn legend_pos(&self, slot: u8, index: u8) -> CellPos {
        let origin = self.origin(slot);
        let (dx, dy) = LEGEND[index as usize];
        let x = match self.drawer_side(slot) {
            Side::Right => origin.x + 11,
            Side::Left => origin.x - 4,
        };
        CellPos::new(x + dx, origin.y + 8 + dy)
    }

    pub const fn frame(&self, slot: u8) -> Frame {
        let origin = self.origin(slot);
        let CellPos { x, y } = origin;
        let drawer = self.drawer_side(slot);
        let (outer_x, inner_x, drawer_x, drawer_edge_x) = match drawer {
            Side::Right => (x - 1, x + 10, x + 11, x + 14),
            Side::Left => (x + 10, x - 1, x - 4, x - 5),
        };

        let badge = Self::badge(slot);
        let mut far_y = match badge {
            Badge::Above => y + BOARD_LINES,
            Badge::Below => y - 8,
        };
        // A lone board drops the top of its far edge and slides it down,
        // leaving room above for the status line.
        let mut skip = 0;
        if self.players == 1 {
            far_y += 5;
            skip = 4;
        }
        let far_edge = if slot != 0 || skip != 0 {
            let lines = if slot != 2 && skip == 0 { 8 } else { 3 };
            Some(FarEdge { y: far_y, lines, skip })
        } else {
            None
        };

        Frame {
            origin,
            drawer,
            badge,
            outer_x,
            inner_x,
            drawer_x,
            drawer_edge_x,
            far_edge,
        }
    }
}
