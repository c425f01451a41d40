//! # Frame Buffer
//!
//! There is exactly one frame buffer and no second page. Both hardware
//! variants present the same logical canvas to the layers above: 32
//! character cells across and 192 scanlines down. Cell `x` is a column of
//! [`Depth::cell_bytes`] bytes; `y` counts scanlines, not character rows.
//!
//! ```text
//! base:      32 cells x 192 lines, 1 byte/cell,  stride 32,  no margin
//! enhanced:  40 cells x 200 lines, 4 bytes/cell, stride 160, canvas centred
//! ```
//!
//! A [`FrameBuffer`] is only handed out by a graphics-access scope
//! ([`GfxScope`](crate::display::GfxScope)), so it always points at mapped
//! video memory.

use crate::rop::{blend, Depth, RasterOp};

/// Cells across the logical canvas.
pub const CANVAS_CELLS: u8 = 32;
/// Scanlines down the logical canvas.
pub const CANVAS_LINES: u8 = 192;
/// Linear offset of one character row (8 scanlines) on the logical canvas.
pub const ROW_STRIDE: u16 = CANVAS_CELLS as u16 * 8;

/// Shape of the video plane for one graphics mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Geometry {
    pub depth: Depth,
    /// Bytes per scanline.
    pub stride: u16,
    /// Scanlines in the plane.
    pub lines: u16,
    /// Cells between the plane's left edge and the logical canvas.
    pub margin_x: u8,
    /// Scanlines between the plane's top edge and the logical canvas.
    pub margin_y: u8,
}

impl Geometry {
    /// Four-colour 128x192.
    pub const BASE: Geometry = Geometry {
        depth: Depth::Four,
        stride: 32,
        lines: 192,
        margin_x: 0,
        margin_y: 0,
    };

    /// Sixteen-colour 320x200.
    pub const ENHANCED: Geometry = Geometry {
        depth: Depth::Sixteen,
        stride: 160,
        lines: 200,
        margin_x: 4,
        margin_y: 4,
    };

    /// Bytes in the whole plane.
    pub const fn size(&self) -> usize {
        self.stride as usize * self.lines as usize
    }

    /// Byte offset of canvas cell `x` on canvas scanline `y`.
    #[inline(always)]
    pub const fn offset(&self, x: u8, y: u8) -> usize {
        (y as usize + self.margin_y as usize) * self.stride as usize
            + (x as usize + self.margin_x as usize) * self.depth.cell_bytes()
    }
}

/// Addressable view of the mapped video plane.
pub struct FrameBuffer<'a> {
    bytes: &'a mut [u8],
    geometry: Geometry,
    background: [u8; 4],
    writes: &'a mut u32,
}

impl<'a> FrameBuffer<'a> {
    pub(crate) fn new(bytes: &'a mut [u8], geometry: Geometry, writes: &'a mut u32) -> Self {
        Self {
            bytes,
            geometry,
            background: [0; 4],
            writes,
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Set the four-colour pattern clear source bits show as.
    pub fn set_background(&mut self, pattern: u8) {
        self.background = self.geometry.depth.widen(pattern);
    }

    /// Write a column of cell rows downwards from (`x`, `y`). `rows` holds one
    /// cell row per scanline.
    pub fn write_column(&mut self, x: u8, y: u8, rows: &[u8], rop: RasterOp) {
        let cell = self.geometry.depth.cell_bytes();
        for (line, row) in rows.chunks_exact(cell).enumerate() {
            self.write_row(x, y.wrapping_add(line as u8), row, rop);
        }
    }

    /// Write `bytes` left to right along scanline `y`, starting at cell `x`.
    pub fn write_row(&mut self, x: u8, y: u8, bytes: &[u8], rop: RasterOp) {
        let depth = self.geometry.depth;
        let cell = depth.cell_bytes();
        let mask = depth.mask(rop, y);
        let start = self.geometry.offset(x, y);
        let dest = &mut self.bytes[start..start + bytes.len()];
        for (i, (out, src)) in dest.iter_mut().zip(bytes).enumerate() {
            *out = blend(*src, mask, self.background[i % cell]);
        }
        *self.writes = self.writes.wrapping_add(bytes.len() as u32);
    }

    /// Fill a `width` x `height` block with a four-colour pattern.
    pub fn fill(&mut self, x: u8, y: u8, width: u8, height: u8, pattern: u8) {
        let cell = self.geometry.depth.cell_bytes();
        let row = self.geometry.depth.widen(pattern);
        for line in 0..height {
            let start = self.geometry.offset(x, y.wrapping_add(line));
            let dest = &mut self.bytes[start..start + width as usize * cell];
            for (i, out) in dest.iter_mut().enumerate() {
                *out = row[i % cell];
            }
        }
        *self.writes = self
            .writes
            .wrapping_add(width as u32 * height as u32 * cell as u32);
    }

    /// Zero the whole plane, margins included.
    pub fn clear(&mut self) {
        let size = self.geometry.size().min(self.bytes.len());
        self.bytes[..size].fill(0);
        *self.writes = self.writes.wrapping_add(size as u32);
    }
}
