//! # Raster Primitives
//!
//! The three blits everything else is built from:
//!
//! - [`Raster::put_glyph`]: one glyph at a cell,
//! - [`Raster::draw_run`]: a rectangle fed from a contiguous source,
//! - [`Raster::mask_rect`]: a rectangle filled with a repeating pattern.
//!
//! `x` is in character cells; `y` and heights are in scanlines. A `Raster`
//! only exists inside a graphics-access scope. Writes outside the plane
//! panic on the slice bounds; keeping coordinates on the canvas is the
//! caller's job.

use crate::{
    framebuffer::FrameBuffer,
    glyphs::GlyphSet,
    rop::{pattern, RasterOp},
};

/// Primitive drawing surface for one graphics-access scope.
pub struct Raster<'a> {
    fb: FrameBuffer<'a>,
    glyphs: &'a GlyphSet<'a>,
}

impl<'a> Raster<'a> {
    pub(crate) fn new(fb: FrameBuffer<'a>, glyphs: &'a GlyphSet<'a>) -> Self {
        Self { fb, glyphs }
    }

    pub fn glyphs(&self) -> &'a GlyphSet<'a> {
        self.glyphs
    }

    /// Pattern that clear glyph bits composite onto until changed.
    pub fn set_background(&mut self, background: u8) {
        self.fb.set_background(background);
    }

    /// Draw `f` with a background pattern, then restore the empty background.
    pub fn with_background<R>(&mut self, background: u8, f: impl FnOnce(&mut Self) -> R) -> R {
        self.set_background(background);
        let result = f(self);
        self.set_background(pattern::CLEAR);
        result
    }

    /// Draw glyph `index` at cell `x`, scanline `y`.
    #[inline]
    pub fn put_glyph(&mut self, x: u8, y: u8, rop: RasterOp, index: u8) {
        self.fb.write_column(x, y, self.glyphs.glyph(index), rop);
    }

    /// Draw several glyphs side by side.
    pub fn put_glyphs(&mut self, x: u8, y: u8, rop: RasterOp, indices: &[u8]) {
        for (i, &index) in indices.iter().enumerate() {
            self.put_glyph(x.wrapping_add(i as u8), y, rop, index);
        }
    }

    /// Draw a `width`-cell by `height`-scanline block, reading `source`
    /// row-major and contiguously. Stops early if `source` runs out.
    pub fn draw_run(&mut self, x: u8, y: u8, width: u8, height: u8, rop: RasterOp, source: &[u8]) {
        let row_bytes = width as usize * self.fb.geometry().depth.cell_bytes();
        if row_bytes == 0 {
            return;
        }
        for (line, row) in source.chunks_exact(row_bytes).take(height as usize).enumerate() {
            self.fb.write_row(x, y.wrapping_add(line as u8), row, rop);
        }
    }

    /// Fill a `width`-cell by `height`-scanline block with a repeating
    /// four-colour pattern.
    #[inline]
    pub fn mask_rect(&mut self, x: u8, y: u8, width: u8, height: u8, pattern: u8) {
        self.fb.fill(x, y, width, height, pattern);
    }

    /// Fill a block with a solid source composited through `rop`; with
    /// [`RasterOp::Line`] this is the dashed rule pattern.
    pub fn rule(&mut self, x: u8, y: u8, width: u8, height: u8, rop: RasterOp) {
        let solid = [pattern::SOLID; 160];
        let row_bytes = width as usize * self.fb.geometry().depth.cell_bytes();
        for line in 0..height {
            self.fb.write_row(x, y.wrapping_add(line), &solid[..row_bytes], rop);
        }
    }

    /// Zero the whole plane.
    pub fn clear(&mut self) {
        self.fb.clear();
    }
}
