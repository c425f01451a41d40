//! # Mode & Bank Manager
//!
//! [`Display`] owns the [`Platform`] and tracks the video state machine:
//!
//! ```text
//! Uninitialized --init_graphics--> Graphics --reset_graphics--> Text
//! ```
//!
//! All frame-buffer access goes through a [`GfxScope`]. Entering one maps
//! the graphics plane into the CPU window if it is not already there;
//! dropping it puts back whatever mapping was active before, so device I/O
//! sharing the window sees its own memory again.
//!
//! ```ignore
//! let mut scope = display.gfx();
//! let mut raster = scope.raster(&glyphs);
//! raster.put_glyph(0, 0, RasterOp::Copy, glyph);
//! // mapping restored here
//! ```

use log::{debug, trace, warn};

use crate::{
    framebuffer::{FrameBuffer, Geometry},
    glyphs::GlyphSet,
    palette,
    platform::{Mapping, Platform, VideoState},
    raster::Raster,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Uninitialized,
    Text,
    Graphics,
}

pub struct Display<P: Platform> {
    platform: P,
    mode: Mode,
    /// Colour registers found when graphics mode was entered.
    palette_backup: Option<[u8; 16]>,
    /// Bytes written through the primitive layer.
    writes: u32,
}

impl<P: Platform> Display<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            mode: Mode::Uninitialized,
            palette_backup: None,
            writes: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn geometry(&self) -> Geometry {
        self.platform.geometry()
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Frame-buffer bytes written since creation or the last
    /// [`reset_write_count`](Self::reset_write_count).
    pub fn bytes_written(&self) -> u32 {
        self.writes
    }

    pub fn reset_write_count(&mut self) {
        self.writes = 0;
    }

    pub fn palette_backup(&self) -> Option<[u8; 16]> {
        self.palette_backup
    }

    /// Switch the hardware into graphics mode.
    ///
    /// With a palette this is the full GIME sequence: fix the glyph byte
    /// order (first call only), then with interrupts masked load the MMU
    /// task, save the colour registers, install the RGB table and switch
    /// modes on the next vertical sync. Without one it only selects the
    /// four-colour mode.
    pub fn init_graphics(&mut self, glyphs: &mut GlyphSet<'_>) {
        if self.mode == Mode::Graphics {
            warn!("init_graphics: already in graphics mode");
        }
        if self.platform.has_palette() {
            glyphs.normalize_byte_order();

            self.platform.mask_interrupts();
            self.platform.install_bank_table();
            if self.palette_backup.is_none() {
                self.palette_backup = Some(self.platform.palette());
            }
            self.platform.set_palette(&palette::RGB);
            self.platform.wait_vsync();
            self.platform.set_video_state(VideoState::Graphics);
            self.platform.unmask_interrupts();
        } else {
            self.platform.set_video_state(VideoState::Graphics);
        }
        self.mode = Mode::Graphics;
        debug!("graphics mode on, {:?}", self.platform.geometry().depth);
    }

    /// Return to text mode: wait for vertical sync, put back the saved
    /// colours and select the default mapping.
    pub fn reset_graphics(&mut self) {
        if self.mode != Mode::Graphics {
            warn!("reset_graphics: not in graphics mode ({:?})", self.mode);
            return;
        }
        self.platform.wait_vsync();
        if let Some(backup) = self.palette_backup.take() {
            self.platform.set_palette(&backup);
        }
        self.platform.set_video_state(VideoState::Text);
        self.platform.exit_graphics(Mapping::Default);
        self.mode = Mode::Text;
        debug!("text mode restored");
    }

    pub fn wait_vsync(&mut self) {
        self.platform.wait_vsync();
    }

    /// Map the graphics plane for the lifetime of the returned scope.
    pub fn gfx(&mut self) -> GfxScope<'_, P> {
        let previous = self.platform.enter_graphics();
        trace!("gfx scope enter, was {:?}", previous);
        GfxScope {
            platform: &mut self.platform,
            writes: &mut self.writes,
            previous,
        }
    }
}

/// Graphics-plane access. Restores the previous mapping when dropped.
pub struct GfxScope<'a, P: Platform> {
    platform: &'a mut P,
    writes: &'a mut u32,
    previous: Mapping,
}

impl<'a, P: Platform> Drop for GfxScope<'a, P> {
    fn drop(&mut self) {
        self.platform.exit_graphics(self.previous);
        trace!("gfx scope exit, back to {:?}", self.previous);
    }
}

impl<'a, P: Platform> GfxScope<'a, P> {
    /// Drawing surface over the mapped plane.
    pub fn raster<'s>(&'s mut self, glyphs: &'s GlyphSet<'s>) -> Raster<'s> {
        let geometry = self.platform.geometry();
        let fb = FrameBuffer::new(self.platform.screen(), geometry, self.writes);
        Raster::new(fb, glyphs)
    }
}
