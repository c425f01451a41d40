//! # Color Computer 1/2
//!
//! PMODE 3 (128x192, four colours) with the screen at `$0E00` in main RAM.
//! There is no MMU and no palette: the graphics plane is always visible and
//! the colours are fixed by the VDG colour set.

use log::debug;

use crate::{
    framebuffer::Geometry,
    hw::{Pia, Sam, SAM_F, SAM_V},
    platform::{Cpu, Mapping, Platform, VideoState},
    scr::VdgMode,
};

/// Start of the PMODE 3 screen.
const SCREEN: usize = 0x0E00;
/// Start of the Color BASIC text screen.
const TEXT_SCREEN: usize = 0x0400;

/// SAM display mode for 6K graphics.
const SAM_MODE_G6: u8 = 0b110;

/// Point the VDG and SAM at a graphics or text screen.
pub(crate) fn vdg_mode(sam: &mut Sam, pia1: &mut Pia, vdg: VdgMode, sam_mode: u8, screen: usize) {
    let keep = pia1.port_b.read() & !VdgMode::MASK;
    unsafe { pia1.port_b.write(keep | vdg.bits()) };
    sam.set_field(SAM_V, 3, sam_mode);
    sam.set_field(SAM_F, 7, (screen / 512) as u8);
}

/// 32x16 text on the Color BASIC screen.
pub(crate) fn vdg_text(sam: &mut Sam, pia1: &mut Pia) {
    vdg_mode(sam, pia1, VdgMode::empty(), 0, TEXT_SCREEN);
}

pub struct Coco2<C: Cpu> {
    cpu: C,
    sam: &'static mut Sam,
    pia1: &'static mut Pia,
}

impl<C: Cpu> Coco2<C> {
    /// Take the SAM and PIA1 registers.
    ///
    /// # Safety
    ///
    /// Only one platform may exist; it assumes exclusive use of the video
    /// registers and of RAM from `$0E00` to `$25FF`.
    pub unsafe fn new(cpu: C) -> Self {
        unsafe {
            Self {
                cpu,
                sam: Sam::new(),
                pia1: Pia::pia1(),
            }
        }
    }

    pub fn cpu(&mut self) -> &mut C {
        &mut self.cpu
    }
}

impl<C: Cpu> Platform for Coco2<C> {
    fn geometry(&self) -> Geometry {
        Geometry::BASE
    }

    fn has_palette(&self) -> bool {
        false
    }

    fn mask_interrupts(&mut self) {
        self.cpu.mask_irq();
    }

    fn unmask_interrupts(&mut self) {
        self.cpu.unmask_irq();
    }

    fn install_bank_table(&mut self) {}

    fn enter_graphics(&mut self) -> Mapping {
        Mapping::Graphics
    }

    fn exit_graphics(&mut self, _previous: Mapping) {}

    fn screen(&mut self) -> &mut [u8] {
        unsafe { &mut *(SCREEN as *mut [u8; Geometry::BASE.size()]) }
    }

    fn palette(&self) -> [u8; 16] {
        [0; 16]
    }

    fn set_palette(&mut self, _colors: &[u8; 16]) {}

    fn set_video_state(&mut self, state: VideoState) {
        match state {
            VideoState::Graphics => {
                vdg_mode(self.sam, self.pia1, VdgMode::PMODE_3, SAM_MODE_G6, SCREEN)
            }
            VideoState::Text => vdg_text(self.sam, self.pia1),
        }
        debug!("video state {:?}", state);
    }

    fn wait_vsync(&mut self) {
        self.cpu.wait_vsync();
    }
}
