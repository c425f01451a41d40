//! # Color Computer 3
//!
//! The program owns 64K of the 512K machine. The 32K graphics plane lives
//! in physical blocks 52-55 ($68000) and is only reachable through MMU task
//! 1, which keeps the program's low 32K and swaps the upper window:
//!
//! ```text
//! task 1:  $0000 56 | $2000 57 | $4000 58 | $6000 59 | $8000 52 | $A000 53 | $C000 54 | $E000 55
//! ```
//!
//! The GIME scans the plane from `$D000 * 8 = $68000` regardless of the CPU
//! mapping, so switching tasks never disturbs the picture.

use log::debug;

use crate::{
    framebuffer::Geometry,
    hw::{Gime, Pia, Sam},
    platform::{coco2, Cpu, Mapping, Platform, VideoState},
    scr::{Init0, Init1, VideoMode, VideoRes},
};

/// Block registers loaded into task 1.
pub const TASK1_BLOCKS: [u8; 8] = [56, 57, 58, 59, 52, 53, 54, 55];

/// Vertical offset register value for block 52.
const SCREEN_OFFSET: u16 = 0xD000;

/// Start of the upper 32K window.
const WINDOW: usize = 0x8000;

pub struct Coco3<C: Cpu> {
    cpu: C,
    gime: &'static mut Gime,
    sam: &'static mut Sam,
    pia1: &'static mut Pia,
    /// Shadow copy of write-only `$FF90`.
    init0: Init0,
    /// Shadow copy of write-only `$FF91`.
    init1: Init1,
}

impl<C: Cpu> Coco3<C> {
    /// Take the GIME, SAM and PIA1 registers.
    ///
    /// # Safety
    ///
    /// Only one platform may exist; it assumes exclusive use of the video
    /// and MMU registers.
    pub unsafe fn new(cpu: C) -> Self {
        unsafe {
            Self {
                cpu,
                gime: Gime::new(),
                sam: Sam::new(),
                pia1: Pia::pia1(),
                init0: Init0::COCO_COMPAT | Init0::MMU_ENABLE | Init0::FIXED_FEXX | Init0::SCS,
                init1: Init1::empty(),
            }
        }
    }

    pub fn cpu(&mut self) -> &mut C {
        &mut self.cpu
    }

    #[inline(always)]
    fn write_init0(&mut self) {
        unsafe { self.gime.init0.write(self.init0.bits()) };
    }

    #[inline(always)]
    fn write_init1(&mut self) {
        unsafe { self.gime.init1.write(self.init1.bits()) };
    }

    fn select_task(&mut self, mapping: Mapping) {
        self.init1.set(Init1::TASK_1, mapping == Mapping::Graphics);
        self.write_init1();
    }
}

impl<C: Cpu> Platform for Coco3<C> {
    fn geometry(&self) -> Geometry {
        Geometry::ENHANCED
    }

    fn has_palette(&self) -> bool {
        true
    }

    fn mask_interrupts(&mut self) {
        self.cpu.mask_irq();
    }

    fn unmask_interrupts(&mut self) {
        self.cpu.unmask_irq();
    }

    fn install_bank_table(&mut self) {
        for (register, block) in self.gime.mmu[8..].iter().zip(TASK1_BLOCKS) {
            unsafe { register.write(block) };
        }
    }

    fn enter_graphics(&mut self) -> Mapping {
        let previous = if self.init1.contains(Init1::TASK_1) {
            Mapping::Graphics
        } else {
            Mapping::Default
        };
        if previous != Mapping::Graphics {
            self.select_task(Mapping::Graphics);
        }
        previous
    }

    fn exit_graphics(&mut self, previous: Mapping) {
        self.select_task(previous);
    }

    fn screen(&mut self) -> &mut [u8] {
        unsafe { &mut *(WINDOW as *mut [u8; Geometry::ENHANCED.size()]) }
    }

    fn palette(&self) -> [u8; 16] {
        let mut colors = [0; 16];
        for (color, register) in colors.iter_mut().zip(self.gime.palette.iter()) {
            *color = register.read() & 0x3F;
        }
        colors
    }

    fn set_palette(&mut self, colors: &[u8; 16]) {
        for (register, &color) in self.gime.palette.iter().zip(colors) {
            unsafe { register.write(color) };
        }
    }

    fn set_video_state(&mut self, state: VideoState) {
        match state {
            VideoState::Graphics => {
                // 320x200, 16 colours, 160 bytes per row.
                self.init0.remove(Init0::COCO_COMPAT);
                self.write_init0();
                let res = VideoRes::LINES_200 | VideoRes::BYTES_160 | VideoRes::COLORS_16;
                unsafe {
                    self.gime.video_mode.write(VideoMode::GRAPHICS.bits());
                    self.gime.video_res.write(res.bits());
                    self.gime.border.write(0);
                    let [hi, lo] = SCREEN_OFFSET.to_be_bytes();
                    self.gime.vertical_offset_hi.write(hi);
                    self.gime.vertical_offset_lo.write(lo);
                }
            }
            VideoState::Text => {
                self.init0.insert(Init0::COCO_COMPAT);
                self.write_init0();
                coco2::vdg_text(self.sam, self.pia1);
            }
        }
        debug!("video state {:?}, init0 {:#04x}", state, self.init0.bits());
    }

    fn wait_vsync(&mut self) {
        self.cpu.wait_vsync();
    }
}
