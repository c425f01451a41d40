//! # Memory-Mapped I/O Blocks
//!
//! Register blocks of the Color Computer chips this crate drives, as
//! `#[repr(C, packed)]` structs of volatile cells at their fixed addresses:
//!
//! | Address          | Block    | Used for                                  |
//! |------------------|----------|-------------------------------------------|
//! | `$FF00`          | [`Pia`]  | keyboard rows, joystick comparator        |
//! | `$FF20`          | [`Pia`]  | DAC, VDG mode pins, sound enable          |
//! | `$FF90`-`$FFBF`  | [`Gime`] | video mode, MMU task registers, palette   |
//! | `$FFC0`-`$FFDF`  | [`Sam`]  | display mode and display offset bits      |

use bit_field::BitField;
use volatile_register::{RW, WO};

/// MC6821 PIA: two 8-bit ports, each with a control register.
#[repr(C, packed)]
pub struct Pia {
    pub port_a: RW<u8>,
    pub control_a: RW<u8>,
    pub port_b: RW<u8>,
    pub control_b: RW<u8>,
}

impl Pia {
    /// PIA0: keyboard matrix and joystick comparator.
    pub unsafe fn pia0() -> &'static mut Pia {
        unsafe { &mut *(0xFF00 as *mut Pia) }
    }

    /// PIA1: 6-bit DAC, VDG mode pins and sound.
    pub unsafe fn pia1() -> &'static mut Pia {
        unsafe { &mut *(0xFF20 as *mut Pia) }
    }
}

/// GIME register file of the Color Computer 3.
#[repr(C, packed)]
pub struct Gime {
    pub init0: WO<u8>,
    pub init1: WO<u8>,
    pub irq_enable: RW<u8>,
    pub firq_enable: RW<u8>,
    pub timer_hi: WO<u8>,
    pub timer_lo: WO<u8>,
    _reserved0: [WO<u8>; 2],
    pub video_mode: WO<u8>,
    pub video_res: WO<u8>,
    pub border: WO<u8>,
    _reserved1: WO<u8>,
    pub vertical_scroll: WO<u8>,
    pub vertical_offset_hi: WO<u8>,
    pub vertical_offset_lo: WO<u8>,
    pub horizontal_offset: WO<u8>,
    /// Eight 8K block registers for task 0, then eight for task 1.
    pub mmu: [RW<u8>; 16],
    /// Sixteen 6-bit colour registers.
    pub palette: [RW<u8>; 16],
}

impl Gime {
    pub unsafe fn new() -> &'static mut Gime {
        unsafe { &mut *(0xFF90 as *mut Gime) }
    }
}

/// SAM (MC6883) control bits. Each bit is a pair of addresses: writing
/// anything to the even one clears it, to the odd one sets it.
#[repr(C, packed)]
pub struct Sam {
    pub bits: [WO<u8>; 32],
}

/// First pair of the three display mode (V) bits.
pub const SAM_V: usize = 0;
/// First pair of the seven display offset (F) bits.
pub const SAM_F: usize = 3;

impl Sam {
    pub unsafe fn new() -> &'static mut Sam {
        unsafe { &mut *(0xFFC0 as *mut Sam) }
    }

    /// Program `count` consecutive SAM bits starting at pair `first` from
    /// the low bits of `value`.
    pub fn set_field(&mut self, first: usize, count: usize, value: u8) {
        for bit in 0..count {
            let pair = (first + bit) * 2;
            let address = pair + value.get_bit(bit) as usize;
            unsafe { self.bits[address].write(0) };
        }
    }
}
