//! # System Control Register Flags
//!
//! Bitflag shadows for the Color Computer video and memory registers this
//! crate touches. Most of them are write-only on real hardware, so the
//! platform keeps a shadow copy and writes the whole byte back.
//!
//! ## GIME (`$FF90`-`$FF99`, enhanced hardware)
//!
//! | Register | Flags           | Effect                                      |
//! |----------|-----------------|---------------------------------------------|
//! | `$FF90`  | [`Init0`]       | compatibility mode, MMU enable, `$FExx` map |
//! | `$FF91`  | [`Init1`]       | MMU task select                             |
//! | `$FF98`  | [`VideoMode`]   | graphics vs text, lines per row             |
//! | `$FF99`  | [`VideoRes`]    | scan lines, bytes per row, colours          |
//!
//! ## VDG (`$FF22`, both variants)
//!
//! The upper five bits of PIA1 port B drive the VDG mode pins, see
//! [`VdgMode`].

bitflags::bitflags! {
    /// GIME initialization register 0 at `$FF90`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Init0: u8 {
        /// Set for CoCo 1/2 compatible video. Cleared for GIME video modes.
        const COCO_COMPAT         = 0b1000_0000;
        /// Enable the MMU (required for any bank switching).
        const MMU_ENABLE          = 0b0100_0000;
        /// GIME chip IRQ output enable.
        const GIME_IRQ            = 0b0010_0000;
        /// GIME chip FIRQ output enable.
        const GIME_FIRQ           = 0b0001_0000;
        /// Keep `$FE00-$FEFF` constant regardless of the MMU task.
        const FIXED_FEXX          = 0b0000_1000;
        /// Standard SCS (cartridge select) decoding.
        const SCS                 = 0b0000_0100;
        // Bits 0-1: ROM map
        const ROM_16K_SPLIT       = 0b0000_0000;
        const ROM_INTERNAL        = 0b0000_0010;
        const ROM_EXTERNAL        = 0b0000_0011;
    }

    /// GIME initialization register 1 at `$FF91`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct Init1: u8 {
        /// Timer input clock source (set = 279.365 ns, clear = 63.695 us).
        const TIMER_FAST          = 0b0010_0000;
        /// MMU task select. Task 1 maps the graphics blocks at `$8000`.
        const TASK_1              = 0b0000_0001;
    }

    /// GIME video mode register at `$FF98`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct VideoMode: u8 {
        /// Bit-plane (graphics) mode.
        const GRAPHICS            = 0b1000_0000;
        /// Colour burst phase invert.
        const BURST_INVERT        = 0b0010_0000;
        /// Monochrome composite output.
        const MONOCHROME          = 0b0001_0000;
        /// 50 Hz vertical timing.
        const HZ_50               = 0b0000_1000;
        // Bits 0-2: lines per character row in text modes
    }

    /// GIME video resolution register at `$FF99`.
    ///
    /// ```text
    /// .XX..... : Scan Lines : 0=192, 1=200, 3=225
    /// ...XXX.. : Bytes/row  : 0=16, 1=20, 2=32, 3=40, 4=64, 5=80, 6=128, 7=160
    /// ......XX : Pixels/byte: 0=8 (2 colour), 1=4 (4 colour), 2=2 (16 colours)
    /// ```
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct VideoRes: u8 {
        const LINES_192           = 0b0000_0000;
        const LINES_200           = 0b0010_0000;
        const LINES_225           = 0b0110_0000;

        const BYTES_32            = 0b0000_1000;
        const BYTES_160           = 0b0001_1100;

        const COLORS_4            = 0b0000_0001;
        const COLORS_16           = 0b0000_0010;
    }

    /// VDG mode pins, bits 3-7 of PIA1 port B (`$FF22`).
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct VdgMode: u8 {
        /// Alpha/graphics select.
        const GRAPHICS            = 0b1000_0000;
        const GM2                 = 0b0100_0000;
        const GM1                 = 0b0010_0000;
        const GM0                 = 0b0001_0000;
        /// Colour set select.
        const CSS                 = 0b0000_1000;

        /// PMODE 3: 128x192, four colours.
        const PMODE_3             = 0b1110_0000;
    }
}

impl VdgMode {
    /// Bits of `$FF22` the VDG mode occupies. The rest belong to the
    /// printer, RAM size and single-bit sound lines.
    pub const MASK: u8 = 0b1111_1000;
}
