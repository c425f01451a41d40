//! # PIA Input Device
//!
//! Reads the keyboard and joysticks directly from the two PIAs.
//!
//! ## Keyboard
//!
//! Columns are strobed low one at a time through `$FF02`; pressed keys pull
//! their row low on `$FF00` bits 0-6.
//!
//! ```text
//!        col 0   1   2   3   4   5   6   7
//! row 0      @   A   B   C   D   E   F   G
//! row 1      H   I   J   K   L   M   N   O
//! row 2      P   Q   R   S   T   U   V   W
//! row 3      X   Y   Z   UP  DN  LT  RT  SPACE
//! row 4      0   1   2   3   4   5   6   7
//! row 5      8   9   :   ;   ,   -   .   /
//! row 6     ENT CLR BRK ALT CTL F1  F2  SHIFT
//! ```
//!
//! ## Joysticks
//!
//! Each axis is compared against the 6-bit DAC at `$FF20` bits 2-7; the
//! comparator result is `$FF00` bit 7. A successive approximation over the
//! six DAC bits gives the 0-63 reading. The analogue mux is selected by the
//! CA2 (`$FF01` bit 3) and CB2 (`$FF03` bit 3) lines.

use bit_field::BitField;

use crate::{
    hw::Pia,
    input::{Axis, InputDevice},
};

pub mod key {
    pub const BREAK: u8 = 0x03;
    pub const LEFT: u8 = 0x08;
    pub const RIGHT: u8 = 0x09;
    pub const DOWN: u8 = 0x0A;
    pub const CLEAR: u8 = 0x0C;
    pub const ENTER: u8 = 0x0D;
    pub const SPACE: u8 = 0x20;
    pub const UP: u8 = 0x5E;
}

const SHIFT_ROW: usize = 6;
const SHIFT_COL: usize = 7;

/// Unshifted key codes, `[row][column]`. Zero for keys without a code.
const KEYMAP: [[u8; 8]; 7] = [
    *b"@ABCDEFG",
    *b"HIJKLMNO",
    *b"PQRSTUVW",
    [b'X', b'Y', b'Z', key::UP, key::DOWN, key::LEFT, key::RIGHT, key::SPACE],
    *b"01234567",
    *b"89:;,-./",
    [key::ENTER, key::CLEAR, key::BREAK, 0, 0, 0, 0, 0],
];

/// Key codes with SHIFT held.
const SHIFTED: [[u8; 8]; 7] = [
    [0x13, b'a', b'b', b'c', b'd', b'e', b'f', b'g'],
    *b"hijklmno",
    *b"pqrstuvw",
    [b'x', b'y', b'z', 0x5F, 0x5B, 0x15, 0x5D, key::SPACE],
    *b"0!\"#$%&'",
    *b"()*+<=>?",
    [key::ENTER, 0x5C, key::BREAK, 0, 0, 0, 0, 0],
];

/// Keyboard and joystick reader over PIA0 and PIA1.
pub struct PiaInput {
    pia0: &'static mut Pia,
    pia1: &'static mut Pia,
    /// Rows held down at the last scan, one byte per column, active high.
    held: [u8; 8],
}

impl PiaInput {
    /// Take both PIAs.
    ///
    /// # Safety
    ///
    /// The keyboard, joystick and DAC lines must not be driven by anything
    /// else (BASIC's interrupt-driven sound included).
    pub unsafe fn new() -> Self {
        unsafe {
            Self {
                pia0: Pia::pia0(),
                pia1: Pia::pia1(),
                held: [0; 8],
            }
        }
    }

    /// Rows pulled low while `column` is strobed.
    fn scan_column(&mut self, column: usize) -> u8 {
        unsafe { self.pia0.port_b.write(!(1 << column)) };
        let rows = !self.pia0.port_a.read() & 0x7F;
        unsafe { self.pia0.port_b.write(0xFF) };
        rows
    }

    fn select_axis(&mut self, axis: Axis) {
        let index = axis as u8;
        let ca2 = *self.pia0.control_a.read().set_bit(3, index.get_bit(0));
        let cb2 = *self.pia0.control_b.read().set_bit(3, index.get_bit(1));
        unsafe {
            self.pia0.control_a.write(ca2);
            self.pia0.control_b.write(cb2);
        }
    }
}

impl InputDevice for PiaInput {
    /// Newly pressed key, with Color BASIC key codes. Held keys are only
    /// reported once.
    fn inkey(&mut self) -> u8 {
        let mut found = None;
        let mut shift = false;
        for column in 0..8 {
            let rows = self.scan_column(column);
            let new = rows & !self.held[column];
            self.held[column] = rows;
            if column == SHIFT_COL && rows.get_bit(SHIFT_ROW) {
                shift = true;
            }
            if found.is_some() {
                continue;
            }
            for row in 0..7 {
                if new.get_bit(row) && !(row == SHIFT_ROW && column == SHIFT_COL) {
                    found = Some((row, column));
                    break;
                }
            }
        }
        match found {
            Some((row, column)) if shift => SHIFTED[row][column],
            Some((row, column)) => KEYMAP[row][column],
            None => 0,
        }
    }

    fn buttons(&mut self) -> u8 {
        unsafe { self.pia0.port_b.write(0xFF) };
        self.pia0.port_a.read() | 0xF0
    }

    fn axis(&mut self, axis: Axis) -> u8 {
        // Mute the single-bit sound source so the DAC is free.
        let sound = *self.pia1.control_b.read().set_bit(3, false);
        unsafe { self.pia1.control_b.write(sound) };
        self.select_axis(axis);

        let mut value = 0u8;
        for bit in (0..6).rev() {
            let trial = value | (1 << bit);
            let serial = self.pia1.port_a.read() & 0b11;
            unsafe { self.pia1.port_a.write((trial << 2) | serial) };
            if self.pia0.port_a.read().get_bit(7) {
                value = trial;
            }
        }
        value
    }
}
