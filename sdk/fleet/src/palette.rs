//! # Palette
//!
//! The enhanced hardware has sixteen 6-bit colour registers at `$FFB0`.
//! An RGB monitor and a composite TV decode the same value into different
//! colours, so there is one table per display type; the player picks one
//! once and the choice is kept with the other game preferences.
//!
//! Base hardware has fixed colours and ignores all of this.

use log::debug;

use crate::{display::Display, platform::Platform};

/// Colours for an RGB monitor (bits `R1 G1 B1 R0 G0 B0`).
pub const RGB: [u8; 16] = [
    0,  // black
    7,  // dark grey
    56, // light grey
    63, // white
    28, // teal
    1,  // dark blue
    9,  // sea blue
    11, // light blue
    25, // foam
    27, // light foam
    4,  // dark red
    36, // red
    38, // red orange
    52, // orange
    54, // yellow
    63, // white
];

/// The same colours for a composite display (hue/intensity encoding).
pub const COMPOSITE: [u8; 16] = [
    0, 16, 32, 48, 30, 13, 12, 28, 44, 62, 7, 23, 22, 21, 36, 48,
];

/// The colour-mode preference.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum ColorMode {
    /// Not asked yet.
    #[default]
    Unset = 0,
    Rgb = 1,
    Composite = 2,
}

impl ColorMode {
    /// Decode a stored preference. Unknown values read as unset.
    pub const fn from_pref(value: u8) -> Self {
        match value {
            1 => ColorMode::Rgb,
            2 => ColorMode::Composite,
            _ => ColorMode::Unset,
        }
    }

    /// Value to store as the preference.
    pub const fn pref(self) -> u8 {
        self as u8
    }

    /// The other display type. Unset stays unset.
    pub const fn next(self) -> Self {
        match self {
            ColorMode::Unset => ColorMode::Unset,
            ColorMode::Rgb => ColorMode::Composite,
            ColorMode::Composite => ColorMode::Rgb,
        }
    }

    pub const fn table(self) -> Option<&'static [u8; 16]> {
        match self {
            ColorMode::Unset => None,
            ColorMode::Rgb => Some(&RGB),
            ColorMode::Composite => Some(&COMPOSITE),
        }
    }

    /// Map a key press from the colour prompt.
    pub const fn from_key(key: u8) -> Option<Self> {
        match key {
            b'R' | b'r' => Some(ColorMode::Rgb),
            b'C' | b'c' => Some(ColorMode::Composite),
            _ => None,
        }
    }
}

impl<P: Platform> Display<P> {
    /// Load the table for `mode` into the colour registers.
    pub fn update_colors(&mut self, mode: ColorMode) {
        if !self.platform().has_palette() {
            return;
        }
        if let Some(table) = mode.table() {
            debug!("palette {:?}", mode);
            self.platform_mut().set_palette(table);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preference_round_trips_through_its_stored_value() {
        for mode in [ColorMode::Unset, ColorMode::Rgb, ColorMode::Composite] {
            assert_eq!(ColorMode::from_pref(mode.pref()), mode);
        }
        assert_eq!(ColorMode::from_pref(9), ColorMode::Unset);
    }

    #[test]
    fn cycling_alternates_between_the_two_tables() {
        assert_eq!(ColorMode::Rgb.next(), ColorMode::Composite);
        assert_eq!(ColorMode::Composite.next(), ColorMode::Rgb);
        assert_eq!(ColorMode::Unset.next(), ColorMode::Unset);
    }

    #[test]
    fn only_r_and_c_are_accepted() {
        assert_eq!(ColorMode::from_key(b'r'), Some(ColorMode::Rgb));
        assert_eq!(ColorMode::from_key(b'C'), Some(ColorMode::Composite));
        assert_eq!(ColorMode::from_key(b'x'), None);
        assert_eq!(ColorMode::from_key(0x0D), None);
    }

    #[test]
    fn composite_table_is_the_second_one() {
        assert_eq!(ColorMode::Composite.table(), Some(&COMPOSITE));
        assert_ne!(RGB, COMPOSITE);
    }
}
