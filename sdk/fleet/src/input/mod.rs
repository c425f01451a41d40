//! # Keyboard & Joysticks
//!
//! [`Input`] is the game's view of the input hardware: a non-blocking "key
//! available" check, a blocking "next key" call and a joystick snapshot. The
//! raw sampling lives behind [`InputDevice`], implemented by the PIA reader
//! ([`pia::PiaInput`]) on hardware and by
//! [`ScriptedInput`](crate::platform::emulated::ScriptedInput) in tests.
//!
//! ## Joysticks
//!
//! Two analogue sticks, each with two buttons. Only one stick is read for
//! directions at a time: pressing a button on the other stick selects it,
//! and the selection holds until a button on the unselected stick is
//! pressed again.
//!
//! ```ignore
//! let joy = input.read_joystick();
//! if joy.contains(Joy::UP | Joy::LEFT) {
//!     // diagonals are reported as-is
//! }
//! ```

pub mod pia;

use bit_field::BitField;
use log::debug;

/// Axis readings at or below this are "low" (up / left).
pub const AXIS_LOW: u8 = 15;
/// Axis readings at or above this are "high" (down / right).
pub const AXIS_HIGH: u8 = 47;
/// Reading of a centred (or absent) stick.
pub const AXIS_CENTER: u8 = 31;

bitflags::bitflags! {
    /// Joystick snapshot: directions in bits 0-3, buttons in bits 4-5.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    pub struct Joy: u8 {
        const UP      = 0b0000_0001;
        const DOWN    = 0b0000_0010;
        const LEFT    = 0b0000_0100;
        const RIGHT   = 0b0000_1000;
        const BUTTON1 = 0b0001_0000;
        const BUTTON2 = 0b0010_0000;
    }
}

/// Raw button lines, active low, as read from the low nibble of `$FF00`.
pub mod button {
    pub const RIGHT_1: u8 = 0b0001;
    pub const LEFT_1: u8 = 0b0010;
    pub const RIGHT_2: u8 = 0b0100;
    pub const LEFT_2: u8 = 0b1000;
}

/// Analogue multiplexer inputs, in mux select order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    RightX = 0,
    RightY = 1,
    LeftX = 2,
    LeftY = 3,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Stick {
    #[default]
    Left,
    Right,
}

impl Stick {
    const fn other(self) -> Self {
        match self {
            Stick::Left => Stick::Right,
            Stick::Right => Stick::Left,
        }
    }

    /// Bit positions of this stick's two buttons in the raw button byte.
    const fn button_bits(self) -> (usize, usize) {
        match self {
            Stick::Left => (1, 3),
            Stick::Right => (0, 2),
        }
    }

    const fn axes(self) -> (Axis, Axis) {
        match self {
            Stick::Left => (Axis::LeftX, Axis::LeftY),
            Stick::Right => (Axis::RightX, Axis::RightY),
        }
    }
}

/// Raw input sampling.
pub trait InputDevice {
    /// Newly pressed key, or 0 if none.
    fn inkey(&mut self) -> u8;

    /// Button lines, active low. See [`button`].
    fn buttons(&mut self) -> u8;

    /// One axis, 0..=63.
    fn axis(&mut self, axis: Axis) -> u8;
}

/// Key cache and joystick selection for one game.
pub struct Input<D: InputDevice> {
    device: D,
    last_key: Option<u8>,
    stick: Stick,
}

impl<D: InputDevice> Input<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            last_key: None,
            stick: Stick::default(),
        }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Forget the cached key and go back to the left stick.
    pub fn reset(&mut self) {
        self.last_key = None;
        self.stick = Stick::default();
    }

    /// Whether a key is waiting. Samples the keyboard at most twice when
    /// nothing is cached; the key seen is kept for [`next_key`](Self::next_key).
    pub fn has_key(&mut self) -> bool {
        if self.last_key.is_none() {
            self.last_key = self.sample().or_else(|| self.sample());
        }
        self.last_key.is_some()
    }

    /// Return the cached key, or block until one is pressed.
    pub fn next_key(&mut self) -> u8 {
        if let Some(key) = self.last_key.take() {
            return key;
        }
        loop {
            if let Some(key) = self.sample() {
                return key;
            }
        }
    }

    fn sample(&mut self) -> Option<u8> {
        match self.device.inkey() {
            0 => None,
            key => Some(key),
        }
    }

    pub fn selected_stick(&self) -> Stick {
        self.stick
    }

    /// Read buttons, update the stick selection, then threshold the selected
    /// stick's axes.
    pub fn read_joystick(&mut self) -> Joy {
        let pressed = !self.device.buttons();
        let any_button = |stick: Stick| {
            let (first, second) = stick.button_bits();
            pressed.get_bit(first) || pressed.get_bit(second)
        };
        if !any_button(self.stick) && any_button(self.stick.other()) {
            self.stick = self.stick.other();
            debug!("joystick {:?} selected", self.stick);
        }

        let (h, v) = self.stick.axes();
        let x = self.device.axis(h);
        let y = self.device.axis(v);

        let (first, second) = self.stick.button_bits();
        let mut joy = Joy::empty();
        joy.set(Joy::UP, y <= AXIS_LOW);
        joy.set(Joy::DOWN, y >= AXIS_HIGH);
        joy.set(Joy::LEFT, x <= AXIS_LOW);
        joy.set(Joy::RIGHT, x >= AXIS_HIGH);
        joy.set(Joy::BUTTON1, pressed.get_bit(first));
        joy.set(Joy::BUTTON2, pressed.get_bit(second));
        joy
    }
}
