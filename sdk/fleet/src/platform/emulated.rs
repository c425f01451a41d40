//! # Emulated Machine
//!
//! A [`Platform`] over two in-memory 32K banks, one per side of the MMU
//! switch, plus a scripted [`InputDevice`]. Every hardware-visible action
//! is appended to an event log so callers can check ordering (interrupts
//! masked around mode changes, palette restored on exit, and so on).
//!
//! On the base variant the graphics plane is always visible; on the
//! enhanced variant [`Platform::screen`] returns whichever bank the current
//! mapping selects, so a write outside a graphics scope lands in program
//! RAM instead of the picture.

use heapless::{Deque, Vec};
use log::trace;

use crate::{
    framebuffer::Geometry,
    input::{Axis, InputDevice, AXIS_CENTER},
    platform::{Mapping, Platform, VideoState},
};

/// Colour registers as Color BASIC leaves them on a Color Computer 3.
pub const POWER_ON_PALETTE: [u8; 16] = [18, 36, 11, 7, 63, 31, 9, 38, 0, 18, 0, 63, 0, 18, 0, 38];

const BANK_SIZE: usize = 0x8000;
const EVENT_CAPACITY: usize = 128;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Variant {
    /// Four colours, no MMU, no palette.
    Base,
    /// Sixteen colours, MMU task switching, palette.
    Enhanced,
}

/// One hardware-visible action.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    MaskIrq,
    UnmaskIrq,
    BankTable,
    Map,
    Unmap(Mapping),
    Palette([u8; 16]),
    Vsync,
    Video(VideoState),
}

pub struct Emulated {
    variant: Variant,
    /// Program RAM behind the upper window.
    window: [u8; BANK_SIZE],
    /// Graphics plane.
    graphics: [u8; BANK_SIZE],
    mapping: Mapping,
    bank_table: bool,
    palette: [u8; 16],
    video: VideoState,
    irq_masked: bool,
    vsyncs: u32,
    events: Vec<Event, EVENT_CAPACITY>,
}

impl Emulated {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            window: [0; BANK_SIZE],
            graphics: [0; BANK_SIZE],
            mapping: Mapping::Default,
            bank_table: false,
            palette: match variant {
                Variant::Base => [0; 16],
                Variant::Enhanced => POWER_ON_PALETTE,
            },
            video: VideoState::Text,
            irq_masked: false,
            vsyncs: 0,
            events: Vec::new(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    fn record(&mut self, event: Event) {
        trace!("{:?}", event);
        // The log is bounded; the oldest events are kept.
        let _ = self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// The whole graphics plane, independent of the current mapping.
    pub fn plane(&self) -> &[u8] {
        &self.graphics[..self.geometry().size()]
    }

    /// Program RAM that the enhanced window shows with the default mapping.
    pub fn window(&self) -> &[u8] {
        &self.window
    }

    pub fn mapping(&self) -> Mapping {
        self.mapping
    }

    pub fn video_state(&self) -> VideoState {
        self.video
    }

    pub fn bank_table_installed(&self) -> bool {
        self.bank_table
    }

    pub fn irq_masked(&self) -> bool {
        self.irq_masked
    }

    pub fn vsyncs(&self) -> u32 {
        self.vsyncs
    }
}

impl Platform for Emulated {
    fn geometry(&self) -> Geometry {
        match self.variant {
            Variant::Base => Geometry::BASE,
            Variant::Enhanced => Geometry::ENHANCED,
        }
    }

    fn has_palette(&self) -> bool {
        self.variant == Variant::Enhanced
    }

    fn mask_interrupts(&mut self) {
        self.irq_masked = true;
        self.record(Event::MaskIrq);
    }

    fn unmask_interrupts(&mut self) {
        self.irq_masked = false;
        self.record(Event::UnmaskIrq);
    }

    fn install_bank_table(&mut self) {
        if self.variant == Variant::Enhanced {
            self.bank_table = true;
            self.record(Event::BankTable);
        }
    }

    fn enter_graphics(&mut self) -> Mapping {
        if self.variant == Variant::Base {
            return Mapping::Graphics;
        }
        let previous = self.mapping;
        if previous != Mapping::Graphics {
            self.mapping = Mapping::Graphics;
            self.record(Event::Map);
        }
        previous
    }

    fn exit_graphics(&mut self, previous: Mapping) {
        if self.variant == Variant::Base {
            return;
        }
        self.mapping = previous;
        self.record(Event::Unmap(previous));
    }

    fn screen(&mut self) -> &mut [u8] {
        let size = self.geometry().size();
        match (self.variant, self.mapping) {
            (Variant::Enhanced, Mapping::Default) => &mut self.window[..size],
            _ => &mut self.graphics[..size],
        }
    }

    fn palette(&self) -> [u8; 16] {
        self.palette
    }

    fn set_palette(&mut self, colors: &[u8; 16]) {
        if self.variant == Variant::Enhanced {
            self.palette = *colors;
            self.record(Event::Palette(*colors));
        }
    }

    fn set_video_state(&mut self, state: VideoState) {
        self.video = state;
        self.record(Event::Video(state));
    }

    fn wait_vsync(&mut self) {
        self.vsyncs += 1;
        self.record(Event::Vsync);
    }
}

/// Keyboard and joysticks driven from a test script.
///
/// Sticks start centred with no buttons down, like unplugged hardware.
pub struct ScriptedInput {
    keys: Deque<u8, 32>,
    axes: [u8; 4],
    /// Active low.
    buttons: u8,
    key_polls: u32,
}

impl Default for ScriptedInput {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self {
            keys: Deque::new(),
            axes: [AXIS_CENTER; 4],
            buttons: 0xFF,
            key_polls: 0,
        }
    }

    /// Queue one sample for [`InputDevice::inkey`]. Zero means "no key" for
    /// that sample. Returns false when the queue is full.
    pub fn push_key(&mut self, key: u8) -> bool {
        self.keys.push_back(key).is_ok()
    }

    /// Queue the bytes of `keys` in order, stopping when the queue fills.
    /// Returns how many were queued.
    pub fn type_keys(&mut self, keys: &[u8]) -> usize {
        keys.iter().take_while(|&&key| self.push_key(key)).count()
    }

    pub fn set_axis(&mut self, axis: Axis, value: u8) {
        self.axes[axis as usize] = value.min(63);
    }

    /// Hold down the buttons in `mask` (see [`button`](crate::input::button)).
    pub fn press(&mut self, mask: u8) {
        self.buttons &= !mask;
    }

    pub fn release(&mut self, mask: u8) {
        self.buttons |= mask;
    }

    /// How many times the keyboard has been sampled.
    pub fn key_polls(&self) -> u32 {
        self.key_polls
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }
}

impl InputDevice for ScriptedInput {
    fn inkey(&mut self) -> u8 {
        self.key_polls += 1;
        self.keys.pop_front().unwrap_or(0)
    }

    fn buttons(&mut self) -> u8 {
        self.buttons | 0xF0
    }

    fn axis(&mut self, axis: Axis) -> u8 {
        self.axes[axis as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enhanced_screen_follows_the_mapping() {
        let mut machine = Emulated::new(Variant::Enhanced);
        machine.screen()[0] = 1;
        let previous = machine.enter_graphics();
        machine.screen()[0] = 2;
        machine.exit_graphics(previous);
        assert_eq!(machine.window()[0], 1);
        assert_eq!(machine.plane()[0], 2);
        assert_eq!(
            machine.events(),
            &[Event::Map, Event::Unmap(Mapping::Default)]
        );
    }

    #[test]
    fn nested_entry_keeps_the_mapping() {
        let mut machine = Emulated::new(Variant::Enhanced);
        let outer = machine.enter_graphics();
        let inner = machine.enter_graphics();
        assert_eq!(inner, Mapping::Graphics);
        machine.exit_graphics(inner);
        assert_eq!(machine.mapping(), Mapping::Graphics);
        machine.exit_graphics(outer);
        assert_eq!(machine.mapping(), Mapping::Default);
    }

    #[test]
    fn base_has_no_palette_or_banking() {
        let mut machine = Emulated::new(Variant::Base);
        assert_eq!(machine.enter_graphics(), Mapping::Graphics);
        machine.set_palette(&[1; 16]);
        machine.install_bank_table();
        assert_eq!(machine.palette(), [0; 16]);
        assert!(machine.events().is_empty());
        assert!(!machine.bank_table_installed());
        assert_eq!(machine.screen().len(), 6144);
    }

    #[test]
    fn typed_keys_stop_when_the_queue_is_full() {
        let mut input = ScriptedInput::new();
        assert_eq!(input.type_keys(&[b'a'; 40]), 32);
        assert!(!input.push_key(b'b'));
        for _ in 0..32 {
            assert_eq!(input.inkey(), b'a');
        }
        assert_eq!(input.inkey(), 0);
        assert_eq!(input.type_keys(b"xy"), 2);
    }

    #[test]
    fn scripted_buttons_are_active_low() {
        let mut input = ScriptedInput::new();
        assert_eq!(input.buttons(), 0xFF);
        input.press(0b0010);
        assert_eq!(input.buttons(), 0xFD);
        input.release(0b0010);
        assert_eq!(input.buttons(), 0xFF);
    }
}
