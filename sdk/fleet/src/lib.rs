//! # Fleet
//!
//! Board rendering and input for a four-player battleship game on the Tandy
//! Color Computer.
//!
//! ## Quick Start
//!
//! The firmware supplies the [`Cpu`](platform::Cpu) services, the glyph
//! table and the stored colour preference; everything else goes through a
//! [`Screen`](screen::Screen) and an [`Input`](input::Input):
//!
//! ```ignore
//! use fleet::{glyphs::GlyphSet, input::{pia::PiaInput, Input}, palette::ColorMode};
//! use fleet::{platform::Target, rop::Depth, screen::Screen};
//!
//! let glyphs = GlyphSet::new(unsafe { &mut CHARSET }, Depth::Sixteen);
//! let mut screen = Screen::new(unsafe { Target::new(Firmware) }, glyphs, ColorMode::from_pref(prefs.color));
//! let mut input = Input::new(unsafe { PiaInput::new() });
//!
//! screen.init_graphics(&mut input);
//! screen.draw_board(players);
//!
//! loop {
//!     if input.has_key() {
//!         match input.next_key() {
//!             b'C' => prefs.color = screen.cycle_next_color().pref(),
//!             _ => {}
//!         }
//!     }
//!     let joy = input.read_joystick();
//!     // ...
//!     screen.draw_cell(quadrant, &fields[quadrant as usize], attack, frame);
//! }
//! ```
//!
//! ## Layers
//!
//! | Module          | Does                                                  |
//! |-----------------|-------------------------------------------------------|
//! | [`raster`]      | glyph, run and pattern blits with a [`rop::RasterOp`] |
//! | [`display`]     | graphics mode state and the graphics-access scope     |
//! | [`palette`]     | RGB and composite colour tables                       |
//! | [`layout`]      | where each player's board, badge and drawer go        |
//! | [`board`]       | frames, cells, cursors and ships                      |
//! | [`text`]        | names, messages and status icons                      |
//! | [`input`]       | keyboard cache and joystick snapshot                  |
//! | [`platform`]    | per-machine hardware access                           |
//!
//! ## Hardware Variants
//!
//! Both variants draw on the same 32-cell by 192-scanline canvas. The
//! Color Computer 3 runs it in a 16-colour 320x200 mode, centred, with the
//! plane banked in through the MMU; the Color Computer 1/2 uses the
//! four-colour PMODE 3 screen in main RAM. The `coco3` (default) and
//! `coco2` features pick which one [`platform::Target`] names.

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod display;
pub mod framebuffer;
pub mod glyphs;
pub mod hw;
pub mod input;
pub mod layout;
pub mod palette;
pub mod platform;
pub mod raster;
pub mod rop;
pub mod scr;
pub mod screen;
pub mod text;
