//! # Platform Layer
//!
//! Everything above this module draws through [`Platform`], so one drawing
//! API covers both hardware variants:
//!
//! - [`Coco3`](coco3::Coco3): 16-colour GIME mode, palette, graphics plane
//!   banked in through MMU task 1.
//! - [`Coco2`](coco2::Coco2): 4-colour VDG mode, screen in main RAM, no
//!   palette.
//! - [`Emulated`](emulated::Emulated): either variant over in-memory banks,
//!   recording every hardware event. Used by the tests and host tools.
//!
//! The shipped variant is picked at build time by the `coco3` / `coco2`
//! features and aliased as [`Target`].
//!
//! Hardware writes cannot fail, so nothing here returns an error.

pub mod coco2;
pub mod coco3;
pub mod emulated;

use crate::framebuffer::Geometry;

/// Which address-space mapping the CPU window uses.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Mapping {
    /// Program RAM; I/O and the network stack expect this.
    #[default]
    Default,
    /// Graphics plane visible in the window.
    Graphics,
}

/// What the video hardware is scanning out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum VideoState {
    Text,
    Graphics,
}

/// CPU services the firmware provides. These need instructions (`orcc`,
/// `andcc`, `sync`) rather than memory accesses.
pub trait Cpu {
    /// Set the I and F condition-code bits.
    fn mask_irq(&mut self);
    /// Clear the I and F condition-code bits.
    fn unmask_irq(&mut self);
    /// Block until the next vertical sync.
    fn wait_vsync(&mut self);
}

/// Hardware access the display layer needs.
pub trait Platform {
    /// Shape of the graphics plane.
    fn geometry(&self) -> Geometry;

    /// Whether this hardware has programmable colour registers.
    fn has_palette(&self) -> bool;

    fn mask_interrupts(&mut self);
    fn unmask_interrupts(&mut self);

    /// Load the MMU task that exposes the graphics plane. A no-op without
    /// an MMU.
    fn install_bank_table(&mut self);

    /// Map the graphics plane into the CPU window, returning the mapping
    /// that was active before.
    fn enter_graphics(&mut self) -> Mapping;

    /// Restore a mapping returned by [`enter_graphics`](Self::enter_graphics).
    fn exit_graphics(&mut self, previous: Mapping);

    /// The graphics plane as seen through the CPU window. Only meaningful
    /// while the graphics mapping is active.
    fn screen(&mut self) -> &mut [u8];

    /// Current colour registers. All zero without a palette.
    fn palette(&self) -> [u8; 16];

    fn set_palette(&mut self, colors: &[u8; 16]);

    /// Reprogram the video mode registers.
    fn set_video_state(&mut self, state: VideoState);

    fn wait_vsync(&mut self);
}

/// Hardware the shipped build runs on.
#[cfg(feature = "coco3")]
pub type Target<C> = coco3::Coco3<C>;

/// Hardware the shipped build runs on.
#[cfg(all(feature = "coco2", not(feature = "coco3")))]
pub type Target<C> = coco2::Coco2<C>;
