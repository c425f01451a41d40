//! # Screen
//!
//! [`Screen`] is what the game talks to. It bundles the [`Display`], the
//! glyph table and a [`RenderContext`] holding the state that used to be
//! process-wide: the board layout, whose turn it is and the colour
//! preference. The drawing calls themselves live in the `board` and `text`
//! modules as further `impl Screen` blocks.
//!
//! Every drawing call opens one graphics scope, does all of its writes and
//! closes it again before returning.
//!
//! ```ignore
//! let mut screen = Screen::new(platform, glyphs, ColorMode::from_pref(prefs.color));
//! screen.init_graphics(&mut input);
//! screen.draw_board(players);
//! loop {
//!     screen.draw_cell(quadrant, &field, attack, frame);
//!     // ...
//! }
//! screen.reset_graphics();
//! ```

use log::{debug, warn};

use crate::{
    display::Display,
    glyphs::GlyphSet,
    input::{Input, InputDevice},
    layout::Layout,
    palette::ColorMode,
    platform::Platform,
    raster::Raster,
};

/// The colour-mode question, drawn dimmed while waiting for an answer.
pub const COLOR_PROMPT: &str = "r-RGB or c-COMPOSITE";

/// Renderer state that outlives a single call.
///
/// `layout` is rebuilt by [`Screen::draw_board`] at the start of every game
/// or player-count change. `active_player` and `color_mode` persist until
/// the game changes them.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct RenderContext {
    pub layout: Layout,
    /// Slot whose turn it is; 0 is the local player.
    pub active_player: u8,
    pub color_mode: ColorMode,
}

pub struct Screen<'g, P: Platform> {
    pub display: Display<P>,
    glyphs: GlyphSet<'g>,
    context: RenderContext,
}

impl<'g, P: Platform> Screen<'g, P> {
    /// `color_mode` is the stored preference, possibly still unset.
    pub fn new(platform: P, glyphs: GlyphSet<'g>, color_mode: ColorMode) -> Self {
        Self {
            display: Display::new(platform),
            glyphs,
            context: RenderContext {
                color_mode,
                ..RenderContext::default()
            },
        }
    }

    pub fn glyphs(&self) -> &GlyphSet<'g> {
        &self.glyphs
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn layout(&self) -> Layout {
        self.context.layout
    }

    pub(crate) fn set_layout(&mut self, layout: Layout) {
        self.context.layout = layout;
    }

    /// Run `f` with a raster inside one graphics scope.
    pub(crate) fn with_raster<R>(&mut self, f: impl FnOnce(&mut Raster<'_>, &RenderContext) -> R) -> R {
        let mut scope = self.display.gfx();
        let mut raster = scope.raster(&self.glyphs);
        f(&mut raster, &self.context)
    }

    /// Enter graphics mode, clear the screen and, on hardware with a
    /// palette, make sure a colour mode has been chosen.
    pub fn init_graphics<D: InputDevice>(&mut self, input: &mut Input<D>) {
        self.display.init_graphics(&mut self.glyphs);
        self.reset_screen();
        self.rgb_or_composite(input);
    }

    pub fn reset_graphics(&mut self) {
        self.display.reset_graphics();
    }

    /// Zero the whole frame buffer.
    pub fn reset_screen(&mut self) {
        self.with_raster(|r, _| r.clear());
    }

    pub fn wait_vsync(&mut self) {
        self.display.wait_vsync();
    }

    pub fn active_player(&self) -> u8 {
        self.context.active_player
    }

    pub fn set_active_player(&mut self, slot: u8) {
        self.context.active_player = slot;
    }

    pub fn color_mode(&self) -> ColorMode {
        self.context.color_mode
    }

    /// Replace the preference without touching the colour registers.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.context.color_mode = mode;
    }

    /// Ask for RGB or composite until one is picked, then load its colours.
    /// Any other key just asks again. Does nothing without a palette.
    pub fn rgb_or_composite<D: InputDevice>(&mut self, input: &mut Input<D>) {
        if !self.display.platform().has_palette() {
            return;
        }
        while self.context.color_mode == ColorMode::Unset {
            self.draw_text_alt_at(10, 96, COLOR_PROMPT);
            if let Some(mode) = ColorMode::from_key(input.next_key()) {
                debug!("colour mode chosen: {:?}", mode);
                self.context.color_mode = mode;
            }
        }
        self.display.update_colors(self.context.color_mode);
    }

    /// Switch to the other colour table and apply it. Returns the new
    /// preference, or [`ColorMode::Unset`] if none was ever chosen.
    pub fn cycle_next_color(&mut self) -> ColorMode {
        if self.context.color_mode == ColorMode::Unset {
            return ColorMode::Unset;
        }
        if !self.display.platform().has_palette() {
            warn!("cycle_next_color: no palette on this hardware");
        }
        self.context.color_mode = self.context.color_mode.next();
        self.display.update_colors(self.context.color_mode);
        self.context.color_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        palette::{COMPOSITE, RGB},
        platform::emulated::{Emulated, Event, ScriptedInput, Variant},
        rop::Depth,
    };

    #[test]
    fn prompt_repeats_until_r_or_c() {
        let mut data = [0u8; 32 * 128];
        let glyphs = GlyphSet::new(&mut data, Depth::Sixteen);
        let mut screen = Screen::new(Emulated::new(Variant::Enhanced), glyphs, ColorMode::Unset);
        let mut input = Input::new(ScriptedInput::new());
        input.device_mut().type_keys(b"xqc");

        screen.init_graphics(&mut input);
        assert_eq!(screen.color_mode(), ColorMode::Composite);
        assert_eq!(screen.display.platform().palette(), COMPOSITE);
        assert_eq!(input.device().pending_keys(), 0);
    }

    #[test]
    fn stored_preference_skips_the_prompt() {
        let mut data = [0u8; 32 * 128];
        let glyphs = GlyphSet::new(&mut data, Depth::Sixteen);
        let mut screen = Screen::new(Emulated::new(Variant::Enhanced), glyphs, ColorMode::from_pref(1));
        let mut input = Input::new(ScriptedInput::new());
        screen.init_graphics(&mut input);
        assert_eq!(input.device().key_polls(), 0);
        assert_eq!(screen.display.platform().palette(), RGB);
    }

    #[test]
    fn cycling_flips_and_reapplies() {
        let mut data = [0u8; 32];
        let glyphs = GlyphSet::new(&mut data, Depth::Sixteen);
        let mut screen = Screen::new(Emulated::new(Variant::Enhanced), glyphs, ColorMode::Rgb);
        assert_eq!(screen.cycle_next_color(), ColorMode::Composite);
        assert_eq!(screen.cycle_next_color(), ColorMode::Rgb);
        assert_eq!(
            screen.display.platform().events(),
            &[Event::Palette(COMPOSITE), Event::Palette(RGB)]
        );
    }

    #[test]
    fn cycling_without_a_preference_does_nothing() {
        let mut data = [0u8; 32];
        let glyphs = GlyphSet::new(&mut data, Depth::Sixteen);
        let mut screen = Screen::new(Emulated::new(Variant::Enhanced), glyphs, ColorMode::Unset);
        assert_eq!(screen.cycle_next_color(), ColorMode::Unset);
        assert!(screen.display.platform().events().is_empty());
    }

    #[test]
    fn base_hardware_never_prompts() {
        let mut data = [0u8; 8 * 128];
        let glyphs = GlyphSet::new(&mut data, Depth::Four);
        let mut screen = Screen::new(Emulated::new(Variant::Base), glyphs, ColorMode::Unset);
        let mut input = Input::new(ScriptedInput::new());
        screen.init_graphics(&mut input);
        assert_eq!(input.device().key_polls(), 0);
        assert_eq!(screen.color_mode(), ColorMode::Unset);
    }
}
