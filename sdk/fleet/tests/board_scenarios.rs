//! End-to-end drawing scenarios on the emulated machine.

use fleet::{
    board::Cell,
    framebuffer::Geometry,
    glyphs::{id, GlyphSet},
    input::Input,
    layout::{Layout, FIELD_SIZE},
    palette::{self, ColorMode},
    platform::{
        emulated::{Emulated, Event, ScriptedInput, Variant},
        Mapping, Platform, VideoState,
    },
    rop::Depth,
    screen::Screen,
};

const GLYPHS: usize = 128;

/// Glyph table where every byte of glyph `n` is `n`.
fn charset(depth: Depth) -> Vec<u8> {
    let size = depth.glyph_bytes();
    (0..GLYPHS * size).map(|i| (i / size) as u8).collect()
}

fn depth(variant: Variant) -> Depth {
    match variant {
        Variant::Base => Depth::Four,
        Variant::Enhanced => Depth::Sixteen,
    }
}

fn screen(data: &mut [u8], variant: Variant) -> Screen<'_, Emulated> {
    Screen::new(
        Emulated::new(variant),
        GlyphSet::new(data, depth(variant)),
        ColorMode::Rgb,
    )
}

fn plane(screen: &Screen<'_, Emulated>) -> Vec<u8> {
    screen.display.platform().plane().to_vec()
}

/// Base plane byte at canvas cell `x`, scanline `y`.
fn at(plane: &[u8], x: u8, y: u8) -> u8 {
    plane[Geometry::BASE.offset(x, y)]
}

#[test]
fn empty_cell_at_rest_writes_nothing() {
    for variant in [Variant::Base, Variant::Enhanced] {
        let mut data = charset(depth(variant));
        let mut screen = screen(&mut data, variant);
        screen.draw_board(2);
        screen.display.reset_write_count();
        screen.display.platform_mut().clear_events();

        let field = [Cell::Empty as u8; FIELD_SIZE];
        screen.draw_cell(1, &field, 34, 0);

        assert_eq!(screen.display.bytes_written(), 0);
        assert!(screen.display.platform().events().is_empty());
    }
}

#[test]
fn miss_on_cell_34_touches_only_that_cell() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_board(2);
    let before = plane(&screen);
    screen.display.reset_write_count();

    let mut field = [Cell::Empty as u8; FIELD_SIZE];
    field[34] = Cell::Miss as u8;
    screen.draw_cell(1, &field, 34, 0);

    let offset = Layout::quadrant_offset(1) as usize + 6 + 3 * 256 + 4;
    let after = plane(&screen);
    for (i, (old, new)) in before.iter().zip(&after).enumerate() {
        let in_cell = i >= offset && (i - offset) % 32 == 0 && (i - offset) / 32 < 8;
        if in_cell {
            assert_eq!(*new, id::CELL_MISS, "cell byte {i}");
        } else {
            assert_eq!(old, new, "byte {i} changed");
        }
    }
    assert_eq!(screen.display.bytes_written(), 8);
}

#[test]
fn miss_lands_in_the_centred_canvas_on_the_enhanced_machine() {
    let mut data = charset(Depth::Sixteen);
    let mut screen = screen(&mut data, Variant::Enhanced);
    screen.draw_board(2);
    let before = plane(&screen);

    let mut field = [Cell::Empty as u8; FIELD_SIZE];
    field[34] = Cell::Miss as u8;
    screen.draw_cell(1, &field, 34, 0);

    let cell = Layout::new(2).cell(1, 34);
    let glyph = screen.glyphs().glyph(id::CELL_MISS).to_vec();
    let after = plane(&screen);
    let mut changed = 0;
    for line in 0..8u8 {
        let start = Geometry::ENHANCED.offset(cell.x, cell.y + line);
        assert_eq!(&after[start..start + 4], &glyph[line as usize * 4..][..4]);
    }
    for (old, new) in before.iter().zip(&after) {
        if old != new {
            changed += 1;
        }
    }
    assert!(changed <= 32);
    assert_eq!(screen.display.platform().mapping(), Mapping::Default);
}

#[test]
fn hit_blinks_and_attacks_animate() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_board(4);
    let mut field = [Cell::Empty as u8; FIELD_SIZE];
    field[0] = Cell::Hit as u8;
    let cell = Layout::new(4).cell(2, 0);

    screen.draw_cell(2, &field, 0, 0);
    assert_eq!(at(&plane(&screen), cell.x, cell.y), id::CELL_HIT);

    screen.draw_cell(2, &field, 0, 1);
    assert_eq!(at(&plane(&screen), cell.x, cell.y), id::CELL_HIT_BLINK);

    // The local player watching their own hit sees the result, not the
    // animation.
    screen.draw_cell(2, &field, 0, 12);
    assert_eq!(at(&plane(&screen), cell.x, cell.y), id::CELL_HIT_BLINK);

    screen.set_active_player(1);
    screen.draw_cell(2, &field, 0, 12);
    assert_eq!(at(&plane(&screen), cell.x, cell.y), id::ATTACK_ANIM + 2);

    // Late frames run off the end of the strip and wrap around the table.
    screen.draw_cell(2, &field, 0, 200);
    assert_eq!(at(&plane(&screen), cell.x, cell.y), id::ATTACK_ANIM.wrapping_add(190));
    assert_eq!(id::ATTACK_ANIM.wrapping_add(190), 0x21);

    // Empty cells animate for everyone.
    screen.set_active_player(0);
    let empty = Layout::new(4).cell(2, 1);
    screen.draw_cell(2, &field, 1, 10);
    assert_eq!(at(&plane(&screen), empty.x, empty.y), id::ATTACK_ANIM);
}

#[test]
fn full_board_only_paints_marked_cells() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_board(3);
    screen.display.reset_write_count();

    let mut field = [Cell::Empty as u8; FIELD_SIZE];
    field[5] = Cell::Hit as u8;
    field[99] = Cell::Miss as u8;
    screen.draw_full_board(1, &field);

    assert_eq!(screen.display.bytes_written(), 16);
    let layout = Layout::new(3);
    let plane = plane(&screen);
    let hit = layout.cell(1, 5);
    let miss = layout.cell(1, 99);
    assert_eq!(at(&plane, hit.x, hit.y + 7), id::CELL_HIT);
    assert_eq!(at(&plane, miss.x, miss.y), id::CELL_MISS);
}

#[test]
fn hiding_a_ship_restores_the_sea() {
    for variant in [Variant::Base, Variant::Enhanced] {
        let mut data = charset(depth(variant));
        let mut screen = screen(&mut data, variant);
        screen.draw_board(2);
        let sea = plane(&screen);

        for (size, position) in [(4, 23), (3, 142), (5, 105), (2, 0)] {
            screen.draw_ship(size, position, false);
            assert_ne!(plane(&screen), sea, "ship {size} at {position} not drawn");
            screen.draw_ship(size, position, true);
            assert_eq!(plane(&screen), sea, "ship {size} at {position} not hidden");
        }
    }
}

#[test]
fn ships_use_end_caps_by_orientation() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_board(4);
    let layout = Layout::new(4);

    screen.draw_ship(3, 11, false);
    let start = layout.cell(0, 11);
    let plane_h = plane(&screen);
    assert_eq!(at(&plane_h, start.x, start.y), id::SHIP_H_START);
    assert_eq!(at(&plane_h, start.x + 1, start.y), id::SHIP_H_MIDDLE);
    assert_eq!(at(&plane_h, start.x + 2, start.y), id::SHIP_H_END);

    screen.draw_ship(2, 155, false);
    let top = layout.cell(0, 55);
    let plane_v = plane(&screen);
    assert_eq!(at(&plane_v, top.x, top.y), id::SHIP_V_START);
    assert_eq!(at(&plane_v, top.x, top.y + 8), id::SHIP_V_END);
}

#[test]
fn board_frame_is_idempotent() {
    for players in 1..=4 {
        let mut data = charset(Depth::Four);
        let mut screen = screen(&mut data, Variant::Base);
        screen.draw_board(players);
        let first = plane(&screen);
        screen.draw_board(players);
        assert_eq!(plane(&screen), first, "{players} players");
        assert_eq!(screen.layout(), Layout::new(players));
        assert_eq!(screen.layout().players(), players);
    }
}

#[test]
fn board_field_is_blue_and_edges_face_the_drawer() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_board(2);
    let plane = plane(&screen);

    // Slot 0: drawer on the left.
    let origin = Layout::new(2).origin(0);
    assert_eq!(at(&plane, origin.x + 3, origin.y + 40), 0b1010_1010);
    assert_eq!(at(&plane, origin.x - 1, origin.y), id::DRAWER_JOIN_LEFT);
    assert_eq!(at(&plane, origin.x - 5, origin.y), id::DRAWER_CORNER_LEFT);
    assert_eq!(at(&plane, origin.x - 5, origin.y + 72), id::DRAWER_CORNER_LEFT + 2);

    // Slot 1 of two: drawer on the right.
    let origin = Layout::new(2).origin(1);
    assert_eq!(at(&plane, origin.x + 10, origin.y), id::DRAWER_JOIN_RIGHT);
    assert_eq!(at(&plane, origin.x + 14, origin.y), id::DRAWER_CORNER_RIGHT);
    assert_eq!(at(&plane, origin.x - 1, origin.y - 8), id::BADGE_TOP_LEFT);
}

#[test]
fn lone_board_trims_its_far_edge() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_board(1);
    let plane = plane(&screen);
    let origin = Layout::new(1).origin(0);

    // The edge image starts four source bytes in, three lines tall.
    assert_eq!(at(&plane, origin.x, 95), id::FAR_EDGE);
    assert_eq!(at(&plane, origin.x + 4, 95), id::FAR_EDGE + 1);
    assert_eq!(at(&plane, origin.x, 97), id::FAR_EDGE + 3);
    assert_eq!(at(&plane, origin.x - 1, 95), id::FAR_EDGE_LEFT);
    assert_eq!(at(&plane, origin.x, 94), 0);
}

#[test]
fn lone_board_skips_the_same_source_bytes_on_the_enhanced_machine() {
    // Number every byte so the slice drawn shows where it was taken from.
    let mut data: Vec<u8> = (0..GLYPHS * 32).map(|i| i as u8).collect();
    let mut screen = screen(&mut data, Variant::Enhanced);
    screen.draw_board(1);
    let plane = plane(&screen);
    let origin = Layout::new(1).origin(0);
    let glyphs = screen.glyphs();
    let g = Geometry::ENHANCED;

    let left = g.offset(origin.x - 1, 95);
    assert_eq!(&plane[left..left + 4], &glyphs.run(id::FAR_EDGE_LEFT)[4..8]);
    assert_eq!(&plane[left..left + 4], &[68, 69, 70, 71]);

    let right = g.offset(origin.x + 10, 96);
    assert_eq!(&plane[right..right + 4], &glyphs.run(id::FAR_EDGE_RIGHT)[8..12]);

    let edge = g.offset(origin.x, 97);
    assert_eq!(&plane[edge..edge + 40], &glyphs.run(id::FAR_EDGE)[84..124]);
    let above = g.offset(origin.x, 94);
    assert!(plane[above..above + 40].iter().all(|&b| b == 0));
}

#[test]
fn legend_ships_fill_the_drawer() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_board(2);
    let pos = Layout::new(2).legend_pos(0, 0);

    screen.draw_legend_ship(0, 0, 5, false);
    let plane_out = plane(&screen);
    for line in 0..40u8 {
        assert_eq!(
            at(&plane_out, pos.x, pos.y + line),
            id::LEGEND_PLACEHOLDER + line / 8
        );
    }

    screen.draw_legend_ship(0, 0, 5, true);
    let plane_in = plane(&screen);
    assert_eq!(at(&plane_in, pos.x, pos.y), id::SHIP_V_START);
    assert_eq!(at(&plane_in, pos.x, pos.y + 16), id::SHIP_V_MIDDLE);
    assert_eq!(at(&plane_in, pos.x, pos.y + 32), id::SHIP_V_END);
}

#[test]
fn dimmed_text_folds_case_and_checkers_non_capitals() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_text_alt_at(0, 0, "Ab");
    screen.draw_text_at(0, 10, "ab");
    let plane = plane(&screen);

    assert_eq!(at(&plane, 0, 0), b'A');
    assert_eq!(at(&plane, 0, 1), b'A');
    assert_eq!(at(&plane, 1, 0), b'B' & 0b1010_1010);
    assert_eq!(at(&plane, 1, 1), b'B' & 0b0101_0101);

    assert_eq!(at(&plane, 0, 10), b'A');
    assert_eq!(at(&plane, 1, 11), b'B');
}

#[test]
fn player_names_sit_in_their_badges() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_board(4);
    screen.draw_player_name(2, "EVE", true);
    screen.draw_player_name(0, "bob", false);
    let named = plane(&screen);
    let layout = Layout::new(4);

    let eve = layout.name_pos(2);
    assert_eq!(eve.y, layout.origin(2).y - 9);
    assert_eq!(at(&named, eve.x - 1, eve.y), id::ACTIVE_MARKER | 0b0101_0101);
    assert_eq!(at(&named, eve.x, eve.y), b'E' | (!b'E' & 0b0101_0101));

    let bob = layout.name_pos(0);
    assert_eq!(bob.y, layout.origin(0).y + 80);
    let dimmed = (b'B' & 0b1010_1010) | (!b'B' & 0b0101_0101);
    assert_eq!(at(&named, bob.x, bob.y), dimmed);

    // Background goes back to clear afterwards.
    screen.draw_text_at(0, 0, "A");
    assert_eq!(at(&plane(&screen), 0, 0), b'A');
}

#[test]
fn status_line_and_banner() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    screen.draw_clock();
    screen.draw_connection_icon(true);
    let shown = plane(&screen);
    assert_eq!(at(&shown, 31, 184), id::CLOCK);
    assert_eq!(at(&shown, 0, 184), id::CONNECTED_LEFT);
    assert_eq!(at(&shown, 1, 191), id::CONNECTED_RIGHT);

    screen.draw_connection_icon(false);
    assert_eq!(at(&plane(&screen), 1, 184), id::SPACE);

    screen.draw_endgame_message("YOU WIN");
    let banner = plane(&screen);
    assert_eq!(at(&banner, 0, 182), 0b1010_1010);
    assert_eq!(at(&banner, 0, 190), 0b0101_0101);
    assert_eq!(at(&banner, 12, 183), b'Y' | (!b'Y' & 0b0101_0101));
}

#[test]
fn cursor_and_box_helpers() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);
    let mut field = [Cell::Empty as u8; FIELD_SIZE];
    field[23] = Cell::Miss as u8;
    let cell = Layout::new(4).cell(3, 23);

    screen.draw_cursor(3, 3, 2, &field, 1);
    assert_eq!(at(&plane(&screen), cell.x, cell.y), 2 * 2 + 5 + 1);
    screen.draw_cursor(3, 3, 2, &field, 0);
    assert_eq!(at(&plane(&screen), cell.x, cell.y), id::CELL_BLANK + 2);

    screen.draw_box(4, 3, 6, 2);
    let boxed = plane(&screen);
    assert_eq!(at(&boxed, 4, 27), id::BOX_TOP_LEFT);
    assert_eq!(at(&boxed, 11, 27), id::BOX_TOP_RIGHT);
    assert_eq!(at(&boxed, 4, 49), id::BOX_BOTTOM_LEFT);
    assert_eq!(at(&boxed, 11, 49), id::BOX_BOTTOM_RIGHT);

    screen.draw_space(4, 3, 8);
    assert_eq!(at(&plane(&screen), 4, 27), 0);

    screen.draw_line(0, 20, 2);
    let ruled = plane(&screen);
    assert_eq!(at(&ruled, 0, 163), 0b1010_1010);
    assert_eq!(at(&ruled, 1, 164), 0b1010_1010);
    assert_eq!(at(&ruled, 0, 165), 0);
}

#[test]
fn text_rows_past_the_canvas_wrap() {
    let mut data = charset(Depth::Four);
    let mut screen = screen(&mut data, Variant::Base);

    // Row 32 is 256 scanlines down, which lands back on row 0.
    screen.draw_icon(0, 32, id::CLOCK);
    assert_eq!(at(&plane(&screen), 0, 2), id::CLOCK);

    // A zero-height box puts its bottom corners six lines below the top.
    screen.draw_box(4, 0, 2, 0);
    let boxed = plane(&screen);
    assert_eq!(at(&boxed, 4, 3), id::BOX_TOP_LEFT);
    assert_eq!(at(&boxed, 7, 3), id::BOX_TOP_RIGHT);
    assert_eq!(at(&boxed, 4, 9), id::BOX_BOTTOM_LEFT);
    assert_eq!(at(&boxed, 7, 16), id::BOX_BOTTOM_RIGHT);

    screen.draw_line(0, 32, 1);
    assert_eq!(at(&plane(&screen), 0, 3), 0b1010_1010);
}

#[test]
fn enhanced_startup_sequence() {
    let mut data = charset(Depth::Sixteen);
    let mut screen = Screen::new(
        Emulated::new(Variant::Enhanced),
        GlyphSet::new(&mut data, Depth::Sixteen),
        ColorMode::Unset,
    );
    let mut input = Input::new(ScriptedInput::new());
    input.device_mut().type_keys(b"r");

    screen.init_graphics(&mut input);

    assert!(screen.glyphs().is_normalized());
    assert_eq!(screen.color_mode(), ColorMode::Rgb);
    assert_eq!(
        screen.display.platform().events(),
        &[
            Event::MaskIrq,
            Event::BankTable,
            Event::Palette(palette::RGB),
            Event::Vsync,
            Event::Video(VideoState::Graphics),
            Event::UnmaskIrq,
            // clear screen
            Event::Map,
            Event::Unmap(Mapping::Default),
            // colour prompt
            Event::Map,
            Event::Unmap(Mapping::Default),
            Event::Palette(palette::RGB),
        ]
    );
    assert!(!screen.display.platform().irq_masked());
}

#[test]
fn shutdown_restores_text_mode_and_colours() {
    let mut data = charset(Depth::Sixteen);
    let mut screen = screen(&mut data, Variant::Enhanced);
    let power_on = screen.display.platform().palette();
    let mut input = Input::new(ScriptedInput::new());

    screen.init_graphics(&mut input);
    assert_ne!(screen.display.platform().palette(), power_on);

    screen.reset_graphics();
    let machine = screen.display.platform();
    assert_eq!(machine.palette(), power_on);
    assert_eq!(machine.video_state(), VideoState::Text);
    assert_eq!(machine.mapping(), Mapping::Default);
}
