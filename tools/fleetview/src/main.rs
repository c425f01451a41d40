mod snapshot;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, Level};
use tracing_subscriber::util::SubscriberInitExt;

use fleet::{
    glyphs::GlyphSet,
    input::Input,
    platform::{
        emulated::{Emulated, ScriptedInput, Variant},
        Platform,
    },
    palette::ColorMode,
    rop::Depth,
    screen::Screen,
};

/// Glyphs in a full character set.
const GLYPH_COUNT: usize = 128;

/// Characters that fit in a name badge after the activity marker.
const NAME_CELLS: usize = 9;

/// The standard fleet as (size, encoded position) on the local board.
const FLEET: [(u8, u8); 5] = [(5, 1), (4, 121), (3, 155), (3, 77), (2, 139)];

#[derive(Parser)]
#[command(name = "fleetview")]
#[command(version, about = "Render fleet screens to PNG", long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the game board for a number of players
    Board {
        /// Number of players (1-4)
        #[arg(short, long, default_value_t = 4)]
        players: u8,

        #[arg(long, value_enum, default_value_t = Machine::Enhanced)]
        variant: Machine,

        /// Glyph table (8 bytes per glyph for base, 32 for enhanced);
        /// a generated placeholder set is used when omitted
        #[arg(long)]
        charset: Option<PathBuf>,

        /// Player names, comma separated
        #[arg(long, value_delimiter = ',')]
        names: Vec<String>,

        /// Slot whose turn it is
        #[arg(long, default_value_t = 0)]
        active: u8,

        /// Also draw the local player's ships
        #[arg(long)]
        ships: bool,

        /// Use the composite colour table
        #[arg(long)]
        composite: bool,

        #[arg(long, default_value_t = 2)]
        scale: u32,

        /// Output PNG
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Draw every glyph of a character set in a grid
    Sheet {
        #[arg(long, value_enum, default_value_t = Machine::Enhanced)]
        variant: Machine,

        #[arg(long)]
        charset: Option<PathBuf>,

        #[arg(long, default_value_t = 2)]
        scale: u32,

        #[arg(short, long)]
        out: PathBuf,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Machine {
    /// Color Computer 1/2, four colours
    Base,
    /// Color Computer 3, sixteen colours
    Enhanced,
}

impl Machine {
    fn variant(self) -> Variant {
        match self {
            Machine::Base => Variant::Base,
            Machine::Enhanced => Variant::Enhanced,
        }
    }

    fn depth(self) -> Depth {
        match self {
            Machine::Base => Depth::Four,
            Machine::Enhanced => Depth::Sixteen,
        }
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

/// Read a glyph table from disk, or make up one where every glyph is an
/// outlined box in a colour picked by its index.
fn load_charset(path: Option<&Path>, depth: Depth) -> Result<Vec<u8>> {
    let glyph_bytes = depth.glyph_bytes();
    let Some(path) = path else {
        debug!("using generated charset");
        return Ok(placeholder_charset(depth));
    };

    let data = std::fs::read(path).with_context(|| format!("reading charset {}", path.display()))?;
    if data.is_empty() || data.len() % glyph_bytes != 0 {
        bail!(
            "{} is {} bytes, not a whole number of {}-byte glyphs",
            path.display(),
            data.len(),
            glyph_bytes
        );
    }
    info!("loaded {} glyphs from {}", data.len() / glyph_bytes, path.display());
    Ok(data)
}

fn placeholder_charset(depth: Depth) -> Vec<u8> {
    let cell = depth.cell_bytes();
    let mut data = Vec::with_capacity(GLYPH_COUNT * depth.glyph_bytes());
    for glyph in 0..GLYPH_COUNT {
        let color = (glyph % 3 + 1) as u8;
        // Source order: 16-colour glyphs keep the left pixel in the low
        // nibble until they are normalized.
        let (solid, left, right) = match depth {
            Depth::Four => (color * 0b0101_0101, color << 6 | color, 0),
            Depth::Sixteen => (color * 0x11, color, color << 4),
        };
        for line in 0..8 {
            for byte in 0..cell {
                let value = if line == 0 || line == 7 {
                    solid
                } else if byte == 0 {
                    left
                } else if byte == cell - 1 {
                    right
                } else {
                    0
                };
                data.push(value);
            }
        }
    }
    data
}

/// What a snapshot needs from the machine once drawing is done.
struct Capture {
    plane: Vec<u8>,
    palette: [u8; 16],
}

impl Capture {
    fn of(screen: &Screen<'_, Emulated>) -> Self {
        let machine = screen.display.platform();
        Self {
            plane: machine.plane().to_vec(),
            palette: machine.palette(),
        }
    }
}

fn board(
    players: u8,
    machine: Machine,
    charset: Option<&Path>,
    names: &[String],
    active: u8,
    ships: bool,
    composite: bool,
) -> Result<Capture> {
    if !(1..=4).contains(&players) {
        bail!("player count must be 1-4, got {}", players);
    }
    if active >= players {
        bail!("active slot {} is not in a {}-player game", active, players);
    }
    if let Some(name) = names.iter().find(|name| name.len() > NAME_CELLS) {
        bail!("name {:?} does not fit a {}-cell badge", name, NAME_CELLS);
    }

    let mut data = load_charset(charset, machine.depth())?;
    let color = if composite { ColorMode::Composite } else { ColorMode::Rgb };
    let mut screen = Screen::new(
        Emulated::new(machine.variant()),
        GlyphSet::new(&mut data, machine.depth()),
        color,
    );
    let mut input = Input::new(ScriptedInput::new());

    screen.init_graphics(&mut input);
    screen.set_active_player(active);
    screen.draw_board(players);
    for slot in 0..players {
        let fallback = format!("PLAYER {}", slot + 1);
        let name = names.get(slot as usize).unwrap_or(&fallback);
        screen.draw_player_name(slot, name, slot == active);
    }
    if ships {
        for (index, (size, position)) in FLEET.into_iter().enumerate() {
            screen.draw_ship(size, position, false);
            screen.draw_legend_ship(0, index as u8, size, true);
        }
    }
    screen.draw_clock();
    screen.draw_connection_icon(players > 1);
    debug!("{} bytes written", screen.display.bytes_written());

    Ok(Capture::of(&screen))
}

fn sheet(machine: Machine, charset: Option<&Path>) -> Result<Capture> {
    let mut data = load_charset(charset, machine.depth())?;
    let count = data.len() / machine.depth().glyph_bytes();
    let mut screen = Screen::new(
        Emulated::new(machine.variant()),
        GlyphSet::new(&mut data, machine.depth()),
        ColorMode::Rgb,
    );
    let mut input = Input::new(ScriptedInput::new());

    screen.init_graphics(&mut input);
    for glyph in 0..count.min(u8::MAX as usize + 1) {
        let (x, row) = ((glyph % 16) * 2, (glyph / 16) * 2);
        if row > 22 {
            info!("sheet full after {} glyphs", glyph);
            break;
        }
        screen.draw_icon(x as u8, row as u8, glyph as u8);
    }
    Ok(Capture::of(&screen))
}

fn save(capture: &Capture, variant: Machine, scale: u32, out: &Path) -> Result<()> {
    let image = snapshot::render(&capture.plane, variant.variant(), &capture.palette, scale);
    image
        .save(out)
        .with_context(|| format!("writing {}", out.display()))?;
    info!("wrote {} ({}x{})", out.display(), image.width(), image.height());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Board { players, variant, charset, names, active, ships, composite, scale, out } => {
            let capture = board(players, variant, charset.as_deref(), &names, active, ships, composite)?;
            save(&capture, variant, scale, &out)
        }
        Commands::Sheet { variant, charset, scale, out } => {
            let capture = sheet(variant, charset.as_deref())?;
            save(&capture, variant, scale, &out)
        }
    }
}
