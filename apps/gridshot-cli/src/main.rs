use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use gridshot_common::{LOOK_ANGLE_EXPONENT, Rounding, Viewport, Weapon, adjust, find_angle};
use gridshot_input::{InputEvent, Key};
use gridshot_kernel::{Frame, FrameDriver, FullscreenError, PresentError, Presenter, Session};
use gridshot_map::MapData;
use gridshot_render::{DebugTextRenderer, Renderer, SceneRenderer};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridshot-cli", about = "CLI tool for gridshot: angles, maps, headless frames")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Angle in degrees from an origin to a target point
    Angle {
        #[arg(allow_hyphen_values = true)]
        origin_x: f64,
        #[arg(allow_hyphen_values = true)]
        origin_y: f64,
        #[arg(allow_hyphen_values = true)]
        target_x: f64,
        #[arg(allow_hyphen_values = true)]
        target_y: f64,
    },
    /// Round a value to the decimal place 10^exponent
    Round {
        /// ceil, floor or round
        mode: Rounding,
        #[arg(allow_hyphen_values = true)]
        value: f64,
        #[arg(allow_hyphen_values = true)]
        exponent: f64,
    },
    /// Check that a map file loads and is well formed
    Validate {
        /// Map file (.json, .yaml or .yml)
        map: PathBuf,
    },
    /// Render one frame headlessly and print its draw commands
    Render {
        /// Map file; the built-in map is used when omitted
        #[arg(long)]
        map: Option<PathBuf>,
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 600)]
        height: u32,
        /// Pointer position in surface pixels, as X,Y
        #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
        pointer: Option<(f64, f64)>,
        /// Weapon slot to select (1-5)
        #[arg(long)]
        weapon: Option<u8>,
    },
    /// Write the built-in map as pretty JSON
    ExportMap {
        path: PathBuf,
    },
}

fn parse_pointer(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate '{v}': {e}"))
    };
    Ok((parse(x)?, parse(y)?))
}

/// Headless surface that keeps the latest frame's command dump.
#[derive(Default)]
struct TextPresenter {
    last: Option<String>,
}

impl Presenter for TextPresenter {
    fn resize(&mut self, viewport: Viewport) {
        tracing::debug!("headless surface {}x{}", viewport.width, viewport.height);
    }

    fn present(&mut self, frame: &Frame<'_>) -> Result<(), PresentError> {
        self.last = Some(frame.commands.describe());
        Ok(())
    }

    fn toggle_fullscreen(&mut self) -> Result<(), FullscreenError> {
        Err(FullscreenError::Unsupported)
    }
}

fn load_map(path: Option<&Path>) -> anyhow::Result<MapData> {
    match path {
        Some(path) => MapData::load(path)
            .with_context(|| format!("failed to load map {}", path.display())),
        None => Ok(MapData::builtin()),
    }
}

/// Drive one session through the requested input and dump the final frame.
fn render_frame(
    map: MapData,
    viewport: Viewport,
    pointer: Option<(f64, f64)>,
    weapon: Option<u8>,
) -> anyhow::Result<String> {
    if viewport.is_empty() {
        bail!("surface {}x{} has no area", viewport.width, viewport.height);
    }

    let mut presenter = TextPresenter::default();
    let mut driver = FrameDriver::start(
        Session::new(map, viewport),
        SceneRenderer::default(),
        &mut presenter,
    );

    if let Some(slot) = weapon {
        let weapon = Weapon::try_from(slot)?;
        let key = char::from_digit(u32::from(weapon.slot()), 10).map_or(Key::Other, Key::Char);
        driver.push(InputEvent::KeyDown(key));
    }
    if let Some((x, y)) = pointer {
        driver.push(InputEvent::PointerMoved { x, y });
    }
    driver.tick(&mut presenter);

    let session = driver.session();
    let text = DebugTextRenderer::default().render(&session.scene(), session.viewport());
    tracing::debug!(
        "presented {} frames, last frame {} bytes",
        driver.frames(),
        presenter.last.as_ref().map_or(0, String::len)
    );
    Ok(text)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let map = MapData::builtin();
            println!("gridshot-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", gridshot_render::crate_info());
            println!(
                "map: built-in, spawn=({}, {}), blocks={}",
                map.spawn_point().x,
                map.spawn_point().y,
                map.blocks.len()
            );
            println!("look angle precision: 10^{LOOK_ANGLE_EXPONENT}");
        }
        Commands::Angle {
            origin_x,
            origin_y,
            target_x,
            target_y,
        } => {
            println!("{}", find_angle(origin_x, origin_y, target_x, target_y));
        }
        Commands::Round {
            mode,
            value,
            exponent,
        } => {
            println!("{}", adjust(mode, value, exponent));
        }
        Commands::Validate { map } => {
            let data = load_map(Some(&map))?;
            println!(
                "{}: OK (spawn points={}, blocks={})",
                map.display(),
                data.spawn.len(),
                data.blocks.len()
            );
        }
        Commands::Render {
            map,
            width,
            height,
            pointer,
            weapon,
        } => {
            let data = load_map(map.as_deref())?;
            let text = render_frame(data, Viewport::new(width, height), pointer, weapon)?;
            print!("{text}");
        }
        Commands::ExportMap { path } => {
            MapData::builtin()
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote built-in map to {}", path.display());
        }
    }

    Ok(())
}
