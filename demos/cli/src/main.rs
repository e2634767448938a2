use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use rayon::prelude::*;

use shadowcast::{FovConfig, Grid, Position, ScanMode, VisibleSet};

/// Symmetric shadowcasting demo
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    cmd: Command,

    /// Map file (`#` for walls, `.` for floors, `@` for the observer)
    #[clap(short, long)]
    input: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Draws the map as seen from a single position
    Show {
        #[clap(flatten)]
        settings: FovSettings,

        /// Observer position as `x,y` (defaults to the map's `@` marker)
        #[clap(long)]
        origin: Option<Position>,

        /// Name of a `.png` file to write
        #[clap(short, long)]
        out: Option<PathBuf>,

        /// Pixels per tile in the `.png` output
        #[clap(long, default_value_t = 8)]
        scale: u32,

        /// Number of times to compute (for benchmarking)
        #[clap(short = 'N', default_value_t = 1)]
        n: usize,
    },

    /// Checks that visibility is symmetric between every pair of floors
    Check {
        #[clap(flatten)]
        settings: FovSettings,

        /// Number of threads to use
        #[clap(short, long)]
        threads: Option<NonZeroUsize>,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum Mode {
    Recursive,
    Worklist,
}

#[derive(Parser)]
struct FovSettings {
    /// Maximum view distance
    #[clap(short, long)]
    radius: Option<u32>,

    /// Row traversal strategy
    #[clap(short, long, value_enum, default_value_t = Mode::Recursive)]
    mode: Mode,
}

impl FovSettings {
    fn config(&self) -> FovConfig {
        FovConfig {
            radius: self.radius,
            mode: match self.mode {
                Mode::Recursive => ScanMode::Recursive,
                Mode::Worklist => ScanMode::Worklist,
            },
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Draws visible tiles as `#` / `.`, the observer as `@`, and hidden tiles as
/// blanks
fn draw(grid: &Grid, seen: &VisibleSet, origin: Position) -> String {
    let mut out = String::new();
    for p in grid.positions() {
        if p.x == 0 && p.y != 0 {
            out.push('\n');
        }
        out.push(if p == origin {
            '@'
        } else if !seen.contains(p) {
            ' '
        } else if grid.is_blocking(p) {
            '#'
        } else {
            '.'
        });
    }
    out
}

/// Builds an RGBA image with one `scale × scale` block per tile
fn to_rgba(
    grid: &Grid,
    seen: &VisibleSet,
    origin: Position,
    scale: u32,
) -> Vec<u8> {
    let scale = scale as usize;
    let width = grid.width() * scale;
    let mut out = vec![0; width * grid.height() * scale * 4];
    for p in grid.positions() {
        let color = if p == origin {
            [255, 0, 0, 255]
        } else if !seen.contains(p) {
            [0, 0, 0, 255]
        } else if grid.is_blocking(p) {
            [96, 96, 96, 255]
        } else {
            [255, 255, 255, 255]
        };
        let (x, y) = (p.x as usize * scale, p.y as usize * scale);
        for row in y..y + scale {
            for col in x..x + scale {
                let i = (row * width + col) * 4;
                out[i..i + 4].copy_from_slice(&color);
            }
        }
    }
    out
}

fn run_check(
    grid: &Grid,
    cfg: &FovConfig,
    threads: Option<NonZeroUsize>,
) -> Result<usize> {
    let floors: Vec<Position> = grid.floors().collect();
    let views = || -> Result<Vec<VisibleSet>, shadowcast::Error> {
        floors.par_iter().map(|p| grid.fov(*p, cfg)).collect()
    };
    let views = match threads {
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n.get())
            .build()?
            .install(views)?,
        None => views()?,
    };

    let mut bad = 0;
    for (i, a) in floors.iter().enumerate() {
        for (j, b) in floors.iter().enumerate().skip(i + 1) {
            if views[i].contains(*b) != views[j].contains(*a) {
                warn!("asymmetric visibility between {a} and {b}");
                bad += 1;
            }
        }
    }
    Ok(bad)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .init();

    let now = Instant::now();
    let args = Args::parse();
    let file = std::fs::File::open(&args.input)?;
    let grid = Grid::from_reader(file)?;
    info!(
        "Loaded {}x{} map in {:?}",
        grid.width(),
        grid.height(),
        now.elapsed()
    );

    match args.cmd {
        Command::Show {
            settings,
            origin,
            out,
            scale,
            n,
        } => {
            let origin = origin
                .or(grid.origin())
                .ok_or(shadowcast::Error::MissingOrigin)?;
            let cfg = settings.config();

            let start = Instant::now();
            let mut seen = VisibleSet::new();
            for _ in 0..n {
                seen = grid.fov(origin, &cfg)?;
            }
            info!(
                "Computed {n}x at {:?} ms/iter",
                start.elapsed().as_micros() as f64 / 1000.0 / (n as f64)
            );
            info!("{} tiles visible from {origin}", seen.len());
            println!("{}", draw(&grid, &seen, origin));

            if let Some(out) = out {
                info!("Writing image to {out:?}");
                image::save_buffer(
                    out,
                    &to_rgba(&grid, &seen, origin, scale),
                    grid.width() as u32 * scale,
                    grid.height() as u32 * scale,
                    image::ColorType::Rgba8,
                )?;
            }
        }
        Command::Check { settings, threads } => {
            let start = Instant::now();
            let bad = run_check(&grid, &settings.config(), threads)?;
            info!("Checked all floor pairs in {:?}", start.elapsed());
            if bad > 0 {
                bail!("found {bad} asymmetric pairs");
            }
            info!("visibility is symmetric");
        }
    }

    Ok(())
}
