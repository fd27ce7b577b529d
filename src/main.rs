#![warn(clippy::all)]

use clap::Parser;
use conway_grid::{Config, Control, Grid, SimulationLoop, Snapshot};
use tracing_subscriber::EnvFilter;

/// Conway's Game of Life on a bounded grid.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of rows of the field
    #[arg(long, default_value_t = Config::DEFAULT_ROWS)]
    rows: usize,

    /// Number of columns of the field
    #[arg(long, default_value_t = Config::DEFAULT_COLS)]
    cols: usize,

    /// Target generations per second (clamped to 1..=240)
    #[arg(long, default_value_t = Config::DEFAULT_FPS)]
    fps: f64,

    /// Probability of a cell being alive in the initial soup
    #[arg(long, default_value_t = Config::FILL_RATE)]
    fill_rate: f64,

    /// Seed of the initial soup (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    use eframe::egui::{vec2, ViewportBuilder};

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut grid = Grid::new(args.rows, args.cols)?;
    let fps = Config::clamp_fps(args.fps);
    if fps != args.fps && !fps.is_nan() {
        tracing::warn!(requested = args.fps, fps, "target rate out of range, clamped");
    }
    grid.set_target_rate(fps)?;
    grid.restore(&Snapshot::random(args.rows, args.cols, args.seed, args.fill_rate))?;
    let grid = grid.into_shared();

    let control = Control::new();
    let simulation = SimulationLoop::new(grid.clone(), control.clone()).spawn()?;

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size(vec2(1280., 800.))
            .with_min_inner_size(vec2(640.0, 360.0)),
        follow_system_theme: false,
        default_theme: eframe::Theme::Light,
        ..Default::default()
    };
    let app_control = control.clone();
    let result = eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(conway_grid::App::new(
                grid,
                app_control,
                simulation,
                args.fill_rate,
            )))
        }),
    );

    // the app normally stops the loop itself; this covers a failed start
    control.shutdown();
    result.map_err(|err| anyhow::anyhow!("{err}"))
}
