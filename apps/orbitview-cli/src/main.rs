use clap::{Parser, Subcommand};
use glam::Vec2;
use orbitview_common::{BufferSize, Viewport, ViewportError};
use orbitview_input::ControlAction;
use orbitview_render::{DriverConfig, FrameDriver, FrameStatus, TextRenderer};
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orbitview-cli", about = "Headless orbitview runner")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the default driver configuration
    Info,
    /// Drive frames without a GPU and report each one
    Simulate(SimulateArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct SimulateArgs {
    /// Number of frames to run
    #[arg(short, long, default_value = "3")]
    frames: u64,
    /// Initial logical width
    #[arg(long, default_value = "800")]
    width: f64,
    /// Initial logical height
    #[arg(long, default_value = "600")]
    height: f64,
    /// Initial device pixel ratio
    #[arg(long, default_value = "1", value_parser = pixel_ratio)]
    dpr: f64,
    /// Viewport to resize to after each frame, in order (repeatable)
    #[arg(long)]
    resize: Vec<Viewport>,
    /// Horizontal drag in logical pixels applied before the first frame
    #[arg(long, default_value = "0")]
    orbit: f32,
    /// Simulated time between frames in milliseconds
    #[arg(long, default_value = "16")]
    frame_ms: u64,
    /// Apply orbit input immediately instead of easing it out
    #[arg(long)]
    no_damping: bool,
    /// Print one JSON object per frame instead of text
    #[arg(long)]
    json: bool,
}

impl SimulateArgs {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.dpr)
    }
}

fn pixel_ratio(s: &str) -> Result<f64, ViewportError> {
    let ratio = s.trim().parse::<f64>().map_err(|_| ViewportError::Number {
        value: s.to_string(),
    })?;
    if ratio <= 0.0 || !ratio.is_finite() {
        return Err(ViewportError::PixelRatio(ratio));
    }
    Ok(ratio)
}

/// Driver state observed right after one frame.
#[derive(Debug, Serialize)]
struct FrameReport {
    frame: u64,
    delta: f32,
    width: f64,
    height: f64,
    pixel_ratio: f64,
    buffer: BufferSize,
    aspect: f32,
    camera: [f32; 3],
    target: [f32; 3],
    objects: usize,
    #[serde(skip)]
    text: String,
}

fn simulate(args: &SimulateArgs) -> Vec<FrameReport> {
    let config = DriverConfig {
        enable_damping: !args.no_damping,
        ..DriverConfig::default()
    };
    let mut driver = FrameDriver::initialize(TextRenderer::new(), args.viewport(), &config);
    driver.handle_action(ControlAction::Rotate(Vec2::new(args.orbit, 0.0)));

    let interval = Duration::from_millis(args.frame_ms);
    let mut now = Instant::now();
    let mut resizes = args.resize.iter();
    let mut reports = Vec::new();

    for _ in 0..args.frames {
        let FrameStatus::Rendered(text) = driver.tick_at(now) else {
            break;
        };

        let surface = driver.surface();
        let camera = driver.camera();
        reports.push(FrameReport {
            frame: driver.stats().frames,
            delta: driver.stats().last_delta,
            width: surface.width(),
            height: surface.height(),
            pixel_ratio: surface.pixel_ratio(),
            buffer: surface.buffer_size(),
            aspect: camera.aspect,
            camera: camera.position.to_array(),
            target: driver.controls().target.to_array(),
            objects: driver.scene().len(),
            text,
        });

        if let Some(viewport) = resizes.next() {
            driver.on_resize(*viewport);
        }
        now += interval;
    }

    driver.stop();
    reports
}

/// `RUST_LOG` directives when set and valid, otherwise the `--verbose` level.
fn log_filter(verbose: bool, rust_log: Option<String>) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = log_filter(cli.verbose, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("orbitview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("default driver config:");
            println!("{}", serde_json::to_string_pretty(&DriverConfig::default())?);
        }
        Commands::Simulate(args) => {
            let reports = simulate(&args);
            for report in &reports {
                if args.json {
                    println!("{}", serde_json::to_string(report)?);
                } else {
                    print!("{}", report.text);
                    println!(
                        "Surface: {}x{} @{} -> {}x{}  delta={:.3}s",
                        report.width,
                        report.height,
                        report.pixel_ratio,
                        report.buffer.width,
                        report.buffer.height,
                        report.delta
                    );
                }
            }
        }
    }

    Ok(())
}
