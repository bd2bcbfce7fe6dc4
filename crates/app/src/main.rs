use std::{io, path::PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use shape_timeline_core::{
    AppConfig, Color, JsonLinesRenderer, RenderedFrame, Renderer, Scene, ScenePlayer, Shape,
    ShapeFrame, Timeline, TracingRenderer,
};
use tracing_subscriber::EnvFilter;

fn main() -> shape_timeline_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            output,
            poll_ms,
        } => run_play(config.as_ref(), output, poll_ms),
        Commands::Snapshot { at } => run_snapshot(at),
    }
}

fn run_play(config: Option<&PathBuf>, output: OutputFormat, poll_ms: Option<u64>) -> shape_timeline_core::Result<()> {
    let mut config = match config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(poll_ms) = poll_ms {
        config.player.poll_interval_ms = poll_ms;
    }
    tracing::info!(?output, poll_ms = config.player.poll_interval_ms, "playing demo scene");

    let scene = demo_scene();
    let player = ScenePlayer::new(config.player);
    let mut renderer: Box<dyn Renderer> = match output {
        OutputFormat::Log => Box::new(TracingRenderer),
        OutputFormat::Json => Box::new(JsonLinesRenderer::new(io::stdout().lock())),
    };

    let summary = player.play_scene(&scene, renderer.as_mut())?;
    tracing::info!(
        frames = summary.frames,
        renders = summary.renders,
        elapsed = summary.elapsed,
        "playback complete"
    );
    Ok(())
}

fn run_snapshot(at: f64) -> shape_timeline_core::Result<()> {
    let scene = demo_scene();
    let mut frames: Vec<RenderedFrame> = Vec::new();
    for shape in scene.shapes() {
        if let Some((geometry, color)) = shape.resolve_at(at)? {
            frames.push(
                ShapeFrame {
                    shape_id: &shape.id,
                    time: at,
                    geometry: &geometry,
                    color,
                }
                .to_rendered(),
            );
        }
    }
    tracing::debug!(at, active = frames.len(), "snapshot resolved");

    serde_json::to_writer_pretty(io::stdout().lock(), &frames)?;
    println!();
    Ok(())
}

/// Square and triangle with overlapping, differently offset timelines.
fn demo_scene() -> Scene {
    let square = Shape::new(
        "square",
        vec![(250.0, 200.0), (350.0, 200.0), (350.0, 300.0), (250.0, 300.0)],
    )
    .with_color(Color::gray(0x44))
    .with_timeline(
        Timeline::starting_at(0.0)
            .rotate(60.0, 1.0)
            .translate(200.0, 0.0, 1.0)
            .scale(1.3, 1.0)
            .recolor_to(200, 0.8)
            .translate(0.0, 120.0, 1.0)
            .recolor_to(40, 0.8),
    );

    let triangle = Shape::new("triangle", vec![(500.0, 250.0), (550.0, 350.0), (450.0, 350.0)])
        .with_color(Color::gray(0x88))
        .with_timeline(
            Timeline::starting_at(0.5)
                .recolor_to(220, 1.0)
                .translate(-80.0, 40.0, 1.0)
                .scale(0.9, 1.0),
        );

    Scene::new(vec![square, triangle])
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Timeline-driven shape animation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play the demo scene in real time.
    Play {
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Where rendered frames go.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Log)]
        output: OutputFormat,
        /// Overrides the configured poll interval.
        #[arg(long)]
        poll_ms: Option<u64>,
    },
    /// Print every active shape of the demo scene at one instant.
    Snapshot {
        /// Scene time in seconds.
        #[arg(long)]
        at: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Frames as tracing events on stderr.
    Log,
    /// One JSON object per frame on stdout.
    Json,
}
