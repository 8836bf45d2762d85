use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ring_reveal::{FetchEvent, Fps, IndicatorConfig, LoadingImageView, Rect, Rgba8};

#[derive(Parser, Debug)]
#[command(name = "ring-reveal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a download and write every progress tick and reveal frame as a PNG.
    Simulate(SimulateArgs),
    /// Print the default indicator configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Host width in pixels.
    #[arg(long, default_value_t = 240)]
    width: u32,

    /// Host height in pixels.
    #[arg(long, default_value_t = 240)]
    height: u32,

    /// Simulated download size in bytes. `0` reports an unknown total.
    #[arg(long, default_value_t = 64 * 1024)]
    total_bytes: i64,

    /// Bytes delivered per progress tick.
    #[arg(long, default_value_t = 8 * 1024)]
    chunk_bytes: i64,

    /// Frame rate used to step the reveal animation.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Image shown once revealed. A solid color stands in when omitted.
    #[arg(long)]
    image: Option<PathBuf>,

    /// Indicator configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// End the download with a failure instead of revealing.
    #[arg(long)]
    fail: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Config => cmd_config(),
    }
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", IndicatorConfig::default().to_json_pretty()?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<IndicatorConfig> {
    match path {
        Some(p) => IndicatorConfig::from_json_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(IndicatorConfig::default()),
    }
}

fn load_image(path: Option<&Path>, width: u32, height: u32) -> anyhow::Result<image::RgbaImage> {
    match path {
        Some(p) => Ok(image::open(p)
            .with_context(|| format!("open image '{}'", p.display()))?
            .to_rgba8()),
        None => Ok(ring_reveal::solid(
            width,
            height,
            Rgba8::rgba(40, 110, 180, 255),
        )),
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    if args.width == 0 || args.height == 0 {
        anyhow::bail!("width and height must be > 0");
    }
    if args.chunk_bytes <= 0 {
        anyhow::bail!("chunk-bytes must be > 0");
    }

    let config = load_config(args.config.as_deref())?;
    let fps = Fps::new(args.fps, 1)?;
    let img = load_image(args.image.as_deref(), args.width, args.height)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create '{}'", args.out_dir.display()))?;

    let bounds = Rect::new(0.0, 0.0, f64::from(args.width), f64::from(args.height));
    let mut view = LoadingImageView::new(bounds, config)?;

    let mut frame = 0u64;
    let mut write_frame = |view: &LoadingImageView| -> anyhow::Result<()> {
        let path = args.out_dir.join(format!("frame_{frame:04}.png"));
        ring_reveal::render_view(view, &img)
            .save(&path)
            .with_context(|| format!("write '{}'", path.display()))?;
        frame += 1;
        Ok(())
    };

    write_frame(&view)?;

    let total = args.total_bytes.max(0);
    let target = if total == 0 {
        args.chunk_bytes * 4
    } else {
        total
    };
    let mut received = 0i64;
    while received < target {
        received = (received + args.chunk_bytes).min(target);
        view.handle(FetchEvent::Progress {
            received,
            expected: total,
        })?;
        write_frame(&view)?;
    }

    if args.fail {
        view.handle(FetchEvent::Complete { success: false })?;
        write_frame(&view)?;
        tracing::info!(frames = frame, "download failed; placeholder kept");
        return Ok(());
    }

    view.handle(FetchEvent::Complete { success: true })?;
    write_frame(&view)?;

    let reveal_secs = view.indicator().config().reveal.duration_secs;
    let max_frames = fps.frames_to_cover(reveal_secs) + 1;
    for _ in 0..max_frames {
        let stop = view.advance(fps.frame_duration());
        write_frame(&view)?;
        if stop.is_some() {
            break;
        }
    }
    if view.host().borrow().is_masked() {
        view.indicator_mut().interrupt();
        write_frame(&view)?;
    }

    tracing::info!(
        frames = frame,
        out_dir = %args.out_dir.display(),
        state = %view.indicator().state(),
        "simulation complete"
    );
    Ok(())
}
