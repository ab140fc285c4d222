use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "animlab", version, about = "Animate a still image with a catalog effect")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available effects.
    Effects(EffectsArgs),
    /// Render an image into a GIF or MP4 (MP4 requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct EffectsArgs {
    /// Print the catalog as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Effect identifier, see `animlab effects`.
    #[arg(long)]
    effect: String,

    /// Output container.
    #[arg(long, value_enum, default_value_t = FormatChoice::Gif)]
    format: FormatChoice,

    /// Animation length in seconds.
    #[arg(long, default_value_t = 1.0)]
    duration: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 15)]
    fps: u32,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Shake/bounce amplitude in pixels.
    #[arg(long)]
    amplitude: Option<u32>,

    /// Pulse peak scale.
    #[arg(long)]
    max_scale: Option<f64>,

    /// Reject requests needing more frames than this.
    #[arg(long)]
    max_frames: Option<u32>,

    /// Compose frames on one thread.
    #[arg(long)]
    sequential: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Gif,
    Mp4,
}

impl From<FormatChoice> for animlab::OutputFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Gif => Self::Gif,
            FormatChoice::Mp4 => Self::Mp4,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Effects(args) => cmd_effects(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_effects(args: EffectsArgs) -> anyhow::Result<()> {
    let catalog = animlab::EffectCatalog::global();
    if args.json {
        let entries: Vec<serde_json::Value> = catalog
            .iter()
            .map(|e| {
                serde_json::json!({
                    "id": e.id,
                    "family": e.family(),
                    "label": e.label,
                    "params": e.effect.params(),
                })
            })
            .collect();
        let out = serde_json::to_string_pretty(&entries).context("serialize effect catalog")?;
        println!("{out}");
        return Ok(());
    }

    for e in catalog.iter() {
        println!("{:<20} {:<10} {}", e.id, e.family().as_str(), e.label);
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let image = animlab::decode_image(&bytes)
        .with_context(|| format!("decode image '{}'", args.in_path.display()))?;

    let mut opts = animlab::ServiceOpts {
        parallel: !args.sequential,
        ..animlab::ServiceOpts::default()
    };
    if let Some(max_frames) = args.max_frames {
        opts.max_frames = max_frames;
    }
    let service = animlab::AnimationService::new(opts);

    let req = animlab::AnimationRequest::new(
        &image,
        &args.effect,
        args.format.into(),
        args.duration,
        args.fps,
    )
    .with_overrides(animlab::EffectOverrides {
        amplitude: args.amplitude,
        max_scale: args.max_scale,
    });
    let artifact = service.generate(&req)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &artifact.bytes)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    tracing::info!(
        media_type = artifact.media_type,
        bytes = artifact.bytes.len(),
        "rendered"
    );
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
