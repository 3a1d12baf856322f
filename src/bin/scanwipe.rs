use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser, Debug)]
#[command(name = "scanwipe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame of the transition as a PNG.
    Frame(FrameArgs),
    /// Render the looping transition as an MP4 (requires `ffmpeg` on PATH).
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Image shown at the start and end of the loop.
    #[arg(long)]
    before: PathBuf,

    /// Image revealed mid-loop.
    #[arg(long)]
    after: PathBuf,

    /// Run configuration JSON. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Glow line color (`#rrggbb`).
    #[arg(long)]
    color: Option<scanwipe::Rgb8>,

    /// Easing curve (linear, easeIn, easeOut, easeInOut, easeInBack, easeOutBack).
    #[arg(long)]
    easing: Option<scanwipe::Ease>,

    /// Timeline length in frames.
    #[arg(long)]
    frames: Option<u64>,

    /// Reject sources whose sizes differ instead of anchoring "after" at the top-left.
    #[arg(long, default_value_t = false)]
    strict_size: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Frame index (0-based).
    #[arg(long)]
    index: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    style: StyleArgs,

    /// Output MP4 path, or a directory to save `animation.mp4` into.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 16)]
    chunk_size: usize,

    /// `ffmpeg` executable to run.
    #[arg(long, default_value = "ffmpeg")]
    ffmpeg: PathBuf,

    /// Hide the progress bar.
    #[arg(long, default_value_t = false)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load_config(args: &StyleArgs) -> anyhow::Result<scanwipe::RunConfig> {
    let mut cfg = match &args.config {
        Some(path) => scanwipe::RunConfig::from_path(path)?,
        None => scanwipe::RunConfig::default(),
    };
    if let Some(color) = args.color {
        cfg.style.line_color = color;
    }
    if let Some(easing) = args.easing {
        cfg.style.easing = easing;
    }
    if let Some(frames) = args.frames {
        cfg.opts.total_frames = frames;
    }
    if args.strict_size {
        cfg.opts.size_mismatch = scanwipe::SizeMismatch::Reject;
    }
    cfg.opts.validate()?;
    Ok(cfg)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.style)?;
    let before = scanwipe::decode_source(&scanwipe::ImageSource::path(&args.style.before))?;
    let after = scanwipe::decode_source(&scanwipe::ImageSource::path(&args.style.after))?;

    let timeline = scanwipe::Timeline::new(cfg.opts.total_frames)?;
    let frame = scanwipe::render_frame(
        &before,
        &after,
        scanwipe::FrameIndex(args.index),
        timeline,
        &cfg.style,
    )?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, frame.encode_png()?)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.style)?;
    cfg.opts.threading = scanwipe::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let req = scanwipe::GenerateRequest::new(
        scanwipe::ImageSource::path(&args.style.before),
        scanwipe::ImageSource::path(&args.style.after),
    )
    .with_style(cfg.style)
    .with_opts(cfg.opts);
    let encoder = scanwipe::Encoder::new(scanwipe::FfmpegService::with_program(&args.ffmpeg));

    let (progress, events) = scanwipe::Progress::channel();
    let bar = progress_bar(args.quiet)?;
    let reporter = {
        let bar = bar.clone();
        std::thread::spawn(move || report(&bar, events))
    };

    let res = scanwipe::generate(&req, &encoder, &progress);
    drop(progress);
    let _ = reporter.join();
    let video = res?;

    let out = write_video(&video, &args.out)?;
    eprintln!("wrote {} ({} bytes)", out.display(), video.len());
    Ok(())
}

const BAR_STEPS: u64 = 1000;

fn progress_bar(quiet: bool) -> anyhow::Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(BAR_STEPS);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% {msg}")?
            .progress_chars("#>-"),
    );
    Ok(bar)
}

fn report(bar: &ProgressBar, events: std::sync::mpsc::Receiver<scanwipe::ProgressEvent>) {
    use scanwipe::ProgressEvent as Ev;

    let set = |p: f64| bar.set_position((p * BAR_STEPS as f64).round() as u64);
    for ev in events {
        match ev {
            Ev::Started { .. } => {
                bar.set_position(0);
                bar.set_message("rendering frames");
            }
            Ev::FrameRendered { progress, .. } => set(progress),
            Ev::FrameStaged { progress, .. } => {
                bar.set_message("staging frames");
                set(progress);
            }
            Ev::Encoding => bar.set_message("encoding"),
            Ev::Finished { .. } => bar.finish_with_message("done"),
            Ev::Failed { error } => bar.abandon_with_message(format!("failed: {error}")),
        }
    }
}

fn write_video(video: &scanwipe::VideoArtifact, out: &Path) -> anyhow::Result<PathBuf> {
    if out.is_dir() {
        return Ok(video.save_download(out)?);
    }
    video.save_to(out)?;
    Ok(out.to_path_buf())
}
