use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wav2png::{
    AudioSignal, Compositor, Cursor, Fill, FrameRenderer, GridSpec, Kernel, Mix,
    PaletteSource, PngSequenceSink, RenderThreading, Selection, Strategy, Style, Timeline,
};

#[derive(Parser, Debug)]
#[command(name = "wav2png", version, about = "Render WAV audio as waveform images")]
struct Cli {
    /// Log per-stage diagnostics.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the selected audio as a single PNG.
    Png(PngArgs),
    /// Render a cursor animation as a numbered PNG sequence.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct PngArgs {
    /// Input WAV file.
    wav: PathBuf,

    /// Output PNG path. Defaults to the input path with a `.png` extension.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    #[command(flatten)]
    audio: AudioArgs,
}

#[derive(Args, Debug)]
struct FramesArgs {
    /// Input WAV file.
    wav: PathBuf,

    /// Output directory. Defaults to `frames` next to the input file.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    #[command(flatten)]
    audio: AudioArgs,

    /// Frames per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Audio shown in each frame, e.g. `1s` or `500ms`.
    #[arg(long, default_value = "30s", value_parser = wav2png::parse_duration)]
    window: Duration,

    /// Cursor as `<glyph>:<motion>`: glyph is none, green, red or a PNG path; motion is
    /// linear, sweep, centre, left, right, ease or erf.
    #[arg(long, default_value = "red:linear")]
    cursor: Cursor,

    /// Render frames on a worker pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads when rendering in parallel.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Base style JSON; the flags below override its fields.
    #[arg(long)]
    style: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long, allow_hyphen_values = true)]
    padding: Option<i32>,

    /// Built-in palette name or PNG path.
    #[arg(long)]
    palette: Option<PaletteSource>,

    /// Background, e.g. `solid:#000000ff`.
    #[arg(long)]
    fill: Option<Fill>,

    /// Grid, e.g. `none`, `square:#008000ff:~64` or `rectangular:#008000ff:=64x48:overlay`.
    #[arg(long)]
    grid: Option<GridSpec>,

    /// Antialias kernel: none, vertical, horizontal or soft.
    #[arg(long)]
    antialias: Option<Kernel>,

    /// `lines` or `columns:<bar width>:<bar gap>`.
    #[arg(long)]
    renderer: Option<Strategy>,

    /// Vertical gain.
    #[arg(long)]
    scale: Option<f64>,
}

impl StyleArgs {
    fn resolve(&self) -> anyhow::Result<Style> {
        let mut style = match &self.style {
            Some(path) => Style::from_path(path)
                .with_context(|| format!("load style '{}'", path.display()))?,
            None => Style::default(),
        };

        if let Some(v) = self.width {
            style.width = v;
        }
        if let Some(v) = self.height {
            style.height = v;
        }
        if let Some(v) = self.padding {
            style.padding = v;
        }
        if let Some(v) = &self.palette {
            style.palette = v.clone();
        }
        if let Some(v) = self.fill {
            style.fill = v;
        }
        if let Some(v) = self.grid {
            style.grid = v;
        }
        if let Some(v) = self.antialias {
            style.antialias = v;
        }
        if let Some(v) = self.renderer {
            style.renderer = v;
        }
        if let Some(v) = self.scale {
            style.scale = v;
        }
        Ok(style)
    }
}

#[derive(Args, Debug)]
struct AudioArgs {
    /// Channel mix: L, R or L+R.
    #[arg(long, default_value = "L+R")]
    mix: Mix,

    /// Start of the audio selection, e.g. `1m30s`.
    #[arg(long, value_parser = wav2png::parse_duration)]
    start: Option<Duration>,

    /// End of the audio selection. Defaults to the end of the audio.
    #[arg(long, value_parser = wav2png::parse_duration)]
    end: Option<Duration>,
}

impl AudioArgs {
    fn selection(&self) -> Selection {
        Selection::new(self.start.unwrap_or_default(), self.end)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    match cli.cmd {
        Command::Png(args) => cmd_png(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_signal(path: &Path) -> anyhow::Result<AudioSignal> {
    let wav = wav2png::read_wav(path).with_context(|| format!("read wav '{}'", path.display()))?;
    tracing::info!(
        path = %path.display(),
        format = %wav.format,
        channels = wav.signal.channel_count(),
        sample_rate = wav.signal.sample_rate(),
        duration = ?wav.signal.duration(),
        "decoded"
    );
    Ok(wav.into_signal())
}

fn cmd_png(args: PngArgs) -> anyhow::Result<()> {
    let style = args.style.resolve()?;
    let compositor = Compositor::from_style(&style).context("invalid style")?;
    let signal = read_signal(&args.wav)?;

    let img = compositor.render_signal(&signal, args.audio.mix, args.audio.selection())?;

    let out = args.out.unwrap_or_else(|| args.wav.with_extension("png"));
    wav2png::write_png(&out, &img).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let style = args.style.resolve()?;
    let compositor = Compositor::from_style(&style).context("invalid style")?;
    let signal = read_signal(&args.wav)?;

    let timeline = Timeline {
        fps: args.fps,
        window: args.window,
    };
    let renderer = FrameRenderer::new(
        &signal,
        args.audio.mix,
        args.audio.selection(),
        timeline,
        &args.cursor,
        compositor,
    )?;

    let dir = args.out.unwrap_or_else(|| {
        args.wav
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("frames")
    });
    let mut sink = PngSequenceSink::new(&dir);
    let threading = RenderThreading {
        parallel: args.parallel,
        threads: args.threads,
        ..RenderThreading::default()
    };
    let stats = renderer
        .render_all(&mut sink, &threading)
        .with_context(|| format!("render frames into '{}'", dir.display()))?;

    eprintln!("wrote {} frames to {}", stats.frames_rendered, dir.display());
    Ok(())
}
