use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollreel::{
    EventSender, FetchRequest, FrameFetcher, FrameImage, FsFetcher, LoadingContext, ManualClock,
    PlayerEvent, PlayerState, PlayerStats, RasterSurface, RenderOutcome, ScrollGeometry,
    ScrollPlayer, SequenceConfig, SlotIndex, ViewportGeometry, frame_for_progress,
};
use tracing_subscriber::EnvFilter;

const LOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(name = "scrollreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the frame shown at one scroll position as a PNG.
    Frame(FrameArgs),
    /// Print, as JSON, which frames each scroll position requests and shows.
    Plan(PlanArgs),
    /// Write a built-in sequence config as JSON.
    Preset(PresetArgs),
}

#[derive(clap::Args, Debug)]
struct ScrollArgs {
    /// Sequence config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Viewport size in CSS pixels, `WIDTHxHEIGHT`.
    #[arg(long, default_value = "1280x800", value_parser = parse_size)]
    viewport: (f64, f64),

    /// Device pixel ratio (capped by the config).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Total document height; full-page sequences only.
    #[arg(long, default_value_t = 4000.0)]
    doc_height: f64,

    /// Section height. Switches to section-relative progress, reading `--scroll` as the
    /// section's top edge relative to the viewport.
    #[arg(long)]
    section_height: Option<f64>,
}

impl ScrollArgs {
    fn geometry(&self, scroll: f64) -> ScrollGeometry {
        let viewport_height = self.viewport.1;
        match self.section_height {
            Some(element_height) => ScrollGeometry::ElementRelative {
                element_top: scroll,
                element_height,
                viewport_height,
            },
            None => ScrollGeometry::FullDocument {
                scroll_top: scroll,
                scroll_height: self.doc_height,
                viewport_height,
            },
        }
    }

    fn viewport_geometry(&self) -> ViewportGeometry {
        ViewportGeometry::full_viewport(self.viewport.0, self.viewport.1, self.dpr)
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scroll_args: ScrollArgs,

    /// Directory frame URLs are resolved against.
    #[arg(long)]
    root: PathBuf,

    /// Scroll offset in CSS pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    scroll: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    #[command(flatten)]
    scroll_args: ScrollArgs,

    /// Scroll offsets to visit, in order.
    #[arg(long, num_args = 1.., required = true, allow_hyphen_values = true)]
    scroll: Vec<f64>,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// `mountain` (full page) or `founder` (section).
    name: String,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Preset(args) => cmd_preset(args),
    }
}

fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    if !(w > 0.0 && h > 0.0) {
        return Err("viewport dimensions must be > 0".to_string());
    }
    Ok((w, h))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = SequenceConfig::from_path(&args.scroll_args.config)?;
    let sequence = cfg.sequence.build()?;
    let ctx = LoadingContext::new();

    let mut player = ScrollPlayer::new(
        sequence,
        cfg.player,
        FsFetcher::new(&args.root),
        RasterSurface::new(),
        ManualClock::new(),
    )?
    .with_reporter(ctx.reporter());

    player.handle(PlayerEvent::Resize(args.scroll_args.viewport_geometry()));
    player.handle(PlayerEvent::Scroll(args.scroll_args.geometry(args.scroll)));
    player.mount();

    loop {
        player.settle();
        if player.loader().is_settled() && !player.clock().has_pending() {
            break;
        }
        if player.pump_timeout(LOAD_TIMEOUT) == 0 {
            anyhow::bail!("timed out waiting for frames to load");
        }
    }

    let outcome = player.renderer().last_outcome();
    tracing::info!(
        ?outcome,
        loaded = ctx.loaded(),
        total = ctx.total(),
        "frame settled"
    );
    if !matches!(outcome, Some(RenderOutcome::Drawn(_))) {
        eprintln!("warning: requested frame unavailable ({outcome:?})");
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    player.surface().save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Resolves every request at once with a 1x1 placeholder, recording what was asked for.
#[derive(Default)]
struct RecordingFetcher {
    issued: Vec<FetchRequest>,
}

impl FrameFetcher for RecordingFetcher {
    type Image = FrameImage;

    fn fetch(&mut self, request: FetchRequest, reply: EventSender<FrameImage>) {
        reply.frame_loaded(request.slot, FrameImage::solid(1, 1, [0, 0, 0, 255]));
        self.issued.push(request);
    }
}

#[derive(serde::Serialize)]
struct PlanStep {
    scroll: f64,
    progress: f64,
    slot: SlotIndex,
    frame_url: Option<String>,
    issued: Vec<usize>,
    state: PlayerState,
    /// Running totals after this step.
    stats: PlayerStats,
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let cfg = SequenceConfig::from_path(&args.scroll_args.config)?;
    let sequence = cfg.sequence.build()?;

    let mut player = ScrollPlayer::new(
        sequence,
        cfg.player,
        RecordingFetcher::default(),
        RasterSurface::new(),
        ManualClock::new(),
    )?;
    player.handle(PlayerEvent::Resize(args.scroll_args.viewport_geometry()));
    player.mount();
    player.settle();

    let mut steps = Vec::with_capacity(args.scroll.len());
    for &scroll in &args.scroll {
        let before = player.fetcher().issued.len();
        let geometry = args.scroll_args.geometry(scroll);
        player.handle(PlayerEvent::Scroll(geometry));
        player.settle();

        let progress = geometry.progress();
        let slot = frame_for_progress(progress, player.sequence().len());
        steps.push(PlanStep {
            scroll,
            progress,
            slot,
            frame_url: player.sequence().url(slot),
            issued: player.fetcher().issued[before..]
                .iter()
                .map(|r| r.slot.0)
                .collect(),
            state: player.state(),
            stats: player.stats(),
        });
    }

    let json = serde_json::to_string_pretty(&steps).context("serialize plan")?;
    println!("{json}");
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let cfg = match args.name.as_str() {
        "mountain" => SequenceConfig::mountain(),
        "founder" => SequenceConfig::founder(),
        other => anyhow::bail!("unknown preset '{other}' (expected 'mountain' or 'founder')"),
    };
    let json = cfg.to_json_pretty()?;
    match args.out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("write preset '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
