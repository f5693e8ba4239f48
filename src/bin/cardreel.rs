use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "cardreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the trigger frame of every card.
    Schedule(ScheduleArgs),
    /// Print one evaluated frame as JSON.
    Inspect(InspectArgs),
    /// Render a storyboard frame as a PNG.
    Frame(FrameArgs),
    /// Write an SRT caption track for a dataset.
    Captions(CaptionsArgs),
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    /// Composition config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset JSON. Without it, `cards_to_show` placeholder cards are scheduled.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset JSON. Defaults to the config's active `data_source`.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dataset JSON. Defaults to the config's active `data_source`.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Global frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output scale relative to the composition canvas.
    #[arg(long, default_value_t = 0.25)]
    scale: f64,

    /// Skip the rotating watermark.
    #[arg(long)]
    no_watermark: bool,
}

#[derive(Parser, Debug)]
struct CaptionsArgs {
    #[arg(long)]
    data: PathBuf,

    /// Output SRT path.
    #[arg(long)]
    out: PathBuf,

    /// Opening cue text.
    #[arg(long, default_value = "Roster")]
    title: String,

    /// Pick card count and slot length from the dataset size.
    #[arg(long)]
    auto: bool,

    #[arg(long, default_value_t = 10)]
    cards: usize,

    #[arg(long, default_value_t = 10)]
    seconds_per_card: u32,

    #[arg(long, default_value_t = 2)]
    opening_seconds: u32,

    #[arg(long, value_enum, default_value_t = OrderChoice::JoinDate)]
    order: OrderChoice,

    /// Closing cue text.
    #[arg(long, default_value = "Terima kasih sudah menonton!")]
    ending_text: String,

    #[arg(long, default_value_t = 5)]
    ending_seconds: u32,

    /// End the track with the last card.
    #[arg(long)]
    no_ending: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrderChoice {
    Leaderboard,
    JoinDate,
    AsLoaded,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Captions(args) => cmd_captions(args),
    }
}

fn read_config(path: Option<&Path>) -> anyhow::Result<cardreel::CompositionConfig> {
    let Some(path) = path else {
        return Ok(cardreel::CompositionConfig::default());
    };
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    cardreel::CompositionConfig::from_reader(BufReader::new(f))
        .with_context(|| format!("load config '{}'", path.display()))
}

fn read_records(path: &Path) -> anyhow::Result<Vec<cardreel::EntityRecord>> {
    let f = File::open(path).with_context(|| format!("open dataset '{}'", path.display()))?;
    cardreel::load_records(BufReader::new(f))
        .with_context(|| format!("load dataset '{}'", path.display()))
}

fn build_plan(
    config: Option<&Path>,
    data: Option<&Path>,
) -> anyhow::Result<cardreel::CompositionPlan> {
    let cfg = read_config(config)?;
    let records = match data {
        Some(path) => read_records(path)?,
        None => {
            let path = PathBuf::from(cfg.data_source.active());
            tracing::info!(path = %path.display(), "dataset from config data_source");
            read_records(&path)?
        }
    };
    Ok(cardreel::CompositionPlan::new(cfg, records)?)
}

#[derive(serde::Serialize)]
struct ScheduleRow<'a> {
    index: usize,
    name: Option<&'a str>,
    trigger_frame: i64,
    trigger_secs: f64,
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let plan = match &args.data {
        Some(data) => cardreel::CompositionPlan::new(cfg, read_records(data)?)?,
        None => {
            let placeholders = vec![cardreel::EntityRecord::default(); cfg.cards_to_show];
            let cfg = cardreel::CompositionConfig {
                order: cardreel::RecordOrder::AsLoaded,
                ..cfg
            };
            cardreel::CompositionPlan::new(cfg, placeholders)?
        }
    };

    let fps = f64::from(plan.config.fps);
    let rows: Vec<_> = plan
        .records
        .iter()
        .enumerate()
        .map(|(index, rec)| {
            let trigger_frame = plan.timeline.trigger_frame(index);
            ScheduleRow {
                index,
                name: rec.usable_name(),
                trigger_frame,
                trigger_secs: trigger_frame as f64 / fps,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{:>5}  {:>8}  {:>8}  name", "index", "frame", "secs");
    for r in &rows {
        println!(
            "{:>5}  {:>8}  {:>8.2}  {}",
            r.index,
            r.trigger_frame,
            r.trigger_secs,
            r.name.unwrap_or("-")
        );
    }
    println!(
        "total: {} frames ({:.1} s)",
        plan.total_frames(),
        plan.total_frames() as f64 / fps
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let plan = build_plan(args.config.as_deref(), args.data.as_deref())?;
    let frame = cardreel::Evaluator::eval_frame(&plan, cardreel::FrameIndex(args.frame))?;
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let plan = build_plan(args.config.as_deref(), args.data.as_deref())?;
    let opts = cardreel::PreviewOptions {
        scale: args.scale,
        draw_watermark: !args.no_watermark,
        ..cardreel::PreviewOptions::default()
    };
    let frame = cardreel::render_preview(&plan, cardreel::FrameIndex(args.frame), &opts)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_captions(args: CaptionsArgs) -> anyhow::Result<()> {
    let mut records = read_records(&args.data)?;
    match args.order {
        OrderChoice::Leaderboard => cardreel::order_leaderboard(&mut records),
        OrderChoice::JoinDate => cardreel::order_by_join_date(&mut records),
        OrderChoice::AsLoaded => {}
    }

    let pacing = if args.auto {
        cardreel::auto_pacing(records.len())
    } else {
        cardreel::Pacing {
            cards_to_show: args.cards,
            seconds_per_card: args.seconds_per_card,
        }
    };
    tracing::info!(
        records = records.len(),
        cards = pacing.cards_to_show,
        seconds_per_card = pacing.seconds_per_card,
        "caption pacing"
    );

    let opts = cardreel::CaptionOptions {
        title: args.title,
        opening_seconds: args.opening_seconds,
        pacing,
        ending: (!args.no_ending).then(|| cardreel::ClosingCue {
            text: args.ending_text,
            seconds: args.ending_seconds,
        }),
    };
    let cues = cardreel::build_cues(&records, &opts)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, cardreel::write_srt(&cues))
        .with_context(|| format!("write srt '{}'", args.out.display()))?;

    eprintln!("wrote {} ({} cues)", args.out.display(), cues.len());
    Ok(())
}
