use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cuesync", version)]
struct Cli {
    /// Log debug diagnostics to stderr (`RUST_LOG` overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the flattened timeline.
    Timeline(TimelineArgs),
    /// Print the element path and timeline index under a byte offset.
    Locate(LocateArgs),
    /// Print the byte range and object text of an element path.
    Range(RangeArgs),
    /// Write the scene text as HTML with the elements playing at a time highlighted.
    Highlight(HighlightArgs),
    /// Print the scene wrapped as a snake_case render request.
    Request(InputArgs),
}

#[derive(Parser, Debug)]
struct InputArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct LocateArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Byte offset into the scene text.
    #[arg(long)]
    offset: usize,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Dotted element path, e.g. `2.0`.
    #[arg(long)]
    path: String,
}

#[derive(Parser, Debug)]
struct HighlightArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Playhead time in seconds.
    #[arg(long)]
    at: f64,

    /// Timeline index to mark as selected.
    #[arg(long)]
    select: Option<usize>,

    /// Output HTML path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Timeline(args) => cmd_timeline(args),
        Command::Locate(args) => cmd_locate(args),
        Command::Range(args) => cmd_range(args),
        Command::Highlight(args) => cmd_highlight(args),
        Command::Request(args) => cmd_request(args),
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn read_scene_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read scene '{}'", path.display()))
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let text = read_scene_text(&args.input.in_path)?;
    let snapshot = cuesync::SyncSnapshot::new(text);

    if args.json {
        let out = serde_json::to_string_pretty(snapshot.timeline())
            .context("serialize timeline")?;
        println!("{out}");
        return Ok(());
    }

    for (i, el) in snapshot.timeline().iter().enumerate() {
        println!(
            "{i:>3}  {:<8} {:>8.2}s {:>8.2}s  t{:<2} {:<12} {}",
            el.path.to_string(),
            el.time,
            el.duration,
            el.track,
            el.kind,
            el.name
        );
    }
    println!("total {:.2}s", snapshot.total_duration());
    Ok(())
}

fn cmd_locate(args: LocateArgs) -> anyhow::Result<()> {
    let text = read_scene_text(&args.input.in_path)?;
    let path = cuesync::find_path_for_offset(&text, args.offset)
        .with_context(|| format!("no element at offset {}", args.offset))?;
    let snapshot = cuesync::SyncSnapshot::new(text);
    match cuesync::index_of_path(snapshot.timeline(), &path) {
        Some(index) => println!("{path}\t{index}"),
        None => println!("{path}\t-"),
    }
    Ok(())
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let text = read_scene_text(&args.input.in_path)?;
    let path: cuesync::ElementPath = args
        .path
        .parse()
        .with_context(|| format!("parse element path '{}'", args.path))?;
    let range = cuesync::range_for_path(&text, &path)
        .with_context(|| format!("no element at path {path}"))?;
    println!("{}..{}", range.start, range.end);
    if let Some(object) = range.slice(&text) {
        println!("{object}");
    }
    Ok(())
}

fn cmd_highlight(args: HighlightArgs) -> anyhow::Result<()> {
    let text = read_scene_text(&args.input.in_path)?;
    let snapshot = cuesync::SyncSnapshot::new(text);
    let html = snapshot.highlight_at(
        args.at,
        args.select,
        &cuesync::HighlightOptions::default(),
    );

    match args.out {
        Some(out) => {
            std::fs::write(&out, html).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{html}"),
    }
    Ok(())
}

fn cmd_request(args: InputArgs) -> anyhow::Result<()> {
    let text = read_scene_text(&args.in_path)?;
    let scene: serde_json::Value = serde_json::from_str(&text).context("parse scene JSON")?;
    let request = cuesync::wrap_render_request(&cuesync::to_snake_case_keys(&scene));
    let out = serde_json::to_string_pretty(&request).context("serialize render request")?;
    println!("{out}");
    Ok(())
}
