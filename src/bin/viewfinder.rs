use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use viewfinder::{Millis, PageSpec, Showcase};

#[derive(Parser, Debug)]
#[command(name = "viewfinder", version)]
struct Cli {
    /// Log reveal and layout activity at DEBUG level.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the built-in AR suite page as JSON.
    Preset(PresetArgs),
    /// Print resolved hotspot placements for every viewfinder.
    Layout(LayoutArgs),
    /// Replay a scroll trace and print reveal events as JSON lines.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Output path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Resize every viewfinder to this width (height follows its aspect ratio).
    #[arg(long)]
    width: Option<f64>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input page JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Scroll offsets to visit, one per step.
    #[arg(long, value_delimiter = ',', required = true)]
    scroll: Vec<f64>,

    /// Time between steps.
    #[arg(long, default_value_t = 16)]
    step_ms: u64,

    /// Extra time after the last step so running transitions complete.
    #[arg(long, default_value_t = 1000)]
    settle_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Preset(args) => cmd_preset(args),
        Command::Layout(args) => cmd_layout(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_page_json(path: &Path) -> anyhow::Result<PageSpec> {
    let f = File::open(path).with_context(|| format!("open page '{}'", path.display()))?;
    let page = PageSpec::from_reader(BufReader::new(f)).with_context(|| "parse page JSON")?;
    Ok(page)
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let json = viewfinder::ar_suite().to_json_pretty()?;
    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write page '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let mut page = read_page_json(&args.in_path)?;
    page.normalize();
    page.validate()?;

    let mut out = std::io::stdout().lock();
    for spec in &page.viewfinders {
        let mut vf = spec.build()?;
        if let Some(width) = args.width {
            anyhow::ensure!(
                width.is_finite() && width >= 0.0,
                "width must be finite and >= 0, got {width}"
            );
            vf.resize_width(width);
        }
        let line = serde_json::json!({
            "viewfinder": vf.label(),
            "bounds": vf.bounds(),
            "corners": vf.corners(),
            "launch": vf.launch_rect(),
            "hotspots": vf
                .hotspots()
                .iter()
                .zip(vf.resolve_in_document())
                .map(|(h, placed)| serde_json::json!({
                    "label": h.label,
                    "marker": placed.marker,
                    "tooltip": placed.tooltip,
                }))
                .collect::<Vec<_>>(),
        });
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let page = read_page_json(&args.in_path)?;
    let mut now = Millis::ZERO;
    let mut show = Showcase::mount(&page, now).with_context(|| "mount page")?;

    let mut out = std::io::stdout().lock();
    for event in show.advance(now) {
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }
    for y in args.scroll {
        now = now + Millis(args.step_ms);
        for event in show.scroll_to(y, now) {
            writeln!(out, "{}", serde_json::to_string(&event)?)?;
        }
    }
    now = now + Millis(args.settle_ms);
    for event in show.advance(now) {
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }

    let frame = show.snapshot(now);
    writeln!(out, "{}", serde_json::to_string(&frame)?)?;
    tracing::debug!(
        at = now.0,
        scroll = show.scheduler().source().scroll().y,
        "simulation finished"
    );
    show.unmount();
    Ok(())
}
