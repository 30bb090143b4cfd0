use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "seachart", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run an interactive display session (Esc or Ctrl+C to stop).
    Display(DisplayArgs),
    /// Publish ship poses to the pose source.
    Ships(ShipsArgs),
    /// Remove all ships from the pose source.
    Clear(ConfigArgs),
    /// Render the chart with the current ships once and save it under a name.
    Snapshot(SnapshotArgs),
    /// Assemble the captured frames into the configured GIF.
    Animate(AnimateArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Chart configuration JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct DisplayArgs {
    /// Chart configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Run without a terminal, stopping after this many ticks.
    #[arg(long)]
    headless_ticks: Option<u64>,
}

#[derive(Parser, Debug)]
struct ShipsArgs {
    /// Chart configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Ship pose as `x,y,heading[,id]`; repeat for more ships.
    #[arg(long = "pose", value_parser = parse_pose)]
    poses: Vec<seachart::PoseRecord>,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    /// Chart configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Snapshot name, substituted into the frame file pattern.
    #[arg(long, default_value = "map")]
    name: String,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Chart configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Keep the frame files and the published ships after assembling.
    #[arg(long, default_value_t = false)]
    keep_frames: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(seachart::TerminalLogWriter::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Display(args) => cmd_display(args),
        Command::Ships(args) => cmd_ships(args),
        Command::Clear(args) => cmd_clear(args),
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Animate(args) => cmd_animate(args),
    }
}

fn cmd_display(args: DisplayArgs) -> anyhow::Result<()> {
    let chart = seachart::Chart::from_path(&args.config)?;
    let stats = match args.headless_ticks {
        Some(ticks) => chart.run_display(seachart::HeadlessWindow::closing_after(ticks))?,
        None => {
            let preview = chart.config().paths.preview.clone();
            let window = seachart::TerminalWindow::open(preview.clone())?;
            if let Some(p) = &preview {
                eprintln!("live preview at {}", p.display());
            }
            chart.run_display(window)?
        }
    };
    eprintln!(
        "display closed after {} ticks ({} updates, {} frames)",
        stats.ticks, stats.updates, stats.frames_written
    );
    Ok(())
}

fn cmd_ships(args: ShipsArgs) -> anyhow::Result<()> {
    let chart = seachart::Chart::from_path(&args.config)?;
    chart.show_ships(&args.poses)?;
    eprintln!(
        "published {} ships to {}",
        args.poses.len(),
        chart.config().paths.ships.display()
    );
    Ok(())
}

fn cmd_clear(args: ConfigArgs) -> anyhow::Result<()> {
    let chart = seachart::Chart::from_path(&args.config)?;
    chart.clear()?;
    eprintln!("cleared {}", chart.config().paths.ships.display());
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let chart = seachart::Chart::from_path(&args.config)?;
    let path = chart
        .snapshot(&args.name)
        .with_context(|| format!("snapshot '{}'", args.name))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let chart = seachart::Chart::from_path(&args.config)?;
    let out = chart.config().paths.simulation.clone();
    let stats = if args.keep_frames {
        let fps = chart.config().display.fps;
        seachart::assemble_gif(&chart.frames()?, &out, fps, fps as usize)?
    } else {
        chart.save()?
    };
    eprintln!(
        "wrote {} ({} frames, {} skipped)",
        out.display(),
        stats.frames_written,
        stats.frames_skipped
    );
    Ok(())
}

fn parse_pose(s: &str) -> Result<seachart::PoseRecord, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if !(3..=4).contains(&parts.len()) {
        return Err(format!("expected x,y,heading[,id], got '{s}'"));
    }
    let num = |i: usize| -> Result<f64, String> {
        parts[i]
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("'{}' is not a finite number", parts[i]))
    };
    let record = seachart::PoseRecord::new(num(0)?, num(1)?, num(2)?);
    match parts.get(3) {
        Some(id) => id
            .parse::<u64>()
            .map(|id| record.with_id(id))
            .map_err(|_| format!("'{id}' is not a ship id")),
        None => Ok(record),
    }
}
