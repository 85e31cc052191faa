use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use notegraph::driver::{self, DriverExit, TickDriver};
use notegraph::io::{FormatRegistry, load_config};
use notegraph::observer::{TracingObserver, WatchPublisher};
use notegraph::svg_writer::RenderOptions;
use notegraph::{LayoutSnapshot, NoteLayout, NoteSet, Simulation, SimulationConfig};

/// Side length used when neither the CLI nor the note set gives one
const DEFAULT_BBOX: f64 = 400.0;

/// Force-directed layout of notes pulled toward six anchors.
#[derive(Parser)]
#[command(name = "notegraph")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every simulation step
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Note set (.yaml, .yml or .json)
    #[arg(short, long)]
    input: PathBuf,

    /// Output file (.svg or .json)
    #[arg(short, long, default_value = "layout.svg")]
    output: PathBuf,

    /// Also write the final snapshot as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Simulation config overrides (.yaml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for initial note placement
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Bounding box side length, overrides the note set
    #[arg(long)]
    bbox: Option<f64>,

    /// Give up after this many steps
    #[arg(long, default_value = "1000")]
    max_steps: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation to convergence and export the result
    Layout(LayoutArgs),
    /// Step on a timer, rewriting the output after every step
    Animate {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Milliseconds between steps
        #[arg(long, default_value = "100")]
        interval_ms: u64,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "notegraph=debug" } else { "notegraph=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Note set, layout geometry and simulation built from the CLI arguments
fn prepare(args: &LayoutArgs) -> anyhow::Result<(NoteLayout, Simulation)> {
    let registry = FormatRegistry::with_defaults(RenderOptions::default());
    let set: NoteSet = registry
        .reader_for_path(&args.input)?
        .read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let side = args.bbox.or(set.bbox_side_length).unwrap_or(DEFAULT_BBOX);
    let layout = NoteLayout::new(side)?;

    let config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let mut simulation = layout.simulation(&set.notes, config, args.seed)?;
    simulation.subscribe(TracingObserver);
    info!(
        notes = set.notes.len(),
        side,
        seed = args.seed,
        "prepared note layout"
    );
    Ok((layout, simulation))
}

fn export(
    registry: &FormatRegistry,
    snapshot: &LayoutSnapshot,
    output: &Path,
    json: Option<&Path>,
) -> anyhow::Result<()> {
    registry.writer_for_path(output)?.write(snapshot, output)?;
    if let Some(json) = json {
        registry
            .writer_for_format("json")
            .context("no JSON writer registered")?
            .write(snapshot, json)?;
    }
    Ok(())
}

fn layout(args: &LayoutArgs) -> anyhow::Result<()> {
    let (layout, mut simulation) = prepare(args)?;
    let registry = FormatRegistry::with_defaults(RenderOptions::for_layout(&layout));
    registry.writer_for_path(&args.output)?;

    let summary = simulation.run_to_convergence(args.max_steps);
    export(
        &registry,
        &simulation.snapshot(),
        &args.output,
        args.json.as_deref(),
    )?;

    if summary.converged {
        println!(
            "Converged after {} steps, wrote {}",
            summary.steps,
            args.output.display()
        );
    } else {
        println!(
            "Stopped after {} steps without converging, wrote {}",
            summary.steps,
            args.output.display()
        );
    }
    Ok(())
}

async fn animate(args: &LayoutArgs, interval_ms: u64) -> anyhow::Result<()> {
    let (layout, mut simulation) = prepare(args)?;
    let registry = Arc::new(FormatRegistry::with_defaults(RenderOptions::for_layout(
        &layout,
    )));
    registry.writer_for_path(&args.output)?;

    let (publisher, mut frames) = WatchPublisher::channel(simulation.snapshot());
    simulation.subscribe(publisher);

    let frame_registry = Arc::clone(&registry);
    let frame_output = args.output.clone();
    let frame_task = tokio::spawn(async move {
        let mut written = 0usize;
        while frames.changed().await.is_ok() {
            let frame = frames.borrow_and_update().clone();
            frame_registry
                .writer_for_path(&frame_output)?
                .write(&frame, &frame_output)?;
            written += 1;
        }
        anyhow::Ok(written)
    });

    let (cancel, token) = driver::cancellation();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let exit = TickDriver::new(Duration::from_millis(interval_ms))
        .with_max_steps(args.max_steps)
        .run(&mut simulation, token)
        .await;
    signal_task.abort();

    let snapshot = simulation.snapshot();
    drop(simulation);
    let frames_written = frame_task.await??;
    export(&registry, &snapshot, &args.output, args.json.as_deref())?;

    match exit {
        DriverExit::Converged { steps } => println!(
            "Converged after {steps} steps ({frames_written} frames), wrote {}",
            args.output.display()
        ),
        DriverExit::Cancelled { steps } => {
            warn!(steps, "animation interrupted");
            println!(
                "Interrupted after {steps} steps, wrote {}",
                args.output.display()
            );
        }
        DriverExit::StepLimit { steps } => println!(
            "Stopped after {steps} steps without converging, wrote {}",
            args.output.display()
        ),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Layout(args) => layout(&args)?,
        Commands::Animate {
            layout: args,
            interval_ms,
        } => animate(&args, interval_ms).await?,
    }

    Ok(())
}
