//! Wall Bounce entry point
//!
//! Builds the fixed enclosure scene and runs it until interrupted or out of
//! ticks, printing one line per event to stdout.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use wall_bounce::sim::{Scene, World};
use wall_bounce::{Driver, OutputFormat, Settings, WriterSink};

#[derive(Parser, Debug)]
#[command(name = "wall-bounce", version, about)]
struct Args {
    /// Settings file (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Delay between ticks in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Emit events as JSON lines
    #[arg(long)]
    json: bool,

    /// Only report bounces
    #[arg(long)]
    quiet_moves: bool,

    /// Print the final world state as JSON on exit
    #[arg(long)]
    snapshot: bool,
}

impl Args {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };

        if let Some(ticks) = self.ticks {
            settings.max_ticks = Some(ticks);
        }
        if let Some(ms) = self.interval_ms {
            settings.tick_interval_ms = ms;
        }
        if self.json {
            settings.output = OutputFormat::Json;
        }
        if self.quiet_moves {
            settings.report_moves = false;
        }
        if self.snapshot {
            settings.print_snapshot = true;
        }
        Ok(settings)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = args.settings()?;

    log::info!("Wall Bounce starting (output: {})", settings.output.as_str());

    let world = World::initialize(&Scene::enclosure()).context("building the startup scene")?;
    let sink = WriterSink::new(io::stdout().lock(), settings.output);
    let mut driver = Driver::new(world, sink, &settings);

    let ticks = driver.run().context("writing simulation events")?;
    let (world, sink) = driver.into_parts();
    let mut out = sink.into_inner();

    if settings.print_snapshot {
        serde_json::to_writer_pretty(&mut out, &world.snapshot())
            .context("writing final snapshot")?;
        writeln!(out)?;
    }

    log::info!("Ran {ticks} ticks");
    world.shutdown();
    Ok(())
}
