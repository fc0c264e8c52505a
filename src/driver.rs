//! Real-time driver
//!
//! Calls [`World::tick`] on a fixed cadence and forwards the events each tick
//! produces to an [`EventSink`]. Pacing never affects simulation results.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::settings::{OutputFormat, Settings};
use crate::sim::{SimEvent, World};

/// Destination for simulation events
pub trait EventSink {
    fn record(&mut self, event: &SimEvent) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Sends events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&mut self, event: &SimEvent) -> io::Result<()> {
        log::info!("{event}");
        Ok(())
    }
}

/// Discards events
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn record(&mut self, _event: &SimEvent) -> io::Result<()> {
        Ok(())
    }
}

/// Collects events in memory
impl EventSink for Vec<SimEvent> {
    fn record(&mut self, event: &SimEvent) -> io::Result<()> {
        self.push(*event);
        Ok(())
    }
}

/// Writes one line per event to any writer (stdout, a file, ...)
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> EventSink for WriterSink<W> {
    fn record(&mut self, event: &SimEvent) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "{event}"),
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, event)?;
                writeln!(self.writer)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Drives a world until stopped or out of ticks
pub struct Driver<S: EventSink> {
    world: World,
    sink: S,
    interval: Duration,
    max_ticks: Option<u64>,
    report_moves: bool,
    stop: Arc<AtomicBool>,
}

impl<S: EventSink> Driver<S> {
    pub fn new(world: World, sink: S, settings: &Settings) -> Self {
        Self {
            world,
            sink,
            interval: settings.tick_interval(),
            max_ticks: settings.max_ticks,
            report_moves: settings.report_moves,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that ends [`Driver::run`] before its next tick once set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Tick until stopped or `max_ticks` is reached; returns ticks executed
    pub fn run(&mut self) -> io::Result<u64> {
        let mut ticks = 0;
        log::info!(
            "Driver running: interval={:?}, max_ticks={:?}",
            self.interval,
            self.max_ticks
        );

        loop {
            if self.stop.load(Ordering::Relaxed) {
                log::info!("Stop requested after {ticks} ticks");
                break;
            }
            if self.max_ticks.is_some_and(|max| ticks >= max) {
                break;
            }

            self.world.tick();
            ticks += 1;

            for event in self.world.drain_events() {
                if !self.report_moves && matches!(event, SimEvent::Moved { .. }) {
                    continue;
                }
                self.sink.record(&event)?;
            }
            self.sink.flush()?;

            if !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
        }

        Ok(ticks)
    }

    /// Hand back the world and sink
    pub fn into_parts(self) -> (World, S) {
        (self.world, self.sink)
    }
}
