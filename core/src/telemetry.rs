//! Events describing a running simulation, for logging or broadcasting.
//!
//! Each event serializes to a flat JSON object with an `"event"` field naming
//! its kind, for example:
//!
//! ```json
//! {"event":"generation","generation":12,"fps":"41.67","fps_raw":41.666,"alive":208}
//! ```

use log::warn;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::sim::rule::Rule;

/// Something that happened in a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A new pattern was loaded.
    Start {
        /// Width of the grid.
        width: usize,
        /// Height of the grid.
        height: usize,
        /// Rule being simulated.
        rule: Rule,
        /// Initial grid, as RLE.
        rle: String,
    },
    /// A generation was computed.
    Generation {
        /// Generation number.
        generation: u64,
        /// Generations per second, formatted to two decimal places.
        fps: String,
        /// Generations per second.
        fps_raw: f64,
        /// Number of live cells.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alive: Option<usize>,
    },
    /// The grid repeated an earlier generation.
    SteadyState {
        /// Generation number.
        generation: u64,
        /// History slot of the current generation.
        cycle_index: usize,
        /// History slot that matched.
        matched: usize,
        /// `false` when the cycle is first found; `true` when the countdown
        /// has finished and the simulation is about to reseed.
        complete: bool,
    },
}
impl TelemetryEvent {
    /// Constructs a `Generation` event from a measured rate.
    pub fn generation(generation: u64, fps: f64, alive: Option<usize>) -> Self {
        Self::Generation {
            generation,
            fps: format!("{:.2}", fps),
            fps_raw: fps,
            alive,
        }
    }

    /// Serializes the event as a single line of JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Destination for telemetry events.
///
/// Sinks handle their own failures; a simulation never stops because an event
/// could not be delivered.
pub trait TelemetrySink {
    /// Delivers one event.
    fn send(&mut self, event: &TelemetryEvent);
}

impl TelemetrySink for Vec<TelemetryEvent> {
    fn send(&mut self, event: &TelemetryEvent) {
        self.push(event.clone());
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Copy, Clone)]
pub struct NullSink;
impl TelemetrySink for NullSink {
    fn send(&mut self, _event: &TelemetryEvent) {}
}

/// Sink that writes each event as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W> {
    writer: W,
}
impl<W: Write> JsonLinesSink<W> {
    /// Constructs a sink that writes to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn try_send(&mut self, event: &TelemetryEvent) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}
impl<W: Write> TelemetrySink for JsonLinesSink<W> {
    fn send(&mut self, event: &TelemetryEvent) {
        if let Err(e) = self.try_send(event) {
            warn!("Unable to send telemetry: {}", e);
        }
    }
}
