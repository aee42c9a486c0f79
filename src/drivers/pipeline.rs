use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use log::{info, trace, warn};
use crate::drivers::deriver::{self, DeriverState};
use crate::drivers::error::CaptureError;
use crate::drivers::frame::{parse_frame, FrameOutcome};
use crate::drivers::smoothing::moving_average;
use crate::drivers::source::LineSource;
use crate::types::{Recording, Sample};
/// Counters gathered while capturing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaptureStats {
    pub polls: u64,
    pub lines: u64,
    pub accepted: u64,
    pub rejected: BTreeMap<&'static str, u64>,
    pub read_errors: u64,
}
impl CaptureStats {
    pub fn rejected_total(&self) -> u64 {
        self.rejected.values().sum()
    }
}
/// Poll loop that turns raw lines into a `Recording`.
pub struct CapturePipeline<S: LineSource> {
    source: S,
    sampling_period: f64,
    state: DeriverState,
    samples: Vec<Sample>,
    total_accel: Vec<f64>,
    fall_events: Vec<f64>,
    stats: CaptureStats,
}
impl<S: LineSource> CapturePipeline<S> {
    pub fn new(source: S, sampling_period: f64) -> Self {
        Self {
            source,
            sampling_period,
            state: DeriverState::default(),
            samples: Vec::new(),
            total_accel: Vec::new(),
            fall_events: Vec::new(),
            stats: CaptureStats::default(),
        }
    }
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn stats(&self) -> &CaptureStats {
        &self.stats
    }
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }
    /// Parses one line and, when accepted, appends it and its derived values.
    pub fn feed_line(&mut self, line: &str) -> FrameOutcome {
        self.stats.lines += 1;
        let outcome = parse_frame(line, self.samples.len() as u64, self.sampling_period);
        match &outcome {
            FrameOutcome::Accepted(sample) => {
                let (next, point) = deriver::step(self.state, sample);
                self.state = next;
                self.total_accel.push(point.total_accel);
                if let Some(t) = point.fall_event {
                    self.fall_events.push(t);
                }
                self.samples.push(*sample);
                self.stats.accepted += 1;
            }
            FrameOutcome::Rejected(reason) => {
                trace!("dropped line {line:?}: {reason:?}");
                *self.stats.rejected.entry(reason.label()).or_insert(0) += 1;
            }
        }
        outcome
    }
    /// One poll of the source. Returns how many samples were accepted.
    pub fn pump_once(&mut self) -> Result<usize, CaptureError> {
        self.stats.polls += 1;
        let lines = self.source.poll_lines()?;
        let before = self.samples.len();
        for line in &lines {
            self.feed_line(line);
        }
        Ok(self.samples.len() - before)
    }
    /// Polls until `duration` of wall-clock time has passed. Read errors are
    /// logged and counted; they never end the capture early.
    pub fn capture_for(&mut self, duration: Duration) -> &CaptureStats {
        info!("Recording for {:.1}s", duration.as_secs_f64());
        let started = Instant::now();
        while started.elapsed() < duration {
            if let Err(e) = self.pump_once() {
                self.stats.read_errors += 1;
                warn!("Error during serial read: {e}");
            }
        }
        info!(
            "Capture finished: {} polls, {} lines, {} samples, {} dropped lines, {} read errors",
            self.stats.polls,
            self.stats.lines,
            self.stats.accepted,
            self.stats.rejected_total(),
            self.stats.read_errors
        );
        &self.stats
    }
    /// Smooths the total-acceleration trace and releases the source.
    pub fn finish(self, window: usize) -> Result<(Recording, CaptureStats), CaptureError> {
        let filtered_total_accel = moving_average(&self.total_accel, window)?;
        let recording = Recording {
            samples: self.samples,
            total_accel: self.total_accel,
            filtered_total_accel,
            button_fall_events: self.fall_events,
        };
        Ok((recording, self.stats))
    }
}
