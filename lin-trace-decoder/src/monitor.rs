//! Main monitoring loop
//!
//! The [`Monitor`] owns the clock and the per-identifier history and turns
//! each input line into at most one output line.

use crate::clock::{Clock, RelativeTime};
use crate::config::{MonitorConfig, OutputMode};
use crate::format::{format_diff, format_raw};
use crate::parser::parse_line;
use crate::source::{LineReader, SerialSource};
use crate::tracker::DiffTracker;
use crate::types::{BitSequence, Result};
use std::io::Write;

/// Counters for one monitoring run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorStats {
    /// Lines read from the source
    pub lines_read: u64,
    /// Lines that parsed as frames (diff mode)
    pub frames_parsed: u64,
    /// Lines that produced no output
    pub lines_skipped: u64,
    /// Lines written to the sink
    pub lines_emitted: u64,
}

/// Reads lines, stamps them and emits either raw lines or bit diffs
pub struct Monitor {
    mode: OutputMode,
    clock: Clock,
    tracker: DiffTracker,
    stats: MonitorStats,
}

impl Monitor {
    /// Create a monitor and start its clock
    ///
    /// Call this once the port is open and its backlog cleared, so that
    /// timestamps count from the first byte that can be read.
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            mode: config.output_mode(),
            clock: Clock::start(),
            tracker: DiffTracker::new(),
            stats: MonitorStats::default(),
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    pub fn tracker(&self) -> &DiffTracker {
        &self.tracker
    }

    /// Process one line stamped with `timestamp`
    ///
    /// # Returns
    /// * `Some(line)` - output to emit
    /// * `None` - nothing to show (not a frame, first sighting or no change)
    pub fn process_line(&mut self, line: &str, timestamp: RelativeTime) -> Option<String> {
        self.stats.lines_read += 1;

        let output = match self.mode {
            OutputMode::Raw => Some(format_raw(timestamp, line)),
            OutputMode::Diff => self.diff_line(line, timestamp),
        };

        match output {
            Some(_) => self.stats.lines_emitted += 1,
            None => self.stats.lines_skipped += 1,
        }
        output
    }

    fn diff_line(&mut self, line: &str, timestamp: RelativeTime) -> Option<String> {
        let frame = parse_line(line)?;
        self.stats.frames_parsed += 1;
        log::trace!("Frame {}", frame);

        let bits = BitSequence::from_bytes(&frame.data);
        let mask = self.tracker.update(frame.id, bits)?;
        Some(format_diff(timestamp, frame.id, &mask))
    }

    /// Run until the source ends, writing and flushing each output line
    ///
    /// A live serial port never ends, so in practice this runs until the
    /// process is terminated.
    pub fn run<S, W>(&mut self, lines: &mut LineReader<S>, sink: &mut W) -> Result<()>
    where
        S: SerialSource,
        W: Write,
    {
        log::info!("Monitoring in {:?} mode", self.mode);

        while let Some(line) = lines.read_line()? {
            let timestamp = self.clock.elapsed();
            if let Some(output) = self.process_line(&line, timestamp) {
                writeln!(sink, "{}", output)?;
                sink.flush()?;
            }
        }

        log::info!("Input ended");
        log::debug!(
            "Read {} lines, parsed {} frames, emitted {} lines, skipped {}, tracking {} identifiers",
            self.stats.lines_read,
            self.stats.frames_parsed,
            self.stats.lines_emitted,
            self.stats.lines_skipped,
            self.tracker.len()
        );
        Ok(())
    }
}
