//! LIN Trace Decoder Library
//!
//! Turns the text output of a LIN bus sniffer into timestamped lines, and
//! optionally into per-identifier bit diffs so that only changing data is
//! shown.
//!
//! # Architecture
//!
//! The library covers the processing pipeline:
//! - Assembles lines from a blocking byte source
//! - Parses `id data... checksum` frame lines
//! - Expands data bytes into bit sequences
//! - Tracks the last bit sequence per identifier and computes change masks
//! - Renders raw and diff output lines
//!
//! The library does NOT:
//! - Open or configure serial devices
//! - Parse command-line arguments
//! - Verify checksums or drive the bus
//!
//! Device handling lives in the application layer (lin-trace-cli).
//!
//! # Example Usage
//!
//! ```
//! use lin_trace_decoder::{LineReader, Monitor, MonitorConfig};
//!
//! let config = MonitorConfig::new().with_diff_mode(true);
//! let mut monitor = Monitor::new(&config);
//!
//! let input: &[u8] = b"2a 01 02 ff\n2a 01 03 ff\n";
//! let mut lines = LineReader::new(input);
//! let mut output = Vec::new();
//! monitor.run(&mut lines, &mut output).unwrap();
//!
//! let text = String::from_utf8(output).unwrap();
//! assert!(text.ends_with("2a: | ---- ---- | ---- ---1 |\n"));
//! ```

// Public modules
pub mod bits;
pub mod clock;
pub mod config;
pub mod format;
pub mod monitor;
pub mod parser;
pub mod source;
pub mod tracker;
pub mod types;

// Re-export main types for convenience
pub use clock::{Clock, RelativeTime};
pub use config::{BaudRate, MonitorConfig, OutputMode};
pub use monitor::{Monitor, MonitorStats};
pub use parser::parse_line;
pub use source::{LineReader, SerialSource};
pub use tracker::DiffTracker;
pub use types::{Bit, BitSequence, DiffMask, LinFrame, MonitorError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
