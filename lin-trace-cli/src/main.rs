//! LIN Trace CLI Application
//!
//! Command-line front end for the lin-trace-decoder library. It adds:
//! - Flag and config file handling
//! - Serial device opening with retry
//! - Logging setup
//!
//! Data lines go to stdout; log messages go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use lin_trace_decoder::{LineReader, Monitor, MonitorError};
use std::io::{self, ErrorKind};
use std::path::PathBuf;

mod config;
mod port;

/// LIN Trace - Dump serial sniffer output, or only the LIN data bits that change
#[derive(Parser, Debug)]
#[command(name = "lin-trace")]
#[command(about = "Timestamp serial LIN sniffer output and show data changes", long_about = None)]
#[command(version)]
struct Args {
    /// Serial port to read [default: /dev/cu.usbserial-A600dOYP]
    #[arg(short, long, value_name = "PORT")]
    port: Option<String>,

    /// Baud rate, 0 to keep the device default [default: 115200]
    #[arg(short, long, value_name = "BAUD")]
    speed: Option<u32>,

    /// Show only data changes
    #[arg(short, long)]
    diff: bool,

    /// Drop a carriage return at the end of each line
    #[arg(long)]
    strip_cr: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn overrides(&self) -> config::FlagOverrides {
        config::FlagOverrides {
            device: self.port.clone(),
            speed: self.speed,
            diff: self.diff,
            strip_cr: self.strip_cr,
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments (unexpected arguments abort here)
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("LIN Trace CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", lin_trace_decoder::VERSION);

    let file_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            Some(config::load_config(path)?)
        }
        None => None,
    };
    let config = config::resolve(file_config, args.overrides())?;

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    log::info!("Flags:");
    log::info!("  --port:  {}", config.device);
    log::info!("  --diff:  {}", config.diff_mode);
    log::info!("  --speed: {}", config.baud);

    let port = port::open_port(&config);

    // Clock starts here, after the backlog was cleared
    let mut monitor = Monitor::new(&config);
    log::info!(
        "Capture started at {}",
        monitor
            .clock()
            .started_at()
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S%.3f")
    );

    let mut lines = LineReader::new(port).with_strip_cr(config.strip_cr);
    let mut sink = io::stdout().lock();

    match monitor.run(&mut lines, &mut sink) {
        Err(MonitorError::IoError(e)) if e.kind() == ErrorKind::BrokenPipe => {
            log::debug!("Output closed");
            Ok(())
        }
        result => result.context("Monitoring stopped"),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["lin-trace", "-p", "/dev/ttyUSB0", "-s", "0", "-d"]).unwrap();
        let overrides = args.overrides();
        assert_eq!(overrides.device.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(overrides.speed, Some(0));
        assert!(overrides.diff);
        assert!(!overrides.strip_cr);
    }

    #[test]
    fn test_unexpected_positional_rejected() {
        assert!(Args::try_parse_from(["lin-trace", "extra"]).is_err());
    }

    #[test]
    fn test_defaults_come_from_library() {
        let args = Args::try_parse_from(["lin-trace"]).unwrap();
        let config = config::resolve(None, args.overrides()).unwrap();
        assert_eq!(config.device, lin_trace_decoder::config::DEFAULT_DEVICE);
        assert_eq!(u32::from(config.baud), 115_200);
        assert!(!config.diff_mode);
    }
}
