//! Serial device opening
//!
//! Opens the configured device, retrying until it appears, and hands the
//! monitor a plain byte stream. Opening may reset some boards through a DTR
//! level change.

use anyhow::{Context, Result};
use lin_trace_decoder::{BaudRate, MonitorConfig};
use serialport::{ClearBuffer, SerialPort};
use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::thread;
use std::time::Duration;

/// Delay between attempts to open the device
pub const OPEN_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Read timeout on configured ports; timeouts are retried by the line reader
const READ_TIMEOUT: Duration = Duration::from_secs(1);

/// An open input device
pub enum Port {
    /// Port opened and configured at a fixed speed
    Serial(Box<dyn SerialPort>),
    /// Device node opened as-is, speed left untouched
    Device(File),
}

impl Read for Port {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Port::Serial(port) => port.read(buf),
            Port::Device(file) => file.read(buf),
        }
    }
}

/// Open the device, retrying indefinitely with a fixed delay
pub fn open_port(config: &MonitorConfig) -> Port {
    let mut attempt: u64 = 0;
    loop {
        attempt += 1;
        log::info!("Opening port {} (attempt {})", config.device, attempt);
        match try_open(config) {
            Ok(port) => {
                log::info!("Port {} ready", config.device);
                return port;
            }
            Err(e) => {
                log::warn!("{:#}, will retry", e);
                thread::sleep(OPEN_RETRY_DELAY);
            }
        }
    }
}

/// Single attempt at opening and preparing the device
pub fn try_open(config: &MonitorConfig) -> Result<Port> {
    match config.baud {
        BaudRate::Fixed(rate) => {
            log::info!("Setting port speed to {}", rate);
            let port = serialport::new(config.device.as_str(), rate)
                .timeout(READ_TIMEOUT)
                .open()
                .with_context(|| format!("Failed to open {}", config.device))?;

            log::debug!("Clearing pending input");
            port.clear(ClearBuffer::Input)
                .with_context(|| format!("Failed to clear input on {}", config.device))?;

            Ok(Port::Serial(port))
        }
        BaudRate::DeviceDefault => {
            log::info!("Using default speed");
            let file = open_device(&config.device)
                .with_context(|| format!("Failed to open {}", config.device))?;

            log::debug!("Clearing pending input");
            discard_pending_input(&file)
                .with_context(|| format!("Failed to clear input on {}", config.device))?;

            Ok(Port::Device(file))
        }
    }
}

/// Open the device node read-only, without making it the controlling terminal
#[cfg(unix)]
fn open_device(path: &str) -> io::Result<File> {
    use nix::fcntl::OFlag;
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .read(true)
        .custom_flags(OFlag::O_NOCTTY.bits())
        .open(path)
}

#[cfg(not(unix))]
fn open_device(path: &str) -> io::Result<File> {
    OpenOptions::new().read(true).open(path)
}

/// Drop input the terminal received before we started, leaving its speed alone
///
/// Files and pipes have no input queue and are left as they are.
#[cfg(unix)]
fn discard_pending_input(file: &File) -> io::Result<()> {
    use nix::errno::Errno;
    use nix::sys::termios::{tcflush, FlushArg};

    match tcflush(file, FlushArg::TCIFLUSH) {
        Ok(()) => Ok(()),
        Err(Errno::ENOTTY) => {
            log::debug!("Not a terminal, nothing to clear");
            Ok(())
        }
        Err(errno) => Err(io::Error::from(errno)),
    }
}

#[cfg(not(unix))]
fn discard_pending_input(_file: &File) -> io::Result<()> {
    Ok(())
}
