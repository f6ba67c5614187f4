//! Byte and line sources
//!
//! The monitor reads one byte at a time from a [`SerialSource`] and
//! assembles lines with a [`LineReader`]. Any `std::io::Read` is a source,
//! which covers serial ports, device files, stdin and in-memory buffers.

use std::io::{self, ErrorKind, Read};

/// Blocking single-byte input
pub trait SerialSource {
    /// Block until one byte is available
    ///
    /// Returns `Ok(None)` once the stream has ended.
    fn read_one_char(&mut self) -> io::Result<Option<u8>>;
}

impl<R: Read> SerialSource for R {
    fn read_one_char(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                // Ports report an idle line as a timeout; keep waiting
                Err(e) if matches!(e.kind(), ErrorKind::Interrupted | ErrorKind::TimedOut) => {
                    continue
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Assembles newline-terminated lines from a byte source
pub struct LineReader<S> {
    source: S,
    strip_cr: bool,
    buffer: Vec<u8>,
}

impl<S: SerialSource> LineReader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            strip_cr: false,
            buffer: Vec::with_capacity(128),
        }
    }

    /// Builder method: also drop a carriage return preceding the line feed
    pub fn with_strip_cr(mut self, enabled: bool) -> Self {
        self.strip_cr = enabled;
        self
    }

    /// Read the next line, without its line feed
    ///
    /// Returns `Ok(None)` at end of stream. A trailing partial line is
    /// returned before that.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buffer.clear();
        loop {
            match self.source.read_one_char()? {
                Some(b'\n') => break,
                Some(byte) => self.buffer.push(byte),
                None if self.buffer.is_empty() => return Ok(None),
                None => break,
            }
        }

        if self.strip_cr && self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }

        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }
}

impl<S: SerialSource> Iterator for LineReader<S> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_line().transpose()
    }
}
