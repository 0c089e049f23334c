//! Single-shot WAV writer over any byte sink.
//!
//! [`WavWriter`] writes one header followed by one batch of samples. It does
//! not need a seekable sink because all samples are known before the header
//! is built. The first sink failure is kept and returned from every later
//! call; there is no way to clear it.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::error::{WavError, WavResult};
use crate::header::WavHeader;
use crate::BYTES_PER_SAMPLE;

/// WAV writer bound to a sink and a sample rate
#[derive(Debug)]
pub struct WavWriter<W: Write> {
    sink: W,
    sample_rate: i32,
    bytes_written: u64,
    error: Option<WavError>,
}

impl<W: Write> WavWriter<W> {
    /// Create a new writer. Nothing is written until the first call.
    pub const fn new(sink: W, sample_rate: i32) -> Self {
        Self {
            sink,
            sample_rate,
            bytes_written: 0,
            error: None,
        }
    }

    /// Pass `buf` through to the sink.
    ///
    /// Every byte the sink accepts is counted, including bytes accepted
    /// before a failure. Once a write has failed the sink is left alone and
    /// the recorded error is returned.
    ///
    /// # Errors
    ///
    /// Returns the first sink failure seen by this writer.
    pub fn write(&mut self, buf: &[u8]) -> WavResult<usize> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }

        let mut accepted = 0;
        while accepted < buf.len() {
            match self.sink.write(&buf[accepted..]) {
                Ok(0) => {
                    return Err(self.fault(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "sink accepted no bytes",
                    )));
                }
                Ok(n) => {
                    accepted += n;
                    self.bytes_written += n as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(self.fault(e)),
            }
        }

        debug!("Wrote {} bytes to sink", accepted);
        Ok(accepted)
    }

    /// Write a complete WAV file: header, then `samples` as little-endian
    /// 16-bit values.
    ///
    /// Returns the total number of bytes this writer has put into the sink,
    /// which is `44 + 2 * samples.len()` for a fresh writer.
    ///
    /// # Errors
    ///
    /// Returns the first sink failure. Nothing is rolled back, so the sink
    /// may hold a truncated file; [`bytes_written`](Self::bytes_written)
    /// tells how far it got.
    pub fn write_samples(&mut self, samples: &[i16]) -> WavResult<u64> {
        let header = WavHeader::build(self.sample_rate, samples.len());
        debug!(
            "Writing WAV header: {} samples at {} Hz",
            samples.len(),
            self.sample_rate
        );
        self.write(header.as_bytes())?;

        let mut data = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE as usize);
        for &sample in samples {
            data.extend_from_slice(&sample.to_le_bytes());
        }
        self.write(&data)?;

        Ok(self.bytes_written)
    }

    fn fault(&mut self, err: io::Error) -> WavError {
        let err = WavError::from(err);
        warn!(
            "WAV sink failed after {} bytes: {}",
            self.bytes_written, err
        );
        self.error = Some(err.clone());
        err
    }

    /// Total bytes the sink has accepted through this writer
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Sample rate given at construction
    #[must_use]
    pub const fn sample_rate(&self) -> i32 {
        self.sample_rate
    }

    /// The recorded sink failure, if any
    #[must_use]
    pub const fn error(&self) -> Option<&WavError> {
        self.error.as_ref()
    }

    /// Whether a sink write has failed
    #[must_use]
    pub const fn is_faulted(&self) -> bool {
        self.error.is_some()
    }

    /// Borrow the underlying sink
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Give the sink back to the caller
    pub fn into_inner(self) -> W {
        self.sink
    }
}
