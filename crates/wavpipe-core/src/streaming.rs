//! Incremental WAV writer for seekable sinks.
//!
//! Samples are appended in any number of batches behind a placeholder
//! header. [`StreamingWavWriter::finalize`] seeks back and patches the
//! header once the final sample count is known.

use std::io::{Seek, SeekFrom, Write};

use tracing::debug;

use crate::error::WavResult;
use crate::header::WavHeader;
use crate::writer::WavWriter;
use crate::BYTES_PER_SAMPLE;

/// WAV writer that accepts samples in several batches
#[derive(Debug)]
pub struct StreamingWavWriter<W: Write + Seek> {
    inner: WavWriter<W>,
    header_pos: u64,
    samples_written: usize,
}

impl<W: Write + Seek> StreamingWavWriter<W> {
    /// Create a writer and emit a placeholder header with zero sizes at the
    /// sink's current position
    ///
    /// # Errors
    ///
    /// Returns an error if the sink position cannot be read or the
    /// placeholder header cannot be written
    pub fn new(mut sink: W, sample_rate: i32) -> WavResult<Self> {
        let header_pos = sink.stream_position()?;
        let mut inner = WavWriter::new(sink, sample_rate);
        inner.write(WavHeader::build(sample_rate, 0).as_bytes())?;
        Ok(Self {
            inner,
            header_pos,
            samples_written: 0,
        })
    }

    /// Append a batch of samples after everything written so far
    ///
    /// # Errors
    ///
    /// Returns the first sink failure; later calls keep returning it
    pub fn append_samples(&mut self, samples: &[i16]) -> WavResult<()> {
        let mut data = Vec::with_capacity(samples.len() * BYTES_PER_SAMPLE as usize);
        for &sample in samples {
            data.extend_from_slice(&sample.to_le_bytes());
        }
        self.inner.write(&data)?;
        self.samples_written += samples.len();
        Ok(())
    }

    /// Samples appended so far
    #[must_use]
    pub const fn samples_written(&self) -> usize {
        self.samples_written
    }

    /// Bytes written so far, placeholder header included
    #[must_use]
    pub const fn bytes_written(&self) -> u64 {
        self.inner.bytes_written()
    }

    /// Patch the header sizes and hand the sink back
    ///
    /// # Errors
    ///
    /// Returns the recorded sink failure if any earlier write failed, or an
    /// error from seeking, patching or flushing
    pub fn finalize(self) -> WavResult<W> {
        if let Some(err) = self.inner.error() {
            return Err(err.clone());
        }

        let header = WavHeader::build(self.inner.sample_rate(), self.samples_written);
        debug!(
            "Finalizing WAV: {} samples, {} data bytes",
            self.samples_written,
            header.data_len()
        );

        let mut sink = self.inner.into_inner();
        let end = sink.stream_position()?;
        sink.seek(SeekFrom::Start(self.header_pos))?;
        sink.write_all(header.as_bytes())?;
        sink.seek(SeekFrom::Start(end))?;
        sink.flush()?;
        Ok(sink)
    }
}
