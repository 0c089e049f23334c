//! Saving samples as `.wav` files and encoding them in memory.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::OutputConfig;
use crate::error::{WavError, WavResult};
use crate::header::WavHeader;
use crate::writer::WavWriter;
use crate::{BYTES_PER_SAMPLE, HEADER_LEN};

/// Outcome of [`save_wav`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedWav {
    /// Full path of the written file
    pub path: PathBuf,
    /// File size in bytes
    pub bytes_written: u64,
    /// Number of samples in the data section
    pub sample_count: usize,
}

/// Strip trailing dots from `name` and make sure it ends in `.wav`
#[must_use]
pub fn ensure_wav_suffix(name: &str) -> String {
    let trimmed = name.trim_end_matches('.');
    if trimmed.ends_with(".wav") {
        trimmed.to_string()
    } else {
        format!("{trimmed}.wav")
    }
}

/// Resolve the file `name` (suffix added as needed) inside `dir`
///
/// # Errors
///
/// Returns an invalid input error if `name` is empty or only dots
pub fn output_path<P: AsRef<Path>>(dir: P, name: &str) -> WavResult<PathBuf> {
    if name.trim_end_matches('.').is_empty() {
        return Err(WavError::invalid_input(format!(
            "Output file name cannot be empty, got '{name}'"
        )));
    }
    Ok(dir.as_ref().join(ensure_wav_suffix(name)))
}

/// Write `samples` to `config.output_dir/name.wav`, creating the directory
/// if needed
///
/// # Errors
///
/// Returns an error if:
/// - `name` is empty
/// - The directory or file cannot be created
/// - Writing or flushing the file fails
pub fn save_wav(config: &OutputConfig, name: &str, samples: &[i16]) -> WavResult<SavedWav> {
    let path = output_path(&config.output_dir, name)?;

    std::fs::create_dir_all(&config.output_dir).map_err(|e| {
        WavError::file(format!(
            "Failed to create directory {}: {e}",
            config.output_dir.display()
        ))
    })?;
    let file = File::create(&path).map_err(|e| {
        WavError::file(format!("Failed to create WAV file {}: {e}", path.display()))
    })?;

    let mut buffered = BufWriter::with_capacity(config.buffer_size, file);
    let bytes_written =
        WavWriter::new(&mut buffered, config.sample_rate).write_samples(samples)?;
    buffered.flush()?;

    info!(
        "Saved {} samples ({} bytes) to {}",
        samples.len(),
        bytes_written,
        path.display()
    );
    Ok(SavedWav {
        path,
        bytes_written,
        sample_count: samples.len(),
    })
}

/// Encode a complete WAV file in memory
#[must_use]
pub fn encode_wav(sample_rate: i32, samples: &[i16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + samples.len() * BYTES_PER_SAMPLE as usize);
    out.extend_from_slice(WavHeader::build(sample_rate, samples.len()).as_bytes());
    for &sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }
    out
}
