//! # Wavpipe Core
//!
//! Canonical WAV output for speech synthesis: mono, 16-bit linear PCM,
//! a 44-byte RIFF header followed by little-endian samples.
//!
//! ## Features
//!
//! - Byte-exact header builder
//! - Single-shot writer over any [`std::io::Write`] sink, with sticky errors
//! - Incremental writer for seekable sinks with a finalize step
//! - Bounded channel for collecting samples from a synthesis callback
//! - Session-owned buffer table addressed by handles
//! - File output with TOML configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use wavpipe_core::{save_wav, OutputConfig, WavWriter};
//!
//! fn main() -> anyhow::Result<()> {
//!     let samples: Vec<i16> = (0..22_050).map(|i| ((i % 100) * 300) as i16).collect();
//!
//!     let mut writer = WavWriter::new(Vec::new(), 22_050);
//!     let total = writer.write_samples(&samples)?;
//!     assert_eq!(total, 44 + 2 * samples.len() as u64);
//!
//!     let config = OutputConfig::from_file("wavpipe.toml")?;
//!     let saved = save_wav(&config, "hello", &samples)?;
//!     println!("wrote {}", saved.path.display());
//!
//!     Ok(())
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod collector;
pub mod config;
pub mod error;
pub mod header;
pub mod output;
pub mod session;
pub mod streaming;
pub mod writer;

// Re-export main types for convenience
pub use collector::{sample_channel, SampleCollector, SampleSender};
pub use config::OutputConfig;
pub use error::{WavError, WavResult};
pub use header::{build_header, WavHeader};
pub use output::{encode_wav, ensure_wav_suffix, output_path, save_wav, SavedWav};
pub use session::{BufferId, Session};
pub use streaming::StreamingWavWriter;
pub use writer::WavWriter;

/// Version information for the wavpipe-core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Size of the canonical WAV header in bytes
pub const HEADER_LEN: usize = 44;

/// Bytes per sample frame (mono, 16-bit)
pub const BYTES_PER_SAMPLE: u32 = 2;

/// Default sample rate (22.05 kHz, the usual espeak output rate)
pub const DEFAULT_SAMPLE_RATE: i32 = 22_050;
