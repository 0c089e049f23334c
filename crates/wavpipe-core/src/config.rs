//! Output configuration for WAV files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{WavError, WavResult};

/// Environment variable overriding [`OutputConfig::output_dir`]
pub const ENV_OUTPUT_DIR: &str = "WAVPIPE_OUTPUT_DIR";

/// Environment variable overriding [`OutputConfig::sample_rate`]
pub const ENV_SAMPLE_RATE: &str = "WAVPIPE_SAMPLE_RATE";

const MIN_SAMPLE_RATE: i32 = 8_000;
const MAX_SAMPLE_RATE: i32 = 192_000;

/// Where and how WAV files are written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory that receives saved files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Sample rate in Hz written into every header
    #[serde(default = "default_sample_rate")]
    pub sample_rate: i32,

    /// Bound of the sample collector channel, in chunks
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Buffer size for file output, in bytes
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

const fn default_sample_rate() -> i32 {
    crate::DEFAULT_SAMPLE_RATE
}

const fn default_channel_capacity() -> usize {
    64
}

const fn default_buffer_size() -> usize {
    8 * 1024
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            sample_rate: default_sample_rate(),
            channel_capacity: default_channel_capacity(),
            buffer_size: default_buffer_size(),
        }
    }
}

impl OutputConfig {
    /// Set the output directory
    #[must_use]
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the sample rate
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: i32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the collector channel bound
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Set the file output buffer size
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the document does not parse or a
    /// value is out of range
    pub fn from_toml_str(contents: &str) -> WavResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns a file error if the file cannot be read, or a configuration
    /// error if its contents are invalid
    pub fn from_file(path: impl AsRef<Path>) -> WavResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            WavError::file(format!("Failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from a file, then apply environment overrides
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file), plus a configuration error
    /// for an unparsable override
    pub fn from_file_with_env(path: impl AsRef<Path>) -> WavResult<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides looked up by variable name
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an override cannot be parsed or the
    /// result fails validation
    pub fn apply_overrides<F>(&mut self, lookup: F) -> WavResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR) {
            self.output_dir = PathBuf::from(dir);
        }

        if let Some(rate) = lookup(ENV_SAMPLE_RATE) {
            self.sample_rate = rate.trim().parse().map_err(|e| {
                WavError::configuration(format!("Invalid {ENV_SAMPLE_RATE} '{rate}': {e}"))
            })?;
        }

        self.validate()
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first bad value
    pub fn validate(&self) -> WavResult<()> {
        if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate) {
            return Err(WavError::configuration(format!(
                "Sample rate must be between {MIN_SAMPLE_RATE} and {MAX_SAMPLE_RATE} Hz, got {}",
                self.sample_rate
            )));
        }

        if self.channel_capacity == 0 {
            return Err(WavError::configuration("Channel capacity must be at least 1"));
        }

        if self.buffer_size == 0 {
            return Err(WavError::configuration("Buffer size must be at least 1 byte"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = OutputConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.sample_rate, 22_050);
        assert_eq!(config.channel_capacity, 64);
        assert_eq!(config.buffer_size, 8192);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = OutputConfig::from_toml_str("sample_rate = 16000\n").unwrap();
        assert_eq!(config.sample_rate, 16_000);
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.channel_capacity, 64);
    }

    #[test]
    fn test_full_toml() {
        let config = OutputConfig::from_toml_str(
            r#"
            output_dir = "/tmp/speech"
            sample_rate = 48000
            channel_capacity = 8
            buffer_size = 4096
            "#,
        )
        .unwrap();
        assert_eq!(
            config,
            OutputConfig::default()
                .with_output_dir("/tmp/speech")
                .with_sample_rate(48_000)
                .with_channel_capacity(8)
                .with_buffer_size(4096)
        );
    }

    #[rstest]
    #[case("sample_rate = 0")]
    #[case("sample_rate = 7999")]
    #[case("sample_rate = 192001")]
    #[case("channel_capacity = 0")]
    #[case("buffer_size = 0")]
    fn test_out_of_range_rejected(#[case] doc: &str) {
        let err = OutputConfig::from_toml_str(doc).unwrap_err();
        assert!(matches!(err, WavError::Configuration { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let err = OutputConfig::from_toml_str("sample_rate = \"fast\"").unwrap_err();
        assert!(err.is_user_error());
    }

    #[test]
    fn test_missing_file() {
        let err = OutputConfig::from_file("/nonexistent/wavpipe.toml").unwrap_err();
        assert_eq!(err.category(), "file");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wavpipe.toml");
        std::fs::write(&path, "sample_rate = 24000\noutput_dir = \"out\"\n").unwrap();

        let config = OutputConfig::from_file(&path).unwrap();
        assert_eq!(config.sample_rate, 24_000);
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> =
            [(ENV_OUTPUT_DIR, "/var/speech"), (ENV_SAMPLE_RATE, " 44100 ")].into();
        let mut config = OutputConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(config.output_dir, PathBuf::from("/var/speech"));
        assert_eq!(config.sample_rate, 44_100);
    }

    #[test]
    fn test_bad_override() {
        let mut config = OutputConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_SAMPLE_RATE).then(|| "fast".to_string()))
            .unwrap_err();
        assert!(matches!(err, WavError::Configuration { .. }));
        assert_eq!(config.sample_rate, 22_050);
    }
}
