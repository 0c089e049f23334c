//! Canonical 44-byte WAV/RIFF header for mono 16-bit PCM.
//!
//! Layout (all integers little-endian):
//!
//! | offset | field |
//! |--------|-------|
//! | 0      | `RIFF` |
//! | 4      | overall size (file size - 8) |
//! | 8      | `WAVE` |
//! | 12     | `fmt ` |
//! | 16     | fmt chunk length (16) |
//! | 20     | format tag (1 = PCM) |
//! | 22     | channels (1) |
//! | 24     | sample rate |
//! | 28     | byte rate |
//! | 32     | block align (2) |
//! | 34     | bits per sample (16) |
//! | 36     | `data` |
//! | 40     | data size |

use crate::{BYTES_PER_SAMPLE, HEADER_LEN};

const FMT_CHUNK_LEN: u32 = 16;
const FORMAT_PCM: u16 = 1;
const CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;

const RIFF_SIZE_OFFSET: usize = 4;
const SAMPLE_RATE_OFFSET: usize = 24;
const BYTE_RATE_OFFSET: usize = 28;
const DATA_SIZE_OFFSET: usize = 40;

/// A fully built WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WavHeader([u8; HEADER_LEN]);

impl WavHeader {
    /// Build the header for `sample_count` samples at `sample_rate` Hz.
    ///
    /// Sizes wrap at 32 bits; WAV cannot describe more than `u32::MAX`
    /// bytes of data anyway. The sample rate is written as given, so a rate
    /// of 0 produces a well-formed header with a silent rate.
    #[must_use]
    pub fn build(sample_rate: i32, sample_count: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let data_len = (sample_count as u32).wrapping_mul(BYTES_PER_SAMPLE);
        #[allow(clippy::cast_sign_loss)]
        let rate = sample_rate as u32;

        let mut bytes = [0u8; HEADER_LEN];

        // RIFF chunk
        bytes[0..4].copy_from_slice(b"RIFF");
        bytes[8..12].copy_from_slice(b"WAVE");

        // fmt chunk
        bytes[12..16].copy_from_slice(b"fmt ");
        bytes[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        bytes[20..22].copy_from_slice(&FORMAT_PCM.to_le_bytes());
        bytes[22..24].copy_from_slice(&CHANNELS.to_le_bytes());
        bytes[32..34].copy_from_slice(&(CHANNELS * BITS_PER_SAMPLE / 8).to_le_bytes());
        bytes[34..36].copy_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

        // data chunk
        bytes[36..40].copy_from_slice(b"data");

        let mut header = Self(bytes);
        header.put_u32(SAMPLE_RATE_OFFSET, rate);
        header.put_u32(BYTE_RATE_OFFSET, rate.wrapping_mul(BYTES_PER_SAMPLE));
        header.set_data_len(data_len);
        header
    }

    /// Rewrite both size fields for a data section of `data_len` bytes
    pub(crate) fn set_data_len(&mut self, data_len: u32) {
        #[allow(clippy::cast_possible_truncation)]
        let riff_len = data_len.wrapping_add(HEADER_LEN as u32 - 8);
        self.put_u32(RIFF_SIZE_OFFSET, riff_len);
        self.put_u32(DATA_SIZE_OFFSET, data_len);
    }

    fn put_u32(&mut self, offset: usize, value: u32) {
        self.0[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
    }

    fn get_u32(&self, offset: usize) -> u32 {
        let mut field = [0u8; 4];
        field.copy_from_slice(&self.0[offset..offset + 4]);
        u32::from_le_bytes(field)
    }

    /// Raw header bytes, ready to be written
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.0
    }

    /// Consume the header and return its bytes
    #[must_use]
    pub const fn into_bytes(self) -> [u8; HEADER_LEN] {
        self.0
    }

    /// Sample rate field (offset 24)
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn sample_rate(&self) -> i32 {
        self.get_u32(SAMPLE_RATE_OFFSET) as i32
    }

    /// Byte rate field (offset 28)
    #[must_use]
    pub fn byte_rate(&self) -> u32 {
        self.get_u32(BYTE_RATE_OFFSET)
    }

    /// Data section size in bytes (offset 40)
    #[must_use]
    pub fn data_len(&self) -> u32 {
        self.get_u32(DATA_SIZE_OFFSET)
    }

    /// Overall RIFF size, i.e. file size minus 8 (offset 4)
    #[must_use]
    pub fn riff_len(&self) -> u32 {
        self.get_u32(RIFF_SIZE_OFFSET)
    }
}

impl AsRef<[u8]> for WavHeader {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Build the 44 header bytes for `sample_count` samples at `sample_rate` Hz
#[must_use]
pub fn build_header(sample_rate: i32, sample_count: usize) -> [u8; HEADER_LEN] {
    WavHeader::build(sample_rate, sample_count).into_bytes()
}
