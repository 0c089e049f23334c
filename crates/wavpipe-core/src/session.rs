//! Per-session table of in-flight sample buffers.
//!
//! A [`Session`] owns its sample rate and every buffer opened on it.
//! Buffers are addressed by [`BufferId`] handles: a slot index plus a
//! generation, so a handle to a closed buffer never reaches whatever later
//! reuses its slot.

use std::fmt;
use std::io::Write;

use tracing::debug;

use crate::error::{WavError, WavResult};
use crate::writer::WavWriter;

/// Handle to a buffer in a [`Session`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId {
    index: u32,
    generation: u32,
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    samples: Option<Vec<i16>>,
}

/// Sample buffers and sample rate for one synthesis context
#[derive(Debug)]
pub struct Session {
    sample_rate: i32,
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Session {
    /// Create an empty session
    #[must_use]
    pub const fn new(sample_rate: i32) -> Self {
        Self {
            sample_rate,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Sample rate used for every buffer written from this session
    #[must_use]
    pub const fn sample_rate(&self) -> i32 {
        self.sample_rate
    }

    /// Open a new empty buffer
    pub fn open_buffer(&mut self) -> BufferId {
        let id = if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.samples = Some(Vec::new());
            BufferId {
                index,
                generation: slot.generation,
            }
        } else {
            #[allow(clippy::cast_possible_truncation)]
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                samples: Some(Vec::new()),
            });
            BufferId {
                index,
                generation: 0,
            }
        };
        debug!("Opened sample buffer {}", id);
        id
    }

    /// Append samples to an open buffer
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an unknown or closed buffer
    pub fn append(&mut self, id: BufferId, samples: &[i16]) -> WavResult<()> {
        self.buffer_mut(id)?.extend_from_slice(samples);
        Ok(())
    }

    /// Number of samples held by an open buffer
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an unknown or closed buffer
    pub fn sample_count(&self, id: BufferId) -> WavResult<usize> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.samples.as_ref())
            .map(Vec::len)
            .ok_or_else(|| unknown_buffer(id))
    }

    /// Close a buffer and return its samples
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an unknown or closed buffer
    pub fn take(&mut self, id: BufferId) -> WavResult<Vec<i16>> {
        let samples = self
            .slot_mut(id)
            .and_then(|slot| slot.samples.take())
            .ok_or_else(|| unknown_buffer(id))?;
        self.free.push(id.index);
        debug!("Closed sample buffer {} with {} samples", id, samples.len());
        Ok(samples)
    }

    /// Close a buffer and drop its samples
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an unknown or closed buffer
    pub fn discard(&mut self, id: BufferId) -> WavResult<()> {
        self.take(id).map(drop)
    }

    /// Close a buffer and write its samples as one WAV file into `sink`
    ///
    /// The buffer is closed even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for an unknown or closed buffer, or
    /// the first sink failure
    pub fn write_buffer<W: Write>(&mut self, id: BufferId, sink: W) -> WavResult<u64> {
        let samples = self.take(id)?;
        WavWriter::new(sink, self.sample_rate).write_samples(&samples)
    }

    /// Number of buffers currently open
    #[must_use]
    pub fn open_buffers(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn slot_mut(&mut self, id: BufferId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
    }

    fn buffer_mut(&mut self, id: BufferId) -> WavResult<&mut Vec<i16>> {
        self.slot_mut(id)
            .and_then(|slot| slot.samples.as_mut())
            .ok_or_else(|| unknown_buffer(id))
    }
}

fn unknown_buffer(id: BufferId) -> WavError {
    WavError::invalid_input(format!("Unknown or closed sample buffer {id}"))
}
