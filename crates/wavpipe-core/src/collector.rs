//! Bounded hand-off of sample chunks from a synthesis callback to a writer.
//!
//! Synthesis engines deliver audio through a callback running on their own
//! thread. The callback pushes each chunk into a [`SampleSender`]; the
//! consumer drains the [`SampleCollector`] once every sender is gone and
//! writes the whole sequence in one go.

use std::io::Write;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::debug;

use crate::error::{WavError, WavResult};
use crate::writer::WavWriter;

/// Create a bounded sample channel holding at most `capacity` chunks.
///
/// A capacity of 0 is treated as 1.
#[must_use]
pub fn sample_channel(capacity: usize) -> (SampleSender, SampleCollector) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (SampleSender { tx }, SampleCollector { rx })
}

/// Producer half, cheap to clone
#[derive(Debug, Clone)]
pub struct SampleSender {
    tx: mpsc::Sender<Vec<i16>>,
}

impl SampleSender {
    /// Send a chunk, blocking while the channel is full.
    ///
    /// Meant for native callback threads. Panics if called from inside an
    /// async runtime; use [`push_async`](Self::push_async) there.
    ///
    /// # Errors
    ///
    /// Returns a channel error if the collector has been dropped
    pub fn push(&self, chunk: &[i16]) -> WavResult<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.tx
            .blocking_send(chunk.to_vec())
            .map_err(|_| collector_gone())
    }

    /// Send a chunk without waiting.
    ///
    /// Returns `Ok(false)` and drops the chunk if the channel is full.
    ///
    /// # Errors
    ///
    /// Returns a channel error if the collector has been dropped
    pub fn try_push(&self, chunk: &[i16]) -> WavResult<bool> {
        if chunk.is_empty() {
            return Ok(true);
        }
        match self.tx.try_send(chunk.to_vec()) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(_)) => Ok(false),
            Err(TrySendError::Closed(_)) => Err(collector_gone()),
        }
    }

    /// Send a chunk from async code
    ///
    /// # Errors
    ///
    /// Returns a channel error if the collector has been dropped
    pub async fn push_async(&self, chunk: Vec<i16>) -> WavResult<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.tx.send(chunk).await.map_err(|_| collector_gone())
    }
}

fn collector_gone() -> WavError {
    WavError::channel("sample collector was dropped")
}

/// Consumer half
#[derive(Debug)]
pub struct SampleCollector {
    rx: mpsc::Receiver<Vec<i16>>,
}

impl SampleCollector {
    /// Drain every chunk until all senders are dropped, in send order
    pub async fn collect(mut self) -> Vec<i16> {
        let mut samples = Vec::new();
        let mut chunks = 0usize;
        while let Some(chunk) = self.rx.recv().await {
            samples.extend_from_slice(&chunk);
            chunks += 1;
        }
        debug!("Collected {} samples in {} chunks", samples.len(), chunks);
        samples
    }

    /// Same as [`collect`](Self::collect) for synchronous callers.
    ///
    /// Panics if called from inside an async runtime.
    #[must_use]
    pub fn blocking_collect(mut self) -> Vec<i16> {
        let mut samples = Vec::new();
        let mut chunks = 0usize;
        while let Some(chunk) = self.rx.blocking_recv() {
            samples.extend_from_slice(&chunk);
            chunks += 1;
        }
        debug!("Collected {} samples in {} chunks", samples.len(), chunks);
        samples
    }

    /// Collect everything, then write it as one WAV file into `sink`
    ///
    /// # Errors
    ///
    /// Returns the first sink failure
    pub async fn write_to<W: Write>(self, sink: W, sample_rate: i32) -> WavResult<u64> {
        let samples = self.collect().await;
        WavWriter::new(sink, sample_rate).write_samples(&samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[tokio::test]
    async fn test_chunks_arrive_in_order() {
        let (tx, collector) = sample_channel(2);

        let producer = thread::spawn(move || {
            for start in (0..100i16).step_by(10) {
                let chunk: Vec<i16> = (start..start + 10).collect();
                tx.push(&chunk).unwrap();
            }
        });

        let samples = collector.collect().await;
        producer.join().unwrap();
        assert_eq!(samples, (0..100).collect::<Vec<i16>>());
    }

    #[tokio::test]
    async fn test_multiple_senders() {
        let (tx, collector) = sample_channel(4);
        let tx2 = tx.clone();

        tx.push_async(vec![1, 2]).await.unwrap();
        tx2.push_async(vec![3]).await.unwrap();
        drop(tx);
        drop(tx2);

        assert_eq!(collector.collect().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_write_to_sink() {
        let (tx, collector) = sample_channel(8);
        tx.push_async(vec![0, 1, 2]).await.unwrap();
        tx.push_async(vec![3, 4]).await.unwrap();
        drop(tx);

        let mut out = Vec::new();
        let total = collector.write_to(&mut out, 44_100).await.unwrap();
        assert_eq!(total, 54);
        assert_eq!(&out[..44], &crate::build_header(44_100, 5));
    }

    #[test]
    fn test_blocking_collect() {
        let (tx, collector) = sample_channel(1);
        let producer = thread::spawn(move || {
            tx.push(&[7, 8]).unwrap();
            tx.push(&[]).unwrap();
            tx.push(&[9]).unwrap();
        });

        let samples = collector.blocking_collect();
        producer.join().unwrap();
        assert_eq!(samples, vec![7, 8, 9]);
    }

    #[test]
    fn test_push_after_collector_dropped() {
        let (tx, collector) = sample_channel(4);
        drop(collector);

        let err = tx.push(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, WavError::Channel { .. }));
        assert!(tx.try_push(&[1]).is_err());
    }

    #[test]
    fn test_try_push_full() {
        let (tx, collector) = sample_channel(0);
        assert!(tx.try_push(&[1]).unwrap());
        assert!(!tx.try_push(&[2]).unwrap());
        drop(tx);

        assert_eq!(collector.blocking_collect(), vec![1]);
    }
}
