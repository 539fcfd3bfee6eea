//! Chunked bulk writes.
//!
//! A bulk ingest is split into chunks of at most [`MAX_BATCH_CHUNK`] records.
//! Each chunk is one atomic `commit_batch` at the store, and chunks are
//! committed strictly one after another in input order.
//!
//! The bulk write as a whole is **not** atomic. When chunk `K` fails, chunks
//! `1..K` stay committed and [`BatchWriteError`] reports exactly how far the
//! write got, so the caller can retry the remainder.

use serde::Serialize;

use crate::shade::ShadeRecord;
use crate::store::{ShadeStore, StoreError};

/// Upper bound on records per atomic commit, matching the document store's
/// batched-write limit.
pub const MAX_BATCH_CHUNK: usize = 500;

/// Clamp a configured chunk size into `1..=MAX_BATCH_CHUNK`.
pub fn clamp_chunk_size(size: usize) -> usize {
    size.clamp(1, MAX_BATCH_CHUNK)
}

/// Outcome of a fully committed bulk write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Records written.
    pub count: usize,
    /// Atomic commits issued.
    pub chunks: usize,
}

/// A bulk write stopped part-way through.
#[derive(Debug, thiserror::Error)]
#[error(
    "bulk write failed at chunk {failed_chunk} of {total_chunks} \
     ({committed_records} records in {committed_chunks} chunks already committed): {source}"
)]
pub struct BatchWriteError {
    /// 1-based index of the chunk that failed.
    pub failed_chunk: usize,
    pub total_chunks: usize,
    /// Chunks that were committed before the failure and remain persisted.
    pub committed_chunks: usize,
    pub committed_records: usize,
    #[source]
    pub source: StoreError,
}

/// Commits validated records to a store in sequential atomic chunks.
pub struct BatchedWriter<'a> {
    store: &'a dyn ShadeStore,
    chunk_size: usize,
}

impl<'a> BatchedWriter<'a> {
    /// `chunk_size` is clamped into `1..=MAX_BATCH_CHUNK`.
    pub fn new(store: &'a dyn ShadeStore, chunk_size: usize) -> Self {
        Self {
            store,
            chunk_size: clamp_chunk_size(chunk_size),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Write every record, upserting by `shade_id`.
    ///
    /// Chunk `N + 1` is only submitted after chunk `N` has committed.
    pub async fn commit(&self, records: &[ShadeRecord]) -> Result<BatchSummary, BatchWriteError> {
        let total_chunks = records.len().div_ceil(self.chunk_size);
        let mut summary = BatchSummary {
            count: 0,
            chunks: 0,
        };

        for (index, chunk) in records.chunks(self.chunk_size).enumerate() {
            let chunk_number = index + 1;
            tracing::debug!(
                chunk = chunk_number,
                total_chunks,
                size = chunk.len(),
                "Committing shade chunk"
            );

            if let Err(source) = self.store.commit_batch(chunk).await {
                tracing::error!(
                    chunk = chunk_number,
                    total_chunks,
                    committed_records = summary.count,
                    error = %source,
                    "Shade chunk commit failed"
                );
                return Err(BatchWriteError {
                    failed_chunk: chunk_number,
                    total_chunks,
                    committed_chunks: summary.chunks,
                    committed_records: summary.count,
                    source,
                });
            }

            summary.count += chunk.len();
            summary.chunks += 1;
        }

        tracing::info!(
            count = summary.count,
            chunks = summary.chunks,
            "Bulk shade write committed"
        );
        Ok(summary)
    }
}
