//! Chunked batch lookup of user identifiers.

use anyhow::{Context, Result};
use reqwest::StatusCode;

use vkview_core::api::{ApiError, UserRecord};

use crate::client::{ApiClient, Reply};

/// Per-call identifier ceiling of the remote primary lookup method.
pub const CHUNK_SIZE: usize = 250;

/// Why a chunk contributed zero records.
#[derive(Debug)]
pub enum FailureReason {
    Http(StatusCode),
    Api(ApiError),
}

/// One failed chunk: its position, the number of identifiers it carried,
/// and its own failure content (not that of any enclosing response).
#[derive(Debug)]
pub struct ChunkFailure {
    pub chunk_index: usize,
    pub expected: usize,
    pub reason: FailureReason,
}

/// Aggregate outcome of a batch lookup.
#[derive(Debug)]
pub struct BatchResult {
    /// Resolved records, preserving intra-chunk and inter-chunk order
    pub users: Vec<UserRecord>,
    /// Failed chunks, in the order they were issued
    pub failures: Vec<ChunkFailure>,
}

/// Resolve `ids` through the primary lookup method, at most [`CHUNK_SIZE`]
/// identifiers per call, issuing the calls strictly sequentially.
///
/// A chunk that fails with a non-200 status or an application error is
/// recorded and skipped; subsequent chunks are still processed. Only
/// transport-layer faults escape as errors.
pub fn resolve_many(client: &ApiClient, ids: &[String]) -> Result<BatchResult> {
    let mut users = Vec::with_capacity(ids.len());
    let mut failures = Vec::new();

    for (chunk_index, chunk) in ids.chunks(CHUNK_SIZE).enumerate() {
        match client.resolve_users(chunk)? {
            Reply::Payload(value) => {
                let records: Vec<UserRecord> = serde_json::from_value(value)
                    .context("Failed to parse user records from the primary lookup")?;
                users.extend(records);
            }
            Reply::Http(status) => failures.push(ChunkFailure {
                chunk_index,
                expected: chunk.len(),
                reason: FailureReason::Http(status),
            }),
            Reply::Api(error) => failures.push(ChunkFailure {
                chunk_index,
                expected: chunk.len(),
                reason: FailureReason::Api(error),
            }),
        }
    }

    Ok(BatchResult { users, failures })
}
