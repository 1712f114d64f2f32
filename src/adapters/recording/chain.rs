//! Recording adapter for the `ChainClient` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::chain::{BlockHashFuture, ChainClient};

/// Records chain lookups while delegating to an inner implementation.
pub struct RecordingChainClient {
    inner: Box<dyn ChainClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingChainClient {
    /// Creates a new recording chain client wrapping the given
    /// implementation.
    pub fn new(inner: Box<dyn ChainClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct LookupInput {
    height: u64,
    include_transactions: bool,
}

impl ChainClient for RecordingChainClient {
    fn block_hash_at(&self, height: u64, include_transactions: bool) -> BlockHashFuture<'_> {
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.block_hash_at(height, include_transactions).await;
            let input = LookupInput { height, include_transactions };
            record_result(&recorder, "chain", "block_hash_at", &input, &result);
            result
        })
    }
}
