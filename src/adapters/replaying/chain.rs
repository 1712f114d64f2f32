//! Replaying adapter for the `ChainClient` port.

use std::sync::Mutex;

use super::extract_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::chain::{BlockHashFuture, ChainClient};

/// Serves recorded chain lookups from a cassette.
pub struct ReplayingChainClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingChainClient {
    /// Creates a new replaying chain client from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ChainClient for ReplayingChainClient {
    fn block_hash_at(&self, _height: u64, _include_transactions: bool) -> BlockHashFuture<'_> {
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            replayer.next_interaction("chain", "block_hash_at").output.clone()
        };
        Box::pin(async move { extract_result(&output, "chain::block_hash_at") })
    }
}
