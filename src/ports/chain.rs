//! Chain client port for historic block lookups.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

/// Boxed future type alias used by [`ChainClient`] to keep the trait
/// dyn-compatible.
pub type BlockHashFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Option<String>, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Looks up blocks on the live chain.
///
/// Abstracting chain access allows candidate verification to run against
/// recorded cassettes instead of a real RPC endpoint.
pub trait ChainClient: Send + Sync {
    /// Returns the hash of the block at `height`, or `None` if the chain
    /// being queried has no block at that height.
    ///
    /// `include_transactions` asks the node for full transaction bodies;
    /// genealogy resolution always passes `false` and only reads the hash.
    ///
    /// The returned future resolves to an error if the lookup itself fails
    /// (unreachable node, malformed response).
    fn block_hash_at(&self, height: u64, include_transactions: bool) -> BlockHashFuture<'_>;
}
