//! Replaying adapters that serve recorded interactions.

pub mod chain;
pub mod clock;
pub mod filesystem;
pub mod store;

pub use chain::ReplayingChainClient;
pub use clock::ReplayingClock;
pub use filesystem::ReplayingFileSystem;
pub use store::ReplayingRelationStore;

/// Extracts a `Result` from a cassette output JSON value.
///
/// Convention (shared with the recording adapters):
/// - `{"ok": v}` deserializes `v` as the success value
/// - `{"err": msg}` becomes an error with that message
pub(crate) fn extract_result<T: serde::de::DeserializeOwned>(
    output: &serde_json::Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        let msg = err.as_str().unwrap_or("unknown error").to_string();
        return Err(msg.into());
    }
    let value = output.get("ok").unwrap_or(output);
    serde_json::from_value(value.clone())
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
