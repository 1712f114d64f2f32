//! Deployment artifact loading.
//!
//! Artifacts are JSON files produced by the build pipeline; each carries at
//! most one network observation per chain identifier:
//!
//! ```text
//! {
//!   "name": "Registry",
//!   "networks": {
//!     "1337": {
//!       "block": { "height": 12 },
//!       "network": { "id": "...", "historicBlock": { "hash": "0x..", "height": 12 } }
//!     }
//!   }
//! }
//! ```
//!
//! All reads go through the `FileSystem` port so loading works with live,
//! replaying, and recording adapters.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::model::NetworkObservation;
use crate::ports::FileSystem;

/// One deployment artifact's network observations, keyed by chain identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact name, when the build pipeline recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Per-chain observations. Chains the artifact was never deployed to are
    /// simply absent.
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkObservation>,
}

/// Loads every `*.json` artifact in `dir`, in directory-listing order.
///
/// # Errors
///
/// Returns an error naming the offending path if the directory cannot be
/// listed or any artifact file cannot be read or parsed.
pub fn load_artifacts(fs: &dyn FileSystem, dir: &Path) -> Result<Vec<Artifact>, String> {
    if !fs.exists(dir) {
        return Err(format!("Artifact directory not found: {}", dir.display()));
    }
    let entries = fs
        .list_dir(dir)
        .map_err(|e| format!("Failed to list artifact directory {}: {e}", dir.display()))?;

    let mut artifacts = Vec::new();
    for name in entries {
        if !name.ends_with(".json") {
            continue;
        }
        let path = dir.join(&name);
        let contents = fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read artifact {}: {e}", path.display()))?;
        let artifact: Artifact = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse artifact {}: {e}", path.display()))?;
        artifacts.push(artifact);
    }
    Ok(artifacts)
}

/// Projects out each artifact's observation for one chain identifier,
/// preserving artifact order.
///
/// Artifacts without an entry for the chain are skipped here; entries with
/// missing fields are kept and excluded later by the collector's validity
/// rules.
#[must_use]
pub fn observations_for_chain(artifacts: &[Artifact], chain_id: &str) -> Vec<NetworkObservation> {
    artifacts.iter().filter_map(|artifact| artifact.networks.get(chain_id).cloned()).collect()
}
