//! Domain types for network genealogy resolution.
//!
//! A `Network` is one recorded point on a chain's history, identified by the
//! block (hash + height) at which it was recorded. Deployment artifacts carry
//! `NetworkObservation`s referencing networks; resolution turns a batch of
//! observations into directed `GenealogyLink`s.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A block on a chain's history: height plus the hash recorded at that height.
///
/// The hash is an opaque digest; it is only ever compared for exact equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricBlock {
    /// Block height (non-negative by construction).
    pub height: u64,
    /// Block hash at that height.
    pub hash: String,
}

/// A recorded observation of a chain's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Network {
    /// Unique network record identifier.
    pub id: String,
    /// The historic block this network record pins.
    pub historic_block: HistoricBlock,
}

/// The block at which an artifact observed a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedBlock {
    /// Observed block height.
    pub height: u64,
}

/// One artifact's (possibly incomplete) record of a network on one chain.
///
/// Observations missing either the block or the network reference are
/// invalid and excluded from genealogy construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkObservation {
    /// The block at which the network was observed, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<ObservedBlock>,
    /// The network record referenced by the artifact, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Network>,
}

impl NetworkObservation {
    /// Returns the observed height and network when both are present.
    #[must_use]
    pub fn valid(&self) -> Option<(u64, &Network)> {
        match (&self.block, &self.network) {
            (Some(block), Some(network)) => Some((block.height, network)),
            _ => None,
        }
    }
}

/// A directed ancestor→descendant relationship between two networks.
///
/// Constructed links never pair a network with itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenealogyLink {
    /// The earlier network.
    pub ancestor: Network,
    /// The later network.
    pub descendant: Network,
}

/// Which end of the chain a relation search extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Search for a network earlier in chain history than the anchor.
    Ancestor,
    /// Search for a network later in chain history than the anchor.
    Descendant,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ancestor => write!(f, "ancestor"),
            Direction::Descendant => write!(f, "descendant"),
        }
    }
}
