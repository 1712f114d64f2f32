//! Pure chain construction from unordered network observations.

use crate::model::{GenealogyLink, Network, NetworkObservation};

/// A linear ancestor→descendant chain collected from one batch of
/// observations on a single chain identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genealogy {
    /// Earliest network in the collected set.
    pub ancestor: Network,
    /// Latest network in the collected set (equal to `ancestor` for a
    /// singleton).
    pub descendant: Network,
    /// Links between adjacent networks of the height-sorted sequence —
    /// n−1 links for n distinct networks, never the pairwise closure.
    pub links: Vec<GenealogyLink>,
}

/// Builds the genealogy chain for one batch of observations.
///
/// Observations missing a block or a network reference are discarded. The
/// remainder is stable-sorted by observed block height (input order
/// preserved on ties), consecutive duplicates of the same network are
/// collapsed, and links are built only between adjacent survivors.
///
/// Returns `None` when no valid observation remains; callers treat that as
/// "no networks observed", not as a degenerate chain.
///
/// All observations are assumed to belong to one chain identifier and one
/// consistent history; that precondition is the caller's to enforce.
#[must_use]
pub fn collect(observations: &[NetworkObservation]) -> Option<Genealogy> {
    let mut observed: Vec<(u64, &Network)> =
        observations.iter().filter_map(NetworkObservation::valid).collect();
    if observed.is_empty() {
        return None;
    }

    // Stable: ties keep artifact order so repeated runs agree.
    observed.sort_by_key(|(height, _)| *height);

    let mut sequence: Vec<&Network> = Vec::with_capacity(observed.len());
    for (_, network) in observed {
        if sequence.last().map_or(true, |prev| prev.id != network.id) {
            sequence.push(network);
        }
    }

    let links = sequence
        .windows(2)
        .map(|pair| GenealogyLink { ancestor: pair[0].clone(), descendant: pair[1].clone() })
        .collect();

    Some(Genealogy {
        ancestor: (*sequence.first().expect("sequence is non-empty")).clone(),
        descendant: (*sequence.last().expect("sequence is non-empty")).clone(),
        links,
    })
}
