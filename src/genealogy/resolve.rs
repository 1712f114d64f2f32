//! Resolution orchestration: collect, extend both directions, persist.

use crate::artifact::{observations_for_chain, Artifact};
use crate::genealogy::{collect, find_relation};
use crate::model::{Direction, GenealogyLink, Network};
use crate::ports::{ChainClient, RelationStore};

/// The assembled outcome of one resolution run for one chain identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Earliest network collected from the artifacts.
    pub ancestor: Network,
    /// Latest network collected from the artifacts.
    pub descendant: Network,
    /// Relation to a previously recorded earlier network, when one was
    /// confirmed against the chain.
    pub extended_ancestor: Option<Network>,
    /// Relation to a previously recorded later network, when one was
    /// confirmed against the chain.
    pub extended_descendant: Option<Network>,
    /// The full link set: adjacent collected pairs plus extension links.
    pub links: Vec<GenealogyLink>,
}

/// Collects the chain from artifact observations and extends both endpoints
/// toward previously recorded networks.
///
/// Returns `Ok(None)` when the artifacts carry no valid observation for the
/// chain identifier; the caller must then skip persistence entirely.
///
/// All filtered observations are assumed consistent with a single chain
/// history; a violated precondition yields an incorrect but undetected
/// genealogy.
///
/// # Errors
///
/// Returns an error if either relation search fails (see
/// [`find_relation`]).
pub async fn assemble(
    store: &dyn RelationStore,
    chain: &dyn ChainClient,
    chain_id: &str,
    artifacts: &[Artifact],
) -> Result<Option<Resolution>, String> {
    let observations = observations_for_chain(artifacts, chain_id);
    let Some(genealogy) = collect(&observations) else {
        tracing::info!(chain_id, "no networks observed; resolution is a no-op");
        return Ok(None);
    };

    tracing::info!(
        chain_id,
        ancestor = %genealogy.ancestor.id,
        descendant = %genealogy.descendant.id,
        collected_links = genealogy.links.len(),
        "collected genealogy chain"
    );

    let mut links = genealogy.links;

    let extended_ancestor =
        find_relation(store, chain, Direction::Ancestor, &genealogy.ancestor).await?;
    if let Some(found) = &extended_ancestor {
        links.push(GenealogyLink {
            ancestor: found.clone(),
            descendant: genealogy.ancestor.clone(),
        });
    }

    let extended_descendant =
        find_relation(store, chain, Direction::Descendant, &genealogy.descendant).await?;
    if let Some(found) = &extended_descendant {
        links.push(GenealogyLink {
            ancestor: genealogy.descendant.clone(),
            descendant: found.clone(),
        });
    }

    Ok(Some(Resolution {
        ancestor: genealogy.ancestor,
        descendant: genealogy.descendant,
        extended_ancestor,
        extended_descendant,
        links,
    }))
}

/// Submits a resolution's full link set as one persist effect.
///
/// Returns the store-assigned link identifiers in link order; callers may
/// discard them. The link set is submitted even when empty (a singleton
/// chain with no confirmed relations); only the "no networks" case skips
/// persistence, and that case never reaches this function.
///
/// # Errors
///
/// Returns an error if the store rejects the write; there are no retries
/// here. Retry policy belongs to the adapter or its operator.
pub async fn persist_resolution(
    store: &dyn RelationStore,
    resolution: &Resolution,
) -> Result<Vec<String>, String> {
    let ids = store
        .persist(&resolution.links)
        .await
        .map_err(|e| format!("persisting {} genealogy links failed: {e}", resolution.links.len()))?;
    tracing::info!(persisted = ids.len(), "genealogy links persisted");
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use super::*;
    use crate::model::{HistoricBlock, NetworkObservation, ObservedBlock};
    use crate::ports::{
        BlockHashFuture, CandidateBatch, PersistFuture, RelativesFuture, RelativesQuery,
    };

    fn network(id: &str, height: u64, hash: &str) -> Network {
        Network {
            id: id.to_string(),
            historic_block: HistoricBlock { height, hash: hash.to_string() },
        }
    }

    fn artifact(chain_id: &str, networks: Vec<Network>) -> Artifact {
        let mut map = BTreeMap::new();
        for net in networks {
            // One observation per artifact per chain id, so spread them out.
            let obs = NetworkObservation {
                block: Some(ObservedBlock { height: net.historic_block.height }),
                network: Some(net),
            };
            map.insert(chain_id.to_string(), obs);
        }
        Artifact { name: None, networks: map }
    }

    /// Store serving fixed per-direction batches and counting persists.
    struct FixtureStore {
        ancestor_batches: Mutex<Vec<CandidateBatch>>,
        descendant_batches: Mutex<Vec<CandidateBatch>>,
        persisted: Mutex<Vec<Vec<GenealogyLink>>>,
    }

    impl FixtureStore {
        fn new(ancestor: Vec<CandidateBatch>, descendant: Vec<CandidateBatch>) -> Self {
            Self {
                ancestor_batches: Mutex::new(ancestor),
                descendant_batches: Mutex::new(descendant),
                persisted: Mutex::new(Vec::new()),
            }
        }

        fn empty() -> Self {
            Self::new(vec![], vec![])
        }

        fn persist_calls(&self) -> usize {
            self.persisted.lock().unwrap().len()
        }
    }

    impl RelationStore for FixtureStore {
        fn relatives(&self, query: &RelativesQuery) -> RelativesFuture<'_> {
            let batches = match query.direction {
                Direction::Ancestor => &self.ancestor_batches,
                Direction::Descendant => &self.descendant_batches,
            };
            let mut batches = batches.lock().unwrap();
            let batch = if batches.is_empty() {
                CandidateBatch { networks: vec![], already_tried: query.exclude.clone() }
            } else {
                batches.remove(0)
            };
            Box::pin(async move { Ok(batch) })
        }

        fn persist(&self, links: &[GenealogyLink]) -> PersistFuture<'_> {
            self.persisted.lock().unwrap().push(links.to_vec());
            let ids = (0..links.len()).map(|i| format!("link-{i}")).collect();
            Box::pin(async move { Ok(ids) })
        }
    }

    /// Chain confirming every candidate whose recorded hash it was given.
    struct EchoChain {
        hashes_by_height: Vec<(u64, String)>,
    }

    impl ChainClient for EchoChain {
        fn block_hash_at(&self, height: u64, _include_transactions: bool) -> BlockHashFuture<'_> {
            let hash = self
                .hashes_by_height
                .iter()
                .find(|(h, _)| *h == height)
                .map(|(_, hash)| hash.clone());
            Box::pin(async move { Ok(hash) })
        }
    }

    #[tokio::test]
    async fn no_observations_is_a_no_op_without_persist() {
        let store = FixtureStore::empty();
        let chain = EchoChain { hashes_by_height: vec![] };

        let resolution = assemble(&store, &chain, "1337", &[]).await.unwrap();

        assert!(resolution.is_none());
        assert_eq!(store.persist_calls(), 0);
    }

    #[tokio::test]
    async fn observations_for_other_chains_are_ignored() {
        let store = FixtureStore::empty();
        let chain = EchoChain { hashes_by_height: vec![] };
        let artifacts = vec![artifact("9999", vec![network("other", 4, "0x04")])];

        let resolution = assemble(&store, &chain, "1337", &artifacts).await.unwrap();

        assert!(resolution.is_none());
    }

    #[tokio::test]
    async fn extends_both_endpoints_and_orients_the_links() {
        let known_ancestor = network("old", 2, "0x02");
        let known_descendant = network("new", 50, "0x32");
        let store = FixtureStore::new(
            vec![CandidateBatch {
                networks: vec![known_ancestor.clone()],
                already_tried: vec!["old".into()],
            }],
            vec![CandidateBatch {
                networks: vec![known_descendant.clone()],
                already_tried: vec!["new".into()],
            }],
        );
        let chain = EchoChain {
            hashes_by_height: vec![(2, "0x02".into()), (50, "0x32".into())],
        };
        let artifacts = vec![
            artifact("1337", vec![network("mid-a", 10, "0x0a")]),
            artifact("1337", vec![network("mid-b", 20, "0x14")]),
        ];

        let resolution =
            assemble(&store, &chain, "1337", &artifacts).await.unwrap().expect("networks observed");

        assert_eq!(resolution.ancestor.id, "mid-a");
        assert_eq!(resolution.descendant.id, "mid-b");
        assert_eq!(resolution.extended_ancestor.as_ref().unwrap().id, "old");
        assert_eq!(resolution.extended_descendant.as_ref().unwrap().id, "new");

        // Collected link plus one extension on each end.
        assert_eq!(resolution.links.len(), 3);
        assert_eq!(resolution.links[0].ancestor.id, "mid-a");
        assert_eq!(resolution.links[0].descendant.id, "mid-b");
        // Found ancestor precedes the collected ancestor.
        assert_eq!(resolution.links[1].ancestor.id, "old");
        assert_eq!(resolution.links[1].descendant.id, "mid-a");
        // Collected descendant precedes the found descendant.
        assert_eq!(resolution.links[2].ancestor.id, "mid-b");
        assert_eq!(resolution.links[2].descendant.id, "new");
    }

    #[tokio::test]
    async fn singleton_chain_still_persists_once() {
        let store = FixtureStore::empty();
        let chain = EchoChain { hashes_by_height: vec![] };
        let artifacts = vec![artifact("1337", vec![network("solo", 5, "0x05")])];

        let resolution =
            assemble(&store, &chain, "1337", &artifacts).await.unwrap().expect("one network");
        assert_eq!(resolution.ancestor, resolution.descendant);
        assert!(resolution.links.is_empty());

        let ids = persist_resolution(&store, &resolution).await.unwrap();
        assert!(ids.is_empty());
        assert_eq!(store.persist_calls(), 1);
    }

    #[tokio::test]
    async fn persist_returns_one_id_per_link_in_order() {
        let store = FixtureStore::empty();
        let chain = EchoChain { hashes_by_height: vec![] };
        let artifacts = vec![
            artifact("1337", vec![network("a", 1, "0x01")]),
            artifact("1337", vec![network("b", 2, "0x02")]),
            artifact("1337", vec![network("c", 3, "0x03")]),
        ];

        let resolution =
            assemble(&store, &chain, "1337", &artifacts).await.unwrap().unwrap();
        let ids = persist_resolution(&store, &resolution).await.unwrap();

        assert_eq!(ids, vec!["link-0", "link-1"]);
    }

    #[tokio::test]
    async fn persist_failure_propagates() {
        struct RejectingStore;
        impl RelationStore for RejectingStore {
            fn relatives(&self, query: &RelativesQuery) -> RelativesFuture<'_> {
                let tried = query.exclude.clone();
                Box::pin(async move {
                    Ok(CandidateBatch { networks: vec![], already_tried: tried })
                })
            }
            fn persist(&self, _links: &[GenealogyLink]) -> PersistFuture<'_> {
                Box::pin(async move { Err("write denied".into()) })
            }
        }

        let resolution = Resolution {
            ancestor: network("a", 1, "0x01"),
            descendant: network("a", 1, "0x01"),
            extended_ancestor: None,
            extended_descendant: None,
            links: vec![],
        };

        let err = persist_resolution(&RejectingStore, &resolution)
            .await
            .expect_err("persist failure must surface");
        assert!(err.contains("write denied"));
    }
}
