//! Chain-verified search for a previously recorded related network.

use crate::model::{Direction, Network};
use crate::ports::{ChainClient, RelationStore, RelativesQuery};

/// Finds the closest previously-recorded network related to `anchor` in the
/// given direction, or determines that none exists.
///
/// Each iteration queries the store for candidate relations and verifies
/// them against live chain data **in the order the store returned them**:
/// one lookup at a time, stopping at the first candidate whose recorded
/// hash matches the chain's block at its recorded height. Which candidate
/// wins depends on that serial order, so lookups are never reordered or
/// raced.
///
/// The store's returned exclusion set is threaded verbatim into the next
/// query; it only ever grows, which is what guarantees the loop terminates
/// once the store runs out of fresh candidates and answers with an empty
/// batch ("no relation found").
///
/// A failed or absent chain lookup makes that candidate "not a match" and
/// the search continues.
///
/// # Errors
///
/// Returns an error if a store query fails; the search is aborted rather
/// than treated as exhausted, so a flaky store cannot silently produce an
/// incomplete genealogy.
pub async fn find_relation(
    store: &dyn RelationStore,
    chain: &dyn ChainClient,
    direction: Direction,
    anchor: &Network,
) -> Result<Option<Network>, String> {
    let mut already_tried: Vec<String> = Vec::new();

    loop {
        let query = RelativesQuery {
            direction,
            anchor: anchor.id.clone(),
            exclude: already_tried.clone(),
        };
        let batch = store
            .relatives(&query)
            .await
            .map_err(|e| format!("{direction} query for network {} failed: {e}", anchor.id))?;

        if batch.networks.is_empty() {
            tracing::debug!(%direction, anchor = %anchor.id, "no candidates left");
            return Ok(None);
        }

        tracing::debug!(
            %direction,
            anchor = %anchor.id,
            candidates = batch.networks.len(),
            excluded = batch.already_tried.len(),
            "verifying candidate batch"
        );

        for candidate in &batch.networks {
            let height = candidate.historic_block.height;
            match chain.block_hash_at(height, false).await {
                Ok(Some(hash)) if hash == candidate.historic_block.hash => {
                    tracing::debug!(%direction, relation = %candidate.id, height, "confirmed");
                    return Ok(Some(candidate.clone()));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(
                        candidate = %candidate.id,
                        height,
                        error = %e,
                        "chain lookup failed; candidate not confirmed"
                    );
                }
            }
        }

        already_tried = batch.already_tried;
    }
}
