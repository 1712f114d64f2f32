//! Replaying adapter for the `RelationStore` port.

use std::sync::Mutex;

use super::extract_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::model::GenealogyLink;
use crate::ports::store::{PersistFuture, RelationStore, RelativesFuture, RelativesQuery};

/// Serves recorded relation store responses from a cassette.
pub struct ReplayingRelationStore {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingRelationStore {
    /// Creates a new replaying relation store from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn next_output(&self, method: &str) -> serde_json::Value {
        let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
        replayer.next_interaction("store", method).output.clone()
    }
}

impl RelationStore for ReplayingRelationStore {
    fn relatives(&self, _query: &RelativesQuery) -> RelativesFuture<'_> {
        let output = self.next_output("relatives");
        Box::pin(async move { extract_result(&output, "store::relatives") })
    }

    fn persist(&self, _links: &[GenealogyLink]) -> PersistFuture<'_> {
        let output = self.next_output("persist");
        Box::pin(async move { extract_result(&output, "store::persist") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::model::Direction;
    use crate::ports::CandidateBatch;
    use chrono::Utc;
    use serde_json::json;

    fn make_replayer(interactions: Vec<Interaction>) -> CassetteReplayer {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    fn query() -> RelativesQuery {
        RelativesQuery { direction: Direction::Ancestor, anchor: "net-1".into(), exclude: vec![] }
    }

    #[tokio::test]
    async fn replaying_store_serves_candidate_batch() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "store".into(),
            method: "relatives".into(),
            input: json!({"direction": "ancestor", "anchor": "net-1", "exclude": []}),
            output: json!({"ok": {
                "networks": [
                    {"id": "net-0", "historicBlock": {"height": 3, "hash": "0x03"}}
                ],
                "alreadyTried": ["net-0"]
            }}),
        }]);
        let store = ReplayingRelationStore::new(replayer);

        let batch: CandidateBatch = store.relatives(&query()).await.unwrap();
        assert_eq!(batch.networks.len(), 1);
        assert_eq!(batch.networks[0].id, "net-0");
        assert_eq!(batch.already_tried, vec!["net-0"]);
    }

    #[tokio::test]
    async fn replaying_store_serves_recorded_failure() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "store".into(),
            method: "relatives".into(),
            input: json!({}),
            output: json!({"err": "store unavailable"}),
        }]);
        let store = ReplayingRelationStore::new(replayer);

        let err = store.relatives(&query()).await.unwrap_err();
        assert!(err.to_string().contains("store unavailable"));
    }

    #[tokio::test]
    async fn replaying_store_serves_persisted_ids() {
        let replayer = make_replayer(vec![Interaction {
            seq: 0,
            port: "store".into(),
            method: "persist".into(),
            input: json!([]),
            output: json!({"ok": ["link-1", "link-2"]}),
        }]);
        let store = ReplayingRelationStore::new(replayer);

        let ids = store.persist(&[]).await.unwrap();
        assert_eq!(ids, vec!["link-1", "link-2"]);
    }
}
