//! Recording adapter for the `RelationStore` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::model::GenealogyLink;
use crate::ports::store::{PersistFuture, RelationStore, RelativesFuture, RelativesQuery};

/// Records relation store interactions while delegating to an inner
/// implementation.
pub struct RecordingRelationStore {
    inner: Box<dyn RelationStore>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRelationStore {
    /// Creates a new recording relation store wrapping the given
    /// implementation.
    pub fn new(inner: Box<dyn RelationStore>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl RelationStore for RecordingRelationStore {
    fn relatives(&self, query: &RelativesQuery) -> RelativesFuture<'_> {
        let query = query.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.relatives(&query).await;
            record_result(&recorder, "store", "relatives", &query, &result);
            result
        })
    }

    fn persist(&self, links: &[GenealogyLink]) -> PersistFuture<'_> {
        let links = links.to_vec();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.persist(&links).await;
            record_result(&recorder, "store", "persist", &links, &result);
            result
        })
    }
}
