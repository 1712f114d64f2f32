//! Relation store port for genealogy queries and persistence.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::model::{Direction, GenealogyLink, Network};

/// Boxed future type alias used by [`RelationStore`] queries to keep the
/// trait dyn-compatible.
pub type RelativesFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CandidateBatch, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Boxed future type alias used by [`RelationStore`] persistence.
pub type PersistFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Vec<String>, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// A request for possible relations of one network in one direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelativesQuery {
    /// Which end of chain history to search toward.
    pub direction: Direction,
    /// Identifier of the network the search is anchored at.
    pub anchor: String,
    /// Network identifiers the store must not offer again.
    pub exclude: Vec<String>,
}

/// Candidate networks offered by the store, pending chain verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateBatch {
    /// Candidates in the store's preference order. The caller must check
    /// them in exactly this order.
    pub networks: Vec<Network>,
    /// The exclusion set to use verbatim in the next query. Always a
    /// superset of the query's `exclude`.
    pub already_tried: Vec<String>,
}

/// Queries and persists network genealogy in the durable relation store.
///
/// Abstracting the store allows deterministic replay and testing without a
/// running store service.
pub trait RelationStore: Send + Sync {
    /// Fetches a batch of candidate relations for the query's anchor,
    /// excluding identifiers the store already offered.
    ///
    /// The returned future resolves to an error if the store cannot be
    /// reached or rejects the query.
    fn relatives(&self, query: &RelativesQuery) -> RelativesFuture<'_>;

    /// Persists genealogy links, returning one store-assigned identifier per
    /// link in input order.
    ///
    /// The returned future resolves to an error if the store cannot be
    /// reached or rejects the write.
    fn persist(&self, links: &[GenealogyLink]) -> PersistFuture<'_>;
}
