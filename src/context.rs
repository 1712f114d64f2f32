//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};

use crate::adapters::live::{LiveChainClient, LiveClock, LiveFileSystem, LiveRelationStore};
use crate::adapters::recording::{
    RecordingChainClient, RecordingClock, RecordingFileSystem, RecordingRelationStore,
};
use crate::adapters::replaying::{
    ReplayingChainClient, ReplayingClock, ReplayingFileSystem, ReplayingRelationStore,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::model::GenealogyLink;
use crate::ports::chain::BlockHashFuture;
use crate::ports::store::{PersistFuture, RelativesFuture, RelativesQuery};
use crate::ports::{ChainClient, Clock, FileSystem, RelationStore};

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Clock for report timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for artifact loading.
    pub fs: Box<dyn FileSystem>,
    /// Relation store for genealogy queries and persistence.
    pub store: Box<dyn RelationStore>,
    /// Chain client for candidate verification.
    pub chain: Box<dyn ChainClient>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            store: Box::new(LiveRelationStore::new()),
            chain: Box::new(LiveChainClient::new()),
        }
    }

    /// Creates a recording context that captures every port interaction to
    /// per-port cassette files under `root`.
    ///
    /// Live adapters do the actual work; the returned session must be
    /// finished (after dropping the context) to write the cassettes.
    ///
    /// # Errors
    ///
    /// Returns an error if the session's output directory cannot be created.
    pub fn recording_at(root: PathBuf) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(root)?;

        let ctx = Self {
            clock: Box::new(RecordingClock::new(
                Box::new(LiveClock),
                std::sync::Arc::clone(&session.clock),
            )),
            fs: Box::new(RecordingFileSystem::new(
                Box::new(LiveFileSystem),
                std::sync::Arc::clone(&session.fs),
            )),
            store: Box::new(RecordingRelationStore::new(
                Box::new(LiveRelationStore::new()),
                std::sync::Arc::clone(&session.store),
            )),
            chain: Box::new(RecordingChainClient::new(
                Box::new(LiveChainClient::new()),
                std::sync::Arc::clone(&session.chain),
            )),
        };

        Ok((ctx, session))
    }

    /// Creates a replaying context from a monolithic cassette file.
    ///
    /// All ports are served by a single cassette — each port/method pair is
    /// dispatched to the right interaction stream automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        // Each port gets its own replayer from the same cassette so that
        // per-port cursors are independent.
        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            store: Box::new(ReplayingRelationStore::new(CassetteReplayer::new(&cassette))),
            chain: Box::new(ReplayingChainClient::new(CassetteReplayer::new(&cassette))),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Each port can have its own cassette file. Ports without a configured
    /// cassette use a panicking adapter that fails with a clear message when
    /// called.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or
    /// parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            store: match replayers.store {
                Some(r) => Box::new(ReplayingRelationStore::new(r)),
                None => Box::new(PanickingRelationStore),
            },
            chain: match replayers.chain {
                Some(r) => Box::new(ReplayingChainClient::new(r)),
                None => Box::new(PanickingChainClient),
            },
        })
    }
}

// --- Panicking adapters for unspecified ports ---

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock port not configured in CassetteConfig — no cassette loaded for clock");
    }
}

struct PanickingFileSystem;
impl FileSystem for PanickingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn exists(&self, _path: &Path) -> bool {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        panic!("FileSystem port not configured in CassetteConfig — no cassette loaded for fs");
    }
}

struct PanickingRelationStore;
impl RelationStore for PanickingRelationStore {
    fn relatives(&self, _query: &RelativesQuery) -> RelativesFuture<'_> {
        panic!(
            "RelationStore port not configured in CassetteConfig — no cassette loaded for store"
        );
    }
    fn persist(&self, _links: &[GenealogyLink]) -> PersistFuture<'_> {
        panic!(
            "RelationStore port not configured in CassetteConfig — no cassette loaded for store"
        );
    }
}

struct PanickingChainClient;
impl ChainClient for PanickingChainClient {
    fn block_hash_at(&self, _height: u64, _include_transactions: bool) -> BlockHashFuture<'_> {
        panic!("ChainClient port not configured in CassetteConfig — no cassette loaded for chain");
    }
}
