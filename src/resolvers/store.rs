//! Entity lookups used by breadcrumb resolvers.

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Entity types whose display names appear in breadcrumb trails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Product,
    Category,
    Label,
    Order,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Product => "product",
            EntityKind::Category => "category",
            EntityKind::Label => "label",
            EntityKind::Order => "order",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lookup failure. `Ok(None)` from a store means "no such entity", so
/// every variant here is a failure to answer, not a negative answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("entity store unavailable: {0}")]
    Unavailable(String),

    #[error("entity lookup timed out after {0} ms")]
    Timeout(u64),

    #[error("entity store error: {0}")]
    Backend(String),
}

/// Display-name lookup by entity id.
#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn display_name(&self, kind: EntityKind, id: &str) -> Result<Option<String>, StoreError>;
}

/// In-memory store, shared by cloning.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<(EntityKind, String), String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load names from a JSON file shaped like
    /// `{"product": {"prod_1": "Cold Brew"}, "order": {...}}`.
    pub fn load_from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let store = Self::new();
        let reader = BufReader::new(File::open(path.as_ref())?);
        let map: HashMap<EntityKind, HashMap<String, String>> = serde_json::from_reader(reader)?;

        for (kind, names) in map {
            for (id, name) in names {
                store.insert(kind, id, name);
            }
        }
        tracing::info!(
            path = %path.as_ref().display(),
            entities = store.len(),
            "Loaded entity names"
        );
        Ok(store)
    }

    pub fn insert(&self, kind: EntityKind, id: impl Into<String>, name: impl Into<String>) {
        self.inner.insert((kind, id.into()), name.into());
    }

    pub fn with(self, kind: EntityKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.insert(kind, id, name);
        self
    }

    pub fn get(&self, kind: EntityKind, id: &str) -> Option<String> {
        self.inner
            .get(&(kind, id.to_string()))
            .map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn display_name(&self, kind: EntityKind, id: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get(kind, id))
    }
}
