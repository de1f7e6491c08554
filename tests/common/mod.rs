//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use admin_nav::config::NavigationConfig;
use admin_nav::resolvers::{EntityKind, EntityStore, StoreError};
use admin_nav::routing::{Location, Router};
use async_trait::async_trait;

/// Router over the embedded admin table.
pub fn admin_router() -> Arc<Router> {
    let config = NavigationConfig::admin().unwrap();
    Arc::new(Router::from_config(&config).unwrap())
}

/// Id of the route an href resolves to.
#[allow(dead_code)]
pub fn resolve_id(router: &Router, href: &str) -> Option<String> {
    router
        .resolve(&Location::parse(href))
        .map(|resolved| resolved.route.id.clone())
}

/// Store whose every lookup fails with the given error.
#[allow(dead_code)]
pub struct FailingStore {
    pub error: StoreError,
    pub calls: AtomicU32,
}

#[allow(dead_code)]
impl FailingStore {
    pub fn new(error: StoreError) -> Self {
        Self {
            error,
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl EntityStore for FailingStore {
    async fn display_name(&self, _kind: EntityKind, _id: &str) -> Result<Option<String>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

/// Store that answers after a fixed delay.
#[allow(dead_code)]
pub struct SlowStore {
    pub delay: Duration,
    pub name: String,
}

#[async_trait]
impl EntityStore for SlowStore {
    async fn display_name(&self, _kind: EntityKind, _id: &str) -> Result<Option<String>, StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(Some(self.name.clone()))
    }
}

/// Store answering with a name built from the id, counting calls.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingStore {
    pub calls: AtomicU32,
}

#[async_trait]
impl EntityStore for CountingStore {
    async fn display_name(&self, kind: EntityKind, id: &str) -> Result<Option<String>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(format!("{kind} {id}")))
    }
}
