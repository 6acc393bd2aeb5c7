use crate::config::AppConfig;
use crate::errors::Result;
use crate::status::StatusStore;
use crate::status::backends::{moka::MokaStatusStore, redis::RedisStatusStore};
use once_cell::sync::Lazy;
use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{Arc, RwLock},
};

pub type BoxedStatusStoreFuture =
    Pin<Box<dyn Future<Output = Result<Box<dyn StatusStore>>> + Send>>;
pub type StatusStoreConstructor = Arc<dyn Fn(&AppConfig) -> BoxedStatusStoreFuture + Send + Sync>;

static STATUS_STORE_REGISTRY: Lazy<RwLock<HashMap<String, StatusStoreConstructor>>> =
    Lazy::new(|| {
        let mut registry: HashMap<String, StatusStoreConstructor> = HashMap::new();
        registry.insert(RedisStatusStore::NAME.to_string(), RedisStatusStore::constructor());
        registry.insert(MokaStatusStore::NAME.to_string(), MokaStatusStore::constructor());
        RwLock::new(registry)
    });

pub fn get_status_store_plugin(name: &str) -> Option<StatusStoreConstructor> {
    STATUS_STORE_REGISTRY
        .read()
        .expect("Status store registry lock poisoned")
        .get(name)
        .cloned()
}

pub fn debug_status_store_registry() {
    let registry = STATUS_STORE_REGISTRY
        .read()
        .expect("Status store registry lock poisoned");
    if registry.is_empty() {
        tracing::debug!("No status store plugins registered.");
    } else {
        tracing::debug!("Registered status store plugins:");
        for key in registry.keys() {
            tracing::debug!(" - {}", key);
        }
    }
}
