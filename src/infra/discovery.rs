//! Locates the id of a named inventory group.
//!
//! Two strategies exist: a strict text search, and a concurrent scan over a
//! category's groups. Whichever runs, the id is persisted under
//! [`GROUP_ID_KEY`] and trusted on later runs without re-validation.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use thiserror::Error;
use tokio::task::JoinSet;

use crate::domain::{CategoryId, GroupId};
use crate::infra::esi::Catalog;
use crate::infra::http::LookupError;
use crate::infra::resolver::{worker_count, WorkCursor};
use crate::infra::store::KeyValueStore;

/// Durable slot holding the discovered group id.
pub const GROUP_ID_KEY: &str = "bsGroupId";

#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("group '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DiscoveryStrategy {
    /// Ask the catalog's search endpoint.
    #[default]
    Search,
    /// Walk the groups of `category` and compare names.
    Scan { category: CategoryId },
}

/// First group of a strict text search for `name`.
pub async fn search_group<C: Catalog>(catalog: &C, name: &str) -> Result<GroupId, DiscoveryError> {
    let groups = catalog.search_groups(name).await?;
    groups
        .first()
        .copied()
        .ok_or_else(|| DiscoveryError::NotFound(name.to_string()))
}

/// Scans `candidates` with at most `concurrency` lookups in flight until a
/// group named `target` (compared case-insensitively) turns up.
///
/// Once a match is seen no new candidates are claimed. Lookups already in
/// flight still finish, and if several matches were observed the one
/// earliest in `candidates` wins.
pub async fn discover_group<C: Catalog>(
    catalog: Arc<C>,
    candidates: &[GroupId],
    target: &str,
    concurrency: usize,
) -> Result<GroupId, DiscoveryError> {
    let target = target.to_lowercase();
    let not_found = || DiscoveryError::NotFound(target.clone());
    if candidates.is_empty() {
        return Err(not_found());
    }

    let ids: Arc<[GroupId]> = candidates.into();
    let cursor = Arc::new(WorkCursor::default());
    let found = Arc::new(AtomicBool::new(false));
    let matches = Arc::new(Mutex::new(Vec::<(usize, GroupId)>::new()));
    let target_name: Arc<str> = target.as_str().into();

    let mut pool = JoinSet::new();
    for _ in 0..worker_count(concurrency, ids.len()) {
        let catalog = catalog.clone();
        let ids = ids.clone();
        let cursor = cursor.clone();
        let found = found.clone();
        let matches = matches.clone();
        let target_name = target_name.clone();
        pool.spawn(async move {
            while !found.load(Ordering::SeqCst) {
                let Some(index) = cursor.claim(ids.len()) else {
                    break;
                };
                let id = ids[index];
                let record = match catalog.group_record(id).await {
                    Ok(record) => record,
                    Err(err) => {
                        log::debug!("[discovery] skipped group {id}: {err}");
                        continue;
                    }
                };
                let is_match = record
                    .name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase() == *target_name);
                if is_match {
                    if let Ok(mut hits) = matches.lock() {
                        hits.push((index, id));
                    }
                    found.store(true, Ordering::SeqCst);
                }
            }
        });
    }

    while let Some(joined) = pool.join_next().await {
        if let Err(err) = joined {
            log::warn!("[discovery] worker aborted: {err}");
        }
    }

    let best = matches
        .lock()
        .ok()
        .and_then(|hits| hits.iter().min_by_key(|(index, _)| *index).copied());
    match best {
        Some((_, id)) => {
            log::info!("[discovery] matched '{target}' to group {id}");
            Ok(id)
        }
        None => Err(not_found()),
    }
}

/// Group id discovery with a durable cache in front.
pub struct GroupLocator<C, S> {
    catalog: Arc<C>,
    store: Arc<S>,
    strategy: DiscoveryStrategy,
    concurrency: usize,
}

impl<C: Catalog, S: KeyValueStore> GroupLocator<C, S> {
    pub fn new(
        catalog: Arc<C>,
        store: Arc<S>,
        strategy: DiscoveryStrategy,
        concurrency: usize,
    ) -> Self {
        Self {
            catalog,
            store,
            strategy,
            concurrency,
        }
    }

    /// Previously persisted id, if the slot holds a parseable one.
    pub fn persisted(&self) -> Option<GroupId> {
        let raw = self.store.get(GROUP_ID_KEY)?;
        match raw.trim().parse::<GroupId>() {
            Ok(id) => Some(id),
            Err(_) => {
                log::warn!("[discovery] ignoring invalid {GROUP_ID_KEY} value '{raw}'");
                None
            }
        }
    }

    pub async fn locate(&self, name: &str) -> Result<GroupId, DiscoveryError> {
        if let Some(id) = self.persisted() {
            log::info!("[discovery] using persisted group {id}");
            return Ok(id);
        }

        let id = match self.strategy {
            DiscoveryStrategy::Search => search_group(self.catalog.as_ref(), name).await?,
            DiscoveryStrategy::Scan { category } => {
                let record = self.catalog.category_record(category).await?;
                log::info!(
                    "[discovery] scanning {} groups of category {category}",
                    record.groups.len()
                );
                discover_group(self.catalog.clone(), &record.groups, name, self.concurrency)
                    .await?
            }
        };

        if let Err(err) = self.store.set(GROUP_ID_KEY, &id.to_string()) {
            log::warn!("[discovery] failed to persist group {id}: {err}");
        }
        Ok(id)
    }
}
