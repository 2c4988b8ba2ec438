//! Session-lifetime cache of type names.

use std::{collections::HashMap, sync::Arc};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::{NamedItem, TypeId};
use crate::infra::esi::{Catalog, TypeRecord};
use crate::infra::http::LookupError;

#[derive(Clone, Debug, PartialEq, Eq)]
struct CachedName {
    name: String,
    published: bool,
}

impl CachedName {
    fn from_record(id: TypeId, record: TypeRecord) -> Self {
        Self {
            name: record
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| placeholder_name(id)),
            published: record.published != Some(false),
        }
    }
}

pub fn placeholder_name(id: TypeId) -> String {
    format!("type {id}")
}

/// Why a type was left out of a listing.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("type {0} is not published")]
    Unpublished(TypeId),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Maps type ids to display names, fetching each at most once per session
/// when lookups are sequential. Entries are never evicted.
pub struct NameCache<C> {
    catalog: Arc<C>,
    entries: Mutex<HashMap<TypeId, CachedName>>,
}

impl<C: Catalog> NameCache<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            catalog,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    async fn entry(&self, id: TypeId) -> Result<CachedName, LookupError> {
        if let Some(hit) = self.entries.lock().await.get(&id) {
            return Ok(hit.clone());
        }

        let record = self.catalog.type_record(id).await?;
        let resolved = CachedName::from_record(id, record);
        let mut entries = self.entries.lock().await;
        // A concurrent lookup may have landed first; the earlier entry stays.
        Ok(entries.entry(id).or_insert(resolved).clone())
    }

    /// Display name for `id`; a record without a name yields `"type {id}"`.
    pub async fn resolve_name(&self, id: TypeId) -> Result<String, LookupError> {
        Ok(self.entry(id).await?.name)
    }

    /// Like [`resolve_name`](Self::resolve_name) but skips unpublished types.
    pub async fn resolve_listing(&self, id: TypeId) -> Result<NamedItem, SkipReason> {
        let entry = self.entry(id).await?;
        if entry.published {
            Ok(NamedItem::new(id, entry.name))
        } else {
            Err(SkipReason::Unpublished(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::testing::FakeCatalog;

    #[tokio::test]
    async fn second_lookup_hits_the_cache() {
        let catalog = Arc::new(FakeCatalog::new().with_type(645, "Dominix"));
        let names = NameCache::new(catalog.clone());

        assert_eq!(names.resolve_name(645).await.unwrap(), "Dominix");
        assert_eq!(names.resolve_name(645).await.unwrap(), "Dominix");
        assert_eq!(catalog.type_calls(), vec![645]);
    }

    #[tokio::test]
    async fn missing_name_degrades_to_placeholder() {
        let catalog = Arc::new(FakeCatalog::new().with_nameless_type(34));
        let names = NameCache::new(catalog);
        assert_eq!(names.resolve_name(34).await.unwrap(), "type 34");
    }

    #[tokio::test]
    async fn empty_name_degrades_to_placeholder() {
        let catalog = Arc::new(FakeCatalog::new().with_type(34, ""));
        let names = NameCache::new(catalog);
        assert_eq!(names.resolve_name(34).await.unwrap(), "type 34");
    }

    #[tokio::test]
    async fn lookup_failures_propagate_and_are_not_cached() {
        let catalog = Arc::new(FakeCatalog::new().failing(35));
        let names = NameCache::new(catalog.clone());

        let err = names.resolve_name(35).await.unwrap_err();
        assert!(matches!(err, LookupError::Remote { status: 503, .. }));
        assert!(names.resolve_name(35).await.is_err());
        assert_eq!(catalog.type_calls(), vec![35, 35]);
        assert_eq!(names.len().await, 0);
    }

    #[tokio::test]
    async fn listing_skips_unpublished_but_still_caches_the_name() {
        let catalog = Arc::new(FakeCatalog::new().with_unpublished_type(999, "Test Hull"));
        let names = NameCache::new(catalog.clone());

        let skipped = names.resolve_listing(999).await.unwrap_err();
        assert!(matches!(skipped, SkipReason::Unpublished(999)));
        assert_eq!(names.resolve_name(999).await.unwrap(), "Test Hull");
        assert_eq!(catalog.type_calls().len(), 1);
    }
}
