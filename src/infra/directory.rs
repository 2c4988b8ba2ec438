//! Builds the list of hulls offered in the selector.

use std::sync::Arc;

use crate::domain::{sort_by_name, GroupId, NamedItem};
use crate::infra::discovery::{DiscoveryError, GroupLocator};
use crate::infra::esi::Catalog;
use crate::infra::names::NameCache;
use crate::infra::resolver::resolve_all;
use crate::infra::store::KeyValueStore;

/// Published members of `group_id`, sorted by name.
pub async fn load_group_members<C: Catalog>(
    names: Arc<NameCache<C>>,
    group_id: GroupId,
    concurrency: usize,
) -> Result<Vec<NamedItem>, DiscoveryError> {
    let group = names.catalog().group_record(group_id).await?;
    log::info!(
        "[directory] group {group_id} lists {} types",
        group.types.len()
    );

    let mut items = resolve_all(group.types, concurrency, move |id| {
        let names = names.clone();
        async move { names.resolve_listing(id).await }
    })
    .await;
    sort_by_name(&mut items);
    Ok(items)
}

/// Discovers the group named `group_name` and lists its published members.
pub async fn load_hulls<C: Catalog, S: KeyValueStore>(
    locator: &GroupLocator<C, S>,
    names: Arc<NameCache<C>>,
    group_name: &str,
    concurrency: usize,
) -> Result<Vec<NamedItem>, DiscoveryError> {
    let group_id = locator.locate(group_name).await?;
    load_group_members(names, group_id, concurrency).await
}
