//! Long-lived clients shared by the UI for the whole session.

use std::sync::Arc;

use crate::config::{ApiConfig, TARGET_GROUP_NAME};
use crate::domain::{Breakdown, JobParams, NamedItem, TypeId};
use crate::infra::breakdown::{compute_breakdown, BreakdownError};
use crate::infra::directory::load_hulls;
use crate::infra::discovery::{DiscoveryError, GroupLocator};
use crate::infra::esi::EsiClient;
use crate::infra::everef::EveRefClient;
use crate::infra::http::LookupError;
use crate::infra::names::NameCache;
use crate::infra::store::{FileStore, STORE_FILENAME};

#[derive(Clone)]
pub struct Services {
    names: Arc<NameCache<EsiClient>>,
    pricing: Arc<EveRefClient>,
    locator: Arc<GroupLocator<EsiClient, FileStore>>,
    concurrency: usize,
}

impl Services {
    pub fn new(config: &ApiConfig) -> Result<Self, LookupError> {
        let esi = Arc::new(EsiClient::with_base_url(&config.esi_url)?);
        let pricing = Arc::new(EveRefClient::with_base_url(&config.pricing_url)?);
        let store = FileStore::open_default().unwrap_or_else(|err| {
            log::warn!("[store] {err}; falling back to ./{STORE_FILENAME}");
            FileStore::at(STORE_FILENAME)
        });
        log::info!(
            "[services] catalog {}, pricing {}, concurrency {}, discovery {:?}",
            config.esi_url,
            config.pricing_url,
            config.concurrency,
            config.discovery
        );

        Ok(Self {
            names: Arc::new(NameCache::new(esi.clone())),
            pricing,
            locator: Arc::new(GroupLocator::new(
                esi,
                Arc::new(store),
                config.discovery,
                config.concurrency,
            )),
            concurrency: config.concurrency,
        })
    }

    /// Published battleship hulls, sorted by name.
    pub async fn hulls(&self) -> Result<Vec<NamedItem>, DiscoveryError> {
        load_hulls(
            &self.locator,
            self.names.clone(),
            TARGET_GROUP_NAME,
            self.concurrency,
        )
        .await
    }

    pub async fn breakdown(
        &self,
        type_id: TypeId,
        params: JobParams,
    ) -> Result<Breakdown, BreakdownError> {
        compute_breakdown(self.pricing.as_ref(), self.names.as_ref(), type_id, params).await
    }
}
