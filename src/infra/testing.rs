//! In-memory catalog and pricing doubles that record every call.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use crate::domain::{CategoryId, GroupId, JobParams, TypeId};
use crate::infra::esi::{CategoryRecord, Catalog, GroupRecord, TypeRecord};
use crate::infra::everef::Pricing;
use crate::infra::http::LookupError;

#[derive(Default)]
pub struct FakeCatalog {
    types: HashMap<TypeId, TypeRecord>,
    groups: HashMap<GroupId, GroupRecord>,
    categories: HashMap<CategoryId, CategoryRecord>,
    search: HashMap<String, Vec<GroupId>>,
    failing: HashSet<u64>,
    delays: HashMap<u64, Duration>,
    type_calls: Mutex<Vec<TypeId>>,
    group_calls: Mutex<Vec<GroupId>>,
    search_calls: AtomicUsize,
    category_calls: AtomicUsize,
}

fn remote_failure(kind: &str, id: u64) -> LookupError {
    LookupError::Remote {
        status: 503,
        url: format!("fake://{kind}/{id}"),
    }
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, id: TypeId, name: &str) -> Self {
        self.types.insert(
            id,
            TypeRecord {
                type_id: Some(id),
                name: Some(name.to_string()),
                published: Some(true),
                group_id: None,
            },
        );
        self
    }

    pub fn with_unpublished_type(mut self, id: TypeId, name: &str) -> Self {
        self.types.insert(
            id,
            TypeRecord {
                type_id: Some(id),
                name: Some(name.to_string()),
                published: Some(false),
                group_id: None,
            },
        );
        self
    }

    pub fn with_nameless_type(mut self, id: TypeId) -> Self {
        self.types.insert(
            id,
            TypeRecord {
                type_id: Some(id),
                ..TypeRecord::default()
            },
        );
        self
    }

    pub fn with_group(mut self, id: GroupId, name: &str, types: &[TypeId]) -> Self {
        self.groups.insert(
            id,
            GroupRecord {
                group_id: Some(id),
                name: Some(name.to_string()),
                types: types.to_vec(),
            },
        );
        self
    }

    pub fn with_category(mut self, id: CategoryId, groups: &[GroupId]) -> Self {
        self.categories.insert(
            id,
            CategoryRecord {
                category_id: Some(id),
                name: Some("Ship".to_string()),
                groups: groups.to_vec(),
            },
        );
        self
    }

    pub fn with_search(mut self, term: &str, groups: &[GroupId]) -> Self {
        self.search.insert(term.to_string(), groups.to_vec());
        self
    }

    /// Any lookup of `id` (type or group) fails with a remote error.
    pub fn failing(mut self, id: u64) -> Self {
        self.failing.insert(id);
        self
    }

    /// Lookups of `id` wait this long before answering.
    pub fn delayed(mut self, id: u64, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    pub fn type_calls(&self) -> Vec<TypeId> {
        self.type_calls.lock().unwrap().clone()
    }

    pub fn group_calls(&self) -> Vec<GroupId> {
        self.group_calls.lock().unwrap().clone()
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    pub fn category_calls(&self) -> usize {
        self.category_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.type_calls().len() + self.group_calls().len() + self.search_calls() + self.category_calls()
    }

    async fn pause(&self, id: u64) {
        if let Some(delay) = self.delays.get(&id) {
            tokio::time::sleep(*delay).await;
        } else {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn type_record(&self, id: TypeId) -> Result<TypeRecord, LookupError> {
        self.type_calls.lock().unwrap().push(id);
        self.pause(id).await;
        if self.failing.contains(&id) {
            return Err(remote_failure("types", id));
        }
        self.types.get(&id).cloned().ok_or(LookupError::Remote {
            status: 404,
            url: format!("fake://types/{id}"),
        })
    }

    async fn group_record(&self, id: GroupId) -> Result<GroupRecord, LookupError> {
        self.group_calls.lock().unwrap().push(id);
        self.pause(id).await;
        if self.failing.contains(&id) {
            return Err(remote_failure("groups", id));
        }
        self.groups.get(&id).cloned().ok_or(LookupError::Remote {
            status: 404,
            url: format!("fake://groups/{id}"),
        })
    }

    async fn category_record(&self, id: CategoryId) -> Result<CategoryRecord, LookupError> {
        self.category_calls.fetch_add(1, Ordering::SeqCst);
        self.categories.get(&id).cloned().ok_or(LookupError::Remote {
            status: 404,
            url: format!("fake://categories/{id}"),
        })
    }

    async fn search_groups(&self, term: &str) -> Result<Vec<GroupId>, LookupError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.search.get(term).cloned().unwrap_or_default())
    }
}

/// Pricing double that answers every request with the same payload.
pub struct FakePricing {
    response: serde_json::Value,
    requests: Mutex<Vec<(TypeId, JobParams)>>,
}

impl FakePricing {
    pub fn new(response: serde_json::Value) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(TypeId, JobParams)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pricing for FakePricing {
    async fn manufacturing_cost(
        &self,
        product_id: TypeId,
        params: JobParams,
    ) -> Result<serde_json::Value, LookupError> {
        self.requests.lock().unwrap().push((product_id, params));
        Ok(self.response.clone())
    }
}
