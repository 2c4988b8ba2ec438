//! Thin asynchronous client for the EVE Swagger Interface (ESI) universe catalog.
//!
//! - Every request carries the fixed `datasource` and `language` parameters.
//! - Only the read-only universe and search routes are used.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{CategoryId, GroupId, TypeId};
use crate::infra::http::{JsonEndpoint, LookupError};

pub const DATASOURCE: &str = "tranquility";
pub const LANGUAGE: &str = "en";
const SEARCH_LANGUAGE: &str = "en-us";

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TypeRecord {
    #[serde(default)]
    pub type_id: Option<TypeId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub published: Option<bool>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GroupRecord {
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeId>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CategoryRecord {
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub groups: Vec<GroupId>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchDto {
    #[serde(default)]
    group: Vec<GroupId>,
}

/// Read-only view of the universe catalog.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    async fn type_record(&self, id: TypeId) -> Result<TypeRecord, LookupError>;
    async fn group_record(&self, id: GroupId) -> Result<GroupRecord, LookupError>;
    async fn category_record(&self, id: CategoryId) -> Result<CategoryRecord, LookupError>;
    /// Strict text search over group names.
    async fn search_groups(&self, term: &str) -> Result<Vec<GroupId>, LookupError>;
}

#[derive(Clone, Debug)]
pub struct EsiClient {
    endpoint: JsonEndpoint,
}

impl EsiClient {
    pub fn with_base_url(base: &str) -> Result<Self, LookupError> {
        let endpoint = JsonEndpoint::new(base)?
            .with_fixed_query(&[("datasource", DATASOURCE), ("language", LANGUAGE)]);
        Ok(Self { endpoint })
    }
}

#[async_trait]
impl Catalog for EsiClient {
    async fn type_record(&self, id: TypeId) -> Result<TypeRecord, LookupError> {
        self.endpoint
            .fetch(&format!("universe/types/{id}/"), &[])
            .await
    }

    async fn group_record(&self, id: GroupId) -> Result<GroupRecord, LookupError> {
        self.endpoint
            .fetch(&format!("universe/groups/{id}/"), &[])
            .await
    }

    async fn category_record(&self, id: CategoryId) -> Result<CategoryRecord, LookupError> {
        self.endpoint
            .fetch(&format!("universe/categories/{id}/"), &[])
            .await
    }

    async fn search_groups(&self, term: &str) -> Result<Vec<GroupId>, LookupError> {
        let query = [
            ("categories", "group".to_string()),
            ("search", term.to_string()),
            ("strict", "true".to_string()),
            ("language", SEARCH_LANGUAGE.to_string()),
            ("datasource", DATASOURCE.to_string()),
        ];
        log::info!("[esi] searching groups for '{term}'");
        let result: SearchDto = self.endpoint.fetch("search/", &query).await?;
        Ok(result.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_record_accepts_sparse_payloads() {
        let record: TypeRecord = serde_json::from_value(serde_json::json!({
            "type_id": 645,
            "published": true
        }))
        .unwrap();
        assert_eq!(record.name, None);
        assert_eq!(record.published, Some(true));
    }

    #[test]
    fn search_payload_without_groups_is_empty() {
        let result: SearchDto = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(result.group.is_empty());
    }

    #[test]
    fn search_url_uses_search_language() {
        let client = EsiClient::with_base_url("https://esi.example/latest/").unwrap();
        let url = client
            .endpoint
            .url(
                "search/",
                &[
                    ("categories", "group".to_string()),
                    ("language", SEARCH_LANGUAGE.to_string()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.query(),
            Some("categories=group&language=en-us&datasource=tranquility")
        );
    }
}
