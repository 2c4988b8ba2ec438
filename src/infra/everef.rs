//! Client for the EVE Ref industry cost calculator.

use async_trait::async_trait;

use crate::domain::{JobParams, TypeId};
use crate::infra::http::{JsonEndpoint, LookupError};

/// Source of manufacturing quotes.
#[async_trait]
pub trait Pricing: Send + Sync + 'static {
    /// Returns the raw cost response, keyed by product id under `manufacturing`.
    async fn manufacturing_cost(
        &self,
        product_id: TypeId,
        params: JobParams,
    ) -> Result<serde_json::Value, LookupError>;
}

#[derive(Clone, Debug)]
pub struct EveRefClient {
    endpoint: JsonEndpoint,
}

impl EveRefClient {
    pub fn with_base_url(base: &str) -> Result<Self, LookupError> {
        Ok(Self {
            endpoint: JsonEndpoint::new(base)?,
        })
    }
}

pub(crate) fn cost_query(product_id: TypeId, params: JobParams) -> [(&'static str, String); 4] {
    [
        ("product_id", product_id.to_string()),
        ("runs", params.runs.to_string()),
        ("me", params.me.to_string()),
        ("te", params.te.to_string()),
    ]
}

#[async_trait]
impl Pricing for EveRefClient {
    async fn manufacturing_cost(
        &self,
        product_id: TypeId,
        params: JobParams,
    ) -> Result<serde_json::Value, LookupError> {
        log::info!(
            "[pricing] requesting quote for {product_id} (runs {}, ME {}, TE {})",
            params.runs,
            params.me,
            params.te
        );
        self.endpoint
            .fetch_json("", &cost_query(product_id, params))
            .await
    }
}
