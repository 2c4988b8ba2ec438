//! Turns a pricing quote into display rows.

use thiserror::Error;

use crate::domain::{
    name_order, Breakdown, CostTotals, JobParams, ManufacturingQuote, MaterialRow, TypeId,
};
use crate::infra::esi::Catalog;
use crate::infra::everef::Pricing;
use crate::infra::http::LookupError;
use crate::infra::names::NameCache;

#[derive(Debug, Error)]
pub enum BreakdownError {
    #[error("No manufacturing block returned for {0} (not manufacturable or wrong ID).")]
    NoManufacturingData(TypeId),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Picks the quote for `type_id` out of a raw pricing response.
///
/// Only the requested entry is parsed; quotes for other products are ignored.
pub fn quote_for(raw: &serde_json::Value, type_id: TypeId) -> Result<ManufacturingQuote, BreakdownError> {
    let entry = raw
        .get("manufacturing")
        .and_then(|block| block.get(type_id.to_string()))
        .filter(|entry| !entry.is_null())
        .ok_or(BreakdownError::NoManufacturingData(type_id))?;
    Ok(serde_json::from_value(entry.clone()).map_err(LookupError::from)?)
}

/// Resolves material names one by one and sorts rows by name.
pub async fn material_rows<C: Catalog>(
    quote: &ManufacturingQuote,
    names: &NameCache<C>,
) -> Result<Vec<MaterialRow>, LookupError> {
    let mut rows = Vec::with_capacity(quote.materials.len());
    for (key, entry) in &quote.materials {
        let Some(id) = entry.type_id.or_else(|| key.parse().ok()) else {
            log::warn!("[pricing] skipping material with unusable id '{key}'");
            continue;
        };
        rows.push(MaterialRow {
            id,
            name: names.resolve_name(id).await?,
            quantity: entry.quantity,
            cost_per_unit: entry.cost_per_unit,
            cost: entry.cost,
        });
    }
    rows.sort_by(|a, b| name_order(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
    Ok(rows)
}

fn totals(quote: &ManufacturingQuote) -> CostTotals {
    CostTotals {
        material: quote.total_material_cost.unwrap_or_default(),
        job: quote.total_job_cost.unwrap_or_default(),
        total: quote.total_cost.unwrap_or_default(),
    }
}

/// Fetches a quote for `type_id` and reshapes it for display.
pub async fn compute_breakdown<C: Catalog, P: Pricing + ?Sized>(
    pricing: &P,
    names: &NameCache<C>,
    type_id: TypeId,
    params: JobParams,
) -> Result<Breakdown, BreakdownError> {
    let raw = pricing.manufacturing_cost(type_id, params).await?;
    let quote = quote_for(&raw, type_id)?;
    let rows = material_rows(&quote, names).await?;
    let product_name = names.resolve_name(type_id).await?;
    log::info!(
        "[pricing] {product_name}: {} materials, total {:?}",
        rows.len(),
        quote.total_cost
    );

    Ok(Breakdown {
        type_id,
        product_name,
        params,
        rows,
        totals: totals(&quote),
        raw,
    })
}
