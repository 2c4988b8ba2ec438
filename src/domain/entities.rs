use std::{cmp::Ordering, collections::BTreeMap};

use serde::{Deserialize, Serialize};

/// Identifier for item types returned by the catalog.
pub type TypeId = u64;
/// Identifier for inventory groups (e.g. "Battleship").
pub type GroupId = u64;
/// Identifier for inventory categories (e.g. "Ship").
pub type CategoryId = u64;

/// A catalog entry resolved to its display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedItem {
    pub id: TypeId,
    pub name: String,
}

impl NamedItem {
    pub fn new(id: TypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn label(&self) -> String {
        format!("{} (ID {})", self.name, self.id)
    }
}

/// Display order for names: case-insensitive first, exact spelling as tie-break.
pub fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

pub fn sort_by_name(items: &mut [NamedItem]) {
    items.sort_by(|a, b| name_order(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)));
}

/// Blueprint job parameters sent to the pricing service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobParams {
    pub runs: u32,
    /// Material efficiency level.
    pub me: u32,
    /// Time efficiency level.
    pub te: u32,
}

impl Default for JobParams {
    fn default() -> Self {
        Self {
            runs: 1,
            me: 0,
            te: 0,
        }
    }
}

/// One product's entry under `manufacturing` in a pricing response.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ManufacturingQuote {
    #[serde(default)]
    pub materials: BTreeMap<String, MaterialEntry>,
    #[serde(default)]
    pub total_material_cost: Option<f64>,
    #[serde(default)]
    pub total_job_cost: Option<f64>,
    #[serde(default)]
    pub total_cost: Option<f64>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MaterialEntry {
    #[serde(default)]
    pub type_id: Option<TypeId>,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub cost_per_unit: Option<f64>,
    #[serde(default)]
    pub cost: Option<f64>,
}

/// One line of the materials table.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialRow {
    pub id: TypeId,
    pub name: String,
    pub quantity: f64,
    /// `None` when the pricing service has no cost data for the material.
    pub cost_per_unit: Option<f64>,
    pub cost: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CostTotals {
    pub material: f64,
    pub job: f64,
    pub total: f64,
}

/// Display-ready manufacturing breakdown for one product.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakdown {
    pub type_id: TypeId,
    pub product_name: String,
    pub params: JobParams,
    pub rows: Vec<MaterialRow>,
    pub totals: CostTotals,
    /// Untouched pricing response, shown in the diagnostics panel.
    pub raw: serde_json::Value,
}

impl Breakdown {
    pub fn title(&self) -> String {
        format!("{} — runs: {}", self.product_name, self.params.runs)
    }
}
