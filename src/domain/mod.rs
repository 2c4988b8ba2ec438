//! Domain types and pure logic for the cost calculator.

pub mod app_state;
pub mod entities;
pub mod input;

pub use app_state::{AppState, CalcOutcome, HullList};
pub use entities::{
    name_order, sort_by_name, Breakdown, CategoryId, CostTotals, GroupId, JobParams,
    ManufacturingQuote, MaterialRow, NamedItem, TypeId,
};
