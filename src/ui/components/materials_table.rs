use dioxus::prelude::*;

use super::kpi_card::KpiCard;
use crate::domain::{Breakdown, MaterialRow};
use crate::util::format::{format_isk, format_optional_isk, format_quantity};

#[derive(Clone, Debug, PartialEq)]
struct RowView {
    /// Position in the table; two quote entries may share a type id.
    key: usize,
    id: String,
    name: String,
    quantity: String,
    cost_per_unit: String,
    cost: String,
}

impl RowView {
    fn new(key: usize, row: MaterialRow) -> Self {
        Self {
            key,
            id: row.id.to_string(),
            name: row.name,
            quantity: format_quantity(row.quantity),
            cost_per_unit: format_optional_isk(row.cost_per_unit),
            cost: format_optional_isk(row.cost),
        }
    }
}

fn row_views(rows: Vec<MaterialRow>) -> Vec<RowView> {
    rows.into_iter()
        .enumerate()
        .map(|(key, row)| RowView::new(key, row))
        .collect()
}

#[component]
pub fn MaterialsTable(rows: Vec<MaterialRow>) -> Element {
    let views = row_views(rows);
    let is_empty = views.is_empty();
    rsx! {
        table {
            class: "materials",
            thead {
                tr {
                    th { "Material" }
                    th { "Type ID" }
                    th { "Qty" }
                    th { "ISK / unit" }
                    th { "Total ISK" }
                }
            }
            tbody {
                for view in views {
                    tr {
                        key: "{view.key}",
                        td { "{view.name}" }
                        td { "{view.id}" }
                        td { class: "num", "{view.quantity}" }
                        td { class: "num", "{view.cost_per_unit}" }
                        td { class: "num", "{view.cost}" }
                    }
                }
                if is_empty {
                    tr {
                        td { colspan: "5", class: "muted", "The quote lists no materials." }
                    }
                }
            }
        }
    }
}

#[component]
pub fn BreakdownView(breakdown: Breakdown) -> Element {
    let title = breakdown.title();
    let params = breakdown.params;
    let material_total = format!("{} ISK", format_isk(breakdown.totals.material));
    let job_total = format!("{} ISK", format_isk(breakdown.totals.job));
    let grand_total = format!("{} ISK", format_isk(breakdown.totals.total));
    let raw = serde_json::to_string_pretty(&breakdown.raw)
        .unwrap_or_else(|_| breakdown.raw.to_string());

    rsx! {
        section {
            class: "panel",
            div {
                strong { "{title}" }
                span { class: "pill", "ME {params.me}" }
                span { class: "pill", "TE {params.te}" }
            }
            MaterialsTable { rows: breakdown.rows.clone() }
            div {
                class: "totals",
                KpiCard {
                    title: "Material cost".to_string(),
                    value: material_total,
                    description: Some("From the pricing API".to_string()),
                }
                KpiCard {
                    title: "Job cost".to_string(),
                    value: job_total,
                }
                KpiCard {
                    title: "Total".to_string(),
                    value: grand_total,
                }
            }
        }
        details {
            class: "panel",
            summary { class: "muted", "Raw response" }
            pre { class: "raw", "{raw}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, name: &str) -> MaterialRow {
        MaterialRow {
            id,
            name: name.into(),
            quantity: 1.0,
            cost_per_unit: None,
            cost: None,
        }
    }

    #[test]
    fn rows_sharing_a_type_id_get_distinct_keys() {
        let views = row_views(vec![row(34, "Tritanium"), row(34, "Tritanium"), row(35, "Pyerite")]);
        let keys: Vec<_> = views.iter().map(|v| v.key).collect();
        assert_eq!(keys, [0, 1, 2]);
        assert_eq!(views[1].id, "34");
        assert_eq!(views[0].cost, "—");
    }
}
