pub mod kpi_card;
pub mod materials_table;
pub mod toast;
