pub mod config;
pub mod defaults;
pub mod filter;
pub mod generator;
pub mod logging;
pub mod rows;
pub mod store;
pub mod table;
pub mod week;

pub use filter::{filter_and_sort_tables, FilterResult, TableFilters};
pub use generator::{generate_day_schedule_tables, generate_tables_for_date};
pub use rows::{generate_rows_with_ads, Row};
pub use store::{get_table_by_id, get_table_by_id_with_fallback, DetailHints, ExtendedTableDetails, TableDetailStore};
pub use table::{TableRecord, TableType};
