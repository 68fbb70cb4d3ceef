pub mod record;
pub mod table;

pub use record::{SalesRecord, REQUIRED_COLUMNS};
pub use table::{Group, Rate, SalesTable, SalesView, YEAR_RANGE};
