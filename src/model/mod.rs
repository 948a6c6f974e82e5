//! Data model for fixture rows and the table they live in

mod schema;
mod table;

pub use schema::{Column, TableRef, TableSchema, COLUMNS, COLUMN_COUNT, CQL_TYPE};
pub use table::{Dataset, Row};
