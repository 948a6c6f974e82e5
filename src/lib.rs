//! cqlfixture - synthetic CSV fixtures for CQL tables
//!
//! Generates random four-integer datasets, loads them into a Cassandra/ScyllaDB
//! table and checks that what comes back matches what went in.

pub mod codec;
pub mod config;
pub mod error;
pub mod generate;
pub mod model;
pub mod output;
pub mod store;
pub mod validate;
pub mod workflow;

pub use config::Config;
pub use error::FixtureError;
pub use model::{Dataset, Row, TableRef};
pub use store::Store;
pub use validate::Outcome;
