//! retail-etl - Extract, clean and centralise retail business data
//!
//! Raw tables arrive from heterogeneous sources with inconsistent
//! formatting; each source kind has a fixed cleaning pipeline that
//! normalizes sentinel nulls, coerces columns to their proper types,
//! fixes known data-entry typos and de-duplicates, before the result
//! is loaded into a dimensional schema.

pub mod clean;
pub mod config;
pub mod connector;
pub mod error;
pub mod load;
pub mod model;
pub mod report;
pub mod source;

pub use clean::{clean, CleaningResult};
pub use config::Config;
pub use error::CleanError;
pub use model::Table;
pub use source::SourceKind;
