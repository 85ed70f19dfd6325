//! Account record loading and validation

pub mod loader;
pub mod records;

pub use records::{validate_records, AccountRecord, RawRecord};
