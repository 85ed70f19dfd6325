//! Validated account records

use crate::error::{LinkageError, Result};
use std::collections::HashMap;

pub const ACCOUNT_ID: &str = "account_id";
pub const DEVICE_ID: &str = "device_id";
pub const IP_ADDRESS: &str = "ip_address";

/// One row as produced by a tabular loader: field name to string value
pub type RawRecord = HashMap<String, String>;

/// An account row whose linkage fields have been checked once.
///
/// Fields are only reachable through getters, so every `AccountRecord` in
/// the crate has a non-blank account id, device id and IP address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    account_id: String,
    device_id: String,
    ip_address: String,
}

impl AccountRecord {
    /// Check the three linkage fields. `row` is only used to identify the
    /// record in errors.
    pub fn new(
        row: usize,
        account_id: impl Into<String>,
        device_id: impl Into<String>,
        ip_address: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            account_id: required(row, ACCOUNT_ID, Some(account_id.into()))?,
            device_id: required(row, DEVICE_ID, Some(device_id.into()))?,
            ip_address: required(row, IP_ADDRESS, Some(ip_address.into()))?,
        })
    }

    /// Validate a raw row
    pub fn from_raw(row: usize, raw: &RawRecord) -> Result<Self> {
        Ok(Self {
            account_id: required(row, ACCOUNT_ID, raw.get(ACCOUNT_ID).cloned())?,
            device_id: required(row, DEVICE_ID, raw.get(DEVICE_ID).cloned())?,
            ip_address: required(row, IP_ADDRESS, raw.get(IP_ADDRESS).cloned())?,
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn ip_address(&self) -> &str {
        &self.ip_address
    }
}

fn required(row: usize, field: &'static str, value: Option<String>) -> Result<String> {
    match value {
        None => Err(LinkageError::missing(row, field)),
        Some(value) if value.trim().is_empty() => Err(LinkageError::empty(row, field)),
        Some(value) => Ok(value),
    }
}

/// Validate every row, stopping at the first malformed one
pub fn validate_records(rows: &[RawRecord]) -> Result<Vec<AccountRecord>> {
    rows.iter()
        .enumerate()
        .map(|(row, raw)| AccountRecord::from_raw(row, raw))
        .collect()
}
