//! Reseller account status as stored by the platform backend.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Administrative status of a reseller account.
///
/// Only `Active` and `Trial` permit access. The backend may store values this
/// service does not know about; those are kept verbatim in `Other` so they can
/// be reported back instead of being silently coerced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    Active,
    Trial,
    Suspended,
    Other(String),
}

impl AccountStatus {
    /// Parses a stored status value. Never fails.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "active" => AccountStatus::Active,
            "trial" => AccountStatus::Trial,
            "suspended" => AccountStatus::Suspended,
            _ => AccountStatus::Other(value.trim().to_string()),
        }
    }

    /// Wire/storage representation.
    pub fn as_str(&self) -> &str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Trial => "trial",
            AccountStatus::Suspended => "suspended",
            AccountStatus::Other(value) => value,
        }
    }

    /// Returns true if this status permits access.
    pub fn permits_access(&self) -> bool {
        matches!(self, AccountStatus::Active | AccountStatus::Trial)
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for AccountStatus {
    fn from(value: String) -> Self {
        AccountStatus::parse(&value)
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.as_str().to_string()
    }
}
