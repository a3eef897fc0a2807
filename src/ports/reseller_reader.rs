//! Reseller reader port (read side).
//!
//! Reseller rows are owned by the platform backend; this service only reads
//! the fields subscription access depends on.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ResellerId};
use crate::domain::subscription::ResellerSnapshot;

/// Read-only access to reseller subscription snapshots.
#[async_trait]
pub trait ResellerReader: Send + Sync {
    /// Loads the snapshot for one reseller.
    ///
    /// Returns `None` if the reseller does not exist.
    async fn get_snapshot(&self, id: &ResellerId) -> Result<Option<ResellerSnapshot>, DomainError>;

    /// Active resellers whose subscription expires on one of `expiry_dates`.
    ///
    /// Used by the expiry poller to find reminder candidates. Rows without an
    /// expiry date and inactive resellers are never returned.
    async fn find_active_expiring_on(
        &self,
        expiry_dates: &[NaiveDate],
    ) -> Result<Vec<ResellerSnapshot>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reseller_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn ResellerReader) {}
    }
}
