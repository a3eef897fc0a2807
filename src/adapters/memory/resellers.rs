//! In-memory reseller reader.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ResellerId};
use crate::domain::subscription::ResellerSnapshot;
use crate::ports::ResellerReader;

/// Reseller snapshots held in a map.
#[derive(Default)]
pub struct InMemoryResellerReader {
    resellers: RwLock<HashMap<ResellerId, ResellerSnapshot>>,
    unavailable: AtomicBool,
}

impl InMemoryResellerReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a snapshot.
    pub async fn upsert(&self, snapshot: ResellerSnapshot) {
        self.resellers.write().await.insert(snapshot.id, snapshot);
    }

    /// Makes every read fail, simulating a lost database connection.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "reseller store unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ResellerReader for InMemoryResellerReader {
    async fn get_snapshot(&self, id: &ResellerId) -> Result<Option<ResellerSnapshot>, DomainError> {
        self.check_available()?;
        Ok(self.resellers.read().await.get(id).cloned())
    }

    async fn find_active_expiring_on(
        &self,
        expiry_dates: &[NaiveDate],
    ) -> Result<Vec<ResellerSnapshot>, DomainError> {
        self.check_available()?;
        let resellers = self.resellers.read().await;
        let mut matches: Vec<_> = resellers
            .values()
            .filter(|r| r.is_active)
            .filter(|r| {
                r.subscription_expiry_date
                    .map(|d| expiry_dates.contains(&d))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        matches.sort_by_key(|r| (r.subscription_expiry_date, r.id));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::AccountStatus;

    fn snapshot(expiry: Option<NaiveDate>, active: bool) -> ResellerSnapshot {
        ResellerSnapshot {
            id: ResellerId::new(),
            is_admin: false,
            is_active: active,
            subscription_expiry_date: expiry,
            account_status: AccountStatus::Active,
        }
    }

    #[tokio::test]
    async fn expiring_lookup_skips_inactive_and_undated() {
        let target = NaiveDate::from_ymd_opt(2024, 8, 8).unwrap();
        let reader = InMemoryResellerReader::new();
        let wanted = snapshot(Some(target), true);
        reader.upsert(wanted.clone()).await;
        reader.upsert(snapshot(Some(target), false)).await;
        reader.upsert(snapshot(None, true)).await;

        let found = reader.find_active_expiring_on(&[target]).await.unwrap();

        assert_eq!(found, vec![wanted]);
    }

    #[tokio::test]
    async fn unavailable_store_fails_reads() {
        let reader = InMemoryResellerReader::new();
        reader.set_unavailable(true);

        let err = reader.get_snapshot(&ResellerId::new()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
