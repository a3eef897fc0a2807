//! CheckAccessHandler - Query handler behind the access guard.
//!
//! Runs on every guarded request, so it only loads the snapshot and
//! evaluates it; no health classification or view building.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::ResellerId;
use crate::domain::subscription::{evaluate_access, AccessDecision, SubscriptionError};
use crate::ports::ResellerReader;

/// Query to check whether a reseller may use protected views on `today`.
#[derive(Debug, Clone)]
pub struct CheckAccessQuery {
    pub reseller_id: ResellerId,
    pub today: NaiveDate,
}

pub struct CheckAccessHandler {
    reader: Arc<dyn ResellerReader>,
}

impl CheckAccessHandler {
    pub fn new(reader: Arc<dyn ResellerReader>) -> Self {
        Self { reader }
    }

    /// # Errors
    ///
    /// - `ResellerNotFound` if the reseller does not exist
    /// - `Infrastructure` if the snapshot could not be loaded
    pub async fn handle(&self, query: CheckAccessQuery) -> Result<AccessDecision, SubscriptionError> {
        let snapshot = self
            .reader
            .get_snapshot(&query.reseller_id)
            .await?
            .ok_or_else(|| SubscriptionError::reseller_not_found(query.reseller_id))?;

        Ok(evaluate_access(&snapshot, query.today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryResellerReader;
    use crate::domain::subscription::{AccountStatus, BlockReason, ResellerSnapshot};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 20).unwrap()
    }

    #[tokio::test]
    async fn evaluates_stored_snapshot() {
        let reader = Arc::new(InMemoryResellerReader::new());
        let reseller = ResellerSnapshot {
            id: ResellerId::new(),
            is_admin: false,
            is_active: false,
            subscription_expiry_date: Some(today()),
            account_status: AccountStatus::Active,
        };
        reader.upsert(reseller.clone()).await;
        let handler = CheckAccessHandler::new(reader);

        let decision = handler
            .handle(CheckAccessQuery {
                reseller_id: reseller.id,
                today: today(),
            })
            .await
            .unwrap();

        assert_eq!(decision, AccessDecision::Blocked(BlockReason::AccountDisabled));
    }

    #[tokio::test]
    async fn unknown_reseller_is_not_found() {
        let handler = CheckAccessHandler::new(Arc::new(InMemoryResellerReader::new()));

        let result = handler
            .handle(CheckAccessQuery {
                reseller_id: ResellerId::new(),
                today: today(),
            })
            .await;

        assert!(matches!(result, Err(SubscriptionError::ResellerNotFound(_))));
    }
}
