//! GetSubscriptionHandler - Query handler for a reseller's subscription view.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::ResellerId;
use crate::domain::subscription::{
    evaluate_access, AccessDecision, AccountStatus, SubscriptionError, SubscriptionHealth,
};
use crate::ports::ResellerReader;

/// Query for one reseller's subscription, evaluated on `today`.
#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub reseller_id: ResellerId,
    pub today: NaiveDate,
}

/// Derived subscription state consumed by the dashboard and the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionInfo {
    pub reseller_id: ResellerId,
    pub is_admin: bool,
    pub is_active: bool,
    pub account_status: AccountStatus,
    pub subscription_health: SubscriptionHealth,
    pub subscription_expiry_date: Option<NaiveDate>,
    pub days_remaining: Option<i64>,
    pub access: AccessDecision,
}

pub struct GetSubscriptionHandler {
    reader: Arc<dyn ResellerReader>,
}

impl GetSubscriptionHandler {
    pub fn new(reader: Arc<dyn ResellerReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: GetSubscriptionQuery,
    ) -> Result<SubscriptionInfo, SubscriptionError> {
        let snapshot = self
            .reader
            .get_snapshot(&query.reseller_id)
            .await?
            .ok_or_else(|| SubscriptionError::reseller_not_found(query.reseller_id))?;

        Ok(SubscriptionInfo {
            reseller_id: snapshot.id,
            is_admin: snapshot.is_admin,
            is_active: snapshot.is_active,
            subscription_health: SubscriptionHealth::classify(
                snapshot.subscription_expiry_date,
                query.today,
            ),
            subscription_expiry_date: snapshot.subscription_expiry_date,
            days_remaining: snapshot.days_remaining(query.today),
            access: evaluate_access(&snapshot, query.today),
            account_status: snapshot.account_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryResellerReader;
    use crate::domain::subscription::{BlockReason, ResellerSnapshot};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    }

    fn snapshot(expiry_in: Option<i64>) -> ResellerSnapshot {
        ResellerSnapshot {
            id: ResellerId::new(),
            is_admin: false,
            is_active: true,
            subscription_expiry_date: expiry_in.map(|d| today() + chrono::Duration::days(d)),
            account_status: AccountStatus::Active,
        }
    }

    async fn handler_with(snapshot: &ResellerSnapshot) -> GetSubscriptionHandler {
        let reader = Arc::new(InMemoryResellerReader::new());
        reader.upsert(snapshot.clone()).await;
        GetSubscriptionHandler::new(reader)
    }

    #[tokio::test]
    async fn expiring_soon_reseller_keeps_access() {
        let reseller = snapshot(Some(3));
        let handler = handler_with(&reseller).await;

        let info = handler
            .handle(GetSubscriptionQuery {
                reseller_id: reseller.id,
                today: today(),
            })
            .await
            .unwrap();

        assert_eq!(info.subscription_health, SubscriptionHealth::ExpiringSoon);
        assert_eq!(info.days_remaining, Some(3));
        assert!(info.access.is_allowed());
    }

    #[tokio::test]
    async fn no_subscription_is_blocked() {
        let reseller = snapshot(None);
        let handler = handler_with(&reseller).await;

        let info = handler
            .handle(GetSubscriptionQuery {
                reseller_id: reseller.id,
                today: today(),
            })
            .await
            .unwrap();

        assert_eq!(info.subscription_health, SubscriptionHealth::NoSubscription);
        assert_eq!(info.days_remaining, None);
        assert_eq!(
            info.access,
            AccessDecision::Blocked(BlockReason::SubscriptionExpired)
        );
    }

    #[tokio::test]
    async fn unknown_reseller_is_not_found() {
        let handler = GetSubscriptionHandler::new(Arc::new(InMemoryResellerReader::new()));

        let result = handler
            .handle(GetSubscriptionQuery {
                reseller_id: ResellerId::new(),
                today: today(),
            })
            .await;

        assert!(matches!(result, Err(SubscriptionError::ResellerNotFound(_))));
    }

    #[tokio::test]
    async fn reader_failure_is_infrastructure_error() {
        let reader = Arc::new(InMemoryResellerReader::new());
        reader.set_unavailable(true);
        let handler = GetSubscriptionHandler::new(reader);

        let result = handler
            .handle(GetSubscriptionQuery {
                reseller_id: ResellerId::new(),
                today: today(),
            })
            .await;

        assert!(matches!(result, Err(SubscriptionError::Infrastructure(_))));
    }
}
