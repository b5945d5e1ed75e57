use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::payments::PaymentEntity,
    repositories::payments::PaymentRepository,
    value_objects::{
        enums::payment_statuses::PaymentStatus,
        payments::{DEFAULT_PAGE_SIZE, ListPaymentsFilter, MAX_PAGE_SIZE},
    },
};

#[derive(Debug, Error)]
pub enum PaymentDashboardError {
    #[error("payment not found")]
    NotFound,
    #[error("payment is not pending (current status: {current})")]
    NotPending { current: String },
    #[error("failed to update the payment")]
    Internal(#[source] anyhow::Error),
}

/// Read side and manual actions of the dashboard: filtered listing plus the
/// operator-driven transitions (settle, cancel, sent markers, delete). The
/// pending guard lives in the store as a conditional update, so an operator
/// action racing a webhook can never clobber a gateway-reported status.
pub struct PaymentDashboardUseCase<P>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_repository: Arc<P>,
}

impl<P> PaymentDashboardUseCase<P>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    pub fn new(payment_repository: Arc<P>) -> Self {
        Self { payment_repository }
    }

    pub async fn list(
        &self,
        owner_id: Uuid,
        filter: ListPaymentsFilter,
    ) -> Result<Vec<PaymentEntity>, PaymentDashboardError> {
        let filter = normalize_filter(filter);
        self.payment_repository
            .list(owner_id, &filter)
            .await
            .map_err(|err| {
                error!(%owner_id, db_error = ?err, "payment_dashboard: listing failed");
                PaymentDashboardError::Internal(err)
            })
    }

    pub async fn get(
        &self,
        owner_id: Uuid,
        payment_id: Uuid,
    ) -> Result<PaymentEntity, PaymentDashboardError> {
        self.payment_repository
            .find_by_id(payment_id, owner_id)
            .await
            .map_err(PaymentDashboardError::Internal)?
            .ok_or(PaymentDashboardError::NotFound)
    }

    pub async fn settle(
        &self,
        owner_id: Uuid,
        payment_id: Uuid,
    ) -> Result<(), PaymentDashboardError> {
        self.transition(owner_id, payment_id, PaymentStatus::Settled)
            .await
    }

    pub async fn cancel(
        &self,
        owner_id: Uuid,
        payment_id: Uuid,
    ) -> Result<(), PaymentDashboardError> {
        self.transition(owner_id, payment_id, PaymentStatus::Cancelled)
            .await
    }

    async fn transition(
        &self,
        owner_id: Uuid,
        payment_id: Uuid,
        to_status: PaymentStatus,
    ) -> Result<(), PaymentDashboardError> {
        let changed = self
            .payment_repository
            .transition_from_pending(payment_id, owner_id, to_status.to_string())
            .await
            .map_err(|err| {
                error!(
                    %owner_id,
                    %payment_id,
                    db_error = ?err,
                    "payment_dashboard: transition failed"
                );
                PaymentDashboardError::Internal(err)
            })?;

        if changed > 0 {
            info!(%owner_id, %payment_id, status = %to_status, "payment_dashboard: payment updated");
            return Ok(());
        }

        // Zero rows: either the payment is gone or it already left pending.
        let current = self.get(owner_id, payment_id).await?;
        warn!(
            %owner_id,
            %payment_id,
            current_status = %current.status,
            "payment_dashboard: transition rejected, payment is not pending"
        );
        Err(PaymentDashboardError::NotPending {
            current: current.status,
        })
    }

    pub async fn mark_link_sent(
        &self,
        owner_id: Uuid,
        payment_id: Uuid,
    ) -> Result<(), PaymentDashboardError> {
        let changed = self
            .payment_repository
            .mark_link_sent(payment_id, owner_id, Utc::now())
            .await
            .map_err(PaymentDashboardError::Internal)?;
        if changed == 0 {
            // Already marked is fine; a missing payment is not.
            self.get(owner_id, payment_id).await?;
        }
        Ok(())
    }

    pub async fn mark_charge_sent(
        &self,
        owner_id: Uuid,
        payment_id: Uuid,
    ) -> Result<(), PaymentDashboardError> {
        let changed = self
            .payment_repository
            .mark_charge_sent(payment_id, owner_id, Utc::now())
            .await
            .map_err(PaymentDashboardError::Internal)?;
        if changed == 0 {
            self.get(owner_id, payment_id).await?;
        }
        Ok(())
    }

    pub async fn delete(
        &self,
        owner_id: Uuid,
        payment_id: Uuid,
    ) -> Result<(), PaymentDashboardError> {
        let deleted = self
            .payment_repository
            .delete(payment_id, owner_id)
            .await
            .map_err(|err| {
                error!(%owner_id, %payment_id, db_error = ?err, "payment_dashboard: delete failed");
                PaymentDashboardError::Internal(err)
            })?;
        if deleted == 0 {
            return Err(PaymentDashboardError::NotFound);
        }
        info!(%owner_id, %payment_id, "payment_dashboard: payment deleted");
        Ok(())
    }
}

/// Clamps the page size, lowercases the name prefix and drops the live-date
/// bounds whenever a prefix is present, so the store always sees a filter in
/// canonical form.
fn normalize_filter(mut filter: ListPaymentsFilter) -> ListPaymentsFilter {
    if filter.limit <= 0 {
        filter.limit = DEFAULT_PAGE_SIZE;
    }
    filter.limit = filter.limit.min(MAX_PAGE_SIZE);

    filter.client_name_prefix = filter
        .client_name_prefix
        .as_deref()
        .map(|prefix| prefix.trim().to_lowercase())
        .filter(|prefix| !prefix.is_empty());

    if filter.client_name_prefix.is_some() {
        filter.live_date_from = None;
        filter.live_date_to = None;
    }

    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    use crate::domain::repositories::payments::MockPaymentRepository;

    fn sample_payment(id: Uuid, owner_id: Uuid, status: &str) -> PaymentEntity {
        PaymentEntity {
            id,
            owner_id,
            client_id: Uuid::new_v4(),
            client_name: "Maria".to_string(),
            client_name_lowercase: "maria".to_string(),
            whatsapp: "11999990000".to_string(),
            instagram: None,
            amount_minor: 15000,
            description: "Aula".to_string(),
            live_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status: status.to_string(),
            payment_link: "https://gateway.test/checkout/abc".to_string(),
            gateway_metadata: None,
            link_sent_at: None,
            charge_sent_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn settle_updates_a_pending_payment() {
        let owner_id = Uuid::new_v4();
        let payment_id = Uuid::new_v4();

        let mut repo = MockPaymentRepository::new();
        repo.expect_transition_from_pending()
            .with(eq(payment_id), eq(owner_id), eq("settled".to_string()))
            .returning(|_, _, _| Box::pin(async { Ok(1) }));

        let usecase = PaymentDashboardUseCase::new(Arc::new(repo));
        usecase.settle(owner_id, payment_id).await.unwrap();
    }

    #[tokio::test]
    async fn settle_of_an_approved_payment_is_rejected() {
        let owner_id = Uuid::new_v4();
        let payment_id = Uuid::new_v4();

        let mut repo = MockPaymentRepository::new();
        repo.expect_transition_from_pending()
            .returning(|_, _, _| Box::pin(async { Ok(0) }));
        repo.expect_find_by_id().returning(move |id, owner| {
            Box::pin(async move { Ok(Some(sample_payment(id, owner, "approved"))) })
        });

        let usecase = PaymentDashboardUseCase::new(Arc::new(repo));
        let err = usecase.settle(owner_id, payment_id).await.unwrap_err();
        assert!(
            matches!(err, PaymentDashboardError::NotPending { ref current } if current == "approved")
        );
    }

    #[tokio::test]
    async fn cancel_of_a_missing_payment_is_not_found() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_transition_from_pending()
            .returning(|_, _, _| Box::pin(async { Ok(0) }));
        repo.expect_find_by_id()
            .returning(|_, _| Box::pin(async { Ok(None) }));

        let usecase = PaymentDashboardUseCase::new(Arc::new(repo));
        let err = usecase
            .cancel(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentDashboardError::NotFound));
    }

    #[tokio::test]
    async fn repeated_link_sent_marks_are_noops() {
        let owner_id = Uuid::new_v4();
        let payment_id = Uuid::new_v4();

        let mut repo = MockPaymentRepository::new();
        repo.expect_mark_link_sent()
            .returning(|_, _, _| Box::pin(async { Ok(0) }));
        repo.expect_find_by_id().returning(move |id, owner| {
            Box::pin(async move {
                let mut payment = sample_payment(id, owner, "pending");
                payment.link_sent_at = Some(Utc::now());
                Ok(Some(payment))
            })
        });

        let usecase = PaymentDashboardUseCase::new(Arc::new(repo));
        usecase.mark_link_sent(owner_id, payment_id).await.unwrap();
    }

    #[tokio::test]
    async fn listing_normalizes_the_filter_before_the_store_sees_it() {
        let owner_id = Uuid::new_v4();

        let mut repo = MockPaymentRepository::new();
        repo.expect_list()
            .withf(|_, filter| {
                filter.limit == MAX_PAGE_SIZE
                    && filter.client_name_prefix.as_deref() == Some("mar")
                    && filter.live_date_from.is_none()
                    && filter.live_date_to.is_none()
            })
            .returning(|_, _| Box::pin(async { Ok(vec![]) }));

        let usecase = PaymentDashboardUseCase::new(Arc::new(repo));
        let filter = ListPaymentsFilter {
            client_name_prefix: Some("  Mar ".to_string()),
            live_date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            live_date_to: NaiveDate::from_ymd_opt(2024, 12, 31),
            limit: 5000,
            ..Default::default()
        };
        usecase.list(owner_id, filter).await.unwrap();
    }

    #[tokio::test]
    async fn zero_limit_falls_back_to_the_default_page_size() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_list()
            .withf(|_, filter| filter.limit == DEFAULT_PAGE_SIZE)
            .returning(|_, _| Box::pin(async { Ok(vec![]) }));

        let usecase = PaymentDashboardUseCase::new(Arc::new(repo));
        usecase
            .list(Uuid::new_v4(), ListPaymentsFilter::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deleting_a_missing_payment_is_not_found() {
        let mut repo = MockPaymentRepository::new();
        repo.expect_delete()
            .returning(|_, _| Box::pin(async { Ok(0) }));

        let usecase = PaymentDashboardUseCase::new(Arc::new(repo));
        let err = usecase
            .delete(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentDashboardError::NotFound));
    }
}
