use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::usecases::payment_dashboard::PaymentDashboardUseCase,
    auth::AuthUser,
    domain::{
        repositories::payments::PaymentRepository,
        value_objects::payments::{ListPaymentsFilter, PaymentsCursor},
    },
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{postgres_connection::PgPoolSquad, repositories::payments::PaymentPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let payment_repository = PaymentPostgres::new(Arc::clone(&db_pool));
    let payment_dashboard_usecase = PaymentDashboardUseCase::new(Arc::new(payment_repository));

    Router::new()
        .route("/", get(list_payments))
        .route("/:payment_id", get(get_payment))
        .route("/:payment_id", delete(delete_payment))
        .route("/:payment_id/settle", post(settle_payment))
        .route("/:payment_id/cancel", post(cancel_payment))
        .route("/:payment_id/link-sent", post(mark_link_sent))
        .route("/:payment_id/charge-sent", post(mark_charge_sent))
        .with_state(Arc::new(payment_dashboard_usecase))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsQuery {
    pub status: Option<String>,
    pub client_name_prefix: Option<String>,
    pub live_date_from: Option<NaiveDate>,
    pub live_date_to: Option<NaiveDate>,
    pub cursor_created_at: Option<DateTime<Utc>>,
    pub cursor_id: Option<Uuid>,
    pub limit: Option<i64>,
}

impl ListPaymentsQuery {
    fn into_filter(self) -> ListPaymentsFilter {
        // Both halves of the cursor are required for it to take effect.
        let cursor = self
            .cursor_created_at
            .zip(self.cursor_id)
            .map(|(created_at, id)| PaymentsCursor { created_at, id });

        ListPaymentsFilter {
            status: self.status,
            client_name_prefix: self.client_name_prefix,
            live_date_from: self.live_date_from,
            live_date_to: self.live_date_to,
            cursor,
            limit: self.limit.unwrap_or_default(),
        }
    }
}

pub async fn list_payments<P>(
    State(payment_dashboard_usecase): State<Arc<PaymentDashboardUseCase<P>>>,
    auth: AuthUser,
    Query(query): Query<ListPaymentsQuery>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    let payments = payment_dashboard_usecase
        .list(auth.user_id, query.into_filter())
        .await?;
    Ok(Json(payments))
}

pub async fn get_payment<P>(
    State(payment_dashboard_usecase): State<Arc<PaymentDashboardUseCase<P>>>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    let payment = payment_dashboard_usecase
        .get(auth.user_id, payment_id)
        .await?;
    Ok(Json(payment))
}

pub async fn settle_payment<P>(
    State(payment_dashboard_usecase): State<Arc<PaymentDashboardUseCase<P>>>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_dashboard_usecase
        .settle(auth.user_id, payment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn cancel_payment<P>(
    State(payment_dashboard_usecase): State<Arc<PaymentDashboardUseCase<P>>>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_dashboard_usecase
        .cancel(auth.user_id, payment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_link_sent<P>(
    State(payment_dashboard_usecase): State<Arc<PaymentDashboardUseCase<P>>>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_dashboard_usecase
        .mark_link_sent(auth.user_id, payment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn mark_charge_sent<P>(
    State(payment_dashboard_usecase): State<Arc<PaymentDashboardUseCase<P>>>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_dashboard_usecase
        .mark_charge_sent(auth.user_id, payment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_payment<P>(
    State(payment_dashboard_usecase): State<Arc<PaymentDashboardUseCase<P>>>,
    auth: AuthUser,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    P: PaymentRepository + Send + Sync + 'static,
{
    payment_dashboard_usecase
        .delete(auth.user_id, payment_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
