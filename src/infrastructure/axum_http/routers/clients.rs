use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::usecases::clients::ClientUseCase,
    auth::AuthUser,
    domain::{repositories::clients::ClientRepository, value_objects::clients::SaveClientModel},
    infrastructure::{
        axum_http::error_responses::AppError,
        postgres::{postgres_connection::PgPoolSquad, repositories::clients::ClientPostgres},
    },
};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let client_repository = ClientPostgres::new(Arc::clone(&db_pool));
    let client_usecase = ClientUseCase::new(Arc::new(client_repository));

    Router::new()
        .route("/", post(create_client))
        .route("/", get(list_clients))
        .route("/search", get(search_clients))
        .route("/:client_id", get(get_client))
        .route("/:client_id", put(update_client))
        .route("/:client_id", delete(delete_client))
        .with_state(Arc::new(client_usecase))
}

pub async fn create_client<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    auth: AuthUser,
    Json(save_client_model): Json<SaveClientModel>,
) -> Result<impl IntoResponse, AppError>
where
    C: ClientRepository + Send + Sync + 'static,
{
    let client_id = client_usecase
        .create(auth.user_id, save_client_model)
        .await?;

    Ok((StatusCode::CREATED, Json(client_id)))
}

pub async fn list_clients<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError>
where
    C: ClientRepository + Send + Sync + 'static,
{
    let clients = client_usecase.list(auth.user_id).await?;
    Ok(Json(clients))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn search_clients<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    auth: AuthUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError>
where
    C: ClientRepository + Send + Sync + 'static,
{
    let clients = client_usecase.search(auth.user_id, &query.q).await?;
    Ok(Json(clients))
}

pub async fn get_client<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    auth: AuthUser,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    C: ClientRepository + Send + Sync + 'static,
{
    let client = client_usecase.get(auth.user_id, client_id).await?;
    Ok(Json(client))
}

pub async fn update_client<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    auth: AuthUser,
    Path(client_id): Path<Uuid>,
    Json(save_client_model): Json<SaveClientModel>,
) -> Result<impl IntoResponse, AppError>
where
    C: ClientRepository + Send + Sync + 'static,
{
    client_usecase
        .update(auth.user_id, client_id, save_client_model)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_client<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    auth: AuthUser,
    Path(client_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError>
where
    C: ClientRepository + Send + Sync + 'static,
{
    client_usecase.delete(auth.user_id, client_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
