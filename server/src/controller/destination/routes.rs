use crate::infra::auth::AuthenticatedUser;
use crate::infra::axum::AppJson;
use crate::infra::error::AppError;
use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::Router;
use destination_relay::app_state::AppState;
use destination_relay::destination::{Destination, NewDestination};
use destination_relay::destination_repository::DestinationRepository;
use destination_relay::runner::{BatchResult, DestinationRunner};
use destination_relay::token::AccessTokenRepository;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

pub struct DestinationRoutes;

impl DestinationRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route("/create", post(create_handler))
            .route("/view", get(view_handler))
            .route("/detail", get(detail_handler))
            .route("/edit", post(edit_handler))
            .route("/delete", get(delete_handler))
            .route("/run", get(run_handler))
    }
}

#[derive(Deserialize)]
struct EditDestinationRequest {
    id: Uuid,
    #[serde(flatten)]
    destination: NewDestination,
}

#[derive(Deserialize)]
struct IdQuery {
    id: Uuid,
}

#[derive(Deserialize)]
struct RunQuery {
    params: Option<String>,
}

async fn create_handler(
    State(app_state): State<AppState>,
    AuthenticatedUser(owner_id): AuthenticatedUser,
    AppJson(new_destination): AppJson<NewDestination>,
) -> Result<AppJson<Value>, AppError> {
    new_destination.validate()?;
    AccessTokenRepository::verify_embedded_authorization(&app_state.postgres_pool, new_destination.headers.as_ref()).await?;

    DestinationRepository::insert(&app_state.postgres_pool, owner_id, &new_destination).await?;

    Ok(AppJson(json!({ "message": "Destination created" })))
}

async fn view_handler(
    State(app_state): State<AppState>,
    AuthenticatedUser(owner_id): AuthenticatedUser,
) -> Result<AppJson<Vec<Destination>>, AppError> {
    let destinations = DestinationRepository::list_by_owner(&app_state.postgres_pool, owner_id).await?;
    Ok(AppJson(destinations))
}

async fn detail_handler(
    State(app_state): State<AppState>,
    AuthenticatedUser(owner_id): AuthenticatedUser,
    Query(query): Query<IdQuery>,
) -> Result<AppJson<Vec<Destination>>, AppError> {
    let destination = DestinationRepository::find_by_id(&app_state.postgres_pool, owner_id, query.id).await?;
    Ok(AppJson(destination.into_iter().collect()))
}

async fn edit_handler(
    State(app_state): State<AppState>,
    AuthenticatedUser(owner_id): AuthenticatedUser,
    AppJson(request): AppJson<EditDestinationRequest>,
) -> Result<AppJson<Value>, AppError> {
    request.destination.validate()?;
    AccessTokenRepository::verify_embedded_authorization(&app_state.postgres_pool, request.destination.headers.as_ref()).await?;

    DestinationRepository::update(&app_state.postgres_pool, owner_id, request.id, &request.destination).await?;

    Ok(AppJson(json!({ "message": "Destination updated" })))
}

async fn delete_handler(
    State(app_state): State<AppState>,
    AuthenticatedUser(owner_id): AuthenticatedUser,
    Query(query): Query<IdQuery>,
) -> Result<AppJson<Value>, AppError> {
    DestinationRepository::delete(&app_state.postgres_pool, owner_id, query.id).await?;
    Ok(AppJson(json!({ "message": "Destination deleted" })))
}

async fn run_handler(
    State(app_state): State<AppState>,
    AuthenticatedUser(owner_id): AuthenticatedUser,
    Query(query): Query<RunQuery>,
) -> Result<AppJson<BatchResult>, AppError> {
    let params = match query.params {
        Some(raw) => serde_json::from_str::<Value>(&raw).map_err(|_| AppError::bad_request("Invalid params"))?,
        None => json!({}),
    };

    if !params.is_object() {
        return Err(AppError::bad_request("Invalid params"));
    }

    let batch_result = DestinationRunner::run_all(&app_state, owner_id, params).await?;
    Ok(AppJson(batch_result))
}
