use crate::infra::axum::AppJson;
use crate::infra::error::AppError;
use axum::extract::State;
use axum::routing::post;
use axum::Router;
use destination_relay::app_state::AppState;
use destination_relay::destination::{Headers, NewDestination};
use destination_relay::forwarder::Forwarder;
use destination_relay::token::AccessTokenRepository;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct PostmanRoutes;

impl PostmanRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new().route("/", post(postman_handler))
    }
}

#[derive(Deserialize)]
struct PostmanRequest {
    url: String,
    http_method: String,
    headers: Option<Headers>,
    params: Option<Value>,
}

/// Ad-hoc forward of a single request, without persisting anything. The
/// endpoint itself needs no login, but an `Authorization` entry inside the
/// submitted headers must name a known token.
async fn postman_handler(
    State(app_state): State<AppState>,
    AppJson(request): AppJson<PostmanRequest>,
) -> Result<AppJson<Value>, AppError> {
    let new_destination = NewDestination {
        url: request.url,
        http_method: request.http_method,
        headers: request.headers,
    };
    new_destination.validate()?;

    AccessTokenRepository::verify_embedded_authorization(&app_state.postgres_pool, new_destination.headers.as_ref()).await?;

    let params = request.params.unwrap_or(json!({}));
    let result = Forwarder::forward(
        &app_state.http_gateway,
        &new_destination.url,
        &new_destination.http_method,
        new_destination.headers.as_ref(),
        &params,
    )
    .await?;

    Ok(AppJson(json!({ "result": result })))
}
