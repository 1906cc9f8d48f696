use crate::controller::destination::routes::DestinationRoutes;
use crate::controller::health::routes::HealthRoutes;
use crate::controller::postman::routes::PostmanRoutes;
use axum::http::header::AUTHORIZATION;
use axum::Router;
use destination_relay::app_state::AppState;
use std::iter::once;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;

pub struct Routes;

impl Routes {
    pub async fn routes(app_state: &AppState) -> Router {
        Router::new()
            .nest("/health", HealthRoutes::routes())
            .nest("/destinations", DestinationRoutes::routes())
            .nest("/postman", PostmanRoutes::routes())
            .layer(CatchPanicLayer::new())
            .layer(SetSensitiveRequestHeadersLayer::new(once(AUTHORIZATION)))
            .with_state(app_state.clone())
    }
}
