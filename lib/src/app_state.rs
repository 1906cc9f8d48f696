use crate::http_gateway::HttpGateway;
use sqlx::{Pool, Postgres};

#[derive(Clone)]
pub struct AppState {
    pub postgres_pool: Pool<Postgres>,
    pub http_gateway: HttpGateway,
}
