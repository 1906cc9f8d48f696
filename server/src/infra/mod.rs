pub mod auth;
pub mod axum;
pub mod error;
