pub mod app_state;
pub mod database;
pub mod destination;
pub mod destination_repository;
pub mod environment;
pub mod error;
pub mod forwarder;
pub mod http_gateway;
pub mod runner;
pub mod token;
