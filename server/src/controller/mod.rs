pub mod destination;
pub mod health;
pub mod postman;
