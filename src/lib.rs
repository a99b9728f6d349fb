pub mod classroom;
pub mod clock;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
