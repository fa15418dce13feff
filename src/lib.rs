#![doc = "The `taskledger` library crate."]
#![doc = ""]
#![doc = "Authentication (password hashing, token issuance, the token-checking middleware),"]
#![doc = "the user and task stores, routing and error handling for the taskledger API."]
#![doc = "The binary (`main.rs`) only reads configuration, picks a store and starts the server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
