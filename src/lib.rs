pub mod ads;
pub mod auth;
pub mod boost;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod listing;
pub mod query;
pub mod routes;
pub mod scheduler;
pub mod state;
pub mod storage;
