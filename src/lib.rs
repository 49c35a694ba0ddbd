pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod push;
pub mod state;
pub mod sync;
