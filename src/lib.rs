pub mod app;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod infra;
pub mod logging;
pub mod server;
pub mod startup;
pub mod state;
pub mod types;
