pub mod backend;
pub mod config;
pub mod errors;
pub mod listing;
pub mod models;
pub mod server;
pub mod session;
pub mod wizard;
