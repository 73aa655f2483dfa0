pub mod aggregate;
pub mod cli;
pub mod error;
pub mod github;
pub mod models;
pub mod pagination;
pub mod server;
pub mod service;
pub mod transport;
pub mod types;
