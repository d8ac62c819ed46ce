pub mod client;
pub mod config;
pub mod routes;
mod tls;

pub use client::{ClientError, HttpClient, check_status_code};
pub use config::ClientConfig;
pub use routes::{EndpointRoutes, Service};
