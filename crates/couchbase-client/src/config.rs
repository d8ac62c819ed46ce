use std::path::PathBuf;

use serde::Deserialize;

use crate::routes::EndpointRoutes;

pub const DEFAULT_PORT: u16 = 8091;
pub const DEFAULT_QUERY_PORT: u16 = 8093;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for a Couchbase node.
///
/// Every field has a default, so the struct can be embedded in a larger
/// integration config and only the relevant keys need to be set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub hostname: String,
    /// Cluster manager (admin REST API) port.
    pub port: u16,
    /// Query service port.
    pub query_port: u16,
    pub username: String,
    pub password: String,
    pub use_ssl: bool,
    /// Directory of PEM files used as the only trusted roots when `use_ssl` is set.
    pub ca_bundle_dir: Option<PathBuf>,
    /// Single PEM file used as the only trusted roots when `use_ssl` is set.
    pub ca_bundle_file: Option<PathBuf>,
    /// Per-request timeout in seconds; 0 means no timeout.
    pub timeout: u64,
    pub routes: EndpointRoutes,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: DEFAULT_PORT,
            query_port: DEFAULT_QUERY_PORT,
            username: String::new(),
            password: String::new(),
            use_ssl: false,
            ca_bundle_dir: None,
            ca_bundle_file: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            routes: EndpointRoutes::default(),
        }
    }
}
