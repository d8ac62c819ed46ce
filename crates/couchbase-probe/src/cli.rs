use std::path::PathBuf;

use clap::Parser;
use couchbase_client::{ClientConfig, EndpointRoutes};
use couchbase_client::config::{DEFAULT_PORT, DEFAULT_QUERY_PORT, DEFAULT_TIMEOUT_SECS};

const DEFAULT_ENDPOINT: &str = "/pools/default";

#[derive(Debug, Parser)]
#[command(
    name = "couchbase-probe",
    about = "Fetch JSON from a Couchbase node's admin and query REST APIs"
)]
pub struct Cli {
    /// Couchbase node to connect to.
    #[arg(long, env = "COUCHBASE_HOSTNAME", default_value = "localhost")]
    pub hostname: String,

    /// Cluster manager (admin REST API) port.
    #[arg(long, env = "COUCHBASE_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Query service port.
    #[arg(long, env = "COUCHBASE_QUERY_PORT", default_value_t = DEFAULT_QUERY_PORT)]
    pub query_port: u16,

    #[arg(long, env = "COUCHBASE_USERNAME", default_value = "")]
    pub username: String,

    #[arg(long, env = "COUCHBASE_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Connect over HTTPS.
    #[arg(long, env = "COUCHBASE_USE_SSL")]
    pub use_ssl: bool,

    /// Directory of PEM files to trust instead of the system roots.
    #[arg(long, env = "COUCHBASE_CA_BUNDLE_DIR")]
    pub ca_bundle_dir: Option<PathBuf>,

    /// PEM file to trust instead of the system roots.
    #[arg(long, env = "COUCHBASE_CA_BUNDLE_FILE")]
    pub ca_bundle_file: Option<PathBuf>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "COUCHBASE_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Host name to use in place of --hostname when building URLs.
    #[arg(long, env = "COUCHBASE_HOSTNAME_OVERRIDE")]
    pub hostname_override: Option<String>,

    /// Path prefix served by the admin port; repeat to replace the built-in list.
    /// `/` sends every otherwise unmatched endpoint to the admin port.
    #[arg(long = "admin-prefix", value_name = "PREFIX")]
    pub admin_prefixes: Vec<String>,

    /// Path prefix served by the query port; repeat to replace the built-in list.
    #[arg(long = "query-prefix", value_name = "PREFIX")]
    pub query_prefixes: Vec<String>,

    /// Endpoints to fetch, e.g. /pools/default or /admin/vitals.
    #[arg(default_values_t = vec![DEFAULT_ENDPOINT.to_string()])]
    pub endpoints: Vec<String>,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let mut routes = EndpointRoutes::default();
        if !self.admin_prefixes.is_empty() {
            routes.admin_prefixes = self.admin_prefixes.clone();
        }
        if !self.query_prefixes.is_empty() {
            routes.query_prefixes = self.query_prefixes.clone();
        }

        ClientConfig {
            hostname: self.hostname.clone(),
            port: self.port,
            query_port: self.query_port,
            username: self.username.clone(),
            password: self.password.clone(),
            use_ssl: self.use_ssl,
            ca_bundle_dir: self.ca_bundle_dir.clone(),
            ca_bundle_file: self.ca_bundle_file.clone(),
            timeout: self.timeout,
            routes,
        }
    }
}
