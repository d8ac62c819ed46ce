mod cli;
mod telemetry;

use anyhow::{Context, Result};
use clap::Parser;
use couchbase_client::HttpClient;
use serde_json::Value;
use tracing::{error, info};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    let cli = Cli::parse();
    let client = HttpClient::new(&cli.client_config(), cli.hostname_override.as_deref())
        .context("failed to build Couchbase client")?;
    info!(
        base_url = client.base_url(),
        base_query_url = client.base_query_url(),
        "client ready"
    );

    for (endpoint, body) in fetch_all(&client, &cli.endpoints).await? {
        let pretty = serde_json::to_string_pretty(&body)?;
        println!("# {endpoint}\n{pretty}");
    }
    Ok(())
}

/// Fetch every endpoint in order, stopping at the first failure.
async fn fetch_all(client: &HttpClient, endpoints: &[String]) -> Result<Vec<(String, Value)>> {
    let mut results = Vec::with_capacity(endpoints.len());
    for endpoint in endpoints {
        let body: Value = match client.request(endpoint).await {
            Ok(body) => body,
            Err(e) => {
                error!(%endpoint, %e, "request failed");
                return Err(e).with_context(|| format!("GET {endpoint} failed"));
            }
        };
        info!(%endpoint, "request succeeded");
        results.push((endpoint.clone(), body));
    }
    Ok(results)
}
