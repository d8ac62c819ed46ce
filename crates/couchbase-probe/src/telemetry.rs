use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub fn init() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("couchbase_probe=info,couchbase_client=info")),
        )
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .init();
}
