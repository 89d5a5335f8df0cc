// ⚙️ Configuration + logging setup shared by both binaries

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `default_level` ("info", "debug", ...).
pub fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Server settings (flags, then environment, then defaults)
#[derive(Debug, Clone, Parser)]
#[command(name = "tax-dashboard-server", version, about = "Crypto tax dashboard API server")]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "DASHBOARD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
