use clap::Parser;
use log::info;

pub const DEFAULT_DATABASE: &str = "flower_stop_database";

/// Server settings. Each flag falls back to an environment variable, which
/// `dotenv` may have loaded from `.env`.
#[derive(Debug, Clone, Parser)]
#[command(name = "flower-stop-backend", about = "REST API for flower listings and florists")]
pub struct AppConfig {
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long = "mongodb-uri", env = "MONGODB_URI")]
    pub mongodb_uri: String,

    #[arg(long, env = "MONGODB_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    #[arg(long = "log-level", env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl AppConfig {
    pub fn load() -> Self {
        AppConfig::parse()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_summary(&self) {
        info!(
            "Listening on {}, database {} via {}://",
            self.bind_address(),
            self.database,
            self.uri_scheme()
        );
    }

    /// Scheme of the MongoDB URI, or `unknown`. The rest may embed credentials.
    fn uri_scheme(&self) -> &str {
        self.mongodb_uri
            .split_once("://")
            .map_or("unknown", |(scheme, _)| scheme)
    }
}
