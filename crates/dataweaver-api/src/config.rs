// Process configuration loaded from the environment

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Port to bind on (PORT, default 8080)
    pub port: u16,
    /// Optional Postgres URL for the health probe (DATABASE_URL).
    /// Workflow storage is in-memory regardless.
    pub database_url: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|s| !s.is_empty());

        Self { port, database_url }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
