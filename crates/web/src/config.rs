/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables (a `.env` file is honoured).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Base URL of the tourism backend REST API.
    pub backend_url: String,
    /// Browser key for the maps widget, handed to the map view as-is.
    pub maps_api_key: Option<String>,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Timeout for a single backend call in seconds (default: `15`).
    pub backend_timeout_secs: u64,
    /// Whether the session cookie carries the `Secure` attribute.
    pub session_cookie_secure: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Fallback                           | Default                 |
    /// |-------------------------|------------------------------------|-------------------------|
    /// | `HOST`                  |                                    | `0.0.0.0`               |
    /// | `PORT`                  |                                    | `3000`                  |
    /// | `BACKEND_URL`           | `NEXT_PUBLIC_BACKEND_URL`          | `http://localhost:5000` |
    /// | `GOOGLE_MAPS_API_KEY`   | `NEXT_PUBLIC_GOOGLE_MAPS_API_KEY`  | unset                   |
    /// | `CORS_ORIGINS`          |                                    | `http://localhost:3001` |
    /// | `REQUEST_TIMEOUT_SECS`  |                                    | `30`                    |
    /// | `BACKEND_TIMEOUT_SECS`  |                                    | `15`                    |
    /// | `SESSION_COOKIE_SECURE` |                                    | `false`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let backend_url = env_with_fallback("BACKEND_URL", "NEXT_PUBLIC_BACKEND_URL")
            .unwrap_or_else(|| "http://localhost:5000".into());

        let maps_api_key =
            env_with_fallback("GOOGLE_MAPS_API_KEY", "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let backend_timeout_secs: u64 = std::env::var("BACKEND_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".into())
            .parse()
            .expect("BACKEND_TIMEOUT_SECS must be a valid u64");

        let session_cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            host,
            port,
            backend_url,
            maps_api_key,
            cors_origins,
            request_timeout_secs,
            backend_timeout_secs,
            session_cookie_secure,
        }
    }
}

/// First non-empty value of `primary`, then `fallback`.
fn env_with_fallback(primary: &str, fallback: &str) -> Option<String> {
    [primary, fallback]
        .into_iter()
        .filter_map(|key| std::env::var(key).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}
