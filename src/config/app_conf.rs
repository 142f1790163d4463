use std::env;

pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Development mode exposes the reset link in the forgot-password
    /// response body instead of relying on email delivery alone.
    pub dev_mode: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let dev_mode = env::var("APP_ENV")
            .map(|v| v != "production")
            .unwrap_or(true);
        AppConfig { host, port, dev_mode }
    }
}
