//! API configuration.

/// How download responses are delivered.
///
/// The same request path feeds both adapters; the flag only picks which
/// one answers. `Stream` pipes tool stdout into the response body;
/// `Redirect` resolves the upstream media URL and answers 307.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    #[default]
    Stream,
    Redirect,
}

impl DeliveryMode {
    fn from_env_value(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "redirect" => Self::Redirect,
            _ => Self::Stream,
        }
    }
}

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit requests per second
    pub rate_limit_rps: u32,
    /// Max request body size
    pub max_body_size: usize,
    /// Download delivery adapter
    pub delivery_mode: DeliveryMode,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            cors_origins: vec!["*".to_string()],
            rate_limit_rps: 10,
            max_body_size: 1024 * 1024, // 1MB
            delivery_mode: DeliveryMode::Stream,
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3001),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_else(|_| vec!["*".to_string()]),
            rate_limit_rps: std::env::var("RATE_LIMIT_RPS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            delivery_mode: std::env::var("DELIVERY_MODE")
                .map(|s| DeliveryMode::from_env_value(&s))
                .unwrap_or_default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_mode_parsing() {
        assert_eq!(DeliveryMode::from_env_value("redirect"), DeliveryMode::Redirect);
        assert_eq!(DeliveryMode::from_env_value("REDIRECT"), DeliveryMode::Redirect);
        assert_eq!(DeliveryMode::from_env_value("stream"), DeliveryMode::Stream);
        // Unknown values keep the streaming default
        assert_eq!(DeliveryMode::from_env_value("???"), DeliveryMode::Stream);
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.delivery_mode, DeliveryMode::Stream);
        assert!(!config.is_production());
    }
}
