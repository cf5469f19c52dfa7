use anyhow::Result;

const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Application configuration loaded from environment variables.
/// Everything has a sensible local default so the demo runs out of the box.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: env_or("MATCH_API_URL", DEFAULT_API_URL),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_prefers_set_value() {
        std::env::set_var("SCOUT_TEST_ENV_OR", "http://example.test:9000");
        assert_eq!(
            env_or("SCOUT_TEST_ENV_OR", DEFAULT_API_URL),
            "http://example.test:9000"
        );
        std::env::remove_var("SCOUT_TEST_ENV_OR");
    }

    #[test]
    fn test_env_or_falls_back_when_unset() {
        std::env::remove_var("SCOUT_TEST_ENV_OR_MISSING");
        assert_eq!(
            env_or("SCOUT_TEST_ENV_OR_MISSING", DEFAULT_API_URL),
            DEFAULT_API_URL
        );
    }

    #[test]
    fn test_env_or_treats_blank_as_unset() {
        std::env::set_var("SCOUT_TEST_ENV_OR_BLANK", "   ");
        assert_eq!(env_or("SCOUT_TEST_ENV_OR_BLANK", "info"), "info");
        std::env::remove_var("SCOUT_TEST_ENV_OR_BLANK");
    }
}
