use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Budget for a single LLM call before falling back to static content.
    pub llm_timeout_secs: u64,
    pub cache_ttl_secs: i64,
    pub question_count: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            database_url: require_env("DATABASE_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: parse_env("PORT", 3001).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout_secs: parse_env("LLM_TIMEOUT_SECS", 20)
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            cache_ttl_secs: parse_env("CACHE_TTL_SECS", 3600)
                .context("CACHE_TTL_SECS must be a whole number of seconds")?,
            question_count: parse_env("QUESTION_COUNT", 5)
                .context("QUESTION_COUNT must be a positive integer")?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.question_count > 0, "QUESTION_COUNT must be a positive integer");
        ensure!(self.cache_ttl_secs >= 0, "CACHE_TTL_SECS must not be negative");
        ensure!(self.llm_timeout_secs > 0, "LLM_TIMEOUT_SECS must be at least 1");
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => Ok(raw.trim().parse::<T>()?),
        Err(_) => Ok(default),
    }
}
