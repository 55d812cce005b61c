use anyhow::Result;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub client_base_url: String,
    pub bcrypt_cost: u32,
    pub generate_shifts: bool,
    pub generation_cache_capacity: u64,
    pub generation_cache_ttl_secs: u64,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub seed_demo_data: bool,
}

const DEFAULT_JWT_SECRET: &str = "your-super-secret-jwt-key-change-this-in-production-12345";

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn flag_or(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => matches!(
            value.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_env_only()
    }

    /// Load configuration from environment variables only (without loading .env files)
    /// This is useful for testing where you want to control the environment directly
    pub fn from_env_only() -> Result<Self> {
        let jwt_secret = var_or("JWT_SECRET", DEFAULT_JWT_SECRET);
        if jwt_secret.is_empty() {
            anyhow::bail!("JWT_SECRET must not be empty");
        }

        let config = Config {
            database_url: var_or("DATABASE_URL", "sqlite::memory:"),
            jwt_secret,
            access_token_minutes: parsed_or("ACCESS_TOKEN_MINUTES", 15),
            refresh_token_days: parsed_or("REFRESH_TOKEN_DAYS", 7),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 5000),
            environment: var_or("ENVIRONMENT", "development"),
            client_base_url: var_or("BASE_URL", "http://localhost:3000"),
            bcrypt_cost: parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST),
            generate_shifts: flag_or("GENERATE_SHIFTS", true),
            generation_cache_capacity: parsed_or("GENERATION_CACHE_CAPACITY", 1024),
            generation_cache_ttl_secs: parsed_or("GENERATION_CACHE_TTL_SECS", 3600),
            admin_username: env::var("ADMIN_USERNAME").ok().filter(|v| !v.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
            seed_demo_data: flag_or("SEED_DEMO_DATA", false),
        };

        if config.is_production() && config.jwt_secret == DEFAULT_JWT_SECRET {
            anyhow::bail!("JWT_SECRET must be set in production");
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
