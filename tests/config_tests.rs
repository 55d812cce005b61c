use serial_test::serial;
use shiftboard::config::Config;
use std::env;

mod common;

const KEYS: [&str; 12] = [
    "DATABASE_URL",
    "JWT_SECRET",
    "ACCESS_TOKEN_MINUTES",
    "REFRESH_TOKEN_DAYS",
    "HOST",
    "PORT",
    "ENVIRONMENT",
    "BASE_URL",
    "GENERATE_SHIFTS",
    "GENERATION_CACHE_CAPACITY",
    "ADMIN_USERNAME",
    "SEED_DEMO_DATA",
];

/// Runs `body` with every config variable cleared, restoring them afterwards.
fn with_clean_env(body: impl FnOnce()) {
    let original: Vec<(&str, Option<String>)> =
        KEYS.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in KEYS {
        unsafe {
            env::remove_var(key);
        }
    }

    body();

    for (key, value) in original {
        unsafe {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

#[test]
#[serial]
fn test_config_from_env_with_defaults() {
    common::setup_test_env();

    with_clean_env(|| {
        let config = Config::from_env_only().unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(
            config.jwt_secret,
            "your-super-secret-jwt-key-change-this-in-production-12345"
        );
        assert_eq!(config.access_token_minutes, 15);
        assert_eq!(config.refresh_token_days, 7);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.environment, "development");
        assert_eq!(config.client_base_url, "http://localhost:3000");
        assert!(config.generate_shifts);
        assert_eq!(config.generation_cache_capacity, 1024);
        assert!(config.admin_username.is_none());
        assert!(!config.seed_demo_data);
        assert!(!config.is_production());
    });
}

#[test]
#[serial]
fn test_config_from_env_with_custom_values() {
    common::setup_test_env();

    with_clean_env(|| {
        unsafe {
            env::set_var("DATABASE_URL", "sqlite:./test.db");
            env::set_var("JWT_SECRET", "test-secret");
            env::set_var("ACCESS_TOKEN_MINUTES", "5");
            env::set_var("HOST", "0.0.0.0");
            env::set_var("PORT", "3000");
            env::set_var("ENVIRONMENT", "production");
            env::set_var("GENERATE_SHIFTS", "false");
            env::set_var("ADMIN_USERNAME", "root");
            env::set_var("SEED_DEMO_DATA", "yes");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(config.database_url, "sqlite:./test.db");
        assert_eq!(config.jwt_secret, "test-secret");
        assert_eq!(config.access_token_minutes, 5);
        assert_eq!(config.server_address(), "0.0.0.0:3000");
        assert!(config.is_production());
        assert!(!config.generate_shifts);
        assert_eq!(config.admin_username.as_deref(), Some("root"));
        assert!(config.seed_demo_data);
    });
}

#[test]
#[serial]
fn test_config_with_invalid_values_falls_back() {
    common::setup_test_env();

    with_clean_env(|| {
        unsafe {
            env::set_var("PORT", "not-a-port");
            env::set_var("GENERATION_CACHE_CAPACITY", "-1");
        }

        let config = Config::from_env_only().unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.generation_cache_capacity, 1024);
    });
}

#[test]
#[serial]
fn test_production_requires_a_jwt_secret() {
    common::setup_test_env();

    with_clean_env(|| {
        unsafe {
            env::set_var("ENVIRONMENT", "production");
        }
        assert!(Config::from_env_only().is_err());

        unsafe {
            env::set_var("JWT_SECRET", "a-real-secret");
        }
        assert!(Config::from_env_only().unwrap().is_production());
    });
}

#[test]
#[serial]
fn test_empty_jwt_secret_is_rejected() {
    common::setup_test_env();

    with_clean_env(|| {
        unsafe {
            env::set_var("JWT_SECRET", "");
        }

        assert!(Config::from_env_only().is_err());
    });
}
