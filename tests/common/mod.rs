#![allow(dead_code)]

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::env;
use tempfile::TempDir;

use shiftboard::config::Config;
use shiftboard::database::init_database;
use shiftboard::database::models::{Address, Location, User};
use shiftboard::AppState;

pub const TEST_PASSWORD: &str = "password123";

/// Builds the full application around a [`TestContext`].
macro_rules! init_app {
    ($ctx:expr) => {{
        let state = $ctx.state.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(move |cfg| state.configure(cfg))
                .wrap(shiftboard::middleware::RequestIdMiddleware),
        )
        .await
    }};
}

pub fn test_config(database_url: &str) -> Config {
    Config {
        database_url: database_url.to_string(),
        jwt_secret: "test-jwt-secret-key".to_string(),
        access_token_minutes: 15,
        refresh_token_days: 7,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        client_base_url: "http://localhost:3000".to_string(),
        bcrypt_cost: 4,
        generate_shifts: true,
        generation_cache_capacity: 64,
        generation_cache_ttl_secs: 3600,
        admin_username: None,
        admin_password: None,
        seed_demo_data: false,
    }
}

pub struct TestContext {
    pub pool: SqlitePool,
    pub config: Config,
    pub state: AppState,
    pub temp_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Result<Self> {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(adjust: impl FnOnce(&mut Config)) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let database_url = format!("sqlite:{}/test.db", temp_dir.path().display());

        let mut config = test_config(&database_url);
        adjust(&mut config);

        let pool = init_database(&database_url).await?;
        let state = AppState::new(config.clone(), pool.clone());

        Ok(TestContext {
            pool,
            config,
            state,
            temp_dir,
        })
    }

    pub async fn create_user(&self, username: &str, is_admin: bool) -> Result<User> {
        self.create_user_with_id(&uuid::Uuid::new_v4().to_string(), username, is_admin)
            .await
    }

    pub async fn create_user_with_id(&self, id: &str, username: &str, is_admin: bool) -> Result<User> {
        let now = Utc::now();
        let user = User {
            id: id.to_string(),
            username: username.to_string(),
            name: Name().fake(),
            email: format!("{}.{}", username, SafeEmail().fake::<String>()),
            phone: None,
            address: None,
            password_hash: self.state.auth_service.hash_password(TEST_PASSWORD)?,
            is_admin_user: is_admin,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.state.user_repository.create_user(&user).await?;
        Ok(user)
    }

    pub async fn create_location(&self, id: &str) -> Result<Location> {
        let now = Utc::now();
        let location = Location {
            id: id.to_string(),
            location_name: format!("{} Office", Name().fake::<String>()),
            address: Address {
                city: "Springfield".to_string(),
                state: "IL".to_string(),
                country: None,
                postal_code: "62701".to_string(),
            },
            company_name: "Acme".to_string(),
            contacts: Vec::new(),
            instructions: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.state.location_repository.create_location(&location).await?;
        Ok(location)
    }

    pub fn token_for(&self, user: &User) -> String {
        self.state
            .auth_service
            .generate_access_token(user)
            .expect("token signs")
    }

    pub fn bearer(&self, user: &User) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", self.token_for(user)))
    }
}

pub fn setup_test_env() {
    unsafe {
        env::set_var("RUST_LOG", "debug");
    }
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 2024-01-`day` at `hour`:00 UTC. 2024-01-01 is a Monday.
pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

pub fn shift_body(id: &str, user_id: &str, location_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Value {
    json!({
        "id": id,
        "userId": user_id,
        "locationId": location_id,
        "startTime": start,
        "endTime": end,
    })
}

pub fn range_body(start: DateTime<Utc>, end: DateTime<Utc>) -> Value {
    json!({ "startTime": start, "endTime": end })
}
