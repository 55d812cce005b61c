use actix_web::web;
use sqlx::SqlitePool;

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod scheduling;
pub mod seed;
pub mod services;

pub use config::Config;
pub use database::repositories::{
    LocationRepository, RefreshTokenRepository, ShiftRepository, UserRepository,
};
pub use error::{AppError, AppResult};
pub use services::{AuthService, ScheduleService};

/// Repositories and services shared by every worker.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repository: UserRepository,
    pub location_repository: LocationRepository,
    pub refresh_token_repository: RefreshTokenRepository,
    pub shift_repository: ShiftRepository,
    pub auth_service: AuthService,
    pub schedule_service: ScheduleService,
}

impl AppState {
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let user_repository = UserRepository::new(pool.clone());
        let location_repository = LocationRepository::new(pool.clone());
        let refresh_token_repository = RefreshTokenRepository::new(pool.clone());
        let shift_repository = ShiftRepository::new(pool);

        let auth_service = AuthService::new(
            config.clone(),
            user_repository.clone(),
            refresh_token_repository.clone(),
        );
        let schedule_service = ScheduleService::new(
            &config,
            shift_repository.clone(),
            user_repository.clone(),
            location_repository.clone(),
        );

        Self {
            config,
            user_repository,
            location_repository,
            refresh_token_repository,
            shift_repository,
            auth_service,
            schedule_service,
        }
    }

    /// Register shared data, the health check and the `/v1` API.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.config.clone()))
            .app_data(web::Data::new(self.user_repository.clone()))
            .app_data(web::Data::new(self.location_repository.clone()))
            .app_data(web::Data::new(self.auth_service.clone()))
            .app_data(web::Data::new(self.schedule_service.clone()))
            .app_data(json_config())
            .service(handlers::health)
            .configure(routes::configure);
    }
}

/// Malformed JSON bodies answer with the usual error envelope.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(format!("Invalid request body: {}", err)).into()
    })
}
