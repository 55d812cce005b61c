use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, middleware::Logger};
use anyhow::Result;

use shiftboard::database::init_database;
use shiftboard::database::repositories::refresh_token::cleanup_refresh_tokens;
use shiftboard::middleware::RequestIdMiddleware;
use shiftboard::seed::seed_demo_data;
use shiftboard::{AppState, Config};

const TOKEN_CLEANUP_INTERVAL_SECS: u64 = 3600;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    env_logger::init();

    log::info!("Starting Shiftboard API server...");

    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);

    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    let state = AppState::new(config.clone(), pool);

    if let Some(admin) = state.auth_service.ensure_admin().await? {
        log::info!("Bootstrap admin {} ready", admin.username);
    }
    if config.seed_demo_data {
        seed_demo_data(&state.user_repository, &state.location_repository).await?;
    }

    tokio::spawn(cleanup_refresh_tokens(
        state.refresh_token_repository.clone(),
        TOKEN_CLEANUP_INTERVAL_SECS,
    ));

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .configure(move |cfg| state.configure(cfg))
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        header::AUTHORIZATION,
                        header::CONTENT_TYPE,
                        header::ACCEPT,
                    ])
                    .allowed_header("X-Correlation-ID")
                    .expose_headers(vec!["X-Correlation-ID"])
                    .max_age(3600),
            )
            .wrap(RequestIdMiddleware)
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T correlation_id=%{x-correlation-id}o"#,
            ))
    })
    .bind(&server_address)?
    .run()
    .await?;

    Ok(())
}
