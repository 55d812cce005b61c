use actix_web::web;

pub mod locations;
pub mod shifts;
pub mod users;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1")
            .configure(users::configure)
            .configure(locations::configure)
            .configure(shifts::configure),
    );
}
