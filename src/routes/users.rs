use actix_web::web;

use crate::handlers::{auth, users};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/token/refresh", web::post().to(auth::refresh))
            .route("/me", web::get().to(auth::me))
            .route("", web::get().to(users::list_users))
            .route("", web::post().to(users::create_user))
            .route("", web::put().to(users::update_user))
            .route("/{id}", web::get().to(users::get_user))
            .route("/{id}", web::delete().to(users::delete_user)),
    );
}
