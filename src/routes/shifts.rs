use actix_web::web;

use crate::handlers::shifts;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/shifts")
            .route("", web::post().to(shifts::create_shift))
            .route("", web::put().to(shifts::update_shift))
            .route("/user/{user_id}", web::post().to(shifts::get_user_shifts))
            .route("/site/{location_id}", web::post().to(shifts::get_location_shifts))
            .route("/{id}", web::get().to(shifts::get_shift))
            .route("/{id}", web::delete().to(shifts::delete_shift))
            .route("/{id}/remove-range", web::post().to(shifts::remove_shift_range)),
    );
}
