use actix_web::web;

use crate::handlers::rubrics;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/rubrics")
            .route("", web::post().to(rubrics::create_rubric))
            .route("", web::get().to(rubrics::get_rubrics))
            .route("/{id}", web::get().to(rubrics::get_rubric))
            .route("/{id}", web::put().to(rubrics::update_rubric))
            .route("/{id}", web::delete().to(rubrics::delete_rubric)),
    );
    cfg.service(
        web::scope("/employee-rubrics")
            .route("/{id}", web::put().to(rubrics::update_employee_rubric))
            .route("/{id}", web::delete().to(rubrics::delete_employee_rubric)),
    );
}
