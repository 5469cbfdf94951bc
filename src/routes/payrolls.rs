use actix_web::web;

use crate::handlers::payrolls;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/payrolls")
            .route("", web::post().to(payrolls::create_payroll))
            .route("", web::get().to(payrolls::get_payrolls))
            .route(
                "/calculate",
                web::post().to(payrolls::calculate_payroll_preview),
            )
            .route("/generate", web::post().to(payrolls::generate_payrolls))
            .route(
                "/period",
                web::delete().to(payrolls::delete_payroll_period),
            )
            .route("/{id}", web::get().to(payrolls::get_payroll))
            .route("/{id}", web::put().to(payrolls::update_payroll))
            .route("/{id}", web::delete().to(payrolls::delete_payroll)),
    );
}
