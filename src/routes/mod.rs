use actix_web::web;

pub mod employees;
pub mod payrolls;
pub mod receipts;
pub mod rubrics;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(employees::configure)
            .configure(rubrics::configure)
            .configure(receipts::configure)
            .configure(payrolls::configure),
    );
}
