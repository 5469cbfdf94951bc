use actix_web::web;

use crate::handlers::receipts;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/receipt-types")
            .route("", web::post().to(receipts::create_receipt_type))
            .route("", web::get().to(receipts::get_receipt_types))
            .route("/{id}", web::get().to(receipts::get_receipt_type))
            .route("/{id}", web::put().to(receipts::update_receipt_type))
            .route("/{id}", web::delete().to(receipts::delete_receipt_type)),
    );
    cfg.service(
        web::scope("/receipts")
            .route("", web::post().to(receipts::create_receipt))
            .route("", web::get().to(receipts::get_receipts))
            .route("/{id}", web::get().to(receipts::get_receipt))
            .route("/{id}", web::put().to(receipts::update_receipt))
            .route("/{id}", web::delete().to(receipts::delete_receipt)),
    );
}
