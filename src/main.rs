use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware::Logger, web};
use anyhow::Result;

use folha_api::Config;
use folha_api::database::{
    init_database,
    repositories::{
        EmployeeRepository, EmployeeRubricRepository, PayrollRepository, ReceiptRepository,
        ReceiptTypeRepository, RubricRepository,
    },
};
use folha_api::routes;

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Folha API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("Starting Folha API server...");

    // Load configuration
    let config = Config::from_env()?;
    log::info!("Configuration loaded (environment: {})", config.environment);

    // Initialize database
    let pool = init_database(&config.database_url).await?;
    log::info!("Database initialized");

    // Initialize repositories
    let employee_repository = EmployeeRepository::new(pool.clone());
    let rubric_repository = RubricRepository::new(pool.clone());
    let employee_rubric_repository = EmployeeRubricRepository::new(pool.clone());
    let receipt_type_repository = ReceiptTypeRepository::new(pool.clone());
    let receipt_repository = ReceiptRepository::new(pool.clone());
    let payroll_repository = PayrollRepository::new(pool.clone());

    let employee_repo_data = web::Data::new(employee_repository);
    let rubric_repo_data = web::Data::new(rubric_repository);
    let employee_rubric_repo_data = web::Data::new(employee_rubric_repository);
    let receipt_type_repo_data = web::Data::new(receipt_type_repository);
    let receipt_repo_data = web::Data::new(receipt_repository);
    let payroll_repo_data = web::Data::new(payroll_repository);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("Server starting on http://{}", server_address);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(employee_repo_data.clone())
            .app_data(rubric_repo_data.clone())
            .app_data(employee_rubric_repo_data.clone())
            .app_data(receipt_type_repo_data.clone())
            .app_data(receipt_repo_data.clone())
            .app_data(payroll_repo_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin(&config.client_base_url)
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![
                        "Authorization",
                        "Content-Type",
                        "Accept",
                        "X-Requested-With",
                    ])
                    .max_age(3600),
            )
            .wrap(Logger::new(
                r#"%a "%r" %s %b "%{Referer}i" "%{User-Agent}i" %T"#,
            ))
            .service(hello)
            .service(health)
            .configure(routes::configure)
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
