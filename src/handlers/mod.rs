pub mod stock;
pub mod health;

use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::ErrorBody;

/// 未匹配的路由
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorBody::new("Not Found"))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    )
    .configure(health::config)
    .configure(stock::config)
    .default_service(web::to(not_found));
}
