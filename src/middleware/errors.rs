//! 兜底错误响应
//!
//! 未经 ApiError 处理的 500 响应（非 JSON）统一改写为
//! `{"error":"Internal Server Error"}`

use actix_web::{
    dev::ServiceResponse,
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    HttpResponse, Result,
};

use crate::models::ErrorBody;

pub fn json_error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, render_internal_error)
}

fn render_internal_error<B>(res: ServiceResponse<B>) -> Result<ErrorHandlerResponse<B>> {
    let is_json = res
        .headers()
        .get(CONTENT_TYPE)
        .map(|v| v.as_bytes().starts_with(b"application/json"))
        .unwrap_or(false);
    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    if let Some(err) = res.response().error() {
        log::error!("服务器错误: {}", err);
    }

    let (req, _) = res.into_parts();
    let response =
        HttpResponse::InternalServerError().json(ErrorBody::new("Internal Server Error"));
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
