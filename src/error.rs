//! 接口错误类型
//!
//! 参数错误在请求上游之前就地返回 400；上游无数据返回 404；
//! 网络错误、上游非 2xx 或数据格式错误统一返回 500

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorBody;

/// 服务器内部错误的兜底提示
pub const GENERIC_ERROR_MESSAGE: &str = "服务器内部错误";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    /// 返回给客户端的错误信息，上游错误没有文字时使用兜底提示
    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let reason = status.canonical_reason().unwrap_or("Error");
        HttpResponse::build(status).json(ErrorBody::with_message(reason, self.message()))
    }
}
