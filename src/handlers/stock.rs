//! 股票接口处理器
//!
//! ## API 列表
//! - GET /api/stock/kline?code=000001&days=500 - 新浪日K线（A 股）
//! - GET /api/stock/kline/tencent?code=00700&days=500 - 腾讯日K线（沪深/港股）
//! - GET /api/stock/hot?limit=100 - 东方财富人气榜

use std::num::IntErrorKind;

use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::{HotStocksQuery, KlineQuery};
use crate::services::stock::common::{
    DEFAULT_HOT_LIMIT, DEFAULT_KLINE_DAYS, MAX_HOT_LIMIT, MAX_KLINE_DAYS,
};
use crate::services::stock::symbol::{is_a_share_code, is_hk_code};
use crate::services::stock::StockService;

/// 获取 A 股日K线（新浪）
///
/// GET /api/stock/kline
///
/// # 参数
/// - code: 6 位股票代码（必填）
/// - days: 获取天数，默认 500，最大 1023
pub async fn get_kline(
    service: web::Data<StockService>,
    query: web::Query<KlineQuery>,
) -> Result<HttpResponse, ApiError> {
    let code = require_code(query.code.as_deref())?;
    if !is_a_share_code(code) {
        return Err(ApiError::BadRequest(format!(
            "股票代码格式错误: {}，应为 6 位数字",
            code
        )));
    }
    let days = parse_count(query.days.as_deref(), "days", DEFAULT_KLINE_DAYS, MAX_KLINE_DAYS)?;

    let data = service
        .sina
        .get_kline(code, days)
        .await
        .map_err(|e| upstream_error("获取股票数据失败", e))?;

    if data.is_empty() {
        return Err(ApiError::NotFound(format!("未找到股票 {} 的数据", code)));
    }
    Ok(HttpResponse::Ok().json(data))
}

/// 获取日K线（腾讯，支持港股）
///
/// GET /api/stock/kline/tencent
///
/// # 参数
/// - code: 沪深 6 位或港股 5 位代码（必填）
/// - days: 获取天数，默认 500，最大 1023
pub async fn get_tencent_kline(
    service: web::Data<StockService>,
    query: web::Query<KlineQuery>,
) -> Result<HttpResponse, ApiError> {
    let code = require_code(query.code.as_deref())?;
    if !is_a_share_code(code) && !is_hk_code(code) {
        return Err(ApiError::BadRequest(format!(
            "股票代码格式错误: {}，沪深应为 6 位数字，港股应为 5 位数字",
            code
        )));
    }
    let days = parse_count(query.days.as_deref(), "days", DEFAULT_KLINE_DAYS, MAX_KLINE_DAYS)?;

    let data = service
        .tencent
        .get_kline(code, days)
        .await
        .map_err(|e| upstream_error("获取股票数据失败", e))?;

    if data.is_empty() {
        return Err(ApiError::NotFound(format!("未找到股票 {} 的数据", code)));
    }
    Ok(HttpResponse::Ok().json(data))
}

/// 获取热门股票排行
///
/// GET /api/stock/hot
///
/// # 参数
/// - limit: 返回数量，默认 100，最大 200
pub async fn get_hot_stocks(
    service: web::Data<StockService>,
    query: web::Query<HotStocksQuery>,
) -> Result<HttpResponse, ApiError> {
    let limit = parse_count(query.limit.as_deref(), "limit", DEFAULT_HOT_LIMIT, MAX_HOT_LIMIT)?;

    let result = service
        .eastmoney
        .get_hot_stocks(limit)
        .await
        .map_err(|e| upstream_error("获取热门股票失败", e))?;

    if result.entries.is_empty() {
        return Err(ApiError::NotFound("未获取到热门股票数据".to_string()));
    }
    Ok(HttpResponse::Ok().json(result))
}

fn require_code(code: Option<&str>) -> Result<&str, ApiError> {
    match code {
        Some(code) if !code.is_empty() => Ok(code),
        _ => Err(ApiError::BadRequest("缺少股票代码参数 (code)".to_string())),
    }
}

/// 解析正整数参数，缺省时取默认值，超过上限时截断
fn parse_count(raw: Option<&str>, name: &str, default: u32, max: u32) -> Result<u32, ApiError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n.min(u64::from(max)) as u32),
        // 超出 u64 的正整数同样按上限截断
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(max),
        _ => Err(ApiError::BadRequest(format!(
            "{} 参数必须为正整数: {}",
            name, raw
        ))),
    }
}

fn upstream_error(context: &str, err: anyhow::Error) -> ApiError {
    log::error!("{}: {:#}", context, err);
    ApiError::Upstream(err)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/stock")
            .route("/kline", web::get().to(get_kline))
            .route("/kline/tencent", web::get().to(get_tencent_kline))
            .route("/hot", web::get().to(get_hot_stocks)),
    );
}
