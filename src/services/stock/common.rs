//! 公共常量和辅助函数

use std::time::Duration;

use anyhow::Result;
use reqwest::header::{HeaderMap, HeaderValue, REFERER, USER_AGENT};
use reqwest::Client;

use crate::config::UpstreamConfig;

// ==================== 上游 API 常量 ====================

/// 新浪日K线 API（JSON 数组）
pub const SINA_KLINE_API: &str =
    "http://money.finance.sina.com.cn/quotes_service/api/json_v2.php/CN_MarketData.getKLineData";
/// 腾讯日K线 JS 文件根路径（文本格式）
pub const TENCENT_KLINE_BASE: &str = "http://data.gtimg.cn/flashdata";
/// 东方财富人气榜 API
pub const EASTMONEY_HOT_API: &str = "https://emappdata.eastmoney.com/stockrank/getAllCurrentList";

// ==================== 请求头 ====================

pub const SINA_REFERER: &str = "https://finance.sina.com.cn/";
pub const TENCENT_REFERER: &str = "http://stockpage.10jqka.com.cn";
pub const EASTMONEY_REFERER: &str = "https://vipmoney.eastmoney.com/";
pub const SIMPLE_USER_AGENT: &str = "Mozilla/5.0";
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

// ==================== 参数限制 ====================

/// K线接口单次最多返回的天数
pub const MAX_KLINE_DAYS: u32 = 1023;
pub const DEFAULT_KLINE_DAYS: u32 = 500;
/// 热门股票单次最多返回的条数
pub const MAX_HOT_LIMIT: u32 = 200;
pub const DEFAULT_HOT_LIMIT: u32 = 100;

/// 创建带固定请求头和超时的 HTTP 客户端
pub fn build_client(config: &UpstreamConfig, referer: &'static str, user_agent: &'static str) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(REFERER, HeaderValue::from_static(referer));
    headers.insert(USER_AGENT, HeaderValue::from_static(user_agent));

    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()?;
    Ok(client)
}
