//! 新浪财经股票日K线接口实现
//!
//! 对接 CN_MarketData.getKLineData，返回 JSON 数组，字段均为字符串：
//! `[{"day":"2024-01-02","open":"10.00","high":"10.50","low":"9.80","close":"10.20","volume":"123456"}, ...]`

use anyhow::{anyhow, Result};
use reqwest::Client;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::models::KlineData;

use super::common::{build_client, MAX_KLINE_DAYS, SIMPLE_USER_AGENT, SINA_REFERER};
use super::parse::{value_f64_or_zero, value_u64_or_zero};
use super::symbol::to_symbol;

/// 新浪日K线客户端
pub struct SinaKlineClient {
    client: Client,
    api_url: String,
}

impl SinaKlineClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, SINA_REFERER, SIMPLE_USER_AGENT)?,
            api_url: config.sina_kline_url.clone(),
        })
    }

    /// 获取 A 股日K线数据
    ///
    /// # 参数
    /// - code: 6 位股票代码
    /// - days: 获取天数，超出 1..=1023 的部分会被截断
    pub async fn get_kline(&self, code: &str, days: u32) -> Result<Vec<KlineData>> {
        let symbol = to_symbol(code);
        let datalen = days.clamp(1, MAX_KLINE_DAYS).to_string();

        log::debug!("请求新浪日K线 symbol={} datalen={}", symbol, datalen);

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("symbol", symbol.as_str()),
                ("scale", "240"),
                ("ma", "no"),
                ("datalen", datalen.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("获取新浪K线数据失败: {}", response.status()));
        }

        let text = response.text().await?;
        parse_sina_kline(&text)
    }
}

/// 解析新浪日K线 JSON
///
/// 非 JSON 视为上游错误；JSON 但不是数组（如未知代码返回的 `null`）视为无数据
pub fn parse_sina_kline(data: &str) -> Result<Vec<KlineData>> {
    let json_data: Value =
        serde_json::from_str(data.trim()).map_err(|e| anyhow!("解析新浪K线JSON失败: {}", e))?;

    let Some(arr) = json_data.as_array() else {
        log::warn!("新浪K线返回非数组数据: {}", preview(data));
        return Ok(Vec::new());
    };

    let history = arr
        .iter()
        .map(|item| KlineData {
            day: item["day"].as_str().unwrap_or("").to_string(),
            open: value_f64_or_zero(&item["open"]),
            high: value_f64_or_zero(&item["high"]),
            low: value_f64_or_zero(&item["low"]),
            close: value_f64_or_zero(&item["close"]),
            volume: value_u64_or_zero(&item["volume"]),
        })
        .collect();

    Ok(history)
}

fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}
