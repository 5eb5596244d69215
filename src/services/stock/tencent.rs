//! 腾讯财经日K线接口实现
//!
//! 沪深: `{base}/hushen/latest/daily/sz000001.js`，港股: `{base}/hk/latest/daily/hk00700.js`
//!
//! 返回 JS 赋值语句，数据为多行文本：
//! ```text
//! latest_daily_data="\n\
//! num:100 total:7587 start:900108 ...\n\
//! 220527 14.29 14.18 14.35 14.11 723067\n\
//! ";
//! ```
//! 行字段: 日期(YYMMDD) 开盘 收盘 最高 最低 成交量

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::config::UpstreamConfig;
use crate::models::KlineData;

use super::common::{build_client, MAX_KLINE_DAYS, SIMPLE_USER_AGENT, TENCENT_REFERER};
use super::parse::{parse_f64_or_zero, parse_u64_or_zero};
use super::symbol::{is_hk_code, to_symbol};

static DAILY_DATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"latest_daily_data="([^"]*)""#).unwrap());

/// 腾讯日K线客户端
pub struct TencentKlineClient {
    client: Client,
    base_url: String,
}

impl TencentKlineClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, TENCENT_REFERER, SIMPLE_USER_AGENT)?,
            base_url: config.tencent_kline_url.trim_end_matches('/').to_string(),
        })
    }

    /// 拼接 JS 文件地址
    fn kline_url(&self, code: &str) -> Result<Url> {
        let raw = if is_hk_code(code) {
            format!("{}/hk/latest/daily/hk{}.js", self.base_url, code)
        } else {
            format!("{}/hushen/latest/daily/{}.js", self.base_url, to_symbol(code))
        };
        Url::parse(&raw).map_err(|e| anyhow!("腾讯K线地址无效 {}: {}", raw, e))
    }

    /// 获取日K线数据（支持沪深和港股）
    ///
    /// # 参数
    /// - code: 沪深 6 位或港股 5 位代码
    /// - days: 获取天数，结果只保留最近的 `days` 条
    pub async fn get_kline(&self, code: &str, days: u32) -> Result<Vec<KlineData>> {
        let url = self.kline_url(code)?;
        let data_len = days.clamp(1, MAX_KLINE_DAYS) as usize;

        log::debug!("请求腾讯日K线 URL: {}", url);

        let response = self.client.get(url).send().await?;

        // 未收录的代码没有对应的 JS 文件
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(anyhow!("获取腾讯K线数据失败: {}", response.status()));
        }

        let bytes = response.bytes().await?;
        let text = encoding_rs::GBK.decode(&bytes).0;

        let Some(daily) = extract_daily_data(&text) else {
            log::warn!("腾讯K线响应中未找到 latest_daily_data: {}", code);
            return Ok(Vec::new());
        };

        Ok(keep_latest(parse_tencent_kline(daily), data_len))
    }
}

/// 提取 `latest_daily_data="..."` 中的数据部分
pub fn extract_daily_data(text: &str) -> Option<&str> {
    DAILY_DATA_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// 解析腾讯K线文本
///
/// 跳过第一行元数据，逐行解析后反转顺序。
///
/// 字段不足 6 个的行会被丢弃；日期不是 6 位数字或不是真实存在的日期
/// （如 `221341`）的行同样丢弃并记录警告，而不是拼出 `2022-13-41` 这样的日期。
pub fn parse_tencent_kline(data: &str) -> Vec<KlineData> {
    let normalized = data.replace("\\n", "\n");

    let mut result: Vec<KlineData> = normalized
        .lines()
        .map(|line| line.trim().trim_end_matches('\\').trim())
        .filter(|line| !line.is_empty())
        .skip(1)
        .filter_map(parse_row)
        .collect();

    result.reverse();
    result
}

fn parse_row(line: &str) -> Option<KlineData> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 6 {
        return None;
    }

    let Some(day) = parse_yymmdd(parts[0]) else {
        log::warn!("腾讯K线日期无效，跳过: {}", line);
        return None;
    };

    Some(KlineData {
        day,
        open: parse_f64_or_zero(parts[1]),
        close: parse_f64_or_zero(parts[2]),
        high: parse_f64_or_zero(parts[3]),
        low: parse_f64_or_zero(parts[4]),
        volume: parse_u64_or_zero(parts[5]),
    })
}

/// `220527` -> `2022-05-27`
fn parse_yymmdd(token: &str) -> Option<String> {
    if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = 2000 + token[0..2].parse::<i32>().ok()?;
    let month = token[2..4].parse::<u32>().ok()?;
    let day = token[4..6].parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format("%Y-%m-%d").to_string())
}

/// 只保留最近的 `n` 条
fn keep_latest(mut data: Vec<KlineData>, n: usize) -> Vec<KlineData> {
    if data.len() > n {
        data.drain(..data.len() - n);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const JS_BODY: &str = "latest_daily_data=\"\\n\\\nnum:3 total:3 start:220525 22:3\\n\\\n220527 14.29 14.18 14.35 14.11 723067\\n\\\n220526 14.00 14.30 14.40 13.90 500000\\n\\\n220525 13.80 14.00 14.05 13.70 400000\\n\\\n\";\n";

    #[test]
    fn test_parse_single_row() {
        let data = parse_tencent_kline("num:1 total:1\n220527 14.29 14.18 14.35 14.11 723067");
        assert_eq!(
            data,
            vec![KlineData {
                day: "2022-05-27".to_string(),
                open: 14.29,
                high: 14.35,
                low: 14.11,
                close: 14.18,
                volume: 723067,
            }]
        );
    }

    #[test]
    fn test_parse_reverses_rows() {
        let data = parse_tencent_kline(
            "num:2 total:2\n220527 14.29 14.18 14.35 14.11 723067\n220526 14.00 14.30 14.40 13.90 500000\n",
        );
        let days: Vec<&str> = data.iter().map(|k| k.day.as_str()).collect();
        assert_eq!(days, vec!["2022-05-26", "2022-05-27"]);
    }

    #[test]
    fn test_parse_skips_short_and_blank_rows() {
        let data = parse_tencent_kline("num:2\n\n220527 14.29 14.18\n   \n220526 1 2 3 4 5\n");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].day, "2022-05-26");
        assert_eq!(data[0].close, 2.0);
        assert_eq!(data[0].volume, 5);
    }

    #[test]
    fn test_parse_bad_numbers_become_zero() {
        let data = parse_tencent_kline("num:1\n220527 abc 14.18 14.35 14.11 xyz");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].open, 0.0);
        assert_eq!(data[0].volume, 0);
    }

    #[test]
    fn test_parse_skips_invalid_dates() {
        let data = parse_tencent_kline("num:2\n221341 1 2 3 4 5\n2205 1 2 3 4 5\n220101 1 2 3 4 5");
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].day, "2022-01-01");
    }

    #[test]
    fn test_extract_js_literal() {
        let daily = extract_daily_data(JS_BODY).unwrap();
        let data = parse_tencent_kline(daily);
        assert_eq!(data.len(), 3);
        assert_eq!(data[0].day, "2022-05-25");
        assert_eq!(data[2].day, "2022-05-27");
        assert_eq!(data[2].volume, 723067);

        assert!(extract_daily_data("var other=\"1\";").is_none());
    }

    #[test]
    fn test_keep_latest() {
        let data = parse_tencent_kline(extract_daily_data(JS_BODY).unwrap());
        let kept = keep_latest(data.clone(), 2);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].day, "2022-05-26");
        assert_eq!(kept[1].day, "2022-05-27");

        assert_eq!(keep_latest(data, 10).len(), 3);
    }

    #[tokio::test]
    async fn test_get_kline_a_share_and_hk_paths() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/hushen/latest/daily/sz000001.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string(JS_BODY))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/hk/latest/daily/hk00700.js"))
            .respond_with(ResponseTemplate::new(200).set_body_string(JS_BODY))
            .expect(1)
            .mount(&server)
            .await;

        let config = UpstreamConfig {
            tencent_kline_url: format!("{}/", server.uri()),
            ..UpstreamConfig::default()
        };
        let client = TencentKlineClient::new(&config).unwrap();

        let data = client.get_kline("000001", 2).await.unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[1].day, "2022-05-27");

        let hk = client.get_kline("00700", 500).await.unwrap();
        assert_eq!(hk.len(), 3);
    }

    #[tokio::test]
    async fn test_get_kline_unknown_code_is_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = UpstreamConfig {
            tencent_kline_url: server.uri(),
            ..UpstreamConfig::default()
        };
        let client = TencentKlineClient::new(&config).unwrap();
        assert!(client.get_kline("600000", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_kline_times_out_on_slow_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(JS_BODY)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = UpstreamConfig {
            tencent_kline_url: server.uri(),
            timeout_secs: 1,
            ..UpstreamConfig::default()
        };
        let client = TencentKlineClient::new(&config).unwrap();
        assert!(client.get_kline("000001", 10).await.is_err());
    }
}
