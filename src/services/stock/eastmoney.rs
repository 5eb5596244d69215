//! 东方财富人气榜接口实现
//!
//! POST getAllCurrentList，返回：
//! `{"status":0,"message":"success","data":[{"sc":"SH600000","nm":"浦发银行","rk":1}],"total":100}`

use anyhow::{anyhow, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{json, Value};

use crate::config::UpstreamConfig;
use crate::models::{HotStock, HotStocksResponse, Market};

use super::common::{build_client, BROWSER_USER_AGENT, EASTMONEY_REFERER, MAX_HOT_LIMIT};
use super::parse::value_u64_or_zero;

const APP_ID: &str = "appId01";
const GLOBAL_ID: &str = "786e4c21-70dc-435a-93bb-38";

/// 东方财富热门股票客户端
pub struct EastmoneyHotClient {
    client: Client,
    api_url: String,
}

impl EastmoneyHotClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config, EASTMONEY_REFERER, BROWSER_USER_AGENT)?,
            api_url: config.eastmoney_hot_url.clone(),
        })
    }

    /// 获取热门股票排行榜
    ///
    /// # 参数
    /// - limit: 返回数量，超出 1..=200 的部分会被截断
    pub async fn get_hot_stocks(&self, limit: u32) -> Result<HotStocksResponse> {
        let page_size = limit.clamp(1, MAX_HOT_LIMIT);
        let body = json!({
            "appId": APP_ID,
            "globalId": GLOBAL_ID,
            "marketType": "",
            "pageNo": 1,
            "pageSize": page_size,
        });

        log::debug!("请求东方财富人气榜 pageSize={}", page_size);

        let response = self
            .client
            .post(&self.api_url)
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow!("获取热门股票失败: {}", response.status()));
        }

        let text = response.text().await?;
        let json_data: Value =
            serde_json::from_str(&text).map_err(|e| anyhow!("解析热门股票JSON失败: {}", e))?;

        Ok(parse_hot_stocks(&json_data))
    }
}

/// 解析人气榜响应
///
/// `status == -1` 表示上游拒绝请求，按空结果处理
pub fn parse_hot_stocks(result: &Value) -> HotStocksResponse {
    if result["status"].as_i64() == Some(-1) {
        log::warn!(
            "热门股票API返回异常: {}",
            result["message"].as_str().unwrap_or("")
        );
        return HotStocksResponse::empty();
    }

    let Some(arr) = result["data"].as_array() else {
        return HotStocksResponse::empty();
    };

    let entries: Vec<HotStock> = arr.iter().map(parse_hot_stock).collect();
    let total = Some(value_u64_or_zero(&result["total"]))
        .filter(|t| *t > 0)
        .unwrap_or(entries.len() as u64);

    HotStocksResponse { entries, total }
}

fn parse_hot_stock(item: &Value) -> HotStock {
    let (market, code) = split_market_code(item["sc"].as_str().unwrap_or(""));

    HotStock {
        code: code.to_string(),
        name: item["nm"].as_str().unwrap_or("").to_string(),
        rank: u32::try_from(value_u64_or_zero(&item["rk"])).unwrap_or(0),
        market,
    }
}

/// `SH600000` -> (上海, "600000")，无法识别的前缀保留原样
pub fn split_market_code(sc: &str) -> (Market, &str) {
    let prefixes = [
        ("SH", Market::Shanghai),
        ("SZ", Market::Shenzhen),
        ("BJ", Market::Beijing),
    ];
    for (prefix, market) in prefixes {
        if let Some(code) = sc.strip_prefix(prefix) {
            return (market, code);
        }
    }
    (Market::Unknown, sc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample() -> Value {
        json!({
            "status": 0,
            "message": "success",
            "data": [
                {"sc": "SH600000", "nm": "浦发银行", "rk": 1},
                {"sc": "SZ000001", "nm": "平安银行", "rk": 2},
                {"sc": "BJ830799", "rk": 3},
                {"sc": "HK00700", "nm": "腾讯控股", "rk": 4}
            ],
            "total": 4
        })
    }

    #[test]
    fn test_split_market_code() {
        assert_eq!(split_market_code("SH600000"), (Market::Shanghai, "600000"));
        assert_eq!(split_market_code("SZ000001"), (Market::Shenzhen, "000001"));
        assert_eq!(split_market_code("BJ830799"), (Market::Beijing, "830799"));
        assert_eq!(split_market_code("600000"), (Market::Unknown, "600000"));
        assert_eq!(split_market_code(""), (Market::Unknown, ""));
    }

    #[test]
    fn test_parse_hot_stocks() {
        let result = parse_hot_stocks(&sample());
        assert_eq!(result.total, 4);
        assert_eq!(result.entries.len(), 4);

        assert_eq!(result.entries[0].code, "600000");
        assert_eq!(result.entries[0].market, Market::Shanghai);
        assert_eq!(result.entries[0].name, "浦发银行");
        assert_eq!(result.entries[0].rank, 1);

        assert_eq!(result.entries[2].name, "");
        assert_eq!(result.entries[2].market, Market::Beijing);
        assert_eq!(result.entries[3].market, Market::Unknown);
        assert_eq!(result.entries[3].code, "HK00700");
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let result = parse_hot_stocks(&json!({"status": 0, "data": [{}]}));
        assert_eq!(result.total, 1);
        assert_eq!(result.entries[0].code, "");
        assert_eq!(result.entries[0].name, "");
        assert_eq!(result.entries[0].rank, 0);
        assert_eq!(result.entries[0].market, Market::Unknown);
    }

    #[test]
    fn test_parse_failure_status_is_empty() {
        let result = parse_hot_stocks(&json!({"status": -1, "message": "bad globalId", "data": []}));
        assert_eq!(result, HotStocksResponse::empty());

        let result = parse_hot_stocks(&json!({"status": 0, "data": null}));
        assert_eq!(result, HotStocksResponse::empty());
    }

    #[tokio::test]
    async fn test_get_hot_stocks_clamps_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hot"))
            .and(header("Referer", EASTMONEY_REFERER))
            .and(body_json(json!({
                "appId": APP_ID,
                "globalId": GLOBAL_ID,
                "marketType": "",
                "pageNo": 1,
                "pageSize": 200,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample()))
            .expect(1)
            .mount(&server)
            .await;

        let config = UpstreamConfig {
            eastmoney_hot_url: format!("{}/hot", server.uri()),
            ..UpstreamConfig::default()
        };
        let client = EastmoneyHotClient::new(&config).unwrap();
        let result = client.get_hot_stocks(500).await.unwrap();
        assert_eq!(result.entries.len(), 4);
    }
}
