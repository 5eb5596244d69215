//! 股票数据模型
//!
//! 定义K线、热门股票等对外输出的统一数据结构，以及接口查询参数

use serde::{Deserialize, Serialize};

/// 股票日K线数据
///
/// 包含单日的 OHLCV 数据，各数据源解析后统一为该结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KlineData {
    /// 日期（YYYY-MM-DD）
    pub day: String,
    /// 开盘价
    pub open: f64,
    /// 最高价
    pub high: f64,
    /// 最低价
    pub low: f64,
    /// 收盘价
    pub close: f64,
    /// 成交量
    pub volume: u64,
}

/// 东方财富市场代码
///
/// 序列化为东方财富使用的字符串：上海 "1"、深圳 "0"、北京 "2"，未知为空串
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Market {
    #[serde(rename = "1")]
    Shanghai,
    #[serde(rename = "0")]
    Shenzhen,
    #[serde(rename = "2")]
    Beijing,
    #[serde(rename = "")]
    Unknown,
}

/// 热门股票条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotStock {
    /// 股票代码（不含交易所前缀）
    pub code: String,
    /// 股票名称
    pub name: String,
    /// 人气排名
    pub rank: u32,
    /// 所属市场
    pub market: Market,
}

/// 热门股票排行结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotStocksResponse {
    pub entries: Vec<HotStock>,
    /// 上游报告的总数
    pub total: u64,
}

impl HotStocksResponse {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            total: 0,
        }
    }
}

/// K线查询参数
///
/// 参数均以原始字符串接收，由处理器自行校验，以便返回明确的错误信息
#[derive(Debug, Default, Deserialize)]
pub struct KlineQuery {
    /// 股票代码
    pub code: Option<String>,
    /// 获取天数
    pub days: Option<String>,
}

/// 热门股票查询参数
#[derive(Debug, Default, Deserialize)]
pub struct HotStocksQuery {
    /// 返回数量限制
    pub limit: Option<String>,
}
