//! 股票数据服务模块
//!
//! 每个接口只对接一个数据源：
//! - 新浪财经：A 股日K线（JSON）
//! - 腾讯财经：沪深/港股日K线（文本）
//! - 东方财富：人气榜

pub mod common;
pub mod eastmoney;
pub mod parse;
pub mod sina;
pub mod symbol;
pub mod tencent;

use anyhow::Result;

use crate::config::UpstreamConfig;

pub use eastmoney::EastmoneyHotClient;
pub use sina::SinaKlineClient;
pub use tencent::TencentKlineClient;

/// 股票数据服务
///
/// 持有各数据源的客户端，启动时创建一次，由所有工作线程共享
pub struct StockService {
    pub sina: SinaKlineClient,
    pub tencent: TencentKlineClient,
    pub eastmoney: EastmoneyHotClient,
}

impl StockService {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        Ok(Self {
            sina: SinaKlineClient::new(config)?,
            tencent: TencentKlineClient::new(config)?,
            eastmoney: EastmoneyHotClient::new(config)?,
        })
    }
}
