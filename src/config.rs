//! 配置模块
//!
//! 支持从 JSON 文件加载系统配置，`PORT` 环境变量可覆盖监听端口

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::services::stock::common::{EASTMONEY_HOT_API, SINA_KLINE_API, TENCENT_KLINE_BASE};

const CONFIG_PATHS: [&str; 2] = ["config.json", "config/config.json"];

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,
    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
    /// 工作线程数（0 表示使用 CPU 核心数）
    #[serde(default)]
    pub workers: usize,
}

/// 上游数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// 连接超时时间（秒）
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// 新浪日K线接口
    #[serde(default = "default_sina_kline_url")]
    pub sina_kline_url: String,
    /// 腾讯K线 JS 文件根路径
    #[serde(default = "default_tencent_kline_url")]
    pub tencent_kline_url: String,
    /// 东方财富热门股票排行接口
    #[serde(default = "default_eastmoney_hot_url")]
    pub eastmoney_hot_url: String,
}

/// 跨域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Access-Control-Allow-Origin 的取值
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// 日志级别: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// 默认值函数
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 3001 }
fn default_timeout() -> u64 { 10 }
fn default_connect_timeout() -> u64 { 5 }
fn default_sina_kline_url() -> String { SINA_KLINE_API.to_string() }
fn default_tencent_kline_url() -> String { TENCENT_KLINE_BASE.to_string() }
fn default_eastmoney_hot_url() -> String { EASTMONEY_HOT_API.to_string() }
fn default_allowed_origin() -> String { "*".to_string() }
fn default_log_level() -> String { "info".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            sina_kline_url: default_sina_kline_url(),
            tencent_kline_url: default_tencent_kline_url(),
            eastmoney_hot_url: default_eastmoney_hot_url(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origin: default_allowed_origin(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 加载配置：依次查找配置文件，都不存在时使用默认值，随后应用 `PORT` 覆盖
    ///
    /// 返回配置及其来源文件。配置文件存在但无法解析时返回错误
    pub fn load() -> anyhow::Result<(Self, Option<&'static str>)> {
        let mut loaded = (Self::default(), None);
        for path in CONFIG_PATHS {
            if Path::new(path).exists() {
                let config = Self::from_file(path)
                    .with_context(|| format!("加载配置文件 {} 失败", path))?;
                loaded = (config, Some(path));
                break;
            }
        }

        loaded.0.apply_port_override(std::env::var("PORT").ok().as_deref())?;
        Ok(loaded)
    }

    /// 使用 `PORT` 环境变量的值覆盖端口
    pub fn apply_port_override(&mut self, port: Option<&str>) -> anyhow::Result<()> {
        if let Some(raw) = port {
            self.server.port = raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT 环境变量无效: {}", raw))?;
        }
        Ok(())
    }

    /// 获取服务器绑定地址
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
