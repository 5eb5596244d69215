//! 股票行情代理服务
//!
//! 从第三方行情源获取日K线和热门股票数据，统一为 JSON 格式后对外提供
//! 数据来源：新浪财经、腾讯财经、东方财富

mod config;     // 配置加载
mod error;      // 接口错误类型
mod handlers;   // HTTP 请求处理器
mod middleware; // 中间件
mod models;     // 数据模型定义
mod services;   // 业务逻辑服务

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use crate::config::AppConfig;
use crate::middleware::{cors_layer, json_error_handlers};
use crate::services::stock::StockService;

/// 应用程序入口
///
/// 启动 HTTP 服务器，默认监听 0.0.0.0:3001
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let (config, source) = AppConfig::load()?;

    // 初始化日志系统，RUST_LOG 优先于配置文件
    env_logger::init_from_env(Env::default().default_filter_or(config.log.level.as_str()));

    match source {
        Some(path) => log::info!("从 {} 加载配置成功", path),
        None => log::info!("未找到配置文件，使用默认配置"),
    }

    let stock_service = web::Data::new(StockService::new(&config.upstream)?);

    let bind_addr = config.bind_addr();
    let allowed_origin = config.cors.allowed_origin.clone();
    log::info!("启动股票行情代理服务: http://{}", bind_addr);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(stock_service.clone())
            .wrap(json_error_handlers())
            .wrap(Logger::default())  // 添加请求日志中间件
            .wrap(cors_layer(&allowed_origin))  // 跨域
            .configure(handlers::config)  // 配置路由
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(bind_addr)?.run().await?;
    Ok(())
}
