//! 跨域配置
//!
//! 默认允许任意来源（返回 `*`），也可在配置中指定单个来源

use actix_cors::Cors;
use url::Url;

/// 预检结果缓存时间（秒）
const PREFLIGHT_MAX_AGE: usize = 3600;

/// 根据配置的来源创建跨域中间件，非法的来源回退为 `*`
pub fn cors_layer(allowed_origin: &str) -> Cors {
    let base = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(PREFLIGHT_MAX_AGE);

    let origin = allowed_origin.trim();
    if origin == "*" {
        return base.allow_any_origin().send_wildcard();
    }
    if !is_valid_origin(origin) {
        log::warn!("无效的跨域来源配置: {}，使用 *", allowed_origin);
        return base.allow_any_origin().send_wildcard();
    }
    base.allowed_origin(origin)
}

/// 来源必须形如 `https://example.com[:port]`
fn is_valid_origin(origin: &str) -> bool {
    match Url::parse(origin) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some()
                && url.origin().ascii_serialization() == origin.trim_end_matches('/')
        }
        Err(_) => false,
    }
}
