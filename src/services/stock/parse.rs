//! 数值解析辅助函数
//!
//! 上游返回的数值字段经常是字符串，且偶有脏数据。单个字段解析失败时
//! 一律回退为 0，不让整个请求失败。

use serde_json::Value;

/// 解析浮点数，失败或非有限值时返回 0
pub fn parse_f64_or_zero(s: &str) -> f64 {
    match s.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// 解析非负整数，失败时返回 0
///
/// 形如 "723067.0" 的小数按整数部分处理，负数返回 0
pub fn parse_u64_or_zero(s: &str) -> u64 {
    let s = s.trim();
    if let Ok(n) = s.parse::<u64>() {
        return n;
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => n.trunc() as u64,
        _ => 0,
    }
}

/// 从 JSON 字段读取浮点数，兼容字符串和数字两种形式
pub fn value_f64_or_zero(value: &Value) -> f64 {
    match value {
        Value::String(s) => parse_f64_or_zero(s),
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

/// 从 JSON 字段读取非负整数，兼容字符串和数字两种形式
pub fn value_u64_or_zero(value: &Value) -> u64 {
    match value {
        Value::String(s) => parse_u64_or_zero(s),
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.trunc() as u64))
            .unwrap_or(0),
        _ => 0,
    }
}
