//! 股票代码与交易所的对应关系

/// 证券交易所
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    Shanghai,
    Shenzhen,
    Beijing,
    HongKong,
}

impl Exchange {
    /// 根据股票代码判断交易所
    ///
    /// 5 位代码为港股；其余按首位数字：6/9 上海，0/2/3 深圳，4/8 北京，
    /// 无法识别时按深圳处理
    pub fn from_code(code: &str) -> Self {
        if is_hk_code(code) {
            return Exchange::HongKong;
        }
        match code.chars().next() {
            Some('6') | Some('9') => Exchange::Shanghai,
            Some('0') | Some('2') | Some('3') => Exchange::Shenzhen,
            Some('4') | Some('8') => Exchange::Beijing,
            _ => Exchange::Shenzhen,
        }
    }

    /// 沪深京代码的上游前缀，港股无前缀
    pub fn prefix(self) -> &'static str {
        match self {
            Exchange::Shanghai => "sh",
            Exchange::Shenzhen => "sz",
            Exchange::Beijing => "bj",
            Exchange::HongKong => "",
        }
    }
}

/// 是否为港股代码（5 位数字）
pub fn is_hk_code(code: &str) -> bool {
    code.len() == 5 && code.bytes().all(|b| b.is_ascii_digit())
}

/// 是否为 A 股代码（6 位数字）
pub fn is_a_share_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

/// 生成带交易所前缀的上游代码，如 `sh600000`
pub fn to_symbol(code: &str) -> String {
    format!("{}{}", Exchange::from_code(code).prefix(), code)
}
