//! 存储标量值

use std::fmt;

/// 存储标量值
///
/// 层级存储中一个命名值的类型化表示，
/// 扁平化时按其自然字符串形式写入配置数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyValue {
    /// 字符串值
    String(String),
    /// 含未展开环境变量引用的字符串值（读取时不做展开）
    ExpandString(String),
    /// 32 位无符号整数值
    DWord(u32),
    /// 64 位无符号整数值
    QWord(u64),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) | Self::ExpandString(value) => f.write_str(value),
            Self::DWord(value) => write!(f, "{}", value),
            Self::QWord(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for KeyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<u32> for KeyValue {
    fn from(value: u32) -> Self {
        Self::DWord(value)
    }
}

impl From<u64> for KeyValue {
    fn from(value: u64) -> Self {
        Self::QWord(value)
    }
}
