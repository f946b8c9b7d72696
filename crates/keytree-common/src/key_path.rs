//! 组合键路径工具
//!
//! 扁平化命名空间中的组合键由路径段用保留分隔符连接而成，
//! 与配置框架自身的路径约定保持一致。

/// 组合键路径分隔符
pub const KEY_DELIMITER: &str = ":";

/// 将路径段连接为组合键
pub fn combine<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut key = String::new();
    for (index, segment) in segments.into_iter().enumerate() {
        if index > 0 {
            key.push_str(KEY_DELIMITER);
        }
        key.push_str(segment.as_ref());
    }
    key
}
