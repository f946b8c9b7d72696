//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置节路径不能为空")]
    EmptySectionPath,

    #[error("根访问器必须返回非空的根节点")]
    MissingRoot,

    #[error("存储访问失败: {source}")]
    StoreAccessFailure {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ConfigError {
    /// 创建存储访问失败错误
    pub fn store_access(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::StoreAccessFailure {
            source: source.into(),
        }
    }
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
