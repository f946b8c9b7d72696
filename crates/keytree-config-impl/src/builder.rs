//! 配置构建器与配置根
//!
//! 聚合多个配置源的最小"先加载后查询"管道。

use keytree_common::ConfigResult;
use keytree_config_abstractions::{ConfigProvider, ConfigSource};
use tracing::{debug, info};

/// 配置构建器
///
/// 收集配置源，构建时依次实例化并加载对应的提供者。
pub struct ConfigBuilder {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigBuilder {
    /// 创建新的配置构建器
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// 添加配置源
    pub fn add_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// 构建配置根
    ///
    /// 依次构建并加载所有提供者；任何一个提供者加载失败都会
    /// 原样向调用方传播，由调用方决定崩溃、记录还是忽略。
    pub fn build(self) -> ConfigResult<Configuration> {
        info!("构建配置根，共有 {} 个配置源", self.sources.len());

        let mut providers = Vec::with_capacity(self.sources.len());
        for source in self.sources {
            let mut provider = source.build();
            provider.load()?;
            debug!("配置提供者加载完成: {}", provider.name());
            providers.push(provider);
        }

        Ok(Configuration { providers })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 配置根
///
/// 已加载提供者的有序集合，查询时后添加的提供者优先。
pub struct Configuration {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl Configuration {
    /// 按组合键查询配置值
    ///
    /// 外层 `None` 表示所有提供者都没有该键；
    /// `Some(None)` 表示键存在但值为空。
    pub fn try_get(&self, key: &str) -> Option<Option<&str>> {
        for provider in self.providers.iter().rev() {
            if let Some(value) = provider.try_get(key) {
                return Some(value);
            }
        }
        None
    }

    /// 按组合键获取非空配置值
    pub fn get(&self, key: &str) -> Option<&str> {
        self.try_get(key).flatten()
    }

    /// 重新加载所有提供者
    ///
    /// 每个提供者重新对其存储做一次完整读取，任何失败原样传播。
    pub fn reload(&mut self) -> ConfigResult<()> {
        info!("重新加载所有配置提供者");

        for provider in &mut self.providers {
            provider.load()?;
        }

        Ok(())
    }

    /// 获取提供者数量
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }
}
