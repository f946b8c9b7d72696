//! 配置构建器扩展
//!
//! 为配置构建器提供注册层级键值存储配置节的便捷方法。

use keytree_common::ConfigResult;
use keytree_config_abstractions::{KeyNode, RootAccessor};

use crate::builder::ConfigBuilder;
use crate::source::KeyTreeConfigSource;

/// 层级键值存储配置扩展 trait
pub trait KeyTreeConfigExt: Sized {
    /// 注册指定配置节路径的层级键值存储配置源
    fn add_key_tree_section<N>(
        self,
        root: RootAccessor<N>,
        section_path: &str,
    ) -> ConfigResult<Self>
    where
        N: KeyNode + 'static;

    /// 注册配置源并自定义其设置
    ///
    /// `configure` 在配置源通过参数校验之后、注册之前调用，
    /// 可以设置根前缀和数据适配器。
    fn add_key_tree_section_with<N, F>(
        self,
        root: RootAccessor<N>,
        section_path: &str,
        configure: F,
    ) -> ConfigResult<Self>
    where
        N: KeyNode + 'static,
        F: FnOnce(KeyTreeConfigSource<N>) -> KeyTreeConfigSource<N>;
}

impl KeyTreeConfigExt for ConfigBuilder {
    fn add_key_tree_section<N>(
        self,
        root: RootAccessor<N>,
        section_path: &str,
    ) -> ConfigResult<Self>
    where
        N: KeyNode + 'static,
    {
        self.add_key_tree_section_with(root, section_path, |source| source)
    }

    fn add_key_tree_section_with<N, F>(
        self,
        root: RootAccessor<N>,
        section_path: &str,
        configure: F,
    ) -> ConfigResult<Self>
    where
        N: KeyNode + 'static,
        F: FnOnce(KeyTreeConfigSource<N>) -> KeyTreeConfigSource<N>,
    {
        let source = KeyTreeConfigSource::new(root, section_path)?;
        Ok(self.add_source(configure(source)))
    }
}
