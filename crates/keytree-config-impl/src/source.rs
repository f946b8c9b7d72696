//! 层级键值存储配置源

use keytree_common::{ConfigData, ConfigError, ConfigResult};
use keytree_config_abstractions::{ConfigProvider, ConfigSource, KeyNode, RootAccessor};

use crate::provider::KeyTreeConfigProvider;

/// 配置数据适配器
///
/// 遍历完成后、数据发布前调用一次，可以插入、修改或删除条目。
pub type DataAdapter = Box<dyn Fn(&mut ConfigData) + Send + Sync>;

/// 层级键值存储配置源
///
/// 描述一次扁平化加载的全部输入：根访问器、配置节路径、
/// 可选的根前缀和可选的数据适配器。构造后不可变。
pub struct KeyTreeConfigSource<N: KeyNode> {
    root: RootAccessor<N>,
    section_path: String,
    root_section: Option<String>,
    data_adapter: Option<DataAdapter>,
}

impl<N: KeyNode> KeyTreeConfigSource<N> {
    /// 创建指定配置节路径的配置源
    ///
    /// 配置节路径为空白时立即失败，不进行任何存储访问。
    pub fn new(root: RootAccessor<N>, section_path: impl Into<String>) -> ConfigResult<Self> {
        let section_path = section_path.into();

        if section_path.trim().is_empty() {
            return Err(ConfigError::EmptySectionPath);
        }

        Ok(Self {
            root,
            section_path,
            root_section: None,
            data_adapter: None,
        })
    }

    /// 设置根前缀
    ///
    /// 非空白时作为最外层路径段添加到本配置源产生的每个组合键之前。
    pub fn with_root_section(mut self, root_section: impl Into<String>) -> Self {
        self.root_section = Some(root_section.into());
        self
    }

    /// 设置数据适配器
    pub fn with_data_adapter(
        mut self,
        adapter: impl Fn(&mut ConfigData) + Send + Sync + 'static,
    ) -> Self {
        self.data_adapter = Some(Box::new(adapter));
        self
    }

    /// 获取配置节路径
    pub fn section_path(&self) -> &str {
        &self.section_path
    }

    /// 获取根前缀
    pub fn root_section(&self) -> Option<&str> {
        self.root_section.as_deref()
    }

    /// 调用根访问器解析根节点
    pub(crate) fn resolve_root(&self) -> ConfigResult<Option<N>> {
        (self.root)()
    }

    /// 对加载结果应用数据适配器
    pub(crate) fn adapt(&self, data: &mut ConfigData) {
        if let Some(adapter) = &self.data_adapter {
            adapter(data);
        }
    }
}

impl<N: KeyNode + 'static> ConfigSource for KeyTreeConfigSource<N> {
    fn build(self: Box<Self>) -> Box<dyn ConfigProvider> {
        Box::new(KeyTreeConfigProvider::new(*self))
    }
}
