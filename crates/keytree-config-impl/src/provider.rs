//! 树形扁平化配置提供者
//!
//! 把层级键值存储的一棵子树深度优先展开为扁平的组合键命名空间。

use keytree_common::{key_path, ConfigData, ConfigError, ConfigResult};
use keytree_config_abstractions::{ConfigProvider, KeyNode};
use tracing::{debug, error, warn};

use crate::source::KeyTreeConfigSource;

/// 树形扁平化配置提供者
///
/// 每次加载都通过根访问器重新解析根节点，对配置节子树做一次
/// 完整的同步遍历，调用之间不保留任何状态。各提供者的加载
/// 互相独立，底层存储支持并发只读访问时无需额外同步。
pub struct KeyTreeConfigProvider<N: KeyNode> {
    source: KeyTreeConfigSource<N>,
    data: ConfigData,
}

impl<N: KeyNode> KeyTreeConfigProvider<N> {
    /// 创建配置提供者
    pub fn new(source: KeyTreeConfigSource<N>) -> Self {
        Self {
            source,
            data: ConfigData::new(),
        }
    }

    /// 读取一个节点及其全部后代
    ///
    /// 先子键后值：节点自身的值是经由该前缀可达的最深的键，
    /// 与类型化绑定器对嵌套对象的预期一致。祖先路径段按值传入
    /// 每层递归调用，遍历过程没有共享的可变栈。打开的子键在其
    /// 子树读取完成或失败后随作用域释放。
    fn read_key(node: &N, prefix: &[String], data: &mut ConfigData) -> ConfigResult<()> {
        for subkey_name in node.subkey_names()? {
            let subkey = node.open_child(&subkey_name)?;
            let mut child_prefix = prefix.to_vec();
            child_prefix.push(subkey_name);
            Self::read_key(&subkey, &child_prefix, data)?;
        }

        for value_name in node.value_names()? {
            let value = node.read_value(&value_name)?;
            let mut segments = prefix.to_vec();
            // 值名中的 `.` 是框架保留的元字符，组合前全部移除；
            // 子键名不做此处理
            segments.push(value_name.replace('.', ""));
            data.insert(
                key_path::combine(&segments),
                value.map(|value| value.to_string()),
            );
        }

        Ok(())
    }
}

impl<N: KeyNode> ConfigProvider for KeyTreeConfigProvider<N> {
    fn load(&mut self) -> ConfigResult<()> {
        debug!("加载配置节: {}", self.source.section_path());

        let root = match self.source.resolve_root()? {
            Some(root) => root,
            None => {
                error!("根访问器返回空，无法加载配置节: {}", self.source.section_path());
                return Err(ConfigError::MissingRoot);
            }
        };

        let section = match root.open_subkey(self.source.section_path())? {
            Some(section) => section,
            None => {
                // 配置节不存在按空数据处理，适配器不参与这条路径
                warn!("配置节不存在: {}", self.source.section_path());
                self.data = ConfigData::new();
                return Ok(());
            }
        };

        let mut prefix = Vec::new();
        if let Some(root_section) = self.source.root_section() {
            if !root_section.trim().is_empty() {
                prefix.push(root_section.to_string());
            }
        }

        let mut data = ConfigData::new();
        Self::read_key(&section, &prefix, &mut data)?;

        self.source.adapt(&mut data);

        debug!(
            "配置节加载完成: {}, 共 {} 个配置项",
            self.source.section_path(),
            data.len()
        );
        self.data = data;
        Ok(())
    }

    fn try_get(&self, key: &str) -> Option<Option<&str>> {
        self.data.get(key).map(|value| value.as_deref())
    }

    fn name(&self) -> &str {
        "KeyTreeConfigProvider"
    }
}
