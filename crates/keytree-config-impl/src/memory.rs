//! 内存层级键值存储
//!
//! 以内存树实现层级存储契约，用于测试和演示，
//! 也可以作为进程内配置的数据源。

use std::collections::BTreeMap;

use keytree_common::{ConfigError, ConfigResult};
use keytree_config_abstractions::{KeyNode, KeyValue};
use serde_json::Value;

/// 内存层级键
///
/// 每个键持有若干命名子键和若干命名值。打开子键返回子树的
/// 独立克隆，满足"打开的节点是独立句柄"的存储契约。
#[derive(Debug, Clone, Default)]
pub struct MemoryKey {
    subkeys: BTreeMap<String, MemoryKey>,
    values: BTreeMap<String, Option<KeyValue>>,
}

impl MemoryKey {
    /// 创建空键
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加命名值
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<KeyValue>) -> Self {
        self.values.insert(name.into(), Some(value.into()));
        self
    }

    /// 添加空值
    ///
    /// 名称存在但没有具体值，扁平化后对应值为空的配置项。
    pub fn with_null_value(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), None);
        self
    }

    /// 添加子键
    pub fn with_subkey(mut self, name: impl Into<String>, subkey: MemoryKey) -> Self {
        self.subkeys.insert(name.into(), subkey);
        self
    }

    /// 从 JSON 值构建内存树
    ///
    /// 对象成为子键，`null` 成为空值，字符串和非负整数成为命名值，
    /// 其余标量按其字符串形式存储；数组不被支持。
    pub fn from_json(value: &Value) -> ConfigResult<Self> {
        let members = match value {
            Value::Object(members) => members,
            _ => return Err(ConfigError::store_access("JSON 根必须是对象")),
        };

        let mut key = Self::new();
        for (name, member) in members {
            match member {
                Value::Object(_) => {
                    key.subkeys.insert(name.clone(), Self::from_json(member)?);
                }
                Value::Null => {
                    key.values.insert(name.clone(), None);
                }
                Value::String(text) => {
                    key.values
                        .insert(name.clone(), Some(KeyValue::String(text.clone())));
                }
                Value::Number(number) => {
                    let stored = match number.as_u64() {
                        Some(unsigned) => match u32::try_from(unsigned) {
                            Ok(small) => KeyValue::DWord(small),
                            Err(_) => KeyValue::QWord(unsigned),
                        },
                        None => KeyValue::String(number.to_string()),
                    };
                    key.values.insert(name.clone(), Some(stored));
                }
                Value::Bool(flag) => {
                    key.values
                        .insert(name.clone(), Some(KeyValue::String(flag.to_string())));
                }
                Value::Array(_) => {
                    return Err(ConfigError::store_access(format!(
                        "数组不能作为配置值: {}",
                        name
                    )));
                }
            }
        }

        Ok(key)
    }
}

impl KeyNode for MemoryKey {
    fn open_subkey(&self, path: &str) -> ConfigResult<Option<Self>> {
        let mut current = self;
        for segment in path.split(['/', '\\']).filter(|segment| !segment.is_empty()) {
            match current.subkeys.get(segment) {
                Some(subkey) => current = subkey,
                None => return Ok(None),
            }
        }
        Ok(Some(current.clone()))
    }

    fn subkey_names(&self) -> ConfigResult<Vec<String>> {
        Ok(self.subkeys.keys().cloned().collect())
    }

    fn open_child(&self, name: &str) -> ConfigResult<Self> {
        self.subkeys
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::store_access(format!("子键不存在: {}", name)))
    }

    fn value_names(&self) -> ConfigResult<Vec<String>> {
        Ok(self.values.keys().cloned().collect())
    }

    fn read_value(&self, name: &str) -> ConfigResult<Option<KeyValue>> {
        Ok(self.values.get(name).cloned().flatten())
    }
}
