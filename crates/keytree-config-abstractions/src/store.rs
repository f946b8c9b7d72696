//! 层级键值存储抽象接口

use crate::value::KeyValue;
use keytree_common::ConfigResult;

/// 层级存储节点 trait
///
/// 定义从层级键值存储读取子键和值的统一接口。
/// 每个打开的节点都是一个独立的句柄，在离开作用域时释放，
/// 无论遍历正常完成还是中途失败。
pub trait KeyNode: Sized {
    /// 打开相对路径下的子树
    ///
    /// 路径以 `/` 或 `\` 分隔。子树不存在时返回 `Ok(None)`。
    fn open_subkey(&self, path: &str) -> ConfigResult<Option<Self>>;

    /// 枚举子键名称
    ///
    /// 顺序由存储决定，不保证稳定。
    fn subkey_names(&self) -> ConfigResult<Vec<String>>;

    /// 按名称打开子键
    ///
    /// 名称来自 `subkey_names` 时假定子键存在，单次加载期间
    /// 不考虑外部并发修改；访问失败（如权限不足）通过错误传播。
    fn open_child(&self, name: &str) -> ConfigResult<Self>;

    /// 枚举值名称
    fn value_names(&self) -> ConfigResult<Vec<String>>;

    /// 按名称读取值
    ///
    /// 值为空时返回 `Ok(None)`。
    fn read_value(&self, name: &str) -> ConfigResult<Option<KeyValue>>;
}

/// 根节点访问器
///
/// 由调用方提供，每次加载时调用一次。返回 `Ok(None)` 表示根不可用，
/// 加载将以致命错误失败；返回 `Err` 时错误原样向调用方传播。
pub type RootAccessor<N> = Box<dyn Fn() -> ConfigResult<Option<N>> + Send + Sync>;
