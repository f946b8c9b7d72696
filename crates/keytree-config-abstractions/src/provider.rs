//! 配置提供者抽象接口

use keytree_common::ConfigResult;

/// 配置提供者 trait
///
/// 定义配置框架所需的最小"先加载后查询"契约。
pub trait ConfigProvider: Send + Sync {
    /// 加载配置数据
    ///
    /// 每次调用都是对存储当前状态的一次完整的全新读取，
    /// 调用之间不缓存任何结果。
    fn load(&mut self) -> ConfigResult<()>;

    /// 按组合键查询配置值
    ///
    /// 外层 `None` 表示键不存在；`Some(None)` 表示键存在但值为空。
    fn try_get(&self, key: &str) -> Option<Option<&str>>;

    /// 获取提供者名称
    fn name(&self) -> &str;
}
