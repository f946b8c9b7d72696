//! 扁平化配置数据类型

use std::collections::HashMap;

/// 扁平化配置数据
///
/// 组合键到配置值的映射。值为 `None` 表示"键存在但值为空"，
/// 与"键不存在"是两种不同的状态，配置框架在绑定时会区分对待。
/// 组合键在一次遍历内唯一，重复写入时后写入者覆盖先写入者。
pub type ConfigData = HashMap<String, Option<String>>;
