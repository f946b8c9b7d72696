//! # KeyTree Common
//!
//! 这个 crate 提供了 KeyTree 配置基础设施的公共类型和工具。
//!
//! ## 核心组件
//!
//! - [`ConfigError`] - 配置错误类型
//! - [`ConfigData`] - 扁平化配置数据
//! - [`key_path`] - 组合键路径工具
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 单次加载构造独立数据，天然支持并发的独立遍历
//! - 错误原样传播，除文档化的宽容路径外不吞任何失败

pub mod data;
pub mod errors;
pub mod key_path;

pub use data::*;
pub use errors::*;
