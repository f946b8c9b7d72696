//! # 树形扁平化演示
//!
//! 演示把层级键值存储的一棵子树注册为配置节：
//! - 从 JSON 构建内存层级存储
//! - 注册带根前缀和数据适配器的配置源
//! - 通过配置根做点查询

use keytree_config_abstractions::RootAccessor;
use keytree_config_impl::{ConfigBuilder, KeyTreeConfigExt, MemoryKey};
use serde_json::json;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    info!("树形扁平化演示程序启动");

    // 一棵注册表风格的配置树
    let store = MemoryKey::from_json(&json!({
        "CTI Outbound": {
            "Dialer": {
                "UCC": { "Mode": 1 },
                "SqlAdapter": {
                    "UseCustomDatabaseConnection": 0,
                    "SQLConnection": "Data Source=localhost;Initial Catalog=Outbound"
                }
            },
            "Version.Info": "5.0"
        }
    }))?;

    let root: RootAccessor<MemoryKey> = Box::new(move || Ok(Some(store.clone())));

    let config = ConfigBuilder::new()
        .add_key_tree_section_with(root, "CTI Outbound", |source| {
            source.with_root_section("Outbound").with_data_adapter(|data| {
                data.insert("Outbound:LoadedBy".to_string(), Some("flatten-demo".to_string()));
            })
        })?
        .build()?;

    info!("配置根构建完成，共 {} 个提供者", config.provider_count());

    for key in [
        "Outbound:Dialer:UCC:Mode",
        "Outbound:Dialer:SqlAdapter:UseCustomDatabaseConnection",
        "Outbound:Dialer:SqlAdapter:SQLConnection",
        "Outbound:VersionInfo",
        "Outbound:LoadedBy",
    ] {
        match config.try_get(key) {
            Some(Some(value)) => info!("  {} = {}", key, value),
            Some(None) => info!("  {} = <空值>", key),
            None => info!("  {} 不存在", key),
        }
    }

    info!("演示完成");
    Ok(())
}
