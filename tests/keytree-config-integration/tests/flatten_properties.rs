//! Centralized integration tests for keytree-config-impl crate
//!
//! 扁平化性质与端到端场景测试。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use keytree_common::{ConfigData, ConfigError};
use keytree_config_abstractions::{ConfigProvider, RootAccessor};
use keytree_config_impl::{
    ConfigBuilder, KeyTreeConfigExt, KeyTreeConfigProvider, KeyTreeConfigSource, MemoryKey,
};
use serde_json::json;

/// 辅助函数：包装内存存储为根访问器
fn root_of(store: MemoryKey) -> RootAccessor<MemoryKey> {
    Box::new(move || Ok(Some(store.clone())))
}

/// 辅助函数：根下 A -> B -> C.D = "5" 的存储
fn sample_store() -> MemoryKey {
    MemoryKey::new().with_subkey(
        "A",
        MemoryKey::new().with_subkey("B", MemoryKey::new().with_value("C.D", "5")),
    )
}

/// 辅助函数：加载一次并捕获发布前的完整数据
fn load_and_capture(store: MemoryKey, section: &str, root_section: Option<&str>) -> ConfigData {
    let captured = Arc::new(Mutex::new(ConfigData::new()));
    let snapshot = Arc::clone(&captured);

    let mut source = KeyTreeConfigSource::new(root_of(store), section).unwrap();
    if let Some(prefix) = root_section {
        source = source.with_root_section(prefix);
    }
    let source = source.with_data_adapter(move |data| {
        *snapshot.lock().unwrap() = data.clone();
    });

    let mut provider = KeyTreeConfigProvider::new(source);
    provider.load().unwrap();

    let data = captured.lock().unwrap().clone();
    data
}

/// 测试同一存储状态下重复加载产生相同数据 (幂等性)
#[test]
fn test_repeated_load_is_idempotent() {
    let captured = Arc::new(Mutex::new(ConfigData::new()));
    let snapshot = Arc::clone(&captured);
    let source = KeyTreeConfigSource::new(root_of(sample_store()), "A")
        .unwrap()
        .with_data_adapter(move |data| {
            *snapshot.lock().unwrap() = data.clone();
        });
    let mut provider = KeyTreeConfigProvider::new(source);

    provider.load().unwrap();
    let first = captured.lock().unwrap().clone();

    provider.load().unwrap();
    let second = captured.lock().unwrap().clone();

    assert_eq!(first, second, "外部未修改时两次加载应结构相等");
}

/// 测试不同遍历路径产生的组合键互不相同 (键唯一性)
#[test]
fn test_composite_keys_are_unique() {
    let store = MemoryKey::new().with_subkey(
        "S",
        MemoryKey::new()
            .with_subkey("Left", MemoryKey::new().with_value("Mode", "1"))
            .with_subkey("Right", MemoryKey::new().with_value("Mode", "2"))
            .with_value("Mode", "0"),
    );

    let data = load_and_capture(store, "S", None);

    assert_eq!(data.len(), 3, "三条遍历路径应产生三个不同的组合键");
    assert_eq!(data["Left:Mode"], Some("1".to_string()));
    assert_eq!(data["Right:Mode"], Some("2".to_string()));
    assert_eq!(data["Mode"], Some("0".to_string()));
}

/// 测试根前缀不变式：每个键以前缀开头，去掉前缀后与无前缀运行一致
#[test]
fn test_root_section_prefix_invariant() {
    let plain = load_and_capture(sample_store(), "A", None);
    let prefixed = load_and_capture(sample_store(), "A", Some("X"));

    assert_eq!(plain.len(), prefixed.len());

    let mut stripped = ConfigData::new();
    for (key, value) in prefixed {
        assert!(key.starts_with("X:"), "前缀运行的键必须以 X: 开头: {}", key);
        stripped.insert(key["X:".len()..].to_string(), value);
    }

    assert_eq!(stripped, plain, "去掉前缀后两次运行的数据应完全一致");
}

/// 测试配置节不存在时得到空数据且适配器不被调用 (宽容性)
#[test]
fn test_missing_section_skips_adapter() {
    let adapter_called = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&adapter_called);

    let source = KeyTreeConfigSource::new(root_of(sample_store()), "Z")
        .unwrap()
        .with_data_adapter(move |_| {
            flag.store(true, Ordering::SeqCst);
        });
    let mut provider = KeyTreeConfigProvider::new(source);

    let result = provider.load();

    assert!(result.is_ok(), "配置节不存在不应报错");
    assert!(
        !adapter_called.load(Ordering::SeqCst),
        "空数据路径上适配器不应被调用"
    );
    assert_eq!(provider.try_get("B:CD"), None);
}

/// 测试适配器观察到完整数据且其增删改严格生效于最终结果
#[test]
fn test_adapter_effects_are_strictly_last() {
    let source = KeyTreeConfigSource::new(root_of(sample_store()), "A")
        .unwrap()
        .with_data_adapter(|data| {
            // 遍历产生的条目此时应已全部就位
            assert!(data.contains_key("B:CD"));
            data.remove("B:CD");
            data.insert("B:New".to_string(), Some("v".to_string()));
        });
    let mut provider = KeyTreeConfigProvider::new(source);

    provider.load().unwrap();

    assert_eq!(provider.try_get("B:CD"), None, "适配器删除的条目不应存在");
    assert_eq!(provider.try_get("B:New"), Some(Some("v")));
}

/// 测试 `.` 的移除只作用于值名段，兄弟路径段不受影响
#[test]
fn test_sanitization_confined_to_value_segment() {
    let store = MemoryKey::new().with_subkey(
        "S",
        MemoryKey::new().with_subkey("A.B", MemoryKey::new().with_value("C.D", "1")),
    );

    let data = load_and_capture(store, "S", None);

    assert_eq!(
        data["A.B:CD"],
        Some("1".to_string()),
        "子键名中的 `.` 应原样保留"
    );
}

/// 测试值名包含分隔符时与路径派生的键静默合并（文档化的歧义）
#[test]
fn test_delimiter_in_value_name_merges_paths() {
    // 子键 B 的值 C 与节点自身的值 "B:C" 产生同一组合键；
    // 子键先于值访问，节点自身的值后写入并覆盖
    let store = MemoryKey::new().with_subkey(
        "S",
        MemoryKey::new()
            .with_subkey("B", MemoryKey::new().with_value("C", "1"))
            .with_value("B:C", "2"),
    );

    let data = load_and_capture(store, "S", None);

    assert_eq!(data.len(), 1);
    assert_eq!(data["B:C"], Some("2".to_string()));
}

/// 测试从 JSON 构建的内存树端到端扁平化
#[test]
fn test_builder_end_to_end_with_json_store() -> anyhow::Result<()> {
    let store = MemoryKey::from_json(&json!({
        "Dialer": {
            "UCC": { "Mode": 1 },
            "SqlAdapter": {
                "UseCustomDatabaseConnection": 0,
                "SQLConnection": "Data Source=localhost",
                "Quota.Bytes": 4294967296u64
            },
            "Telemetry": { "Enabled": true, "Tag": null }
        }
    }))?;

    let config = ConfigBuilder::new()
        .add_key_tree_section_with(root_of(store), "Dialer", |source| {
            source.with_root_section("Dialer")
        })?
        .build()?;

    assert_eq!(config.get("Dialer:UCC:Mode"), Some("1"));
    assert_eq!(config.get("Dialer:SqlAdapter:UseCustomDatabaseConnection"), Some("0"));
    assert_eq!(config.get("Dialer:SqlAdapter:SQLConnection"), Some("Data Source=localhost"));
    assert_eq!(
        config.get("Dialer:SqlAdapter:QuotaBytes"),
        Some("4294967296"),
        "值名中的 `.` 应被移除"
    );
    assert_eq!(config.get("Dialer:Telemetry:Enabled"), Some("true"));
    assert_eq!(
        config.try_get("Dialer:Telemetry:Tag"),
        Some(None),
        "JSON null 应成为值为空的配置项"
    );

    Ok(())
}

/// 测试后注册的配置源在查询时优先
#[test]
fn test_later_source_wins() -> anyhow::Result<()> {
    let base = MemoryKey::new().with_subkey(
        "S",
        MemoryKey::new().with_value("Mode", "base").with_value("Only", "base"),
    );
    let overlay =
        MemoryKey::new().with_subkey("S", MemoryKey::new().with_value("Mode", "overlay"));

    let config = ConfigBuilder::new()
        .add_key_tree_section(root_of(base), "S")?
        .add_key_tree_section(root_of(overlay), "S")?
        .build()?;

    assert_eq!(config.provider_count(), 2);
    assert_eq!(config.get("Mode"), Some("overlay"), "后注册的提供者应覆盖先注册的");
    assert_eq!(config.get("Only"), Some("base"), "未被覆盖的键应回退到先注册的提供者");

    Ok(())
}

/// 测试空白配置节路径在注册时被拒绝
#[test]
fn test_blank_section_path_rejected_at_registration() {
    let result = ConfigBuilder::new().add_key_tree_section(root_of(sample_store()), "   ");

    assert!(matches!(result, Err(ConfigError::EmptySectionPath)));
}

/// 测试根访问器失败时构建配置根失败
#[test]
fn test_accessor_failure_aborts_build() {
    let root: RootAccessor<MemoryKey> =
        Box::new(|| Err(ConfigError::store_access("注册表不可用")));

    let result = ConfigBuilder::new()
        .add_key_tree_section(root, "S")
        .and_then(ConfigBuilder::build);

    assert!(matches!(result, Err(ConfigError::StoreAccessFailure { .. })));
}

/// 测试重新加载反映存储的最新状态
#[test]
fn test_reload_reads_fresh_state() -> anyhow::Result<()> {
    let shared = Arc::new(Mutex::new(
        MemoryKey::new().with_subkey("S", MemoryKey::new().with_value("Mode", "before")),
    ));
    let store = Arc::clone(&shared);
    let root: RootAccessor<MemoryKey> = Box::new(move || Ok(Some(store.lock().unwrap().clone())));

    let mut config = ConfigBuilder::new().add_key_tree_section(root, "S")?.build()?;
    assert_eq!(config.get("Mode"), Some("before"));

    *shared.lock().unwrap() =
        MemoryKey::new().with_subkey("S", MemoryKey::new().with_value("Mode", "after"));
    config.reload()?;

    assert_eq!(config.get("Mode"), Some("after"), "重新加载应重新解析根并完整重读");

    Ok(())
}
