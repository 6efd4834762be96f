//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（workbench.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["workbench", "workbench.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `WORKBENCH_`，层级分隔符 `__`）
/// 2. 配置文件（workbench.toml 或 workbench.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `WORKBENCH_HISTORY__MAX_ENTRIES=100`
/// - `WORKBENCH_HISTORY__DEBOUNCE_MS=500`
/// - `WORKBENCH_TRASH__CONFIRM_PURGE=false`
/// - `WORKBENCH_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("history.max_entries", 50)?
        .set_default("history.debounce_ms", 1000)?
        .set_default("trash.confirm_structural_deletes", true)?
        .set_default("trash.confirm_purge", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: WORKBENCH_HISTORY__MAX_ENTRIES=100
    builder = builder.add_source(
        Environment::with_prefix("WORKBENCH")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.history.max_entries == 0 {
        return Err(ConfigError::ValidationError(
            "History max_entries cannot be 0".to_string(),
        ));
    }

    if config.log.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Log level cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Workbench Configuration ===");
    tracing::info!("History Max Entries: {}", config.history.max_entries);
    tracing::info!("History Debounce: {}ms", config.history.debounce_ms);
    tracing::info!(
        "Confirm Structural Deletes: {}",
        config.trash.confirm_structural_deletes
    );
    tracing::info!("Confirm Purge: {}", config.trash.confirm_purge);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("Log JSON: {}", config.log.json);
    tracing::info!("===============================");
}
