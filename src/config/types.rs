//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;

use crate::domain::history::{HistoryLimits, DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_ENTRIES};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 撤销历史配置
    #[serde(default)]
    pub history: HistoryConfig,

    /// 回收站配置
    #[serde(default)]
    pub trash: TrashConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 撤销历史配置
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    /// 每个章节最多保留的历史条数
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// 正文编辑的防抖静默期（毫秒）
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS as u64
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl HistoryConfig {
    pub fn limits(&self) -> HistoryLimits {
        HistoryLimits {
            max_entries: self.max_entries,
            debounce: chrono::Duration::milliseconds(self.debounce_ms.min(i64::MAX as u64) as i64),
        }
    }
}

/// 回收站配置
#[derive(Debug, Clone, Deserialize)]
pub struct TrashConfig {
    /// 删除卷/章前是否询问
    #[serde(default = "default_true")]
    pub confirm_structural_deletes: bool,

    /// 永久删除、清空回收站前是否询问
    #[serde(default = "default_true")]
    pub confirm_purge: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TrashConfig {
    fn default() -> Self {
        Self {
            confirm_structural_deletes: true,
            confirm_purge: true,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
