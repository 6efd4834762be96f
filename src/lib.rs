//! Novel Workbench - 小说写作工作台核心
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Novel Context: 卷/章/节树、世界观、规则、回收站、拖放移动
//! - History: 当前章节的有界防抖撤销栈
//!
//! 应用层 (application/):
//! - Ports: 时钟、用户提示、删除确认
//! - Workbench: 持有作品快照的显式状态存储
//! - Commands / Queries: 命令处理与大纲、回收站查询
//!
//! 基础设施层 (infrastructure/):
//! - Clock: 系统时钟、虚拟时钟
//! - Memory: 记录型通知器、脚本化确认
//! - Events: 日志通知器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use application::{ApplicationError, Workbench, WorkbenchSettings};
pub use crate::config::{load_config, AppConfig};
pub use domain::novel::{Novel, NovelError};
