//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 外部协作者端口（时钟、用户提示、删除确认）
//! - workbench: 持有作品快照与撤销历史的状态存储
//! - commands: 命令及其处理方法
//! - queries: 大纲与回收站查询
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod workbench;

#[cfg(test)]
pub(crate) mod testing;

pub use commands::*;
pub use error::ApplicationError;
pub use ports::{
    ClockPort, ConfirmRequest, ConfirmationPort, Notification, NotificationLevel, NotifierPort,
};
pub use queries::{build_outline, list_trash, OutlineEntry, TrashEntryView};
pub use workbench::{Workbench, WorkbenchSettings};
