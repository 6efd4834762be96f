//! 应用层 - 命令（写操作）
//!
//! 每个命令返回新的作品快照，由宿主提交到自己的状态存储

mod history_commands;
mod trash_commands;
mod tree_commands;

pub mod handlers;

pub use history_commands::*;
pub use trash_commands::*;
pub use tree_commands::*;
