//! Command Handlers 实现
//!
//! 每个命令对应 [`Workbench`](crate::application::Workbench) 上的一个方法

mod history_handlers;
mod trash_handlers;
mod tree_handlers;
