//! Domain Layer - 领域层
//!
//! 包含两个部分:
//! - Novel Context: 作品树、移动、回收站
//! - History: 当前章节的撤销/重做历史

pub mod history;
pub mod novel;
