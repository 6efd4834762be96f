//! Novel Context - 作品限界上下文
//!
//! 职责:
//! - 作品聚合（卷 → 章 → 节 的树，世界观与规则两个平铺集合）
//! - 树访问工具与拖放移动
//! - 回收站：软删除、恢复、永久清除

mod aggregate;
mod entities;
mod errors;
mod moves;
mod trash;
mod value_objects;

pub mod tree;

pub use aggregate::Novel;
pub use entities::{
    Chapter, ChapterStatus, ChatMessage, ChatRole, NovelItem, Rule, Section, SectionSnapshot,
    SnapshotKind, Volume, WorldEntity, MAX_AUTO_SNAPSHOTS,
};
pub use errors::NovelError;
pub use moves::{accepts_drop, insert_item, move_item, move_section};
pub use trash::TrashItem;
pub use value_objects::{DropPosition, ItemId, ItemKind, SiblingPosition};
