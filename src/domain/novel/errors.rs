//! Novel Context - Errors
//!
//! 错误信息直接作为用户提示文本展示

use thiserror::Error;

use super::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NovelError {
    #[error("无法删除：每个章节至少需要保留一个节 (章节 {chapter_id})")]
    LastSection { chapter_id: ItemId },

    #[error("无法恢复节 {section_id}：原章节已不存在，且当前没有打开的章节")]
    RestoreTargetMissing {
        section_id: ItemId,
        origin_chapter_id: ItemId,
    },

    #[error("id 冲突：{0} 已存在于作品中")]
    IdConflict(ItemId),

    #[error("标题不能为空")]
    EmptyTitle,

    #[error("节点不存在: {0}")]
    NotFound(ItemId),
}
