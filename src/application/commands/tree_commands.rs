//! Tree Commands - 章节树编辑

use crate::domain::novel::{DropPosition, ItemId, SiblingPosition, SnapshotKind};

/// 新建卷
#[derive(Debug, Clone)]
pub struct AddVolume {
    pub title: String,
}

/// 新建章节；`volume_id` 为空时放到根层级
#[derive(Debug, Clone)]
pub struct AddChapter {
    pub title: String,
    pub volume_id: Option<ItemId>,
}

/// 在章节末尾追加空节；`chapter_id` 为空时使用当前章节
#[derive(Debug, Clone, Default)]
pub struct AddSection {
    pub chapter_id: Option<ItemId>,
}

/// 打开章节
#[derive(Debug, Clone)]
pub struct SelectChapter {
    pub chapter_id: ItemId,
}

/// 重命名卷或章
#[derive(Debug, Clone)]
pub struct RenameItem {
    pub item_id: ItemId,
    pub title: String,
}

/// 展开/折叠卷
#[derive(Debug, Clone)]
pub struct ToggleVolume {
    pub volume_id: ItemId,
}

/// 编辑节正文（按键驱动，带防抖记录历史）
#[derive(Debug, Clone)]
pub struct UpdateSectionContent {
    pub section_id: ItemId,
    pub content: String,
}

/// 拖放移动卷或章；`target_id` 为空表示拖到空白处
#[derive(Debug, Clone)]
pub struct MoveItem {
    pub dragged_id: ItemId,
    pub target_id: Option<ItemId>,
    pub position: DropPosition,
}

/// 在当前章节内拖放重排节
#[derive(Debug, Clone)]
pub struct MoveSection {
    pub dragged_id: ItemId,
    pub target_id: ItemId,
    pub position: SiblingPosition,
}

/// 新建世界观条目
#[derive(Debug, Clone)]
pub struct AddWorldEntity {
    pub name: String,
    pub category: String,
    pub description: String,
}

/// 新建写作规则
#[derive(Debug, Clone)]
pub struct AddRule {
    pub content: String,
}

/// 为节拍摄快照
#[derive(Debug, Clone)]
pub struct TakeSectionSnapshot {
    pub section_id: ItemId,
    pub kind: SnapshotKind,
}

/// 将节回退到快照
#[derive(Debug, Clone)]
pub struct RestoreSectionSnapshot {
    pub section_id: ItemId,
    pub snapshot_id: ItemId,
}
