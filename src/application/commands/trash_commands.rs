//! Trash Commands - 回收站

use crate::domain::novel::{DropPosition, ItemId, ItemKind};

/// 将节点移入回收站
#[derive(Debug, Clone)]
pub struct DeleteItem {
    pub kind: ItemKind,
    pub id: ItemId,
}

/// 从回收站恢复
#[derive(Debug, Clone)]
pub struct RestoreItem {
    pub id: ItemId,
}

/// 从回收站拖放到树中指定位置（仅卷/章有意义）
#[derive(Debug, Clone)]
pub struct RestoreItemTo {
    pub id: ItemId,
    pub target_id: Option<ItemId>,
    pub position: DropPosition,
}

/// 永久删除回收站条目
#[derive(Debug, Clone)]
pub struct PurgeItem {
    pub id: ItemId,
}

/// 清空回收站
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTrash;
