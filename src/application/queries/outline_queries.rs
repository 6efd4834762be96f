//! Outline Queries - 章节大纲与回收站列表

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::workbench::Workbench;
use crate::domain::novel::{Chapter, ItemId, ItemKind, Novel, NovelItem, TrashItem};

/// 大纲中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEntry {
    pub id: ItemId,
    pub kind: ItemKind,
    pub title: String,
    /// 0 为根层级，1 为卷内章节
    pub depth: usize,
    /// 卷内章节所属的卷
    pub volume_id: Option<ItemId>,
    /// 章节在文档顺序中的序号（从 1 开始），卷为 None
    pub chapter_number: Option<usize>,
    pub section_count: usize,
    pub collapsed: bool,
    pub active: bool,
}

/// 回收站列表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashEntryView {
    pub id: ItemId,
    pub kind: ItemKind,
    pub label: String,
    pub deleted_at: DateTime<Utc>,
}

impl From<&TrashItem> for TrashEntryView {
    fn from(entry: &TrashItem) -> Self {
        Self {
            id: entry.id().clone(),
            kind: entry.kind(),
            label: entry.label(),
            deleted_at: entry.deleted_at(),
        }
    }
}

/// 按文档顺序展开章节树
pub fn build_outline(novel: &Novel) -> Vec<OutlineEntry> {
    let active = novel.active_chapter_id();
    let mut entries = Vec::new();
    let mut number = 0;

    for item in novel.items() {
        match item {
            NovelItem::Chapter(chapter) => {
                number += 1;
                entries.push(chapter_entry(chapter, None, number, active));
            }
            NovelItem::Volume(volume) => {
                entries.push(OutlineEntry {
                    id: volume.id.clone(),
                    kind: ItemKind::Volume,
                    title: volume.title.clone(),
                    depth: 0,
                    volume_id: None,
                    chapter_number: None,
                    section_count: 0,
                    collapsed: volume.collapsed,
                    active: false,
                });
                for chapter in &volume.chapters {
                    number += 1;
                    entries.push(chapter_entry(chapter, Some(&volume.id), number, active));
                }
            }
        }
    }
    entries
}

fn chapter_entry(
    chapter: &Chapter,
    volume_id: Option<&ItemId>,
    number: usize,
    active: Option<&ItemId>,
) -> OutlineEntry {
    OutlineEntry {
        id: chapter.id.clone(),
        kind: ItemKind::Chapter,
        title: chapter.title.clone(),
        depth: usize::from(volume_id.is_some()),
        volume_id: volume_id.cloned(),
        chapter_number: Some(number),
        section_count: chapter.sections.len(),
        collapsed: false,
        active: active == Some(&chapter.id),
    }
}

/// 回收站列表，最近删除的在前
pub fn list_trash(novel: &Novel) -> Vec<TrashEntryView> {
    novel.trash().iter().map(TrashEntryView::from).collect()
}

impl Workbench {
    /// 当前快照
    pub fn novel(&self) -> Arc<Novel> {
        Arc::clone(&self.novel)
    }

    /// 文档顺序的章节序列
    pub fn chapters(&self) -> Vec<&Chapter> {
        self.novel.chapters()
    }

    pub fn active_chapter(&self) -> Option<&Chapter> {
        self.novel.active_chapter()
    }

    pub fn outline(&self) -> Vec<OutlineEntry> {
        build_outline(&self.novel)
    }

    /// 当前章节之前的最多 `count` 个章节，用作写作上下文
    pub fn previous_chapters(&self, count: usize) -> Vec<&Chapter> {
        match self.novel.active_chapter_id() {
            Some(id) => self.novel.previous_chapters(id, count),
            None => Vec::new(),
        }
    }

    pub fn trash(&self) -> Vec<TrashEntryView> {
        list_trash(&self.novel)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
