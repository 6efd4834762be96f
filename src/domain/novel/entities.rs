//! Novel Context - Entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemId, ItemKind};

/// 每个节最多保留的自动快照数（手动快照不受限制）
pub const MAX_AUTO_SNAPSHOTS: usize = 20;

/// 节快照类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SnapshotKind {
    Auto,
    Manual,
}

/// 节内容的时间点副本，与撤销历史无关
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSnapshot {
    pub id: ItemId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub kind: SnapshotKind,
}

/// 节 - 最小可编辑正文单位
///
/// 不变量:
/// - 任意时刻只属于一个章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: ItemId,
    pub content: String,
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub snapshots: Vec<SectionSnapshot>,
}

impl Section {
    pub fn new(content: impl Into<String>) -> Self {
        Self::with_id(ItemId::new(), content)
    }

    pub fn with_id(id: impl Into<ItemId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            events: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    /// 记录当前内容的快照，最新的排在最前
    ///
    /// 内容与最近一次快照相同则不重复记录，返回 None。
    pub fn take_snapshot(&mut self, kind: SnapshotKind, now: DateTime<Utc>) -> Option<ItemId> {
        if self
            .snapshots
            .first()
            .is_some_and(|latest| latest.content == self.content)
        {
            return None;
        }

        let id = ItemId::new();
        self.snapshots.insert(
            0,
            SectionSnapshot {
                id: id.clone(),
                content: self.content.clone(),
                timestamp: now,
                kind,
            },
        );

        let mut autos = 0;
        self.snapshots.retain(|snapshot| {
            if snapshot.kind == SnapshotKind::Manual {
                return true;
            }
            autos += 1;
            autos <= MAX_AUTO_SNAPSHOTS
        });

        Some(id)
    }

    /// 将内容回退到指定快照，快照列表本身保持不变
    pub fn restore_snapshot(&mut self, snapshot_id: &ItemId) -> bool {
        match self.snapshots.iter().find(|s| &s.id == snapshot_id) {
            Some(snapshot) => {
                self.content = snapshot.content.clone();
                true
            }
            None => false,
        }
    }
}

/// 章节状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChapterStatus {
    #[default]
    Draft,
    Completed,
}

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

/// 章节内 AI 对话记录，对本模块不透明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// 章 - 叙事内容单位
///
/// 不变量:
/// - 存活期间 sections 永不为空（由移动/删除接口保证）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ItemId,
    pub title: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub outline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_rules: Option<String>,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub status: ChapterStatus,
}

impl Chapter {
    /// 新建章节，自带一个空节
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new(),
            title: title.into(),
            sections: vec![Section::new("")],
            outline: String::new(),
            local_rules: None,
            chat_history: Vec::new(),
            last_modified: now,
            status: ChapterStatus::Draft,
        }
    }

    pub fn with_sections(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        sections: Vec<Section>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            sections,
            outline: String::new(),
            local_rules: None,
            chat_history: Vec::new(),
            last_modified: now,
            status: ChapterStatus::Draft,
        }
    }

    pub fn section(&self, section_id: &ItemId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == section_id)
    }

    pub fn contains_section(&self, section_id: &ItemId) -> bool {
        self.section(section_id).is_some()
    }
}

/// 卷 - 章之上的一层分组，只能包含章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub collapsed: bool,
}

impl Volume {
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_chapters(ItemId::new(), title, Vec::new())
    }

    pub fn with_chapters(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        chapters: Vec<Chapter>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            chapters,
            collapsed: false,
        }
    }
}

/// 根层级节点：卷或章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NovelItem {
    Volume(Volume),
    Chapter(Chapter),
}

impl NovelItem {
    pub fn id(&self) -> &ItemId {
        match self {
            NovelItem::Volume(v) => &v.id,
            NovelItem::Chapter(c) => &c.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            NovelItem::Volume(v) => &v.title,
            NovelItem::Chapter(c) => &c.title,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            NovelItem::Volume(_) => ItemKind::Volume,
            NovelItem::Chapter(_) => ItemKind::Chapter,
        }
    }

    pub fn as_chapter(&self) -> Option<&Chapter> {
        match self {
            NovelItem::Chapter(c) => Some(c),
            NovelItem::Volume(_) => None,
        }
    }

    pub fn as_volume(&self) -> Option<&Volume> {
        match self {
            NovelItem::Volume(v) => Some(v),
            NovelItem::Chapter(_) => None,
        }
    }

    pub fn is_volume(&self) -> bool {
        matches!(self, NovelItem::Volume(_))
    }
}

impl From<Chapter> for NovelItem {
    fn from(chapter: Chapter) -> Self {
        NovelItem::Chapter(chapter)
    }
}

impl From<Volume> for NovelItem {
    fn from(volume: Volume) -> Self {
        NovelItem::Volume(volume)
    }
}

/// 世界观条目（人物、地点、势力等），不属于章节树
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldEntity {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl WorldEntity {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            category: category.into(),
            description: String::new(),
        }
    }
}

/// 全局写作规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: ItemId,
    pub content: String,
}

impl Rule {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(),
            content: content.into(),
        }
    }
}
