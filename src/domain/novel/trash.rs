//! Novel Context - Trash
//!
//! 软删除、按类型分派的恢复、永久清除。
//!
//! 不变量:
//! - 一个 id 任意时刻只存在于 {章节树, 世界观/规则, 回收站} 之一
//! - 删除与恢复都是一次完整的快照替换

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::moves;
use super::tree;
use super::{
    Chapter, DropPosition, ItemId, ItemKind, Novel, NovelError, NovelItem, Rule, Section, Volume,
    WorldEntity,
};

/// 回收站条目
///
/// 所有变体共用 `trashKind` 判别字段。卷和章不保留原位置，
/// 节保留来源章节以便恢复。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "trashKind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrashItem {
    #[serde(rename_all = "camelCase")]
    Volume {
        volume: Volume,
        deleted_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Chapter {
        chapter: Chapter,
        deleted_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Section {
        section: Section,
        deleted_at: DateTime<Utc>,
        origin_chapter_id: ItemId,
        origin_chapter_title: String,
    },
    #[serde(rename_all = "camelCase")]
    WorldEntity {
        entity: WorldEntity,
        deleted_at: DateTime<Utc>,
    },
    #[serde(rename_all = "camelCase")]
    Rule {
        rule: Rule,
        deleted_at: DateTime<Utc>,
    },
}

impl TrashItem {
    pub fn id(&self) -> &ItemId {
        match self {
            TrashItem::Volume { volume, .. } => &volume.id,
            TrashItem::Chapter { chapter, .. } => &chapter.id,
            TrashItem::Section { section, .. } => &section.id,
            TrashItem::WorldEntity { entity, .. } => &entity.id,
            TrashItem::Rule { rule, .. } => &rule.id,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            TrashItem::Volume { .. } => ItemKind::Volume,
            TrashItem::Chapter { .. } => ItemKind::Chapter,
            TrashItem::Section { .. } => ItemKind::Section,
            TrashItem::WorldEntity { .. } => ItemKind::WorldEntity,
            TrashItem::Rule { .. } => ItemKind::Rule,
        }
    }

    pub fn deleted_at(&self) -> DateTime<Utc> {
        match self {
            TrashItem::Volume { deleted_at, .. }
            | TrashItem::Chapter { deleted_at, .. }
            | TrashItem::Section { deleted_at, .. }
            | TrashItem::WorldEntity { deleted_at, .. }
            | TrashItem::Rule { deleted_at, .. } => *deleted_at,
        }
    }

    /// 回收站列表中显示的名称
    pub fn label(&self) -> String {
        match self {
            TrashItem::Volume { volume, .. } => volume.title.clone(),
            TrashItem::Chapter { chapter, .. } => chapter.title.clone(),
            TrashItem::Section {
                section,
                origin_chapter_title,
                ..
            } => {
                let preview: String = section.content.chars().take(20).collect();
                format!("{} · {}", origin_chapter_title, preview)
            }
            TrashItem::WorldEntity { entity, .. } => entity.name.clone(),
            TrashItem::Rule { rule, .. } => rule.content.chars().take(20).collect(),
        }
    }

    /// 条目携带的全部 id（卷含其章节与节）
    pub fn ids(&self) -> Vec<&ItemId> {
        match self {
            TrashItem::Volume { volume, .. } => {
                let mut ids = vec![&volume.id];
                for chapter in &volume.chapters {
                    ids.push(&chapter.id);
                    ids.extend(chapter.sections.iter().map(|s| &s.id));
                }
                ids
            }
            TrashItem::Chapter { chapter, .. } => {
                let mut ids = vec![&chapter.id];
                ids.extend(chapter.sections.iter().map(|s| &s.id));
                ids
            }
            TrashItem::Section { section, .. } => vec![&section.id],
            TrashItem::WorldEntity { entity, .. } => vec![&entity.id],
            TrashItem::Rule { rule, .. } => vec![&rule.id],
        }
    }

    /// 卷/章条目还原为树节点
    fn into_node(self) -> Option<NovelItem> {
        match self {
            TrashItem::Volume { volume, .. } => Some(NovelItem::Volume(volume)),
            TrashItem::Chapter { chapter, .. } => Some(NovelItem::Chapter(chapter)),
            _ => None,
        }
    }
}

impl Novel {
    /// 将节点移入回收站
    ///
    /// 删除章节唯一的节会被拒绝。id 不存在或类型不符时原样返回。
    pub fn delete_item(
        &self,
        kind: ItemKind,
        id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Self, NovelError> {
        let mut next = self.clone();

        let entry = match kind {
            ItemKind::Volume | ItemKind::Chapter => {
                let Some((items, node)) = tree::detach(&self.items, id) else {
                    return Ok(self.unchanged(kind, id));
                };
                if node.kind() != kind {
                    return Ok(self.unchanged(kind, id));
                }
                next.items = items;
                match node {
                    NovelItem::Volume(volume) => TrashItem::Volume {
                        volume,
                        deleted_at: now,
                    },
                    NovelItem::Chapter(chapter) => TrashItem::Chapter {
                        chapter,
                        deleted_at: now,
                    },
                }
            }
            ItemKind::Section => {
                let Some(chapter) = self.chapter_of_section(id) else {
                    return Ok(self.unchanged(kind, id));
                };
                if chapter.sections.len() <= 1 {
                    tracing::warn!(section_id = %id, chapter_id = %chapter.id, "Refusing to delete last section");
                    return Err(NovelError::LastSection {
                        chapter_id: chapter.id.clone(),
                    });
                }

                let origin_chapter_id = chapter.id.clone();
                let origin_chapter_title = chapter.title.clone();
                let Some(section) = chapter.section(id).cloned() else {
                    return Ok(self.unchanged(kind, id));
                };
                next = self.with_chapter(&origin_chapter_id, now, |chapter| {
                    chapter.sections.retain(|s| &s.id != id);
                });
                TrashItem::Section {
                    section,
                    deleted_at: now,
                    origin_chapter_id,
                    origin_chapter_title,
                }
            }
            ItemKind::WorldEntity => {
                let Some(index) = self.world_entities.iter().position(|e| &e.id == id) else {
                    return Ok(self.unchanged(kind, id));
                };
                TrashItem::WorldEntity {
                    entity: next.world_entities.remove(index),
                    deleted_at: now,
                }
            }
            ItemKind::Rule => {
                let Some(index) = self.rules.iter().position(|r| &r.id == id) else {
                    return Ok(self.unchanged(kind, id));
                };
                TrashItem::Rule {
                    rule: next.rules.remove(index),
                    deleted_at: now,
                }
            }
        };

        next.trash.insert(0, entry);
        next.ensure_active_chapter();
        next.touch(now);

        tracing::info!(item_id = %id, kind = %kind, "Item moved to trash");
        Ok(next)
    }

    /// 从回收站恢复
    ///
    /// - 世界观/规则：追加到各自列表
    /// - 节：追加到原章节；原章节已删除时追加到当前章节；都没有则报错且条目保留
    /// - 卷/章：追加到根层级末尾
    pub fn restore(&self, id: &ItemId, now: DateTime<Utc>) -> Result<Self, NovelError> {
        let Some(index) = self.trash.iter().position(|entry| entry.id() == id) else {
            tracing::debug!(item_id = %id, "Trash entry not found");
            return Ok(self.clone());
        };
        self.ensure_restorable(&self.trash[index])?;

        let mut next = self.clone();
        let entry = next.trash.remove(index);
        let kind = entry.kind();

        match entry {
            TrashItem::WorldEntity { entity, .. } => next.world_entities.push(entity),
            TrashItem::Rule { rule, .. } => next.rules.push(rule),
            TrashItem::Section {
                section,
                origin_chapter_id,
                ..
            } => {
                let target = if self.find_chapter(&origin_chapter_id).is_some() {
                    origin_chapter_id
                } else if let Some(active) = self.active_chapter() {
                    tracing::info!(
                        section_id = %section.id,
                        origin_chapter_id = %origin_chapter_id,
                        fallback_chapter_id = %active.id,
                        "Origin chapter gone, restoring section into active chapter"
                    );
                    active.id.clone()
                } else {
                    tracing::warn!(section_id = %section.id, "No chapter can receive restored section");
                    return Err(NovelError::RestoreTargetMissing {
                        section_id: section.id,
                        origin_chapter_id,
                    });
                };
                next = next.with_chapter(&target, now, |chapter| chapter.sections.push(section));
            }
            node @ (TrashItem::Volume { .. } | TrashItem::Chapter { .. }) => {
                if let Some(node) = node.into_node() {
                    next.items.push(node);
                }
            }
        }

        next.ensure_active_chapter();
        next.touch(now);

        tracing::info!(item_id = %id, kind = %kind, "Item restored from trash");
        Ok(next)
    }

    /// 将卷/章从回收站直接拖放到树中指定位置
    ///
    /// 落点规则与 [`Novel::move_item`] 相同；其他类型走普通恢复。
    pub fn restore_to(
        &self,
        id: &ItemId,
        target_id: Option<&ItemId>,
        position: DropPosition,
        now: DateTime<Utc>,
    ) -> Result<Self, NovelError> {
        let Some(index) = self.trash.iter().position(|entry| entry.id() == id) else {
            tracing::debug!(item_id = %id, "Trash entry not found");
            return Ok(self.clone());
        };
        if !self.trash[index].kind().is_structural() {
            return self.restore(id, now);
        }
        self.ensure_restorable(&self.trash[index])?;

        let mut next = self.clone();
        let entry = next.trash.remove(index);
        if let Some(node) = entry.into_node() {
            next.items = moves::insert_item(std::mem::take(&mut next.items), node, target_id, position);
        }
        next.ensure_active_chapter();
        next.touch(now);

        tracing::info!(item_id = %id, target_id = ?target_id, position = ?position, "Item restored to location");
        Ok(next)
    }

    /// 永久删除回收站条目，无法恢复
    pub fn purge(&self, id: &ItemId, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        let before = next.trash.len();
        next.trash.retain(|entry| entry.id() != id);
        if next.trash.len() != before {
            next.touch(now);
            tracing::info!(item_id = %id, "Trash entry purged");
        }
        next
    }

    /// 清空回收站
    pub fn empty_trash(&self, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        if !next.trash.is_empty() {
            tracing::info!(count = next.trash.len(), "Trash emptied");
            next.trash.clear();
            next.touch(now);
        }
        next
    }

    /// 移除已重新出现在章节树中的节条目（撤销/重做把节带回后调用）
    pub fn drop_revived_sections(&self) -> Self {
        let live = tree::collect_ids(&self.items);
        let mut next = self.clone();
        next.trash.retain(|entry| match entry {
            TrashItem::Section { section, .. } => !live.contains(&&section.id),
            _ => true,
        });
        if next.trash.len() != self.trash.len() {
            tracing::debug!(
                dropped = self.trash.len() - next.trash.len(),
                "Dropped trash entries revived by history"
            );
        }
        next
    }

    /// 整体替换章节的节列表后，把不再出现在任何地方的旧节移入回收站
    ///
    /// `previous` 为替换前的节列表，来源章节记为 `chapter_id`。
    pub fn trash_dropped_sections(&self, chapter_id: &ItemId, previous: &[Section], now: DateTime<Utc>) -> Self {
        let live = self.live_ids();
        let dropped: Vec<&Section> = previous
            .iter()
            .filter(|s| !live.contains(&&s.id) && self.trash_entry(&s.id).is_none())
            .collect();
        if dropped.is_empty() {
            return self.clone();
        }

        let origin_chapter_title = self
            .find_chapter(chapter_id)
            .map(|c| c.title.clone())
            .unwrap_or_default();
        let mut next = self.clone();
        for section in dropped {
            tracing::info!(section_id = %section.id, chapter_id = %chapter_id, "Dropped section moved to trash");
            next.trash.push(TrashItem::Section {
                section: section.clone(),
                deleted_at: now,
                origin_chapter_id: chapter_id.clone(),
                origin_chapter_title: origin_chapter_title.clone(),
            });
        }
        next.touch(now);
        next
    }

    fn ensure_restorable(&self, entry: &TrashItem) -> Result<(), NovelError> {
        let live = self.live_ids();
        match entry.ids().into_iter().find(|id| live.contains(id)) {
            Some(conflict) => Err(NovelError::IdConflict(conflict.clone())),
            None => Ok(()),
        }
    }

    fn unchanged(&self, kind: ItemKind, id: &ItemId) -> Self {
        tracing::debug!(item_id = %id, kind = %kind, "Delete target not found");
        self.clone()
    }
}
