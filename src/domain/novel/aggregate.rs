//! Novel Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::moves;
use super::tree;
use super::{
    Chapter, DropPosition, ItemId, NovelError, NovelItem, Rule, Section, SiblingPosition,
    SnapshotKind, TrashItem, Volume, WorldEntity,
};

/// Novel 聚合根
///
/// 不变量:
/// - items（含卷内章节、节）、世界观、规则、回收站中的 id 互不重复
/// - 章节列表非空时 active_chapter_id 指向一个存活章节
///
/// 所有修改操作都返回新的快照，不修改 `self`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Novel {
    pub(super) id: ItemId,
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: String,
    #[serde(default)]
    pub(super) items: Vec<NovelItem>,
    #[serde(default)]
    pub(super) trash: Vec<TrashItem>,
    #[serde(default)]
    pub(super) active_chapter_id: Option<ItemId>,
    #[serde(default)]
    pub(super) world_entities: Vec<WorldEntity>,
    #[serde(default)]
    pub(super) rules: Vec<Rule>,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl Novel {
    /// 创建空作品
    pub fn new(title: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ItemId::new(),
            title: title.into(),
            description: String::new(),
            items: Vec::new(),
            trash: Vec::new(),
            active_chapter_id: None,
            world_entities: Vec::new(),
            rules: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// 以现成的章节树创建作品，并打开第一个章节
    pub fn with_items(title: impl Into<String>, items: Vec<NovelItem>, now: DateTime<Utc>) -> Self {
        let mut novel = Self::new(title, now);
        novel.items = items;
        novel.ensure_active_chapter();
        novel
    }

    // Getters
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn items(&self) -> &[NovelItem] {
        &self.items
    }

    pub fn trash(&self) -> &[TrashItem] {
        &self.trash
    }

    pub fn active_chapter_id(&self) -> Option<&ItemId> {
        self.active_chapter_id.as_ref()
    }

    pub fn world_entities(&self) -> &[WorldEntity] {
        &self.world_entities
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 文档顺序的章节序列
    pub fn chapters(&self) -> Vec<&Chapter> {
        tree::flatten(&self.items)
    }

    pub fn find_chapter(&self, chapter_id: &ItemId) -> Option<&Chapter> {
        tree::find_chapter(&self.items, chapter_id)
    }

    pub fn active_chapter(&self) -> Option<&Chapter> {
        self.active_chapter_id
            .as_ref()
            .and_then(|id| self.find_chapter(id))
    }

    pub fn chapter_of_section(&self, section_id: &ItemId) -> Option<&Chapter> {
        tree::find_chapter_of_section(&self.items, section_id)
    }

    /// 指定章节之前的最多 `count` 个章节（按文档顺序，不含自身）
    pub fn previous_chapters(&self, chapter_id: &ItemId, count: usize) -> Vec<&Chapter> {
        let chapters = self.chapters();
        match chapters.iter().position(|c| &c.id == chapter_id) {
            Some(index) => chapters[index.saturating_sub(count)..index].to_vec(),
            None => Vec::new(),
        }
    }

    /// 所有存活 id：章节树、世界观、规则
    pub fn live_ids(&self) -> Vec<&ItemId> {
        let mut ids = tree::collect_ids(&self.items);
        ids.extend(self.world_entities.iter().map(|e| &e.id));
        ids.extend(self.rules.iter().map(|r| &r.id));
        ids
    }

    pub fn contains_id(&self, id: &ItemId) -> bool {
        self.live_ids().contains(&id)
    }

    pub fn trash_entry(&self, id: &ItemId) -> Option<&TrashItem> {
        self.trash.iter().find(|entry| entry.id() == id)
    }

    // Tree edits

    /// 在根层级末尾新建卷
    pub fn add_volume(&self, title: impl Into<String>, now: DateTime<Utc>) -> (Self, ItemId) {
        let volume = Volume::new(title);
        let id = volume.id.clone();
        let mut next = self.clone();
        next.items.push(volume.into());
        next.touch(now);
        (next, id)
    }

    /// 新建章节（自带一个空节）并打开它
    ///
    /// 指定的卷不存在时放到根层级末尾。
    pub fn add_chapter(
        &self,
        title: impl Into<String>,
        volume_id: Option<&ItemId>,
        now: DateTime<Utc>,
    ) -> (Self, ItemId) {
        let chapter = Chapter::new(title, now);
        let id = chapter.id.clone();
        let mut next = self.clone();

        let volume = volume_id.and_then(|vid| {
            next.items.iter_mut().find_map(|item| match item {
                NovelItem::Volume(volume) if &volume.id == vid => Some(volume),
                _ => None,
            })
        });
        match volume {
            Some(volume) => {
                volume.chapters.push(chapter);
                volume.collapsed = false;
            }
            None => next.items.push(chapter.into()),
        }

        next.active_chapter_id = Some(id.clone());
        next.touch(now);
        (next, id)
    }

    /// 在章节末尾追加空节
    pub fn add_section(&self, chapter_id: &ItemId, now: DateTime<Utc>) -> Result<(Self, ItemId), NovelError> {
        if self.find_chapter(chapter_id).is_none() {
            return Err(NovelError::NotFound(chapter_id.clone()));
        }
        let section = Section::new("");
        let id = section.id.clone();
        let next = self.with_chapter(chapter_id, now, |chapter| chapter.sections.push(section));
        Ok((next, id))
    }

    pub fn add_world_entity(&self, entity: WorldEntity, now: DateTime<Utc>) -> Result<Self, NovelError> {
        self.ensure_fresh_id(&entity.id)?;
        let mut next = self.clone();
        next.world_entities.push(entity);
        next.touch(now);
        Ok(next)
    }

    pub fn add_rule(&self, rule: Rule, now: DateTime<Utc>) -> Result<Self, NovelError> {
        self.ensure_fresh_id(&rule.id)?;
        let mut next = self.clone();
        next.rules.push(rule);
        next.touch(now);
        Ok(next)
    }

    /// 切换当前章节；目标不是存活章节时原样返回
    pub fn select_chapter(&self, chapter_id: &ItemId) -> Self {
        if self.find_chapter(chapter_id).is_none() {
            tracing::debug!(chapter_id = %chapter_id, "Cannot select missing chapter");
            return self.clone();
        }
        let mut next = self.clone();
        next.active_chapter_id = Some(chapter_id.clone());
        next
    }

    /// 重命名卷或章
    pub fn rename_item(
        &self,
        item_id: &ItemId,
        title: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, NovelError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(NovelError::EmptyTitle);
        }
        if tree::locate(&self.items, item_id).is_none() {
            return Err(NovelError::NotFound(item_id.clone()));
        }

        let mut next = self.clone();
        next.items = tree::locate_and_update(&self.items, item_id, |item| match item {
            NovelItem::Volume(volume) => NovelItem::Volume(Volume {
                title,
                ..volume.clone()
            }),
            NovelItem::Chapter(chapter) => NovelItem::Chapter(Chapter {
                title,
                last_modified: now,
                ..chapter.clone()
            }),
        });
        next.touch(now);
        Ok(next)
    }

    /// 展开/折叠卷
    pub fn toggle_volume(&self, volume_id: &ItemId) -> Self {
        let mut next = self.clone();
        next.items = tree::locate_and_update(&self.items, volume_id, |item| match item {
            NovelItem::Volume(volume) => NovelItem::Volume(Volume {
                collapsed: !volume.collapsed,
                ..volume.clone()
            }),
            other => other.clone(),
        });
        next
    }

    /// 更新节正文；节不存在时原样返回
    pub fn update_section_content(
        &self,
        section_id: &ItemId,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let Some(chapter_id) = self.chapter_of_section(section_id).map(|c| c.id.clone()) else {
            tracing::debug!(section_id = %section_id, "Section not found for content update");
            return self.clone();
        };
        let content = content.into();
        self.with_chapter(&chapter_id, now, |chapter| {
            if let Some(section) = chapter.sections.iter_mut().find(|s| &s.id == section_id) {
                section.content = content;
            }
        })
    }

    /// 整体替换某章的节列表（撤销/重做使用）
    ///
    /// 空列表会被忽略，章节至少保留一个节。
    pub fn replace_sections(&self, chapter_id: &ItemId, sections: Vec<Section>, now: DateTime<Utc>) -> Self {
        if sections.is_empty() {
            tracing::warn!(chapter_id = %chapter_id, "Refusing to empty a chapter");
            return self.clone();
        }
        self.with_chapter(chapter_id, now, |chapter| chapter.sections = sections)
    }

    /// 为节拍摄快照
    pub fn take_section_snapshot(
        &self,
        section_id: &ItemId,
        kind: SnapshotKind,
        now: DateTime<Utc>,
    ) -> Result<(Self, Option<ItemId>), NovelError> {
        let chapter_id = self
            .chapter_of_section(section_id)
            .map(|c| c.id.clone())
            .ok_or_else(|| NovelError::NotFound(section_id.clone()))?;

        let mut snapshot_id = None;
        let next = self.with_chapter(&chapter_id, now, |chapter| {
            if let Some(section) = chapter.sections.iter_mut().find(|s| &s.id == section_id) {
                snapshot_id = section.take_snapshot(kind, now);
            }
        });
        Ok((next, snapshot_id))
    }

    /// 将节内容回退到指定快照
    pub fn restore_section_snapshot(
        &self,
        section_id: &ItemId,
        snapshot_id: &ItemId,
        now: DateTime<Utc>,
    ) -> Result<Self, NovelError> {
        let chapter = self
            .chapter_of_section(section_id)
            .ok_or_else(|| NovelError::NotFound(section_id.clone()))?;
        let has_snapshot = chapter
            .section(section_id)
            .is_some_and(|s| s.snapshots.iter().any(|snap| &snap.id == snapshot_id));
        if !has_snapshot {
            return Err(NovelError::NotFound(snapshot_id.clone()));
        }

        let chapter_id = chapter.id.clone();
        Ok(self.with_chapter(&chapter_id, now, |chapter| {
            if let Some(section) = chapter.sections.iter_mut().find(|s| &s.id == section_id) {
                section.restore_snapshot(snapshot_id);
            }
        }))
    }

    // Moves

    /// 拖放移动卷或章
    pub fn move_item(
        &self,
        dragged_id: &ItemId,
        target_id: Option<&ItemId>,
        position: DropPosition,
        now: DateTime<Utc>,
    ) -> Self {
        let items = moves::move_item(&self.items, dragged_id, target_id, position);
        if items == self.items {
            return self.clone();
        }
        let mut next = self.clone();
        next.items = items;
        next.touch(now);
        next
    }

    /// 在指定章节内重排节
    pub fn move_section(
        &self,
        chapter_id: &ItemId,
        dragged_id: &ItemId,
        target_id: &ItemId,
        position: SiblingPosition,
        now: DateTime<Utc>,
    ) -> Self {
        let Some(chapter) = self.find_chapter(chapter_id) else {
            return self.clone();
        };
        let sections = moves::move_section(&chapter.sections, dragged_id, target_id, position);
        if sections == chapter.sections {
            return self.clone();
        }
        self.with_chapter(chapter_id, now, |chapter| chapter.sections = sections)
    }

    // Internal helpers

    /// 复制一份快照并修改指定章节，更新章节修改时间
    pub(super) fn with_chapter<F>(&self, chapter_id: &ItemId, now: DateTime<Utc>, edit: F) -> Self
    where
        F: FnOnce(&mut Chapter),
    {
        let mut next = self.clone();
        next.items = tree::update_chapter(&self.items, chapter_id, |chapter| {
            let mut chapter = chapter.clone();
            edit(&mut chapter);
            chapter.last_modified = now;
            chapter
        });
        next.touch(now);
        next
    }

    /// 修正外部导入快照中失效的当前章节
    pub fn normalized(mut self) -> Self {
        let before = self.active_chapter_id.clone();
        self.ensure_active_chapter();
        if self.active_chapter_id != before {
            tracing::info!(
                from = ?before,
                to = ?self.active_chapter_id,
                "Active chapter repaired"
            );
        }
        self
    }

    pub(super) fn ensure_fresh_id(&self, id: &ItemId) -> Result<(), NovelError> {
        if self.contains_id(id) || self.trash_entry(id).is_some() {
            return Err(NovelError::IdConflict(id.clone()));
        }
        Ok(())
    }

    /// 当前章节失效时改为第一个存活章节，没有章节则清空
    pub(super) fn ensure_active_chapter(&mut self) {
        if self.active_chapter().is_some() {
            return;
        }
        self.active_chapter_id = self.chapters().first().map(|c| c.id.clone());
    }

    pub(super) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
