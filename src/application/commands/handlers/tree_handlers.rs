//! Tree Command Handlers - 章节树、世界观与规则的编辑

use std::sync::Arc;

use crate::application::commands::tree_commands::*;
use crate::application::error::ApplicationError;
use crate::application::workbench::Workbench;
use crate::domain::novel::{ItemId, Novel, Rule, WorldEntity};

impl Workbench {
    /// 新建卷
    pub fn add_volume(&mut self, cmd: AddVolume) -> (Arc<Novel>, ItemId) {
        let (next, id) = self.novel.add_volume(cmd.title, self.now());
        tracing::info!(volume_id = %id, "Volume added");
        (self.commit(next), id)
    }

    /// 新建章节并打开它
    pub fn add_chapter(&mut self, cmd: AddChapter) -> (Arc<Novel>, ItemId) {
        let (next, id) = self
            .novel
            .add_chapter(cmd.title, cmd.volume_id.as_ref(), self.now());
        tracing::info!(chapter_id = %id, volume_id = ?cmd.volume_id, "Chapter added");
        (self.commit(next), id)
    }

    /// 在章节末尾追加空节
    pub fn add_section(&mut self, cmd: AddSection) -> Result<(Arc<Novel>, ItemId), ApplicationError> {
        let chapter_id = match cmd.chapter_id {
            Some(id) => id,
            None => self
                .novel
                .active_chapter_id()
                .cloned()
                .ok_or_else(|| self.reject(ApplicationError::NoActiveChapter))?,
        };
        if self.novel.find_chapter(&chapter_id).is_none() {
            return Err(self.reject(ApplicationError::ChapterNotFound(chapter_id)));
        }

        let (next, id) = self
            .novel
            .add_section(&chapter_id, self.now())
            .map_err(|e| self.reject(e))?;
        tracing::info!(chapter_id = %chapter_id, section_id = %id, "Section added");
        Ok((self.commit(next), id))
    }

    /// 打开章节
    pub fn select_chapter(&mut self, cmd: SelectChapter) -> Result<Arc<Novel>, ApplicationError> {
        if self.novel.find_chapter(&cmd.chapter_id).is_none() {
            return Err(self.reject(ApplicationError::ChapterNotFound(cmd.chapter_id)));
        }
        let next = self.novel.select_chapter(&cmd.chapter_id);
        tracing::debug!(chapter_id = %cmd.chapter_id, "Chapter selected");
        Ok(self.commit(next))
    }

    pub fn rename_item(&mut self, cmd: RenameItem) -> Result<Arc<Novel>, ApplicationError> {
        let next = self
            .novel
            .rename_item(&cmd.item_id, cmd.title, self.now())
            .map_err(|e| self.reject(e))?;
        tracing::info!(item_id = %cmd.item_id, "Item renamed");
        Ok(self.commit(next))
    }

    pub fn toggle_volume(&mut self, cmd: ToggleVolume) -> Arc<Novel> {
        let next = self.novel.toggle_volume(&cmd.volume_id);
        self.commit(next)
    }

    /// 编辑节正文
    ///
    /// 连续输入只在静默期结束后产生一条历史记录。
    pub fn update_section_content(
        &mut self,
        cmd: UpdateSectionContent,
    ) -> Result<Arc<Novel>, ApplicationError> {
        if self.novel.chapter_of_section(&cmd.section_id).is_none() {
            return Err(self.reject(ApplicationError::SectionNotFound(cmd.section_id)));
        }
        let next = self
            .novel
            .update_section_content(&cmd.section_id, cmd.content, self.now());
        Ok(self.commit_debounced(next))
    }

    /// 拖放移动卷或章
    pub fn move_item(&mut self, cmd: MoveItem) -> Arc<Novel> {
        let next = self.novel.move_item(
            &cmd.dragged_id,
            cmd.target_id.as_ref(),
            cmd.position,
            self.now(),
        );
        if next.items() == self.novel.items() {
            tracing::debug!(dragged_id = %cmd.dragged_id, target_id = ?cmd.target_id, "Drop rejected");
            return self.current();
        }
        tracing::info!(
            dragged_id = %cmd.dragged_id,
            target_id = ?cmd.target_id,
            position = ?cmd.position,
            "Item moved"
        );
        self.commit(next)
    }

    /// 在当前章节内重排节
    pub fn move_section(&mut self, cmd: MoveSection) -> Result<Arc<Novel>, ApplicationError> {
        let chapter_id = self
            .novel
            .active_chapter_id()
            .cloned()
            .ok_or_else(|| self.reject(ApplicationError::NoActiveChapter))?;
        let next = self.novel.move_section(
            &chapter_id,
            &cmd.dragged_id,
            &cmd.target_id,
            cmd.position,
            self.now(),
        );
        tracing::debug!(chapter_id = %chapter_id, dragged_id = %cmd.dragged_id, "Section moved");
        Ok(self.commit(next))
    }

    pub fn add_world_entity(&mut self, cmd: AddWorldEntity) -> Result<(Arc<Novel>, ItemId), ApplicationError> {
        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(self.reject(ApplicationError::validation("名称不能为空")));
        }
        let mut entity = WorldEntity::new(name, cmd.category);
        entity.description = cmd.description;
        let id = entity.id.clone();

        let next = self
            .novel
            .add_world_entity(entity, self.now())
            .map_err(|e| self.reject(e))?;
        tracing::info!(entity_id = %id, "World entity added");
        Ok((self.commit(next), id))
    }

    pub fn add_rule(&mut self, cmd: AddRule) -> Result<(Arc<Novel>, ItemId), ApplicationError> {
        if cmd.content.trim().is_empty() {
            return Err(self.reject(ApplicationError::validation("规则内容不能为空")));
        }
        let rule = Rule::new(cmd.content);
        let id = rule.id.clone();

        let next = self
            .novel
            .add_rule(rule, self.now())
            .map_err(|e| self.reject(e))?;
        tracing::info!(rule_id = %id, "Rule added");
        Ok((self.commit(next), id))
    }

    /// 为节拍摄快照；与撤销历史无关
    pub fn take_section_snapshot(
        &mut self,
        cmd: TakeSectionSnapshot,
    ) -> Result<(Arc<Novel>, Option<ItemId>), ApplicationError> {
        if self.novel.chapter_of_section(&cmd.section_id).is_none() {
            return Err(self.reject(ApplicationError::SectionNotFound(cmd.section_id)));
        }
        let (next, snapshot_id) = self
            .novel
            .take_section_snapshot(&cmd.section_id, cmd.kind, self.now())
            .map_err(|e| self.reject(e))?;
        tracing::debug!(section_id = %cmd.section_id, snapshot_id = ?snapshot_id, "Section snapshot taken");
        Ok((self.commit_untracked(next), snapshot_id))
    }

    /// 将节回退到快照，回退本身立即记入历史
    pub fn restore_section_snapshot(
        &mut self,
        cmd: RestoreSectionSnapshot,
    ) -> Result<Arc<Novel>, ApplicationError> {
        if self.novel.chapter_of_section(&cmd.section_id).is_none() {
            return Err(self.reject(ApplicationError::SectionNotFound(cmd.section_id)));
        }
        let next = self
            .novel
            .restore_section_snapshot(&cmd.section_id, &cmd.snapshot_id, self.now())
            .map_err(|e| self.reject(e))?;
        tracing::info!(section_id = %cmd.section_id, snapshot_id = %cmd.snapshot_id, "Section snapshot restored");
        Ok(self.commit(next))
    }
}
