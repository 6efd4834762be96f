//! History Command Handlers - 撤销/重做

use std::sync::Arc;

use crate::application::commands::history_commands::*;
use crate::application::error::ApplicationError;
use crate::application::workbench::{carry_snapshots, Workbench};
use crate::domain::novel::{Novel, Section};

impl Workbench {
    /// 用新的节列表替换当前章节并记录历史
    pub fn record_sections(&mut self, cmd: RecordSections) -> Result<Arc<Novel>, ApplicationError> {
        let chapter_id = self
            .novel
            .active_chapter_id()
            .cloned()
            .ok_or_else(|| self.reject(ApplicationError::NoActiveChapter))?;
        if cmd.sections.is_empty() {
            return Err(self.reject(ApplicationError::validation("章节至少需要一个节")));
        }

        let previous = self
            .novel
            .find_chapter(&chapter_id)
            .map(|c| c.sections.clone())
            .unwrap_or_default();
        let now = self.now();
        let next = self
            .novel
            .replace_sections(&chapter_id, cmd.sections, now)
            .drop_revived_sections()
            .trash_dropped_sections(&chapter_id, &previous, now);
        Ok(if cmd.immediate {
            self.commit(next)
        } else {
            self.commit_debounced(next)
        })
    }

    /// 撤销；先执行防抖中的记录，保证撤销的是最新输入
    pub fn undo(&mut self, _cmd: Undo) -> Result<Arc<Novel>, ApplicationError> {
        self.history.flush();
        match self.history.undo() {
            Some(sections) => self.apply_history(sections),
            None => {
                tracing::debug!("Nothing to undo");
                Ok(self.current())
            }
        }
    }

    pub fn redo(&mut self, _cmd: Redo) -> Result<Arc<Novel>, ApplicationError> {
        self.history.flush();
        match self.history.redo() {
            Some(sections) => self.apply_history(sections),
            None => {
                tracing::debug!("Nothing to redo");
                Ok(self.current())
            }
        }
    }

    /// 把历史中的节列表写回当前章节，不产生新记录
    fn apply_history(&mut self, sections: Vec<Section>) -> Result<Arc<Novel>, ApplicationError> {
        let Some(chapter) = self.novel.active_chapter() else {
            return Err(self.reject(ApplicationError::NoActiveChapter));
        };
        let chapter_id = chapter.id.clone();
        let previous = chapter.sections.clone();
        let sections = carry_snapshots(chapter, sections);

        // 撤销掉的新增/恢复节回到回收站
        let now = self.now();
        let next = self
            .novel
            .replace_sections(&chapter_id, sections, now)
            .drop_revived_sections()
            .trash_dropped_sections(&chapter_id, &previous, now);
        tracing::debug!(
            chapter_id = %chapter_id,
            pointer = self.history.pointer(),
            entries = self.history.len(),
            "History applied"
        );
        Ok(self.commit_untracked(next))
    }
}
