//! Trash Command Handlers - 删除、恢复、永久清除

use std::sync::Arc;

use crate::application::commands::trash_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{ConfirmRequest, Notification};
use crate::application::workbench::Workbench;
use crate::domain::novel::Novel;

impl Workbench {
    /// 将节点移入回收站
    ///
    /// 删除卷/章前按配置询问用户，取消时返回原快照。
    pub fn delete_item(&mut self, cmd: DeleteItem) -> Result<Arc<Novel>, ApplicationError> {
        if cmd.kind.is_structural() && self.settings.confirm_structural_deletes {
            let title = self
                .novel
                .items()
                .iter()
                .find(|item| item.id() == &cmd.id)
                .map(|item| item.title().to_string())
                .or_else(|| self.novel.find_chapter(&cmd.id).map(|c| c.title.clone()));
            if let Some(title) = title {
                let request = ConfirmRequest::DeleteItem {
                    kind: cmd.kind,
                    id: cmd.id.clone(),
                    title,
                };
                if !self.confirm(request) {
                    return Ok(self.current());
                }
            }
        }

        let next = self
            .novel
            .delete_item(cmd.kind, &cmd.id, self.now())
            .map_err(|e| self.reject(e))?;
        if next.trash().len() == self.novel.trash().len() {
            return Ok(self.current());
        }
        Ok(self.commit(next))
    }

    /// 从回收站恢复
    pub fn restore_item(&mut self, cmd: RestoreItem) -> Result<Arc<Novel>, ApplicationError> {
        let Some(label) = self.novel.trash_entry(&cmd.id).map(|e| e.label()) else {
            tracing::debug!(item_id = %cmd.id, "Nothing to restore");
            return Ok(self.current());
        };
        let next = self
            .novel
            .restore(&cmd.id, self.now())
            .map_err(|e| self.reject(e))?;
        self.notify(Notification::success(format!("已恢复「{}」", label)));
        Ok(self.commit(next))
    }

    /// 从回收站拖放到树中
    pub fn restore_item_to(&mut self, cmd: RestoreItemTo) -> Result<Arc<Novel>, ApplicationError> {
        let Some(label) = self.novel.trash_entry(&cmd.id).map(|e| e.label()) else {
            tracing::debug!(item_id = %cmd.id, "Nothing to restore");
            return Ok(self.current());
        };
        let next = self
            .novel
            .restore_to(&cmd.id, cmd.target_id.as_ref(), cmd.position, self.now())
            .map_err(|e| self.reject(e))?;
        self.notify(Notification::success(format!("已恢复「{}」", label)));
        Ok(self.commit(next))
    }

    /// 永久删除回收站条目
    pub fn purge_item(&mut self, cmd: PurgeItem) -> Arc<Novel> {
        let Some(label) = self.novel.trash_entry(&cmd.id).map(|e| e.label()) else {
            return self.current();
        };
        if self.settings.confirm_purge {
            let request = ConfirmRequest::Purge {
                id: cmd.id.clone(),
                label: label.clone(),
            };
            if !self.confirm(request) {
                return self.current();
            }
        }

        let next = self.novel.purge(&cmd.id, self.now());
        self.notify(Notification::success(format!("已永久删除「{}」", label)));
        self.commit(next)
    }

    /// 清空回收站
    pub fn empty_trash(&mut self, _cmd: EmptyTrash) -> Arc<Novel> {
        let count = self.novel.trash().len();
        if count == 0 {
            return self.current();
        }
        if self.settings.confirm_purge && !self.confirm(ConfirmRequest::EmptyTrash { count }) {
            return self.current();
        }

        let next = self.novel.empty_trash(self.now());
        self.notify(Notification::success(format!("已清空回收站（{} 项）", count)));
        self.commit(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::{Redo, SelectChapter, Undo};
    use crate::application::ports::NotificationLevel;
    use crate::application::testing::fixture;
    use crate::domain::novel::{DropPosition, ItemKind, NovelError};

    fn delete(wb: &mut Workbench, kind: ItemKind, id: &str) -> Result<Arc<Novel>, ApplicationError> {
        wb.delete_item(DeleteItem { kind, id: id.into() })
    }

    #[test]
    fn test_delete_last_section_notifies_and_keeps_snapshot() {
        let (mut wb, env) = fixture();
        delete(&mut wb, ItemKind::Section, "s2").unwrap();
        let before = wb.novel();

        let err = delete(&mut wb, ItemKind::Section, "s1").unwrap_err();
        assert!(matches!(err, ApplicationError::Domain(NovelError::LastSection { .. })));
        assert!(Arc::ptr_eq(&before, &wb.novel()));
        assert_eq!(env.notifier.errors(), vec![err.notification()]);
    }

    #[test]
    fn test_structural_delete_asks_for_confirmation() {
        let (mut wb, env) = fixture();
        env.confirmation.answer(false);

        let novel = delete(&mut wb, ItemKind::Volume, "v1").unwrap();
        assert!(novel.find_chapter(&"c2".into()).is_some());
        assert!(novel.trash().is_empty());
        assert_eq!(env.confirmation.prompts().len(), 1);

        env.confirmation.answer(true);
        let novel = delete(&mut wb, ItemKind::Volume, "v1").unwrap();
        assert!(novel.find_chapter(&"c2".into()).is_none());
        assert_eq!(novel.trash()[0].id().as_str(), "v1");
    }

    #[test]
    fn test_nested_chapter_delete_prompts_with_title() {
        let (mut wb, env) = fixture();
        delete(&mut wb, ItemKind::Chapter, "c2").unwrap();
        let prompts = env.confirmation.prompts();
        assert!(matches!(
            &prompts[0],
            ConfirmRequest::DeleteItem { title, .. } if title == "c2"
        ));
    }

    #[test]
    fn test_section_delete_does_not_ask() {
        let (mut wb, env) = fixture();
        delete(&mut wb, ItemKind::Section, "s2").unwrap();
        assert!(env.confirmation.prompts().is_empty());
    }

    #[test]
    fn test_deleting_active_chapter_reselects_and_resets_history() {
        let (mut wb, _) = fixture();
        delete(&mut wb, ItemKind::Section, "s2").unwrap();
        assert!(wb.can_undo());

        let novel = delete(&mut wb, ItemKind::Chapter, "c1").unwrap();
        assert_eq!(novel.active_chapter_id().unwrap().as_str(), "c2");
        assert!(!wb.can_undo());
    }

    #[test]
    fn test_restore_section_into_active_chapter_when_origin_gone() {
        let (mut wb, env) = fixture();
        delete(&mut wb, ItemKind::Section, "s2").unwrap();
        delete(&mut wb, ItemKind::Chapter, "c1").unwrap();

        let novel = wb.restore_item(RestoreItem { id: "s2".into() }).unwrap();
        let active = novel.active_chapter().unwrap();
        assert_eq!(active.id.as_str(), "c2");
        assert!(active.contains_section(&"s2".into()));
        assert!(novel.trash_entry(&"s2".into()).is_none());
        assert!(env
            .notifier
            .recorded()
            .iter()
            .any(|n| n.level == NotificationLevel::Success));
    }

    #[test]
    fn test_restore_without_target_keeps_entry() {
        let (mut wb, env) = fixture();
        delete(&mut wb, ItemKind::Section, "s2").unwrap();
        delete(&mut wb, ItemKind::Chapter, "c1").unwrap();
        delete(&mut wb, ItemKind::Volume, "v1").unwrap();
        assert!(wb.active_chapter().is_none());

        let err = wb.restore_item(RestoreItem { id: "s2".into() }).unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(NovelError::RestoreTargetMissing { .. })
        ));
        assert!(wb.novel().trash_entry(&"s2".into()).is_some());
        assert_eq!(env.notifier.errors().len(), 1);
    }

    #[test]
    fn test_restore_item_to_volume() {
        let (mut wb, _) = fixture();
        delete(&mut wb, ItemKind::Chapter, "c1").unwrap();
        let novel = wb
            .restore_item_to(RestoreItemTo {
                id: "c1".into(),
                target_id: Some("v1".into()),
                position: DropPosition::Inside,
            })
            .unwrap();
        let volume = novel.items()[0].as_volume().unwrap();
        assert_eq!(volume.chapters[0].id.as_str(), "c1");
    }

    #[test]
    fn test_purge_and_empty_trash_respect_confirmation() {
        let (mut wb, env) = fixture();
        delete(&mut wb, ItemKind::Section, "s2").unwrap();
        delete(&mut wb, ItemKind::Chapter, "c3").unwrap();

        env.confirmation.answer(false);
        assert_eq!(wb.purge_item(PurgeItem { id: "s2".into() }).trash().len(), 2);
        assert_eq!(wb.empty_trash(EmptyTrash).trash().len(), 2);

        env.confirmation.answer(true);
        assert_eq!(wb.purge_item(PurgeItem { id: "s2".into() }).trash().len(), 1);
        assert!(wb.empty_trash(EmptyTrash).trash().is_empty());
    }

    #[test]
    fn test_undo_of_section_delete_drops_trash_entry() {
        let (mut wb, _) = fixture();
        delete(&mut wb, ItemKind::Section, "s2").unwrap();
        assert!(wb.novel().trash_entry(&"s2".into()).is_some());

        let novel = wb.undo(Undo).unwrap();
        assert!(novel.active_chapter().unwrap().contains_section(&"s2".into()));
        assert!(novel.trash_entry(&"s2".into()).is_none());

        let novel = wb.redo(Redo).unwrap();
        assert!(!novel.active_chapter().unwrap().contains_section(&"s2".into()));
        assert!(novel.trash_entry(&"s2".into()).is_some());
    }

    #[test]
    fn test_switching_chapter_after_restore_keeps_partition() {
        let (mut wb, _) = fixture();
        delete(&mut wb, ItemKind::Section, "s2").unwrap();
        wb.restore_item(RestoreItem { id: "s2".into() }).unwrap();
        let novel = wb
            .select_chapter(SelectChapter {
                chapter_id: "c3".into(),
            })
            .unwrap();
        assert!(novel.trash().is_empty());
        assert!(novel.contains_id(&"s2".into()));
    }
}
