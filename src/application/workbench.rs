//! Workbench - 作品状态存储
//!
//! 持有当前作品快照、当前章节的撤销历史以及外部端口。
//! 每条命令构造新快照并整体替换，返回替换后的快照。

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ClockPort, ConfirmRequest, ConfirmationPort, Notification, NotifierPort,
};
use crate::config::AppConfig;
use crate::domain::history::{ChapterHistory, HistoryLimits};
use crate::domain::novel::{Chapter, Novel, Section};

/// 存储行为开关
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkbenchSettings {
    pub history: HistoryLimits,
    pub confirm_structural_deletes: bool,
    pub confirm_purge: bool,
}

impl Default for WorkbenchSettings {
    fn default() -> Self {
        Self {
            history: HistoryLimits::default(),
            confirm_structural_deletes: true,
            confirm_purge: true,
        }
    }
}

impl From<&AppConfig> for WorkbenchSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            history: config.history.limits(),
            confirm_structural_deletes: config.trash.confirm_structural_deletes,
            confirm_purge: config.trash.confirm_purge,
        }
    }
}

/// 作品状态存储
///
/// 不变量:
/// - `history` 始终对应 `novel` 的当前章节
/// - 被拒绝的命令不替换快照
pub struct Workbench {
    pub(crate) novel: Arc<Novel>,
    pub(crate) history: ChapterHistory,
    pub(crate) settings: WorkbenchSettings,
    clock: Arc<dyn ClockPort>,
    notifier: Arc<dyn NotifierPort>,
    confirmation: Arc<dyn ConfirmationPort>,
}

impl Workbench {
    pub fn new(
        novel: Novel,
        settings: WorkbenchSettings,
        clock: Arc<dyn ClockPort>,
        notifier: Arc<dyn NotifierPort>,
        confirmation: Arc<dyn ConfirmationPort>,
    ) -> Self {
        let novel = novel.normalized();
        let mut history = ChapterHistory::new(settings.history);
        history.reset(novel.active_chapter());

        tracing::info!(
            novel_id = %novel.id(),
            chapters = novel.chapters().len(),
            trash = novel.trash().len(),
            "Workbench opened"
        );

        Self {
            novel: Arc::new(novel),
            history,
            settings,
            clock,
            notifier,
            confirmation,
        }
    }

    pub fn settings(&self) -> &WorkbenchSettings {
        &self.settings
    }

    /// 到期时执行防抖中的历史记录，返回是否产生了新条目
    pub fn tick(&mut self) -> bool {
        let now = self.now();
        self.history.poll(now)
    }

    /// 立即执行防抖中的历史记录
    pub fn flush_history(&mut self) -> bool {
        self.history.flush()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    /// 询问用户；返回 false 表示取消
    pub(crate) fn confirm(&self, request: ConfirmRequest) -> bool {
        let accepted = self.confirmation.confirm(&request);
        if !accepted {
            tracing::debug!(request = ?request, "Operation cancelled by user");
        }
        accepted
    }

    /// 报告被拒绝的命令，快照保持不变
    pub(crate) fn reject(&self, err: impl Into<ApplicationError>) -> ApplicationError {
        let err = err.into();
        tracing::warn!(error = %err, "Command rejected");
        self.notify(Notification::error(err.notification()));
        err
    }

    /// 替换快照，并立即记录当前章节的节列表
    pub(crate) fn commit(&mut self, next: Novel) -> Arc<Novel> {
        self.replace(next);
        self.record_active(true);
        Arc::clone(&self.novel)
    }

    /// 替换快照，正文变化按防抖规则记录
    pub(crate) fn commit_debounced(&mut self, next: Novel) -> Arc<Novel> {
        self.replace(next);
        self.record_active(false);
        Arc::clone(&self.novel)
    }

    /// 替换快照，不产生历史记录（撤销/重做、快照拍摄）
    pub(crate) fn commit_untracked(&mut self, next: Novel) -> Arc<Novel> {
        self.replace(next);
        Arc::clone(&self.novel)
    }

    pub(crate) fn current(&self) -> Arc<Novel> {
        Arc::clone(&self.novel)
    }

    fn replace(&mut self, next: Novel) {
        self.novel = Arc::new(next);
        self.history.sync(self.novel.active_chapter());
    }

    fn record_active(&mut self, immediate: bool) -> bool {
        let now = self.now();
        let Some(chapter) = self.novel.active_chapter() else {
            return false;
        };
        if self
            .history
            .current()
            .is_some_and(|current| same_text(current, &chapter.sections))
        {
            self.history.discard_pending();
            return false;
        }
        let sections = chapter.sections.clone();
        self.history.record(sections, immediate, now)
    }
}

/// 节 id 与正文相同（忽略快照）
fn same_text(a: &[Section], b: &[Section]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x.id == y.id && x.content == y.content)
}

/// 历史中的节列表沿用当前章节里同 id 节的快照
pub(crate) fn carry_snapshots(chapter: &Chapter, sections: Vec<Section>) -> Vec<Section> {
    sections
        .into_iter()
        .map(|mut section| {
            if let Some(live) = chapter.section(&section.id) {
                section.snapshots = live.snapshots.clone();
            }
            section
        })
        .collect()
}
