//! 章节撤销/重做历史
//!
//! 只覆盖当前章节的节列表；切换章节时重置为仅含当前状态的一条记录。

use chrono::{DateTime, Duration, Utc};

use super::DeferredTask;
use crate::domain::novel::{Chapter, ItemId, Section};

/// 默认最多保留的历史条数
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// 默认防抖静默期（毫秒）
pub const DEFAULT_DEBOUNCE_MS: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub max_entries: usize,
    pub debounce: Duration,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            debounce: Duration::milliseconds(DEFAULT_DEBOUNCE_MS),
        }
    }
}

/// 有界、带防抖的历史栈
///
/// 不变量:
/// - `pointer` 是当前位置的唯一依据，始终小于 `entries.len()`（非空时）
/// - `entries.len() <= max_entries`
/// - 相邻两条记录内容不同
#[derive(Debug, Clone)]
pub struct ChapterHistory {
    limits: HistoryLimits,
    chapter_id: Option<ItemId>,
    entries: Vec<Vec<Section>>,
    pointer: usize,
    pending: DeferredTask<Vec<Section>>,
}

impl ChapterHistory {
    pub fn new(limits: HistoryLimits) -> Self {
        Self {
            limits: HistoryLimits {
                max_entries: limits.max_entries.max(1),
                ..limits
            },
            chapter_id: None,
            entries: Vec::new(),
            pointer: 0,
            pending: DeferredTask::new(),
        }
    }

    /// 重置为指定章节的单条记录，丢弃待执行的防抖任务
    pub fn reset(&mut self, chapter: Option<&Chapter>) {
        self.pending.cancel();
        self.chapter_id = chapter.map(|c| c.id.clone());
        self.entries = chapter.map(|c| vec![c.sections.clone()]).unwrap_or_default();
        self.pointer = 0;
    }

    /// 当前章节变化时重置，返回是否发生了重置
    pub fn sync(&mut self, chapter: Option<&Chapter>) -> bool {
        if self.chapter_id.as_ref() == chapter.map(|c| &c.id) {
            return false;
        }
        tracing::debug!(
            chapter_id = ?chapter.map(|c| c.id.as_str()),
            "Active chapter changed, history reset"
        );
        self.reset(chapter);
        true
    }

    /// 记录节列表
    ///
    /// `immediate` 为 false 时在静默期结束后才真正入栈，期间的新记录会覆盖旧记录。
    /// 返回是否立即产生了新条目。
    pub fn record(&mut self, sections: Vec<Section>, immediate: bool, now: DateTime<Utc>) -> bool {
        if self.chapter_id.is_none() {
            return false;
        }
        if immediate {
            self.pending.cancel();
            return self.push(sections);
        }
        self.pending.schedule(sections, now + self.limits.debounce);
        false
    }

    /// 到期时执行待入栈的记录
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        match self.pending.take_due(now) {
            Some(sections) => self.push(sections),
            None => false,
        }
    }

    /// 不等静默期，立即执行待入栈的记录
    pub fn flush(&mut self) -> bool {
        match self.pending.cancel() {
            Some(sections) => self.push(sections),
            None => false,
        }
    }

    /// 丢弃待执行的记录，返回是否存在
    pub fn discard_pending(&mut self) -> bool {
        self.pending.cancel().is_some()
    }

    pub fn undo(&mut self) -> Option<Vec<Section>> {
        if !self.can_undo() {
            return None;
        }
        self.pointer -= 1;
        self.entries.get(self.pointer).cloned()
    }

    pub fn redo(&mut self) -> Option<Vec<Section>> {
        if !self.can_redo() {
            return None;
        }
        self.pointer += 1;
        self.entries.get(self.pointer).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.pointer > 0
    }

    pub fn can_redo(&self) -> bool {
        self.pointer + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn chapter_id(&self) -> Option<&ItemId> {
        self.chapter_id.as_ref()
    }

    pub fn current(&self) -> Option<&[Section]> {
        self.entries.get(self.pointer).map(Vec::as_slice)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    pub fn pending_due_at(&self) -> Option<DateTime<Utc>> {
        self.pending.due_at()
    }

    fn push(&mut self, sections: Vec<Section>) -> bool {
        // 与当前条目相同则不入栈，重做记录保留
        if self.entries.get(self.pointer) == Some(&sections) {
            return false;
        }
        self.entries.truncate(self.pointer + 1);

        self.entries.push(sections);
        if self.entries.len() > self.limits.max_entries {
            let overflow = self.entries.len() - self.limits.max_entries;
            self.entries.drain(0..overflow);
        }
        self.pointer = self.entries.len() - 1;
        true
    }
}

impl Default for ChapterHistory {
    fn default() -> Self {
        Self::new(HistoryLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn ms(value: i64) -> DateTime<Utc> {
        t0() + Duration::milliseconds(value)
    }

    fn content(text: &str) -> Vec<Section> {
        vec![Section::with_id("s1", text)]
    }

    fn chapter(text: &str) -> Chapter {
        Chapter::with_sections("c1", "第一章", content(text), t0())
    }

    fn history_for(text: &str) -> ChapterHistory {
        let mut history = ChapterHistory::default();
        history.reset(Some(&chapter(text)));
        history
    }

    #[test]
    fn test_debounce_coalesces_rapid_records() {
        let mut history = history_for("a");

        history.record(content("ab"), false, ms(0));
        history.record(content("abc"), false, ms(300));
        history.record(content("abcd"), false, ms(600));

        assert!(!history.poll(ms(1500)));
        assert_eq!(history.len(), 1);

        assert!(history.poll(ms(1600)));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current().unwrap()[0].content, "abcd");
        assert!(!history.is_pending());
    }

    #[test]
    fn test_immediate_record_pushes_and_cancels_pending() {
        let mut history = history_for("a");
        history.record(content("ab"), false, ms(0));

        assert!(history.record(content("abc"), true, ms(10)));
        assert!(!history.is_pending());
        assert!(!history.poll(ms(5000)));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_identical_state_is_not_pushed() {
        let mut history = history_for("a");
        assert!(!history.record(content("a"), true, ms(0)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = history_for("a");
        history.record(content("b"), true, ms(0));
        history.record(content("c"), true, ms(0));

        assert_eq!(history.undo().unwrap()[0].content, "b");
        assert_eq!(history.undo().unwrap()[0].content, "a");
        assert!(history.undo().is_none());
        assert!(!history.can_undo());

        assert_eq!(history.redo().unwrap()[0].content, "b");
        assert_eq!(history.redo().unwrap()[0].content, "c");
        assert!(history.redo().is_none());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_after_undo_discards_future() {
        let mut history = history_for("a");
        history.record(content("b"), true, ms(0));
        history.record(content("c"), true, ms(0));
        history.undo();
        history.undo();

        history.record(content("x"), true, ms(0));
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert_eq!(history.undo().unwrap()[0].content, "a");
    }

    #[test]
    fn test_record_matching_current_keeps_redo() {
        let mut history = history_for("a");
        history.record(content("b"), true, ms(0));
        history.record(content("c"), true, ms(0));
        history.undo();

        history.record(content("b"), false, ms(100));
        assert!(!history.poll(ms(2000)));
        assert!(!history.record(content("b"), true, ms(2100)));
        assert_eq!(history.len(), 3);
        assert!(history.can_redo());
        assert_eq!(history.redo().unwrap()[0].content, "c");
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = history_for("initial");
        for i in 0..120 {
            history.record(content(&format!("state {}", i)), true, ms(i));
            assert!(history.len() <= DEFAULT_MAX_ENTRIES);
        }
        assert_eq!(history.len(), DEFAULT_MAX_ENTRIES);
        assert_eq!(history.pointer(), DEFAULT_MAX_ENTRIES - 1);

        let mut undos = 0;
        let mut oldest = None;
        while let Some(sections) = history.undo() {
            undos += 1;
            oldest = Some(sections);
        }
        assert_eq!(undos, DEFAULT_MAX_ENTRIES - 1);
        assert_eq!(oldest.unwrap()[0].content, format!("state {}", 120 - DEFAULT_MAX_ENTRIES));
    }

    #[test]
    fn test_sync_resets_only_on_chapter_change() {
        let mut history = history_for("a");
        history.record(content("b"), true, ms(0));
        history.record(content("c"), false, ms(0));

        assert!(!history.sync(Some(&chapter("whatever"))));
        assert_eq!(history.len(), 2);

        let other = Chapter::with_sections("c2", "第二章", content("z"), t0());
        assert!(history.sync(Some(&other)));
        assert_eq!(history.len(), 1);
        assert!(!history.is_pending());
        assert_eq!(history.chapter_id().unwrap().as_str(), "c2");

        assert!(history.sync(None));
        assert!(history.is_empty());
        assert!(!history.record(content("q"), true, ms(0)));
    }

    #[test]
    fn test_flush_pushes_pending_immediately() {
        let mut history = history_for("a");
        history.record(content("ab"), false, ms(0));
        assert!(history.flush());
        assert_eq!(history.len(), 2);
        assert!(!history.flush());
    }

    #[test]
    fn test_custom_limits() {
        let mut history = ChapterHistory::new(HistoryLimits {
            max_entries: 3,
            debounce: Duration::milliseconds(200),
        });
        history.reset(Some(&chapter("0")));
        for i in 1..=5 {
            history.record(content(&i.to_string()), true, ms(0));
        }
        assert_eq!(history.len(), 3);

        history.record(content("late"), false, ms(0));
        assert!(history.poll(ms(200)));
    }
}
