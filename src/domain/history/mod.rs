//! History - 当前章节的撤销/重做
//!
//! - DeferredTask: 单槽延迟任务（防抖）
//! - ChapterHistory: 有界历史栈

mod chapter_history;
mod deferred;

pub use chapter_history::{
    ChapterHistory, HistoryLimits, DEFAULT_DEBOUNCE_MS, DEFAULT_MAX_ENTRIES,
};
pub use deferred::DeferredTask;
