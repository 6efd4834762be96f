//! 单槽延迟任务
//!
//! 同一时刻最多只有一个待执行任务，重新调度会取消旧任务。
//! 时间由调用方传入，测试中可以使用虚拟时钟。

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
struct Scheduled<T> {
    payload: T,
    due_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DeferredTask<T> {
    slot: Option<Scheduled<T>>,
}

impl<T> DeferredTask<T> {
    pub fn new() -> Self {
        Self { slot: None }
    }

    /// 调度任务，返回是否替换了尚未执行的旧任务
    pub fn schedule(&mut self, payload: T, due_at: DateTime<Utc>) -> bool {
        self.slot.replace(Scheduled { payload, due_at }).is_some()
    }

    /// 取消待执行任务
    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|s| s.payload)
    }

    /// 到期则取出任务
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Option<T> {
        if self.slot.as_ref().is_some_and(|s| s.due_at <= now) {
            self.cancel()
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        self.slot.as_ref().map(|s| s.due_at)
    }
}

impl<T> Default for DeferredTask<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn test_fires_only_when_due() {
        let mut task = DeferredTask::new();
        assert!(!task.schedule("a", t0() + Duration::milliseconds(1000)));

        assert_eq!(task.take_due(t0() + Duration::milliseconds(999)), None);
        assert_eq!(task.take_due(t0() + Duration::milliseconds(1000)), Some("a"));
        assert!(!task.is_pending());
    }

    #[test]
    fn test_reschedule_cancels_previous() {
        let mut task = DeferredTask::new();
        task.schedule(1, t0() + Duration::milliseconds(1000));
        assert!(task.schedule(2, t0() + Duration::milliseconds(1500)));

        assert_eq!(task.take_due(t0() + Duration::milliseconds(1200)), None);
        assert_eq!(task.due_at(), Some(t0() + Duration::milliseconds(1500)));
        assert_eq!(task.take_due(t0() + Duration::milliseconds(1500)), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut task = DeferredTask::new();
        task.schedule("x", t0());
        assert_eq!(task.cancel(), Some("x"));
        assert_eq!(task.take_due(t0()), None);
    }
}
