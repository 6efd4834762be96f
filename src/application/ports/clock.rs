//! Clock Port - 时间来源
//!
//! 删除时间戳与撤销历史的防抖都从这里取时间，测试中替换为虚拟时钟

use chrono::{DateTime, Utc};

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
