//! Clock Adapters - 时间来源
//!
//! - SystemClock: 系统时间
//! - ManualClock: 手动推进的虚拟时钟，驱动防抖测试与回放

mod manual_clock;

pub use manual_clock::ManualClock;

use chrono::{DateTime, Utc};

use crate::application::ports::ClockPort;

/// 系统时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
