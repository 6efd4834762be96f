//! Manual Clock Implementation

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::application::ports::ClockPort;

/// 虚拟时钟
///
/// 只有显式调用 `set`/`advance` 时间才会前进。
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.lock() = at;
    }

    pub fn advance(&self, by: Duration) -> DateTime<Utc> {
        let mut guard = self.lock();
        *guard += by;
        let now = *guard;
        tracing::trace!(now = %now, "Manual clock advanced");
        now
    }

    fn lock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        // 中毒时沿用内部值
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl ClockPort for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.lock()
    }
}
