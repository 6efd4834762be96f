//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod clock;
pub mod events;
pub mod memory;

pub use clock::{ManualClock, SystemClock};
pub use events::TracingNotifier;
pub use memory::{AutoConfirm, RecordingNotifier, ScriptedConfirmation};
