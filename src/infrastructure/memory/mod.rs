//! Memory Layer - 内存端口实现
//!
//! 记录型通知器与脚本化确认，供嵌入式宿主和测试使用

mod confirmation;
mod recording_notifier;

pub use confirmation::{AutoConfirm, ScriptedConfirmation};
pub use recording_notifier::RecordingNotifier;
