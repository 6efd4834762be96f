//! Events - 用户提示输出
//!
//! 无界面宿主中把提示写入日志

mod tracing_notifier;

pub use tracing_notifier::TracingNotifier;
