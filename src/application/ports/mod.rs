//! Application Ports - 出站端口定义
//!
//! 定义应用层依赖的外部协作者：时钟、用户提示、删除确认

mod clock;
mod confirmation;
mod notifier;

pub use clock::ClockPort;
pub use confirmation::{ConfirmRequest, ConfirmationPort};
pub use notifier::{Notification, NotificationLevel, NotifierPort};
