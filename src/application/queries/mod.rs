//! 应用层 - 查询（读操作）
//!
//! 大纲与回收站的只读视图

mod outline_queries;

pub use outline_queries::*;
