//! History Commands - 撤销/重做

use crate::domain::novel::Section;

/// 用新的节列表替换当前章节内容并记录历史
///
/// `immediate` 为 false 时按防抖规则延迟入栈。
#[derive(Debug, Clone)]
pub struct RecordSections {
    pub sections: Vec<Section>,
    pub immediate: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Undo;

#[derive(Debug, Clone, Copy, Default)]
pub struct Redo;
