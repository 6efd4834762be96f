//! Novel Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 节点唯一标识
///
/// 卷、章、节、世界观条目、规则共用同一个 id 空间，
/// 在一部小说内（含回收站）唯一。宿主导入的 id 可以是任意字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// 生成新的随机 id
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// 可删除实体的种类，也是回收站条目的判别字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Volume,
    Chapter,
    Section,
    WorldEntity,
    Rule,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Volume => "volume",
            ItemKind::Chapter => "chapter",
            ItemKind::Section => "section",
            ItemKind::WorldEntity => "world_entity",
            ItemKind::Rule => "rule",
        }
    }

    /// 卷和章属于树结构节点，删除前需要用户确认
    pub fn is_structural(&self) -> bool {
        matches!(self, ItemKind::Volume | ItemKind::Chapter)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 拖放到卷/章上的落点
///
/// BEFORE/AFTER 由 UI 层根据光标相对目标中线的位置计算。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

/// 节之间拖放的落点（节没有嵌套，不存在 INSIDE）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SiblingPosition {
    Before,
    After,
}

impl From<SiblingPosition> for DropPosition {
    fn from(position: SiblingPosition) -> Self {
        match position {
            SiblingPosition::Before => DropPosition::Before,
            SiblingPosition::After => DropPosition::After,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_id_is_transparent_string() {
        let id = ItemId::from("s1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"s1\"");
        assert_eq!(id.to_string(), "s1");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(ItemId::new(), ItemId::new());
    }

    #[test]
    fn test_only_volumes_and_chapters_are_structural() {
        assert!(ItemKind::Volume.is_structural());
        assert!(ItemKind::Chapter.is_structural());
        assert!(!ItemKind::Section.is_structural());
        assert!(!ItemKind::Rule.is_structural());
    }
}
