//! Novel Context - Move Engine
//!
//! 卷/章的拖放重排（根层级或一层嵌套），以及章内节的重排。
//!
//! 不变量:
//! - 只有一层嵌套：卷不能进入卷
//! - 被拖动的节点不会丢失：目标找不到时追加到末尾

use super::tree::{self, Location};
use super::{DropPosition, ItemId, NovelItem, Section, SiblingPosition, Volume};

/// 判断 `node` 能否按 `position` 放到 `target_id` 处
///
/// 找不到目标视为可放置（回退为追加到根层级）。
pub fn accepts_drop(
    items: &[NovelItem],
    node: &NovelItem,
    target_id: Option<&ItemId>,
    position: DropPosition,
) -> bool {
    let Some(target_id) = target_id else {
        return true;
    };

    match tree::locate(items, target_id) {
        None => true,
        Some(Location::Root(index)) => match position {
            DropPosition::Before | DropPosition::After => true,
            DropPosition::Inside => items[index].is_volume() && !node.is_volume(),
        },
        Some(Location::Nested { .. }) => match position {
            DropPosition::Before | DropPosition::After => !node.is_volume(),
            DropPosition::Inside => false,
        },
    }
}

/// 将节点插入到目标附近
///
/// - 无目标：追加到根层级末尾
/// - 目标在根层级：BEFORE/AFTER 相邻插入；INSIDE 放到卷内首位并展开该卷
/// - 目标在卷内：在该卷的 chapters 中相邻插入
/// - 目标不存在或落点不合法：追加到根层级末尾
pub fn insert_item(
    items: Vec<NovelItem>,
    node: NovelItem,
    target_id: Option<&ItemId>,
    position: DropPosition,
) -> Vec<NovelItem> {
    let mut items = items;

    if !accepts_drop(&items, &node, target_id, position) {
        tracing::debug!(node_id = %node.id(), "Drop rejected, appending at root");
        items.push(node);
        return items;
    }

    let location = target_id.and_then(|id| tree::locate(&items, id));
    match location {
        None => items.push(node),
        Some(Location::Root(index)) => match position {
            DropPosition::Before => items.insert(index, node),
            DropPosition::After => items.insert(index + 1, node),
            DropPosition::Inside => match node {
                NovelItem::Chapter(chapter) => match volume_mut(&mut items, index) {
                    Some(volume) => {
                        volume.chapters.insert(0, chapter);
                        volume.collapsed = false;
                    }
                    None => items.push(NovelItem::Chapter(chapter)),
                },
                node => items.push(node),
            },
        },
        Some(Location::Nested {
            volume_index,
            chapter_index,
        }) => match node {
            NovelItem::Chapter(chapter) => match volume_mut(&mut items, volume_index) {
                Some(volume) => {
                    let at = match position {
                        DropPosition::After => chapter_index + 1,
                        _ => chapter_index,
                    };
                    volume.chapters.insert(at, chapter);
                }
                None => items.push(NovelItem::Chapter(chapter)),
            },
            node => items.push(node),
        },
    }

    items
}

fn volume_mut(items: &mut [NovelItem], index: usize) -> Option<&mut Volume> {
    match items.get_mut(index) {
        Some(NovelItem::Volume(volume)) => Some(volume),
        _ => None,
    }
}

/// 移动卷或章
///
/// 拖到自身、拖到自己卷内的章节、或不合法的落点（卷进卷、拖入章节）均为空操作。
pub fn move_item(
    items: &[NovelItem],
    dragged_id: &ItemId,
    target_id: Option<&ItemId>,
    position: DropPosition,
) -> Vec<NovelItem> {
    if target_id == Some(dragged_id) {
        return items.to_vec();
    }
    if let Some(target_id) = target_id {
        if tree::is_nested_in(items, target_id, dragged_id) {
            tracing::debug!(dragged_id = %dragged_id, "Cannot drop a volume onto its own chapter");
            return items.to_vec();
        }
    }

    let Some((remaining, node)) = tree::detach(items, dragged_id) else {
        tracing::debug!(dragged_id = %dragged_id, "Dragged item not found");
        return items.to_vec();
    };

    if !accepts_drop(&remaining, &node, target_id, position) {
        tracing::debug!(
            dragged_id = %dragged_id,
            position = ?position,
            "Drop position not allowed for this item"
        );
        return items.to_vec();
    }

    insert_item(remaining, node, target_id, position)
}

/// 重排章内的节
///
/// 找不到目标时将被拖动的节追加到末尾。
pub fn move_section(
    sections: &[Section],
    dragged_id: &ItemId,
    target_id: &ItemId,
    position: SiblingPosition,
) -> Vec<Section> {
    if dragged_id == target_id {
        return sections.to_vec();
    }

    let mut reordered = sections.to_vec();
    let Some(from) = reordered.iter().position(|s| &s.id == dragged_id) else {
        return reordered;
    };
    let dragged = reordered.remove(from);

    match reordered.iter().position(|s| &s.id == target_id) {
        Some(index) => {
            let at = match position {
                SiblingPosition::Before => index,
                SiblingPosition::After => index + 1,
            };
            reordered.insert(at, dragged);
        }
        None => reordered.push(dragged),
    }

    reordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::novel::tree::flatten;
    use crate::domain::novel::Chapter;
    use chrono::{DateTime, Utc};

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn chapter(id: &str) -> Chapter {
        Chapter::with_sections(id, id, vec![Section::with_id(format!("{id}-s"), "")], now())
    }

    fn volume(id: &str, chapters: &[&str]) -> NovelItem {
        Volume::with_chapters(id, id, chapters.iter().map(|c| chapter(c)).collect()).into()
    }

    fn shape(items: &[NovelItem]) -> String {
        items
            .iter()
            .map(|item| match item {
                NovelItem::Chapter(c) => c.id.to_string(),
                NovelItem::Volume(v) => format!(
                    "{}[{}]",
                    v.id,
                    v.chapters.iter().map(|c| c.id.as_str()).collect::<Vec<_>>().join(",")
                ),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_move_chapter_inside_volume_prepends_and_expands() {
        let mut v1 = Volume::with_chapters("v1", "v1", vec![chapter("c2"), chapter("c3")]);
        v1.collapsed = true;
        let items: Vec<NovelItem> = vec![chapter("c1").into(), v1.into()];

        let moved = move_item(&items, &"c1".into(), Some(&"v1".into()), DropPosition::Inside);

        assert_eq!(shape(&moved), "v1[c1,c2,c3]");
        assert!(!moved[0].as_volume().unwrap().collapsed);
    }

    #[test]
    fn test_move_before_and_after_at_root() {
        let items: Vec<NovelItem> = vec![chapter("c1").into(), chapter("c2").into(), chapter("c3").into()];

        let moved = move_item(&items, &"c3".into(), Some(&"c1".into()), DropPosition::Before);
        assert_eq!(shape(&moved), "c3 c1 c2");

        let moved = move_item(&items, &"c1".into(), Some(&"c2".into()), DropPosition::After);
        assert_eq!(shape(&moved), "c2 c1 c3");
    }

    #[test]
    fn test_move_relative_to_nested_chapter() {
        let items: Vec<NovelItem> = vec![chapter("c1").into(), volume("v1", &["c2", "c3"])];

        let moved = move_item(&items, &"c1".into(), Some(&"c3".into()), DropPosition::Before);
        assert_eq!(shape(&moved), "v1[c2,c1,c3]");

        let moved = move_item(&items, &"c1".into(), Some(&"c3".into()), DropPosition::After);
        assert_eq!(shape(&moved), "v1[c2,c3,c1]");
    }

    #[test]
    fn test_move_nested_chapter_out_to_root() {
        let items: Vec<NovelItem> = vec![chapter("c1").into(), volume("v1", &["c2", "c3"])];
        let moved = move_item(&items, &"c2".into(), Some(&"c1".into()), DropPosition::Before);
        assert_eq!(shape(&moved), "c2 c1 v1[c3]");
    }

    #[test]
    fn test_move_to_background_appends_at_root() {
        let items = vec![volume("v1", &["c1"]), chapter("c2").into()];
        let moved = move_item(&items, &"c1".into(), None, DropPosition::After);
        assert_eq!(shape(&moved), "v1[] c2 c1");
    }

    #[test]
    fn test_missing_target_falls_back_to_root_append() {
        let items = vec![volume("v1", &["c1", "c2"])];
        let moved = move_item(&items, &"c1".into(), Some(&"ghost".into()), DropPosition::Before);
        assert_eq!(shape(&moved), "v1[c2] c1");
    }

    #[test]
    fn test_drag_onto_self_is_noop() {
        let items: Vec<NovelItem> = vec![chapter("c1").into(), chapter("c2").into()];
        let moved = move_item(&items, &"c1".into(), Some(&"c1".into()), DropPosition::After);
        assert_eq!(moved, items);
    }

    #[test]
    fn test_missing_dragged_is_noop() {
        let items: Vec<NovelItem> = vec![chapter("c1").into()];
        let moved = move_item(&items, &"ghost".into(), None, DropPosition::After);
        assert_eq!(moved, items);
    }

    #[test]
    fn test_nesting_depth_is_capped_at_one_level() {
        let items = vec![volume("v1", &["c1"]), volume("v2", &["c2"])];

        let inside = move_item(&items, &"v2".into(), Some(&"v1".into()), DropPosition::Inside);
        assert_eq!(inside, items);

        let beside_nested = move_item(&items, &"v2".into(), Some(&"c1".into()), DropPosition::After);
        assert_eq!(beside_nested, items);

        let into_chapter: Vec<NovelItem> = vec![chapter("c1").into(), chapter("c2").into()];
        let moved = move_item(&into_chapter, &"c2".into(), Some(&"c1".into()), DropPosition::Inside);
        assert_eq!(moved, into_chapter);
    }

    #[test]
    fn test_volume_cannot_drop_onto_own_chapter() {
        let items: Vec<NovelItem> = vec![chapter("c0").into(), volume("v1", &["c1", "c2"])];
        let moved = move_item(&items, &"v1".into(), Some(&"c2".into()), DropPosition::After);
        assert_eq!(moved, items);
    }

    #[test]
    fn test_moving_volume_keeps_children() {
        let items: Vec<NovelItem> = vec![chapter("c0").into(), volume("v1", &["c1", "c2"])];
        let moved = move_item(&items, &"v1".into(), Some(&"c0".into()), DropPosition::Before);
        assert_eq!(shape(&moved), "v1[c1,c2] c0");
    }

    #[test]
    fn test_move_and_move_back_restores_tree() {
        let items: Vec<NovelItem> = vec![chapter("c1").into(), volume("v1", &["c2", "c3"]), chapter("c4").into()];

        let moved = move_item(&items, &"c3".into(), Some(&"c4".into()), DropPosition::After);
        assert_eq!(shape(&moved), "c1 v1[c2] c4 c3");

        let back = move_item(&moved, &"c3".into(), Some(&"c2".into()), DropPosition::After);
        assert_eq!(back, items);

        let moved = move_item(&items, &"c1".into(), Some(&"v1".into()), DropPosition::Inside);
        let back = move_item(&moved, &"c1".into(), Some(&"v1".into()), DropPosition::Before);
        assert_eq!(back, items);
    }

    #[test]
    fn test_move_preserves_chapter_count() {
        let items: Vec<NovelItem> = vec![chapter("c1").into(), volume("v1", &["c2", "c3"]), chapter("c4").into()];
        for dragged in ["c1", "c2", "c3", "c4", "v1"] {
            for target in ["c1", "c2", "c3", "c4", "v1", "ghost"] {
                for position in [DropPosition::Before, DropPosition::After, DropPosition::Inside] {
                    let moved = move_item(&items, &dragged.into(), Some(&target.into()), position);
                    assert_eq!(flatten(&moved).len(), 4, "{dragged} -> {target} {position:?}");
                }
            }
        }
    }

    #[test]
    fn test_insert_item_rejected_drop_appends_at_root() {
        let items = vec![volume("v1", &["c1"])];
        let node = volume("v2", &[]);
        let inserted = insert_item(items, node, Some(&"v1".into()), DropPosition::Inside);
        assert_eq!(shape(&inserted), "v1[c1] v2[]");
    }

    fn sections(ids: &[&str]) -> Vec<Section> {
        ids.iter().map(|id| Section::with_id(*id, *id)).collect()
    }

    fn section_ids(sections: &[Section]) -> Vec<&str> {
        sections.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_move_section_before_and_after() {
        let list = sections(&["s1", "s2", "s3"]);

        let moved = move_section(&list, &"s3".into(), &"s1".into(), SiblingPosition::Before);
        assert_eq!(section_ids(&moved), vec!["s3", "s1", "s2"]);

        let moved = move_section(&list, &"s1".into(), &"s3".into(), SiblingPosition::After);
        assert_eq!(section_ids(&moved), vec!["s2", "s3", "s1"]);
    }

    #[test]
    fn test_move_section_missing_target_appends() {
        let list = sections(&["s1", "s2", "s3"]);
        let moved = move_section(&list, &"s1".into(), &"ghost".into(), SiblingPosition::Before);
        assert_eq!(section_ids(&moved), vec!["s2", "s3", "s1"]);
    }

    #[test]
    fn test_move_section_noops() {
        let list = sections(&["s1", "s2"]);
        assert_eq!(move_section(&list, &"s1".into(), &"s1".into(), SiblingPosition::After), list);
        assert_eq!(move_section(&list, &"ghost".into(), &"s1".into(), SiblingPosition::After), list);
    }
}
