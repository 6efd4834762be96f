//! Novel Context - Tree Accessors
//!
//! 卷/章两级树的纯函数工具：
//! - 展平为文档顺序的章节序列
//! - 按 id 定位、替换、摘除节点
//!
//! 所有函数都不修改输入，返回新的 items 数组。

use super::{Chapter, ItemId, NovelItem};

/// 节点在树中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// 根层级下标
    Root(usize),
    /// 某个卷内的章节下标
    Nested {
        volume_index: usize,
        chapter_index: usize,
    },
}

/// 按文档顺序返回所有章节，卷内章节内联到卷所在位置
pub fn flatten(items: &[NovelItem]) -> Vec<&Chapter> {
    let mut chapters = Vec::new();
    for item in items {
        match item {
            NovelItem::Chapter(chapter) => chapters.push(chapter),
            NovelItem::Volume(volume) => chapters.extend(volume.chapters.iter()),
        }
    }
    chapters
}

/// 在根层级或卷内查找节点位置
pub fn locate(items: &[NovelItem], target_id: &ItemId) -> Option<Location> {
    if let Some(index) = items.iter().position(|item| item.id() == target_id) {
        return Some(Location::Root(index));
    }

    items.iter().enumerate().find_map(|(volume_index, item)| {
        let volume = item.as_volume()?;
        volume
            .chapters
            .iter()
            .position(|chapter| &chapter.id == target_id)
            .map(|chapter_index| Location::Nested {
                volume_index,
                chapter_index,
            })
    })
}

/// 按 id 查找存活章节（根层级或卷内）
pub fn find_chapter<'a>(items: &'a [NovelItem], chapter_id: &ItemId) -> Option<&'a Chapter> {
    flatten(items).into_iter().find(|c| &c.id == chapter_id)
}

/// 查找包含指定节的章节
pub fn find_chapter_of_section<'a>(
    items: &'a [NovelItem],
    section_id: &ItemId,
) -> Option<&'a Chapter> {
    flatten(items)
        .into_iter()
        .find(|c| c.contains_section(section_id))
}

/// 返回替换了目标节点的新 items
///
/// 目标是卷内章节时，所在卷一并替换。卷内位置只接受章节，
/// 若 updater 返回卷则保持原样。找不到目标时原样返回。
pub fn locate_and_update<F>(items: &[NovelItem], target_id: &ItemId, updater: F) -> Vec<NovelItem>
where
    F: FnOnce(&NovelItem) -> NovelItem,
{
    let mut updated = items.to_vec();

    match locate(items, target_id) {
        Some(Location::Root(index)) => {
            updated[index] = updater(&items[index]);
        }
        Some(Location::Nested {
            volume_index,
            chapter_index,
        }) => {
            if let NovelItem::Volume(volume) = &mut updated[volume_index] {
                let current = NovelItem::Chapter(volume.chapters[chapter_index].clone());
                match updater(&current) {
                    NovelItem::Chapter(chapter) => volume.chapters[chapter_index] = chapter,
                    NovelItem::Volume(_) => {
                        tracing::warn!(
                            target_id = %target_id,
                            "Refusing to nest a volume inside a volume"
                        );
                    }
                }
            }
        }
        None => {
            tracing::debug!(target_id = %target_id, "Update target not found");
        }
    }

    updated
}

/// 对指定章节应用 updater；目标不是章节时原样返回
pub fn update_chapter<F>(items: &[NovelItem], chapter_id: &ItemId, updater: F) -> Vec<NovelItem>
where
    F: FnOnce(&Chapter) -> Chapter,
{
    locate_and_update(items, chapter_id, |item| match item {
        NovelItem::Chapter(chapter) => NovelItem::Chapter(updater(chapter)),
        other => other.clone(),
    })
}

/// 从根层级或所在卷中摘除节点，返回剩余 items 和被摘除的节点
pub fn detach(items: &[NovelItem], target_id: &ItemId) -> Option<(Vec<NovelItem>, NovelItem)> {
    let mut remaining = items.to_vec();

    let detached = match locate(items, target_id)? {
        Location::Root(index) => remaining.remove(index),
        Location::Nested {
            volume_index,
            chapter_index,
        } => match &mut remaining[volume_index] {
            NovelItem::Volume(volume) => NovelItem::Chapter(volume.chapters.remove(chapter_index)),
            NovelItem::Chapter(_) => return None,
        },
    };

    Some((remaining, detached))
}

/// 树中所有 id：卷、章、节
pub fn collect_ids(items: &[NovelItem]) -> Vec<&ItemId> {
    let mut ids = Vec::new();
    for item in items {
        if let NovelItem::Volume(volume) = item {
            ids.push(&volume.id);
        }
    }
    for chapter in flatten(items) {
        ids.push(&chapter.id);
        ids.extend(chapter.sections.iter().map(|s| &s.id));
    }
    ids
}

/// `candidate` 是否位于 `ancestor` 卷之内
pub fn is_nested_in(items: &[NovelItem], candidate: &ItemId, ancestor: &ItemId) -> bool {
    items
        .iter()
        .filter_map(NovelItem::as_volume)
        .find(|volume| &volume.id == ancestor)
        .is_some_and(|volume| volume.chapters.iter().any(|c| &c.id == candidate))
}
