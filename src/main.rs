//! Novel Workbench - 命令行查看器
//!
//! 用法: `novel-workbench [novel.json]`
//! 读取作品快照（缺省时生成示例作品），输出大纲、回收站与当前章节。

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;

use novel_workbench::application::{AddChapter, AddVolume, Workbench, WorkbenchSettings};
use novel_workbench::config::{load_config, print_config, AppConfig};
use novel_workbench::domain::novel::Novel;
use novel_workbench::infrastructure::{AutoConfirm, SystemClock, TracingNotifier};

fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    tracing::info!("Novel Workbench");
    print_config(&config);

    let novel = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let novel: Novel = serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse novel snapshot {}", path.display()))?;
            tracing::info!(path = %path.display(), title = %novel.title(), "Novel loaded");
            novel
        }
        None => {
            tracing::info!("No snapshot given, using sample novel");
            Novel::new("未命名作品", Utc::now())
        }
    };

    let mut workbench = Workbench::new(
        novel,
        WorkbenchSettings::from(&config),
        Arc::new(SystemClock),
        Arc::new(TracingNotifier),
        Arc::new(AutoConfirm),
    );

    if workbench.chapters().is_empty() {
        let (_, volume_id) = workbench.add_volume(AddVolume {
            title: "第一卷".to_string(),
        });
        workbench.add_chapter(AddChapter {
            title: "第一章".to_string(),
            volume_id: Some(volume_id),
        });
    }

    report(&workbench);
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!("{},novel_workbench={}", config.log.level, config.log.level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn report(workbench: &Workbench) {
    let novel = workbench.novel();
    tracing::info!(title = %novel.title(), chapters = workbench.chapters().len(), "=== Outline ===");
    for entry in workbench.outline() {
        let marker = if entry.active { "*" } else { " " };
        let indent = "  ".repeat(entry.depth);
        match entry.chapter_number {
            Some(number) => tracing::info!(
                "{}{}{}. {} ({} 节)",
                marker,
                indent,
                number,
                entry.title,
                entry.section_count
            ),
            None => tracing::info!("{}{}[{}] {}", marker, indent, entry.kind, entry.title),
        }
    }

    let trash = workbench.trash();
    tracing::info!(count = trash.len(), "=== Trash ===");
    for entry in trash {
        tracing::info!("[{}] {} (deleted {})", entry.kind, entry.label, entry.deleted_at);
    }

    match workbench.active_chapter() {
        Some(chapter) => tracing::info!(
            chapter_id = %chapter.id,
            title = %chapter.title,
            sections = chapter.sections.len(),
            previous = workbench.previous_chapters(3).len(),
            "Active chapter"
        ),
        None => tracing::info!("No active chapter"),
    }
}
