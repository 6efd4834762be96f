//! 测试夹具：虚拟时钟、记录型通知器、脚本化确认

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::workbench::{Workbench, WorkbenchSettings};
use crate::domain::novel::{Chapter, Novel, Section, Volume};
use crate::infrastructure::{ManualClock, RecordingNotifier, ScriptedConfirmation};

pub(crate) struct TestEnv {
    pub start: DateTime<Utc>,
    pub clock: Arc<ManualClock>,
    pub notifier: Arc<RecordingNotifier>,
    pub confirmation: Arc<ScriptedConfirmation>,
}

pub(crate) fn start() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn chapter(id: &str, sections: &[&str]) -> Chapter {
    Chapter::with_sections(
        id,
        id,
        sections.iter().map(|s| Section::with_id(*s, *s)).collect(),
        start(),
    )
}

/// c1(s1, s2) 位于根层级，v1 含 c2(s3)、c3(s4)；打开 c1
pub(crate) fn sample_novel() -> Novel {
    Novel::with_items(
        "测试小说",
        vec![
            chapter("c1", &["s1", "s2"]).into(),
            Volume::with_chapters("v1", "卷一", vec![chapter("c2", &["s3"]), chapter("c3", &["s4"])])
                .into(),
        ],
        start(),
    )
}

pub(crate) fn workbench_with(novel: Novel) -> (Workbench, TestEnv) {
    let env = TestEnv {
        start: start(),
        clock: ManualClock::new(start()).arc(),
        notifier: RecordingNotifier::new().arc(),
        confirmation: ScriptedConfirmation::new(true).arc(),
    };
    let workbench = Workbench::new(
        novel,
        WorkbenchSettings::default(),
        env.clock.clone(),
        env.notifier.clone(),
        env.confirmation.clone(),
    );
    (workbench, env)
}

pub(crate) fn fixture() -> (Workbench, TestEnv) {
    workbench_with(sample_novel())
}
