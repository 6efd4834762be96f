//! Confirmation Implementations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::application::ports::{ConfirmRequest, ConfirmationPort};

/// 总是同意
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl ConfirmationPort for AutoConfirm {
    fn confirm(&self, request: &ConfirmRequest) -> bool {
        tracing::debug!(prompt = %request.message(), "Auto-confirmed");
        true
    }
}

/// 固定回答，并记录收到的询问
#[derive(Debug)]
pub struct ScriptedConfirmation {
    answer: AtomicBool,
    prompts: Mutex<Vec<ConfirmRequest>>,
}

impl ScriptedConfirmation {
    pub fn new(answer: bool) -> Self {
        Self {
            answer: AtomicBool::new(answer),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 修改之后的回答
    pub fn answer(&self, answer: bool) {
        self.answer.store(answer, Ordering::SeqCst);
    }

    pub fn prompts(&self) -> Vec<ConfirmRequest> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl ConfirmationPort for ScriptedConfirmation {
    fn confirm(&self, request: &ConfirmRequest) -> bool {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(request.clone());
        }
        self.answer.load(Ordering::SeqCst)
    }
}
