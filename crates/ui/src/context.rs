use std::sync::Arc;

use services::{HistoryService, QuizLoopService, QuizSettings};

pub trait UiApp: Send + Sync {
    fn history(&self) -> Arc<HistoryService>;
    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn quiz_settings(&self) -> QuizSettings;
}

#[derive(Clone)]
pub struct AppContext {
    history: Arc<HistoryService>,
    quiz_loop: Arc<QuizLoopService>,
    quiz_settings: QuizSettings,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            history: app.history(),
            quiz_loop: app.quiz_loop(),
            quiz_settings: app.quiz_settings(),
        }
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn quiz_settings(&self) -> QuizSettings {
        self.quiz_settings
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
