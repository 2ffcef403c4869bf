use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::time::fixed_now;
use services::{Clock, HistoryService, QuizLoopService, QuizSettings};
use storage::repository::{HistoryRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::QuizPage;
use crate::views::quiz::QuizTestHandles;
use crate::vm::QuizIntent;

#[derive(Clone)]
struct TestApp {
    history: Arc<HistoryService>,
    quiz_loop: Arc<QuizLoopService>,
    settings: QuizSettings,
}

impl UiApp for TestApp {
    fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn quiz_settings(&self) -> QuizSettings {
        self.settings
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn QuizPageHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizPage {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub history: Arc<dyn HistoryRepository>,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Let spawned intents and reloaded resources finish.
    pub async fn settle(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
    }

    pub async fn send(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.settle().await;
    }

    /// Dispatch several intents before any of them gets to run.
    pub async fn send_all(&mut self, intents: Vec<QuizIntent>) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| {
            for intent in intents {
                dispatch.call(intent);
            }
        });
        self.settle().await;
    }

    pub fn is_complete(&self) -> bool {
        let vm = self.handles.vm();
        self.dom
            .in_runtime(|| vm.read().as_ref().is_some_and(crate::vm::QuizVm::is_complete))
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness() -> ViewHarness {
    let storage = Storage::in_memory();
    setup_view_harness_with_history_repo(storage.history)
}

pub fn setup_view_harness_with_history_repo(history: Arc<dyn HistoryRepository>) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let service = HistoryService::new(clock, Arc::clone(&history));
    let app = Arc::new(TestApp {
        history: Arc::new(service.clone()),
        quiz_loop: Arc::new(QuizLoopService::new(service)),
        settings: QuizSettings::new(30, Duration::from_secs(1)),
    });
    let handles = QuizTestHandles::default();

    let dom = VirtualDom::new_with_props(
        QuizPageHarness,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        history,
        handles,
    }
}
