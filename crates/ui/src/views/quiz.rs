use std::collections::VecDeque;

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{HistoryPanel, ViewError};
use crate::vm::{AnswerVm, QuestionVm, QuizIntent, QuizOutcome, QuizScreen, QuizVm, start_quiz};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[component]
pub fn QuizPage() -> Element {
    let history_rev = use_signal(|| 0_u64);

    rsx! {
        div { id: "mainQuiz",
            div { class: "quiz-logo",
                h1 { font_style: "italic", "Quiz Platform" }
            }
            div { class: "quiz-container",
                QuizView { history_rev }
                HistoryPanel { history_rev }
            }
        }
    }
}

/// Active quiz. Bumps `history_rev` after a score is stored.
#[component]
pub fn QuizView(history_rev: Signal<u64>) -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let settings = ctx.quiz_settings();
    let slots = QuizSlots {
        vm: use_signal(|| None::<QuizVm>),
        screen: use_signal(|| None::<QuizScreen>),
        pending: use_signal(VecDeque::<QuizIntent>::new),
        error: use_signal(|| None::<ViewError>),
        history_rev,
    };

    // Owns the tick receiver for as long as the view is mounted.
    let _ticker = use_future(move || {
        let quiz_loop = quiz_loop.clone();
        let mut slots = slots;
        async move {
            let (started, mut ticks) = start_quiz(quiz_loop, settings);
            slots.screen.set(Some(started.screen()));
            slots.vm.set(Some(started));

            while let Some(tick) = ticks.recv().await {
                // An intent is in flight; its advance replaces this timer anyway.
                let Some(mut vm_value) = slots.take() else {
                    continue;
                };

                let result = vm_value.on_tick(tick).await;
                slots.show(&vm_value, result);
                slots.drain(vm_value).await;
            }
        }
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        slots.enqueue(intent);
        spawn(async move {
            // Whoever holds the quiz drains the queue before handing it back.
            if let Some(vm_value) = slots.take() {
                slots.drain(vm_value).await;
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, slots.vm);
            }
        }
    }

    let screen = (slots.screen)();
    let warning = (slots.error)();

    rsx! {
        match screen {
            None => rsx! {
                p { "Loading..." }
            },
            Some(QuizScreen::Question(question)) => rsx! {
                QuestionCard { question, dispatch: dispatch_intent }
            },
            Some(QuizScreen::Completed(card)) => rsx! {
                div { class: "score-card",
                    h2 { "🎉 Quiz Completed!" }
                    p { class: "score", "{card.score_label}" }
                    button {
                        class: "restart-button",
                        r#type: "button",
                        onclick: move |_| dispatch_intent.call(QuizIntent::Restart),
                        "🔄 Restart Quiz"
                    }
                }
            },
        }
        if let Some(err) = warning {
            div { class: "history-warning",
                p { "{err.message()}" }
                if err == ViewError::HistoryUnavailable {
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| dispatch_intent.call(QuizIntent::RetryHistory),
                        "Retry"
                    }
                }
            }
        }
    }
}

/// Signals shared by the tick loop and intent tasks.
///
/// The quiz lives in `vm` while idle. A task takes it out, applies its work
/// plus every queued intent, then puts it back. `screen` keeps the last
/// snapshot so the page stays rendered while a save is in flight.
#[derive(Clone, Copy)]
struct QuizSlots {
    vm: Signal<Option<QuizVm>>,
    screen: Signal<Option<QuizScreen>>,
    pending: Signal<VecDeque<QuizIntent>>,
    error: Signal<Option<ViewError>>,
    history_rev: Signal<u64>,
}

impl QuizSlots {
    fn take(mut self) -> Option<QuizVm> {
        self.vm.write().take()
    }

    fn enqueue(mut self, intent: QuizIntent) {
        if self.vm.peek().is_none() {
            tracing::debug!(?intent, "quiz busy, intent queued");
        }
        self.pending.write().push_back(intent);
    }

    async fn drain(mut self, mut vm_value: QuizVm) {
        loop {
            let next = self.pending.write().pop_front();
            let Some(intent) = next else {
                break;
            };
            let result = vm_value.apply(intent).await;
            self.show(&vm_value, result);
        }
        self.vm.set(Some(vm_value));
    }

    fn show(mut self, vm_value: &QuizVm, result: Result<QuizOutcome, ViewError>) {
        self.screen.set(Some(vm_value.screen()));
        match result {
            Ok(QuizOutcome::Continue) => {
                if self.error.peek().is_some() {
                    self.error.set(None);
                }
            }
            Ok(QuizOutcome::Completed { score }) => {
                tracing::debug!(score, "quiz finished, reloading history");
                self.error.set(None);
                *self.history_rev.write() += 1;
            }
            Err(err) => self.error.set(Some(err)),
        }
    }
}

#[component]
fn QuestionCard(question: QuestionVm, dispatch: Callback<QuizIntent>) -> Element {
    let answer = match question.answer {
        AnswerVm::Options(options) => {
            let buttons = options.into_iter().map(|option| {
                let label = option.label;
                let class = if option.selected {
                    "option-button option-button--selected"
                } else {
                    "option-button"
                };
                rsx! {
                    button {
                        key: "{label}",
                        class,
                        r#type: "button",
                        onclick: move |_| {
                            dispatch.call(QuizIntent::SelectOption(label.to_string()));
                        },
                        "{label}"
                    }
                }
            });
            rsx! {
                {buttons}
            }
        }
        AnswerVm::Numeric { input } => rsx! {
            form {
                class: "form-Quiz",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    dispatch.call(QuizIntent::SubmitNumeric);
                },
                input {
                    r#type: "number",
                    value: "{input}",
                    oninput: move |evt| dispatch.call(QuizIntent::InputChanged(evt.value())),
                }
                button { r#type: "submit", "Submit" }
            }
        },
    };

    rsx! {
        h2 { "{question.round_title}" }
        div { class: "question-box",
            p { class: "progress", "{question.progress_label}" }
            p { class: "timer", "{question.timer_label}" }
            h3 { "{question.prompt}" }
            div { class: "options-container", {answer} }
            if let Some(feedback) = question.feedback {
                p { class: "feedback", "{feedback}" }
            }
            button {
                class: "next-button",
                r#type: "button",
                onclick: move |_| dispatch.call(QuizIntent::Next),
                "➡️ Next"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
