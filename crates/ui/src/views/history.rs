use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryItemVm, map_history_items};

#[derive(Clone, Debug, PartialEq)]
struct HistoryData {
    items: Vec<HistoryItemVm>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ClearState {
    Idle,
    Clearing,
    Error(ViewError),
}

/// Stored attempts. Reloads whenever `history_rev` changes.
#[component]
pub fn HistoryPanel(history_rev: Signal<u64>) -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.history();
    let clear_state = use_signal(|| ClearState::Idle);

    let history_for_resource = history.clone();
    let resource = use_resource(move || {
        let history = history_for_resource.clone();
        let rev = history_rev();
        async move {
            let items = history.list_all().await.map_err(|err| {
                tracing::warn!(rev, error = %err, "failed to load quiz history");
                ViewError::from(err)
            })?;
            Ok::<_, ViewError>(HistoryData {
                items: map_history_items(&items),
            })
        }
    });

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "history-section",
            h2 { "📜 Quiz History" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    if data.items.is_empty() {
                        p { "No quiz history available." }
                    } else {
                        ul {
                            for item in data.items {
                                li { key: "{item.id}", "{item.label}" }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "history-warning", "{err.message()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| {
                            let mut resource = resource;
                            resource.restart();
                        },
                        "Retry"
                    }
                },
            }

            if let ClearState::Error(err) = clear_state() {
                p { class: "history-warning", "{err.message()}" }
            }
            button {
                class: "clear-history-button",
                r#type: "button",
                disabled: clear_state() == ClearState::Clearing,
                onclick: move |_| {
                    let mut clear_state = clear_state;
                    let mut history_rev = history_rev;
                    let history = history.clone();
                    spawn(async move {
                        clear_state.set(ClearState::Clearing);
                        match history.clear_all().await {
                            Ok(()) => {
                                clear_state.set(ClearState::Idle);
                                *history_rev.write() += 1;
                            }
                            Err(err) => {
                                clear_state.set(ClearState::Error(ViewError::from(err)));
                            }
                        }
                    });
                },
                "🗑️ Clear History"
            }
        }
    }
}
