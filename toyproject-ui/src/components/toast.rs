//! Toast
//!
//! The current notice, bottom right, until its timer runs out or the user
//! dismisses it.

use leptos::*;

use crate::state::global::{use_global_state, Notice, NoticeKind};

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_global_state();

    view! {
        <div class="fixed bottom-6 right-4 z-50">
            {move || state.notice.get().map(|notice| view! {
                <NoticeCard notice=notice on_dismiss=Callback::new(move |_| state.dismiss()) />
            })}
        </div>
    }
}

#[component]
fn NoticeCard(notice: Notice, on_dismiss: Callback<()>) -> impl IntoView {
    let (icon, tone) = match notice.kind {
        NoticeKind::Success => ("✓", "bg-green-600"),
        NoticeKind::Warning => ("!", "bg-amber-600"),
        NoticeKind::Error => ("✕", "bg-red-600"),
    };

    view! {
        <div
            role="status"
            class=format!("flex items-center gap-3 {} text-white pl-4 pr-2 py-3 rounded-lg shadow-lg max-w-sm", tone)
        >
            <span class="text-lg font-bold">{icon}</span>
            <span class="text-sm font-medium flex-1">{notice.text}</span>
            <button
                on:click=move |_| on_dismiss.call(())
                class="px-2 text-white/70 hover:text-white"
                aria-label="Dismiss"
            >
                "×"
            </button>
        </div>
    }
}
