//! Loading Component
//!
//! Loading spinners.

use leptos::*;

/// Full-width loading spinner with a caption
#[component]
pub fn Loading(#[prop(default = "Loading...")] label: &'static str) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center py-12 space-y-3 text-gray-400">
            <div class="loading-spinner w-8 h-8" />
            <span class="text-sm">{label}</span>
        </div>
    }
}

/// Inline loading spinner for buttons
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="inline-block loading-spinner w-4 h-4" />
    }
}
