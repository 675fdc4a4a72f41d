//! Navigation Component
//!
//! Header navigation bar with brand, section links and the login state.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::state::global::use_global_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let navigate = navigate.clone();
        spawn_local(async move {
            // Local logout happens even if the service call fails
            if let Err(e) = api::logout().await {
                web_sys::console::warn_1(&format!("Logout request failed: {}", e).into());
            }
            state.logout();
            state.show_success("Logged out.");
            navigate("/", Default::default());
        });
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-xl font-bold text-white">"ToyProject"</span>
                    </A>

                    <div class="flex items-center space-x-1">
                        <NavLink href="/riot" label="Match History" />
                        <NavLink href="/board" label="Board" />

                        {move || match state.user.get() {
                            Some(user) => view! {
                                <span class="px-3 text-gray-300">{user.username}</span>
                                <button
                                    on:click=on_logout.clone()
                                    class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700"
                                >
                                    "Logout"
                                </button>
                            }.into_view(),
                            None => view! {
                                <NavLink href="/login" label="Login" />
                                <NavLink href="/signup" label="Sign up" />
                            }.into_view(),
                        }}
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
