//! ToyProject Web
//!
//! Client-side rendered Leptos frontend: the match-history lookup, the
//! discussion board and the login/signup screens. Talks to the auth and
//! stats services over HTTP and keeps the session in `localStorage`.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Panic messages to the browser console
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
