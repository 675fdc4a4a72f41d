//! Login Page

use leptos::*;
use leptos_router::*;

use toyproject::auth::LoginForm;

use crate::api;
use crate::components::InlineLoading;
use crate::state::global::use_global_state;

/// Username/password login form
#[component]
pub fn Login() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let form = create_rw_signal(LoginForm::default());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let request = match form.get_untracked().to_request() {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_error.set(None);
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&request).await {
                Ok(data) => {
                    state.login(data.user.clone(), &data.token);
                    state.show_success(&format!("Welcome, {}!", data.user.username));
                    navigate("/", Default::default());
                }
                Err(e) => set_error.set(Some(e.login_message())),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
            <h1 class="text-2xl font-bold">"Login"</h1>

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Username"</label>
                    <input
                        type="text"
                        prop:value=move || form.with(|f| f.username.clone())
                        on:input=move |ev| form.update(|f| f.username = event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                    <input
                        type="password"
                        prop:value=move || form.with(|f| f.password.clone())
                        on:input=move |ev| form.update(|f| f.password = event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3 border border-gray-600 focus:border-blue-500 focus:outline-none"
                    />
                </div>

                {move || error.get().map(|msg| view! {
                    <p class="text-sm text-red-400">{msg}</p>
                })}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 rounded-lg py-3 font-semibold flex items-center justify-center space-x-2"
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> <span>"Logging in..."</span> }.into_view()
                    } else {
                        view! { <span>"Login"</span> }.into_view()
                    }}
                </button>
            </form>

            <p class="text-sm text-gray-400">
                "No account yet? "
                <A href="/signup" class="text-blue-400 hover:underline">"Sign up"</A>
            </p>
        </div>
    }
}
