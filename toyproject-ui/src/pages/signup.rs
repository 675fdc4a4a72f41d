//! Signup Page
//!
//! Per-field validation on submit, availability checks when the username or
//! email field loses focus, and a redirect to the login page on success.

use leptos::*;
use leptos_router::*;

use toyproject::auth::{availability_error, FieldErrors, SignupField, SignupForm};

use crate::api;
use crate::components::InlineLoading;
use crate::state::global::use_global_state;

/// Account creation form
#[component]
pub fn Signup() -> impl IntoView {
    let state = use_global_state();
    let navigate = use_navigate();

    let form = create_rw_signal(SignupForm::default());
    let errors = create_rw_signal(FieldErrors::new());
    let (submit_error, set_submit_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);
    let checking = create_rw_signal(None::<SignupField>);

    let check_availability = move |field: SignupField| {
        let value = form.with_untracked(|f| f.value(field).trim().to_string());
        if value.is_empty() {
            return;
        }

        checking.set(Some(field));
        spawn_local(async move {
            let result = match field {
                SignupField::Email => api::check_email(&value).await,
                _ => api::check_username(&value).await,
            };

            match result {
                Ok(available) => errors.update(|errs| match availability_error(field, available) {
                    Some(msg) => errs.set(field, msg),
                    None => errs.clear(field),
                }),
                Err(e) => web_sys::console::warn_1(
                    &format!("Availability check failed: {}", e).into(),
                ),
            }
            checking.set(None);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }

        let request = match form.get_untracked().to_request() {
            Ok(request) => request,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };

        errors.set(FieldErrors::new());
        set_submit_error.set(None);
        set_submitting.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            match api::signup(&request).await {
                Ok(data) => {
                    state.show_success(&format!(
                        "Account created for {}. Please log in.",
                        data.username
                    ));
                    navigate("/login", Default::default());
                }
                Err(e) => set_submit_error.set(Some(e.signup_message())),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto bg-gray-800 rounded-xl p-8 space-y-6">
            <h1 class="text-2xl font-bold">"Sign up"</h1>

            {move || submit_error.get().map(|msg| view! {
                <div class="p-3 bg-red-900/40 border border-red-700 rounded-lg text-sm text-red-300">
                    {msg}
                </div>
            })}

            <form on:submit=on_submit class="space-y-4">
                <SignupInput
                    field=SignupField::Username
                    label="Username"
                    input_type="text"
                    form=form
                    errors=errors
                    checking=checking
                    on_blur=Callback::new(move |_| check_availability(SignupField::Username))
                />
                <SignupInput
                    field=SignupField::Password
                    label="Password"
                    input_type="password"
                    form=form
                    errors=errors
                    checking=checking
                />
                <SignupInput
                    field=SignupField::PasswordConfirm
                    label="Confirm password"
                    input_type="password"
                    form=form
                    errors=errors
                    checking=checking
                />
                <SignupInput
                    field=SignupField::Email
                    label="Email"
                    input_type="email"
                    form=form
                    errors=errors
                    checking=checking
                    on_blur=Callback::new(move |_| check_availability(SignupField::Email))
                />

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 rounded-lg py-3 font-semibold flex items-center justify-center space-x-2"
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> <span>"Creating account..."</span> }.into_view()
                    } else {
                        view! { <span>"Sign up"</span> }.into_view()
                    }}
                </button>
            </form>

            <p class="text-sm text-gray-400">
                "Already registered? "
                <A href="/login" class="text-blue-400 hover:underline">"Login"</A>
            </p>
        </div>
    }
}

/// One labelled input bound to a form field
///
/// Typing clears the field's error.
#[component]
fn SignupInput(
    field: SignupField,
    label: &'static str,
    input_type: &'static str,
    form: RwSignal<SignupForm>,
    errors: RwSignal<FieldErrors>,
    checking: RwSignal<Option<SignupField>>,
    #[prop(optional)] on_blur: Option<Callback<()>>,
) -> impl IntoView {
    let on_input = move |ev| {
        let value = event_target_value(&ev);
        form.update(|f| match field {
            SignupField::Username => f.username = value,
            SignupField::Password => f.password = value,
            SignupField::PasswordConfirm => f.password_confirm = value,
            SignupField::Email => f.email = value,
        });
        if errors.with_untracked(|errs| errs.contains(field)) {
            errors.update(|errs| errs.clear(field));
        }
    };

    let has_error = move || errors.with(|errs| errs.contains(field));

    view! {
        <div>
            <label class="block text-sm text-gray-400 mb-2">{label}</label>
            <div class="relative">
                <input
                    type=input_type
                    prop:value=move || form.with(|f| f.value(field).to_string())
                    on:input=on_input
                    on:blur=move |_| {
                        if let Some(callback) = on_blur {
                            callback.call(());
                        }
                    }
                    class=move || format!(
                        "w-full bg-gray-700 rounded-lg px-4 py-3 border focus:outline-none {}",
                        if has_error() { "border-red-500" } else { "border-gray-600 focus:border-blue-500" }
                    )
                />
                {move || (checking.get() == Some(field)).then(|| view! {
                    <div class="absolute inset-y-0 right-0 pr-3 flex items-center">
                        <InlineLoading />
                    </div>
                })}
            </div>
            {move || errors.with(|errs| errs.get(field).map(str::to_string)).map(|msg| view! {
                <p class="mt-1 text-sm text-red-400">{msg}</p>
            })}
        </div>
    }
}
