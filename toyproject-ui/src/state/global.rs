//! Global Application State
//!
//! Reactive state management using Leptos signals. The logged-in user is
//! mirrored from `localStorage` at startup and kept in a signal so the nav
//! bar and guarded pages react to login, logout and 401s.

use leptos::*;

use toyproject::auth::{AuthenticatedUser, Session};
use toyproject::board::BoardError;

use super::storage::WebStorage;

/// How a notice is styled and how long it stays up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    /// Form input the user can fix (blank post fields, wrong post password)
    Warning,
    Error,
}

impl NoticeKind {
    fn duration_ms(self) -> u32 {
        match self {
            NoticeKind::Success => 3000,
            NoticeKind::Warning => 4000,
            NoticeKind::Error => 5000,
        }
    }
}

/// The message currently shown in the toast
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Bumped per notice so a stale timer leaves a newer one alone
    seq: u64,
}

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Logged-in user, `None` when logged out
    pub user: RwSignal<Option<AuthenticatedUser>>,
    /// At most one notice at a time; a new one replaces the old
    pub notice: RwSignal<Option<Notice>>,
    next_seq: StoredValue<u64>,
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let session = Session::restore(WebStorage);
    let state = GlobalState {
        user: create_rw_signal(session.user().cloned()),
        notice: create_rw_signal(None),
        next_seq: store_value(0),
    };

    provide_context(state);
}

/// Global state from context
pub fn use_global_state() -> GlobalState {
    expect_context::<GlobalState>()
}

impl GlobalState {
    /// Persist a successful login and publish the user
    pub fn login(&self, user: AuthenticatedUser, token: &str) {
        let mut session = Session::restore(WebStorage);
        if let Err(e) = session.login(user.clone(), token) {
            log_warn(&format!("Could not persist session: {}", e));
        }
        self.user.set(Some(user));
    }

    /// Forget the user and both stored keys
    pub fn logout(&self) {
        let mut session = Session::restore(WebStorage);
        if let Err(e) = session.logout() {
            log_warn(&format!("Could not clear session: {}", e));
        }
        self.user.set(None);
    }

    pub fn show_success(&self, message: &str) {
        self.notify(NoticeKind::Success, message);
    }

    pub fn show_warning(&self, message: &str) {
        self.notify(NoticeKind::Warning, message);
    }

    pub fn show_error(&self, message: &str) {
        self.notify(NoticeKind::Error, message);
    }

    /// Board failures: input problems warn, a vanished post is an error
    pub fn show_board_error(&self, error: &BoardError) {
        match error {
            BoardError::PostNotFound(_) => self.show_error(&error.to_string()),
            _ => self.show_warning(&error.to_string()),
        }
    }

    pub fn dismiss(&self) {
        self.notice.set(None);
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        let seq = self.next_seq.get_value();
        self.next_seq.set_value(seq + 1);
        self.notice.set(Some(Notice {
            kind,
            text: message.to_string(),
            seq,
        }));

        let notice = self.notice;
        gloo_timers::callback::Timeout::new(kind.duration_ms(), move || {
            if notice.with_untracked(|n| n.as_ref().map(|n| n.seq)) == Some(seq) {
                notice.set(None);
            }
        })
        .forget();
    }
}

/// Warning to the browser console
pub fn log_warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_notices_replace_and_classify() {
        let runtime = create_runtime();
        provide_global_state();
        let state = use_global_state();

        state.show_board_error(&BoardError::MissingFields(vec!["title"]));
        let warning = state.notice.get_untracked().unwrap();
        assert_eq!(warning.kind, NoticeKind::Warning);
        assert_eq!(warning.text, "Please fill in every field (title)");

        state.show_board_error(&BoardError::PostNotFound(9));
        let error = state.notice.get_untracked().unwrap();
        assert_eq!(error.kind, NoticeKind::Error);
        assert!(error.seq > warning.seq);

        state.dismiss();
        assert!(state.notice.get_untracked().is_none());

        runtime.dispose();
    }
}
