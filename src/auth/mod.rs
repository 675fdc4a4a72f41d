//! Authentication
//!
//! Everything the login and signup screens need short of the HTTP calls:
//!
//! - **types**: Auth service request/response bodies and `AuthenticatedUser`
//! - **validation**: Client-side signup/login checks
//! - **session**: The persisted logged-in identity and the 401 path

pub mod session;
pub mod types;
pub mod validation;

pub use session::{
    clear_credentials, expire_credentials, Session, LOGIN_ROUTE, TOKEN_KEY, USER_KEY,
};
pub use types::{AuthenticatedUser, LoginData, LoginRequest, SignupData, SignupRequest};
pub use validation::{
    availability_error, FieldErrors, LoginForm, LoginValidationError, SignupField, SignupForm,
};
