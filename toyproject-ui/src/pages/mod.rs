//! Application Pages

pub mod board;
pub mod login;
pub mod match_detail;
pub mod riot;
pub mod signup;

pub use board::BoardPage;
pub use login::Login;
pub use match_detail::MatchDetailPage;
pub use riot::Riot;
pub use signup::Signup;
