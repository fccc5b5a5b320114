//! Authentication for local username + password accounts.

mod accounts;
mod password;
mod session;

pub use accounts::{Accounts, LoginForm, SignupForm, BAD_CREDENTIALS};
pub use password::{hash_password, verify_password};
pub use session::{current_user_id, log_in, log_out, SESSION_USER_ID_KEY};
