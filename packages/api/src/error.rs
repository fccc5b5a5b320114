use store::StoreError;

use crate::forms::FormErrors;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything a notes or accounts operation can fail with.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The note does not exist or belongs to someone else. The two cases are
    /// deliberately indistinguishable.
    #[error("not found")]
    NotFound,
    /// Submitted data was rejected; nothing was written.
    #[error("invalid form data")]
    Invalid(FormErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("password hashing failed: {0}")]
    Password(String),
}

impl Error {
    /// Form errors for a rejected submission, if that is what this is.
    pub fn form_errors(&self) -> Option<&FormErrors> {
        match self {
            Error::Invalid(errors) => Some(errors),
            _ => None,
        }
    }
}
