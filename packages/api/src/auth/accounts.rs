//! # Accounts — signup and credential checks
//!
//! [`Accounts::signup`] validates a [`SignupForm`] and stores a new user with
//! an Argon2id hash; [`Accounts::authenticate`] checks a [`LoginForm`].
//! Rejections come back as [`Error::Invalid`] with per-field messages, and a
//! failed login never says which half of the credentials was wrong.

use std::sync::Arc;

use serde::Deserialize;
use store::{NewUser, StoreError, User, UserId, UserStore};

use super::password::{hash_password, verify_password};
use crate::error::{Error, Result};
use crate::forms::{FormErrors, NON_FIELD, REQUIRED};

pub const MAX_USERNAME_LEN: usize = 150;
pub const MIN_PASSWORD_LEN: usize = 8;

pub const BAD_CREDENTIALS: &str =
    "Пожалуйста, введите правильные имя пользователя и пароль. Оба поля могут быть чувствительны к регистру.";

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn is_valid_username(username: &str) -> bool {
    username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
}

impl SignupForm {
    fn validate(&self) -> Result<String> {
        let mut errors = FormErrors::new();
        let username = self.username.trim();

        if username.is_empty() {
            errors.add("username", REQUIRED);
        } else if username.chars().count() > MAX_USERNAME_LEN {
            errors.add(
                "username",
                format!("Убедитесь, что это значение содержит не более {MAX_USERNAME_LEN} символов."),
            );
        } else if !is_valid_username(username) {
            errors.add(
                "username",
                "Введите правильное имя пользователя. Оно может содержать только буквы, цифры и знаки @/./+/-/_.",
            );
        }

        if self.password1.is_empty() {
            errors.add("password1", REQUIRED);
        }
        if self.password2.is_empty() {
            errors.add("password2", REQUIRED);
        } else if self.password1 != self.password2 {
            errors.add("password2", "Введенные пароли не совпадают.");
        } else if self.password1.chars().count() < MIN_PASSWORD_LEN {
            errors.add(
                "password2",
                format!("Введённый пароль слишком короткий. Он должен содержать как минимум {MIN_PASSWORD_LEN} символов."),
            );
        } else if self.password1.chars().all(|c| c.is_ascii_digit()) {
            errors.add("password2", "Введённый пароль состоит только из цифр.");
        } else if self.password1.eq_ignore_ascii_case(username) {
            errors.add("password2", "Введённый пароль слишком похож на имя пользователя.");
        }

        errors.into_result()?;
        Ok(username.to_string())
    }
}

#[derive(Clone)]
pub struct Accounts {
    store: Arc<dyn UserStore>,
}

impl Accounts {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub async fn find(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.store.find_user(id).await?)
    }

    /// Register a new account.
    pub async fn signup(&self, form: &SignupForm) -> Result<User> {
        let username = form.validate()?;
        let password_hash = hash_password(&form.password1)?;

        let user = self
            .store
            .create_user(NewUser {
                username,
                password_hash,
            })
            .await
            .map_err(|err| match err {
                StoreError::UsernameTaken(_) => Error::Invalid(FormErrors::single(
                    "username",
                    "Пользователь с таким именем уже существует.",
                )),
                other => Error::Store(other),
            })?;
        tracing::info!(username = %user.username, "user signed up");
        Ok(user)
    }

    /// Look the user up and verify the password.
    pub async fn authenticate(&self, form: &LoginForm) -> Result<User> {
        let username = form.username.trim();
        let rejected = || Error::Invalid(FormErrors::single(NON_FIELD, BAD_CREDENTIALS));

        if username.is_empty() || form.password.is_empty() {
            return Err(rejected());
        }
        let Some(user) = self.store.find_user_by_username(username).await? else {
            tracing::info!(%username, "login for unknown user");
            return Err(rejected());
        };
        if !verify_password(&form.password, &user.password_hash)? {
            tracing::info!(%username, "login with wrong password");
            return Err(rejected());
        }
        Ok(user)
    }
}
