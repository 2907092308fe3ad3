use instacook_core::validation::FieldErrors;
use serde::Deserialize;

pub const USERNAME_MAX: usize = 80;
pub const EMAIL_MAX: usize = 200;
pub const PASSWORD_MIN: usize = 8;

/// Usernames that collide with fixed `/users/...` routes.
pub const RESERVED_USERNAMES: &[&str] = &["activate"];

/// Body of a registration request.
#[derive(Clone, Default, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl std::fmt::Debug for RegisterInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterInput")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl RegisterInput {
    /// ## Summary
    /// Checks username, email and password.
    ///
    /// ## Errors
    /// Returns all field errors found.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        match self.username.as_deref() {
            None => errors.add("username", "Missing data for required field."),
            Some(username) => {
                let len = username.chars().count();
                if len == 0 || len > USERNAME_MAX {
                    errors.add(
                        "username",
                        format!("Length must be between 1 and {USERNAME_MAX}."),
                    );
                }
                if !username
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
                {
                    errors.add(
                        "username",
                        "Only letters, digits, '_', '-' and '.' are allowed.",
                    );
                }
                if RESERVED_USERNAMES.contains(&username) {
                    errors.add("username", "This username is reserved.");
                }
            }
        }

        match self.email.as_deref() {
            None => errors.add("email", "Missing data for required field."),
            Some(email) => {
                if !is_email(email) {
                    errors.add("email", "Not a valid email address.");
                }
                errors.check_max_len("email", email, EMAIL_MAX);
            }
        }

        match self.password.as_deref() {
            None => errors.add("password", "Missing data for required field."),
            Some(password) if password.chars().count() < PASSWORD_MIN => {
                errors.add(
                    "password",
                    format!("Shorter than minimum length {PASSWORD_MIN}."),
                );
            }
            Some(_) => {}
        }

        errors.into_result()
    }
}

/// Shape check for `local@domain.tld`; deliverability is not checked.
#[must_use]
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
