#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::IntoEnumIterator;

const SPECIAL_CHARACTERS: &str = "!@#$%^&*";

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn parse(text: String) -> Option<AuthMode> {
        return AuthMode::iter().find(|e| return e.to_string() == text);
    }

    pub fn endpoint(&self) -> &'static str {
        return match self {
            AuthMode::Login => "/api/login",
            AuthMode::Signup => "/api/signup",
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn for_mode(mode: AuthMode) -> Credentials {
        let mut credentials = Credentials::default();
        if mode == AuthMode::Signup {
            credentials.name = Some("".to_string());
        }

        return credentials;
    }
}

/// Password rules checked on signup, in the order they are reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, strum::Display)]
pub enum PasswordRule {
    #[strum(to_string = "Password must be at least 8 characters")]
    MinLength,
    #[strum(to_string = "Must contain at least one uppercase letter")]
    Uppercase,
    #[strum(to_string = "Must contain at least one number")]
    Digit,
    #[strum(to_string = "Must contain at least one special character (!@#$%^&*)")]
    SpecialCharacter,
}

impl PasswordRule {
    pub fn is_satisfied_by(&self, password: &str) -> bool {
        return match self {
            PasswordRule::MinLength => password.chars().count() >= 8,
            PasswordRule::Uppercase => password.chars().any(|c| return c.is_ascii_uppercase()),
            PasswordRule::Digit => password.chars().any(|c| return c.is_ascii_digit()),
            PasswordRule::SpecialCharacter => {
                password.chars().any(|c| return SPECIAL_CHARACTERS.contains(c))
            }
        };
    }
}

pub fn first_failed_rule(password: &str) -> Option<PasswordRule> {
    return PasswordRule::iter().find(|rule| return !rule.is_satisfied_by(password));
}

/// Message for the first rule the password breaks. Empty means the password
/// is acceptable.
pub fn validate_password(password: &str) -> String {
    return first_failed_rule(password)
        .map(|rule| return rule.to_string())
        .unwrap_or_default();
}
