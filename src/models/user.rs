use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::auth::password::PasswordHasher;

lazy_static! {
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// A registered account.
///
/// `password` holds the salted bcrypt hash and `salt` the bcrypt setting string it was
/// computed with. Neither is ever serialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub salt: String,
}

impl User {
    /// Re-hashes `password` with this user's salt and compares it to the stored hash.
    pub fn validate_password(
        &self,
        password: &str,
        hasher: &dyn PasswordHasher,
    ) -> Result<bool, bcrypt::BcryptError> {
        let hash = hasher.hash(password, &self.salt)?;
        Ok(hash == self.password)
    }
}

/// A user row that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub salt: String,
}

/// Username/password pair accepted by both sign-up and sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthCredentials {
    /// 4 to 20 characters; letters, digits, underscores or hyphens.
    #[validate(
        length(min = 4, max = 20),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    /// 8 to 20 characters with an upper-case letter, a lower-case letter and a digit or symbol.
    #[validate(length(min = 8, max = 20), custom = "validate_password_strength")]
    pub password: String,
}

fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit_or_symbol = password
        .chars()
        .any(|c| c.is_ascii_digit() || !(c.is_alphanumeric() || c == '_'));

    if has_upper && has_lower && has_digit_or_symbol {
        Ok(())
    } else {
        let mut err = ValidationError::new("password_strength");
        err.message = Some("password too weak".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::MockPasswordHasher;
    use mockall::predicate::eq;

    fn stored_user() -> User {
        User {
            id: 1,
            username: "TestUser".to_string(),
            password: "testPassword".to_string(),
            salt: "testSalt".to_string(),
        }
    }

    #[test]
    fn test_validate_password_matches() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .with(eq("123456"), eq("testSalt"))
            .times(1)
            .returning(|_, _| Ok("testPassword".to_string()));

        assert!(stored_user().validate_password("123456", &hasher).unwrap());
    }

    #[test]
    fn test_validate_password_mismatch() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .with(eq("wrongPassword"), eq("testSalt"))
            .times(1)
            .returning(|_, _| Ok("wrongPassword".to_string()));

        assert!(!stored_user()
            .validate_password("wrongPassword", &hasher)
            .unwrap());
    }

    #[test]
    fn test_validate_password_propagates_hasher_failure() {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_, _| Err(bcrypt::BcryptError::InvalidHash("testSalt".to_string())));

        assert!(stored_user().validate_password("123456", &hasher).is_err());
    }

    #[test]
    fn test_user_serialisation_hides_secrets() {
        let json = serde_json::to_value(stored_user()).unwrap();
        assert_eq!(json["username"], "TestUser");
        assert!(json.get("password").is_none());
        assert!(json.get("salt").is_none());
    }

    #[test]
    fn test_credentials_validation() {
        let valid = AuthCredentials {
            username: "test_user-1".to_string(),
            password: "Passw0rd".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_username = AuthCredentials {
            username: "abc".to_string(),
            password: "Passw0rd".to_string(),
        };
        assert!(short_username.validate().is_err());

        let bad_username = AuthCredentials {
            username: "test user!".to_string(),
            password: "Passw0rd".to_string(),
        };
        assert!(bad_username.validate().is_err());

        let weak_password = AuthCredentials {
            username: "test_user".to_string(),
            password: "password".to_string(),
        };
        assert!(weak_password.validate().is_err());

        let symbol_password = AuthCredentials {
            username: "test_user".to_string(),
            password: "Password!".to_string(),
        };
        assert!(symbol_password.validate().is_ok());

        let long_password = AuthCredentials {
            username: "test_user".to_string(),
            password: "Passw0rd".repeat(3),
        };
        assert!(long_password.validate().is_err());
    }
}
