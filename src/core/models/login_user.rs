//! Login credentials

use crate::core::auth::{hash_password, verify_password};
use crate::core::error::ModelError;
use std::fmt;
use std::str::FromStr;

/// What a login account belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Student account
    #[default]
    Student,
    /// Professor account
    Professor,
    /// Administrator account
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Student => "student",
            Self::Professor => "professor",
            Self::Admin => "admin",
        })
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "professor" => Ok(Self::Professor),
            "admin" => Ok(Self::Admin),
            _ => Err(ModelError::UnknownRole(s.to_string())),
        }
    }
}

/// A login account; the password is only ever held as a digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUser {
    /// Login email (unique identifier)
    pub email_id: String,

    /// Stored password digest
    password: String,

    /// Account role
    pub role: Role,

    /// Set by a successful [`login`](Self::login); never persisted
    is_logged_in: bool,
}

impl LoginUser {
    /// Create an account from a plaintext password
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyField`] if the email is empty
    pub fn new(email_id: String, plain_password: &str, role: Role) -> Result<Self, ModelError> {
        Self::with_digest(email_id, hash_password(plain_password), role)
    }

    /// Create an account from an already hashed password, as read from storage
    ///
    /// # Errors
    /// Returns [`ModelError::EmptyField`] if the email is empty
    pub fn with_digest(email_id: String, digest: String, role: Role) -> Result<Self, ModelError> {
        if email_id.trim().is_empty() {
            return Err(ModelError::EmptyField("Email ID"));
        }
        Ok(Self {
            email_id,
            password: digest,
            role,
            is_logged_in: false,
        })
    }

    /// Stored password digest
    #[must_use]
    pub fn password_digest(&self) -> &str {
        &self.password
    }

    /// Whether this account is currently logged in
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    /// Attempt to log in; sets the logged-in flag only when the password verifies
    pub fn login(&mut self, candidate: &str) -> bool {
        if verify_password(candidate, &self.password) {
            self.is_logged_in = true;
            true
        } else {
            false
        }
    }

    /// Clear the logged-in flag
    ///
    /// # Returns
    /// `false` if the account was not logged in
    pub fn logout(&mut self) -> bool {
        std::mem::replace(&mut self.is_logged_in, false)
    }

    /// Replace the stored digest if `old_password` verifies
    pub fn change_password(&mut self, old_password: &str, new_password: &str) -> bool {
        if !verify_password(old_password, &self.password) {
            return false;
        }
        self.password = hash_password(new_password);
        true
    }
}

impl fmt::Display for LoginUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User: {} (Role: {})", self.email_id, self.role)?;
        if self.is_logged_in {
            write!(f, " [logged in]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(password: &str) -> LoginUser {
        LoginUser::new("test@test.com".to_string(), password, Role::Student).unwrap()
    }

    #[test]
    fn test_password_is_not_stored_in_plaintext() {
        let u = user("TestPassword123!");
        assert_ne!(u.password_digest(), "TestPassword123!");
        assert!(!u.password_digest().is_empty());
    }

    #[test]
    fn test_empty_email_rejected() {
        assert_eq!(
            LoginUser::new(String::new(), "x", Role::Admin).unwrap_err(),
            ModelError::EmptyField("Email ID")
        );
    }

    #[test]
    fn test_login_and_logout() {
        let mut u = user("secret");
        assert!(!u.login("wrong"));
        assert!(!u.is_logged_in());

        assert!(u.login("secret"));
        assert!(u.is_logged_in());

        assert!(u.logout());
        assert!(!u.is_logged_in());
        assert!(!u.logout());
    }

    #[test]
    fn test_change_password() {
        let mut u = user("OldPass123");
        let old_digest = u.password_digest().to_string();

        assert!(!u.change_password("nope", "NewPass456"));
        assert_eq!(u.password_digest(), old_digest);

        assert!(u.change_password("OldPass123", "NewPass456"));
        assert!(verify_password("NewPass456", u.password_digest()));
        assert!(!verify_password("OldPass123", u.password_digest()));
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Professor".parse::<Role>(), Ok(Role::Professor));
        assert_eq!(" admin ".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(Role::Student.to_string(), "student");
        assert!(matches!(
            "dean".parse::<Role>(),
            Err(ModelError::UnknownRole(r)) if r == "dean"
        ));
    }
}
