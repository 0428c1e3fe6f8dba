//! Login identity and password digests.

use std::fmt;

use sha2::{Digest, Sha512};
use zeroize::Zeroizing;

/// One-way digest of a password, hex encoded.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Computes the digest of `password`.
    #[must_use]
    pub fn of(password: &str) -> Self {
        let hash = Sha512::digest(password.as_bytes());
        Self(hex::encode(hash))
    }

    /// Returns the hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PasswordDigest({}...)", &self.0[..8])
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity sent to the server during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Account name.
    pub username: String,
    /// Digest of the account password.
    pub digest: PasswordDigest,
}

/// Transient login identity.
///
/// The password is wiped from memory when the credentials are dropped or
/// replaced.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Returns the account name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Computes the password digest.
    #[must_use]
    pub fn digest(&self) -> PasswordDigest {
        PasswordDigest::of(&self.password)
    }

    /// Returns the username together with a freshly computed digest.
    #[must_use]
    pub fn login(&self) -> LoginCredentials {
        LoginCredentials {
            username: self.username.clone(),
            digest: self.digest(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"*".repeat(self.password.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_sha512_hex() {
        let digest = PasswordDigest::of("p");
        assert_eq!(digest.as_str().len(), 128);
        assert!(digest.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_same_password_same_digest() {
        assert_eq!(PasswordDigest::of("hunter2"), PasswordDigest::of("hunter2"));
    }

    #[test]
    fn test_different_password_different_digest() {
        assert_ne!(PasswordDigest::of("hunter2"), PasswordDigest::of("hunter3"));
    }

    #[test]
    fn test_known_digest_of_empty_password() {
        assert!(
            PasswordDigest::of("")
                .as_str()
                .starts_with("cf83e1357eefb8bdf1542850d66d8007")
        );
    }

    #[test]
    fn test_login_pairs_username_and_digest() {
        let credentials = Credentials::new("u", "p");
        let login = credentials.login();
        assert_eq!(login.username, "u");
        assert_eq!(login.digest, PasswordDigest::of("p"));
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let credentials = Credentials::new("alice", "correct horse");
        let debug_output = format!("{credentials:?}");

        assert!(debug_output.contains("alice"));
        assert!(!debug_output.contains("correct horse"));
    }
}
