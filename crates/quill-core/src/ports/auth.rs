//! Authentication ports.

/// Token service - issues and verifies signed identity tokens.
///
/// A token moves through a single lifecycle: issued, then valid until its
/// absolute expiry passes or verification fails. There is no refresh or
/// rotation; expiry is non-renewable.
pub trait TokenService: Send + Sync {
    /// Issue a signed token embedding the user id and an absolute expiry.
    fn issue(&self, user_id: i64) -> Result<String, AuthError>;

    /// Verify a token and return the embedded user id.
    fn verify(&self, token: &str) -> Result<i64, AuthError>;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plaintext password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored digest.
    ///
    /// A malformed digest is a verification failure, not an error.
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Missing authentication token")]
    MissingToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("User not found")]
    UnknownUser,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Hashing error: {0}")]
    Hashing(String),
}
