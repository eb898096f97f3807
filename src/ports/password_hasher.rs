//! PasswordHasher port - credential hashing.

use crate::domain::foundation::DomainError;

/// Contract for hashing and verifying passwords.
///
/// Hashing is CPU-bound, so the port is synchronous; callers on async paths
/// should treat a call as blocking work.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a storable string.
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Verifies a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
