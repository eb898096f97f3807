//! Authentication adapters: JWT session tokens and Argon2 password hashing.

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::JwtTokenService;

#[cfg(test)]
pub mod mock;
