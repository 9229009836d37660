//! Salted credential hashing
//!
//! Credentials are stored as `base64(SHA-256(salt || password))` next to a
//! base64 salt of 16 random bytes. The table is a local convenience, not an
//! authentication system.

use base64::Engine as _;
use sha2::{Digest, Sha256};

/// Number of random salt bytes
pub const SALT_LEN: usize = 16;

/// Salt and hash of one credential
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword {
    /// Base64 salt
    pub salt: String,
    /// Base64 SHA-256 digest
    pub hash: String,
}

/// Generate a fresh random salt
pub fn generate_salt() -> String {
    use rand::RngCore as _;

    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    base64::engine::general_purpose::STANDARD.encode(salt)
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    base64::engine::general_purpose::STANDARD.encode(hasher.finalize())
}

/// Hash a password under a new random salt
///
/// # Examples
///
/// ```
/// use legalis::auth::password::{hash_password, verify_password};
///
/// let hashed = hash_password("hunter2");
/// assert!(verify_password("hunter2", &hashed.salt, &hashed.hash));
/// assert!(!verify_password("hunter3", &hashed.salt, &hashed.hash));
/// ```
pub fn hash_password(password: &str) -> HashedPassword {
    let salt = generate_salt();
    let hash = digest(&salt, password);
    HashedPassword { salt, hash }
}

/// Check a password against a stored salt and hash
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    constant_time_eq(digest(salt, password).as_bytes(), expected_hash.as_bytes())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
