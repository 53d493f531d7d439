use bcrypt::{hash, verify, DEFAULT_COST};

/// bcrypt only reads the first 72 bytes of its input.
const MAX_PASSWORD_BYTES: usize = 72;

#[derive(Debug, thiserror::Error)]
pub enum HashingError {
    #[error("password is longer than 72 bytes")]
    TooLong,
    #[error("failed to hash password: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Hashes a password with bcrypt at the default cost (12) and a fresh salt.
///
/// Passwords over 72 bytes are rejected rather than silently truncated.
pub fn hash_password(password: &str) -> Result<String, HashingError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(HashingError::TooLong);
    }
    Ok(hash(password, DEFAULT_COST)?)
}

/// Checks `candidate` against a stored bcrypt hash.
///
/// Returns `false` on mismatch and also when the stored hash cannot be parsed.
pub fn verify_password(hashed_password: &str, candidate: &str) -> bool {
    match verify(candidate, hashed_password) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("stored password hash could not be verified: {}", e);
            false
        }
    }
}
