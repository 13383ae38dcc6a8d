//! Argon2id password hashing for stored user credentials.
//!
//! Hashes are PHC strings (`$argon2id$v=19$...`), so the parameters travel
//! with the hash and [`needs_rehash`] can spot hashes made with older settings.

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::error::{AuthResult, AuthenticationError, ServiceError, ServiceResult};

/// Longer passwords are refused before hashing.
pub const MAX_PASSWORD_LENGTH: usize = 4096;

fn check_length(password: &str) -> AuthResult<()> {
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthenticationError::BadCredentials("Invalid password.".to_string()));
    }
    Ok(())
}

/// ## Summary
/// Hashes a password with Argon2id and a random salt.
///
/// ## Errors
/// Returns `BadCredentials` for passwords over [`MAX_PASSWORD_LENGTH`], or
/// `InvalidConfiguration` if the hasher fails.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    check_length(password)?;

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::InvalidConfiguration(format!("Failed to hash password: {e}")))
}

/// ## Summary
/// Checks a presented password against a stored hash.
///
/// ## Errors
/// Returns `BadCredentials` if the password does not match, is too long, or
/// the stored hash is not a valid PHC string.
pub fn verify_password(password: &str, password_hash: &str) -> AuthResult<()> {
    check_length(password)?;

    let parsed = PasswordHash::new(password_hash).map_err(|e| {
        tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
        AuthenticationError::BadCredentials("The stored password hash is invalid.".to_string())
    })?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|e| {
            tracing::trace!(error = %e, "Password verification failed");
            AuthenticationError::BadCredentials("The presented password is invalid.".to_string())
        })
}

/// Whether `password_hash` was produced with another algorithm or with
/// parameters other than the current defaults. Unparseable hashes need one too.
#[must_use]
pub fn needs_rehash(password_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(password_hash) else {
        return true;
    };
    if parsed.algorithm != Algorithm::Argon2id.ident() {
        return true;
    }
    let current = Params::default();
    !Params::try_from(&parsed).is_ok_and(|params| {
        params.m_cost() == current.m_cost()
            && params.t_cost() == current.t_cost()
            && params.p_cost() == current.p_cost()
    })
}
