use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};

use crate::core::{AppError, Result};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Hash a password into a PHC string using Argon2
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored PHC string
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Check the password policy, collecting every rule the password breaks
pub fn validate_password(password: &str) -> Result<()> {
    let mut problems = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        problems.push(format!(
            "Passwords must be at least {} characters.",
            MIN_PASSWORD_LENGTH
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        problems.push("Passwords must have at least one digit ('0'-'9').".to_string());
    }
    if !password.chars().any(char::is_lowercase) {
        problems.push("Passwords must have at least one lowercase ('a'-'z').".to_string());
    }
    if !password.chars().any(char::is_uppercase) {
        problems.push("Passwords must have at least one uppercase ('A'-'Z').".to_string());
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(problems.join(" ")))
    }
}
