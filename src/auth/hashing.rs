//! bcrypt password hashing.

use crate::errors::{CaregateError, Result};

/// Work factor used when none is configured (2^12 rounds).
pub const DEFAULT_COST: u32 = 12;

pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// bcrypt only consumes the first 72 bytes of its input.
pub const MAX_SECRET_BYTES: usize = 72;

/// Salted, adaptive password hasher with a fixed work factor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(CaregateError::validation_field(
                format!("bcrypt cost must be between {} and {}", MIN_COST, MAX_COST),
                "bcrypt_cost",
            ));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext secret. Every call uses a fresh salt.
    pub fn hash(&self, secret: &str) -> Result<String> {
        validate_secret(secret)?;
        Ok(bcrypt::hash(secret, self.cost)?)
    }

    /// Check a plaintext secret against a stored hash.
    ///
    /// An unparseable hash is an error rather than a mismatch.
    pub fn verify(&self, secret: &str, hash: &str) -> Result<bool> {
        if secret.is_empty() || secret.len() > MAX_SECRET_BYTES {
            return Ok(false);
        }
        Ok(bcrypt::verify(secret, hash)?)
    }
}

fn validate_secret(secret: &str) -> Result<()> {
    if secret.is_empty() {
        return Err(CaregateError::validation_field("Password cannot be empty", "password"));
    }
    if secret.len() > MAX_SECRET_BYTES {
        return Err(CaregateError::validation_field(
            format!("Password cannot exceed {} bytes", MAX_SECRET_BYTES),
            "password",
        ));
    }
    Ok(())
}
