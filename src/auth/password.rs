//! Salted bcrypt hashing.
//!
//! A salt is stored as a bcrypt setting string (`$2b$<cost>$<22 chars>`), so the cost a
//! hash was produced with travels with the user row. Hashing the same password with the
//! same salt always yields the same string, which is what `User::validate_password`
//! relies on.

use base64::{alphabet, engine, Engine};
use bcrypt::{BcryptError, Version};
use rand::RngCore;

const SALT_PREFIX: &str = "$2b$";
const SALT_BYTES: usize = 16;
const ENCODED_SALT_LEN: usize = 22;
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

const BCRYPT_B64: engine::GeneralPurpose =
    engine::GeneralPurpose::new(&alphabet::BCRYPT, engine::general_purpose::NO_PAD);

/// Hashing seam used by the user repository and the user entity.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Produces a fresh random salt.
    fn generate_salt(&self) -> Result<String, BcryptError>;

    /// Hashes `password` with `salt`. Deterministic for a given pair.
    fn hash(&self, password: &str, salt: &str) -> Result<String, BcryptError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordHasher for BcryptHasher {
    fn generate_salt(&self) -> Result<String, BcryptError> {
        if !(MIN_COST..=MAX_COST).contains(&self.cost) {
            return Err(BcryptError::CostNotAllowed(self.cost));
        }
        let mut raw = [0u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut raw);
        Ok(format!(
            "{}{:02}${}",
            SALT_PREFIX,
            self.cost,
            BCRYPT_B64.encode(raw)
        ))
    }

    fn hash(&self, password: &str, salt: &str) -> Result<String, BcryptError> {
        let (cost, raw) = parse_salt(salt)?;
        let parts = bcrypt::hash_with_salt(password, cost, raw)?;
        Ok(parts.format_for_version(Version::TwoB))
    }
}

fn parse_salt(salt: &str) -> Result<(u32, [u8; SALT_BYTES]), BcryptError> {
    let invalid = || BcryptError::InvalidHash(salt.to_string());

    let rest = salt.strip_prefix(SALT_PREFIX).ok_or_else(invalid)?;
    let (cost, encoded) = rest.split_once('$').ok_or_else(invalid)?;
    let cost: u32 = cost.parse().map_err(|_| invalid())?;
    if encoded.len() != ENCODED_SALT_LEN {
        return Err(invalid());
    }

    let decoded = BCRYPT_B64.decode(encoded).map_err(|_| invalid())?;
    let raw: [u8; SALT_BYTES] = decoded.try_into().map_err(|_| invalid())?;
    Ok((cost, raw))
}
