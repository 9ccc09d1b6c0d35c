use async_trait::async_trait;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::domain::auth::errors::HashError;
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// PBKDF2 password hasher producing the `hex(salt):hex(digest)` stored form.
///
/// Parameters:
/// - Salt: 16 random bytes per call from the OS RNG
/// - Derivation: PBKDF2-HMAC-SHA512, 1000 iterations
/// - Output length: 64 bytes
///
/// The derivation is CPU-bound, so both operations run on the blocking
/// thread pool instead of stalling the async workers.
#[derive(Debug, Clone, Default)]
pub struct Pbkdf2PasswordHasher;

const SALT_LEN: usize = 16;
const ITERATIONS: u32 = 1000;
const OUTPUT_LEN: usize = 64;

impl Pbkdf2PasswordHasher {
  /// Creates a new hasher with the fixed derivation parameters
  pub fn new() -> Self {
    Self
  }
}

fn derive(plaintext: &[u8], salt: &[u8]) -> [u8; OUTPUT_LEN] {
  let mut digest = [0u8; OUTPUT_LEN];
  pbkdf2_hmac::<Sha512>(plaintext, salt, ITERATIONS, &mut digest);
  digest
}

/// Compares two digests without an early exit on the first mismatch
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
  if a.len() != b.len() {
    return false;
  }
  a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[async_trait]
impl PasswordHasher for Pbkdf2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError> {
    let plaintext = Zeroizing::new(password.as_str().to_owned());

    let stored = tokio::task::spawn_blocking(move || {
      let mut salt = [0u8; SALT_LEN];
      OsRng.fill_bytes(&mut salt);

      let digest = derive(plaintext.as_bytes(), &salt);
      format!("{}:{}", hex::encode(salt), hex::encode(digest))
    })
    .await
    .map_err(|e| HashError::HashingFailed(e.to_string()))?;

    PasswordHash::from_hash(stored).map_err(|_| HashError::InvalidFormat)
  }

  async fn verify(&self, password: &Password, stored: &PasswordHash) -> Result<bool, HashError> {
    let (salt_hex, digest_hex) = stored.parts();

    let salt = hex::decode(salt_hex).map_err(|_| HashError::InvalidFormat)?;
    let expected = hex::decode(digest_hex).map_err(|_| HashError::InvalidFormat)?;

    let plaintext = Zeroizing::new(password.as_str().to_owned());

    let matches = tokio::task::spawn_blocking(move || {
      let digest = derive(plaintext.as_bytes(), &salt);
      constant_time_eq(&digest, &expected)
    })
    .await
    .map_err(|e| HashError::VerificationFailed(e.to_string()))?;

    Ok(matches)
  }
}
