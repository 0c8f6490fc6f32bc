//! Admin session gate
//!
//! Commands that change sets require the admin password. The password is
//! never stored: the config keeps its SHA-256 digest and attempts are
//! compared digest-to-digest in constant time.
//!
//! A session is a plain value created by a successful login and dropped at
//! the end of the command it guards.

use crate::error::{Result, VocabError};
use sha2::{Digest, Sha256};
use std::time::Instant;
use tracing::debug;

/// Digest of the configured admin password.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential {
    digest: [u8; 32],
}

impl AdminCredential {
    pub fn from_password(password: &str) -> Self {
        Self {
            digest: sha256(password),
        }
    }

    /// Parses a hex SHA-256 digest as stored in the config file.
    pub fn from_hex(value: &str) -> Result<Self> {
        let bytes = hex::decode(value.trim())
            .map_err(|e| VocabError::Config(format!("admin_password_sha256 형식 오류: {}", e)))?;
        let digest: [u8; 32] = bytes.try_into().map_err(|_| {
            VocabError::Config("admin_password_sha256 는 64자리 hex 여야 합니다".into())
        })?;
        Ok(Self { digest })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.digest)
    }

    pub fn verify(&self, attempt: &str) -> bool {
        constant_time_eq(&self.digest, &sha256(attempt))
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminCredential(..)")
    }
}

/// Proof that the admin password was supplied for the current command.
#[derive(Debug)]
pub struct AdminSession {
    started: Instant,
}

impl AdminSession {
    pub fn login(credential: &AdminCredential, attempt: &str) -> Result<Self> {
        if !credential.verify(attempt) {
            return Err(VocabError::Unauthorized);
        }
        debug!("admin session opened");
        Ok(Self {
            started: Instant::now(),
        })
    }
}

impl Drop for AdminSession {
    fn drop(&mut self) {
        debug!(elapsed_ms = self.started.elapsed().as_millis() as u64, "admin session closed");
    }
}

fn sha256(input: &str) -> [u8; 32] {
    Sha256::digest(input.as_bytes()).into()
}

fn constant_time_eq(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_with_correct_password() {
        let credential = AdminCredential::from_password("thaivocas");
        assert!(AdminSession::login(&credential, "thaivocas").is_ok());
    }

    #[test]
    fn test_login_with_wrong_password() {
        let credential = AdminCredential::from_password("thaivocas");
        for attempt in ["", "thaivoca", "thaivocas ", "THAIVOCAS"] {
            let result = AdminSession::login(&credential, attempt);
            assert!(matches!(result, Err(VocabError::Unauthorized)), "{:?}", attempt);
        }
    }

    #[test]
    fn test_hex_round_trip() {
        let credential = AdminCredential::from_password("secret");
        let hex = credential.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(AdminCredential::from_hex(&hex).unwrap(), credential);
    }

    #[test]
    fn test_known_digest() {
        let credential = AdminCredential::from_password("abc");
        assert_eq!(
            credential.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(matches!(AdminCredential::from_hex("zz"), Err(VocabError::Config(_))));
        assert!(matches!(AdminCredential::from_hex("abcd"), Err(VocabError::Config(_))));
    }

    #[test]
    fn test_debug_hides_digest() {
        let credential = AdminCredential::from_password("secret");
        assert_eq!(format!("{:?}", credential), "AdminCredential(..)");
    }

    #[test]
    fn test_constant_time_eq() {
        let a = sha256("a");
        let b = sha256("b");
        assert!(constant_time_eq(&a, &a));
        assert!(!constant_time_eq(&a, &b));
    }
}
