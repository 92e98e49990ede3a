use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;

// Token layout: version (1) || issue time secs BE (8) || nonce (12) || AES-GCM
// ciphertext+tag. The header is bound as associated data, then the whole token
// is base64url (no padding) for storage as TEXT.
const TOKEN_VERSION: u8 = 1;
const NONCE_SIZE: usize = 12;
const TAG_SIZE: usize = 16;
const HEADER_SIZE: usize = 1 + 8 + NONCE_SIZE;

#[derive(Debug, Error)]
pub enum CipherError {
    #[error("encryption failed")]
    EncryptionFailed,

    #[error("token is not valid base64url")]
    InvalidEncoding,

    #[error("token is truncated or malformed")]
    InvalidFormat,

    #[error("unsupported token version: {0}")]
    UnsupportedVersion(u8),

    #[error("decryption failed (wrong key or tampered token)")]
    DecryptionFailed,

    #[error("decrypted payload is not valid UTF-8")]
    InvalidPlaintext,
}

// Stateless sealing of ballot plaintext. Built once at startup from the
// configured secret and passed to the handlers that need it.
#[derive(Clone)]
pub struct BallotCipher {
    cipher: Aes256Gcm,
}

impl BallotCipher {
    // The secret's UTF-8 bytes are hashed into the fixed-size AES-256 key,
    // so any non-empty string configured at startup is usable
    pub fn new(secret: &str) -> Self {
        let digest = Sha256::digest(secret.as_bytes());
        let mut key = [0u8; 32];
        key.copy_from_slice(&digest);
        Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&key)),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);

        let issued_at = Utc::now().timestamp().max(0) as u64;

        let mut header = Vec::with_capacity(HEADER_SIZE);
        header.push(TOKEN_VERSION);
        header.extend_from_slice(&issued_at.to_be_bytes());
        header.extend_from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                Payload {
                    msg: plaintext.as_bytes(),
                    aad: &header,
                },
            )
            .map_err(|_| CipherError::EncryptionFailed)?;

        let mut token = header;
        token.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(token))
    }

    pub fn decrypt(&self, token: &str) -> Result<String, CipherError> {
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CipherError::InvalidEncoding)?;

        if raw.len() < HEADER_SIZE + TAG_SIZE {
            return Err(CipherError::InvalidFormat);
        }
        if raw[0] != TOKEN_VERSION {
            return Err(CipherError::UnsupportedVersion(raw[0]));
        }

        let (header, ciphertext) = raw.split_at(HEADER_SIZE);
        let nonce = Nonce::from_slice(&header[1 + 8..]);

        let plaintext = self
            .cipher
            .decrypt(
                nonce,
                Payload {
                    msg: ciphertext,
                    aad: header,
                },
            )
            .map_err(|_| CipherError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| CipherError::InvalidPlaintext)
    }
}
