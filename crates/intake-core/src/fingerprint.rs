//! Content fingerprinting
//!
//! A fingerprint is the lowercase hex SHA-256 digest of a byte sequence. It is
//! half of the idempotency key, so the encoding must stay fixed-length and
//! case-stable.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

use crate::constants::FINGERPRINT_HEX_LEN;

/// Hex-encoded SHA-256 digest of uploaded content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Digest `content`. Total over all inputs, including the empty slice.
    pub fn of(content: &[u8]) -> Self {
        Fingerprint(hex::encode(Sha256::digest(content)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Compute the fingerprint of `content`.
pub fn fingerprint(content: &[u8]) -> Fingerprint {
    Fingerprint::of(content)
}

/// Error returned when a string is not a well-formed fingerprint.
#[derive(Debug, thiserror::Error)]
#[error("invalid fingerprint: expected 64 lowercase hex characters")]
pub struct InvalidFingerprint;

impl FromStr for Fingerprint {
    type Err = InvalidFingerprint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == FINGERPRINT_HEX_LEN
            && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if well_formed {
            Ok(Fingerprint(s.to_string()))
        } else {
            Err(InvalidFingerprint)
        }
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = InvalidFingerprint;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Fingerprint> for String {
    fn from(fp: Fingerprint) -> Self {
        fp.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}
