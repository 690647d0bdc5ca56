//! Certificate identifiers.
//!
//! An id is a SHA-256 digest over the learner UUID and the issue timestamp
//! in milliseconds, truncated to 64 bits. The same learner and timestamp
//! always give the same id; callers that need a fixed id can inject one.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateId(String);

impl CertificateId {
  /// Derive an id from `(learner_id, issued_at)`.
  pub fn derive(learner_id: Uuid, issued_at: DateTime<Utc>) -> Self {
    let mut hasher = Sha256::new();
    hasher.update(learner_id.as_bytes());
    hasher.update(issued_at.timestamp_millis().to_be_bytes());
    let hash = hasher.finalize();
    Self(format!("CM-{}", hex::encode_upper(&hash[..8])))
  }

  /// Use a caller-chosen id verbatim.
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for CertificateId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
