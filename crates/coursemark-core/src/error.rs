//! Error types for `coursemark-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("video index {index} is out of range for a course with {video_count} videos")]
  InvalidIndex { index: usize, video_count: usize },

  #[error("certificate locked: {completed} of {video_count} videos completed")]
  NotEligible { completed: usize, video_count: usize },

  #[error("invalid course draft: {0}")]
  InvalidDraft(String),

  #[error("draft has no video at index {0}")]
  VideoNotFound(usize),

  #[error("no pending confirmation for token {0}")]
  UnknownConfirmation(Uuid),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
