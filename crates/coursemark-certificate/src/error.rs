//! Error types for `coursemark-certificate`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] coursemark_core::Error),

  #[error("eligibility proof was issued for a different learner or course")]
  ProofMismatch,

  #[error("invalid date format {0:?}")]
  DateFormat(String),

  #[error("certificate generation failed, try again: {0}")]
  Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
