//! Turning a laid-out document into bytes.
//!
//! The layout engine never draws. A renderer takes the finished
//! [`CertificateDocument`] and produces a file body; failures surface to the
//! caller as [`Error::Render`] so they can be retried.

use bytes::Bytes;
use tracing::{debug, error};

use crate::{Error, Result, document::CertificateDocument};

/// Produces a file body from a certificate document.
pub trait DocumentRenderer {
  type Error: std::error::Error + Send + Sync + 'static;

  fn render(&self, document: &CertificateDocument) -> Result<Bytes, Self::Error>;

  /// File extension without the dot.
  fn extension(&self) -> &'static str;

  fn media_type(&self) -> &'static str;
}

/// Writes the document description itself as JSON, for renderers that live
/// outside this process.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer {
  pub pretty: bool,
}

impl JsonRenderer {
  pub fn pretty() -> Self { Self { pretty: true } }
}

impl DocumentRenderer for JsonRenderer {
  type Error = serde_json::Error;

  fn render(&self, document: &CertificateDocument) -> Result<Bytes, Self::Error> {
    let body = if self.pretty {
      serde_json::to_vec_pretty(document)?
    } else {
      serde_json::to_vec(document)?
    };
    Ok(Bytes::from(body))
  }

  fn extension(&self) -> &'static str { "json" }

  fn media_type(&self) -> &'static str { "application/json" }
}

/// A rendered certificate and the file name it should be saved under.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCertificate {
  pub file_name:  String,
  pub media_type: &'static str,
  pub body:       Bytes,
}

/// Render `document`, naming the output `<file_name>.<extension>`.
pub fn render_certificate<R: DocumentRenderer>(
  renderer: &R,
  document: &CertificateDocument,
) -> Result<RenderedCertificate> {
  let body = renderer.render(document).map_err(|e| {
    error!(certificate_id = %document.certificate_id, "render failed: {e}");
    Error::Render(Box::new(e))
  })?;
  debug!(
    certificate_id = %document.certificate_id,
    bytes = body.len(),
    "certificate rendered"
  );
  Ok(RenderedCertificate {
    file_name: format!("{}.{}", document.file_name, renderer.extension()),
    media_type: renderer.media_type(),
    body,
  })
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use coursemark_core::{
    course::{Course, Video},
    eligibility::EligibilityGate,
    progress::{ProgressRecord, ProgressTracker},
    session::Learner,
  };
  use uuid::Uuid;

  use super::*;
  use crate::layout::{IssueContext, LayoutEngine};

  fn document() -> CertificateDocument {
    let course = Course::new(Uuid::new_v4(), "Rust Basics", "Ferris", vec![Video::new(
      "Intro", "intro.mp4",
    )]);
    let learner = Learner::new(Uuid::new_v4(), "Ada");
    let record = ProgressTracker::for_course(&course)
      .mark_completed(&ProgressRecord::new(learner.learner_id, course.course_id), 0)
      .unwrap();
    let proof = EligibilityGate::check(&course, &record).unwrap();
    let ctx = IssueContext::at(Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap());
    LayoutEngine::default().layout(&proof, &course, &learner, &ctx).unwrap()
  }

  #[derive(Debug, thiserror::Error)]
  #[error("disk full")]
  struct DiskFull;

  struct Failing;

  impl DocumentRenderer for Failing {
    type Error = DiskFull;

    fn render(&self, _: &CertificateDocument) -> Result<Bytes, DiskFull> { Err(DiskFull) }

    fn extension(&self) -> &'static str { "pdf" }

    fn media_type(&self) -> &'static str { "application/pdf" }
  }

  #[test]
  fn json_output_parses_back() {
    let doc = document();
    let rendered = render_certificate(&JsonRenderer::pretty(), &doc).unwrap();

    assert_eq!(rendered.file_name, "Rust Basics-Certificate.json");
    assert_eq!(rendered.media_type, "application/json");
    let parsed: serde_json::Value = serde_json::from_slice(&rendered.body).unwrap();
    assert_eq!(parsed["certificate_id"], doc.certificate_id.as_str());
    assert_eq!(parsed["blocks"].as_array().unwrap().len(), doc.blocks.len());
    assert_eq!(parsed["blocks"][0]["role"], "title");
    assert_eq!(parsed["blocks"][0]["lines"][0]["text"], "Certificate of Completion");
  }

  #[test]
  fn failures_are_retryable_render_errors() {
    let err = render_certificate(&Failing, &document()).unwrap_err();
    assert!(matches!(err, Error::Render(_)));
    assert_eq!(err.to_string(), "certificate generation failed, try again: disk full");
  }
}
