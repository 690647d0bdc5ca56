//! Certificate layout for completed courses.
//!
//! [`LayoutEngine`] checks eligibility and produces a [`CertificateDocument`]:
//! wrapped, positioned text blocks on a fixed canvas. A
//! [`DocumentRenderer`] turns that document into a file.

pub mod document;
pub mod error;
pub mod id;
pub mod layout;
pub mod metrics;
pub mod render;
pub mod wrap;

pub use self::{
  document::CertificateDocument,
  error::{Error, Result},
  id::CertificateId,
  layout::{IssueContext, Issuer, LayoutConfig, LayoutEngine},
  render::{DocumentRenderer, JsonRenderer, RenderedCertificate, render_certificate},
};
