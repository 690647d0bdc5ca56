//! The `ProgressStore` trait.
//!
//! Implemented by storage backends (e.g. `coursemark-store-sqlite`). The
//! progress service depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::progress::{ProgressRecord, ProgressUpdate};

/// Durable per-(learner, course) progress.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait ProgressStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the record for a pair. `None` means nothing has been completed
  /// yet; callers treat it as zero progress.
  fn get(
    &self,
    learner_id: Uuid,
    course_id: Uuid,
  ) -> impl Future<Output = Result<Option<ProgressRecord>, Self::Error>> + Send + '_;

  /// Persist one completion and the cursor computed alongside it. Creates the
  /// record if absent. Re-putting a completed index must not duplicate it.
  fn put(
    &self,
    learner_id: Uuid,
    course_id: Uuid,
    update: ProgressUpdate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every record held for a learner, for dashboard views.
  fn list(
    &self,
    learner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ProgressRecord>, Self::Error>> + Send + '_;
}
