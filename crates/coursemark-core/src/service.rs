//! Progress service: tracker + session + store.
//!
//! The session is updated first and the store second. A store failure never
//! fails the learner's action; the optimistic state stands, a warning is
//! logged, and the outcome says the write is still pending.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
  Error, Result,
  course::Course,
  progress::{ProgressRecord, ProgressTracker, ProgressUpdate, ResumeCursor},
  session::Session,
  store::ProgressStore,
};

/// Result of a successful [`ProgressService::mark_completed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOutcome {
  pub record:    ProgressRecord,
  /// `false` when the index was already completed.
  pub changed:   bool,
  /// `false` when the store rejected the write; the session still holds the
  /// new state.
  pub persisted: bool,
  /// Whole-number completion after the mark.
  pub percent:   u8,
  /// Whether the certificate unlocked with this mark.
  pub unlocked:  bool,
}

pub struct ProgressService<S> {
  store: S,
}

impl<S: ProgressStore> ProgressService<S> {
  pub fn new(store: S) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Re-sync `session` with the store for `course`. A missing record becomes
  /// zero progress. Completions the store has not acknowledged are kept, so
  /// the returned record is the session's merged view.
  pub async fn load(&self, session: &mut Session, course: &Course) -> Result<ProgressRecord> {
    let learner_id = session.learner_id();
    let record = self
      .store
      .get(learner_id, course.course_id)
      .await
      .map_err(|e| Error::Store(Box::new(e)))?
      .unwrap_or_else(|| ProgressRecord::new(learner_id, course.course_id));

    session.sync(record);
    Ok(session.progress_or_default(course.course_id))
  }

  /// Load every stored record for the session's learner into the cache.
  pub async fn load_all(&self, session: &mut Session) -> Result<Vec<ProgressRecord>> {
    let records = self
      .store
      .list(session.learner_id())
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;
    Ok(
      records
        .into_iter()
        .map(|record| {
          let course_id = record.course_id;
          session.sync(record);
          session.progress_or_default(course_id)
        })
        .collect(),
    )
  }

  /// Mark video `index` of `course` as watched.
  pub async fn mark_completed(
    &self,
    session: &mut Session,
    course: &Course,
    index: usize,
  ) -> Result<MarkOutcome> {
    let tracker = ProgressTracker::for_course(course);
    let current = session.progress_or_default(course.course_id);
    let was_complete = tracker.is_fully_completed(&current);

    let record = match tracker.mark_completed(&current, index) {
      Ok(r) => r,
      Err(e) => {
        warn!(
          course_id = %course.course_id,
          index,
          video_count = tracker.video_count(),
          "rejected completion: {e}"
        );
        return Err(e);
      }
    };

    let percent = tracker.rounded_percentage(&record);
    let unlocked = !was_complete && tracker.is_fully_completed(&record);

    let changed = record != current;
    if !changed && !session.is_pending(course.course_id) {
      debug!(course_id = %course.course_id, index, "video already completed");
      return Ok(MarkOutcome { record, changed, persisted: true, percent, unlocked });
    }

    if changed {
      session.stage(record.clone(), index);
    }
    let persisted = self.flush(session, course.course_id, record.cursor).await;

    Ok(MarkOutcome { record, changed, persisted, percent, unlocked })
  }

  /// Write every unacknowledged completion for `course_id`, oldest first,
  /// each carrying the current `cursor`. Stops at the first failure; the
  /// rest stay staged for the next attempt. Returns whether nothing is left
  /// pending.
  async fn flush(&self, session: &mut Session, course_id: Uuid, cursor: ResumeCursor) -> bool {
    let learner_id = session.learner_id();
    for video_index in session.unsynced(course_id).to_vec() {
      let update = ProgressUpdate { video_index, cursor };
      match self.store.put(learner_id, course_id, update).await {
        Ok(()) => session.acknowledge(course_id, video_index),
        Err(e) => {
          warn!(
            %learner_id,
            %course_id,
            video_index,
            pending = session.unsynced(course_id).len(),
            "progress not persisted, keeping local state: {e}"
          );
          return false;
        }
      }
    }
    true
  }
}
