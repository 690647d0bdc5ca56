//! Per-learner session context.
//!
//! A [`Session`] is opened for one learner and carries everything that used
//! to live in ambient client-side storage: the learner profile, display
//! preferences and a progress cache. It is passed explicitly to the progress
//! service and the certificate engine and torn down with [`Session::close`].

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::progress::ProgressRecord;

/// Display name used when a learner has not set one.
pub const DEFAULT_LEARNER_NAME: &str = "Student";

// ─── Learner ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Learner {
  pub learner_id: Uuid,
  pub name:       String,
  pub avatar_url: Option<String>,
}

impl Learner {
  pub fn new(learner_id: Uuid, name: impl Into<String>) -> Self {
    Self { learner_id, name: name.into(), avatar_url: None }
  }

  /// The name printed on certificates; falls back to
  /// [`DEFAULT_LEARNER_NAME`] when blank.
  pub fn display_name(&self) -> &str {
    let trimmed = self.name.trim();
    if trimmed.is_empty() { DEFAULT_LEARNER_NAME } else { trimmed }
  }
}

// ─── Preferences ─────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
  #[default]
  Light,
  Dark,
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// Cached progress for one course plus the completed indices the store has
/// not acknowledged yet, in the order they were staged.
#[derive(Debug, Clone)]
struct CachedProgress {
  record:   ProgressRecord,
  unsynced: Vec<usize>,
}

/// What is left behind when a session closes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTeardown {
  /// Courses with at least one completion the store never acknowledged.
  /// Callers re-sync these on the next load.
  pub unsynced_courses: BTreeSet<Uuid>,
}

/// Explicit context for one learner's session.
#[derive(Debug)]
pub struct Session {
  learner:  Learner,
  theme:    Theme,
  progress: HashMap<Uuid, CachedProgress>,
}

impl Session {
  pub fn open(learner: Learner) -> Self {
    Self { learner, theme: Theme::default(), progress: HashMap::new() }
  }

  pub fn learner(&self) -> &Learner { &self.learner }

  pub fn learner_id(&self) -> Uuid { self.learner.learner_id }

  pub fn theme(&self) -> Theme { self.theme }

  pub fn set_theme(&mut self, theme: Theme) { self.theme = theme; }

  pub fn set_avatar(&mut self, url: Option<String>) { self.learner.avatar_url = url; }

  /// Cached record for `course_id`, if one has been loaded or created.
  pub fn progress(&self, course_id: Uuid) -> Option<&ProgressRecord> {
    self.progress.get(&course_id).map(|c| &c.record)
  }

  /// Cached record for `course_id`, or a fresh zero-progress record.
  pub fn progress_or_default(&self, course_id: Uuid) -> ProgressRecord {
    self
      .progress(course_id)
      .cloned()
      .unwrap_or_else(|| ProgressRecord::new(self.learner.learner_id, course_id))
  }

  /// Replace the cache entry with state read from the store.
  ///
  /// Unacknowledged completions survive: they are merged into the stored
  /// record and the cached cursor is kept until the store has them.
  pub fn sync(&mut self, record: ProgressRecord) {
    let course_id = record.course_id;
    let unsynced = self
      .progress
      .remove(&course_id)
      .map(|c| (c.unsynced, c.record.cursor))
      .filter(|(unsynced, _)| !unsynced.is_empty());

    let cached = match unsynced {
      None => CachedProgress { record, unsynced: Vec::new() },
      Some((unsynced, cursor)) => {
        let completed = record.completed().iter().chain(&unsynced).copied().collect::<Vec<_>>();
        let unsynced = unsynced.into_iter().filter(|i| !record.is_completed(*i)).collect();
        let merged = ProgressRecord::from_parts(record.learner_id, course_id, completed, cursor);
        CachedProgress { record: merged, unsynced }
      }
    };
    self.progress.insert(course_id, cached);
  }

  /// Apply an optimistic update that completed `index`. The index stays
  /// unsynced until [`Session::acknowledge`] is called for it.
  pub fn stage(&mut self, record: ProgressRecord, index: usize) {
    let cached = self
      .progress
      .entry(record.course_id)
      .or_insert_with(|| CachedProgress { record: record.clone(), unsynced: Vec::new() });
    cached.record = record;
    if !cached.unsynced.contains(&index) {
      cached.unsynced.push(index);
    }
  }

  /// Record that the store has persisted completion of `index`.
  pub fn acknowledge(&mut self, course_id: Uuid, index: usize) {
    if let Some(cached) = self.progress.get_mut(&course_id) {
      cached.unsynced.retain(|i| *i != index);
    }
  }

  /// Completed indices not yet acknowledged by the store, oldest first.
  pub fn unsynced(&self, course_id: Uuid) -> &[usize] {
    self.progress.get(&course_id).map_or(&[][..], |c| c.unsynced.as_slice())
  }

  pub fn is_pending(&self, course_id: Uuid) -> bool { !self.unsynced(course_id).is_empty() }

  /// Every cached record, in no particular order.
  pub fn records(&self) -> impl Iterator<Item = &ProgressRecord> {
    self.progress.values().map(|c| &c.record)
  }

  /// End the session, dropping all cached state.
  pub fn close(self) -> SessionTeardown {
    let unsynced_courses = self
      .progress
      .into_iter()
      .filter(|(_, c)| !c.unsynced.is_empty())
      .map(|(id, _)| id)
      .collect();
    SessionTeardown { unsynced_courses }
  }
}
