//! Per-(learner, course) progress and the tracker state machine.
//!
//! A [`ProgressRecord`] is a value: [`ProgressTracker::mark_completed`]
//! returns a new record instead of mutating in place, so callers can hold the
//! previous state until persistence has been acknowledged.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, course::Course};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Where playback should continue.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum ResumeCursor {
  /// No video has been completed yet.
  #[default]
  NotStarted,
  /// Continue at this video index.
  AtIndex(usize),
  /// The playlist is exhausted.
  Finished,
}

impl ResumeCursor {
  pub fn index(self) -> Option<usize> {
    match self {
      Self::AtIndex(i) => Some(i),
      Self::NotStarted | Self::Finished => None,
    }
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// Progress for one learner in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
  pub learner_id: Uuid,
  pub course_id:  Uuid,
  /// Completed video indices in the order they were first completed. Never
  /// contains duplicates.
  completed:      Vec<usize>,
  pub cursor:     ResumeCursor,
}

impl ProgressRecord {
  /// A fresh record with nothing watched.
  pub fn new(learner_id: Uuid, course_id: Uuid) -> Self {
    Self {
      learner_id,
      course_id,
      completed: Vec::new(),
      cursor: ResumeCursor::NotStarted,
    }
  }

  /// Rebuild a record from persisted parts. Duplicate indices are dropped,
  /// keeping first-encounter order.
  pub fn from_parts(
    learner_id: Uuid,
    course_id: Uuid,
    completed: impl IntoIterator<Item = usize>,
    cursor: ResumeCursor,
  ) -> Self {
    let mut record = Self::new(learner_id, course_id);
    for index in completed {
      if !record.completed.contains(&index) {
        record.completed.push(index);
      }
    }
    record.cursor = cursor;
    record
  }

  pub fn completed(&self) -> &[usize] { &self.completed }

  pub fn completed_count(&self) -> usize { self.completed.len() }

  pub fn is_completed(&self, index: usize) -> bool {
    self.completed.contains(&index)
  }
}

/// The write a tracker hands to a [`crate::store::ProgressStore`] after a
/// successful mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressUpdate {
  pub video_index: usize,
  pub cursor:      ResumeCursor,
}

// ─── Tracker ─────────────────────────────────────────────────────────────────

/// Progress arithmetic for a course with a fixed number of videos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
  video_count: usize,
}

impl ProgressTracker {
  pub fn new(video_count: usize) -> Self { Self { video_count } }

  pub fn for_course(course: &Course) -> Self { Self::new(course.video_count()) }

  pub fn video_count(&self) -> usize { self.video_count }

  /// Mark `index` as watched and advance the cursor.
  ///
  /// Re-marking a completed index returns the record unchanged. An index
  /// outside `0..video_count` fails with [`Error::InvalidIndex`].
  pub fn mark_completed(
    &self,
    record: &ProgressRecord,
    index: usize,
  ) -> Result<ProgressRecord> {
    if index >= self.video_count {
      return Err(Error::InvalidIndex { index, video_count: self.video_count });
    }
    if record.is_completed(index) {
      return Ok(record.clone());
    }

    let mut next = record.clone();
    next.completed.push(index);
    next.cursor = if self.is_fully_completed(&next) || index + 1 >= self.video_count {
      ResumeCursor::Finished
    } else {
      ResumeCursor::AtIndex(index + 1)
    };
    Ok(next)
  }

  /// The video a learner should continue from, or `None` once everything is
  /// watched.
  pub fn resume_index(&self, record: &ProgressRecord) -> Option<usize> {
    if let ResumeCursor::AtIndex(i) = record.cursor
      && i < self.video_count
    {
      return Some(i);
    }
    self.first_incomplete(record)
  }

  /// The lowest index not yet completed.
  pub fn first_incomplete(&self, record: &ProgressRecord) -> Option<usize> {
    (0..self.video_count).find(|i| !record.is_completed(*i))
  }

  /// `100 × completed / videos`; a course without videos is at 0%.
  pub fn completion_percentage(&self, record: &ProgressRecord) -> f64 {
    if self.video_count == 0 {
      return 0.0;
    }
    let done = self.counted(record) as f64;
    100.0 * done / self.video_count as f64
  }

  /// Whole-number percentage for display; halves round up.
  pub fn rounded_percentage(&self, record: &ProgressRecord) -> u8 {
    if self.video_count == 0 {
      return 0;
    }
    let done = self.counted(record);
    ((200 * done + self.video_count) / (2 * self.video_count)) as u8
  }

  pub fn is_fully_completed(&self, record: &ProgressRecord) -> bool {
    self.video_count > 0 && self.counted(record) == self.video_count
  }

  /// Completed indices that fall inside the course. Persisted records may
  /// outlive a course edit that removed videos.
  fn counted(&self, record: &ProgressRecord) -> usize {
    record
      .completed
      .iter()
      .filter(|i| **i < self.video_count)
      .count()
  }
}
