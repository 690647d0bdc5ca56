//! Certificate eligibility.
//!
//! A certificate unlocks only when every video of a non-empty course has been
//! completed. [`EligibilityGate::check`] hands out an [`Eligibility`] proof;
//! the layout engine takes that proof as an argument, so a document cannot be
//! laid out for a record that did not pass the gate.

use uuid::Uuid;

use crate::{
  Error, Result,
  course::Course,
  progress::{ProgressRecord, ProgressTracker},
};

/// True iff `video_count > 0` and every video index is completed.
pub fn is_certificate_eligible(record: &ProgressRecord, video_count: usize) -> bool {
  ProgressTracker::new(video_count).is_fully_completed(record)
}

/// Evidence that a learner has completed a course. Only constructible
/// through [`EligibilityGate::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
  learner_id:  Uuid,
  course_id:   Uuid,
  video_count: usize,
}

impl Eligibility {
  pub fn learner_id(&self) -> Uuid { self.learner_id }

  pub fn course_id(&self) -> Uuid { self.course_id }

  pub fn video_count(&self) -> usize { self.video_count }
}

/// Stateless gate evaluated before every certificate request.
pub struct EligibilityGate;

impl EligibilityGate {
  /// Refuse with [`Error::NotEligible`] unless `record` fully covers
  /// `course`.
  pub fn check(course: &Course, record: &ProgressRecord) -> Result<Eligibility> {
    let video_count = course.video_count();
    if !is_certificate_eligible(record, video_count) {
      return Err(Error::NotEligible {
        completed: record.completed_count(),
        video_count,
      });
    }
    Ok(Eligibility {
      learner_id: record.learner_id,
      course_id: course.course_id,
      video_count,
    })
  }
}
