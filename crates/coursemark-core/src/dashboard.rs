//! Learner dashboard summaries.
//!
//! Pairs catalog courses with a learner's progress records and splits them
//! into courses in progress and courses not yet started.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use crate::{
  course::Course,
  progress::{ProgressRecord, ProgressTracker},
};

/// Label shown for a course with nothing completed yet.
pub const NOT_STARTED: &str = "Not started";

/// Label shown once every video is watched.
pub const COMPLETED: &str = "Completed";

/// One dashboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseOverview {
  pub course_id:     Uuid,
  pub title:         String,
  /// Rounded for display; a started course can show 0.
  pub percent:       u8,
  /// At least one video inside the course is completed.
  pub started:       bool,
  /// Title of the video the learner resumes at, [`NOT_STARTED`] or
  /// [`COMPLETED`].
  pub resume_lesson: String,
  pub eligible:      bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dashboard {
  pub in_progress: Vec<CourseOverview>,
  pub not_started: Vec<CourseOverview>,
}

impl CourseOverview {
  pub fn new(course: &Course, record: Option<&ProgressRecord>) -> Self {
    let tracker = ProgressTracker::for_course(course);
    let started = record.is_some_and(|r| tracker.completion_percentage(r) > 0.0);
    let (percent, resume_lesson, eligible) = match record {
      Some(r) if started => (
        tracker.rounded_percentage(r),
        tracker
          .resume_index(r)
          .and_then(|i| course.video(i))
          .map_or_else(|| COMPLETED.to_owned(), |v| v.title.clone()),
        tracker.is_fully_completed(r),
      ),
      _ => (0, NOT_STARTED.to_owned(), false),
    };
    Self {
      course_id: course.course_id,
      title: course.title.clone(),
      percent,
      started,
      resume_lesson,
      eligible,
    }
  }
}

impl Dashboard {
  /// Build the dashboard, keeping catalog order within each list.
  pub fn build(courses: &[Course], records: &[ProgressRecord]) -> Self {
    let by_course: HashMap<Uuid, &ProgressRecord> =
      records.iter().map(|r| (r.course_id, r)).collect();

    let mut dashboard = Self::default();
    for course in courses {
      let row = CourseOverview::new(course, by_course.get(&course.course_id).copied());
      if row.started {
        dashboard.in_progress.push(row);
      } else {
        dashboard.not_started.push(row);
      }
    }
    dashboard
  }

  /// Keep only rows whose title contains `query`, ignoring case.
  pub fn filter(&self, query: &str) -> Self {
    let needle = query.to_lowercase();
    let keep = |rows: &[CourseOverview]| -> Vec<CourseOverview> {
      rows
        .iter()
        .filter(|r| r.title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
    };
    Self {
      in_progress: keep(&self.in_progress),
      not_started: keep(&self.not_started),
    }
  }
}
