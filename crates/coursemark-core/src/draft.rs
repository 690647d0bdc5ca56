//! Course authoring drafts.
//!
//! Every edit an author makes is a [`DraftEdit`] reduced over a
//! [`CourseDraft`]. Once the author is done, [`CourseDraft::finish`]
//! validates the draft and yields an immutable [`Course`] for the catalog.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  Error, Result,
  course::{Course, Level, PriceTier, Rating, Video},
};

/// One authoring edit.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
  SetTitle(String),
  SetInstructor(String),
  SetDescription(String),
  SetCategory(String),
  SetLevel(Level),
  SetPrice(PriceTier),
  SetRating(Rating),
  SetDuration(String),
  SetSchedule { start: Option<NaiveDate>, end: Option<NaiveDate> },
  SetTotalHours(Option<String>),
  SetGrade(Option<String>),
  SetVideoTitle(usize, String),
  SetVideoUrl(usize, String),
  AddVideo,
  RemoveVideo(usize),
}

/// Accumulated authoring state. Always holds at least one (possibly blank)
/// video row.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
  /// `Some` when editing a published course, `None` for a new one.
  pub course_id:   Option<Uuid>,
  pub title:       String,
  pub instructor:  String,
  pub description: String,
  pub category:    String,
  pub level:       Level,
  pub price:       PriceTier,
  pub rating:      Rating,
  pub duration:    String,
  pub start_date:  Option<NaiveDate>,
  pub end_date:    Option<NaiveDate>,
  pub total_hours: Option<String>,
  pub grade:       Option<String>,
  videos:          Vec<Video>,
}

impl Default for CourseDraft {
  fn default() -> Self {
    Self {
      course_id:   None,
      title:       String::new(),
      instructor:  String::new(),
      description: String::new(),
      category:    String::new(),
      level:       Level::default(),
      price:       PriceTier::default(),
      rating:      Rating::default(),
      duration:    String::new(),
      start_date:  None,
      end_date:    None,
      total_hours: None,
      grade:       None,
      videos:      vec![Video::default()],
    }
  }
}

impl CourseDraft {
  pub fn new() -> Self { Self::default() }

  /// Seed a draft from a published course for editing.
  pub fn from_course(course: &Course) -> Self {
    let videos = if course.videos.is_empty() {
      vec![Video::default()]
    } else {
      course.videos.clone()
    };
    Self {
      course_id: Some(course.course_id),
      title: course.title.clone(),
      instructor: course.instructor.clone(),
      description: course.description.clone(),
      category: course.category.clone(),
      level: course.level,
      price: course.price.clone(),
      rating: course.rating,
      duration: course.duration.clone(),
      start_date: course.start_date,
      end_date: course.end_date,
      total_hours: course.total_hours.clone(),
      grade: course.grade.clone(),
      videos,
    }
  }

  pub fn videos(&self) -> &[Video] { &self.videos }

  /// Apply a single edit.
  pub fn apply(mut self, edit: DraftEdit) -> Result<Self> {
    match edit {
      DraftEdit::SetTitle(v) => self.title = v,
      DraftEdit::SetInstructor(v) => self.instructor = v,
      DraftEdit::SetDescription(v) => self.description = v,
      DraftEdit::SetCategory(v) => self.category = v,
      DraftEdit::SetLevel(v) => self.level = v,
      DraftEdit::SetPrice(v) => self.price = v,
      DraftEdit::SetRating(v) => self.rating = v,
      DraftEdit::SetDuration(v) => self.duration = v,
      DraftEdit::SetSchedule { start, end } => {
        if let (Some(s), Some(e)) = (start, end)
          && e < s
        {
          return Err(Error::InvalidDraft(format!("course ends ({e}) before it starts ({s})")));
        }
        self.start_date = start;
        self.end_date = end;
      }
      DraftEdit::SetTotalHours(v) => self.total_hours = v,
      DraftEdit::SetGrade(v) => self.grade = v,
      DraftEdit::SetVideoTitle(i, v) => self.video_mut(i)?.title = v,
      DraftEdit::SetVideoUrl(i, v) => self.video_mut(i)?.url = v,
      DraftEdit::AddVideo => self.videos.push(Video::default()),
      DraftEdit::RemoveVideo(i) => {
        if i >= self.videos.len() {
          return Err(Error::VideoNotFound(i));
        }
        self.videos.remove(i);
        if self.videos.is_empty() {
          self.videos.push(Video::default());
        }
      }
    }
    Ok(self)
  }

  /// Apply a sequence of edits, stopping at the first failure.
  pub fn apply_all(self, edits: impl IntoIterator<Item = DraftEdit>) -> Result<Self> {
    edits.into_iter().try_fold(self, CourseDraft::apply)
  }

  /// Validate and produce the course. Blank video rows are dropped; a video
  /// with only one of title/URL filled in is rejected.
  pub fn finish(self) -> Result<Course> {
    if self.title.trim().is_empty() {
      return Err(Error::InvalidDraft("title is required".into()));
    }
    if self.instructor.trim().is_empty() {
      return Err(Error::InvalidDraft("instructor is required".into()));
    }

    let mut videos = Vec::with_capacity(self.videos.len());
    for (i, video) in self.videos.into_iter().enumerate() {
      if video.is_blank() {
        continue;
      }
      if video.title.trim().is_empty() || video.url.trim().is_empty() {
        return Err(Error::InvalidDraft(format!(
          "video {i} needs both a title and a URL"
        )));
      }
      videos.push(video);
    }

    Ok(Course {
      course_id: self.course_id.unwrap_or_else(Uuid::new_v4),
      title: self.title.trim().to_owned(),
      instructor: self.instructor.trim().to_owned(),
      description: self.description,
      category: self.category,
      level: self.level,
      price: self.price,
      rating: self.rating,
      duration: self.duration,
      videos,
      start_date: self.start_date,
      end_date: self.end_date,
      total_hours: self.total_hours,
      grade: self.grade,
    })
  }

  fn video_mut(&mut self, index: usize) -> Result<&mut Video> {
    self.videos.get_mut(index).ok_or(Error::VideoNotFound(index))
  }
}
