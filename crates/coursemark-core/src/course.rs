//! Course catalog types.
//!
//! A [`Course`] is owned by the catalog; the core only reads it. Videos have
//! no identity of their own: a video's position in [`Course::videos`] is the
//! key every progress record refers to.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Result;

// ─── Classification ──────────────────────────────────────────────────────────

/// Difficulty level advertised in the catalog.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  #[default]
  Beginner,
  Intermediate,
  Advanced,
}

/// What a learner pays for the course.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum PriceTier {
  #[default]
  Free,
  /// Display label as entered by the course author (e.g. "₹499").
  Paid(String),
}

/// A catalog rating between 0.0 and 5.0, stored with one decimal place.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize,
  Deserialize,
)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(u8);

impl Rating {
  pub const MAX: Rating = Rating(50);

  /// Round `value` to one decimal place. Returns `None` outside `0.0..=5.0`.
  pub fn new(value: f32) -> Option<Self> {
    if !(0.0..=5.0).contains(&value) {
      return None;
    }
    Some(Self((value * 10.0).round() as u8))
  }

  pub fn tenths(self) -> u8 { self.0 }

  pub fn value(self) -> f32 { f32::from(self.0) / 10.0 }
}

impl TryFrom<f32> for Rating {
  type Error = String;

  fn try_from(value: f32) -> std::result::Result<Self, Self::Error> {
    Rating::new(value).ok_or_else(|| format!("rating {value} outside 0..=5"))
  }
}

impl From<Rating> for f32 {
  fn from(r: Rating) -> Self { r.value() }
}

impl fmt::Display for Rating {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.0 / 10, self.0 % 10)
  }
}

// ─── Video ───────────────────────────────────────────────────────────────────

/// One lesson video. Its identity is its index within the owning course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
  pub title: String,
  /// Source locator; either a YouTube link or a direct media URL.
  pub url:   String,
}

/// How a video locator should be played back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource<'a> {
  /// An embeddable YouTube video, identified by its id.
  YouTube { video_id: &'a str },
  /// A YouTube host whose URL shape carries no recognisable id.
  UnrecognisedYouTube,
  /// Anything else is treated as a direct media file.
  Direct(&'a str),
}

impl Video {
  pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
    Self { title: title.into(), url: url.into() }
  }

  /// Classify the locator. Supports `watch?v=`, `youtu.be/` and `embed/`
  /// forms.
  pub fn source(&self) -> VideoSource<'_> {
    let url = self.url.as_str();
    if !(url.contains("youtube.com") || url.contains("youtu.be")) {
      return VideoSource::Direct(url);
    }

    let id = if let Some((_, rest)) = url.split_once("watch?v=") {
      rest.split('&').next()
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
      rest.split(['?', '&']).next()
    } else if let Some((_, rest)) = url.split_once("embed/") {
      rest.split('?').next()
    } else {
      None
    };

    match id {
      Some(video_id) if !video_id.is_empty() => VideoSource::YouTube { video_id },
      _ => VideoSource::UnrecognisedYouTube,
    }
  }

  /// True when the title and locator are both blank (an unused form row).
  pub fn is_blank(&self) -> bool {
    self.title.trim().is_empty() && self.url.trim().is_empty()
  }
}

// ─── Course ──────────────────────────────────────────────────────────────────

/// A course as published by the catalog. Immutable from the core's view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
  pub course_id:   Uuid,
  pub title:       String,
  pub instructor:  String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub category:    String,
  #[serde(default)]
  pub level:       Level,
  #[serde(default)]
  pub price:       PriceTier,
  #[serde(default)]
  pub rating:      Rating,
  /// Free-text duration label, e.g. "6 weeks".
  #[serde(default)]
  pub duration:    String,
  /// Playback order is insertion order.
  #[serde(default)]
  pub videos:      Vec<Video>,
  pub start_date:  Option<NaiveDate>,
  pub end_date:    Option<NaiveDate>,
  pub total_hours: Option<String>,
  pub grade:       Option<String>,
}

impl Course {
  /// Convenience constructor with all optional fields empty.
  pub fn new(
    course_id: Uuid,
    title: impl Into<String>,
    instructor: impl Into<String>,
    videos: Vec<Video>,
  ) -> Self {
    Self {
      course_id,
      title: title.into(),
      instructor: instructor.into(),
      description: String::new(),
      category: String::new(),
      level: Level::default(),
      price: PriceTier::default(),
      rating: Rating::default(),
      duration: String::new(),
      videos,
      start_date: None,
      end_date: None,
      total_hours: None,
      grade: None,
    }
  }

  pub fn video_count(&self) -> usize { self.videos.len() }

  pub fn video(&self, index: usize) -> Option<&Video> { self.videos.get(index) }

  /// Decode a course published by the catalog as JSON.
  pub fn from_json(raw: &str) -> Result<Self> { Ok(serde_json::from_str(raw)?) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rating_rounds_to_one_decimal() {
    let r = Rating::new(4.26).unwrap();
    assert_eq!(r.tenths(), 43);
    assert_eq!(r.to_string(), "4.3");
    assert_eq!(Rating::MAX.to_string(), "5.0");
    assert!(Rating::new(5.1).is_none());
    assert!(Rating::new(-0.1).is_none());
  }

  #[test]
  fn youtube_locators_are_recognised() {
    let watch = Video::new("a", "https://www.youtube.com/watch?v=abc123&t=4");
    let short = Video::new("b", "https://youtu.be/xyz789?si=share");
    let embed = Video::new("c", "https://www.youtube.com/embed/emb42?rel=0");
    let bare = Video::new("d", "https://www.youtube.com/channel/foo");
    let file = Video::new("e", "https://cdn.example.com/lesson1.mp4");

    assert_eq!(watch.source(), VideoSource::YouTube { video_id: "abc123" });
    assert_eq!(short.source(), VideoSource::YouTube { video_id: "xyz789" });
    assert_eq!(embed.source(), VideoSource::YouTube { video_id: "emb42" });
    assert_eq!(bare.source(), VideoSource::UnrecognisedYouTube);
    assert_eq!(
      file.source(),
      VideoSource::Direct("https://cdn.example.com/lesson1.mp4")
    );
  }

  #[test]
  fn course_json_fills_defaults() {
    let raw = r#"{
      "course_id": "6f1b7a9e-3c1d-4c55-9a57-1d2f0c6d8e01",
      "title": "Rust Basics",
      "instructor": "Ferris",
      "rating": 4.5,
      "videos": [{ "title": "Intro", "url": "intro.mp4" }],
      "start_date": "2024-01-08",
      "end_date": null,
      "total_hours": "12",
      "grade": null
    }"#;

    let course = Course::from_json(raw).unwrap();
    assert_eq!(course.video_count(), 1);
    assert_eq!(course.level, Level::Beginner);
    assert_eq!(course.price, PriceTier::Free);
    assert_eq!(course.rating.to_string(), "4.5");
    assert_eq!(course.start_date, NaiveDate::from_ymd_opt(2024, 1, 8));
  }

  #[test]
  fn out_of_range_rating_is_rejected_on_decode() {
    let raw = r#"{
      "course_id": "6f1b7a9e-3c1d-4c55-9a57-1d2f0c6d8e01",
      "title": "x", "instructor": "y", "rating": 7.0,
      "start_date": null, "end_date": null, "total_hours": null, "grade": null
    }"#;
    assert!(Course::from_json(raw).is_err());
  }
}
