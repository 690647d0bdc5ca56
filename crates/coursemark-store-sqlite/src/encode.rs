//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! UUIDs are stored as hyphenated lowercase strings, timestamps as RFC 3339
//! and the resume cursor as compact JSON.

use chrono::{DateTime, Utc};
use coursemark_core::progress::{ProgressRecord, ResumeCursor};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn encode_cursor(cursor: ResumeCursor) -> Result<String> {
  Ok(serde_json::to_string(&cursor)?)
}

pub fn decode_cursor(s: &str) -> Result<ResumeCursor> { Ok(serde_json::from_str(s)?) }

pub fn encode_index(index: usize) -> Result<i64> {
  i64::try_from(index).map_err(|_| Error::CorruptRow(format!("video index {index} out of range")))
}

pub fn decode_index(raw: i64) -> Result<usize> {
  usize::try_from(raw).map_err(|_| Error::CorruptRow(format!("negative video index {raw}")))
}

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Raw strings read from a `progress` row plus its completions.
pub struct RawProgress {
  pub learner_id: String,
  pub course_id:  String,
  pub cursor:     String,
  /// `video_index` values in completion order.
  pub completed:  Vec<i64>,
}

impl RawProgress {
  pub fn into_record(self) -> Result<ProgressRecord> {
    let completed = self
      .completed
      .into_iter()
      .map(decode_index)
      .collect::<Result<Vec<_>>>()?;
    Ok(ProgressRecord::from_parts(
      decode_uuid(&self.learner_id)?,
      decode_uuid(&self.course_id)?,
      completed,
      decode_cursor(&self.cursor)?,
    ))
  }
}
