//! [`SqliteStore`], the SQLite implementation of [`ProgressStore`].

use std::path::Path;

use chrono::Utc;
use coursemark_core::{
  progress::{ProgressRecord, ProgressUpdate},
  store::ProgressStore,
};
use rusqlite::OptionalExtension as _;
use tracing::debug;
use uuid::Uuid;

use crate::{
  Error, Result,
  encode::{RawProgress, encode_cursor, encode_dt, encode_index, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// Learner progress backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Completed indices for one pair, in completion order.
fn completed_indices(
  conn: &rusqlite::Connection,
  learner: &str,
  course: &str,
) -> rusqlite::Result<Vec<i64>> {
  let mut stmt = conn.prepare_cached(
    "SELECT video_index FROM completions
     WHERE learner_id = ?1 AND course_id = ?2
     ORDER BY rowid",
  )?;
  let rows = stmt.query_map(rusqlite::params![learner, course], |r| r.get(0))?;
  rows.collect()
}

// ─── ProgressStore impl ──────────────────────────────────────────────────────

impl ProgressStore for SqliteStore {
  type Error = Error;

  async fn get(&self, learner_id: Uuid, course_id: Uuid) -> Result<Option<ProgressRecord>> {
    let learner = encode_uuid(learner_id);
    let course = encode_uuid(course_id);

    let raw: Option<RawProgress> = self
      .conn
      .call(move |conn| {
        let cursor: Option<String> = conn
          .query_row(
            "SELECT cursor FROM progress WHERE learner_id = ?1 AND course_id = ?2",
            rusqlite::params![learner, course],
            |r| r.get(0),
          )
          .optional()?;

        let Some(cursor) = cursor else { return Ok(None) };
        let completed = completed_indices(conn, &learner, &course)?;
        Ok(Some(RawProgress { learner_id: learner, course_id: course, cursor, completed }))
      })
      .await?;

    raw.map(RawProgress::into_record).transpose()
  }

  async fn put(&self, learner_id: Uuid, course_id: Uuid, update: ProgressUpdate) -> Result<()> {
    let learner = encode_uuid(learner_id);
    let course = encode_uuid(course_id);
    let index = encode_index(update.video_index)?;
    let cursor = encode_cursor(update.cursor)?;
    let now = encode_dt(Utc::now());

    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let inserted = tx.execute(
          "INSERT OR IGNORE INTO completions (learner_id, course_id, video_index, recorded_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![learner, course, index, now],
        )?;
        tx.execute(
          "INSERT INTO progress (learner_id, course_id, cursor, updated_at)
           VALUES (?1, ?2, ?3, ?4)
           ON CONFLICT (learner_id, course_id)
           DO UPDATE SET cursor = excluded.cursor, updated_at = excluded.updated_at",
          rusqlite::params![learner, course, cursor, now],
        )?;
        tx.commit()?;
        Ok(inserted > 0)
      })
      .await?;

    debug!(%learner_id, %course_id, video_index = update.video_index, inserted, "progress stored");
    Ok(())
  }

  async fn list(&self, learner_id: Uuid) -> Result<Vec<ProgressRecord>> {
    let learner = encode_uuid(learner_id);

    let raws: Vec<RawProgress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT course_id, cursor FROM progress
           WHERE learner_id = ?1
           ORDER BY updated_at DESC, course_id",
        )?;
        let heads = stmt
          .query_map(rusqlite::params![learner], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut raws = Vec::with_capacity(heads.len());
        for (course, cursor) in heads {
          let completed = completed_indices(conn, &learner, &course)?;
          raws.push(RawProgress {
            learner_id: learner.clone(),
            course_id: course,
            cursor,
            completed,
          });
        }
        Ok(raws)
      })
      .await?;

    raws.into_iter().map(RawProgress::into_record).collect()
  }
}
