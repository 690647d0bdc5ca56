//! Integration tests for `SqliteStore` against an in-memory database.

use coursemark_core::{
  progress::{ProgressRecord, ProgressTracker, ProgressUpdate, ResumeCursor},
  store::ProgressStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn update(video_index: usize, cursor: ResumeCursor) -> ProgressUpdate {
  ProgressUpdate { video_index, cursor }
}

// ─── get / put ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn missing_pair_is_none() {
  let s = store().await;
  assert!(s.get(Uuid::new_v4(), Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn put_creates_record() {
  let s = store().await;
  let (learner, course) = (Uuid::new_v4(), Uuid::new_v4());

  s.put(learner, course, update(0, ResumeCursor::AtIndex(1))).await.unwrap();

  let record = s.get(learner, course).await.unwrap().unwrap();
  assert_eq!(record.learner_id, learner);
  assert_eq!(record.course_id, course);
  assert_eq!(record.completed(), &[0]);
  assert_eq!(record.cursor, ResumeCursor::AtIndex(1));
}

#[tokio::test]
async fn completions_keep_first_completion_order() {
  let s = store().await;
  let (learner, course) = (Uuid::new_v4(), Uuid::new_v4());

  s.put(learner, course, update(2, ResumeCursor::AtIndex(3))).await.unwrap();
  s.put(learner, course, update(0, ResumeCursor::AtIndex(1))).await.unwrap();
  s.put(learner, course, update(1, ResumeCursor::AtIndex(2))).await.unwrap();

  let record = s.get(learner, course).await.unwrap().unwrap();
  assert_eq!(record.completed(), &[2, 0, 1]);
  assert_eq!(record.cursor, ResumeCursor::AtIndex(2));
}

#[tokio::test]
async fn re_put_does_not_duplicate() {
  let s = store().await;
  let (learner, course) = (Uuid::new_v4(), Uuid::new_v4());

  s.put(learner, course, update(0, ResumeCursor::AtIndex(1))).await.unwrap();
  s.put(learner, course, update(0, ResumeCursor::AtIndex(1))).await.unwrap();

  let record = s.get(learner, course).await.unwrap().unwrap();
  assert_eq!(record.completed_count(), 1);
}

#[tokio::test]
async fn pairs_are_isolated() {
  let s = store().await;
  let (ada, bob, course) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

  s.put(ada, course, update(0, ResumeCursor::Finished)).await.unwrap();

  assert!(s.get(bob, course).await.unwrap().is_none());
  assert!(s.get(ada, Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn tracker_round_trip_through_store() {
  let s = store().await;
  let (learner, course) = (Uuid::new_v4(), Uuid::new_v4());
  let tracker = ProgressTracker::new(3);

  let mut record = ProgressRecord::new(learner, course);
  for index in [0, 1, 2] {
    record = tracker.mark_completed(&record, index).unwrap();
    s.put(learner, course, update(index, record.cursor)).await.unwrap();
  }

  let stored = s.get(learner, course).await.unwrap().unwrap();
  assert_eq!(stored, record);
  assert_eq!(stored.cursor, ResumeCursor::Finished);
  assert!(tracker.is_fully_completed(&stored));
}

// ─── list ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_returns_every_course_for_learner() {
  let s = store().await;
  let (ada, bob) = (Uuid::new_v4(), Uuid::new_v4());
  let (rust, go) = (Uuid::new_v4(), Uuid::new_v4());

  s.put(ada, rust, update(0, ResumeCursor::AtIndex(1))).await.unwrap();
  s.put(ada, go, update(0, ResumeCursor::Finished)).await.unwrap();
  s.put(bob, rust, update(1, ResumeCursor::AtIndex(2))).await.unwrap();

  let mut courses: Vec<Uuid> = s
    .list(ada)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.course_id)
    .collect();
  courses.sort();
  let mut expected = vec![rust, go];
  expected.sort();
  assert_eq!(courses, expected);

  let bobs = s.list(bob).await.unwrap();
  assert_eq!(bobs.len(), 1);
  assert_eq!(bobs[0].completed(), &[1]);
}

#[tokio::test]
async fn list_empty_for_unknown_learner() {
  let s = store().await;
  assert!(s.list(Uuid::new_v4()).await.unwrap().is_empty());
}

// ─── persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn file_store_survives_reopen() {
  let path = std::env::temp_dir().join(format!("coursemark-{}.db", Uuid::new_v4()));
  let (learner, course) = (Uuid::new_v4(), Uuid::new_v4());

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.put(learner, course, update(0, ResumeCursor::AtIndex(1))).await.unwrap();
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  let record = reopened.get(learner, course).await.unwrap().unwrap();
  assert_eq!(record.completed(), &[0]);

  drop(reopened);
  let _ = std::fs::remove_file(&path);
}
