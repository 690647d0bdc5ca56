//! File-backed course catalog: one `<course_id>.json` per course.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use coursemark_core::course::Course;
use tracing::warn;
use uuid::Uuid;

pub struct FileCatalog {
  dir: PathBuf,
}

impl FileCatalog {
  pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

  pub fn dir(&self) -> &Path { &self.dir }

  pub async fn get(&self, course_id: Uuid) -> Result<Course> {
    let path = self.dir.join(format!("{course_id}.json"));
    let course = read_course(&path).await?;
    anyhow::ensure!(
      course.course_id == course_id,
      "{} declares course id {}",
      path.display(),
      course.course_id
    );
    Ok(course)
  }

  /// Every course in the directory, sorted by title. Unreadable files are
  /// skipped with a warning.
  pub async fn all(&self) -> Result<Vec<Course>> {
    let mut entries = tokio::fs::read_dir(&self.dir)
      .await
      .with_context(|| format!("failed to read catalog {}", self.dir.display()))?;

    let mut courses = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
      let path = entry.path();
      if path.extension().is_none_or(|ext| ext != "json") {
        continue;
      }
      match read_course(&path).await {
        Ok(course) => courses.push(course),
        Err(e) => warn!(path = %path.display(), "skipping course file: {e:#}"),
      }
    }
    courses.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(courses)
  }
}

async fn read_course(path: &Path) -> Result<Course> {
  let raw = tokio::fs::read_to_string(path)
    .await
    .with_context(|| format!("failed to read {}", path.display()))?;
  Course::from_json(&raw).with_context(|| format!("invalid course file {}", path.display()))
}
