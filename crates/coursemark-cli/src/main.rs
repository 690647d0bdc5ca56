//! `coursemark`: track course progress and issue completion certificates.
//!
//! # Usage
//!
//! ```
//! coursemark --learner <uuid> status <course-id>
//! coursemark --learner <uuid> mark <course-id> 2
//! coursemark --learner <uuid> certificate <course-id> --out ./certs
//! coursemark --config ~/.config/coursemark.toml dashboard --search rust
//! ```

mod catalog;
mod settings;

use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use catalog::FileCatalog;
use chrono::Utc;
use clap::{Parser, Subcommand};
use coursemark_certificate::{
  IssueContext, JsonRenderer, LayoutEngine, render_certificate,
};
use coursemark_core::{
  course::Course,
  dashboard::{CourseOverview, Dashboard},
  progress::ProgressTracker,
  service::ProgressService,
  session::{Learner, Session},
};
use coursemark_store_sqlite::SqliteStore;
use settings::{AppConfig, expand_tilde};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "coursemark", version, about = "Course progress and certificates")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "coursemark.toml")]
  config: PathBuf,

  /// Learner id; overrides `learner_id` from the config.
  #[arg(long)]
  learner: Option<Uuid>,

  /// Learner display name; overrides `learner_name` from the config.
  #[arg(long)]
  name: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show progress for one course.
  Status { course_id: Uuid },

  /// Mark a video (0-based index) as watched.
  Mark { course_id: Uuid, index: usize },

  /// Issue a certificate for a fully completed course.
  Certificate {
    course_id: Uuid,

    /// Output directory; defaults to `output_dir` from the config.
    #[arg(short, long)]
    out: Option<PathBuf>,
  },

  /// List courses split into in-progress and not-started.
  Dashboard {
    /// Case-insensitive title filter.
    #[arg(short, long)]
    search: Option<String>,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let cfg = AppConfig::load(&cli.config)?;

  let Some(learner_id) = cli.learner.or(cfg.learner_id) else {
    bail!("no learner id: pass --learner or set learner_id in the config");
  };
  let name = cli.name.clone().unwrap_or_else(|| cfg.learner_name.clone());

  let store_path = expand_tilde(&cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = App {
    service: ProgressService::new(store),
    catalog: FileCatalog::new(expand_tilde(&cfg.catalog_dir)),
    engine:  LayoutEngine::new(cfg.layout()),
    cfg,
  };

  let mut session = Session::open(Learner::new(learner_id, name));
  let outcome = app.run(&mut session, cli.command).await;

  let teardown = session.close();
  if !teardown.unsynced_courses.is_empty() {
    tracing::warn!(
      courses = ?teardown.unsynced_courses,
      "session closed with progress that was not persisted"
    );
  }

  outcome
}

// ─── Commands ─────────────────────────────────────────────────────────────────

struct App {
  service: ProgressService<SqliteStore>,
  catalog: FileCatalog,
  engine:  LayoutEngine,
  cfg:     AppConfig,
}

impl App {
  async fn run(&self, session: &mut Session, command: Command) -> Result<()> {
    match command {
      Command::Status { course_id } => self.status(session, course_id).await,
      Command::Mark { course_id, index } => self.mark(session, course_id, index).await,
      Command::Certificate { course_id, out } => {
        self.certificate(session, course_id, out).await
      }
      Command::Dashboard { search } => self.dashboard(session, search.as_deref()).await,
    }
  }

  async fn course(&self, course_id: Uuid) -> Result<Course> {
    self
      .catalog
      .get(course_id)
      .await
      .with_context(|| format!("course {course_id} not found in {}", self.catalog.dir().display()))
  }

  async fn status(&self, session: &mut Session, course_id: Uuid) -> Result<()> {
    let course = self.course(course_id).await?;
    let record = self.service.load(session, &course).await?;
    let tracker = ProgressTracker::for_course(&course);

    let overview = CourseOverview::new(&course, Some(&record));
    println!("{}", course.title);
    println!(
      "  {}% ({}/{} videos)",
      overview.percent,
      record.completed_count().min(course.video_count()),
      course.video_count()
    );
    println!("  next: {}", overview.resume_lesson);
    for (index, video) in course.videos.iter().enumerate() {
      let mark = if record.is_completed(index) { "x" } else { " " };
      let here = if tracker.resume_index(&record) == Some(index) { " <" } else { "" };
      println!("  [{mark}] {index:>2} {}{here}", video.title);
    }
    if overview.eligible {
      println!("  certificate available");
    }
    Ok(())
  }

  async fn mark(&self, session: &mut Session, course_id: Uuid, index: usize) -> Result<()> {
    let course = self.course(course_id).await?;
    self.service.load(session, &course).await?;
    let outcome = self.service.mark_completed(session, &course, index).await?;

    let title = course.video(index).map_or("", |v| v.title.as_str());
    if outcome.changed {
      println!("completed {index} {title} ({}%)", outcome.percent);
    } else {
      println!("{index} {title} was already completed ({}%)", outcome.percent);
    }
    if !outcome.persisted {
      println!("warning: progress saved locally only");
    }
    if outcome.unlocked {
      println!("certificate unlocked: coursemark certificate {course_id}");
    }
    Ok(())
  }

  async fn certificate(
    &self,
    session: &mut Session,
    course_id: Uuid,
    out: Option<PathBuf>,
  ) -> Result<()> {
    let course = self.course(course_id).await?;
    self.service.load(session, &course).await?;

    let document = self
      .engine
      .issue(session, &course, &IssueContext::at(Utc::now()))
      .context("cannot issue certificate")?;
    let rendered = render_certificate(&JsonRenderer::pretty(), &document)?;

    let dir = expand_tilde(&out.unwrap_or_else(|| self.cfg.output_dir.clone()));
    tokio::fs::create_dir_all(&dir)
      .await
      .with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(&rendered.file_name);
    tokio::fs::write(&path, &rendered.body)
      .await
      .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(certificate_id = %document.certificate_id, path = %path.display(), "certificate issued");
    println!("{}", path.display());
    Ok(())
  }

  async fn dashboard(&self, session: &mut Session, search: Option<&str>) -> Result<()> {
    let courses = self.catalog.all().await?;
    let records = self.service.load_all(session).await?;

    let mut dashboard = Dashboard::build(&courses, &records);
    if let Some(query) = search {
      dashboard = dashboard.filter(query);
    }

    println!("In progress");
    print_overviews(&dashboard.in_progress);
    println!("Not started");
    print_overviews(&dashboard.not_started);
    Ok(())
  }
}

fn print_overviews(overviews: &[CourseOverview]) {
  if overviews.is_empty() {
    println!("  (none)");
  }
  for o in overviews {
    let badge = if o.eligible { " [certificate]" } else { "" };
    println!("  {:>3}%  {}  {}: {}{badge}", o.percent, o.course_id, o.title, o.resume_lesson);
  }
}
