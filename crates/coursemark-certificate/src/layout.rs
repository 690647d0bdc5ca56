//! Certificate layout.
//!
//! A single forward pass places the flowing blocks: each block is wrapped to
//! the usable width, placed at the running `cursor_y`, and then pushes the
//! cursor down by `lines × line_height + spacing` for its tier. The two
//! signature blocks hang from the bottom edge and ignore the cursor.

use std::fmt::Write as _;

use chrono::{DateTime, NaiveDate, Utc};
use coursemark_core::{
  course::Course,
  eligibility::{Eligibility, EligibilityGate},
  session::{Learner, Session},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  document::{
    Anchor, BlockRole, Canvas, CertificateDocument, ColorTier, FontTier, Frame,
    PositionedLine, Rgb, TextBlock,
  },
  id::CertificateId,
  metrics::{Helvetica, TextMetrics},
  wrap::wrap,
};

/// Placeholder for missing dates and hours.
pub const NOT_AVAILABLE: &str = "N/A";

const SIGNATURE_RULE: &str = "____________________";
const DEFAULT_INSTRUCTOR: &str = "Course Instructor";
const UNTITLED_COURSE: &str = "Untitled Course";

// ─── Configuration ───────────────────────────────────────────────────────────

/// The institution named on certificates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Issuer {
  pub organization:    String,
  /// Printed as "<title>, <organization>" under the institutional signature.
  pub signatory_title: String,
}

impl Default for Issuer {
  fn default() -> Self {
    Self {
      organization:    "Coursemark Academy".into(),
      signatory_title: "Director".into(),
    }
  }
}

/// Page geometry and fixed offsets. Defaults describe A4 landscape in CSS
/// pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
  pub canvas:             Canvas,
  pub margin:             f32,
  /// Baseline of the first block.
  pub top:                f32,
  /// Points per layout unit; converts measured text widths into units.
  pub points_per_unit:    f32,
  /// Extra space after the metadata group.
  pub section_gap:        f32,
  /// Distance from the bottom edge to the signature rules.
  pub signature_offset:   f32,
  /// Rule-to-name distance within a signature block.
  pub signature_line_gap: f32,
  /// Distance from the right margin to the institutional signature.
  pub institution_offset: f32,
  pub frame:              Frame,
  pub issuer:             Issuer,
  /// `chrono` strftime pattern for every printed date.
  pub date_format:        String,
}

impl Default for LayoutConfig {
  fn default() -> Self {
    Self {
      canvas:             Canvas { width: 1122.52, height: 793.7 },
      margin:             60.0,
      top:                80.0,
      points_per_unit:    0.75,
      section_gap:        15.0,
      signature_offset:   90.0,
      signature_line_gap: 20.0,
      institution_offset: 140.0,
      frame:              Frame { inset: 15.0, stroke_width: 6.0, color: Rgb(50, 50, 150) },
      issuer:             Issuer::default(),
      date_format:        "%Y-%m-%d".into(),
    }
  }
}

/// Per-request inputs that are not part of the course or learner.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueContext {
  pub issued_at:      DateTime<Utc>,
  /// Overrides the derived id when set.
  pub certificate_id: Option<CertificateId>,
}

impl IssueContext {
  pub fn at(issued_at: DateTime<Utc>) -> Self { Self { issued_at, certificate_id: None } }

  pub fn with_id(mut self, id: CertificateId) -> Self {
    self.certificate_id = Some(id);
    self
  }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// Lays out certificates. Pure: no clock, no I/O.
#[derive(Debug, Clone)]
pub struct LayoutEngine<M = Helvetica> {
  config:  LayoutConfig,
  metrics: M,
}

impl LayoutEngine<Helvetica> {
  pub fn new(config: LayoutConfig) -> Self { Self::with_metrics(config, Helvetica) }
}

impl Default for LayoutEngine<Helvetica> {
  fn default() -> Self { Self::new(LayoutConfig::default()) }
}

impl<M: TextMetrics> LayoutEngine<M> {
  pub fn with_metrics(config: LayoutConfig, metrics: M) -> Self { Self { config, metrics } }

  pub fn config(&self) -> &LayoutConfig { &self.config }

  /// `canvas width − 2 × margin`.
  pub fn usable_width(&self) -> f32 { self.config.canvas.width - 2.0 * self.config.margin }

  /// Check eligibility for the session's learner, then lay out. Refuses
  /// before any layout work when the course is not fully completed.
  pub fn issue(
    &self,
    session: &Session,
    course: &Course,
    ctx: &IssueContext,
  ) -> Result<CertificateDocument> {
    let record = session.progress_or_default(course.course_id);
    let proof = match EligibilityGate::check(course, &record) {
      Ok(proof) => proof,
      Err(e) => {
        info!(
          learner_id = %session.learner_id(),
          course_id = %course.course_id,
          "certificate refused: {e}"
        );
        return Err(e.into());
      }
    };
    self.layout(&proof, course, session.learner(), ctx)
  }

  /// Lay out the certificate for a learner who passed the gate.
  pub fn layout(
    &self,
    proof: &Eligibility,
    course: &Course,
    learner: &Learner,
    ctx: &IssueContext,
  ) -> Result<CertificateDocument> {
    if proof.course_id() != course.course_id || proof.learner_id() != learner.learner_id {
      return Err(Error::ProofMismatch);
    }

    let cfg = &self.config;
    let org = cfg.issuer.organization.as_str();
    let certificate_id = ctx
      .certificate_id
      .clone()
      .unwrap_or_else(|| CertificateId::derive(learner.learner_id, ctx.issued_at));

    let issue_date = self.format_date(ctx.issued_at.date_naive())?;
    let start = self.optional_date(course.start_date)?;
    let end = self.optional_date(course.end_date)?;
    let course_title = non_blank(&course.title).unwrap_or(UNTITLED_COURSE);
    let hours = non_blank(course.total_hours.as_deref().unwrap_or_default())
      .or_else(|| non_blank(&course.duration))
      .unwrap_or(NOT_AVAILABLE);
    let description = match non_blank(&course.description) {
      Some(d) => d.to_owned(),
      None => format!(
        "This course provided comprehensive training on {course_title}, including practical \
         exercises and projects. By completing this course, {} has demonstrated proficiency in \
         the key skills taught.",
        learner.display_name()
      ),
    };

    let mut flow = Flow::new(self);
    flow.push(BlockRole::Title, FontTier::Title, ColorTier::Heading, Anchor::Center, "Certificate of Completion");
    flow.push(BlockRole::CertifyCaption, FontTier::Caption, ColorTier::Muted, Anchor::Center, "This is to certify that");
    flow.push(BlockRole::LearnerName, FontTier::Name, ColorTier::Accent, Anchor::Center, learner.display_name());
    flow.push(BlockRole::CompletedCaption, FontTier::Caption, ColorTier::Text, Anchor::Center, "has successfully completed the course");
    flow.push(BlockRole::CourseTitle, FontTier::CourseTitle, ColorTier::Highlight, Anchor::Center, &format!("\"{course_title}\""));

    flow.meta(BlockRole::OfferedBy, &format!("Offered by: {org}"));
    flow.meta(BlockRole::Duration, &format!("Course Duration: {start} \u{2013} {end}"));
    flow.meta(BlockRole::TotalHours, &format!("Total Hours: {hours}"));
    flow.meta(BlockRole::CourseId, &format!("Course ID: {}", course.course_id));
    if let Some(grade) = course.grade.as_deref().and_then(non_blank) {
      flow.meta(BlockRole::Grade, &format!("Grade/Score: {grade}"));
    }
    flow.gap(cfg.section_gap);

    flow.push(BlockRole::Description, FontTier::Body, ColorTier::Muted, Anchor::Left, &format!("Course Description: {description}"));

    flow.push(BlockRole::IssueDate, FontTier::Meta, ColorTier::Subtle, Anchor::Center, &format!("Issued on: {issue_date}"));
    flow.push(BlockRole::CertificateId, FontTier::Footer, ColorTier::Subtle, Anchor::Center, &format!("Certificate ID: {certificate_id}"));
    flow.push(
      BlockRole::VerificationNote,
      FontTier::Footer,
      ColorTier::Subtle,
      Anchor::Center,
      &format!("Note: This certificate is digitally signed and can be verified on {org}."),
    );

    let (mut blocks, flow_end) = flow.finish();

    let signature_y = cfg.canvas.height - cfg.signature_offset;
    if flow_end > signature_y - FontTier::Meta.line_height() {
      warn!(
        course_id = %course.course_id,
        flow_end,
        signature_y,
        "certificate content reaches the signature area"
      );
    }

    let instructor = non_blank(&course.instructor).unwrap_or(DEFAULT_INSTRUCTOR);
    blocks.push(self.signature(BlockRole::InstructorSignature, cfg.margin, signature_y, instructor));
    blocks.push(self.signature(
      BlockRole::InstitutionSignature,
      cfg.canvas.width - cfg.margin - cfg.institution_offset,
      signature_y,
      &format!("{}, {org}", cfg.issuer.signatory_title),
    ));

    debug!(
      %certificate_id,
      course_id = %course.course_id,
      blocks = blocks.len(),
      flow_end,
      "certificate laid out"
    );

    Ok(CertificateDocument {
      certificate_id,
      issued_at: ctx.issued_at,
      canvas: cfg.canvas,
      frame: cfg.frame,
      blocks,
      flow_end,
      file_name: file_stem(course_title),
    })
  }

  /// Wrap `text` to the usable width at the tier's font size.
  fn wrap(&self, text: &str, font: FontTier) -> Vec<String> {
    self.wrap_to(text, font, self.usable_width())
  }

  fn wrap_to(&self, text: &str, font: FontTier, width: f32) -> Vec<String> {
    let size = font.size();
    let per_unit = self.config.points_per_unit;
    wrap(text, width, |s| self.metrics.text_width(s, size) / per_unit)
  }

  fn signature(&self, role: BlockRole, x: f32, y: f32, name: &str) -> TextBlock {
    let column = self.usable_width() / 2.0 - self.config.institution_offset / 2.0;
    let mut lines = vec![SIGNATURE_RULE.to_owned()];
    lines.extend(self.wrap_to(name, FontTier::Meta, column));
    place(
      role,
      FontTier::Meta,
      ColorTier::Subtle,
      Anchor::Left,
      x,
      y,
      lines,
      self.config.signature_line_gap,
    )
  }

  fn format_date(&self, date: NaiveDate) -> Result<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(&self.config.date_format))
      .map_err(|_| Error::DateFormat(self.config.date_format.clone()))?;
    Ok(out)
  }

  fn optional_date(&self, date: Option<NaiveDate>) -> Result<String> {
    date.map_or_else(|| Ok(NOT_AVAILABLE.to_owned()), |d| self.format_date(d))
  }
}

// ─── Flow ────────────────────────────────────────────────────────────────────

/// Running state of the forward pass.
struct Flow<'a, M> {
  engine:   &'a LayoutEngine<M>,
  cursor_y: f32,
  blocks:   Vec<TextBlock>,
}

impl<'a, M: TextMetrics> Flow<'a, M> {
  fn new(engine: &'a LayoutEngine<M>) -> Self {
    Self { engine, cursor_y: engine.config.top, blocks: Vec::new() }
  }

  fn push(&mut self, role: BlockRole, font: FontTier, color: ColorTier, anchor: Anchor, text: &str) {
    let cfg = &self.engine.config;
    let lines = self.engine.wrap(text, font);
    let advance = lines.len() as f32 * font.line_height() + font.spacing();
    let x = match anchor {
      Anchor::Center => cfg.canvas.width / 2.0,
      Anchor::Left => cfg.margin,
    };
    self
      .blocks
      .push(place(role, font, color, anchor, x, self.cursor_y, lines, font.line_height()));
    self.cursor_y += advance;
  }

  fn meta(&mut self, role: BlockRole, text: &str) {
    self.push(role, FontTier::Meta, ColorTier::Detail, Anchor::Center, text);
  }

  fn gap(&mut self, amount: f32) { self.cursor_y += amount; }

  fn finish(self) -> (Vec<TextBlock>, f32) { (self.blocks, self.cursor_y) }
}

#[allow(clippy::too_many_arguments)]
fn place(
  role: BlockRole,
  font: FontTier,
  color: ColorTier,
  anchor: Anchor,
  x: f32,
  y: f32,
  lines: Vec<String>,
  line_height: f32,
) -> TextBlock {
  let lines = lines
    .into_iter()
    .enumerate()
    .map(|(i, text)| PositionedLine { text, y: y + i as f32 * line_height })
    .collect();
  TextBlock { role, anchor, x, y, font, color, rgb: color.rgb(), lines }
}

fn non_blank(s: &str) -> Option<&str> {
  let t = s.trim();
  (!t.is_empty()).then_some(t)
}

/// `<title>-Certificate` with path separators and control characters
/// replaced.
fn file_stem(title: &str) -> String {
  let safe: String = title
    .chars()
    .map(|c| if matches!(c, '/' | '\\' | ':') || c.is_control() { '_' } else { c })
    .collect();
  format!("{safe}-Certificate")
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;
  use coursemark_core::{
    course::Video,
    progress::{ProgressRecord, ProgressTracker},
  };
  use uuid::Uuid;

  use super::*;

  fn course(videos: usize) -> Course {
    let videos = (0..videos)
      .map(|i| Video::new(format!("Lesson {i}"), format!("lesson{i}.mp4")))
      .collect();
    let mut c = Course::new(Uuid::new_v4(), "Rust Basics", "Ferris Crab", videos);
    c.start_date = NaiveDate::from_ymd_opt(2024, 1, 8);
    c.end_date = NaiveDate::from_ymd_opt(2024, 3, 29);
    c.total_hours = Some("24".into());
    c
  }

  fn completed_session(course: &Course, name: &str) -> Session {
    let mut session = Session::open(Learner::new(Uuid::new_v4(), name));
    let tracker = ProgressTracker::for_course(course);
    let mut record = ProgressRecord::new(session.learner_id(), course.course_id);
    for i in 0..course.video_count() {
      record = tracker.mark_completed(&record, i).unwrap();
    }
    session.sync(record);
    session
  }

  fn ctx() -> IssueContext {
    IssueContext::at(Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap())
  }

  fn engine() -> LayoutEngine { LayoutEngine::default() }

  #[test]
  fn blocks_follow_fixed_order() {
    let c = course(2);
    let doc = engine().issue(&completed_session(&c, "Ada Lovelace"), &c, &ctx()).unwrap();

    let roles: Vec<BlockRole> = doc.blocks.iter().map(|b| b.role).collect();
    assert_eq!(roles, vec![
      BlockRole::Title,
      BlockRole::CertifyCaption,
      BlockRole::LearnerName,
      BlockRole::CompletedCaption,
      BlockRole::CourseTitle,
      BlockRole::OfferedBy,
      BlockRole::Duration,
      BlockRole::TotalHours,
      BlockRole::CourseId,
      BlockRole::Description,
      BlockRole::IssueDate,
      BlockRole::CertificateId,
      BlockRole::VerificationNote,
      BlockRole::InstructorSignature,
      BlockRole::InstitutionSignature,
    ]);
  }

  #[test]
  fn cursor_accumulates_line_heights() {
    let c = course(1);
    let doc = engine().issue(&completed_session(&c, "Ada"), &c, &ctx()).unwrap();

    let flowing: Vec<&TextBlock> = doc.flowing_blocks().collect();
    assert_eq!(flowing[0].y, 80.0);
    for pair in flowing.windows(2) {
      let (prev, next) = (pair[0], pair[1]);
      let mut expected =
        prev.y + prev.line_count() as f32 * prev.font.line_height() + prev.font.spacing();
      if prev.role == BlockRole::CourseId {
        expected += engine().config().section_gap;
      }
      assert_eq!(next.y, expected, "{:?} after {:?}", next.role, prev.role);
    }

    // Single-line header blocks: 80 → 130 → 165 → 205 → 240.
    let ys: Vec<f32> = flowing.iter().take(5).map(|b| b.y).collect();
    assert_eq!(ys, vec![80.0, 130.0, 165.0, 205.0, 240.0]);
  }

  #[test]
  fn long_name_wraps_and_pushes_content_down() {
    let c = course(1);
    let short = engine().issue(&completed_session(&c, "Ada"), &c, &ctx()).unwrap();
    let long_name = "Augusta Ada King Countess of Lovelace ".repeat(4);
    let long = engine().issue(&completed_session(&c, &long_name), &c, &ctx()).unwrap();

    let name = long.block(BlockRole::LearnerName).unwrap();
    assert!(name.line_count() > 1);
    for (i, line) in name.lines.iter().enumerate() {
      assert_eq!(line.y, name.y + i as f32 * FontTier::Name.line_height());
    }

    let shift = (name.line_count() - 1) as f32 * FontTier::Name.line_height();
    let before = short.block(BlockRole::CourseTitle).unwrap().y;
    let after = long.block(BlockRole::CourseTitle).unwrap().y;
    assert_eq!(after, before + shift);

    // Signatures hang from the bottom regardless.
    assert_eq!(
      long.block(BlockRole::InstructorSignature).unwrap().y,
      short.block(BlockRole::InstructorSignature).unwrap().y
    );
  }

  #[test]
  fn wrapped_lines_fit_usable_width() {
    let mut c = course(1);
    c.description = "Ownership, borrowing and lifetimes explained with many worked examples. ".repeat(6);
    let e = engine();
    let doc = e.issue(&completed_session(&c, "Ada"), &c, &ctx()).unwrap();

    let desc = doc.block(BlockRole::Description).unwrap();
    assert!(desc.line_count() > 1);
    assert_eq!(desc.anchor, Anchor::Left);
    assert_eq!(desc.x, 60.0);
    for line in &desc.lines {
      let width = Helvetica.text_width(&line.text, FontTier::Body.size()) / e.config().points_per_unit;
      assert!(width <= e.usable_width(), "{width} > {}", e.usable_width());
    }
  }

  #[test]
  fn defaults_fill_missing_fields() {
    let mut c = Course::new(Uuid::new_v4(), "Rust Basics", "  ", vec![Video::new("a", "a.mp4")]);
    c.grade = Some("   ".into());
    let doc = engine().issue(&completed_session(&c, ""), &c, &ctx()).unwrap();

    assert_eq!(doc.block(BlockRole::LearnerName).unwrap().text(), "Student");
    assert_eq!(doc.block(BlockRole::Duration).unwrap().text(), "Course Duration: N/A \u{2013} N/A");
    assert_eq!(doc.block(BlockRole::TotalHours).unwrap().text(), "Total Hours: N/A");
    assert!(doc.block(BlockRole::Grade).is_none());

    let desc = doc.block(BlockRole::Description).unwrap().text().replace('\n', " ");
    assert!(desc.contains("comprehensive training on Rust Basics"));
    assert!(desc.contains("By completing this course, Student has demonstrated"));

    let instructor = doc.block(BlockRole::InstructorSignature).unwrap();
    assert_eq!(instructor.lines[1].text, "Course Instructor");

    for block in &doc.blocks {
      assert!(block.lines.iter().any(|l| !l.text.trim().is_empty()), "{:?} is empty", block.role);
    }
  }

  #[test]
  fn duration_label_stands_in_for_hours() {
    let mut c = course(1);
    c.total_hours = None;
    c.duration = "6 weeks".into();
    let doc = engine().issue(&completed_session(&c, "Ada"), &c, &ctx()).unwrap();
    assert_eq!(doc.block(BlockRole::TotalHours).unwrap().text(), "Total Hours: 6 weeks");
  }

  #[test]
  fn grade_line_is_added_when_present() {
    let mut c = course(1);
    c.grade = Some("A".into());
    let doc = engine().issue(&completed_session(&c, "Ada"), &c, &ctx()).unwrap();
    assert_eq!(doc.block(BlockRole::Grade).unwrap().text(), "Grade/Score: A");
  }

  #[test]
  fn metadata_uses_configured_date_format_and_issuer() {
    let config = LayoutConfig {
      date_format: "%d/%m/%Y".into(),
      issuer: Issuer { organization: "Ferris U".into(), signatory_title: "Dean".into() },
      ..LayoutConfig::default()
    };
    let c = course(1);
    let doc = LayoutEngine::new(config).issue(&completed_session(&c, "Ada"), &c, &ctx()).unwrap();

    assert_eq!(doc.block(BlockRole::Duration).unwrap().text(), "Course Duration: 08/01/2024 \u{2013} 29/03/2024");
    assert_eq!(doc.block(BlockRole::IssueDate).unwrap().text(), "Issued on: 02/04/2024");
    assert_eq!(doc.block(BlockRole::OfferedBy).unwrap().text(), "Offered by: Ferris U");
    assert_eq!(doc.block(BlockRole::InstitutionSignature).unwrap().lines[1].text, "Dean, Ferris U");
  }

  #[test]
  fn invalid_date_format_is_reported() {
    let config = LayoutConfig { date_format: "%Q %Y".into(), ..LayoutConfig::default() };
    let c = course(1);
    let err = LayoutEngine::new(config)
      .issue(&completed_session(&c, "Ada"), &c, &ctx())
      .unwrap_err();
    assert!(matches!(err, Error::DateFormat(ref f) if f == "%Q %Y"));
  }

  #[test]
  fn signatures_hang_from_the_bottom() {
    let c = course(1);
    let e = engine();
    let doc = e.issue(&completed_session(&c, "Ada"), &c, &ctx()).unwrap();
    let cfg = e.config();

    let instructor = doc.block(BlockRole::InstructorSignature).unwrap();
    let institution = doc.block(BlockRole::InstitutionSignature).unwrap();
    assert_eq!(instructor.y, cfg.canvas.height - 90.0);
    assert_eq!(instructor.x, cfg.margin);
    assert_eq!(institution.x, cfg.canvas.width - cfg.margin - 140.0);
    assert_eq!(instructor.lines[1].y, instructor.y + 20.0);
    assert_eq!(instructor.lines[0].text, SIGNATURE_RULE);
    assert!(doc.flow_end < instructor.y);
  }

  #[test]
  fn layout_is_deterministic() {
    let c = course(3);
    let session = completed_session(&c, "Ada Lovelace");
    let a = engine().issue(&session, &c, &ctx()).unwrap();
    let b = engine().issue(&session, &c, &ctx()).unwrap();
    assert_eq!(a, b);

    // A different timestamp changes the id and date text, never the geometry.
    let later = IssueContext::at(Utc.with_ymd_and_hms(2024, 4, 3, 10, 0, 0).unwrap());
    let c2 = engine().issue(&session, &c, &later).unwrap();
    assert_ne!(a.certificate_id, c2.certificate_id);
    let geometry = |d: &CertificateDocument| {
      d.blocks
        .iter()
        .map(|b| (b.role, b.x, b.y, b.line_count()))
        .collect::<Vec<_>>()
    };
    assert_eq!(geometry(&a), geometry(&c2));
  }

  #[test]
  fn injected_id_is_used_verbatim() {
    let c = course(1);
    let ctx = ctx().with_id(CertificateId::new("FIXED-1"));
    let doc = engine().issue(&completed_session(&c, "Ada"), &c, &ctx).unwrap();
    assert_eq!(doc.certificate_id.as_str(), "FIXED-1");
    assert_eq!(doc.block(BlockRole::CertificateId).unwrap().text(), "Certificate ID: FIXED-1");
  }

  #[test]
  fn ineligible_learner_is_refused() {
    let c = course(3);
    let mut session = Session::open(Learner::new(Uuid::new_v4(), "Ada"));
    let tracker = ProgressTracker::for_course(&c);
    let record = tracker
      .mark_completed(&ProgressRecord::new(session.learner_id(), c.course_id), 0)
      .unwrap();
    session.sync(record);

    let err = engine().issue(&session, &c, &ctx()).unwrap_err();
    assert!(matches!(
      err,
      Error::Core(coursemark_core::Error::NotEligible { completed: 1, video_count: 3 })
    ));
  }

  #[test]
  fn zero_video_course_is_refused() {
    let c = course(0);
    let session = Session::open(Learner::new(Uuid::new_v4(), "Ada"));
    assert!(matches!(
      engine().issue(&session, &c, &ctx()),
      Err(Error::Core(coursemark_core::Error::NotEligible { .. }))
    ));
  }

  #[test]
  fn proof_for_another_course_is_rejected() {
    let a = course(1);
    let b = course(1);
    let session = completed_session(&a, "Ada");
    let proof = EligibilityGate::check(&a, session.progress(a.course_id).unwrap()).unwrap();
    let err = engine().layout(&proof, &b, session.learner(), &ctx()).unwrap_err();
    assert!(matches!(err, Error::ProofMismatch));
  }

  #[test]
  fn file_stem_is_path_safe() {
    assert_eq!(file_stem("Rust/Go: a tour"), "Rust_Go_ a tour-Certificate");
  }
}
