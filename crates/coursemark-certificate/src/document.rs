//! The certificate document description.
//!
//! This is the engine's only output: every string is already wrapped and
//! every line already has its coordinates. A renderer draws it verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::CertificateId;

// ─── Geometry ────────────────────────────────────────────────────────────────

/// Page size in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
  pub width:  f32,
  pub height: f32,
}

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Decorative border drawn `inset` units inside the page edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
  pub inset:        f32,
  pub stroke_width: f32,
  pub color:        Rgb,
}

/// Horizontal alignment of a block relative to its `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
  /// `x` is the horizontal center of each line.
  Center,
  /// `x` is the left edge of each line.
  Left,
}

// ─── Typography ──────────────────────────────────────────────────────────────

/// Font-size tier. Each tier fixes its size, line height and the spacing
/// left below a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontTier {
  Title,
  Caption,
  Name,
  CourseTitle,
  Meta,
  Body,
  Footer,
}

impl FontTier {
  /// Font size in points.
  pub fn size(self) -> f32 {
    match self {
      Self::Title => 32.0,
      Self::Caption => 16.0,
      Self::Name => 24.0,
      Self::CourseTitle => 20.0,
      Self::Meta => 14.0,
      Self::Body | Self::Footer => 12.0,
    }
  }

  /// Baseline-to-baseline distance in layout units.
  pub fn line_height(self) -> f32 {
    match self {
      Self::Title => 36.0,
      Self::Caption | Self::Name => 20.0,
      Self::CourseTitle => 22.0,
      Self::Meta => 16.0,
      Self::Body | Self::Footer => 14.0,
    }
  }

  /// Gap left after a block of this tier.
  pub fn spacing(self) -> f32 {
    match self {
      Self::Title => 14.0,
      Self::Caption => 15.0,
      Self::Name | Self::CourseTitle => 20.0,
      Self::Meta => 5.0,
      Self::Body => 40.0,
      Self::Footer => 4.0,
    }
  }

  pub fn bold(self) -> bool { matches!(self, Self::Title) }
}

/// Color tier; the renderer gets both the tier and its RGB value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTier {
  Heading,
  Muted,
  Accent,
  Text,
  Highlight,
  Detail,
  Subtle,
}

impl ColorTier {
  pub fn rgb(self) -> Rgb {
    match self {
      Self::Heading => Rgb(30, 30, 120),
      Self::Muted => Rgb(80, 80, 80),
      Self::Accent => Rgb(0, 102, 204),
      Self::Text => Rgb(60, 60, 60),
      Self::Highlight => Rgb(180, 0, 80),
      Self::Detail => Rgb(50, 50, 50),
      Self::Subtle => Rgb(100, 100, 100),
    }
  }
}

// ─── Blocks ──────────────────────────────────────────────────────────────────

/// What a block says, independent of where it sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockRole {
  Title,
  CertifyCaption,
  LearnerName,
  CompletedCaption,
  CourseTitle,
  OfferedBy,
  Duration,
  TotalHours,
  CourseId,
  Grade,
  Description,
  IssueDate,
  CertificateId,
  VerificationNote,
  InstructorSignature,
  InstitutionSignature,
}

/// One wrapped line and its baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionedLine {
  pub text: String,
  pub y:    f32,
}

/// A positioned, pre-wrapped text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
  pub role:   BlockRole,
  pub anchor: Anchor,
  pub x:      f32,
  /// Baseline of the first line.
  pub y:      f32,
  pub font:   FontTier,
  pub color:  ColorTier,
  pub rgb:    Rgb,
  pub lines:  Vec<PositionedLine>,
}

impl TextBlock {
  pub fn line_count(&self) -> usize { self.lines.len() }

  /// The block's lines joined with `\n`.
  pub fn text(&self) -> String {
    self
      .lines
      .iter()
      .map(|l| l.text.as_str())
      .collect::<Vec<_>>()
      .join("\n")
  }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// A complete certificate description. Built per request and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateDocument {
  pub certificate_id: CertificateId,
  pub issued_at:      DateTime<Utc>,
  pub canvas:         Canvas,
  pub frame:          Frame,
  /// In drawing order: the flowing blocks first, then the two signatures.
  pub blocks:         Vec<TextBlock>,
  /// Where the flowing pass ended. Content past the signature lines would
  /// overlap them.
  pub flow_end:       f32,
  /// Suggested name for the rendered file.
  pub file_name:      String,
}

impl CertificateDocument {
  pub fn block(&self, role: BlockRole) -> Option<&TextBlock> {
    self.blocks.iter().find(|b| b.role == role)
  }

  /// Blocks other than the bottom-anchored signatures.
  pub fn flowing_blocks(&self) -> impl Iterator<Item = &TextBlock> {
    self.blocks.iter().filter(|b| {
      !matches!(b.role, BlockRole::InstructorSignature | BlockRole::InstitutionSignature)
    })
  }
}
