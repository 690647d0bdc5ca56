//! Text measurement.
//!
//! Widths are computed from per-glyph advance widths in font units (1/1000
//! em), the way PDF standard-14 fonts are described by their AFM files.

/// Supplies glyph advance widths for a font.
pub trait TextMetrics: Send + Sync {
  /// Advance width of `ch` in 1/1000 em.
  fn advance(&self, ch: char) -> u16;

  /// Width of `text` in points when set at `font_size` points.
  fn text_width(&self, text: &str, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(self.advance(c))).sum();
    units as f32 / 1000.0 * font_size
  }
}

/// Helvetica (regular) advance widths for printable ASCII, from the Adobe
/// standard-14 AFM. Anything outside the table uses the digit width.
#[derive(Debug, Clone, Copy, Default)]
pub struct Helvetica;

const FALLBACK_ADVANCE: u16 = 556;

#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
  // ' '  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
  278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
  // 0-9
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
  // :    ;    <    =    >    ?    @
  278, 278, 584, 584, 584, 556, 1015,
  // A-Z
  667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
  722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
  // [    \    ]    ^    _    `
  278, 278, 278, 469, 556, 333,
  // a-z
  556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
  556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
  // {    |    }    ~
  334, 260, 334, 584,
];

impl TextMetrics for Helvetica {
  fn advance(&self, ch: char) -> u16 {
    match ch {
      ' '..='~' => HELVETICA_ASCII[ch as usize - ' ' as usize],
      '\u{2013}' => 556, // en dash
      '\u{2014}' => 1000, // em dash
      '\u{2018}' | '\u{2019}' => 222,
      '\u{201C}' | '\u{201D}' => 333,
      _ => FALLBACK_ADVANCE,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_lines_up_with_ascii() {
    assert_eq!(Helvetica.advance(' '), 278);
    assert_eq!(Helvetica.advance('0'), 556);
    assert_eq!(Helvetica.advance('@'), 1015);
    assert_eq!(Helvetica.advance('A'), 667);
    assert_eq!(Helvetica.advance('W'), 944);
    assert_eq!(Helvetica.advance('i'), 222);
    assert_eq!(Helvetica.advance('m'), 833);
    assert_eq!(Helvetica.advance('~'), 584);
    assert_eq!(Helvetica.advance('é'), FALLBACK_ADVANCE);
  }

  #[test]
  fn width_scales_with_font_size() {
    // "Hi" = 722 + 222 units.
    assert!((Helvetica.text_width("Hi", 10.0) - 9.44).abs() < 1e-4);
    assert!((Helvetica.text_width("Hi", 20.0) - 18.88).abs() < 1e-4);
    assert_eq!(Helvetica.text_width("", 12.0), 0.0);
  }
}
