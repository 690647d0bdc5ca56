//! Greedy word wrapping against a width budget.

/// Split `text` into lines no wider than `max_width`, as measured by
/// `width_of`.
///
/// Explicit `\n` starts a new paragraph. Words are joined with single spaces;
/// a word that does not fit on a line by itself is broken between
/// characters. A single character wider than `max_width` still gets a line of
/// its own. The result always has at least one line.
pub fn wrap(text: &str, max_width: f32, width_of: impl Fn(&str) -> f32) -> Vec<String> {
  let mut lines = Vec::new();

  for paragraph in text.split('\n') {
    let mut current = String::new();

    for word in paragraph.split_whitespace() {
      let candidate = if current.is_empty() {
        word.to_owned()
      } else {
        format!("{current} {word}")
      };

      if width_of(&candidate) <= max_width {
        current = candidate;
        continue;
      }

      if !current.is_empty() {
        lines.push(std::mem::take(&mut current));
      }

      if width_of(word) <= max_width {
        current = word.to_owned();
      } else {
        let mut pieces = break_word(word, max_width, &width_of);
        current = pieces.pop().unwrap_or_default();
        lines.extend(pieces);
      }
    }

    lines.push(current);
  }

  lines
}

/// Break an over-long word into character runs that each fit.
fn break_word(word: &str, max_width: f32, width_of: &impl Fn(&str) -> f32) -> Vec<String> {
  let mut pieces = Vec::new();
  let mut piece = String::new();

  for ch in word.chars() {
    piece.push(ch);
    if width_of(&piece) > max_width && piece.chars().count() > 1 {
      piece.pop();
      pieces.push(std::mem::replace(&mut piece, ch.to_string()));
    }
  }
  pieces.push(piece);
  pieces
}
