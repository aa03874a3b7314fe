//! Greedy line wrapping against the static width tables.
//!
//! Explicit newlines always break; each source line is wrapped on its own and
//! blank lines are kept so the composed text keeps its section spacing.

use crate::layout::font_metrics::FontMetricTable;

/// Wraps `text` into lines no wider than `max_width_pt` at `font_size_pt`.
///
/// Words are separated by single spaces on output; a source line's leading
/// indentation is kept. A word wider than the whole line is split between
/// characters. Returns one entry per printed line.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    font_size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let max_width = max_width_pt / font_size_pt; // em units
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let source_line = source_line.trim_end_matches('\r');
        let words: Vec<&str> = source_line.split_whitespace().collect();
        if words.is_empty() {
            lines.push(String::new());
            continue;
        }

        // Leading indentation stays on the first printed line of the source line.
        let indent = leading_indent(source_line);
        let indent_w = metrics.measure_str(&indent);
        let (mut current, mut current_width) = if indent_w < max_width {
            (indent, indent_w)
        } else {
            (String::new(), 0.0)
        };
        let mut has_word = false;

        for word in words {
            let word_w = metrics.measure_str(word);

            if word_w > max_width {
                if has_word {
                    lines.push(std::mem::take(&mut current));
                }
                let (mut pieces, tail_width) = split_long_word(word, metrics, max_width);
                current = pieces.pop().unwrap_or_default();
                current_width = tail_width;
                lines.extend(pieces);
                has_word = true;
                continue;
            }

            if !has_word {
                if current_width + word_w > max_width {
                    // The indent leaves no room for the first word.
                    current.clear();
                    current_width = 0.0;
                }
                current.push_str(word);
                current_width += word_w;
                has_word = true;
            } else if current_width + metrics.space_width + word_w > max_width {
                // Current line is full, so push it and start a new line with this word.
                lines.push(std::mem::replace(&mut current, word.to_string()));
                current_width = word_w;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += metrics.space_width + word_w;
            }
        }
        lines.push(current);
    }

    lines
}

/// Leading whitespace of a source line, with tabs expanded to four spaces.
fn leading_indent(line: &str) -> String {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .flat_map(|c| {
            let n = if c == '\t' { 4 } else { 1 };
            std::iter::repeat(' ').take(n)
        })
        .collect()
}

/// Breaks an over-long word into chunks that each fit `max_width` (em).
/// Returns the chunks and the width of the last one.
fn split_long_word(word: &str, metrics: &FontMetricTable, max_width: f32) -> (Vec<String>, f32) {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width = 0.0_f32;

    for c in word.chars() {
        let w = metrics.char_width(c);
        if !piece.is_empty() && width + w > max_width {
            pieces.push(std::mem::take(&mut piece));
            width = 0.0;
        }
        piece.push(c);
        width += w;
    }
    pieces.push(piece);
    (pieces, width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{get_metrics, FontFace};

    const SIZE: f32 = 11.0;

    fn helvetica() -> &'static FontMetricTable {
        get_metrics(FontFace::Helvetica)
    }

    #[test]
    fn test_short_line_is_unchanged() {
        let lines = wrap_text("Rust engineer", helvetica(), SIZE, 500.0);
        assert_eq!(lines, vec!["Rust engineer"]);
    }

    #[test]
    fn test_explicit_newlines_and_blank_lines_preserved() {
        let lines = wrap_text("\nJane\n\nSkills:\nRust", helvetica(), SIZE, 500.0);
        assert_eq!(lines, vec!["", "Jane", "", "Skills:", "Rust"]);
    }

    #[test]
    fn test_whitespace_only_line_becomes_blank() {
        let lines = wrap_text("a\n    ", helvetica(), SIZE, 500.0);
        assert_eq!(lines, vec!["a", ""]);
    }

    #[test]
    fn test_crlf_is_treated_as_newline() {
        let lines = wrap_text("one\r\ntwo", helvetica(), SIZE, 500.0);
        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_long_paragraph_wraps_within_width() {
        let text = "Architected a distributed caching layer using Redis and consistent hashing, \
                    reducing p99 latency by forty percent under fifty thousand requests per second";
        let max_width_pt = 200.0;
        let lines = wrap_text(text, helvetica(), SIZE, max_width_pt);

        assert!(lines.len() > 1, "expected wrapping, got {lines:?}");
        for line in &lines {
            let width = helvetica().measure_pt(line, SIZE);
            assert!(width <= max_width_pt + 1e-3, "{line:?} is {width}pt wide");
        }
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_overlong_word_is_split_by_characters() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, helvetica(), SIZE, 100.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(helvetica().measure_pt(line, SIZE) <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn test_word_after_overlong_word_continues_last_chunk() {
        let long = "y".repeat(60);
        let lines = wrap_text(&format!("{long} ok"), helvetica(), SIZE, 100.0);
        assert!(lines.last().unwrap().ends_with(" ok") || lines.last().unwrap() == "ok");
        assert_eq!(lines.concat().replace(' ', ""), format!("{long}ok"));
    }

    #[test]
    fn test_leading_indentation_is_kept() {
        let lines = wrap_text("Skills:\n  - indented bullet", helvetica(), SIZE, 500.0);
        assert_eq!(lines, vec!["Skills:", "  - indented bullet"]);
    }

    #[test]
    fn test_tab_indent_expands_to_spaces() {
        let lines = wrap_text("\t- item", helvetica(), SIZE, 500.0);
        assert_eq!(lines, vec!["    - item"]);
    }

    #[test]
    fn test_indent_only_on_first_wrapped_line() {
        let text = "    one two three four five six seven eight nine ten eleven twelve";
        let max_width_pt = 120.0;
        let lines = wrap_text(text, helvetica(), SIZE, max_width_pt);

        assert!(lines.len() > 1, "expected wrapping, got {lines:?}");
        assert!(lines[0].starts_with("    one"));
        assert!(lines[1..].iter().all(|line| !line.starts_with(' ')));
        for line in &lines {
            assert!(helvetica().measure_pt(line, SIZE) <= max_width_pt + 1e-3);
        }
    }

    #[test]
    fn test_empty_text_is_one_blank_line() {
        assert_eq!(wrap_text("", helvetica(), SIZE, 100.0), vec![""]);
    }
}
