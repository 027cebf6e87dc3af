use std::fmt;

use crate::vocab::mostly_uppercase;

/// Minimum number of characters a document must carry before extraction
/// is attempted. Below this the input is treated as an extraction failure
/// upstream (blank PDF, OCR produced nothing usable).
pub const MIN_TEXT_LENGTH: usize = 20;

/// Cleaned text ready for segmentation. Guaranteed free of control
/// characters and runs of blank lines; line structure that carries
/// section boundaries is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.lines()
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cleans raw extracted text: strips OCR control noise, collapses
/// whitespace within lines, merges wrapped prose lines, and caps blank
/// runs at a single blank line.
///
/// Fails softly: input below the minimum length yields an empty
/// `NormalizedText` and the caller records a low-text condition.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    min_length: usize,
}

impl TextNormalizer {
    #[must_use]
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    #[must_use]
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        if raw.chars().count() < self.min_length {
            return NormalizedText::default();
        }

        let stripped: String = raw.chars().filter(|c| !is_discarded(*c)).collect();

        let collapsed: Vec<String> = stripped.lines().map(collapse_whitespace).collect();
        let merged = merge_wrapped_lines(&collapsed);

        let mut lines: Vec<&str> = Vec::with_capacity(merged.len());
        let mut blank_run = 0usize;
        for line in &merged {
            if line.is_empty() {
                blank_run += 1;
                if blank_run == 1 && !lines.is_empty() {
                    lines.push("");
                }
            } else {
                blank_run = 0;
                lines.push(line);
            }
        }
        while lines.last() == Some(&"") {
            lines.pop();
        }

        let text = lines.join("\n");
        if text.chars().count() < self.min_length {
            NormalizedText::default()
        } else {
            NormalizedText(text)
        }
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(MIN_TEXT_LENGTH)
    }
}

/// Control characters introduced by encoding mismatches. Keeps `\n` and
/// `\t`; accented letters and hyphens pass through untouched.
fn is_discarded(c: char) -> bool {
    (c.is_control() && c != '\n' && c != '\t') || c == '\u{fffd}'
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A line break followed by a capitalized word or a bullet marker is a
/// logical boundary and stays. A lowercase continuation of an already
/// sentence-length line is a wrap artifact and is merged back.
fn merge_wrapped_lines(lines: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    for line in lines {
        match out.last_mut() {
            Some(prev) if should_merge(prev, line) => {
                prev.push(' ');
                prev.push_str(line);
            }
            _ => out.push(line.clone()),
        }
    }

    out
}

fn should_merge(prev: &str, line: &str) -> bool {
    if prev.is_empty() || line.is_empty() {
        return false;
    }
    let Some(first) = line.chars().next() else {
        return false;
    };
    if !first.is_alphabetic() || !first.is_lowercase() {
        return false;
    }
    if prev.ends_with(':') {
        return false;
    }
    // A short mostly-uppercase line is a heading candidate and must keep
    // its own line for the segmenter.
    if prev.chars().count() <= 48 && mostly_uppercase(prev) {
        return false;
    }
    prev.chars().count() >= 40
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_short_input() {
        let normalizer = TextNormalizer::default();

        assert!(normalizer.normalize("").is_empty());
        assert!(normalizer.normalize("   \n \t ").is_empty());
        assert!(normalizer.normalize("too short").is_empty());
    }

    #[test]
    fn test_strips_control_characters() {
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize("Jean\u{0} Dupont\u{7f} is a software engineer\u{b}.");

        assert_eq!(text.as_str(), "Jean Dupont is a software engineer.");
    }

    #[test]
    fn test_keeps_accents_and_hyphens() {
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize("Anne-Sophie Müller\nDéveloppeuse à Paris");

        assert!(text.as_str().contains("Anne-Sophie Müller"));
        assert!(text.as_str().contains("Développeuse à Paris"));
    }

    #[test]
    fn test_collapses_blank_runs() {
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize("First paragraph here\n\n\n\n\nSecond paragraph here");

        assert_eq!(text.as_str(), "First paragraph here\n\nSecond paragraph here");
    }

    #[test]
    fn test_merges_wrapped_prose() {
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize(
            "Seasoned engineer with ten years of experience building\ndistributed systems.",
        );

        assert_eq!(
            text.as_str(),
            "Seasoned engineer with ten years of experience building distributed systems."
        );
    }

    #[test]
    fn test_preserves_capitalized_and_bullet_lines() {
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize(
            "A long enough first line that could be wrapped over\nNew Entry Starts Here\n- bullet point",
        );

        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_short_lowercase_lines_stay_separate() {
        // Skill lists written one item per line must not collapse.
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize("SKILLS\npython\njava\nreact");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["SKILLS", "python", "java", "react"]);
    }

    #[test]
    fn test_heading_followed_by_lowercase_is_preserved() {
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize("EXPERIENCE PROFESSIONNELLE COMPLETE DETAILLEE\ndes missions variées");

        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_collapses_inner_whitespace() {
        let normalizer = TextNormalizer::default();
        let text = normalizer.normalize("Jean    Dupont\t\tEngineer at  Example Corp");

        assert_eq!(text.as_str(), "Jean Dupont Engineer at Example Corp");
    }
}
