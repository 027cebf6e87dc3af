use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::normalizer::NormalizedText;
use crate::vocab::{fold_accents, mostly_uppercase, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLabel {
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Certifications,
    Projects,
    Hobbies,
    Unknown,
}

impl SectionLabel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Skills => "skills",
            Self::Languages => "languages",
            Self::Certifications => "certifications",
            Self::Projects => "projects",
            Self::Hobbies => "hobbies",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBlock {
    pub label: SectionLabel,
    pub text: String,
}

impl SectionBlock {
    #[must_use]
    pub fn new(label: SectionLabel, text: String) -> Self {
        Self { label, text }
    }
}

/// Labeled, non-overlapping blocks in document order. Concatenating all
/// block texts reconstructs the normalized text minus heading lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    blocks: Vec<SectionBlock>,
}

impl SectionMap {
    #[must_use]
    pub fn new(blocks: Vec<SectionBlock>) -> Self {
        Self { blocks }
    }

    #[must_use]
    pub fn blocks(&self) -> &[SectionBlock] {
        &self.blocks
    }

    /// Text of the first block carrying `label`, if any.
    #[must_use]
    pub fn get(&self, label: SectionLabel) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.text.as_str())
    }

    /// Joined text of every block carrying `label`. A resume can repeat a
    /// heading (one per employer, say); all of it belongs to the section.
    #[must_use]
    pub fn text_for(&self, label: SectionLabel) -> Option<String> {
        let parts: Vec<&str> = self
            .blocks
            .iter()
            .filter(|b| b.label == label)
            .map(|b| b.text.as_str())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }

    #[must_use]
    pub fn contains(&self, label: SectionLabel) -> bool {
        self.blocks.iter().any(|b| b.label == label)
    }

    /// Number of distinct known (non-Unknown) sections detected.
    #[must_use]
    pub fn detected_count(&self) -> usize {
        let mut seen = Vec::new();
        for block in &self.blocks {
            if block.label != SectionLabel::Unknown && !seen.contains(&block.label) {
                seen.push(block.label);
            }
        }
        seen.len()
    }

    /// True when no heading was detected anywhere; extractors then scan
    /// the full text instead of section blocks.
    #[must_use]
    pub fn is_unsegmented(&self) -> bool {
        self.blocks.iter().all(|b| b.label == SectionLabel::Unknown)
    }
}

/// Splits normalized text into labeled blocks using heading heuristics:
/// a heading is a short, mostly uppercase or capitalized line matching
/// the heading vocabulary (exactly after accent folding, or fuzzily to
/// tolerate OCR damage). First matching vocabulary wins.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    vocab: Arc<Vocabulary>,
    max_heading_chars: usize,
    fuzzy_threshold: f64,
}

impl SectionSegmenter {
    #[must_use]
    pub fn new(vocab: Arc<Vocabulary>) -> Self {
        Self {
            vocab,
            max_heading_chars: 48,
            fuzzy_threshold: 0.88,
        }
    }

    #[must_use]
    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    #[must_use]
    pub fn segment(&self, text: &NormalizedText) -> SectionMap {
        let mut blocks = Vec::new();
        let mut label = SectionLabel::Unknown;
        let mut buf: Vec<&str> = Vec::new();
        let mut saw_content = false;

        for line in text.lines() {
            if let Some((matched, inline_rest)) = self.match_heading(line) {
                if label != SectionLabel::Unknown || saw_content {
                    blocks.push(SectionBlock::new(label, join_block(&buf)));
                }
                label = matched;
                buf.clear();
                saw_content = false;
                if let Some(rest) = inline_rest {
                    buf.push(rest);
                    saw_content = true;
                }
            } else {
                if !line.trim().is_empty() {
                    saw_content = true;
                }
                buf.push(line);
            }
        }

        if label != SectionLabel::Unknown || saw_content {
            blocks.push(SectionBlock::new(label, join_block(&buf)));
        }

        if blocks.iter().all(|b| b.label == SectionLabel::Unknown) {
            tracing::debug!("no section headings detected; treating document as unsegmented");
        }

        SectionMap::new(blocks)
    }

    /// Returns the label and, for `HEADING: inline content` lines, the
    /// content after the colon.
    fn match_heading<'a>(&self, line: &'a str) -> Option<(SectionLabel, Option<&'a str>)> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (head, rest) = match trimmed.find(':') {
            Some(idx) => {
                let rest = trimmed[idx + 1..].trim();
                (trimmed[..idx].trim_end(), (!rest.is_empty()).then_some(rest))
            }
            None => (trimmed, None),
        };

        if head.is_empty() || head.chars().count() > self.max_heading_chars {
            return None;
        }
        if !heading_case(head) {
            return None;
        }

        let folded = fold_accents(&head.to_lowercase());
        let folded = folded.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'');

        for (label, terms) in &self.vocab.headings {
            for term in terms {
                if folded == *term {
                    return Some((*label, rest));
                }
                // Fuzzy match tolerates OCR-damaged headings; length must
                // stay close so prose cannot shadow a short term.
                let len = folded.chars().count();
                if len >= 4
                    && len.abs_diff(term.chars().count()) <= 3
                    && strsim::jaro_winkler(folded, term) >= self.fuzzy_threshold
                {
                    return Some((*label, rest));
                }
            }
        }

        None
    }
}

/// Mostly uppercase, or title-case starting with a capital. Lowercase
/// prose never reads as a heading.
fn heading_case(head: &str) -> bool {
    if mostly_uppercase(head) {
        return true;
    }
    head.chars()
        .find(|c| c.is_alphabetic())
        .is_some_and(char::is_uppercase)
}

fn join_block(lines: &[&str]) -> String {
    lines.join("\n")
}
