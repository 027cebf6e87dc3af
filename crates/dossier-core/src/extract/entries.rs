use std::sync::Arc;

use super::normalizer::NormalizedText;
use super::patterns::PatternSet;
use super::segmenter::{SectionLabel, SectionMap};
use crate::record::{EducationEntry, ExperienceEntry};

/// Entry before it is shaped into an experience or education record:
/// head line split into primary/secondary, the date part, and collected
/// description lines.
#[derive(Debug, Default)]
struct RawEntry {
    head: String,
    secondary: Option<String>,
    period: Option<String>,
    description: Vec<String>,
}

/// Parses experience and education section blocks into entries.
///
/// Entry starts are lines carrying a date range, or the first line of a
/// section block; description lines accumulate until the next start.
/// When the document has no headings at all, the whole text is scanned
/// and only dated lines open entries.
#[derive(Debug, Clone)]
pub struct EntryExtractor {
    patterns: Arc<PatternSet>,
}

impl EntryExtractor {
    #[must_use]
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn experience(&self, text: &NormalizedText, sections: &SectionMap) -> Vec<ExperienceEntry> {
        self.parse_scope(text, sections, SectionLabel::Experience)
            .into_iter()
            .map(|raw| ExperienceEntry {
                title: Some(raw.head),
                company: raw.secondary,
                period: raw.period,
                description: raw.description,
            })
            .collect()
    }

    #[must_use]
    pub fn education(&self, text: &NormalizedText, sections: &SectionMap) -> Vec<EducationEntry> {
        self.parse_scope(text, sections, SectionLabel::Education)
            .into_iter()
            .map(|raw| EducationEntry {
                degree: Some(raw.head),
                institution: raw.secondary,
                year: raw.period,
                description: raw.description,
            })
            .collect()
    }

    fn parse_scope(
        &self,
        text: &NormalizedText,
        sections: &SectionMap,
        label: SectionLabel,
    ) -> Vec<RawEntry> {
        if let Some(block) = sections.text_for(label) {
            self.parse_block(&block, true)
        } else if sections.is_unsegmented() {
            self.parse_block(text.as_str(), false)
        } else {
            tracing::debug!(section = %label, "section not found, no entries extracted");
            Vec::new()
        }
    }

    fn parse_block(&self, block: &str, scoped: bool) -> Vec<RawEntry> {
        let mut entries: Vec<RawEntry> = Vec::new();
        let mut current: Option<RawEntry> = None;

        for line in block.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if self.patterns.bullet.is_match(line) {
                let body = self.patterns.bullet.replace(line, "").trim().to_string();
                if body.is_empty() {
                    continue;
                }
                match current.as_mut() {
                    Some(cur) => cur.description.push(body),
                    // Block opens with bullets: the bullet itself has to
                    // carry the entry.
                    None if scoped => current = Some(self.new_entry(&body)),
                    None => {}
                }
                continue;
            }

            let has_date = self.patterns.date_range.is_match(line)
                || self.patterns.year.is_match(line);
            let len = line.chars().count();

            match current.as_mut() {
                None => {
                    let starts = if scoped {
                        true
                    } else {
                        self.patterns.date_range.is_match(line) || (has_date && len <= 90)
                    };
                    if starts {
                        current = Some(self.new_entry(line));
                    }
                }
                Some(cur) => {
                    if has_date && cur.period.is_none() && cur.description.is_empty() && len <= 40 {
                        // A short dated line right under the head is the
                        // entry's period, not a new entry.
                        cur.period = Some(line.to_string());
                    } else if has_date {
                        entries.extend(current.take());
                        current = Some(self.new_entry(line));
                    } else if cur.secondary.is_none() && cur.description.is_empty() && len < 100 {
                        cur.secondary = Some(line.to_string());
                    } else if !cur.description.is_empty() {
                        // Undated paragraph after bullets opens the next
                        // entry inside a section block.
                        if scoped {
                            entries.extend(current.take());
                            current = Some(self.new_entry(line));
                        } else {
                            entries.extend(current.take());
                        }
                    } else if scoped {
                        cur.description.push(line.to_string());
                    } else {
                        entries.extend(current.take());
                    }
                }
            }
        }

        entries.extend(current);
        entries
    }

    /// Splits a head line into title/organization/date. A line that does
    /// not split cleanly is kept whole as the head rather than dropped.
    fn new_entry(&self, line: &str) -> RawEntry {
        let mut entry = RawEntry::default();
        let mut remainder = line.to_string();

        if let Some(m) = self.patterns.date_range.find(line) {
            entry.period = Some(m.as_str().to_string());
            remainder = format!("{} {}", &line[..m.start()], &line[m.end()..]);
        }

        let mut parts = self.split_head(&remainder);

        if entry.period.is_none() {
            if let Some(idx) = parts.iter().position(|p| self.patterns.year.is_match(p)) {
                entry.period = Some(parts.remove(idx));
            }
        }

        if parts.is_empty() {
            tracing::warn!(line, "entry head did not split, keeping raw line");
            entry.head = line.to_string();
        } else {
            entry.head = parts.remove(0);
            if !parts.is_empty() {
                entry.secondary = Some(parts.join(" - "));
            }
        }

        entry
    }

    fn split_head(&self, line: &str) -> Vec<String> {
        let canonical = line
            .replace(" – ", " - ")
            .replace(" — ", " - ")
            .replace(" | ", " - ")
            .replace(" @ ", " - ");

        let parts: Vec<String> = canonical
            .split(" - ")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();

        if parts.len() > 1 {
            return parts;
        }

        let by_at: Vec<String> = self
            .patterns
            .at_separator
            .splitn(line, 2)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();

        if by_at.len() > 1 {
            by_at
        } else {
            parts
        }
    }
}
