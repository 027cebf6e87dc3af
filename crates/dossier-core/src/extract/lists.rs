use regex::Regex;

use super::normalizer::NormalizedText;
use super::patterns::keyword_scanner;
use super::segmenter::{SectionLabel, SectionMap};
use crate::vocab::Vocabulary;

/// Maximum skills kept after deduplication.
const MAX_SKILLS: usize = 20;

/// Case-insensitive deduplication preserving first-seen casing and
/// insertion order.
#[derive(Debug, Default)]
pub struct Dedup {
    keys: Vec<String>,
    items: Vec<String>,
}

impl Dedup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: String) {
        let key = item.to_lowercase();
        if !self.keys.contains(&key) {
            self.keys.push(key);
            self.items.push(item);
        }
    }

    #[must_use]
    pub fn into_items(self) -> Vec<String> {
        self.items
    }
}

/// Delimiter-split extraction for skills, languages, certifications and
/// hobbies. Skills additionally cross-reference the technical keyword
/// vocabulary over the whole document.
#[derive(Debug, Clone)]
pub struct ListExtractor {
    tech_scanner: Option<Regex>,
}

impl ListExtractor {
    pub fn new(vocab: &Vocabulary) -> Result<Self, regex::Error> {
        Ok(Self {
            tech_scanner: keyword_scanner(&vocab.technical_keywords)?,
        })
    }

    #[must_use]
    pub fn skills(&self, text: &NormalizedText, sections: &SectionMap) -> Vec<String> {
        let mut dedup = Dedup::new();

        if let Some(block) = sections.text_for(SectionLabel::Skills) {
            for item in split_items(&block) {
                dedup.push(item);
            }
        }

        // Keywords mentioned anywhere in the document count as skills
        // even without a dedicated section.
        if let Some(scanner) = &self.tech_scanner {
            for m in scanner.find_iter(text.as_str()) {
                dedup.push(m.as_str().to_string());
            }
        }

        let mut items = dedup.into_items();
        items.truncate(MAX_SKILLS);
        items
    }

    /// Section-scoped list extraction; a missing section yields an empty
    /// sequence rather than a guess.
    #[must_use]
    pub fn section_items(&self, sections: &SectionMap, label: SectionLabel) -> Vec<String> {
        let Some(block) = sections.text_for(label) else {
            tracing::debug!(section = %label, "section not found, empty list");
            return Vec::new();
        };

        let mut dedup = Dedup::new();
        for item in split_items(&block) {
            dedup.push(item);
        }
        dedup.into_items()
    }
}

/// Splits a section block on common list delimiters: commas, semicolons,
/// pipes, bullets, and line breaks.
fn split_items(block: &str) -> Vec<String> {
    block
        .split([',', ';', '|', '•', '·', '\n'])
        .map(clean_item)
        .filter(|item| item.chars().count() > 1)
        .collect()
}

fn clean_item(raw: &str) -> String {
    raw.trim()
        .trim_start_matches(['-', '–', '*', ' '])
        .trim_end_matches('.')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::extract::normalizer::TextNormalizer;
    use crate::extract::segmenter::SectionSegmenter;

    fn extract(input: &str) -> (NormalizedText, SectionMap, ListExtractor) {
        let text = TextNormalizer::default().normalize(input);
        let vocab = Vocabulary::default();
        let sections = SectionSegmenter::new(Arc::new(vocab.clone())).segment(&text);
        (text, sections, ListExtractor::new(&vocab).unwrap())
    }

    #[test]
    fn test_skills_from_inline_section() {
        let (text, sections, extractor) = extract("Header line here\nSKILLS: Python; Java; React");

        assert_eq!(extractor.skills(&text, &sections), vec!["Python", "Java", "React"]);
    }

    #[test]
    fn test_skills_dedup_keeps_first_casing() {
        let (text, sections, extractor) =
            extract("Header line here\nSKILLS\nPython, python, PYTHON, Java");

        assert_eq!(extractor.skills(&text, &sections), vec!["Python", "Java"]);
    }

    #[test]
    fn test_skills_found_outside_section() {
        let (text, sections, extractor) = extract(
            "Jean Dupont\nEXPERIENCE\nDeveloper - Acme - 2020\n- built services in Rust and Docker on Linux",
        );

        let skills = extractor.skills(&text, &sections);
        assert_eq!(skills, vec!["Rust", "Docker", "Linux"]);
    }

    #[test]
    fn test_skills_capped_at_twenty() {
        let many: Vec<String> = (0..30).map(|i| format!("Skill{i}")).collect();
        let input = format!("Header line here\nSKILLS\n{}", many.join(", "));
        let (text, sections, extractor) = extract(&input);

        assert_eq!(extractor.skills(&text, &sections).len(), 20);
    }

    #[test]
    fn test_bullet_list_items() {
        let (text, sections, extractor) =
            extract("Header line here\nLANGUAGES\n- French (Native)\n- English (Fluent)");

        assert_eq!(
            extractor.section_items(&sections, SectionLabel::Languages),
            vec!["French (Native)", "English (Fluent)"]
        );
        drop(text);
    }

    #[test]
    fn test_missing_section_is_empty_not_guessed() {
        let (text, sections, extractor) =
            extract("Jean speaks French and English fluently every day at work.");

        assert!(extractor.section_items(&sections, SectionLabel::Languages).is_empty());
        drop(text);
    }

    #[test]
    fn test_empty_keyword_vocabulary_adds_no_blank_skills() {
        let mut vocab = Vocabulary::default();
        vocab.technical_keywords = Vec::new();

        let text = TextNormalizer::default().normalize("Header line here\nSKILLS: Python; Java");
        let sections = SectionSegmenter::new(Arc::new(vocab.clone())).segment(&text);
        let extractor = ListExtractor::new(&vocab).unwrap();

        let skills = extractor.skills(&text, &sections);
        assert_eq!(skills, vec!["Python", "Java"]);
        assert!(skills.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_certifications_split() {
        let (text, sections, extractor) =
            extract("Header line here\nCERTIFICATIONS: AWS Solutions Architect; Scrum Master");

        assert_eq!(
            extractor.section_items(&sections, SectionLabel::Certifications),
            vec!["AWS Solutions Architect", "Scrum Master"]
        );
        drop(text);
    }
}
