use std::sync::Arc;

use regex::Regex;

use super::normalizer::NormalizedText;
use super::patterns::{labeled_line, PatternSet};
use super::segmenter::{SectionLabel, SectionMap};
use crate::record::{ContactInfo, PersonalInfo};
use crate::vocab::{fold_accents, Vocabulary};

/// How many leading lines count as the header region when hunting for a
/// name or an address.
const HEADER_LINES: usize = 6;

/// Locates the likely full name: a capitalized-words line near the top
/// of the document, filtered against the non-name stoplist.
#[derive(Debug, Clone)]
pub struct PersonalInfoExtractor {
    vocab: Arc<Vocabulary>,
    name_shape: Regex,
}

impl PersonalInfoExtractor {
    pub fn new(vocab: Arc<Vocabulary>) -> Result<Self, regex::Error> {
        Ok(Self {
            vocab,
            name_shape: Regex::new(r"^\p{Lu}[\w'’.\-]*(?:\s+\p{Lu}[\w'’.\-]*){1,3}$")?,
        })
    }

    #[must_use]
    pub fn extract(&self, text: &NormalizedText) -> PersonalInfo {
        let header: Vec<&str> = text.lines().take(HEADER_LINES).map(str::trim).collect();

        for line in &header {
            if self.disqualified(line) {
                continue;
            }
            if self.name_shape.is_match(line) {
                return PersonalInfo::new(Some((*line).to_string()));
            }
        }

        // No clean capitalized shape; settle for the first header line
        // that is not obviously something else.
        for line in &header {
            let len = line.chars().count();
            if (4..=60).contains(&len) && !self.disqualified(line) {
                return PersonalInfo::new(Some((*line).to_string()));
            }
        }

        tracing::debug!("no name candidate in header region");
        PersonalInfo::default()
    }

    fn disqualified(&self, line: &str) -> bool {
        if line.is_empty()
            || line.chars().any(|c| c.is_ascii_digit())
            || line.contains('@')
            || line.contains("http")
            || line.contains("www.")
            || line.contains('/')
            || line.contains(".com")
        {
            return true;
        }

        let folded = fold_accents(&line.to_lowercase());
        let folded = folded.trim_matches(|c: char| !c.is_alphanumeric());

        if self.vocab.name_stoplist.iter().any(|s| starts_term(folded, s)) {
            return true;
        }
        self.vocab
            .headings
            .iter()
            .flat_map(|(_, terms)| terms.iter())
            .any(|t| folded == *t)
    }
}

fn starts_term(folded: &str, term: &str) -> bool {
    folded == term
        || (folded.starts_with(term)
            && folded[term.len()..]
                .chars()
                .next()
                .is_some_and(|c| !c.is_alphanumeric()))
}

/// Independent regex searches across the whole text, one per channel;
/// each match is validated before acceptance and failure of one channel
/// never affects the others.
#[derive(Debug, Clone)]
pub struct ContactExtractor {
    patterns: Arc<PatternSet>,
}

impl ContactExtractor {
    #[must_use]
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn extract(&self, text: &NormalizedText) -> ContactInfo {
        let raw = text.as_str();

        ContactInfo {
            email: self.patterns.email.find(raw).map(|m| m.as_str().to_string()),
            phone: self.patterns.find_phone(raw).map(ToString::to_string),
            linkedin: self.patterns.linkedin.find(raw).map(|m| m.as_str().to_string()),
            github: self.patterns.github.find(raw).map(|m| m.as_str().to_string()),
            website: self.find_website(raw),
        }
    }

    /// First URL that is not a profile link already captured elsewhere.
    fn find_website(&self, raw: &str) -> Option<String> {
        self.patterns
            .website
            .find_iter(raw)
            .map(|m| m.as_str().trim_end_matches(['.', ',']))
            .find(|url| {
                let lower = url.to_lowercase();
                !lower.contains("linkedin.com") && !lower.contains("github.com")
            })
            .map(ToString::to_string)
    }
}

/// Searches the header region for a labeled address line, a
/// "Place, City, Region" comma shape, or a known locality keyword.
#[derive(Debug, Clone)]
pub struct AddressExtractor {
    vocab: Arc<Vocabulary>,
    labeled: Regex,
}

impl AddressExtractor {
    pub fn new(vocab: Arc<Vocabulary>) -> Result<Self, regex::Error> {
        let labeled = labeled_line(&vocab.address_labels)?;
        Ok(Self { vocab, labeled })
    }

    #[must_use]
    pub fn extract(&self, text: &NormalizedText) -> Option<String> {
        if let Some(caps) = self.labeled.captures(text.as_str()) {
            let value = caps.get(1).map_or("", |m| m.as_str()).trim();
            if value.chars().count() > 5 {
                return Some(value.to_string());
            }
        }

        for line in text.lines().take(HEADER_LINES + 4) {
            let line = line.trim();
            if comma_shaped(line) {
                return Some(line.to_string());
            }
        }

        for line in text.lines().take(HEADER_LINES + 4) {
            let line = line.trim();
            let folded = fold_accents(&line.to_lowercase());
            if line.chars().count() <= 80
                && !line.contains('@')
                && self
                    .vocab
                    .locality_keywords
                    .iter()
                    .any(|k| folded.contains(k))
            {
                return Some(line.to_string());
            }
        }

        None
    }
}

/// Prefers the summary section block; without one, falls back to the
/// first paragraph-length prose after the header region, skipping
/// contact-line noise.
#[derive(Debug, Clone)]
pub struct SummaryExtractor {
    patterns: Arc<PatternSet>,
}

impl SummaryExtractor {
    #[must_use]
    pub fn new(patterns: Arc<PatternSet>) -> Self {
        Self { patterns }
    }

    #[must_use]
    pub fn extract(&self, text: &NormalizedText, sections: &SectionMap) -> Option<String> {
        if let Some(block) = sections.text_for(SectionLabel::Summary) {
            let joined = join_prose(&block);
            if !joined.is_empty() {
                return Some(joined);
            }
        }

        let mut collected: Vec<&str> = Vec::new();
        for line in text.lines().skip(2).take(28) {
            let line = line.trim();
            if line.is_empty() || self.is_contact_noise(line) {
                if collected.is_empty() {
                    continue;
                }
                break;
            }
            if line.chars().count() >= 40 && !self.patterns.bullet.is_match(line) {
                collected.push(line);
                if collected.len() == 3 {
                    break;
                }
            } else if !collected.is_empty() {
                break;
            }
        }

        if collected.is_empty() {
            None
        } else {
            Some(collected.join(" "))
        }
    }

    fn is_contact_noise(&self, line: &str) -> bool {
        self.patterns.email.is_match(line)
            || self.patterns.website.is_match(line)
            || self.patterns.find_phone(line).is_some()
    }
}

/// "Place, City, Region" shape: a short line of three to five comma
/// separated segments, each at most a few words. Labeled lines and
/// comma-heavy prose carry longer segments or a colon and are rejected.
fn comma_shaped(line: &str) -> bool {
    if line.contains('@') || line.contains("http") || line.contains(':') {
        return false;
    }
    if !(10..=80).contains(&line.chars().count()) {
        return false;
    }

    let segments: Vec<&str> = line.split(',').map(str::trim).collect();
    (3..=5).contains(&segments.len())
        && segments
            .iter()
            .all(|s| !s.is_empty() && s.split_whitespace().count() <= 4)
}

fn join_prose(block: &str) -> String {
    block
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::normalizer::TextNormalizer;
    use crate::extract::segmenter::SectionSegmenter;

    fn normalize(input: &str) -> NormalizedText {
        TextNormalizer::default().normalize(input)
    }

    fn vocab() -> Arc<Vocabulary> {
        Arc::new(Vocabulary::default())
    }

    fn patterns() -> Arc<PatternSet> {
        Arc::new(PatternSet::compile().unwrap())
    }

    #[test]
    fn test_name_from_first_line() {
        let extractor = PersonalInfoExtractor::new(vocab()).unwrap();
        let text = normalize("Jean Dupont\njean@test.com\n+33 6 12 34 56 78");

        assert_eq!(extractor.extract(&text).full_name.as_deref(), Some("Jean Dupont"));
    }

    #[test]
    fn test_name_skips_document_titles() {
        let extractor = PersonalInfoExtractor::new(vocab()).unwrap();
        let text = normalize("CURRICULUM VITAE\nMarie-Claire Ngo Bassa\nmarie@test.com");

        assert_eq!(
            extractor.extract(&text).full_name.as_deref(),
            Some("Marie-Claire Ngo Bassa")
        );
    }

    #[test]
    fn test_name_absent_yields_none() {
        let extractor = PersonalInfoExtractor::new(vocab()).unwrap();
        let text = normalize("jean@test.com\n+237 650 973 231\ngithub.com/jdupont");

        assert!(extractor.extract(&text).full_name.is_none());
    }

    #[test]
    fn test_contact_channels_are_independent() {
        let extractor = ContactExtractor::new(patterns());
        let text = normalize(
            "Jean Dupont\njean@test.com\nlinkedin.com/in/jean-dupont\nno phone anywhere here",
        );

        let contact = extractor.extract(&text);
        assert_eq!(contact.email.as_deref(), Some("jean@test.com"));
        assert_eq!(contact.linkedin.as_deref(), Some("linkedin.com/in/jean-dupont"));
        assert!(contact.phone.is_none());
        assert!(contact.github.is_none());
    }

    #[test]
    fn test_website_excludes_profile_urls() {
        let extractor = ContactExtractor::new(patterns());
        let text = normalize(
            "Links: https://github.com/jdupont and https://jdupont.dev portfolio online",
        );

        let contact = extractor.extract(&text);
        assert_eq!(contact.github.as_deref(), Some("https://github.com/jdupont"));
        assert_eq!(contact.website.as_deref(), Some("https://jdupont.dev"));
    }

    #[test]
    fn test_labeled_address() {
        let extractor = AddressExtractor::new(vocab()).unwrap();
        let text = normalize("Jean Dupont\nAdresse: Yassa, Douala, Littoral\njean@test.com");

        assert_eq!(extractor.extract(&text).as_deref(), Some("Yassa, Douala, Littoral"));
    }

    #[test]
    fn test_comma_shape_address() {
        let extractor = AddressExtractor::new(vocab()).unwrap();
        let text = normalize("Jean Dupont\nAkwa, Douala, Cameroun\njean@test.com");

        assert_eq!(extractor.extract(&text).as_deref(), Some("Akwa, Douala, Cameroun"));
    }

    #[test]
    fn test_comma_heavy_prose_is_not_an_address() {
        let extractor = AddressExtractor::new(vocab()).unwrap();
        let text = normalize(
            "Jean Dupont\njean@test.com\nTechnologies used: Python, Java, React daily at work",
        );

        assert!(extractor.extract(&text).is_none());
    }

    #[test]
    fn test_address_absent() {
        let extractor = AddressExtractor::new(vocab()).unwrap();
        let text = normalize("Jean Dupont\njean@test.com\nSoftware Engineer");

        assert!(extractor.extract(&text).is_none());
    }

    #[test]
    fn test_summary_from_section() {
        let extractor = SummaryExtractor::new(patterns());
        let input = "Jean Dupont\nSUMMARY\nDriven engineer.\nTen years of backend work.\nEXPERIENCE\nDev - Acme - 2020";
        let text = normalize(input);
        let sections = SectionSegmenter::new(vocab()).segment(&text);

        assert_eq!(
            extractor.extract(&text, &sections).as_deref(),
            Some("Driven engineer. Ten years of backend work.")
        );
    }

    #[test]
    fn test_summary_falls_back_to_first_prose_block() {
        let extractor = SummaryExtractor::new(patterns());
        let input = "Jean Dupont\njean@test.com\nAmbitious and hardworking developer with a passion for mobile applications and clean code.";
        let text = normalize(input);
        let sections = SectionSegmenter::new(vocab()).segment(&text);

        let summary = extractor.extract(&text, &sections).unwrap();
        assert!(summary.starts_with("Ambitious and hardworking"));
    }
}
