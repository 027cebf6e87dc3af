use std::sync::Arc;

use super::fields::{AddressExtractor, ContactExtractor, PersonalInfoExtractor, SummaryExtractor};
use super::entries::EntryExtractor;
use super::lists::ListExtractor;
use super::normalizer::TextNormalizer;
use super::patterns::PatternSet;
use super::projects::ProjectExtractor;
use super::segmenter::{SectionLabel, SectionMap, SectionSegmenter};
use crate::record::{ContactInfo, CvRecord, ExtractionMetadata};
use crate::vocab::Vocabulary;
use crate::Result;

/// Tag identifying this extraction strategy revision, so downstream
/// consumers can tell records from different pipeline versions apart.
pub const EXTRACTION_METHOD: &str = "rule_based_v1";

const LOW_TEXT_NOTE: &str = "input below minimum length threshold, extraction skipped";

/// Sections counted toward the confidence score.
const EXPECTED_SECTIONS: [SectionLabel; 5] = [
    SectionLabel::Summary,
    SectionLabel::Experience,
    SectionLabel::Education,
    SectionLabel::Skills,
    SectionLabel::Languages,
];

/// The full text-to-structure pipeline: normalize, segment, run every
/// field extractor, aggregate into a `CvRecord`.
///
/// Extraction never fails: any string input, including empty or
/// OCR-garbage text, produces a record with a degraded confidence score.
/// Construction compiles the pattern set and can fail only on an invalid
/// vocabulary.
#[derive(Debug, Clone)]
pub struct CvPipeline {
    normalizer: TextNormalizer,
    segmenter: SectionSegmenter,
    personal: PersonalInfoExtractor,
    contact: ContactExtractor,
    address: AddressExtractor,
    summary: SummaryExtractor,
    entries: EntryExtractor,
    lists: ListExtractor,
    projects: ProjectExtractor,
}

impl CvPipeline {
    pub fn new() -> Result<Self> {
        Self::with_vocabulary(Vocabulary::default())
    }

    /// Builds a pipeline around a custom vocabulary; tests swap in
    /// reduced heading or keyword sets here.
    pub fn with_vocabulary(vocab: Vocabulary) -> Result<Self> {
        let lists = ListExtractor::new(&vocab)?;
        let projects = ProjectExtractor::new(&vocab)?;

        let vocab = Arc::new(vocab);
        let patterns = Arc::new(PatternSet::compile()?);

        Ok(Self {
            normalizer: TextNormalizer::default(),
            segmenter: SectionSegmenter::new(Arc::clone(&vocab)),
            personal: PersonalInfoExtractor::new(Arc::clone(&vocab))?,
            contact: ContactExtractor::new(Arc::clone(&patterns)),
            address: AddressExtractor::new(Arc::clone(&vocab))?,
            summary: SummaryExtractor::new(Arc::clone(&patterns)),
            entries: EntryExtractor::new(Arc::clone(&patterns)),
            lists,
            projects,
        })
    }

    #[must_use]
    pub fn extract(&self, raw: &str) -> CvRecord {
        let text_length = raw.chars().count();

        let text = self.normalizer.normalize(raw);
        if text.is_empty() {
            tracing::debug!(text_length, "input too short, returning empty record");
            let metadata = ExtractionMetadata::new(text_length, EXTRACTION_METHOD, 0.0)
                .with_note(LOW_TEXT_NOTE.to_string());
            return CvRecord::empty(metadata);
        }

        let sections = self.segmenter.segment(&text);

        let contact_info = self.contact.extract(&text);
        let confidence = confidence_score(text.char_len(), &contact_info, &sections);

        CvRecord {
            personal_info: self.personal.extract(&text),
            address: self.address.extract(&text),
            professional_summary: self.summary.extract(&text, &sections),
            work_experience: self.entries.experience(&text, &sections),
            education: self.entries.education(&text, &sections),
            skills: self.lists.skills(&text, &sections),
            languages: self.lists.section_items(&sections, SectionLabel::Languages),
            certifications: self.lists.section_items(&sections, SectionLabel::Certifications),
            hobbies: self.lists.section_items(&sections, SectionLabel::Hobbies),
            projects: self.projects.extract(&sections),
            contact_info,
            extraction_metadata: ExtractionMetadata::new(
                text_length,
                EXTRACTION_METHOD,
                confidence,
            ),
        }
    }

    /// Normalized text and section map for a raw input, as the pipeline
    /// would see them. Debugging aid for the CLI.
    #[must_use]
    pub fn inspect(&self, raw: &str) -> (super::normalizer::NormalizedText, SectionMap) {
        let text = self.normalizer.normalize(raw);
        let sections = self.segmenter.segment(&text);
        (text, sections)
    }
}

/// Weighted blend of text length, populated contact channels, and
/// detected sections, in [0, 1]. Weights are tunable policy; the
/// invariant is monotonicity: more populated fields never lower the
/// score.
fn confidence_score(char_len: usize, contact: &ContactInfo, sections: &SectionMap) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let length = if char_len >= 1000 {
        1.0
    } else if char_len >= 500 {
        0.5 + 0.5 * (char_len - 500) as f64 / 500.0
    } else {
        0.5 * char_len as f64 / 500.0
    };

    #[allow(clippy::cast_precision_loss)]
    let contact_part = contact.populated_count() as f64 / 4.0;

    let found = EXPECTED_SECTIONS
        .iter()
        .filter(|label| sections.contains(**label))
        .count();
    #[allow(clippy::cast_precision_loss)]
    let section_part = found as f64 / EXPECTED_SECTIONS.len() as f64;

    (0.3 * length + 0.3 * contact_part + 0.4 * section_part).clamp(0.0, 1.0)
}
