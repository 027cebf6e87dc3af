mod entries;
mod fields;
mod lists;
mod normalizer;
mod patterns;
mod pipeline;
mod projects;
mod segmenter;

pub use entries::EntryExtractor;
pub use fields::{
    AddressExtractor, ContactExtractor, PersonalInfoExtractor, SummaryExtractor,
};
pub use lists::{Dedup, ListExtractor};
pub use normalizer::{NormalizedText, TextNormalizer, MIN_TEXT_LENGTH};
pub use patterns::{keyword_scanner, labeled_line, plausible_phone, PatternSet};
pub use pipeline::{CvPipeline, EXTRACTION_METHOD};
pub use projects::ProjectExtractor;
pub use segmenter::{SectionBlock, SectionLabel, SectionMap, SectionSegmenter};
