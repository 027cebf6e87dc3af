pub mod error;
pub mod extract;
pub mod record;
pub mod vocab;

pub use error::{Error, Result};
pub use extract::{
    CvPipeline, NormalizedText, SectionLabel, SectionMap, SectionSegmenter, TextNormalizer,
    EXTRACTION_METHOD,
};
pub use record::{
    ContactInfo, CvRecord, EducationEntry, ExperienceEntry, ExtractionMetadata, PersonalInfo,
    ProjectEntry,
};
pub use vocab::Vocabulary;
