use serde::{Deserialize, Serialize};

/// Identity fields recovered from the document header.
///
/// Absence is always `None`, never an empty string, so "not found" stays
/// distinguishable from "found but blank".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
}

impl PersonalInfo {
    #[must_use]
    pub fn new(full_name: Option<String>) -> Self {
        Self { full_name }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub website: Option<String>,
}

impl ContactInfo {
    /// Number of core contact channels populated. The website field is a
    /// bonus channel and does not count toward confidence.
    #[must_use]
    pub fn populated_count(&self) -> usize {
        [&self.email, &self.phone, &self.linkedin, &self.github]
            .iter()
            .filter(|f| f.is_some())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.populated_count() == 0 && self.website.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: Option<String>,
    pub company: Option<String>,
    pub period: Option<String>,
    pub description: Vec<String>,
}

impl ExperienceEntry {
    #[must_use]
    pub fn new(title: String) -> Self {
        Self {
            title: Some(title),
            company: None,
            period: None,
            description: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_company(mut self, company: String) -> Self {
        self.company = Some(company);
        self
    }

    #[must_use]
    pub fn with_period(mut self, period: String) -> Self {
        self.period = Some(period);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub description: Vec<String>,
}

impl EducationEntry {
    #[must_use]
    pub fn new(degree: String) -> Self {
        Self {
            degree: Some(degree),
            institution: None,
            year: None,
            description: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_institution(mut self, institution: String) -> Self {
        self.institution = Some(institution);
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: String) -> Self {
        self.year = Some(year);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Vec<String>,
}

impl ProjectEntry {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name: Some(name),
            description: None,
            technologies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    #[must_use]
    pub fn with_technologies(mut self, technologies: Vec<String>) -> Self {
        self.technologies = technologies;
        self
    }
}

/// Provenance attached to every extraction result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub text_length: usize,
    pub extraction_method: String,
    pub confidence_score: f64,
    pub note: Option<String>,
}

impl ExtractionMetadata {
    #[must_use]
    pub fn new(text_length: usize, extraction_method: &str, confidence_score: f64) -> Self {
        Self {
            text_length,
            extraction_method: extraction_method.to_string(),
            confidence_score: confidence_score.clamp(0.0, 1.0),
            note: None,
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: String) -> Self {
        self.note = Some(note);
        self
    }
}

/// The aggregate record produced by one extraction run.
///
/// Every key serializes even when empty so downstream consumers can rely
/// on key presence. List fields keep document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvRecord {
    pub personal_info: PersonalInfo,
    pub contact_info: ContactInfo,
    pub address: Option<String>,
    pub professional_summary: Option<String>,
    pub work_experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub hobbies: Vec<String>,
    pub extraction_metadata: ExtractionMetadata,
}

impl CvRecord {
    /// Record for input that yielded no usable text. Everything is absent
    /// and confidence is zero; only the metadata carries information.
    #[must_use]
    pub fn empty(metadata: ExtractionMetadata) -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            contact_info: ContactInfo::default(),
            address: None,
            professional_summary: None,
            work_experience: Vec::new(),
            education: Vec::new(),
            skills: Vec::new(),
            languages: Vec::new(),
            certifications: Vec::new(),
            projects: Vec::new(),
            hobbies: Vec::new(),
            extraction_metadata: metadata,
        }
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.extraction_metadata.confidence_score
    }
}
