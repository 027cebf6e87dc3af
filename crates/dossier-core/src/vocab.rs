use crate::extract::SectionLabel;

/// Curated heading and keyword vocabularies, French and English.
///
/// Built once at startup and injected into the segmenter and the field
/// extractors; tests swap in reduced vocabularies. Read-only after
/// construction, so it is safe to share across concurrent extractions.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Heading synonyms per section, in tie-break priority order. A line
    /// matching several vocabularies is assigned to the first label here.
    pub headings: Vec<(SectionLabel, Vec<&'static str>)>,
    /// Technical keywords cross-referenced against the whole document to
    /// catch skills mentioned outside a dedicated section.
    pub technical_keywords: Vec<&'static str>,
    /// Header lines that look like names but never are.
    pub name_stoplist: Vec<&'static str>,
    /// Labels and locality words that flag an address line.
    pub address_labels: Vec<&'static str>,
    pub locality_keywords: Vec<&'static str>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            headings: vec![
                (
                    SectionLabel::Summary,
                    vec![
                        "summary",
                        "professional summary",
                        "profile",
                        "profil",
                        "resume professionnel",
                        "objective",
                        "objectif",
                        "about me",
                        "a propos",
                    ],
                ),
                (
                    SectionLabel::Experience,
                    vec![
                        "experience",
                        "experiences",
                        "work experience",
                        "professional experience",
                        "experience professionnelle",
                        "experiences professionnelles",
                        "parcours professionnel",
                        "employment history",
                    ],
                ),
                (
                    SectionLabel::Education,
                    vec![
                        "education",
                        "formation",
                        "formations",
                        "etudes",
                        "studies",
                        "diplomes",
                        "academic background",
                        "parcours academique",
                    ],
                ),
                (
                    SectionLabel::Skills,
                    vec![
                        "skills",
                        "competences",
                        "technical skills",
                        "competences techniques",
                        "technologies",
                        "outils",
                        "tools",
                    ],
                ),
                (SectionLabel::Languages, vec!["languages", "langues"]),
                (
                    SectionLabel::Certifications,
                    vec!["certifications", "certificats", "certificates"],
                ),
                (
                    SectionLabel::Projects,
                    vec![
                        "projects",
                        "projets",
                        "personal projects",
                        "projets personnels",
                    ],
                ),
                (
                    SectionLabel::Hobbies,
                    vec![
                        "hobbies",
                        "interests",
                        "centres d'interet",
                        "centre d'interet",
                        "loisirs",
                    ],
                ),
            ],
            technical_keywords: vec![
                "python",
                "java",
                "javascript",
                "typescript",
                "react",
                "angular",
                "vue",
                "node.js",
                "sql",
                "mysql",
                "postgresql",
                "mongodb",
                "docker",
                "kubernetes",
                "aws",
                "azure",
                "git",
                "html",
                "css",
                "php",
                "c#",
                "c++",
                "go",
                "rust",
                "kotlin",
                "swift",
                "flutter",
                "laravel",
                "django",
                "flask",
                "spring",
                "unity",
                "figma",
                "adobe xd",
                "illustrator",
                "linux",
                "wpf",
                "winform",
                "huawei cloud",
            ],
            name_stoplist: vec![
                "curriculum vitae",
                "curriculum",
                "resume",
                "cv",
                "contact",
                "coordonnees",
            ],
            address_labels: vec!["adresse", "adresses", "address", "location", "ville", "city"],
            locality_keywords: vec![
                "douala",
                "yaounde",
                "yassa",
                "littoral",
                "cameroun",
                "cameroon",
                "paris",
                "lyon",
                "france",
            ],
        }
    }
}

impl Vocabulary {
    #[must_use]
    pub fn heading_terms(&self, label: SectionLabel) -> &[&'static str] {
        self.headings
            .iter()
            .find(|(l, _)| *l == label)
            .map_or(&[], |(_, terms)| terms.as_slice())
    }
}

/// Fold accented Latin letters to their ASCII base for vocabulary
/// comparison. Leaves everything else untouched, so the original text is
/// never altered.
#[must_use]
pub fn fold_accents(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'á' | 'ã' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' => 'i',
            'ô' | 'ö' | 'ó' | 'õ' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            'À' | 'Â' | 'Ä' | 'Á' | 'Ã' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Î' | 'Ï' | 'Í' => 'I',
            'Ô' | 'Ö' | 'Ó' | 'Õ' => 'O',
            'Ù' | 'Û' | 'Ü' | 'Ú' => 'U',
            'Ç' => 'C',
            'Ñ' => 'N',
            _ => c,
        })
        .collect()
}

/// Fraction-based check used by both the normalizer and the segmenter:
/// a line is "mostly uppercase" when at least 60% of its letters are.
#[must_use]
pub fn mostly_uppercase(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return false;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper * 10 >= letters.len() * 6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order_is_fixed() {
        let vocab = Vocabulary::default();
        let order: Vec<SectionLabel> = vocab.headings.iter().map(|(l, _)| *l).collect();

        assert_eq!(
            order,
            vec![
                SectionLabel::Summary,
                SectionLabel::Experience,
                SectionLabel::Education,
                SectionLabel::Skills,
                SectionLabel::Languages,
                SectionLabel::Certifications,
                SectionLabel::Projects,
                SectionLabel::Hobbies,
            ]
        );
    }

    #[test]
    fn test_fold_accents() {
        assert_eq!(fold_accents("Compétences"), "Competences");
        assert_eq!(fold_accents("ÉTUDES"), "ETUDES");
        assert_eq!(fold_accents("naïve façade"), "naive facade");
        assert_eq!(fold_accents("plain"), "plain");
    }

    #[test]
    fn test_mostly_uppercase() {
        assert!(mostly_uppercase("WORK EXPERIENCE"));
        assert!(mostly_uppercase("EXPERIENCEs"));
        assert!(!mostly_uppercase("Jean Dupont"));
        assert!(!mostly_uppercase("12345"));
    }

    #[test]
    fn test_heading_terms_lookup() {
        let vocab = Vocabulary::default();
        assert!(vocab.heading_terms(SectionLabel::Languages).contains(&"langues"));
        assert!(vocab.heading_terms(SectionLabel::Unknown).is_empty());
    }
}
