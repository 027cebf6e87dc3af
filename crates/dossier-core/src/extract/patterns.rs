use regex::Regex;

const MONTH: &str = "(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec|janv|fevr|mars|avr|mai|juin|juil|aout|sept)[a-z]*\\.?";

/// One compiled pattern per extraction capability, built once at pipeline
/// construction and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct PatternSet {
    pub email: Regex,
    /// Tried in order: international with country code, local leading
    /// zero, explicitly labeled number. Matches are still validated by
    /// digit count before acceptance.
    pub phones: Vec<Regex>,
    pub linkedin: Regex,
    pub github: Regex,
    pub website: Regex,
    pub date_range: Regex,
    pub year: Regex,
    pub bullet: Regex,
    /// "Title at Company" / "Titre chez Société" separator, tried when an
    /// entry head line carries no dash-style separator.
    pub at_separator: Regex,
}

impl PatternSet {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")?,
            phones: vec![
                Regex::new(r"\+\d{1,3}[\s.\-]?\(?\d+\)?(?:[\s.\-]?\d+){1,6}")?,
                Regex::new(r"\b0\d(?:[\s.\-]?\d{2}){4}\b")?,
                Regex::new(r"(?i)(?:phone|tel|t[ée]l[ée]phone|mobile)\s*[:\-]?\s*(\+?[\d\s.\-()]{7,20})")?,
            ],
            linkedin: Regex::new(r"(?i)(?:https?://)?(?:www\.)?linkedin\.com/in/[A-Za-z0-9_%\-]+")?,
            github: Regex::new(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_\-]+")?,
            website: Regex::new(r#"(?i)\bhttps?://[^\s<>"]+|\bwww\.[^\s<>"]+"#)?,
            date_range: Regex::new(&format!(
                r"(?i)\b(?:{MONTH}\s+)?(?:19|20)\d{{2}}\s*(?:[-–—/]|to|au|à)\s*(?:(?:{MONTH}\s+)?(?:19|20)\d{{2}}|pr[ée]sent|present|aujourd'hui|current|now|today)"
            ))?,
            year: Regex::new(r"\b(?:19|20)\d{2}\b")?,
            bullet: Regex::new(r"^\s*[-–—•·*▪◦]\s*")?,
            at_separator: Regex::new(r"(?i)\s+(?:at|chez)\s+")?,
        })
    }

    /// First phone candidate whose digit count is plausible (7 to 15
    /// digits after stripping separators), verbatim as written.
    #[must_use]
    pub fn find_phone<'a>(&self, text: &'a str) -> Option<&'a str> {
        for pattern in &self.phones {
            for caps in pattern.captures_iter(text) {
                let candidate = caps
                    .get(1)
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str().trim())?;
                if plausible_phone(candidate) {
                    return Some(candidate);
                }
            }
        }
        None
    }
}

#[must_use]
pub fn plausible_phone(candidate: &str) -> bool {
    let digits = candidate.chars().filter(char::is_ascii_digit).count();
    (7..=15).contains(&digits)
}

/// Combined whole-word scanner over a keyword vocabulary, or `None` for
/// an empty vocabulary (an empty alternation would match the empty
/// string at every word boundary). Longest keywords are tried first so
/// "adobe xd" wins over "xd"-style prefixes; keywords ending in symbols
/// ("c++", "c#") drop the trailing boundary.
pub fn keyword_scanner(keywords: &[&str]) -> Result<Option<Regex>, regex::Error> {
    let mut sorted: Vec<&str> = keywords.iter().copied().filter(|k| !k.is_empty()).collect();
    if sorted.is_empty() {
        return Ok(None);
    }
    sorted.sort_by_key(|k| std::cmp::Reverse(k.len()));

    let alternatives: Vec<String> = sorted
        .iter()
        .map(|k| {
            let escaped = regex::escape(k);
            if k.chars().last().is_some_and(|c| c.is_alphanumeric()) {
                format!(r"{escaped}\b")
            } else {
                escaped
            }
        })
        .collect();

    Regex::new(&format!(r"(?i)\b(?:{})", alternatives.join("|"))).map(Some)
}

/// `Label: value` line matcher for a set of labels (address extraction).
pub fn labeled_line(labels: &[&str]) -> Result<Regex, regex::Error> {
    let alternatives: Vec<String> = labels.iter().map(|l| regex::escape(l)).collect();
    Regex::new(&format!(
        r"(?im)^(?:{})\s*[:\-]\s*(.+)$",
        alternatives.join("|")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        let patterns = PatternSet::compile().unwrap();

        assert_eq!(
            patterns.email.find("mail: jean.dupont@test.com ok").unwrap().as_str(),
            "jean.dupont@test.com"
        );
        assert!(patterns.email.find("not-an-email@nodomain").is_none());
    }

    #[test]
    fn test_international_phone() {
        let patterns = PatternSet::compile().unwrap();

        assert_eq!(patterns.find_phone("call +237 650 973 231 today"), Some("+237 650 973 231"));
        assert_eq!(patterns.find_phone("Tel: 06 12 34 56 78"), Some("06 12 34 56 78"));
    }

    #[test]
    fn test_phone_rejects_year_ranges_and_short_numbers() {
        let patterns = PatternSet::compile().unwrap();

        assert_eq!(patterns.find_phone("worked 2019 - 2021 on things"), None);
        assert_eq!(patterns.find_phone("+12 34"), None);
    }

    #[test]
    fn test_profile_urls() {
        let patterns = PatternSet::compile().unwrap();

        assert_eq!(
            patterns.linkedin.find("see linkedin.com/in/jean-dupont now").unwrap().as_str(),
            "linkedin.com/in/jean-dupont"
        );
        assert_eq!(
            patterns.github.find("code at https://github.com/jdupont").unwrap().as_str(),
            "https://github.com/jdupont"
        );
    }

    #[test]
    fn test_date_range() {
        let patterns = PatternSet::compile().unwrap();

        assert!(patterns.date_range.is_match("Jan 2020 - Present"));
        assert!(patterns.date_range.is_match("2018 – 2021"));
        assert!(patterns.date_range.is_match("mars 2019 à aujourd'hui"));
        assert!(!patterns.date_range.is_match("born in 1995"));
    }

    #[test]
    fn test_keyword_scanner_boundaries() {
        let scanner = keyword_scanner(&["python", "c++", "go", "node.js"]).unwrap().unwrap();

        let found: Vec<&str> = scanner.find_iter("Python, C++ and node.js").map(|m| m.as_str()).collect();
        assert_eq!(found, vec!["Python", "C++", "node.js"]);

        assert!(!scanner.is_match("pythonic"));
    }

    #[test]
    fn test_keyword_scanner_empty_vocabulary() {
        assert!(keyword_scanner(&[]).unwrap().is_none());
        assert!(keyword_scanner(&[""]).unwrap().is_none());
    }

    #[test]
    fn test_labeled_line() {
        let pattern = labeled_line(&["adresse", "address", "city"]).unwrap();

        let caps = pattern.captures("Name line\nAddress: Yassa, Douala, Littoral").unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "Yassa, Douala, Littoral");
    }
}
