use regex::Regex;

use super::patterns::keyword_scanner;
use super::segmenter::{SectionLabel, SectionMap};
use crate::record::ProjectEntry;
use crate::vocab::Vocabulary;

/// Parses the projects block with a name-then-description heuristic: the
/// first line of an entry is the project name, following lines are its
/// description. Technologies come from a keyword scan over the entry.
#[derive(Debug, Clone)]
pub struct ProjectExtractor {
    tech_scanner: Option<Regex>,
}

impl ProjectExtractor {
    pub fn new(vocab: &Vocabulary) -> Result<Self, regex::Error> {
        Ok(Self {
            tech_scanner: keyword_scanner(&vocab.technical_keywords)?,
        })
    }

    #[must_use]
    pub fn extract(&self, sections: &SectionMap) -> Vec<ProjectEntry> {
        let Some(block) = sections.text_for(SectionLabel::Projects) else {
            tracing::debug!("projects section not found");
            return Vec::new();
        };

        let mut drafts: Vec<(String, Vec<String>)> = Vec::new();
        let mut at_boundary = true;

        for line in block.lines() {
            let line = line.trim();
            if line.is_empty() {
                at_boundary = true;
                continue;
            }

            let is_bullet = line.starts_with(['-', '–', '•', '·', '*']);
            let body = line
                .trim_start_matches(['-', '–', '•', '·', '*'])
                .trim()
                .to_string();
            if body.is_empty() {
                continue;
            }

            match drafts.last_mut() {
                Some((_, description)) if is_bullet || (!at_boundary && description.is_empty()) => {
                    description.push(body);
                }
                _ => drafts.push(split_name_line(&body)),
            }
            at_boundary = false;
        }

        drafts
            .into_iter()
            .map(|(name, description)| self.finish(name, description))
            .collect()
    }

    fn finish(&self, name: String, description: Vec<String>) -> ProjectEntry {
        let scan_target = format!("{} {}", name, description.join(" "));

        let mut technologies: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        if let Some(scanner) = &self.tech_scanner {
            for m in scanner.find_iter(&scan_target) {
                let key = m.as_str().to_lowercase();
                if !seen.contains(&key) {
                    seen.push(key);
                    technologies.push(m.as_str().to_string());
                }
            }
        }

        let description = if description.is_empty() {
            None
        } else {
            Some(description.join(" "))
        };

        ProjectEntry {
            name: Some(name),
            description,
            technologies,
        }
    }
}

/// `Name - short description` or `Name: short description` head lines
/// yield both fields at once; anything else is just the name.
fn split_name_line(line: &str) -> (String, Vec<String>) {
    for separator in [" - ", " – ", ": "] {
        if let Some((name, rest)) = line.split_once(separator) {
            let name = name.trim();
            let rest = rest.trim();
            if !name.is_empty() && !rest.is_empty() {
                return (name.to_string(), vec![rest.to_string()]);
            }
        }
    }
    (line.to_string(), Vec::new())
}
