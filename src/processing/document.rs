//! Parsed resume structure and heuristic field extraction

use crate::config::ExtractionConfig;
use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Structured view of one resume. Built once by [`FieldExtractor`] and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    pub text: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
}

impl ParsedDocument {
    /// A document with only raw text and no extracted fields
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Replace the detected name with a caller-supplied one
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            self.name = Some(trimmed.to_string());
        }
        self
    }
}

const SKILL_HEADERS: &[&str] = &["skills", "technical skills", "competencies", "qualifications"];
const EXPERIENCE_HEADERS: &[&str] = &["experience", "work history", "employment", "professional experience"];
const EDUCATION_HEADERS: &[&str] = &["education", "academic", "qualifications"];
const CERTIFICATION_HEADERS: &[&str] = &["certifications", "certificates", "licenses", "licensure"];

const JOB_TITLE_KEYWORDS: &[&str] = &[
    "nurse", "assistant", "manager", "coordinator", "specialist", "technician", "director", "supervisor",
];
const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "doctorate", "phd", "associate", "degree", "diploma", "certificate",
    "rn", "bsn", "msn", "np",
];
const CERTIFICATION_KEYWORDS: &[&str] = &[
    "certified", "license", "cpr", "bls", "acls", "nclex", "certification", "licensed",
];

/// Best-effort extraction of contact details and categorized lines from raw resume text
pub struct FieldExtractor {
    email_regex: Regex,
    phone_regex: Regex,
    name_phone_regex: Regex,
    date_regex: Regex,
    skill_sections: Vec<Regex>,
    experience_sections: Vec<Regex>,
    education_sections: Vec<Regex>,
    certification_sections: Vec<Regex>,
    skill_vocabulary: Vec<String>,
    max_experience_entries: usize,
    max_education_entries: usize,
    max_name_length: usize,
}

impl FieldExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        Ok(Self {
            email_regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b")?,
            phone_regex: Regex::new(
                r"(\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}|\+\d{1,3}\s?\d{3}[-.\s]?\d{3}[-.\s]?\d{4})",
            )?,
            name_phone_regex: Regex::new(r"\d{3}[-.\s]?\d{3}[-.\s]?\d{4}")?,
            date_regex: Regex::new(r"(?i)\d{4}|\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4}")?,
            skill_sections: Self::section_patterns(SKILL_HEADERS)?,
            experience_sections: Self::section_patterns(EXPERIENCE_HEADERS)?,
            education_sections: Self::section_patterns(EDUCATION_HEADERS)?,
            certification_sections: Self::section_patterns(CERTIFICATION_HEADERS)?,
            skill_vocabulary: config.skill_vocabulary.clone(),
            max_experience_entries: config.max_experience_entries,
            max_education_entries: config.max_education_entries,
            max_name_length: config.max_name_length,
        })
    }

    /// A header, an optional `:` or newline, then everything up to the first blank line
    fn section_patterns(headers: &[&str]) -> Result<Vec<Regex>> {
        headers
            .iter()
            .map(|header| {
                Regex::new(&format!(r"(?i){}[:\n]?([\s\S]*?)(?:\n\n|$)", regex::escape(header)))
                    .map_err(Into::into)
            })
            .collect()
    }

    pub fn extract(&self, text: &str) -> ParsedDocument {
        let email = self.email_regex.find(text).map(|m| m.as_str().to_string());
        let phone = self.phone_regex.find(text).map(|m| m.as_str().to_string());
        let name = self.extract_name(text);

        let skills_text = Self::find_section(text, &self.skill_sections).unwrap_or(text);
        let experience_text = Self::find_section(text, &self.experience_sections).unwrap_or(text);
        let education_text = Self::find_section(text, &self.education_sections).unwrap_or(text);
        let certifications_text = Self::find_section(text, &self.certification_sections).unwrap_or(text);

        ParsedDocument {
            text: text.to_string(),
            name,
            email,
            phone,
            skills: self.extract_skills(skills_text),
            experience: self.extract_experience(experience_text),
            education: self.extract_education(education_text),
            certifications: Self::extract_certifications(certifications_text),
        }
    }

    fn extract_name(&self, text: &str) -> Option<String> {
        let first_line = text.lines().map(str::trim).find(|line| !line.is_empty())?;

        if first_line.chars().count() < self.max_name_length
            && !first_line.contains('@')
            && !self.name_phone_regex.is_match(first_line)
        {
            Some(first_line.to_string())
        } else {
            None
        }
    }

    /// First header whose first occurrence captures a non-empty body
    fn find_section<'t>(text: &'t str, patterns: &[Regex]) -> Option<&'t str> {
        patterns.iter().find_map(|pattern| {
            pattern
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|body| body.as_str())
                .filter(|body| !body.is_empty())
        })
    }

    fn extract_skills(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.skill_vocabulary
            .iter()
            .filter(|skill| lower.contains(skill.as_str()))
            .cloned()
            .collect()
    }

    fn extract_experience(&self, text: &str) -> Vec<String> {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut experience = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            if experience.len() >= self.max_experience_entries {
                break;
            }

            let lower = line.to_lowercase();
            let is_candidate = JOB_TITLE_KEYWORDS.iter().any(|k| lower.contains(k))
                || self.date_regex.is_match(line);
            if !is_candidate {
                continue;
            }

            let entry = lines[i..lines.len().min(i + 3)].join(" ");
            if entry.len() > 10 {
                experience.push(line.trim().to_string());
            }
        }

        experience
    }

    fn extract_education(&self, text: &str) -> Vec<String> {
        text.split('\n')
            .filter(|line| {
                let lower = line.to_lowercase();
                DEGREE_KEYWORDS.iter().any(|k| lower.contains(k))
            })
            .map(|line| line.trim().to_string())
            .take(self.max_education_entries)
            .collect()
    }

    fn extract_certifications(text: &str) -> Vec<String> {
        text.split('\n')
            .filter(|line| {
                let lower = line.to_lowercase();
                CERTIFICATION_KEYWORDS.iter().any(|k| lower.contains(k))
            })
            .map(|line| line.trim().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Smith\n\
        jane.smith@example.com | (555) 123-4567\n\
        \n\
        Skills:\n\
        Patient care, vitals, phlebotomy, EHR, customer service\n\
        \n\
        Experience:\n\
        Medical Assistant, Valley Clinic, Jan 2019 - Present\n\
        Front desk receptionist at Lakeside Family Practice 2016 - 2019\n\
        \n\
        Education:\n\
        Associate of Applied Science, Medical Assisting\n\
        \n\
        Certifications:\n\
        Certified Medical Assistant (CMA)\n\
        BLS / CPR";

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(&ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn test_contact_details() {
        let doc = extractor().extract(SAMPLE);
        assert_eq!(doc.name.as_deref(), Some("Jane Smith"));
        assert_eq!(doc.email.as_deref(), Some("jane.smith@example.com"));
        assert_eq!(doc.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(doc.text, SAMPLE);
    }

    #[test]
    fn test_sections() {
        let doc = extractor().extract(SAMPLE);

        assert!(doc.skills.contains(&"patient care".to_string()));
        assert!(doc.skills.contains(&"phlebotomy".to_string()));
        assert!(doc.skills.contains(&"customer service".to_string()));

        assert_eq!(doc.experience.len(), 2);
        assert!(doc.experience[0].starts_with("Medical Assistant"));

        assert_eq!(doc.education, vec!["Associate of Applied Science, Medical Assisting".to_string()]);

        assert_eq!(doc.certifications.len(), 2);
        assert_eq!(doc.certifications[1], "BLS / CPR");
    }

    #[test]
    fn test_name_rejected_when_contact_line() {
        let doc = extractor().extract("jane@example.com\nRegistered Nurse");
        assert!(doc.name.is_none());

        let doc = extractor().extract("555-123-4567\nRegistered Nurse");
        assert!(doc.name.is_none());
    }

    #[test]
    fn test_experience_limit() {
        let text = (0..10)
            .map(|i| format!("Staff nurse, Ward {}", i))
            .collect::<Vec<_>>()
            .join("\n");
        let doc = extractor().extract(&text);
        assert_eq!(doc.experience.len(), 5);
    }

    #[test]
    fn test_empty_text() {
        let doc = extractor().extract("");
        assert!(doc.name.is_none());
        assert!(doc.email.is_none());
        assert!(doc.phone.is_none());
        assert!(doc.skills.is_empty());
        assert!(doc.experience.is_empty());
        assert!(doc.education.is_empty());
        assert!(doc.certifications.is_empty());
    }

    #[test]
    fn test_with_name_override() {
        let doc = ParsedDocument::from_text("something").with_name("  Alex Kim ");
        assert_eq!(doc.name.as_deref(), Some("Alex Kim"));

        let doc = ParsedDocument::from_text("something").with_name("   ");
        assert!(doc.name.is_none());
    }
}
