//! Weighted keyword matching of parsed resumes against role profiles

use crate::error::{Result, RoleMatcherError};
use crate::processing::document::ParsedDocument;
use crate::processing::reasoning::{self, MatchCounts};
use crate::processing::roles::{Dimension, RoleCategory, RoleProfile, RoleRegistry};
use aho_corasick::AhoCorasick;
use log::debug;
use serde::{Deserialize, Serialize};

/// Result of scoring one document against one role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleMatch {
    pub role: RoleCategory,
    pub score: u8,
    pub matched_skills: Vec<String>,
    pub matched_experience: Vec<String>,
    pub matched_education: Vec<String>,
    pub matched_certifications: Vec<String>,
    pub reasoning: String,
}

impl RoleMatch {
    pub fn matched(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Skills => &self.matched_skills,
            Dimension::Experience => &self.matched_experience,
            Dimension::Education => &self.matched_education,
            Dimension::Certifications => &self.matched_certifications,
        }
    }

    pub fn counts(&self) -> MatchCounts {
        MatchCounts {
            skills: self.matched_skills.len(),
            experience: self.matched_experience.len(),
            education: self.matched_education.len(),
            certifications: self.matched_certifications.len(),
        }
    }
}

/// Pre-built substring automaton for one dimension of one profile
struct DimensionMatcher {
    automaton: AhoCorasick,
    keywords: Vec<String>,
}

impl DimensionMatcher {
    fn new(keywords: &[String]) -> Result<Self> {
        let automaton = AhoCorasick::new(keywords)
            .map_err(|e| RoleMatcherError::Processing(format!("Failed to build keyword matcher: {}", e)))?;
        Ok(Self {
            automaton,
            keywords: keywords.to_vec(),
        })
    }

    /// Mark every keyword occurring anywhere in `haystack`
    fn mark(&self, haystack: &str, hits: &mut [bool]) {
        for mat in self.automaton.find_overlapping_iter(haystack) {
            hits[mat.pattern().as_usize()] = true;
        }
    }

    /// Keywords present in any extracted line or, failing that, anywhere in the full text.
    /// Returned in profile order.
    fn matched(&self, lines: &[String], full_text: &str) -> Vec<String> {
        let mut hits = vec![false; self.keywords.len()];
        for line in lines {
            self.mark(line, &mut hits);
        }
        self.mark(full_text, &mut hits);

        self.keywords
            .iter()
            .zip(hits)
            .filter(|(_, hit)| *hit)
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }
}

struct ProfileMatcher {
    profile: RoleProfile,
    dimensions: [DimensionMatcher; 4],
}

impl ProfileMatcher {
    fn new(profile: &RoleProfile) -> Result<Self> {
        Ok(Self {
            profile: profile.clone(),
            dimensions: [
                DimensionMatcher::new(&profile.skills)?,
                DimensionMatcher::new(&profile.experience)?,
                DimensionMatcher::new(&profile.education)?,
                DimensionMatcher::new(&profile.certifications)?,
            ],
        })
    }

    fn dimension(&self, dimension: Dimension) -> &DimensionMatcher {
        match dimension {
            Dimension::Skills => &self.dimensions[0],
            Dimension::Experience => &self.dimensions[1],
            Dimension::Education => &self.dimensions[2],
            Dimension::Certifications => &self.dimensions[3],
        }
    }
}

/// Lowercased copy of a document's searchable content
struct NormalizedDocument {
    text: String,
    skills: Vec<String>,
    experience: Vec<String>,
    education: Vec<String>,
    certifications: Vec<String>,
}

impl NormalizedDocument {
    fn new(document: &ParsedDocument) -> Self {
        fn lower(lines: &[String]) -> Vec<String> {
            lines.iter().map(|l| l.to_lowercase()).collect()
        }

        Self {
            text: document.text.to_lowercase(),
            skills: lower(&document.skills),
            experience: lower(&document.experience),
            education: lower(&document.education),
            certifications: lower(&document.certifications),
        }
    }

    fn lines(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Skills => &self.skills,
            Dimension::Experience => &self.experience,
            Dimension::Education => &self.education,
            Dimension::Certifications => &self.certifications,
        }
    }
}

/// Scores documents against every profile in a [`RoleRegistry`]
pub struct RoleMatcher {
    profiles: Vec<ProfileMatcher>,
}

impl RoleMatcher {
    pub fn new(registry: &RoleRegistry) -> Result<Self> {
        let profiles = registry
            .profiles()
            .map(ProfileMatcher::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { profiles })
    }

    /// One match per role, best first; equal scores keep registry order
    pub fn match_all(&self, document: &ParsedDocument) -> Vec<RoleMatch> {
        let normalized = NormalizedDocument::new(document);
        let mut matches: Vec<RoleMatch> = self
            .profiles
            .iter()
            .map(|profile| Self::score_profile(profile, &normalized))
            .collect();

        crate::processing::ranking::sort_matches(&mut matches);
        matches
    }

    pub fn match_role(&self, document: &ParsedDocument, role: RoleCategory) -> Option<RoleMatch> {
        let normalized = NormalizedDocument::new(document);
        self.profiles
            .iter()
            .find(|p| p.profile.role == role)
            .map(|profile| Self::score_profile(profile, &normalized))
    }

    fn score_profile(matcher: &ProfileMatcher, document: &NormalizedDocument) -> RoleMatch {
        let profile = &matcher.profile;
        let mut matched: [Vec<String>; 4] = Default::default();
        let mut weighted = 0.0;

        for (slot, dimension) in matched.iter_mut().zip(Dimension::ALL) {
            let keywords = matcher
                .dimension(dimension)
                .matched(document.lines(dimension), &document.text);
            let total = profile.keywords(dimension).len();
            let fraction = if total == 0 { 0.0 } else { keywords.len() as f64 / total as f64 };
            weighted += fraction * profile.weights.get(dimension);
            *slot = keywords;
        }

        let raw_score = (weighted * 100.0).min(100.0).max(0.0);
        let score = raw_score.round() as u8;
        let [matched_skills, matched_experience, matched_education, matched_certifications] = matched;

        let counts = MatchCounts {
            skills: matched_skills.len(),
            experience: matched_experience.len(),
            education: matched_education.len(),
            certifications: matched_certifications.len(),
        };
        let reasoning = reasoning::match_reasoning(profile.role, raw_score, &counts);

        debug!(
            "{}: score {} (skills {}, experience {}, education {}, certifications {})",
            profile.role, score, counts.skills, counts.experience, counts.education, counts.certifications
        );

        RoleMatch {
            role: profile.role,
            score,
            matched_skills,
            matched_experience,
            matched_education,
            matched_certifications,
            reasoning,
        }
    }
}
