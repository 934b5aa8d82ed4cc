//! Templated explanations for role matches and batch rankings

use crate::processing::roles::RoleCategory;
use serde::{Deserialize, Serialize};

/// Number of matched keywords per dimension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCounts {
    pub skills: usize,
    pub experience: usize,
    pub education: usize,
    pub certifications: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Strong,
    Moderate,
    Limited,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        Self::from_percentage(f64::from(score))
    }

    /// Band for an unrounded percentage; 39.8 is still `Limited`
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ScoreBand::Excellent
        } else if percentage >= 60.0 {
            ScoreBand::Strong
        } else if percentage >= 40.0 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Limited
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Strong => "STRONG",
            ScoreBand::Moderate => "MODERATE",
            ScoreBand::Limited => "LIMITED",
        }
    }
}

/// Experience matches at or above this count get the "extensive" phrasing
const EXPERIENCE_HIGHLIGHT_THRESHOLD: usize = 3;
const EXPERIENCE_HIGHLIGHT_LIMIT: usize = 3;
const SKILLS_HIGHLIGHT_THRESHOLD: usize = 5;
const SIGNIFICANT_MARGIN: u8 = 10;
const NOTABLE_MARGIN: u8 = 5;

fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Sentences explaining one document's score for one role.
/// `raw_score` is the weighted percentage before rounding.
pub fn match_reasoning_sentences(role: RoleCategory, raw_score: f64, counts: &MatchCounts) -> Vec<String> {
    let mut parts = Vec::new();

    parts.push(match ScoreBand::from_percentage(raw_score) {
        ScoreBand::Excellent => format!("Excellent match for {} role.", role),
        ScoreBand::Strong => format!("Strong candidate for {} position.", role),
        ScoreBand::Moderate => format!("Moderate fit for {} role.", role),
        ScoreBand::Limited => format!("Limited alignment with {} requirements.", role),
    });

    if counts.experience > 0 {
        parts.push(format!(
            "Relevant experience found ({}).",
            plural(counts.experience, "match", "matches")
        ));
    }
    if counts.skills > 0 {
        parts.push(format!(
            "Matching skills identified ({}).",
            plural(counts.skills, "match", "matches")
        ));
    }
    if counts.education > 0 {
        parts.push(format!(
            "Relevant education credentials present ({}).",
            plural(counts.education, "match", "matches")
        ));
    }
    if counts.certifications > 0 {
        parts.push(format!(
            "Applicable certifications detected ({}).",
            plural(counts.certifications, "match", "matches")
        ));
    }

    parts
}

pub fn match_reasoning(role: RoleCategory, raw_score: f64, counts: &MatchCounts) -> String {
    match_reasoning_sentences(role, raw_score, counts).join(" ")
}

/// What the comparative summary needs to know about the winning candidate
#[derive(Debug, Clone, Copy)]
pub struct WinnerProfile<'a> {
    pub score: u8,
    pub matched_experience: &'a [String],
    pub matched_skills: &'a [String],
    pub certification_count: usize,
    pub education_count: usize,
}

/// Sentences explaining why the winner ranks first for a role.
///
/// `ranked_scores` holds every candidate's score for the role, sorted descending,
/// winner included at position 0.
pub fn comparative_reasoning(role: RoleCategory, winner: &WinnerProfile<'_>, ranked_scores: &[u8]) -> Vec<String> {
    let mut sentences = Vec::new();
    let candidates = ranked_scores.len().max(1);

    sentences.push(match ranked_scores.get(1) {
        Some(&runner_up) if winner.score.saturating_sub(runner_up) >= SIGNIFICANT_MARGIN => format!(
            "Scored {}%, significantly outperforming the next best candidate by {}%.",
            winner.score,
            winner.score - runner_up
        ),
        Some(&runner_up) if winner.score.saturating_sub(runner_up) >= NOTABLE_MARGIN => format!(
            "Scored {}%, higher than the next best candidate at {}%.",
            winner.score, runner_up
        ),
        _ => format!(
            "Top score of {}% among {}.",
            winner.score,
            plural(candidates, "candidate", "candidates")
        ),
    });

    let experience = winner.matched_experience;
    let highlighted: Vec<&str> = experience
        .iter()
        .take(EXPERIENCE_HIGHLIGHT_LIMIT)
        .map(String::as_str)
        .collect();
    sentences.push(if experience.len() >= EXPERIENCE_HIGHLIGHT_THRESHOLD {
        format!(
            "Extensive relevant experience ({} matches), including {}.",
            experience.len(),
            highlighted.join(", ")
        )
    } else if !experience.is_empty() {
        format!("Relevant experience in {}.", highlighted.join(" and "))
    } else {
        "No direct experience keywords matched; ranking is driven by other dimensions.".to_string()
    });

    let skills = winner.matched_skills;
    if skills.len() >= SKILLS_HIGHLIGHT_THRESHOLD {
        let top: Vec<&str> = skills.iter().take(SKILLS_HIGHLIGHT_THRESHOLD).map(String::as_str).collect();
        sentences.push(format!(
            "Broad skill coverage ({} matches), including {}.",
            skills.len(),
            top.join(", ")
        ));
    } else if !skills.is_empty() {
        let listed: Vec<&str> = skills.iter().map(String::as_str).collect();
        sentences.push(format!("Skills: {}.", listed.join(", ")));
    }

    if winner.certification_count > 0 {
        sentences.push(format!(
            "Holds {}.",
            plural(winner.certification_count, "relevant certification", "relevant certifications")
        ));
    }

    if winner.education_count > 0 {
        sentences.push(format!("Education aligns with {} requirements.", role));
    }

    sentences.push(match ScoreBand::from_score(winner.score) {
        ScoreBand::Excellent => format!("Overall an excellent fit for the {} role.", role),
        ScoreBand::Strong => format!("Overall a strong candidate for the {} position.", role),
        ScoreBand::Moderate => format!("Overall a moderate fit for the {} role.", role),
        ScoreBand::Limited => format!(
            "Best available option, though alignment with {} requirements is limited.",
            role
        ),
    });

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(60), ScoreBand::Strong);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(39), ScoreBand::Limited);
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Limited);
    }

    #[test]
    fn test_band_uses_unrounded_percentage() {
        assert_eq!(ScoreBand::from_percentage(39.84), ScoreBand::Limited);
        assert_eq!(ScoreBand::from_percentage(40.0), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_percentage(79.6), ScoreBand::Strong);

        let text = match_reasoning(RoleCategory::CustomerService, 39.84, &MatchCounts::default());
        assert_eq!(text, "Limited alignment with Customer Service requirements.");
        let text = match_reasoning(RoleCategory::RegisteredNurses, 79.6, &MatchCounts::default());
        assert_eq!(text, "Strong candidate for RNs position.");
    }

    #[test]
    fn test_limited_reasoning_without_matches() {
        let text = match_reasoning(RoleCategory::NursePractitioners, 0.0, &MatchCounts::default());
        assert_eq!(text, "Limited alignment with NPs requirements.");
    }

    #[test]
    fn test_clause_order_and_counts() {
        let counts = MatchCounts { skills: 4, experience: 1, education: 2, certifications: 3 };
        let sentences = match_reasoning_sentences(RoleCategory::RegisteredNurses, 65.0, &counts);
        assert_eq!(
            sentences,
            vec![
                "Strong candidate for RNs position.",
                "Relevant experience found (1 match).",
                "Matching skills identified (4 matches).",
                "Relevant education credentials present (2 matches).",
                "Applicable certifications detected (3 matches).",
            ]
        );
    }

    #[test]
    fn test_skips_empty_dimensions() {
        let counts = MatchCounts { skills: 0, experience: 0, education: 0, certifications: 1 };
        let text = match_reasoning(RoleCategory::CustomerService, 85.0, &counts);
        assert_eq!(
            text,
            "Excellent match for Customer Service role. Applicable certifications detected (1 match)."
        );
    }

    #[test]
    fn test_significant_margin() {
        let experience = words(&["registered nurse", "rn", "nurse", "icu"]);
        let skills = words(&["nursing", "assessment"]);
        let winner = WinnerProfile {
            score: 85,
            matched_experience: &experience,
            matched_skills: &skills,
            certification_count: 2,
            education_count: 1,
        };
        let sentences = comparative_reasoning(RoleCategory::RegisteredNurses, &winner, &[85, 70, 40]);

        assert!(sentences[0].contains("significantly outperforming"));
        assert!(sentences[0].contains("15%"));
        assert_eq!(
            sentences[1],
            "Extensive relevant experience (4 matches), including registered nurse, rn, nurse."
        );
        assert_eq!(sentences[2], "Skills: nursing, assessment.");
        assert_eq!(sentences[3], "Holds 2 relevant certifications.");
        assert_eq!(sentences[4], "Education aligns with RNs requirements.");
        assert_eq!(sentences[5], "Overall an excellent fit for the RNs role.");
    }

    #[test]
    fn test_moderate_and_narrow_margins() {
        let experience = words(&["medical assistant"]);
        let winner = WinnerProfile {
            score: 52,
            matched_experience: &experience,
            matched_skills: &[],
            certification_count: 1,
            education_count: 0,
        };

        let notable = comparative_reasoning(RoleCategory::MedicalAssistants, &winner, &[52, 45]);
        assert_eq!(notable[0], "Scored 52%, higher than the next best candidate at 45%.");
        assert_eq!(notable[1], "Relevant experience in medical assistant.");
        assert_eq!(notable[2], "Holds 1 relevant certification.");
        assert_eq!(notable[3], "Overall a moderate fit for the Medical Assistants role.");
        assert_eq!(notable.len(), 4);

        let narrow = comparative_reasoning(RoleCategory::MedicalAssistants, &winner, &[52, 52, 10]);
        assert_eq!(narrow[0], "Top score of 52% among 3 candidates.");
    }

    #[test]
    fn test_single_candidate() {
        let skills = words(&["phone", "email", "typing", "excel", "word", "crm"]);
        let winner = WinnerProfile {
            score: 30,
            matched_experience: &[],
            matched_skills: &skills,
            certification_count: 0,
            education_count: 0,
        };
        let sentences = comparative_reasoning(RoleCategory::CustomerService, &winner, &[30]);
        assert_eq!(sentences[0], "Top score of 30% among 1 candidate.");
        assert!(sentences[1].starts_with("No direct experience keywords matched"));
        assert_eq!(
            sentences[2],
            "Broad skill coverage (6 matches), including phone, email, typing, excel, word."
        );
        assert!(sentences[3].starts_with("Best available option"));
    }
}
