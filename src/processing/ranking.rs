//! Ordering of matches within a document and of candidates across a batch

use crate::processing::analyzer::DocumentAnalysis;
use crate::processing::matcher::RoleMatch;
use crate::processing::reasoning::{self, WinnerProfile};
use crate::processing::roles::RoleCategory;
use std::collections::BTreeMap;

/// Sort best first. The sort is stable, so equal scores keep their current order.
pub fn sort_matches(matches: &mut [RoleMatch]) {
    matches.sort_by(|a, b| b.score.cmp(&a.score));
}

/// One document's standing for a single role
#[derive(Debug, Clone, Copy)]
pub struct RankedCandidate<'a> {
    /// Position of the document in the uploaded batch
    pub position: usize,
    pub analysis: &'a DocumentAnalysis,
    pub role_match: &'a RoleMatch,
}

impl RankedCandidate<'_> {
    pub fn display_name(&self) -> String {
        self.analysis.display_name(self.position)
    }

    pub fn score(&self) -> u8 {
        self.role_match.score
    }
}

/// All candidates for `role`, best first; ties keep upload order
pub fn rank_for_role(role: RoleCategory, analyses: &[DocumentAnalysis]) -> Vec<RankedCandidate<'_>> {
    let mut ranked: Vec<RankedCandidate<'_>> = analyses
        .iter()
        .enumerate()
        .filter_map(|(position, analysis)| {
            analysis.match_for(role).map(|role_match| RankedCandidate {
                position,
                analysis,
                role_match,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score().cmp(&a.score()));
    ranked
}

/// Highest scoring candidate for `role`, earliest upload on ties. `None` only for an empty batch.
pub fn best_for_role(role: RoleCategory, analyses: &[DocumentAnalysis]) -> Option<RankedCandidate<'_>> {
    rank_for_role(role, analyses).into_iter().next()
}

/// Best candidate for each role, chosen independently per role
pub fn best_per_role(analyses: &[DocumentAnalysis]) -> BTreeMap<RoleCategory, RankedCandidate<'_>> {
    RoleCategory::ALL
        .into_iter()
        .filter_map(|role| best_for_role(role, analyses).map(|best| (role, best)))
        .collect()
}

/// Why the top-ranked candidate wins `role`, given the full ranking for that role
pub fn explain_winner(role: RoleCategory, ranked: &[RankedCandidate<'_>]) -> Vec<String> {
    let Some(winner) = ranked.first() else {
        return Vec::new();
    };

    let scores: Vec<u8> = ranked.iter().map(RankedCandidate::score).collect();
    let counts = winner.role_match.counts();
    let profile = WinnerProfile {
        score: winner.score(),
        matched_experience: &winner.role_match.matched_experience,
        matched_skills: &winner.role_match.matched_skills,
        certification_count: counts.certifications,
        education_count: counts.education,
    };

    reasoning::comparative_reasoning(role, &profile, &scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::ParsedDocument;
    use crate::processing::reasoning::match_reasoning;

    fn role_match(role: RoleCategory, score: u8) -> RoleMatch {
        RoleMatch {
            role,
            score,
            matched_skills: Vec::new(),
            matched_experience: Vec::new(),
            matched_education: Vec::new(),
            matched_certifications: Vec::new(),
            reasoning: match_reasoning(role, f64::from(score), &Default::default()),
        }
    }

    fn analysis(source: &str, scores: [u8; 4]) -> DocumentAnalysis {
        let mut matches: Vec<RoleMatch> = RoleCategory::ALL
            .into_iter()
            .zip(scores)
            .map(|(role, score)| role_match(role, score))
            .collect();
        sort_matches(&mut matches);
        DocumentAnalysis {
            source: source.to_string(),
            document: ParsedDocument::from_text(source),
            matches,
        }
    }

    #[test]
    fn test_sort_matches_is_stable() {
        let mut matches = vec![
            role_match(RoleCategory::CustomerService, 10),
            role_match(RoleCategory::MedicalAssistants, 40),
            role_match(RoleCategory::NursePractitioners, 10),
            role_match(RoleCategory::RegisteredNurses, 40),
        ];
        sort_matches(&mut matches);
        let roles: Vec<RoleCategory> = matches.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![
                RoleCategory::MedicalAssistants,
                RoleCategory::RegisteredNurses,
                RoleCategory::CustomerService,
                RoleCategory::NursePractitioners,
            ]
        );
    }

    #[test]
    fn test_rank_for_role_preserves_upload_order_on_ties() {
        let batch = vec![
            analysis("a.txt", [5, 5, 30, 5]),
            analysis("b.txt", [5, 5, 60, 5]),
            analysis("c.txt", [5, 5, 30, 5]),
        ];
        let ranked = rank_for_role(RoleCategory::NursePractitioners, &batch);
        let order: Vec<usize> = ranked.iter().map(|c| c.position).collect();
        assert_eq!(order, vec![1, 0, 2]);
    }

    #[test]
    fn test_best_for_role_tie_goes_to_first_upload() {
        let batch = vec![
            analysis("first.txt", [5, 5, 20, 5]),
            analysis("second.txt", [5, 5, 72, 5]),
            analysis("third.txt", [5, 5, 72, 5]),
        ];
        let best = best_for_role(RoleCategory::NursePractitioners, &batch).unwrap();
        assert_eq!(best.analysis.source, "second.txt");
        assert_eq!(best.position, 1);
    }

    #[test]
    fn test_best_for_role_empty_batch() {
        assert!(best_for_role(RoleCategory::RegisteredNurses, &[]).is_none());
        assert!(best_per_role(&[]).is_empty());
    }

    #[test]
    fn test_best_for_role_with_zero_scores() {
        let batch = vec![analysis("blank.txt", [0, 0, 0, 0])];
        let best = best_for_role(RoleCategory::CustomerService, &batch).unwrap();
        assert_eq!(best.score(), 0);
    }

    #[test]
    fn test_best_per_role_not_exclusive() {
        let batch = vec![
            analysis("star.txt", [90, 85, 10, 80]),
            analysis("np.txt", [10, 10, 70, 20]),
        ];
        let best = best_per_role(&batch);
        assert_eq!(best.len(), 4);
        assert_eq!(best[&RoleCategory::CustomerService].position, 0);
        assert_eq!(best[&RoleCategory::MedicalAssistants].position, 0);
        assert_eq!(best[&RoleCategory::RegisteredNurses].position, 0);
        assert_eq!(best[&RoleCategory::NursePractitioners].position, 1);
    }

    #[test]
    fn test_display_name_falls_back_to_position() {
        let batch = vec![analysis("x.txt", [1, 2, 3, 4]), analysis("y.txt", [4, 3, 2, 1])];
        let ranked = rank_for_role(RoleCategory::CustomerService, &batch);
        assert_eq!(ranked[0].display_name(), "Candidate 2");
    }

    #[test]
    fn test_explain_winner() {
        let batch = vec![analysis("a.txt", [5, 5, 70, 5]), analysis("b.txt", [5, 5, 85, 5])];
        let ranked = rank_for_role(RoleCategory::NursePractitioners, &batch);
        let reasons = explain_winner(RoleCategory::NursePractitioners, &ranked);
        assert!(reasons[0].contains("significantly outperforming"));
        assert!(reasons[0].contains("15%"));
        assert!(explain_winner(RoleCategory::NursePractitioners, &[]).is_empty());
    }
}
