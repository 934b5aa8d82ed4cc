//! Report model handed to the presentation layer

use crate::processing::analyzer::{BatchAnalysis, FailedDocument};
use crate::processing::matcher::RoleMatch;
use crate::processing::ranking;
use crate::processing::roles::RoleCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything produced for one batch of resumes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: DateTime<Utc>,
    pub attempted: usize,
    pub succeeded: usize,
    pub documents: Vec<DocumentSummary>,
    /// One entry per role, in registry order
    pub roles: Vec<RoleSummary>,
    pub failures: Vec<FailedDocument>,
}

/// Per-document view: contact details and all four matches, best first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub position: usize,
    pub source: String,
    pub display_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub matches: Vec<RoleMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSummary {
    pub role: RoleCategory,
    /// `None` when no document was analyzed
    pub best: Option<BestCandidate>,
    pub ranking: Vec<RankingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestCandidate {
    pub display_name: String,
    pub source: String,
    pub email: Option<String>,
    pub score: u8,
    /// Comparative explanation, one sentence per entry
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub display_name: String,
    pub email: Option<String>,
    pub score: u8,
    pub experience_matches: usize,
    pub skills_matches: usize,
    pub certification_matches: usize,
}

impl BatchReport {
    pub fn build(batch: &BatchAnalysis) -> Self {
        Self::build_at(batch, Utc::now())
    }

    pub fn build_at(batch: &BatchAnalysis, generated_at: DateTime<Utc>) -> Self {
        let documents = batch
            .analyses
            .iter()
            .enumerate()
            .map(|(position, analysis)| DocumentSummary {
                position,
                source: analysis.source.clone(),
                display_name: analysis.display_name(position),
                email: analysis.document.email.clone(),
                phone: analysis.document.phone.clone(),
                matches: analysis.matches.clone(),
            })
            .collect();

        let roles = RoleCategory::ALL
            .into_iter()
            .map(|role| Self::summarize_role(role, batch))
            .collect();

        Self {
            generated_at,
            attempted: batch.attempted,
            succeeded: batch.succeeded(),
            documents,
            roles,
            failures: batch.failures.clone(),
        }
    }

    fn summarize_role(role: RoleCategory, batch: &BatchAnalysis) -> RoleSummary {
        let ranked = ranking::rank_for_role(role, &batch.analyses);

        let best = ranked.first().map(|winner| BestCandidate {
            display_name: winner.display_name(),
            source: winner.analysis.source.clone(),
            email: winner.analysis.document.email.clone(),
            score: winner.score(),
            reasons: ranking::explain_winner(role, &ranked),
        });

        let ranking = ranked
            .iter()
            .enumerate()
            .map(|(i, candidate)| {
                let counts = candidate.role_match.counts();
                RankingEntry {
                    rank: i + 1,
                    display_name: candidate.display_name(),
                    email: candidate.analysis.document.email.clone(),
                    score: candidate.score(),
                    experience_matches: counts.experience,
                    skills_matches: counts.skills,
                    certification_matches: counts.certifications,
                }
            })
            .collect();

        RoleSummary { role, best, ranking }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn role(&self, role: RoleCategory) -> Option<&RoleSummary> {
        self.roles.iter().find(|summary| summary.role == role)
    }
}
