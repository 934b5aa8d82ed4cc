//! Analysis engine: extraction, scoring and batch bookkeeping

use crate::config::Config;
use crate::error::Result;
use crate::input::manager::InputManager;
use crate::processing::document::{FieldExtractor, ParsedDocument};
use crate::processing::matcher::{RoleMatch, RoleMatcher};
use crate::processing::roles::{RoleCategory, RoleRegistry};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One analyzed document with its four role matches, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentAnalysis {
    pub source: String,
    pub document: ParsedDocument,
    pub matches: Vec<RoleMatch>,
}

impl DocumentAnalysis {
    pub fn match_for(&self, role: RoleCategory) -> Option<&RoleMatch> {
        self.matches.iter().find(|m| m.role == role)
    }

    pub fn best_match(&self) -> Option<&RoleMatch> {
        self.matches.first()
    }

    /// Detected name, or a positional label when none was found
    pub fn display_name(&self, position: usize) -> String {
        self.document
            .name
            .clone()
            .unwrap_or_else(|| format!("Candidate {}", position + 1))
    }
}

/// A document that could not be analyzed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedDocument {
    pub source: String,
    pub error: String,
}

/// Outcome of analyzing several documents. Successful analyses keep upload order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchAnalysis {
    pub attempted: usize,
    pub analyses: Vec<DocumentAnalysis>,
    pub failures: Vec<FailedDocument>,
}

impl BatchAnalysis {
    pub fn succeeded(&self) -> usize {
        self.analyses.len()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} of {} document(s) analyzed, {} failed",
            self.succeeded(),
            self.attempted,
            self.failures.len()
        )
    }
}

/// Coordinates text extraction, field extraction and role scoring
pub struct AnalysisEngine {
    extractor: FieldExtractor,
    matcher: RoleMatcher,
    input: InputManager,
    show_progress: bool,
}

impl AnalysisEngine {
    /// Fails when the role profile table is invalid
    pub fn new(config: &Config) -> Result<Self> {
        let registry = RoleRegistry::standard()?;
        let matcher = RoleMatcher::new(&registry)?;
        let extractor = FieldExtractor::new(&config.extraction)?;
        let input = InputManager::new().with_cache(config.input.enable_cache);

        Ok(Self {
            extractor,
            matcher,
            input,
            show_progress: config.output.show_progress,
        })
    }

    pub fn with_progress(mut self, enable: bool) -> Self {
        self.show_progress = enable;
        self
    }

    pub fn analyze_document(&self, source: impl Into<String>, document: ParsedDocument) -> DocumentAnalysis {
        let source = source.into();
        let matches = self.matcher.match_all(&document);

        if let Some(best) = matches.first() {
            debug!("{}: best role {} at {}%", source, best.role, best.score);
        }

        DocumentAnalysis {
            source,
            document,
            matches,
        }
    }

    pub fn analyze_text(&self, source: impl Into<String>, text: &str) -> DocumentAnalysis {
        self.analyze_document(source, self.extractor.extract(text))
    }

    pub async fn analyze_file(&mut self, path: &Path) -> Result<DocumentAnalysis> {
        let text = self.input.extract_text(path).await?;
        Ok(self.analyze_text(path.display().to_string(), &text))
    }

    /// Analyze every file, recording failures instead of stopping at the first one
    pub async fn analyze_batch(&mut self, paths: &[PathBuf]) -> BatchAnalysis {
        let progress = if self.show_progress {
            let bar = ProgressBar::new(paths.len() as u64);
            if let Ok(style) = ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}") {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut batch = BatchAnalysis {
            attempted: paths.len(),
            ..BatchAnalysis::default()
        };

        for path in paths {
            progress.set_message(path.display().to_string());
            match self.analyze_file(path).await {
                Ok(analysis) => batch.analyses.push(analysis),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    batch.failures.push(FailedDocument {
                        source: path.display().to_string(),
                        error: e.to_string(),
                    });
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!("{}", batch.summary());
        batch
    }
}
