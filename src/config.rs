//! Configuration management for the role matcher

use crate::error::{Result, RoleMatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    pub max_experience_entries: usize,
    pub max_education_entries: usize,
    pub max_name_length: usize,
    pub skill_vocabulary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    pub enable_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub show_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_experience_entries: 5,
            max_education_entries: 3,
            max_name_length: 50,
            skill_vocabulary: default_skill_vocabulary(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction: ExtractionConfig::default(),
            input: InputConfig { enable_cache: true },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
                show_progress: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| RoleMatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| RoleMatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-role-matcher")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if self.extraction.max_name_length == 0 {
            return Err(RoleMatcherError::Configuration(
                "extraction.max_name_length must be greater than zero".to_string(),
            ));
        }
        if let Some(bad) = self
            .extraction
            .skill_vocabulary
            .iter()
            .find(|s| s.trim().is_empty() || s.to_lowercase() != **s)
        {
            return Err(RoleMatcherError::Configuration(format!(
                "extraction.skill_vocabulary entries must be non-empty lowercase phrases, got {:?}",
                bad
            )));
        }
        Ok(())
    }
}

/// Skill phrases recognised by the field extractor, grouped loosely by area
fn default_skill_vocabulary() -> Vec<String> {
    vec![
        // Medical
        "patient care", "medical terminology", "hipaa", "ehr", "electronic health records",
        "vitals", "phlebotomy", "injection", "medication administration", "scheduling",
        "insurance", "billing", "coding", "cpt", "icd-10",
        // Nursing
        "nursing", "clinical", "assessment", "diagnosis", "treatment", "care plan",
        "medication management", "patient education", "discharge planning",
        // Customer service
        "customer service", "communication", "problem solving", "multitasking",
        "phone etiquette", "data entry", "appointment scheduling", "conflict resolution",
        // General
        "microsoft office", "excel", "word", "outlook", "typing", "organization",
        "teamwork", "leadership", "time management",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
        assert_eq!(config.extraction.max_experience_entries, 5);
        assert_eq!(config.extraction.max_education_entries, 3);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.output.format = OutputFormat::Markdown;
        config.extraction.max_experience_entries = 8;
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.output.format, OutputFormat::Markdown);
        assert_eq!(reloaded.extraction.max_experience_entries, 8);
    }

    #[test]
    fn test_rejects_uppercase_vocabulary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.extraction.skill_vocabulary.push("Triage".to_string());
        config.save_to(&path).unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(RoleMatcherError::Configuration(_))));
    }

    #[test]
    fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "extraction = 12").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
