//! Static role profiles: keyword tables and dimension weights per role

use crate::error::{Result, RoleMatcherError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Allowed drift of a profile's weight sum from 1.0
pub const WEIGHT_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleCategory {
    #[serde(rename = "Customer Service")]
    CustomerService,
    #[serde(rename = "Medical Assistants")]
    MedicalAssistants,
    #[serde(rename = "NPs")]
    NursePractitioners,
    #[serde(rename = "RNs")]
    RegisteredNurses,
}

impl RoleCategory {
    /// Registry order; ties between equal scores resolve in this order
    pub const ALL: [RoleCategory; 4] = [
        RoleCategory::CustomerService,
        RoleCategory::MedicalAssistants,
        RoleCategory::NursePractitioners,
        RoleCategory::RegisteredNurses,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            RoleCategory::CustomerService => "Customer Service",
            RoleCategory::MedicalAssistants => "Medical Assistants",
            RoleCategory::NursePractitioners => "NPs",
            RoleCategory::RegisteredNurses => "RNs",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoleCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "customerservice" | "cs" => Ok(RoleCategory::CustomerService),
            "medicalassistants" | "medicalassistant" | "ma" | "mas" => Ok(RoleCategory::MedicalAssistants),
            "nps" | "np" | "nursepractitioners" | "nursepractitioner" => Ok(RoleCategory::NursePractitioners),
            "rns" | "rn" | "registerednurses" | "registerednurse" => Ok(RoleCategory::RegisteredNurses),
            _ => Err(format!(
                "Unknown role: {}. Supported: Customer Service, Medical Assistants, NPs, RNs",
                s
            )),
        }
    }
}

/// One evaluated facet of a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Skills,
    Experience,
    Education,
    Certifications,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Skills,
        Dimension::Experience,
        Dimension::Education,
        Dimension::Certifications,
    ];
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Skills => write!(f, "Skills"),
            Dimension::Experience => write!(f, "Experience"),
            Dimension::Education => write!(f, "Education"),
            Dimension::Certifications => write!(f, "Certifications"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub certifications: f64,
}

impl Weights {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Skills => self.skills,
            Dimension::Experience => self.experience,
            Dimension::Education => self.education,
            Dimension::Certifications => self.certifications,
        }
    }

    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.certifications
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub role: RoleCategory,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub education: Vec<String>,
    pub certifications: Vec<String>,
    pub weights: Weights,
}

impl RoleProfile {
    pub fn keywords(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Skills => &self.skills,
            Dimension::Experience => &self.experience,
            Dimension::Education => &self.education,
            Dimension::Certifications => &self.certifications,
        }
    }

    fn validate(&self) -> Result<()> {
        for dimension in Dimension::ALL {
            let weight = self.weights.get(dimension);
            if !weight.is_finite() || weight < 0.0 {
                return Err(RoleMatcherError::InvalidProfile(format!(
                    "{}: {} weight must be a non-negative number, got {}",
                    self.role, dimension, weight
                )));
            }

            let keywords = self.keywords(dimension);
            if keywords.is_empty() {
                return Err(RoleMatcherError::InvalidProfile(format!(
                    "{}: {} keyword list is empty",
                    self.role, dimension
                )));
            }

            let mut seen = HashSet::new();
            for keyword in keywords {
                if keyword.trim().is_empty() || keyword.to_lowercase() != *keyword {
                    return Err(RoleMatcherError::InvalidProfile(format!(
                        "{}: {} keyword {:?} must be a non-empty lowercase phrase",
                        self.role, dimension, keyword
                    )));
                }
                if !seen.insert(keyword.as_str()) {
                    return Err(RoleMatcherError::InvalidProfile(format!(
                        "{}: duplicate {} keyword {:?}",
                        self.role, dimension, keyword
                    )));
                }
            }
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(RoleMatcherError::InvalidProfile(format!(
                "{}: weights sum to {}, expected 1.0",
                self.role, sum
            )));
        }

        Ok(())
    }
}

/// Immutable table of validated profiles, one per role
#[derive(Debug, Clone)]
pub struct RoleRegistry {
    profiles: [RoleProfile; 4],
}

impl RoleRegistry {
    /// Build the registry from the built-in profile table
    pub fn standard() -> Result<Self> {
        Self::from_profiles(standard_profiles())
    }

    /// Validate and index a set of profiles; every role must appear exactly once
    pub fn from_profiles(mut profiles: Vec<RoleProfile>) -> Result<Self> {
        for profile in &profiles {
            profile.validate()?;
        }

        profiles.sort_by_key(|p| p.role);
        for (expected, profile) in RoleCategory::ALL.iter().zip(profiles.iter()) {
            if profile.role != *expected {
                return Err(RoleMatcherError::InvalidProfile(format!(
                    "expected exactly one profile for {}, found {}",
                    expected, profile.role
                )));
            }
        }

        let count = profiles.len();
        let profiles: [RoleProfile; 4] = profiles.try_into().map_err(|_| {
            RoleMatcherError::InvalidProfile(format!(
                "expected {} role profiles, found {}",
                RoleCategory::ALL.len(),
                count
            ))
        })?;

        Ok(Self { profiles })
    }

    pub fn get(&self, role: RoleCategory) -> &RoleProfile {
        &self.profiles[role.index()]
    }

    pub fn all_roles(&self) -> [RoleCategory; 4] {
        RoleCategory::ALL
    }

    pub fn profiles(&self) -> impl Iterator<Item = &RoleProfile> {
        self.profiles.iter()
    }
}

fn phrases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn standard_profiles() -> Vec<RoleProfile> {
    vec![
        RoleProfile {
            role: RoleCategory::CustomerService,
            skills: phrases(&[
                "customer service", "communication", "phone", "email", "problem solving",
                "multitasking", "appointment scheduling", "data entry", "typing",
                "conflict resolution", "empathy", "active listening", "patience",
                "microsoft office", "excel", "word", "outlook", "crm",
            ]),
            experience: phrases(&[
                "customer service", "receptionist", "front desk", "call center",
                "client relations", "patient relations", "administrative assistant",
                "office coordinator", "scheduler",
            ]),
            education: phrases(&[
                "high school", "associate", "bachelor", "business", "communication",
                "hospitality", "healthcare administration",
            ]),
            certifications: phrases(&["customer service certification", "medical receptionist"]),
            weights: Weights { skills: 0.3, experience: 0.4, education: 0.15, certifications: 0.15 },
        },
        RoleProfile {
            role: RoleCategory::MedicalAssistants,
            skills: phrases(&[
                "patient care", "vitals", "blood pressure", "temperature", "height",
                // deduplicated: a single "ekg" entry, so 29 skills rather than 30
                "weight", "phlebotomy", "injection", "ekg", "ecg",
                "wound care", "dressing", "sutures", "medical terminology",
                "ehr", "electronic health records", "appointment scheduling",
                "insurance", "billing", "coding", "cpt", "icd-10", "cpr", "bls",
                "medication administration", "specimen collection", "urinalysis",
                "point of care testing", "glucose monitoring",
            ]),
            experience: phrases(&[
                "medical assistant", "clinical assistant", "patient care technician",
                "certified medical assistant", "cma", "pct", "nursing assistant",
                "healthcare assistant",
            ]),
            education: phrases(&[
                "medical assistant", "cma", "certified medical assistant",
                "associate", "diploma", "certificate program", "healthcare",
            ]),
            certifications: phrases(&[
                "cma", "certified medical assistant", "cpr", "bls", "certified",
                "phlebotomy certification", "ekg certification",
            ]),
            weights: Weights { skills: 0.35, experience: 0.35, education: 0.2, certifications: 0.1 },
        },
        RoleProfile {
            role: RoleCategory::NursePractitioners,
            skills: phrases(&[
                "patient assessment", "diagnosis", "treatment", "prescribing",
                "medication management", "care plan", "chronic disease management",
                "primary care", "family practice", "internal medicine",
                "patient education", "health promotion", "preventive care",
                "clinical decision making", "diagnostic reasoning", "ehr",
                "telemedicine", "collaborative practice", "autonomous practice",
            ]),
            experience: phrases(&[
                "nurse practitioner", "np", "advanced practice", "primary care provider",
                "family nurse practitioner", "fnp", "adult gerontology", "agnp",
                "pediatric nurse practitioner", "pnp", "clinical nurse specialist",
                "provider", "clinician",
            ]),
            education: phrases(&[
                "nurse practitioner", "np", "master of science in nursing", "msn",
                "doctor of nursing practice", "dnp", "advanced practice",
                "bachelor of science in nursing", "bsn", "registered nurse",
            ]),
            certifications: phrases(&[
                "nurse practitioner", "np certification", "fnp", "agnp", "pnp",
                "ancc", "aanp", "board certified", "license", "prescriptive authority",
                "dea", "controlled substances",
            ]),
            weights: Weights { skills: 0.3, experience: 0.3, education: 0.25, certifications: 0.15 },
        },
        RoleProfile {
            role: RoleCategory::RegisteredNurses,
            skills: phrases(&[
                "nursing", "patient care", "assessment", "care plan", "medication",
                "iv therapy", "wound care", "patient education", "discharge planning",
                "documentation", "charting", "care coordination", "collaboration",
                "critical thinking", "clinical judgment", "patient advocacy",
                "medication administration", "nursing process", "nursing diagnosis",
                "acute care", "chronic care", "rehabilitation", "geriatrics",
            ]),
            experience: phrases(&[
                "registered nurse", "rn", "staff nurse", "nurse", "charge nurse",
                "clinical nurse", "bedside nurse", "nurse manager", "nurse supervisor",
                "hospital", "clinic", "long term care", "skilled nursing", "home health",
                "icu", "er", "emergency", "med surg", "medical surgical",
                "critical care", "cardiac", "orthopedic", "oncology", "pediatric",
            ]),
            education: phrases(&[
                "registered nurse", "rn", "bachelor of science in nursing", "bsn",
                "associate degree in nursing", "adn", "diploma in nursing",
                "nursing program", "nursing school",
            ]),
            certifications: phrases(&[
                "registered nurse", "rn license", "nclex", "state license",
                "bls", "cpr", "acls", "pals", "tncc", "certified",
                "cvicu", "ccrn", "oncology certified", "wound care certified",
            ]),
            weights: Weights { skills: 0.3, experience: 0.35, education: 0.2, certifications: 0.15 },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_builds() {
        let registry = RoleRegistry::standard().unwrap();
        assert_eq!(registry.all_roles(), RoleCategory::ALL);
        for role in RoleCategory::ALL {
            assert_eq!(registry.get(role).role, role);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let registry = RoleRegistry::standard().unwrap();
        for profile in registry.profiles() {
            assert!((profile.weights.sum() - 1.0).abs() < WEIGHT_EPSILON, "{}", profile.role);
        }
    }

    #[test]
    fn test_every_dimension_non_empty() {
        let registry = RoleRegistry::standard().unwrap();
        for profile in registry.profiles() {
            for dimension in Dimension::ALL {
                assert!(!profile.keywords(dimension).is_empty());
            }
        }
    }

    #[test]
    fn test_rejects_bad_weight_sum() {
        let mut profiles = standard_profiles();
        profiles[2].weights.skills = 0.5;
        let err = RoleRegistry::from_profiles(profiles).unwrap_err();
        assert!(matches!(err, RoleMatcherError::InvalidProfile(_)));
        assert!(err.to_string().contains("NPs"));
    }

    #[test]
    fn test_rejects_negative_weight() {
        let mut profiles = standard_profiles();
        profiles[0].weights = Weights { skills: -0.1, experience: 0.8, education: 0.15, certifications: 0.15 };
        assert!(RoleRegistry::from_profiles(profiles).is_err());
    }

    #[test]
    fn test_rejects_empty_keyword_list() {
        let mut profiles = standard_profiles();
        profiles[1].certifications.clear();
        assert!(RoleRegistry::from_profiles(profiles).is_err());
    }

    #[test]
    fn test_rejects_duplicate_and_uppercase_keywords() {
        let mut profiles = standard_profiles();
        profiles[1].skills.push("ekg".to_string());
        assert!(RoleRegistry::from_profiles(profiles).is_err());

        let mut profiles = standard_profiles();
        profiles[3].skills.push("ICU".to_string());
        assert!(RoleRegistry::from_profiles(profiles).is_err());
    }

    #[test]
    fn test_rejects_missing_or_duplicate_role() {
        let mut profiles = standard_profiles();
        profiles.pop();
        assert!(RoleRegistry::from_profiles(profiles).is_err());

        let mut profiles = standard_profiles();
        profiles[3] = profiles[2].clone();
        assert!(RoleRegistry::from_profiles(profiles).is_err());
    }

    #[test]
    fn test_accepts_shuffled_input() {
        let mut profiles = standard_profiles();
        profiles.reverse();
        let registry = RoleRegistry::from_profiles(profiles).unwrap();
        assert_eq!(registry.get(RoleCategory::CustomerService).role, RoleCategory::CustomerService);
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("NPs".parse::<RoleCategory>().unwrap(), RoleCategory::NursePractitioners);
        assert_eq!("rn".parse::<RoleCategory>().unwrap(), RoleCategory::RegisteredNurses);
        assert_eq!("customer-service".parse::<RoleCategory>().unwrap(), RoleCategory::CustomerService);
        assert_eq!("Medical Assistants".parse::<RoleCategory>().unwrap(), RoleCategory::MedicalAssistants);
        assert!("surgeon".parse::<RoleCategory>().is_err());
    }

    #[test]
    fn test_role_serializes_as_display_name() {
        let json = serde_json::to_string(&RoleCategory::CustomerService).unwrap();
        assert_eq!(json, "\"Customer Service\"");
        assert_eq!(RoleCategory::RegisteredNurses.to_string(), "RNs");
    }
}
