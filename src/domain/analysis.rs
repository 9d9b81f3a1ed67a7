use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use super::SessionError;

pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=1.0;
pub const TEMPERATURE_STEP: f32 = 0.1;
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

pub const MAX_OUTPUT_TOKENS_RANGE: RangeInclusive<u32> = 100..=4096;
pub const MAX_OUTPUT_TOKENS_STEP: u32 = 100;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Lens that steers what the model focuses on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnalysisType {
    #[default]
    GeneralLegal,
    RiskAssessment,
    ComplianceReview,
    ContractReview,
    ClauseExplanation,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 5] = [
        Self::GeneralLegal,
        Self::RiskAssessment,
        Self::ComplianceReview,
        Self::ContractReview,
        Self::ClauseExplanation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralLegal => "General Legal",
            Self::RiskAssessment => "Risk Assessment",
            Self::ComplianceReview => "Compliance Review",
            Self::ContractReview => "Contract Review",
            Self::ClauseExplanation => "Clause Explanation",
        }
    }

    /// The instruction sentence appended to every prompt for this lens.
    pub fn directive(&self) -> &'static str {
        match self {
            Self::GeneralLegal => {
                "Focus on general document understanding, summarization, and broad legal concepts."
            }
            Self::RiskAssessment => {
                "Focus on identifying potential legal risks, liabilities, and ambiguous clauses that could lead to disputes."
            }
            Self::ComplianceReview => {
                "Focus on compliance issues, regulatory concerns, and suggestions for improving compliance."
            }
            Self::ContractReview => {
                "Focus on contractual terms, obligations, rights, and potential negotiation points."
            }
            Self::ClauseExplanation => {
                "Focus on explaining specific clauses in plain language and highlighting their implications."
            }
        }
    }
}

impl FromStr for AnalysisType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid analysis type: {}", s))
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Chinese,
    Japanese,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Self::English,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Chinese,
        Self::Japanese,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
        }
    }

    pub fn directive(&self) -> String {
        match self {
            Self::English => "Respond in English.".to_string(),
            other => format!("Always respond in {}.", other.as_str()),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid language: {}", s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Live per-session settings, read fresh on every prompt composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    pub analysis_type: AnalysisType,
    pub language: Language,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            analysis_type: AnalysisType::default(),
            language: Language::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisConfigUpdate {
    pub analysis_type: Option<AnalysisType>,
    pub language: Option<Language>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl AnalysisConfig {
    /// Validates every field of `update` before touching `self`, so a
    /// rejected update leaves the configuration unchanged.
    pub fn apply(&mut self, update: AnalysisConfigUpdate) -> Result<(), SessionError> {
        if let Some(temperature) = update.temperature {
            if !temperature.is_finite() || !TEMPERATURE_RANGE.contains(&temperature) {
                return Err(SessionError::InvalidConfig(format!(
                    "temperature must be between {} and {}, got {}",
                    TEMPERATURE_RANGE.start(),
                    TEMPERATURE_RANGE.end(),
                    temperature
                )));
            }
        }

        if let Some(max_output_tokens) = update.max_output_tokens {
            if !MAX_OUTPUT_TOKENS_RANGE.contains(&max_output_tokens) {
                return Err(SessionError::InvalidConfig(format!(
                    "max_output_tokens must be between {} and {}, got {}",
                    MAX_OUTPUT_TOKENS_RANGE.start(),
                    MAX_OUTPUT_TOKENS_RANGE.end(),
                    max_output_tokens
                )));
            }
        }

        if let Some(analysis_type) = update.analysis_type {
            self.analysis_type = analysis_type;
        }
        if let Some(language) = update.language {
            self.language = language;
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(max_output_tokens) = update.max_output_tokens {
            self.max_output_tokens = max_output_tokens;
        }

        Ok(())
    }
}
