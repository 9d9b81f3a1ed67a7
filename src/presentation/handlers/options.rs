use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::application::ports::{FileLoader, LlmClient};
use crate::application::services::MAX_DOCUMENT_CHARS;
use crate::domain::{
    AnalysisType, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, DocumentFormat, Language,
    MAX_OUTPUT_TOKENS_RANGE, MAX_OUTPUT_TOKENS_STEP, PREVIEW_CHARS, TEMPERATURE_RANGE,
    TEMPERATURE_STEP,
};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct OptionsResponse {
    pub analysis_types: Vec<&'static str>,
    pub default_analysis_type: &'static str,
    pub languages: Vec<&'static str>,
    pub default_language: &'static str,
    pub temperature: RangeOption<f32>,
    pub max_output_tokens: RangeOption<u32>,
    pub supported_formats: Vec<&'static str>,
    pub max_upload_size_mb: usize,
    pub preview_chars: usize,
    pub max_document_chars: usize,
}

#[derive(Serialize)]
pub struct RangeOption<T> {
    pub min: T,
    pub max: T,
    pub step: T,
    pub default: T,
}

/// Everything the page needs to render its controls.
pub async fn options_handler<F, L>(State(state): State<AppState<F, L>>) -> Json<OptionsResponse>
where
    F: FileLoader + 'static,
    L: LlmClient + ?Sized + 'static,
{
    Json(OptionsResponse {
        analysis_types: AnalysisType::ALL.iter().map(|t| t.as_str()).collect(),
        default_analysis_type: AnalysisType::default().as_str(),
        languages: Language::ALL.iter().map(|l| l.as_str()).collect(),
        default_language: Language::default().as_str(),
        temperature: RangeOption {
            min: *TEMPERATURE_RANGE.start(),
            max: *TEMPERATURE_RANGE.end(),
            step: TEMPERATURE_STEP,
            default: DEFAULT_TEMPERATURE,
        },
        max_output_tokens: RangeOption {
            min: *MAX_OUTPUT_TOKENS_RANGE.start(),
            max: *MAX_OUTPUT_TOKENS_RANGE.end(),
            step: MAX_OUTPUT_TOKENS_STEP,
            default: DEFAULT_MAX_OUTPUT_TOKENS,
        },
        supported_formats: DocumentFormat::ALL.iter().map(|f| f.extension()).collect(),
        max_upload_size_mb: state.settings.server.max_upload_size_mb,
        preview_chars: PREVIEW_CHARS,
        max_document_chars: MAX_DOCUMENT_CHARS,
    })
}
