use crate::domain::{AnalysisType, Language};

/// Documents longer than this many characters are cut before being embedded.
pub const MAX_DOCUMENT_CHARS: usize = 50_000;

const PERSONA: &str = "You are a legal AI assistant specializing in document analysis. \
You help users understand legal documents and answer questions about them.";

const GUIDELINES: &str = "IMPORTANT GUIDELINES:
1. Keep responses concise and focused on the user's question
2. Limit responses to a maximum of 2048 tokens
3. Use plain language to explain complex legal concepts
4. Acknowledge when you're uncertain or when the document doesn't contain needed information
5. Do not provide definitive legal advice - remind the user to consult a qualified attorney when appropriate
6. Format responses with headings and bullet points when it improves readability";

/// Returns at most the first [`MAX_DOCUMENT_CHARS`] characters of `text`.
pub fn truncate_document(text: &str) -> &str {
    match text.char_indices().nth(MAX_DOCUMENT_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Builds the instruction block for one document under the given lens and
/// output language. Pure: equal inputs always give equal output.
pub fn compose_system_prompt(
    document_text: &str,
    analysis_type: AnalysisType,
    language: Language,
) -> String {
    format!(
        "{persona}\n\n\
         You have the following document to analyze:\n\n\
         {document}\n\n\
         {language}\n\n\
         {guidelines}\n\n\
         ANALYSIS CONTEXT: {context}",
        persona = PERSONA,
        document = truncate_document(document_text),
        language = language.directive(),
        guidelines = GUIDELINES,
        context = analysis_type.directive(),
    )
}

/// The text actually sent for one user turn.
pub fn compose_turn_prompt(system_prompt: &str, question: &str) -> String {
    format!("{}\n\nUser question: {}", system_prompt, question)
}
