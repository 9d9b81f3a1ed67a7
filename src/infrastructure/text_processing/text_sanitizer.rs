use unicode_normalization::UnicodeNormalization;

/// NFKC-normalizes raw text pulled out of a PDF page and drops control
/// characters other than newline and tab. Wording, hyphens and spacing are
/// left exactly as the parser produced them.
pub fn sanitize_extracted_text(raw: &str) -> String {
    raw.nfkc()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}
