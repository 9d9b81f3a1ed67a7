/// Scaffold mode swaps the configured model provider for a local echo
/// client, so the UI can be exercised without an API key.
#[derive(Debug, Clone, Default)]
pub struct ScaffoldConfig {
    pub enabled: bool,
    pub mock_response_delay_ms: u64,
}

impl ScaffoldConfig {
    /// `SCAFFOLD_MODE=true|1` enables it; `MOCK_RESPONSE_DELAY` sets the echo
    /// delay in milliseconds.
    pub fn from_env() -> Self {
        Self {
            enabled: std::env::var("SCAFFOLD_MODE")
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
            mock_response_delay_ms: std::env::var("MOCK_RESPONSE_DELAY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        }
    }
}
