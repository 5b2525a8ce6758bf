use std::env;

/// Explicit Gemini client configuration.
///
/// There is deliberately no process-global client: callers construct a config,
/// hand it to the adapter, and tests substitute a fake transport. `from_env`
/// is the only place the environment is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl GeminiConfig {
    pub const API_KEY_VAR: &'static str = "GEMINI_API_KEY";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/v1beta";
    pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: String::from(Self::DEFAULT_MODEL),
            base_url: String::from(Self::DEFAULT_BASE_URL),
            timeout_ms: Self::DEFAULT_TIMEOUT_MS,
        }
    }

    /// Read the API key from `GEMINI_API_KEY`, if set and non-empty.
    pub fn from_env() -> Option<Self> {
        env::var(Self::API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self::new)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}
