use std::env;

/// Origins allowed to call the API from a browser, read from
/// `ALLOWED_ORIGINS` as a comma-separated list.
#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

        Self::parse(&raw)
    }

    /// Origins are compared against the `Origin` header verbatim, so entries
    /// are trimmed and stripped of any trailing slash.
    fn parse(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Self { allowed_origins }
    }
}
