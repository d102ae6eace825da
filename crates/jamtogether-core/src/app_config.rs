use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub backend_url: String,
    pub env: Environment,
    pub log_level: String,
    pub user_agent: String,
    pub catalog_path: Option<PathBuf>,
    pub loading_interval_ms: u64,
    pub default_start_hour: u8,
    pub default_end_hour: u8,
    pub default_min_hours: u8,
}

impl AppConfig {
    /// Backend URL with any `user:password@` userinfo replaced, safe for logs.
    #[must_use]
    pub fn backend_url_redacted(&self) -> String {
        redact_userinfo(&self.backend_url)
    }
}

fn redact_userinfo(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => format!("{scheme}://[redacted]@{}", &rest[at + 1..]),
        None => url.to_string(),
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("backend_url", &self.backend_url_redacted())
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("user_agent", &self.user_agent)
            .field("catalog_path", &self.catalog_path)
            .field("loading_interval_ms", &self.loading_interval_ms)
            .field("default_start_hour", &self.default_start_hour)
            .field("default_end_hour", &self.default_end_hour)
            .field("default_min_hours", &self.default_min_hours)
            .finish()
    }
}
