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
    pub env: Environment,
    pub log_level: String,
    pub settings_path: PathBuf,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    pub max_concurrent_feeds: usize,
    pub max_articles_per_feed: usize,
    pub top_n: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("settings_path", &self.settings_path)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_concurrent_feeds", &self.max_concurrent_feeds)
            .field("max_articles_per_feed", &self.max_articles_per_feed)
            .field("top_n", &self.top_n)
            .finish()
    }
}
