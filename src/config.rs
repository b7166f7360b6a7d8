pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_START_PATH: &str = "/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub start_path: String,
    pub timeout_secs: u64,
    pub demo: bool,
    pub offline_cache: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            start_path: DEFAULT_START_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            demo: false,
            offline_cache: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let base_url = lookup("MATCHDAY_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);
        let start_path = lookup("MATCHDAY_START_PATH")
            .map(|v| normalize_path(&v))
            .unwrap_or(defaults.start_path);
        let timeout_secs = lookup("MATCHDAY_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(defaults.timeout_secs)
            .max(1);
        let demo = lookup("MATCHDAY_DEMO")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.demo);
        let offline_cache = lookup("MATCHDAY_OFFLINE_CACHE")
            .and_then(|v| parse_flag(&v))
            .unwrap_or(defaults.offline_cache);
        Self {
            base_url,
            start_path,
            timeout_secs,
            demo,
            offline_cache,
        }
    }

    /// Command-line switches override the environment.
    pub fn apply_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            match arg.as_ref() {
                "--demo" => self.demo = true,
                "--no-cache" => self.offline_cache = false,
                _ => {}
            }
        }
        self
    }

    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.base_url, normalize_path(path))
    }
}

pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
