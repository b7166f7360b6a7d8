use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const CACHE_DIR: &str = "matchday_terminal";
const CACHE_FILE: &str = "pages.json";
const CACHE_VERSION: u32 = 1;
pub const MAX_ENTRIES: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PageCacheFile {
    version: u32,
    entries: HashMap<String, CachedPage>,
}

/// Last good bridge body seen for a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPage {
    pub body: String,
    pub fetched_at: u64,
}

/// Offline snapshots keyed by request path. A cache without a backing file
/// keeps entries in memory only.
#[derive(Debug, Default)]
pub struct PageCache {
    path: Option<PathBuf>,
    file: PageCacheFile,
}

impl PageCache {
    pub fn open_default() -> Self {
        match cache_path() {
            Some(path) => Self::open(path),
            None => Self::in_memory(),
        }
    }

    pub fn open(path: PathBuf) -> Self {
        let file = load_cache_file(&path).unwrap_or_default();
        Self {
            path: Some(path),
            file,
        }
    }

    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<&CachedPage> {
        self.file.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.file.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file.entries.is_empty()
    }

    pub fn store(&mut self, path: &str, body: &str) -> Result<()> {
        let fetched_at = system_time_to_secs(SystemTime::now()).unwrap_or_default();
        self.insert(path, body, fetched_at);
        match &self.path {
            Some(file_path) => save_cache_file(file_path, &self.file),
            None => Ok(()),
        }
    }

    /// Oldest snapshots go first once the cap is reached; `path` itself is kept.
    fn insert(&mut self, path: &str, body: &str, fetched_at: u64) {
        self.file.version = CACHE_VERSION;
        self.file.entries.insert(
            path.to_string(),
            CachedPage {
                body: body.to_string(),
                fetched_at,
            },
        );
        while self.file.entries.len() > MAX_ENTRIES {
            let oldest = self
                .file
                .entries
                .iter()
                .filter(|(key, _)| key.as_str() != path)
                .min_by(|a, b| a.1.fetched_at.cmp(&b.1.fetched_at).then(a.0.cmp(b.0)))
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    self.file.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

fn load_cache_file(path: &Path) -> Option<PageCacheFile> {
    let raw = fs::read_to_string(path).ok()?;
    let cache = serde_json::from_str::<PageCacheFile>(&raw).ok()?;
    if cache.version != CACHE_VERSION {
        return None;
    }
    Some(cache)
}

fn save_cache_file(path: &Path, cache: &PageCacheFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).context("create page cache dir")?;
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize page cache")?;
    fs::write(&tmp, json).context("write page cache")?;
    fs::rename(&tmp, path).context("swap page cache")?;
    Ok(())
}

fn cache_path() -> Option<PathBuf> {
    if let Ok(base) = std::env::var("XDG_CACHE_HOME")
        && !base.trim().is_empty()
    {
        return Some(PathBuf::from(base).join(CACHE_DIR).join(CACHE_FILE));
    }
    let home = std::env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(CACHE_DIR).join(CACHE_FILE))
}

fn system_time_to_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}
