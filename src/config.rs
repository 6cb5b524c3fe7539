//! Viewer configuration loading
//!
//! Defaults for the tree view (page size, side filter, depth bounds) come
//! from an optional TOML file with `DOWNLINE_*` environment overrides on
//! top. Unknown keys are surfaced as non-fatal warnings rather than
//! rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DownlineError, DownlineResult};
use crate::models::SideFilter;
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Defaults the pagination coordinator starts from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub page_size: u32,
    pub side: SideFilter,
    pub min_depth: Option<u32>,
    pub max_depth: Option<u32>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            side: SideFilter::Both,
            min_depth: None,
            max_depth: None,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: &Path) -> DownlineResult<Self> {
        let (config, _warnings) = load_with_warnings(path)?;
        Ok(config)
    }
}

/// Non-fatal configuration warning surfaced to CLI users
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

const KNOWN_KEYS: [&str; 4] = ["page_size", "side", "min_depth", "max_depth"];

/// Load configuration and collect non-fatal warnings (e.g. unknown keys)
pub fn load_with_warnings(path: &Path) -> DownlineResult<(ViewerConfig, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: ViewerConfig = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DownlineError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if config.page_size < 1 || config.page_size > MAX_PAGE_SIZE {
        return Err(DownlineError::InvalidConfig {
            file: path.to_path_buf(),
            message: format!(
                "page_size {} outside allowed range 1..={MAX_PAGE_SIZE}",
                config.page_size
            ),
        });
    }

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from an explicit path if given, else defaults, with env overrides
pub fn load_or_default(path: Option<&Path>) -> ViewerConfig {
    let config = match path {
        Some(path) if path.exists() => ViewerConfig::load(path).unwrap_or_default(),
        _ => ViewerConfig::default(),
    };
    with_env_overrides(config)
}

/// Apply environment variable overrides (DOWNLINE_* prefix)
pub fn with_env_overrides(mut config: ViewerConfig) -> ViewerConfig {
    if let Ok(raw) = std::env::var("DOWNLINE_PAGE_SIZE") {
        if let Ok(page_size) = raw.parse::<u32>() {
            if (1..=MAX_PAGE_SIZE).contains(&page_size) {
                config.page_size = page_size;
            }
        }
    }

    if let Ok(raw) = std::env::var("DOWNLINE_SIDE") {
        config.side = match raw.to_lowercase().as_str() {
            "left" => SideFilter::Left,
            "right" => SideFilter::Right,
            _ => SideFilter::Both,
        };
    }

    if let Ok(raw) = std::env::var("DOWNLINE_MIN_DEPTH") {
        config.min_depth = raw.parse::<u32>().ok();
    }

    if let Ok(raw) = std::env::var("DOWNLINE_MAX_DEPTH") {
        config.max_depth = raw.parse::<u32>().ok();
    }

    config
}

fn find_line_number(content: &str, key: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.trim_start().starts_with(key))
        .map(|index| index + 1)
}

fn suggest_key(key: &str) -> Option<String> {
    KNOWN_KEYS
        .iter()
        .find(|known| levenshtein_close(known, key))
        .map(|known| (*known).to_string())
}

/// Cheap closeness check: equal ignoring case/underscores, or off by one
/// character at equal length
fn levenshtein_close(a: &str, b: &str) -> bool {
    let normalize = |s: &str| s.to_lowercase().replace(['-', '_'], "");
    let (a, b) = (normalize(a), normalize(b));
    if a == b {
        return true;
    }
    if a.len() == b.len() {
        let differing = a.chars().zip(b.chars()).filter(|(x, y)| x != y).count();
        return differing <= 1;
    }
    false
}
