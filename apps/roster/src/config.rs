use std::{
    collections::HashMap,
    fs,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use client_core::DEFAULT_PAGE_SIZE;
use tracing::warn;

const DEFAULT_SETTINGS_FILE: &str = "roster.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub page_size: NonZeroUsize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Defaults, then the settings file, then environment overrides. A missing file is not an
/// error; an explicitly named one that cannot be read is reported and skipped.
pub fn load_settings(file: Option<&Path>) -> Settings {
    let mut settings = Settings::default();

    let path = file.map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE), Path::to_path_buf);
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw),
        Err(err) if file.is_some() => {
            warn!(path = %path.display(), %err, "could not read settings file")
        }
        Err(_) => {}
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        warn!("ignoring unparsable settings file");
        return;
    };
    if let Some(v) = file_cfg.get("base_url").and_then(toml::Value::as_str) {
        settings.base_url = v.to_string();
    }
    if let Some(v) = file_cfg.get("page_size").and_then(toml::Value::as_integer) {
        if let Some(size) = usize::try_from(v).ok().and_then(NonZeroUsize::new) {
            settings.page_size = size;
        }
    }
}

pub(crate) fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ROSTER_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("APP__BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("APP__PAGE_SIZE") {
        if let Some(size) = parse_page_size(&v) {
            settings.page_size = size;
        }
    }
}

pub(crate) fn parse_page_size(raw: &str) -> Option<NonZeroUsize> {
    raw.trim().parse::<usize>().ok().and_then(NonZeroUsize::new)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
