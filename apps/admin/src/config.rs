use std::{fs, io, path::Path};

use anyhow::Context;
use client_core::DEFAULT_API_BASE;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "admin.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub log_level: String,
    pub assume_yes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            log_level: "warn".into(),
            assume_yes: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
    log_level: Option<String>,
    assume_yes: Option<bool>,
}

impl Settings {
    /// Command-line flags win over everything else.
    pub fn with_overrides(mut self, api_base: Option<&str>, assume_yes: bool) -> Self {
        if let Some(api_base) = api_base {
            self.api_base = normalize_api_base(api_base);
        }
        self.assume_yes |= assume_yes;
        self
    }
}

/// Defaults, then `admin.toml` (or `explicit_path`), then the environment.
///
/// A missing default file is fine; a missing explicit file is an error.
pub fn load_settings(explicit_path: Option<&Path>) -> anyhow::Result<Settings> {
    load_settings_with(explicit_path, |key| std::env::var(key).ok())
}

fn load_settings_with(
    explicit_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let path = explicit_path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    match fs::read_to_string(path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound && explicit_path.is_none() => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    }

    apply_env(&mut settings, lookup);
    settings.api_base = normalize_api_base(&settings.api_base);
    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.api_base {
        settings.api_base = v;
    }
    if let Some(v) = file_cfg.log_level {
        settings.log_level = v;
    }
    if let Some(v) = file_cfg.assume_yes {
        settings.assume_yes = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("API_BASE") {
        settings.api_base = v;
    }
    if let Some(v) = lookup("APP__API_BASE") {
        settings.api_base = v;
    }

    if let Some(v) = lookup("LOG_LEVEL") {
        settings.log_level = v;
    }
    if let Some(v) = lookup("APP__LOG_LEVEL") {
        settings.log_level = v;
    }

    if let Some(v) = lookup("APP__ASSUME_YES") {
        if let Ok(parsed) = v.trim().parse::<bool>() {
            settings.assume_yes = parsed;
        }
    }
}

pub fn normalize_api_base(raw_api_base: &str) -> String {
    let raw_api_base = raw_api_base.trim();

    if raw_api_base.is_empty() {
        return Settings::default().api_base;
    }

    let with_scheme = if raw_api_base.contains("://") {
        raw_api_base.to_string()
    } else {
        format!("http://{raw_api_base}")
    };

    with_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
