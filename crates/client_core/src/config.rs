use std::{collections::HashMap, fs, path::Path};

use anyhow::{bail, Context};
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "booking.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base: "http://127.0.0.1:8080".into(),
        }
    }
}

impl ClientSettings {
    pub fn with_api_base(api_base: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            api_base: normalize_api_base(&api_base.into())?,
        })
    }
}

/// Defaults, then `booking.toml` in the working directory, then the environment.
pub fn load_settings() -> anyhow::Result<ClientSettings> {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    file: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut api_base = ClientSettings::default().api_base;

    if let Ok(raw) = fs::read_to_string(file) {
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", file.display()))?;
        if let Some(v) = file_cfg.get("api_url") {
            api_base = v.clone();
        }
    }

    if let Some(v) = env("BOOKING_API_URL") {
        api_base = v;
    }
    if let Some(v) = env("APP__API_URL") {
        api_base = v;
    }

    ClientSettings::with_api_base(api_base)
}

fn normalize_api_base(raw: &str) -> anyhow::Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        bail!("api base url must not be empty");
    }

    let parsed =
        Url::parse(trimmed).with_context(|| format!("invalid api base url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!(
            "api base url '{trimmed}' must use http or https, got '{}'",
            parsed.scheme()
        );
    }

    Ok(trimmed.to_string())
}
