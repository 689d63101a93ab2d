use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{Context, Result};
use contribution_canon_core::RenderOptions;
use contribution_canon_system_contribution_source::{SourceConfig, DEFAULT_TIER_TIMEOUT};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::debug;

pub(crate) const DEFAULT_CONFIG_PATH: &str = "canon.toml";
const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Settings read from the optional TOML configuration file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct CanonConfig {
    pub(crate) upstream: UpstreamSettings,
    pub(crate) render: RenderDefaults,
}

/// `[upstream]` table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct UpstreamSettings {
    pub(crate) api_base_url: String,
    pub(crate) token_env: String,
    pub(crate) tier_timeout_secs: u64,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            token_env: DEFAULT_TOKEN_ENV.to_owned(),
            tier_timeout_secs: DEFAULT_TIER_TIMEOUT.as_secs(),
        }
    }
}

impl UpstreamSettings {
    pub(crate) fn source_config(&self) -> SourceConfig {
        SourceConfig {
            tier_timeout: Duration::from_secs(self.tier_timeout_secs),
            ..SourceConfig::default()
        }
    }

    /// Reads the access token from the configured environment variable.
    pub(crate) fn token(&self) -> Option<SecretString> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
            .map(SecretString::from)
    }
}

/// `[render]` table; raw names are resolved leniently at render time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct RenderDefaults {
    pub(crate) theme: Option<String>,
    pub(crate) speed: Option<String>,
    pub(crate) canon: Option<String>,
    pub(crate) color: Option<String>,
}

impl RenderDefaults {
    /// Resolves options, letting `overrides` win over file values.
    pub(crate) fn resolve(&self, overrides: &RenderDefaults) -> RenderOptions {
        RenderOptions::from_raw(
            overrides.theme.as_deref().or(self.theme.as_deref()),
            overrides.speed.as_deref().or(self.speed.as_deref()),
            overrides.canon.as_deref().or(self.canon.as_deref()),
            overrides.color.as_deref().or(self.color.as_deref()),
        )
    }
}

impl CanonConfig {
    /// Loads the file at `path`, falling back to defaults when it does not exist.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let shown = path.display();
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents)
                .with_context(|| format!("invalid configuration in {shown}")),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                debug!(path = %shown, "no configuration file; using defaults");
                Ok(Self::default())
            }
            Err(error) => Err(error)
                .with_context(|| format!("failed to read configuration at {shown}")),
        }
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .context("failed to parse configuration toml contents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contribution_canon_core::{SpeedPreset, Theme, TurretVariant};

    #[test]
    fn empty_file_yields_defaults() {
        let config = CanonConfig::parse("").expect("empty config is valid");

        assert_eq!(config, CanonConfig::default());
        assert_eq!(config.upstream.api_base_url, "https://api.github.com");
        assert_eq!(config.upstream.token_env, "GITHUB_TOKEN");
        assert_eq!(
            config.upstream.source_config().tier_timeout,
            Duration::from_secs(10)
        );
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = CanonConfig::parse(
            r#"
            [upstream]
            tier_timeout_secs = 3

            [render]
            theme = "neon"
            "#,
        )
        .expect("partial config is valid");

        assert_eq!(config.upstream.tier_timeout_secs, 3);
        assert_eq!(config.upstream.token_env, "GITHUB_TOKEN");
        assert_eq!(config.render.theme.as_deref(), Some("neon"));
        assert!(config.render.speed.is_none());
    }

    #[test]
    fn malformed_files_are_rejected() {
        for contents in [
            "[upstream\napi_base_url = 1",
            "[render]\nshape = \"tank\"",
            "[upstream]\ntier_timeout_secs = \"soon\"",
        ] {
            assert!(CanonConfig::parse(contents).is_err(), "{contents:?}");
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let name = format!("contribution-canon-missing-{}.toml", std::process::id());
        let path = std::env::temp_dir().join(name);
        let config = CanonConfig::load(&path).expect("missing file is fine");
        assert_eq!(config, CanonConfig::default());
    }

    #[test]
    fn flags_override_file_values_and_bad_values_default() {
        let file = RenderDefaults {
            theme: Some("dark".into()),
            speed: Some("slow".into()),
            canon: Some("tank".into()),
            color: Some("123456".into()),
        };
        let flags = RenderDefaults {
            theme: Some("galaxy".into()),
            speed: None,
            canon: Some("spaceship".into()),
            color: Some("nope".into()),
        };

        let options = file.resolve(&flags);
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.speed, SpeedPreset::Slow);
        assert_eq!(options.turret, TurretVariant::Spaceship);
        assert_eq!(options.color_override, None);
    }
}
