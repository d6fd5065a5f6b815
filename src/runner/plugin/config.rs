//! Bridge configuration file parsing.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::registry::PluginError;
use crate::runner::profile::{CapabilitySet, ClientProfile, FeatureFlag};

/// Feature overrides applied on top of the profile defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeatureOverrides {
    /// Flags forced on.
    pub enable: Vec<String>,
    /// Flags forced off. Applied after `enable`.
    pub disable: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "warn".to_string(),
        }
    }
}

/// Complete bridge configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    /// Client profile name; the default profile when absent.
    pub profile: Option<String>,
    pub features: FeatureOverrides,
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// profile = "ie"
    ///
    /// [features]
    /// enable = ["JS_PERFORMANCE_NOW"]
    /// disable = ["JS_PERFORMANCE_TIMING"]
    ///
    /// [logging]
    /// level = "debug"
    /// ```
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded bridge config");
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, PluginError> {
        Ok(toml::from_str(content)?)
    }

    pub fn profile(&self) -> Result<ClientProfile, PluginError> {
        match &self.profile {
            Some(name) => name.parse(),
            None => Ok(ClientProfile::default()),
        }
    }

    /// Resolve the capability set: profile defaults, then `enable`, then
    /// `disable`. Any unknown name is an error.
    pub fn capabilities(&self) -> Result<CapabilitySet, PluginError> {
        let mut caps = CapabilitySet::for_profile(self.profile()?);
        for name in &self.features.enable {
            caps = caps.with_feature(name.parse::<FeatureFlag>()?);
        }
        for name in &self.features.disable {
            caps = caps.without_feature(name.parse::<FeatureFlag>()?);
        }
        Ok(caps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = BridgeConfig::parse("").unwrap();
        assert_eq!(config, BridgeConfig::new());
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.capabilities().unwrap(), CapabilitySet::default());
    }

    #[test]
    fn test_parse_profile_and_overrides() {
        let config = BridgeConfig::parse(
            r#"
            profile = "ie"

            [features]
            enable = ["JS_PERFORMANCE_NOW"]
            disable = ["js_performance_timing"]

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        let caps = config.capabilities().unwrap();
        assert_eq!(caps.profile(), ClientProfile::Ie);
        assert!(caps.has_feature(FeatureFlag::JsPerformanceNow));
        assert!(!caps.has_feature(FeatureFlag::JsPerformanceTiming));
        assert!(caps.has_feature(FeatureFlag::JsPerformanceNavigation));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_disable_wins_over_enable() {
        let config = BridgeConfig::parse(
            r#"
            [features]
            enable = ["JS_PERFORMANCE_NOW"]
            disable = ["JS_PERFORMANCE_NOW"]
            "#,
        )
        .unwrap();
        assert!(!config
            .capabilities()
            .unwrap()
            .has_feature(FeatureFlag::JsPerformanceNow));
    }

    #[test]
    fn test_unknown_names_are_errors() {
        let config = BridgeConfig::parse(r#"profile = "netscape""#).unwrap();
        assert!(matches!(
            config.capabilities(),
            Err(PluginError::UnknownProfile(_))
        ));

        let config = BridgeConfig::parse("[features]\nenable = [\"JS_WARP_DRIVE\"]").unwrap();
        assert!(matches!(
            config.capabilities(),
            Err(PluginError::UnknownFeature(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            BridgeConfig::parse("profile = ["),
            Err(PluginError::Toml(_))
        ));
    }
}
