//! Client profiles, feature flags and the capability set resolved from them.
//!
//! A [`CapabilitySet`] is resolved once per session and handed to every host
//! object and to host registration. Host code branches on the set; it never
//! looks at the profile directly.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::runner::plugin::registry::PluginError;

/// Simulated client whose behaviour the bridge reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClientProfile {
    Ie,
    Chrome,
    Edge,
    Firefox,
    FirefoxEsr,
}

impl ClientProfile {
    pub const ALL: [ClientProfile; 5] = [
        ClientProfile::Ie,
        ClientProfile::Chrome,
        ClientProfile::Edge,
        ClientProfile::Firefox,
        ClientProfile::FirefoxEsr,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ClientProfile::Ie => "ie",
            ClientProfile::Chrome => "chrome",
            ClientProfile::Edge => "edge",
            ClientProfile::Firefox => "ff",
            ClientProfile::FirefoxEsr => "ff-esr",
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, ClientProfile::Ie)
    }
}

impl Default for ClientProfile {
    fn default() -> Self {
        ClientProfile::Chrome
    }
}

impl fmt::Display for ClientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ClientProfile {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            "firefox" => return Ok(ClientProfile::Firefox),
            "firefox-esr" | "ff_esr" => return Ok(ClientProfile::FirefoxEsr),
            _ => {}
        }
        ClientProfile::ALL
            .iter()
            .copied()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| PluginError::UnknownProfile(s.to_string()))
    }
}

/// Named behaviour switch, enabled or not per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureFlag {
    /// The `Enumerator` class is exposed at all.
    JsEnumerator,
    /// `new Enumerator(x)` throws for any defined `x`.
    JsEnumeratorConstructorThrows,
    /// `Performance` is a constructible event target.
    JsPerformanceConstructible,
    JsPerformanceNow,
    JsPerformanceNavigation,
    JsPerformanceTiming,
}

impl FeatureFlag {
    pub const ALL: [FeatureFlag; 6] = [
        FeatureFlag::JsEnumerator,
        FeatureFlag::JsEnumeratorConstructorThrows,
        FeatureFlag::JsPerformanceConstructible,
        FeatureFlag::JsPerformanceNow,
        FeatureFlag::JsPerformanceNavigation,
        FeatureFlag::JsPerformanceTiming,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureFlag::JsEnumerator => "JS_ENUMERATOR",
            FeatureFlag::JsEnumeratorConstructorThrows => "JS_ENUMERATOR_CONSTRUCTOR_THROWS",
            FeatureFlag::JsPerformanceConstructible => "JS_PERFORMANCE_CONSTRUCTIBLE",
            FeatureFlag::JsPerformanceNow => "JS_PERFORMANCE_NOW",
            FeatureFlag::JsPerformanceNavigation => "JS_PERFORMANCE_NAVIGATION",
            FeatureFlag::JsPerformanceTiming => "JS_PERFORMANCE_TIMING",
        }
    }

    /// Default support table.
    pub fn supported_by(&self, profile: ClientProfile) -> bool {
        DEFAULT_FEATURES
            .get(&profile)
            .map(|features| features.contains(self))
            .unwrap_or(false)
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for FeatureFlag {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FeatureFlag::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PluginError::UnknownFeature(s.to_string()))
    }
}

lazy_static! {
    static ref DEFAULT_FEATURES: HashMap<ClientProfile, BTreeSet<FeatureFlag>> = {
        // Only the legacy client ships `Enumerator`.
        let modern: BTreeSet<FeatureFlag> = FeatureFlag::ALL
            .iter()
            .copied()
            .filter(|f| *f != FeatureFlag::JsEnumerator)
            .collect();
        let legacy: BTreeSet<FeatureFlag> = [
            FeatureFlag::JsEnumerator,
            FeatureFlag::JsPerformanceNavigation,
            FeatureFlag::JsPerformanceTiming,
        ]
        .iter()
        .copied()
        .collect();

        let mut table = HashMap::new();
        for profile in ClientProfile::ALL.iter() {
            if profile.is_legacy() {
                table.insert(*profile, legacy.clone());
            } else {
                table.insert(*profile, modern.clone());
            }
        }
        table
    };
}

/// Resolved `{feature -> enabled}` set for one profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySet {
    profile: ClientProfile,
    features: BTreeSet<FeatureFlag>,
}

impl CapabilitySet {
    pub fn for_profile(profile: ClientProfile) -> Self {
        CapabilitySet {
            profile,
            features: DEFAULT_FEATURES.get(&profile).cloned().unwrap_or_default(),
        }
    }

    pub fn with_feature(mut self, feature: FeatureFlag) -> Self {
        self.features.insert(feature);
        self
    }

    pub fn without_feature(mut self, feature: FeatureFlag) -> Self {
        self.features.remove(&feature);
        self
    }

    pub fn profile(&self) -> ClientProfile {
        self.profile
    }

    pub fn has_feature(&self, feature: FeatureFlag) -> bool {
        self.features.contains(&feature)
    }

    pub fn features(&self) -> impl Iterator<Item = FeatureFlag> + '_ {
        self.features.iter().copied()
    }
}

impl Default for CapabilitySet {
    fn default() -> Self {
        CapabilitySet::for_profile(ClientProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_names_round_trip() {
        for p in ClientProfile::ALL.iter() {
            assert_eq!(p.name().parse::<ClientProfile>().unwrap(), *p);
        }
        assert_eq!("Firefox".parse::<ClientProfile>().unwrap(), ClientProfile::Firefox);
        assert!("netscape".parse::<ClientProfile>().is_err());
    }

    #[test]
    fn test_feature_names_parse_case_insensitively() {
        assert_eq!(
            "js_enumerator_constructor_throws".parse::<FeatureFlag>().unwrap(),
            FeatureFlag::JsEnumeratorConstructorThrows
        );
        assert!("JS_NOPE".parse::<FeatureFlag>().is_err());
    }

    #[test]
    fn test_legacy_defaults() {
        let caps = CapabilitySet::for_profile(ClientProfile::Ie);
        assert!(caps.has_feature(FeatureFlag::JsEnumerator));
        assert!(!caps.has_feature(FeatureFlag::JsEnumeratorConstructorThrows));
        assert!(!caps.has_feature(FeatureFlag::JsPerformanceConstructible));
        assert!(!caps.has_feature(FeatureFlag::JsPerformanceNow));
        assert!(caps.has_feature(FeatureFlag::JsPerformanceNavigation));
        assert!(caps.has_feature(FeatureFlag::JsPerformanceTiming));
    }

    #[test]
    fn test_modern_defaults() {
        for p in ClientProfile::ALL.iter().filter(|p| !p.is_legacy()) {
            let caps = CapabilitySet::for_profile(*p);
            assert!(!caps.has_feature(FeatureFlag::JsEnumerator));
            assert!(!FeatureFlag::JsEnumerator.supported_by(*p));
            for f in FeatureFlag::ALL.iter().filter(|f| **f != FeatureFlag::JsEnumerator) {
                assert!(caps.has_feature(*f), "{} should support {}", p, f);
                assert!(f.supported_by(*p));
            }
        }
    }

    #[test]
    fn test_overrides() {
        let caps = CapabilitySet::for_profile(ClientProfile::Ie)
            .with_feature(FeatureFlag::JsPerformanceNow)
            .without_feature(FeatureFlag::JsPerformanceTiming);
        assert!(caps.has_feature(FeatureFlag::JsPerformanceNow));
        assert!(!caps.has_feature(FeatureFlag::JsPerformanceTiming));
        assert_eq!(caps.profile(), ClientProfile::Ie);
    }
}
