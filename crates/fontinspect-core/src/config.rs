#![forbid(unsafe_code)]

//! Tunable constants for the inspector.
//!
//! Every value has a default matching the shipped content script, so hosts
//! usually pass nothing. Hosts that do pass options hand over a JSON object;
//! unknown keys are rejected so typos surface immediately.

use core::time::Duration;
use std::fmt;

use serde::Deserialize;

use crate::geometry::Size;
use crate::position::PositionerConfig;

/// Settings key holding the global enabled flag.
pub const DEFAULT_ENABLED_KEY: &str = "fi_enabled";

/// DOM id of the singleton overlay element.
pub const DEFAULT_OVERLAY_ID: &str = "fi-tooltip-container";

/// Error raised when host-provided options cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The options were not valid JSON for [`InspectorConfig`].
    Parse(String),
    /// A value parsed but is out of range.
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid inspector options: {msg}"),
            Self::Invalid(what) => write!(f, "invalid inspector option: {what}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Inspector configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectorConfig {
    /// Delay between pointer release and reading the selection.
    /// Default: 10ms
    pub debounce_ms: u32,
    /// How long a "copied" acknowledgment stays attached.
    /// Default: 1000ms
    pub ack_ms: u32,
    /// Overlay width used for placement.
    /// Default: 330px
    pub panel_width: f64,
    /// Overlay height used for placement.
    /// Default: 40px
    pub panel_height: f64,
    /// Gap between the selection and the overlay.
    /// Default: 12px
    pub vertical_offset: f64,
    /// Minimum distance from either viewport edge.
    /// Default: 10px
    pub edge_margin: f64,
    /// Settings key for the enabled flag.
    pub enabled_key: String,
    /// DOM id of the overlay element.
    pub overlay_id: String,
    /// Verbose console logging.
    pub debug: bool,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            ack_ms: 1000,
            panel_width: 330.0,
            panel_height: 40.0,
            vertical_offset: 12.0,
            edge_margin: 10.0,
            enabled_key: DEFAULT_ENABLED_KEY.to_owned(),
            overlay_id: DEFAULT_OVERLAY_ID.to_owned(),
            debug: true,
        }
    }
}

impl InspectorConfig {
    /// Parse options from a JSON object. `null` and `{}` yield the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parsed: Option<Self> =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let config = parsed.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make placement meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            self.panel_width,
            self.panel_height,
            self.vertical_offset,
            self.edge_margin,
        ];
        if lengths.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Invalid("lengths must be finite and non-negative"));
        }
        if self.enabled_key.is_empty() {
            return Err(ConfigError::Invalid("enabled_key must not be empty"));
        }
        if self.overlay_id.is_empty() {
            return Err(ConfigError::Invalid("overlay_id must not be empty"));
        }
        Ok(())
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(u64::from(self.debounce_ms))
    }

    #[must_use]
    pub fn ack_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.ack_ms))
    }

    /// Placement parameters derived from this configuration.
    #[must_use]
    pub fn positioner(&self) -> PositionerConfig {
        PositionerConfig {
            panel: Size::new(self.panel_width, self.panel_height),
            vertical_offset: self.vertical_offset,
            edge_margin: self.edge_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_content_script() {
        let config = InspectorConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(10));
        assert_eq!(config.ack_duration(), Duration::from_secs(1));
        assert_eq!(config.enabled_key, "fi_enabled");
        assert_eq!(config.overlay_id, "fi-tooltip-container");
        assert_eq!(config.positioner(), PositionerConfig::default());
    }

    #[test]
    fn null_and_empty_object_give_defaults() {
        assert_eq!(InspectorConfig::from_json("null"), Ok(InspectorConfig::default()));
        assert_eq!(InspectorConfig::from_json("{}"), Ok(InspectorConfig::default()));
    }

    #[test]
    fn partial_options_override_defaults() {
        let config = InspectorConfig::from_json(r#"{"debounce_ms": 25, "debug": false}"#)
            .expect("valid options");
        assert_eq!(config.debounce_ms, 25);
        assert!(!config.debug);
        assert_eq!(config.ack_ms, 1000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = InspectorConfig::from_json(r#"{"debounce": 25}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn negative_lengths_are_rejected() {
        let err = InspectorConfig::from_json(r#"{"edge_margin": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
