//! Choreography configuration.
//!
//! Every timing constant of the page is configurable. Missing fields take
//! their defaults, so an empty JSON object is a valid configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::connector::ConnectorConfig;
use crate::page::{PageVariant, DEFAULT_DESCRIPTION};
use crate::reveal::{RevealConfig, StaggerConfig};
use crate::typewriter::TypewriterConfig;
use crate::viewport::ViewportConfig;
use crate::{MotionError, MotionResult};

/// Complete configuration of a portfolio page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Whether the connector layer is enabled.
    pub variant: PageVariant,
    /// Text typed into the description card.
    pub description: String,
    /// Typewriter timing.
    pub typewriter: TypewriterConfig,
    /// Single reveal settings (section headings).
    pub reveal: RevealConfig,
    /// Stagger group settings (tech icons).
    pub stagger: StaggerConfig,
    /// Connector geometry and timing.
    pub connector: ConnectorConfig,
    /// Layout breakpoint.
    pub viewport: ViewportConfig,
    /// Visible fraction of the description card that starts the typewriter.
    pub typewriter_trigger_fraction: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            variant: PageVariant::default(),
            description: DEFAULT_DESCRIPTION.to_string(),
            typewriter: TypewriterConfig::default(),
            reveal: RevealConfig::default(),
            stagger: StaggerConfig::default(),
            connector: ConnectorConfig::default(),
            viewport: ViewportConfig::default(),
            typewriter_trigger_fraction: 0.25,
        }
    }
}

fn check_fraction(name: &str, value: f32) -> MotionResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(MotionError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )))
    }
}

impl MotionConfig {
    /// Parse and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> MotionResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or as
    /// [`from_json_str`](Self::from_json_str).
    pub fn from_path(path: impl AsRef<Path>) -> MotionResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded motion config");
        Self::from_json_str(&json)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> MotionResult<String> {
        serde_json::to_string_pretty(self).map_err(MotionError::Serialization)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`MotionError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> MotionResult<()> {
        check_fraction("reveal.trigger_fraction", self.reveal.trigger_fraction)?;
        check_fraction("stagger.trigger_fraction", self.stagger.trigger_fraction)?;
        check_fraction("typewriter_trigger_fraction", self.typewriter_trigger_fraction)?;
        if self.typewriter.char_interval_ms == 0 {
            return Err(MotionError::InvalidConfig(
                "typewriter.char_interval_ms must be positive".to_string(),
            ));
        }
        if self.typewriter.cursor_period_ms == 0 {
            return Err(MotionError::InvalidConfig(
                "typewriter.cursor_period_ms must be positive".to_string(),
            ));
        }
        if self.viewport.breakpoint.is_nan() || self.viewport.breakpoint <= 0.0 {
            return Err(MotionError::InvalidConfig(format!(
                "viewport.breakpoint must be positive, got {}",
                self.viewport.breakpoint
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_is_default() {
        let config = MotionConfig::from_json_str("{}").expect("empty config is valid");
        assert_eq!(config, MotionConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = MotionConfig::from_json_str(
            r#"{"typewriter":{"generating_delay_ms":1000},"variant":"static"}"#,
        )
        .expect("valid");
        assert_eq!(config.typewriter.generating_delay_ms, 1000);
        assert_eq!(config.typewriter.char_interval_ms, 50);
        assert_eq!(config.variant, PageVariant::Static);
    }

    #[test]
    fn test_rejects_bad_fraction() {
        let err = MotionConfig::from_json_str(r#"{"reveal":{"trigger_fraction":1.5}}"#)
            .expect_err("out of range");
        assert!(matches!(err, MotionError::InvalidConfig(_)));
        assert!(err.to_string().contains("reveal.trigger_fraction"));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = MotionConfig::from_json_str(r#"{"typewriter":{"char_interval_ms":0}}"#)
            .expect_err("zero interval");
        assert!(matches!(err, MotionError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = MotionConfig::from_json_str("{ nope").expect_err("malformed");
        assert!(matches!(err, MotionError::Serialization(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"viewport":{{"breakpoint":1024.0}}}}"#).expect("write");

        let config = MotionConfig::from_path(file.path()).expect("load");
        assert!((config.viewport.breakpoint - 1024.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_file() {
        let err = MotionConfig::from_path("/definitely/not/here.json").expect_err("missing");
        assert!(matches!(err, MotionError::Io(_)));
    }

    #[test]
    fn test_to_json_roundtrip() {
        let config = MotionConfig::default();
        let json = config.to_json().expect("serialize");
        assert_eq!(MotionConfig::from_json_str(&json).expect("parse"), config);
    }
}
