//! Session configuration.
//!
//! Loaded from YAML; every field is optional.
//!
//! ```yaml
//! display:
//!   hdr_enabled: true
//!   peak_nits: 1000
//!   sdr_white_level: 2.5
//! min_surface_size: 64
//! background_code: 23
//! label_font_size: 13
//! start_page: 1
//! start_hdr: true
//! start_eotf: gamma22
//! code_a: 0
//! code_b: 700
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use xdr_pattern::{Pattern, LABEL_SIZE};
use xdr_transfer::Eotf;

use crate::display::DesktopFacts;
use crate::error::{CalError, CalResult};

/// Default background grey, `#171717`.
pub const BACKGROUND_CODE: u8 = 23;

/// Calibration session settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalConfig {
    /// Static display capability facts
    pub display: DesktopFacts,
    /// Lower bound on both surface edges, device pixels
    pub min_surface_size: Option<u32>,
    /// Background grey as an 8-bit code
    pub background_code: u8,
    /// Label font size, DIPs
    pub label_font_size: f32,
    /// First page shown
    pub start_page: usize,
    /// Start in HDR
    pub start_hdr: bool,
    /// Initially selected EOTF
    pub start_eotf: Eotf,
    /// Initial code A
    pub code_a: i16,
    /// Initial code B; `None` keeps the mode default
    pub code_b: Option<i16>,
}

impl Default for CalConfig {
    fn default() -> Self {
        Self {
            display: DesktopFacts::default(),
            min_surface_size: None,
            background_code: BACKGROUND_CODE,
            label_font_size: LABEL_SIZE,
            start_page: 0,
            start_hdr: false,
            start_eotf: Eotf::Pq,
            code_a: 0,
            code_b: None,
        }
    }
}

impl CalConfig {
    /// Loads and validates a YAML config file.
    pub fn load(path: impl AsRef<Path>) -> CalResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CalError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parses and validates YAML.
    pub fn from_yaml(yaml: &str) -> CalResult<Self> {
        let config: CalConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> CalResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Rejects values no session can use.
    pub fn validate(&self) -> CalResult<()> {
        if !(self.label_font_size.is_finite() && self.label_font_size > 0.0) {
            return Err(CalError::InvalidConfig(format!(
                "label_font_size must be positive, got {}",
                self.label_font_size
            )));
        }
        if self.start_page > Pattern::MAX_PAGE {
            return Err(CalError::InvalidConfig(format!(
                "start_page must be 0..={}, got {}",
                Pattern::MAX_PAGE,
                self.start_page
            )));
        }
        if self.code_a < 0 || self.code_b.is_some_and(|b| b < 0) {
            return Err(CalError::InvalidConfig("codes must not be negative".into()));
        }
        if self.min_surface_size == Some(0) {
            return Err(CalError::InvalidConfig("min_surface_size must be at least 1".into()));
        }
        Ok(())
    }

    /// First page.
    pub fn start_pattern(&self) -> Pattern {
        Pattern::from_page(self.start_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let c = CalConfig::default();
        assert_eq!(c.background_code, 23);
        assert_eq!(c.label_font_size, 13.0);
        assert_eq!(c.start_eotf, Eotf::Pq);
        assert_eq!(c.start_pattern(), Pattern::Chessboard);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(CalConfig::from_yaml("{}").unwrap(), CalConfig::default());
    }

    #[test]
    fn partial_yaml() {
        let c = CalConfig::from_yaml(
            "display:\n  hdr_enabled: true\n  peak_nits: 1000\nstart_eotf: g22\nstart_page: 2\ncode_b: 700\n",
        )
        .unwrap();
        assert_eq!(c.display.peak_nits, Some(1000.0));
        assert_eq!(c.display.sdr_white_level, None);
        assert_eq!(c.start_eotf, Eotf::Gamma22);
        assert_eq!(c.start_pattern(), Pattern::Banding);
        assert_eq!(c.code_b, Some(700));
        assert_eq!(c.background_code, 23);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            CalConfig::from_yaml("start_page: 9"),
            Err(CalError::InvalidConfig(_))
        ));
        assert!(matches!(
            CalConfig::from_yaml("label_font_size: 0"),
            Err(CalError::InvalidConfig(_))
        ));
        assert!(matches!(CalConfig::from_yaml("code_a: -1"), Err(CalError::InvalidConfig(_))));
        assert!(matches!(CalConfig::from_yaml("start_eotf: hlg"), Err(CalError::Yaml(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "start_hdr: true\nmin_surface_size: 32").unwrap();
        let c = CalConfig::load(file.path()).unwrap();
        assert!(c.start_hdr);
        assert_eq!(c.min_surface_size, Some(32));
    }

    #[test]
    fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CalConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, CalError::ConfigNotFound { .. }));
    }

    #[test]
    fn yaml_roundtrip() {
        let c = CalConfig {
            start_hdr: true,
            code_b: Some(512),
            ..CalConfig::default()
        };
        assert_eq!(CalConfig::from_yaml(&c.to_yaml().unwrap()).unwrap(), c);
    }
}
