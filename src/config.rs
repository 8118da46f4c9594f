//! Join configuration and YAML configuration file support.
//!
//! [`JoinConfig`] is the per-call configuration of the [`join`](crate::join)
//! facade. It is serde-friendly so it can be embedded in larger configs or
//! loaded from a YAML file through [`SeqJoinConfigFile`].
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "ms1 feature alignment"
//!
//! join:
//!   version: 1
//!   kind: outer
//!   tolerance: 0.01
//!   ppm: 5.0
//!   duplicates: closest
//!   left_method: lookahead
//!   check_inputs: true
//! ```

use std::fs;
use std::path::Path;

use closest::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::SeqJoinError;

/// Which correspondence to compute.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum JoinKind {
    /// Every position of both sequences exactly once (lookahead walk).
    #[default]
    Outer,
    /// Exactly one row per `x`.
    Left,
    /// Matched rows only (closest-match resolver).
    Inner,
    /// Exactly one row per `y` (closest-match resolver).
    Right,
}

impl JoinKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinKind::Outer => "outer",
            JoinKind::Left => "left",
            JoinKind::Inner => "inner",
            JoinKind::Right => "right",
        }
    }
}

/// Algorithm used for [`JoinKind::Left`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeftMethod {
    /// Two-sided lookahead walk.
    #[default]
    Lookahead,
    /// Closest-match resolver with [`JoinConfig::duplicates`].
    Closest,
}

/// Configuration for a single join.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JoinConfig {
    /// Configuration schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Correspondence to compute.
    #[serde(default)]
    pub kind: JoinKind,
    /// Absolute tolerance, applied to every element of the key sequence.
    #[serde(default)]
    pub tolerance: f64,
    /// Relative tolerance in parts per million of the key value, added to
    /// the absolute tolerance.
    #[serde(default)]
    pub ppm: f64,
    /// Duplicate policy for the closest-match based joins.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    /// Algorithm for left joins.
    #[serde(default)]
    pub left_method: LeftMethod,
    /// Reject unsorted input and NaN before joining.
    #[serde(default = "true_value")]
    pub check_inputs: bool,
}

impl JoinConfig {
    /// Create a new configuration with defaults (outer join, zero tolerance).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: JoinKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the absolute tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the relative tolerance in ppm. Typical values for mass matching: 1-20.
    pub fn with_ppm(mut self, ppm: f64) -> Self {
        self.ppm = ppm;
        self
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_left_method(mut self, left_method: LeftMethod) -> Self {
        self.left_method = left_method;
        self
    }

    /// Enable or disable the sortedness and NaN checks.
    /// Disable only when the caller already guarantees clean input.
    pub fn with_check_inputs(mut self, check_inputs: bool) -> Self {
        self.check_inputs = check_inputs;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), SeqJoinError> {
        validate_tolerance(self.tolerance)?;
        self.validate_options()
    }

    /// Everything except `tolerance`, which [`join_with`](crate::join_with)
    /// replaces with its own argument.
    pub(crate) fn validate_options(&self) -> Result<(), SeqJoinError> {
        if self.version < 1 {
            return Err(SeqJoinError::InvalidConfig(format!(
                "version must be >= 1 (got {})",
                self.version
            )));
        }
        if !self.ppm.is_finite() || self.ppm < 0.0 {
            return Err(SeqJoinError::InvalidConfig(format!(
                "ppm must be finite and >= 0 (got {})",
                self.ppm
            )));
        }
        Ok(())
    }
}

/// Reject NaN and negative tolerances. Infinity is allowed.
pub(crate) fn validate_tolerance(tolerance: f64) -> Result<(), SeqJoinError> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(SeqJoinError::InvalidConfig(format!(
            "tolerance must be >= 0 (got {tolerance})"
        )));
    }
    Ok(())
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            kind: JoinKind::default(),
            tolerance: 0.0,
            ppm: 0.0,
            duplicates: DuplicatePolicy::default(),
            left_method: LeftMethod::default(),
            check_inputs: true,
        }
    }
}

/// Errors that can occur when loading YAML configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SeqJoinConfigFile {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    /// Join configuration
    #[serde(default)]
    pub join: JoinConfig,
}

impl SeqJoinConfigFile {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SeqJoinConfigFile = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.join
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("join: {err}")))
    }
}

impl Default for SeqJoinConfigFile {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            join: JoinConfig::default(),
        }
    }
}

fn default_version() -> u32 {
    1
}

fn true_value() -> bool {
    true
}
