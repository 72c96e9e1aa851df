//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use blochkit_geom::POLE_EPSILON;

use crate::easing::Easing;
use crate::error::{EngineError, EngineResult};
use crate::register::MAX_QUBITS;
use crate::scheduler::AnimationSpec;

/// Tunables for animation timing and register size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Length of one gate animation in milliseconds.
    pub animation_ms: u64,
    /// Time between animation frames in milliseconds.
    pub frame_ms: u64,
    /// Animation time curve.
    pub easing: Easing,
    /// Maximum number of qubits (1..=3).
    pub max_qubits: usize,
    /// Distance from a pole within which φ is pinned to 0.
    pub pole_epsilon: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            animation_ms: env_millis("BLOCHKIT_ANIMATION_MS").unwrap_or(1200),
            frame_ms: env_millis("BLOCHKIT_FRAME_MS").unwrap_or(16),
            easing: Easing::EaseInOut,
            max_qubits: MAX_QUBITS,
            pole_epsilon: POLE_EPSILON,
        }
    }
}

fn env_millis(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}

impl EngineConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// A configuration whose animations finish on the first frame.
    pub fn instant() -> Self {
        Self {
            animation_ms: 0,
            ..Self::default()
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> EngineResult<()> {
        if self.frame_ms == 0 {
            return Err(EngineError::Config("frame_ms must be at least 1".into()));
        }
        if !(1..=MAX_QUBITS).contains(&self.max_qubits) {
            return Err(EngineError::Config(format!(
                "max_qubits must be between 1 and {MAX_QUBITS}, got {}",
                self.max_qubits
            )));
        }
        if !(self.pole_epsilon.is_finite() && self.pole_epsilon > 0.0) {
            return Err(EngineError::Config(format!(
                "pole_epsilon must be a positive number, got {}",
                self.pole_epsilon
            )));
        }
        Ok(())
    }

    /// Timing for one gate animation.
    pub fn animation_spec(&self) -> AnimationSpec {
        AnimationSpec {
            duration: Duration::from_millis(self.animation_ms),
            frame_interval: Duration::from_millis(self.frame_ms.max(1)),
            easing: self.easing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "easing": "linear", "max_qubits": 2 }"#)
            .unwrap();
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.max_qubits, 2);
        assert_eq!(config.pole_epsilon, POLE_EPSILON);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "max_qubits": 4 }"#),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "frame_ms": 0 }"#),
            Err(EngineError::Config(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "easing": "bounce" }"#),
            Err(EngineError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "animation_ms": 300, "frame_ms": 20 }"#).unwrap();

        let spec = EngineConfig::from_path(&path).unwrap().animation_spec();
        assert_eq!(spec.duration, Duration::from_millis(300));
        assert_eq!(spec.frame_interval, Duration::from_millis(20));

        assert!(matches!(
            EngineConfig::from_path(dir.path().join("missing.json")),
            Err(EngineError::Io(_))
        ));
    }

    #[test]
    fn test_instant() {
        assert!(EngineConfig::instant().animation_spec().duration.is_zero());
    }
}
