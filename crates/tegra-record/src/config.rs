//! Capture settings.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::{EngineKind, EngineMask, UnknownEngineName};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    UnknownEngine(#[from] UnknownEngineName),
    #[error("num_frames must be at least 1")]
    ZeroFrames,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_engines")]
    engines: Vec<String>,
    #[serde(default = "default_num_frames")]
    num_frames: u32,
    #[serde(default)]
    hide_unknown: bool,
}

fn default_engines() -> Vec<String> {
    vec![EngineKind::Maxwell3d.name().to_owned()]
}

fn default_num_frames() -> u32 {
    1
}

/// Which engines to capture, for how many frames, and how to present the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordConfig {
    pub engines: EngineMask,
    pub num_frames: u32,
    /// Hide `unk_` fields in reports and filtered views.
    pub hide_unknown: bool,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            engines: EngineMask::default(),
            num_frames: default_num_frames(),
            hide_unknown: false,
        }
    }
}

impl RecordConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json)?;
        if raw.num_frames == 0 {
            return Err(ConfigError::ZeroFrames);
        }

        let engines = raw
            .engines
            .iter()
            .map(|name| name.trim().parse::<EngineKind>())
            .collect::<Result<EngineMask, _>>()?;

        Ok(Self {
            engines,
            num_frames: raw.num_frames,
            hide_unknown: raw.hide_unknown,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = RecordConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RecordConfig::default());
        assert_eq!(config.engines, EngineMask::MAXWELL_3D);
    }

    #[test]
    fn parses_engine_names() {
        let config = RecordConfig::from_json_str(
            r#"{ "engines": ["maxwell", " MAXWDMA "], "num_frames": 3, "hide_unknown": true }"#,
        )
        .unwrap();
        assert_eq!(config.engines, EngineMask::MAXWELL_3D | EngineMask::MAXWELL_DMA);
        assert_eq!(config.num_frames, 3);
        assert!(config.hide_unknown);
    }

    #[test]
    fn empty_engine_list_disables_capture() {
        let config = RecordConfig::from_json_str(r#"{ "engines": [] }"#).unwrap();
        assert!(config.engines.is_empty());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            RecordConfig::from_json_str(r#"{ "engines": ["VULKAN"] }"#),
            Err(ConfigError::UnknownEngine(UnknownEngineName(name))) if name == "VULKAN"
        ));
        assert!(matches!(
            RecordConfig::from_json_str(r#"{ "num_frames": 0 }"#),
            Err(ConfigError::ZeroFrames)
        ));
        assert!(matches!(
            RecordConfig::from_json_str("[1, 2"),
            Err(ConfigError::InvalidJson(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        std::fs::write(&path, r#"{ "engines": ["FERMI2D"] }"#).unwrap();
        let config = RecordConfig::from_path(&path).unwrap();
        assert_eq!(config.engines, EngineMask::FERMI_2D);

        let missing = RecordConfig::from_path(dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
