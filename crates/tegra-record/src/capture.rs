//! JSON capture files: recorded frames saved for offline decoding.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::{EngineKind, EngineMask};
use crate::layout::layout_table;
use crate::recorder::{CapturedFrame, FrameRecorder, FrameSnapshot, RecordEntry, RegisterFile};

#[derive(Debug, Error)]
pub enum CaptureFileError {
    #[error("invalid json: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("frame {frame_number} has more than one {engine} snapshot")]
    DuplicateSnapshot {
        frame_number: u64,
        engine: EngineKind,
    },
    #[error("frame {frame_number}: {engine} register 0x{offset:04X} is listed more than once")]
    DuplicateRegister {
        frame_number: u64,
        engine: EngineKind,
        offset: u32,
    },
    #[error("frame {frame_number}: {engine} register 0x{offset:04X} is past the register file (0x{register_count:04X} registers)")]
    RegisterOutOfRange {
        frame_number: u64,
        engine: EngineKind,
        offset: u32,
        register_count: u32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFile {
    pub frames: Vec<CaptureFrame>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureFrame {
    pub frame_number: u64,
    #[serde(default)]
    pub snapshots: Vec<EngineSnapshot>,
    #[serde(default)]
    pub writes: Vec<RecordEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub engine: EngineKind,
    /// `[offset, value]` pairs.
    pub registers: Vec<(u32, u32)>,
}

impl RegisterFile for CaptureFrame {
    /// The stored snapshot of `engine`, or an empty one if the frame has none.
    fn snapshot(&self, engine: EngineKind) -> FrameSnapshot {
        self.snapshots
            .iter()
            .find(|s| s.engine == engine)
            .map(|s| s.registers.iter().copied().collect())
            .unwrap_or_default()
    }
}

impl CaptureFile {
    pub fn parse_str(json: &str) -> Result<Self, CaptureFileError> {
        let capture: CaptureFile = serde_json::from_str(json)?;
        capture.validate()?;
        Ok(capture)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CaptureFileError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CaptureFileError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Saves frames produced by a [`FrameRecorder`].
    pub fn from_captured<'a, I>(frames: I) -> Self
    where
        I: IntoIterator<Item = &'a CapturedFrame>,
    {
        let frames = frames
            .into_iter()
            .map(|frame| CaptureFrame {
                frame_number: frame.frame_number,
                snapshots: frame
                    .snapshots
                    .iter()
                    .map(|(engine, snapshot)| EngineSnapshot {
                        engine: *engine,
                        registers: snapshot.iter().collect(),
                    })
                    .collect(),
                writes: frame.log.clone(),
            })
            .collect();
        Self { frames }
    }

    fn validate(&self) -> Result<(), CaptureFileError> {
        for frame in &self.frames {
            let mut seen = HashSet::new();
            for snapshot in &frame.snapshots {
                let engine = snapshot.engine;
                if !seen.insert(engine) {
                    return Err(CaptureFileError::DuplicateSnapshot {
                        frame_number: frame.frame_number,
                        engine,
                    });
                }
                let register_count = layout_table(engine).register_count();
                let mut offsets = HashSet::with_capacity(snapshot.registers.len());
                for &(offset, _) in &snapshot.registers {
                    if offset >= register_count {
                        return Err(CaptureFileError::RegisterOutOfRange {
                            frame_number: frame.frame_number,
                            engine,
                            offset,
                            register_count,
                        });
                    }
                    if !offsets.insert(offset) {
                        return Err(CaptureFileError::DuplicateRegister {
                            frame_number: frame.frame_number,
                            engine,
                            offset,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Feeds every stored frame through a [`FrameRecorder`] capturing `engines`.
    ///
    /// Snapshots and writes of engines outside `engines` are dropped exactly as they would be
    /// during a live capture.
    pub fn replay(&self, engines: EngineMask) -> Vec<CapturedFrame> {
        let mut recorder = FrameRecorder::new(engines);
        self.frames
            .iter()
            .map(|frame| {
                recorder.begin_frame(frame.frame_number, frame);
                for write in &frame.writes {
                    recorder.record_write_at(
                        write.engine,
                        write.method,
                        write.arg,
                        write.timestamp,
                        write.draw_index,
                    );
                }
                recorder.end_frame()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::NO_DRAW;
    use pretty_assertions::assert_eq;

    const CAPTURE: &str = r#"{
        "frames": [{
            "frame_number": 12,
            "snapshots": [
                { "engine": "MAXWELL", "registers": [[514, 1280], [515, 720]] },
                { "engine": "FERMI2D", "registers": [[134, 640]] }
            ],
            "writes": [
                { "engine": "MAXWELL", "method": 514, "arg": 1920, "timestamp": 5, "draw_index": 0 },
                { "engine": "FERMI2D", "method": 134, "arg": 320 }
            ]
        }]
    }"#;

    #[test]
    fn parses_and_defaults_missing_fields() {
        let capture = CaptureFile::parse_str(CAPTURE).unwrap();
        let frame = &capture.frames[0];
        assert_eq!(frame.frame_number, 12);
        assert_eq!(frame.writes[1].timestamp, 0);
        assert_eq!(frame.writes[1].draw_index, NO_DRAW);
    }

    #[test]
    fn replay_honours_engine_mask() {
        let capture = CaptureFile::parse_str(CAPTURE).unwrap();
        let frames = capture.replay(EngineMask::MAXWELL_3D);
        assert_eq!(frames.len(), 1);

        let frame = &frames[0];
        assert_eq!(frame.frame_number, 12);
        assert_eq!(frame.log.len(), 1);
        assert_eq!(frame.log[0].arg, 1920);
        assert_eq!(frame.snapshots.len(), 1);
        assert_eq!(frame.snapshots[&EngineKind::Maxwell3d].get(0x203), Some(720));
    }

    #[test]
    fn engines_without_snapshot_start_empty() {
        let capture = CaptureFile::parse_str(CAPTURE).unwrap();
        let frames = capture.replay(EngineMask::MAXWELL_DMA);
        assert!(frames[0].log.is_empty());
        assert!(frames[0].snapshots[&EngineKind::MaxwellDma].is_empty());
    }

    #[test]
    fn saved_frames_replay_identically() {
        let capture = CaptureFile::parse_str(CAPTURE).unwrap();
        let frames = capture.replay(EngineMask::all());
        let saved = CaptureFile::from_captured(&frames);
        let reparsed = CaptureFile::parse_str(&saved.to_json_pretty().unwrap()).unwrap();
        assert_eq!(reparsed.replay(EngineMask::all()), frames);
    }

    #[test]
    fn rejects_invalid_snapshots() {
        let duplicate = r#"{ "frames": [{ "frame_number": 1, "snapshots": [
            { "engine": "MAXWELL", "registers": [] },
            { "engine": "MAXWELL", "registers": [] }
        ] }] }"#;
        assert!(matches!(
            CaptureFile::parse_str(duplicate),
            Err(CaptureFileError::DuplicateSnapshot { frame_number: 1, engine: EngineKind::Maxwell3d })
        ));

        let out_of_range = r#"{ "frames": [{ "frame_number": 2, "snapshots": [
            { "engine": "KEPLERI", "registers": [[127, 0]] }
        ] }] }"#;
        assert!(matches!(
            CaptureFile::parse_str(out_of_range),
            Err(CaptureFileError::RegisterOutOfRange { offset: 127, register_count: 127, .. })
        ));

        let repeated = r#"{ "frames": [{ "frame_number": 4, "snapshots": [
            { "engine": "MAXWELL", "registers": [[514, 1], [515, 2], [514, 3]] }
        ] }] }"#;
        assert!(matches!(
            CaptureFile::parse_str(repeated),
            Err(CaptureFileError::DuplicateRegister { frame_number: 4, offset: 514, .. })
        ));

        assert!(matches!(
            CaptureFile::parse_str(r#"{ "frames": [{ "frame_number": 1, "writes": [{ "engine": "GPU" }] }] }"#),
            Err(CaptureFileError::InvalidJson(_))
        ));
    }
}
